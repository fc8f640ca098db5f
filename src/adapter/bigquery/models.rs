//! BigQuery REST representations
//!
//! Conversions between the BigQuery REST JSON shapes (as serialized by the
//! SDK types) and the domain entities.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::access::{AccessEntry, AccessRole, DatasetAccess, EntityType};
use crate::domain::entities::iam_policy::{Binding, IamPolicy};
use crate::domain::error::SnippetError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableReferenceWire {
    pub project_id: String,
    pub dataset_id: String,
    pub table_id: String,
}

// One entry of `Dataset.access`; exactly one of the entity fields is set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_by_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iam_member: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<TableReferenceWire>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatasetAccessWire {
    #[serde(default)]
    etag: Option<String>,
    #[serde(default)]
    access: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BindingWire {
    pub role: String,
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyWire {
    #[serde(default)]
    pub bindings: Option<Vec<BindingWire>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

fn role_of(role: Option<String>) -> AccessRole {
    AccessRole::parse(role.as_deref().unwrap_or_default())
}

/// Converts one REST access entry into a domain entry
///
/// Entries without a recognized entity field are kept verbatim as
/// `EntityType::Other` so an update writes them back unchanged.
pub fn entry_from_value(value: &Value) -> Result<AccessEntry> {
    let wire: AccessWire =
        serde_json::from_value(value.clone()).context("Unexpected access entry shape")?;
    let role = role_of(wire.role);

    let (entity_type, entity) = if let Some(email) = wire.user_by_email {
        (EntityType::UserEmail, email)
    } else if let Some(email) = wire.group_by_email {
        (EntityType::GroupEmail, email)
    } else if let Some(domain) = wire.domain {
        (EntityType::Domain, domain)
    } else if let Some(group) = wire.special_group {
        (EntityType::SpecialGroup, group)
    } else if let Some(member) = wire.iam_member {
        (EntityType::IamMember, member)
    } else if let Some(view) = wire.view {
        (
            EntityType::View,
            format!("{}.{}.{}", view.project_id, view.dataset_id, view.table_id),
        )
    } else {
        (EntityType::Other, value.to_string())
    };

    Ok(AccessEntry {
        role,
        entity_type,
        entity,
    })
}

/// Converts a domain entry back into its REST shape
pub fn entry_to_value(entry: &AccessEntry) -> Result<Value> {
    // role は空でも必須フィールドとして送る（ビューのエントリは空）
    let mut wire = AccessWire {
        role: Some(entry.role.as_str().to_string()),
        ..AccessWire::default()
    };
    let entity = entry.entity.clone();
    match entry.entity_type {
        EntityType::UserEmail => wire.user_by_email = Some(entity),
        EntityType::GroupEmail => wire.group_by_email = Some(entity),
        EntityType::Domain => wire.domain = Some(entity),
        EntityType::SpecialGroup => wire.special_group = Some(entity),
        EntityType::IamMember => wire.iam_member = Some(entity),
        EntityType::View => wire.view = Some(parse_table_reference(&entity)?),
        EntityType::Other => {
            return serde_json::from_str(&entity).context("Corrupted opaque access entry")
        }
    }

    Ok(serde_json::to_value(wire)?)
}

/// Parses `project.dataset.table`
pub fn parse_table_reference(value: &str) -> Result<TableReferenceWire> {
    let parts: Vec<&str> = value.split('.').collect();
    match parts.as_slice() {
        [project_id, dataset_id, table_id]
            if !project_id.is_empty() && !dataset_id.is_empty() && !table_id.is_empty() =>
        {
            Ok(TableReferenceWire {
                project_id: project_id.to_string(),
                dataset_id: dataset_id.to_string(),
                table_id: table_id.to_string(),
            })
        }
        _ => Err(SnippetError::InvalidArgument(format!(
            "view must be given as project.dataset.table, got {:?}",
            value
        ))
        .into()),
    }
}

/// Reads the ACL and etag from a serialized dataset
pub fn dataset_access_from_value(dataset_id: &str, dataset: Value) -> Result<DatasetAccess> {
    let wire: DatasetAccessWire =
        serde_json::from_value(dataset).context("Unexpected dataset shape")?;

    let entries = wire
        .access
        .unwrap_or_default()
        .iter()
        .map(entry_from_value)
        .collect::<Result<Vec<_>>>()?;

    Ok(DatasetAccess::new(
        dataset_id,
        entries,
        wire.etag.unwrap_or_default(),
    ))
}

/// Serializes an ACL as the REST `access` array
pub fn access_to_value(entries: &[AccessEntry]) -> Result<Value> {
    let access = entries
        .iter()
        .map(entry_to_value)
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::Array(access))
}

pub fn policy_from_value(policy: Value) -> Result<IamPolicy> {
    let wire: PolicyWire = serde_json::from_value(policy).context("Unexpected IAM policy shape")?;

    let bindings = wire
        .bindings
        .unwrap_or_default()
        .into_iter()
        .map(|b| Binding {
            role: b.role,
            members: b.members,
        })
        .collect();

    Ok(IamPolicy {
        bindings,
        etag: wire.etag.filter(|etag| !etag.is_empty()),
    })
}

pub fn policy_to_value(policy: &IamPolicy) -> Result<Value> {
    let wire = PolicyWire {
        bindings: Some(
            policy
                .bindings
                .iter()
                .map(|b| BindingWire {
                    role: b.role.clone(),
                    members: b.members.clone(),
                })
                .collect(),
        ),
        etag: policy.etag.clone(),
    };
    Ok(serde_json::to_value(wire)?)
}

//! # Dataset Access Entities
//!
//! データセットのアクセス制御リスト（ACL）を表すエンティティ

use std::fmt;

/// データセットのアクセスロール
///
/// BigQuery のデータセットACLは基本ロール（READER/WRITER/OWNER）か
/// IAMロール名（例: `roles/bigquery.dataViewer`）を受け付ける
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AccessRole {
    Reader,
    Writer,
    Owner,
    Other(String),
}

impl AccessRole {
    /// APIのロール名から変換
    pub fn parse(role: &str) -> Self {
        match role {
            "READER" => AccessRole::Reader,
            "WRITER" => AccessRole::Writer,
            "OWNER" => AccessRole::Owner,
            other => AccessRole::Other(other.to_string()),
        }
    }

    /// APIのロール名
    pub fn as_str(&self) -> &str {
        match self {
            AccessRole::Reader => "READER",
            AccessRole::Writer => "WRITER",
            AccessRole::Owner => "OWNER",
            AccessRole::Other(role) => role,
        }
    }
}

impl fmt::Display for AccessRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ACLエントリの対象種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    UserEmail,
    GroupEmail,
    Domain,
    SpecialGroup,
    IamMember,
    /// 承認済みビュー（entity は `project.dataset.table`）
    View,
    /// このツールが解釈しないエントリ（ルーティン、データセット等）
    ///
    /// entity にはAPIの表現（JSON）をそのまま保持し、更新時に書き戻す
    Other,
}

impl EntityType {
    /// CLI等で使う名前から変換
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" | "userByEmail" => Some(EntityType::UserEmail),
            "group" | "groupByEmail" => Some(EntityType::GroupEmail),
            "domain" => Some(EntityType::Domain),
            "special-group" | "specialGroup" => Some(EntityType::SpecialGroup),
            "iam-member" | "iamMember" => Some(EntityType::IamMember),
            "view" => Some(EntityType::View),
            _ => None,
        }
    }
}

/// アクセス制御エントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessEntry {
    pub role: AccessRole,
    pub entity_type: EntityType,
    pub entity: String,
}

impl AccessEntry {
    pub fn new(role: AccessRole, entity_type: EntityType, entity: impl Into<String>) -> Self {
        Self {
            role,
            entity_type,
            entity: entity.into(),
        }
    }
}

/// データセットのACLと楽観的同時実行制御用のetag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetAccess {
    pub dataset_id: String,
    pub entries: Vec<AccessEntry>,
    pub etag: String,
}

impl DatasetAccess {
    pub fn new(dataset_id: impl Into<String>, entries: Vec<AccessEntry>, etag: impl Into<String>) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            entries,
            etag: etag.into(),
        }
    }

    /// エントリを末尾に追加したACLを返す
    pub fn with_entry(&self, entry: AccessEntry) -> Vec<AccessEntry> {
        let mut entries = self.entries.clone();
        entries.push(entry);
        entries
    }

    /// 指定した entity のエントリを全て除いたACLを返す
    pub fn without_entity(&self, entity: &str) -> Vec<AccessEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.entity != entity)
            .cloned()
            .collect()
    }

    /// 指定したエントリが含まれるか
    pub fn contains(&self, role: &AccessRole, entity_type: EntityType, entity: &str) -> bool {
        self.entries.iter().any(|entry| {
            &entry.role == role && entry.entity_type == entity_type && entry.entity == entity
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_access() -> DatasetAccess {
        DatasetAccess::new(
            "my_dataset",
            vec![
                AccessEntry::new(AccessRole::Owner, EntityType::SpecialGroup, "projectOwners"),
                AccessEntry::new(
                    AccessRole::Reader,
                    EntityType::GroupEmail,
                    "example-analyst-group@google.com",
                ),
            ],
            "etag-1",
        )
    }

    #[test]
    fn test_access_role_round_trip_names() {
        assert_eq!(AccessRole::parse("READER"), AccessRole::Reader);
        assert_eq!(AccessRole::parse("OWNER").to_string(), "OWNER");
        assert_eq!(
            AccessRole::parse("roles/bigquery.dataViewer"),
            AccessRole::Other("roles/bigquery.dataViewer".to_string())
        );
    }

    #[test]
    fn test_entity_type_parse() {
        assert_eq!(EntityType::parse("group"), Some(EntityType::GroupEmail));
        assert_eq!(EntityType::parse("iamMember"), Some(EntityType::IamMember));
        assert_eq!(EntityType::parse("robot"), None);
    }

    #[test]
    fn test_with_entry_appends() {
        let access = sample_access();
        let entries = access.with_entry(AccessEntry::new(
            AccessRole::Writer,
            EntityType::UserEmail,
            "alice@example.com",
        ));

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].entity, "alice@example.com");
        // 元のACLは変更されない
        assert_eq!(access.entries.len(), 2);
    }

    #[test]
    fn test_without_entity_removes_all_matches() {
        let mut access = sample_access();
        access.entries.push(AccessEntry::new(
            AccessRole::Writer,
            EntityType::GroupEmail,
            "example-analyst-group@google.com",
        ));

        let entries = access.without_entity("example-analyst-group@google.com");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entity, "projectOwners");
    }

    #[test]
    fn test_contains() {
        let access = sample_access();
        assert!(access.contains(
            &AccessRole::Reader,
            EntityType::GroupEmail,
            "example-analyst-group@google.com"
        ));
        assert!(!access.contains(
            &AccessRole::Writer,
            EntityType::GroupEmail,
            "example-analyst-group@google.com"
        ));
    }
}

//! # Report Formatting
//!
//! ACLとIAMポリシーの出力形式

use std::io::Write;

use anyhow::Result;

use crate::domain::entities::access::DatasetAccess;
use crate::domain::entities::iam_policy::IamPolicy;

/// データセットACLを出力
pub fn write_dataset_access<W: Write + ?Sized>(
    w: &mut W,
    dataset_id: &str,
    access: &DatasetAccess,
) -> Result<()> {
    writeln!(w, "Details for Access entries in dataset {}.", dataset_id)?;
    for entry in &access.entries {
        writeln!(w, "Role {} : {}", entry.role, entry.entity)?;
    }
    Ok(())
}

/// テーブル/ビューのIAMポリシーを出力
pub fn write_table_policy<W: Write + ?Sized>(
    w: &mut W,
    resource_id: &str,
    policy: &IamPolicy,
) -> Result<()> {
    writeln!(w, "Details for Access entries in table or view {}.", resource_id)?;
    for role in policy.roles() {
        writeln!(w)?;
        writeln!(w, "Role: {}", role)?;
        writeln!(w, "Entities: [{}]", policy.members(role).join(" "))?;
    }
    Ok(())
}

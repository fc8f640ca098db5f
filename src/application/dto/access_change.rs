//! # Access Change DTOs
//!
//! ACL・IAMポリシーに加える変更の指定

use crate::domain::entities::access::{AccessEntry, AccessRole, EntityType};
use crate::domain::entities::iam_policy::VIEWER_ROLE;

/// サンプルで使うアナリストグループ
pub const EXAMPLE_ANALYST_GROUP: &str = "example-analyst-group@google.com";

/// データセットACLに追加するエントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    pub role: AccessRole,
    pub entity_type: EntityType,
    pub entity: String,
}

impl AccessGrant {
    pub fn new(role: AccessRole, entity_type: EntityType, entity: impl Into<String>) -> Self {
        Self {
            role,
            entity_type,
            entity: entity.into(),
        }
    }

    pub fn to_entry(&self) -> AccessEntry {
        AccessEntry::new(self.role.clone(), self.entity_type, self.entity.clone())
    }
}

impl Default for AccessGrant {
    /// アナリストグループに READER を付与
    fn default() -> Self {
        Self::new(AccessRole::Reader, EntityType::GroupEmail, EXAMPLE_ANALYST_GROUP)
    }
}

/// テーブル/ビューのIAMポリシーに対するメンバー変更
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberChange {
    /// `group:...` / `user:...` 形式のプリンシパル
    pub member: String,
    pub role: String,
}

impl MemberChange {
    pub fn new(member: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            member: member.into(),
            role: role.into(),
        }
    }
}

impl Default for MemberChange {
    fn default() -> Self {
        Self::new(format!("group:{}", EXAMPLE_ANALYST_GROUP), VIEWER_ROLE)
    }
}

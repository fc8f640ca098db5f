//! # IAM Policy
//!
//! テーブル/ビューのIAMポリシー（ロールとメンバーの対応）

/// 閲覧者ロール（基本ロール）
pub const VIEWER_ROLE: &str = "roles/viewer";

/// ロールとメンバーの対応
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub role: String,
    pub members: Vec<String>,
}

/// IAMポリシー
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IamPolicy {
    pub bindings: Vec<Binding>,
    pub etag: Option<String>,
}

impl IamPolicy {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self {
            bindings,
            etag: None,
        }
    }

    /// メンバーをロールに追加（既に存在する場合は何もしない）
    pub fn add(&mut self, member: &str, role: &str) {
        match self.bindings.iter_mut().find(|b| b.role == role) {
            Some(binding) => {
                if !binding.members.iter().any(|m| m == member) {
                    binding.members.push(member.to_string());
                }
            }
            None => self.bindings.push(Binding {
                role: role.to_string(),
                members: vec![member.to_string()],
            }),
        }
    }

    /// メンバーをロールから削除
    ///
    /// 空になったバインディングは取り除く。削除した場合に `true`
    pub fn remove(&mut self, member: &str, role: &str) -> bool {
        let mut removed = false;
        for binding in self.bindings.iter_mut().filter(|b| b.role == role) {
            let before = binding.members.len();
            binding.members.retain(|m| m != member);
            removed |= binding.members.len() != before;
        }
        self.bindings.retain(|b| !b.members.is_empty());
        removed
    }

    /// ポリシーに含まれるロール
    pub fn roles(&self) -> Vec<&str> {
        self.bindings.iter().map(|b| b.role.as_str()).collect()
    }

    /// ロールに割り当てられたメンバー
    pub fn members(&self, role: &str) -> Vec<&str> {
        self.bindings
            .iter()
            .filter(|b| b.role == role)
            .flat_map(|b| b.members.iter().map(String::as_str))
            .collect()
    }

    /// いずれかのロールにメンバーが含まれるか
    pub fn has_member(&self, member: &str) -> bool {
        self.bindings
            .iter()
            .any(|b| b.members.iter().any(|m| m == member))
    }
}

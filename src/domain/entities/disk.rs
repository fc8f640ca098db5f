//! # Disk Entities
//!
//! Compute Engine ディスクの要約情報

/// ディスクの要約
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskSummary {
    pub name: String,
    /// リソースポリシーのURL（整合性グループを含む）
    pub resource_policies: Vec<String>,
}

impl DiskSummary {
    pub fn new(name: impl Into<String>, resource_policies: Vec<String>) -> Self {
        Self {
            name: name.into(),
            resource_policies,
        }
    }

    /// 整合性グループ名を部分文字列として含むリソースポリシー
    pub fn matching_policies<'a>(&'a self, group_name: &'a str) -> impl Iterator<Item = &'a str> {
        self.resource_policies
            .iter()
            .map(String::as_str)
            .filter(move |policy| policy.contains(group_name))
    }

    /// 整合性グループに属しているか
    pub fn in_consistency_group(&self, group_name: &str) -> bool {
        self.matching_policies(group_name).next().is_some()
    }
}

/// ゾーンディスクの完全なリソース名
pub fn zonal_disk_path(project_id: &str, zone: &str, disk_name: &str) -> String {
    format!("projects/{}/zones/{}/disks/{}", project_id, zone, disk_name)
}

//! # BigQuery Repository Traits
//!
//! データセットACLとテーブルIAMポリシーの取得・更新を抽象化

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::access::{AccessEntry, DatasetAccess};
use crate::domain::entities::iam_policy::IamPolicy;

/// データセットACLリポジトリ
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DatasetAccessRepository: Send + Sync {
    /// データセットのACLとetagを取得
    async fn get_access(&self, project_id: &str, dataset_id: &str) -> Result<DatasetAccess>;

    /// ACLを置き換える
    ///
    /// `etag` は読み込み時の値。読み込み以降にデータセットが変更されていた場合は
    /// `SnippetError::ConcurrentModification` を返す
    async fn update_access(
        &self,
        project_id: &str,
        dataset_id: &str,
        entries: Vec<AccessEntry>,
        etag: &str,
    ) -> Result<DatasetAccess>;
}

/// テーブル/ビューのIAMポリシーリポジトリ
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TableIamRepository: Send + Sync {
    async fn get_policy(&self, project_id: &str, dataset_id: &str, table_id: &str)
        -> Result<IamPolicy>;

    async fn set_policy(
        &self,
        project_id: &str,
        dataset_id: &str,
        table_id: &str,
        policy: IamPolicy,
    ) -> Result<IamPolicy>;
}

/// テスト・セットアップ用のリソース作成と削除
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BigQueryProvisioner: Send + Sync {
    async fn create_dataset(&self, project_id: &str, dataset_id: &str) -> Result<()>;

    /// テーブルを作成（`with_id_column` の場合は必須の INTEGER 列 `id` を持つ）
    async fn create_table(
        &self,
        project_id: &str,
        dataset_id: &str,
        table_id: &str,
        with_id_column: bool,
    ) -> Result<()>;

    async fn create_view(
        &self,
        project_id: &str,
        dataset_id: &str,
        view_id: &str,
        query: &str,
    ) -> Result<()>;

    /// データセットを中身ごと削除
    ///
    /// 作成元に関係なくデータセット内の全テーブル・ビューを一覧して削除してから、
    /// データセット本体を削除する
    async fn delete_dataset(&self, project_id: &str, dataset_id: &str) -> Result<()>;
}

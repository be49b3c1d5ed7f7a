// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::publication_repository::{
    PublicationRepository, PublicationUpdate,
};
use crate::infrastructure::graphql::client::GraphqlClient;
use crate::infrastructure::graphql::queries::APPLY_PUBLICATION_MUTATION;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplyPublicationData {
    apply_publication: Option<ApplyPublicationResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplyPublicationResult {
    #[allow(dead_code)]
    crawl_run_id: String,
}

/// 发布变更仓库的 GraphQL 实现
///
/// 变更与查询不同：携带结构化错误的变更响应视为整体失败，
/// 调用方的本地草稿保持不变。
pub struct GraphqlPublicationRepository {
    client: GraphqlClient,
}

impl GraphqlPublicationRepository {
    /// 创建新的变更仓库
    pub fn new(client: GraphqlClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PublicationRepository for GraphqlPublicationRepository {
    async fn apply_publication(
        &self,
        run_id: &str,
        update: &PublicationUpdate,
    ) -> Result<(), RepositoryError> {
        // 空载荷不发出请求，避免回传未变更的字段
        if update.is_empty() {
            tracing::debug!(run_id, "发布载荷为空，跳过提交");
            return Ok(());
        }

        let variables = serde_json::json!({
            "crawlRunId": run_id,
            "update": update,
        });
        let envelope = self
            .client
            .execute::<ApplyPublicationData>(APPLY_PUBLICATION_MUTATION, variables)
            .await?;

        if envelope.has_errors() {
            let messages: Vec<String> = envelope
                .errors
                .into_iter()
                .map(|err| err.message)
                .collect();
            return Err(RepositoryError::Remote(messages.join("; ")));
        }
        if envelope
            .data
            .and_then(|data| data.apply_publication)
            .is_none()
        {
            return Err(RepositoryError::Remote(
                "变更响应缺少确认数据".to_string(),
            ));
        }

        tracing::info!(run_id, "发布差异已应用");
        Ok(())
    }
}

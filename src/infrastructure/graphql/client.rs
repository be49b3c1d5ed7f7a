// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ApiSettings;
use crate::domain::repositories::domain_query_repository::QueryEnvelope;
use crate::infrastructure::graphql::envelope::{GqlRequest, GqlResponse};
use crate::utils::errors::RepositoryError;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// GraphQL 传输客户端
///
/// 单端点的薄封装：序列化请求、校验 HTTP 状态、解码响应体。
/// 结构化错误不在此层判定，原样并入信封交给仓库层处理。
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl GraphqlClient {
    /// 创建新的客户端
    ///
    /// # 参数
    ///
    /// * `endpoint` - GraphQL 端点URL
    /// * `timeout` - 单次请求超时
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, RepositoryError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| RepositoryError::Internal(err.to_string()))?;
        Ok(Self { http, endpoint })
    }

    /// 按接口配置创建客户端
    pub fn from_settings(settings: &ApiSettings) -> Result<Self, RepositoryError> {
        let endpoint = Url::parse(&settings.endpoint)
            .map_err(|err| RepositoryError::Internal(format!("端点URL无效: {}", err)))?;
        Self::new(endpoint, Duration::from_secs(settings.timeout_secs))
    }

    /// 执行一次 GraphQL 操作
    ///
    /// # 参数
    ///
    /// * `query` - 查询或变更文档
    /// * `variables` - 变量对象
    ///
    /// # 返回值
    ///
    /// * `Ok(QueryEnvelope<T>)` - 数据与结构化错误并存的信封
    /// * `Err(RepositoryError)` - 传输或解码层面的失败
    pub async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<QueryEnvelope<T>, RepositoryError> {
        let request = GqlRequest { query, variables };
        tracing::debug!(endpoint = %self.endpoint, "发送 GraphQL 请求");

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: GqlResponse<T> = response.json().await?;
        let envelope = body.into_envelope();
        if envelope.has_errors() {
            tracing::warn!(
                error_count = envelope.errors.len(),
                "GraphQL 响应携带结构化错误"
            );
        }
        Ok(envelope)
    }
}

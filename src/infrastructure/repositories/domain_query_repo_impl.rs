// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::domain::Domain;
use crate::domain::models::url_crawl::UrlCrawl;
use crate::domain::repositories::domain_query_repository::{
    DomainQueryRepository, QueryEnvelope, RunCrawlMap,
};
use crate::infrastructure::graphql::client::GraphqlClient;
use crate::infrastructure::graphql::queries::{
    DOMAIN_TIMELINE_META_QUERY, DOMAIN_TIMELINE_SNAPSHOT_QUERY, URL_CRAWL_HISTORY_QUERY,
};
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct DomainData {
    domain: Option<Domain>,
}

#[derive(Debug, Deserialize)]
struct SnapshotData {
    domain: Option<SnapshotDomain>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotDomain {
    #[serde(default)]
    urls: Vec<SnapshotUrl>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotUrl {
    id: String,
    // null 表示该 URL 在此运行中未被爬取
    crawl_in_run: Option<UrlCrawl>,
}

#[derive(Debug, Deserialize)]
struct HistoryData {
    url: Option<HistoryUrl>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryUrl {
    #[serde(default)]
    crawls: Vec<UrlCrawl>,
}

/// 域名查询仓库的 GraphQL 实现
///
/// 将领域层查询映射为远端查询文档，并把响应的 data/errors
/// 组合原样转换为查询信封。
pub struct GraphqlDomainQueryRepository {
    client: GraphqlClient,
}

impl GraphqlDomainQueryRepository {
    /// 创建新的查询仓库
    pub fn new(client: GraphqlClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DomainQueryRepository for GraphqlDomainQueryRepository {
    async fn domain_timeline_meta(
        &self,
        domain_id: &str,
        urls_limit: u32,
        runs_limit: u32,
    ) -> Result<QueryEnvelope<Domain>, RepositoryError> {
        let variables = serde_json::json!({
            "domainId": domain_id,
            "urlsLimit": urls_limit,
            "runsLimit": runs_limit,
        });
        let envelope = self
            .client
            .execute::<DomainData>(DOMAIN_TIMELINE_META_QUERY, variables)
            .await?;

        Ok(QueryEnvelope {
            data: envelope.data.and_then(|data| data.domain),
            errors: envelope.errors,
        })
    }

    async fn domain_snapshot(
        &self,
        domain_id: &str,
        run_id: &str,
        urls_limit: u32,
    ) -> Result<QueryEnvelope<RunCrawlMap>, RepositoryError> {
        let variables = serde_json::json!({
            "domainId": domain_id,
            "crawlRunId": run_id,
            "urlsLimit": urls_limit,
        });
        let envelope = self
            .client
            .execute::<SnapshotData>(DOMAIN_TIMELINE_SNAPSHOT_QUERY, variables)
            .await?;

        let data = envelope.data.and_then(|data| data.domain).map(|domain| {
            domain
                .urls
                .into_iter()
                .map(|url| (url.id, url.crawl_in_run))
                .collect::<RunCrawlMap>()
        });

        Ok(QueryEnvelope {
            data,
            errors: envelope.errors,
        })
    }

    async fn url_crawl_history(&self, url_id: &str) -> Result<Vec<UrlCrawl>, RepositoryError> {
        let variables = serde_json::json!({ "urlId": url_id });
        let envelope = self
            .client
            .execute::<HistoryData>(URL_CRAWL_HISTORY_QUERY, variables)
            .await?;

        match envelope.data.and_then(|data| data.url) {
            Some(url) => Ok(url.crawls),
            None if envelope.errors.is_empty() => Ok(Vec::new()),
            None => {
                let messages: Vec<String> = envelope
                    .errors
                    .into_iter()
                    .map(|err| err.message)
                    .collect();
                Err(RepositoryError::Remote(messages.join("; ")))
            }
        }
    }
}

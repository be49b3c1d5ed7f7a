// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl_run::CrawlRun;
use crate::domain::models::url::Url;
use crate::domain::models::url_crawl::UrlCrawl;
use crate::domain::repositories::domain_query_repository::{DomainQueryRepository, QueryEnvelope};
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use std::sync::Arc;

/// 快照条目
///
/// 域名下每个 URL 在选定时间点的权威爬取结果。`crawl` 为空
/// 表示该 URL 在选定运行/截止时间内没有爬取记录（展示为"未爬取"）。
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotEntry {
    /// URL 实体
    pub url: Url,
    /// 该时间点的权威爬取结果
    pub crawl: Option<UrlCrawl>,
}

/// 域名快照：按 URL 逐一给出的爬取结果映射
pub type Snapshot = Vec<SnapshotEntry>;

/// 在首页快照中查找首页条目（不存在时回落到首个条目）
pub fn homepage_entry(snapshot: &[SnapshotEntry]) -> Option<&SnapshotEntry> {
    snapshot
        .iter()
        .find(|entry| entry.url.is_homepage())
        .or_else(|| snapshot.first())
}

/// 从爬取历史中选取截止时间之前（含）最近的一条记录
///
/// 仅考虑时间位置有效（大于零）的记录；截止边界为闭区间。
/// 时间相同的记录取靠后的一条。
pub fn latest_at_or_before(history: &[UrlCrawl], cutoff_ms: i64) -> Option<&UrlCrawl> {
    history
        .iter()
        .filter_map(|crawl| {
            let ms = crawl.position_ms();
            (ms > 0 && ms <= cutoff_ms).then_some((ms, crawl))
        })
        .max_by_key(|(ms, _)| *ms)
        .map(|(_, crawl)| crawl)
}

/// 快照解析器特质
///
/// 两种可互换的解析策略的统一接口，按数据源能力选择实现：
/// 服务端按运行关联解析（首选），或按截止时间从完整历史中解析（回退）。
#[async_trait]
pub trait SnapshotResolver: Send + Sync {
    /// 解析指定运行下的域名快照
    ///
    /// 快照必须覆盖域名的每个 URL。生效运行缺失（域名尚无运行）时
    /// 返回空快照而非错误。
    ///
    /// # 参数
    ///
    /// * `domain_id` - 域名唯一标识符
    /// * `run` - 当前生效的运行（可能缺失）
    /// * `urls` - 域名的完整 URL 集合
    ///
    /// # 返回值
    ///
    /// * `Ok(QueryEnvelope<Snapshot>)` - 快照与部分错误并存的信封
    /// * `Err(RepositoryError)` - 传输层面的失败，调用方保留已加载的元数据
    async fn resolve(
        &self,
        domain_id: &str,
        run: Option<&CrawlRun>,
        urls: &[Url],
    ) -> Result<QueryEnvelope<Snapshot>, RepositoryError>;
}

/// 运行关联解析器（首选策略）
///
/// 通过一次批量查询取得生效运行中每个 URL 的爬取结果，
/// 映射中缺失的 URL 视为"此运行未爬取"。
pub struct RunScopedResolver<R: DomainQueryRepository> {
    repo: Arc<R>,
    urls_limit: u32,
}

impl<R: DomainQueryRepository> RunScopedResolver<R> {
    /// 创建新的运行关联解析器
    pub fn new(repo: Arc<R>, urls_limit: u32) -> Self {
        Self { repo, urls_limit }
    }
}

#[async_trait]
impl<R: DomainQueryRepository> SnapshotResolver for RunScopedResolver<R> {
    async fn resolve(
        &self,
        domain_id: &str,
        run: Option<&CrawlRun>,
        urls: &[Url],
    ) -> Result<QueryEnvelope<Snapshot>, RepositoryError> {
        let Some(run) = run else {
            return Ok(QueryEnvelope::ok(Vec::new()));
        };

        let envelope = self
            .repo
            .domain_snapshot(domain_id, &run.id, self.urls_limit)
            .await?;

        let data = envelope.data.map(|crawl_by_url| {
            urls.iter()
                .map(|url| SnapshotEntry {
                    url: url.clone(),
                    crawl: crawl_by_url.get(&url.id).cloned().flatten(),
                })
                .collect::<Snapshot>()
        });

        Ok(QueryEnvelope {
            data,
            errors: envelope.errors,
        })
    }
}

/// 时间截断解析器（回退策略）
///
/// 用于结果不以运行为作用域的数据源：对每个 URL 从其完整爬取
/// 历史中选取截止时间之前（含）最近的一条记录。截止时间取生效
/// 运行的时间轴位置。
pub struct TimeCutoffResolver<R: DomainQueryRepository> {
    repo: Arc<R>,
}

impl<R: DomainQueryRepository> TimeCutoffResolver<R> {
    /// 创建新的时间截断解析器
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// 按任意截止时间解析快照
    ///
    /// 历史缺失的 URL 会逐个向仓库补取；截止时间无效（非正值）时
    /// 所有条目解析为"未爬取"。
    ///
    /// # 参数
    ///
    /// * `cutoff_ms` - 毫秒级截止 epoch（闭区间）
    /// * `urls` - 域名的完整 URL 集合（可携带已加载的 `crawls` 历史）
    pub async fn resolve_at_cutoff(
        &self,
        cutoff_ms: i64,
        urls: &[Url],
    ) -> Result<Snapshot, RepositoryError> {
        let mut snapshot = Vec::with_capacity(urls.len());
        for url in urls {
            let crawl = if cutoff_ms > 0 {
                match &url.crawls {
                    Some(history) => latest_at_or_before(history, cutoff_ms).cloned(),
                    None => {
                        let history = self.repo.url_crawl_history(&url.id).await?;
                        latest_at_or_before(&history, cutoff_ms).cloned()
                    }
                }
            } else {
                None
            };
            snapshot.push(SnapshotEntry {
                url: url.clone(),
                crawl,
            });
        }
        Ok(snapshot)
    }
}

#[async_trait]
impl<R: DomainQueryRepository> SnapshotResolver for TimeCutoffResolver<R> {
    async fn resolve(
        &self,
        _domain_id: &str,
        run: Option<&CrawlRun>,
        urls: &[Url],
    ) -> Result<QueryEnvelope<Snapshot>, RepositoryError> {
        let Some(run) = run else {
            return Ok(QueryEnvelope::ok(Vec::new()));
        };

        let snapshot = self.resolve_at_cutoff(run.position_ms(), urls).await?;
        Ok(QueryEnvelope::ok(snapshot))
    }
}

#[cfg(test)]
#[path = "snapshot_service_test.rs"]
mod tests;

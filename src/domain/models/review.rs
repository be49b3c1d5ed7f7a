// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl_run::CrawlRun;
use crate::domain::models::domain::Domain;
use serde::{Deserialize, Serialize};

/// 审核队列条目
///
/// 审核列表页展示待审核域名的概览：待审核运行数量与最近一次
/// 待审核运行。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQueueItem {
    /// 待审核的域名
    pub domain: Domain,
    /// 待审核运行数量
    pub pending_crawl_runs_count: u32,
    /// 最近一次待审核运行
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_pending_crawl_run: Option<CrawlRun>,
}

impl ReviewQueueItem {
    /// 判断条目是否匹配搜索词
    ///
    /// 对主机名、规范URL与档案名称做大小写不敏感的包含匹配；
    /// 空搜索词匹配一切。
    pub fn matches(&self, search: &str) -> bool {
        let search = search.trim().to_lowercase();
        if search.is_empty() {
            return true;
        }
        let host = self.domain.host.to_lowercase();
        let canonical_url = self.domain.canonical_url.to_lowercase();
        let name = self
            .domain
            .profile
            .as_ref()
            .and_then(|p| p.name.as_deref())
            .unwrap_or("")
            .to_lowercase();
        host.contains(&search) || canonical_url.contains(&search) || name.contains(&search)
    }
}

/// 按搜索词过滤审核队列
pub fn filter_review_queue<'a>(
    items: &'a [ReviewQueueItem],
    search: &str,
) -> Vec<&'a ReviewQueueItem> {
    items.iter().filter(|item| item.matches(search)).collect()
}

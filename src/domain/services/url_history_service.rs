// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::url_crawl::UrlCrawl;
use crate::domain::repositories::domain_query_repository::DomainQueryRepository;
use crate::domain::services::snapshot_service::latest_at_or_before;
use crate::utils::errors::RepositoryError;
use std::cmp::Reverse;
use std::sync::Arc;

/// 单个 URL 的爬取历史会话
///
/// 历史按时间位置降序保存（最新在前）。维护一个当前选中的爬取
/// 记录：刷新后若原选择仍存在则保持，否则回落到最新一条。
#[derive(Debug, Clone, Default)]
pub struct UrlCrawlHistory {
    crawls: Vec<UrlCrawl>,
    selected_id: Option<String>,
}

impl UrlCrawlHistory {
    /// 创建空历史会话
    pub fn new() -> Self {
        Self::default()
    }

    /// 从仓库加载指定 URL 的完整爬取历史
    pub async fn load<R: DomainQueryRepository>(
        repo: Arc<R>,
        url_id: &str,
    ) -> Result<Self, RepositoryError> {
        let crawls = repo.url_crawl_history(url_id).await?;
        let mut history = Self::new();
        history.set_crawls(crawls);
        Ok(history)
    }

    /// 替换历史内容
    ///
    /// 记录按时间位置降序稳定排序（无效时间位置排在末尾）。
    /// 原选中的记录在新历史中缺失时，选择回落到最新一条。
    pub fn set_crawls(&mut self, mut crawls: Vec<UrlCrawl>) {
        crawls.sort_by_key(|crawl| Reverse(crawl.position_ms()));
        let selection_survives = self
            .selected_id
            .as_deref()
            .is_some_and(|id| crawls.iter().any(|crawl| crawl.id == id));
        if !selection_survives {
            self.selected_id = crawls.first().map(|crawl| crawl.id.clone());
        }
        self.crawls = crawls;
    }

    /// 历史记录（最新在前）
    pub fn crawls(&self) -> &[UrlCrawl] {
        &self.crawls
    }

    /// 选中指定的爬取记录
    ///
    /// 记录不存在时保持原选择并返回 `false`。
    pub fn select(&mut self, crawl_id: &str) -> bool {
        if self.crawls.iter().any(|crawl| crawl.id == crawl_id) {
            self.selected_id = Some(crawl_id.to_string());
            true
        } else {
            false
        }
    }

    /// 按降序位置选中一条记录（越界时收敛到最后一条）
    pub fn select_index(&mut self, index: usize) {
        if let Some(crawl) = self
            .crawls
            .get(index.min(self.crawls.len().saturating_sub(1)))
        {
            self.selected_id = Some(crawl.id.clone());
        }
    }

    /// 当前选中记录在降序历史中的位置
    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected_id.as_deref()?;
        self.crawls.iter().position(|crawl| crawl.id == id)
    }

    /// 当前选中的爬取记录
    pub fn selected(&self) -> Option<&UrlCrawl> {
        let id = self.selected_id.as_deref()?;
        self.crawls.iter().find(|crawl| crawl.id == id)
    }

    /// 截止时间之前（含）最近的一条记录
    pub fn at_cutoff(&self, cutoff_ms: i64) -> Option<&UrlCrawl> {
        latest_at_or_before(&self.crawls, cutoff_ms)
    }

    /// 历史是否为空
    pub fn is_empty(&self) -> bool {
        self.crawls.is_empty()
    }
}

#[cfg(test)]
#[path = "url_history_service_test.rs"]
mod tests;

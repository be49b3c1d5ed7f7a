// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl_run::CrawlRun;

/// 域名时间轴
///
/// 由一个域名的全部爬取运行构建出的三个视图：
/// - 拖动时间轴（scrub）：仅含已完成且时间位置有效的运行，按时间升序，
///   索引 0 为最早，末位为最近；
/// - 完整列表（listing）：全部状态中时间位置有效的运行，按时间降序，
///   用于倒序展示与直接选择；
/// - 进行中列表（active）：按状态枚举的 PENDING/RUNNING 运行，
///   时间位置无效的运行也会出现在其中。
///
/// 排序使用稳定排序，时间相同的运行保持输入顺序（确定性并列规则）。
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    scrub: Vec<CrawlRun>,
    listing: Vec<CrawlRun>,
    active: Vec<CrawlRun>,
}

impl Timeline {
    /// 由运行集合构建时间轴
    ///
    /// # 参数
    ///
    /// * `runs` - 域名的全部爬取运行
    pub fn build(runs: &[CrawlRun]) -> Self {
        let mut scrub: Vec<(i64, CrawlRun)> = runs
            .iter()
            .filter(|r| r.is_completed())
            .map(|r| (r.position_ms(), r.clone()))
            .filter(|(ms, _)| *ms > 0)
            .collect();
        scrub.sort_by_key(|(ms, _)| *ms);

        let mut listing: Vec<(i64, CrawlRun)> = runs
            .iter()
            .map(|r| (r.position_ms(), r.clone()))
            .filter(|(ms, _)| *ms > 0)
            .collect();
        listing.sort_by_key(|(ms, _)| std::cmp::Reverse(*ms));

        // 进行中的运行按状态枚举，不因时间位置无效而被剔除
        let mut active: Vec<(i64, CrawlRun)> = runs
            .iter()
            .filter(|r| r.is_active())
            .map(|r| (r.position_ms(), r.clone()))
            .collect();
        active.sort_by_key(|(ms, _)| std::cmp::Reverse(*ms));

        Self {
            scrub: scrub.into_iter().map(|(_, r)| r).collect(),
            listing: listing.into_iter().map(|(_, r)| r).collect(),
            active: active.into_iter().map(|(_, r)| r).collect(),
        }
    }

    /// 拖动时间轴（已完成运行，升序）
    pub fn scrub(&self) -> &[CrawlRun] {
        &self.scrub
    }

    /// 完整运行列表（全部状态，降序）
    pub fn listing(&self) -> &[CrawlRun] {
        &self.listing
    }

    /// 进行中的运行列表（PENDING/RUNNING，降序，无效时间位置在末尾）
    pub fn active(&self) -> &[CrawlRun] {
        &self.active
    }

    /// 拖动时间轴长度
    pub fn len(&self) -> usize {
        self.scrub.len()
    }

    /// 拖动时间轴是否为空
    pub fn is_empty(&self) -> bool {
        self.scrub.is_empty()
    }

    /// 首次加载的默认拖动索引：最近一次已完成运行
    ///
    /// 时间轴为空时返回 `None`。
    pub fn default_index(&self) -> Option<usize> {
        self.scrub.len().checked_sub(1)
    }

    /// 按索引取拖动时间轴上的运行，索引越界时收敛到末位
    pub fn run_at(&self, index: usize) -> Option<&CrawlRun> {
        if self.scrub.is_empty() {
            return None;
        }
        let clamped = index.min(self.scrub.len() - 1);
        self.scrub.get(clamped)
    }

    /// 按 ID 查找运行（含进行中的运行）
    pub fn find(&self, run_id: &str) -> Option<&CrawlRun> {
        self.listing
            .iter()
            .find(|r| r.id == run_id)
            .or_else(|| self.active.iter().find(|r| r.id == run_id))
    }

    /// 解析当前生效的运行
    ///
    /// 显式选中的运行（任意状态，含进行中）优先于拖动位置；
    /// 未选中或选中的运行已不存在时回落到拖动索引处的运行。
    pub fn effective_run(&self, selected_run_id: Option<&str>, scrub_index: usize) -> Option<&CrawlRun> {
        selected_run_id
            .and_then(|id| self.find(id))
            .or_else(|| self.run_at(scrub_index))
    }
}

#[cfg(test)]
#[path = "timeline_service_test.rs"]
mod tests;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl_run::{CrawlRun, ReviewStatus, RunStatus};
use crate::domain::repositories::publication_repository::PublicationUpdate;
use crate::domain::services::snapshot_service::SnapshotEntry;
use std::collections::{BTreeSet, HashMap};

/// 发布状态字段组
///
/// 基线（baseline）与草稿（draft）共用的字段集合。集合使用
/// `BTreeSet`，差集与相等比较天然等价于"排序去重后比较"。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicationFields {
    /// 运行级发布开关
    pub run_is_published: bool,
    /// 运行标签
    pub run_tags: BTreeSet<String>,
    /// 公开的爬取结果ID集合
    pub published_crawl_ids: BTreeSet<String>,
    /// 公开的分区截图ID集合
    pub published_section_ids: BTreeSet<String>,
    /// 域名级发布开关
    pub domain_is_published: bool,
}

/// 域名发布建议的一次性状态机
///
/// 建议只提出一次；用户手动触碰域名级开关后不再覆盖。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DomainPublishHint {
    /// 尚未提出建议
    #[default]
    Unset,
    /// 已自动建议为已发布
    Suggested,
    /// 用户已手动设置，不再建议
    UserOverridden,
}

/// 发布编辑动作
///
/// 所有动作只作用于草稿，从不直接修改基线。
#[derive(Debug, Clone, PartialEq)]
pub enum PublicationAction {
    /// 翻转爬取结果的公开状态；移除首页爬取时级联清空分区集合
    ToggleCrawl(String),
    /// 翻转分区截图的公开状态；仅在可选择分区时生效
    ToggleSection(String),
    /// 选中全部可发布（SUCCESS）的爬取结果
    SelectAllCrawls,
    /// 清空爬取结果选择，并级联清空分区选择
    ClearCrawls,
    /// 选中首页爬取的全部分区
    SelectAllSections,
    /// 清空分区选择
    ClearSections,
    /// 添加或移除运行标签
    SetRunTag { tag: String, enabled: bool },
    /// 写入运行级发布开关
    SetRunPublished(bool),
    /// 写入域名级发布开关（视为用户手动触碰）
    SetDomainPublished(bool),
    /// 草稿回退为基线
    ResetDraft,
}

/// 发布差异
///
/// 草稿相对基线的最小变更集。提交载荷只携带发生变化的字段。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublicationChanges {
    /// 需要公开的爬取结果（草稿有、基线无）
    pub crawls_to_publish: Vec<String>,
    /// 需要取消公开的爬取结果（基线有、草稿无）
    pub crawls_to_unpublish: Vec<String>,
    /// 需要公开的分区截图
    pub sections_to_publish: Vec<String>,
    /// 需要取消公开的分区截图
    pub sections_to_unpublish: Vec<String>,
    /// 运行标签是否变化
    pub run_tags_changed: bool,
    /// 运行级发布开关是否变化
    pub run_is_published_changed: bool,
    /// 域名级发布开关是否变化
    pub domain_is_published_changed: bool,
}

impl PublicationChanges {
    /// 是否存在任何变更
    pub fn has_changes(&self) -> bool {
        !self.crawls_to_publish.is_empty()
            || !self.crawls_to_unpublish.is_empty()
            || !self.sections_to_publish.is_empty()
            || !self.sections_to_unpublish.is_empty()
            || self.run_tags_changed
            || self.run_is_published_changed
            || self.domain_is_published_changed
    }
}

/// 单个运行的发布状态机
///
/// 双层结构：基线镜像最近一次确认的服务端状态，草稿承载本地编辑。
/// `apply` 是纯归约函数 `(state, action) -> state'`，不依赖任何
/// 渲染层；不合法的动作归约为原状态（交互层通过禁用控件阻止，
/// 核心层从不抛错）。
#[derive(Debug, Clone, PartialEq)]
pub struct PublicationState {
    run_id: String,
    run_status: RunStatus,
    review_status: Option<ReviewStatus>,
    homepage_crawl_id: Option<String>,
    homepage_crawl_ok: bool,
    homepage_section_ids: BTreeSet<String>,
    eligible_crawl_ids: BTreeSet<String>,
    baseline: PublicationFields,
    draft: PublicationFields,
    hint: DomainPublishHint,
}

impl PublicationState {
    /// 由运行与快照扫描出基线，草稿初始化为基线
    ///
    /// 爬取结果与分区截图以各自的 `isPublished` 标记为基线公开依据；
    /// 可发布集合为快照中状态为 SUCCESS 的爬取结果。
    ///
    /// # 参数
    ///
    /// * `run` - 当前选定的运行
    /// * `snapshot` - 该运行下的域名快照
    /// * `domain_is_published` - 域名级发布开关的服务端值
    pub fn from_snapshot(
        run: &CrawlRun,
        snapshot: &[SnapshotEntry],
        domain_is_published: bool,
    ) -> Self {
        let mut baseline = PublicationFields {
            run_is_published: run.is_published.unwrap_or(false),
            run_tags: run.tags.iter().flatten().cloned().collect(),
            domain_is_published,
            ..PublicationFields::default()
        };

        let mut homepage_crawl_id = None;
        let mut homepage_crawl_ok = false;
        let mut homepage_section_ids = BTreeSet::new();
        let mut eligible_crawl_ids = BTreeSet::new();

        for entry in snapshot {
            let Some(crawl) = &entry.crawl else { continue };
            if crawl.is_success() {
                eligible_crawl_ids.insert(crawl.id.clone());
            }
            if crawl.is_published() {
                baseline.published_crawl_ids.insert(crawl.id.clone());
            }
            if entry.url.is_homepage() && homepage_crawl_id.is_none() {
                homepage_crawl_id = Some(crawl.id.clone());
                homepage_crawl_ok = crawl.is_success();
                for section in &crawl.sections {
                    homepage_section_ids.insert(section.id.clone());
                    if section.is_published() {
                        baseline.published_section_ids.insert(section.id.clone());
                    }
                }
            }
        }

        let draft = baseline.clone();
        Self {
            run_id: run.id.clone(),
            run_status: run.status,
            review_status: run.review_status,
            homepage_crawl_id,
            homepage_crawl_ok,
            homepage_section_ids,
            eligible_crawl_ids,
            baseline,
            draft,
            hint: DomainPublishHint::default(),
        }
    }

    /// 所属运行ID
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// 基线字段组
    pub fn baseline(&self) -> &PublicationFields {
        &self.baseline
    }

    /// 草稿字段组
    pub fn draft(&self) -> &PublicationFields {
        &self.draft
    }

    /// 域名发布建议的当前状态
    pub fn hint(&self) -> DomainPublishHint {
        self.hint
    }

    /// 草稿是否偏离基线
    pub fn is_dirty(&self) -> bool {
        self.draft != self.baseline
    }

    /// 当前选择是否可发布（仅 SUCCESS 运行）
    pub fn can_publish_selection(&self) -> bool {
        self.run_status == RunStatus::Success
    }

    /// 是否可选择分区
    ///
    /// 要求首页爬取存在且为 SUCCESS、运行可发布，且首页爬取
    /// 当前在草稿公开集合中。
    pub fn can_pick_sections(&self) -> bool {
        let Some(homepage_id) = &self.homepage_crawl_id else {
            return false;
        };
        self.homepage_crawl_ok
            && self.can_publish_selection()
            && self.draft.published_crawl_ids.contains(homepage_id)
    }

    /// 纯归约：对草稿应用一个编辑动作
    ///
    /// 不合法的动作（例如在不可选择分区时翻转分区）返回原状态。
    pub fn apply(mut self, action: PublicationAction) -> Self {
        match action {
            PublicationAction::ToggleCrawl(crawl_id) => {
                if !self.can_publish_selection() {
                    return self;
                }
                if self.draft.published_crawl_ids.contains(&crawl_id) {
                    self.draft.published_crawl_ids.remove(&crawl_id);
                    // 取消首页爬取时级联清空分区
                    if self.homepage_crawl_id.as_deref() == Some(crawl_id.as_str()) {
                        self.draft.published_section_ids.clear();
                    }
                } else if self.eligible_crawl_ids.contains(&crawl_id) {
                    self.draft.published_crawl_ids.insert(crawl_id);
                }
            }
            PublicationAction::ToggleSection(section_id) => {
                if !self.can_pick_sections() {
                    return self;
                }
                if self.draft.published_section_ids.contains(&section_id) {
                    self.draft.published_section_ids.remove(&section_id);
                } else if self.homepage_section_ids.contains(&section_id) {
                    self.draft.published_section_ids.insert(section_id);
                }
            }
            PublicationAction::SelectAllCrawls => {
                if !self.can_publish_selection() {
                    return self;
                }
                self.draft.published_crawl_ids = self.eligible_crawl_ids.clone();
            }
            PublicationAction::ClearCrawls => {
                if !self.can_publish_selection() {
                    return self;
                }
                self.draft.published_crawl_ids.clear();
                self.draft.published_section_ids.clear();
            }
            PublicationAction::SelectAllSections => {
                if !self.can_pick_sections() {
                    return self;
                }
                self.draft.published_section_ids = self.homepage_section_ids.clone();
            }
            PublicationAction::ClearSections => {
                if !self.can_publish_selection() {
                    return self;
                }
                self.draft.published_section_ids.clear();
            }
            PublicationAction::SetRunTag { tag, enabled } => {
                if enabled {
                    self.draft.run_tags.insert(tag);
                } else {
                    self.draft.run_tags.remove(&tag);
                }
            }
            PublicationAction::SetRunPublished(published) => {
                self.draft.run_is_published = published;
            }
            PublicationAction::SetDomainPublished(published) => {
                self.draft.domain_is_published = published;
                self.hint = DomainPublishHint::UserOverridden;
            }
            PublicationAction::ResetDraft => {
                self.draft = self.baseline.clone();
                self.hint = DomainPublishHint::Unset;
            }
        }
        self
    }

    /// 一次性提出域名级发布建议
    ///
    /// 任一运行已发布、或草稿打算发布本运行或其任何爬取结果时，
    /// 将草稿的域名级开关建议为 true；用户已手动触碰过开关
    /// （或已建议过）时不再覆盖。
    pub fn suggest_domain_published(mut self, any_run_published: bool) -> Self {
        if self.hint != DomainPublishHint::Unset {
            return self;
        }
        let intends_publish = any_run_published
            || self.draft.run_is_published
            || !self.draft.published_crawl_ids.is_empty();
        if intends_publish && !self.draft.domain_is_published {
            self.draft.domain_is_published = true;
            self.hint = DomainPublishHint::Suggested;
        }
        self
    }

    /// 计算草稿相对基线的最小差异
    pub fn compute_changes(&self) -> PublicationChanges {
        PublicationChanges {
            crawls_to_publish: self
                .draft
                .published_crawl_ids
                .difference(&self.baseline.published_crawl_ids)
                .cloned()
                .collect(),
            crawls_to_unpublish: self
                .baseline
                .published_crawl_ids
                .difference(&self.draft.published_crawl_ids)
                .cloned()
                .collect(),
            sections_to_publish: self
                .draft
                .published_section_ids
                .difference(&self.baseline.published_section_ids)
                .cloned()
                .collect(),
            sections_to_unpublish: self
                .baseline
                .published_section_ids
                .difference(&self.draft.published_section_ids)
                .cloned()
                .collect(),
            run_tags_changed: self.draft.run_tags != self.baseline.run_tags,
            run_is_published_changed: self.draft.run_is_published
                != self.baseline.run_is_published,
            domain_is_published_changed: self.draft.domain_is_published
                != self.baseline.domain_is_published,
        }
    }

    /// 构建最小差异提交载荷
    ///
    /// 无任何变更时返回 `None`（此时保存控件应处于禁用状态）。
    /// 保存待审核运行时隐式携带 `mark_reviewed = true`。
    pub fn build_update(&self) -> Option<PublicationUpdate> {
        let changes = self.compute_changes();
        if !changes.has_changes() {
            return None;
        }
        Some(PublicationUpdate {
            domain_is_published: changes
                .domain_is_published_changed
                .then_some(self.draft.domain_is_published),
            crawl_run_is_published: changes
                .run_is_published_changed
                .then_some(self.draft.run_is_published),
            crawl_run_tags: changes
                .run_tags_changed
                .then(|| self.draft.run_tags.iter().cloned().collect()),
            mark_reviewed: (self.review_status == Some(ReviewStatus::PendingReview))
                .then_some(true),
            crawls_to_publish: (!changes.crawls_to_publish.is_empty())
                .then_some(changes.crawls_to_publish),
            crawls_to_unpublish: (!changes.crawls_to_unpublish.is_empty())
                .then_some(changes.crawls_to_unpublish),
            sections_to_publish: (!changes.sections_to_publish.is_empty())
                .then_some(changes.sections_to_publish),
            sections_to_unpublish: (!changes.sections_to_unpublish.is_empty())
                .then_some(changes.sections_to_unpublish),
        })
    }

    /// 以新的服务端数据重建基线，保留未保存的草稿
    ///
    /// 轮询刷新路径：草稿与旧基线一致（干净）时随新基线重置；
    /// 存在未保存编辑时保留草稿与建议状态。
    pub fn rebaseline(
        &mut self,
        run: &CrawlRun,
        snapshot: &[SnapshotEntry],
        domain_is_published: bool,
    ) {
        let dirty = self.is_dirty();
        let mut fresh = Self::from_snapshot(run, snapshot, domain_is_published);
        if dirty {
            fresh.draft = self.draft.clone();
            fresh.hint = self.hint;
        }
        *self = fresh;
    }

    /// 保存成功后以新的服务端数据整体重置
    ///
    /// 基线与草稿都来自新一次服务端抓取，不从草稿乐观推导，
    /// 以防远端部分应用或派生状态差异。
    pub fn resync(
        &mut self,
        run: &CrawlRun,
        snapshot: &[SnapshotEntry],
        domain_is_published: bool,
    ) {
        *self = Self::from_snapshot(run, snapshot, domain_is_published);
    }
}

/// 手风琴式发布工作台
///
/// 每个运行持有一个独立的发布状态机面板；切换运行不会丢弃
/// 其他运行的未保存草稿。
#[derive(Debug, Clone, Default)]
pub struct PublicationWorkspace {
    panels: HashMap<String, PublicationState>,
}

impl PublicationWorkspace {
    /// 创建空工作台
    pub fn new() -> Self {
        Self::default()
    }

    /// 打开或刷新一个运行面板
    ///
    /// 面板已存在时按轮询语义重建基线（保留脏草稿）；
    /// 不存在时以快照新建。
    pub fn upsert_panel(
        &mut self,
        run: &CrawlRun,
        snapshot: &[SnapshotEntry],
        domain_is_published: bool,
    ) {
        match self.panels.get_mut(&run.id) {
            Some(panel) => panel.rebaseline(run, snapshot, domain_is_published),
            None => {
                self.panels.insert(
                    run.id.clone(),
                    PublicationState::from_snapshot(run, snapshot, domain_is_published),
                );
            }
        }
    }

    /// 保存成功后强制与服务端重新同步一个面板
    pub fn resync_panel(
        &mut self,
        run: &CrawlRun,
        snapshot: &[SnapshotEntry],
        domain_is_published: bool,
    ) {
        self.panels.insert(
            run.id.clone(),
            PublicationState::from_snapshot(run, snapshot, domain_is_published),
        );
    }

    /// 取指定运行的面板
    pub fn panel(&self, run_id: &str) -> Option<&PublicationState> {
        self.panels.get(run_id)
    }

    /// 对指定运行的面板应用编辑动作
    ///
    /// 面板不存在时返回 `false`。
    pub fn apply(&mut self, run_id: &str, action: PublicationAction) -> bool {
        let Some(panel) = self.panels.remove(run_id) else {
            return false;
        };
        self.panels.insert(run_id.to_string(), panel.apply(action));
        true
    }

    /// 对指定运行的面板提出域名级发布建议
    pub fn suggest_domain(&mut self, run_id: &str, any_run_published: bool) {
        if let Some(panel) = self.panels.remove(run_id) {
            self.panels.insert(
                run_id.to_string(),
                panel.suggest_domain_published(any_run_published),
            );
        }
    }

    /// 丢弃一个运行面板及其草稿
    pub fn discard(&mut self, run_id: &str) {
        self.panels.remove(run_id);
    }

    /// 存在未保存草稿的运行ID列表
    pub fn dirty_run_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .panels
            .iter()
            .filter(|(_, panel)| panel.is_dirty())
            .map(|(id, _)| id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
#[path = "publication_service_test.rs"]
mod tests;

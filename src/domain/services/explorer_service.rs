// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ExplorerSettings;
use crate::domain::models::crawl_run::CrawlRun;
use crate::domain::models::domain::Domain;
use crate::domain::repositories::domain_query_repository::{
    DomainQueryRepository, QueryEnvelope, RemoteError,
};
use crate::domain::repositories::publication_repository::PublicationRepository;
use crate::domain::services::publication_service::{
    PublicationAction, PublicationState, PublicationWorkspace,
};
use crate::domain::services::snapshot_service::{RunScopedResolver, Snapshot, SnapshotResolver};
use crate::domain::services::timeline_service::Timeline;
use crate::utils::errors::RepositoryError;
use std::sync::Arc;
use thiserror::Error;

/// 时间轴浏览器错误类型
#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("仓库错误: {0}")]
    Repository(#[from] RepositoryError),

    #[error("尚未打开任何域名")]
    NoDomainLoaded,

    #[error("未找到运行: {0}")]
    RunNotFound(String),
}

/// 快照请求键
///
/// 每次快照抓取都携带发起时的 (域名, 运行) 键；应用响应时若键
/// 已不匹配当前选择，则该响应过期，直接丢弃（以无关性代替显式
/// 取消）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotKey {
    /// 域名唯一标识符
    pub domain_id: String,
    /// 运行唯一标识符
    pub run_id: String,
}

/// 元数据抓取响应
#[derive(Debug)]
pub struct MetaResponse {
    /// 发起抓取时的域名ID
    pub domain_id: String,
    /// 查询结果信封
    pub envelope: QueryEnvelope<Domain>,
}

/// 快照抓取响应
#[derive(Debug)]
pub struct SnapshotResponse {
    /// 发起抓取时的请求键
    pub key: SnapshotKey,
    /// 查询结果信封
    pub envelope: QueryEnvelope<Snapshot>,
}

/// 域名时间轴浏览器会话
///
/// 单一所有者的事件驱动会话：协调时间轴元数据加载、拖动/选择、
/// 运行快照解析与发布工作台。元数据与快照的抓取彼此独立、可能
/// 乱序完成；过期响应按请求键丢弃，轮询重叠时后到者胜。
/// 失败的抓取只影响本次操作，不丢弃已加载的数据，也不触碰草稿。
pub struct TimelineExplorer<Q, P>
where
    Q: DomainQueryRepository + 'static,
    P: PublicationRepository,
{
    query_repo: Arc<Q>,
    publication_repo: Arc<P>,
    resolver: Arc<dyn SnapshotResolver>,
    urls_limit: u32,
    runs_limit: u32,

    domain_id: Option<String>,
    meta: Option<Domain>,
    meta_errors: Vec<RemoteError>,
    timeline: Timeline,
    scrub_index: usize,
    initialized: bool,
    selected_run_id: Option<String>,
    snapshot: Option<Snapshot>,
    snapshot_errors: Vec<RemoteError>,
    workspace: PublicationWorkspace,
}

impl<Q, P> TimelineExplorer<Q, P>
where
    Q: DomainQueryRepository + 'static,
    P: PublicationRepository,
{
    /// 创建会话并显式指定快照解析器
    pub fn new(
        query_repo: Arc<Q>,
        publication_repo: Arc<P>,
        resolver: Arc<dyn SnapshotResolver>,
        urls_limit: u32,
        runs_limit: u32,
    ) -> Self {
        Self {
            query_repo,
            publication_repo,
            resolver,
            urls_limit,
            runs_limit,
            domain_id: None,
            meta: None,
            meta_errors: Vec::new(),
            timeline: Timeline::default(),
            scrub_index: 0,
            initialized: false,
            selected_run_id: None,
            snapshot: None,
            snapshot_errors: Vec::new(),
            workspace: PublicationWorkspace::new(),
        }
    }

    /// 创建使用运行关联解析策略（首选）的会话
    pub fn with_run_scoped(
        query_repo: Arc<Q>,
        publication_repo: Arc<P>,
        urls_limit: u32,
        runs_limit: u32,
    ) -> Self {
        let resolver = Arc::new(RunScopedResolver::new(Arc::clone(&query_repo), urls_limit));
        Self::new(query_repo, publication_repo, resolver, urls_limit, runs_limit)
    }

    /// 按浏览器配置创建会话
    pub fn from_settings(
        query_repo: Arc<Q>,
        publication_repo: Arc<P>,
        settings: &ExplorerSettings,
    ) -> Self {
        Self::with_run_scoped(
            query_repo,
            publication_repo,
            settings.urls_limit,
            settings.runs_limit,
        )
    }

    /// 打开域名
    ///
    /// 切换到不同域名时重置全部会话状态（拖动索引、选择、快照、
    /// 工作台），默认拖动索引会在下一次元数据加载时按域名重新
    /// 初始化。重复打开当前域名为无操作。
    pub fn open_domain(&mut self, domain_id: &str) {
        if self.domain_id.as_deref() == Some(domain_id) {
            return;
        }
        tracing::debug!(domain_id, "切换域名，重置时间轴会话");
        self.domain_id = Some(domain_id.to_string());
        self.meta = None;
        self.meta_errors.clear();
        self.timeline = Timeline::default();
        self.scrub_index = 0;
        self.initialized = false;
        self.selected_run_id = None;
        self.snapshot = None;
        self.snapshot_errors.clear();
        self.workspace = PublicationWorkspace::new();
    }

    /// 加载时间轴元数据
    pub async fn load_meta(&mut self) -> Result<(), ExplorerError> {
        let domain_id = self.domain_id.clone().ok_or(ExplorerError::NoDomainLoaded)?;
        let response = Self::fetch_meta(
            Arc::clone(&self.query_repo),
            domain_id,
            self.urls_limit,
            self.runs_limit,
        )
        .await?;
        self.apply_meta_response(response);
        Ok(())
    }

    async fn fetch_meta(
        repo: Arc<Q>,
        domain_id: String,
        urls_limit: u32,
        runs_limit: u32,
    ) -> Result<MetaResponse, RepositoryError> {
        let envelope = repo
            .domain_timeline_meta(&domain_id, urls_limit, runs_limit)
            .await?;
        Ok(MetaResponse {
            domain_id,
            envelope,
        })
    }

    /// 应用元数据响应
    ///
    /// 响应所属域名与当前域名不一致时视为过期并丢弃。
    /// 默认拖动索引在每个域名首次获得非空时间轴时初始化一次，
    /// 之后的刷新只做越界收敛。
    pub fn apply_meta_response(&mut self, response: MetaResponse) {
        if self.domain_id.as_deref() != Some(response.domain_id.as_str()) {
            tracing::debug!(domain_id = %response.domain_id, "忽略过期的元数据响应");
            return;
        }
        self.meta_errors = response.envelope.errors;
        if let Some(domain) = response.envelope.data {
            self.timeline = Timeline::build(&domain.crawl_runs);
            if !self.initialized {
                if let Some(index) = self.timeline.default_index() {
                    self.scrub_index = index;
                    self.initialized = true;
                }
            } else if !self.timeline.is_empty() {
                self.scrub_index = self.scrub_index.min(self.timeline.len() - 1);
            }
            self.meta = Some(domain);
        }
    }

    /// 设置拖动索引，同时取消显式运行选择
    pub fn set_scrub_index(&mut self, index: usize) {
        self.scrub_index = match self.timeline.len() {
            0 => 0,
            len => index.min(len - 1),
        };
        self.selected_run_id = None;
    }

    /// 显式选择一个运行（任意状态，含进行中），覆盖拖动位置
    pub fn select_run(&mut self, run_id: &str) -> Result<(), ExplorerError> {
        if self.timeline.find(run_id).is_none() {
            return Err(ExplorerError::RunNotFound(run_id.to_string()));
        }
        self.selected_run_id = Some(run_id.to_string());
        Ok(())
    }

    /// 取消显式选择，回到跟随拖动位置
    pub fn follow_timeline(&mut self) {
        self.selected_run_id = None;
    }

    /// 当前生效的运行
    pub fn effective_run(&self) -> Option<&CrawlRun> {
        self.timeline
            .effective_run(self.selected_run_id.as_deref(), self.scrub_index)
    }

    /// 加载当前生效运行的快照
    ///
    /// 生效运行缺失（域名尚无运行）时快照为空而非错误。
    /// 抓取失败只返回错误，已加载的元数据与快照保持不变。
    pub async fn load_snapshot(&mut self) -> Result<(), ExplorerError> {
        self.reload_snapshot(false).await
    }

    async fn reload_snapshot(&mut self, resync: bool) -> Result<(), ExplorerError> {
        let domain_id = self.domain_id.clone().ok_or(ExplorerError::NoDomainLoaded)?;
        let Some(run) = self.effective_run().cloned() else {
            self.snapshot = Some(Vec::new());
            self.snapshot_errors.clear();
            return Ok(());
        };
        let urls = self
            .meta
            .as_ref()
            .map(|domain| domain.urls.clone())
            .unwrap_or_default();
        let key = SnapshotKey {
            domain_id: domain_id.clone(),
            run_id: run.id.clone(),
        };
        let envelope = self.resolver.resolve(&domain_id, Some(&run), &urls).await?;
        self.apply_snapshot_response(SnapshotResponse { key, envelope }, resync);
        Ok(())
    }

    /// 应用快照响应
    ///
    /// 请求键与当前选择不匹配的响应视为过期并丢弃（新的选择已
    /// 取代旧抓取）。成功应用时同步发布工作台面板。
    pub fn apply_snapshot_response(&mut self, response: SnapshotResponse, resync: bool) {
        if self.current_snapshot_key().as_ref() != Some(&response.key) {
            tracing::debug!(
                domain_id = %response.key.domain_id,
                run_id = %response.key.run_id,
                "忽略过期的快照响应"
            );
            return;
        }
        self.snapshot_errors = response.envelope.errors;
        if let Some(snapshot) = response.envelope.data {
            if let Some(run) = self.effective_run().cloned() {
                let domain_published = self
                    .meta
                    .as_ref()
                    .map(Domain::is_published)
                    .unwrap_or(false);
                if resync {
                    self.workspace.resync_panel(&run, &snapshot, domain_published);
                } else {
                    self.workspace.upsert_panel(&run, &snapshot, domain_published);
                    let any_run_published = self
                        .timeline
                        .listing()
                        .iter()
                        .chain(self.timeline.active())
                        .any(|r| r.is_published.unwrap_or(false));
                    self.workspace.suggest_domain(&run.id, any_run_published);
                }
            }
            self.snapshot = Some(snapshot);
        }
    }

    /// 当前快照请求键
    pub fn current_snapshot_key(&self) -> Option<SnapshotKey> {
        let domain_id = self.domain_id.clone()?;
        let run_id = self.effective_run()?.id.clone();
        Some(SnapshotKey { domain_id, run_id })
    }

    /// 刷新元数据与快照
    ///
    /// 轮询入口：两个抓取并发发出，乱序完成也安全——每个响应
    /// 按键校验，后到者胜。
    pub async fn refresh(&mut self) -> Result<(), ExplorerError> {
        let domain_id = self.domain_id.clone().ok_or(ExplorerError::NoDomainLoaded)?;
        let meta_fut = Self::fetch_meta(
            Arc::clone(&self.query_repo),
            domain_id.clone(),
            self.urls_limit,
            self.runs_limit,
        );
        match self.effective_run().cloned() {
            Some(run) => {
                let resolver = Arc::clone(&self.resolver);
                let urls = self
                    .meta
                    .as_ref()
                    .map(|domain| domain.urls.clone())
                    .unwrap_or_default();
                let key = SnapshotKey {
                    domain_id,
                    run_id: run.id.clone(),
                };
                let snapshot_fut = async move {
                    let envelope = resolver.resolve(&key.domain_id, Some(&run), &urls).await?;
                    Ok::<SnapshotResponse, RepositoryError>(SnapshotResponse { key, envelope })
                };
                let (meta_result, snapshot_result) = futures::join!(meta_fut, snapshot_fut);
                self.apply_meta_response(meta_result?);
                self.apply_snapshot_response(snapshot_result?, false);
            }
            None => {
                let response = meta_fut.await?;
                self.apply_meta_response(response);
                self.reload_snapshot(false).await?;
            }
        }
        Ok(())
    }

    /// 按固定间隔轮询刷新
    ///
    /// 单次刷新失败仅记录日志，不中断轮询，下个周期重试。
    /// 通过丢弃该 Future（例如作为 select 分支）终止轮询。
    pub async fn poll(&mut self, interval: std::time::Duration) {
        let mut timer = tokio::time::interval(interval);
        timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            timer.tick().await;
            if let Err(err) = self.refresh().await {
                tracing::warn!(error = %err, "轮询刷新失败，下个周期重试");
            }
        }
    }

    /// 对当前生效运行的发布面板应用编辑动作
    pub fn apply(&mut self, action: PublicationAction) -> bool {
        let Some(run_id) = self.effective_run().map(|r| r.id.clone()) else {
            return false;
        };
        self.workspace.apply(&run_id, action)
    }

    /// 当前生效运行的发布面板
    pub fn panel(&self) -> Option<&PublicationState> {
        let run_id = &self.effective_run()?.id;
        self.workspace.panel(run_id)
    }

    /// 提交当前面板的最小发布差异
    ///
    /// 无变更时不发出任何请求并返回 `Ok(false)`。提交成功后基线
    /// 由新一次服务端抓取重新同步（不从草稿乐观推导）；提交失败
    /// 时草稿保持不变，调用方可重试或重置。
    pub async fn save(&mut self) -> Result<bool, ExplorerError> {
        let Some(run) = self.effective_run().cloned() else {
            return Ok(false);
        };
        let Some(update) = self
            .workspace
            .panel(&run.id)
            .and_then(PublicationState::build_update)
        else {
            tracing::debug!(run_id = %run.id, "草稿与基线一致，跳过保存");
            return Ok(false);
        };

        self.publication_repo
            .apply_publication(&run.id, &update)
            .await?;
        tracing::info!(run_id = %run.id, "发布差异已提交");

        self.load_meta().await?;
        self.reload_snapshot(true).await?;
        Ok(true)
    }

    /// 已加载的域名元数据
    pub fn meta(&self) -> Option<&Domain> {
        self.meta.as_ref()
    }

    /// 元数据查询附带的结构化错误
    pub fn meta_errors(&self) -> &[RemoteError] {
        &self.meta_errors
    }

    /// 当前时间轴
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// 当前拖动索引
    pub fn scrub_index(&self) -> usize {
        self.scrub_index
    }

    /// 当前显式选择的运行ID
    pub fn selected_run_id(&self) -> Option<&str> {
        self.selected_run_id.as_deref()
    }

    /// 当前快照
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// 快照查询附带的结构化错误
    pub fn snapshot_errors(&self) -> &[RemoteError] {
        &self.snapshot_errors
    }

    /// 发布工作台
    pub fn workspace(&self) -> &PublicationWorkspace {
        &self.workspace
    }
}

#[cfg(test)]
#[path = "explorer_service_test.rs"]
mod tests;

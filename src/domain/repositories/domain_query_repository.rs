// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::domain::Domain;
use crate::domain::models::url_crawl::UrlCrawl;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 远端返回的结构化错误
///
/// 查询接口可能在返回部分数据的同时附带错误列表；
/// 调用方必须渲染可用数据并独立展示错误，不得将其视为整体失败。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteError {
    /// 错误消息，原样展示
    pub message: String,
}

/// 查询结果信封
///
/// 数据与错误并存：`data` 为空且 `errors` 非空才视为完全失败，
/// 两者同时存在时按部分成功处理。
#[derive(Debug, Clone, PartialEq)]
pub struct QueryEnvelope<T> {
    /// 查询返回的数据（可能缺失）
    pub data: Option<T>,
    /// 伴随的结构化错误列表
    pub errors: Vec<RemoteError>,
}

impl<T> QueryEnvelope<T> {
    /// 构造只含数据的信封
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// 是否携带结构化错误
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// 运行快照的服务端解析结果
///
/// 键为 URL 的 ID；值为该 URL 在指定运行中的爬取结果，
/// `None` 表示"该 URL 在此运行中未被爬取"。
pub type RunCrawlMap = HashMap<String, Option<UrlCrawl>>;

/// 域名查询仓库特质
///
/// 定义对远端查询接口的数据访问抽象。该特质遵循依赖倒置原则，
/// 确保领域层不依赖于具体的传输实现。
#[async_trait]
pub trait DomainQueryRepository: Send + Sync {
    /// 获取域名的时间轴元数据
    ///
    /// 返回域名基本信息及其运行集合与 URL 集合（各自受限额约束）。
    ///
    /// # 参数
    ///
    /// * `domain_id` - 域名唯一标识符
    /// * `urls_limit` - URL 数量上限
    /// * `runs_limit` - 运行数量上限
    ///
    /// # 返回值
    ///
    /// * `Ok(QueryEnvelope<Domain>)` - 数据与部分错误并存的信封
    /// * `Err(RepositoryError)` - 传输或解码层面的失败
    async fn domain_timeline_meta(
        &self,
        domain_id: &str,
        urls_limit: u32,
        runs_limit: u32,
    ) -> Result<QueryEnvelope<Domain>, RepositoryError>;

    /// 获取指定运行下的域名快照
    ///
    /// 一次批量查询解析出每个 URL 在该运行中的爬取结果。
    ///
    /// # 参数
    ///
    /// * `domain_id` - 域名唯一标识符
    /// * `run_id` - 运行唯一标识符
    /// * `urls_limit` - URL 数量上限
    ///
    /// # 返回值
    ///
    /// * `Ok(QueryEnvelope<RunCrawlMap>)` - url_id → 爬取结果的映射
    /// * `Err(RepositoryError)` - 传输或解码层面的失败
    async fn domain_snapshot(
        &self,
        domain_id: &str,
        run_id: &str,
        urls_limit: u32,
    ) -> Result<QueryEnvelope<RunCrawlMap>, RepositoryError>;

    /// 获取单个 URL 的完整爬取历史
    ///
    /// 用于不具备运行抽象的数据源（时间截断回退模式）。
    /// 返回顺序不作保证，由调用方按时间轴位置排序。
    ///
    /// # 参数
    ///
    /// * `url_id` - URL 唯一标识符
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<UrlCrawl>)` - 该 URL 的全部爬取记录
    /// * `Err(RepositoryError)` - 查询失败时返回错误
    async fn url_crawl_history(&self, url_id: &str) -> Result<Vec<UrlCrawl>, RepositoryError>;
}

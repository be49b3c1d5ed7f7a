// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl_run::CrawlRun;
use crate::domain::models::url::Url;
use serde::{Deserialize, Serialize};

/// 域名聚合根
///
/// 表示一个被跟踪管理的网站（按主机名识别），携带按时间排序的
/// 运行集合与 URL 集合。由外部摄取流程创建，本核心只通过发布
/// 开关修改它，从不删除。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    /// 域名唯一标识符
    pub id: String,
    /// 主机名
    pub host: String,
    /// 规范URL
    pub canonical_url: String,
    /// 展示名称
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// 是否已对外发布
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    /// 人工维护的档案信息
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<DomainProfile>,
    /// 爬取运行集合（时间轴元数据查询时加载）
    #[serde(default)]
    pub crawl_runs: Vec<CrawlRun>,
    /// URL集合（时间轴元数据查询时加载）
    #[serde(default)]
    pub urls: Vec<Url>,
}

impl Domain {
    /// 取展示标题：档案名称 > 展示名称 > 主机名
    pub fn title(&self) -> &str {
        self.profile
            .as_ref()
            .and_then(|p| p.name.as_deref())
            .or(self.display_name.as_deref())
            .unwrap_or(&self.host)
    }

    /// 域名是否已对外发布
    pub fn is_published(&self) -> bool {
        self.is_published.unwrap_or(false)
    }
}

/// 域名档案信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainProfile {
    /// 档案名称
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// 档案描述
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

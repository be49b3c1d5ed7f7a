// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::url_crawl::UrlCrawl;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 域名下的URL实体
///
/// 每个 URL 归属于且仅归属于一个域名，按语义类型打标。
/// 创建后除爬取历史外不可变。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Url {
    /// URL唯一标识符
    pub id: String,
    /// 所属域名ID
    pub domain_id: String,
    /// 路径部分
    pub path: String,
    /// 规范化后的完整URL
    pub normalized_url: String,
    /// 语义类型
    #[serde(rename = "type")]
    pub url_type: UrlType,
    /// 是否为规范URL
    pub is_canonical: bool,
    /// 创建时间
    pub created_at: String,
    /// 更新时间
    pub updated_at: String,
    /// 完整爬取历史（按需加载，用于时间截断回退模式）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crawls: Option<Vec<UrlCrawl>>,
    /// 指定运行中的爬取结果（运行快照查询时加载）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crawl_in_run: Option<Option<UrlCrawl>>,
}

impl Url {
    /// 是否为首页URL
    pub fn is_homepage(&self) -> bool {
        self.url_type == UrlType::Homepage
    }
}

/// URL语义类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrlType {
    /// 首页
    Homepage,
    /// 关于页
    About,
    /// 联系页
    Contact,
    /// 价格页
    Pricing,
    /// 博客
    Blog,
    /// 招聘页
    Careers,
    /// 文档
    Docs,
    /// 条款页
    Terms,
    /// 隐私页
    Privacy,
    /// 其他（含未识别的类型）
    #[serde(other)]
    Other,
}

impl fmt::Display for UrlType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UrlType::Homepage => write!(f, "HOMEPAGE"),
            UrlType::About => write!(f, "ABOUT"),
            UrlType::Contact => write!(f, "CONTACT"),
            UrlType::Pricing => write!(f, "PRICING"),
            UrlType::Blog => write!(f, "BLOG"),
            UrlType::Careers => write!(f, "CAREERS"),
            UrlType::Docs => write!(f, "DOCS"),
            UrlType::Terms => write!(f, "TERMS"),
            UrlType::Privacy => write!(f, "PRIVACY"),
            UrlType::Other => write!(f, "OTHER"),
        }
    }
}

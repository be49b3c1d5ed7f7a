// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::taxonomy::{Category, Technology};
use crate::utils::time_order::position_of;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 单URL爬取结果实体
///
/// 表示在一次运行（可选）中对单个 URL 的爬取结果，
/// 携带截图、首页分区截图、子任务以及分类/技术关联等嵌套集合。
/// 其时间轴位置由 `crawled_at ?? finished_at ?? created_at` 决定。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlCrawl {
    /// 爬取结果唯一标识符
    pub id: String,
    /// 所属URL的ID
    pub url_id: String,
    /// 所属运行ID（独立爬取时为空）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crawl_run_id: Option<String>,
    /// 爬取状态
    pub status: CrawlStatus,
    /// 是否已对外发布
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    /// 开始时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    /// 结束时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
    /// 实际抓取时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crawled_at: Option<String>,
    /// HTTP状态码
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status: Option<i32>,
    /// 重定向后的最终URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_url: Option<String>,
    /// 页面标题
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// 页面描述
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    /// 页面语言
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// 内容哈希，用于变更检测
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
    /// 错误信息
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// 创建时间
    pub created_at: String,
    /// 更新时间
    pub updated_at: String,
    /// 整页/视口截图
    #[serde(default)]
    pub screenshots: Vec<Screenshot>,
    /// 首页分区截图，每张可独立发布
    #[serde(default)]
    pub sections: Vec<SectionScreenshot>,
    /// 子任务（截图、技术识别、分区、分类等）
    #[serde(default)]
    pub tasks: Vec<CrawlTask>,
    /// 分类关联
    #[serde(default)]
    pub categories: Vec<CrawlCategory>,
    /// 技术栈关联
    #[serde(default)]
    pub technologies: Vec<CrawlTechnology>,
}

impl UrlCrawl {
    /// 计算爬取结果在时间轴上的位置（毫秒级 epoch）
    ///
    /// 取 `crawled_at ?? finished_at ?? created_at` 首个非空值解析；
    /// 全部为空或不可解析时返回 `0`。
    pub fn position_ms(&self) -> i64 {
        position_of(&[
            self.crawled_at.as_deref(),
            self.finished_at.as_deref(),
            Some(self.created_at.as_str()),
        ])
    }

    /// 是否爬取成功
    pub fn is_success(&self) -> bool {
        self.status == CrawlStatus::Success
    }

    /// 服务端是否已将该爬取结果标记为公开
    pub fn is_published(&self) -> bool {
        self.is_published.unwrap_or(false)
    }
}

/// 爬取状态枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrawlStatus {
    /// 等待中
    #[default]
    Pending,
    /// 运行中
    Running,
    /// 成功
    Success,
    /// 失败
    Failed,
}

impl fmt::Display for CrawlStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CrawlStatus::Pending => write!(f, "PENDING"),
            CrawlStatus::Running => write!(f, "RUNNING"),
            CrawlStatus::Success => write!(f, "SUCCESS"),
            CrawlStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// 截图记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screenshot {
    /// 截图唯一标识符
    pub id: String,
    /// 所属爬取结果ID
    pub crawl_id: String,
    /// 截图类型（FULL_PAGE / VIEWPORT）
    pub kind: ScreenshotKind,
    /// 是否已对外发布
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    /// 宽度（像素）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    /// 高度（像素）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    /// 图片格式
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// 对象存储键
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_key: Option<String>,
    /// 公开访问URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
    /// 创建时间
    pub created_at: String,
}

/// 截图类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScreenshotKind {
    /// 整页截图
    FullPage,
    /// 视口截图
    Viewport,
    /// 未识别的类型
    #[serde(other)]
    Other,
}

/// 首页分区截图记录
///
/// 分区截图仅在其所属首页爬取被选为公开时才有发布意义。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionScreenshot {
    /// 分区截图唯一标识符
    pub id: String,
    /// 所属爬取结果ID
    pub crawl_id: String,
    /// 分区在页面中的序号
    pub index: i32,
    /// 是否已对外发布
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    /// 裁剪区域（JSON 序列化）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_json: Option<String>,
    /// 元素定位信息（JSON 序列化）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_json: Option<String>,
    /// 图片格式
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// 对象存储键
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_key: Option<String>,
    /// 公开访问URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
    /// 创建时间
    pub created_at: String,
}

impl SectionScreenshot {
    /// 服务端是否已将该分区标记为公开
    pub fn is_published(&self) -> bool {
        self.is_published.unwrap_or(false)
    }
}

/// 爬取子任务记录
///
/// 每个爬取结果由若干独立的子操作组成，各自带有状态、
/// 尝试次数和错误信息。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlTask {
    /// 子任务唯一标识符
    pub id: String,
    /// 所属爬取结果ID
    pub crawl_id: String,
    /// 子任务类型
    #[serde(rename = "type")]
    pub task_type: CrawlTaskType,
    /// 子任务状态
    pub status: CrawlStatus,
    /// 尝试次数
    pub attempts: i32,
    /// 最后一次尝试时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_attempt_at: Option<String>,
    /// 开始时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    /// 结束时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
    /// 错误信息
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// 创建时间
    pub created_at: String,
    /// 更新时间
    pub updated_at: String,
}

/// 爬取子任务类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrawlTaskType {
    /// 截图
    Screenshot,
    /// 技术栈识别
    Technologies,
    /// 首页分区
    Sections,
    /// 分类
    Categories,
    /// 正文内容
    Content,
    /// 配色提取
    Colors,
    /// 未识别的类型
    #[serde(other)]
    Other,
}

/// 爬取结果与分类的关联
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlCategory {
    /// 置信度评分
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// 关联的分类
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

/// 爬取结果与技术栈的关联
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlTechnology {
    /// 置信度评分
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// 关联的技术
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technology: Option<Technology>,
}

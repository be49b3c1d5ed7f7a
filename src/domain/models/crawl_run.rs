// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::time_order::position_of;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 爬取运行实体
///
/// 表示对一个域名的全部 URL 进行的一次编排式爬取扫描。
/// 运行在时间轴上的位置由 `finished_at ?? started_at ?? created_at`
/// 优先级链决定（取首个非空值）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlRun {
    /// 运行唯一标识符
    pub id: String,
    /// 所属域名ID
    pub domain_id: String,
    /// 运行状态
    pub status: RunStatus,
    /// 审核状态（可选）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_status: Option<ReviewStatus>,
    /// 审核时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<String>,
    /// 是否已对外发布
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    /// 发布时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    /// 自由标签，其中 `"redesign"` 为系统识别的标签
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// 关联的后台作业ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
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

impl CrawlRun {
    /// 计算运行在时间轴上的位置（毫秒级 epoch）
    ///
    /// 取 `finished_at ?? started_at ?? created_at` 首个非空值解析；
    /// 全部为空或不可解析时返回 `0`（无序，需被时间排序过滤）。
    pub fn position_ms(&self) -> i64 {
        position_of(&[
            self.finished_at.as_deref(),
            self.started_at.as_deref(),
            Some(self.created_at.as_str()),
        ])
    }

    /// 是否为已完成的检查点（SUCCESS 或 FAILED）
    pub fn is_completed(&self) -> bool {
        matches!(self.status, RunStatus::Success | RunStatus::Failed)
    }

    /// 是否为进行中的运行（PENDING 或 RUNNING）
    pub fn is_active(&self) -> bool {
        matches!(self.status, RunStatus::Pending | RunStatus::Running)
    }

    /// 是否可参与发布（仅 SUCCESS 状态的运行可发布）
    pub fn is_resolved(&self) -> bool {
        self.status == RunStatus::Success
    }

    /// 是否处于待审核状态
    pub fn is_pending_review(&self) -> bool {
        self.review_status == Some(ReviewStatus::PendingReview)
    }
}

/// 运行状态枚举
///
/// 状态转换遵循以下流程：
/// Pending → Running → Success/Failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
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

/// 将运行状态格式化为字符串表示
///
/// 用于日志记录和状态显示
impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RunStatus::Pending => write!(f, "PENDING"),
            RunStatus::Running => write!(f, "RUNNING"),
            RunStatus::Success => write!(f, "SUCCESS"),
            RunStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// 从字符串解析运行状态
impl FromStr for RunStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(RunStatus::Pending),
            "RUNNING" => Ok(RunStatus::Running),
            "SUCCESS" => Ok(RunStatus::Success),
            "FAILED" => Ok(RunStatus::Failed),
            _ => Err(()),
        }
    }
}

/// 审核状态枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    /// 待审核
    PendingReview,
    /// 已审核
    Reviewed,
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 发布状态变更载荷
///
/// 以运行为作用域的最小差异提交：所有字段均可缺省，缺省表示
/// "不请求变更"。禁止回传未变更的字段，以免覆盖其他操作者的
/// 并发编辑。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationUpdate {
    /// 域名级发布开关
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_is_published: Option<bool>,
    /// 运行级发布开关
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crawl_run_is_published: Option<bool>,
    /// 运行标签全量替换
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crawl_run_tags: Option<Vec<String>>,
    /// 保存待审核运行时隐式置为 true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mark_reviewed: Option<bool>,
    /// 需要公开的爬取结果ID列表
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crawls_to_publish: Option<Vec<String>>,
    /// 需要取消公开的爬取结果ID列表
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crawls_to_unpublish: Option<Vec<String>>,
    /// 需要公开的分区截图ID列表
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections_to_publish: Option<Vec<String>>,
    /// 需要取消公开的分区截图ID列表
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections_to_unpublish: Option<Vec<String>>,
}

impl PublicationUpdate {
    /// 载荷是否为空（未请求任何变更）
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// 发布变更仓库特质
///
/// 定义对远端变更接口的抽象。提交在调用方视角下是原子的，
/// 部分回滚由远端负责，本核心不实现。
#[async_trait]
pub trait PublicationRepository: Send + Sync {
    /// 以运行为作用域应用发布差异
    ///
    /// # 参数
    ///
    /// * `run_id` - 运行唯一标识符
    /// * `update` - 最小差异载荷
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 远端整体应用成功
    /// * `Err(RepositoryError)` - 整体失败，本地草稿应保持不变
    async fn apply_publication(
        &self,
        run_id: &str,
        update: &PublicationUpdate,
    ) -> Result<(), RepositoryError>;
}

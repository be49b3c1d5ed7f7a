// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 网站分类实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// 分类唯一标识符
    pub id: String,
    /// URL友好的标识
    pub slug: String,
    /// 分类名称
    pub name: String,
    /// 分类描述
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// 技术栈实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technology {
    /// 技术唯一标识符
    pub id: String,
    /// URL友好的标识
    pub slug: String,
    /// 技术名称
    pub name: String,
    /// 官网地址
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
}

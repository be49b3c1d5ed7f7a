// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::domain_query_repository::{QueryEnvelope, RemoteError};
use serde::{Deserialize, Serialize};

/// GraphQL 请求体
#[derive(Debug, Serialize)]
pub struct GqlRequest<'a> {
    /// 查询文档
    pub query: &'a str,
    /// 变量
    pub variables: serde_json::Value,
}

/// GraphQL 响应体
///
/// `data` 与 `errors` 可以同时出现（部分成功）；二者的组合
/// 原样转换为领域层信封，由调用方决定如何呈现。
#[derive(Debug, Deserialize)]
pub struct GqlResponse<T> {
    /// 响应数据
    pub data: Option<T>,
    /// 结构化错误列表
    #[serde(default)]
    pub errors: Option<Vec<GqlError>>,
}

/// GraphQL 结构化错误
#[derive(Debug, Deserialize)]
pub struct GqlError {
    /// 错误消息
    pub message: String,
}

impl<T> GqlResponse<T> {
    /// 转换为领域层查询信封
    pub fn into_envelope(self) -> QueryEnvelope<T> {
        QueryEnvelope {
            data: self.data,
            errors: self
                .errors
                .unwrap_or_default()
                .into_iter()
                .map(|err| RemoteError {
                    message: err.message,
                })
                .collect(),
        }
    }
}

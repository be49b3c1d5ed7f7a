// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 仓库层错误类型
///
/// 所有远端访问失败都归入此类型。传输错误与解码错误不会破坏
/// 本地已加载的数据；调用方可以直接重试同一操作。
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("传输错误: {0}")]
    Transport(String),

    #[error("响应解码失败: {0}")]
    Decode(String),

    #[error("远端错误: {0}")]
    Remote(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::Decode(err.to_string())
        } else {
            RepositoryError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Decode(err.to_string())
    }
}

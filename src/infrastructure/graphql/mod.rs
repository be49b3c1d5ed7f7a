// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! GraphQL 传输层
//!
//! 请求/响应信封、查询文档与端点客户端。

pub mod client;
pub mod envelope;
pub mod queries;

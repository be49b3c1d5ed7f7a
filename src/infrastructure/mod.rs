// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 基础设施层
//!
//! 包含 GraphQL 传输层与仓库接口的具体实现。

pub mod graphql;
pub mod repositories;

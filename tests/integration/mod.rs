// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 集成测试入口
//!
//! 通过 wiremock 模拟远端 GraphQL 端点，验证仓库实现与
//! 浏览器会话的端到端行为。

mod helpers;

mod explorer_flow_test;
mod graphql_repository_test;

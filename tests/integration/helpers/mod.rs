// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 集成测试辅助工具

use collectrs::infrastructure::graphql::client::GraphqlClient;
use std::time::Duration;
use wiremock::MockServer;

/// 启动模拟 GraphQL 服务端
pub async fn graphql_server() -> MockServer {
    MockServer::start().await
}

/// 构建指向模拟服务端的客户端
pub fn client_for(server: &MockServer) -> GraphqlClient {
    let endpoint = url::Url::parse(&format!("{}/graphql", server.uri())).unwrap();
    GraphqlClient::new(endpoint, Duration::from_secs(5)).unwrap()
}

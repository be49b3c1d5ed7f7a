// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 仓库接口定义了远端数据访问的抽象契约，具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 域名查询仓库（domain_query_repository）：时间轴元数据与运行快照查询
/// - 发布变更仓库（publication_repository）：发布差异的事务性提交
pub mod domain_query_repository;
pub mod publication_repository;

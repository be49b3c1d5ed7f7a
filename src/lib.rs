// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! # collectrs
//!
//! 域名收录管理核心：在爬取服务之上提供时间轴浏览、运行快照
//! 解析与发布状态管理。
//!
//! ## 模块结构
//!
//! - `config` - 配置加载与校验
//! - `domain` - 领域模型、仓库接口与领域服务
//! - `infrastructure` - GraphQL 传输层与仓库实现
//! - `utils` - 时间排序、错误类型与遥测工具

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod utils;

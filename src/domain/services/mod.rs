// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 领域服务模块
//!
//! 时间轴构建、快照解析、发布状态机与浏览器会话编排。

pub mod explorer_service;
pub mod publication_service;
pub mod snapshot_service;
pub mod timeline_service;
pub mod url_history_service;

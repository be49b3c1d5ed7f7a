// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 领域层
//!
//! 包含领域模型、仓库接口与领域服务。

pub mod models;
pub mod repositories;
pub mod services;

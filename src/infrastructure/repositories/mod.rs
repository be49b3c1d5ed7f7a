// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 仓库接口的 GraphQL 实现

pub mod domain_query_repo_impl;
pub mod publication_repo_impl;

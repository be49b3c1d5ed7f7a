// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 定义核心业务实体和数据结构：
/// - 域名（domain）：聚合根，携带运行集合与URL集合
/// - URL（url）：域名下按语义类型打标的路径
/// - 爬取运行（crawl_run）：一次编排式的全站爬取扫描
/// - 爬取结果（url_crawl）：单URL在一次运行中的爬取产物
/// - 分类与技术（taxonomy）：爬取结果的关联标签
/// - 审核队列（review）：待审核域名的概览条目
pub mod crawl_run;
pub mod domain;
pub mod review;
pub mod taxonomy;
pub mod url;
pub mod url_crawl;

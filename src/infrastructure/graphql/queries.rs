// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! GraphQL 查询与变更文档
//!
//! 字段命名与远端接口的 camelCase 约定一致，领域模型的
//! serde 配置与之对应。

/// 时间轴元数据查询
///
/// 一次取得域名基本信息、运行集合与 URL 集合（不含爬取结果），
/// 载荷保持轻量以支撑轮询。
pub const DOMAIN_TIMELINE_META_QUERY: &str = r#"
query DomainTimelineMeta($domainId: ID!, $urlsLimit: Int!, $runsLimit: Int!) {
  domain(id: $domainId) {
    id
    host
    canonicalUrl
    displayName
    isPublished
    profile {
      name
      description
    }
    crawlRuns(limit: $runsLimit) {
      id
      domainId
      status
      reviewStatus
      reviewedAt
      isPublished
      publishedAt
      tags
      jobId
      startedAt
      finishedAt
      error
      createdAt
      updatedAt
    }
    urls(limit: $urlsLimit) {
      id
      domainId
      path
      normalizedUrl
      type
      isCanonical
      createdAt
      updatedAt
    }
  }
}
"#;

/// 运行快照查询
///
/// 批量解析每个 URL 在指定运行中的爬取结果及其嵌套集合。
/// `crawlInRun` 为 null 表示该 URL 在此运行中未被爬取。
pub const DOMAIN_TIMELINE_SNAPSHOT_QUERY: &str = r#"
query DomainTimelineSnapshot($domainId: ID!, $crawlRunId: ID!, $urlsLimit: Int!) {
  domain(id: $domainId) {
    id
    urls(limit: $urlsLimit) {
      id
      crawlInRun(crawlRunId: $crawlRunId) {
        id
        urlId
        crawlRunId
        status
        isPublished
        startedAt
        finishedAt
        crawledAt
        httpStatus
        finalUrl
        title
        metaDescription
        language
        contentHash
        error
        createdAt
        updatedAt
        screenshots {
          id
          crawlId
          kind
          isPublished
          width
          height
          format
          storageKey
          publicUrl
          createdAt
        }
        sections {
          id
          crawlId
          index
          isPublished
          clipJson
          elementJson
          format
          storageKey
          publicUrl
          createdAt
        }
        tasks {
          id
          crawlId
          type
          status
          attempts
          lastAttemptAt
          startedAt
          finishedAt
          error
          createdAt
          updatedAt
        }
        categories {
          confidence
          category {
            id
            name
            slug
          }
        }
        technologies {
          confidence
          technology {
            id
            name
            slug
            websiteUrl
          }
        }
      }
    }
  }
}
"#;

/// 单 URL 完整爬取历史查询（时间截断回退模式）
pub const URL_CRAWL_HISTORY_QUERY: &str = r#"
query UrlCrawlHistory($urlId: ID!) {
  url(id: $urlId) {
    id
    crawls {
      id
      urlId
      crawlRunId
      status
      isPublished
      startedAt
      finishedAt
      crawledAt
      httpStatus
      finalUrl
      title
      metaDescription
      language
      contentHash
      error
      createdAt
      updatedAt
      sections {
        id
        crawlId
        index
        isPublished
        createdAt
      }
    }
  }
}
"#;

/// 发布差异提交变更
pub const APPLY_PUBLICATION_MUTATION: &str = r#"
mutation ApplyPublication($crawlRunId: ID!, $update: PublicationUpdateInput!) {
  applyPublication(crawlRunId: $crawlRunId, update: $update) {
    crawlRunId
  }
}
"#;

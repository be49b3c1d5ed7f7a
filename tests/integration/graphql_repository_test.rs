// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{client_for, graphql_server};
use collectrs::domain::repositories::domain_query_repository::DomainQueryRepository;
use collectrs::domain::repositories::publication_repository::{
    PublicationRepository, PublicationUpdate,
};
use collectrs::infrastructure::repositories::domain_query_repo_impl::GraphqlDomainQueryRepository;
use collectrs::infrastructure::repositories::publication_repo_impl::GraphqlPublicationRepository;
use collectrs::utils::errors::RepositoryError;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Match, Mock, Request, ResponseTemplate};

#[tokio::test]
async fn test_meta_query_deserializes_domain() {
    let server = graphql_server().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("DomainTimelineMeta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "domain": {
                    "id": "dom-1",
                    "host": "example.com",
                    "canonicalUrl": "https://example.com",
                    "isPublished": false,
                    "profile": { "name": "Example" },
                    "crawlRuns": [
                        {
                            "id": "r1",
                            "domainId": "dom-1",
                            "status": "SUCCESS",
                            "reviewStatus": "PENDING_REVIEW",
                            "finishedAt": "2024-02-01T00:00:00Z",
                            "createdAt": "2024-01-01T00:00:00Z",
                            "updatedAt": "2024-02-01T00:00:00Z"
                        }
                    ],
                    "urls": [
                        {
                            "id": "u1",
                            "domainId": "dom-1",
                            "path": "/",
                            "normalizedUrl": "https://example.com/",
                            "type": "HOMEPAGE",
                            "isCanonical": true,
                            "createdAt": "2024-01-01T00:00:00Z",
                            "updatedAt": "2024-01-01T00:00:00Z"
                        }
                    ]
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let repo = GraphqlDomainQueryRepository::new(client_for(&server));
    let envelope = repo.domain_timeline_meta("dom-1", 50, 80).await.unwrap();

    let domain = envelope.data.clone().unwrap();
    assert_eq!(domain.id, "dom-1");
    assert_eq!(domain.title(), "Example");
    assert_eq!(domain.crawl_runs.len(), 1);
    assert!(domain.crawl_runs[0].is_pending_review());
    assert!(domain.urls[0].is_homepage());
    assert!(!envelope.has_errors());
}

#[tokio::test]
async fn test_snapshot_query_builds_run_crawl_map() {
    let server = graphql_server().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("DomainTimelineSnapshot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "domain": {
                    "id": "dom-1",
                    "urls": [
                        {
                            "id": "u1",
                            "crawlInRun": {
                                "id": "c1",
                                "urlId": "u1",
                                "crawlRunId": "r1",
                                "status": "SUCCESS",
                                "isPublished": true,
                                "crawledAt": "2024-02-01T00:00:00Z",
                                "createdAt": "2024-02-01T00:00:00Z",
                                "updatedAt": "2024-02-01T00:00:00Z",
                                "sections": [
                                    {
                                        "id": "s1",
                                        "crawlId": "c1",
                                        "index": 0,
                                        "isPublished": false,
                                        "createdAt": "2024-02-01T00:00:00Z"
                                    }
                                ]
                            }
                        },
                        { "id": "u2", "crawlInRun": null }
                    ]
                }
            }
        })))
        .mount(&server)
        .await;

    let repo = GraphqlDomainQueryRepository::new(client_for(&server));
    let envelope = repo.domain_snapshot("dom-1", "r1", 50).await.unwrap();

    let map = envelope.data.unwrap();
    assert_eq!(map.len(), 2);
    let crawl = map.get("u1").unwrap().as_ref().unwrap();
    assert!(crawl.is_published());
    assert_eq!(crawl.sections.len(), 1);
    // null 表示该 URL 在此运行中未被爬取
    assert!(map.get("u2").unwrap().is_none());
}

#[tokio::test]
async fn test_partial_errors_are_preserved_alongside_data() {
    let server = graphql_server().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "domain": {
                    "id": "dom-1",
                    "host": "example.com",
                    "canonicalUrl": "https://example.com",
                    "crawlRuns": [],
                    "urls": []
                }
            },
            "errors": [
                { "message": "runs resolver timed out" }
            ]
        })))
        .mount(&server)
        .await;

    let repo = GraphqlDomainQueryRepository::new(client_for(&server));
    let envelope = repo.domain_timeline_meta("dom-1", 50, 80).await.unwrap();

    // 部分成功：数据与错误并存，不得视为整体失败
    assert!(envelope.data.is_some());
    assert_eq!(envelope.errors.len(), 1);
    assert_eq!(envelope.errors[0].message, "runs resolver timed out");
}

#[tokio::test]
async fn test_url_history_query_returns_crawls() {
    let server = graphql_server().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("UrlCrawlHistory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "url": {
                    "id": "u1",
                    "crawls": [
                        {
                            "id": "c1",
                            "urlId": "u1",
                            "status": "SUCCESS",
                            "crawledAt": "2024-02-01T00:00:00Z",
                            "createdAt": "2024-02-01T00:00:00Z",
                            "updatedAt": "2024-02-01T00:00:00Z"
                        }
                    ]
                }
            }
        })))
        .mount(&server)
        .await;

    let repo = GraphqlDomainQueryRepository::new(client_for(&server));
    let crawls = repo.url_crawl_history("u1").await.unwrap();

    assert_eq!(crawls.len(), 1);
    assert_eq!(crawls[0].id, "c1");
}

/// 校验变更载荷只携带发生变化的字段
struct MinimalUpdateBody;

impl Match for MinimalUpdateBody {
    fn matches(&self, request: &Request) -> bool {
        let Ok(body) = serde_json::from_slice::<serde_json::Value>(&request.body) else {
            return false;
        };
        let Some(update) = body.pointer("/variables/update").and_then(|v| v.as_object()) else {
            return false;
        };
        update.len() == 2
            && update.contains_key("crawlsToPublish")
            && update.contains_key("markReviewed")
    }
}

#[tokio::test]
async fn test_mutation_sends_minimal_payload() {
    let server = graphql_server().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("ApplyPublication"))
        .and(MinimalUpdateBody)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "applyPublication": { "crawlRunId": "r1" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let repo = GraphqlPublicationRepository::new(client_for(&server));
    let update = PublicationUpdate {
        crawls_to_publish: Some(vec!["c2".to_string()]),
        mark_reviewed: Some(true),
        ..PublicationUpdate::default()
    };
    repo.apply_publication("r1", &update).await.unwrap();
}

#[tokio::test]
async fn test_empty_update_sends_no_request() {
    let server = graphql_server().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let repo = GraphqlPublicationRepository::new(client_for(&server));
    repo.apply_publication("r1", &PublicationUpdate::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_mutation_errors_fail_atomically() {
    let server = graphql_server().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [ { "message": "not authorized" } ]
        })))
        .mount(&server)
        .await;

    let repo = GraphqlPublicationRepository::new(client_for(&server));
    let update = PublicationUpdate {
        crawl_run_is_published: Some(true),
        ..PublicationUpdate::default()
    };
    let err = repo.apply_publication("r1", &update).await.unwrap_err();

    assert!(matches!(err, RepositoryError::Remote(msg) if msg.contains("not authorized")));
}

#[tokio::test]
async fn test_http_failure_maps_to_transport_error() {
    let server = graphql_server().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let repo = GraphqlDomainQueryRepository::new(client_for(&server));
    let err = repo.domain_timeline_meta("dom-1", 50, 80).await.unwrap_err();

    assert!(matches!(err, RepositoryError::Transport(_)));
}

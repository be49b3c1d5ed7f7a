// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{client_for, graphql_server};
use collectrs::domain::services::explorer_service::TimelineExplorer;
use collectrs::domain::services::publication_service::PublicationAction;
use collectrs::infrastructure::repositories::domain_query_repo_impl::GraphqlDomainQueryRepository;
use collectrs::infrastructure::repositories::publication_repo_impl::GraphqlPublicationRepository;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_meta(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("DomainTimelineMeta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "domain": {
                    "id": "dom-1",
                    "host": "example.com",
                    "canonicalUrl": "https://example.com",
                    "isPublished": true,
                    "crawlRuns": [
                        {
                            "id": "r1",
                            "domainId": "dom-1",
                            "status": "SUCCESS",
                            "isPublished": true,
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
        .mount(server)
        .await;
}

async fn mount_snapshot(server: &MockServer) {
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
                                        "isPublished": true,
                                        "createdAt": "2024-02-01T00:00:00Z"
                                    },
                                    {
                                        "id": "s2",
                                        "crawlId": "c1",
                                        "index": 1,
                                        "isPublished": false,
                                        "createdAt": "2024-02-01T00:00:00Z"
                                    }
                                ]
                            }
                        }
                    ]
                }
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_explorer_session_load_edit_save() {
    let server = graphql_server().await;
    mount_meta(&server).await;
    mount_snapshot(&server).await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("ApplyPublication"))
        .and(body_partial_json(json!({
            "variables": {
                "crawlRunId": "r1",
                "update": { "sectionsToPublish": ["s2"] }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "applyPublication": { "crawlRunId": "r1" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query_repo = Arc::new(GraphqlDomainQueryRepository::new(client.clone()));
    let pub_repo = Arc::new(GraphqlPublicationRepository::new(client));
    let mut explorer = TimelineExplorer::with_run_scoped(query_repo, pub_repo, 50, 80);

    explorer.open_domain("dom-1");
    explorer.load_meta().await.unwrap();
    explorer.load_snapshot().await.unwrap();

    assert_eq!(explorer.effective_run().map(|r| r.id.as_str()), Some("r1"));
    let panel = explorer.panel().unwrap();
    assert!(panel.baseline().published_section_ids.contains("s1"));
    assert!(!panel.baseline().published_section_ids.contains("s2"));

    assert!(explorer.apply(PublicationAction::ToggleSection("s2".to_string())));
    assert!(explorer.panel().unwrap().is_dirty());

    assert!(explorer.save().await.unwrap());

    // 保存后基线与草稿整体来自新一次服务端抓取，不做乐观更新
    let panel = explorer.panel().unwrap();
    assert!(!panel.is_dirty());
    assert!(!panel.baseline().published_section_ids.contains("s2"));
}

#[tokio::test]
async fn test_explorer_refresh_is_idempotent_for_clean_panel() {
    let server = graphql_server().await;
    mount_meta(&server).await;
    mount_snapshot(&server).await;

    let client = client_for(&server);
    let query_repo = Arc::new(GraphqlDomainQueryRepository::new(client.clone()));
    let pub_repo = Arc::new(GraphqlPublicationRepository::new(client));
    let mut explorer = TimelineExplorer::with_run_scoped(query_repo, pub_repo, 50, 80);

    explorer.open_domain("dom-1");
    explorer.refresh().await.unwrap();
    explorer.refresh().await.unwrap();

    let panel = explorer.panel().unwrap();
    assert!(!panel.is_dirty());
    assert_eq!(explorer.timeline().len(), 1);
    assert_eq!(explorer.snapshot().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_explorer_refresh_preserves_dirty_draft() {
    let server = graphql_server().await;
    mount_meta(&server).await;
    mount_snapshot(&server).await;

    let client = client_for(&server);
    let query_repo = Arc::new(GraphqlDomainQueryRepository::new(client.clone()));
    let pub_repo = Arc::new(GraphqlPublicationRepository::new(client));
    let mut explorer = TimelineExplorer::with_run_scoped(query_repo, pub_repo, 50, 80);

    explorer.open_domain("dom-1");
    explorer.refresh().await.unwrap();

    explorer.apply(PublicationAction::ToggleSection("s2".to_string()));
    assert!(explorer.panel().unwrap().is_dirty());

    // 轮询刷新不丢弃未保存的草稿
    explorer.refresh().await.unwrap();
    let panel = explorer.panel().unwrap();
    assert!(panel.is_dirty());
    assert!(panel.draft().published_section_ids.contains("s2"));
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl_run::{CrawlRun, RunStatus};
use crate::domain::services::timeline_service::Timeline;

fn make_run(id: &str, status: RunStatus, finished_at: Option<&str>) -> CrawlRun {
    CrawlRun {
        id: id.to_string(),
        domain_id: "dom-1".to_string(),
        status,
        review_status: None,
        reviewed_at: None,
        is_published: None,
        published_at: None,
        tags: None,
        job_id: None,
        started_at: None,
        finished_at: finished_at.map(|s| s.to_string()),
        error: None,
        created_at: "2024-01-01T00:00:00Z".to_string(),
        updated_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

#[test]
fn test_scrub_is_ascending_and_completed_only() {
    let runs = vec![
        make_run("r3", RunStatus::Success, Some("2024-03-01T00:00:00Z")),
        make_run("r1", RunStatus::Failed, Some("2024-01-15T00:00:00Z")),
        make_run("r2", RunStatus::Success, Some("2024-02-01T00:00:00Z")),
        make_run("r4", RunStatus::Running, Some("2024-04-01T00:00:00Z")),
        make_run("r5", RunStatus::Pending, None),
    ];

    let timeline = Timeline::build(&runs);

    let ids: Vec<&str> = timeline.scrub().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r2", "r3"]);

    let positions: Vec<i64> = timeline.scrub().iter().map(|r| r.position_ms()).collect();
    assert!(positions.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_run_with_invalid_position_excluded_from_scrub() {
    let mut bad = make_run("bad", RunStatus::Success, Some("not-a-timestamp"));
    bad.created_at = "also-bad".to_string();
    let runs = vec![
        bad,
        make_run("ok", RunStatus::Success, Some("2024-02-01T00:00:00Z")),
    ];

    let timeline = Timeline::build(&runs);

    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline.scrub()[0].id, "ok");
}

#[test]
fn test_position_falls_back_through_priority_chain() {
    // finished_at 为空时回退到 started_at，再回退到 created_at
    let mut run = make_run("r1", RunStatus::Success, None);
    run.started_at = Some("2024-02-01T00:00:00Z".to_string());
    let timeline = Timeline::build(&[run]);
    assert_eq!(timeline.len(), 1);

    let run = make_run("r2", RunStatus::Success, None);
    let timeline = Timeline::build(&[run]);
    assert_eq!(timeline.scrub()[0].position_ms(), 1704067200000);
}

#[test]
fn test_listing_is_descending_all_statuses() {
    let runs = vec![
        make_run("r1", RunStatus::Failed, Some("2024-01-01T01:00:00Z")),
        make_run("r2", RunStatus::Running, Some("2024-03-01T00:00:00Z")),
        make_run("r3", RunStatus::Success, Some("2024-02-01T00:00:00Z")),
    ];

    let timeline = Timeline::build(&runs);

    let ids: Vec<&str> = timeline.listing().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r2", "r3", "r1"]);
}

#[test]
fn test_active_runs_enumerated_even_without_valid_position() {
    let mut pending = make_run("pending", RunStatus::Pending, None);
    pending.created_at = "garbage".to_string();
    let runs = vec![
        pending,
        make_run("running", RunStatus::Running, Some("2024-01-02T00:00:00Z")),
        make_run("done", RunStatus::Success, Some("2024-01-01T00:00:00Z")),
    ];

    let timeline = Timeline::build(&runs);

    let ids: Vec<&str> = timeline.active().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["running", "pending"]);
}

#[test]
fn test_default_index_is_most_recent_completed() {
    let runs = vec![
        make_run("r1", RunStatus::Success, Some("2024-01-01T00:00:00Z")),
        make_run("r2", RunStatus::Success, Some("2024-02-01T00:00:00Z")),
    ];

    let timeline = Timeline::build(&runs);

    assert_eq!(timeline.default_index(), Some(1));
    assert_eq!(timeline.run_at(1).map(|r| r.id.as_str()), Some("r2"));
    assert_eq!(Timeline::build(&[]).default_index(), None);
}

#[test]
fn test_run_at_clamps_out_of_range_index() {
    let runs = vec![make_run("r1", RunStatus::Success, Some("2024-01-01T00:00:00Z"))];
    let timeline = Timeline::build(&runs);

    assert_eq!(timeline.run_at(99).map(|r| r.id.as_str()), Some("r1"));
    assert!(Timeline::build(&[]).run_at(0).is_none());
}

#[test]
fn test_effective_run_prefers_explicit_selection() {
    let runs = vec![
        make_run("r1", RunStatus::Success, Some("2024-01-01T00:00:00Z")),
        make_run("r2", RunStatus::Running, Some("2024-02-01T00:00:00Z")),
    ];
    let timeline = Timeline::build(&runs);

    // 显式选择可指向进行中的运行
    assert_eq!(
        timeline.effective_run(Some("r2"), 0).map(|r| r.id.as_str()),
        Some("r2")
    );
    // 未选择时跟随拖动位置
    assert_eq!(
        timeline.effective_run(None, 0).map(|r| r.id.as_str()),
        Some("r1")
    );
    // 选择的运行不存在时回落到拖动位置
    assert_eq!(
        timeline.effective_run(Some("gone"), 0).map(|r| r.id.as_str()),
        Some("r1")
    );
}

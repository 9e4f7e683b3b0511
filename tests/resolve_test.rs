mod common;

use std::time::Duration;

use chrono::NaiveDate;
use common::{deals_json, route, serve, UNREACHABLE};
use constellation::board::{DealBoard, ViewState};
use constellation::config::ApiConfig;
use constellation::fallback;
use constellation::fetch::DealClient;
use constellation::query::SearchParams;
use constellation::resolve::{FallbackPolicy, Resolved, Resolver, Source};
use constellation::table;

fn resolver_for(base_url: &str) -> Resolver {
    let client = DealClient::new(ApiConfig::default().with_base_url(base_url)).unwrap();
    Resolver::new(client)
}

fn scenario_params() -> SearchParams {
    let mut p = SearchParams::starting_from(NaiveDate::from_ymd_opt(2025, 8, 16).unwrap());
    p.origin = "EMA".into();
    p.destination = "ALC".into();
    p.budget_per_person = 700;
    p.min_stars = 3;
    p
}

#[tokio::test]
async fn live_results_win() {
    let backend = serve(vec![route("/api/deals", 200, deals_json(2))]).await;
    let resolved = resolver_for(&backend.base_url).latest().await;
    assert_eq!(resolved.source, Source::Live);
    assert_eq!(resolved.results.len(), 2);
}

#[tokio::test]
async fn unreachable_backend_falls_back_to_sample() {
    let resolved = resolver_for(UNREACHABLE).latest().await;
    assert_eq!(resolved.source, Source::Sample);
    assert_eq!(resolved.results, fallback::sample_results());

    let board = DealBoard::new();
    let ticket = board.begin();
    assert!(board.complete(ticket, resolved));
    let rendered = table::render_view(&board.view(), "GBP", false);
    assert!(rendered.starts_with(table::SAMPLE_BANNER));
    assert!(rendered.contains("£189"));
}

#[tokio::test]
async fn empty_policy_yields_empty_view() {
    let resolved = resolver_for(UNREACHABLE)
        .with_policy(FallbackPolicy::Empty)
        .search(&scenario_params())
        .await;
    assert_eq!(resolved.source, Source::Unavailable);
    assert!(resolved.results.is_empty());

    let board = DealBoard::new();
    board.track(async { resolved }).await;
    assert_eq!(board.view(), ViewState::Empty);
    assert_eq!(
        table::render_view(&board.view(), "GBP", false),
        table::EMPTY_MESSAGE
    );
}

#[tokio::test]
async fn snapshot_used_when_backend_errors() {
    let backend = serve(vec![
        route("/api/deals", 503, "{}"),
        route("/results/latest.json", 200, deals_json(4)),
    ])
    .await;
    let resolved = resolver_for(&backend.base_url)
        .with_snapshot(Some(format!("{}/results/latest.json", backend.base_url)))
        .latest()
        .await;
    assert_eq!(resolved.source, Source::Snapshot);
    assert_eq!(resolved.results.len(), 4);
}

#[tokio::test]
async fn offline_skips_live_backend() {
    let backend = serve(vec![route("/api/deals", 200, deals_json(2))]).await;
    let resolved = resolver_for(&backend.base_url).offline(true).latest().await;
    assert_eq!(resolved.source, Source::Sample);
    assert!(backend.recorded().is_empty());
}

#[tokio::test]
async fn scenario_sample_fixture_renders_three_cards() {
    let fixture = serde_json::to_string(&fallback::sample_results()).unwrap();
    let backend = serve(vec![route("/api/search", 200, fixture)]).await;

    let resolved = resolver_for(&backend.base_url)
        .search(&scenario_params())
        .await;
    assert_eq!(resolved.source, Source::Live);
    assert_eq!(resolved.results.len(), 3);

    let compact = table::render_compact(&resolved.results, "GBP");
    let lines: Vec<&str> = compact.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("£189 pp"));
}

#[tokio::test]
async fn realtime_falls_back_to_sample_flights() {
    let query = scenario_params().to_realtime_query();
    let resolved = resolver_for(UNREACHABLE).realtime(&query).await;
    assert_eq!(resolved.source, Source::Sample);
    assert_eq!(resolved.flights.len(), 2);

    let empty = resolver_for(UNREACHABLE)
        .with_policy(FallbackPolicy::Empty)
        .realtime(&query)
        .await;
    assert_eq!(empty.source, Source::Unavailable);
    assert!(empty.flights.is_empty());
}

#[tokio::test]
async fn stale_response_does_not_overwrite_newer() {
    let board = DealBoard::new();
    let stale = Resolved {
        source: Source::Sample,
        results: fallback::sample_results(),
    };
    let fresh = Resolved {
        source: Source::Live,
        results: fallback::sample_results(),
    };

    let slow = board.track(async {
        tokio::time::sleep(Duration::from_millis(60)).await;
        stale
    });
    let quick = async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        board.track(async { fresh }).await
    };

    let (slow_own, quick_own) = tokio::join!(slow, quick);
    assert_eq!(slow_own.source, Source::Sample);
    assert_eq!(quick_own.source, Source::Live);
    match board.view() {
        ViewState::Populated(resolved) => assert_eq!(resolved.source, Source::Live),
        other => panic!("expected populated view, got {other:?}"),
    }
}

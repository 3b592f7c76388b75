use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::join_all;
use prism_application::{AppServices, RunRequest, SaveOptions};
use prism_core::usage::{FixedClock, Plan};
use prism_core::{DocumentStore, PrismError, Scope};
use prism_infrastructure::{AppConfig, DirDocumentStore};
use serde_json::json;
use tempfile::TempDir;

const INPUT: &str = "write a short product announcement for our new scheduling feature";

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn services() -> (AppServices, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(day(1)));
    (AppServices::in_memory(AppConfig::default(), clock.clone()), clock)
}

fn request(product: &str) -> RunRequest {
    RunRequest::new(product, "alice", INPUT)
}

#[tokio::test]
async fn test_run_debits_and_saves() {
    let (app, _clock) = services();
    let mut req = request("novus-protocol");
    req.save = Some(SaveOptions {
        title: Some("Announcement".to_string()),
        tags: vec!["launch".to_string()],
    });

    let response = app.runs.execute(req).await.unwrap();

    assert!(response.result.output.starts_with("Act as a professional expert"));
    assert!(response.result.diff.is_some());
    assert_eq!(response.usage.remaining, Some(4));

    let session = response.session.unwrap();
    assert_eq!(session.title, "Announcement");
    assert_eq!(session.output, response.result.output);
    assert_eq!(session.metrics, response.result.metrics);

    let scope = Scope::new("novus-protocol", "alice");
    let listed = app.sessions.list(&scope).await.unwrap();
    assert_eq!(listed, vec![session]);
}

#[tokio::test]
async fn test_run_without_save_persists_nothing() {
    let (app, _clock) = services();
    app.runs.execute(request("auto-rewrite")).await.unwrap();

    let scope = Scope::new("auto-rewrite", "alice");
    assert!(app.sessions.list(&scope).await.unwrap().is_empty());
    assert_eq!(app.quota.get_usage(&scope).await.unwrap().count, 1);
}

#[tokio::test]
async fn test_invalid_input_changes_nothing() {
    let (app, _clock) = services();
    let mut req = request("auto-rewrite");
    req.input = "too short".to_string();
    req.save = Some(SaveOptions::default());

    let err = app.runs.execute(req).await.unwrap_err();

    assert!(err.is_invalid_input());
    let scope = Scope::new("auto-rewrite", "alice");
    assert_eq!(app.quota.get_usage(&scope).await.unwrap().count, 0);
    assert!(app.sessions.list(&scope).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_product() {
    let (app, _clock) = services();
    let err = app.runs.execute(request("does-not-exist")).await.unwrap_err();
    assert!(matches!(err, PrismError::UnknownProduct(_)));
}

#[tokio::test]
async fn test_strategy_failure_is_wrapped_and_not_debited() {
    let (app, _clock) = services();
    let mut req = request("auto-rewrite");
    req.params.insert("style".to_string(), json!("baroque"));

    let err = app.runs.execute(req).await.unwrap_err();

    match err {
        PrismError::Processing { product_id, .. } => assert_eq!(product_id, "auto-rewrite"),
        other => panic!("unexpected error: {other:?}"),
    }
    let scope = Scope::new("auto-rewrite", "alice");
    assert_eq!(app.quota.get_usage(&scope).await.unwrap().count, 0);
}

#[tokio::test]
async fn test_variables_are_substituted_before_validation() {
    let (app, _clock) = services();
    let mut req = request("auto-rewrite");
    req.input = "{x}".to_string();
    req.variables = HashMap::from([(
        "x".to_string(),
        "a sufficiently long replacement text".to_string(),
    )]);

    let response = app.runs.execute(req).await.unwrap();
    assert_eq!(response.input, "a sufficiently long replacement text");
}

#[tokio::test]
async fn test_free_plan_exhausts_after_five_runs() {
    let (app, _clock) = services();
    for _ in 0..5 {
        let mut req = request("seo-optimizer-pro");
        req.save = Some(SaveOptions::default());
        app.runs.execute(req).await.unwrap();
    }

    let mut req = request("seo-optimizer-pro");
    req.save = Some(SaveOptions::default());
    let err = app.runs.execute(req).await.unwrap_err();

    assert!(err.is_quota_exceeded());
    let scope = Scope::new("seo-optimizer-pro", "alice");
    assert_eq!(app.quota.get_usage(&scope).await.unwrap().count, 5);
    assert_eq!(app.sessions.list(&scope).await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_quota_resets_on_new_day() {
    let (app, clock) = services();
    for _ in 0..5 {
        app.runs.execute(request("lead-generation-pro")).await.unwrap();
    }
    assert!(app.runs.execute(request("lead-generation-pro")).await.is_err());

    clock.set(day(2));

    let response = app.runs.execute(request("lead-generation-pro")).await.unwrap();
    assert_eq!(response.usage.remaining, Some(4));
}

#[tokio::test]
async fn test_paid_plans_are_unbounded() {
    let mut config = AppConfig::default();
    config.users.insert("alice".to_string(), Plan::Pro);
    let app = AppServices::in_memory(config, Arc::new(FixedClock::new(day(1))));

    for _ in 0..8 {
        let response = app.runs.execute(request("auto-rewrite")).await.unwrap();
        assert_eq!(response.usage.limit, None);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_consumption_never_exceeds_limit() {
    let dir = TempDir::new().unwrap();
    let store: Arc<dyn DocumentStore> = Arc::new(DirDocumentStore::new(dir.path()));
    let app = AppServices::new(
        AppConfig::default(),
        store,
        Arc::new(FixedClock::new(day(1))),
    );
    let scope = Scope::new("content-spawner", "alice");

    let attempts = (0..20).map(|_| {
        let quota = app.quota.clone();
        let scope = scope.clone();
        tokio::spawn(async move { quota.consume_quota(&scope).await })
    });
    let granted = join_all(attempts)
        .await
        .into_iter()
        .filter(|r| *r.as_ref().unwrap())
        .count();

    assert_eq!(granted, 5);
    assert_eq!(app.quota.get_usage(&scope).await.unwrap().count, 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_separate_services_on_one_directory_share_the_limit() {
    let dir = TempDir::new().unwrap();

    for round in 0..5 {
        let scope = Scope::new("content-spawner", format!("user-{round}"));
        let attempts = (0..20).map(|_| {
            // Each instance has its own quota manager, like separate CLI processes.
            let store: Arc<dyn DocumentStore> = Arc::new(DirDocumentStore::new(dir.path()));
            let app = AppServices::new(
                AppConfig::default(),
                store,
                Arc::new(FixedClock::new(day(1))),
            );
            let scope = scope.clone();
            tokio::spawn(async move { app.quota.consume_quota(&scope).await })
        });
        let granted = join_all(attempts)
            .await
            .into_iter()
            .filter(|r| *r.as_ref().unwrap())
            .count();

        assert_eq!(granted, 5, "round {round}");
    }
}

#[tokio::test]
async fn test_directory_backed_services_persist_across_instances() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig {
        data_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };

    let first = AppServices::open(config.clone(), None).unwrap();
    let mut req = request("novus-protocol");
    req.save = Some(SaveOptions::default());
    let saved = first.runs.execute(req).await.unwrap().session.unwrap();

    let second = AppServices::open(config, None).unwrap();
    let scope = Scope::new("novus-protocol", "alice");
    assert_eq!(second.sessions.get(&scope, &saved.id).await, Some(saved));
    assert_eq!(second.quota.get_usage(&scope).await.unwrap().count, 1);
}

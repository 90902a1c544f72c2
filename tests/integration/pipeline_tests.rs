// Whole runs through Watcher::run against mocked catalog and ntfy servers

use enzona_watcher::{AppError, Delivery, MatchSet, Query, RunOutcome, Watcher};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{channel_path, mount_catalog, test_config};

const TITLES: &[&str] = &[
    "(MLC) Red Widget",
    "Blue Widget...",
    "Red Gadget",
    "(MLC)   Blue \n\t Widget",
];

async fn ntfy_expecting(posts: u64) -> MockServer {
    let ntfy = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(posts)
        .mount(&ntfy)
        .await;
    ntfy
}

fn expected(titles: &[&str]) -> MatchSet {
    titles.iter().map(|t| t.to_string()).collect()
}

#[tokio::test]
async fn test_end_to_end_notifies_matches() {
    let catalog = MockServer::start().await;
    mount_catalog(&catalog, "/ofertas", TITLES).await;

    let ntfy = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(channel_path(&catalog)))
        .and(header("Title", "Sacaron Widget!!"))
        .and(header("Click", format!("{}/ofertas", catalog.uri()).as_str()))
        .and(body_string("- Blue Widget"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&ntfy)
        .await;

    let watcher = Watcher::from_config(&test_config(&catalog, &ntfy), None).unwrap();
    let query = Query::new("Widget", "/ofertas", Some("red"), true);

    let outcome = watcher.run(&query).await.unwrap();

    assert_eq!(
        outcome,
        RunOutcome::Matched {
            matches: expected(&["Blue Widget"]),
            delivery: Delivery::Sent,
        }
    );
    assert_eq!(outcome.exit_code(), 0);
}

#[tokio::test]
async fn test_no_matches_never_posts() {
    let catalog = MockServer::start().await;
    mount_catalog(&catalog, "/ofertas", TITLES).await;
    let ntfy = ntfy_expecting(0).await;

    let watcher = Watcher::from_config(&test_config(&catalog, &ntfy), None).unwrap();
    let outcome = watcher.run(&Query::new("aceite", "/ofertas", None, true)).await.unwrap();

    assert_eq!(outcome, RunOutcome::NoMatches);
    assert_eq!(outcome.exit_code(), 0);
}

#[tokio::test]
async fn test_no_notify_flag_suppresses_post() {
    let catalog = MockServer::start().await;
    mount_catalog(&catalog, "/ofertas", TITLES).await;
    let ntfy = ntfy_expecting(0).await;

    let watcher = Watcher::from_config(&test_config(&catalog, &ntfy), None).unwrap();
    let outcome = watcher.run(&Query::new("widget", "/ofertas", None, false)).await.unwrap();

    assert_eq!(
        outcome,
        RunOutcome::Matched {
            matches: expected(&["Blue Widget", "Red Widget"]),
            delivery: Delivery::Disabled,
        }
    );
    assert_eq!(outcome.exit_code(), 0);
}

#[tokio::test]
async fn test_fetch_failure_is_fatal_and_skips_notifier() {
    let catalog = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&catalog)
        .await;
    let ntfy = ntfy_expecting(0).await;

    let watcher = Watcher::from_config(&test_config(&catalog, &ntfy), None).unwrap();
    let err = watcher.run(&Query::new("widget", "/ofertas", None, true)).await.unwrap_err();

    assert!(matches!(err, AppError::Fetch { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_recovered_fetch_runs_normally() {
    let catalog = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&catalog)
        .await;
    mount_catalog(&catalog, "/ofertas", TITLES).await;
    let ntfy = ntfy_expecting(1).await;

    let watcher = Watcher::from_config(&test_config(&catalog, &ntfy), None).unwrap();
    let outcome = watcher.run(&Query::new("gadget", "/ofertas", None, true)).await.unwrap();

    assert_eq!(
        outcome,
        RunOutcome::Matched {
            matches: expected(&["Red Gadget"]),
            delivery: Delivery::Sent,
        }
    );
}

#[tokio::test]
async fn test_failed_notification_keeps_success() {
    let catalog = MockServer::start().await;
    mount_catalog(&catalog, "/ofertas", TITLES).await;

    let ntfy = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&ntfy)
        .await;

    let watcher = Watcher::from_config(&test_config(&catalog, &ntfy), None).unwrap();
    let outcome = watcher.run(&Query::new("widget", "/ofertas", None, true)).await.unwrap();

    match &outcome {
        RunOutcome::Matched { delivery: Delivery::Failed(reason), .. } => {
            assert!(reason.contains("Notification to"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(outcome.exit_code(), 0);
}

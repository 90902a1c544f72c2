// ntfy notifier over HTTP

use enzona_watcher::config::NotificationsConfig;
use enzona_watcher::notifier::{Notifier, NtfyNotifier};
use enzona_watcher::{AppError, MatchSet, NotificationPayload, Query};
use wiremock::matchers::{body_string, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn notifications_for(ntfy: &MockServer) -> NotificationsConfig {
    NotificationsConfig {
        base_url: ntfy.uri(),
        request_timeout: 5,
        ..NotificationsConfig::default()
    }
}

fn payload_for(ntfy: &MockServer) -> NotificationPayload {
    let query = Query::new("Picadillo", "/ofertas", None, true);
    let matches: MatchSet = ["Picadillo de res 1kg", "Picadillo MDM 400g"]
        .into_iter()
        .map(String::from)
        .collect();

    NotificationPayload::build(
        &query,
        &matches,
        "https://megacaribehabautopista.enzona.net/ofertas",
        &notifications_for(ntfy),
    )
}

#[tokio::test]
async fn test_ntfy_request_shape() {
    let ntfy = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/megacaribehabautopista_enzona_net"))
        .and(header("Title", "Sacaron Picadillo!!"))
        .and(header("Click", "https://megacaribehabautopista.enzona.net/ofertas"))
        .and(header("Priority", "4"))
        .and(header_exists("Tags"))
        .and(body_string("- Picadillo MDM 400g\n- Picadillo de res 1kg"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&ntfy)
        .await;

    let notifier = NtfyNotifier::new(notifications_for(&ntfy), None).unwrap();
    notifier.notify(&payload_for(&ntfy)).await.unwrap();
}

#[tokio::test]
async fn test_ntfy_icon_header_is_optional() {
    let ntfy = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("Icon", "https://example.com/icon.png"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&ntfy)
        .await;

    let mut payload = payload_for(&ntfy);
    payload.icon = Some("https://example.com/icon.png".to_string());

    let notifier = NtfyNotifier::new(notifications_for(&ntfy), None).unwrap();
    notifier.notify(&payload).await.unwrap();
}

#[tokio::test]
async fn test_ntfy_error_status_is_reported() {
    let ntfy = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&ntfy)
        .await;

    let notifier = NtfyNotifier::new(notifications_for(&ntfy), None).unwrap();
    let err = notifier.notify(&payload_for(&ntfy)).await.unwrap_err();

    match err {
        AppError::Notify { url, source } => {
            assert_eq!(url, format!("{}/megacaribehabautopista_enzona_net", ntfy.uri()));
            assert_eq!(source.status().map(|s| s.as_u16()), Some(429));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

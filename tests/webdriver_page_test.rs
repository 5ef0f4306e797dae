use crop_price_etl::config::BrowserConfig;
use crop_price_etl::core::navigator::anchors;
use crop_price_etl::core::{Element, Locator, Page, WaitPolicy};
use crop_price_etl::{ScrapeError, WebDriverPage};
use httpmock::prelude::*;
use serde_json::json;
use std::time::{Duration, Instant};

const SESSION: &str = "/session/s1";

fn element_list(ids: &[&str]) -> serde_json::Value {
    let elements: Vec<_> = ids
        .iter()
        .map(|id| json!({"element-6066-11e4-a52e-4f735466cecf": id}))
        .collect();
    json!({ "value": elements })
}

fn stale_element() -> serde_json::Value {
    json!({
        "value": {
            "error": "stale element reference",
            "message": "stale element reference: element is not attached to the page document",
            "stacktrace": ""
        }
    })
}

async fn launch(server: &MockServer) -> WebDriverPage {
    server
        .mock_async(|when, then| {
            when.method(POST).path("/session");
            then.status(200).json_body(json!({
                "value": {"sessionId": "s1", "capabilities": {"browserName": "chrome"}}
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(format!("{}/timeouts", SESSION));
            then.status(200).json_body(json!({ "value": null }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path(SESSION);
            then.status(200).json_body(json!({ "value": null }));
        })
        .await;

    let config = BrowserConfig {
        webdriver_url: server.base_url(),
        maximized: false,
        headless: false,
    };
    WebDriverPage::launch(&config).await.unwrap()
}

async fn mock_elements(server: &MockServer, ids: &[&str]) {
    let body = element_list(ids);
    server
        .mock_async(|when, then| {
            when.method(POST).path(format!("{}/elements", SESSION));
            then.status(200).json_body(body);
        })
        .await;
}

fn wrapper() -> Locator {
    Locator::id(anchors::CATEGORY_WRAPPER_ID)
}

fn quick_wait(timeout_ms: u64) -> WaitPolicy {
    WaitPolicy::new(Duration::from_millis(timeout_ms), Duration::from_millis(50))
}

#[tokio::test]
async fn test_wait_returns_once_element_is_displayed() {
    let server = MockServer::start_async().await;
    let page = launch(&server).await;
    mock_elements(&server, &["e1"]).await;
    let mut hidden = server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/element/e1/displayed", SESSION));
            then.status(200).json_body(json!({ "value": false }));
        })
        .await;

    let started = Instant::now();
    let anchor = wrapper();
    let (result, _) = tokio::join!(page.wait_visible(&anchor, quick_wait(5_000)), async {
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(hidden.hits_async().await >= 2);
        hidden.delete_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("{}/element/e1/displayed", SESSION));
                then.status(200).json_body(json!({ "value": true }));
            })
            .await;
    });

    assert!(result.is_ok(), "{:?}", result.err());
    assert!(started.elapsed() < Duration::from_secs(5));
    page.quit().await.unwrap();
}

#[tokio::test]
async fn test_wait_times_out_when_element_never_appears() {
    let server = MockServer::start_async().await;
    let page = launch(&server).await;
    mock_elements(&server, &[]).await;

    let started = Instant::now();
    let wait = WaitPolicy::new(Duration::from_secs(1), Duration::from_millis(100));
    let result = page.wait_visible(&wrapper(), wait).await;

    assert!(started.elapsed() >= Duration::from_secs(1));
    match result {
        Err(ScrapeError::Timeout { anchor, seconds }) => {
            assert_eq!(anchor, "#imagenet-wrap-categoria");
            assert_eq!(seconds, 1);
        }
        other => panic!("expected Timeout, got {:?}", other.err()),
    }
    page.quit().await.unwrap();
}

#[tokio::test]
async fn test_stale_element_is_polled_again() {
    let server = MockServer::start_async().await;
    let page = launch(&server).await;
    mock_elements(&server, &["e1"]).await;
    let mut stale = server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/element/e1/displayed", SESSION));
            then.status(404).json_body(stale_element());
        })
        .await;

    let anchor = wrapper();
    let (result, _) = tokio::join!(page.wait_visible(&anchor, quick_wait(5_000)), async {
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(stale.hits_async().await >= 2);
        stale.delete_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("{}/element/e1/displayed", SESSION));
                then.status(200).json_body(json!({ "value": true }));
            })
            .await;
    });

    assert!(result.is_ok(), "{:?}", result.err());
    page.quit().await.unwrap();
}

#[tokio::test]
async fn test_element_stale_for_whole_wait_times_out() {
    let server = MockServer::start_async().await;
    let page = launch(&server).await;
    mock_elements(&server, &["e1"]).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/element/e1/displayed", SESSION));
            then.status(404).json_body(stale_element());
        })
        .await;

    let started = Instant::now();
    let result = page.wait_visible(&wrapper(), quick_wait(1_000)).await;

    assert!(started.elapsed() >= Duration::from_secs(1));
    assert!(
        matches!(result, Err(ScrapeError::Timeout { .. })),
        "{:?}",
        result.err()
    );
    page.quit().await.unwrap();
}

#[tokio::test]
async fn test_locators_map_to_webdriver_selectors() {
    let server = MockServer::start_async().await;
    let page = launch(&server).await;

    let class_lookup = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("{}/elements", SESSION))
                .body_contains(&format!(".{}", anchors::LINKS_AFTER_TABLE_CLASS));
            then.status(200).json_body(element_list(&["links"]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/element/links/displayed", SESSION));
            then.status(200).json_body(json!({ "value": true }));
        })
        .await;
    let link_lookup = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("{}/element/links/elements", SESSION))
                .body_contains("xpath")
                .body_contains(".//a[contains(text(), 'Mais valores')]");
            then.status(200).json_body(element_list(&[]));
        })
        .await;

    let links = page
        .wait_visible(&Locator::class(anchors::LINKS_AFTER_TABLE_CLASS), quick_wait(1_000))
        .await
        .unwrap();
    let missing = links
        .find(&Locator::link_text_contains(anchors::MORE_VALUES_TEXT))
        .await;

    class_lookup.assert_async().await;
    link_lookup.assert_async().await;
    match missing {
        Err(ScrapeError::ElementNotFound { anchor }) => {
            assert_eq!(anchor, "a[text*='Mais valores']")
        }
        Err(other) => panic!("expected ElementNotFound, got {other:?}"),
        Ok(_) => panic!("expected ElementNotFound, got an element"),
    }
    page.quit().await.unwrap();
}

#[tokio::test]
async fn test_id_lookup_names_the_anchor() {
    let server = MockServer::start_async().await;
    let page = launch(&server).await;
    let id_lookup = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("{}/elements", SESSION))
                .body_contains(anchors::INDICATOR_TABLE_ID);
            then.status(200).json_body(element_list(&["table"]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/element/table/displayed", SESSION));
            then.status(200).json_body(json!({ "value": true }));
        })
        .await;

    page.wait_visible(&Locator::id(anchors::INDICATOR_TABLE_ID), quick_wait(1_000))
        .await
        .unwrap();

    id_lookup.assert_async().await;
    page.quit().await.unwrap();
}

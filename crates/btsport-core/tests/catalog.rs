//! Category discovery against a mock site

mod common;

use btsport_core::{BtSportError, Category};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HUB_PAGE: &str = "<!DOCTYPE html><html><head>\n<script type=\"text/javascript\">\n\
    BTSPORT.cms.videohub.pagedetails = {'defaultpage': {'pageurl': '/all-videos/videos-01364228997406'}, \
    'pages': [{'title': 'Football', 'pageurl': '/football/videos-01364228997417'}, \
    {'title': 'Cricket', 'pageurl': '/cricket/videos-01364229047368'}]}\t\n\
    </script></head><body><div id=\"videohub\"></div></body></html>";

const FOOTBALL_PAGE: &str = "<html><script>\n\
    BTSPORT.cms.videohub.properties = {\"tags\": \"Football,Premier League\", \"ccategory\": \"Football\", \"competition\": \"Premier League\"}\t\n\
    </script></html>";

const DEFAULT_PAGE: &str = "<html><script>\n\
    BTSPORT.cms.videohub.properties = {'tags': ''}\t\n\
    </script></html>";

#[tokio::test]
async fn test_list_categories() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/all-videos/videos-01364228997406"))
        .respond_with(ResponseTemplate::new(200).set_body_string(HUB_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = common::scraper_for(&server);
    let categories: Vec<Category> = scraper.list_categories().await.unwrap().collect();

    assert_eq!(
        categories,
        vec![
            Category {
                title: None,
                path: "/all-videos/videos-01364228997406".to_string(),
            },
            Category {
                title: Some("Football".to_string()),
                path: "/football/videos-01364228997417".to_string(),
            },
            Category {
                title: Some("Cricket".to_string()),
                path: "/cricket/videos-01364229047368".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_list_categories_layout_changed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/all-videos/videos-01364228997406"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>New look!</body></html>"),
        )
        .mount(&server)
        .await;

    let scraper = common::scraper_for(&server);
    let result = scraper.list_categories().await;
    assert!(matches!(result, Err(BtSportError::ParseError(_))));
}

#[tokio::test]
async fn test_list_categories_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let scraper = common::scraper_for(&server);
    let result = scraper.list_categories().await;
    assert!(matches!(result, Err(BtSportError::HttpError(_))));
}

#[tokio::test]
async fn test_query_fragment_for_category() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/football/videos-01364228997417"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FOOTBALL_PAGE))
        .mount(&server)
        .await;

    let scraper = common::scraper_for(&server);
    let fragment = scraper
        .query_fragment("/football/videos-01364228997417")
        .await
        .unwrap();

    assert_eq!(
        fragment.as_deref(),
        Some(
            r#"tags:("Football","Premier League") OR (ccategory:("Football") AND competition:("Premier League"))"#
        )
    );
}

#[tokio::test]
async fn test_query_fragment_default_category_has_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/all-videos/videos-01364228997406"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DEFAULT_PAGE))
        .mount(&server)
        .await;

    let scraper = common::scraper_for(&server);
    let fragment = scraper
        .query_fragment("all-videos/videos-01364228997406")
        .await
        .unwrap();
    assert_eq!(fragment, None);
}

#[tokio::test]
async fn test_query_fragment_follows_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/football"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", "/football/videos-01364228997417"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/football/videos-01364228997417"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FOOTBALL_PAGE))
        .mount(&server)
        .await;

    let scraper = common::scraper_for(&server);
    let fragment = scraper.query_fragment("/football").await.unwrap();
    assert!(fragment.unwrap().starts_with("tags:(\"Football\""));
}

#[tokio::test]
async fn test_redirect_loop_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/all-videos/videos-01364228997406"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", "/all-videos/videos-01364228997406"),
        )
        .expect(6)
        .mount(&server)
        .await;

    let scraper = common::scraper_for(&server);
    match scraper.list_categories().await {
        Err(BtSportError::InvalidUrl(msg)) => assert!(msg.contains("redirects")),
        other => panic!("Expected InvalidUrl, got {:?}", other.map(|c| c.count())),
    }
}

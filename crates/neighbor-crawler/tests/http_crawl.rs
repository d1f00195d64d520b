//! End-to-end crawls against a mocked neighbors service

use neighbor_crawler::config::DEFAULT_USER_AGENT;
use neighbor_crawler::{
    fetch_with_retry, Crawler, CrawlerConfig, FetchFailure, FetchOutcome, HttpSession, NodeId,
    RetryPolicy,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> CrawlerConfig {
    CrawlerConfig::default()
        .with_base_url(format!("{}/neighbors/", server.uri()))
        .with_retry(RetryPolicy::default().with_backoff_base(Duration::from_millis(5)))
}

async fn mount_neighbors(server: &MockServer, node: &str, neighbors: &[&str]) {
    Mock::given(method("GET"))
        .and(path(format!("/neighbors/{node}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "node": node,
            "neighbors": neighbors,
        })))
        .mount(server)
        .await;
}

fn sorted(level: &[NodeId]) -> Vec<String> {
    let mut names: Vec<String> = level.iter().map(ToString::to_string).collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_depth_zero_sends_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let crawler = Crawler::http(config_for(&server)).unwrap();
    let traversal = crawler.traverse("A".into(), 0).await;

    assert_eq!(traversal.into_levels(), vec![vec![NodeId::new("A")]]);
}

#[tokio::test]
async fn test_one_level() {
    let server = MockServer::start().await;
    mount_neighbors(&server, "A", &["B", "C"]).await;

    let crawler = Crawler::http(config_for(&server)).unwrap();
    let traversal = crawler.traverse("A".into(), 1).await;

    assert_eq!(traversal.levels().len(), 2);
    assert_eq!(traversal.levels()[0], vec![NodeId::new("A")]);
    assert_eq!(sorted(&traversal.levels()[1]), vec!["B", "C"]);
}

#[tokio::test]
async fn test_back_edges_are_ignored() {
    let server = MockServer::start().await;
    mount_neighbors(&server, "A", &["B"]).await;
    mount_neighbors(&server, "B", &["A", "C"]).await;
    mount_neighbors(&server, "C", &[]).await;

    let crawler = Crawler::http(config_for(&server)).unwrap();
    let traversal = crawler.traverse("A".into(), 2).await;

    assert_eq!(
        traversal.into_levels(),
        vec![vec![NodeId::new("A")], vec![NodeId::new("B")], vec![NodeId::new("C")]]
    );
}

#[tokio::test]
async fn test_failing_node_is_retried_then_skipped() {
    let server = MockServer::start().await;
    mount_neighbors(&server, "A", &["B", "C"]).await;
    mount_neighbors(&server, "C", &["D", "E"]).await;
    Mock::given(method("GET"))
        .and(path("/neighbors/B"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let crawler = Crawler::http(config_for(&server)).unwrap();
    let traversal = crawler.traverse("A".into(), 2).await;

    assert_eq!(sorted(&traversal.levels()[1]), vec!["B", "C"]);
    assert_eq!(sorted(&traversal.levels()[2]), vec!["D", "E"]);
}

#[tokio::test]
async fn test_shared_neighbors_appear_once() {
    let server = MockServer::start().await;
    mount_neighbors(&server, "A", &["B", "C", "D"]).await;
    for parent in ["B", "C", "D"] {
        mount_neighbors(&server, parent, &["X", "Y", "A"]).await;
    }

    let crawler = Crawler::http(config_for(&server).with_max_workers(3)).unwrap();
    let traversal = crawler.traverse("A".into(), 2).await;

    assert_eq!(sorted(&traversal.levels()[2]), vec!["X", "Y"]);
    assert_eq!(traversal.total_nodes(), 6);
}

#[tokio::test]
async fn test_node_name_is_percent_encoded() {
    let server = MockServer::start().await;
    mount_neighbors(&server, "Tom%20Hanks", &["Forrest Gump"]).await;

    let crawler = Crawler::http(config_for(&server)).unwrap();
    let traversal = crawler.traverse("Tom Hanks".into(), 1).await;

    assert_eq!(traversal.levels()[1], vec![NodeId::new("Forrest Gump")]);
}

#[tokio::test]
async fn test_sends_user_agent_and_follows_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/neighbors/Old"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/neighbors/New"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/neighbors/New"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"neighbors": ["Z"]})))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = HttpSession::new(&config_for(&server)).unwrap();
    let outcome = fetch_with_retry(&mut session, &NodeId::new("Old"), &RetryPolicy::default()).await;

    assert_eq!(outcome, FetchOutcome::Success(vec![NodeId::new("Z")]));
}

#[tokio::test]
async fn test_empty_and_malformed_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/neighbors/Empty"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/neighbors/Broken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"neighbors\": ["))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let mut session = HttpSession::new(&config).unwrap();

    let empty = fetch_with_retry(&mut session, &NodeId::new("Empty"), &config.retry).await;
    assert_eq!(empty, FetchOutcome::Success(vec![]));

    let broken = fetch_with_retry(&mut session, &NodeId::new("Broken"), &config.retry).await;
    assert!(matches!(broken, FetchOutcome::Failure(FetchFailure::Malformed(_))));
}

#[tokio::test]
async fn test_slow_responses_time_out_and_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/neighbors/Slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .expect(2)
        .mount(&server)
        .await;

    let mut retry = RetryPolicy::default()
        .with_max_attempts(2)
        .with_backoff_base(Duration::from_millis(5));
    retry.request_timeout = Duration::from_millis(100);
    let config = config_for(&server).with_retry(retry);

    let mut session = HttpSession::new(&config).unwrap();
    let outcome = fetch_with_retry(&mut session, &NodeId::new("Slow"), &config.retry).await;

    assert!(matches!(
        outcome,
        FetchOutcome::Failure(FetchFailure::Exhausted { attempts: 2, .. })
    ));
}

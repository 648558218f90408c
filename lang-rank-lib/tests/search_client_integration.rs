//! Integration tests for the GitHub search client using wiremock

use lang_rank_lib::search::{Client, SearchBackend, encode};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn count_body(total_count: u64, incomplete_results: bool) -> serde_json::Value {
    serde_json::json!({
        "total_count": total_count,
        "incomplete_results": incomplete_results,
        "items": [],
    })
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_count_for_keyword_and_language() {
    let mock_server = MockServer::start().await;

    // '+' between the query words decodes to a space
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("q", "web server language:go"))
        .and(query_param("per_page", "1"))
        .and(header("accept", "application/vnd.github.v3+json"))
        .and(header("user-agent", "lang-rank"))
        .respond_with(ResponseTemplate::new(200).set_body_json(count_body(1234, false)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(None, mock_server.uri()).unwrap();
    let count = client.count_repositories(Some("web server"), &encode("Go")).await.unwrap();

    assert_eq!(count.total_count, 1234);
    assert!(!count.incomplete_results);
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_baseline_query_filters_only_by_language() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("q", "language:csharp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(count_body(99, true)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(None, format!("{}/", mock_server.uri())).unwrap();
    let count = client.count_repositories(None, &encode("C#")).await.unwrap();

    assert_eq!(count.total_count, 99);
    assert!(count.incomplete_results);
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_token_is_sent_as_authorization() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(header("authorization", "token abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(count_body(1, false)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(Some("abc123"), mock_server.uri()).unwrap();
    let count = client.count_repositories(None, "rust").await.unwrap();
    assert_eq!(count.total_count, 1);
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_rate_limited_response_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", "1700000000")
                .set_body_string("API rate limit exceeded"),
        )
        .mount(&mock_server)
        .await;

    let client = Client::new(None, mock_server.uri()).unwrap();
    let err = client.count_repositories(Some("iot"), "c").await.unwrap_err();
    assert!(err.to_string().contains("403"), "unexpected error: {err}");
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_malformed_body_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = Client::new(None, mock_server.uri()).unwrap();
    assert!(client.count_repositories(None, "go").await.is_err());
}

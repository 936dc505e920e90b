use std::time::Duration;

use provisioning::{
    DueDate, IssueTracker, MilestoneNumber, NewIssue, NewMilestone, RepositoryRef, TrackerError,
};
use reqwest::StatusCode;
use rstest::rstest;
use serde_json::json;

use crate::client::{classify_failure, normalise_base_url};
use crate::payloads::{IssueRequest, MilestoneRequest};
use crate::*;

fn token() -> ApiToken {
    ApiToken::new("ghp_example").expect("non-empty token")
}

fn repository() -> RepositoryRef {
    RepositoryRef::from_parts("octo-org", "widgets").expect("valid repository")
}

#[test]
fn milestone_payload_uses_github_field_names() {
    let milestone = NewMilestone {
        title: "v1".to_owned(),
        description: "First cut".to_owned(),
        due_on: DueDate::parse("2024-01-15").expect("date").to_timestamp(),
    };

    let body = serde_json::to_value(MilestoneRequest::from(&milestone)).expect("serialise");

    assert_eq!(
        body,
        json!({
            "title": "v1",
            "description": "First cut",
            "due_on": "2024-01-15T00:00:00Z",
        })
    );
}

#[test]
fn issue_payload_carries_milestone_number_and_labels_verbatim() {
    let issue = NewIssue {
        title: "Bug A".to_owned(),
        body: String::new(),
        labels: vec!["bug".to_owned(), "bug".to_owned()],
        milestone: MilestoneNumber::new(12),
    };

    let body = serde_json::to_value(IssueRequest::from(&issue)).expect("serialise");

    assert_eq!(
        body,
        json!({
            "title": "Bug A",
            "body": "",
            "labels": ["bug", "bug"],
            "milestone": 12,
        })
    );
}

#[test]
fn issue_payload_sends_empty_label_list() {
    let issue = NewIssue {
        title: "t".to_owned(),
        body: "b".to_owned(),
        labels: Vec::new(),
        milestone: MilestoneNumber::new(1),
    };

    let body = serde_json::to_value(IssueRequest::from(&issue)).expect("serialise");

    assert_eq!(body["labels"], json!([]));
}

#[test]
fn unauthorized_is_its_own_variant() {
    let err = classify_failure(StatusCode::UNAUTHORIZED, r#"{"message":"Bad credentials"}"#);
    assert_eq!(err, TrackerError::Unauthorized { status: 401 });
}

#[test]
fn validation_errors_list_field_details() {
    let body = r#"{
        "message": "Validation Failed",
        "errors": [{"resource": "Milestone", "code": "already_exists", "field": "title"}],
        "documentation_url": "https://docs.github.com/rest/issues/milestones"
    }"#;

    let err = classify_failure(StatusCode::UNPROCESSABLE_ENTITY, body);

    assert_eq!(
        err,
        TrackerError::Api {
            status: 422,
            message: "Validation Failed (Milestone.title already_exists)".to_owned(),
        }
    );
}

#[test]
fn string_error_entries_are_kept() {
    let body = r#"{"message":"Validation Failed","errors":["labels must be strings"]}"#;

    let err = classify_failure(StatusCode::UNPROCESSABLE_ENTITY, body);

    let TrackerError::Api { message, .. } = err else {
        panic!("expected Api");
    };
    assert_eq!(message, "Validation Failed (labels must be strings)");
}

#[rstest]
#[case::rate_limited(StatusCode::FORBIDDEN, r#"{"message":"API rate limit exceeded"}"#, "API rate limit exceeded")]
#[case::not_found(StatusCode::NOT_FOUND, r#"{"message":"Not Found"}"#, "Not Found")]
#[case::html_body(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>\n", "<html>bad gateway</html>")]
#[case::empty_body(StatusCode::SERVICE_UNAVAILABLE, "", "Service Unavailable")]
fn other_failures_become_api_errors(
    #[case] status: StatusCode,
    #[case] body: &str,
    #[case] expected: &str,
) {
    let err = classify_failure(status, body);
    assert_eq!(
        err,
        TrackerError::Api {
            status: status.as_u16(),
            message: expected.to_owned(),
        }
    );
}

#[rstest]
#[case("https://api.github.com", "https://api.github.com")]
#[case("https://api.github.com/", "https://api.github.com")]
#[case("  https://ghe.example.com/api/v3//  ", "https://ghe.example.com/api/v3")]
#[case("http://127.0.0.1:8080", "http://127.0.0.1:8080")]
fn base_url_is_normalised(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(normalise_base_url(raw).expect("valid url"), expected);
}

#[rstest]
#[case("")]
#[case("api.github.com")]
#[case("https://")]
#[case("ftp://example.com")]
fn base_url_without_http_scheme_is_rejected(#[case] raw: &str) {
    assert!(matches!(
        normalise_base_url(raw),
        Err(GithubError::InvalidBaseUrl { .. })
    ));
}

#[test]
fn token_is_redacted_in_debug_output() {
    let config = GithubConfig::new(token());
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("ghp_example"));
    assert!(rendered.contains("<redacted>"));
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_tokens_are_rejected(#[case] raw: &str) {
    assert!(ApiToken::new(raw).is_none());
}

#[test]
fn token_with_newline_cannot_build_a_client() {
    let bad = ApiToken::new("abc\ndef").expect("non-blank");
    let err = GithubClient::new(GithubConfig::new(bad)).expect_err("invalid header");
    assert!(matches!(err, GithubError::InvalidToken));
}

#[test]
fn config_defaults_to_public_github() {
    let config = GithubConfig::new(token());
    assert_eq!(config.api_base_url, DEFAULT_API_URL);
    assert_eq!(config.timeout, DEFAULT_TIMEOUT);

    let client = GithubClient::new(config.with_api_base_url("https://ghe.example.com/api/v3/"))
        .expect("client builds");
    assert_eq!(client.base_url(), "https://ghe.example.com/api/v3");
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    // Bind then drop a listener so the port is known to be closed.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let client = GithubClient::new(
        GithubConfig::new(token())
            .with_api_base_url(format!("http://{addr}"))
            .with_timeout(Duration::from_secs(5)),
    )
    .expect("client builds");
    let milestone = NewMilestone {
        title: "v1".to_owned(),
        description: String::new(),
        due_on: DueDate::parse("2024-01-15").expect("date").to_timestamp(),
    };

    let err = client
        .create_milestone(&repository(), &milestone)
        .await
        .expect_err("nothing is listening");

    assert!(matches!(err, TrackerError::Transport { .. }), "got {err:?}");
}

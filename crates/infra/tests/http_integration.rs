//! HTTP collaborator tests against a mock host application.

use chrono::NaiveDate;
use tracklet_core::{LogbookSink, ProjectDirectory};
use tracklet_domain::{LogbookEntry, LogbookOutcome, SelectOption, TrackletError};
use tracklet_infra::http::{HttpDirectory, HttpLogbook};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn entry() -> LogbookEntry {
    LogbookEntry {
        service: "42".to_string(),
        description: "sprint planning".to_string(),
        hours: 1.5,
        renderer: "alice".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 8, 25).unwrap(),
    }
}

#[tokio::test]
async fn project_search_returns_label_value_pairs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("query", "web"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "label": "Website relaunch", "value": "p-1" },
            { "label": "Webshop", "value": "p-2" }
        ])))
        .mount(&server)
        .await;

    let directory = HttpDirectory::new(reqwest::Client::new(), server.uri());
    let options = directory.search_projects("web").await.unwrap();

    assert_eq!(
        options,
        vec![
            SelectOption { label: "Website relaunch".to_string(), value: "p-1".to_string() },
            SelectOption { label: "Webshop".to_string(), value: "p-2".to_string() },
        ]
    );
}

#[tokio::test]
async fn service_lookup_hits_the_project_scoped_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/p-1/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "label": "Development", "value": "s-1" }
        ])))
        .mount(&server)
        .await;

    let directory = HttpDirectory::new(reqwest::Client::new(), server.uri());
    let options = directory.services_for_project("p-1").await.unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].value, "s-1");
}

#[tokio::test]
async fn failed_lookups_degrade_to_an_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let directory = HttpDirectory::new(reqwest::Client::new(), server.uri());
    assert!(directory.search_projects("anything").await.unwrap().is_empty());

    // Unreachable host degrades the same way.
    let offline = HttpDirectory::new(reqwest::Client::new(), "http://127.0.0.1:1");
    assert!(offline.search_projects("anything").await.unwrap().is_empty());
}

#[tokio::test]
async fn an_accepted_logbook_entry_comes_back_as_a_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/logbook"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/logbook/entries/7"))
        .mount(&server)
        .await;

    let logbook = HttpLogbook::new(server.uri()).unwrap();
    let outcome = logbook.submit(&entry()).await.unwrap();
    assert_eq!(
        outcome,
        LogbookOutcome::Accepted { redirect: Some("/logbook/entries/7".to_string()) }
    );
}

#[tokio::test]
async fn a_validation_failure_returns_the_replacement_form_markup() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/logbook"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<form><p class=\"error\">Hours required</p></form>"),
        )
        .mount(&server)
        .await;

    let logbook = HttpLogbook::new(server.uri()).unwrap();
    let outcome = logbook.submit(&entry()).await.unwrap();
    match outcome {
        LogbookOutcome::Rejected { form_markup } => assert!(form_markup.contains("Hours required")),
        other => panic!("expected a rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn a_server_error_surfaces_as_a_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/logbook"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let logbook = HttpLogbook::new(server.uri()).unwrap();
    let result = logbook.submit(&entry()).await;
    assert!(matches!(result, Err(TrackletError::Network(_))));
}

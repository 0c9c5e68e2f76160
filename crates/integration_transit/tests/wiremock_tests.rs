//! Integration tests for the SL transit client (wiremock-based)

use std::time::Duration;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_transit::{SlTransitClient, TransitClient, TransitConfig, TransitError};

fn config_for_mock(base_url: &str) -> TransitConfig {
    TransitConfig {
        base_url: base_url.to_string(),
        timeout_secs: 2,
        ..TransitConfig::for_testing()
    }
}

const fn sample_trips_json() -> &'static str {
    r#"{
        "Trip": [
            {
                "checksum": "c1",
                "tripId": "C-0",
                "LegList": { "Leg": [
                    {
                        "Origin": { "name": "Work St", "extId": "300109002", "time": "17:32:00", "date": "2026-03-02" },
                        "Destination": { "name": "Slussen", "extId": "300109192", "time": "17:40:00", "date": "2026-03-02" },
                        "Product": { "line": "17", "catOutS": "MET" }
                    },
                    {
                        "Origin": { "name": "Slussen", "time": "17:43:00", "date": "2026-03-02" },
                        "Destination": { "name": "Home St", "extId": "300109001", "time": "17:55:00", "date": "2026-03-02" },
                        "Product": { "line": "53", "catOutS": "BUS" },
                        "Messages": { "Message": [ { "head": "Detour", "text": "Stop moved 50 m" } ] }
                    }
                ]}
            },
            {
                "checksum": "c2",
                "tripId": "C-1",
                "LegList": { "Leg": [
                    {
                        "Origin": { "name": "Work St", "time": "17:47:00" },
                        "Destination": { "name": "Home St", "time": "18:10:00" }
                    }
                ]}
            }
        ]
    }"#
}

const fn sample_lookup_json() -> &'static str {
    r#"{
        "StatusCode": 0,
        "Message": null,
        "ExecutionTime": 0,
        "ResponseData": [
            { "Name": "Slussen (Stockholm)", "SiteId": "9192", "Type": "Station", "X": "18071860", "Y": "59320284" },
            { "Name": "Slussens färjeläge", "SiteId": "1321", "Type": "Station", "X": "18074000", "Y": "59319000" }
        ]
    }"#
}

#[tokio::test]
async fn test_search_trips_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/TravelplannerV3/trip.json"))
        .and(query_param("key", "test-planning-key"))
        .and(query_param("originID", "9002"))
        .and(query_param("destID", "9001"))
        .and(query_param("lang", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_trips_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = SlTransitClient::new(&config_for_mock(&server.uri())).unwrap();
    let trips = client.search_trips("9002", "9001").await.unwrap();

    assert_eq!(trips.len(), 2);
    assert_eq!(trips[0].legs().len(), 2);
    assert_eq!(trips[0].departure().name, "Work St");
    assert_eq!(trips[0].arrival().name, "Home St");
    assert_eq!(trips[0].legs()[1].alerts[0].headline, "Detour");
    assert_eq!(trips[1].id(), Some("C-1"));
}

#[tokio::test]
async fn test_search_trips_empty_is_ok() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/TravelplannerV3/trip.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let client = SlTransitClient::new(&config_for_mock(&server.uri())).unwrap();
    let trips = client.search_trips("9002", "9001").await.unwrap();
    assert!(trips.is_empty());
}

#[tokio::test]
async fn test_search_trips_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/TravelplannerV3/trip.json"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let client = SlTransitClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client.search_trips("9002", "9001").await.unwrap_err();

    assert!(matches!(
        err,
        TransitError::RateLimitExceeded {
            retry_after_secs: Some(30)
        }
    ));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_search_trips_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/TravelplannerV3/trip.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = SlTransitClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client.search_trips("9002", "9001").await.unwrap_err();
    assert!(matches!(err, TransitError::RequestFailed(_)));
}

#[tokio::test]
async fn test_search_trips_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/TravelplannerV3/trip.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = SlTransitClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client.search_trips("9002", "9001").await.unwrap_err();
    assert!(matches!(err, TransitError::ParseError(_)));
}

#[tokio::test]
async fn test_search_trips_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/TravelplannerV3/trip.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = TransitConfig {
        timeout_secs: 1,
        ..config_for_mock(&server.uri())
    };
    let client = SlTransitClient::new(&config).unwrap();
    let err = client.search_trips("9002", "9001").await.unwrap_err();
    assert!(matches!(err, TransitError::Timeout { timeout_secs: 1 }));
}

#[tokio::test]
async fn test_lookup_stops_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/typeahead.json"))
        .and(query_param("key", "test-lookup-key"))
        .and(query_param("SearchString", "Slussen"))
        .and(query_param("StationOnly", "True"))
        .and(query_param("MaxResults", "6"))
        .and(query_param("lang", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_lookup_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = SlTransitClient::new(&config_for_mock(&server.uri())).unwrap();
    let stops = client.lookup_stops("Slussen").await.unwrap();

    assert_eq!(stops.len(), 2);
    assert_eq!(stops[0].name(), "Slussen (Stockholm)");
    assert_eq!(stops[0].id().as_str(), "9192");
    assert_eq!(stops[1].id().as_str(), "1321");
}

#[tokio::test]
async fn test_lookup_stops_no_matches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/typeahead.json"))
        .and(query_param("SearchString", "Slus"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"StatusCode":0,"Message":null,"ExecutionTime":0,"ResponseData":[]}"#),
        )
        .mount(&server)
        .await;

    let client = SlTransitClient::new(&config_for_mock(&server.uri())).unwrap();
    let stops = client.lookup_stops("Slus").await.unwrap();
    assert!(stops.is_empty());
}

#[tokio::test]
async fn test_lookup_stops_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/typeahead.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"StatusCode":1002,"Message":"Key is invalid","ExecutionTime":0}"#),
        )
        .mount(&server)
        .await;

    let client = SlTransitClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client.lookup_stops("Slussen").await.unwrap_err();
    assert!(matches!(err, TransitError::ApiError { .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_lookup_stops_empty_query() {
    let client = SlTransitClient::new(&TransitConfig::for_testing()).unwrap();
    let result = client.lookup_stops("").await;
    assert!(matches!(result, Err(TransitError::InvalidQuery(_))));
}

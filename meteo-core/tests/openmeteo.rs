//! Integration tests for the Open-Meteo provider using wiremock.

use meteo_core::{
    Action, Coordinate, FETCH_FAILED_MESSAGE, Form, HourLookup, OpenMeteoProvider, RequestState,
    SettlePolicy, run_fetch,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "latitude": 13.75,
        "longitude": 100.5,
        "generationtime_ms": 0.05,
        "utc_offset_seconds": 25200,
        "timezone": "Asia/Bangkok",
        "timezone_abbreviation": "+07",
        "current_weather": {
            "time": "2025-03-01T14:00",
            "interval": 900,
            "temperature": 33.1,
            "windspeed": 11.2,
            "winddirection": 200,
            "is_day": 1,
            "weathercode": 2
        },
        "hourly": {
            "time": ["2025-03-01T12:00", "2025-03-01T13:00", "2025-03-01T14:00"],
            "temperature_2m": [32.0, 32.8, 33.1],
            "relative_humidity_2m": [55, 52, 49],
            "wind_speed_10m": [9.0, 10.4, 11.2],
            "visibility": [24140.0, 24140.0, 15000.0]
        }
    })
}

fn provider_for(server: &MockServer) -> OpenMeteoProvider {
    OpenMeteoProvider::new(&format!("{}/v1/forecast", server.uri()), None).unwrap()
}

/// Run one submit through the form against `provider`.
async fn submit(form: &mut Form, provider: &OpenMeteoProvider) {
    let ticket = form.update(Action::Submit).expect("submit must issue a fetch");
    let settled = run_fetch(provider, ticket).await;
    form.update(settled);
}

#[tokio::test]
async fn test_fetch_success_sends_expected_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "13.7563"))
        .and(query_param("longitude", "100.5018"))
        .and(query_param("current_weather", "true"))
        .and(query_param(
            "hourly",
            "temperature_2m,relative_humidity_2m,wind_speed_10m,visibility",
        ))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let mut form = Form::default();
    submit(&mut form, &provider).await;

    let RequestState::Success(data) = form.state() else {
        panic!("expected success, got {:?}", form.state());
    };
    assert_eq!(data.current_weather.temperature, 33.1);
    assert_eq!(data.current_weather.weathercode, 2);
    assert_eq!(data.timezone, "Asia/Bangkok");

    let lookup = form.current_hour_data().expect("data is loaded");
    assert!(matches!(lookup, HourLookup::Found { index: 2, .. }));
    let reading = lookup.reading().unwrap();
    assert_eq!(reading.humidity, Some(49.0));
    assert_eq!(reading.visibility, Some(15000.0));
}

#[tokio::test]
async fn test_request_url_preserves_coordinate_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let mut form = Form::default();
    submit(&mut form, &provider).await;

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let query = requests[0].url.query().unwrap().to_string();
    assert!(query.contains("latitude=13.7563&longitude=100.5018"), "{query}");
}

#[tokio::test]
async fn test_not_found_and_server_error_use_generic_message() {
    for status in [404u16, 500] {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(serde_json::json!({"error": true, "reason": "Latitude must be in range"})),
            )
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);
        let mut form = Form::default();
        form.update(Action::SetLatitude("123".into()));
        submit(&mut form, &provider).await;

        let RequestState::Failure(message) = form.state() else {
            panic!("expected failure for {status}, got {:?}", form.state());
        };
        assert_eq!(message, FETCH_FAILED_MESSAGE);
        assert!(!message.contains(&status.to_string()));
        assert!(!message.contains("Latitude must be in range"));
        assert!(form.submit_enabled());
    }
}

#[tokio::test]
async fn test_invalid_json_reports_parser_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let mut form = Form::default();
    submit(&mut form, &provider).await;

    let RequestState::Failure(message) = form.state() else {
        panic!("expected failure, got {:?}", form.state());
    };
    assert!(message.starts_with("expected value"), "{message}");
}

#[tokio::test]
async fn test_network_failure_reports_transport_message() {
    // Nothing listens on port 1.
    let provider = OpenMeteoProvider::new("http://127.0.0.1:1/v1/forecast", None).unwrap();
    let mut form = Form::default();
    submit(&mut form, &provider).await;

    let RequestState::Failure(message) = form.state() else {
        panic!("expected failure, got {:?}", form.state());
    };
    assert_ne!(message, FETCH_FAILED_MESSAGE);
    assert!(message.contains("error sending request"), "{message}");
}

#[tokio::test]
async fn test_missing_hour_is_not_an_error() {
    let mock_server = MockServer::start().await;

    let mut body = forecast_body();
    body["current_weather"]["time"] = serde_json::json!("2025-03-01T14:15");

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let mut form = Form::new(Coordinate::default(), SettlePolicy::default());
    submit(&mut form, &provider).await;

    assert!(matches!(form.state(), RequestState::Success(_)));
    assert_eq!(form.current_hour_data(), Some(HourLookup::Missing));
}

//! Integration tests for WeatherProvider using wiremock.

use std::sync::Arc;

use skycast_weather::{Place, ProviderEndpoints, WeatherError, WeatherProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> WeatherProvider {
    WeatherProvider::new(
        Arc::new(reqwest::Client::new()),
        ProviderEndpoints {
            forecast_url: server.uri(),
            air_quality_url: server.uri(),
        },
        7,
    )
}

fn paris() -> Place {
    Place {
        name: "Paris, Île-de-France, France".to_string(),
        latitude: 48.8566,
        longitude: 2.3522,
    }
}

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "latitude": 48.86,
        "longitude": 2.35,
        "timezone": "Europe/Paris",
        "current": {
            "time": "2024-10-16T14:15",
            "temperature_2m": 21.6,
            "apparent_temperature": 20.4,
            "relative_humidity_2m": 60,
            "pressure_msl": 1013.25,
            "wind_speed_10m": 12.5,
            "weather_code": 2,
            "is_day": 1
        },
        "hourly": {
            "time": ["2024-10-16T13:00", "2024-10-16T14:00", "2024-10-16T15:00"],
            "visibility": [20000.0, 24140.0, null]
        },
        "daily": {
            "time": ["2024-10-16", "2024-10-17", "2024-10-18"],
            "weather_code": [2, 61, 3],
            "temperature_2m_max": [22.8, 19.1, 18.0],
            "temperature_2m_min": [14.2, 12.9, 11.5]
        }
    })
}

fn air_quality_body() -> serde_json::Value {
    serde_json::json!({
        "hourly": {
            "time": ["2024-10-16T14:00", "2024-10-16T15:00"],
            "us_aqi": [42, 45]
        }
    })
}

#[tokio::test]
async fn test_fetch_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "48.8566"))
        .and(query_param("longitude", "2.3522"))
        .and(query_param("hourly", "visibility"))
        .and(query_param("daily", "weather_code,temperature_2m_max,temperature_2m_min"))
        .and(query_param("windspeed_unit", "kmh"))
        .and(query_param("timezone", "auto"))
        .and(query_param("forecast_days", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/air-quality"))
        .and(query_param("hourly", "us_aqi"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(air_quality_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (forecast, air_quality) = provider(&mock_server).fetch(&paris()).await.unwrap();

    assert_eq!(forecast.current.temperature_c, Some(21.6));
    assert_eq!(forecast.current.relative_humidity_pct, Some(60.0));
    assert_eq!(forecast.current.weather_code, Some(2));
    assert!(forecast.current.is_day);
    assert_eq!(forecast.daily.len(), 3);
    assert_eq!(forecast.daily[1].weather_code, Some(61));

    let visibility = forecast.hourly_visibility.unwrap();
    assert_eq!(visibility.value_nearest(forecast.current.time), Some(24140.0));

    let aqi = air_quality.hourly_aqi.unwrap();
    assert_eq!(aqi.value_nearest(forecast.current.time), Some(42.0));
}

#[tokio::test]
async fn test_air_quality_failure_fails_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/air-quality"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&mock_server)
        .await;

    let err = provider(&mock_server).fetch(&paris()).await.unwrap_err();
    assert!(matches!(err, WeatherError::Network(_)));
}

#[tokio::test]
async fn test_forecast_failure_fails_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/air-quality"))
        .respond_with(ResponseTemplate::new(200).set_body_json(air_quality_body()))
        .mount(&mock_server)
        .await;

    let err = provider(&mock_server).fetch(&paris()).await.unwrap_err();
    assert!(matches!(err, WeatherError::Network(_)));
}

#[tokio::test]
async fn test_forecast_without_current() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "daily": { "time": ["2024-10-16"] }
        })))
        .mount(&mock_server)
        .await;

    let err = provider(&mock_server)
        .fetch_forecast(48.8566, 2.3522)
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::NoCurrentWeather));
}

#[tokio::test]
async fn test_air_quality_with_null_sample() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/air-quality"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "hourly": { "time": ["2024-10-16T14:00"], "us_aqi": [null] }
        })))
        .mount(&mock_server)
        .await;

    let air_quality = provider(&mock_server)
        .fetch_air_quality(48.8566, 2.3522)
        .await
        .unwrap();
    let series = air_quality.hourly_aqi.unwrap();
    assert_eq!(series.values, vec![None]);
}

#[tokio::test]
async fn test_forecast_body_not_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/air-quality"))
        .respond_with(ResponseTemplate::new(200).set_body_json(air_quality_body()))
        .mount(&mock_server)
        .await;

    let err = provider(&mock_server).fetch(&paris()).await.unwrap_err();
    assert!(matches!(err, WeatherError::Parse(_)));
    assert_eq!(
        err.user_message(),
        "Received an unexpected response. Please try again."
    );
}

#[tokio::test]
async fn test_air_quality_body_wrong_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/air-quality"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!("service unavailable")))
        .mount(&mock_server)
        .await;

    let err = provider(&mock_server)
        .fetch_air_quality(48.8566, 2.3522)
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::Parse(_)));
}

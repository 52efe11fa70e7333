// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Weather forecasts backed by the Open-Meteo public API.

use crate::{Coordinates, DailyForecast, Forecaster, GeoResult};
use airmap_core::env::get_optional_var;
use async_trait::async_trait;
use bytes::Buf;
use derivative::Derivative;
use log::debug;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::io;
use std::time::Duration;

/// Default endpoint of the forecast API.
const DEFAULT_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Default maximum time to wait for a forecast before giving up.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Converts a `reqwest::Error` to an `io::Error`.
fn reqwest_error_to_io_error(e: reqwest::Error) -> io::Error {
    let kind = if e.is_timeout() { io::ErrorKind::TimedOut } else { io::ErrorKind::Other };
    io::Error::new(kind, format!("{}", e))
}

/// Converts a `reqwest::Response` to an `io::Error`.  The response should have a non-OK status.
async fn http_response_to_io_error(response: Response) -> io::Error {
    let status = response.status();

    let kind = match status {
        StatusCode::OK => panic!("Should not have been called on a successful request"),

        // Match against the codes we know the server explicitly hands us.
        StatusCode::BAD_REQUEST => io::ErrorKind::InvalidInput,
        StatusCode::NOT_FOUND => io::ErrorKind::NotFound,
        StatusCode::TOO_MANY_REQUESTS => io::ErrorKind::ConnectionRefused,

        _ => io::ErrorKind::Other,
    };

    match response.text().await {
        Ok(text) => io::Error::new(
            kind,
            format!("HTTP request returned status {} with text '{}'", status, text),
        ),
        Err(e) => io::Error::new(
            kind,
            format!("HTTP request returned status {} and failed to get text due to {}", status, e),
        ),
    }
}

/// Daily section of a `ForecastResponse`.
#[derive(Deserialize)]
struct DailyResponse {
    /// Maximum temperatures, one per requested day.
    temperature_2m_max: Vec<Option<f64>>,

    /// Minimum temperatures, one per requested day.
    temperature_2m_min: Vec<Option<f64>>,
}

/// Response from the Open-Meteo service on a successful request.
#[derive(Deserialize)]
struct ForecastResponse {
    /// Per-day aggregates.
    daily: DailyResponse,
}

/// Extracts today's values from the raw JSON `body` returned by the service.
fn parse_forecast<R: io::Read>(body: R) -> GeoResult<DailyForecast> {
    let response: ForecastResponse = serde_json::from_reader(body)?;

    let first = |values: &[Option<f64>], name: &str| {
        values.first().copied().flatten().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, format!("Response lacks today's {}", name))
        })
    };
    let high = first(&response.daily.temperature_2m_max, "temperature_2m_max")?;
    let low = first(&response.daily.temperature_2m_min, "temperature_2m_min")?;
    Ok(DailyForecast { high, low })
}

/// Options to configure an `OpenMeteoForecaster`.
#[derive(Derivative)]
#[derivative(Debug)]
#[cfg_attr(test, derivative(PartialEq))]
pub struct OpenMeteoOptions {
    /// Base URL of the forecast endpoint.
    pub url: String,

    /// Maximum time to wait for each request to complete.
    pub timeout: Duration,
}

impl Default for OpenMeteoOptions {
    fn default() -> Self {
        Self { url: DEFAULT_URL.to_owned(), timeout: DEFAULT_TIMEOUT }
    }
}

impl OpenMeteoOptions {
    /// Creates a set of options from environment variables whose name is prefixed with the given
    /// `prefix`.
    ///
    /// This will use variables such as `<prefix>_URL` and `<prefix>_TIMEOUT`.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        Ok(Self {
            url: get_optional_var::<String>(prefix, "URL")?
                .unwrap_or_else(|| DEFAULT_URL.to_owned()),
            timeout: get_optional_var::<Duration>(prefix, "TIMEOUT")?.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}

/// Forecaster that queries the Open-Meteo API, which needs no credentials.
#[derive(Clone)]
pub struct OpenMeteoForecaster {
    /// Asynchronous HTTP client with which to issue the service requests.
    client: Client,

    /// Base URL of the forecast endpoint.
    url: String,
}

impl OpenMeteoForecaster {
    /// Creates a new Open-Meteo-backed forecaster using `opts` for configuration.
    pub fn new(opts: OpenMeteoOptions) -> GeoResult<Self> {
        let client =
            Client::builder().timeout(opts.timeout).build().map_err(reqwest_error_to_io_error)?;
        Ok(Self { client, url: opts.url })
    }
}

#[async_trait]
impl Forecaster for OpenMeteoForecaster {
    async fn today(&self, at: &Coordinates) -> GeoResult<DailyForecast> {
        let request = format!(
            "{}?latitude={}&longitude={}&daily=temperature_2m_max,temperature_2m_min&timezone=auto&forecast_days=1",
            self.url,
            at.latitude(),
            at.longitude(),
        );
        debug!("Requesting forecast: {}", request);

        let response = self.client.get(&request).send().await.map_err(reqwest_error_to_io_error)?;
        match response.status() {
            StatusCode::OK => {
                let bytes = response.bytes().await.map_err(reqwest_error_to_io_error)?;
                parse_forecast(bytes.reader())
            }
            _ => Err(http_response_to_io_error(response).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forecast_ok() {
        let body = r#"{
            "latitude": 40.64,
            "longitude": -73.78,
            "daily_units": {"time": "iso8601", "temperature_2m_max": "°C"},
            "daily": {
                "time": ["2024-05-01"],
                "temperature_2m_max": [21.4],
                "temperature_2m_min": [11.9]
            }
        }"#;
        assert_eq!(DailyForecast { high: 21.4, low: 11.9 }, parse_forecast(body.as_bytes()).unwrap());
    }

    #[test]
    fn test_parse_forecast_missing_values() {
        let body = r#"{"daily": {"temperature_2m_max": [], "temperature_2m_min": [3.0]}}"#;
        let err = parse_forecast(body.as_bytes()).unwrap_err();
        assert_eq!(io::ErrorKind::InvalidData, err.kind());
        assert!(err.to_string().contains("temperature_2m_max"));

        let body = r#"{"daily": {"temperature_2m_max": [3.0], "temperature_2m_min": [null]}}"#;
        let err = parse_forecast(body.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("temperature_2m_min"));
    }

    #[test]
    fn test_parse_forecast_bad_json() {
        let err = parse_forecast("not json".as_bytes()).unwrap_err();
        assert_eq!(io::ErrorKind::InvalidData, err.kind());
    }

    #[test]
    fn test_open_meteo_options_from_env_defaults() {
        temp_env::with_vars([("WEATHER_URL", None::<&str>), ("WEATHER_TIMEOUT", None)], || {
            assert_eq!(OpenMeteoOptions::default(), OpenMeteoOptions::from_env("WEATHER").unwrap());
        });
    }

    #[test]
    fn test_open_meteo_options_from_env_all_present() {
        temp_env::with_vars(
            [("WEATHER_URL", Some("http://localhost:1234/f")), ("WEATHER_TIMEOUT", Some("250ms"))],
            || {
                assert_eq!(
                    OpenMeteoOptions {
                        url: "http://localhost:1234/f".to_owned(),
                        timeout: Duration::from_millis(250),
                    },
                    OpenMeteoOptions::from_env("WEATHER").unwrap()
                );
            },
        );
    }

    #[test]
    fn test_open_meteo_options_from_env_bad_timeout() {
        temp_env::with_vars([("WEATHER_TIMEOUT", Some("soon"))], || {
            let err = OpenMeteoOptions::from_env("WEATHER").unwrap_err();
            assert!(err.contains("WEATHER_TIMEOUT"));
        });
    }

    #[tokio::test]
    #[ignore = "Talks to an external service"]
    async fn test_today_real_service() {
        let forecaster = OpenMeteoForecaster::new(OpenMeteoOptions::default()).unwrap();
        let forecast = forecaster.today(&Coordinates::new(40.6413, -73.7781).unwrap()).await.unwrap();
        assert!(forecast.low <= forecast.high);
    }

    #[tokio::test]
    async fn test_today_unreachable_service() {
        let forecaster = OpenMeteoForecaster::new(OpenMeteoOptions {
            url: "http://127.0.0.1:1/forecast".to_owned(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        forecaster.today(&Coordinates::new(0.0, 0.0).unwrap()).await.unwrap_err();
    }
}

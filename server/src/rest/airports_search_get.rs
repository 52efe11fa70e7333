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

//! API to get an airport by its ICAO or IATA codes along with today's forecast.

use crate::driver::Driver;
use crate::model::CodeLookup;
use airmap_core::rest::{EmptyBody, QueryParams, RestError};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

/// Query parameters for this API.
#[derive(Deserialize)]
pub(crate) struct SearchQuery {
    /// ICAO code of the airport.
    icao: Option<String>,

    /// IATA code of the airport.
    iata: Option<String>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    QueryParams(query): QueryParams<SearchQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let lookup = CodeLookup::new(query.icao, query.iata).ok_or_else(|| {
        RestError::InvalidRequest("At least one of ICAO or IATA code must be provided".to_owned())
    })?;
    let airport = driver.search_airport(&lookup).await?;
    Ok(Json(airport))
}

#[cfg(test)]
mod tests {
    use crate::db::testutils::*;
    use crate::driver::testutils::JFK_FORECAST;
    use crate::driver::DriverOptions;
    use crate::model::*;
    use crate::rest::testutils::*;
    use airmap_core::rest::testutils::OneShotBuilder;
    use airmap_core::test_payload_must_be_empty;
    use axum::http;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/airports/search".to_owned())
    }

    #[tokio::test]
    async fn test_with_forecast() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_query([("iata", "JFK")])
            .send_empty()
            .await
            .expect_json::<serde_json::Value>()
            .await;
        assert_eq!("John F Kennedy International Airport", response["name"]);
        assert_eq!("KJFK", response["icao"]);
        assert_eq!(JFK_COORDS.0, response["latitude"]);
        assert_eq!(JFK_FORECAST.0, response["high"]);
        assert_eq!(JFK_FORECAST.1, response["low"]);
    }

    #[tokio::test]
    async fn test_forecast_failure_is_internal_error() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .with_query([("icao", "KLAX")])
            .send_empty()
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("^Internal server error$")
            .await;
    }

    #[tokio::test]
    async fn test_forecast_failure_fail_open() {
        let context =
            TestContext::setup_with_opts(DriverOptions { weather_fail_open: true }).await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_query([("icao", "KLAX")])
            .send_empty()
            .await
            .expect_json::<serde_json::Value>()
            .await;
        assert_eq!("LAX", response["iata"]);
        assert!(response.get("high").is_none());
        assert!(response.get("low").is_none());
    }

    #[tokio::test]
    async fn test_missing_coordinates_is_internal_error() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .with_query([("iata", "NWH")])
            .send_empty()
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("^Internal server error$")
            .await;
    }

    #[tokio::test]
    async fn test_missing_coordinates_fail_open() {
        let context =
            TestContext::setup_with_opts(DriverOptions { weather_fail_open: true }).await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_query([("iata", "NWH")])
            .send_empty()
            .await
            .expect_json::<serde_json::Value>()
            .await;
        assert_eq!("Nowhere Field", response["name"]);
        assert!(response.get("high").is_none());
        assert!(response.get("low").is_none());
    }

    #[tokio::test]
    async fn test_conflicting_codes() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .with_query([("icao", "KJFK"), ("iata", "LHR")])
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("ICAO and IATA codes identify different airports")
            .await;
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .with_query([("iata", "MAD")])
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("No airport found for the given ICAO/IATA code")
            .await;
    }

    #[tokio::test]
    async fn test_missing_codes() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("At least one of ICAO or IATA code must be provided")
            .await;
    }

    #[tokio::test]
    async fn test_deserializes_as_airport() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_query([("iata", "JFK")])
            .send_empty()
            .await
            .expect_json::<AirportWithForecast>()
            .await;
        assert_eq!(Some("New York"), response.airport.city.as_deref());
        assert_eq!(Some(JFK_FORECAST.0), response.high);
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route(), [("iata", "JFK")]);
}

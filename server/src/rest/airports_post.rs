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

//! API to create a new airport.

use crate::driver::Driver;
use crate::model::Airport;
use crate::rest::{non_empty, require};
use airmap_core::rest::{JsonBody, RestError};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{http, Json};
use serde::Deserialize;
#[cfg(test)]
use serde::Serialize;

/// Message returned when the mandatory fields are missing.
const MISSING_FIELDS_MESSAGE: &str = "Airport name and country are required";

/// Message sent to the server to create an airport.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct NewAirportRequest {
    /// Name of the airport.
    pub(crate) name: Option<String>,

    /// City served by the airport.
    pub(crate) city: Option<String>,

    /// Name of the country the airport is in.
    pub(crate) country: Option<String>,

    /// 3-character IATA code.
    pub(crate) iata: Option<String>,

    /// ICAO code.
    pub(crate) icao: Option<String>,

    /// Latitude in decimal degrees.
    pub(crate) latitude: Option<f64>,

    /// Longitude in decimal degrees.
    pub(crate) longitude: Option<f64>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<NewAirportRequest>,
) -> Result<impl IntoResponse, RestError> {
    let (latitude, longitude) = match (request.latitude, request.longitude) {
        (Some(latitude), Some(longitude)) => {
            airmap_geo::Coordinates::new(latitude, longitude)
                .map_err(|e| RestError::InvalidRequest(e.to_string()))?;
            (Some(latitude), Some(longitude))
        }
        (None, None) => (None, None),
        _ => {
            return Err(RestError::InvalidRequest(
                "Latitude and longitude must be provided together".to_owned(),
            ))
        }
    };

    let airport = Airport {
        name: require(request.name, MISSING_FIELDS_MESSAGE)?,
        city: non_empty(request.city),
        country: require(request.country, MISSING_FIELDS_MESSAGE)?,
        iata: non_empty(request.iata),
        icao: non_empty(request.icao),
        latitude,
        longitude,
    };
    let airport = driver.create_airport(airport).await?;
    Ok((http::StatusCode::CREATED, Json(airport)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::model::*;
    use crate::rest::testutils::*;
    use airmap_core::rest::testutils::OneShotBuilder;
    use airmap_core::test_payload_must_be_json;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/airports".to_owned())
    }

    #[tokio::test]
    async fn test_ok_minimal() {
        let context = TestContext::setup_empty().await;

        let request = NewAirportRequest {
            name: Some("Barajas".to_owned()),
            country: Some("Spain".to_owned()),
            iata: Some(String::new()),
            ..Default::default()
        };
        let response = OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Airport>()
            .await;
        let exp_airport = Airport::new("Barajas", "Spain");
        assert_eq!(exp_airport, response);

        assert_eq!(
            vec![exp_airport],
            db::get_all_airports(&mut context.ex().await).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_ok_with_coordinates() {
        let context = TestContext::setup_empty().await;

        let request = NewAirportRequest {
            name: Some("Barajas".to_owned()),
            city: Some("Madrid".to_owned()),
            country: Some("Spain".to_owned()),
            iata: Some("MAD".to_owned()),
            icao: Some("LEMD".to_owned()),
            latitude: Some(40.4719),
            longitude: Some(-3.5626),
        };
        let response = OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Airport>()
            .await;
        assert_eq!(
            Airport::new("Barajas", "Spain")
                .with_city("Madrid")
                .with_iata("MAD")
                .with_icao("LEMD")
                .with_coordinates(40.4719, -3.5626),
            response
        );
    }

    #[tokio::test]
    async fn test_bad_coordinates() {
        let context = TestContext::setup_empty().await;

        let request = NewAirportRequest {
            name: Some("Barajas".to_owned()),
            country: Some("Spain".to_owned()),
            latitude: Some(140.0),
            longitude: Some(-3.5626),
            ..Default::default()
        };
        OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Latitude.*out of range")
            .await;

        let request = NewAirportRequest {
            name: Some("Barajas".to_owned()),
            country: Some("Spain".to_owned()),
            latitude: Some(40.4719),
            ..Default::default()
        };
        OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("must be provided together")
            .await;

        assert!(db::get_all_airports(&mut context.ex().await).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let context = TestContext::setup_empty().await;

        for request in [
            NewAirportRequest { name: Some("Barajas".to_owned()), ..Default::default() },
            NewAirportRequest { country: Some("Spain".to_owned()), ..Default::default() },
        ] {
            OneShotBuilder::new(context.app(), route())
                .send_json(request)
                .await
                .expect_status(http::StatusCode::BAD_REQUEST)
                .expect_error(MISSING_FIELDS_MESSAGE)
                .await;
        }

        assert!(db::get_all_airports(&mut context.ex().await).await.unwrap().is_empty());
    }

    test_payload_must_be_json!(TestContext::setup_empty().await.into_app(), route());
}

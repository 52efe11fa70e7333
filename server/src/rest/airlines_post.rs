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

//! API to create a new airline.

use crate::driver::Driver;
use crate::model::Airline;
use crate::rest::{non_empty, require};
use airmap_core::rest::{JsonBody, RestError};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{http, Json};
use serde::Deserialize;
#[cfg(test)]
use serde::Serialize;

/// Message returned when the mandatory fields are missing.
const MISSING_FIELDS_MESSAGE: &str = "Airline name and country are required";

/// Message sent to the server to create an airline.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct NewAirlineRequest {
    /// Name of the airline.
    pub(crate) name: Option<String>,

    /// Name of the country the airline belongs to.
    pub(crate) country: Option<String>,

    /// 2-character IATA code.
    pub(crate) iata: Option<String>,

    /// ICAO code.
    pub(crate) icao: Option<String>,

    /// Radio callsign.
    pub(crate) callsign: Option<String>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<NewAirlineRequest>,
) -> Result<impl IntoResponse, RestError> {
    let airline = Airline {
        name: require(request.name, MISSING_FIELDS_MESSAGE)?,
        country: require(request.country, MISSING_FIELDS_MESSAGE)?,
        iata: non_empty(request.iata),
        icao: non_empty(request.icao),
        callsign: non_empty(request.callsign),
    };
    let airline = driver.create_airline(airline).await?;
    Ok((http::StatusCode::CREATED, Json(airline)))
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
        (http::Method::POST, "/airlines".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup_empty().await;

        let request = NewAirlineRequest {
            name: Some("Iberia".to_owned()),
            country: Some("Spain".to_owned()),
            iata: Some("IB".to_owned()),
            icao: Some("IBE".to_owned()),
            callsign: Some(String::new()),
        };
        let response = OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Airline>()
            .await;
        let exp_airline = Airline::new("Iberia", "Spain").with_iata("IB").with_icao("IBE");
        assert_eq!(exp_airline, response);

        let lookup = CodeLookup::by_iata("IB");
        assert_eq!(
            vec![exp_airline],
            db::find_airlines(&mut context.ex().await, &lookup).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let context = TestContext::setup_empty().await;

        for request in [
            NewAirlineRequest { name: Some("Iberia".to_owned()), ..Default::default() },
            NewAirlineRequest { country: Some("Spain".to_owned()), ..Default::default() },
            NewAirlineRequest {
                name: Some(String::new()),
                country: Some("Spain".to_owned()),
                ..Default::default()
            },
        ] {
            OneShotBuilder::new(context.app(), route())
                .send_json(request)
                .await
                .expect_status(http::StatusCode::BAD_REQUEST)
                .expect_error(MISSING_FIELDS_MESSAGE)
                .await;
        }
    }

    test_payload_must_be_json!(TestContext::setup_empty().await.into_app(), route());
}

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

//! API to add an aircraft type to an existing route.

use crate::driver::Driver;
use crate::model::{AircraftCode, AirlineCode, AirportCode, Route};
use crate::rest::RouteRequest;
use airmap_core::rest::{JsonBody, RestError};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
#[cfg(test)]
use serde::Deserialize;
use serde::Serialize;

/// Message sent back to the client after processing the update.
#[derive(Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct UpdateResponse {
    /// Description of the outcome.
    message: String,

    /// The route after the update, if it was modified.
    #[serde(skip_serializing_if = "Option::is_none")]
    updated: Option<Route>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<RouteRequest>,
) -> Result<impl IntoResponse, RestError> {
    let codes = (
        AirlineCode::new(request.airline.unwrap_or_default()),
        AirportCode::new(request.departure.unwrap_or_default()),
        AirportCode::new(request.arrival.unwrap_or_default()),
        AircraftCode::new(request.aircraft.unwrap_or_default()),
    );
    let (airline, departure, arrival, aircraft) = match codes {
        (Ok(airline), Ok(departure), Ok(arrival), Ok(aircraft)) => {
            (airline, departure, arrival, aircraft)
        }
        _ => {
            return Err(RestError::InvalidRequest(
                "Valid airline, departure, arrival, and aircraft code (3-char) are required"
                    .to_owned(),
            ))
        }
    };

    let response = match driver.append_aircraft(&airline, &departure, &arrival, aircraft).await? {
        Some(route) => UpdateResponse {
            message: "Aircraft type appended successfully.".to_owned(),
            updated: Some(route),
        },
        None => UpdateResponse {
            message: "Aircraft type already exists for this route. No changes made.".to_owned(),
            updated: None,
        },
    };
    Ok(Json(response))
}

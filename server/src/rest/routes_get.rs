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

//! API to get the distance between two airports and the services that connect them.

use crate::driver::Driver;
use crate::rest::require;
use airmap_core::rest::{EmptyBody, QueryParams, RestError};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

/// Message returned when any of the airports is missing.
const MISSING_CODES_MESSAGE: &str = "Both departure (from) and arrival (to) IATA codes are required";

/// Query parameters for this API.
#[derive(Deserialize)]
pub(crate) struct RoutesQuery {
    /// IATA code of the departure airport.
    from: Option<String>,

    /// IATA code of the arrival airport.
    to: Option<String>,
}

/// Rounds a distance in kilometers to two decimal places.
fn round_km(distance: f64) -> f64 {
    (distance * 100.0).round() / 100.0
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    QueryParams(query): QueryParams<RoutesQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let from = require(query.from, MISSING_CODES_MESSAGE)?;
    let to = require(query.to, MISSING_CODES_MESSAGE)?;
    let mut summary = driver.get_route_summary(&from, &to).await?;
    summary.distance_km = round_km(summary.distance_km);
    Ok(Json(summary))
}

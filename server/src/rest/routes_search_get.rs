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

//! API to find the routes operated by an airline with a given aircraft type.

use crate::driver::Driver;
use crate::model::AircraftCode;
use crate::rest::require;
use airmap_core::rest::{EmptyBody, QueryParams, RestError};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

/// Message returned when any of the codes is missing.
const MISSING_CODES_MESSAGE: &str = "Both airline and aircraft codes are required";

/// Query parameters for this API.
#[derive(Deserialize)]
pub(crate) struct SearchQuery {
    /// IATA code of the airline.
    airline: Option<String>,

    /// Aircraft type code.
    aircraft: Option<String>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    QueryParams(query): QueryParams<SearchQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let airline = require(query.airline, MISSING_CODES_MESSAGE)?;
    let aircraft = AircraftCode::new(require(query.aircraft, MISSING_CODES_MESSAGE)?)?;
    let legs = driver.search_routes(&airline, &aircraft).await?;
    Ok(Json(legs))
}

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

//! API to list the airlines that fly to or from an airport.

use crate::driver::Driver;
use crate::rest::require;
use airmap_core::rest::{EmptyBody, QueryParams, RestError};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

/// Query parameters for this API.
#[derive(Deserialize)]
pub(crate) struct AtAirportQuery {
    /// IATA code of the airport.
    iata: Option<String>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    QueryParams(query): QueryParams<AtAirportQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let iata = require(query.iata, "IATA code is required")?;
    let airlines = driver.get_airlines_at_airport(&iata).await?;
    Ok(Json(airlines))
}

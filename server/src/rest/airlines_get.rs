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

//! API to list the airlines of a set of countries.

use crate::driver::Driver;
use crate::rest::parse_country_codes;
use airmap_core::rest::{EmptyBody, QueryParams, RestError};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

/// Query parameters for this API.
#[derive(Deserialize)]
pub(crate) struct AirlinesQuery {
    /// Comma-separated list of country codes.
    country_code: Option<String>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    QueryParams(query): QueryParams<AirlinesQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let country_codes = parse_country_codes(query.country_code)?;
    let airlines = driver.get_airlines_in_countries(&country_codes).await?;
    Ok(Json(airlines))
}

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

//! API to delete an airport.

use crate::driver::Driver;
use crate::model::CodeLookup;
use crate::rest::MessageResponse;
use airmap_core::rest::{EmptyBody, QueryParams, RestError};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

/// Query parameters for this API.
#[derive(Deserialize)]
pub(crate) struct DeleteQuery {
    /// ICAO code of the airport to delete.
    icao: Option<String>,

    /// IATA code of the airport to delete.
    iata: Option<String>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    QueryParams(query): QueryParams<DeleteQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let lookup = CodeLookup::new(query.icao, query.iata).ok_or_else(|| {
        RestError::InvalidRequest("ICAO or IATA code is required for deletion".to_owned())
    })?;
    driver.delete_airport(&lookup).await?;
    Ok(Json(MessageResponse::new("Airport deleted successfully")))
}

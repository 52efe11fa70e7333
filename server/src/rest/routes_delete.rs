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

//! API to delete a route.

use crate::driver::Driver;
use crate::model::{AirlineCode, AirportCode, Route};
use crate::rest::RouteRequest;
use airmap_core::rest::{JsonBody, RestError};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
#[cfg(test)]
use serde::Deserialize;
use serde::Serialize;

/// Message sent back to the client after deleting a route.
#[derive(Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct DeleteResponse {
    /// Description of the outcome.
    message: String,

    /// The route that was deleted.
    deleted: Route,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<RouteRequest>,
) -> Result<impl IntoResponse, RestError> {
    let airline = AirlineCode::new(request.airline.unwrap_or_default())?;
    let departure = AirportCode::new(request.departure.unwrap_or_default())?;
    let arrival = AirportCode::new(request.arrival.unwrap_or_default())?;
    let deleted = driver.delete_route(&airline, &departure, &arrival).await?;
    Ok(Json(DeleteResponse { message: "Route deleted successfully".to_owned(), deleted }))
}

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

//! API to create a new route.

use crate::driver::Driver;
use crate::model::{AircraftCode, AirlineCode, AirportCode};
use crate::rest::RouteRequest;
use airmap_core::rest::{JsonBody, RestError};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{http, Json};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<RouteRequest>,
) -> Result<impl IntoResponse, RestError> {
    let airline = AirlineCode::new(request.airline.unwrap_or_default())?;
    let departure = AirportCode::new(request.departure.unwrap_or_default())?;
    let arrival = AirportCode::new(request.arrival.unwrap_or_default())?;
    let aircraft = AircraftCode::new(request.aircraft.unwrap_or_default())?;
    let route = driver.create_route(&airline, &departure, &arrival, aircraft).await?;
    Ok((http::StatusCode::CREATED, Json(route)))
}

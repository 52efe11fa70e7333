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

//! Entry point to the REST server.

use crate::driver::Driver;
use airmap_core::rest::{RestError, RestResult};
use axum::Router;
use serde::{Deserialize, Serialize};

mod airlines_at_airport_get;
mod airlines_between_get;
mod airlines_delete;
mod airlines_get;
mod airlines_post;
mod airlines_search_get;
mod airports_all_get;
mod airports_delete;
mod airports_get;
mod airports_post;
mod airports_search_get;
mod countries_get;
mod routes_arrivals_get;
mod routes_by_airline_get;
mod routes_delete;
mod routes_departures_get;
mod routes_get;
mod routes_post;
mod routes_put;
mod routes_search_get;
#[cfg(test)]
mod testutils;

/// Response carrying a human-readable confirmation message.
#[derive(Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct MessageResponse {
    /// The confirmation message.
    pub(crate) message: String,
}

impl MessageResponse {
    /// Creates a new response with `message`.
    pub(crate) fn new<S: Into<String>>(message: S) -> Self {
        Self { message: message.into() }
    }
}

/// Message sent to the server to create, update or delete a route.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct RouteRequest {
    /// IATA code of the airline operating the route.
    pub(crate) airline: Option<String>,

    /// IATA code of the departure airport.
    pub(crate) departure: Option<String>,

    /// IATA code of the arrival airport.
    pub(crate) arrival: Option<String>,

    /// Aircraft type code.  Not used for deletions.
    pub(crate) aircraft: Option<String>,
}

#[cfg(test)]
impl RouteRequest {
    /// Creates a new request for the given raw fields.
    pub(crate) fn new(
        airline: &str,
        departure: &str,
        arrival: &str,
        aircraft: Option<&str>,
    ) -> Self {
        Self {
            airline: Some(airline.to_owned()),
            departure: Some(departure.to_owned()),
            arrival: Some(arrival.to_owned()),
            aircraft: aircraft.map(str::to_owned),
        }
    }
}

/// Returns the contents of a required request `field`, failing with `message` if the field is
/// missing or empty.
pub(crate) fn require(field: Option<String>, message: &str) -> RestResult<String> {
    match field {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RestError::InvalidRequest(message.to_owned())),
    }
}

/// Drops empty optional request fields.
pub(crate) fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

/// Parses a comma-separated list of country codes as received in the `country_code` parameter.
pub(crate) fn parse_country_codes(raw: Option<String>) -> RestResult<Vec<String>> {
    let raw = require(raw, "country_code parameter is required")?;
    let codes = raw
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_owned)
        .collect::<Vec<String>>();
    if codes.is_empty() {
        return Err(RestError::InvalidRequest("Invalid country_code parameter".to_owned()));
    }
    Ok(codes)
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::get;
    Router::new()
        .route("/countries", get(countries_get::handler))
        .route(
            "/airlines",
            get(airlines_get::handler)
                .post(airlines_post::handler)
                .delete(airlines_delete::handler),
        )
        .route("/airlines/search", get(airlines_search_get::handler))
        .route("/airlines/at-airport", get(airlines_at_airport_get::handler))
        .route("/airlines/between", get(airlines_between_get::handler))
        .route(
            "/airports",
            get(airports_get::handler)
                .post(airports_post::handler)
                .delete(airports_delete::handler),
        )
        .route("/airports/search", get(airports_search_get::handler))
        .route("/airports/all", get(airports_all_get::handler))
        .route(
            "/routes",
            get(routes_get::handler)
                .post(routes_post::handler)
                .put(routes_put::handler)
                .delete(routes_delete::handler),
        )
        .route("/routes/arrivals", get(routes_arrivals_get::handler))
        .route("/routes/departures", get(routes_departures_get::handler))
        .route("/routes/by-airline", get(routes_by_airline_get::handler))
        .route("/routes/search", get(routes_search_get::handler))
        .with_state(driver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert_eq!("x", require(Some("x".to_owned()), "msg").unwrap());
        assert_eq!(
            RestError::InvalidRequest("msg".to_owned()),
            require(Some(String::new()), "msg").unwrap_err()
        );
        assert_eq!(RestError::InvalidRequest("msg".to_owned()), require(None, "msg").unwrap_err());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(Some("x".to_owned()), non_empty(Some("x".to_owned())));
        assert_eq!(None, non_empty(Some(String::new())));
        assert_eq!(None, non_empty(None));
    }

    #[test]
    fn test_parse_country_codes() {
        assert_eq!(
            vec!["US".to_owned(), "CA".to_owned()],
            parse_country_codes(Some(" US, ,CA,".to_owned())).unwrap()
        );
        assert_eq!(
            RestError::InvalidRequest("country_code parameter is required".to_owned()),
            parse_country_codes(None).unwrap_err()
        );
        assert_eq!(
            RestError::InvalidRequest("country_code parameter is required".to_owned()),
            parse_country_codes(Some(String::new())).unwrap_err()
        );
        assert_eq!(
            RestError::InvalidRequest("Invalid country_code parameter".to_owned()),
            parse_country_codes(Some(" , ,".to_owned())).unwrap_err()
        );
    }
}

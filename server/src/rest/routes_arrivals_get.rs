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

//! API to list the airports reachable from a departure airport.

use crate::driver::Driver;
use crate::rest::require;
use airmap_core::rest::{EmptyBody, QueryParams, RestError};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

/// Query parameters for this API.
#[derive(Deserialize)]
pub(crate) struct ArrivalsQuery {
    /// IATA code of the departure airport.
    from: Option<String>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    QueryParams(query): QueryParams<ArrivalsQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let from = require(query.from, "Departure airport IATA code is required")?;
    let arrivals = driver.get_arrivals(&from).await?;
    Ok(Json(arrivals))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use airmap_core::rest::testutils::OneShotBuilder;
    use airmap_core::test_payload_must_be_empty;
    use axum::http;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/routes/arrivals".to_owned())
    }

    #[tokio::test]
    async fn test_distinct() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_query([("from", "JFK")])
            .send_empty()
            .await
            .expect_json::<Vec<Arrival>>()
            .await;
        assert_eq!(
            vec![Arrival { arrival: "LAX".to_owned() }, Arrival { arrival: "LHR".to_owned() }],
            response
        );
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .with_query([("from", "NWH")])
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("No arrivals found for the given departure airport")
            .await;
    }

    #[tokio::test]
    async fn test_missing_from() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Departure airport IATA code is required")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route(), [("from", "JFK")]);
}

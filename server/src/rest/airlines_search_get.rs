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

//! API to find airlines by their ICAO or IATA codes.

use crate::driver::Driver;
use crate::model::CodeLookup;
use airmap_core::rest::{EmptyBody, QueryParams, RestError};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

/// Query parameters for this API.
#[derive(Deserialize)]
pub(crate) struct SearchQuery {
    /// ICAO code of the airline.
    icao: Option<String>,

    /// IATA code of the airline.
    iata: Option<String>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    QueryParams(query): QueryParams<SearchQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let lookup = CodeLookup::new(query.icao, query.iata).ok_or_else(|| {
        RestError::InvalidRequest("At least one of ICAO or IATA code must be provided".to_owned())
    })?;
    let airlines = driver.search_airlines(&lookup).await?;
    Ok(Json(airlines))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use airmap_core::rest::testutils::OneShotBuilder;
    use airmap_core::test_payload_must_be_empty;
    use axum::http;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/airlines/search".to_owned())
    }

    #[tokio::test]
    async fn test_by_icao() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_query([("icao", "BAW")])
            .send_empty()
            .await
            .expect_json::<Vec<Airline>>()
            .await;
        assert_eq!(1, response.len());
        assert_eq!("British Airways", response[0].name);
        assert_eq!(Some("SPEEDBIRD"), response[0].callsign.as_deref());
    }

    #[tokio::test]
    async fn test_by_both_codes_returns_union() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_query([("icao", "DAL"), ("iata", "AA")])
            .send_empty()
            .await
            .expect_json::<Vec<Airline>>()
            .await;
        let names = response.into_iter().map(|a| a.name).collect::<Vec<String>>();
        assert_eq!(vec!["American Airlines", "Delta Air Lines"], names);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .with_query([("iata", "IB")])
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("No airline found for the given ICAO/IATA code")
            .await;
    }

    #[tokio::test]
    async fn test_missing_codes() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .with_query([("iata", "")])
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("At least one of ICAO or IATA code must be provided")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route(), [("iata", "AA")]);
}

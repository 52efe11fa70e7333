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

//! API to list the airports of a set of countries.

use crate::driver::Driver;
use crate::rest::parse_country_codes;
use airmap_core::rest::{EmptyBody, QueryParams, RestError};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

/// Query parameters for this API.
#[derive(Deserialize)]
pub(crate) struct AirportsQuery {
    /// Comma-separated list of country codes.
    country_code: Option<String>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    QueryParams(query): QueryParams<AirportsQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let country_codes = parse_country_codes(query.country_code)?;
    let airports = driver.get_airports_in_countries(&country_codes).await?;
    Ok(Json(airports))
}

#[cfg(test)]
mod tests {
    use crate::db;
    use crate::model::*;
    use crate::rest::testutils::*;
    use airmap_core::rest::testutils::OneShotBuilder;
    use airmap_core::test_payload_must_be_empty;
    use axum::http;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/airports".to_owned())
    }

    #[tokio::test]
    async fn test_union_without_duplicates() {
        let context = TestContext::setup().await;
        db::create_airport(
            &mut context.ex().await,
            &Airport::new("Pearson", "Canada").with_iata("YYZ").with_icao("CYYZ"),
        )
        .await
        .unwrap();

        let response = OneShotBuilder::new(context.app(), route())
            .with_query([("country_code", "CA,GB,CA")])
            .send_empty()
            .await
            .expect_json::<Vec<Airport>>()
            .await;
        let iatas = response.into_iter().map(|a| a.iata.unwrap()).collect::<Vec<String>>();
        assert_eq!(vec!["LHR", "YYZ"], iatas);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .with_query([("country_code", "XX")])
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("No airports found for the given country codes")
            .await;
    }

    #[tokio::test]
    async fn test_missing_country_code() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("country_code parameter is required")
            .await;
    }

    test_payload_must_be_empty!(
        TestContext::setup().await.into_app(),
        route(),
        [("country_code", "US")]
    );
}

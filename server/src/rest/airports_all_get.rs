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

//! API to list all airports.

use crate::driver::Driver;
use airmap_core::rest::{EmptyBody, RestError};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let airports = driver.get_all_airports().await?;
    Ok(Json(airports))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use airmap_core::rest::testutils::OneShotBuilder;
    use airmap_core::test_payload_must_be_empty;
    use axum::http;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/airports/all".to_owned())
    }

    #[tokio::test]
    async fn test_all_without_forecast() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_json::<Vec<serde_json::Value>>()
            .await;
        assert_eq!(5, response.len());
        for airport in response {
            assert!(airport.get("high").is_none());
        }
    }

    #[tokio::test]
    async fn test_empty() {
        let context = TestContext::setup_empty().await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_json::<Vec<Airport>>()
            .await;
        assert!(response.is_empty());
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route());
}

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

//! Flight data query service: airports, airlines, countries and the routes between them.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use airmap_core::db::Db;
use airmap_geo::Forecaster;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Method};
use log::{info, warn};
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod db;
pub mod driver;
use driver::{Driver, DriverOptions};
pub(crate) mod model;
mod rest;
use rest::app;

/// Waits until the process is asked to terminate.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => {
            warn!("Cannot listen for shutdown requests: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Instantiates all resources to serve the application on `bind_addr`.
///
/// Browser clients served from `allowed_origin`, if any, are allowed to issue cross-origin
/// requests.  The database is closed once the server stops.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    db: Arc<dyn Db + Send + Sync>,
    forecaster: Arc<dyn Forecaster + Send + Sync>,
    opts: DriverOptions,
    allowed_origin: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let driver = Driver::new(db.clone(), forecaster, opts);
    let mut app = app(driver);
    if let Some(origin) = allowed_origin {
        let cors = CorsLayer::new()
            .allow_origin(HeaderValue::from_str(&origin)?)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([CONTENT_TYPE]);
        app = app.layer(cors);
    }

    let result = match tokio::net::TcpListener::bind(bind_addr.into()).await {
        Ok(listener) => {
            info!("Listening on {:?}", listener.local_addr());
            axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await
        }
        Err(e) => Err(e),
    };
    db.close().await;
    result?;
    Ok(())
}

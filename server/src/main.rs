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

//! Entry point to the flight data query service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use airmap_core::db::postgres::{PostgresDb, PostgresOptions};
use airmap_core::db::Db;
use airmap_core::env::get_optional_var;
use airmap_geo::{OpenMeteoForecaster, OpenMeteoOptions};
use airmap_server::db::init_schema;
use airmap_server::driver::DriverOptions;
use airmap_server::serve;
use std::error::Error;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// Port to listen on when `AIRMAP_PORT` is not set.
const DEFAULT_PORT: u16 = 8001;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let port = get_optional_var::<u16>("AIRMAP", "PORT")?.unwrap_or(DEFAULT_PORT);
    let addr = (Ipv4Addr::LOCALHOST, port);
    let allowed_origin = get_optional_var::<String>("AIRMAP", "ALLOWED_ORIGIN")?;
    let driver_opts = DriverOptions::from_env("AIRMAP")?;

    let forecaster = Arc::from(OpenMeteoForecaster::new(OpenMeteoOptions::from_env(
        "AIRMAP_WEATHER",
    )?)?);

    let db_opts = PostgresOptions::from_env("PGSQL_PROD")?;
    let db = Arc::from(PostgresDb::connect(db_opts)?);
    let schema_result = match db.ex().await {
        Ok(mut ex) => init_schema(&mut ex).await,
        Err(e) => Err(e),
    };
    if let Err(e) = schema_result {
        db.close().await;
        return Err(e.into());
    }

    serve(addr, db, forecaster, driver_opts, allowed_origin).await
}

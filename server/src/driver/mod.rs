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

//! Business logic for the service.

use airmap_core::db::Db;
use airmap_core::env::get_optional_var;
use airmap_geo::Forecaster;
use std::sync::Arc;

mod airlines;
mod airports;
mod countries;
mod routes;
#[cfg(test)]
pub(crate) mod testutils;

/// Configuration options for the business logic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DriverOptions {
    /// Whether airport lookups should succeed without a forecast when the forecast service fails.
    pub weather_fail_open: bool,
}

impl DriverOptions {
    /// Initializes a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_WEATHER_FAIL_OPEN`.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        Ok(Self {
            weather_fail_open: get_optional_var::<bool>(prefix, "WEATHER_FAIL_OPEN")?
                .unwrap_or(false),
        })
    }
}

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they start and commit a
/// transaction, so it's incorrect for the caller to use two separate calls.  For this reason,
/// these operations consume the driver in an attempt to minimize the possibility of executing
/// two operations.
#[derive(Clone)]
pub(crate) struct Driver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,

    /// The service that provides weather forecasts for airports.
    forecaster: Arc<dyn Forecaster + Send + Sync>,

    /// Configuration options.
    opts: DriverOptions,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(
        db: Arc<dyn Db + Send + Sync>,
        forecaster: Arc<dyn Forecaster + Send + Sync>,
        opts: DriverOptions,
    ) -> Self {
        Self { db, forecaster, opts }
    }
}

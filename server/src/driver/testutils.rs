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

//! Test utilities for the business layer.

use crate::db;
use crate::db::testutils::{seed, JFK_COORDS};
use crate::driver::{Driver, DriverOptions};
use airmap_core::db::{Db, Executor};
use airmap_geo::MockForecaster;
use std::sync::Arc;

/// Forecast returned for JFK.  No other airport has a forecast.
pub(crate) const JFK_FORECAST: (f64, f64) = (22.5, 14.0);

pub(crate) struct TestContext {
    db: Arc<dyn Db + Send + Sync>,
    driver: Driver,
}

impl TestContext {
    /// Initializes a driver backed by an empty database.
    pub(crate) async fn setup_empty_with_opts(opts: DriverOptions) -> Self {
        let db: Arc<dyn Db + Send + Sync> =
            Arc::new(airmap_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let forecaster = Arc::new(MockForecaster::new(&[(
            JFK_COORDS.0,
            JFK_COORDS.1,
            JFK_FORECAST.0,
            JFK_FORECAST.1,
        )]));
        let driver = Driver::new(db.clone(), forecaster, opts);
        Self { db, driver }
    }

    /// Initializes a driver backed by an empty database with default options.
    pub(crate) async fn setup_empty() -> Self {
        Self::setup_empty_with_opts(DriverOptions::default()).await
    }

    /// Initializes a driver backed by a database with the standard test data set.
    pub(crate) async fn setup_with_opts(opts: DriverOptions) -> Self {
        let context = Self::setup_empty_with_opts(opts).await;
        seed(&mut context.ex().await).await;
        context
    }

    /// Initializes a driver backed by a database with the standard test data set and default
    /// options.
    pub(crate) async fn setup() -> Self {
        Self::setup_with_opts(DriverOptions::default()).await
    }

    /// Gets a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }
}

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

//! Test utilities for the REST API.

use crate::driver::testutils::TestContext as DriverTestContext;
use crate::driver::DriverOptions;
use crate::rest::app;
use airmap_core::db::Executor;
use axum::Router;

pub(crate) struct TestContext {
    context: DriverTestContext,
    app: Router,
}

impl TestContext {
    /// Wraps a driver-level context with the app router.
    fn from_driver_context(context: DriverTestContext) -> Self {
        let app = app(context.driver());
        Self { context, app }
    }

    /// Initializes the app with the standard test data set.
    pub(crate) async fn setup() -> Self {
        Self::from_driver_context(DriverTestContext::setup().await)
    }

    /// Initializes the app with the standard test data set and custom options.
    pub(crate) async fn setup_with_opts(opts: DriverOptions) -> Self {
        Self::from_driver_context(DriverTestContext::setup_with_opts(opts).await)
    }

    /// Initializes the app with an empty database.
    pub(crate) async fn setup_empty() -> Self {
        Self::from_driver_context(DriverTestContext::setup_empty().await)
    }

    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Gets a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.context.ex().await
    }
}

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

//! Geographic primitives and lookups of location-dependent information.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io;

#[cfg(any(test, feature = "testutils"))]
mod mock;
#[cfg(any(test, feature = "testutils"))]
pub use mock::MockForecaster;
mod openmeteo;
pub use openmeteo::{OpenMeteoForecaster, OpenMeteoOptions};

/// Result type for this module.
pub type GeoResult<T> = io::Result<T>;

/// Radius of the Earth used in great-circle computations, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6378.0;

/// A point on the Earth's surface expressed in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    /// Latitude in the `[-90, 90]` range.
    latitude: f64,

    /// Longitude in the `[-180, 180]` range.
    longitude: f64,
}

impl Coordinates {
    /// Creates a new pair of coordinates after validating that they are within range.
    pub fn new(latitude: f64, longitude: f64) -> GeoResult<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Latitude {} is out of range", latitude),
            ));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Longitude {} is out of range", longitude),
            ));
        }
        Ok(Self { latitude, longitude })
    }

    /// Returns the latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Computes the great-circle distance between `self` and `other` using the haversine formula.
    ///
    /// The result is in kilometers and is not rounded.
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

/// Today's forecast for a location.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct DailyForecast {
    /// Maximum temperature in degrees Celsius.
    pub high: f64,

    /// Minimum temperature in degrees Celsius.
    pub low: f64,
}

/// Interface to obtain weather forecasts.
#[async_trait]
pub trait Forecaster {
    /// Obtains today's forecast at the location `at`.
    async fn today(&self, at: &Coordinates) -> GeoResult<DailyForecast>;
}

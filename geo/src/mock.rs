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

//! Forecaster backed by an in-memory map for testing purposes.

use crate::{Coordinates, DailyForecast, Forecaster, GeoResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;

/// Forecaster that uses an in-memory map of coordinates to forecasts.
///
/// Queries for coordinates not in the map fail, which lets tests exercise the handling of
/// unavailable forecasts.
#[derive(Clone)]
pub struct MockForecaster {
    /// Mapping of `(latitude, longitude)` bit patterns to forecasts.
    data: Arc<HashMap<(u64, u64), DailyForecast>>,
}

impl MockForecaster {
    /// Creates a new mock forecaster based on a list of `(latitude, longitude, high, low)` tuples.
    pub fn new(raw_data: &[(f64, f64, f64, f64)]) -> Self {
        let mut data = HashMap::with_capacity(raw_data.len());
        for (latitude, longitude, high, low) in raw_data {
            data.insert(
                (latitude.to_bits(), longitude.to_bits()),
                DailyForecast { high: *high, low: *low },
            );
        }
        Self { data: Arc::from(data) }
    }
}

#[async_trait]
impl Forecaster for MockForecaster {
    async fn today(&self, at: &Coordinates) -> GeoResult<DailyForecast> {
        match self.data.get(&(at.latitude().to_bits(), at.longitude().to_bits())) {
            Some(forecast) => Ok(*forecast),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("No forecast for {},{}", at.latitude(), at.longitude()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_and_unknown() {
        let forecaster = MockForecaster::new(&[(1.5, -2.5, 30.0, 20.0)]);
        assert_eq!(
            DailyForecast { high: 30.0, low: 20.0 },
            forecaster.today(&Coordinates::new(1.5, -2.5).unwrap()).await.unwrap()
        );
        let err = forecaster.today(&Coordinates::new(1.5, 2.5).unwrap()).await.unwrap_err();
        assert_eq!(io::ErrorKind::NotFound, err.kind());
    }
}

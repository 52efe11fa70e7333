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

//! Operations on airports.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use airmap_core::db::Executor;
use airmap_core::driver::{DriverError, DriverResult};
use airmap_geo::Coordinates;
use log::warn;

/// Finds the airports identified by `lookup`.
///
/// When `lookup` carries both codes, they must identify the same airports.
async fn find_unambiguous(ex: &mut Executor, lookup: &CodeLookup) -> DriverResult<Vec<Airport>> {
    match lookup.split() {
        Some((by_icao, by_iata)) => {
            let icao_matches = db::find_airports(ex, &by_icao).await?;
            let iata_matches = db::find_airports(ex, &by_iata).await?;
            if icao_matches != iata_matches {
                return Err(DriverError::InvalidInput(
                    "ICAO and IATA codes identify different airports".to_owned(),
                ));
            }
            Ok(icao_matches)
        }
        None => Ok(db::find_airports(ex, lookup).await?),
    }
}

/// Extracts the coordinates of `airport`.  Returns `None` if the airport has no coordinates.
pub(super) fn coordinates_of(airport: &Airport) -> DriverResult<Option<Coordinates>> {
    match (airport.latitude, airport.longitude) {
        (Some(latitude), Some(longitude)) => match Coordinates::new(latitude, longitude) {
            Ok(coordinates) => Ok(Some(coordinates)),
            Err(e) => Err(DriverError::BackendError(format!(
                "Invalid coordinates stored for airport {}: {}",
                airport.name, e
            ))),
        },
        _ => Ok(None),
    }
}

impl Driver {
    /// Gets the airports in any of the countries in `country_codes`.
    pub(crate) async fn get_airports_in_countries(
        self,
        country_codes: &[String],
    ) -> DriverResult<Vec<Airport>> {
        let airports =
            db::get_airports_in_countries(&mut self.db.ex().await?, country_codes).await?;
        if airports.is_empty() {
            return Err(DriverError::NotFound(
                "No airports found for the given country codes".to_owned(),
            ));
        }
        Ok(airports)
    }

    /// Gets the airport identified by `lookup` along with today's forecast at its location.
    ///
    /// If the forecast cannot be obtained, including when the airport has no stored coordinates,
    /// the lookup fails unless the driver is configured to fail open, in which case the airport is
    /// returned without a forecast.
    pub(crate) async fn search_airport(
        self,
        lookup: &CodeLookup,
    ) -> DriverResult<AirportWithForecast> {
        let airport = {
            let mut ex = self.db.ex().await?;
            let mut airports = find_unambiguous(&mut ex, lookup).await?;
            if airports.is_empty() {
                return Err(DriverError::NotFound(
                    "No airport found for the given ICAO/IATA code".to_owned(),
                ));
            }
            airports.swap_remove(0)
        };

        let coordinates = match coordinates_of(&airport)? {
            Some(coordinates) => coordinates,
            None if self.opts.weather_fail_open => {
                warn!("Airport {} has no coordinates so it has no forecast", airport.name);
                return Ok(AirportWithForecast { airport, high: None, low: None });
            }
            None => {
                return Err(DriverError::BackendError(format!(
                    "Forecast lookup for airport {} failed: no coordinates stored",
                    airport.name
                )))
            }
        };

        match self.forecaster.today(&coordinates).await {
            Ok(forecast) => Ok(AirportWithForecast {
                airport,
                high: Some(forecast.high),
                low: Some(forecast.low),
            }),
            Err(e) if self.opts.weather_fail_open => {
                warn!("Forecast lookup for airport {} failed: {}", airport.name, e);
                Ok(AirportWithForecast { airport, high: None, low: None })
            }
            Err(e) => Err(DriverError::BackendError(format!(
                "Forecast lookup for airport {} failed: {}",
                airport.name, e
            ))),
        }
    }

    /// Creates a new `airport` and returns it as stored.
    pub(crate) async fn create_airport(self, airport: Airport) -> DriverResult<Airport> {
        let airport = db::create_airport(&mut self.db.ex().await?, &airport).await?;
        Ok(airport)
    }

    /// Deletes the airport identified by `lookup`.
    pub(crate) async fn delete_airport(self, lookup: &CodeLookup) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::set_serializable(tx.ex()).await?;
        find_unambiguous(tx.ex(), lookup).await?;
        let deleted = db::delete_airports(tx.ex(), lookup).await?;
        if deleted == 0 {
            return Err(DriverError::NotFound("No airport found to delete".to_owned()));
        }
        tx.commit().await?;
        Ok(())
    }

    /// Gets all airports.
    pub(crate) async fn get_all_airports(self) -> DriverResult<Vec<Airport>> {
        let airports = db::get_all_airports(&mut self.db.ex().await?).await?;
        Ok(airports)
    }
}

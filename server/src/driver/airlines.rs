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

//! Operations on airlines.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use airmap_core::db::Executor;
use airmap_core::driver::{DriverError, DriverResult};

/// Finds the airlines identified by `lookup`.
///
/// When `lookup` carries both codes, they must identify the same airlines.
async fn find_unambiguous(ex: &mut Executor, lookup: &CodeLookup) -> DriverResult<Vec<Airline>> {
    match lookup.split() {
        Some((by_icao, by_iata)) => {
            let icao_matches = db::find_airlines(ex, &by_icao).await?;
            let iata_matches = db::find_airlines(ex, &by_iata).await?;
            if icao_matches != iata_matches {
                return Err(DriverError::InvalidInput(
                    "ICAO and IATA codes identify different airlines".to_owned(),
                ));
            }
            Ok(icao_matches)
        }
        None => Ok(db::find_airlines(ex, lookup).await?),
    }
}

impl Driver {
    /// Gets the airlines that belong to any of the countries in `country_codes`.
    pub(crate) async fn get_airlines_in_countries(
        self,
        country_codes: &[String],
    ) -> DriverResult<Vec<Airline>> {
        let airlines =
            db::get_airlines_in_countries(&mut self.db.ex().await?, country_codes).await?;
        if airlines.is_empty() {
            return Err(DriverError::NotFound(
                "No airlines found for the given country codes".to_owned(),
            ));
        }
        Ok(airlines)
    }

    /// Gets the airlines that match any of the codes in `lookup`.
    pub(crate) async fn search_airlines(self, lookup: &CodeLookup) -> DriverResult<Vec<Airline>> {
        let airlines = db::find_airlines(&mut self.db.ex().await?, lookup).await?;
        if airlines.is_empty() {
            return Err(DriverError::NotFound(
                "No airline found for the given ICAO/IATA code".to_owned(),
            ));
        }
        Ok(airlines)
    }

    /// Creates a new `airline` and returns it as stored.
    pub(crate) async fn create_airline(self, airline: Airline) -> DriverResult<Airline> {
        let airline = db::create_airline(&mut self.db.ex().await?, &airline).await?;
        Ok(airline)
    }

    /// Deletes the airline identified by `lookup`.
    pub(crate) async fn delete_airline(self, lookup: &CodeLookup) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::set_serializable(tx.ex()).await?;
        find_unambiguous(tx.ex(), lookup).await?;
        let deleted = db::delete_airlines(tx.ex(), lookup).await?;
        if deleted == 0 {
            return Err(DriverError::NotFound("No airline found to delete".to_owned()));
        }
        tx.commit().await?;
        Ok(())
    }

    /// Gets the known airlines that fly to or from the airport `iata`.
    pub(crate) async fn get_airlines_at_airport(
        self,
        iata: &str,
    ) -> DriverResult<Vec<AirlineSummary>> {
        let airlines = db::get_airlines_at_airport(&mut self.db.ex().await?, iata).await?;
        if airlines.is_empty() {
            return Err(DriverError::NotFound("No airlines found for this airport".to_owned()));
        }
        Ok(airlines)
    }

    /// Gets the known airlines that fly from `departure` to `arrival`.
    pub(crate) async fn get_airlines_between(
        self,
        departure: &str,
        arrival: &str,
    ) -> DriverResult<Vec<AirlineSummary>> {
        let airlines =
            db::get_airlines_between(&mut self.db.ex().await?, departure, arrival).await?;
        if airlines.is_empty() {
            return Err(DriverError::NotFound(
                "No airlines found between these airports".to_owned(),
            ));
        }
        Ok(airlines)
    }
}

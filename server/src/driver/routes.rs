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

//! Operations on routes.

use crate::db;
use crate::driver::airports::coordinates_of;
use crate::driver::Driver;
use crate::model::*;
use airmap_core::db::{DbError, Executor};
use airmap_core::driver::{DriverError, DriverResult};

/// Verifies that the `airline` and both the `departure` and `arrival` airports exist.
async fn check_references(
    ex: &mut Executor,
    airline: &AirlineCode,
    departure: &AirportCode,
    arrival: &AirportCode,
) -> DriverResult<()> {
    if !db::airline_exists(ex, airline.as_str()).await? {
        return Err(DriverError::InvalidInput(
            "Airline code does not exist in the airlines table".to_owned(),
        ));
    }

    if !db::airport_exists(ex, departure.as_str()).await?
        || !db::airport_exists(ex, arrival.as_str()).await?
    {
        return Err(DriverError::InvalidInput(
            "One or both airport codes are invalid or not found in airports table".to_owned(),
        ));
    }

    Ok(())
}

impl Driver {
    /// Computes the distance between the airports `from` and `to` and gets the services that
    /// connect them.
    ///
    /// The returned distance is not rounded.
    pub(crate) async fn get_route_summary(
        self,
        from: &str,
        to: &str,
    ) -> DriverResult<RouteSummary> {
        let mut ex = self.db.ex().await?;

        let departure = db::find_airports(&mut ex, &CodeLookup::by_iata(from)).await?;
        let arrival = db::find_airports(&mut ex, &CodeLookup::by_iata(to)).await?;
        let (departure, arrival) = match (departure.first(), arrival.first()) {
            (Some(departure), Some(arrival)) => (departure, arrival),
            _ => {
                return Err(DriverError::NotFound(
                    "Could not find both airports with given IATA codes".to_owned(),
                ))
            }
        };

        let (departure, arrival) = match (coordinates_of(departure)?, coordinates_of(arrival)?) {
            (Some(departure), Some(arrival)) => (departure, arrival),
            _ => {
                return Err(DriverError::NotFound(
                    "Coordinates are missing for one or both airports".to_owned(),
                ))
            }
        };

        let airlines_and_aircrafts = db::get_route_services(&mut ex, from, to).await?;
        Ok(RouteSummary { distance_km: departure.distance_km(&arrival), airlines_and_aircrafts })
    }

    /// Gets the airports reachable from `departure`.
    pub(crate) async fn get_arrivals(self, departure: &str) -> DriverResult<Vec<Arrival>> {
        let arrivals = db::get_arrivals(&mut self.db.ex().await?, departure).await?;
        if arrivals.is_empty() {
            return Err(DriverError::NotFound(
                "No arrivals found for the given departure airport".to_owned(),
            ));
        }
        Ok(arrivals)
    }

    /// Gets the airports from which `arrival` is reachable.
    pub(crate) async fn get_departures(self, arrival: &str) -> DriverResult<Vec<Departure>> {
        let departures = db::get_departures(&mut self.db.ex().await?, arrival).await?;
        if departures.is_empty() {
            return Err(DriverError::NotFound(
                "No departures found for the given arrival airport".to_owned(),
            ));
        }
        Ok(departures)
    }

    /// Gets the legs of all routes operated by `airline`.
    pub(crate) async fn get_routes_by_airline(self, airline: &str) -> DriverResult<Vec<Leg>> {
        let routes = db::get_routes_by_airline(&mut self.db.ex().await?, airline).await?;
        if routes.is_empty() {
            return Err(DriverError::NotFound("No routes found for this airline".to_owned()));
        }
        Ok(routes.into_iter().map(Leg::from).collect())
    }

    /// Gets the legs of the routes operated by `airline` that use the `aircraft` type.
    pub(crate) async fn search_routes(
        self,
        airline: &str,
        aircraft: &AircraftCode,
    ) -> DriverResult<Vec<Leg>> {
        let routes = db::get_routes_by_airline(&mut self.db.ex().await?, airline).await?;
        let legs = routes
            .into_iter()
            .filter(|route| route.planes.contains(aircraft))
            .map(Leg::from)
            .collect::<Vec<Leg>>();
        if legs.is_empty() {
            return Err(DriverError::NotFound(
                "No routes found for given airline and aircraft type".to_owned(),
            ));
        }
        Ok(legs)
    }

    /// Creates a new route operated by `airline` from `departure` to `arrival` with the `aircraft`
    /// type.
    ///
    /// All referenced entities must exist and there must not be a route for the same airline and
    /// airports yet.  The checks and the insertion happen atomically.
    pub(crate) async fn create_route(
        self,
        airline: &AirlineCode,
        departure: &AirportCode,
        arrival: &AirportCode,
        aircraft: AircraftCode,
    ) -> DriverResult<Route> {
        let mut tx = self.db.begin().await?;
        db::set_serializable(tx.ex()).await?;

        check_references(tx.ex(), airline, departure, arrival).await?;

        if !db::aircraft_exists(tx.ex(), aircraft.as_str()).await? {
            return Err(DriverError::InvalidInput(
                "Aircraft code does not exist in the planes table".to_owned(),
            ));
        }

        let route = Route {
            airline: airline.to_string(),
            departure: departure.to_string(),
            arrival: arrival.to_string(),
            planes: AircraftTypes::from(aircraft),
        };
        let route = match db::create_route(tx.ex(), &route).await {
            Ok(route) => route,
            Err(DbError::AlreadyExists) => {
                return Err(DriverError::AlreadyExists("Route already exists".to_owned()))
            }
            Err(e) => return Err(e.into()),
        };
        tx.commit().await?;
        Ok(route)
    }

    /// Adds the `aircraft` type to the route operated by `airline` from `departure` to `arrival`.
    ///
    /// Returns the updated route, or `None` if the route already used the aircraft type.
    pub(crate) async fn append_aircraft(
        self,
        airline: &AirlineCode,
        departure: &AirportCode,
        arrival: &AirportCode,
        aircraft: AircraftCode,
    ) -> DriverResult<Option<Route>> {
        let mut tx = self.db.begin().await?;
        db::set_serializable(tx.ex()).await?;

        let mut route = match db::get_route(
            tx.ex(),
            airline.as_str(),
            departure.as_str(),
            arrival.as_str(),
        )
        .await?
        {
            Some(route) => route,
            None => {
                return Err(DriverError::NotFound("No matching route found to update".to_owned()))
            }
        };

        if route.planes.contains(&aircraft) {
            return Ok(None);
        }

        if !db::aircraft_exists(tx.ex(), aircraft.as_str()).await? {
            return Err(DriverError::InvalidInput(
                "Aircraft code does not exist in the planes table".to_owned(),
            ));
        }

        route.planes.insert(aircraft);
        let route = db::update_route_planes(tx.ex(), &route).await?;
        tx.commit().await?;
        Ok(Some(route))
    }

    /// Deletes the route operated by `airline` from `departure` to `arrival` and returns it.
    ///
    /// All referenced entities must exist.
    pub(crate) async fn delete_route(
        self,
        airline: &AirlineCode,
        departure: &AirportCode,
        arrival: &AirportCode,
    ) -> DriverResult<Route> {
        let mut tx = self.db.begin().await?;
        db::set_serializable(tx.ex()).await?;

        check_references(tx.ex(), airline, departure, arrival).await?;

        let deleted =
            db::delete_route(tx.ex(), airline.as_str(), departure.as_str(), arrival.as_str())
                .await?;
        let route = match deleted {
            Some(route) => route,
            None => {
                return Err(DriverError::NotFound("No matching route found to delete".to_owned()))
            }
        };
        tx.commit().await?;
        Ok(route)
    }
}

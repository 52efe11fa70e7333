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

//! Test utilities for the database layer.

use crate::db;
use crate::model::*;
use airmap_core::db::Executor;

/// Coordinates of JFK.
pub(crate) const JFK_COORDS: (f64, f64) = (40.6413, -73.7781);

/// Coordinates of LAX.
pub(crate) const LAX_COORDS: (f64, f64) = (33.9416, -118.4085);

/// Coordinates of YYZ.
pub(crate) const YYZ_COORDS: (f64, f64) = (43.6777, -79.6248);

/// Coordinates of LHR.
pub(crate) const LHR_COORDS: (f64, f64) = (51.47, -0.4543);

/// Creates a route from its raw parts.
pub(crate) fn route(airline: &str, departure: &str, arrival: &str, planes: &str) -> Route {
    Route {
        airline: airline.to_owned(),
        departure: departure.to_owned(),
        arrival: arrival.to_owned(),
        planes: AircraftTypes::from(planes),
    }
}

/// Populates the database with a small but representative data set.
///
/// France has no airlines, `NWH` has no coordinates and the `ZZ` airline is unknown.
pub(crate) async fn seed(ex: &mut Executor) {
    for (code, name) in [
        ("US", "United States"),
        ("CA", "Canada"),
        ("GB", "United Kingdom"),
        ("FR", "France"),
    ] {
        db::create_country(ex, &Country { code: code.to_owned(), name: name.to_owned() })
            .await
            .unwrap();
    }

    for airline in [
        Airline::new("American Airlines", "United States")
            .with_iata("AA")
            .with_icao("AAL")
            .with_callsign("AMERICAN"),
        Airline::new("Delta Air Lines", "United States")
            .with_iata("DL")
            .with_icao("DAL")
            .with_callsign("DELTA"),
        Airline::new("Air Canada", "Canada").with_iata("AC").with_icao("ACA"),
        Airline::new("British Airways", "United Kingdom")
            .with_iata("BA")
            .with_icao("BAW")
            .with_callsign("SPEEDBIRD"),
    ] {
        db::create_airline(ex, &airline).await.unwrap();
    }

    for airport in [
        Airport::new("John F Kennedy International Airport", "United States")
            .with_city("New York")
            .with_iata("JFK")
            .with_icao("KJFK")
            .with_coordinates(JFK_COORDS.0, JFK_COORDS.1),
        Airport::new("Los Angeles International Airport", "United States")
            .with_city("Los Angeles")
            .with_iata("LAX")
            .with_icao("KLAX")
            .with_coordinates(LAX_COORDS.0, LAX_COORDS.1),
        Airport::new("Toronto Pearson International Airport", "Canada")
            .with_city("Toronto")
            .with_iata("YYZ")
            .with_icao("CYYZ")
            .with_coordinates(YYZ_COORDS.0, YYZ_COORDS.1),
        Airport::new("Heathrow Airport", "United Kingdom")
            .with_city("London")
            .with_iata("LHR")
            .with_icao("EGLL")
            .with_coordinates(LHR_COORDS.0, LHR_COORDS.1),
        Airport::new("Nowhere Field", "France").with_iata("NWH"),
    ] {
        db::create_airport(ex, &airport).await.unwrap();
    }

    for (code, name) in [
        ("319", "Airbus A319"),
        ("320", "Airbus A320"),
        ("738", "Boeing 737-800"),
        ("77W", "Boeing 777-300ER"),
    ] {
        db::create_aircraft(ex, code, name).await.unwrap();
    }

    for new_route in [
        route("AA", "JFK", "LAX", "320 738"),
        route("DL", "JFK", "LAX", "738"),
        route("AA", "LAX", "JFK", "738"),
        route("AC", "YYZ", "LAX", "320"),
        route("BA", "LHR", "JFK", "77W"),
        route("ZZ", "JFK", "LHR", "77W"),
    ] {
        db::create_route(ex, &new_route).await.unwrap();
    }
}

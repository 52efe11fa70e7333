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

//! Entities stored in the database and the projections returned by queries.

use crate::model::AircraftTypes;
#[cfg(test)]
use serde::Deserialize;
use serde::Serialize;

/// A country known to the service.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Country {
    /// Short identifier of the country, like an ISO alpha-2 code.
    pub(crate) code: String,

    /// Name of the country.  Airlines and airports refer to countries by this name.
    pub(crate) name: String,
}

/// An airline.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Airline {
    /// Name of the airline.
    pub(crate) name: String,

    /// 2-character IATA code, if known.
    pub(crate) iata: Option<String>,

    /// ICAO code, if known.
    pub(crate) icao: Option<String>,

    /// Name of the country the airline belongs to.
    pub(crate) country: String,

    /// Radio callsign, if known.
    pub(crate) callsign: Option<String>,
}

/// An airport.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Airport {
    /// Name of the airport.
    pub(crate) name: String,

    /// City served by the airport, if known.
    pub(crate) city: Option<String>,

    /// Name of the country the airport is in.
    pub(crate) country: String,

    /// 3-character IATA code, if known.
    pub(crate) iata: Option<String>,

    /// ICAO code, if known.
    pub(crate) icao: Option<String>,

    /// Latitude in decimal degrees, if known.
    pub(crate) latitude: Option<f64>,

    /// Longitude in decimal degrees, if known.
    pub(crate) longitude: Option<f64>,
}

/// An airport along with today's forecast at its location.
#[derive(Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct AirportWithForecast {
    /// The airport details.
    #[serde(flatten)]
    pub(crate) airport: Airport,

    /// Today's maximum temperature in degrees Celsius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) high: Option<f64>,

    /// Today's minimum temperature in degrees Celsius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) low: Option<f64>,
}

/// A service operated by an airline between two airports.
///
/// There is at most one route per airline, departure and arrival triple.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Route {
    /// IATA code of the airline operating the route.
    pub(crate) airline: String,

    /// IATA code of the departure airport.
    pub(crate) departure: String,

    /// IATA code of the arrival airport.
    pub(crate) arrival: String,

    /// Aircraft types used on this route.
    #[sqlx(try_from = "String")]
    pub(crate) planes: AircraftTypes,
}

/// An airline and its aircraft on a specific route.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct RouteService {
    /// IATA code of the airline.
    pub(crate) airline: String,

    /// Aircraft types used by the airline on the route.
    pub(crate) aircraft: String,

    /// Name of the airline, if the airline is known.
    pub(crate) airline_name: Option<String>,
}

/// The distance between two airports and the services that connect them.
#[derive(Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct RouteSummary {
    /// Great-circle distance between the airports.
    pub(crate) distance_km: f64,

    /// Airlines that fly between the airports along with their aircraft.
    pub(crate) airlines_and_aircrafts: Vec<RouteService>,
}

/// Short identification of an airline.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct AirlineSummary {
    /// Name of the airline.
    pub(crate) name: String,

    /// 2-character IATA code, if known.
    pub(crate) iata: Option<String>,

    /// ICAO code, if known.
    pub(crate) icao: Option<String>,
}

/// An airport reachable from a departure airport.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Arrival {
    /// IATA code of the arrival airport.
    pub(crate) arrival: String,
}

/// An airport from which an arrival airport can be reached.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Departure {
    /// IATA code of the departure airport.
    pub(crate) departure: String,
}

/// The endpoints of a route.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Leg {
    /// IATA code of the departure airport.
    pub(crate) departure: String,

    /// IATA code of the arrival airport.
    pub(crate) arrival: String,
}

impl From<Route> for Leg {
    fn from(route: Route) -> Self {
        Self { departure: route.departure, arrival: route.arrival }
    }
}

#[cfg(test)]
impl Airline {
    /// Creates a new airline with only its mandatory fields.
    pub(crate) fn new<N: Into<String>, C: Into<String>>(name: N, country: C) -> Self {
        Self { name: name.into(), iata: None, icao: None, country: country.into(), callsign: None }
    }

    /// Sets the IATA code.
    pub(crate) fn with_iata<S: Into<String>>(mut self, iata: S) -> Self {
        self.iata = Some(iata.into());
        self
    }

    /// Sets the ICAO code.
    pub(crate) fn with_icao<S: Into<String>>(mut self, icao: S) -> Self {
        self.icao = Some(icao.into());
        self
    }

    /// Sets the callsign.
    pub(crate) fn with_callsign<S: Into<String>>(mut self, callsign: S) -> Self {
        self.callsign = Some(callsign.into());
        self
    }
}

#[cfg(test)]
impl Airport {
    /// Creates a new airport with only its mandatory fields.
    pub(crate) fn new<N: Into<String>, C: Into<String>>(name: N, country: C) -> Self {
        Self {
            name: name.into(),
            city: None,
            country: country.into(),
            iata: None,
            icao: None,
            latitude: None,
            longitude: None,
        }
    }

    /// Sets the city.
    pub(crate) fn with_city<S: Into<String>>(mut self, city: S) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Sets the IATA code.
    pub(crate) fn with_iata<S: Into<String>>(mut self, iata: S) -> Self {
        self.iata = Some(iata.into());
        self
    }

    /// Sets the ICAO code.
    pub(crate) fn with_icao<S: Into<String>>(mut self, icao: S) -> Self {
        self.icao = Some(icao.into());
        self
    }

    /// Sets the coordinates.
    pub(crate) fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_airport_with_forecast_ser() {
        let airport = Airport::new("Kennedy", "United States").with_iata("JFK");

        let with = AirportWithForecast { airport: airport.clone(), high: Some(20.5), low: Some(9.0) };
        let value = serde_json::to_value(&with).unwrap();
        assert_eq!(json!("JFK"), value["iata"]);
        assert_eq!(json!(20.5), value["high"]);
        assert_eq!(json!(9.0), value["low"]);

        let without = AirportWithForecast { airport, high: None, low: None };
        let value = serde_json::to_value(&without).unwrap();
        assert!(value.get("high").is_none());
        assert!(value.get("low").is_none());
        assert_eq!(json!(null), value["latitude"]);
    }

    #[test]
    fn test_route_ser() {
        let route = Route {
            airline: "AA".to_owned(),
            departure: "JFK".to_owned(),
            arrival: "LAX".to_owned(),
            planes: AircraftTypes::from("738 320"),
        };
        assert_eq!(
            json!({"airline": "AA", "departure": "JFK", "arrival": "LAX", "planes": "320 738"}),
            serde_json::to_value(&route).unwrap()
        );
    }
}

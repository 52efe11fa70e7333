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

//! Validated identifiers of airlines, airports and aircraft types.

use airmap_core::model::{ModelError, ModelResult};
use std::fmt;

/// Generates a newtype over a `String` that holds exactly `$length` characters.
///
/// `$message` is the error returned when the input does not have the required length.
macro_rules! fixed_length_code [
    ( $(#[$doc:meta])* $name:ident, $length:expr, $message:expr ) => {
        $(#[$doc])*
        #[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub(crate) struct $name(String);

        impl $name {
            /// Creates a new code after validating its length.
            pub(crate) fn new<S: Into<String>>(code: S) -> ModelResult<Self> {
                let code = code.into();
                if code.chars().count() != $length {
                    return Err(ModelError($message.to_owned()));
                }
                Ok(Self(code))
            }

            /// Returns the code as a string.
            pub(crate) fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    }
];

fixed_length_code!(
    /// The 2-character IATA code of an airline.
    AirlineCode,
    2,
    "A valid 2-character IATA airline code is required"
);

fixed_length_code!(
    /// The 3-character IATA code of an airport.
    AirportCode,
    3,
    "Valid 3-character IATA codes for both departure and arrival airports are required"
);

fixed_length_code!(
    /// The 3-character code of an aircraft type.
    AircraftCode,
    3,
    "A valid 3-character aircraft type code is required"
);

/// A lookup of a single entity by its alternate identifiers.
///
/// At least one of the codes is always present.  Empty codes are treated as absent.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CodeLookup {
    /// The ICAO code to match, if any.
    icao: Option<String>,

    /// The IATA code to match, if any.
    iata: Option<String>,
}

impl CodeLookup {
    /// Creates a new lookup from the optional `icao` and `iata` codes.  Returns `None` if neither
    /// code is usable.
    pub(crate) fn new(icao: Option<String>, iata: Option<String>) -> Option<Self> {
        let icao = icao.filter(|code| !code.is_empty());
        let iata = iata.filter(|code| !code.is_empty());
        if icao.is_none() && iata.is_none() {
            return None;
        }
        Some(Self { icao, iata })
    }

    /// Creates a new lookup that only matches on the IATA `code`.
    pub(crate) fn by_iata<S: Into<String>>(code: S) -> Self {
        Self { icao: None, iata: Some(code.into()) }
    }

    /// Returns the ICAO code to match, if any.
    pub(crate) fn icao(&self) -> Option<&str> {
        self.icao.as_deref()
    }

    /// Returns the IATA code to match, if any.
    pub(crate) fn iata(&self) -> Option<&str> {
        self.iata.as_deref()
    }

    /// Splits a lookup that carries both codes into two single-code lookups, `(icao, iata)`.
    /// Returns `None` if only one code is present.
    pub(crate) fn split(&self) -> Option<(CodeLookup, CodeLookup)> {
        match (&self.icao, &self.iata) {
            (Some(icao), Some(iata)) => Some((
                Self { icao: Some(icao.clone()), iata: None },
                Self { icao: None, iata: Some(iata.clone()) },
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_airline_code() {
        assert_eq!("AA", AirlineCode::new("AA").unwrap().as_str());
        for bad in ["", "A", "AAL"] {
            assert_eq!(
                ModelError("A valid 2-character IATA airline code is required".to_owned()),
                AirlineCode::new(bad).unwrap_err()
            );
        }
    }

    #[test]
    fn test_airport_code() {
        assert_eq!("JFK", AirportCode::new("JFK").unwrap().to_string());
        AirportCode::new("KJFK").unwrap_err();
        AirportCode::new("JF").unwrap_err();
    }

    #[test]
    fn test_aircraft_code_counts_characters() {
        AircraftCode::new("73H").unwrap();
        AircraftCode::new("ñ7ñ").unwrap();
        assert_eq!(
            ModelError("A valid 3-character aircraft type code is required".to_owned()),
            AircraftCode::new("7377").unwrap_err()
        );
    }

    #[test]
    fn test_code_lookup_new() {
        assert_eq!(None, CodeLookup::new(None, None));
        assert_eq!(None, CodeLookup::new(Some("".to_owned()), Some("".to_owned())));

        let lookup = CodeLookup::new(Some("KJFK".to_owned()), Some("".to_owned())).unwrap();
        assert_eq!(Some("KJFK"), lookup.icao());
        assert_eq!(None, lookup.iata());
        assert_eq!(None, lookup.split());
    }

    #[test]
    fn test_code_lookup_split() {
        let lookup = CodeLookup::new(Some("KJFK".to_owned()), Some("JFK".to_owned())).unwrap();
        let (icao, iata) = lookup.split().unwrap();
        assert_eq!(CodeLookup::new(Some("KJFK".to_owned()), None).unwrap(), icao);
        assert_eq!(CodeLookup::by_iata("JFK"), iata);
    }
}

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

//! The set of aircraft types that operate a route.

use crate::model::AircraftCode;
use serde::de::Visitor;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// Sorted and de-duplicated set of aircraft type codes.
///
/// The set is persisted and serialized as a single string with the codes separated by spaces.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct AircraftTypes(BTreeSet<String>);

impl AircraftTypes {
    /// Returns true if `code` is one of the types in the set.
    pub(crate) fn contains(&self, code: &AircraftCode) -> bool {
        self.0.contains(code.as_str())
    }

    /// Adds `code` to the set.  Returns false if the code was already present.
    pub(crate) fn insert(&mut self, code: AircraftCode) -> bool {
        self.0.insert(code.as_str().to_owned())
    }
}

impl From<&str> for AircraftTypes {
    fn from(raw: &str) -> Self {
        Self(raw.split_whitespace().map(str::to_owned).collect())
    }
}

impl From<String> for AircraftTypes {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<AircraftCode> for AircraftTypes {
    fn from(code: AircraftCode) -> Self {
        let mut types = Self::default();
        types.insert(code);
        types
    }
}

impl fmt::Display for AircraftTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for code in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(code)?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for AircraftTypes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Visitor to deserialize an `AircraftTypes` from a string.
struct AircraftTypesVisitor;

impl Visitor<'_> for AircraftTypesVisitor {
    type Value = AircraftTypes;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a space-separated list of aircraft type codes")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(AircraftTypes::from(v))
    }
}

impl<'de> Deserialize<'de> for AircraftTypes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(AircraftTypesVisitor)
    }
}

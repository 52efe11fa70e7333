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

//! Construction of parameterized `WHERE` clauses.
//!
//! Column names are always static strings owned by this crate.  User-supplied values are never
//! spliced into the query text: they are collected in placeholder order and must be bound by the
//! caller with `Predicate::values`.

use crate::model::CodeLookup;

/// A parameterized SQL condition along with the values for its placeholders.
#[derive(Debug, PartialEq)]
pub(crate) struct Predicate {
    /// SQL text of the condition, using `$N` placeholders starting at `$1`.
    sql: String,

    /// Values for the placeholders, in placeholder order.
    values: Vec<String>,
}

impl Predicate {
    /// Builds a predicate that matches rows whose `column` is one of `values`.
    ///
    /// Placeholders are numbered following the order of `values`.  An empty list matches nothing.
    pub(crate) fn column_in(column: &'static str, values: &[String]) -> Self {
        if values.is_empty() {
            return Self { sql: "1 = 0".to_owned(), values: vec![] };
        }
        let placeholders =
            (1..=values.len()).map(|i| format!("${}", i)).collect::<Vec<String>>().join(", ");
        Self { sql: format!("{} IN ({})", column, placeholders), values: values.to_vec() }
    }

    /// Builds a predicate that matches rows with any of the codes in `lookup`.
    pub(crate) fn any_code(lookup: &CodeLookup) -> Self {
        Self::codes(lookup, " OR ")
    }

    /// Builds a predicate that matches rows with all of the codes in `lookup`.
    pub(crate) fn all_codes(lookup: &CodeLookup) -> Self {
        Self::codes(lookup, " AND ")
    }

    /// Joins the conditions for the codes present in `lookup` with `joiner`.
    fn codes(lookup: &CodeLookup, joiner: &str) -> Self {
        let mut conditions = vec![];
        let mut values = vec![];
        for (column, value) in [("icao", lookup.icao()), ("iata", lookup.iata())] {
            if let Some(value) = value {
                values.push(value.to_owned());
                conditions.push(format!("{} = ${}", column, values.len()));
            }
        }
        Self { sql: conditions.join(joiner), values }
    }

    /// Returns the SQL text of the condition.
    pub(crate) fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the values to bind to the placeholders, in order.
    pub(crate) fn values(&self) -> &[String] {
        &self.values
    }
}

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

//! Database abstraction in terms of the operations needed by the server.
//!
//! Queries are written once with `$N` placeholders, which both PostgreSQL and SQLite understand,
//! and are executed against whichever backend the `Executor` wraps.

use crate::model::*;
#[cfg(feature = "postgres")]
use airmap_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use airmap_core::db::sqlite;
use airmap_core::db::{DbError, DbResult, Executor};
use log::debug;
use sqlx::Row;
use std::collections::HashSet;
use std::fmt;

mod filter;
use filter::Predicate;
#[cfg(test)]
pub(crate) mod testutils;

/// Runs `$body` with `$conn` bound to the raw connection behind the executor `$ex` and with
/// `$map_err` bound to the function that converts that backend's errors.
///
/// The body is expanded once per backend so that `sqlx` can see the concrete database types.
macro_rules! with_conn [
    ( $ex:expr, |$conn:ident, $map_err:ident| $body:block ) => {
        match $ex {
            #[cfg(feature = "postgres")]
            Executor::Postgres(ex) => {
                let $conn = ex.conn();
                let $map_err = postgres::map_sqlx_error;
                $body
            }

            #[cfg(any(feature = "sqlite", test))]
            Executor::Sqlite(ex) => {
                let $conn = ex.conn();
                let $map_err = sqlite::map_sqlx_error;
                $body
            }

            #[allow(unused)]
            _ => unreachable!(),
        }
    }
];

/// Columns of the `airlines` table, in the order expected by `Airline`.
const AIRLINE_COLUMNS: &str = "name, iata, icao, country, callsign";

/// Columns of the `airlines` table qualified for use in joins.
const QUALIFIED_AIRLINE_COLUMNS: &str = "airlines.name AS name, airlines.iata AS iata, \
    airlines.icao AS icao, airlines.country AS country, airlines.callsign AS callsign";

/// Columns of the `airports` table, in the order expected by `Airport`.
const AIRPORT_COLUMNS: &str = "name, city, country, iata, icao, latitude, longitude";

/// Columns of the `airports` table qualified for use in joins.
const QUALIFIED_AIRPORT_COLUMNS: &str = "airports.name AS name, airports.city AS city, \
    airports.country AS country, airports.iata AS iata, airports.icao AS icao, \
    airports.latitude AS latitude, airports.longitude AS longitude";

/// Columns of the `routes` table, in the order expected by `Route`.
const ROUTE_COLUMNS: &str = "airline, departure, arrival, planes";

/// Logs the execution of `query_str` with its bound `values`.
fn log_query<V: fmt::Debug>(query_str: &str, values: V) {
    debug!("Executing query: {} with values: {:?}", query_str.trim(), values);
}

/// Keeps only the first of the `rows` that share the same `(icao, iata)` pair.
fn dedup_by_codes<T, F>(rows: Vec<T>, codes: F) -> Vec<T>
where
    F: Fn(&T) -> (Option<String>, Option<String>),
{
    let mut seen = HashSet::new();
    rows.into_iter().filter(|row| seen.insert(codes(row))).collect()
}

/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Upgrades the transaction behind `ex` to the serializable isolation level.  Must be the first
/// statement issued in the transaction.
///
/// SQLite transactions are always serializable so this only has an effect on PostgreSQL.
pub(crate) async fn set_serializable(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SET TRANSACTION ISOLATION LEVEL SERIALIZABLE";
            sqlx::query(query_str)
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Ok(())
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(_ex) => Ok(()),

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Runs a `SELECT COUNT(*) AS count` query with a single bound `value` and returns whether the
/// count is positive.
async fn exists(ex: &mut Executor, query_str: &'static str, value: &str) -> DbResult<bool> {
    log_query(query_str, [value]);
    let count: i64 = with_conn!(ex, |conn, map_err| {
        let row = sqlx::query(query_str).bind(value).fetch_one(conn).await.map_err(map_err)?;
        row.try_get::<i64, _>("count").map_err(map_err)
    })?;
    Ok(count > 0)
}

/// Gets all countries sorted by name.
pub(crate) async fn list_countries(ex: &mut Executor) -> DbResult<Vec<Country>> {
    let query_str = "SELECT DISTINCT code, name FROM countries ORDER BY name, code";
    log_query(query_str, ());
    with_conn!(ex, |conn, map_err| {
        sqlx::query_as::<_, Country>(query_str).fetch_all(conn).await.map_err(map_err)
    })
}

/// Creates a new `country`.
#[cfg(test)]
pub(crate) async fn create_country(ex: &mut Executor, country: &Country) -> DbResult<()> {
    let query_str = "INSERT INTO countries (code, name) VALUES ($1, $2)";
    log_query(query_str, (&country.code, &country.name));
    with_conn!(ex, |conn, map_err| {
        sqlx::query(query_str)
            .bind(&country.code)
            .bind(&country.name)
            .execute(conn)
            .await
            .map_err(map_err)?;
        Ok(())
    })
}

/// Adds the aircraft type `code` with a descriptive `name` to the catalog.
#[cfg(test)]
pub(crate) async fn create_aircraft(ex: &mut Executor, code: &str, name: &str) -> DbResult<()> {
    let query_str = "INSERT INTO planes (code, name) VALUES ($1, $2)";
    log_query(query_str, (code, name));
    with_conn!(ex, |conn, map_err| {
        sqlx::query(query_str).bind(code).bind(name).execute(conn).await.map_err(map_err)?;
        Ok(())
    })
}

/// Returns true if the aircraft type `code` is in the catalog.
pub(crate) async fn aircraft_exists(ex: &mut Executor, code: &str) -> DbResult<bool> {
    exists(ex, "SELECT COUNT(*) AS count FROM planes WHERE code = $1", code).await
}

/// Gets the airlines that belong to any of the countries identified by `country_codes`, without
/// duplicate `(icao, iata)` pairs.
pub(crate) async fn get_airlines_in_countries(
    ex: &mut Executor,
    country_codes: &[String],
) -> DbResult<Vec<Airline>> {
    let predicate = Predicate::column_in("countries.code", country_codes);
    let query_str = format!(
        "SELECT DISTINCT {}
        FROM airlines JOIN countries ON airlines.country = countries.name
        WHERE {}
        ORDER BY name, iata, icao, country, callsign",
        QUALIFIED_AIRLINE_COLUMNS,
        predicate.sql()
    );
    log_query(&query_str, predicate.values());
    let airlines = with_conn!(ex, |conn, map_err| {
        let mut query = sqlx::query_as::<_, Airline>(&query_str);
        for value in predicate.values() {
            query = query.bind(value.as_str());
        }
        query.fetch_all(conn).await.map_err(map_err)
    })?;
    Ok(dedup_by_codes(airlines, |a| (a.icao.clone(), a.iata.clone())))
}

/// Gets the airlines that match any of the codes in `lookup`.
pub(crate) async fn find_airlines(
    ex: &mut Executor,
    lookup: &CodeLookup,
) -> DbResult<Vec<Airline>> {
    let predicate = Predicate::any_code(lookup);
    let query_str = format!(
        "SELECT {} FROM airlines WHERE {} ORDER BY name, iata, icao, country, callsign",
        AIRLINE_COLUMNS,
        predicate.sql()
    );
    log_query(&query_str, predicate.values());
    with_conn!(ex, |conn, map_err| {
        let mut query = sqlx::query_as::<_, Airline>(&query_str);
        for value in predicate.values() {
            query = query.bind(value.as_str());
        }
        query.fetch_all(conn).await.map_err(map_err)
    })
}

/// Creates a new `airline` and returns it as stored.
pub(crate) async fn create_airline(ex: &mut Executor, airline: &Airline) -> DbResult<Airline> {
    let query_str = format!(
        "INSERT INTO airlines ({}) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
        AIRLINE_COLUMNS, AIRLINE_COLUMNS
    );
    log_query(&query_str, airline);
    with_conn!(ex, |conn, map_err| {
        sqlx::query_as::<_, Airline>(&query_str)
            .bind(&airline.name)
            .bind(&airline.iata)
            .bind(&airline.icao)
            .bind(&airline.country)
            .bind(&airline.callsign)
            .fetch_one(conn)
            .await
            .map_err(map_err)
    })
}

/// Deletes the airlines that match all of the codes in `lookup` and returns how many were deleted.
pub(crate) async fn delete_airlines(ex: &mut Executor, lookup: &CodeLookup) -> DbResult<u64> {
    let predicate = Predicate::all_codes(lookup);
    let query_str = format!("DELETE FROM airlines WHERE {}", predicate.sql());
    log_query(&query_str, predicate.values());
    with_conn!(ex, |conn, map_err| {
        let mut query = sqlx::query(&query_str);
        for value in predicate.values() {
            query = query.bind(value.as_str());
        }
        let done = query.execute(conn).await.map_err(map_err)?;
        Ok(done.rows_affected())
    })
}

/// Returns true if an airline with the IATA `code` exists.
pub(crate) async fn airline_exists(ex: &mut Executor, code: &str) -> DbResult<bool> {
    exists(ex, "SELECT COUNT(*) AS count FROM airlines WHERE iata = $1", code).await
}

/// Gets the airports in any of the countries identified by `country_codes`, without duplicate
/// `(icao, iata)` pairs.
pub(crate) async fn get_airports_in_countries(
    ex: &mut Executor,
    country_codes: &[String],
) -> DbResult<Vec<Airport>> {
    let predicate = Predicate::column_in("countries.code", country_codes);
    let query_str = format!(
        "SELECT {}
        FROM airports JOIN countries ON airports.country = countries.name
        WHERE {}
        ORDER BY name, iata, icao",
        QUALIFIED_AIRPORT_COLUMNS,
        predicate.sql()
    );
    log_query(&query_str, predicate.values());
    let airports = with_conn!(ex, |conn, map_err| {
        let mut query = sqlx::query_as::<_, Airport>(&query_str);
        for value in predicate.values() {
            query = query.bind(value.as_str());
        }
        query.fetch_all(conn).await.map_err(map_err)
    })?;
    Ok(dedup_by_codes(airports, |a| (a.icao.clone(), a.iata.clone())))
}

/// Gets the airports that match any of the codes in `lookup`.
pub(crate) async fn find_airports(
    ex: &mut Executor,
    lookup: &CodeLookup,
) -> DbResult<Vec<Airport>> {
    let predicate = Predicate::any_code(lookup);
    let query_str = format!(
        "SELECT {} FROM airports WHERE {} ORDER BY name, iata, icao, city",
        AIRPORT_COLUMNS,
        predicate.sql()
    );
    log_query(&query_str, predicate.values());
    with_conn!(ex, |conn, map_err| {
        let mut query = sqlx::query_as::<_, Airport>(&query_str);
        for value in predicate.values() {
            query = query.bind(value.as_str());
        }
        query.fetch_all(conn).await.map_err(map_err)
    })
}

/// Gets all airports.
pub(crate) async fn get_all_airports(ex: &mut Executor) -> DbResult<Vec<Airport>> {
    let query_str = format!("SELECT {} FROM airports ORDER BY name, iata, icao", AIRPORT_COLUMNS);
    log_query(&query_str, ());
    with_conn!(ex, |conn, map_err| {
        sqlx::query_as::<_, Airport>(&query_str).fetch_all(conn).await.map_err(map_err)
    })
}

/// Creates a new `airport` and returns it as stored.
pub(crate) async fn create_airport(ex: &mut Executor, airport: &Airport) -> DbResult<Airport> {
    let query_str = format!(
        "INSERT INTO airports ({}) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
        AIRPORT_COLUMNS, AIRPORT_COLUMNS
    );
    log_query(&query_str, airport);
    with_conn!(ex, |conn, map_err| {
        sqlx::query_as::<_, Airport>(&query_str)
            .bind(&airport.name)
            .bind(&airport.city)
            .bind(&airport.country)
            .bind(&airport.iata)
            .bind(&airport.icao)
            .bind(airport.latitude)
            .bind(airport.longitude)
            .fetch_one(conn)
            .await
            .map_err(map_err)
    })
}

/// Deletes the airports that match all of the codes in `lookup` and returns how many were deleted.
pub(crate) async fn delete_airports(ex: &mut Executor, lookup: &CodeLookup) -> DbResult<u64> {
    let predicate = Predicate::all_codes(lookup);
    let query_str = format!("DELETE FROM airports WHERE {}", predicate.sql());
    log_query(&query_str, predicate.values());
    with_conn!(ex, |conn, map_err| {
        let mut query = sqlx::query(&query_str);
        for value in predicate.values() {
            query = query.bind(value.as_str());
        }
        let done = query.execute(conn).await.map_err(map_err)?;
        Ok(done.rows_affected())
    })
}

/// Returns true if an airport with the IATA `code` exists.
pub(crate) async fn airport_exists(ex: &mut Executor, code: &str) -> DbResult<bool> {
    exists(ex, "SELECT COUNT(*) AS count FROM airports WHERE iata = $1", code).await
}

/// Gets the airlines and aircraft that operate from `departure` to `arrival`.
///
/// Airlines that are not in the `airlines` table are still returned, without a name.
pub(crate) async fn get_route_services(
    ex: &mut Executor,
    departure: &str,
    arrival: &str,
) -> DbResult<Vec<RouteService>> {
    let query_str = "
        SELECT DISTINCT r.airline AS airline, r.planes AS aircraft, a.name AS airline_name
        FROM routes r LEFT JOIN airlines a ON r.airline = a.iata
        WHERE r.departure = $1 AND r.arrival = $2
        ORDER BY airline, aircraft, airline_name";
    log_query(query_str, (departure, arrival));
    with_conn!(ex, |conn, map_err| {
        sqlx::query_as::<_, RouteService>(query_str)
            .bind(departure)
            .bind(arrival)
            .fetch_all(conn)
            .await
            .map_err(map_err)
    })
}

/// Gets the distinct airports reachable from `departure`.
pub(crate) async fn get_arrivals(ex: &mut Executor, departure: &str) -> DbResult<Vec<Arrival>> {
    let query_str = "SELECT DISTINCT arrival FROM routes WHERE departure = $1 ORDER BY arrival";
    log_query(query_str, [departure]);
    with_conn!(ex, |conn, map_err| {
        sqlx::query_as::<_, Arrival>(query_str)
            .bind(departure)
            .fetch_all(conn)
            .await
            .map_err(map_err)
    })
}

/// Gets the distinct airports from which `arrival` is reachable.
pub(crate) async fn get_departures(ex: &mut Executor, arrival: &str) -> DbResult<Vec<Departure>> {
    let query_str = "SELECT DISTINCT departure FROM routes WHERE arrival = $1 ORDER BY departure";
    log_query(query_str, [arrival]);
    with_conn!(ex, |conn, map_err| {
        sqlx::query_as::<_, Departure>(query_str)
            .bind(arrival)
            .fetch_all(conn)
            .await
            .map_err(map_err)
    })
}

/// Gets all routes operated by `airline`.
pub(crate) async fn get_routes_by_airline(
    ex: &mut Executor,
    airline: &str,
) -> DbResult<Vec<Route>> {
    let query_str = format!(
        "SELECT {} FROM routes WHERE airline = $1 ORDER BY departure, arrival",
        ROUTE_COLUMNS
    );
    log_query(&query_str, [airline]);
    with_conn!(ex, |conn, map_err| {
        sqlx::query_as::<_, Route>(&query_str).bind(airline).fetch_all(conn).await.map_err(map_err)
    })
}

/// Gets the route identified by `airline`, `departure` and `arrival`, if it exists.
pub(crate) async fn get_route(
    ex: &mut Executor,
    airline: &str,
    departure: &str,
    arrival: &str,
) -> DbResult<Option<Route>> {
    let query_str = format!(
        "SELECT {} FROM routes WHERE airline = $1 AND departure = $2 AND arrival = $3",
        ROUTE_COLUMNS
    );
    log_query(&query_str, (airline, departure, arrival));
    with_conn!(ex, |conn, map_err| {
        sqlx::query_as::<_, Route>(&query_str)
            .bind(airline)
            .bind(departure)
            .bind(arrival)
            .fetch_optional(conn)
            .await
            .map_err(map_err)
    })
}

/// Creates a new `route` and returns it as stored.
///
/// Fails with `AlreadyExists` if there already is a route for the same airline and airports.
pub(crate) async fn create_route(ex: &mut Executor, route: &Route) -> DbResult<Route> {
    let query_str = format!(
        "INSERT INTO routes ({}) VALUES ($1, $2, $3, $4) RETURNING {}",
        ROUTE_COLUMNS, ROUTE_COLUMNS
    );
    log_query(&query_str, route);
    with_conn!(ex, |conn, map_err| {
        sqlx::query_as::<_, Route>(&query_str)
            .bind(&route.airline)
            .bind(&route.departure)
            .bind(&route.arrival)
            .bind(route.planes.to_string())
            .fetch_one(conn)
            .await
            .map_err(map_err)
    })
}

/// Overwrites the aircraft types of an existing `route` and returns the updated route.
pub(crate) async fn update_route_planes(ex: &mut Executor, route: &Route) -> DbResult<Route> {
    let query_str = format!(
        "UPDATE routes SET planes = $1
        WHERE airline = $2 AND departure = $3 AND arrival = $4
        RETURNING {}",
        ROUTE_COLUMNS
    );
    log_query(&query_str, route);
    let updated = with_conn!(ex, |conn, map_err| {
        sqlx::query_as::<_, Route>(&query_str)
            .bind(route.planes.to_string())
            .bind(&route.airline)
            .bind(&route.departure)
            .bind(&route.arrival)
            .fetch_optional(conn)
            .await
            .map_err(map_err)
    })?;
    updated.ok_or(DbError::NotFound)
}

/// Deletes the route identified by `airline`, `departure` and `arrival`.  Returns the deleted
/// route, or `None` if there was no such route.
pub(crate) async fn delete_route(
    ex: &mut Executor,
    airline: &str,
    departure: &str,
    arrival: &str,
) -> DbResult<Option<Route>> {
    let query_str = format!(
        "DELETE FROM routes WHERE airline = $1 AND departure = $2 AND arrival = $3 RETURNING {}",
        ROUTE_COLUMNS
    );
    log_query(&query_str, (airline, departure, arrival));
    with_conn!(ex, |conn, map_err| {
        sqlx::query_as::<_, Route>(&query_str)
            .bind(airline)
            .bind(departure)
            .bind(arrival)
            .fetch_optional(conn)
            .await
            .map_err(map_err)
    })
}

/// Gets the known airlines that fly to or from the airport `iata`.
pub(crate) async fn get_airlines_at_airport(
    ex: &mut Executor,
    iata: &str,
) -> DbResult<Vec<AirlineSummary>> {
    let query_str = "
        SELECT DISTINCT a.name AS name, a.iata AS iata, a.icao AS icao
        FROM routes r JOIN airlines a ON r.airline = a.iata
        WHERE r.departure = $1 OR r.arrival = $1
        ORDER BY name, iata, icao";
    log_query(query_str, [iata]);
    with_conn!(ex, |conn, map_err| {
        sqlx::query_as::<_, AirlineSummary>(query_str)
            .bind(iata)
            .fetch_all(conn)
            .await
            .map_err(map_err)
    })
}

/// Gets the known airlines that fly from `departure` to `arrival`.
pub(crate) async fn get_airlines_between(
    ex: &mut Executor,
    departure: &str,
    arrival: &str,
) -> DbResult<Vec<AirlineSummary>> {
    let query_str = "
        SELECT DISTINCT a.name AS name, a.iata AS iata, a.icao AS icao
        FROM routes r JOIN airlines a ON r.airline = a.iata
        WHERE r.departure = $1 AND r.arrival = $2
        ORDER BY name, iata, icao";
    log_query(query_str, (departure, arrival));
    with_conn!(ex, |conn, map_err| {
        sqlx::query_as::<_, AirlineSummary>(query_str)
            .bind(departure)
            .bind(arrival)
            .fetch_all(conn)
            .await
            .map_err(map_err)
    })
}

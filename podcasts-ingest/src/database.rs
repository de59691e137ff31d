// database.rs
//
// Copyright 2026 Jordan Petridis <jpetridis@gnome.org>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Database pool setup.

use diesel::prelude::*;
use diesel::r2d2;
use diesel::r2d2::ConnectionManager;

use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use std::sync::LazyLock;

#[cfg(not(test))]
use crate::xdg_dirs;
#[cfg(test)]
use std::sync::Mutex;

use crate::errors::DataError;

type Pool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/");

#[cfg(not(test))]
static POOL: LazyLock<Pool> = LazyLock::new(|| {
    let pathbuf = xdg_dirs::INGEST_XDG
        .place_data_file("episodes.db")
        .unwrap();
    let db_path = pathbuf.to_str().unwrap();
    init_pool(db_path)
});

// With `cargo test` the pool is shared between every [test] in the
// binary, so each test has to swap in a fresh tempfile db with
// reset_db() before it touches the database.
#[cfg(test)]
static POOL: LazyLock<Mutex<Pool>> = LazyLock::new(|| {
    let db = tempfile::Builder::new().tempfile().unwrap();
    let db_path = db.path().to_str().unwrap();
    Mutex::new(init_pool(db_path))
});

/// Get an r2d2 `SqliteConnection` pool.
#[cfg(not(test))]
pub(crate) fn connection() -> Pool {
    POOL.clone()
}

#[cfg(test)]
pub(crate) fn connection() -> Pool {
    POOL.lock().unwrap().clone()
}

fn init_pool(db_path: &str) -> Pool {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = r2d2::Pool::builder()
        .build(manager)
        .expect("Failed to create pool.");

    {
        let mut con = pool.get().expect("Failed to initialize pool.");
        run_migrations(&mut con).expect("Failed to run migrations during init.");
    }
    info!("Database pool initialized.");
    pool
}

fn run_migrations(con: &mut SqliteConnection) -> Result<(), DataError> {
    info!("Running DB Migrations...");
    con.run_pending_migrations(MIGRATIONS)
        .map(|_| ())
        .map_err(|_| DataError::DieselMigrationError)
}

/// Swap the shared pool for one backed by a fresh single-use database.
///
/// The db file is deleted when the returned tempfile drops, so keep the
/// binding alive for the duration of the test.
#[cfg(test)]
pub(crate) fn reset_db() -> Result<tempfile::NamedTempFile, DataError> {
    let db = tempfile::Builder::new()
        .suffix("-ingest.db")
        .tempfile()
        .unwrap();
    let db_path = db.path().to_str().unwrap();

    let pool = init_pool(db_path);
    let mut lock = POOL.lock().unwrap();
    *lock = pool;
    drop(lock);

    Ok(db)
}

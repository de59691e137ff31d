// dbqueries.rs
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

//! Random CRUD helper functions.

use diesel::prelude::*;

use diesel::dsl::exists;
use diesel::select;

use crate::database::connection;
use crate::errors::DataError;
use crate::models::{Episode, Podcast};

pub fn get_podcasts() -> Result<Vec<Podcast>, DataError> {
    use crate::schema::podcasts::dsl::*;
    let db = connection();
    let mut con = db.get()?;

    podcasts
        .order(title.asc())
        .load::<Podcast>(&mut con)
        .map_err(From::from)
}

pub fn get_podcast_from_id(podcast_id_: i32) -> Result<Podcast, DataError> {
    use crate::schema::podcasts::dsl::*;
    let db = connection();
    let mut con = db.get()?;

    podcasts
        .filter(id.eq(podcast_id_))
        .get_result::<Podcast>(&mut con)
        .map_err(From::from)
}

pub fn get_podcast_from_url(feed_url_: &str) -> Result<Podcast, DataError> {
    use crate::schema::podcasts::dsl::*;
    let db = connection();
    let mut con = db.get()?;

    podcasts
        .filter(feed_url.eq(feed_url_))
        .get_result::<Podcast>(&mut con)
        .map_err(From::from)
}

pub fn get_episodes() -> Result<Vec<Episode>, DataError> {
    use crate::schema::episodes::dsl::*;
    let db = connection();
    let mut con = db.get()?;

    episodes
        .order(published_at.desc())
        .load::<Episode>(&mut con)
        .map_err(From::from)
}

pub fn get_episode_from_id(episode_id_: i32) -> Result<Episode, DataError> {
    use crate::schema::episodes::dsl::*;
    let db = connection();
    let mut con = db.get()?;

    episodes
        .filter(id.eq(episode_id_))
        .get_result::<Episode>(&mut con)
        .map_err(From::from)
}

/// Look an episode up by the pair the feed identifies it with.
pub fn get_episode(podcast_id_: i32, media_url_: &str) -> Result<Episode, DataError> {
    use crate::schema::episodes::dsl::*;
    let db = connection();
    let mut con = db.get()?;

    episodes
        .filter(podcast_id.eq(podcast_id_))
        .filter(media_url.eq(media_url_))
        .get_result::<Episode>(&mut con)
        .map_err(From::from)
}

pub fn episode_exists(podcast_id_: i32, media_url_: &str) -> Result<bool, DataError> {
    use crate::schema::episodes::dsl::*;
    let db = connection();
    let mut con = db.get()?;

    select(exists(
        episodes
            .filter(podcast_id.eq(podcast_id_))
            .filter(media_url.eq(media_url_)),
    ))
    .get_result(&mut con)
    .map_err(From::from)
}

pub fn get_pd_episodes(parent: &Podcast) -> Result<Vec<Episode>, DataError> {
    use crate::schema::episodes::dsl::*;
    let db = connection();
    let mut con = db.get()?;

    Episode::belonging_to(parent)
        .order(published_at.desc())
        .load::<Episode>(&mut con)
        .map_err(From::from)
}

pub fn get_pd_episodes_count(parent: &Podcast) -> Result<i64, DataError> {
    let db = connection();
    let mut con = db.get()?;

    Episode::belonging_to(parent)
        .count()
        .get_result(&mut con)
        .map_err(From::from)
}

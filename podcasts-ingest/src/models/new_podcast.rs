use diesel::prelude::*;
use url::Url;

use crate::database::connection;
use crate::dbqueries;
use crate::errors::DataError;
use crate::models::Podcast;
use crate::schema::podcasts;

#[derive(Insertable)]
#[diesel(table_name = podcasts)]
#[derive(Debug, Clone, Default, Builder, PartialEq)]
#[builder(default)]
#[builder(derive(Debug))]
#[builder(setter(into))]
pub(crate) struct NewPodcast {
    title: String,
    feed_url: String,
}

impl NewPodcast {
    pub(crate) fn new(title: &str, feed_url: &Url) -> NewPodcast {
        NewPodcast {
            title: title.to_owned(),
            feed_url: feed_url.to_string(),
        }
    }

    pub(crate) fn insert_or_ignore(&self) -> Result<(), DataError> {
        use crate::schema::podcasts::dsl::*;
        let db = connection();
        let mut con = db.get()?;

        diesel::insert_or_ignore_into(podcasts)
            .values(self)
            .execute(&mut con)
            .map(|_| ())
            .map_err(From::from)
    }

    pub(crate) fn to_podcast(&self) -> Result<Podcast, DataError> {
        self.insert_or_ignore()?;
        dbqueries::get_podcast_from_url(&self.feed_url)
    }
}

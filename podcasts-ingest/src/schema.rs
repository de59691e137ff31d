#![allow(warnings)]

table! {
    episodes (id) {
        id -> Integer,
        podcast_id -> Integer,
        title -> Nullable<Text>,
        subtitle -> Nullable<Text>,
        summary -> Nullable<Text>,
        body -> Nullable<Text>,
        website_url -> Nullable<Text>,
        guid -> Nullable<Text>,
        media_url -> Text,
        https -> Bool,
        reachable -> Bool,
        published_at -> Nullable<Timestamp>,
        created_at -> Timestamp,
    }
}

table! {
    podcasts (id) {
        id -> Integer,
        title -> Text,
        feed_url -> Text,
    }
}

allow_tables_to_appear_in_same_query!(episodes, podcasts);

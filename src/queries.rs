//! Shaping of store rows into the data handed to the pages.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::filters::{LISTING_TIME_FORMAT, SHOW_TIME_FORMAT};
use crate::models::{
    Artist, ArtistShow, EntitySummary, Scheduled, ShowListing, Venue, VenueArea, VenueLocation,
    VenueShow,
};

/// Groups venues under their (city, state) pair, in order of first appearance.
pub fn group_by_area(locations: Vec<VenueLocation>) -> Vec<VenueArea> {
    let mut areas: Vec<VenueArea> = Vec::new();

    for location in locations {
        let summary = EntitySummary { id: location.id, name: location.name };
        match areas
            .iter_mut()
            .find(|a| a.city == location.city && a.state == location.state)
        {
            Some(area) => area.venues.push(summary),
            None => areas.push(VenueArea {
                city: location.city,
                state: location.state,
                venues: vec![summary],
            }),
        }
    }

    areas
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<EntitySummary>,
}

impl From<Vec<EntitySummary>> for SearchResults {
    fn from(data: Vec<EntitySummary>) -> Self {
        SearchResults { count: data.len(), data }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowBuckets<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

/// Splits shows into strictly-before and strictly-after `now`.
///
/// A show starting exactly at `now` lands in neither bucket.
pub fn partition_shows<T: Scheduled>(shows: Vec<T>, now: NaiveDateTime) -> ShowBuckets<T> {
    let mut buckets = ShowBuckets { past: Vec::new(), upcoming: Vec::new() };
    for show in shows {
        let start = show.start_time();
        if start < now {
            buckets.past.push(show);
        } else if start > now {
            buckets.upcoming.push(show);
        }
    }
    buckets
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueShowEntry {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

impl From<VenueShow> for VenueShowEntry {
    fn from(show: VenueShow) -> Self {
        VenueShowEntry {
            artist_id: show.artist_id,
            artist_name: show.artist_name,
            artist_image_link: show.artist_image_link,
            start_time: show.start_time.format(SHOW_TIME_FORMAT).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistShowEntry {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: String,
}

impl From<ArtistShow> for ArtistShowEntry {
    fn from(show: ArtistShow) -> Self {
        ArtistShowEntry {
            venue_id: show.venue_id,
            venue_name: show.venue_name,
            venue_image_link: show.venue_image_link,
            start_time: show.start_time.format(SHOW_TIME_FORMAT).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    pub past_shows: Vec<VenueShowEntry>,
    pub upcoming_shows: Vec<VenueShowEntry>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl VenueDetail {
    pub fn new(venue: Venue, shows: Vec<VenueShow>, now: NaiveDateTime) -> Self {
        let buckets = partition_shows(shows, now);
        let past_shows: Vec<VenueShowEntry> = buckets.past.into_iter().map(Into::into).collect();
        let upcoming_shows: Vec<VenueShowEntry> =
            buckets.upcoming.into_iter().map(Into::into).collect();

        VenueDetail {
            venue,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    pub past_shows: Vec<ArtistShowEntry>,
    pub upcoming_shows: Vec<ArtistShowEntry>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl ArtistDetail {
    pub fn new(artist: Artist, shows: Vec<ArtistShow>, now: NaiveDateTime) -> Self {
        let buckets = partition_shows(shows, now);
        let past_shows: Vec<ArtistShowEntry> = buckets.past.into_iter().map(Into::into).collect();
        let upcoming_shows: Vec<ArtistShowEntry> =
            buckets.upcoming.into_iter().map(Into::into).collect();

        ArtistDetail {
            artist,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListingEntry {
    pub artist_name: String,
    pub artist_id: i32,
    pub venue_name: String,
    pub venue_id: i32,
    pub start_time: String,
    pub artist_image_link: String,
}

impl From<ShowListing> for ShowListingEntry {
    fn from(row: ShowListing) -> Self {
        ShowListingEntry {
            artist_name: row.artist_name,
            artist_id: row.artist_id,
            venue_name: row.venue_name,
            venue_id: row.venue_id,
            start_time: row.start_time.format(LISTING_TIME_FORMAT).to_string(),
            artist_image_link: row.artist_image_link,
        }
    }
}

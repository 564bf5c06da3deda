use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Show {
    pub id: i32,
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShow {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: NaiveDateTime,
}

/// A show at a venue joined with its artist.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct VenueShow {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: NaiveDateTime,
}

/// A show by an artist joined with its venue.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ArtistShow {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: NaiveDateTime,
}

// One row of the shows page
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ShowListing {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: String,
    pub venue_id: i32,
    pub venue_name: String,
    pub start_time: NaiveDateTime,
}

/// Anything that happens at a point in time.
pub trait Scheduled {
    fn start_time(&self) -> NaiveDateTime;
}

impl Scheduled for VenueShow {
    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

impl Scheduled for ArtistShow {
    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

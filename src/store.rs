//! The persistence seam used by every handler.
//!
//! Reads return plain rows; writes each run inside a single transaction and
//! either commit completely or leave the store untouched.

use std::future::Future;
use thiserror::Error;

use crate::models::{
    Artist, ArtistFields, ArtistShow, EntitySummary, NewShow, ShowListing, Venue, VenueFields,
    VenueLocation, VenueShow,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    /// A row references a venue or artist that does not exist, or is still referenced.
    #[error("constraint violated: {0}")]
    Constraint(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub trait Store: Send + Sync + 'static {
    /// `(id, name, city, state)` for every venue, ordered by id.
    fn venue_locations(&self) -> impl Future<Output = StoreResult<Vec<VenueLocation>>> + Send;

    /// Venues whose name contains `term`, ignoring case.
    fn search_venues(&self, term: &str) -> impl Future<Output = StoreResult<Vec<EntitySummary>>> + Send;

    fn venue(&self, id: i32) -> impl Future<Output = StoreResult<Option<Venue>>> + Send;

    /// Every show held at the venue, joined with its artist.
    fn venue_shows(&self, venue_id: i32) -> impl Future<Output = StoreResult<Vec<VenueShow>>> + Send;

    fn insert_venue(&self, fields: VenueFields) -> impl Future<Output = StoreResult<i32>> + Send;

    /// Overwrites every editable column. Returns `false` if no venue has that id.
    fn update_venue(&self, id: i32, fields: VenueFields) -> impl Future<Output = StoreResult<bool>> + Send;

    /// Returns the number of rows removed.
    fn delete_venue(&self, id: i32) -> impl Future<Output = StoreResult<u64>> + Send;

    fn artists(&self) -> impl Future<Output = StoreResult<Vec<EntitySummary>>> + Send;

    /// Artists whose name contains `term`, ignoring case.
    fn search_artists(&self, term: &str) -> impl Future<Output = StoreResult<Vec<EntitySummary>>> + Send;

    fn artist(&self, id: i32) -> impl Future<Output = StoreResult<Option<Artist>>> + Send;

    /// Every show the artist plays, joined with its venue.
    fn artist_shows(&self, artist_id: i32) -> impl Future<Output = StoreResult<Vec<ArtistShow>>> + Send;

    fn insert_artist(&self, fields: ArtistFields) -> impl Future<Output = StoreResult<i32>> + Send;

    /// Overwrites every editable column. Returns `false` if no artist has that id.
    fn update_artist(&self, id: i32, fields: ArtistFields) -> impl Future<Output = StoreResult<bool>> + Send;

    /// Every show with its artist and venue, grouped by artist.
    fn shows(&self) -> impl Future<Output = StoreResult<Vec<ShowListing>>> + Send;

    fn insert_show(&self, show: NewShow) -> impl Future<Output = StoreResult<i32>> + Send;
}

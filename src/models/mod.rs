pub mod venue;
pub mod artist;
pub mod show;

pub use venue::{Venue, VenueArea, VenueFields, VenueLocation};
pub use artist::{Artist, ArtistFields};
pub use show::{ArtistShow, NewShow, Scheduled, Show, ShowListing, VenueShow};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The `{id, name}` projection used by listings and search results.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct EntitySummary {
    pub id: i32,
    pub name: String,
}

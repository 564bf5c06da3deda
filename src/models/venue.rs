use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::EntitySummary;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Venue {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Every editable venue column. Used for both inserts and full overwrites.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VenueFields {
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl Venue {
    pub fn from_fields(id: i32, fields: VenueFields) -> Self {
        Venue {
            id,
            name: fields.name,
            genres: fields.genres,
            address: fields.address,
            city: fields.city,
            state: fields.state,
            phone: fields.phone,
            image_link: fields.image_link,
            facebook_link: fields.facebook_link,
            website: fields.website,
            seeking_talent: fields.seeking_talent,
            seeking_description: fields.seeking_description,
        }
    }
}

// Row used to build the city/state listing
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct VenueLocation {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntitySummary>,
}

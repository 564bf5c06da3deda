use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Artist {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: Option<String>,
    pub image_link: String,
    pub facebook_link: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Every editable artist column. Used for both inserts and full overwrites.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArtistFields {
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: Option<String>,
    pub image_link: String,
    pub facebook_link: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl Artist {
    pub fn from_fields(id: i32, fields: ArtistFields) -> Self {
        Artist {
            id,
            name: fields.name,
            genres: fields.genres,
            city: fields.city,
            state: fields.state,
            phone: fields.phone,
            website: fields.website,
            image_link: fields.image_link,
            facebook_link: fields.facebook_link,
            seeking_venue: fields.seeking_venue,
            seeking_description: fields.seeking_description,
        }
    }
}

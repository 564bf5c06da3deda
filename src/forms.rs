//! Form bodies posted by the create, edit and search pages.
//!
//! Every field arrives as optional text so that a missing field is reported as
//! a validation failure rather than rejected before reaching the handler.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::error::AppError;
use crate::filters::parse_datetime;
use crate::models::{Artist, ArtistFields, NewShow, Venue, VenueFields};

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct VenueForm {
    #[validate(required(message = "name is required"))]
    pub name: Option<String>,
    #[validate(required(message = "city is required"))]
    pub city: Option<String>,
    #[validate(required(message = "state is required"))]
    pub state: Option<String>,
    #[validate(required(message = "address is required"))]
    pub address: Option<String>,
    #[validate(required(message = "phone is required"))]
    pub phone: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[validate(required(message = "facebook_link is required"))]
    pub facebook_link: Option<String>,
    #[validate(required(message = "image_link is required"))]
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: Option<String>,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ArtistForm {
    #[validate(required(message = "name is required"))]
    pub name: Option<String>,
    #[validate(required(message = "city is required"))]
    pub city: Option<String>,
    #[validate(required(message = "state is required"))]
    pub state: Option<String>,
    #[validate(required(message = "phone is required"))]
    pub phone: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[validate(required(message = "facebook_link is required"))]
    pub facebook_link: Option<String>,
    #[validate(required(message = "image_link is required"))]
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: Option<String>,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ShowForm {
    #[validate(required(message = "artist_id is required"))]
    pub artist_id: Option<String>,
    #[validate(required(message = "venue_id is required"))]
    pub venue_id: Option<String>,
    #[validate(required(message = "start_time is required"))]
    pub start_time: Option<String>,
}

// Blank and whitespace-only values count as missing.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_genres(genres: Vec<String>) -> Vec<String> {
    genres
        .into_iter()
        .filter_map(|g| clean(Some(g)))
        .collect()
}

// An unchecked checkbox is simply absent from the body.
fn checked(value: &Option<String>) -> bool {
    match value.as_deref().map(str::trim) {
        None => false,
        Some(v) => !matches!(v.to_ascii_lowercase().as_str(), "" | "n" | "false" | "off"),
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_keys()
            .map(|k| k.to_string())
            .collect();
        fields.sort();
        AppError::Validation(format!("missing required fields: {}", fields.join(", ")))
    }
}

impl VenueForm {
    /// Normalizes and validates the form into the full set of venue columns.
    pub fn into_fields(self) -> Result<VenueFields, AppError> {
        let form = VenueForm {
            name: clean(self.name),
            city: clean(self.city),
            state: clean(self.state),
            address: clean(self.address),
            phone: clean(self.phone),
            genres: clean_genres(self.genres),
            facebook_link: clean(self.facebook_link),
            image_link: clean(self.image_link),
            website: clean(self.website),
            seeking_talent: self.seeking_talent,
            seeking_description: clean(self.seeking_description),
        };
        form.validate()?;

        Ok(VenueFields {
            seeking_talent: checked(&form.seeking_talent),
            name: form.name.unwrap_or_default(),
            genres: form.genres,
            address: form.address.unwrap_or_default(),
            city: form.city.unwrap_or_default(),
            state: form.state.unwrap_or_default(),
            phone: form.phone.unwrap_or_default(),
            image_link: form.image_link.unwrap_or_default(),
            facebook_link: form.facebook_link.unwrap_or_default(),
            website: form.website,
            seeking_description: form.seeking_description,
        })
    }

    /// The submitted name as typed, for status messages.
    pub fn display_name(&self) -> String {
        self.name.as_deref().map(str::trim).unwrap_or_default().to_string()
    }
}

impl From<&Venue> for VenueForm {
    fn from(venue: &Venue) -> Self {
        VenueForm {
            name: Some(venue.name.clone()),
            city: Some(venue.city.clone()),
            state: Some(venue.state.clone()),
            address: Some(venue.address.clone()),
            phone: Some(venue.phone.clone()),
            genres: venue.genres.clone(),
            facebook_link: Some(venue.facebook_link.clone()),
            image_link: Some(venue.image_link.clone()),
            website: venue.website.clone(),
            seeking_talent: venue.seeking_talent.then(|| "y".to_string()),
            seeking_description: venue.seeking_description.clone(),
        }
    }
}

impl ArtistForm {
    /// Normalizes and validates the form into the full set of artist columns.
    pub fn into_fields(self) -> Result<ArtistFields, AppError> {
        let form = ArtistForm {
            name: clean(self.name),
            city: clean(self.city),
            state: clean(self.state),
            phone: clean(self.phone),
            genres: clean_genres(self.genres),
            facebook_link: clean(self.facebook_link),
            image_link: clean(self.image_link),
            website: clean(self.website),
            seeking_venue: self.seeking_venue,
            seeking_description: clean(self.seeking_description),
        };
        form.validate()?;

        Ok(ArtistFields {
            seeking_venue: checked(&form.seeking_venue),
            name: form.name.unwrap_or_default(),
            genres: form.genres,
            city: form.city.unwrap_or_default(),
            state: form.state.unwrap_or_default(),
            phone: form.phone.unwrap_or_default(),
            website: form.website,
            image_link: form.image_link.unwrap_or_default(),
            facebook_link: form.facebook_link.unwrap_or_default(),
            seeking_description: form.seeking_description,
        })
    }

    pub fn display_name(&self) -> String {
        self.name.as_deref().map(str::trim).unwrap_or_default().to_string()
    }
}

impl From<&Artist> for ArtistForm {
    fn from(artist: &Artist) -> Self {
        ArtistForm {
            name: Some(artist.name.clone()),
            city: Some(artist.city.clone()),
            state: Some(artist.state.clone()),
            phone: Some(artist.phone.clone()),
            genres: artist.genres.clone(),
            facebook_link: Some(artist.facebook_link.clone()),
            image_link: Some(artist.image_link.clone()),
            website: artist.website.clone(),
            seeking_venue: artist.seeking_venue.then(|| "y".to_string()),
            seeking_description: artist.seeking_description.clone(),
        }
    }
}

impl ShowForm {
    pub fn into_new_show(self) -> Result<NewShow, AppError> {
        let form = ShowForm {
            artist_id: clean(self.artist_id),
            venue_id: clean(self.venue_id),
            start_time: clean(self.start_time),
        };
        form.validate()?;

        let artist_id = parse_id("artist_id", form.artist_id.as_deref())?;
        let venue_id = parse_id("venue_id", form.venue_id.as_deref())?;
        let start_time = parse_datetime(form.start_time.as_deref().unwrap_or_default())
            .map_err(|e| AppError::Validation(format!("start_time: {e}")))?;

        Ok(NewShow { artist_id, venue_id, start_time })
    }
}

fn parse_id(field: &str, value: Option<&str>) -> Result<i32, AppError> {
    value
        .unwrap_or_default()
        .parse()
        .map_err(|_| AppError::Validation(format!("{field} must be a whole number")))
}

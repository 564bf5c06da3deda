use std::fmt::Write;

use super::{escape, layout};
use crate::flash::FlashMessage;
use crate::forms::{ArtistForm, VenueForm};

pub const GENRES: &[&str] = &[
    "Alternative", "Blues", "Classical", "Country", "Electronic", "Folk", "Funk", "Hip-Hop",
    "Heavy Metal", "Instrumental", "Jazz", "Musical Theatre", "Pop", "Punk", "R&B", "Reggae",
    "Rock n Roll", "Soul", "Other",
];

fn text_input(name: &str, label: &str, value: Option<&str>, required: bool) -> String {
    format!(
        "<label for=\"{name}\">{label}</label>\n<input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{}\"{}>\n",
        escape(value.unwrap_or_default()),
        if required { " required" } else { "" }
    )
}

fn genres_select(selected: &[String]) -> String {
    let mut out = String::from("<label for=\"genres\">Genres</label>\n<select id=\"genres\" name=\"genres\" multiple>\n");
    for genre in GENRES {
        let mark = if selected.iter().any(|g| g == genre) { " selected" } else { "" };
        let _ = writeln!(out, "<option value=\"{0}\"{mark}>{0}</option>", escape(genre));
    }
    out.push_str("</select>\n");
    out
}

fn checkbox(name: &str, label: &str, checked: bool) -> String {
    format!(
        "<label><input type=\"checkbox\" name=\"{name}\" value=\"y\"{}> {label}</label>\n",
        if checked { " checked" } else { "" }
    )
}

/// The create or edit form for a venue, posting to `action`.
pub fn venue(title: &str, action: &str, form: &VenueForm, flash: Option<&FlashMessage>) -> String {
    let mut body = format!("<h1>{}</h1>\n<form method=\"post\" action=\"{}\">\n", escape(title), escape(action));
    body.push_str(&text_input("name", "Name", form.name.as_deref(), true));
    body.push_str(&text_input("city", "City", form.city.as_deref(), true));
    body.push_str(&text_input("state", "State", form.state.as_deref(), true));
    body.push_str(&text_input("address", "Address", form.address.as_deref(), true));
    body.push_str(&text_input("phone", "Phone", form.phone.as_deref(), true));
    body.push_str(&genres_select(&form.genres));
    body.push_str(&text_input("facebook_link", "Facebook Link", form.facebook_link.as_deref(), true));
    body.push_str(&text_input("image_link", "Image Link", form.image_link.as_deref(), true));
    body.push_str(&text_input("website", "Website", form.website.as_deref(), false));
    body.push_str(&checkbox("seeking_talent", "Seeking talent", form.seeking_talent.is_some()));
    body.push_str(&text_input("seeking_description", "Seeking Description", form.seeking_description.as_deref(), false));
    body.push_str("<button type=\"submit\">Save</button>\n</form>\n");
    layout(title, flash, &body)
}

/// The create or edit form for an artist, posting to `action`.
pub fn artist(title: &str, action: &str, form: &ArtistForm, flash: Option<&FlashMessage>) -> String {
    let mut body = format!("<h1>{}</h1>\n<form method=\"post\" action=\"{}\">\n", escape(title), escape(action));
    body.push_str(&text_input("name", "Name", form.name.as_deref(), true));
    body.push_str(&text_input("city", "City", form.city.as_deref(), true));
    body.push_str(&text_input("state", "State", form.state.as_deref(), true));
    body.push_str(&text_input("phone", "Phone", form.phone.as_deref(), true));
    body.push_str(&genres_select(&form.genres));
    body.push_str(&text_input("facebook_link", "Facebook Link", form.facebook_link.as_deref(), true));
    body.push_str(&text_input("image_link", "Image Link", form.image_link.as_deref(), true));
    body.push_str(&text_input("website", "Website", form.website.as_deref(), false));
    body.push_str(&checkbox("seeking_venue", "Seeking venue", form.seeking_venue.is_some()));
    body.push_str(&text_input("seeking_description", "Seeking Description", form.seeking_description.as_deref(), false));
    body.push_str("<button type=\"submit\">Save</button>\n</form>\n");
    layout(title, flash, &body)
}

pub fn show(flash: Option<&FlashMessage>) -> String {
    let mut body = String::from("<h1>List a new show</h1>\n<form method=\"post\" action=\"/shows/create\">\n");
    body.push_str(&text_input("artist_id", "Artist ID", None, true));
    body.push_str(&text_input("venue_id", "Venue ID", None, true));
    body.push_str(
        "<label for=\"start_time\">Start Time</label>\n<input type=\"datetime-local\" id=\"start_time\" name=\"start_time\" required>\n",
    );
    body.push_str("<button type=\"submit\">Create Show</button>\n</form>\n");
    layout("New Show", flash, &body)
}

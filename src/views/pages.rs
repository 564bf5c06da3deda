use std::fmt::Write;

use super::{escape, genre_list, layout, optional_link};
use crate::filters::format_datetime;
use crate::flash::FlashMessage;
use crate::models::{EntitySummary, VenueArea};
use crate::queries::{ArtistDetail, SearchResults, ShowListingEntry, VenueDetail};

pub fn home(flash: Option<&FlashMessage>) -> String {
    layout(
        "Home",
        flash,
        r#"<h1>Fyyur</h1>
<p>Find venues, artists and the shows that bring them together.</p>
<ul class="actions">
<li><a href="/venues/create">Post a venue</a></li>
<li><a href="/artists/create">Post an artist</a></li>
<li><a href="/shows/create">Post a show</a></li>
</ul>
"#,
    )
}

fn entity_list(base: &str, items: &[EntitySummary]) -> String {
    let mut out = String::from("<ul class=\"items\">\n");
    for item in items {
        let _ = writeln!(
            out,
            r#"<li><a href="/{base}/{}">{}</a></li>"#,
            item.id,
            escape(&item.name)
        );
    }
    out.push_str("</ul>\n");
    out
}

pub fn venues(areas: &[VenueArea], flash: Option<&FlashMessage>) -> String {
    let mut body = String::from("<h1>Venues</h1>\n");
    for area in areas {
        let _ = writeln!(
            body,
            r#"<h3 class="area">{}, {}</h3>"#,
            escape(&area.city),
            escape(&area.state)
        );
        body.push_str(&entity_list("venues", &area.venues));
    }
    layout("Venues", flash, &body)
}

pub fn artists(artists: &[EntitySummary], flash: Option<&FlashMessage>) -> String {
    let body = format!("<h1>Artists</h1>\n{}", entity_list("artists", artists));
    layout("Artists", flash, &body)
}

/// Search results for `kind`, which is either `venues` or `artists`.
pub fn search(
    kind: &str,
    search_term: &str,
    results: &SearchResults,
    flash: Option<&FlashMessage>,
) -> String {
    let mut body = String::new();
    let _ = writeln!(
        body,
        r#"<h3>Number of search results for "{}": <span class="count">{}</span></h3>"#,
        escape(search_term),
        results.count
    );
    body.push_str(&entity_list(kind, &results.data));
    layout("Search", flash, &body)
}

fn shows_section<T>(heading: &str, count: usize, shows: &[T], render: impl Fn(&T) -> String) -> String {
    let mut out = format!("<section>\n<h2>{count} {heading}</h2>\n<ul class=\"shows\">\n");
    for show in shows {
        out.push_str(&render(show));
    }
    out.push_str("</ul>\n</section>\n");
    out
}

fn seeking(flag: bool, what: &str, description: Option<&str>) -> String {
    if flag {
        format!(
            "<p class=\"seeking\">Currently seeking {what}: {}</p>\n",
            escape(description.unwrap_or_default())
        )
    } else {
        format!("<p class=\"not-seeking\">Not currently seeking {what}</p>\n")
    }
}

pub fn venue(detail: &VenueDetail, flash: Option<&FlashMessage>) -> String {
    let venue = &detail.venue;
    let mut body = String::new();
    let _ = write!(
        body,
        r#"<h1>{name}</h1>
<p class="subtitle">ID: {id}</p>
{genres}
<p>{address}</p>
<p>{city}, {state}</p>
<p>{phone}</p>
{website}{facebook}{seeking}<img src="{image}" alt="Venue image">
<p><a href="/venues/{id}/edit">Edit</a></p>
<button type="button" data-venue-id="{id}" onclick="fetch('/venues/{id}', {{method: 'DELETE'}}).then(() => window.location = '/venues')">Delete</button>
"#,
        name = escape(&venue.name),
        id = venue.id,
        genres = genre_list(&venue.genres),
        address = escape(&venue.address),
        city = escape(&venue.city),
        state = escape(&venue.state),
        phone = escape(&venue.phone),
        website = optional_link("Website", venue.website.as_deref()),
        facebook = optional_link("Facebook", Some(&venue.facebook_link)),
        seeking = seeking(venue.seeking_talent, "talent", venue.seeking_description.as_deref()),
        image = escape(&venue.image_link),
    );

    let render = |show: &crate::queries::VenueShowEntry| {
        format!(
            "<li><img src=\"{}\" alt=\"Artist image\"><a href=\"/artists/{}\">{}</a> <time>{}</time></li>\n",
            escape(&show.artist_image_link),
            show.artist_id,
            escape(&show.artist_name),
            escape(&show.start_time)
        )
    };
    body.push_str(&shows_section("Upcoming Shows", detail.upcoming_shows_count, &detail.upcoming_shows, render));
    body.push_str(&shows_section("Past Shows", detail.past_shows_count, &detail.past_shows, render));

    layout(&venue.name, flash, &body)
}

pub fn artist(detail: &ArtistDetail, flash: Option<&FlashMessage>) -> String {
    let artist = &detail.artist;
    let mut body = String::new();
    let _ = write!(
        body,
        r#"<h1>{name}</h1>
<p class="subtitle">ID: {id}</p>
{genres}
<p>{city}, {state}</p>
<p>{phone}</p>
{website}{facebook}{seeking}<img src="{image}" alt="Artist image">
<p><a href="/artists/{id}/edit">Edit</a></p>
"#,
        name = escape(&artist.name),
        id = artist.id,
        genres = genre_list(&artist.genres),
        city = escape(&artist.city),
        state = escape(&artist.state),
        phone = escape(&artist.phone),
        website = optional_link("Website", artist.website.as_deref()),
        facebook = optional_link("Facebook", Some(&artist.facebook_link)),
        seeking = seeking(artist.seeking_venue, "performance venues", artist.seeking_description.as_deref()),
        image = escape(&artist.image_link),
    );

    let render = |show: &crate::queries::ArtistShowEntry| {
        format!(
            "<li><img src=\"{}\" alt=\"Venue image\"><a href=\"/venues/{}\">{}</a> <time>{}</time></li>\n",
            escape(&show.venue_image_link),
            show.venue_id,
            escape(&show.venue_name),
            escape(&show.start_time)
        )
    };
    body.push_str(&shows_section("Upcoming Shows", detail.upcoming_shows_count, &detail.upcoming_shows, render));
    body.push_str(&shows_section("Past Shows", detail.past_shows_count, &detail.past_shows, render));

    layout(&artist.name, flash, &body)
}

pub fn shows(shows: &[ShowListingEntry], flash: Option<&FlashMessage>) -> String {
    let mut body = String::from("<h1>Shows</h1>\n<ul class=\"shows\">\n");
    for show in shows {
        let when = format_datetime(&show.start_time, "full").unwrap_or_else(|_| show.start_time.clone());
        let _ = writeln!(
            body,
            r#"<li><img src="{}" alt="Artist image"><time>{}</time> <a href="/artists/{}">{}</a> playing at <a href="/venues/{}">{}</a></li>"#,
            escape(&show.artist_image_link),
            escape(&when),
            show.artist_id,
            escape(&show.artist_name),
            show.venue_id,
            escape(&show.venue_name)
        );
    }
    body.push_str("</ul>\n");
    layout("Shows", flash, &body)
}

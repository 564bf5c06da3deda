#![allow(dead_code)]

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use chrono::NaiveDateTime;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use venue_booking::{
    app,
    config::Config,
    database::contains_pattern,
    models::{
        Artist, ArtistFields, ArtistShow, EntitySummary, NewShow, Show, ShowListing, Venue,
        VenueFields, VenueLocation, VenueShow,
    },
    store::{Store, StoreError, StoreResult},
    AppState,
};

/// In-process store with the same observable behavior as the Postgres one.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    fail_writes: AtomicBool,
}

#[derive(Default)]
struct Inner {
    venues: Vec<Venue>,
    artists: Vec<Artist>,
    shows: Vec<Show>,
    venue_seq: i32,
    artist_seq: i32,
    show_seq: i32,
}

impl MemoryStore {
    /// Makes every subsequent write fail as if the database were unreachable.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn venues(&self) -> Vec<Venue> {
        self.inner.lock().unwrap().venues.clone()
    }

    pub fn artists_snapshot(&self) -> Vec<Artist> {
        self.inner.lock().unwrap().artists.clone()
    }

    pub fn shows_snapshot(&self) -> Vec<Show> {
        self.inner.lock().unwrap().shows.clone()
    }

    fn check_writable(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

// Same semantics as `name ILIKE contains_pattern(term)` in Postgres.
fn matches_name(name: &str, term: &str) -> bool {
    let pattern: Vec<char> = contains_pattern(term).to_lowercase().chars().collect();
    let text: Vec<char> = name.to_lowercase().chars().collect();
    like(&pattern, &text)
}

fn like(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some((&'%', rest)) => (0..=text.len()).any(|i| like(rest, &text[i..])),
        Some((&'_', rest)) => !text.is_empty() && like(rest, &text[1..]),
        Some((&'\\', rest)) => match rest.split_first() {
            Some((c, rest)) => text.first() == Some(c) && like(rest, &text[1..]),
            None => false,
        },
        Some((c, rest)) => text.first() == Some(c) && like(rest, &text[1..]),
    }
}

impl Store for MemoryStore {
    async fn venue_locations(&self) -> StoreResult<Vec<VenueLocation>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .venues
            .iter()
            .map(|v| VenueLocation {
                id: v.id,
                name: v.name.clone(),
                city: v.city.clone(),
                state: v.state.clone(),
            })
            .collect())
    }

    async fn search_venues(&self, term: &str) -> StoreResult<Vec<EntitySummary>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .venues
            .iter()
            .filter(|v| matches_name(&v.name, term))
            .map(|v| EntitySummary { id: v.id, name: v.name.clone() })
            .collect())
    }

    async fn venue(&self, id: i32) -> StoreResult<Option<Venue>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.venues.iter().find(|v| v.id == id).cloned())
    }

    async fn venue_shows(&self, venue_id: i32) -> StoreResult<Vec<VenueShow>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .shows
            .iter()
            .filter(|s| s.venue_id == venue_id)
            .filter_map(|s| {
                inner.artists.iter().find(|a| a.id == s.artist_id).map(|a| VenueShow {
                    artist_id: a.id,
                    artist_name: a.name.clone(),
                    artist_image_link: a.image_link.clone(),
                    start_time: s.start_time,
                })
            })
            .collect())
    }

    async fn insert_venue(&self, fields: VenueFields) -> StoreResult<i32> {
        self.check_writable()?;
        let mut inner = self.inner.lock().unwrap();
        inner.venue_seq += 1;
        let id = inner.venue_seq;
        inner.venues.push(Venue::from_fields(id, fields));
        Ok(id)
    }

    async fn update_venue(&self, id: i32, fields: VenueFields) -> StoreResult<bool> {
        self.check_writable()?;
        let mut inner = self.inner.lock().unwrap();
        match inner.venues.iter_mut().find(|v| v.id == id) {
            Some(venue) => {
                *venue = Venue::from_fields(id, fields);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_venue(&self, id: i32) -> StoreResult<u64> {
        self.check_writable()?;
        let mut inner = self.inner.lock().unwrap();
        if inner.shows.iter().any(|s| s.venue_id == id) {
            return Err(StoreError::Constraint(format!("venue {id} still has shows")));
        }
        let before = inner.venues.len();
        inner.venues.retain(|v| v.id != id);
        Ok((before - inner.venues.len()) as u64)
    }

    async fn artists(&self) -> StoreResult<Vec<EntitySummary>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .artists
            .iter()
            .map(|a| EntitySummary { id: a.id, name: a.name.clone() })
            .collect())
    }

    async fn search_artists(&self, term: &str) -> StoreResult<Vec<EntitySummary>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .artists
            .iter()
            .filter(|a| matches_name(&a.name, term))
            .map(|a| EntitySummary { id: a.id, name: a.name.clone() })
            .collect())
    }

    async fn artist(&self, id: i32) -> StoreResult<Option<Artist>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.artists.iter().find(|a| a.id == id).cloned())
    }

    async fn artist_shows(&self, artist_id: i32) -> StoreResult<Vec<ArtistShow>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .shows
            .iter()
            .filter(|s| s.artist_id == artist_id)
            .filter_map(|s| {
                inner.venues.iter().find(|v| v.id == s.venue_id).map(|v| ArtistShow {
                    venue_id: v.id,
                    venue_name: v.name.clone(),
                    venue_image_link: v.image_link.clone(),
                    start_time: s.start_time,
                })
            })
            .collect())
    }

    async fn insert_artist(&self, fields: ArtistFields) -> StoreResult<i32> {
        self.check_writable()?;
        let mut inner = self.inner.lock().unwrap();
        inner.artist_seq += 1;
        let id = inner.artist_seq;
        inner.artists.push(Artist::from_fields(id, fields));
        Ok(id)
    }

    async fn update_artist(&self, id: i32, fields: ArtistFields) -> StoreResult<bool> {
        self.check_writable()?;
        let mut inner = self.inner.lock().unwrap();
        match inner.artists.iter_mut().find(|a| a.id == id) {
            Some(artist) => {
                *artist = Artist::from_fields(id, fields);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn shows(&self) -> StoreResult<Vec<ShowListing>> {
        let inner = self.inner.lock().unwrap();
        let mut rows = Vec::new();
        for artist in &inner.artists {
            for show in inner.shows.iter().filter(|s| s.artist_id == artist.id) {
                if let Some(venue) = inner.venues.iter().find(|v| v.id == show.venue_id) {
                    rows.push(ShowListing {
                        artist_id: artist.id,
                        artist_name: artist.name.clone(),
                        artist_image_link: artist.image_link.clone(),
                        venue_id: venue.id,
                        venue_name: venue.name.clone(),
                        start_time: show.start_time,
                    });
                }
            }
        }
        Ok(rows)
    }

    async fn insert_show(&self, show: NewShow) -> StoreResult<i32> {
        self.check_writable()?;
        let mut inner = self.inner.lock().unwrap();
        if !inner.artists.iter().any(|a| a.id == show.artist_id) {
            return Err(StoreError::Constraint(format!("artist {} does not exist", show.artist_id)));
        }
        if !inner.venues.iter().any(|v| v.id == show.venue_id) {
            return Err(StoreError::Constraint(format!("venue {} does not exist", show.venue_id)));
        }
        inner.show_seq += 1;
        let id = inner.show_seq;
        inner.shows.push(Show {
            id,
            artist_id: show.artist_id,
            venue_id: show.venue_id,
            start_time: show.start_time,
        });
        Ok(id)
    }
}

pub fn test_config() -> Config {
    Config::from_lookup(|key| (key == "DATABASE_URL").then(|| "postgres://unused/fyyur".to_string()))
        .expect("test config")
}

pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState<MemoryStore>>,
}

impl TestApp {
    pub fn new() -> Self {
        let state = AppState::new(MemoryStore::default(), test_config());
        let server = TestServer::new(app(state.clone())).expect("test server");
        TestApp { server, state }
    }

    pub fn store(&self) -> &MemoryStore {
        &self.state.store
    }

    pub async fn seed_venue(&self, name: &str, city: &str, state: &str) -> i32 {
        self.store()
            .insert_venue(VenueFields {
                name: name.to_string(),
                genres: vec!["Jazz".to_string()],
                address: "1015 Folsom Street".to_string(),
                city: city.to_string(),
                state: state.to_string(),
                phone: "123-123-1234".to_string(),
                image_link: format!("https://img.example/{}.png", name.len()),
                facebook_link: "https://www.facebook.com/venue".to_string(),
                ..Default::default()
            })
            .await
            .unwrap()
    }

    pub async fn seed_artist(&self, name: &str) -> i32 {
        self.store()
            .insert_artist(ArtistFields {
                name: name.to_string(),
                genres: vec!["Rock n Roll".to_string()],
                city: "San Francisco".to_string(),
                state: "CA".to_string(),
                phone: "326-123-5000".to_string(),
                image_link: format!("https://img.example/artist-{}.png", name.len()),
                facebook_link: "https://www.facebook.com/artist".to_string(),
                ..Default::default()
            })
            .await
            .unwrap()
    }

    pub async fn seed_show(&self, artist_id: i32, venue_id: i32, start_time: NaiveDateTime) -> i32 {
        self.store()
            .insert_show(NewShow { artist_id, venue_id, start_time })
            .await
            .unwrap()
    }
}

pub fn venue_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Grand Hall"),
        ("city", "San Francisco"),
        ("state", "CA"),
        ("address", "1015 Folsom Street"),
        ("phone", "123-123-1234"),
        ("genres", "Jazz"),
        ("genres", "Folk"),
        ("facebook_link", "https://www.facebook.com/grandhall"),
        ("image_link", "https://img.example/hall.png"),
    ]
}

pub fn artist_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Guns N Petals"),
        ("city", "San Francisco"),
        ("state", "CA"),
        ("phone", "326-123-5000"),
        ("genres", "Rock n Roll"),
        ("facebook_link", "https://www.facebook.com/GunsNPetals"),
        ("image_link", "https://img.example/gnp.png"),
    ]
}

pub fn without(form: Vec<(&'static str, &'static str)>, field: &str) -> Vec<(&'static str, &'static str)> {
    form.into_iter().filter(|(k, _)| *k != field).collect()
}

pub fn cookie_header(name: &str, value: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("cookie"),
        HeaderValue::from_str(&format!("{name}={value}")).unwrap(),
    )
}

/// The value of a cookie set by the response, if any.
pub fn set_cookie_value(response: &axum_test::TestResponse, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&prefix))
        .map(|v| v[prefix.len()..].split(';').next().unwrap_or_default().to_string())
}

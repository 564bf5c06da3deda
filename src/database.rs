use sqlx::{postgres::PgPoolOptions, Pool, Postgres, Transaction};
use std::time::Duration;
use tracing::info;

use crate::models::{
    Artist, ArtistFields, ArtistShow, EntitySummary, NewShow, ShowListing, Venue, VenueFields,
    VenueLocation, VenueShow,
};
use crate::store::{Store, StoreError, StoreResult};

#[derive(Clone)]
pub struct Database {
    pub pool: Pool<Postgres>,
}

impl Database {
    pub async fn new(database_url: &str, pool_size: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        Ok(Database { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("./src/migrations")
            .run(&self.pool)
            .await?;
        info!("Migrations completed");
        Ok(())
    }
}

/// Builds an ILIKE pattern that matches `term` literally anywhere in the column.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// Foreign key violations are reported separately from other failures.
fn classify(err: sqlx::Error) -> StoreError {
    match err.as_database_error() {
        Some(db_err) if db_err.is_foreign_key_violation() => {
            StoreError::Constraint(db_err.message().to_string())
        }
        _ => StoreError::Database(err),
    }
}

// Commits a successful write; otherwise rolls back and reports the failure.
async fn finish<T>(tx: Transaction<'_, Postgres>, result: Result<T, sqlx::Error>) -> StoreResult<T> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(e) => {
            let _ = tx.rollback().await;
            Err(classify(e))
        }
    }
}

impl Store for Database {
    async fn venue_locations(&self) -> StoreResult<Vec<VenueLocation>> {
        let rows = sqlx::query_as::<_, VenueLocation>(
            "SELECT id, name, city, state FROM venues ORDER BY id"
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn search_venues(&self, term: &str) -> StoreResult<Vec<EntitySummary>> {
        let rows = sqlx::query_as::<_, EntitySummary>(
            "SELECT id, name FROM venues WHERE name ILIKE $1 ORDER BY id"
        )
        .bind(contains_pattern(term))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn venue(&self, id: i32) -> StoreResult<Option<Venue>> {
        let venue = sqlx::query_as::<_, Venue>(
            r#"
            SELECT id, name, genres, address, city, state, phone, image_link,
                   facebook_link, website, seeking_talent, seeking_description
            FROM venues
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(venue)
    }

    async fn venue_shows(&self, venue_id: i32) -> StoreResult<Vec<VenueShow>> {
        let rows = sqlx::query_as::<_, VenueShow>(
            r#"
            SELECT a.id AS artist_id, a.name AS artist_name,
                   a.image_link AS artist_image_link, s.start_time
            FROM shows s
            JOIN artists a ON a.id = s.artist_id
            WHERE s.venue_id = $1
            ORDER BY s.start_time, s.id
            "#
        )
        .bind(venue_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_venue(&self, fields: VenueFields) -> StoreResult<i32> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO venues (name, genres, address, city, state, phone, image_link,
                                facebook_link, website, seeking_talent, seeking_description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#
        )
        .bind(&fields.name)
        .bind(&fields.genres)
        .bind(&fields.address)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.phone)
        .bind(&fields.image_link)
        .bind(&fields.facebook_link)
        .bind(&fields.website)
        .bind(fields.seeking_talent)
        .bind(&fields.seeking_description)
        .fetch_one(&mut *tx)
        .await;

        finish(tx, inserted).await
    }

    async fn update_venue(&self, id: i32, fields: VenueFields) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE venues
            SET name = $2, genres = $3, address = $4, city = $5, state = $6, phone = $7,
                image_link = $8, facebook_link = $9, website = $10, seeking_talent = $11,
                seeking_description = $12
            WHERE id = $1
            "#
        )
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.genres)
        .bind(&fields.address)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.phone)
        .bind(&fields.image_link)
        .bind(&fields.facebook_link)
        .bind(&fields.website)
        .bind(fields.seeking_talent)
        .bind(&fields.seeking_description)
        .execute(&mut *tx)
        .await;

        finish(tx, updated).await.map(|result| result.rows_affected() > 0)
    }

    async fn delete_venue(&self, id: i32) -> StoreResult<u64> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await;

        finish(tx, deleted).await.map(|result| result.rows_affected())
    }

    async fn artists(&self) -> StoreResult<Vec<EntitySummary>> {
        let rows = sqlx::query_as::<_, EntitySummary>("SELECT id, name FROM artists ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn search_artists(&self, term: &str) -> StoreResult<Vec<EntitySummary>> {
        let rows = sqlx::query_as::<_, EntitySummary>(
            "SELECT id, name FROM artists WHERE name ILIKE $1 ORDER BY id"
        )
        .bind(contains_pattern(term))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn artist(&self, id: i32) -> StoreResult<Option<Artist>> {
        let artist = sqlx::query_as::<_, Artist>(
            r#"
            SELECT id, name, genres, city, state, phone, website, image_link,
                   facebook_link, seeking_venue, seeking_description
            FROM artists
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(artist)
    }

    async fn artist_shows(&self, artist_id: i32) -> StoreResult<Vec<ArtistShow>> {
        let rows = sqlx::query_as::<_, ArtistShow>(
            r#"
            SELECT v.id AS venue_id, v.name AS venue_name,
                   v.image_link AS venue_image_link, s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            WHERE s.artist_id = $1
            ORDER BY s.start_time, s.id
            "#
        )
        .bind(artist_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_artist(&self, fields: ArtistFields) -> StoreResult<i32> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO artists (name, genres, city, state, phone, website, image_link,
                                 facebook_link, seeking_venue, seeking_description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#
        )
        .bind(&fields.name)
        .bind(&fields.genres)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.phone)
        .bind(&fields.website)
        .bind(&fields.image_link)
        .bind(&fields.facebook_link)
        .bind(fields.seeking_venue)
        .bind(&fields.seeking_description)
        .fetch_one(&mut *tx)
        .await;

        finish(tx, inserted).await
    }

    async fn update_artist(&self, id: i32, fields: ArtistFields) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE artists
            SET name = $2, genres = $3, city = $4, state = $5, phone = $6, website = $7,
                image_link = $8, facebook_link = $9, seeking_venue = $10,
                seeking_description = $11
            WHERE id = $1
            "#
        )
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.genres)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.phone)
        .bind(&fields.website)
        .bind(&fields.image_link)
        .bind(&fields.facebook_link)
        .bind(fields.seeking_venue)
        .bind(&fields.seeking_description)
        .execute(&mut *tx)
        .await;

        finish(tx, updated).await.map(|result| result.rows_affected() > 0)
    }

    async fn shows(&self) -> StoreResult<Vec<ShowListing>> {
        let rows = sqlx::query_as::<_, ShowListing>(
            r#"
            SELECT a.id AS artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
                   v.id AS venue_id, v.name AS venue_name, s.start_time
            FROM artists a
            JOIN shows s ON s.artist_id = a.id
            JOIN venues v ON v.id = s.venue_id
            ORDER BY a.id, s.id
            "#
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_show(&self, show: NewShow) -> StoreResult<i32> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_scalar::<_, i32>(
            "INSERT INTO shows (artist_id, venue_id, start_time) VALUES ($1, $2, $3) RETURNING id"
        )
        .bind(show.artist_id)
        .bind(show.venue_id)
        .bind(show.start_time)
        .fetch_one(&mut *tx)
        .await;

        finish(tx, inserted).await
    }
}

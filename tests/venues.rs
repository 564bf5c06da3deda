mod common;

use axum::http::StatusCode;
use chrono::{Duration, Local};
use serde_json::{json, Value};

use common::{cookie_header, set_cookie_value, venue_form, without, TestApp};
use venue_booking::flash::{FlashLevel, FlashMessage};

#[tokio::test]
async fn create_venue_lists_exactly_one_row() {
    let app = TestApp::new();

    let response = app.server.post("/venues/create").form(&venue_form()).await;

    response.assert_status(StatusCode::CREATED);
    assert!(response.text().contains("Venue Grand Hall was successfully listed!"));

    let venues = app.store().venues();
    assert_eq!(venues.len(), 1);
    assert_eq!(venues[0].name, "Grand Hall");
    assert_eq!(venues[0].genres, vec!["Jazz", "Folk"]);
    assert!(!venues[0].seeking_talent);
}

#[tokio::test]
async fn create_venue_without_address_is_rejected() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/venues/create")
        .form(&without(venue_form(), "address"))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response
        .text()
        .contains("An error occurred. Venue Grand Hall could not be listed."));
    assert!(app.store().venues().is_empty());
}

#[tokio::test]
async fn create_venue_reports_store_failure() {
    let app = TestApp::new();
    app.store().fail_writes();

    let response = app.server.post("/venues/create").form(&venue_form()).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response
        .text()
        .contains("An error occurred. Venue Grand Hall could not be listed."));
    assert!(app.store().venues().is_empty());
}

#[tokio::test]
async fn venues_are_listed_by_area() {
    let app = TestApp::new();
    app.seed_venue("The Musical Hop", "San Francisco", "CA").await;
    app.seed_venue("The Dueling Pianos Bar", "New York", "NY").await;
    app.seed_venue("Park Square Live Music & Coffee", "San Francisco", "CA").await;

    let response = app.server.get("/venues").await;

    response.assert_status_ok();
    let html = response.text();
    assert_eq!(html.matches("San Francisco, CA").count(), 1);
    assert_eq!(html.matches("New York, NY").count(), 1);
    assert!(html.contains("Park Square Live Music &amp; Coffee"));
    let sf = html.find("San Francisco, CA").unwrap();
    let ny = html.find("New York, NY").unwrap();
    assert!(sf < ny);
}

#[tokio::test]
async fn empty_search_term_matches_every_venue() {
    let app = TestApp::new();
    app.seed_venue("Grand Hall", "San Francisco", "CA").await;
    app.seed_venue("The Dueling Pianos Bar", "New York", "NY").await;

    let response = app
        .server
        .post("/venues/search")
        .form(&[("search_term", "")])
        .await;

    response.assert_status_ok();
    assert!(response.text().contains(r#"<span class="count">2</span>"#));
}

#[tokio::test]
async fn venue_search_ignores_case() {
    let app = TestApp::new();
    let hall = app.seed_venue("Grand Hall", "San Francisco", "CA").await;
    app.seed_venue("The Dueling Pianos Bar", "New York", "NY").await;

    let response = app
        .server
        .post("/venues/search")
        .form(&[("search_term", "hall")])
        .await;

    let html = response.text();
    assert!(html.contains(r#"<span class="count">1</span>"#));
    assert!(html.contains(&format!(r#"<a href="/venues/{hall}">Grand Hall</a>"#)));
}

#[tokio::test]
async fn venue_search_without_matches_is_empty() {
    let app = TestApp::new();
    app.seed_venue("Grand Hall", "San Francisco", "CA").await;

    let response = app
        .server
        .post("/venues/search")
        .form(&[("search_term", "zzz")])
        .await;

    let html = response.text();
    assert!(html.contains(r#"for "zzz": <span class="count">0</span>"#));
    assert!(!html.contains("/venues/1\""));
}

#[tokio::test]
async fn venue_page_splits_past_and_upcoming_shows() {
    let app = TestApp::new();
    let venue = app.seed_venue("The Musical Hop", "San Francisco", "CA").await;
    let artist = app.seed_artist("Guns N Petals").await;
    let now = Local::now().naive_local();
    app.seed_show(artist, venue, now - Duration::hours(1)).await;
    app.seed_show(artist, venue, now + Duration::hours(1)).await;

    let response = app.server.get(&format!("/venues/{venue}")).await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("<h2>1 Upcoming Shows</h2>"));
    assert!(html.contains("<h2>1 Past Shows</h2>"));
    assert_eq!(html.matches("Guns N Petals").count(), 2);
}

#[tokio::test]
async fn missing_venue_is_not_found() {
    let app = TestApp::new();

    app.server.get("/venues/41").await.assert_status_not_found();
    app.server.get("/venues/forty-one").await.assert_status_not_found();
    app.server.get("/venues/41/edit").await.assert_status_not_found();
}

#[tokio::test]
async fn edit_form_is_prefilled() {
    let app = TestApp::new();
    let venue = app.seed_venue("The Musical Hop", "San Francisco", "CA").await;

    let response = app.server.get(&format!("/venues/{venue}/edit")).await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains(r#"value="The Musical Hop""#));
    assert!(html.contains(r#"<option value="Jazz" selected>"#));
}

#[tokio::test]
async fn edit_overwrites_every_field() {
    let app = TestApp::new();
    let venue = app.seed_venue("The Musical Hop", "San Francisco", "CA").await;

    let form = without(venue_form(), "genres");
    let response = app.server.post(&format!("/venues/{venue}/edit")).form(&form).await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), format!("/venues/{venue}").as_str());

    let flash = set_cookie_value(&response, "_flash").and_then(|v| FlashMessage::decode(&v));
    assert_eq!(
        flash,
        Some(FlashMessage::success("Venue Grand Hall was successfully updated!"))
    );

    let venues = app.store().venues();
    assert_eq!(venues[0].name, "Grand Hall");
    assert!(venues[0].genres.is_empty());
}

#[tokio::test]
async fn editing_unknown_venue_flashes_failure() {
    let app = TestApp::new();

    let response = app.server.post("/venues/12/edit").form(&venue_form()).await;

    response.assert_status(StatusCode::SEE_OTHER);
    let flash = set_cookie_value(&response, "_flash")
        .and_then(|v| FlashMessage::decode(&v))
        .unwrap();
    assert_eq!(flash.level, FlashLevel::Error);
    assert_eq!(flash.message, "An error occurred. Venue Grand Hall could not be updated.");
}

#[tokio::test]
async fn flash_is_shown_once_then_cleared() {
    let app = TestApp::new();
    let venue = app.seed_venue("The Musical Hop", "San Francisco", "CA").await;
    let encoded = FlashMessage::success("Venue Grand Hall was successfully updated!").encode();
    let (name, value) = cookie_header("_flash", &encoded);

    let response = app
        .server
        .get(&format!("/venues/{venue}"))
        .add_header(name, value)
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("Venue Grand Hall was successfully updated!"));
    assert_eq!(set_cookie_value(&response, "_flash").as_deref(), Some(""));
}

#[tokio::test]
async fn deleting_unknown_venue_changes_nothing() {
    let app = TestApp::new();
    app.seed_venue("The Musical Hop", "San Francisco", "CA").await;

    let response = app.server.delete("/venues/99").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["deleted"], 0);
    assert_eq!(app.store().venues().len(), 1);
}

#[tokio::test]
async fn deleting_venue_removes_it() {
    let app = TestApp::new();
    let venue = app.seed_venue("The Musical Hop", "San Francisco", "CA").await;

    let response = app.server.delete(&format!("/venues/{venue}")).await;

    let body: Value = response.json();
    assert_eq!(body["deleted"], 1);
    assert!(app.store().venues().is_empty());
    app.server
        .get(&format!("/venues/{venue}"))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn deleting_venue_with_shows_is_rolled_back() {
    let app = TestApp::new();
    let venue = app.seed_venue("The Musical Hop", "San Francisco", "CA").await;
    let artist = app.seed_artist("Guns N Petals").await;
    app.seed_show(artist, venue, Local::now().naive_local()).await;

    let response = app.server.delete(&format!("/venues/{venue}")).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(app.store().venues().len(), 1);
}

#[tokio::test]
async fn repeated_name_fails_the_listing() {
    let app = TestApp::new();
    let mut form = venue_form();
    form.push(("name", "Second Name"));

    let response = app.server.post("/venues/create").form(&form).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let html = response.text();
    assert!(html.contains("<h1>Fyyur</h1>"));
    assert!(html.contains("An error occurred. Venue could not be listed."));
    assert!(app.store().venues().is_empty());
}

#[tokio::test]
async fn json_body_fails_the_listing() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/venues/create")
        .json(&json!({ "name": "Grand Hall" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let html = response.text();
    assert!(html.contains(r#"<div class="flash error""#));
    assert!(html.contains("An error occurred. Venue could not be listed."));
    assert!(app.store().venues().is_empty());
}

#[tokio::test]
async fn unnamed_venue_message_has_no_gap() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/venues/create")
        .form(&without(venue_form(), "name"))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let html = response.text();
    assert!(html.contains("An error occurred. Venue could not be listed."));
    assert!(!html.contains("Venue  could"));
}

#[tokio::test]
async fn undecodable_venue_edit_still_redirects() {
    let app = TestApp::new();
    let venue = app.seed_venue("The Musical Hop", "San Francisco", "CA").await;
    let mut form = venue_form();
    form.push(("state", "NY"));

    let response = app.server.post(&format!("/venues/{venue}/edit")).form(&form).await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), format!("/venues/{venue}").as_str());
    let flash = set_cookie_value(&response, "_flash")
        .and_then(|v| FlashMessage::decode(&v))
        .unwrap();
    assert_eq!(flash, FlashMessage::error("An error occurred. Venue could not be updated."));
    assert_eq!(app.store().venues()[0].name, "The Musical Hop");
}

#[tokio::test]
async fn undecodable_search_gets_the_error_page() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/venues/search")
        .json(&json!({ "search_term": "hall" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().contains("<h1>Invalid request</h1>"));
}

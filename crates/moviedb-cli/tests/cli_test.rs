#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::path::Path;

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::{PredicateBooleanExt, predicate};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const POPULAR_PAGE1: &str = include_str!("../../../fixtures/tmdb/popular_page1.json");
const TRENDING_DAY: &str = include_str!("../../../fixtures/tmdb/trending_day.json");
const MOVIE_27205: &str = include_str!("../../../fixtures/tmdb/movie_details_27205.json");
const INVALID_API_KEY: &str = include_str!("../../../fixtures/tmdb/error_invalid_api_key.json");

/// Writes a config pointing the client at `server`.
fn write_config(dir: &Path, server: &MockServer) {
    std::fs::write(
        dir.join("config.toml"),
        format!("[tmdb]\nbase_url = \"{}/3/\"\n", server.uri()),
    )
    .unwrap();
}

/// `moviedb` with a fixed key and plain log output.
fn moviedb(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("moviedb");
    cmd.arg("--dir")
        .arg(dir)
        .env("TMDB_API_KEY", "test-key")
        .env("RUST_LOG", "info")
        .env("NO_COLOR", "1");
    cmd
}

fn json(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_raw(body.as_bytes().to_vec(), "application/json")
}

#[test]
fn test_help_lists_subcommands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedb");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("top-rated"))
        .stdout(predicate::str::contains("browse"));
}

#[test]
fn test_search_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedb");
    cmd.args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--query"));
}

#[test]
fn test_search_missing_query() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedb");
    cmd.arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--query"));
}

#[test]
fn test_movie_missing_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedb");
    cmd.arg("movie")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--id"));
}

#[test]
fn test_trending_invalid_window() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedb");
    cmd.args(["trending", "--window", "month"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid time window"));
}

#[test]
fn test_image_url() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    moviedb(dir.path())
        .args(["image-url", "--path", "/abc.jpg", "--size", "w185"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://image.tmdb.org/t/p/w185/abc.jpg",
        ));
}

#[test]
fn test_image_url_placeholder() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    moviedb(dir.path())
        .arg("image-url")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://via.placeholder.com/500x750?text=No+Image",
        ));
}

#[test]
fn test_open_blank_search_needs_no_network() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[tmdb]\nbase_url = \"http://127.0.0.1:9/3/\"\n",
    )
    .unwrap();

    // Act & Assert
    moviedb(dir.path())
        .args(["open", "/search?q="])
        .assert()
        .success()
        .stdout(predicate::str::contains("Start searching for movies"));
}

#[test]
fn test_open_unknown_location() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    moviedb(dir.path())
        .args(["open", "/tv/1399"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown location"));
}

#[test]
fn test_open_invalid_movie_id() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    moviedb(dir.path())
        .args(["open", "/movie/abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Movie not found"))
        .stdout(predicate::str::contains("Go Back Home"));
}

#[test]
fn test_invalid_config_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[tmdb\n").unwrap();

    // Act & Assert
    moviedb(dir.path())
        .arg("popular")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}

#[tokio::test]
async fn test_popular_renders_cards_and_pagination() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .and(query_param("page", "1"))
        .and(query_param("api_key", "test-key"))
        .respond_with(json(POPULAR_PAGE1))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server);

    // Act & Assert
    moviedb(dir.path())
        .arg("popular")
        .assert()
        .success()
        .stdout(predicate::str::contains("Popular Movies"))
        .stdout(predicate::str::contains(
            "Godzilla x Kong: The New Empire ⭐ 7.2 (2024)",
        ))
        .stdout(predicate::str::contains("Page 1 of 44938 | Next >"));
}

#[tokio::test]
async fn test_home_unauthorized_shows_config_message() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_raw(
            INVALID_API_KEY.as_bytes().to_vec(),
            "application/json",
        ))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server);

    // Act & Assert
    moviedb(dir.path())
        .arg("home")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "API key is invalid or missing. Please check your configuration.",
        ));
}

#[tokio::test]
async fn test_home_renders_both_sections() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/trending/movie/day"))
        .respond_with(json(TRENDING_DAY))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .respond_with(json(POPULAR_PAGE1))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server);

    // Act & Assert
    moviedb(dir.path())
        .arg("home")
        .assert()
        .success()
        .stdout(predicate::str::contains("Trending Today"))
        .stdout(predicate::str::contains(
            "Popular Movies (View All: /popular)",
        ))
        .stdout(predicate::str::contains("Inside Out 2"));
}

#[tokio::test]
async fn test_movie_renders_detail_sheet() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/27205"))
        .and(query_param("append_to_response", "credits,videos"))
        .respond_with(json(MOVIE_27205))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server);

    // Act & Assert
    moviedb(dir.path())
        .args(["movie", "--id", "27205"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inception (2010)"))
        .stdout(predicate::str::contains("Budget: $160,000,000.00"))
        .stdout(predicate::str::contains(
            "Trailer: https://www.youtube.com/watch?v=YoHD9XEInc0",
        ))
        .stdout(predicate::str::contains("Cillian Murphy").not());
}

#[tokio::test]
async fn test_movie_not_found_shows_error() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/999999999"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server);

    // Act & Assert
    moviedb(dir.path())
        .args(["movie", "--id", "999999999"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed to load movie details"));
}

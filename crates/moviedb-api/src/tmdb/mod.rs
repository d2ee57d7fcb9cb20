//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints
//! and builds image CDN URLs for posters and profiles.

mod api;
mod client;
mod error;
mod image;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use error::{TmdbError, upstream_status};
pub use image::{IMAGE_BASE_URL, PLACEHOLDER_IMAGE_URL, image_url};
pub use types::{
    CastMember, Credits, Genre, MovieDetail, MovieSummary, PageResult, ProductionCompany,
    TimeWindow, Video, Videos,
};

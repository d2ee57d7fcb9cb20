//! Movie detail sheet.

use chrono::NaiveDate;
use moviedb_api::tmdb::{MovieDetail, image_url};

use super::list::NOT_AVAILABLE;
use crate::pages::details::cast_preview;

/// Poster size on the detail sheet.
pub const POSTER_SIZE: &str = "w500";

/// Cast profile picture size.
pub const PROFILE_SIZE: &str = "w185";

/// Formats whole dollars as `$1,234,567.00`, or `N/A` for 0.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn format_currency(amount: u64) -> String {
    if amount == 0 {
        return String::from(NOT_AVAILABLE);
    }
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}.00")
}

/// Formats a runtime in minutes as `2h 28m`, or `N/A` when unknown.
#[must_use]
pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        Some(m) if m > 0 => format!("{}h {}m", m / 60, m % 60),
        _ => String::from(NOT_AVAILABLE),
    }
}

/// Formats `YYYY-MM-DD` as `July 15, 2010`. Unparseable dates are shown as given.
#[must_use]
pub fn format_release_date(date: Option<&str>) -> String {
    match date.filter(|d| !d.is_empty()) {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map_or_else(|_| String::from(d), |parsed| parsed.format("%B %-d, %Y").to_string()),
        None => String::from(NOT_AVAILABLE),
    }
}

/// Renders every section of the detail page.
#[must_use]
pub fn detail_sheet(detail: &MovieDetail) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!(
        "{} ({})",
        detail.title,
        detail.release_year().unwrap_or(NOT_AVAILABLE)
    ));
    if let Some(tagline) = detail.tagline.as_deref().filter(|t| !t.is_empty()) {
        lines.push(format!("\"{tagline}\""));
    }
    lines.push(format!(
        "⭐ {:.1} / 10 ({} votes)",
        detail.vote_average.unwrap_or_default(),
        detail.vote_count
    ));
    lines.push(format!(
        "Poster: {}",
        image_url(detail.poster_path.as_deref(), POSTER_SIZE)
    ));
    if !detail.genres.is_empty() {
        let genres: Vec<&str> = detail.genres.iter().map(|g| g.name.as_str()).collect();
        lines.push(format!("Genres: {}", genres.join(", ")));
    }

    lines.push(String::new());
    lines.push(String::from("Overview"));
    lines.push(
        detail
            .overview
            .clone()
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| String::from("No overview available.")),
    );

    lines.push(String::new());
    lines.push(String::from("Details"));
    lines.push(format!("  Runtime: {}", format_runtime(detail.runtime)));
    lines.push(format!("  Budget: {}", format_currency(detail.budget)));
    lines.push(format!("  Revenue: {}", format_currency(detail.revenue)));
    lines.push(format!(
        "  Status: {}",
        detail.status.as_deref().unwrap_or(NOT_AVAILABLE)
    ));
    lines.push(format!(
        "  Release Date: {}",
        format_release_date(detail.release_date.as_deref())
    ));
    lines.push(format!("  Popularity: {:.2}", detail.popularity));

    if !detail.production_companies.is_empty() {
        lines.push(String::new());
        lines.push(String::from("Production Companies"));
        lines.extend(
            detail
                .production_companies
                .iter()
                .map(|c| format!("  {}", c.name)),
        );
    }

    let cast = cast_preview(detail);
    if !cast.is_empty() {
        lines.push(String::new());
        lines.push(String::from("Cast"));
        lines.extend(cast.iter().map(|member| {
            let profile = image_url(member.profile_path.as_deref(), PROFILE_SIZE);
            match member.character.as_deref().filter(|c| !c.is_empty()) {
                Some(character) => format!("  {} as {character} <{profile}>", member.name),
                None => format!("  {} <{profile}>", member.name),
            }
        }));
    }

    if let Some(url) = detail.trailer().and_then(|v| v.watch_url()) {
        lines.push(String::new());
        lines.push(format!("Trailer: {url}"));
    }

    lines
}

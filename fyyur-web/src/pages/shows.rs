//! Show listing page

use axum::response::Html;
use fyyur_common::db::ShowListing;
use fyyur_common::time::format_show_time;

use super::{esc, image, layout};

pub fn list(shows: &[ShowListing], flashes: &[String]) -> Html<String> {
    let items: String = shows
        .iter()
        .map(|show| {
            format!(
                r#"<div class="show">{img}<a href="/artists/{artist_id}">{artist}</a> playing at <a href="/venues/{venue_id}">{venue}</a> <span>{time}</span></div>"#,
                img = image(show.artist_image_link.as_deref(), &show.artist_name),
                artist_id = show.artist_id,
                artist = esc(&show.artist_name),
                venue_id = show.venue_id,
                venue = esc(&show.venue_name),
                time = esc(&format_show_time(&show.start_time)),
            )
        })
        .collect();

    let body = if shows.is_empty() {
        "<h1>Shows</h1>\n<p>No upcoming shows.</p>".to_string()
    } else {
        format!("<h1>Shows</h1>\n{}", items)
    };

    layout("Shows", flashes, &body)
}

//! Home page

use axum::response::Html;

use super::{layout, search_form};

pub fn render(flashes: &[String]) -> Html<String> {
    let body = format!(
        r#"<h1>Fyyur</h1>
<p>Find venues and artists, and book shows between them.</p>
<h2>Venues</h2>
{venue_search}
<p><a href="/venues">Browse venues</a> | <a href="/venues/create">Post a venue</a></p>
<h2>Artists</h2>
{artist_search}
<p><a href="/artists">Browse artists</a> | <a href="/artists/create">Post an artist</a></p>
<h2>Shows</h2>
<p><a href="/shows">Upcoming shows</a> | <a href="/shows/create">Post a show</a></p>"#,
        venue_search = search_form("/venues/search", "Find a venue", ""),
        artist_search = search_form("/artists/search", "Find an artist", ""),
    );
    layout("Home", flashes, &body)
}

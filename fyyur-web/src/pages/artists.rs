//! Artist pages

use axum::response::Html;
use fyyur_common::db::{ArtistDetail, EntitySummary, VenueShow};
use fyyur_common::time::format_show_time;

use super::venues::{contact, seeking};
use super::{esc, genre_tags, image, layout, search_form};

pub fn list(artists: &[EntitySummary], flashes: &[String]) -> Html<String> {
    let items: String = artists
        .iter()
        .map(|a| format!("<li><a href=\"/artists/{}\">{}</a></li>", a.id, esc(&a.name)))
        .collect();

    let empty = if artists.is_empty() {
        "\n<p>No artists listed yet.</p>"
    } else {
        ""
    };

    let body = format!(
        "<h1>Artists</h1>\n{}{}\n<ul class=\"items\">{}</ul>",
        search_form("/artists/search", "Find an artist", ""),
        empty,
        items
    );
    layout("Artists", flashes, &body)
}

fn venue_shows(shows: &[VenueShow]) -> String {
    shows
        .iter()
        .map(|show| {
            format!(
                "<div class=\"show\">{img}<a href=\"/venues/{id}\">{name}</a> <span>{time}</span></div>",
                img = image(show.venue_image_link.as_deref(), &show.venue_name),
                id = show.venue_id,
                name = esc(&show.venue_name),
                time = esc(&format_show_time(&show.start_time)),
            )
        })
        .collect()
}

pub fn detail(detail: &ArtistDetail, flashes: &[String]) -> Html<String> {
    let artist = &detail.artist;

    let mut body = format!(
        "<h1>{name}</h1>\n<p class=\"id\">ID: {id}</p>\n<div class=\"genres\">{genres}</div>\n<p>{city}, {state}</p>\n",
        name = esc(&artist.name),
        id = artist.id,
        genres = genre_tags(&artist.genres),
        city = esc(&artist.city),
        state = esc(&artist.state),
    );
    body.push_str(&contact("Phone", artist.phone.as_deref(), false));
    body.push_str(&contact("Website", artist.website_link.as_deref(), true));
    body.push_str(&contact("Facebook", artist.facebook_link.as_deref(), true));
    body.push_str(&seeking(
        artist.seeking_venue,
        "performance venues",
        artist.seeking_description.as_deref(),
    ));
    body.push_str(&image(artist.image_link.as_deref(), &artist.name));

    body.push_str(&format!(
        "\n<h2>{} Upcoming Shows</h2>\n{}\n<h2>{} Past Shows</h2>\n{}\n",
        detail.upcoming_shows_count(),
        venue_shows(&detail.upcoming_shows),
        detail.past_shows_count(),
        venue_shows(&detail.past_shows),
    ));

    body.push_str(&format!(
        "<p><a href=\"/artists/{}/edit\">Edit artist</a></p>",
        artist.id
    ));

    layout(&artist.name, flashes, &body)
}

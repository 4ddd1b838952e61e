//! Venue pages

use axum::response::Html;
use fyyur_common::db::{ArtistShow, VenueArea, VenueDetail};
use fyyur_common::time::format_show_time;

use super::{attr, esc, genre_tags, image, layout, search_form};

pub fn list(areas: &[VenueArea], flashes: &[String]) -> Html<String> {
    let mut body = String::from("<h1>Venues</h1>\n");
    body.push_str(&search_form("/venues/search", "Find a venue", ""));

    if areas.is_empty() {
        body.push_str("\n<p>No venues listed yet.</p>");
    }

    for area in areas {
        body.push_str(&format!(
            "\n<h3>{}, {}</h3>\n<ul class=\"items\">",
            esc(&area.city),
            esc(&area.state)
        ));
        for venue in &area.venues {
            body.push_str(&format!(
                "<li><a href=\"/venues/{}\">{}</a> <small>{} upcoming shows</small></li>",
                venue.id,
                esc(&venue.name),
                venue.upcoming_shows_count
            ));
        }
        body.push_str("</ul>");
    }

    layout("Venues", flashes, &body)
}

fn artist_shows(shows: &[ArtistShow]) -> String {
    shows
        .iter()
        .map(|show| {
            format!(
                "<div class=\"show\">{img}<a href=\"/artists/{id}\">{name}</a> <span>{time}</span></div>",
                img = image(show.artist_image_link.as_deref(), &show.artist_name),
                id = show.artist_id,
                name = esc(&show.artist_name),
                time = esc(&format_show_time(&show.start_time)),
            )
        })
        .collect()
}

/// Optional contact line, omitted when the value is absent
pub(crate) fn contact(label: &str, value: Option<&str>, link: bool) -> String {
    match value {
        Some(v) if link => format!(
            "<p>{}: <a href=\"{}\">{}</a></p>\n",
            label,
            attr(v),
            esc(v)
        ),
        Some(v) => format!("<p>{}: {}</p>\n", label, esc(v)),
        None => String::new(),
    }
}

/// Seeking banner shared by venue and artist pages
pub(crate) fn seeking(seeking: bool, what: &str, description: Option<&str>) -> String {
    if seeking {
        format!(
            "<div class=\"seeking\"><strong>Currently seeking {}</strong><p>{}</p></div>\n",
            what,
            esc(description.unwrap_or_default())
        )
    } else {
        format!("<p class=\"not-seeking\">Not currently seeking {}</p>\n", what)
    }
}

pub fn detail(detail: &VenueDetail, flashes: &[String]) -> Html<String> {
    let venue = &detail.venue;

    let mut body = format!(
        "<h1>{name}</h1>\n<p class=\"id\">ID: {id}</p>\n<div class=\"genres\">{genres}</div>\n<p>{address}<br>{city}, {state}</p>\n",
        name = esc(&venue.name),
        id = venue.id,
        genres = genre_tags(&venue.genres),
        address = esc(&venue.address),
        city = esc(&venue.city),
        state = esc(&venue.state),
    );
    body.push_str(&contact("Phone", venue.phone.as_deref(), false));
    body.push_str(&contact("Website", venue.website_link.as_deref(), true));
    body.push_str(&contact("Facebook", venue.facebook_link.as_deref(), true));
    body.push_str(&seeking(
        venue.seeking_talent,
        "talent",
        venue.seeking_description.as_deref(),
    ));
    body.push_str(&image(venue.image_link.as_deref(), &venue.name));

    body.push_str(&format!(
        "\n<h2>{} Upcoming Shows</h2>\n{}\n<h2>{} Past Shows</h2>\n{}\n",
        detail.upcoming_shows_count(),
        artist_shows(&detail.upcoming_shows),
        detail.past_shows_count(),
        artist_shows(&detail.past_shows),
    ));

    body.push_str(&format!(
        r#"<p><a href="/venues/{id}/edit">Edit venue</a></p>
<form method="post" action="/venues/{id}/delete">
    <button type="submit">Delete venue</button>
</form>"#,
        id = venue.id
    ));

    layout(&venue.name, flashes, &body)
}

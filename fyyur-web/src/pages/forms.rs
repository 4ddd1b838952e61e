//! Create and edit forms
//!
//! Forms render from [`FormData`] so a rejected submission can be shown
//! again with exactly what the user typed. Edit pages convert the stored
//! entity to `FormData` first.

use axum::response::Html;
use fyyur_common::db::{Artist, Venue};
use fyyur_common::time::{format_form_time, now};
use fyyur_common::validation::{FormData, GENRES, STATES};

use super::{attr, esc, layout};

fn text_input(label: &str, name: &str, form: &FormData) -> String {
    format!(
        "<label for=\"{name}\">{label}</label>\n<input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{value}\">\n",
        name = name,
        label = label,
        value = attr(form.first(name).unwrap_or_default()),
    )
}

fn state_select(form: &FormData) -> String {
    let selected = form.first("state").unwrap_or_default();
    let options: String = STATES
        .iter()
        .map(|state| {
            let mark = if *state == selected { " selected" } else { "" };
            format!("<option value=\"{0}\"{1}>{0}</option>", state, mark)
        })
        .collect();
    format!(
        "<label for=\"state\">State</label>\n<select id=\"state\" name=\"state\"><option value=\"\"></option>{}</select>\n",
        options
    )
}

fn genre_select(form: &FormData) -> String {
    let selected = form.all("genres");
    let options: String = GENRES
        .iter()
        .map(|genre| {
            let mark = if selected.contains(genre) { " selected" } else { "" };
            format!(
                "<option value=\"{}\"{}>{}</option>",
                attr(genre),
                mark,
                esc(genre)
            )
        })
        .collect();
    format!(
        "<label for=\"genres\">Genres</label>\n<select id=\"genres\" name=\"genres\" multiple>{}</select>\n",
        options
    )
}

fn checkbox(label: &str, name: &str, form: &FormData) -> String {
    let checked = if form.flag(name) { " checked" } else { "" };
    format!(
        "<label><input type=\"checkbox\" name=\"{}\" value=\"y\"{}> {}</label>\n",
        name, checked, label
    )
}

fn textarea(label: &str, name: &str, form: &FormData) -> String {
    format!(
        "<label for=\"{name}\">{label}</label>\n<textarea id=\"{name}\" name=\"{name}\">{value}</textarea>\n",
        name = name,
        label = label,
        value = esc(form.first(name).unwrap_or_default()),
    )
}

fn page(title: &str, action: &str, fields: &str, flashes: &[String]) -> Html<String> {
    let body = format!(
        "<h1>{title}</h1>\n<form method=\"post\" action=\"{action}\">\n{fields}<button type=\"submit\">{title}</button>\n</form>",
        title = esc(title),
        action = attr(action),
        fields = fields,
    );
    layout(title, flashes, &body)
}

fn pairs(entries: Vec<(&str, Option<&str>)>, genres: &[String], flag: Option<&str>) -> FormData {
    let mut out: Vec<(String, String)> = entries
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k.to_string(), v.to_string())))
        .collect();
    out.extend(genres.iter().map(|g| ("genres".to_string(), g.clone())));
    if let Some(flag) = flag {
        out.push((flag.to_string(), "y".to_string()));
    }
    FormData::from_pairs(out)
}

/// Form values for editing a stored venue
pub fn venue_values(venue: &Venue) -> FormData {
    pairs(
        vec![
            ("name", Some(venue.name.as_str())),
            ("city", Some(venue.city.as_str())),
            ("state", Some(venue.state.as_str())),
            ("address", Some(venue.address.as_str())),
            ("phone", venue.phone.as_deref()),
            ("image_link", venue.image_link.as_deref()),
            ("facebook_link", venue.facebook_link.as_deref()),
            ("website_link", venue.website_link.as_deref()),
            ("seeking_description", venue.seeking_description.as_deref()),
        ],
        &venue.genres,
        venue.seeking_talent.then_some("seeking_talent"),
    )
}

/// Form values for editing a stored artist
pub fn artist_values(artist: &Artist) -> FormData {
    pairs(
        vec![
            ("name", Some(artist.name.as_str())),
            ("city", Some(artist.city.as_str())),
            ("state", Some(artist.state.as_str())),
            ("phone", artist.phone.as_deref()),
            ("image_link", artist.image_link.as_deref()),
            ("facebook_link", artist.facebook_link.as_deref()),
            ("website_link", artist.website_link.as_deref()),
            ("seeking_description", artist.seeking_description.as_deref()),
        ],
        &artist.genres,
        artist.seeking_venue.then_some("seeking_venue"),
    )
}

/// Venue form; `action` is the create or edit path
pub fn venue(title: &str, action: &str, form: &FormData, flashes: &[String]) -> Html<String> {
    let mut fields = text_input("Name", "name", form);
    fields.push_str(&text_input("City", "city", form));
    fields.push_str(&state_select(form));
    fields.push_str(&text_input("Address", "address", form));
    fields.push_str(&text_input("Phone", "phone", form));
    fields.push_str(&genre_select(form));
    fields.push_str(&text_input("Image link", "image_link", form));
    fields.push_str(&text_input("Facebook link", "facebook_link", form));
    fields.push_str(&text_input("Website link", "website_link", form));
    fields.push_str(&checkbox("Looking for talent", "seeking_talent", form));
    fields.push_str(&textarea("Seeking description", "seeking_description", form));
    page(title, action, &fields, flashes)
}

/// Artist form; `action` is the create or edit path
pub fn artist(title: &str, action: &str, form: &FormData, flashes: &[String]) -> Html<String> {
    let mut fields = text_input("Name", "name", form);
    fields.push_str(&text_input("City", "city", form));
    fields.push_str(&state_select(form));
    fields.push_str(&text_input("Phone", "phone", form));
    fields.push_str(&genre_select(form));
    fields.push_str(&text_input("Image link", "image_link", form));
    fields.push_str(&text_input("Facebook link", "facebook_link", form));
    fields.push_str(&text_input("Website link", "website_link", form));
    fields.push_str(&checkbox("Looking for venues", "seeking_venue", form));
    fields.push_str(&textarea("Seeking description", "seeking_description", form));
    page(title, action, &fields, flashes)
}

/// Empty show form with `start_time` defaulted to now
pub fn show_defaults() -> FormData {
    FormData::from_pairs(vec![("start_time".to_string(), format_form_time(&now()))])
}

pub fn show(form: &FormData, flashes: &[String]) -> Html<String> {
    let mut fields = text_input("Artist ID", "artist_id", form);
    fields.push_str(&text_input("Venue ID", "venue_id", form));
    fields.push_str(&text_input("Start time (YYYY-MM-DD HH:MM:SS)", "start_time", form));
    page("Create show", "/shows/create", &fields, flashes)
}

//! Server-rendered HTML pages
//!
//! Every page goes through [`layout`], which adds navigation and the flash
//! messages for the current response. All user data is escaped with
//! [`esc`] (text) or [`attr`] (double-quoted attribute values).

use axum::response::Html;
use fyyur_common::db::SearchResults;

pub mod artists;
pub mod errors;
pub mod forms;
pub mod home;
pub mod shows;
pub mod venues;

/// Escape text content
pub fn esc(value: &str) -> String {
    html_escape::encode_text(value).into_owned()
}

/// Escape a double-quoted attribute value
pub fn attr(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}

fn render_flashes(flashes: &[String]) -> String {
    if flashes.is_empty() {
        return String::new();
    }
    let items: String = flashes
        .iter()
        .map(|msg| format!("<li class=\"flash\">{}</li>", esc(msg)))
        .collect();
    format!("<ul class=\"flashes\">{}</ul>", items)
}

/// Wrap a page body in the shared document shell
pub fn layout(title: &str, flashes: &[String], body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Fyyur</title>
    <style>
        body {{
            font-family: system-ui, -apple-system, sans-serif;
            max-width: 960px;
            margin: 0 auto;
            padding: 20px;
            line-height: 1.6;
            color: #333;
        }}
        nav {{
            border-bottom: 2px solid #0066cc;
            padding-bottom: 10px;
            margin-bottom: 20px;
        }}
        nav a {{
            margin-right: 15px;
            color: #0066cc;
            text-decoration: none;
        }}
        .flashes {{
            list-style: none;
            padding: 0;
        }}
        .flash {{
            background: #fff3cd;
            border: 1px solid #ffe08a;
            padding: 8px 12px;
            margin-bottom: 6px;
            border-radius: 4px;
        }}
        .genre {{
            display: inline-block;
            background: #eef;
            padding: 2px 8px;
            margin: 2px;
            border-radius: 10px;
            font-size: 0.9em;
        }}
        .show {{
            border: 1px solid #ddd;
            padding: 8px;
            margin: 6px 0;
            border-radius: 4px;
        }}
        .show img {{
            max-height: 60px;
            vertical-align: middle;
            margin-right: 10px;
        }}
        label {{
            display: block;
            margin-top: 10px;
        }}
    </style>
</head>
<body>
    <nav>
        <a href="/">Fyyur</a>
        <a href="/venues">Venues</a>
        <a href="/artists">Artists</a>
        <a href="/shows">Shows</a>
        <a href="/venues/create">Post a venue</a>
        <a href="/artists/create">Post an artist</a>
        <a href="/shows/create">Post a show</a>
    </nav>
    {flashes}
    <main>
{body}
    </main>
</body>
</html>
"#,
        title = esc(title),
        flashes = render_flashes(flashes),
        body = body,
    ))
}

/// Search box posting `search_term` to `action`
pub(crate) fn search_form(action: &str, placeholder: &str, term: &str) -> String {
    format!(
        r#"<form class="search" method="post" action="{action}">
    <input type="search" name="search_term" placeholder="{placeholder}" value="{term}">
    <button type="submit">Search</button>
</form>"#,
        action = attr(action),
        placeholder = attr(placeholder),
        term = attr(term),
    )
}

/// Search results page for either directory; `base_path` is `/venues` or `/artists`
pub fn search_results(
    kind: &str,
    base_path: &str,
    term: &str,
    results: &SearchResults,
) -> Html<String> {
    let items: String = results
        .data
        .iter()
        .map(|item| {
            format!(
                "<li><a href=\"{}/{}\">{}</a> <small>{} upcoming shows</small></li>",
                base_path,
                item.id,
                esc(&item.name),
                item.upcoming_shows_count
            )
        })
        .collect();

    let body = format!(
        r#"<h1>Search {kind}</h1>
{search}
<h3>Number of search results for "{term}": {count}</h3>
<ul class="items">{items}</ul>"#,
        kind = esc(kind),
        search = search_form(&format!("{}/search", base_path), "Search again", term),
        term = esc(term),
        count = results.count,
        items = items,
    );

    layout(&format!("Search {}", kind), &[], &body)
}

pub(crate) fn genre_tags(genres: &[String]) -> String {
    genres
        .iter()
        .map(|g| format!("<span class=\"genre\">{}</span>", esc(g)))
        .collect()
}

/// `<img>` for an optional image link, empty when absent
pub(crate) fn image(link: Option<&str>, alt: &str) -> String {
    link.map(|src| format!("<img src=\"{}\" alt=\"{}\">", attr(src), attr(alt)))
        .unwrap_or_default()
}

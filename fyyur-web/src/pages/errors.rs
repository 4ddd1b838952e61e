//! Error pages

use axum::response::Html;

use super::layout;

pub fn not_found() -> Html<String> {
    layout(
        "Not Found",
        &[],
        "<h1>404 Not Found</h1>\n<p>The page you requested does not exist. <a href=\"/\">Back home</a></p>",
    )
}

pub fn bad_request() -> Html<String> {
    layout(
        "Bad Request",
        &[],
        "<h1>400 Bad Request</h1>\n<p>The submitted form could not be read.</p>",
    )
}

pub fn server_error() -> Html<String> {
    layout(
        "Server Error",
        &[],
        "<h1>500 Internal Server Error</h1>\n<p>Something went wrong. Please try again later.</p>",
    )
}

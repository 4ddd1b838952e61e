//! Form validation
//!
//! Submitted forms arrive as ordered key/value pairs (repeated keys allowed,
//! e.g. one `genres` pair per selected genre). Each `validate_*` function
//! returns either the typed input for the store or every field error found.

use crate::db::models::{ArtistInput, ShowInput, VenueInput};
use serde::Serialize;

/// Two-letter state codes accepted by the `state` field
pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Genre choices accepted by the `genres` field
pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

const MAX_SHORT_TEXT: usize = 120;
const MAX_DESCRIPTION: usize = 400;
const MAX_IMAGE_LINK: usize = 500;

/// One invalid form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// Flash text shown to the user for this field
    pub fn flash_message(&self) -> String {
        format!("Error: Check {} then resubmit again.", self.field)
    }
}

/// Decoded form body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value submitted for `key`
    pub fn first(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value submitted for `key`, in submission order
    pub fn all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Trimmed first value, empty when absent
    pub fn text(&self, key: &str) -> String {
        self.first(key).map(str::trim).unwrap_or_default().to_string()
    }

    /// Trimmed first value, `None` when absent or blank
    pub fn optional(&self, key: &str) -> Option<String> {
        Some(self.text(key)).filter(|v| !v.is_empty())
    }

    /// Checkbox semantics: checked iff the key was submitted
    pub fn flag(&self, key: &str) -> bool {
        self.first(key).is_some()
    }
}

#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn required(&mut self, field: &'static str, value: &str) {
        if value.is_empty() {
            self.errors.push(FieldError::new(field, "This field is required."));
        }
    }

    fn max_len(&mut self, field: &'static str, value: Option<&str>, max: usize) {
        if value.is_some_and(|v| v.chars().count() > max) {
            self.errors.push(FieldError::new(
                field,
                format!("Field cannot be longer than {} characters.", max),
            ));
        }
    }

    fn state(&mut self, value: &str) {
        if value.is_empty() {
            self.required("state", value);
        } else if !STATES.contains(&value) {
            self.errors.push(FieldError::new("state", "Not a valid choice."));
        }
    }

    fn genres(&mut self, values: &[String]) {
        if values.is_empty() {
            self.required("genres", "");
        } else if values.iter().any(|g| !GENRES.contains(&g.as_str())) {
            self.errors.push(FieldError::new("genres", "Not a valid choice."));
        }
    }

    fn phone(&mut self, value: Option<&str>) {
        let Some(value) = value else { return };
        let allowed = value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '.'));
        let digits = value.chars().filter(char::is_ascii_digit).count();
        if !allowed || digits != 10 {
            self.errors.push(FieldError::new("phone", "Invalid phone number."));
        }
    }

    fn url(&mut self, field: &'static str, value: Option<&str>) {
        let Some(value) = value else { return };
        let rest = value
            .strip_prefix("https://")
            .or_else(|| value.strip_prefix("http://"));
        let valid = rest.is_some_and(|r| !r.is_empty() && !r.contains(char::is_whitespace));
        if !valid {
            self.errors.push(FieldError::new(field, "Invalid URL."));
        }
    }

    fn finish<T>(self, value: T) -> Result<T, Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }
}

/// Distinct genres in submission order, blanks dropped
fn collect_genres(form: &FormData) -> Vec<String> {
    let mut genres: Vec<String> = Vec::new();
    for genre in form.all("genres").into_iter().map(str::trim) {
        if !genre.is_empty() && !genres.iter().any(|g| g == genre) {
            genres.push(genre.to_string());
        }
    }
    genres
}

/// Validate a venue create/edit form
pub fn validate_venue(form: &FormData) -> Result<VenueInput, Vec<FieldError>> {
    let input = VenueInput {
        name: form.text("name"),
        genres: collect_genres(form),
        address: form.text("address"),
        city: form.text("city"),
        state: form.text("state"),
        phone: form.optional("phone"),
        website_link: form.optional("website_link"),
        facebook_link: form.optional("facebook_link"),
        image_link: form.optional("image_link"),
        seeking_talent: form.flag("seeking_talent"),
        seeking_description: form.optional("seeking_description"),
    };

    let mut check = Checker::default();
    check.required("name", &input.name);
    check.required("city", &input.city);
    check.max_len("city", Some(&input.city), MAX_SHORT_TEXT);
    check.state(&input.state);
    check.required("address", &input.address);
    check.max_len("address", Some(&input.address), MAX_SHORT_TEXT);
    check.phone(input.phone.as_deref());
    check.genres(&input.genres);
    check.url("facebook_link", input.facebook_link.as_deref());
    check.max_len("facebook_link", input.facebook_link.as_deref(), MAX_SHORT_TEXT);
    check.url("image_link", input.image_link.as_deref());
    check.max_len("image_link", input.image_link.as_deref(), MAX_IMAGE_LINK);
    check.url("website_link", input.website_link.as_deref());
    check.max_len("website_link", input.website_link.as_deref(), MAX_SHORT_TEXT);
    check.max_len("seeking_description", input.seeking_description.as_deref(), MAX_DESCRIPTION);
    check.finish(input)
}

/// Validate an artist create/edit form
pub fn validate_artist(form: &FormData) -> Result<ArtistInput, Vec<FieldError>> {
    let input = ArtistInput {
        name: form.text("name"),
        genres: collect_genres(form),
        city: form.text("city"),
        state: form.text("state"),
        phone: form.optional("phone"),
        website_link: form.optional("website_link"),
        facebook_link: form.optional("facebook_link"),
        image_link: form.optional("image_link"),
        seeking_venue: form.flag("seeking_venue"),
        seeking_description: form.optional("seeking_description"),
    };

    let mut check = Checker::default();
    check.required("name", &input.name);
    check.required("city", &input.city);
    check.max_len("city", Some(&input.city), MAX_SHORT_TEXT);
    check.state(&input.state);
    check.phone(input.phone.as_deref());
    check.genres(&input.genres);
    check.url("facebook_link", input.facebook_link.as_deref());
    check.max_len("facebook_link", input.facebook_link.as_deref(), MAX_SHORT_TEXT);
    check.url("image_link", input.image_link.as_deref());
    check.max_len("image_link", input.image_link.as_deref(), MAX_IMAGE_LINK);
    check.url("website_link", input.website_link.as_deref());
    check.max_len("website_link", input.website_link.as_deref(), MAX_SHORT_TEXT);
    check.max_len("seeking_description", input.seeking_description.as_deref(), MAX_DESCRIPTION);
    check.finish(input)
}

/// Validate the show form's shape.
///
/// Whether the ids reference existing rows is checked against the store by
/// the caller.
pub fn validate_show(form: &FormData) -> Result<ShowInput, Vec<FieldError>> {
    let mut check = Checker::default();

    let mut id_field = |field: &'static str| -> i64 {
        let raw = form.text(field);
        if raw.is_empty() {
            check.required(field, &raw);
            return 0;
        }
        match raw.parse::<i64>() {
            Ok(id) if id > 0 => id,
            _ => {
                check.errors.push(FieldError::new(field, "Not a valid integer value."));
                0
            }
        }
    };

    let artist_id = id_field("artist_id");
    let venue_id = id_field("venue_id");

    let raw_start = form.text("start_time");
    let start_time = if raw_start.is_empty() {
        check.required("start_time", &raw_start);
        None
    } else {
        let parsed = crate::time::parse_start_time(&raw_start);
        if parsed.is_none() {
            check.errors.push(FieldError::new("start_time", "Not a valid datetime value."));
        }
        parsed
    };

    match start_time {
        Some(start_time) => check.finish(ShowInput {
            venue_id,
            artist_id,
            start_time,
        }),
        None => Err(check.errors),
    }
}

/// Field error for a show referencing a row that does not exist
pub fn missing_reference(field: &'static str) -> FieldError {
    FieldError::new(field, "No record with this id.")
}

//! Database models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Stored venue record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub upcoming_shows_count: i64,
    pub past_shows_count: i64,
}

/// Stored artist record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub upcoming_shows_count: i64,
    pub past_shows_count: i64,
}

/// Stored show record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub id: i64,
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: NaiveDateTime,
    /// Whether `start_time` was later than the last evaluation time
    pub upcoming: bool,
}

/// Validated venue fields, used for both create and full-replace update
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VenueInput {
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Validated artist fields, used for both create and full-replace update
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArtistInput {
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Validated show fields
#[derive(Debug, Clone, PartialEq)]
pub struct ShowInput {
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: NaiveDateTime,
}

/// Per-entity line in listings and search results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySummary {
    pub id: i64,
    pub name: String,
    pub upcoming_shows_count: i64,
}

/// Result of a name search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<EntitySummary>,
}

impl SearchResults {
    pub fn new(data: Vec<EntitySummary>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Venues sharing one (state, city) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntitySummary>,
}

/// A show as seen from its venue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

/// A show as seen from its artist
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

/// Venue page data with shows split into past and upcoming
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueDetail {
    pub venue: Venue,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
}

impl VenueDetail {
    pub fn past_shows_count(&self) -> usize {
        self.past_shows.len()
    }

    pub fn upcoming_shows_count(&self) -> usize {
        self.upcoming_shows.len()
    }
}

/// Artist page data with shows split into past and upcoming
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistDetail {
    pub artist: Artist,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
}

impl ArtistDetail {
    pub fn past_shows_count(&self) -> usize {
        self.past_shows.len()
    }

    pub fn upcoming_shows_count(&self) -> usize {
        self.upcoming_shows.len()
    }
}

/// Row of the upcoming shows listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

impl From<&Venue> for VenueInput {
    fn from(venue: &Venue) -> Self {
        Self {
            name: venue.name.clone(),
            genres: venue.genres.clone(),
            address: venue.address.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            phone: venue.phone.clone(),
            website_link: venue.website_link.clone(),
            facebook_link: venue.facebook_link.clone(),
            image_link: venue.image_link.clone(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone(),
        }
    }
}

impl From<&Artist> for ArtistInput {
    fn from(artist: &Artist) -> Self {
        Self {
            name: artist.name.clone(),
            genres: artist.genres.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone(),
            website_link: artist.website_link.clone(),
            facebook_link: artist.facebook_link.clone(),
            image_link: artist.image_link.clone(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone(),
        }
    }
}

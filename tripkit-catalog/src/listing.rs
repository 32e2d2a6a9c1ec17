use serde::{Deserialize, Serialize};

use crate::event::{EventPriceEstimator, EventPriceInputs};

/// Event as it appears in the catalogue file. Everything is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventListing {
    pub id: Option<String>,
    pub name: Option<String>,
    pub date: String,
    pub city: String,
    pub venue: String,
    pub artist: String,
    pub genres: String,
    pub popularity: String,
    pub description: Option<String>,
    /// Zero or absent means "estimate it".
    pub price: f64,
    pub image_url: String,
}

/// Event as served to clients
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EventSummary {
    pub id: String,
    pub name: String,
    pub date: String,
    pub location: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    pub category: String,
    pub artist: String,
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// First genre of a "/" or "," separated list, title-cased; "Music" if none.
pub fn category_from_genres(genres: &str) -> String {
    let first = if genres.contains('/') {
        genres.split('/').next().unwrap_or_default()
    } else if genres.contains(',') {
        genres.split(',').next().unwrap_or_default()
    } else {
        genres
    };
    let category = title_case(first.trim());
    if category.is_empty() {
        "Music".to_string()
    } else {
        category
    }
}

impl EventListing {
    pub fn summarize(&self, estimator: &EventPriceEstimator) -> EventSummary {
        let name = self.name.clone().unwrap_or_else(|| "Untitled".to_string());
        let category = category_from_genres(&self.genres);

        let price = if self.price > 0.0 {
            self.price
        } else {
            estimator.estimate(&EventPriceInputs {
                artist: self.artist.clone(),
                category: category.clone(),
                popularity: self.popularity.clone(),
                venue: self.venue.clone(),
                event_name: name.clone(),
            })
        };

        let location = if self.venue.is_empty() {
            self.city.clone()
        } else {
            format!("{} - {}", self.city, self.venue)
        };

        let description = self.description.clone().unwrap_or_else(|| {
            format!(
                "{} at {} • Genres: {} • Popularity: {}",
                self.artist, self.venue, self.genres, self.popularity
            )
            .trim()
            .to_string()
        });

        EventSummary {
            id: self.id.clone().unwrap_or_else(|| name.clone()),
            name,
            date: self.date.clone(),
            location,
            description,
            price,
            image_url: self.image_url.clone(),
            category,
            artist: self.artist.clone(),
        }
    }
}

/// Price every listing and keep those whose location mentions `city`
/// (case-insensitive). No filter returns everything.
pub fn list_events(
    listings: &[EventListing],
    estimator: &EventPriceEstimator,
    city: Option<&str>,
) -> Vec<EventSummary> {
    let needle = city.map(|c| c.to_lowercase()).filter(|c| !c.is_empty());
    listings
        .iter()
        .map(|listing| listing.summarize(estimator))
        .filter(|event| match &needle {
            Some(n) => event.location.to_lowercase().contains(n.as_str()),
            None => true,
        })
        .collect()
}

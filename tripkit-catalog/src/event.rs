//! Ticket price estimation for events that ship without a price.
//!
//! The estimate starts from the artist's tier and then runs three rule
//! stages in a fixed order: category, popularity, venue. Within a stage the
//! rules are evaluated top to bottom and only the first match applies, so
//! the order of each rule list is part of the pricing contract.

use serde::{Deserialize, Serialize};

/// Free-text attributes of an event, as they arrive from the listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPriceInputs {
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub popularity: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub event_name: String,
}

const PREMIUM_ARTISTS: &[&str] = &[
    "ar rahman", "akon", "enrique iglesias", "calvin harris", "post malone",
    "travis scott", "john mayer", "ap dhillon", "sonu nigam", "shaan",
    "sunidhi chauhan", "kailash kher", "hariharan", "papon",
];

const POPULAR_ARTISTS: &[&str] = &[
    "jubin nautiyal", "sid sriram", "amit kumar", "javed ali", "kumar sanu",
    "mohammed irfan", "salman ali", "rahat fateh ali khan", "shilpa rao",
    "asees kaur", "harshdeep kaur", "palak muchhal", "shweta mohan",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtistTier {
    Premium,
    Popular,
    Other,
    Unbilled,
}

impl ArtistTier {
    pub fn classify(artist: &str) -> Self {
        let artist = artist.trim().to_lowercase();
        if PREMIUM_ARTISTS.iter().any(|a| artist.contains(a)) {
            ArtistTier::Premium
        } else if POPULAR_ARTISTS.iter().any(|a| artist.contains(a)) {
            ArtistTier::Popular
        } else if !artist.is_empty() {
            ArtistTier::Other
        } else {
            ArtistTier::Unbilled
        }
    }

    pub fn base_price(&self) -> f64 {
        match self {
            ArtistTier::Premium => 3500.0,
            ArtistTier::Popular => 2000.0,
            ArtistTier::Other => 1200.0,
            ArtistTier::Unbilled => 500.0,
        }
    }
}

/// Normalised view of the inputs that rule predicates test against
#[derive(Debug, Clone)]
pub struct EventSignals {
    pub category: String,
    pub venue: String,
    pub event_name: String,
    /// `None` when popularity is empty or not a number.
    pub popularity: Option<f64>,
}

impl EventSignals {
    pub fn from_inputs(inputs: &EventPriceInputs) -> Self {
        Self {
            category: inputs.category.to_lowercase(),
            venue: inputs.venue.to_lowercase(),
            event_name: inputs.event_name.to_lowercase(),
            popularity: inputs.popularity.trim().parse::<f64>().ok(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    /// Lower the running price to at most this value.
    Cap(f64),
    /// Raise the running price to at least this value.
    Floor(f64),
    Scale(f64),
}

impl Adjustment {
    pub fn apply(&self, price: f64) -> f64 {
        match *self {
            Adjustment::Cap(limit) => price.min(limit),
            Adjustment::Floor(limit) => price.max(limit),
            Adjustment::Scale(factor) => price * factor,
        }
    }
}

pub struct PriceRule {
    pub name: &'static str,
    pub matches: fn(&EventSignals) -> bool,
    pub adjustment: Adjustment,
}

/// An ordered list of rules where the first matching rule wins
pub struct RuleStage {
    pub name: &'static str,
    pub rules: Vec<PriceRule>,
}

impl RuleStage {
    pub fn first_match(&self, signals: &EventSignals) -> Option<&PriceRule> {
        self.rules.iter().find(|rule| (rule.matches)(signals))
    }

    pub fn apply(&self, price: f64, signals: &EventSignals) -> f64 {
        match self.first_match(signals) {
            Some(rule) => rule.adjustment.apply(price),
            None => price,
        }
    }
}

fn venue_mentions(signals: &EventSignals, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| signals.venue.contains(k))
}

pub fn category_stage() -> RuleStage {
    RuleStage {
        name: "category",
        rules: vec![
            PriceRule {
                name: "comedy cap",
                matches: |s| s.category.contains("comedy"),
                adjustment: Adjustment::Cap(1500.0),
            },
            PriceRule {
                name: "food cap",
                matches: |s| s.category.contains("food"),
                adjustment: Adjustment::Cap(800.0),
            },
            PriceRule {
                name: "festival floor",
                matches: |s| s.category.contains("festival") || s.event_name.contains("sunburn"),
                adjustment: Adjustment::Floor(4000.0),
            },
        ],
    }
}

pub fn popularity_stage() -> RuleStage {
    RuleStage {
        name: "popularity",
        rules: vec![
            PriceRule {
                name: "very popular",
                matches: |s| s.popularity.is_some_and(|p| p > 80.0),
                adjustment: Adjustment::Scale(1.5),
            },
            PriceRule {
                name: "popular",
                matches: |s| s.popularity.is_some_and(|p| p > 60.0),
                adjustment: Adjustment::Scale(1.2),
            },
        ],
    }
}

pub fn venue_stage() -> RuleStage {
    RuleStage {
        name: "venue",
        rules: vec![
            PriceRule {
                name: "premium venue",
                matches: |s| venue_mentions(s, &["stadium", "arena", "auditorium", "palace"]),
                adjustment: Adjustment::Scale(1.3),
            },
            PriceRule {
                name: "bar venue",
                matches: |s| venue_mentions(s, &["club", "pub", "bar"]),
                adjustment: Adjustment::Scale(0.8),
            },
        ],
    }
}

/// Round to the nearest multiple of 50; exact halves go to the even multiple.
pub fn round_to_nearest_50(price: f64) -> f64 {
    (price / 50.0).round_ties_even() * 50.0
}

pub struct EventPriceEstimator {
    stages: Vec<RuleStage>,
}

impl EventPriceEstimator {
    pub fn new(stages: Vec<RuleStage>) -> Self {
        Self { stages }
    }

    pub fn estimate(&self, inputs: &EventPriceInputs) -> f64 {
        let signals = EventSignals::from_inputs(inputs);
        let base = ArtistTier::classify(&inputs.artist).base_price();

        let price = self
            .stages
            .iter()
            .fold(base, |price, stage| stage.apply(price, &signals));

        round_to_nearest_50(price.max(0.0))
    }
}

impl Default for EventPriceEstimator {
    fn default() -> Self {
        Self::new(vec![category_stage(), popularity_stage(), venue_stage()])
    }
}

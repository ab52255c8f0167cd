use serde::{Deserialize, Serialize};
use std::fmt;

/// Star rating tier shown on a detail page
///
/// Serialized as the tier label used by the site (`"One"` .. `"Five"`), or
/// `"unknown"` when the page carries no recognizable rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    One,
    Two,
    Three,
    Four,
    Five,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Rating {
    /// Maps a rating class token (`star-rating Three` → `"Three"`) to a tier
    pub fn from_class(token: &str) -> Self {
        match token {
            "One" => Self::One,
            "Two" => Self::Two,
            "Three" => Self::Three,
            "Four" => Self::Four,
            "Five" => Self::Five,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "One",
            Self::Two => "Two",
            Self::Three => "Three",
            Self::Four => "Four",
            Self::Five => "Five",
            Self::Unknown => "unknown",
        }
    }

    /// Number of stars, if known
    pub fn stars(&self) -> Option<u8> {
        match self {
            Self::One => Some(1),
            Self::Two => Some(2),
            Self::Three => Some(3),
            Self::Four => Some(4),
            Self::Five => Some(5),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scraped product
///
/// Every field is always present. Prices are kept as the display strings the
/// site renders (`"£51.77"`), so no currency parsing happens here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub price: String,
    pub rating: Rating,
    pub availability: String,
    pub description: String,
    pub upc: String,
    pub price_excl_tax: String,
    pub price_incl_tax: String,
    pub tax: String,
    pub number_of_reviews: String,
    /// Canonical detail-page URL; unique per record
    pub url: String,
    pub image_url: String,
}

impl BookRecord {
    /// Column names in serialization order
    pub const FIELDS: [&'static str; 12] = [
        "title",
        "price",
        "rating",
        "availability",
        "description",
        "upc",
        "price_excl_tax",
        "price_incl_tax",
        "tax",
        "number_of_reviews",
        "url",
        "image_url",
    ];

    /// Field values in the same order as [`BookRecord::FIELDS`]
    pub fn field_values(&self) -> [&str; 12] {
        [
            self.title.as_str(),
            self.price.as_str(),
            self.rating.as_str(),
            self.availability.as_str(),
            self.description.as_str(),
            self.upc.as_str(),
            self.price_excl_tax.as_str(),
            self.price_incl_tax.as_str(),
            self.tax.as_str(),
            self.number_of_reviews.as_str(),
            self.url.as_str(),
            self.image_url.as_str(),
        ]
    }
}

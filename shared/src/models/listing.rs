//! Business listing models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::ValidationError;
use crate::types::Coordinates;

/// Opaque identifier of a listing, assigned by the store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(String);

impl ListingId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ListingId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ListingId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ListingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Business categories. The set is closed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    #[serde(alias = "Makanan")]
    Food,
    #[serde(alias = "Minuman")]
    Beverage,
    #[serde(alias = "Jasa")]
    Service,
    #[serde(alias = "Kerajinan")]
    Craft,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Food,
        Category::Beverage,
        Category::Service,
        Category::Craft,
    ];

    /// Indonesian label shown in the directory UI
    pub fn label_id(&self) -> &'static str {
        match self {
            Category::Food => "Makanan",
            Category::Beverage => "Minuman",
            Category::Service => "Jasa",
            Category::Craft => "Kerajinan",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Food => write!(f, "Food"),
            Category::Beverage => write!(f, "Beverage"),
            Category::Service => write!(f, "Service"),
            Category::Craft => write!(f, "Craft"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    /// Accepts the English or Indonesian label, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| {
                c.to_string().eq_ignore_ascii_case(wanted) || c.label_id().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("unknown category: {}", wanted))
    }
}

/// Category filter of the public listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// "All categories" sentinel
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.is_empty() || wanted.eq_ignore_ascii_case("all") || wanted.eq_ignore_ascii_case("semua") {
            return Ok(CategoryFilter::All);
        }
        wanted.parse().map(CategoryFilter::Only)
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "All"),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

/// Moderation state of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Pending,
    Approved,
    Rejected,
}

impl ListingStatus {
    pub fn label_id(&self) -> &'static str {
        match self {
            ListingStatus::Pending => "Menunggu",
            ListingStatus::Approved => "Disetujui",
            ListingStatus::Rejected => "Ditolak",
        }
    }
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingStatus::Pending => write!(f, "pending"),
            ListingStatus::Approved => write!(f, "approved"),
            ListingStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for ListingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ListingStatus::Pending),
            "approved" => Ok(ListingStatus::Approved),
            "rejected" => Ok(ListingStatus::Rejected),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

/// A business listed in the directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingId,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub address: String,
    pub coordinates: Coordinates,
    /// Photo URLs; the first one is the cover
    pub photos: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Digits including the country code, e.g. "6281234567890"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
}

/// Input for submitting a new listing.
///
/// Coordinates stay as raw text; they are parsed when the store validates the
/// submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewListingInput {
    #[validate(length(min = 1))]
    pub name: String,
    pub category: Category,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub address: String,
    pub latitude: String,
    pub longitude: String,
    #[validate(length(min = 1))]
    pub photos: Vec<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
}

/// Raw values of the admin submission form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingForm {
    pub name: String,
    /// English or Indonesian category label
    pub category: String,
    pub description: String,
    pub address: String,
    pub lat: String,
    pub lng: String,
    pub photo_url: String,
    pub phone: String,
    pub whatsapp: String,
}

impl ListingForm {
    /// Convert the form into a submission. Blank contact fields become `None`.
    ///
    /// Fails when the category is blank or not one of the known labels. A
    /// blank name is still reported first.
    pub fn into_input(self) -> Result<NewListingInput, ValidationError> {
        let category = match parse_category(&self.category) {
            Ok(category) => category,
            Err(_) if self.name.trim().is_empty() => return Err(ValidationError::missing("name")),
            Err(err) => return Err(err),
        };

        let photo_url = self.photo_url.trim().to_string();
        Ok(NewListingInput {
            name: self.name.trim().to_string(),
            category,
            description: self.description.trim().to_string(),
            address: self.address.trim().to_string(),
            latitude: self.lat.trim().to_string(),
            longitude: self.lng.trim().to_string(),
            photos: if photo_url.is_empty() { Vec::new() } else { vec![photo_url] },
            phone: non_blank(self.phone),
            whatsapp: non_blank(self.whatsapp),
        })
    }
}

fn parse_category(raw: &str) -> Result<Category, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::missing("category"));
    }
    raw.parse()
        .map_err(|_| ValidationError::unknown_choice("category", raw))
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

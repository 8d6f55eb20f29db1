//! The canonical found-disc entity and its lifecycle enums.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{DiscId, Timestamp};

/// Sentinel used when a reporter left a descriptive field blank.
pub const NOT_SPECIFIED: &str = "Not specified";

fn not_specified() -> String {
    NOT_SPECIFIED.to_string()
}

/// Visibility status of a found-disc report.
///
/// Only [`DiscStatus::Active`] records are ever visible through the read
/// surfaces this service consumes; the other states are managed by the
/// admin and claim workflows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscStatus {
    #[default]
    Active,
    Claimed,
    Expired,
    Spam,
}

/// Post-discovery disposition of a disc, mutated by the return-status
/// workflow (not by this service).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnStatus {
    #[default]
    Found,
    #[serde(rename = "Returned to Owner")]
    ReturnedToOwner,
    Donated,
    Sold,
    Trashed,
    #[serde(rename = "For Sale Used")]
    ForSaleUsed,
}

/// A found-disc record as read from the backing store.
///
/// All descriptive fields are optional free text except `brand` and
/// `color`, which default to the [`NOT_SPECIFIED`] sentinel. The record is
/// read-only from this service's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscRecord {
    pub id: DiscId,
    /// Human-facing lookup key, assigned by the store. Positive when set.
    #[serde(default)]
    pub rack_id: Option<i64>,
    #[serde(default = "not_specified")]
    pub brand: String,
    #[serde(default)]
    pub mold: Option<String>,
    #[serde(default)]
    pub disc_type: Option<String>,
    #[serde(default = "not_specified")]
    pub color: String,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub plastic_type: Option<String>,
    #[serde(default)]
    pub stamp_text: Option<String>,
    /// Contact hint found on the disc. Never validated at this layer.
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub name_on_disc: Option<String>,
    #[serde(default)]
    pub source_id: Option<DiscId>,
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(default)]
    pub location_found: Option<String>,
    #[serde(default)]
    pub found_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
    /// Ordered list of opaque image URLs; the referenced objects belong to
    /// the storage collaborator.
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub status: DiscStatus,
    #[serde(default)]
    pub return_status: ReturnStatus,
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl DiscRecord {
    /// The text fields consulted by free-text term matching, in a fixed
    /// order: brand, mold, color, location, description, stamp, phone,
    /// name, plastic, type.
    pub fn searchable_text(&self) -> [Option<&str>; 10] {
        [
            Some(self.brand.as_str()),
            self.mold.as_deref(),
            Some(self.color.as_str()),
            self.location_found.as_deref(),
            self.description.as_deref(),
            self.stamp_text.as_deref(),
            self.phone_number.as_deref(),
            self.name_on_disc.as_deref(),
            self.plastic_type.as_deref(),
            self.disc_type.as_deref(),
        ]
    }

    /// Rack identifier used for sorting; missing identifiers sort as 0.
    pub fn rack_sort_key(&self) -> i64 {
        self.rack_id.unwrap_or(0)
    }
}

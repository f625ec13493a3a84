//! Violation entity model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use parity_core::types::id::ViolationId;

use super::classification::{ChannelKind, ParityOutcome, RateAvailability};
use super::severity::Severity;

/// Shop metadata describing which product was compared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopDetails {
    /// Room type shopped.
    pub room_type: String,
    /// Board / meal plan.
    pub board_type: String,
    /// Point of sale; also determines the display currency.
    pub point_of_sale: String,
    /// Length of stay in nights.
    pub length_of_stay: u32,
    /// Number of guests.
    pub occupancy: u32,
}

/// One detected rate or availability mismatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Opaque identifier from the data source.
    pub id: ViolationId,
    /// Hotel display name.
    pub hotel_name: String,
    /// Brand the hotel belongs to.
    pub brand: String,
    /// Optional sub-brand.
    pub sub_brand: Option<String>,
    /// Channel the mismatching rate was observed on.
    pub channel: String,
    /// OTA or Meta channel.
    pub channel_kind: ChannelKind,
    /// OTA behind a metasearch listing. Only set when `channel_kind` is Meta.
    pub underlying_ota: Option<String>,
    /// Stay date the rate applies to.
    pub stay_date: NaiveDate,
    /// Shop metadata.
    pub shop: ShopDetails,
    /// Rate observed on the channel, in point-of-sale currency.
    pub rate: f64,
    /// Brand's own rate for the same product, if it was available.
    pub brand_rate: Option<f64>,
    /// Severity of the mismatch.
    pub severity: Severity,
    /// Win/Loss/Meet outcome.
    pub outcome: ParityOutcome,
    /// Rate or availability violation.
    pub kind: RateAvailability,
    /// Assigned reason; empty means unassigned.
    #[serde(default)]
    pub reason: String,
    /// Estimated revenue loss.
    pub revenue_loss: Option<f64>,
}

impl Violation {
    /// A violation with a reason counts as resolved and can no longer be escalated.
    pub fn is_resolved(&self) -> bool {
        !self.reason.is_empty()
    }

    /// Difference between channel rate and brand rate, if both exist.
    pub fn rate_gap(&self) -> Option<f64> {
        self.brand_rate.map(|brand| self.rate - brand)
    }
}

/// Partial update applied to a stored violation.
///
/// `None` fields are left untouched. `revenue_loss: Some(None)` clears
/// the estimate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViolationPatch {
    /// New reason (may be empty to unassign).
    pub reason: Option<String>,
    /// New revenue-loss estimate.
    pub revenue_loss: Option<Option<f64>>,
}

impl ViolationPatch {
    /// Patch that only sets the reason.
    pub fn reason(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Apply the patch in place.
    pub fn apply(&self, violation: &mut Violation) {
        if let Some(reason) = &self.reason {
            violation.reason = reason.clone();
        }
        if let Some(loss) = self.revenue_loss {
            violation.revenue_loss = loss;
        }
    }
}

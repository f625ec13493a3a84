//! Seeded mock violation data.
//!
//! Stands in for the shopping data feed until a real source exists.
//! The same seed always yields the same records.

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use parity_core::config::ReasonConfig;
use parity_core::types::id::ViolationId;
use parity_entity::violation::{
    ChannelKind, ParityOutcome, RateAvailability, Severity, ShopDetails, Violation,
};

/// (hotel, brand, sub-brand)
const HOTELS: &[(&str, &str, Option<&str>)] = &[
    ("Harbour View Downtown", "Coastline", None),
    ("Coastline Airport", "Coastline", Some("Coastline Express")),
    ("Summit Lodge Aspen", "Summit", None),
    ("Summit Suites Denver", "Summit", Some("Summit Suites")),
    ("Meridian Grand Paris", "Meridian", None),
    ("Meridian Riverside London", "Meridian", Some("Meridian Select")),
];

const OTAS: &[&str] = &["Booking.com", "Expedia", "Agoda", "Hotels.com"];
const METAS: &[&str] = &["Google Hotels", "Tripadvisor", "Trivago"];
const ROOM_TYPES: &[&str] = &["Standard King", "Deluxe Twin", "Junior Suite"];
const BOARD_TYPES: &[&str] = &["Room Only", "Breakfast Included", "Half Board"];
const POINTS_OF_SALE: &[&str] = &["US", "GB", "DE", "IN", "JP"];

/// Generates plausible violations from a fixed seed.
#[derive(Debug)]
pub struct MockViolationGenerator {
    rng: StdRng,
    start_date: NaiveDate,
    reasons: Vec<String>,
    resolved_ratio: f64,
}

impl MockViolationGenerator {
    /// Generator with the default reason vocabulary and a fixed start date.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default(),
            reasons: ReasonConfig::default().options,
            resolved_ratio: 0.3,
        }
    }

    /// First stay date to generate from.
    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self
    }

    /// Reason vocabulary used for pre-resolved records.
    pub fn with_reasons(mut self, reasons: Vec<String>) -> Self {
        self.reasons = reasons;
        self
    }

    /// Share of records that arrive with a reason already assigned.
    pub fn with_resolved_ratio(mut self, ratio: f64) -> Self {
        self.resolved_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Produce `count` violations with ids `v1..=v{count}`.
    pub fn generate(&mut self, count: usize) -> Vec<Violation> {
        (1..=count).map(|n| self.one(n)).collect()
    }

    fn one(&mut self, n: usize) -> Violation {
        let (hotel, brand, sub_brand) = *pick(&mut self.rng, HOTELS);
        let channel_kind = if self.rng.gen_bool(0.7) {
            ChannelKind::Ota
        } else {
            ChannelKind::Meta
        };
        let (channel, underlying_ota) = match channel_kind {
            ChannelKind::Ota => (*pick(&mut self.rng, OTAS), None),
            ChannelKind::Meta => (
                *pick(&mut self.rng, METAS),
                Some(pick(&mut self.rng, OTAS).to_string()),
            ),
        };
        let stay_date = self
            .start_date
            .checked_add_days(Days::new(self.rng.gen_range(0..90)))
            .unwrap_or(self.start_date);
        let length_of_stay: u32 = self.rng.gen_range(1..=3);

        let kind = if self.rng.gen_bool(0.15) {
            RateAvailability::Availability
        } else {
            RateAvailability::Rate
        };
        let reference = round2(self.rng.gen_range(80.0..400.0));
        let (rate, brand_rate) = match kind {
            RateAvailability::Availability => (reference, None),
            RateAvailability::Rate => {
                let factor = if self.rng.gen_bool(0.8) {
                    self.rng.gen_range(0.70..0.99)
                } else {
                    self.rng.gen_range(1.01..1.10)
                };
                (round2(reference * factor), Some(reference))
            }
        };
        let outcome = ParityOutcome::classify(rate, brand_rate);
        let severity = severity_for(rate, brand_rate);
        let revenue_loss = match (outcome, brand_rate) {
            (ParityOutcome::Loss, Some(brand)) => {
                let rooms = f64::from(self.rng.gen_range(1u32..=5));
                Some(round2((brand - rate) * f64::from(length_of_stay) * rooms))
            }
            (ParityOutcome::Loss, None) => Some(round2(rate * f64::from(length_of_stay))),
            _ => None,
        };
        let reason = if !self.reasons.is_empty() && self.rng.gen_bool(self.resolved_ratio) {
            pick(&mut self.rng, &self.reasons).clone()
        } else {
            String::new()
        };

        Violation {
            id: ViolationId::new(format!("v{n}")),
            hotel_name: hotel.to_string(),
            brand: brand.to_string(),
            sub_brand: sub_brand.map(String::from),
            channel: channel.to_string(),
            channel_kind,
            underlying_ota,
            stay_date,
            shop: ShopDetails {
                room_type: pick(&mut self.rng, ROOM_TYPES).to_string(),
                board_type: pick(&mut self.rng, BOARD_TYPES).to_string(),
                point_of_sale: pick(&mut self.rng, POINTS_OF_SALE).to_string(),
                length_of_stay,
                occupancy: self.rng.gen_range(1..=4),
            },
            rate,
            brand_rate,
            severity,
            outcome,
            kind,
            reason,
            revenue_loss,
        }
    }
}

/// Severity grows with the relative undercut; missing brand availability is Major.
fn severity_for(rate: f64, brand_rate: Option<f64>) -> Severity {
    let Some(brand) = brand_rate else {
        return Severity::Major;
    };
    let gap = (brand - rate) / brand;
    if gap >= 0.20 {
        Severity::Critical
    } else if gap >= 0.10 {
        Severity::Major
    } else if gap >= 0.05 {
        Severity::Minor
    } else {
        Severity::Trivial
    }
}

fn pick<'a, T>(rng: &mut StdRng, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_data() {
        let a = MockViolationGenerator::new(42).generate(20);
        let b = MockViolationGenerator::new(42).generate(20);
        assert_eq!(a, b);
    }

    #[test]
    fn test_records_are_well_formed() {
        let reasons = ReasonConfig::default();
        let list = MockViolationGenerator::new(3).generate(200);
        assert_eq!(list.len(), 200);
        assert_eq!(list[0].id.as_str(), "v1");
        for v in &list {
            assert!(reasons.accepts(&v.reason), "reason {:?}", v.reason);
            if v.channel_kind == ChannelKind::Ota {
                assert!(v.underlying_ota.is_none());
            } else {
                assert!(v.underlying_ota.is_some());
            }
            if v.kind == RateAvailability::Availability {
                assert!(v.brand_rate.is_none());
            }
            assert_eq!(v.outcome, ParityOutcome::classify(v.rate, v.brand_rate));
        }
    }

    #[test]
    fn test_no_reasons_when_ratio_zero() {
        let list = MockViolationGenerator::new(9)
            .with_resolved_ratio(0.0)
            .generate(50);
        assert!(list.iter().all(|v| v.reason.is_empty()));
    }

    #[test]
    fn test_severity_thresholds() {
        assert_eq!(severity_for(75.0, Some(100.0)), Severity::Critical);
        assert_eq!(severity_for(88.0, Some(100.0)), Severity::Major);
        assert_eq!(severity_for(94.0, Some(100.0)), Severity::Minor);
        assert_eq!(severity_for(99.0, Some(100.0)), Severity::Trivial);
        assert_eq!(severity_for(120.0, None), Severity::Major);
    }
}

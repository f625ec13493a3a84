//! Multi-facet violation filter.
//!
//! Every active facet must match (AND across facets); a multi-select
//! facet matches if any selected value matches (OR within a facet).
//! An empty set or `None` means the facet is inactive.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use parity_entity::violation::{ChannelKind, ParityOutcome, RateAvailability, Severity, Violation};

/// Reason facet.
///
/// `Unassigned` matches only violations with an empty reason and is
/// distinct from `All`, which does not filter at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "value")]
pub enum ReasonFilter {
    /// No reason filtering.
    #[default]
    All,
    /// Only violations without a reason.
    Unassigned,
    /// Only violations with exactly this reason.
    Exact(String),
}

impl ReasonFilter {
    fn matches(&self, reason: &str) -> bool {
        match self {
            Self::All => true,
            Self::Unassigned => reason.is_empty(),
            Self::Exact(wanted) => reason == wanted,
        }
    }
}

/// Inclusive stay-date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range; swapped bounds are put in order.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// A range covering one calendar day.
    pub fn day(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    /// First day.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether the range collapses to a single day.
    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }

    /// Inclusive containment.
    pub fn contains(&self, day: NaiveDate) -> bool {
        if self.is_single_day() {
            return day == self.start;
        }
        self.start <= day && day <= self.end
    }
}

/// Wire form of [`DateRange`]; bounds may arrive in either order.
#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl From<RawDateRange> for DateRange {
    fn from(raw: RawDateRange) -> Self {
        Self::new(raw.start, raw.end)
    }
}

/// Snapshot of every active facet of the violation table.
///
/// Read-only input to [`filter_violations`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Severities to admit; empty admits all.
    #[serde(default)]
    pub severities: BTreeSet<Severity>,
    /// Rate or availability; `None` is "All".
    #[serde(default)]
    pub kind: Option<RateAvailability>,
    /// Reason facet.
    #[serde(default)]
    pub reason: ReasonFilter,
    /// Stay-date range.
    #[serde(default)]
    pub date_range: Option<DateRange>,
    /// Day picked on the calendar widget.
    #[serde(default)]
    pub calendar_date: Option<NaiveDate>,
    /// Channel names to admit; empty admits all.
    #[serde(default)]
    pub channels: BTreeSet<String>,
    /// Hotels resolved from the brand/region/hotel selection; empty admits all.
    #[serde(default)]
    pub locations: BTreeSet<String>,
    /// Win/Loss/Meet outcome.
    #[serde(default)]
    pub outcome: Option<ParityOutcome>,
    /// OTA or Meta.
    #[serde(default)]
    pub channel_kind: Option<ChannelKind>,
    /// Case-insensitive text matched against hotel and channel names.
    #[serde(default)]
    pub search: Option<String>,
}

impl FilterState {
    /// A filter with no active facets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit only the given severities.
    pub fn with_severities(mut self, severities: impl IntoIterator<Item = Severity>) -> Self {
        self.severities = severities.into_iter().collect();
        self
    }

    /// Restrict to rate or availability violations.
    pub fn with_kind(mut self, kind: RateAvailability) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the reason facet.
    pub fn with_reason(mut self, reason: ReasonFilter) -> Self {
        self.reason = reason;
        self
    }

    /// Restrict to a stay-date range.
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Restrict to one calendar day.
    pub fn with_calendar_date(mut self, day: NaiveDate) -> Self {
        self.calendar_date = Some(day);
        self
    }

    /// Admit only the given channels.
    pub fn with_channels<S: Into<String>>(mut self, channels: impl IntoIterator<Item = S>) -> Self {
        self.channels = channels.into_iter().map(Into::into).collect();
        self
    }

    /// Admit only the given hotels.
    pub fn with_locations<S: Into<String>>(
        mut self,
        locations: impl IntoIterator<Item = S>,
    ) -> Self {
        self.locations = locations.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict to one outcome.
    pub fn with_outcome(mut self, outcome: ParityOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    /// Restrict to one channel kind.
    pub fn with_channel_kind(mut self, kind: ChannelKind) -> Self {
        self.channel_kind = Some(kind);
        self
    }

    /// Free-text search.
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Whether no facet is active.
    pub fn is_empty(&self) -> bool {
        self.severities.is_empty()
            && self.kind.is_none()
            && self.reason == ReasonFilter::All
            && self.date_range.is_none()
            && self.calendar_date.is_none()
            && self.channels.is_empty()
            && self.locations.is_empty()
            && self.outcome.is_none()
            && self.channel_kind.is_none()
            && self.search.as_deref().is_none_or(|s| s.trim().is_empty())
    }

    /// Evaluate every active facet against one violation.
    pub fn matches(&self, v: &Violation) -> bool {
        (self.severities.is_empty() || self.severities.contains(&v.severity))
            && self.kind.is_none_or(|k| k == v.kind)
            && self.reason.matches(&v.reason)
            && self.date_range.is_none_or(|r| r.contains(v.stay_date))
            && self.calendar_date.is_none_or(|d| d == v.stay_date)
            && (self.channels.is_empty() || self.channels.contains(&v.channel))
            && (self.locations.is_empty() || self.locations.contains(&v.hotel_name))
            && self.outcome.is_none_or(|o| o == v.outcome)
            && self.channel_kind.is_none_or(|k| k == v.channel_kind)
            && self.matches_search(v)
    }

    fn matches_search(&self, v: &Violation) -> bool {
        let Some(needle) = self.search.as_deref().map(str::trim) else {
            return true;
        };
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        v.hotel_name.to_lowercase().contains(&needle) || v.channel.to_lowercase().contains(&needle)
    }
}

/// Reduce `violations` to those matching `state`, preserving order.
pub fn filter_violations(violations: &[Violation], state: &FilterState) -> Vec<Violation> {
    violations
        .iter()
        .filter(|v| state.matches(v))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::mock::MockViolationGenerator;
    use parity_core::types::id::ViolationId;

    fn ids(list: &[Violation]) -> Vec<ViolationId> {
        list.iter().map(|v| v.id.clone()).collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let list = MockViolationGenerator::new(1).generate(30);
        assert!(FilterState::new().is_empty());
        assert_eq!(filter_violations(&list, &FilterState::new()), list);
    }

    #[test]
    fn test_severity_is_or_within_facet() {
        let list = MockViolationGenerator::new(2).generate(60);
        let state = FilterState::new().with_severities([Severity::Critical, Severity::Major]);
        let out = filter_violations(&list, &state);
        let expected = list
            .iter()
            .filter(|v| matches!(v.severity, Severity::Critical | Severity::Major))
            .count();
        assert_eq!(out.len(), expected);
        assert!(!out.is_empty());
    }

    #[test]
    fn test_facets_are_and_across() {
        let list = MockViolationGenerator::new(3).generate(120);
        let a = FilterState::new().with_severities([Severity::Critical]);
        let b = FilterState::new().with_channel_kind(ChannelKind::Ota);
        let both = FilterState::new()
            .with_severities([Severity::Critical])
            .with_channel_kind(ChannelKind::Ota);

        let only_a = ids(&filter_violations(&list, &a));
        let only_b = ids(&filter_violations(&list, &b));
        for id in ids(&filter_violations(&list, &both)) {
            assert!(only_a.contains(&id) && only_b.contains(&id));
        }
    }

    #[test]
    fn test_reason_unassigned_differs_from_all() {
        let mut list = MockViolationGenerator::new(4).generate(10);
        list[0].reason = "Other".to_string();
        list[1].reason.clear();

        let unassigned =
            filter_violations(&list, &FilterState::new().with_reason(ReasonFilter::Unassigned));
        assert!(unassigned.iter().all(|v| v.reason.is_empty()));
        assert!(!ids(&unassigned).contains(&list[0].id));

        let exact = filter_violations(
            &list,
            &FilterState::new().with_reason(ReasonFilter::Exact("Other".to_string())),
        );
        assert!(exact.iter().all(|v| v.reason == "Other"));
        assert!(ids(&exact).contains(&list[0].id));

        let all = filter_violations(&list, &FilterState::new().with_reason(ReasonFilter::All));
        assert_eq!(all.len(), list.len());
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let mut list = MockViolationGenerator::new(5).generate(3);
        list[0].stay_date = date(2026, 2, 1);
        list[1].stay_date = date(2026, 2, 10);
        list[2].stay_date = date(2026, 2, 11);

        let range = DateRange::new(date(2026, 2, 10), date(2026, 2, 1));
        assert_eq!(range.start(), date(2026, 2, 1));
        let out = filter_violations(&list, &FilterState::new().with_date_range(range));
        assert_eq!(ids(&out), ids(&list[..2]));
    }

    #[test]
    fn test_deserialized_range_orders_swapped_bounds() {
        let mut list = MockViolationGenerator::new(5).generate(1);
        list[0].stay_date = date(2026, 2, 5);

        let state: FilterState = serde_json::from_str(
            r#"{"date_range":{"start":"2026-02-10","end":"2026-02-01"}}"#,
        )
        .unwrap();
        let range = state.date_range.unwrap();
        assert_eq!(range, DateRange::new(date(2026, 2, 1), date(2026, 2, 10)));
        assert_eq!(filter_violations(&list, &state).len(), 1);

        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(serde_json::from_str::<DateRange>(&json).unwrap(), range);
    }

    #[test]
    fn test_single_day_range_and_calendar_date() {
        let mut list = MockViolationGenerator::new(6).generate(3);
        list[0].stay_date = date(2026, 5, 4);
        list[1].stay_date = date(2026, 5, 5);
        list[2].stay_date = date(2026, 5, 4);

        let day = DateRange::day(date(2026, 5, 4));
        assert!(day.is_single_day());
        let by_range = filter_violations(&list, &FilterState::new().with_date_range(day));
        let by_calendar =
            filter_violations(&list, &FilterState::new().with_calendar_date(date(2026, 5, 4)));
        assert_eq!(ids(&by_range), vec![list[0].id.clone(), list[2].id.clone()]);
        assert_eq!(by_range, by_calendar);
    }

    #[test]
    fn test_channel_and_location_membership() {
        let list = MockViolationGenerator::new(8).generate(80);
        let channel = list[0].channel.clone();
        let hotel = list[0].hotel_name.clone();
        let state = FilterState::new()
            .with_channels([channel.clone()])
            .with_locations([hotel.clone()]);
        let out = filter_violations(&list, &state);
        assert!(ids(&out).contains(&list[0].id));
        assert!(out.iter().all(|v| v.channel == channel && v.hotel_name == hotel));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let list = MockViolationGenerator::new(10).generate(40);
        let needle = list[0].hotel_name.to_uppercase();
        let out = filter_violations(&list, &FilterState::new().with_search(needle));
        assert!(ids(&out).contains(&list[0].id));
        assert!(FilterState::new().with_search("   ").is_empty());
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let list = MockViolationGenerator::new(11).generate(20);
        let state = FilterState::new().with_locations(["Nowhere Inn"]);
        assert!(filter_violations(&list, &state).is_empty());
    }
}

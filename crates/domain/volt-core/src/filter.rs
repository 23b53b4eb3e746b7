//! Client-side filtering of fetched lists.
//!
//! A predicate combines a case-insensitive substring search over a fixed set of
//! per-entity text fields with exact-match facets on status and type. All three
//! conditions are AND-ed and the input order is preserved.

use crate::payment::Payment;
use crate::port::ChargingPort;
use crate::ride::Ride;
use crate::stats::{PaymentStats, PortStats, RideStats, VehicleStats};
use crate::vehicle::Vehicle;

const ALL: &str = "all";

/// One dropdown constraint. `All` admits every value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Facet {
    #[default]
    All,
    Only(String),
}

impl Facet {
    /// Parses a dropdown value; `"all"` and the empty string mean no constraint.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == ALL {
            Facet::All
        } else {
            Facet::Only(value.to_string())
        }
    }

    pub fn admits(&self, value: Option<&str>) -> bool {
        match self {
            Facet::All => true,
            Facet::Only(wanted) => value == Some(wanted.as_str()),
        }
    }
}

impl From<Option<String>> for Facet {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Facet::parse).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPredicate {
    pub search_text: String,
    pub status: Facet,
    pub kind: Facet,
}

impl FilterPredicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.status = Facet::parse(status);
        self
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.kind = Facet::parse(kind);
        self
    }

    pub fn matches<T: Filterable>(&self, item: &T) -> bool {
        self.matches_text(item)
            && self.status.admits(Some(item.status()))
            && self.kind.admits(item.kind())
    }

    fn matches_text<T: Filterable>(&self, item: &T) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        item.search_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// An entity that can be searched, faceted and summarized.
pub trait Filterable: Sized {
    type Stats: Default;

    /// Text fields the search box looks at.
    fn search_fields(&self) -> Vec<&str>;
    fn status(&self) -> &str;
    /// Value compared against the type facet (vehicle type, payment method, connector).
    fn kind(&self) -> Option<&str> {
        None
    }
    fn summarize(items: &[Self]) -> Self::Stats;
}

pub fn filter_items<T: Filterable + Clone>(items: &[T], predicate: &FilterPredicate) -> Vec<T> {
    items
        .iter()
        .filter(|item| predicate.matches(*item))
        .cloned()
        .collect()
}

/// Filtered list plus the reductions computed over it. Never stored.
#[derive(Debug, Clone)]
pub struct DerivedView<T: Filterable> {
    pub filtered: Vec<T>,
    pub stats: T::Stats,
}

pub fn derive<T: Filterable + Clone>(items: &[T], predicate: &FilterPredicate) -> DerivedView<T> {
    let filtered = filter_items(items, predicate);
    let stats = T::summarize(&filtered);
    DerivedView { filtered, stats }
}

fn text(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("")
}

impl Filterable for Vehicle {
    type Stats = VehicleStats;

    fn search_fields(&self) -> Vec<&str> {
        vec![
            text(&self.vehicle_id),
            text(&self.vehicle_number),
            text(&self.vehicle_name),
        ]
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn kind(&self) -> Option<&str> {
        self.vehicle_type.as_deref()
    }

    fn summarize(items: &[Self]) -> VehicleStats {
        VehicleStats::from_vehicles(items)
    }
}

impl Filterable for Ride {
    type Stats = RideStats;

    fn search_fields(&self) -> Vec<&str> {
        vec![
            text(&self.ride_id),
            text(&self.user_id),
            text(&self.vehicle_id),
        ]
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn summarize(items: &[Self]) -> RideStats {
        RideStats::from_rides(items)
    }
}

impl Filterable for Payment {
    type Stats = PaymentStats;

    fn search_fields(&self) -> Vec<&str> {
        vec![
            text(&self.payment_id),
            text(&self.ride_id),
            text(&self.user_id),
        ]
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn kind(&self) -> Option<&str> {
        self.mode.as_deref()
    }

    fn summarize(items: &[Self]) -> PaymentStats {
        PaymentStats::from_payments(items)
    }
}

impl Filterable for ChargingPort {
    type Stats = PortStats;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.port_id.as_str(), text(&self.connector_type)]
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn kind(&self) -> Option<&str> {
        self.connector_type.as_deref()
    }

    fn summarize(items: &[Self]) -> PortStats {
        PortStats::from_ports(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(id: &str, status: &str, kind: &str) -> Vehicle {
        serde_json::from_value(serde_json::json!({
            "vehicle_id": id,
            "vehicle_number": format!("KA-01-{id}"),
            "vehicle_name": "Ather 450X",
            "type": kind,
            "status": status,
        }))
        .unwrap()
    }

    #[test]
    fn facet_parse_treats_all_and_empty_as_unconstrained() {
        assert_eq!(Facet::parse("all"), Facet::All);
        assert_eq!(Facet::parse(""), Facet::All);
        assert_eq!(Facet::parse("charging"), Facet::Only("charging".into()));
        assert!(!Facet::parse("scooter").admits(None));
    }

    #[test]
    fn search_hits_any_listed_field() {
        let items = vec![vehicle("V1", "available", "Scooter"), vehicle("V2", "charging", "Bike")];
        let by_number = filter_items(&items, &FilterPredicate::new().search("ka-01-v2"));
        assert_eq!(by_number.len(), 1);
        assert_eq!(by_number[0].id(), "V2");

        let by_name = filter_items(&items, &FilterPredicate::new().search("ATHER"));
        assert_eq!(by_name.len(), 2);
    }

    #[test]
    fn facets_and_search_are_combined() {
        let items = vec![
            vehicle("V1", "available", "Scooter"),
            vehicle("V2", "available", "Bike"),
            vehicle("V3", "charging", "Scooter"),
        ];
        let pred = FilterPredicate::new().status("available").kind("Scooter");
        let out = filter_items(&items, &pred);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id(), "V1");

        let none = filter_items(&items, &pred.search("V3"));
        assert!(none.is_empty());
    }

    #[test]
    fn rides_without_type_reject_a_type_facet() {
        let ride: Ride = serde_json::from_value(serde_json::json!({
            "ride_id": "R1", "status": "active"
        }))
        .unwrap();
        assert!(FilterPredicate::new().matches(&ride));
        assert!(!FilterPredicate::new().kind("Scooter").matches(&ride));
    }
}

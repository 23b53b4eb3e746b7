use std::collections::BTreeMap;

use crate::payment::Payment;
use crate::port::ChargingPort;
use crate::ride::Ride;
use crate::vehicle::Vehicle;

/// `part / whole` as a percentage rounded to two decimals; `0.0` when `whole` is zero.
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 || !whole.is_finite() {
        return 0.0;
    }
    ((part / whole) * 100.0 * 100.0).round() / 100.0
}

fn count_by_status<'a>(statuses: impl Iterator<Item = &'a str>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for s in statuses {
        *counts.entry(s.to_string()).or_insert(0) += 1;
    }
    counts
}

fn sum_where<T>(items: &[T], keep: impl Fn(&T) -> bool, value: impl Fn(&T) -> f64) -> f64 {
    items.iter().filter(|i| keep(*i)).map(value).sum()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleStats {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub average_battery: f64,
}

impl VehicleStats {
    pub fn from_vehicles(vehicles: &[Vehicle]) -> Self {
        let total = vehicles.len();
        let battery_sum: f64 = vehicles.iter().map(|v| v.battery).sum();
        let average_battery = if total == 0 {
            0.0
        } else {
            battery_sum / total as f64
        };
        Self {
            total,
            by_status: count_by_status(vehicles.iter().map(|v| v.status.as_str())),
            average_battery,
        }
    }

    pub fn count(&self, status: &str) -> usize {
        self.by_status.get(status).copied().unwrap_or(0)
    }

    pub fn available(&self) -> usize {
        self.count("available")
    }

    pub fn charging(&self) -> usize {
        self.count("charging")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RideStats {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    /// Fare collected on completed rides.
    pub completed_fare: f64,
    pub completion_rate: f64,
}

impl RideStats {
    pub fn from_rides(rides: &[Ride]) -> Self {
        let by_status = count_by_status(rides.iter().map(|r| r.status.as_str()));
        let completed = by_status.get("completed").copied().unwrap_or(0);
        Self {
            total: rides.len(),
            completed_fare: sum_where(rides, |r| r.status == "completed", |r| r.fare),
            completion_rate: percentage(completed as f64, rides.len() as f64),
            by_status,
        }
    }

    pub fn count(&self, status: &str) -> usize {
        self.by_status.get(status).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentStats {
    pub count: usize,
    pub by_status: BTreeMap<String, usize>,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub pending_amount: f64,
    /// Paid amount as a share of the total, in percent.
    pub paid_share: f64,
}

impl PaymentStats {
    pub fn from_payments(payments: &[Payment]) -> Self {
        let total_amount = payments.iter().map(|p| p.amount).sum();
        let paid_amount = sum_where(payments, |p| p.status == "paid", |p| p.amount);
        let pending_amount = sum_where(payments, |p| p.status == "pending", |p| p.amount);
        Self {
            count: payments.len(),
            by_status: count_by_status(payments.iter().map(|p| p.status.as_str())),
            total_amount,
            paid_amount,
            pending_amount,
            paid_share: percentage(paid_amount, total_amount),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortStats {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    /// Occupied ports as a share of all ports, in percent.
    pub utilization: f64,
}

impl PortStats {
    pub fn from_ports(ports: &[ChargingPort]) -> Self {
        let by_status = count_by_status(ports.iter().map(|p| p.status.as_str()));
        let occupied = by_status.get("occupied").copied().unwrap_or(0);
        Self {
            total: ports.len(),
            utilization: percentage(occupied as f64, ports.len() as f64),
            by_status,
        }
    }

    pub fn count(&self, status: &str) -> usize {
        self.by_status.get(status).copied().unwrap_or(0)
    }

    pub fn available(&self) -> usize {
        self.count("available")
    }

    pub fn occupied(&self) -> usize {
        self.count("occupied")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_of_zero_is_zero() {
        assert_eq!(percentage(5.0, 0.0), 0.0);
        assert_eq!(percentage(1.0, 3.0), 33.33);
    }

    #[test]
    fn empty_inputs_yield_zeroed_stats() {
        assert_eq!(VehicleStats::from_vehicles(&[]), VehicleStats::default());
        assert_eq!(RideStats::from_rides(&[]), RideStats::default());
        assert_eq!(PaymentStats::from_payments(&[]), PaymentStats::default());
        assert_eq!(PortStats::from_ports(&[]), PortStats::default());
    }

    #[test]
    fn ride_fare_counts_completed_only() {
        let rides: Vec<Ride> = serde_json::from_value(serde_json::json!([
            { "ride_id": "R1", "status": "completed", "fare": 40.0 },
            { "ride_id": "R2", "status": "active", "fare": 15.0 },
            { "ride_id": "R3", "status": "completed", "fare": 10.0 },
            { "ride_id": "R4", "status": "cancelled" }
        ]))
        .unwrap();
        let stats = RideStats::from_rides(&rides);
        assert_eq!(stats.completed_fare, 50.0);
        assert_eq!(stats.count("active"), 1);
        assert_eq!(stats.completion_rate, 50.0);
    }

    #[test]
    fn port_utilization_uses_occupied_share() {
        let ports: Vec<ChargingPort> = serde_json::from_value(serde_json::json!([
            { "port_id": "P1", "status": "occupied" },
            { "port_id": "P2", "status": "available" },
            { "port_id": "P3", "status": "available" },
            { "port_id": "P4", "status": "maintenance" }
        ]))
        .unwrap();
        let stats = PortStats::from_ports(&ports);
        assert_eq!(stats.occupied(), 1);
        assert_eq!(stats.available(), 2);
        assert_eq!(stats.utilization, 25.0);
    }
}

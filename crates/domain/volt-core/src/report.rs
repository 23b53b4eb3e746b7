use serde::{Deserialize, Serialize};

use crate::stats::percentage;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    #[serde(default)]
    pub total_rides: u64,
    #[serde(default)]
    pub today_rides: u64,
    #[serde(default)]
    pub week_rides: u64,
    #[serde(default)]
    pub month_rides: u64,
    #[serde(default)]
    pub completed_rides: u64,
    #[serde(default)]
    pub active_rides: u64,
    #[serde(default)]
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodTotal {
    #[serde(default, rename = "_id")]
    pub mode: Option<String>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub total_amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueReport {
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub today_revenue: f64,
    #[serde(default)]
    pub avg_revenue_per_ride: f64,
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethodTotal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatteryStats {
    #[serde(default)]
    pub average: f64,
    #[serde(default)]
    pub minimum: f64,
    #[serde(default)]
    pub maximum: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetReport {
    #[serde(default)]
    pub total_vehicles: u64,
    #[serde(default)]
    pub available_vehicles: u64,
    #[serde(default)]
    pub charging_vehicles: u64,
    #[serde(default)]
    pub in_use_vehicles: u64,
    #[serde(default)]
    pub utilization_rate: f64,
    #[serde(default)]
    pub battery_stats: BatteryStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureReport {
    #[serde(default)]
    pub total_ports: u64,
    #[serde(default)]
    pub available_ports: u64,
    #[serde(default)]
    pub occupied_ports: u64,
    #[serde(default)]
    pub port_utilization: f64,
    #[serde(default)]
    pub total_port_usage: f64,
    #[serde(default)]
    pub avg_port_usage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTrend {
    pub date: String,
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub rides: u64,
    #[serde(default)]
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularVehicle {
    #[serde(default, rename = "_id")]
    pub vehicle_id: Option<String>,
    #[serde(default)]
    pub ride_count: u64,
    #[serde(default)]
    pub total_distance: f64,
    #[serde(default)]
    pub total_duration: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyMetrics {
    #[serde(default)]
    pub avg_ride_duration: f64,
    #[serde(default)]
    pub avg_ride_distance: f64,
    #[serde(default)]
    pub avg_fare: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendsReport {
    #[serde(default)]
    pub daily_trends: Vec<DailyTrend>,
    #[serde(default)]
    pub popular_vehicles: Vec<PopularVehicle>,
    #[serde(default)]
    pub efficiency_metrics: EfficiencyMetrics,
}

/// Server-compiled station analytics from `GET reports/{station}/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub station_id: Option<String>,
    #[serde(default)]
    pub generated_at: Option<String>,
    #[serde(default)]
    pub summary: ReportSummary,
    #[serde(default)]
    pub revenue: RevenueReport,
    #[serde(default)]
    pub fleet: FleetReport,
    #[serde(default)]
    pub infrastructure: InfrastructureReport,
    #[serde(default)]
    pub trends: TrendsReport,
}

impl Report {
    /// Share of revenue carried by each payment method, in percent.
    pub fn payment_method_shares(&self) -> Vec<(String, f64)> {
        let total: f64 = self
            .revenue
            .payment_methods
            .iter()
            .map(|m| m.total_amount)
            .sum();
        self.revenue
            .payment_methods
            .iter()
            .map(|m| {
                (
                    m.mode.clone().unwrap_or_else(|| "unknown".to_string()),
                    percentage(m.total_amount, total),
                )
            })
            .collect()
    }

    /// Highest single-day revenue in the trend window; scales trend bars.
    pub fn peak_daily_revenue(&self) -> f64 {
        self.trends
            .daily_trends
            .iter()
            .map(|d| d.revenue)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_are_zero_when_no_revenue() {
        let report = Report {
            revenue: RevenueReport {
                payment_methods: vec![PaymentMethodTotal {
                    mode: Some("upi".into()),
                    count: 0,
                    total_amount: 0.0,
                }],
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(report.payment_method_shares(), vec![("upi".to_string(), 0.0)]);
        assert_eq!(report.peak_daily_revenue(), 0.0);
    }

    #[test]
    fn shares_split_revenue() {
        let raw = serde_json::json!({
            "revenue": { "payment_methods": [
                { "_id": "upi", "count": 3, "total_amount": 75.0 },
                { "_id": "cash", "count": 1, "total_amount": 25.0 }
            ]}
        });
        let report: Report = serde_json::from_value(raw).unwrap();
        let shares = report.payment_method_shares();
        assert_eq!(shares[0], ("upi".to_string(), 75.0));
        assert_eq!(shares[1], ("cash".to_string(), 25.0));
    }
}

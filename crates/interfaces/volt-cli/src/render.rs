//! Plain-text rendering of page state. Every function returns the text so callers
//! decide where it goes.

use std::fmt::Write;

use volt_app_core::ViewState;
use volt_core::{
    percentage, AvailableVehicle, CapacityInfo, ChargingPort, DerivedView, NearbyStation, Payment,
    Report, Ride, StationSettings, Vehicle,
};

fn or_dash(v: &Option<String>) -> &str {
    v.as_deref().filter(|s| !s.is_empty()).unwrap_or("-")
}

pub fn money(amount: f64) -> String {
    format!("₹{amount:.2}")
}

/// One line per secondary resource whose latest load failed.
pub fn partial_lines(state: &ViewState) -> String {
    let mut out = String::new();
    for (key, err) in state.partial_errors() {
        let _ = writeln!(out, "   partial data: {key} unavailable ({err})");
    }
    out
}

pub fn dashboard(state: &ViewState) -> String {
    let mut out = String::new();
    if let Some(station) = state.station_details() {
        let _ = writeln!(
            out,
            ":: {} ({})",
            or_dash(&station.name),
            or_dash(&station.station_id)
        );
        let _ = writeln!(out, "   {}", station.location_line());
    }
    if let Some(s) = state.summary() {
        let _ = writeln!(out, "   Total Vehicles:   {}", s.total_vehicles);
        let _ = writeln!(out, "   Active Rides:     {}", s.active_rides);
        let _ = writeln!(out, "   Total Rides:      {}", s.total_rides);
        let _ = writeln!(out, "   Collection:       {}", money(s.total_collection));
        let _ = writeln!(out, "   Pending Payments: {}", money(s.pending_payments));
    }

    let _ = writeln!(out, "\n:: Active Rides ({})", state.active_rides().len());
    for r in state.active_rides() {
        let _ = writeln!(
            out,
            "   {:<14} {:<12} {:<10} {:>6.0} min",
            or_dash(&r.ride_id),
            or_dash(&r.user_id),
            or_dash(&r.vehicle_id),
            r.duration_minutes
        );
    }

    let vehicles = state.dashboard_vehicles();
    let _ = writeln!(out, "\n:: Vehicles ({})", vehicles.len());
    for v in vehicles {
        let _ = writeln!(
            out,
            "   {:<12} {:<12} {:>5.0}%",
            v.id(),
            v.status,
            v.battery
        );
    }
    out.push_str(&partial_lines(state));
    out
}

pub fn vehicles(view: &DerivedView<Vehicle>, capacity: Option<&CapacityInfo>) -> String {
    let mut out = String::new();
    let s = &view.stats;
    let _ = writeln!(
        out,
        ":: Vehicles: {} shown, {} available, {} charging, avg battery {:.0}%",
        s.total,
        s.available(),
        s.charging(),
        s.average_battery
    );
    if let Some(c) = capacity {
        let _ = writeln!(
            out,
            "   Capacity: {}/{} ({} free{})",
            c.current_count,
            c.total_capacity,
            c.available_slots,
            if c.is_full { ", FULL" } else { "" }
        );
    }
    let _ = writeln!(
        out,
        "{:<12} {:<12} {:<18} {:<10} {:<12} {:>7}",
        "ID", "NUMBER", "NAME", "TYPE", "STATUS", "BATTERY"
    );
    for v in &view.filtered {
        let _ = writeln!(
            out,
            "{:<12} {:<12} {:<18} {:<10} {:<12} {:>6.0}%",
            v.id(),
            or_dash(&v.vehicle_number),
            or_dash(&v.vehicle_name),
            or_dash(&v.vehicle_type),
            v.status,
            v.battery
        );
    }
    out
}

pub fn vehicle_details(v: &Vehicle) -> String {
    let mut out = String::new();
    let _ = writeln!(out, ":: Vehicle {}", v.id());
    let _ = writeln!(out, "   Number:   {}", or_dash(&v.vehicle_number));
    let _ = writeln!(out, "   Name:     {}", or_dash(&v.vehicle_name));
    let _ = writeln!(out, "   Type:     {}", or_dash(&v.vehicle_type));
    let _ = writeln!(out, "   Model:    {}", or_dash(&v.model));
    let _ = writeln!(out, "   Status:   {}", v.status);
    let _ = writeln!(out, "   Battery:  {:.0}%", v.battery);
    let _ = writeln!(out, "   Odometer: {:.1} km", v.odometer_reading);
    if let Some(rate) = &v.rental_rate {
        let _ = writeln!(
            out,
            "   Rate:     {}/km, {}/hour",
            money(rate.per_km),
            money(rate.per_hour)
        );
    }
    if let Some(port) = &v.charging_port_info {
        let _ = writeln!(out, "   Port:     {}", or_dash(&port.port_id));
    }
    out
}

pub fn nearby(stations: &[NearbyStation]) -> String {
    let mut out = format!("{:<12} {:<24} {:>9} {:>6}\n", "STATION", "NAME", "VEHICLES", "FREE");
    for s in stations {
        let _ = writeln!(
            out,
            "{:<12} {:<24} {:>9} {:>6}{}",
            s.station_id,
            or_dash(&s.station_name),
            s.current_vehicles,
            s.available_capacity,
            if s.is_full { "  full" } else { "" }
        );
    }
    out
}

pub fn rides(view: &DerivedView<Ride>) -> String {
    let mut out = String::new();
    let s = &view.stats;
    let _ = writeln!(
        out,
        ":: Rides: {} shown, {} completed, {} active, {} cancelled, completed fare {} ({:.2}% completion)",
        s.total,
        s.count("completed"),
        s.count("active"),
        s.count("cancelled"),
        money(s.completed_fare),
        s.completion_rate
    );
    let _ = writeln!(
        out,
        "{:<14} {:<12} {:<10} {:<10} {:>10}",
        "RIDE", "USER", "VEHICLE", "STATUS", "FARE"
    );
    for r in &view.filtered {
        let _ = writeln!(
            out,
            "{:<14} {:<12} {:<10} {:<10} {:>10}",
            or_dash(&r.ride_id),
            or_dash(&r.user_id),
            or_dash(&r.vehicle_id),
            r.status,
            money(r.fare)
        );
    }
    out
}

pub fn payments(view: &DerivedView<Payment>) -> String {
    let mut out = String::new();
    let s = &view.stats;
    let _ = writeln!(
        out,
        ":: Payments: {} shown, total {}, paid {}, pending {} ({:.2}% paid)",
        s.count,
        money(s.total_amount),
        money(s.paid_amount),
        money(s.pending_amount),
        s.paid_share
    );
    let _ = writeln!(
        out,
        "{:<14} {:<14} {:<12} {:<8} {:<10} {:>10}",
        "PAYMENT", "RIDE", "USER", "METHOD", "STATUS", "AMOUNT"
    );
    for p in &view.filtered {
        let _ = writeln!(
            out,
            "{:<14} {:<14} {:<12} {:<8} {:<10} {:>10}",
            or_dash(&p.payment_id),
            or_dash(&p.ride_id),
            or_dash(&p.user_id),
            or_dash(&p.mode),
            p.status,
            money(p.amount)
        );
    }
    out
}

pub fn ports(view: &DerivedView<ChargingPort>, available: &[AvailableVehicle]) -> String {
    let mut out = String::new();
    let s = &view.stats;
    let _ = writeln!(
        out,
        ":: Charging Ports: {} shown, {} available, {} occupied, {:.2}% utilization",
        s.total,
        s.available(),
        s.occupied(),
        s.utilization
    );
    let _ = writeln!(
        out,
        "{:<8} {:<12} {:<10} {:>8} {:<10}",
        "PORT", "STATUS", "CONNECTOR", "KW", "VEHICLE"
    );
    for p in &view.filtered {
        let _ = writeln!(
            out,
            "{:<8} {:<12} {:<10} {:>8.1} {:<10}",
            p.port_id,
            p.status,
            or_dash(&p.connector_type),
            p.max_power_kw,
            or_dash(&p.current_vehicle_id)
        );
    }
    if !available.is_empty() {
        let ids: Vec<&str> = available.iter().map(|v| v.vehicle_id.as_str()).collect();
        let _ = writeln!(out, "   Ready to plug in: {}", ids.join(", "));
    }
    out
}

pub fn report(report: Option<&Report>) -> String {
    let Some(r) = report else {
        return ":: No report data available\n".to_string();
    };
    let mut out = String::new();
    let _ = writeln!(out, ":: Station Report ({})", or_dash(&r.generated_at));
    let _ = writeln!(
        out,
        "   Rides: {} total, {} today, {} this week, {:.2}% completed",
        r.summary.total_rides,
        r.summary.today_rides,
        r.summary.week_rides,
        r.summary.completion_rate
    );
    let _ = writeln!(
        out,
        "   Revenue: {} total, {} today, {} per ride",
        money(r.revenue.total_revenue),
        money(r.revenue.today_revenue),
        money(r.revenue.avg_revenue_per_ride)
    );
    for (mode, share) in r.payment_method_shares() {
        let _ = writeln!(out, "     {mode:<8} {share:>6.2}%");
    }
    let fleet = &r.fleet;
    let _ = writeln!(
        out,
        "   Fleet: {} vehicles, {} available, {} charging, {} in use ({:.2}% in use)",
        fleet.total_vehicles,
        fleet.available_vehicles,
        fleet.charging_vehicles,
        fleet.in_use_vehicles,
        percentage(fleet.in_use_vehicles as f64, fleet.total_vehicles as f64)
    );
    let _ = writeln!(
        out,
        "   Battery: avg {:.0}%, min {:.0}%, max {:.0}%",
        fleet.battery_stats.average, fleet.battery_stats.minimum, fleet.battery_stats.maximum
    );
    let infra = &r.infrastructure;
    let _ = writeln!(
        out,
        "   Ports: {} total, {} available, {} occupied ({:.2}% utilization)",
        infra.total_ports,
        infra.available_ports,
        infra.occupied_ports,
        percentage(infra.occupied_ports as f64, infra.total_ports as f64)
    );
    if !r.trends.daily_trends.is_empty() {
        let peak = r.peak_daily_revenue();
        let _ = writeln!(out, "   Daily trend:");
        for d in &r.trends.daily_trends {
            let bar_len = (percentage(d.revenue, peak) / 5.0).round() as usize;
            let _ = writeln!(
                out,
                "     {:<10} {:>4} rides {:>10} {}",
                d.date,
                d.rides,
                money(d.revenue),
                "#".repeat(bar_len)
            );
        }
    }
    out
}

pub fn settings(settings: Option<&StationSettings>) -> String {
    let Some(s) = settings else {
        return ":: No settings saved for this station\n".to_string();
    };
    let mut out = String::new();
    let _ = writeln!(out, ":: {}", if s.name.is_empty() { "-" } else { s.name.as_str() });
    let _ = writeln!(out, "   Location: {}", or_dash(&s.location));
    let _ = writeln!(
        out,
        "   Capacity: {}",
        s.capacity.map(|c| c.to_string()).unwrap_or_else(|| "-".into())
    );
    let _ = writeln!(
        out,
        "   Hours:    {} - {}",
        s.operating_hours.open, s.operating_hours.close
    );
    let _ = writeln!(
        out,
        "   Pricing:  base {}, {}/km, {}/min",
        money(s.pricing.base_rate),
        money(s.pricing.per_km_rate),
        money(s.pricing.per_minute_rate)
    );
    let n = &s.notifications;
    let _ = writeln!(
        out,
        "   Notify:   low battery {}, maintenance {}, payments {}, rides {}",
        n.low_battery, n.maintenance, n.payments, n.rides
    );
    let _ = writeln!(
        out,
        "   Security: face auth {}, auto lock {}, emergency {}",
        s.security.require_face_auth,
        s.security.auto_lock,
        or_dash(&s.security.emergency_contact)
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use volt_core::{derive, FilterPredicate};

    fn payment(id: &str, status: &str, amount: f64) -> Payment {
        serde_json::from_value(serde_json::json!({
            "payment_id": id, "status": status, "amount": amount, "mode": "upi"
        }))
        .unwrap()
    }

    #[test]
    fn payment_header_uses_filtered_totals() {
        let items = vec![payment("P1", "paid", 100.0), payment("P2", "pending", 50.0)];
        let text = payments(&derive(&items, &FilterPredicate::new()));
        assert!(text.starts_with(
            ":: Payments: 2 shown, total ₹150.00, paid ₹100.00, pending ₹50.00 (66.67% paid)"
        ));
        assert!(text.contains("P2"));
    }

    #[test]
    fn empty_report_and_settings_have_placeholders() {
        assert_eq!(report(None), ":: No report data available\n");
        assert_eq!(settings(None), ":: No settings saved for this station\n");
    }

    #[test]
    fn empty_port_list_reports_zero_utilization() {
        let text = ports(&derive::<ChargingPort>(&[], &FilterPredicate::new()), &[]);
        assert!(text.contains("0 shown, 0 available, 0 occupied, 0.00% utilization"));
    }
}

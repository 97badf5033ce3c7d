//! Period overview: orders due in a date range, costs scaled to its length,
//! alerts and the OEE trend.

use super::kpi::{DashboardMetrics, PlantSnapshot, TrendPoint};
use crate::model::{MachineStatus, OrderStatus, ProductionOrder};
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

pub const CRITICAL_OEE: u32 = 60;
pub const TARGET_ON_TIME_DELIVERY: u32 = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodCosts {
    pub material: f64,
    pub labor: f64,
    pub machine: f64,
    pub total: f64,
}

/// The dashboard overview for a date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: u32,
    /// Orders starting within the range.
    pub orders: Vec<ProductionOrder>,
    pub delayed_orders: usize,
    pub orders_by_status: Vec<StatusCount>,
    pub machines_by_status: Vec<StatusCount>,
    pub costs: PeriodCosts,
    pub alerts: Vec<Alert>,
    pub oee_trend: Vec<TrendPoint>,
}

/// Number of days covered by `start..=end`, at least 1.
pub fn period_days(start: NaiveDate, end: NaiveDate) -> u32 {
    let span = (end - start).num_days();
    let days = if span >= 0 { span + 1 } else { -span };
    u32::try_from(days.max(1)).unwrap_or(u32::MAX)
}

pub fn period_report(
    snapshot: &PlantSnapshot,
    metrics: &DashboardMetrics,
    start: NaiveDate,
    end: NaiveDate,
) -> PeriodReport {
    let days = period_days(start, end);
    let orders: Vec<_> = snapshot
        .orders
        .iter()
        .filter(|o| o.start_date >= start && o.start_date <= end)
        .cloned()
        .collect();

    let orders_by_status = OrderStatus::ALL
        .iter()
        .map(|status| StatusCount {
            status: status.label(),
            count: orders.iter().filter(|o| o.status == *status).count(),
        })
        .collect();
    let machines_by_status = MachineStatus::ALL
        .iter()
        .map(|status| StatusCount {
            status: status.label(),
            count: snapshot.machines.iter().filter(|m| m.status == *status).count(),
        })
        .collect();

    let multiplier = f64::from(days);
    let finance = &metrics.finance;

    PeriodReport {
        start,
        end,
        days,
        delayed_orders: orders
            .iter()
            .filter(|o| o.status == OrderStatus::Delayed)
            .count(),
        orders,
        orders_by_status,
        machines_by_status,
        costs: PeriodCosts {
            material: finance.material_cost * multiplier,
            labor: finance.labor_cost * multiplier,
            machine: finance.machine_cost * multiplier,
            total: finance.total_daily_cost * multiplier,
        },
        alerts: alerts(snapshot, metrics),
        oee_trend: oee_trend(start, end, metrics.oee.global),
    }
}

/// Alerts for the overview, most severe first.
pub fn alerts(snapshot: &PlantSnapshot, metrics: &DashboardMetrics) -> Vec<Alert> {
    let mut alerts = Vec::new();
    let mut push = |severity, message: String| alerts.push(Alert { severity, message });

    if metrics.oee.global < CRITICAL_OEE {
        push(
            AlertSeverity::Critical,
            format!("Global OEE is critical (<{CRITICAL_OEE}%). Act on the bottlenecks."),
        );
    }

    let down = snapshot
        .machines
        .iter()
        .filter(|m| m.status == MachineStatus::Down)
        .count();
    if down > 0 {
        push(AlertSeverity::Critical, format!("{down} machine(s) down."));
    }

    let low = snapshot.materials.iter().filter(|m| m.is_low()).count();
    if low > 0 {
        push(
            AlertSeverity::Warning,
            format!("{low} material reference(s) at risk of stock-out."),
        );
    }

    if metrics.production.on_time_delivery < TARGET_ON_TIME_DELIVERY {
        push(
            AlertSeverity::Info,
            "On-time delivery is dropping. Check the schedule.".to_string(),
        );
    }

    alerts
}

/// One point per day (ranges up to 31 days), week (up to 180) or month,
/// each carrying the current global OEE.
pub fn oee_trend(start: NaiveDate, end: NaiveDate, global: u32) -> Vec<TrendPoint> {
    let total_days = (end - start).num_days().max(1);
    let interval = if total_days <= 31 {
        1
    } else if total_days <= 180 {
        7
    } else {
        30
    };

    let mut points = Vec::new();
    let mut current = start;
    while current <= end {
        let date = match interval {
            1 => format!("{}/{}", current.day(), current.month()),
            7 => format!("S{}", week_of_month(current)),
            _ => current.format("%b").to_string(),
        };
        points.push(TrendPoint { date, value: global });

        match current.checked_add_days(Days::new(interval)) {
            Some(next) => current = next,
            None => break,
        }
    }
    points
}

/// Week number within the month, weeks starting on Sunday.
fn week_of_month(date: NaiveDate) -> u32 {
    let first_weekday = date
        .with_day(1)
        .map(|first| first.weekday().num_days_from_sunday())
        .unwrap_or(0);
    (date.day() + first_weekday).div_ceil(7)
}

//! Dashboard KPIs folded from a [`PlantSnapshot`].
//!
//! Every function here is pure: same snapshot, same numbers.

use crate::model::{
    Machine, MachineStatus, MaintenanceType, Material, Operator, OrderStatus, ProductionOrder,
    QualityReport,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// Daily cost of one present operator.
pub const LABOR_COST_PER_OPERATOR: f64 = 200.0;
/// Daily cost of one running machine.
pub const MACHINE_COST_PER_DAY: f64 = 500.0;
pub const UNIT_MARGIN: f64 = 24.0;
pub const CYCLE_TIME_GAP: i32 = -2;

pub const FALLBACK_MTBF_HOURS: f64 = 145.0;
pub const FALLBACK_MTTR_HOURS: f64 = 4.5;
pub const FALLBACK_PREVENTIVE_COMPLETION: u32 = 85;
pub const FALLBACK_COVERAGE_DAYS: u32 = 14;

/// Longest Pareto of defect reasons.
pub const TOP_DEFECTS: usize = 5;

const OEE_HISTORY: [(&str, u32); 7] = [
    ("Lun", 78),
    ("Mar", 82),
    ("Mer", 81),
    ("Jeu", 85),
    ("Ven", 79),
    ("Sam", 88),
    ("Dim", 90),
];

/// The collections the KPIs are derived from.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantSnapshot {
    pub orders: Vec<ProductionOrder>,
    pub machines: Vec<Machine>,
    pub materials: Vec<Material>,
    pub operators: Vec<Operator>,
    pub quality_reports: Vec<QualityReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: String,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OeeData {
    pub global: u32,
    pub availability: u32,
    pub performance: u32,
    pub quality: u32,
    pub history: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceKpis {
    /// Hours.
    pub mtbf: f64,
    /// Hours.
    pub mttr: f64,
    pub total_downtime: f64,
    pub incidents_count: usize,
    pub preventive_completion_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialKpis {
    pub total_daily_cost: f64,
    pub material_cost: f64,
    pub labor_cost: f64,
    pub machine_cost: f64,
    pub unit_margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefectCount {
    pub reason: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityKpis {
    /// Percent, two decimals.
    pub scrap_rate: f64,
    pub ppm: u64,
    pub top_defects: Vec<DefectCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionKpis {
    pub on_time_delivery: u32,
    pub average_cycle_time_gap: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockKpis {
    pub value: f64,
    pub coverage_days: u32,
    pub risk_items: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub oee: OeeData,
    pub maintenance: MaintenanceKpis,
    pub finance: FinancialKpis,
    pub quality: QualityKpis,
    pub production: ProductionKpis,
    pub stock: StockKpis,
}

fn percent(part: usize, whole: usize) -> u32 {
    (part as f64 / whole as f64 * 100.0).round() as u32
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Derives every dashboard KPI from `snapshot`. `today` decides which preventive
/// maintenance is overdue.
pub fn compute(snapshot: &PlantSnapshot, today: NaiveDate) -> DashboardMetrics {
    let machines = &snapshot.machines;
    let running = machines
        .iter()
        .filter(|m| m.status == MachineStatus::Running)
        .count();

    let checked: u64 = snapshot
        .quality_reports
        .iter()
        .map(|r| u64::from(r.checked_quantity))
        .sum();
    let rejected: u64 = snapshot
        .quality_reports
        .iter()
        .map(|r| u64::from(r.rejected_quantity))
        .sum();

    let oee = oee(machines, running, checked, rejected);
    let finance = finance(snapshot, running);

    DashboardMetrics {
        oee,
        maintenance: maintenance(machines, today),
        finance,
        quality: quality(&snapshot.quality_reports, checked, rejected),
        production: production(&snapshot.orders),
        stock: stock(&snapshot.materials),
    }
}

fn oee(machines: &[Machine], running: usize, checked: u64, rejected: u64) -> OeeData {
    let (availability, performance) = if machines.is_empty() {
        (0, 0)
    } else {
        let mean_efficiency =
            machines.iter().map(|m| m.efficiency).sum::<f64>() / machines.len() as f64;
        (percent(running, machines.len()), mean_efficiency.round().max(0.0) as u32)
    };
    let quality = if checked == 0 {
        100
    } else {
        ((checked.saturating_sub(rejected)) as f64 / checked as f64 * 100.0).round() as u32
    };
    let global =
        (f64::from(availability) * f64::from(performance) * f64::from(quality) / 10_000.0).round() as u32;

    OeeData {
        global,
        availability,
        performance,
        quality,
        history: OEE_HISTORY
            .iter()
            .map(|(date, value)| TrendPoint {
                date: date.to_string(),
                value: *value,
            })
            .collect(),
    }
}

fn maintenance(machines: &[Machine], today: NaiveDate) -> MaintenanceKpis {
    let total_downtime: f64 = machines.iter().map(|m| m.downtime).sum();
    let total_operating: f64 = machines.iter().map(|m| m.operating_time).sum();
    let corrective = machines
        .iter()
        .flat_map(|m| &m.maintenance_log)
        .filter(|entry| entry.kind == MaintenanceType::Corrective)
        .count();

    let (mtbf, mttr) = if corrective == 0 {
        (FALLBACK_MTBF_HOURS, FALLBACK_MTTR_HOURS)
    } else {
        (
            round_to(total_operating / corrective as f64, 1),
            round_to(total_downtime / corrective as f64, 1),
        )
    };

    let preventive_completion_rate = if machines.is_empty() {
        FALLBACK_PREVENTIVE_COMPLETION
    } else {
        let on_schedule = machines.iter().filter(|m| m.next_maintenance >= today).count();
        percent(on_schedule, machines.len())
    };

    MaintenanceKpis {
        mtbf,
        mttr,
        total_downtime,
        incidents_count: machines
            .iter()
            .filter(|m| m.status == MachineStatus::Down)
            .count(),
        preventive_completion_rate,
    }
}

fn finance(snapshot: &PlantSnapshot, running: usize) -> FinancialKpis {
    let present = snapshot.operators.iter().filter(|o| o.present).count();
    let labor_cost = present as f64 * LABOR_COST_PER_OPERATOR;
    let machine_cost = running as f64 * MACHINE_COST_PER_DAY;
    let material_cost = snapshot
        .materials
        .iter()
        .map(Material::daily_cost)
        .sum::<f64>()
        .round();

    FinancialKpis {
        total_daily_cost: labor_cost + machine_cost + material_cost,
        material_cost,
        labor_cost,
        machine_cost,
        unit_margin: UNIT_MARGIN,
    }
}

fn quality(reports: &[QualityReport], checked: u64, rejected: u64) -> QualityKpis {
    let (scrap_rate, ppm) = if checked == 0 {
        (0.0, 0)
    } else {
        let ratio = rejected as f64 / checked as f64;
        (round_to(ratio * 100.0, 2), (ratio * 1_000_000.0).round() as u64)
    };

    QualityKpis {
        scrap_rate,
        ppm,
        top_defects: pareto(reports),
    }
}

/// Rejected quantity per defect reason, largest first (ties by reason).
pub fn pareto(reports: &[QualityReport]) -> Vec<DefectCount> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for report in reports {
        if let Some(reason) = report.defect_reason.as_deref() {
            if report.rejected_quantity > 0 {
                *counts.entry(reason).or_default() += report.rejected_quantity;
            }
        }
    }

    let mut defects: Vec<_> = counts
        .into_iter()
        .map(|(reason, count)| DefectCount {
            reason: reason.to_string(),
            count,
        })
        .collect();
    defects.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.reason.cmp(&b.reason)));
    defects.truncate(TOP_DEFECTS);
    defects
}

fn production(orders: &[ProductionOrder]) -> ProductionKpis {
    let started = orders
        .iter()
        .filter(|o| o.status != OrderStatus::Planned)
        .count();
    let delayed = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Delayed)
        .count();

    ProductionKpis {
        on_time_delivery: if started == 0 {
            100
        } else {
            percent(started - delayed, started)
        },
        average_cycle_time_gap: CYCLE_TIME_GAP,
    }
}

fn stock(materials: &[Material]) -> StockKpis {
    let coverage_days = materials
        .iter()
        .filter_map(|m| match m.daily_consumption {
            Some(daily) if daily > 0.0 => Some((m.stock / daily).floor() as u32),
            _ => None,
        })
        .min()
        .unwrap_or(FALLBACK_COVERAGE_DAYS);

    StockKpis {
        value: materials.iter().map(Material::stock_value).sum::<f64>().round(),
        coverage_days,
        risk_items: materials.iter().filter(|m| m.is_low()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{fixture, Collection};

    fn fixtures() -> PlantSnapshot {
        PlantSnapshot {
            orders: fixture(Collection::Orders).unwrap(),
            machines: fixture(Collection::Machines).unwrap(),
            materials: fixture(Collection::Materials).unwrap(),
            operators: fixture(Collection::Operators).unwrap(),
            quality_reports: fixture(Collection::Quality).unwrap(),
        }
    }

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, m, d).unwrap()
    }

    #[test]
    fn fixture_plant_kpis() {
        let metrics = compute(&fixtures(), day(10, 28));

        assert_eq!(metrics.oee.availability, 50);
        assert_eq!(metrics.oee.performance, 81);
        assert_eq!(metrics.oee.quality, 95);
        assert_eq!(metrics.oee.global, 38);
        assert_eq!(metrics.oee.history.len(), 7);

        assert_eq!(metrics.finance.labor_cost, 600.0);
        assert_eq!(metrics.finance.machine_cost, 1000.0);
        assert_eq!(metrics.finance.material_cost, 1270.0);
        assert_eq!(metrics.finance.total_daily_cost, 2870.0);

        assert_eq!(metrics.quality.scrap_rate, 4.68);
        assert_eq!(metrics.quality.ppm, 46809);
        assert_eq!(metrics.production.on_time_delivery, 67);

        assert_eq!(metrics.stock.value, 12915.0);
        assert_eq!(metrics.stock.risk_items, 1);
        assert_eq!(metrics.stock.coverage_days, 9);
    }

    #[test]
    fn maintenance_kpis_use_corrective_history() {
        let metrics = compute(&fixtures(), day(10, 28));

        assert_eq!(metrics.maintenance.total_downtime, 19.0);
        assert_eq!(metrics.maintenance.incidents_count, 1);
        assert_eq!(metrics.maintenance.mtbf, 540.0);
        assert_eq!(metrics.maintenance.mttr, 19.0);
        // M-02 was due on the 27th.
        assert_eq!(metrics.maintenance.preventive_completion_rate, 75);
    }

    #[test]
    fn pareto_sums_rejections_per_reason() {
        let defects = compute(&fixtures(), day(10, 28)).quality.top_defects;
        let reasons: Vec<_> = defects.iter().map(|d| (d.reason.as_str(), d.count)).collect();
        assert_eq!(reasons, [("Dimensions", 15), ("Aspect", 5), ("Rayures", 2)]);
    }

    #[test]
    fn empty_plant_uses_fallbacks() {
        let metrics = compute(&PlantSnapshot::default(), day(10, 28));

        assert_eq!(metrics.oee.availability, 0);
        assert_eq!(metrics.oee.performance, 0);
        assert_eq!(metrics.oee.quality, 100);
        assert_eq!(metrics.oee.global, 0);
        assert_eq!(metrics.quality.scrap_rate, 0.0);
        assert_eq!(metrics.quality.ppm, 0);
        assert_eq!(metrics.production.on_time_delivery, 100);
        assert_eq!(metrics.maintenance.mtbf, FALLBACK_MTBF_HOURS);
        assert_eq!(metrics.maintenance.preventive_completion_rate, FALLBACK_PREVENTIVE_COMPLETION);
        assert_eq!(metrics.stock.coverage_days, FALLBACK_COVERAGE_DAYS);
        assert_eq!(metrics.finance.total_daily_cost, 0.0);
    }
}

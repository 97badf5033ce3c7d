//! Summary statistics shown above the machine, personnel and quality lists.

use crate::metrics::kpi::round_to;
use crate::model::{Machine, MachineStatus, Operator, QualityReport, Shift};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Roles listed in [`WorkforceStats::top_roles`].
pub const TOP_ROLES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetStats {
    pub total: usize,
    /// One entry per status, in declaration order.
    pub by_status: Vec<LabelCount>,
    pub total_purchase_cost: f64,
    /// Rounded mean efficiency, 0 for an empty fleet.
    pub average_efficiency: u32,
    /// Machine count per type, sorted by type.
    pub by_type: Vec<LabelCount>,
}

pub fn fleet_stats(machines: &[Machine]) -> FleetStats {
    let by_status = MachineStatus::ALL
        .iter()
        .map(|status| LabelCount {
            label: status.label().to_string(),
            count: machines.iter().filter(|m| m.status == *status).count(),
        })
        .collect();

    let average_efficiency = if machines.is_empty() {
        0
    } else {
        let sum: f64 = machines.iter().map(|m| m.efficiency).sum();
        (sum / machines.len() as f64).round().max(0.0) as u32
    };

    let mut by_type: BTreeMap<&str, usize> = BTreeMap::new();
    for machine in machines {
        *by_type.entry(machine.machine_type.as_str()).or_default() += 1;
    }

    FleetStats {
        total: machines.len(),
        by_status,
        total_purchase_cost: machines.iter().map(|m| m.purchase_cost).sum(),
        average_efficiency,
        by_type: by_type
            .into_iter()
            .map(|(label, count)| LabelCount {
                label: label.to_string(),
                count,
            })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkforceStats {
    pub total: usize,
    pub present: usize,
    /// Percent of the workforce present.
    pub presence_rate: u32,
    /// Monthly payroll.
    pub total_salary: f64,
    pub by_shift: Vec<LabelCount>,
    /// Largest roles by headcount, ties by name.
    pub top_roles: Vec<LabelCount>,
}

pub fn workforce_stats(operators: &[Operator]) -> WorkforceStats {
    let total = operators.len();
    let present = operators.iter().filter(|o| o.present).count();

    let by_shift = Shift::ALL
        .iter()
        .map(|shift| LabelCount {
            label: shift.label().to_string(),
            count: operators.iter().filter(|o| o.shift == *shift).count(),
        })
        .collect();

    let mut roles: HashMap<&str, usize> = HashMap::new();
    for operator in operators {
        *roles.entry(operator.role.as_str()).or_default() += 1;
    }
    let mut top_roles: Vec<_> = roles
        .into_iter()
        .map(|(label, count)| LabelCount {
            label: label.to_string(),
            count,
        })
        .collect();
    top_roles.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    top_roles.truncate(TOP_ROLES);

    WorkforceStats {
        total,
        present,
        presence_rate: (present as f64 / total.max(1) as f64 * 100.0).round() as u32,
        total_salary: operators.iter().map(|o| o.salary).sum(),
        by_shift,
        top_roles,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRate {
    pub id: String,
    pub order_id: String,
    /// Percent, two decimals.
    pub reject_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualitySummary {
    pub reports: usize,
    pub total_checked: u64,
    pub total_rejected: u64,
    /// Percent, two decimals. 0 when nothing was checked.
    pub defect_rate: f64,
    pub per_report: Vec<ReportRate>,
}

pub fn quality_summary(reports: &[QualityReport]) -> QualitySummary {
    let total_checked: u64 = reports.iter().map(|r| u64::from(r.checked_quantity)).sum();
    let total_rejected: u64 = reports.iter().map(|r| u64::from(r.rejected_quantity)).sum();
    let defect_rate = if total_checked == 0 {
        0.0
    } else {
        round_to(total_rejected as f64 / total_checked as f64 * 100.0, 2)
    };

    QualitySummary {
        reports: reports.len(),
        total_checked,
        total_rejected,
        defect_rate,
        per_report: reports
            .iter()
            .map(|r| ReportRate {
                id: r.id.clone(),
                order_id: r.order_id.clone(),
                reject_rate: round_to(r.reject_rate(), 2),
            })
            .collect(),
    }
}

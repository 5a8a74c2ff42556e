//! Launch projection calculator.
//!
//! Closed-form monthly economics for a coaching practice launch, plus a
//! fixed sensitivity sweep. No simulation: every figure derives directly
//! from the inputs, so the same inputs always produce the same report.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ScoringError;

/// Break-even search stops after this many months.
pub const BREAK_EVEN_HORIZON_MONTHS: u32 = 120;

/// Percent offsets applied to each swept variable.
pub const SENSITIVITY_DELTAS: [i32; 4] = [-20, -10, 10, 20];

/// Launch plan figures.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProjectionInput {
    /// Paying members at steady state.
    pub members: f64,
    /// Monthly fee per member, in dollars.
    pub monthly_fee: f64,
    /// Monthly churn as a fraction (0–1); churned members pay nothing.
    pub monthly_churn: f64,
    /// Fixed costs per month (rent, tooling, salaries), in dollars.
    pub fixed_costs: f64,
    /// Variable expenses as a fraction of revenue (0–1).
    pub expense_rate: f64,
    /// One-time startup cost, in dollars.
    pub startup_cost: f64,
    /// ROI horizon in months.
    pub horizon_months: u32,
}

/// Variable swept in the sensitivity analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SensitivityVariable {
    Members,
    MonthlyFee,
    MonthlyChurn,
    ExpenseRate,
}

impl SensitivityVariable {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Members => "members",
            Self::MonthlyFee => "monthly_fee",
            Self::MonthlyChurn => "monthly_churn",
            Self::ExpenseRate => "expense_rate",
        }
    }
}

impl fmt::Display for SensitivityVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the sensitivity table.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SensitivityRow {
    pub variable: SensitivityVariable,
    pub delta_pct: i32,
    pub monthly_net: f64,
    pub roi_pct: f64,
}

/// Full projection report.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProjectionReport {
    pub monthly_revenue: f64,
    pub monthly_expenses: f64,
    pub monthly_net: f64,
    /// Net as a fraction of revenue; 0 when revenue is 0.
    pub margin: f64,
    /// Return over the horizon against startup cost, in percent.
    pub roi_pct: f64,
    /// First month where cumulative net covers the startup cost.
    pub break_even_month: Option<u32>,
    /// 4 variables × 4 deltas, fixed order.
    pub sensitivity: Vec<SensitivityRow>,
}

/// Compute the projection report.
///
/// # Errors
///
/// Returns [`ScoringError::Validation`] for negative figures, rates outside
/// 0–1, or a zero horizon.
pub fn project(input: &ProjectionInput) -> Result<ProjectionReport, ScoringError> {
    validate(input)?;

    let (revenue, expenses, net) = monthly_figures(input);
    let margin = if revenue == 0.0 { 0.0 } else { round2(net / revenue) };
    let roi = roi_pct(net, input);

    Ok(ProjectionReport {
        monthly_revenue: round2(revenue),
        monthly_expenses: round2(expenses),
        monthly_net: round2(net),
        margin,
        roi_pct: roi,
        break_even_month: break_even_month(net, input.startup_cost),
        sensitivity: sensitivity_sweep(input),
    })
}

fn validate(input: &ProjectionInput) -> Result<(), ScoringError> {
    if input.members < 0.0 {
        return Err(ScoringError::invalid("members", "must be non-negative"));
    }
    if input.monthly_fee < 0.0 {
        return Err(ScoringError::invalid("monthly_fee", "must be non-negative"));
    }
    if !(0.0..=1.0).contains(&input.monthly_churn) {
        return Err(ScoringError::invalid("monthly_churn", "must be within 0-1"));
    }
    if input.fixed_costs < 0.0 {
        return Err(ScoringError::invalid("fixed_costs", "must be non-negative"));
    }
    if !(0.0..=1.0).contains(&input.expense_rate) {
        return Err(ScoringError::invalid("expense_rate", "must be within 0-1"));
    }
    if input.startup_cost < 0.0 {
        return Err(ScoringError::invalid("startup_cost", "must be non-negative"));
    }
    if input.horizon_months == 0 {
        return Err(ScoringError::invalid("horizon_months", "must be at least 1"));
    }
    Ok(())
}

fn monthly_figures(input: &ProjectionInput) -> (f64, f64, f64) {
    // Revenue = members * fee * (1 - churn)
    let revenue = input.members * input.monthly_fee * (1.0 - input.monthly_churn);
    // Expenses = fixed + expense_rate * revenue
    let expenses = input.fixed_costs + input.expense_rate * revenue;
    (revenue, expenses, revenue - expenses)
}

// ROI over the horizon = (net * months - startup) / startup * 100
fn roi_pct(net: f64, input: &ProjectionInput) -> f64 {
    if input.startup_cost == 0.0 {
        return 0.0;
    }
    let horizon_net = net * f64::from(input.horizon_months);
    round2((horizon_net - input.startup_cost) / input.startup_cost * 100.0)
}

/// First month where cumulative net covers the startup cost; `None` when the
/// plan never breaks even within [`BREAK_EVEN_HORIZON_MONTHS`].
fn break_even_month(net: f64, startup_cost: f64) -> Option<u32> {
    if startup_cost == 0.0 {
        return Some(0);
    }
    if net <= 0.0 {
        return None;
    }
    let months = (startup_cost / net).ceil();
    if months > f64::from(BREAK_EVEN_HORIZON_MONTHS) {
        None
    } else {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(months as u32)
    }
}

/// Sweep members, fee, churn, and expense rate by fixed percent offsets.
fn sensitivity_sweep(input: &ProjectionInput) -> Vec<SensitivityRow> {
    let variables = [
        SensitivityVariable::Members,
        SensitivityVariable::MonthlyFee,
        SensitivityVariable::MonthlyChurn,
        SensitivityVariable::ExpenseRate,
    ];

    let mut rows = Vec::with_capacity(variables.len() * SENSITIVITY_DELTAS.len());
    for variable in variables {
        for delta_pct in SENSITIVITY_DELTAS {
            let adjusted = adjust(input, variable, delta_pct);
            let (_, _, net) = monthly_figures(&adjusted);
            rows.push(SensitivityRow {
                variable,
                delta_pct,
                monthly_net: round2(net),
                roi_pct: roi_pct(net, &adjusted),
            });
        }
    }
    rows
}

fn adjust(input: &ProjectionInput, variable: SensitivityVariable, delta_pct: i32) -> ProjectionInput {
    let factor = 1.0 + f64::from(delta_pct) / 100.0;
    let mut adjusted = input.clone();
    match variable {
        SensitivityVariable::Members => adjusted.members *= factor,
        SensitivityVariable::MonthlyFee => adjusted.monthly_fee *= factor,
        // Rates stay clamped to the valid range after scaling.
        SensitivityVariable::MonthlyChurn => {
            adjusted.monthly_churn = (adjusted.monthly_churn * factor).clamp(0.0, 1.0);
        }
        SensitivityVariable::ExpenseRate => {
            adjusted.expense_rate = (adjusted.expense_rate * factor).clamp(0.0, 1.0);
        }
    }
    adjusted
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

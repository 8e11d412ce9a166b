use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::schedule::AMORTIZATION_MONTHS;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// `count` identical closings in one month, each paying `value * rate`
/// in commission on the deferred amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub value: Money,
    pub rate: Rate,
    pub count: u32,
}

impl Deal {
    /// Full commission across all closings in this entry.
    pub fn full_commission(&self) -> Money {
        self.value * self.rate * Decimal::from(self.count)
    }

    /// The amortized slice recognized in each month of the payout window.
    pub fn monthly_payment(&self) -> Money {
        self.full_commission() / Decimal::from(AMORTIZATION_MONTHS)
    }
}

/// One deal list per forecast month. The length always equals the
/// horizon; months without closings hold an empty list, never a gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPlan {
    months: Vec<Vec<Deal>>,
}

impl MonthlyPlan {
    pub fn new(months: usize) -> Self {
        Self {
            months: vec![Vec::new(); months],
        }
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn push(&mut self, month: usize, deal: Deal) {
        self.months[month].push(deal);
    }

    pub fn deals_in(&self, month: usize) -> &[Deal] {
        &self.months[month]
    }

    /// Sum of all closing counts across the horizon.
    pub fn total_deal_count(&self) -> u32 {
        self.months
            .iter()
            .flat_map(|m| m.iter())
            .map(|d| d.count)
            .sum()
    }

    /// Compact textual encoding of the plan: one `label value@rate[xN]`
    /// entry per closing, months without deals omitted. Labels are
    /// `M1..M12` or calendar months when a start month is given.
    pub fn summary(&self, start: Option<NaiveDate>) -> String {
        let mut parts = Vec::new();
        for (m, deals) in self.months.iter().enumerate() {
            if deals.is_empty() {
                continue;
            }
            let label = month_label(m, start);
            let entries: Vec<String> = deals.iter().map(format_deal).collect();
            parts.push(format!("{} {}", label, entries.join(", ")));
        }
        if parts.is_empty() {
            "no deals".to_string()
        } else {
            parts.join("; ")
        }
    }
}

fn month_label(index: usize, start: Option<NaiveDate>) -> String {
    match start.and_then(|d| d.checked_add_months(Months::new(index as u32))) {
        Some(date) => date.format("%Y-%m").to_string(),
        None => format!("M{}", index + 1),
    }
}

fn format_deal(deal: &Deal) -> String {
    let pct = (deal.rate * Decimal::ONE_HUNDRED).normalize();
    let base = format!("${}@{}%", deal.value.normalize(), pct);
    if deal.count > 1 {
        format!("{}x{}", base, deal.count)
    } else {
        base
    }
}

/// Coaching engagements over the horizon, either as one total or as
/// per-month counts. Strategies differ in which shape they produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoachingPlan {
    Total(u32),
    PerMonth(Vec<u32>),
}

impl CoachingPlan {
    pub fn total(&self) -> u32 {
        match self {
            CoachingPlan::Total(n) => *n,
            CoachingPlan::PerMonth(counts) => counts.iter().sum(),
        }
    }
}

/// Commission recognized per forecast month. Built by accumulation,
/// never shrinks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionTimeline {
    recognized: Vec<Money>,
}

impl CommissionTimeline {
    pub fn zeroed(months: usize) -> Self {
        Self {
            recognized: vec![Decimal::ZERO; months],
        }
    }

    pub fn len(&self) -> usize {
        self.recognized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recognized.is_empty()
    }

    pub fn add(&mut self, month: usize, amount: Money) {
        self.recognized[month] += amount;
    }

    pub fn month(&self, month: usize) -> Money {
        self.recognized[month]
    }

    pub fn total(&self) -> Money {
        self.recognized.iter().sum()
    }

    pub fn as_slice(&self) -> &[Money] {
        &self.recognized
    }
}

/// Profit bucket relative to the target and the optional secondary
/// threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    Qualified,
    NearQualified,
    Rejected,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Classification::Qualified => "qualified",
            Classification::NearQualified => "near_qualified",
            Classification::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// The scored outcome of one candidate plan. Monetary fields carry the
/// exact decimal values; rounding happens only in [`ScenarioResult::to_record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub coaching_revenue: Money,
    pub deal_revenue: Money,
    pub total_revenue: Money,
    pub total_expense: Money,
    pub net_profit: Money,
    pub coaching_total: u32,
    pub workload_score: u32,
    pub classification: Classification,
    pub plan_summary: String,
}

impl ScenarioResult {
    /// Flat record for tabular/CSV export, rounded to whole cents.
    pub fn to_record(&self) -> ResultRecord {
        ResultRecord {
            classification: self.classification,
            net_profit: self.net_profit.round_dp(2),
            total_revenue: self.total_revenue.round_dp(2),
            deal_revenue: self.deal_revenue.round_dp(2),
            coaching_revenue: self.coaching_revenue.round_dp(2),
            total_expense: self.total_expense.round_dp(2),
            coaching_total: self.coaching_total,
            workload_score: self.workload_score,
            plan_summary: self.plan_summary.clone(),
        }
    }
}

/// One exportable result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub classification: Classification,
    pub net_profit: Money,
    pub total_revenue: Money,
    pub deal_revenue: Money,
    pub coaching_revenue: Money,
    pub total_expense: Money,
    pub coaching_total: u32,
    pub workload_score: u32,
    pub plan_summary: String,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

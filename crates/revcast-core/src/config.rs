use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ForecastError;
use crate::types::{Money, Rate};
use crate::ForecastResult;

/// Inclusive integer range for deal or coaching counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    /// Number of values in the range.
    pub fn span(&self) -> u32 {
        self.max - self.min + 1
    }
}

/// Commission rates offered for one specific deal value, overriding the
/// global value x rate cross-product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueRates {
    pub value: Money,
    pub rates: Vec<Rate>,
}

/// How the coaching dimension of a candidate is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoachingPolicy {
    /// One total engagement count for the horizon, enumerated or drawn
    /// from `coaching_count_range`.
    TotalSweep,
    /// Per-month counts: enumeration applies one periodic count to every
    /// month, sampling draws each month independently.
    PerMonth,
    /// The smallest count that lifts net profit to the target; derived
    /// by the evaluator, never enumerated.
    JustClear,
}

/// Read-only snapshot of everything a simulation run needs. Produced by
/// the caller once per run and validated before any generation begins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Forecast horizon in months (1..=12).
    pub months: u32,
    /// Net profit target a plan must clear to qualify.
    pub net_target: Money,
    /// Optional secondary threshold for the near-qualified bucket.
    #[serde(default)]
    pub near_target_threshold: Option<Money>,
    /// Revenue per coaching engagement, recognized immediately.
    pub coaching_price: Money,
    /// Fixed expense base per month.
    pub monthly_expense_total: Money,
    /// Deal values on offer.
    #[serde(default)]
    pub deal_values: Vec<Money>,
    /// Commission rates on offer, crossed with every deal value.
    #[serde(default)]
    pub commission_rates: Vec<Rate>,
    /// Per-value rate menu. When present it replaces the
    /// `deal_values` x `commission_rates` cross-product.
    #[serde(default)]
    pub value_rates: Option<Vec<ValueRates>>,
    /// Closings per month considered by enumeration and sampling.
    #[serde(default = "default_deal_count_range")]
    pub deal_count_range: CountRange,
    /// Coaching totals swept by enumeration and sampling.
    #[serde(default = "default_coaching_count_range")]
    pub coaching_count_range: CountRange,
    /// Greedy picks per month.
    #[serde(default = "default_max_deals_per_month")]
    pub max_deals_per_month: u32,
    /// Total candidates drawn by the sample strategy.
    #[serde(default = "default_sample_budget")]
    pub sample_budget: u64,
    /// Candidates generated and evaluated per batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Seed for the sample strategy; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Retention cap for each of the qualified / near-qualified sets.
    #[serde(default = "default_result_cap")]
    pub result_cap: usize,
    /// Explicit opt-in for exhaustive runs above the cardinality cap.
    #[serde(default)]
    pub allow_large_cardinality: bool,
    #[serde(default = "default_coaching_policy")]
    pub coaching_policy: CoachingPolicy,
    /// First forecast month, used to label months in plan summaries.
    #[serde(default)]
    pub start_month: Option<NaiveDate>,
}

fn default_deal_count_range() -> CountRange {
    CountRange { min: 0, max: 3 }
}

fn default_coaching_count_range() -> CountRange {
    CountRange { min: 0, max: 100 }
}

fn default_max_deals_per_month() -> u32 {
    3
}

fn default_sample_budget() -> u64 {
    100_000
}

fn default_batch_size() -> usize {
    1_000
}

fn default_result_cap() -> usize {
    100
}

fn default_coaching_policy() -> CoachingPolicy {
    CoachingPolicy::TotalSweep
}

impl Configuration {
    /// Validate the snapshot. Fails fast before any generation begins.
    pub fn validate(&self) -> ForecastResult<()> {
        if self.months < 1 || self.months > 12 {
            return Err(invalid("months", "Must be between 1 and 12"));
        }
        if self.coaching_price <= Decimal::ZERO {
            return Err(invalid("coaching_price", "Must be positive"));
        }
        if self.monthly_expense_total < Decimal::ZERO {
            return Err(invalid("monthly_expense_total", "Must not be negative"));
        }
        match &self.value_rates {
            Some(menu) => {
                if menu.is_empty() {
                    return Err(invalid("value_rates", "Menu must not be empty"));
                }
                for entry in menu {
                    check_value(entry.value, "value_rates")?;
                    if entry.rates.is_empty() {
                        return Err(invalid(
                            "value_rates",
                            &format!("No rates offered for value {}", entry.value),
                        ));
                    }
                    for rate in &entry.rates {
                        check_rate(*rate, "value_rates")?;
                    }
                }
            }
            None => {
                if self.deal_values.is_empty() {
                    return Err(invalid("deal_values", "At least one deal value is required"));
                }
                if self.commission_rates.is_empty() {
                    return Err(invalid(
                        "commission_rates",
                        "At least one commission rate is required",
                    ));
                }
                for value in &self.deal_values {
                    check_value(*value, "deal_values")?;
                }
                for rate in &self.commission_rates {
                    check_rate(*rate, "commission_rates")?;
                }
            }
        }
        if self.deal_count_range.min > self.deal_count_range.max {
            return Err(invalid("deal_count_range", "min must not exceed max"));
        }
        if self.coaching_count_range.min > self.coaching_count_range.max {
            return Err(invalid("coaching_count_range", "min must not exceed max"));
        }
        if self.max_deals_per_month < 1 {
            return Err(invalid("max_deals_per_month", "Must be at least 1"));
        }
        if self.sample_budget < 1 {
            return Err(invalid("sample_budget", "Must be at least 1"));
        }
        if self.batch_size < 1 {
            return Err(invalid("batch_size", "Must be at least 1"));
        }
        if self.result_cap < 1 {
            return Err(invalid("result_cap", "Must be at least 1"));
        }
        Ok(())
    }

    /// Expense across the whole horizon.
    pub fn total_expense(&self) -> Money {
        self.monthly_expense_total * Decimal::from(self.months)
    }
}

fn invalid(field: &str, reason: &str) -> ForecastError {
    ForecastError::InvalidConfiguration {
        field: field.into(),
        reason: reason.into(),
    }
}

fn check_value(value: Money, field: &str) -> ForecastResult<()> {
    if value <= Decimal::ZERO {
        return Err(invalid(field, &format!("Deal value {value} must be positive")));
    }
    Ok(())
}

fn check_rate(rate: Rate, field: &str) -> ForecastResult<()> {
    if rate <= Decimal::ZERO || rate > Decimal::ONE {
        return Err(invalid(
            field,
            &format!("Commission rate {rate} must be in (0, 1]"),
        ));
    }
    Ok(())
}

use crate::config::{CoachingPolicy, Configuration};
use crate::error::ForecastError;
use crate::types::{CoachingPlan, Deal, Money, MonthlyPlan, Rate};
use crate::ForecastResult;

use super::{deal_options, Candidate, CandidateGenerator};

/// Largest candidate space the exhaustive strategy will enumerate
/// without the `allow_large_cardinality` opt-in.
pub const MAX_EXHAUSTIVE_CANDIDATES: u128 = 1_000_000;

/// Full enumeration of one `(count, value, rate)` choice per month,
/// crossed with the coaching dimension. Candidates are decoded lazily
/// from a mixed-radix index, so enumeration order is fixed and nothing
/// is materialized ahead of the batch being pulled.
#[derive(Debug)]
pub struct ExhaustiveGenerator {
    options: Vec<(Money, Rate)>,
    count_min: u32,
    counts: u128,
    months: usize,
    policy: CoachingPolicy,
    coaching_min: u32,
    coaching_len: u128,
    per_month_base: u128,
    total: u128,
    next_index: u128,
}

impl ExhaustiveGenerator {
    pub fn new(config: &Configuration) -> ForecastResult<Self> {
        let total = candidate_space(config);
        if total > MAX_EXHAUSTIVE_CANDIDATES && !config.allow_large_cardinality {
            return Err(ForecastError::CardinalityExceeded {
                estimated: total,
                cap: MAX_EXHAUSTIVE_CANDIDATES,
            });
        }

        let options = deal_options(config);
        let counts = config.deal_count_range.span() as u128;
        let coaching_len = match config.coaching_policy {
            CoachingPolicy::JustClear => 1,
            _ => config.coaching_count_range.span() as u128,
        };

        Ok(Self {
            per_month_base: options.len() as u128 * counts,
            options,
            count_min: config.deal_count_range.min,
            counts,
            months: config.months as usize,
            policy: config.coaching_policy,
            coaching_min: config.coaching_count_range.min,
            coaching_len,
            total,
            next_index: 0,
        })
    }

    fn decode(&self, index: u128) -> Candidate {
        let mut rem = index;
        let mut plan = MonthlyPlan::new(self.months);

        for m in 0..self.months {
            let digit = rem % self.per_month_base;
            rem /= self.per_month_base;

            let count = self.count_min + (digit % self.counts) as u32;
            let (value, rate) = self.options[(digit / self.counts) as usize];
            if count > 0 {
                plan.push(m, Deal { value, rate, count });
            }
        }

        let coaching = match self.policy {
            CoachingPolicy::JustClear => None,
            CoachingPolicy::TotalSweep => {
                let count = self.coaching_min + (rem % self.coaching_len) as u32;
                Some(CoachingPlan::Total(count))
            }
            CoachingPolicy::PerMonth => {
                let count = self.coaching_min + (rem % self.coaching_len) as u32;
                Some(CoachingPlan::PerMonth(vec![count; self.months]))
            }
        };

        Candidate { plan, coaching }
    }
}

impl CandidateGenerator for ExhaustiveGenerator {
    fn cardinality(&self) -> u128 {
        self.total
    }

    fn next_batch(&mut self, limit: usize) -> Vec<Candidate> {
        let mut batch = Vec::new();
        while self.next_index < self.total && batch.len() < limit {
            batch.push(self.decode(self.next_index));
            self.next_index += 1;
        }
        batch
    }
}

/// Size of the Cartesian product this configuration spans, saturating
/// at `u128::MAX`.
pub fn candidate_space(config: &Configuration) -> u128 {
    let options = deal_options(config).len() as u128;
    let counts = config.deal_count_range.span() as u128;
    let coaching = match config.coaching_policy {
        CoachingPolicy::JustClear => 1,
        _ => config.coaching_count_range.span() as u128,
    };

    options
        .checked_mul(counts)
        .and_then(|base| base.checked_pow(config.months))
        .and_then(|plans| plans.checked_mul(coaching))
        .unwrap_or(u128::MAX)
}

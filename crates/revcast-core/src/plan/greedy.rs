use rust_decimal::Decimal;

use crate::config::Configuration;
use crate::schedule::AMORTIZATION_MONTHS;
use crate::types::{Deal, MonthlyPlan};

use super::{deal_options, Candidate, CandidateGenerator};

/// Deterministic single-plan generator: per month, repeatedly pick the
/// `(value, rate)` pair with the largest monthly payment that keeps the
/// month's running payment total at or under the net target, up to
/// `max_deals_per_month` picks. Ties go to the first-seen pair in the
/// cross-product. Coaching is always derived by the evaluator to just
/// clear the target.
pub struct GreedyGenerator {
    pending: Option<Candidate>,
}

impl GreedyGenerator {
    pub fn new(config: &Configuration) -> Self {
        let options = deal_options(config);
        let months = config.months as usize;
        let mut plan = MonthlyPlan::new(months);

        for m in 0..months {
            let mut month_total = Decimal::ZERO;
            for _ in 0..config.max_deals_per_month {
                let mut best: Option<(Decimal, Decimal)> = None;
                let mut best_payment = Decimal::ZERO;
                for &(value, rate) in &options {
                    let payment = value * rate / Decimal::from(AMORTIZATION_MONTHS);
                    if month_total + payment <= config.net_target && payment > best_payment {
                        best_payment = payment;
                        best = Some((value, rate));
                    }
                }
                match best {
                    Some((value, rate)) => {
                        plan.push(
                            m,
                            Deal {
                                value,
                                rate,
                                count: 1,
                            },
                        );
                        month_total += best_payment;
                    }
                    None => break,
                }
            }
        }

        Self {
            pending: Some(Candidate {
                plan,
                coaching: None,
            }),
        }
    }
}

impl CandidateGenerator for GreedyGenerator {
    fn cardinality(&self) -> u128 {
        1
    }

    fn next_batch(&mut self, limit: usize) -> Vec<Candidate> {
        if limit == 0 {
            return Vec::new();
        }
        self.pending.take().into_iter().collect()
    }
}

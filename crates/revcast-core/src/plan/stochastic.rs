use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::config::{CoachingPolicy, Configuration, CountRange};
use crate::types::{CoachingPlan, Deal, Money, MonthlyPlan, Rate};

use super::{deal_options, Candidate, CandidateGenerator};

/// Batched i.i.d. sampler over the candidate space. Each candidate is
/// `months` independent `(count, value, rate)` draws, uniform over the
/// option sets, plus an independent coaching draw. Exhausted once the
/// sample budget is spent, regardless of batch remainder.
pub struct StochasticGenerator {
    rng: StdRng,
    options: Vec<(Money, Rate)>,
    deal_counts: CountRange,
    coaching_counts: CountRange,
    months: usize,
    policy: CoachingPolicy,
    budget: u64,
    drawn: u64,
}

impl StochasticGenerator {
    pub fn new(config: &Configuration) -> Self {
        let rng = match config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            options: deal_options(config),
            deal_counts: config.deal_count_range,
            coaching_counts: config.coaching_count_range,
            months: config.months as usize,
            policy: config.coaching_policy,
            budget: config.sample_budget,
            drawn: 0,
        }
    }

    fn draw(&mut self) -> Candidate {
        let mut plan = MonthlyPlan::new(self.months);
        for m in 0..self.months {
            let count = self
                .rng
                .gen_range(self.deal_counts.min..=self.deal_counts.max);
            let (value, rate) = self.options[self.rng.gen_range(0..self.options.len())];
            if count > 0 {
                plan.push(m, Deal { value, rate, count });
            }
        }

        let coaching = match self.policy {
            CoachingPolicy::JustClear => None,
            CoachingPolicy::TotalSweep => Some(CoachingPlan::Total(self.draw_coaching())),
            CoachingPolicy::PerMonth => Some(CoachingPlan::PerMonth(
                (0..self.months).map(|_| self.draw_coaching()).collect(),
            )),
        };

        Candidate { plan, coaching }
    }

    fn draw_coaching(&mut self) -> u32 {
        self.rng
            .gen_range(self.coaching_counts.min..=self.coaching_counts.max)
    }
}

impl CandidateGenerator for StochasticGenerator {
    fn cardinality(&self) -> u128 {
        self.budget as u128
    }

    fn next_batch(&mut self, limit: usize) -> Vec<Candidate> {
        let remaining = self.budget - self.drawn;
        let take = remaining.min(limit as u64);
        let mut batch = Vec::with_capacity(take as usize);
        for _ in 0..take {
            batch.push(self.draw());
        }
        self.drawn += take;
        batch
    }
}

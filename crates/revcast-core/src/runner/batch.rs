use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::Configuration;
use crate::evaluate::evaluate;
use crate::plan::CandidateGenerator;
use crate::rank::{RankingPolicy, TopK};
use crate::schedule::recognition_timeline;
use crate::types::{Classification, ScenarioResult};
use crate::ForecastResult;

/// Cooperative cancellation signal, checked at batch boundaries only.
/// Clone freely; all clones share one flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// What a run hands back: the two capped, ranked retention sets plus
/// accounting for the progress made.
#[derive(Debug)]
pub struct RunOutcome {
    pub qualified: Vec<ScenarioResult>,
    pub near_qualified: Vec<ScenarioResult>,
    /// Results that classified as qualified / near-qualified, whether
    /// or not they survived the retention cap.
    pub qualified_seen: u64,
    pub near_qualified_seen: u64,
    pub candidates_evaluated: u64,
    pub cancelled: bool,
}

/// Drive generation and evaluation batch-by-batch. Peak memory is
/// bounded by the batch size and the two capped retention sets, never
/// by the total sample budget; rejected results are dropped on the
/// spot, and so is anything that would not make the current cap. The
/// progress callback fires after every batch with
/// `(candidates evaluated, total cardinality)`.
pub fn run(
    config: &Configuration,
    generator: &mut dyn CandidateGenerator,
    ranking: RankingPolicy,
    progress: &mut dyn FnMut(u64, u128),
    cancel: &CancelToken,
) -> ForecastResult<RunOutcome> {
    let months = config.months as usize;
    let total = generator.cardinality();

    let mut qualified = TopK::new(ranking, config.result_cap);
    let mut near_qualified = TopK::new(ranking, config.result_cap);
    let mut seq: u64 = 0;
    let mut cancelled = false;

    loop {
        if cancel.is_cancelled() {
            cancelled = true;
            break;
        }
        let batch = generator.next_batch(config.batch_size);
        if batch.is_empty() {
            break;
        }
        for candidate in &batch {
            let timeline = recognition_timeline(&candidate.plan, months);
            let result = evaluate(&candidate.plan, &timeline, candidate.coaching.as_ref(), config);
            match result.classification {
                Classification::Qualified => {
                    qualified.insert(seq, result);
                }
                Classification::NearQualified => {
                    near_qualified.insert(seq, result);
                }
                Classification::Rejected => {}
            }
            seq += 1;
        }
        progress(seq, total);
    }

    Ok(RunOutcome {
        qualified_seen: qualified.seen(),
        near_qualified_seen: near_qualified.seen(),
        qualified: qualified.into_results(),
        near_qualified: near_qualified.into_results(),
        candidates_evaluated: seq,
        cancelled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CoachingPolicy, CountRange};
    use crate::plan::{build_generator, Strategy};
    use rust_decimal_macros::dec;

    fn runner_config() -> Configuration {
        Configuration {
            months: 3,
            net_target: dec!(50_000),
            near_target_threshold: Some(dec!(40_000)),
            coaching_price: dec!(8750),
            monthly_expense_total: dec!(0),
            deal_values: vec![dec!(500_000), dec!(1_500_000)],
            commission_rates: vec![dec!(0.05), dec!(0.11)],
            value_rates: None,
            deal_count_range: CountRange { min: 0, max: 1 },
            coaching_count_range: CountRange { min: 0, max: 8 },
            max_deals_per_month: 3,
            sample_budget: 100,
            batch_size: 16,
            seed: Some(42),
            result_cap: 10,
            allow_large_cardinality: false,
            coaching_policy: CoachingPolicy::TotalSweep,
            start_month: None,
        }
    }

    #[test]
    fn test_progress_fires_per_batch_and_covers_budget() {
        let config = runner_config();
        let mut generator = build_generator(&config, Strategy::StochasticBatched).unwrap();
        let mut calls = Vec::new();
        let outcome = run(
            &config,
            generator.as_mut(),
            RankingPolicy::ByProfit,
            &mut |done, total| calls.push((done, total)),
            &CancelToken::new(),
        )
        .unwrap();

        assert_eq!(outcome.candidates_evaluated, 100);
        assert!(!outcome.cancelled);
        // 100 candidates in batches of 16: 7 boundaries, last one full.
        assert_eq!(calls.len(), 7);
        assert_eq!(calls.last(), Some(&(100, 100)));
        assert!(calls.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_retention_sets_respect_cap() {
        let config = runner_config();
        let mut generator = build_generator(&config, Strategy::Exhaustive).unwrap();
        let outcome = run(
            &config,
            generator.as_mut(),
            RankingPolicy::ByProfit,
            &mut |_, _| {},
            &CancelToken::new(),
        )
        .unwrap();

        assert!(outcome.qualified.len() <= 10);
        assert!(outcome.near_qualified.len() <= 10);
        // With coaching totals up to 8 * 8750 = 70_000 revenue, far more
        // than 10 candidates qualify; the cap must have dropped some.
        assert!(outcome.qualified_seen > 10);
    }

    #[test]
    fn test_results_ordered_by_policy() {
        let config = runner_config();
        let mut generator = build_generator(&config, Strategy::Exhaustive).unwrap();
        let outcome = run(
            &config,
            generator.as_mut(),
            RankingPolicy::ByProfit,
            &mut |_, _| {},
            &CancelToken::new(),
        )
        .unwrap();

        for pair in outcome.qualified.windows(2) {
            assert!(pair[0].net_profit >= pair[1].net_profit);
        }
    }

    #[test]
    fn test_cancellation_returns_partial_results() {
        let config = runner_config();
        let mut generator = build_generator(&config, Strategy::StochasticBatched).unwrap();
        let cancel = CancelToken::new();
        let mut batches = 0;
        let outcome = run(
            &config,
            generator.as_mut(),
            RankingPolicy::ByProfit,
            &mut |_, _| {
                batches += 1;
                if batches == 2 {
                    cancel.cancel();
                }
            },
            &cancel,
        )
        .unwrap();

        assert!(outcome.cancelled);
        assert_eq!(outcome.candidates_evaluated, 32);
    }

    #[test]
    fn test_rejected_results_are_not_retained() {
        let mut config = runner_config();
        // Nothing can reach the target: tiny coaching range, no deals.
        config.net_target = dec!(10_000_000);
        config.near_target_threshold = None;
        let mut generator = build_generator(&config, Strategy::StochasticBatched).unwrap();
        let outcome = run(
            &config,
            generator.as_mut(),
            RankingPolicy::ByProfit,
            &mut |_, _| {},
            &CancelToken::new(),
        )
        .unwrap();

        assert!(outcome.qualified.is_empty());
        assert!(outcome.near_qualified.is_empty());
        assert_eq!(outcome.qualified_seen, 0);
        assert_eq!(outcome.candidates_evaluated, 100);
    }
}

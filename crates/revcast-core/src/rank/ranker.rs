use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::ScenarioResult;

/// Ordering applied within and across batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankingPolicy {
    /// Largest net profit first, lighter workload breaking ties.
    ByProfit,
    /// Lightest workload first, larger net profit breaking ties.
    ByWorkload,
}

/// Compare two results under a policy. Ties on both keys are left
/// `Equal` here; discovery order settles them in [`TopK`].
pub fn compare(policy: RankingPolicy, a: &ScenarioResult, b: &ScenarioResult) -> Ordering {
    match policy {
        RankingPolicy::ByProfit => b
            .net_profit
            .cmp(&a.net_profit)
            .then_with(|| a.workload_score.cmp(&b.workload_score)),
        RankingPolicy::ByWorkload => a
            .workload_score
            .cmp(&b.workload_score)
            .then_with(|| b.net_profit.cmp(&a.net_profit)),
    }
}

/// Capped, ordered retention set. Kept sorted on every insert so the
/// incremental merge and a one-pass sort over the same inputs produce
/// identical orderings; a result that would not make the current cap is
/// dropped immediately.
#[derive(Debug)]
pub struct TopK {
    policy: RankingPolicy,
    cap: usize,
    entries: Vec<(u64, ScenarioResult)>,
    seen: u64,
}

impl TopK {
    pub fn new(policy: RankingPolicy, cap: usize) -> Self {
        Self {
            policy,
            cap,
            entries: Vec::new(),
            seen: 0,
        }
    }

    /// Offer a result discovered at sequence `seq`. Returns whether it
    /// was admitted.
    pub fn insert(&mut self, seq: u64, result: ScenarioResult) -> bool {
        self.seen += 1;
        let pos = self.entries.partition_point(|(existing_seq, existing)| {
            compare(self.policy, existing, &result)
                .then(existing_seq.cmp(&seq))
                .is_lt()
        });
        if pos >= self.cap {
            return false;
        }
        self.entries.insert(pos, (seq, result));
        if self.entries.len() > self.cap {
            self.entries.pop();
        }
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of results offered, admitted or not.
    pub fn seen(&self) -> u64 {
        self.seen
    }

    /// Hand off the retained results in rank order.
    pub fn into_results(self) -> Vec<ScenarioResult> {
        self.entries.into_iter().map(|(_, result)| result).collect()
    }
}

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::config::Configuration;
use crate::types::{
    Classification, CoachingPlan, CommissionTimeline, Money, MonthlyPlan, ScenarioResult,
};

/// Score one candidate. Pure: the same plan, timeline, and
/// configuration always produce an identical result.
///
/// `coaching` is `None` under the just-clear policy; the smallest
/// engagement count that lifts net profit to the target is derived here
/// from the recognized deal revenue.
pub fn evaluate(
    plan: &MonthlyPlan,
    timeline: &CommissionTimeline,
    coaching: Option<&CoachingPlan>,
    config: &Configuration,
) -> ScenarioResult {
    assert_eq!(
        timeline.len(),
        config.months as usize,
        "timeline length {} does not match horizon {}",
        timeline.len(),
        config.months
    );

    let deal_revenue = timeline.total();
    let total_expense = config.total_expense();

    let coaching_total = match coaching {
        Some(counts) => counts.total(),
        None => engagements_to_clear(deal_revenue, total_expense, config),
    };

    let coaching_revenue = Decimal::from(coaching_total) * config.coaching_price;
    let total_revenue = coaching_revenue + deal_revenue;
    let net_profit = total_revenue - total_expense;

    let classification = classify(net_profit, config);

    ScenarioResult {
        coaching_revenue,
        deal_revenue,
        total_revenue,
        total_expense,
        net_profit,
        coaching_total,
        workload_score: coaching_total + plan.total_deal_count(),
        classification,
        plan_summary: plan.summary(config.start_month),
    }
}

/// Smallest engagement count whose revenue closes the gap between
/// recognized deal revenue and `net_target` plus expenses. Zero when
/// the deals alone already clear the target.
fn engagements_to_clear(deal_revenue: Money, total_expense: Money, config: &Configuration) -> u32 {
    let gap = config.net_target + total_expense - deal_revenue;
    if gap <= Decimal::ZERO {
        return 0;
    }
    (gap / config.coaching_price)
        .ceil()
        .to_u32()
        .unwrap_or(u32::MAX)
}

fn classify(net_profit: Money, config: &Configuration) -> Classification {
    if net_profit >= config.net_target {
        Classification::Qualified
    } else if config
        .near_target_threshold
        .is_some_and(|threshold| net_profit >= threshold)
    {
        Classification::NearQualified
    } else {
        Classification::Rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CoachingPolicy, CountRange};
    use crate::schedule::recognition_timeline;
    use crate::types::Deal;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn eval_config() -> Configuration {
        Configuration {
            months: 6,
            net_target: dec!(100_000),
            near_target_threshold: Some(dec!(80_000)),
            coaching_price: dec!(8750),
            monthly_expense_total: dec!(1000),
            deal_values: vec![dec!(1_000_000)],
            commission_rates: vec![dec!(0.11)],
            value_rates: None,
            deal_count_range: CountRange { min: 0, max: 1 },
            coaching_count_range: CountRange { min: 0, max: 50 },
            max_deals_per_month: 3,
            sample_budget: 1,
            batch_size: 1,
            seed: None,
            result_cap: 100,
            allow_large_cardinality: false,
            coaching_policy: CoachingPolicy::TotalSweep,
            start_month: None,
        }
    }

    fn one_deal_plan(config: &Configuration) -> MonthlyPlan {
        let mut plan = MonthlyPlan::new(config.months as usize);
        plan.push(
            0,
            Deal {
                value: dec!(1_000_000),
                rate: dec!(0.11),
                count: 1,
            },
        );
        plan
    }

    #[test]
    fn test_revenue_breakdown() {
        let config = eval_config();
        let plan = one_deal_plan(&config);
        let timeline = recognition_timeline(&plan, 6);
        let result = evaluate(&plan, &timeline, Some(&CoachingPlan::Total(4)), &config);

        assert_eq!(result.deal_revenue, timeline.total());
        assert_eq!(result.coaching_revenue, dec!(35_000));
        assert_eq!(result.total_revenue, timeline.total() + dec!(35_000));
        assert_eq!(result.total_expense, dec!(6000));
        assert_eq!(
            result.net_profit,
            timeline.total() + dec!(35_000) - dec!(6000)
        );
        assert_eq!(result.coaching_total, 4);
        assert_eq!(result.workload_score, 5);
    }

    #[test]
    fn test_per_month_coaching_sums() {
        let config = eval_config();
        let plan = MonthlyPlan::new(6);
        let timeline = recognition_timeline(&plan, 6);
        let coaching = CoachingPlan::PerMonth(vec![2, 0, 1, 0, 0, 3]);
        let result = evaluate(&plan, &timeline, Some(&coaching), &config);
        assert_eq!(result.coaching_total, 6);
        assert_eq!(result.coaching_revenue, dec!(52_500));
    }

    #[test]
    fn test_classification_buckets() {
        let mut config = eval_config();
        config.monthly_expense_total = dec!(0);
        let plan = MonthlyPlan::new(6);
        let timeline = recognition_timeline(&plan, 6);

        // 12 * 8750 = 105_000 >= 100_000 target.
        let result = evaluate(&plan, &timeline, Some(&CoachingPlan::Total(12)), &config);
        assert_eq!(result.classification, Classification::Qualified);

        // 10 * 8750 = 87_500: between threshold and target.
        let result = evaluate(&plan, &timeline, Some(&CoachingPlan::Total(10)), &config);
        assert_eq!(result.classification, Classification::NearQualified);

        // 5 * 8750 = 43_750: below both.
        let result = evaluate(&plan, &timeline, Some(&CoachingPlan::Total(5)), &config);
        assert_eq!(result.classification, Classification::Rejected);
    }

    #[test]
    fn test_no_threshold_means_no_near_bucket() {
        let mut config = eval_config();
        config.monthly_expense_total = dec!(0);
        config.near_target_threshold = None;
        let plan = MonthlyPlan::new(6);
        let timeline = recognition_timeline(&plan, 6);
        let result = evaluate(&plan, &timeline, Some(&CoachingPlan::Total(10)), &config);
        assert_eq!(result.classification, Classification::Rejected);
    }

    #[test]
    fn test_just_clear_derives_minimum_count() {
        let mut config = eval_config();
        config.monthly_expense_total = dec!(0);
        let plan = MonthlyPlan::new(6);
        let timeline = recognition_timeline(&plan, 6);

        // Gap of exactly 100_000 at 8750 per engagement: ceil = 12.
        let result = evaluate(&plan, &timeline, None, &config);
        assert_eq!(result.coaching_total, 12);
        assert_eq!(result.classification, Classification::Qualified);

        // One fewer would miss the target.
        assert!(dec!(11) * dec!(8750) < dec!(100_000));
    }

    #[test]
    fn test_just_clear_zero_when_deals_cover_target() {
        let mut config = eval_config();
        config.monthly_expense_total = dec!(0);
        config.net_target = dec!(30_000);
        let plan = one_deal_plan(&config);
        let timeline = recognition_timeline(&plan, 6);
        // Deal revenue ~36_666 already clears 30_000.
        let result = evaluate(&plan, &timeline, None, &config);
        assert_eq!(result.coaching_total, 0);
        assert_eq!(result.classification, Classification::Qualified);
    }

    #[test]
    fn test_empty_plan_with_expenses_goes_negative() {
        let mut config = eval_config();
        config.near_target_threshold = None;
        let plan = MonthlyPlan::new(6);
        let timeline = recognition_timeline(&plan, 6);
        let result = evaluate(&plan, &timeline, Some(&CoachingPlan::Total(0)), &config);
        assert_eq!(result.net_profit, dec!(-6000));
        assert_eq!(result.classification, Classification::Rejected);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let config = eval_config();
        let plan = one_deal_plan(&config);
        let timeline = recognition_timeline(&plan, 6);
        let a = evaluate(&plan, &timeline, Some(&CoachingPlan::Total(3)), &config);
        let b = evaluate(&plan, &timeline, Some(&CoachingPlan::Total(3)), &config);
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic(expected = "does not match horizon")]
    fn test_wrong_timeline_length_panics() {
        let config = eval_config();
        let plan = MonthlyPlan::new(6);
        let timeline = recognition_timeline(&MonthlyPlan::new(4), 4);
        evaluate(&plan, &timeline, None, &config);
    }
}

use revcast_core::config::{CoachingPolicy, Configuration, CountRange};
use revcast_core::evaluate::evaluate;
use revcast_core::schedule::recognition_timeline;
use revcast_core::types::{Classification, CoachingPlan, Deal, MonthlyPlan};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Commission recognition tests
// ===========================================================================

fn config_for(months: u32) -> Configuration {
    Configuration {
        months,
        net_target: dec!(0),
        near_target_threshold: None,
        coaching_price: dec!(8750),
        monthly_expense_total: dec!(0),
        deal_values: vec![dec!(1_000_000)],
        commission_rates: vec![dec!(0.11)],
        value_rates: None,
        deal_count_range: CountRange { min: 0, max: 1 },
        coaching_count_range: CountRange { min: 0, max: 0 },
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

#[test]
fn test_late_closings_recognize_nothing() {
    // Any closing with m + 2 >= months is fully out of horizon.
    for months in 1..=12usize {
        for m in months.saturating_sub(2)..months {
            let mut plan = MonthlyPlan::new(months);
            plan.push(
                m,
                Deal {
                    value: dec!(2_500_000),
                    rate: dec!(0.17),
                    count: 2,
                },
            );
            let timeline = recognition_timeline(&plan, months);
            assert_eq!(
                timeline.total(),
                Decimal::ZERO,
                "months={months} close={m}"
            );
        }
    }
}

#[test]
fn test_recognized_total_matches_in_horizon_payment_count() {
    let deal = Deal {
        value: dec!(1_500_000),
        rate: dec!(0.13),
        count: 2,
    };
    for months in 1..=12usize {
        for m in 0..months {
            let mut plan = MonthlyPlan::new(months);
            plan.push(m, deal);
            let timeline = recognition_timeline(&plan, months);

            let in_horizon = months.saturating_sub(m + 2).min(12) as u32;
            let expected = deal.monthly_payment() * Decimal::from(in_horizon);
            assert_eq!(timeline.total(), expected, "months={months} close={m}");
            assert!(timeline.total() <= deal.full_commission());
        }
    }
}

#[test]
fn test_single_month_horizon_has_no_deal_revenue() {
    let mut plan = MonthlyPlan::new(1);
    plan.push(
        0,
        Deal {
            value: dec!(2_500_000),
            rate: dec!(0.17),
            count: 3,
        },
    );
    let timeline = recognition_timeline(&plan, 1);
    assert_eq!(timeline.total(), Decimal::ZERO);

    // Only coaching revenue can qualify a one-month forecast.
    let config = config_for(1);
    let result = evaluate(&plan, &timeline, Some(&CoachingPlan::Total(0)), &config);
    assert_eq!(result.deal_revenue, Decimal::ZERO);
}

// ===========================================================================
// Worked scenario from the accounting policy
// ===========================================================================

#[test]
fn test_six_month_single_deal_scenario() {
    // months=6, one 1M deal at 11% closing in month 0, no coaching, no
    // expenses, target 0. Recognition lands in months 2..=5 only.
    let config = config_for(6);
    let mut plan = MonthlyPlan::new(6);
    plan.push(
        0,
        Deal {
            value: dec!(1_000_000),
            rate: dec!(0.11),
            count: 1,
        },
    );
    let timeline = recognition_timeline(&plan, 6);

    let expected = dec!(1_000_000) * dec!(0.11) / dec!(12) * dec!(4);
    assert_eq!(timeline.total(), expected);
    assert_eq!(timeline.total().round_dp(2), dec!(36666.67));
    assert_eq!(timeline.month(0), Decimal::ZERO);
    assert_eq!(timeline.month(1), Decimal::ZERO);

    let result = evaluate(&plan, &timeline, Some(&CoachingPlan::Total(0)), &config);
    assert_eq!(result.deal_revenue, timeline.total());
    assert_eq!(result.net_profit, timeline.total());
    assert_eq!(result.classification, Classification::Qualified);
}

#[test]
fn test_empty_plan_burns_expenses() {
    let mut config = config_for(6);
    config.net_target = dec!(50_000);
    config.monthly_expense_total = dec!(8859);

    let plan = MonthlyPlan::new(6);
    let timeline = recognition_timeline(&plan, 6);
    let result = evaluate(&plan, &timeline, Some(&CoachingPlan::Total(0)), &config);

    assert_eq!(result.net_profit, dec!(-53_154));
    assert_eq!(result.classification, Classification::Rejected);
}

#[test]
fn test_evaluation_has_no_hidden_state() {
    let config = config_for(8);
    let mut plan = MonthlyPlan::new(8);
    plan.push(
        1,
        Deal {
            value: dec!(1_000_000),
            rate: dec!(0.11),
            count: 2,
        },
    );
    let first = {
        let timeline = recognition_timeline(&plan, 8);
        evaluate(&plan, &timeline, Some(&CoachingPlan::Total(5)), &config)
    };
    let second = {
        let timeline = recognition_timeline(&plan, 8);
        evaluate(&plan, &timeline, Some(&CoachingPlan::Total(5)), &config)
    };
    assert_eq!(first, second);
}

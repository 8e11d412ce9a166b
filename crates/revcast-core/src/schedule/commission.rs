use crate::types::{CommissionTimeline, MonthlyPlan};

/// Months between a closing and the first recognized payment.
pub const RECOGNITION_LAG_MONTHS: usize = 2;

/// Months the commission is spread over once recognition starts.
pub const AMORTIZATION_MONTHS: u32 = 12;

/// Turn a deal plan into the per-month recognized-commission timeline.
///
/// A deal closing in month `m` pays nothing in `m` or `m + 1`; its full
/// commission is spread evenly over months `m + 2` through `m + 13`,
/// truncated at the horizon. A closing too late to recognize anything
/// inside the horizon is valid and simply contributes zero.
pub fn recognition_timeline(plan: &MonthlyPlan, months: usize) -> CommissionTimeline {
    assert_eq!(
        plan.len(),
        months,
        "plan length {} does not match horizon {}",
        plan.len(),
        months
    );

    let mut timeline = CommissionTimeline::zeroed(months);
    for m in 0..months {
        for deal in plan.deals_in(m) {
            let payment = deal.monthly_payment();
            let first = m + RECOGNITION_LAG_MONTHS;
            let last = m + RECOGNITION_LAG_MONTHS + AMORTIZATION_MONTHS as usize - 1;
            for j in first..=last {
                if j >= months {
                    break;
                }
                timeline.add(j, payment);
            }
        }
    }
    timeline
}

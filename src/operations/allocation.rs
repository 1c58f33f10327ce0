use crate::models::budget::{
    templates_for, BudgetAllocation, CategoryTemplate, GuestCountBand, TaskAllocation, TaskBudget,
};
use crate::models::event_type::EventType;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};

/// Category-name keywords whose share grows with the guest list.
const GUEST_SCALING_KEYWORDS: [&str; 8] = [
    "venue",
    "catering",
    "food",
    "drink",
    "refreshment",
    "seating",
    "favor",
    "gift",
];

const MISCELLANEOUS: &str = "Miscellaneous";
const FALLBACK_CATEGORY: &str = "Other Expenses";
const FALLBACK_PERCENTAGE: u32 = 3;

/// Splits `total_budget` across the category templates of `event_type`.
///
/// Unknown event types use the `other` templates. The result keeps template
/// order and is never sorted by amount.
pub fn compute_allocations(
    event_type: &str,
    total_budget: u64,
    guest_count: u32,
) -> Vec<BudgetAllocation> {
    allocate(EventType::normalize(event_type), total_budget, guest_count)
}

pub fn allocate(
    event_type: EventType,
    total_budget: u64,
    guest_count: u32,
) -> Vec<BudgetAllocation> {
    let templates = templates_for(event_type);
    let band = GuestCountBand::for_guests(guest_count);
    debug!(%event_type, total_budget, guest_count, ?band, "computing budget allocation");

    let adjusted: Vec<Decimal> = templates
        .iter()
        .map(|template| adjusted_percentage(template, band.factor()))
        .collect();
    // Each entry is at least 1, so the sum is never zero.
    let adjusted_total: Decimal = adjusted.iter().copied().sum();
    let budget = Decimal::from(total_budget);

    templates
        .iter()
        .zip(adjusted)
        .map(|(template, percentage)| {
            let percentage = percentage / adjusted_total * Decimal::ONE_HUNDRED;
            let amount = round_to_u64(percentage / Decimal::ONE_HUNDRED * budget);
            let task_amount =
                round_to_u64(Decimal::from(amount) / Decimal::from(template.tasks.len()));

            BudgetAllocation {
                category: template.name.to_string(),
                amount,
                percentage: round_to_u64(percentage) as u32,
                tasks: template
                    .tasks
                    .iter()
                    .map(|task| TaskAllocation {
                        name: task.to_string(),
                        amount: task_amount,
                    })
                    .collect(),
            }
        })
        .collect()
}

/// Finds the category and amount a free-text task title belongs to.
pub fn budget_for_task(
    task_name: &str,
    event_type: &str,
    total_budget: u64,
    guest_count: u32,
) -> TaskBudget {
    let allocations = compute_allocations(event_type, total_budget, guest_count);
    resolve_task_budget(&allocations, task_name, total_budget)
}

/// First task (category order, then task order) whose name contains the query
/// or is contained by it wins. Unmatched queries fall back to the
/// Miscellaneous category, then to a flat 3% of the budget.
pub fn resolve_task_budget(
    allocations: &[BudgetAllocation],
    task_name: &str,
    total_budget: u64,
) -> TaskBudget {
    let query = task_name.to_lowercase();

    for allocation in allocations {
        for task in &allocation.tasks {
            let candidate = task.name.to_lowercase();
            if candidate.contains(&query) || query.contains(&candidate) {
                return TaskBudget {
                    amount: task.amount,
                    category: allocation.category.clone(),
                    percentage: allocation.percentage,
                };
            }
        }
    }

    if let Some(misc) = allocations
        .iter()
        .find(|a| a.category.contains(MISCELLANEOUS))
    {
        debug!(task_name, "no template task matched, using {}", misc.category);
        let share = Decimal::from(misc.amount) / Decimal::from(misc.tasks.len().max(1));
        return TaskBudget {
            amount: round_to_u64(share),
            category: misc.category.clone(),
            percentage: misc.percentage,
        };
    }

    warn!(task_name, "allocation has no Miscellaneous category, using flat fallback");
    TaskBudget {
        amount: round_to_u64(Decimal::from(total_budget) * Decimal::new(3, 2)),
        category: FALLBACK_CATEGORY.to_string(),
        percentage: FALLBACK_PERCENTAGE,
    }
}

pub fn scales_with_guests(category_name: &str) -> bool {
    let name = category_name.to_lowercase();
    GUEST_SCALING_KEYWORDS
        .iter()
        .any(|keyword| name.contains(keyword))
}

fn adjusted_percentage(template: &CategoryTemplate, factor: Decimal) -> Decimal {
    let percentage = Decimal::from(template.percentage);
    let delta = factor - Decimal::ONE;
    let adjustment = if scales_with_guests(template.name) {
        delta * percentage * Decimal::new(5, 1)
    } else {
        -(delta * percentage * Decimal::new(1, 1))
    };
    (percentage + adjustment).max(Decimal::ONE)
}

/// Half away from zero; every value passed here is non-negative.
fn round_to_u64(value: Decimal) -> u64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn find<'a>(allocations: &'a [BudgetAllocation], category: &str) -> &'a BudgetAllocation {
        allocations
            .iter()
            .find(|a| a.category == category)
            .unwrap_or_else(|| panic!("category {} missing", category))
    }

    /// Renormalized percentages before rounding, in template order.
    fn unrounded_percentages(event_type: EventType, guest_count: u32) -> Vec<Decimal> {
        let factor = GuestCountBand::for_guests(guest_count).factor();
        let adjusted: Vec<Decimal> = templates_for(event_type)
            .iter()
            .map(|t| adjusted_percentage(t, factor))
            .collect();
        let total: Decimal = adjusted.iter().copied().sum();
        adjusted
            .iter()
            .map(|p| *p / total * Decimal::ONE_HUNDRED)
            .collect()
    }

    /// Unrounded share of the guest-scaling categories.
    fn scaling_share(event_type: EventType, guest_count: u32) -> Decimal {
        templates_for(event_type)
            .iter()
            .zip(unrounded_percentages(event_type, guest_count))
            .filter(|(t, _)| scales_with_guests(t.name))
            .map(|(_, p)| p)
            .sum()
    }

    #[test]
    fn test_wedding_neutral_band_matches_template() {
        let allocations = compute_allocations("wedding", 500000, 75);
        let venue = find(&allocations, "Venue & Catering");
        assert_eq!(venue.amount, 225000);
        assert_eq!(venue.percentage, 45);
        assert_eq!(venue.tasks.len(), 3);
        assert!(venue.tasks.iter().all(|t| t.amount == 75000));
    }

    #[test]
    fn test_wedding_fifty_guests_uses_small_band() {
        let allocations = compute_allocations("wedding", 500000, 50);
        let expected = [
            ("Venue & Catering", 209627, 42, 69876),
            ("Decor & Flowers", 79193, 16, 26398),
            ("Photography & Video", 63354, 13, 21118),
            ("Attire & Beauty", 52795, 11, 17598),
            ("Music & Entertainment", 42236, 8, 14079),
            ("Transportation", 26398, 5, 8799),
            ("Miscellaneous", 26398, 5, 8799),
        ];
        assert_eq!(allocations.len(), expected.len());
        for (allocation, (name, amount, percentage, task_amount)) in
            allocations.iter().zip(expected)
        {
            assert_eq!(allocation.category, name);
            assert_eq!(allocation.amount, amount);
            assert_eq!(allocation.percentage, percentage);
            assert!(allocation.tasks.iter().all(|t| t.amount == task_amount));
        }
    }

    #[test]
    fn test_unknown_type_falls_back_to_other() {
        let allocations = compute_allocations("unknown-type", 100000, 75);
        let names: Vec<&str> = allocations.iter().map(|a| a.category.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Venue & Facilities",
                "Food & Refreshments",
                "Services & Personnel",
                "Equipment & Materials",
                "Decor & Presentation",
                "Miscellaneous",
            ]
        );
        assert_eq!(allocations[0].percentage, 35);
        assert_eq!(allocations[0].amount, 35000);
        assert_eq!(allocations[1].percentage, 25);
        assert_eq!(allocations[1].amount, 25000);
    }

    #[test]
    fn test_event_type_is_case_insensitive() {
        assert_eq!(
            compute_allocations("WEDDING", 300000, 120),
            compute_allocations("wedding", 300000, 120)
        );
    }

    #[test]
    fn test_template_order_preserved() {
        let allocations = compute_allocations("birthday", 80000, 250);
        let names: Vec<&str> = allocations.iter().map(|a| a.category.as_str()).collect();
        let template_names: Vec<&str> =
            templates_for(EventType::Birthday).iter().map(|t| t.name).collect();
        assert_eq!(names, template_names);
    }

    #[test]
    fn test_zero_budget_yields_zero_amounts() {
        let allocations = compute_allocations("wedding", 0, 50);
        assert!(allocations.iter().all(|a| a.amount == 0));
        assert!(allocations.iter().flat_map(|a| &a.tasks).all(|t| t.amount == 0));
        let total: u32 = allocations.iter().map(|a| a.percentage).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_zero_guests_same_as_small_band() {
        assert_eq!(
            compute_allocations("social", 120000, 0),
            compute_allocations("social", 120000, 50)
        );
    }

    #[rstest]
    fn test_percentages_sum_close_to_one_hundred(
        #[values("wedding", "corporate", "birthday", "social", "other")] event_type: &str,
        #[values(0, 50, 51, 100, 101, 200, 201, 5000)] guest_count: u32,
        #[values(0, 1, 99999, 500000, 12345678)] budget: u64,
    ) {
        let allocations = compute_allocations(event_type, budget, guest_count);
        let total: i64 = allocations.iter().map(|a| a.percentage as i64).sum();
        assert!(
            (total - 100).abs() <= allocations.len() as i64,
            "{} guests={} budget={} sums to {}",
            event_type,
            guest_count,
            budget,
            total
        );
        assert!(allocations.iter().all(|a| a.percentage >= 1));
    }

    #[rstest]
    fn test_task_amounts_split_category_evenly(
        #[values("wedding", "corporate", "birthday", "social", "other")] event_type: &str,
        #[values(10, 75, 150, 400)] guest_count: u32,
    ) {
        for allocation in compute_allocations(event_type, 777777, guest_count) {
            let expected = round_to_u64(
                Decimal::from(allocation.amount) / Decimal::from(allocation.tasks.len()),
            );
            assert!(allocation.tasks.iter().all(|t| t.amount == expected));
        }
    }

    #[rstest]
    fn test_category_amount_rounds_unrounded_share(
        #[values(
            EventType::Wedding,
            EventType::Corporate,
            EventType::Birthday,
            EventType::Social,
            EventType::Other
        )]
        event_type: EventType,
        #[values(0, 50, 51, 100, 101, 200, 201, 1000)] guest_count: u32,
        #[values(1, 333, 99999, 500000, 12345679)] budget: u64,
    ) {
        let allocations = allocate(event_type, budget, guest_count);
        let percentages = unrounded_percentages(event_type, guest_count);
        assert_eq!(allocations.len(), percentages.len());

        for (allocation, percentage) in allocations.iter().zip(percentages) {
            let expected = round_to_u64(percentage / Decimal::ONE_HUNDRED * Decimal::from(budget));
            assert_eq!(
                allocation.amount, expected,
                "{} guests={} budget={} category {}",
                event_type, guest_count, budget, allocation.category
            );
            assert_eq!(u64::from(allocation.percentage), round_to_u64(percentage));
        }
    }

    #[test]
    fn test_task_rounding_drift_is_kept() {
        let allocations = compute_allocations("wedding", 500000, 75);
        let attire = find(&allocations, "Attire & Beauty");
        assert_eq!(attire.amount, 50000);
        let task_total: u64 = attire.tasks.iter().map(|t| t.amount).sum();
        assert_eq!(task_total, 50001);
    }

    #[rstest]
    #[case(50, 51)]
    #[case(100, 101)]
    #[case(200, 201)]
    fn test_scaling_share_grows_across_band_boundaries(#[case] below: u32, #[case] above: u32) {
        for event_type in EventType::ALL {
            assert!(
                scaling_share(event_type, above) > scaling_share(event_type, below),
                "{} did not grow from {} to {}",
                event_type,
                below,
                above
            );
        }
    }

    #[test]
    fn test_scaling_categories_gain_share_for_large_weddings() {
        let small = compute_allocations("wedding", 1000000, 40);
        let large = compute_allocations("wedding", 1000000, 300);
        assert!(find(&large, "Venue & Catering").amount > find(&small, "Venue & Catering").amount);
        assert!(find(&large, "Decor & Flowers").amount < find(&small, "Decor & Flowers").amount);
    }

    #[rstest]
    #[case("Venue & Catering", true)]
    #[case("Catering & Refreshments", true)]
    #[case("Food & Cake", true)]
    #[case("Gifts & Favors", true)]
    #[case("Decor & Flowers", false)]
    #[case("Miscellaneous", false)]
    #[case("Entertainment", false)]
    fn test_scales_with_guests(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(scales_with_guests(name), expected);
    }

    #[test]
    fn test_budget_for_exact_task() {
        let result = budget_for_task("Book wedding venue", "wedding", 500000, 50);
        assert_eq!(
            result,
            TaskBudget {
                amount: 69876,
                category: "Venue & Catering".to_string(),
                percentage: 42,
            }
        );
    }

    #[test]
    fn test_budget_for_task_matches_both_directions() {
        // query contained in a template task
        let partial = budget_for_task("photographer", "wedding", 500000, 75);
        assert_eq!(partial.category, "Photography & Video");
        assert_eq!(partial.amount, 20000);

        // template task contained in the query
        let paraphrased =
            budget_for_task("Hire photographer for the reception", "wedding", 500000, 75);
        assert_eq!(paraphrased, partial);
    }

    #[test]
    fn test_budget_for_task_is_case_insensitive() {
        let upper = budget_for_task("CATERING ORDER", "corporate", 200000, 80);
        assert_eq!(upper.category, "Catering & Refreshments");
    }

    #[test]
    fn test_budget_for_task_first_match_wins() {
        // "Plan" appears in several categories; the earliest one is returned.
        let result = budget_for_task("plan", "wedding", 500000, 75);
        assert_eq!(result.category, "Photography & Video");
        assert_eq!(result.amount, 20000);
    }

    #[test]
    fn test_empty_task_name_matches_first_task() {
        let result = budget_for_task("", "corporate", 100000, 75);
        assert_eq!(result.category, "Venue & Setup");
    }

    #[test]
    fn test_budget_for_unmatched_task_uses_miscellaneous() {
        let result = budget_for_task("Unrelated obscure task", "wedding", 500000, 50);
        assert_eq!(
            result,
            TaskBudget {
                amount: 8799,
                category: "Miscellaneous".to_string(),
                percentage: 5,
            }
        );
    }

    #[test]
    fn test_budget_without_miscellaneous_uses_flat_fallback() {
        let allocations: Vec<BudgetAllocation> = compute_allocations("wedding", 500000, 75)
            .into_iter()
            .filter(|a| a.category != "Miscellaneous")
            .collect();
        let result = resolve_task_budget(&allocations, "Unrelated obscure task", 500000);
        assert_eq!(
            result,
            TaskBudget {
                amount: 15000,
                category: "Other Expenses".to_string(),
                percentage: 3,
            }
        );
    }

    #[test]
    fn test_budget_for_task_is_idempotent() {
        let first = budget_for_task("Order flowers", "wedding", 350000, 180);
        let second = budget_for_task("Order flowers", "wedding", 350000, 180);
        assert_eq!(first, second);
    }
}

use regex::Regex;
use std::sync::LazyLock;

static NON_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\d]").expect("non-digit pattern is valid"));

/// Renders a rupee amount with Indian digit grouping, e.g. `₹12,34,567`.
pub fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{}", digits);
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("₹{},{}", groups.join(","), last_three)
}

/// Reads a budget typed as free text (`₹5,00,000`, `500000 INR`). Anything
/// without digits, or too large to hold, reads as 0.
pub fn parse_budget(text: &str) -> u64 {
    NON_DIGITS.replace_all(text, "").parse::<u64>().unwrap_or(0)
}

//! Category cost heuristic.

/// Estimated cost bucket for an activity category label.
///
/// First matching substring wins, in a fixed priority order. Matching is
/// case-sensitive on the raw label; the thresholds and precedence are part
/// of the API contract and must not change.
pub fn estimate_cost(category: &str) -> i64 {
    if category.contains("Museum") {
        return 300;
    }
    if category.contains("Outdoor") {
        return 0;
    }
    if category.contains("Food") {
        return 800;
    }
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_buckets() {
        assert_eq!(estimate_cost("History Museum"), 300);
        assert_eq!(estimate_cost("Outdoor Park"), 0);
        assert_eq!(estimate_cost("Food Truck"), 800);
    }

    #[test]
    fn fallback_bucket() {
        assert_eq!(estimate_cost("Theater"), 500);
        assert_eq!(estimate_cost(""), 500);
    }

    #[test]
    fn precedence_is_fixed() {
        // "Museum" is checked before "Food".
        assert_eq!(estimate_cost("Food Museum"), 300);
        // "Outdoor" is checked before "Food".
        assert_eq!(estimate_cost("Outdoor Food Court"), 0);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(estimate_cost("museum"), 500);
        assert_eq!(estimate_cost("FOOD"), 500);
    }
}

/// Pure display derivations used by the presentation layer.
///
/// No hidden state; every function maps a raw numeric field to the label the
/// UI renders.

/// Age-certification label derived from the average rating
pub fn certification(vote_average: f64) -> &'static str {
    if vote_average >= 9.0 {
        "PG-13"
    } else if vote_average >= 7.0 {
        "PG"
    } else if vote_average >= 5.0 {
        "R"
    } else {
        "NC-17"
    }
}

/// Abbreviates monetary amounts: "1.2 billion", "825.5 million", "1.5 thousand"
pub fn abbreviate_amount(amount: u64) -> String {
    if amount >= 1_000_000_000 {
        format!("{:.1} billion", amount as f64 / 1_000_000_000.0)
    } else if amount >= 1_000_000 {
        format!("{:.1} million", amount as f64 / 1_000_000.0)
    } else if amount >= 1_000 {
        format!("{:.1} thousand", amount as f64 / 1_000.0)
    } else {
        amount.to_string()
    }
}

/// Abbreviates vote counts: "1.0M", "34.0k"
pub fn abbreviate_votes(votes: u64) -> String {
    if votes >= 1_000_000 {
        format!("{:.1}M", votes as f64 / 1_000_000.0)
    } else if votes >= 1_000 {
        format!("{:.1}k", votes as f64 / 1_000.0)
    } else {
        votes.to_string()
    }
}

/// Runtime label in hours and minutes, e.g. "2h 28m"
pub fn runtime_label(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certification_thresholds() {
        assert_eq!(certification(9.0), "PG-13");
        assert_eq!(certification(9.5), "PG-13");
        assert_eq!(certification(8.9), "PG");
        assert_eq!(certification(7.0), "PG");
        assert_eq!(certification(6.9), "R");
        assert_eq!(certification(5.0), "R");
        assert_eq!(certification(4.9), "NC-17");
        assert_eq!(certification(0.0), "NC-17");
    }

    #[test]
    fn abbreviate_amount_billions() {
        assert_eq!(abbreviate_amount(1_200_000_000), "1.2 billion");
    }

    #[test]
    fn abbreviate_amount_millions() {
        assert_eq!(abbreviate_amount(825_532_764), "825.5 million");
    }

    #[test]
    fn abbreviate_amount_thousands() {
        assert_eq!(abbreviate_amount(1_500), "1.5 thousand");
    }

    #[test]
    fn abbreviate_amount_small_values_verbatim() {
        assert_eq!(abbreviate_amount(999), "999");
        assert_eq!(abbreviate_amount(0), "0");
    }

    #[test]
    fn abbreviate_votes_millions() {
        assert_eq!(abbreviate_votes(1_000_000), "1.0M");
        assert_eq!(abbreviate_votes(2_450_000), "2.5M");
    }

    #[test]
    fn abbreviate_votes_thousands() {
        assert_eq!(abbreviate_votes(34_000), "34.0k");
        assert_eq!(abbreviate_votes(1_000), "1.0k");
    }

    #[test]
    fn abbreviate_votes_small_values_verbatim() {
        assert_eq!(abbreviate_votes(999), "999");
    }

    #[test]
    fn runtime_label_splits_hours_and_minutes() {
        assert_eq!(runtime_label(148), "2h 28m");
        assert_eq!(runtime_label(60), "1h 0m");
        assert_eq!(runtime_label(45), "0h 45m");
    }
}

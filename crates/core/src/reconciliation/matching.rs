//! Auto-match scoring and planning.
//!
//! The auto-matcher is greedy and order-dependent: lines are processed in
//! the order given, each independently picking the strictly-highest-scoring
//! unclaimed candidate, with ties kept by the first candidate found in
//! enumeration order. Candidates claimed earlier in the same run are
//! excluded for later lines. This is deliberately NOT a globally-optimal
//! assignment; callers rely on the observable greedy behavior.
//!
//! Candidate enumeration order is the caller's responsibility and must be
//! stable; the repository layer orders splits by owning entry date, then
//! split ID (UUIDv7, time-ordered).

use std::collections::HashSet;

use mizan_shared::types::SplitId;

use super::types::{CandidateSplit, LineToMatch, PlannedMatch};

/// Maximum distance in days between a statement line date and the owning
/// journal entry date for a candidate to qualify.
pub const MAX_DATE_DIFF_DAYS: i64 = 3;

/// Base score before subtracting the date distance.
const BASE_SCORE: i64 = 10;

/// Bonus when the line reference appears within the entry reference.
const REFERENCE_BONUS: i64 = 5;

/// Scores a single candidate split against a statement line.
///
/// Returns `None` if the candidate is rejected outright:
/// - net split amount (debit − credit) differs from the signed line amount
///   (exact decimal equality, no tolerance);
/// - the date distance exceeds [`MAX_DATE_DIFF_DAYS`].
///
/// Otherwise the score is `10 − date_diff_days`, plus 5 when both
/// references are non-empty and the line reference occurs within the entry
/// reference (case-insensitive, that direction only).
#[must_use]
pub fn score_candidate(line: &LineToMatch, candidate: &CandidateSplit) -> Option<i64> {
    if candidate.net_amount != line.amount {
        return None;
    }

    let date_diff = (line.line_date - candidate.entry_date).num_days().abs();
    if date_diff > MAX_DATE_DIFF_DAYS {
        return None;
    }

    let mut score = BASE_SCORE - date_diff;

    if let (Some(line_ref), Some(entry_ref)) = (&line.reference, &candidate.entry_reference) {
        let line_ref = line_ref.trim();
        let entry_ref = entry_ref.trim();
        if !line_ref.is_empty()
            && !entry_ref.is_empty()
            && entry_ref.to_lowercase().contains(&line_ref.to_lowercase())
        {
            score += REFERENCE_BONUS;
        }
    }

    Some(score)
}

/// Plans greedy matches for a set of unmatched lines against candidate
/// splits.
///
/// Each line picks the strictly-highest-scoring candidate not yet claimed
/// within this run; ties keep the first candidate in enumeration order.
/// Lines with no qualifying candidate are simply skipped — planning zero
/// matches is a valid no-op, not an error.
#[must_use]
pub fn plan_matches(lines: &[LineToMatch], candidates: &[CandidateSplit]) -> Vec<PlannedMatch> {
    let mut claimed: HashSet<SplitId> = HashSet::new();
    let mut planned = Vec::new();

    for line in lines {
        let mut best: Option<(SplitId, i64)> = None;

        for candidate in candidates {
            if claimed.contains(&candidate.split_id) {
                continue;
            }
            let Some(score) = score_candidate(line, candidate) else {
                continue;
            };
            // Strictly greater only: ties keep the first candidate found.
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((candidate.split_id, score)),
            }
        }

        if let Some((split_id, score)) = best {
            claimed.insert(split_id);
            planned.push(PlannedMatch {
                line_id: line.line_id,
                split_id,
                score,
            });
        }
    }

    planned
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mizan_shared::types::StatementLineId;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn line(amount: Decimal, line_date: NaiveDate, reference: Option<&str>) -> LineToMatch {
        LineToMatch {
            line_id: StatementLineId::new(),
            line_date,
            amount,
            reference: reference.map(str::to_string),
        }
    }

    fn candidate(
        net_amount: Decimal,
        entry_date: NaiveDate,
        entry_reference: Option<&str>,
    ) -> CandidateSplit {
        CandidateSplit {
            split_id: SplitId::new(),
            entry_date,
            net_amount,
            entry_reference: entry_reference.map(str::to_string),
        }
    }

    #[test]
    fn test_exact_amount_same_day_scores_ten() {
        let l = line(dec!(500.0000), date(2026, 2, 1), None);
        let c = candidate(dec!(500.0000), date(2026, 2, 1), None);
        assert_eq!(score_candidate(&l, &c), Some(10));
    }

    #[test]
    fn test_amount_mismatch_rejects() {
        let l = line(dec!(600.0000), date(2026, 2, 1), None);
        let c = candidate(dec!(500.0000), date(2026, 2, 1), None);
        assert_eq!(score_candidate(&l, &c), None);
    }

    #[test]
    fn test_signed_amounts_must_agree() {
        // A credit split (money out) never matches a positive line amount.
        let l = line(dec!(500.0000), date(2026, 2, 1), None);
        let c = candidate(dec!(-500.0000), date(2026, 2, 1), None);
        assert_eq!(score_candidate(&l, &c), None);
    }

    #[test]
    fn test_date_window() {
        let l = line(dec!(100), date(2026, 2, 10), None);

        let within = candidate(dec!(100), date(2026, 2, 7), None);
        assert_eq!(score_candidate(&l, &within), Some(7));

        let outside = candidate(dec!(100), date(2026, 2, 6), None);
        assert_eq!(score_candidate(&l, &outside), None);

        // Window is symmetric.
        let future = candidate(dec!(100), date(2026, 2, 13), None);
        assert_eq!(score_candidate(&l, &future), Some(7));
    }

    #[test]
    fn test_reference_bonus() {
        let l = line(dec!(100), date(2026, 2, 1), Some("INV-42"));
        let c = candidate(dec!(100), date(2026, 2, 1), Some("Payment for inv-42/2026"));
        assert_eq!(score_candidate(&l, &c), Some(15));
    }

    #[test]
    fn test_reference_bonus_is_one_directional() {
        // The entry reference appearing inside the line reference does NOT
        // earn the bonus; only line-within-entry counts.
        let l = line(dec!(100), date(2026, 2, 1), Some("Payment for INV-42/2026"));
        let c = candidate(dec!(100), date(2026, 2, 1), Some("INV-42"));
        assert_eq!(score_candidate(&l, &c), Some(10));
    }

    #[test]
    fn test_empty_references_earn_no_bonus() {
        let l = line(dec!(100), date(2026, 2, 1), Some("  "));
        let c = candidate(dec!(100), date(2026, 2, 1), Some("anything"));
        assert_eq!(score_candidate(&l, &c), Some(10));

        let l = line(dec!(100), date(2026, 2, 1), None);
        let c = candidate(dec!(100), date(2026, 2, 1), Some("ref"));
        assert_eq!(score_candidate(&l, &c), Some(10));
    }

    #[test]
    fn test_plan_picks_highest_score() {
        let l = line(dec!(100), date(2026, 2, 10), None);
        let far = candidate(dec!(100), date(2026, 2, 7), None); // score 7
        let near = candidate(dec!(100), date(2026, 2, 9), None); // score 9

        let planned = plan_matches(std::slice::from_ref(&l), &[far, near.clone()]);
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].split_id, near.split_id);
        assert_eq!(planned[0].score, 9);
    }

    #[test]
    fn test_plan_tie_keeps_first_candidate() {
        let l = line(dec!(100), date(2026, 2, 10), None);
        let first = candidate(dec!(100), date(2026, 2, 9), None);
        let second = candidate(dec!(100), date(2026, 2, 11), None); // same score 9

        let planned = plan_matches(std::slice::from_ref(&l), &[first.clone(), second]);
        assert_eq!(planned[0].split_id, first.split_id);
    }

    #[test]
    fn test_plan_claims_within_run() {
        // Two identical lines, one qualifying split: only the first line
        // gets it; the second finds the split already claimed.
        let l1 = line(dec!(100), date(2026, 2, 1), None);
        let l2 = line(dec!(100), date(2026, 2, 1), None);
        let c = candidate(dec!(100), date(2026, 2, 1), None);

        let planned = plan_matches(&[l1.clone(), l2], std::slice::from_ref(&c));
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].line_id, l1.line_id);
    }

    #[test]
    fn test_plan_no_candidates_is_noop() {
        let l = line(dec!(100), date(2026, 2, 1), None);
        assert!(plan_matches(&[l], &[]).is_empty());
        assert!(plan_matches(&[], &[]).is_empty());
    }

    #[test]
    fn test_plan_exact_amount_only() {
        // A 500.0000 split dated 2026-02-01 matches a 500.0000 line of the
        // same date; a 600.0000 line against the same split matches nothing.
        let c = candidate(dec!(500.0000), date(2026, 2, 1), None);

        let matching = line(dec!(500.0000), date(2026, 2, 1), None);
        assert_eq!(
            plan_matches(std::slice::from_ref(&matching), std::slice::from_ref(&c)).len(),
            1
        );

        let mismatched = line(dec!(600.0000), date(2026, 2, 1), None);
        assert_eq!(
            plan_matches(std::slice::from_ref(&mismatched), std::slice::from_ref(&c)).len(),
            0
        );
    }
}

//! Property tests for the auto-match planner.

use chrono::NaiveDate;
use mizan_shared::types::{SplitId, StatementLineId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;

use super::matching::{plan_matches, score_candidate, MAX_DATE_DIFF_DAYS};
use super::types::{CandidateSplit, LineToMatch};

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000i64).prop_map(|n| Decimal::new(n, 4))
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u32..3650).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Days::new(u64::from(offset))
    })
}

fn line_strategy() -> impl Strategy<Value = LineToMatch> {
    (amount_strategy(), date_strategy()).prop_map(|(amount, line_date)| LineToMatch {
        line_id: StatementLineId::new(),
        line_date,
        amount,
        reference: None,
    })
}

fn candidate_strategy() -> impl Strategy<Value = CandidateSplit> {
    (amount_strategy(), date_strategy()).prop_map(|(net_amount, entry_date)| CandidateSplit {
        split_id: SplitId::new(),
        entry_date,
        net_amount,
        entry_reference: None,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// No split is ever assigned to two lines within one run.
    #[test]
    fn prop_no_split_claimed_twice(
        lines in prop::collection::vec(line_strategy(), 0..20),
        candidates in prop::collection::vec(candidate_strategy(), 0..20),
    ) {
        let planned = plan_matches(&lines, &candidates);

        let split_ids: HashSet<SplitId> = planned.iter().map(|m| m.split_id).collect();
        prop_assert_eq!(split_ids.len(), planned.len());

        let line_ids: HashSet<StatementLineId> = planned.iter().map(|m| m.line_id).collect();
        prop_assert_eq!(line_ids.len(), planned.len());
    }

    /// Every planned match pairs an exactly-equal amount within the window.
    #[test]
    fn prop_matches_respect_rejection_rules(
        lines in prop::collection::vec(line_strategy(), 0..20),
        candidates in prop::collection::vec(candidate_strategy(), 0..20),
    ) {
        let planned = plan_matches(&lines, &candidates);

        for m in &planned {
            let line = lines.iter().find(|l| l.line_id == m.line_id).unwrap();
            let cand = candidates.iter().find(|c| c.split_id == m.split_id).unwrap();

            prop_assert_eq!(cand.net_amount, line.amount);
            let diff = (line.line_date - cand.entry_date).num_days().abs();
            prop_assert!(diff <= MAX_DATE_DIFF_DAYS);
            prop_assert_eq!(score_candidate(line, cand), Some(m.score));
            // Without references, scores are 10 - diff.
            prop_assert_eq!(m.score, 10 - diff);
        }
    }

    /// Removing matched pairs and re-planning yields nothing new for them:
    /// a second run over the remainder never re-matches a claimed split.
    #[test]
    fn prop_second_run_excludes_claimed(
        lines in prop::collection::vec(line_strategy(), 0..20),
        candidates in prop::collection::vec(candidate_strategy(), 0..20),
    ) {
        let first = plan_matches(&lines, &candidates);
        let matched_lines: HashSet<StatementLineId> = first.iter().map(|m| m.line_id).collect();
        let claimed: HashSet<SplitId> = first.iter().map(|m| m.split_id).collect();

        let remaining_lines: Vec<LineToMatch> = lines
            .iter()
            .filter(|l| !matched_lines.contains(&l.line_id))
            .cloned()
            .collect();
        let remaining_candidates: Vec<CandidateSplit> = candidates
            .iter()
            .filter(|c| !claimed.contains(&c.split_id))
            .cloned()
            .collect();

        let second = plan_matches(&remaining_lines, &remaining_candidates);
        for m in &second {
            prop_assert!(!claimed.contains(&m.split_id));
            prop_assert!(!matched_lines.contains(&m.line_id));
        }
    }
}

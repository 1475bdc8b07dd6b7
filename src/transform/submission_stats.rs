//! Submission aggregation pipeline.

use std::collections::{HashMap, HashSet};

use crate::models::{
    ProblemKey, RatingHistogram, Submission, SubmissionStats, TagCount, UnsolvedLocator,
};

use super::TransformError;

/// A submission after required-field validation.
struct CheckedSubmission<'a> {
    key: ProblemKey,
    rating: Option<i64>,
    tags: &'a [String],
    solved: bool,
}

/// A deduplicated solved problem; rating is guaranteed present.
struct SolvedProblem<'a> {
    rating: i64,
    tags: &'a [String],
}

/// Aggregate a submission log into the four chart-ready outputs.
///
/// Solved status takes precedence over unsolved: a problem with both a
/// passing and a failing submission never reaches the unsolved locator,
/// in either relative order, because solved candidates are processed first.
/// Deduplication is first-occurrence-wins on the `(contest_id, index)`
/// identity key, so re-submission records cannot inflate any count.
/// Problems without a rating are excluded from the histogram and the
/// locator; "rating present but zero" is not the same as "rating absent".
pub fn aggregate_submissions(
    submissions: &[Submission],
) -> Result<SubmissionStats, TransformError> {
    // Validate every record up front so a malformed entry anywhere in the
    // log aborts before any output is assembled.
    let mut checked = Vec::with_capacity(submissions.len());
    for (position, submission) in submissions.iter().enumerate() {
        let problem = submission
            .problem
            .as_ref()
            .ok_or_else(|| TransformError::missing("submission", "problem", position))?;
        let contest_id = problem
            .contest_id
            .ok_or_else(|| TransformError::missing("submission", "contestId", position))?;
        let index = problem
            .index
            .clone()
            .ok_or_else(|| TransformError::missing("submission", "index", position))?;

        checked.push(CheckedSubmission {
            key: ProblemKey::new(contest_id, index),
            rating: problem.rating,
            tags: &problem.tags,
            solved: submission.is_solved(),
        });
    }

    // Solved set: first occurrence wins, unrated problems skipped.
    let mut solved_keys: HashSet<&ProblemKey> = HashSet::new();
    let mut solved: Vec<SolvedProblem> = Vec::new();
    for sub in checked.iter().filter(|s| s.solved) {
        let Some(rating) = sub.rating else { continue };
        if solved_keys.insert(&sub.key) {
            solved.push(SolvedProblem {
                rating,
                tags: sub.tags,
            });
        }
    }

    // Unsolved set: rated problems absent from both sets, grouped by
    // contest in first-encounter order.
    let mut unsolved_keys: HashSet<&ProblemKey> = HashSet::new();
    let mut contest_order: Vec<i64> = Vec::new();
    let mut indices_by_contest: HashMap<i64, Vec<String>> = HashMap::new();
    for sub in checked.iter().filter(|s| !s.solved) {
        if sub.rating.is_none() || solved_keys.contains(&sub.key) {
            continue;
        }
        if !unsolved_keys.insert(&sub.key) {
            continue;
        }
        indices_by_contest
            .entry(sub.key.contest_id)
            .or_insert_with(|| {
                contest_order.push(sub.key.contest_id);
                Vec::new()
            })
            .push(sub.key.index.clone());
    }

    // Histogram over the deduplicated solved set, string-keyed by rating
    // level in first-seen order.
    let mut histogram = RatingHistogram::default();
    let mut level_slots: HashMap<i64, usize> = HashMap::new();
    for problem in &solved {
        match level_slots.get(&problem.rating) {
            Some(&slot) => histogram.counts[slot] += 1,
            None => {
                level_slots.insert(problem.rating, histogram.levels.len());
                histogram.levels.push(problem.rating.to_string());
                histogram.counts.push(1);
            }
        }
    }

    // Tag frequencies in first-seen order; a problem contributes once per tag.
    let mut tag_slots: HashMap<&str, usize> = HashMap::new();
    let mut tag_counts: Vec<TagCount> = Vec::new();
    for problem in &solved {
        for tag in problem.tags {
            match tag_slots.get(tag.as_str()) {
                Some(&slot) => tag_counts[slot].count += 1,
                None => {
                    tag_slots.insert(tag, tag_counts.len());
                    tag_counts.push(TagCount {
                        tag: tag.clone(),
                        count: 1,
                    });
                }
            }
        }
    }

    // Composite sort key: count descending, first-seen index ascending,
    // so equal counts keep their first-encounter order.
    let mut ranked: Vec<(usize, TagCount)> = tag_counts.into_iter().enumerate().collect();
    ranked.sort_by(|a, b| b.1.count.cmp(&a.1.count).then(a.0.cmp(&b.0)));
    let tag_ranking: Vec<TagCount> = ranked.into_iter().map(|(_, t)| t).collect();

    let tag_legend = tag_ranking
        .iter()
        .map(|t| format!("{}: {}", t.tag, t.count))
        .collect();

    // Emit the locator contest by contest; all three sequences share the
    // grouped order.
    let mut unsolved = UnsolvedLocator::default();
    for contest_id in contest_order {
        if let Some(indices) = indices_by_contest.remove(&contest_id) {
            for index in indices {
                unsolved.push(ProblemKey::new(contest_id, index));
            }
        }
    }

    Ok(SubmissionStats {
        histogram,
        tag_ranking,
        tag_legend,
        unsolved,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::models::Problem;

    use super::*;

    fn submission(
        verdict: &str,
        contest_id: i64,
        index: &str,
        rating: Option<i64>,
        tags: &[&str],
    ) -> Submission {
        Submission {
            verdict: verdict.to_string(),
            problem: Some(Problem {
                contest_id: Some(contest_id),
                index: Some(index.to_string()),
                rating,
                tags: tags.iter().map(|t| t.to_string()).collect(),
            }),
        }
    }

    #[test]
    fn test_solved_precedence_over_later_failure() {
        let log = vec![
            submission("OK", 1, "A", Some(1200), &["dp"]),
            submission("WA", 1, "A", Some(1200), &["dp"]),
        ];

        let stats = aggregate_submissions(&log).unwrap();

        assert_eq!(stats.histogram.count_for("1200"), Some(1));
        assert!(stats.unsolved.is_empty());
    }

    #[test]
    fn test_solved_precedence_over_earlier_failure() {
        let log = vec![
            submission("WA", 1, "A", Some(1200), &["dp"]),
            submission("OK", 1, "A", Some(1200), &["dp"]),
        ];

        let stats = aggregate_submissions(&log).unwrap();

        assert_eq!(stats.histogram.count_for("1200"), Some(1));
        assert!(stats.unsolved.is_empty());
    }

    #[test]
    fn test_repeated_failures_counted_once() {
        let log = vec![
            submission("WA", 2, "B", Some(1600), &[]),
            submission("WA", 2, "B", Some(1600), &[]),
        ];

        let stats = aggregate_submissions(&log).unwrap();

        assert_eq!(stats.unsolved.contest_ids, vec![2]);
        assert_eq!(stats.unsolved.indices, vec!["B"]);
        assert_eq!(stats.unsolved.keys, vec!["2-B"]);
    }

    #[test]
    fn test_dedup_is_idempotent_under_duplication() {
        let log = vec![
            submission("OK", 1, "A", Some(1200), &["dp", "math"]),
            submission("WA", 2, "B", Some(1600), &["graphs"]),
            submission("OK", 3, "C", Some(1200), &["dp"]),
        ];

        let mut duplicated = log.clone();
        duplicated.extend(log.iter().cloned());
        duplicated.push(log[1].clone());

        let base = aggregate_submissions(&log).unwrap();
        let doubled = aggregate_submissions(&duplicated).unwrap();

        assert_eq!(base.histogram.levels, doubled.histogram.levels);
        assert_eq!(base.histogram.counts, doubled.histogram.counts);
        assert_eq!(base.tag_ranking, doubled.tag_ranking);
        assert_eq!(base.unsolved.keys, doubled.unsolved.keys);
    }

    #[test]
    fn test_unrated_problems_excluded_everywhere() {
        let log = vec![
            submission("OK", 1, "A", None, &["dp"]),
            submission("WA", 2, "B", None, &["graphs"]),
        ];

        let stats = aggregate_submissions(&log).unwrap();

        assert!(stats.histogram.is_empty());
        assert!(stats.unsolved.is_empty());
        // The unrated solved problem never entered the solved set, so its
        // tags do not count either.
        assert!(stats.tag_ranking.is_empty());
    }

    #[test]
    fn test_histogram_levels_in_first_seen_order() {
        let log = vec![
            submission("OK", 1, "A", Some(1500), &[]),
            submission("OK", 2, "A", Some(800), &[]),
            submission("OK", 3, "A", Some(1500), &[]),
        ];

        let stats = aggregate_submissions(&log).unwrap();

        assert_eq!(stats.histogram.levels, vec!["1500", "800"]);
        assert_eq!(stats.histogram.counts, vec![2, 1]);
    }

    #[test]
    fn test_tag_ranking_sorted_with_stable_tie_break() {
        let log = vec![
            submission("OK", 1, "A", Some(1000), &["greedy", "math"]),
            submission("OK", 2, "A", Some(1100), &["dp", "math"]),
            submission("OK", 3, "A", Some(1200), &["dp"]),
        ];

        let stats = aggregate_submissions(&log).unwrap();

        // math and dp both have 2; math was seen first.
        assert_eq!(
            stats.tag_ranking,
            vec![
                TagCount { tag: "math".to_string(), count: 2 },
                TagCount { tag: "dp".to_string(), count: 2 },
                TagCount { tag: "greedy".to_string(), count: 1 },
            ]
        );
        assert_eq!(stats.tag_legend, vec!["math: 2", "dp: 2", "greedy: 1"]);

        for pair in stats.tag_ranking.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
    }

    #[test]
    fn test_unsolved_locator_groups_by_contest() {
        let log = vec![
            submission("WA", 10, "A", Some(900), &[]),
            submission("TLE", 20, "C", Some(1700), &[]),
            submission("WA", 10, "B", Some(1000), &[]),
        ];

        let stats = aggregate_submissions(&log).unwrap();

        // Contest 10 reappears after contest 20; its indices still come out
        // contiguously, contests in first-encounter order.
        assert_eq!(stats.unsolved.contest_ids, vec![10, 10, 20]);
        assert_eq!(stats.unsolved.indices, vec!["A", "B", "C"]);
        assert_eq!(stats.unsolved.keys, vec!["10-A", "10-B", "20-C"]);
    }

    #[test]
    fn test_example_scenario_histogram_and_precedence() {
        let log = vec![
            submission("OK", 1, "A", Some(1200), &["dp"]),
            submission("WA", 1, "A", Some(1200), &["dp"]),
        ];

        let stats = aggregate_submissions(&log).unwrap();

        assert_eq!(stats.histogram.levels, vec!["1200"]);
        assert_eq!(stats.histogram.counts, vec![1]);
        assert!(stats.unsolved.is_empty());
        assert_eq!(stats.tag_legend, vec!["dp: 1"]);
    }

    #[test]
    fn test_missing_problem_aborts_aggregation() {
        let log = vec![
            submission("OK", 1, "A", Some(1200), &["dp"]),
            Submission {
                verdict: "OK".to_string(),
                problem: None,
            },
        ];

        let err = aggregate_submissions(&log).unwrap_err();

        assert_eq!(
            err,
            TransformError::MissingField {
                record: "submission",
                field: "problem",
                position: 1,
            }
        );
    }

    #[test]
    fn test_missing_identity_fields_abort_aggregation() {
        let no_contest = Submission {
            verdict: "WA".to_string(),
            problem: Some(Problem {
                contest_id: None,
                index: Some("A".to_string()),
                rating: Some(1200),
                tags: vec![],
            }),
        };
        let no_index = Submission {
            verdict: "WA".to_string(),
            problem: Some(Problem {
                contest_id: Some(1),
                index: None,
                rating: Some(1200),
                tags: vec![],
            }),
        };

        let err = aggregate_submissions(&[no_contest]).unwrap_err();
        assert!(err.to_string().contains("contestId"));

        let err = aggregate_submissions(&[no_index]).unwrap_err();
        assert!(err.to_string().contains("index"));
    }

    #[test]
    fn test_empty_log_yields_empty_stats() {
        let stats = aggregate_submissions(&[]).unwrap();

        assert!(stats.histogram.is_empty());
        assert!(stats.tag_ranking.is_empty());
        assert!(stats.tag_legend.is_empty());
        assert!(stats.unsolved.is_empty());
    }

    #[test]
    fn test_zero_rating_is_not_absent() {
        let log = vec![submission("WA", 7, "A", Some(0), &[])];

        let stats = aggregate_submissions(&log).unwrap();

        assert_eq!(stats.unsolved.keys, vec!["7-A"]);
    }
}

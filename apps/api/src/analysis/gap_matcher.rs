//! Gap Matcher — decides which required skills no possessed skill covers.
//!
//! Algorithm:
//! 1. For each required skill, score its comparison key against every
//!    possessed key with `partial_ratio`.
//! 2. best_score = max over possessed skills (0 when there are none).
//! 3. covered = best_score ≥ threshold.
//!
//! Lowering the threshold lets loosely related skills count as covered;
//! raising it reports more skills as missing.

use serde::Serialize;

use crate::analysis::fuzzy::partial_ratio;
use crate::skills::normalizer::{Skill, SkillList};

/// Acceptance threshold applied when none is configured.
pub const DEFAULT_MATCH_THRESHOLD: u8 = 70;

/// Outcome of matching one required skill.
/// Invariant: `covered == (best_score >= threshold)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub skill: Skill,
    pub covered: bool,
    pub best_score: u8, // 0 – 100
    pub best_match: Option<String>, // possessed skill that produced best_score
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapMatcher {
    threshold: u8,
}

impl Default for GapMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_THRESHOLD)
    }
}

impl GapMatcher {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn match_skill(&self, required: &Skill, possessed: &SkillList) -> MatchResult {
        let mut best_score = 0u8;
        let mut best_match = None;

        for candidate in possessed {
            let score = partial_ratio(required.key(), candidate.key());
            if score > best_score {
                best_score = score;
                best_match = Some(candidate.display().to_string());
            }
            if best_score == 100 {
                break;
            }
        }

        MatchResult {
            skill: required.clone(),
            covered: best_score >= self.threshold,
            best_score,
            best_match,
        }
    }

    /// One `MatchResult` per required skill, in input order.
    pub fn match_all(&self, required: &SkillList, possessed: &SkillList) -> Vec<MatchResult> {
        required
            .iter()
            .map(|skill| self.match_skill(skill, possessed))
            .collect()
    }

    /// Required skills left uncovered, as an order-preserving subsequence.
    pub fn find_missing(&self, required: &SkillList, possessed: &SkillList) -> SkillList {
        missing_from(self.match_all(required, possessed))
    }
}

/// Collects the uncovered skills out of a set of match results.
pub fn missing_from(matches: impl IntoIterator<Item = MatchResult>) -> SkillList {
    matches
        .into_iter()
        .filter(|m| !m.covered)
        .map(|m| m.skill)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(raw: &[&str]) -> SkillList {
        SkillList::from_raw(raw.iter().copied())
    }

    #[test]
    fn test_reference_scenario() {
        let required = skills(&["Python", "SQL", "Docker"]);
        let possessed = skills(&["python programming", "sql"]);

        let missing = GapMatcher::default().find_missing(&required, &possessed);
        assert_eq!(missing.displays(), vec!["Docker"]);
    }

    #[test]
    fn test_empty_required_is_never_missing() {
        let missing = GapMatcher::default().find_missing(&SkillList::new(), &skills(&["Rust"]));
        assert!(missing.is_empty());
        let missing = GapMatcher::default().find_missing(&SkillList::new(), &SkillList::new());
        assert!(missing.is_empty());
    }

    #[test]
    fn test_empty_possessed_makes_everything_missing() {
        let required = skills(&["Rust", "Go", "Communication"]);
        let missing = GapMatcher::default().find_missing(&required, &SkillList::new());
        assert_eq!(missing, required);
    }

    #[test]
    fn test_empty_possessed_scores_zero() {
        let result = GapMatcher::default().match_skill(&Skill::new("Rust").unwrap(), &SkillList::new());
        assert_eq!(result.best_score, 0);
        assert!(!result.covered);
        assert!(result.best_match.is_none());
    }

    #[test]
    fn test_skill_matches_itself() {
        for raw in ["Python", "C++", "Machine Learning", "x"] {
            let list = skills(&[raw]);
            assert!(
                GapMatcher::default().find_missing(&list, &list).is_empty(),
                "{raw} should match itself"
            );
        }
    }

    #[test]
    fn test_matching_is_case_insensitive_and_keeps_display() {
        let result = GapMatcher::default().match_skill(
            &Skill::new("KUBERNETES").unwrap(),
            &skills(&["kubernetes administration"]),
        );
        assert!(result.covered);
        assert_eq!(result.best_score, 100);
        assert_eq!(result.skill.display(), "KUBERNETES");
        assert_eq!(result.best_match.as_deref(), Some("kubernetes administration"));
    }

    #[test]
    fn test_best_score_is_max_over_possessed() {
        let result = GapMatcher::default().match_skill(
            &Skill::new("Docker").unwrap(),
            &skills(&["Excel", "docker compose", "Public Speaking"]),
        );
        assert_eq!(result.best_score, 100);
        assert_eq!(result.best_match.as_deref(), Some("docker compose"));
    }

    #[test]
    fn test_covered_flag_follows_threshold() {
        let required = skills(&["abcd"]);
        let possessed = skills(&["abce"]); // scores 85
        let at = GapMatcher::new(85).match_all(&required, &possessed);
        let above = GapMatcher::new(86).match_all(&required, &possessed);
        assert!(at[0].covered);
        assert!(!above[0].covered);
        assert_eq!(at[0].best_score, above[0].best_score);
    }

    #[test]
    fn test_score_just_below_threshold_is_missing() {
        // Best alignment is 69.565, which must not reach a threshold of 70.
        let required = skills(&["cdaadeabdbccc"]);
        let possessed = skills(&["edebabdbdbcacaebdbcb"]);

        let results = GapMatcher::new(70).match_all(&required, &possessed);
        assert_eq!(results[0].best_score, 69);
        assert!(!results[0].covered);

        let missing = GapMatcher::new(70).find_missing(&required, &possessed);
        assert_eq!(missing, required);
    }

    #[test]
    fn test_threshold_monotonicity() {
        let required = skills(&["Python", "SQL", "Docker", "Kubernetes", "Teamwork", "abcd"]);
        let possessed = skills(&["python programming", "mysql", "kube", "team player", "abce"]);

        let mut previous = 0;
        for threshold in 0..=100u8 {
            let count = GapMatcher::new(threshold).find_missing(&required, &possessed).len();
            assert!(
                count >= previous,
                "threshold {threshold} reported {count} missing, fewer than {previous}"
            );
            previous = count;
        }
    }

    #[test]
    fn test_duplicates_are_tolerated() {
        let required = skills(&["Docker", "Docker", "Python"]);
        let possessed = skills(&["python", "python"]);
        let missing = GapMatcher::default().find_missing(&required, &possessed);
        assert_eq!(missing.displays(), vec!["Docker", "Docker"]);
    }

    #[test]
    fn test_match_result_invariant_holds() {
        let matcher = GapMatcher::default();
        let results = matcher.match_all(
            &skills(&["Rust", "Go", "Terraform"]),
            &skills(&["rustlang", "golang", "ansible"]),
        );
        for r in results {
            assert_eq!(r.covered, r.best_score >= matcher.threshold());
        }
    }
}

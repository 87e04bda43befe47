//! Heuristic resume scorer: deterministic keyword and length checks.
//!
//! Algorithm:
//! 1. Start from `BASE_SCORE` (50).
//! 2. Add each section's points when its keyword appears anywhere
//!    (skills +10, experience +15, education +10, projects +10).
//! 3. Length tips: fewer than 200 words is "too short", more than 1500 is
//!    "too long". Tips never change the score.
//! 4. Clamp to 0..=100.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

pub const BASE_SCORE: u32 = 50;
pub const MAX_SCORE: u32 = 100;
pub const MIN_WORDS: usize = 200;
pub const MAX_WORDS: usize = 1500;

pub const TOO_SHORT_TIP: &str =
    "Your resume seems short. Add more detail about your achievements and responsibilities.";
pub const TOO_LONG_TIP: &str =
    "Your resume is quite long. Consider trimming it to the most relevant experience.";

struct SectionRule {
    section: &'static str,
    pattern: &'static str,
    points: u32,
    missing_tip: &'static str,
}

static SECTION_RULES: &[SectionRule] = &[
    SectionRule {
        section: "skills",
        pattern: r"(?i)\bskills?\b",
        points: 10,
        missing_tip: "Add a dedicated skills section listing your core tools and technologies.",
    },
    SectionRule {
        section: "experience",
        pattern: r"(?i)\bexperience\b",
        points: 15,
        missing_tip: "Include a work experience section with roles, dates and outcomes.",
    },
    SectionRule {
        section: "education",
        pattern: r"(?i)\beducation\b",
        points: 10,
        missing_tip: "Mention your education: degrees, institutions and graduation dates.",
    },
    SectionRule {
        section: "projects",
        pattern: r"(?i)\bprojects?\b",
        points: 10,
        missing_tip: "Showcase a few projects that demonstrate your skills in practice.",
    },
];

static SECTION_PATTERNS: OnceLock<Vec<(&'static SectionRule, Regex)>> = OnceLock::new();

/// Each rule paired with its compiled pattern, in `SECTION_RULES` order.
fn section_patterns() -> &'static [(&'static SectionRule, Regex)] {
    SECTION_PATTERNS.get_or_init(|| {
        SECTION_RULES
            .iter()
            .map(|rule| {
                let regex = Regex::new(rule.pattern).unwrap_or_else(|error| {
                    panic!("{} section regex failed to compile: {error}", rule.section)
                });
                (rule, regex)
            })
            .collect()
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeuristicReport {
    pub score: u32,
    pub word_count: usize,
    pub matched_sections: Vec<String>,
    pub tips: Vec<String>,
}

pub fn score_resume(text: &str) -> HeuristicReport {
    let mut score = BASE_SCORE;
    let mut matched_sections = Vec::new();
    let mut tips = Vec::new();

    for (rule, pattern) in section_patterns() {
        if pattern.is_match(text) {
            score += rule.points;
            matched_sections.push(rule.section.to_string());
        } else {
            tips.push(rule.missing_tip.to_string());
        }
    }

    let word_count = text.split_whitespace().count();
    if word_count < MIN_WORDS {
        tips.push(TOO_SHORT_TIP.to_string());
    } else if word_count > MAX_WORDS {
        tips.push(TOO_LONG_TIP.to_string());
    }

    HeuristicReport {
        score: score.min(MAX_SCORE),
        word_count,
        matched_sections,
        tips,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["lorem"; n].join(" ")
    }

    #[test]
    fn test_every_rule_keeps_its_own_pattern() {
        let patterns = section_patterns();
        assert_eq!(patterns.len(), SECTION_RULES.len());
        for ((rule, regex), expected) in patterns.iter().zip(SECTION_RULES) {
            assert_eq!(rule.section, expected.section);
            assert_eq!(regex.as_str(), expected.pattern);
            assert!(regex.is_match(rule.section));
        }
    }

    #[test]
    fn test_all_sections_and_500_words_scores_95() {
        let text = format!("Skills Experience Education Projects {}", words(496));
        let report = score_resume(&text);
        assert_eq!(report.word_count, 500);
        assert_eq!(report.score, 95);
        assert_eq!(
            report.matched_sections,
            vec!["skills", "experience", "education", "projects"]
        );
        assert!(report.tips.is_empty(), "tips: {:?}", report.tips);
    }

    #[test]
    fn test_no_sections_scores_base() {
        let report = score_resume(&words(100));
        assert_eq!(report.score, BASE_SCORE);
        assert!(report.matched_sections.is_empty());
    }

    #[test]
    fn test_100_words_gets_too_short_tip() {
        let report = score_resume(&words(100));
        assert!(report.tips.iter().any(|t| t == TOO_SHORT_TIP));
    }

    #[test]
    fn test_exactly_200_words_is_not_too_short() {
        let report = score_resume(&words(MIN_WORDS));
        assert!(!report.tips.iter().any(|t| t == TOO_SHORT_TIP));
        assert!(!report.tips.iter().any(|t| t == TOO_LONG_TIP));
    }

    #[test]
    fn test_over_1500_words_gets_too_long_tip() {
        let report = score_resume(&words(MAX_WORDS + 1));
        assert!(report.tips.iter().any(|t| t == TOO_LONG_TIP));
        assert_eq!(report.score, BASE_SCORE);
    }

    #[test]
    fn test_exactly_1500_words_is_not_too_long() {
        let report = score_resume(&words(MAX_WORDS));
        assert!(!report.tips.iter().any(|t| t == TOO_LONG_TIP));
    }

    #[test]
    fn test_keywords_match_case_insensitively_and_singular() {
        let report = score_resume("TECHNICAL SKILL: Rust. Side project: a parser.");
        assert_eq!(report.matched_sections, vec!["skills", "projects"]);
        assert_eq!(report.score, 70);
    }

    #[test]
    fn test_keywords_require_word_boundaries() {
        // "inexperienced" must not count as an experience section.
        let report = score_resume("inexperienced");
        assert_eq!(report.score, BASE_SCORE);
    }

    #[test]
    fn test_missing_sections_produce_tips() {
        let report = score_resume(&format!("Experience {}", words(300)));
        assert_eq!(report.score, 65);
        assert_eq!(report.tips.len(), 3);
    }
}

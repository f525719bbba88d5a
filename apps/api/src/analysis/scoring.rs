//! Five-part weighted resume score.
//!
//! Weights: sections 30, length 20, keywords 20, formatting 15, JD match 15.
//! Calculators run in that order and append their improvement suggestions in
//! the same order, so the client renders a stable list.

use regex::Regex;
use serde::Serialize;

use crate::analysis::sections::Sections;

/// Score breakdown returned to the client. `overall_score` is the sum of the
/// five sub-scores, capped at 100 by construction.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub overall_score: u32,
    pub section_score: u32,
    pub length_score: u32,
    pub keyword_score: u32,
    pub formatting_score: u32,
    pub jd_match_score: u32,
    pub suggestions: Vec<String>,
}

const ACTION_VERBS: &[&str] = &[
    "achieved",
    "improved",
    "developed",
    "managed",
    "led",
    "created",
    "implemented",
    "designed",
    "built",
    "launched",
    "optimized",
    "increased",
    "reduced",
    "streamlined",
    "coordinated",
    "executed",
    "delivered",
];

const PROFESSIONAL_KEYWORDS: &[&str] = &[
    "project",
    "team",
    "analysis",
    "strategy",
    "solution",
    "system",
    "process",
    "data",
    "customer",
    "business",
    "technical",
    "development",
];

const BULLET_INDICATORS: &[char] = &['•', '-', '*', '→', '▪'];

/// Common words excluded when mining the job description for keywords.
const JD_STOP_WORDS: &[&str] = &[
    "the", "and", "or", "in", "at", "to", "for", "of", "with", "a", "an", "is", "are", "be",
    "will",
];

/// Computes the weighted resume score.
///
/// The date and word patterns are compiled once at startup and shared across
/// requests via `AppState`.
pub struct ResumeScorer {
    date_patterns: [Regex; 3],
    word_pattern: Regex,
}

impl ResumeScorer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(ResumeScorer {
            date_patterns: [
                Regex::new(r"\d{4}")?,
                Regex::new(r"\d{1,2}/\d{4}")?,
                Regex::new(r"(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{4}")?,
            ],
            word_pattern: Regex::new(r"\b\w+\b")?,
        })
    }

    /// Runs all five calculators and sums the result.
    pub fn score(&self, text: &str, sections: &Sections, job_description: &str) -> ScoreBreakdown {
        let text_lower = text.to_lowercase();
        let mut suggestions = Vec::new();

        let section_score = section_score(sections, &mut suggestions);
        let length_score = length_score(text, &mut suggestions);
        let keyword_score = keyword_score(&text_lower, &mut suggestions);
        let formatting_score = self.formatting_score(text, &mut suggestions);
        let jd_match_score = self.jd_match_score(&text_lower, job_description, &mut suggestions);

        ScoreBreakdown {
            overall_score: section_score
                + length_score
                + keyword_score
                + formatting_score
                + jd_match_score,
            section_score,
            length_score,
            keyword_score,
            formatting_score,
            jd_match_score,
            suggestions,
        }
    }

    /// Formatting quality, max 15. Starts full and deducts 5 for each missing
    /// indicator: bullets, dates, and a sane text-to-whitespace ratio.
    fn formatting_score(&self, text: &str, suggestions: &mut Vec<String>) -> u32 {
        let mut score: i32 = 15;

        if !text.contains(BULLET_INDICATORS) {
            score -= 5;
            suggestions.push("Use bullet points to improve readability".to_string());
        }

        let has_dates = self.date_patterns.iter().any(|p| p.is_match(text));
        if !has_dates {
            score -= 5;
            suggestions.push("Include dates for experience and education".to_string());
        }

        let lines: Vec<&str> = text.split('\n').collect();
        let empty_lines = lines.iter().filter(|line| line.trim().is_empty()).count();
        let empty_line_ratio = empty_lines as f64 / lines.len().max(1) as f64;
        if empty_line_ratio > 0.5 {
            score -= 5;
            suggestions.push("Reduce excessive whitespace for better formatting".to_string());
        }

        score.max(0) as u32
    }

    /// Job-description match, max 15. Mines the JD for meaningful words
    /// (longer than 3 characters, not a stop word, duplicates kept) and bands
    /// the percentage found in the resume. A missing or sub-50-character JD
    /// scores 0 without a suggestion.
    fn jd_match_score(
        &self,
        text_lower: &str,
        job_description: &str,
        suggestions: &mut Vec<String>,
    ) -> u32 {
        if job_description.trim().chars().count() < 50 {
            return 0;
        }

        let jd_lower = job_description.to_lowercase();
        let jd_words: Vec<&str> = self
            .word_pattern
            .find_iter(&jd_lower)
            .map(|m| m.as_str())
            .filter(|word| word.chars().count() > 3 && !JD_STOP_WORDS.contains(word))
            .collect();

        if jd_words.is_empty() {
            return 0;
        }

        let match_count = jd_words
            .iter()
            .filter(|&&word| text_lower.contains(word))
            .count();
        let match_percentage = (match_count as f64 / jd_words.len() as f64) * 100.0;

        if match_percentage >= 40.0 {
            15
        } else if match_percentage >= 30.0 {
            12
        } else if match_percentage >= 20.0 {
            9
        } else if match_percentage >= 10.0 {
            6
        } else {
            suggestions.push(
                "Resume has low keyword match with job description. Tailor it more closely."
                    .to_string(),
            );
            0
        }
    }
}

/// Section completeness, max 30. Required sections are worth 5 each and emit
/// a suggestion when missing; optional sections are worth 3.33 each.
fn section_score(sections: &Sections, suggestions: &mut Vec<String>) -> u32 {
    let required = [
        (sections.contact_info, "Contact Info"),
        (sections.experience, "Experience"),
        (sections.education, "Education"),
        (sections.skills, "Skills"),
    ];
    let optional = [sections.summary, sections.projects, sections.certifications];

    let mut score = 0.0_f64;

    for (present, name) in required {
        if present {
            score += 5.0;
        } else {
            suggestions.push(format!("Missing required section: {name}"));
        }
    }

    for present in optional {
        if present {
            score += 3.33;
        }
    }

    score.round() as u32
}

/// Length band, max 20. The sweet spot is 300 to 800 words.
fn length_score(text: &str, suggestions: &mut Vec<String>) -> u32 {
    let word_count = text.split_whitespace().count();

    match word_count {
        300..=800 => 20,
        200..=299 | 801..=1000 => {
            suggestions
                .push("Resume length could be optimized (aim for 300-800 words)".to_string());
            15
        }
        100..=199 | 1001..=1500 => {
            suggestions.push("Resume is too short/long. Optimal range: 300-800 words".to_string());
            10
        }
        _ => {
            suggestions.push("Resume length is significantly outside optimal range".to_string());
            5
        }
    }
}

/// Keyword density, max 20: up to 10 points for action verbs, 10 for
/// professional keywords, banded on how many distinct entries appear.
fn keyword_score(text_lower: &str, suggestions: &mut Vec<String>) -> u32 {
    let verb_count = ACTION_VERBS
        .iter()
        .filter(|&&verb| text_lower.contains(verb))
        .count();
    let keyword_count = PROFESSIONAL_KEYWORDS
        .iter()
        .filter(|&&keyword| text_lower.contains(keyword))
        .count();

    let mut score = 0;

    score += match verb_count {
        8.. => 10,
        5..=7 => 7,
        3..=4 => 4,
        _ => {
            suggestions.push("Use more action verbs (achieved, developed, managed, etc.)".to_string());
            0
        }
    };

    score += match keyword_count {
        8.. => 10,
        5..=7 => 7,
        3..=4 => 4,
        _ => {
            suggestions
                .push("Include more professional keywords relevant to your field".to_string());
            0
        }
    };

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> ResumeScorer {
        ResumeScorer::new().unwrap()
    }

    fn sections(
        contact_info: bool,
        summary: bool,
        experience: bool,
        education: bool,
        skills: bool,
        projects: bool,
        certifications: bool,
    ) -> Sections {
        Sections {
            contact_info,
            summary,
            experience,
            education,
            skills,
            projects,
            certifications,
            languages: false,
        }
    }

    fn all_sections() -> Sections {
        sections(true, true, true, true, true, true, true)
    }

    /// A resume that maxes out every non-JD calculator: all sections, 300-800
    /// words, 8+ verbs and keywords, bullets and dates, compact lines.
    fn strong_resume_text() -> String {
        let mut text = String::from(
            "John Doe\n\
             john.doe@example.com | 555-123-4567\n\
             Professional Summary\n\
             Senior engineer focused on measurable outcomes.\n\
             Experience\n\
             - Achieved a 40% latency reduction across services in 2021\n\
             - Improved ingest throughput, developed tooling, managed rollouts\n\
             - Led migrations, created dashboards, implemented alerts, designed APIs\n\
             - Delivered business solutions with cross-team analysis, process\n\
             automation, customer-facing systems and a technical development strategy\n\
             Education\n\
             B.S. Computer Science, State University, 2016\n\
             Skills\n\
             Rust, SQL, Kubernetes\n\
             Projects\n\
             - Data pipeline portfolio\n\
             Certifications\n\
             - Licensed cloud architect, 2019\n",
        );
        for _ in 0..280 {
            text.push_str("filler ");
        }
        text
    }

    // ── Section completeness ────────────────────────────────────────────────

    #[test]
    fn test_section_score_all_present_is_30() {
        let mut suggestions = Vec::new();
        assert_eq!(section_score(&all_sections(), &mut suggestions), 30);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_section_score_required_only_is_20() {
        let s = sections(true, false, true, true, true, false, false);
        let mut suggestions = Vec::new();
        assert_eq!(section_score(&s, &mut suggestions), 20);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_section_score_rounds_optional_thirds() {
        // one optional: 20 + 3.33 → 23, two: 20 + 6.66 → 27
        let one = sections(true, true, true, true, true, false, false);
        let two = sections(true, true, true, true, true, true, false);
        assert_eq!(section_score(&one, &mut Vec::new()), 23);
        assert_eq!(section_score(&two, &mut Vec::new()), 27);
    }

    #[test]
    fn test_section_score_missing_required_suggests_by_name() {
        let s = sections(false, false, true, true, false, false, false);
        let mut suggestions = Vec::new();
        assert_eq!(section_score(&s, &mut suggestions), 10);
        assert_eq!(
            suggestions,
            vec![
                "Missing required section: Contact Info",
                "Missing required section: Skills",
            ]
        );
    }

    #[test]
    fn test_section_score_languages_not_counted() {
        let mut with_languages = all_sections();
        with_languages.languages = true;
        assert_eq!(section_score(&with_languages, &mut Vec::new()), 30);
    }

    // ── Length ──────────────────────────────────────────────────────────────

    fn words(n: usize) -> String {
        "word ".repeat(n)
    }

    #[test]
    fn test_length_score_optimal_band() {
        assert_eq!(length_score(&words(300), &mut Vec::new()), 20);
        assert_eq!(length_score(&words(500), &mut Vec::new()), 20);
        assert_eq!(length_score(&words(800), &mut Vec::new()), 20);
    }

    #[test]
    fn test_length_score_near_bands_suggest() {
        let mut suggestions = Vec::new();
        assert_eq!(length_score(&words(250), &mut suggestions), 15);
        assert_eq!(length_score(&words(900), &mut suggestions), 15);
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions[0].contains("300-800"));
    }

    #[test]
    fn test_length_score_outer_bands() {
        assert_eq!(length_score(&words(150), &mut Vec::new()), 10);
        assert_eq!(length_score(&words(1200), &mut Vec::new()), 10);
        assert_eq!(length_score(&words(50), &mut Vec::new()), 5);
        assert_eq!(length_score(&words(2000), &mut Vec::new()), 5);
    }

    #[test]
    fn test_length_score_band_edges() {
        assert_eq!(length_score(&words(299), &mut Vec::new()), 15);
        assert_eq!(length_score(&words(801), &mut Vec::new()), 15);
        assert_eq!(length_score(&words(1000), &mut Vec::new()), 15);
        assert_eq!(length_score(&words(1001), &mut Vec::new()), 10);
        assert_eq!(length_score(&words(1500), &mut Vec::new()), 10);
        assert_eq!(length_score(&words(1501), &mut Vec::new()), 5);
        assert_eq!(length_score(&words(99), &mut Vec::new()), 5);
    }

    // ── Keywords ────────────────────────────────────────────────────────────

    #[test]
    fn test_keyword_score_rich_text_is_20() {
        let text = "achieved improved developed managed led created implemented designed \
                    project team analysis strategy solution system process data";
        assert_eq!(keyword_score(text, &mut Vec::new()), 20);
    }

    #[test]
    fn test_keyword_score_mid_bands() {
        // 5 verbs → 7, 3 keywords → 4
        let text = "achieved improved developed managed launched project team analysis";
        let mut suggestions = Vec::new();
        assert_eq!(keyword_score(text, &mut suggestions), 11);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_keyword_score_bare_text_suggests_both() {
        let mut suggestions = Vec::new();
        assert_eq!(keyword_score("nothing relevant here", &mut suggestions), 0);
        assert_eq!(
            suggestions,
            vec![
                "Use more action verbs (achieved, developed, managed, etc.)",
                "Include more professional keywords relevant to your field",
            ]
        );
    }

    #[test]
    fn test_keyword_score_counts_substrings() {
        // "knowledge" contains "led": matching is plain substring containment
        let text = "knowledge launched reduced project team analysis";
        // verbs: led, launched, reduced → 4 pts; keywords: project, team, analysis → 4 pts
        assert_eq!(keyword_score(text, &mut Vec::new()), 8);
    }

    // ── Formatting ──────────────────────────────────────────────────────────

    #[test]
    fn test_formatting_score_full_marks() {
        let text = "Experience\n- Shipped the billing system in 2021\n- Kept it running";
        assert_eq!(scorer().formatting_score(text, &mut Vec::new()), 15);
    }

    #[test]
    fn test_formatting_score_missing_bullets() {
        let text = "Shipped the billing system in 2021\nKept it running";
        let mut suggestions = Vec::new();
        assert_eq!(scorer().formatting_score(text, &mut suggestions), 10);
        assert_eq!(suggestions, vec!["Use bullet points to improve readability"]);
    }

    #[test]
    fn test_formatting_score_missing_dates() {
        let text = "• Shipped the billing system\n• Kept it running";
        let mut suggestions = Vec::new();
        assert_eq!(scorer().formatting_score(text, &mut suggestions), 10);
        assert_eq!(suggestions, vec!["Include dates for experience and education"]);
    }

    #[test]
    fn test_formatting_score_accepts_each_date_shape() {
        let s = scorer();
        assert_eq!(s.formatting_score("• worked 2020", &mut Vec::new()), 15);
        assert_eq!(s.formatting_score("• worked 03/2020", &mut Vec::new()), 15);
        assert_eq!(s.formatting_score("• worked January 2020", &mut Vec::new()), 15);
    }

    #[test]
    fn test_formatting_score_excess_whitespace() {
        let text = "• one 2020\n\n\n\n\n\n\nmore";
        let mut suggestions = Vec::new();
        assert_eq!(scorer().formatting_score(text, &mut suggestions), 10);
        assert_eq!(
            suggestions,
            vec!["Reduce excessive whitespace for better formatting"]
        );
    }

    #[test]
    fn test_formatting_score_floor_is_zero() {
        let text = "plain\n\n\n\n\n\nwords";
        assert_eq!(scorer().formatting_score(text, &mut Vec::new()), 0);
    }

    // ── JD match ────────────────────────────────────────────────────────────

    #[test]
    fn test_jd_match_short_jd_scores_zero_silently() {
        let mut suggestions = Vec::new();
        assert_eq!(scorer().jd_match_score("resume text", "", &mut suggestions), 0);
        assert_eq!(
            scorer().jd_match_score("resume text", "short jd", &mut suggestions),
            0
        );
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_jd_match_full_overlap_is_15() {
        let jd = "Looking for an engineer experienced with distributed systems and kubernetes";
        let resume = "engineer experienced distributed systems kubernetes looking";
        assert_eq!(scorer().jd_match_score(resume, jd, &mut Vec::new()), 15);
    }

    #[test]
    fn test_jd_match_bands() {
        // 10 qualifying words; resume coverage controls the band
        let jd = "alpha bravo charlie delta echoes foxtrot golfing hotels indigo juliet";
        assert!(jd.trim().chars().count() >= 50);

        let s = scorer();
        assert_eq!(s.jd_match_score("alpha bravo charlie delta", jd, &mut Vec::new()), 15);
        assert_eq!(s.jd_match_score("alpha bravo charlie", jd, &mut Vec::new()), 12);
        assert_eq!(s.jd_match_score("alpha bravo", jd, &mut Vec::new()), 9);
        assert_eq!(s.jd_match_score("alpha", jd, &mut Vec::new()), 6);
    }

    #[test]
    fn test_jd_match_no_overlap_suggests_tailoring() {
        let jd = "alpha bravo charlie delta echoes foxtrot golfing hotels indigo juliet";
        let mut suggestions = Vec::new();
        assert_eq!(scorer().jd_match_score("zzz", jd, &mut suggestions), 0);
        assert_eq!(
            suggestions,
            vec!["Resume has low keyword match with job description. Tailor it more closely."]
        );
    }

    #[test]
    fn test_jd_match_ignores_stop_words_and_short_words() {
        // every word is a stop word or too short; padding keeps the JD over
        // the 50-character threshold
        let jd = "the and or in at to for of with a an is are be will the and or in at to for";
        assert_eq!(scorer().jd_match_score("anything", jd, &mut Vec::new()), 0);
    }

    #[test]
    fn test_jd_match_keeps_duplicate_words() {
        // "python" is 4 of the 8 mined words → 50% from one distinct word
        let jd = "python python python python hardware engineering role open";
        assert!(jd.trim().chars().count() >= 50);
        assert_eq!(scorer().jd_match_score("python shop", jd, &mut Vec::new()), 15);
    }

    // ── Full pipeline ───────────────────────────────────────────────────────

    #[test]
    fn test_strong_resume_scores_85_without_jd() {
        let breakdown = scorer().score(&strong_resume_text(), &all_sections(), "");
        assert_eq!(breakdown.section_score, 30);
        assert_eq!(breakdown.length_score, 20);
        assert_eq!(breakdown.keyword_score, 20);
        assert_eq!(breakdown.formatting_score, 15);
        assert_eq!(breakdown.jd_match_score, 0);
        assert_eq!(breakdown.overall_score, 85);
        assert!(breakdown.suggestions.is_empty());
    }

    #[test]
    fn test_overall_is_sum_of_parts() {
        let s = sections(false, false, false, false, false, false, false);
        let breakdown = scorer().score("tiny resume", &s, "");
        let sum = breakdown.section_score
            + breakdown.length_score
            + breakdown.keyword_score
            + breakdown.formatting_score
            + breakdown.jd_match_score;
        assert_eq!(breakdown.overall_score, sum);
    }

    #[test]
    fn test_suggestions_follow_calculator_order() {
        // missing skills section, too short, no keywords, no bullets/dates,
        // whitespace fine, no JD overlap
        let s = sections(true, true, true, true, false, true, true);
        let jd = "alpha bravo charlie delta echoes foxtrot golfing hotels indigo juliet";
        let breakdown = scorer().score("zzz qqq", &s, jd);

        assert_eq!(
            breakdown.suggestions,
            vec![
                "Missing required section: Skills",
                "Resume length is significantly outside optimal range",
                "Use more action verbs (achieved, developed, managed, etc.)",
                "Include more professional keywords relevant to your field",
                "Use bullet points to improve readability",
                "Include dates for experience and education",
                "Resume has low keyword match with job description. Tailor it more closely.",
            ]
        );
    }

    #[test]
    fn test_score_with_matching_jd_adds_band() {
        let resume = strong_resume_text();
        let jd = "Senior engineer role: latency reduction, dashboards, migrations, \
                  alerts, tooling, rollouts, analysis, strategy";
        let breakdown = scorer().score(&resume, &all_sections(), jd);
        assert!(breakdown.jd_match_score > 0);
        assert_eq!(
            breakdown.overall_score,
            85 + breakdown.jd_match_score
        );
    }
}

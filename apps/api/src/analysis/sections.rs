//! Section detection: keyword scans plus contact patterns over the resume text.

use regex::Regex;
use serde::Serialize;

/// Presence flags for the eight resume sections the analyzer reports.
#[derive(Debug, Clone, Serialize)]
pub struct Sections {
    pub contact_info: bool,
    pub summary: bool,
    pub experience: bool,
    pub education: bool,
    pub skills: bool,
    pub projects: bool,
    pub certifications: bool,
    pub languages: bool,
}

/// Contact details pulled out of the resume, each optional.
#[derive(Debug, Clone, Serialize)]
pub struct ContactDetails {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

const SUMMARY_KEYWORDS: &[&str] = &[
    "summary",
    "objective",
    "profile",
    "about me",
    "professional summary",
];

const EXPERIENCE_KEYWORDS: &[&str] = &[
    "experience",
    "work history",
    "employment",
    "professional experience",
    "work experience",
];

const EDUCATION_KEYWORDS: &[&str] = &[
    "education",
    "academic",
    "degree",
    "university",
    "college",
    "bachelor",
    "master",
    "phd",
];

const SKILLS_KEYWORDS: &[&str] = &[
    "skills",
    "technical skills",
    "core competencies",
    "technologies",
    "expertise",
];

const PROJECTS_KEYWORDS: &[&str] = &["projects", "portfolio", "work samples"];

const CERTIFICATION_KEYWORDS: &[&str] =
    &["certification", "certificate", "licensed", "credentials"];

const LANGUAGE_KEYWORDS: &[&str] = &["languages", "language proficiency", "linguistic skills"];

fn contains_any(text_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text_lower.contains(kw))
}

/// Detects resume sections and contact details.
///
/// The contact regexes are compiled once at startup and shared across
/// requests via `AppState`.
pub struct SectionDetector {
    email: Regex,
    phone: Regex,
    linkedin: Regex,
    github: Regex,
}

impl SectionDetector {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(SectionDetector {
            email: Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")?,
            phone: Regex::new(r"(\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}")?,
            linkedin: Regex::new(r"linkedin\.com/in/[\w-]+")?,
            github: Regex::new(r"github\.com/[\w-]+")?,
        })
    }

    /// Flags each section whose keywords appear anywhere in the text,
    /// case-insensitive. Contact info counts as present when an email or
    /// phone number matches.
    pub fn detect(&self, text: &str) -> Sections {
        let text_lower = text.to_lowercase();

        Sections {
            contact_info: self.email.is_match(text) || self.phone.is_match(text),
            summary: contains_any(&text_lower, SUMMARY_KEYWORDS),
            experience: contains_any(&text_lower, EXPERIENCE_KEYWORDS),
            education: contains_any(&text_lower, EDUCATION_KEYWORDS),
            skills: contains_any(&text_lower, SKILLS_KEYWORDS),
            projects: contains_any(&text_lower, PROJECTS_KEYWORDS),
            certifications: contains_any(&text_lower, CERTIFICATION_KEYWORDS),
            languages: contains_any(&text_lower, LANGUAGE_KEYWORDS),
        }
    }

    /// Pulls the first email, phone number, LinkedIn slug and GitHub slug
    /// out of the text.
    pub fn contact_details(&self, text: &str) -> ContactDetails {
        let text_lower = text.to_lowercase();

        ContactDetails {
            email: self.email.find(text).map(|m| m.as_str().to_string()),
            phone: self.phone.find(text).map(|m| m.as_str().to_string()),
            linkedin: self
                .linkedin
                .find(&text_lower)
                .map(|m| m.as_str().to_string()),
            github: self
                .github
                .find(&text_lower)
                .map(|m| m.as_str().to_string()),
        }
    }
}

use std::sync::Arc;

use crate::analysis::scoring::ResumeScorer;
use crate::analysis::sections::SectionDetector;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Section detector with its contact regexes compiled once at startup.
    pub detector: Arc<SectionDetector>,
    /// Scorer with its date and word patterns compiled once at startup.
    pub scorer: Arc<ResumeScorer>,
}

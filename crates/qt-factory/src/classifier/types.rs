use qt_core::{LinkKind, Provider};
use regex::Regex;

/// Compiled patterns for one provider.
#[derive(Debug, Clone)]
pub struct ProviderMatcher {
    pub provider: Provider,
    pub hosts: Vec<String>,
    pub playlist: Vec<Regex>,
    pub video: Vec<Regex>,
    pub range: Option<Regex>,
    /// Which kind wins when both pattern sets match.
    pub order: [LinkKind; 2],
}

/// Pure, pattern-based URL classification. Built once from the config.
#[derive(Debug, Clone)]
pub struct LinkClassifier {
    pub matchers: Vec<ProviderMatcher>,
}

use std::collections::BTreeSet;

/// Body and status of the catalog GET, handed from the fetcher to the extractor.
#[derive(Debug, Clone)]
pub struct RawPage {
    pub url: String,
    pub status: u16,
    pub body: String,
}

/// Cleaned product titles, deduplicated by exact equality.
///
/// Sorted iteration keeps log lines and notification bodies stable between runs.
pub type MatchSet = BTreeSet<String>;

/// What a single run is looking for. Built once from the CLI and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Lowercased product name used for matching
    pub product_name: String,
    /// Product name exactly as typed, used in the notification title
    pub display_name: String,
    pub endpoint: String,
    /// Lowercased, in the order given
    pub excluded_keywords: Vec<String>,
    pub notify: bool,
}

impl Query {
    pub fn new(product: &str, endpoint: &str, exclude: Option<&str>, notify: bool) -> Self {
        Self {
            product_name: product.to_lowercase(),
            display_name: product.to_string(),
            endpoint: endpoint.to_string(),
            excluded_keywords: exclude.map(parse_exclusions).unwrap_or_default(),
            notify,
        }
    }

    /// Case-insensitive include/exclude check against a raw listing title.
    pub fn matches(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        title.contains(&self.product_name)
            && !self
                .excluded_keywords
                .iter()
                .any(|keyword| title.contains(keyword.as_str()))
    }
}

/// Splits a comma separated exclusion list. Segments are not trimmed; empty ones are dropped.
pub fn parse_exclusions(csv: &str) -> Vec<String> {
    csv.split(',')
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct CustomerSearchQuery {
    /// Case insensitive substring matched against the company name, contact name,
    /// primary email and plan name
    pub search: Option<String>,
    pub skip: usize,
    pub limit: usize,
}

impl CustomerSearchQuery {
    /// The search term as an `ILIKE` pattern with the wildcards of the term escaped
    pub fn like_pattern(&self) -> Option<String> {
        self.search
            .as_ref()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| {
                let escaped = s
                    .replace('\\', "\\\\")
                    .replace('%', "\\%")
                    .replace('_', "\\_");
                format!("%{}%", escaped)
            })
    }

    pub fn matches(&self, fields: &[Option<&str>]) -> bool {
        let needle = match self.search.as_ref().map(|s| s.trim().to_lowercase()) {
            Some(needle) if !needle.is_empty() => needle,
            _ => return true,
        };
        fields
            .iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone)]
pub struct SearchResult<T> {
    pub items: Vec<T>,
    /// Number of matches ignoring `skip` and `limit`
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_escaped_like_patterns() {
        let query = CustomerSearchQuery {
            search: Some(" 50%_off ".into()),
            ..Default::default()
        };
        assert_eq!(query.like_pattern(), Some("%50\\%\\_off%".into()));

        let query = CustomerSearchQuery {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(query.like_pattern(), None);
    }

    #[test]
    fn matches_case_insensitive() {
        let query = CustomerSearchQuery {
            search: Some("ACME".into()),
            ..Default::default()
        };
        assert!(query.matches(&[None, Some("The Acme Corp")]));
        assert!(!query.matches(&[None, Some("Globex")]));
        assert!(CustomerSearchQuery::default().matches(&[None]));
    }
}

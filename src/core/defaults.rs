/// Fallback url/domain consulted whenever a credential lacks its own value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Defaults {
    pub url: Option<String>,
    pub domain: Option<String>,
}

impl Defaults {
    pub fn new(url: Option<String>, domain: Option<String>) -> Self {
        Self {
            url: non_empty(url),
            domain: non_empty(domain),
        }
    }

    /// Fill fields that are still unset. A value that is already present always wins.
    pub fn merge_missing(&mut self, url: Option<String>, domain: Option<String>) {
        if self.url.is_none() {
            self.url = non_empty(url);
        }
        if self.domain.is_none() {
            self.domain = non_empty(domain);
        }
    }

    /// These values with the gaps filled from `fallback`. Neither side is modified.
    pub fn overlay(&self, fallback: &Defaults) -> Defaults {
        let mut merged = self.clone();
        merged.merge_missing(fallback.url.clone(), fallback.domain.clone());
        merged
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_non_empty_value_wins() {
        let mut d = Defaults::new(Some("https://cli.org".into()), None);
        d.merge_missing(Some("https://file.org".into()), Some("file.org".into()));
        assert_eq!(d.url.as_deref(), Some("https://cli.org"));
        assert_eq!(d.domain.as_deref(), Some("file.org"));

        d.merge_missing(None, Some("later.org".into()));
        assert_eq!(d.domain.as_deref(), Some("file.org"));
    }

    #[test]
    fn empty_strings_do_not_count_as_set() {
        let mut d = Defaults::new(Some(String::new()), None);
        d.merge_missing(Some("https://x".into()), Some(String::new()));
        assert_eq!(d.url.as_deref(), Some("https://x"));
        assert!(d.domain.is_none());
    }

    #[test]
    fn overlay_leaves_both_sides_untouched() {
        let overrides = Defaults::new(Some("https://cli.org".into()), None);
        let stored = Defaults::new(Some("https://file.org".into()), Some("file.org".into()));

        let effective = overrides.overlay(&stored);

        assert_eq!(effective.url.as_deref(), Some("https://cli.org"));
        assert_eq!(effective.domain.as_deref(), Some("file.org"));
        assert!(overrides.domain.is_none());
        assert_eq!(stored.url.as_deref(), Some("https://file.org"));
    }
}

//! Server-side sort specification.
//!
//! The sort-control collaborator accepts a single string built from
//! per-field tokens: the bare attribute name sorts ascending, a `-`
//! prefix sorts descending, tokens are space-separated in caller
//! order. That exact grammar is the wire contract — `"cn -uid"` sorts
//! by `cn` ascending, then `uid` descending.

/// Sort direction for one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending (bare attribute name).
    #[default]
    Ascending,
    /// Descending (`-`-prefixed attribute name).
    Descending,
}

/// An ordered list of sort keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<(String, SortOrder)>,
}

impl SortSpec {
    /// An empty specification.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sort key.
    #[must_use]
    pub fn key(mut self, attribute: impl Into<String>, order: SortOrder) -> Self {
        self.keys.push((attribute.into(), order));
        self
    }

    /// Append an ascending sort key.
    #[must_use]
    pub fn ascending(self, attribute: impl Into<String>) -> Self {
        self.key(attribute, SortOrder::Ascending)
    }

    /// Append a descending sort key.
    #[must_use]
    pub fn descending(self, attribute: impl Into<String>) -> Self {
        self.key(attribute, SortOrder::Descending)
    }

    /// Whether no keys have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Render the control string the sort collaborator expects.
    #[must_use]
    pub fn to_control_string(&self) -> String {
        let mut out = String::new();
        for (attribute, order) in &self.keys {
            if !out.is_empty() {
                out.push(' ');
            }
            if *order == SortOrder::Descending {
                out.push('-');
            }
            out.push_str(attribute);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_orders() {
        let spec = SortSpec::new().ascending("cn").descending("uid");
        assert_eq!(spec.to_control_string(), "cn -uid");
    }

    #[test]
    fn single_key() {
        assert_eq!(SortSpec::new().ascending("cn").to_control_string(), "cn");
        assert_eq!(SortSpec::new().descending("cn").to_control_string(), "-cn");
    }

    #[test]
    fn empty_spec() {
        assert!(SortSpec::new().is_empty());
        assert_eq!(SortSpec::new().to_control_string(), "");
    }

    #[test]
    fn caller_order_preserved() {
        let spec = SortSpec::new()
            .descending("sn")
            .ascending("givenName")
            .descending("uid");
        assert_eq!(spec.to_control_string(), "-sn givenName -uid");
    }
}

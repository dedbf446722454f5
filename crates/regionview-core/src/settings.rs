//! Region display settings and query-string parameters.
//!
//! [`RegionSettings`] carries one typed field per known region parameter.
//! [`QueryParams`] is an ordered `key=value&...` list used to read the
//! region parameter from, and write it back to, the viewer's query string.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the query parameter holding the encoded regions.
pub const REGION_PARAM: &str = "rg";

/// Settings for region display and persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionSettings {
    /// Are regions shown?
    pub is_region_visible: bool,
    /// Are region numbers shown?
    pub show_region_numbers: bool,
    /// Are regions defined by host markup instead of the query parameter?
    pub has_region_content: bool,
    /// Does clicking a region follow its link or zoom to it?
    pub auto_region_links: bool,
    /// Encoded regions, see [`crate::region::codec`].
    pub rg: Option<String>,
}

impl Default for RegionSettings {
    fn default() -> Self {
        Self {
            is_region_visible: true,
            show_region_numbers: true,
            has_region_content: false,
            auto_region_links: false,
            rg: None,
        }
    }
}

impl RegionSettings {
    /// Create settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default settings with the region parameter taken from `params`.
    pub fn from_query(params: &QueryParams) -> Self {
        Self {
            rg: params
                .get(REGION_PARAM)
                .filter(|v| !v.is_empty())
                .map(str::to_string),
            ..Self::default()
        }
    }

    /// Write the region parameter into `params`, removing it when unset.
    pub fn write_query(&self, params: &mut QueryParams) {
        match &self.rg {
            Some(rg) => params.set(REGION_PARAM, rg),
            None => {
                params.remove(REGION_PARAM);
            }
        }
    }
}

/// Ordered query-string parameters.
///
/// Unknown parameters are carried through untouched so that the host's
/// other settings survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key=value&key=value`.
    ///
    /// A leading `?` is ignored. Pairs that do not split into exactly one
    /// key and one value are skipped; a repeated key keeps the last value.
    pub fn parse(query: &str) -> Self {
        let mut params = Self::new();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&') {
            let mut parts = pair.split('=');
            if let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) {
                if !key.is_empty() {
                    params.set(key, value);
                }
            }
        }
        params
    }

    /// Value of parameter `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set parameter `name`, keeping its position if it already exists.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }

    /// Remove parameter `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for QueryParams {
    /// Serialize as `key=value&...`, leaving out parameters with empty values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in self.entries.iter().filter(|(_, v)| !v.is_empty()) {
            if !first {
                f.write_str("&")?;
            }
            write!(f, "{}={}", key, value)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = RegionSettings::new();
        assert!(settings.is_region_visible);
        assert!(settings.show_region_numbers);
        assert!(!settings.has_region_content);
        assert!(!settings.auto_region_links);
        assert!(settings.rg.is_none());
    }

    #[test]
    fn test_query_parse() {
        let params = QueryParams::parse("?fn=books/page1&pn=3&rg=0.1/0.2/0.3/0.4");
        assert_eq!(params.len(), 3);
        assert_eq!(params.get("fn"), Some("books/page1"));
        assert_eq!(params.get(REGION_PARAM), Some("0.1/0.2/0.3/0.4"));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn test_query_parse_skips_malformed_pairs() {
        let params = QueryParams::parse("a=1&flag&b=2=3&=4&c=");
        assert_eq!(params.get("a"), Some("1"));
        assert_eq!(params.get("flag"), None);
        assert_eq!(params.get("b"), None);
        assert_eq!(params.get("c"), Some(""));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_query_repeated_key_keeps_last() {
        let params = QueryParams::parse("pn=1&pn=2");
        assert_eq!(params.get("pn"), Some("2"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_query_display_preserves_order_and_skips_empty() {
        let params = QueryParams::parse("fn=x&c=&pn=3");
        assert_eq!(params.to_string(), "fn=x&pn=3");
    }

    #[test]
    fn test_settings_from_query() {
        let params = QueryParams::parse("rg=0.5/0.1/0.2/0.2");
        let settings = RegionSettings::from_query(&params);
        assert_eq!(settings.rg.as_deref(), Some("0.5/0.1/0.2/0.2"));

        let settings = RegionSettings::from_query(&QueryParams::parse("rg="));
        assert!(settings.rg.is_none());
    }

    #[test]
    fn test_settings_write_query() {
        let mut params = QueryParams::parse("fn=x&rg=old&pn=3");
        let mut settings = RegionSettings::new();
        settings.rg = Some("0.1/0.1/0.1/0.1".to_string());
        settings.write_query(&mut params);
        assert_eq!(params.to_string(), "fn=x&rg=0.1/0.1/0.1/0.1&pn=3");

        settings.rg = None;
        settings.write_query(&mut params);
        assert_eq!(params.to_string(), "fn=x&pn=3");
    }
}

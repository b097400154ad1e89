//! Navigation entries
//!
//! A [`NavigationEntry`] records one visited logical page, not one browser
//! history frame. Entries are stored newest-last under the `navigationStack`
//! key, so the serialized field names are part of the storage format.

use crate::error::UnknownPageKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of logical page an entry points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    /// Search/list page (the default landing destination)
    Search,
    /// Veteran detail record
    VeteranDetail,
    /// Guardian detail record
    GuardianDetail,
}

impl PageKind {
    /// Every page kind, in declaration order
    pub const ALL: [PageKind; 3] = [Self::Search, Self::VeteranDetail, Self::GuardianDetail];

    /// Stable identifier used in storage and scenario files
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::VeteranDetail => "veteran-detail",
            Self::GuardianDetail => "guardian-detail",
        }
    }

    /// Whether pages of this kind show an editable record
    #[inline]
    #[must_use]
    pub const fn is_detail(self) -> bool {
        matches!(self, Self::VeteranDetail | Self::GuardianDetail)
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageKind {
    type Err = UnknownPageKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownPageKind(s.to_string()))
    }
}

/// One logical page visit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NavigationEntry {
    /// Page kind, serialized as `type`
    #[serde(rename = "type")]
    pub kind: PageKind,
    /// Full URL including the query string
    pub url: String,
    /// Human readable title shown in back links
    pub title: String,
}

impl NavigationEntry {
    /// Create a new entry
    #[inline]
    #[must_use]
    pub fn new(kind: PageKind, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
            title: title.into(),
        }
    }

    /// Whether the entry carries a usable URL
    #[inline]
    #[must_use]
    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

impl fmt::Display for NavigationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' ({})", self.kind, self.title, self.url)
    }
}

/// Cross-record "back" that must land on a sub-section of the destination
///
/// Used by pairing workflows: returning from a guardian to the veteran page
/// it was opened from scrolls the veteran page to `to_section`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Kind the previous page must have for the scroll to apply
    pub from_page: PageKind,
    /// Section identifier the destination scrolls into view
    pub to_section: String,
}

impl ScrollConfig {
    /// Create a new scroll config
    #[inline]
    #[must_use]
    pub fn new(from_page: PageKind, to_section: impl Into<String>) -> Self {
        Self {
            from_page,
            to_section: to_section.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_serializes_with_type_field() {
        let entry = NavigationEntry::new(PageKind::VeteranDetail, "/veterans/42", "John Smith");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"type":"veteran-detail","url":"/veterans/42","title":"John Smith"}"#
        );
    }

    #[test]
    fn unknown_kind_fails_to_deserialize() {
        let json = r#"{"type":"invoice","url":"/x","title":"X"}"#;
        assert!(serde_json::from_str::<NavigationEntry>(json).is_err());
    }

    #[test]
    fn page_kind_from_str() {
        for kind in PageKind::ALL {
            assert_eq!(kind.as_str().parse::<PageKind>().unwrap(), kind);
        }
        let err = "invoice".parse::<PageKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown page kind: 'invoice'");
    }

    #[test]
    fn blank_url_is_not_usable() {
        assert!(!NavigationEntry::new(PageKind::Search, "  ", "Search").has_url());
        assert!(NavigationEntry::new(PageKind::Search, "/search", "Search").has_url());
    }

    #[test]
    fn detail_kinds() {
        assert!(!PageKind::Search.is_detail());
        assert!(PageKind::VeteranDetail.is_detail());
        assert!(PageKind::GuardianDetail.is_detail());
    }
}

//! Durable storage keys

use std::fmt;

/// Keys Waypoint reads and writes in session storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
    /// JSON array of navigation entries, newest last
    NavigationStack,
    /// Section to scroll into view after a cross-record back, consumed once
    ScrollToSection,
    /// Last seen full search URL
    SearchUrl,
    /// Record to auto-select in the pairing dialog, consumed once
    PairingVeteranId,
}

impl StorageKey {
    /// Every key
    pub const ALL: [StorageKey; 4] = [
        Self::NavigationStack,
        Self::ScrollToSection,
        Self::SearchUrl,
        Self::PairingVeteranId,
    ];

    /// Name of the key in storage
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NavigationStack => "navigationStack",
            Self::ScrollToSection => "scrollToSection",
            Self::SearchUrl => "searchUrl",
            Self::PairingVeteranId => "pairingVeteranId",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

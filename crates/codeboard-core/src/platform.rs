use serde::{Deserialize, Serialize};

/// The four profile platforms an individual is aggregated across.
///
/// The serialized form is the key used under `Profiles` in the aggregate
/// output. Variant order is the order those keys are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Platform {
    GeeksForGeeks,
    CodeChef,
    HackerRank,
    LeetCode,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::GeeksForGeeks,
        Platform::CodeChef,
        Platform::HackerRank,
        Platform::LeetCode,
    ];

    /// Key under `Profiles` in the aggregate output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::GeeksForGeeks => "GeeksForGeeks",
            Platform::CodeChef => "CodeChef",
            Platform::HackerRank => "HackerRank",
            Platform::LeetCode => "LeetCode",
        }
    }

    /// Column label used for this platform's URL in the roster.
    ///
    /// Differs from [`Platform::as_str`] only for GeeksforGeeks, whose
    /// spreadsheet column has a lower-case `f`.
    #[must_use]
    pub fn roster_label(self) -> &'static str {
        match self {
            Platform::GeeksForGeeks => "GeeksforGeeks",
            other => other.as_str(),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// src/model.rs
// Domain types shared across the refresh pipeline and the HTTP view.

use serde::{Deserialize, Serialize};

/// A configured organisation. The list in `config/board.toml` is fixed
/// for the lifetime of the process and its order is the classification
/// priority (first member+eligible match wins).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organisation {
    /// GitHub org slug; also the display-ordering key (descending).
    pub id: String,
    pub name: String,
    pub url: String,
    /// Marks the privileged organisation whose contributors form the
    /// core team. Membership alone is not enough there (see classify).
    #[serde(default)]
    pub core: bool,
}

/// One contributor after merging the two polled repositories.
/// Rebuilt wholesale on every refresh; never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    /// Profile URL, the identity key used for membership checks.
    pub profile_url: String,
    pub login: String,
    pub avatar_url: Option<String>,
    /// Total contributions across both repositories.
    pub contributions: u64,
    /// True when at least one raw record came from the primary repo.
    pub in_primary: bool,
}

/// A core-team contributor with profile detail from the user endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreContributor {
    pub profile_url: String,
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

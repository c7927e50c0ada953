// src/enrich.rs
// Turns core-organisation contributors into CoreContributor records by
// fetching their user profiles. One failed fetch fails the batch; the
// refresh pass aborts rather than publish a partially enriched team.

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::github::{ContributorApi, RequestError};
use crate::model::{Contributor, CoreContributor};

/// Sorts after every real surname (maximum Unicode scalar value).
const NO_NAME_SENTINEL: char = '\u{10FFFF}';

/// Fetch profile detail for every core contributor, concurrently, and
/// return the enriched records ordered by surname key.
pub async fn enrich_core(
    api: Arc<dyn ContributorApi>,
    core: Vec<Contributor>,
) -> Result<Vec<CoreContributor>, RequestError> {
    let mut set = JoinSet::new();
    for c in core {
        let api = Arc::clone(&api);
        set.spawn(async move {
            let profile = api.user(&c.login).await?;
            Ok::<_, RequestError>(CoreContributor {
                profile_url: c.profile_url,
                login: c.login,
                name: profile.name,
                avatar_url: c.avatar_url,
                bio: profile.bio,
            })
        });
    }

    let mut enriched = Vec::with_capacity(set.len());
    while let Some(joined) = set.join_next().await {
        enriched.push(joined.expect("profile fetch task panicked")?);
    }

    enriched.sort_by_key(|c| sort_key(c.name.as_deref()));
    Ok(enriched)
}

/// Surname heuristic: everything from the second whitespace-separated
/// token of the full name onward. A single-token name sorts by that
/// token; no name at all sorts last via the sentinel.
pub fn sort_key(name: Option<&str>) -> String {
    let Some(name) = name else {
        return NO_NAME_SENTINEL.to_string();
    };
    let mut tokens = name.split_whitespace();
    match tokens.next() {
        Some(first) => {
            let rest: Vec<&str> = tokens.collect();
            if rest.is_empty() {
                first.to_string()
            } else {
                rest.join(" ")
            }
        }
        None => NO_NAME_SENTINEL.to_string(),
    }
}

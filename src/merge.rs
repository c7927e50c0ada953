// src/merge.rs
// Merges the contributor lists of the two polled repositories into one
// record per login.

use std::collections::HashMap;

use crate::github::types::RawContributor;
use crate::model::Contributor;

/// One merged record per distinct login: contribution counts summed,
/// `in_primary` set when any raw record came from the primary repo.
/// Output is ordered by total contributions descending; equal counts
/// keep first-seen order (stable sort over insertion order).
pub fn merge_sources(
    primary: Vec<RawContributor>,
    secondary: Vec<RawContributor>,
) -> Vec<Contributor> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<Contributor> = Vec::with_capacity(primary.len() + secondary.len());

    for raw in primary {
        absorb(&mut merged, &mut index, raw, true);
    }
    for raw in secondary {
        absorb(&mut merged, &mut index, raw, false);
    }

    merged.sort_by(|a, b| b.contributions.cmp(&a.contributions));
    merged
}

fn absorb(
    merged: &mut Vec<Contributor>,
    index: &mut HashMap<String, usize>,
    raw: RawContributor,
    in_primary: bool,
) {
    match index.get(&raw.login) {
        Some(&i) => {
            let c = &mut merged[i];
            c.contributions += raw.contributions;
            c.in_primary |= in_primary;
        }
        None => {
            index.insert(raw.login.clone(), merged.len());
            merged.push(Contributor {
                profile_url: raw.html_url,
                login: raw.login,
                avatar_url: raw.avatar_url,
                contributions: raw.contributions,
                in_primary,
            });
        }
    }
}

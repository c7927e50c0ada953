// src/classify.rs
// Pure, I/O-free assignment of merged contributors to organisations.

use std::collections::{HashMap, HashSet};

use crate::model::{Contributor, Organisation};

/// A contributor must clear this count (strictly) to join the core
/// organisation, on top of membership and the primary-source flag.
pub const CORE_CONTRIBUTION_FLOOR: u64 = 10;

/// Three-way split of the merged contributor list. Every contributor
/// lands in exactly one of the groups.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// Members of the core organisation that passed the eligibility
    /// predicate; enriched into `CoreContributor` downstream.
    pub core: Vec<Contributor>,
    /// Non-core organisation buckets in display order (id descending),
    /// each sorted by contribution count descending.
    pub buckets: Vec<(Organisation, Vec<Contributor>)>,
    pub unaffiliated: Vec<Contributor>,
}

/// Assign each contributor to the first organisation, in configured
/// order, for which it is both a member and eligible. Membership is
/// checked against `memberships` (org id → set of profile URLs). For
/// the core organisation eligibility additionally requires the
/// primary-source flag and contributions above the floor; an ineligible
/// member falls through to later organisations or to unaffiliated.
pub fn classify(
    contributors: Vec<Contributor>,
    organisations: &[Organisation],
    memberships: &HashMap<String, HashSet<String>>,
) -> Partition {
    let mut core = Vec::new();
    let mut per_org: HashMap<&str, Vec<Contributor>> = HashMap::new();
    let mut unaffiliated = Vec::new();

    'next: for c in contributors {
        for org in organisations {
            let is_member = memberships
                .get(org.id.as_str())
                .is_some_and(|m| m.contains(&c.profile_url));
            if is_member && eligible(&c, org) {
                if org.core {
                    core.push(c);
                } else {
                    per_org.entry(org.id.as_str()).or_default().push(c);
                }
                continue 'next;
            }
        }
        unaffiliated.push(c);
    }

    // Display order for organisation buckets: identifier descending.
    let mut ordered: Vec<&Organisation> = organisations.iter().filter(|o| !o.core).collect();
    ordered.sort_by(|a, b| b.id.cmp(&a.id));

    let mut buckets = Vec::with_capacity(ordered.len());
    for org in ordered {
        let mut bucket = per_org.remove(org.id.as_str()).unwrap_or_default();
        bucket.sort_by(|a, b| b.contributions.cmp(&a.contributions));
        buckets.push((org.clone(), bucket));
    }

    Partition {
        core,
        buckets,
        unaffiliated,
    }
}

fn eligible(c: &Contributor, org: &Organisation) -> bool {
    if org.core {
        c.in_primary && c.contributions > CORE_CONTRIBUTION_FLOOR
    } else {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn org(id: &str, core: bool) -> Organisation {
        Organisation {
            id: id.into(),
            name: id.to_uppercase(),
            url: format!("https://github.com/{id}"),
            core,
        }
    }

    fn contributor(login: &str, contributions: u64, in_primary: bool) -> Contributor {
        Contributor {
            profile_url: format!("https://github.com/{login}"),
            login: login.into(),
            avatar_url: None,
            contributions,
            in_primary,
        }
    }

    fn members(logins: &[&str]) -> HashSet<String> {
        logins
            .iter()
            .map(|l| format!("https://github.com/{l}"))
            .collect()
    }

    #[test]
    fn eligible_member_of_core_org_goes_core() {
        let orgs = vec![org("coreteam", true), org("other", false)];
        let memberships = HashMap::from([
            ("coreteam".to_string(), members(&["alice"])),
            ("other".to_string(), members(&["alice"])),
        ]);
        let p = classify(vec![contributor("alice", 12, true)], &orgs, &memberships);
        assert_eq!(p.core.len(), 1);
        assert!(p.buckets.iter().all(|(_, b)| b.is_empty()));
        assert!(p.unaffiliated.is_empty());
    }

    #[test]
    fn ineligible_core_member_falls_through_to_next_org() {
        let orgs = vec![org("coreteam", true), org("other", false)];
        let memberships = HashMap::from([
            ("coreteam".to_string(), members(&["alice"])),
            ("other".to_string(), members(&["alice"])),
        ]);
        // Member of both, but only 5 contributions: membership suffices
        // for "other", not for the core org.
        let p = classify(vec![contributor("alice", 5, true)], &orgs, &memberships);
        assert!(p.core.is_empty());
        assert_eq!(p.buckets[0].1.len(), 1);
    }

    #[test]
    fn core_org_requires_primary_source_flag() {
        let orgs = vec![org("coreteam", true)];
        let memberships = HashMap::from([("coreteam".to_string(), members(&["alice"]))]);
        let p = classify(vec![contributor("alice", 50, false)], &orgs, &memberships);
        assert!(p.core.is_empty());
        assert_eq!(p.unaffiliated.len(), 1);
    }

    #[test]
    fn boundary_contribution_count_is_not_enough() {
        let orgs = vec![org("coreteam", true)];
        let memberships = HashMap::from([("coreteam".to_string(), members(&["alice"]))]);
        let p = classify(
            vec![contributor("alice", CORE_CONTRIBUTION_FLOOR, true)],
            &orgs,
            &memberships,
        );
        assert!(p.core.is_empty());
    }

    #[test]
    fn first_matching_org_in_configured_order_wins() {
        let orgs = vec![org("alpha", false), org("beta", false)];
        let memberships = HashMap::from([
            ("alpha".to_string(), members(&["bob"])),
            ("beta".to_string(), members(&["bob"])),
        ]);
        let p = classify(vec![contributor("bob", 1, false)], &orgs, &memberships);
        let alpha = p.buckets.iter().find(|(o, _)| o.id == "alpha").unwrap();
        let beta = p.buckets.iter().find(|(o, _)| o.id == "beta").unwrap();
        assert_eq!(alpha.1.len(), 1);
        assert!(beta.1.is_empty());
    }

    #[test]
    fn buckets_are_in_descending_id_order_and_sorted_by_contributions() {
        let orgs = vec![org("alpha", false), org("zulu", false)];
        let memberships = HashMap::from([
            ("alpha".to_string(), members(&["a1"])),
            ("zulu".to_string(), members(&["z1", "z2"])),
        ]);
        let p = classify(
            vec![
                contributor("z1", 2, false),
                contributor("z2", 7, false),
                contributor("a1", 1, false),
            ],
            &orgs,
            &memberships,
        );
        let ids: Vec<&str> = p.buckets.iter().map(|(o, _)| o.id.as_str()).collect();
        assert_eq!(ids, vec!["zulu", "alpha"]);
        let zulu_counts: Vec<u64> = p.buckets[0].1.iter().map(|c| c.contributions).collect();
        assert_eq!(zulu_counts, vec![7, 2]);
    }

    #[test]
    fn every_contributor_lands_in_exactly_one_group() {
        let orgs = vec![org("coreteam", true), org("other", false)];
        let memberships = HashMap::from([
            ("coreteam".to_string(), members(&["alice", "bob"])),
            ("other".to_string(), members(&["bob", "dave"])),
        ]);
        let input = vec![
            contributor("alice", 20, true),
            contributor("bob", 3, true),
            contributor("carol", 1, false),
            contributor("dave", 8, false),
        ];
        let total = input.len();
        let p = classify(input, &orgs, &memberships);
        let bucketed: usize = p.buckets.iter().map(|(_, b)| b.len()).sum();
        assert_eq!(p.core.len() + bucketed + p.unaffiliated.len(), total);
        assert_eq!(p.core.len(), 1);
        assert_eq!(bucketed, 2);
        assert_eq!(p.unaffiliated.len(), 1);
    }

    #[test]
    fn missing_membership_set_means_no_members() {
        let orgs = vec![org("ghost", false)];
        let p = classify(vec![contributor("a", 1, true)], &orgs, &HashMap::new());
        assert_eq!(p.unaffiliated.len(), 1);
    }
}

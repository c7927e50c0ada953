// src/refresh.rs
// The fetch/aggregate pipeline and the timer loop that drives it.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

use crate::classify;
use crate::config::BoardConfig;
use crate::enrich;
use crate::github::{ContributorApi, RefreshFailure, RequestError};
use crate::merge;
use crate::snapshot::{OrgBucket, Snapshot, SnapshotStore};

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("refresh_runs_total", "Refresh passes started.");
        describe_counter!(
            "refresh_failures_total",
            "Refresh passes aborted by an upstream error."
        );
        describe_gauge!(
            "refresh_last_success_ts",
            "Unix ts when a snapshot was last published."
        );
    });
}

/// One full pipeline pass: fetch both repos' contributors, merge,
/// fetch org memberships, classify, enrich the core team, publish.
/// Stages with data dependencies run in sequence; fetches without one
/// run concurrently. Any upstream error aborts the pass and leaves the
/// previously published snapshot untouched.
pub async fn run_refresh(
    api: Arc<dyn ContributorApi>,
    cfg: &BoardConfig,
    store: &SnapshotStore,
) -> Result<(), RefreshFailure> {
    ensure_metrics_described();
    counter!("refresh_runs_total").increment(1);

    let (primary, secondary) = tokio::join!(
        api.repo_contributors(&cfg.primary_repo),
        api.repo_contributors(&cfg.secondary_repo),
    );
    let primary = primary.map_err(|e| RefreshFailure::at("contributor fetch", e))?;
    let secondary = secondary.map_err(|e| RefreshFailure::at("contributor fetch", e))?;

    let merged = merge::merge_sources(primary, secondary);

    let memberships = fetch_memberships(Arc::clone(&api), cfg)
        .await
        .map_err(|e| RefreshFailure::at("membership fetch", e))?;

    let partition = classify::classify(merged, &cfg.organisations, &memberships);

    let core = enrich::enrich_core(Arc::clone(&api), partition.core)
        .await
        .map_err(|e| RefreshFailure::at("profile fetch", e))?;

    let snapshot = Snapshot {
        core,
        organisations: partition
            .buckets
            .into_iter()
            .map(|(organisation, contributors)| OrgBucket {
                organisation,
                contributors,
            })
            .collect(),
        unaffiliated: partition.unaffiliated,
        refreshed_at: Some(chrono::Utc::now()),
    };
    store.publish(snapshot);

    gauge!("refresh_last_success_ts").set(chrono::Utc::now().timestamp() as f64);
    Ok(())
}

/// Membership sets for all configured organisations, fetched
/// concurrently (no data dependency between organisations). Keyed by
/// org id; values are member profile URLs.
async fn fetch_memberships(
    api: Arc<dyn ContributorApi>,
    cfg: &BoardConfig,
) -> Result<HashMap<String, HashSet<String>>, RequestError> {
    let mut set = JoinSet::new();
    for org in &cfg.organisations {
        let api = Arc::clone(&api);
        let id = org.id.clone();
        set.spawn(async move {
            let members = api.org_members(&id).await?;
            let keys: HashSet<String> = members.into_iter().map(|m| m.html_url).collect();
            Ok::<_, RequestError>((id, keys))
        });
    }

    let mut out = HashMap::with_capacity(cfg.organisations.len());
    while let Some(joined) = set.join_next().await {
        let (id, keys) = joined.expect("membership fetch task panicked")?;
        out.insert(id, keys);
    }
    Ok(out)
}

/// Spawn the background refresh loop: one pass immediately, then one
/// per configured interval. `MissedTickBehavior::Skip` drops ticks that
/// land while a pass is still running, so at most one refresh is ever
/// in flight. A failed pass is logged and retried at the next tick.
pub fn spawn_scheduler(
    api: Arc<dyn ContributorApi>,
    cfg: BoardConfig,
    store: Arc<SnapshotStore>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker =
            tokio::time::interval(Duration::from_secs(cfg.refresh_interval_secs.max(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            match run_refresh(Arc::clone(&api), &cfg, &store).await {
                Ok(()) => {
                    let current = store.current();
                    tracing::info!(
                        target: "refresh",
                        core = current.core.len(),
                        organisations = current.organisations.len(),
                        unaffiliated = current.unaffiliated.len(),
                        "published contributor snapshot"
                    );
                }
                Err(e) => {
                    counter!("refresh_failures_total").increment(1);
                    tracing::warn!(
                        target: "refresh",
                        error = ?e,
                        stage = e.stage,
                        "refresh failed; keeping previous snapshot"
                    );
                }
            }
        }
    })
}

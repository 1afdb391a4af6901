use std::future::Future;
use std::slice;

use ahash::HashSet;
use itertools::Itertools;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use kms_core::client::ClusterClient;
use kms_core::error::KmsError;
use kms_core::host::Host;

use crate::membership::Membership;

/// Joins the servers behind `endpoints` into a single cluster.
///
/// If one of the endpoints already belongs to a multi-node cluster, every endpoint outside
/// of it is added to that cluster. Otherwise the first endpoint becomes the seed everybody
/// else joins. Existing multi-node clusters are never split: when the endpoints span two
/// of them, the nodes of the second one are asked to join the first and the server rejects it.
///
/// Returns the hosts that were asked to join, in endpoint order. The first failing request
/// aborts the whole join with that request's error; nodes added before it stay added.
pub async fn join<C>(
    endpoints: &[String],
    client: &C,
    cancel: &CancellationToken,
) -> anyhow::Result<Vec<Host>>
where
    C: ClusterClient + ?Sized,
{
    if endpoints.len() <= 1 {
        return Ok(vec![]);
    }
    let membership = discover(endpoints, client, cancel).await?;
    let added = converge(endpoints, &membership, client, cancel).await?;
    info!(
        "cluster of {} nodes converged, {} joined",
        membership.len() + added.len(),
        added.len()
    );
    Ok(added)
}

/// Finds the cluster the endpoints converge to.
///
/// Endpoints are probed one at a time in order and the first one reporting a multi-node
/// cluster decides the membership. Later endpoints are not probed at all.
pub async fn discover<C>(
    endpoints: &[String],
    client: &C,
    cancel: &CancellationToken,
) -> anyhow::Result<Membership>
where
    C: ClusterClient + ?Sized,
{
    let seed = match endpoints.first() {
        Some(endpoint) => Host::normalize(endpoint),
        None => return Err(KmsError::NoHosts.into()),
    };
    for endpoint in endpoints {
        let host = Host::normalize(endpoint);
        let status = cancellable(cancel, client.cluster_status(slice::from_ref(&host))).await?;
        if status.is_standalone() {
            debug!("{} is standalone", host);
            continue;
        }
        let membership = Membership::from_status(&status);
        if membership.is_empty() {
            warn!("{} reported an empty cluster", host);
            break;
        }
        info!(
            "{} belongs to cluster [{}]",
            host,
            membership.hosts().iter().join(", ")
        );
        return Ok(membership);
    }
    info!("no multi-node cluster found, {} becomes the seed", seed);
    Ok(Membership::seed(seed))
}

/// Asks every endpoint outside of `membership` to join it, routing the requests to the members.
pub async fn converge<C>(
    endpoints: &[String],
    membership: &Membership,
    client: &C,
    cancel: &CancellationToken,
) -> anyhow::Result<Vec<Host>>
where
    C: ClusterClient + ?Sized,
{
    let targets = membership.hosts();
    let mut seen = HashSet::default();
    let mut added = vec![];
    for endpoint in endpoints {
        let host = Host::normalize(endpoint);
        if membership.contains(&host) || !seen.insert(host.clone()) {
            continue;
        }
        debug!("add {} via [{}]", host, targets.iter().join(", "));
        cancellable(cancel, client.add_node(&targets, &host)).await?;
        info!("{} joined the cluster", host);
        added.push(host);
    }
    Ok(added)
}

async fn cancellable<F, T>(cancel: &CancellationToken, fut: F) -> anyhow::Result<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(KmsError::Cancelled.into()),
        result = fut => result,
    }
}

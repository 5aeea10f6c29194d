use crate::logic::trigger::CheckTrigger;
use crate::model::{Config, Host, StatusUpdate};
use futures::future::join_all;
use std::net::IpAddr;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Duration;
use surge_ping::ping;

/// Per-probe timeout. The checker owns this; the dashboard never cancels it.
const PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Background task that checks all configured hosts once per cycle, or
/// immediately when the trigger is set. Results are posted to `updates`;
/// indicator state is never touched from here.
pub async fn checker_task(
    hosts: Vec<Host>,
    config: Arc<Config>,
    trigger: Arc<CheckTrigger>,
    updates: Sender<StatusUpdate>,
) {
    loop {
        let ping_count = config.ping_count();

        // One task per host; wait for the whole round so updates for a host
        // are posted in the order they were produced.
        let checks: Vec<_> = hosts
            .iter()
            .enumerate()
            .map(|(host_id, host)| {
                let host = host.clone();
                let updates = updates.clone();
                tokio::spawn(async move {
                    let reachable = check_host(&host, ping_count).await;
                    tracing::debug!(host = %host.label, reachable, "check finished");
                    // Receiver is gone only during shutdown
                    let _ = updates.send(StatusUpdate { host_id, reachable });
                })
            })
            .collect();
        join_all(checks).await;

        let cycle = Duration::from_secs(config.cycle_time());
        if trigger.wait_timeout(cycle).await {
            tracing::debug!("manual refresh requested");
        }
    }
}

/// Sends up to `ping_count` echo requests; the host counts as reachable as
/// soon as one reply arrives.
async fn check_host(host: &Host, ping_count: u64) -> bool {
    let payload = [42u8; 16];

    let Some(ip) = resolve(&host.address).await else {
        tracing::warn!(host = %host.label, address = %host.address, "address did not resolve");
        return false;
    };

    for _ in 0..ping_count {
        let result = tokio::time::timeout(PING_TIMEOUT, ping(ip, &payload)).await;
        if let Ok(Ok((_, _rtt))) = result {
            return true;
        }
    }
    false
}

/// Resolves a configured address: IP literal (including bracketed IPv6)
/// first, DNS lookup as fallback.
pub(crate) async fn resolve(address: &str) -> Option<IpAddr> {
    let bare = address
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(address);
    if let Ok(ip) = bare.parse::<IpAddr>() {
        return Some(ip);
    }

    let mut addrs = tokio::net::lookup_host(format!("{address}:0")).await.ok()?;
    addrs.next().map(|sock_addr| sock_addr.ip())
}

use serde::{Deserialize, Serialize};

/// One monitored endpoint, as configured. Label and address never change
/// after the registry is loaded; the visible status lives in the dashboard,
/// indexed by the host's position in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    pub label: String,
    pub address: String,
}

/// Reachability of a host as shown by its indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostStatus {
    #[default]
    Unknown,
    Reachable,
    Unreachable,
}

impl HostStatus {
    pub fn from_reachable(reachable: bool) -> Self {
        if reachable {
            HostStatus::Reachable
        } else {
            HostStatus::Unreachable
        }
    }
}

/// One check result, posted by the background checker and applied to the
/// matching indicator on the rendering thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    pub host_id: usize,
    pub reachable: bool,
}

/// Row-major grid placement: index 0..limit goes on row 0, the next `limit`
/// hosts on row 1, and so on.
pub fn grid_position(index: usize, column_limit: usize) -> (usize, usize) {
    (index / column_limit, index % column_limit)
}

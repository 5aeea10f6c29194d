pub mod config;
pub mod host;


pub use config::{Config, ConfigError, SettingsError};
pub use host::{Host, HostStatus, StatusUpdate, grid_position};

//! Support layer for the dconfig daemon.
//!
//! Everything here sits under the IPC service: it turns resource paths into
//! [`ConfigureId`]s, recycles connection handlers, and names the peers that
//! connect.
//!
//! # Architecture
//!
//! ```text
//! IPC connection ──► ConnKey ──► resource_key_of / ordinal_of
//!       │
//!       ├── peer pid/uid ──► PeerIdentity (process + user name)
//!       │
//!       └── handler ◄──── ObjectPool<Handler> (pull / push)
//!
//! resource path ──► ConfigureIdResolver ──► (PathLayout, ConfigureId)
//!                          │
//!                          └── StandardPaths (data dir, read per call)
//! ```

pub mod config;
pub mod constants;
pub mod pool;
pub mod process;
pub mod resolver;
pub mod standard_paths;

pub use config::{ConfigError, DaemonConfig};
pub use pool::{InitFunc, ObjectPool, SharedObjectPool};
pub use process::{PeerIdentity, process_name_by_pid, process_name_by_pid_in, user_name_by_uid};
pub use resolver::ConfigureIdResolver;
pub use standard_paths::{EnvStandardPaths, FixedStandardPaths, StandardPaths};

// Identity types, so daemon code needs one import.
pub use dconfig_types::{
    ConfigureId, ConnKey, ConnKeyError, ConnRefCount, ConnServiceName, PathLayout, ResourceKey,
};

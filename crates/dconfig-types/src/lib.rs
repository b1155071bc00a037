//! Configuration resource identity for dconfig.
//!
//! This crate answers one question for the daemon: *which application,
//! namespace and resource does this file name?* It also owns the connection
//! key format the IPC layer uses to address a client's view of a resource.
//! It has **no internal dconfig dependencies**; it is a pure leaf crate.
//!
//! # Supported layouts
//!
//! ```text
//! /usr/share/dsg/apps/{appid}/configs{subpath}/{resource}.json          ← UsrShare
//! /opt/apps/{appid}/files/schemas/configs{subpath}/{resource}.json      ← OptApps
//! {data-dir}/configs{subpath}/{resource}.json                          ← Generic
//! ```
//!
//! # Key Types
//!
//! |-----------------------|---------------------------------------------|
//! | Item                  | Purpose                                     |
//! |-----------------------|---------------------------------------------|
//! | [`ConfigureId`]       | Resolved (app id, sub path, resource)       |
//! | [`PathLayout`]        | Which on-disk layout a path follows         |
//! | [`ConnKey`]           | `<resource key>/<ordinal>` connection key   |
//! | [`ConnKeyError`]      | Strict ordinal parsing failures             |
//! |-----------------------|---------------------------------------------|

pub mod configure_id;
pub mod conn_key;
mod grammar;

// Re-export primary types at crate root for convenience.
pub use configure_id::{
    ConfigureId, PathLayout, classify_app_path, resolve_app_configure_id,
    resolve_generic_configure_id,
};
pub use conn_key::{
    ConnKey, ConnKeyError, ConnRefCount, ConnServiceName, ResourceKey, conn_key, ordinal_of,
    resource_key_of, split_conn_key, try_ordinal_of,
};

//! Resolves resource paths against every known layout.
//!
//! App-rooted layouts are fixed; the generic layout is anchored at whatever
//! [`StandardPaths`] reports at the time of the call.

use std::path::PathBuf;
use std::sync::Arc;

use dconfig_types::{
    ConfigureId, PathLayout, classify_app_path, resolve_app_configure_id,
    resolve_generic_configure_id,
};
use tracing::trace;

use crate::standard_paths::StandardPaths;

/// Resolver owning the data-directory source used for generic paths.
#[derive(Clone)]
pub struct ConfigureIdResolver {
    paths: Arc<dyn StandardPaths>,
}

impl ConfigureIdResolver {
    pub fn new(paths: Arc<dyn StandardPaths>) -> Self {
        Self { paths }
    }

    /// Current root of generic resources.
    pub fn configs_root(&self) -> PathBuf {
        self.paths.configs_root()
    }

    /// Resolve against the two app-rooted layouts only.
    pub fn resolve_app(&self, path: &str) -> ConfigureId {
        resolve_app_configure_id(path)
    }

    /// Resolve against the generic layout only.
    pub fn resolve_generic(&self, path: &str) -> ConfigureId {
        let root = self.configs_root();
        resolve_generic_configure_id(path, &root.to_string_lossy())
    }

    /// Resolve against every layout, app-rooted first.
    pub fn resolve(&self, path: &str) -> Option<(PathLayout, ConfigureId)> {
        if let Some(found) = classify_app_path(path) {
            return Some(found);
        }
        let id = self.resolve_generic(path);
        if id.is_empty() {
            trace!(path, "path matches no known layout");
            return None;
        }
        Some((PathLayout::Generic, id))
    }
}

impl std::fmt::Debug for ConfigureIdResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigureIdResolver")
            .field("configs_root", &self.configs_root())
            .finish()
    }
}

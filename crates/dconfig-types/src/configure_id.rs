//! Resolution of resource paths into [`ConfigureId`]s.
//!
//! A `ConfigureId` names a configuration resource independently of where it
//! lives on disk. Two layouts are rooted at fixed, app-owned directories; the
//! third is anchored at the daemon's data directory, which is only known at
//! runtime and must be passed in on every call.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grammar::{AppRule, Captures, generic_captures};

/// `/usr/share/dsg/apps/{appid}/configs{subpath}/{resource}.json`
const USR_SHARE_RULE: AppRule = AppRule {
    prefix: "/usr/share/dsg/apps/",
    anchor: "configs",
};

/// `/opt/apps/{appid}/files/schemas/configs{subpath}/{resource}.json`
const OPT_APPS_RULE: AppRule = AppRule {
    prefix: "/opt/apps/",
    anchor: "files/schemas/configs",
};

/// Which on-disk layout a resource path follows.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PathLayout {
    /// System-wide app schemas under `/usr/share/dsg/apps`.
    UsrShare,
    /// Packaged app schemas under `/opt/apps`.
    OptApps,
    /// Resources under the runtime data directory.
    Generic,
}

impl PathLayout {
    /// App-rooted layouts in resolution order.
    pub const APP_ROOTED: [PathLayout; 2] = [PathLayout::UsrShare, PathLayout::OptApps];

    fn app_rule(self) -> Option<&'static AppRule> {
        match self {
            PathLayout::UsrShare => Some(&USR_SHARE_RULE),
            PathLayout::OptApps => Some(&OPT_APPS_RULE),
            PathLayout::Generic => None,
        }
    }
}

/// A resolved (application, namespace, resource) triple.
///
/// The default value has every field empty and means "not resolved". Check
/// [`ConfigureId::is_empty`] (or the field your call site depends on) before
/// trusting the rest.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigureId {
    /// Owning application id. Never set by the generic layout.
    pub app_id: String,
    /// Namespace below the config root; starts with `/` when non-empty.
    pub sub_path: String,
    /// Resource base name without the `.json` suffix.
    pub resource: String,
}

impl ConfigureId {
    /// Build a triple from its parts.
    pub fn new(
        app_id: impl Into<String>,
        sub_path: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            sub_path: sub_path.into(),
            resource: resource.into(),
        }
    }

    fn from_captures(c: Captures<'_>) -> Self {
        Self::new(c.app_id, c.sub_path, c.resource)
    }

    /// True for the "no match" result.
    pub fn is_empty(&self) -> bool {
        self.resource.is_empty()
    }

    /// Canonical path of this resource in an app-rooted layout.
    ///
    /// Returns `None` for [`PathLayout::Generic`], which needs a data
    /// directory; use [`ConfigureId::generic_path`] instead.
    pub fn app_path(&self, layout: PathLayout) -> Option<String> {
        let rule = layout.app_rule()?;
        Some(format!(
            "{}{}/{}{}/{}.json",
            rule.prefix, self.app_id, rule.anchor, self.sub_path, self.resource
        ))
    }

    /// Canonical path of this resource below a generic data-directory root.
    pub fn generic_path(&self, data_dir_root: &str) -> String {
        format!(
            "{}{}/{}.json",
            data_dir_root.trim_end_matches('/'),
            self.sub_path,
            self.resource
        )
    }
}

impl fmt::Display for ConfigureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.app_id, self.sub_path, self.resource)
    }
}

/// Resolve an app-rooted path, reporting which layout matched.
pub fn classify_app_path(path: &str) -> Option<(PathLayout, ConfigureId)> {
    PathLayout::APP_ROOTED.into_iter().find_map(|layout| {
        let rule = layout.app_rule()?;
        rule.captures(path).map(|c| (layout, ConfigureId::from_captures(c)))
    })
}

/// Resolve a path in either app-rooted layout.
///
/// `/usr/share/dsg/apps` is tried before `/opt/apps`. The prefixes are
/// disjoint, so order only matters for determinism. Returns an all-empty
/// `ConfigureId` when neither layout matches.
pub fn resolve_app_configure_id(path: &str) -> ConfigureId {
    classify_app_path(path)
        .map(|(_, id)| id)
        .unwrap_or_default()
}

/// Resolve a path below the generic data-directory root.
///
/// `data_dir_root` (conceptually `<data-dir>/configs`) is matched as a
/// literal prefix, never interpreted as a pattern. `app_id` is always empty
/// in the result.
pub fn resolve_generic_configure_id(path: &str, data_dir_root: &str) -> ConfigureId {
    generic_captures(path, data_dir_root)
        .map(ConfigureId::from_captures)
        .unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================

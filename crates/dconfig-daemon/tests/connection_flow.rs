//! Integration tests walking a client connection through the identity layer.
//!
//! A connection arrives for a resource file, the daemon resolves the file's
//! identity, hands out a pooled handler keyed by a connection key, names the
//! peer, and later recycles the handler.

use std::collections::HashMap;
use std::fs;
use std::sync::Arc;

use dconfig_daemon::{
    ConfigureId, ConfigureIdResolver, DaemonConfig, FixedStandardPaths, ObjectPool, PathLayout,
    PeerIdentity, SharedObjectPool,
};
use dconfig_types::{conn_key, ordinal_of, resource_key_of};

// ============================================================================
// Shared test setup
// ============================================================================

#[derive(Default)]
struct Handler {
    generation: u32,
    resource: Option<ConfigureId>,
}

fn resolver_for(data_dir: &std::path::Path) -> ConfigureIdResolver {
    ConfigureIdResolver::new(Arc::new(FixedStandardPaths::new(data_dir)))
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_connections_share_resource_key() {
    let resolver = resolver_for(std::path::Path::new("/data/dsg"));
    let (layout, id) = resolver
        .resolve("/opt/apps/dock/files/schemas/configs/p/main.json")
        .expect("opt layout");
    assert_eq!(layout, PathLayout::OptApps);

    let resource_key = format!("/{}{}/{}", id.app_id, id.sub_path, id.resource);
    let keys: Vec<String> = (0..3).map(|n| conn_key(&resource_key, n)).collect();

    for (n, key) in keys.iter().enumerate() {
        assert_eq!(resource_key_of(key), resource_key);
        assert_eq!(ordinal_of(key), n as u32);
    }
}

#[test]
fn test_handlers_recycled_between_connections() {
    let mut pool: ObjectPool<Handler> =
        ObjectPool::with_init_func(|h: &mut Handler| h.generation = 1);
    let resolver = resolver_for(std::path::Path::new("/data/dsg"));
    let mut live: HashMap<String, Box<Handler>> = HashMap::new();

    for (ordinal, path) in [
        "/usr/share/dsg/apps/dock/configs/main.json",
        "/data/dsg/configs/org.app/general.json",
    ]
    .into_iter()
    .enumerate()
    {
        let (_, id) = resolver.resolve(path).expect("known layout");
        let mut handler = pool.pull();
        handler.resource = Some(id);
        live.insert(conn_key(path, ordinal as u32), handler);
    }
    assert_eq!(pool.checked_out(), 2);
    assert!(pool.is_empty());

    // Both connections close.
    for (_, mut handler) in live.drain() {
        handler.resource = None;
        handler.generation += 1;
        pool.push(handler);
    }
    assert_eq!(pool.len(), 2);

    // Reused handlers keep their state; the init hook does not run again.
    let reused = pool.pull();
    assert_eq!(reused.generation, 2);
    assert!(reused.resource.is_none());
}

#[test]
fn test_shared_pool_handle() {
    let pool: SharedObjectPool<Handler> = SharedObjectPool::new(ObjectPool::new());
    let other = pool.clone();

    let h = pool.pull();
    let addr = &*h as *const Handler;
    other.push(h);
    assert_eq!(&*pool.pull() as *const Handler, addr);
}

#[test]
fn test_config_data_dir_drives_generic_layout() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("daemon.toml");
    fs::write(&config_path, "data_dir = \"/srv/dsg\"\n").unwrap();

    let config = DaemonConfig::load(&config_path).unwrap();
    let resolver = ConfigureIdResolver::new(config.standard_paths());

    let (layout, id) = resolver
        .resolve("/srv/dsg/configs/org.deepin.dde/a/b.json")
        .expect("generic layout");
    assert_eq!(layout, PathLayout::Generic);
    assert_eq!(id, ConfigureId::new("", "/org.deepin.dde/a", "b"));
}

#[test]
fn test_peer_identity_never_fails() {
    let peer = PeerIdentity::lookup(u32::MAX, 3_999_999_999);
    assert_eq!(peer.process, u32::MAX.to_string());
    assert_eq!(peer.user, "3999999999");
}

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;

use crate::kv::FileStore;
use crate::storage::StorageAccessor;

pub const DATA_DIR_ENV: &str = "PAGESMITH_DATA_DIR";
pub const ADDR_ENV: &str = "PAGESMITH_ADDR";
pub const DEFAULT_DATA_DIR: &str = "pagesmith-data";
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Command-line value first, then the environment, then the default.
pub fn data_dir(arg: Option<PathBuf>) -> PathBuf {
    resolve_data_dir(arg, env_value(DATA_DIR_ENV))
}

pub fn listen_addr(arg: Option<SocketAddr>) -> anyhow::Result<SocketAddr> {
    resolve_addr(arg, env_value(ADDR_ENV))
}

pub fn open_storage(data_dir: PathBuf) -> Arc<StorageAccessor<FileStore>> {
    tracing::debug!(data_dir = %data_dir.display(), "opening file storage");
    Arc::new(StorageAccessor::new(FileStore::new(data_dir)))
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn resolve_data_dir(arg: Option<PathBuf>, env: Option<String>) -> PathBuf {
    arg.or_else(|| env.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

fn resolve_addr(arg: Option<SocketAddr>, env: Option<String>) -> anyhow::Result<SocketAddr> {
    if let Some(addr) = arg {
        return Ok(addr);
    }
    let raw = env.unwrap_or_else(|| DEFAULT_ADDR.to_owned());
    raw.parse()
        .with_context(|| format!("parse listen address {raw:?} ({ADDR_ENV})"))
}

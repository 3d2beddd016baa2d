//! 本地持久化存储
//!
//! 以键值槽位的形式模拟浏览器 localStorage，核心组件通过
//! [`KeyValueStore`] 注入访问，不直接触碰文件系统。

mod file_store;
mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use std::sync::Arc;

use tracing::debug;

use crate::errors::Result;

/// 最近链接列表所在的槽位
pub const RECENT_LINKS_KEY: &str = "recentLinks";
/// Bearer token 所在的槽位（只读）
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// 同步键值存储
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;

    fn backend_name(&self) -> &'static str;
}

/// 根据配置创建存储
///
/// 路径为空时使用内存存储（会话结束即丢失）
pub fn create_store(path: &str) -> Arc<dyn KeyValueStore> {
    if path.trim().is_empty() {
        debug!("Storage path is empty, using in-memory store");
        Arc::new(MemoryStore::new())
    } else {
        debug!("Using file store at {}", path);
        Arc::new(FileStore::new(path))
    }
}

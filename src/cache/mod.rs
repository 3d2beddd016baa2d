//! 最近链接缓存

mod recent_links;

pub use recent_links::{RECENT_LINKS_CAPACITY, RecentLinks};

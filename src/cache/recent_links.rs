use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::{ClientError, Result};
use crate::models::LinkRecord;
use crate::storage::{KeyValueStore, RECENT_LINKS_KEY};

/// 最近链接容量
pub const RECENT_LINKS_CAPACITY: usize = 5;

/// 最近链接缓存
///
/// 按新到旧排列，最多 [`RECENT_LINKS_CAPACITY`] 条，`short` 唯一。
/// 每次修改都会在返回前同步写入 `recentLinks` 槽位。
pub struct RecentLinks {
    records: Vec<LinkRecord>,
    store: Arc<dyn KeyValueStore>,
}

impl RecentLinks {
    /// 从持久化存储加载
    ///
    /// 槽位不存在时为空；内容无法解析时视为损坏，清空槽位后返回空列表。
    /// 内容可解析但违反约束（重复或超出容量）时，修正后写回槽位。
    /// 不会向调用方返回错误。
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let (records, rewrite) = match store.get(RECENT_LINKS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<LinkRecord>>(&raw) {
                Ok(stored) => {
                    let stored_len = stored.len();
                    let records = normalize(stored);
                    debug!("Loaded {} recent links", records.len());
                    let rewrite = records.len() != stored_len;
                    (records, rewrite)
                }
                Err(e) => {
                    warn!("Recent links slot is corrupt, discarding it: {}", e);
                    if let Err(e) = store.remove(RECENT_LINKS_KEY) {
                        warn!("Failed to clear corrupt recent links slot: {}", e);
                    }
                    (Vec::new(), false)
                }
            },
            Ok(None) => (Vec::new(), false),
            Err(e) => {
                warn!("Failed to read recent links: {}", e);
                (Vec::new(), false)
            }
        };

        let cache = Self { records, store };
        if rewrite {
            warn!(
                "Recent links slot violated its constraints, rewriting {} records",
                cache.records.len()
            );
            if let Err(e) = cache.persist(&cache.records) {
                warn!("Failed to rewrite recent links slot: {}", e);
            }
        }
        cache
    }

    /// 插入一条记录
    ///
    /// 先按 `short` 去重，再放到最前，最后截断到容量上限。
    /// 持久化失败时内存中的列表保持不变。
    pub fn insert(&mut self, record: LinkRecord) -> Result<()> {
        let mut next: Vec<LinkRecord> = Vec::with_capacity(RECENT_LINKS_CAPACITY + 1);
        next.extend(
            self.records
                .iter()
                .filter(|r| r.short != record.short)
                .cloned(),
        );
        next.insert(0, record);
        next.truncate(RECENT_LINKS_CAPACITY);

        self.persist(&next)?;
        self.records = next;
        Ok(())
    }

    /// 清空内存与持久化槽位，可重复调用
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(RECENT_LINKS_KEY)?;
        if !self.records.is_empty() {
            info!("Cleared {} recent links", self.records.len());
        }
        self.records.clear();
        Ok(())
    }

    pub fn records(&self) -> &[LinkRecord] {
        &self.records
    }

    /// 按 0 起始下标获取
    pub fn get(&self, index: usize) -> Option<&LinkRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn persist(&self, records: &[LinkRecord]) -> Result<()> {
        let json = serde_json::to_string(records)
            .map_err(|e| ClientError::storage(format!("Failed to serialize recent links: {}", e)))?;
        self.store.set(RECENT_LINKS_KEY, &json)
    }
}

/// 修正不满足约束的已存数据：保留每个 `short` 第一次出现的记录，再截断
fn normalize(records: Vec<LinkRecord>) -> Vec<LinkRecord> {
    let mut seen = std::collections::HashSet::new();
    let mut normalized: Vec<LinkRecord> = records
        .into_iter()
        .filter(|r| seen.insert(r.short.clone()))
        .collect();
    normalized.truncate(RECENT_LINKS_CAPACITY);
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::Utc;

    fn record(n: usize) -> LinkRecord {
        LinkRecord {
            original: format!("https://example.com/{}", n),
            short: format!("https://s.ly/{}", n),
            created_at: Utc::now(),
            expires_at: None,
        }
    }

    fn shorts(cache: &RecentLinks) -> Vec<String> {
        cache.records().iter().map(|r| r.short.clone()).collect()
    }

    fn stored(store: &MemoryStore) -> Option<Vec<LinkRecord>> {
        store
            .get(RECENT_LINKS_KEY)
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    #[test]
    fn test_bounded_newest_first() {
        let store = Arc::new(MemoryStore::new());
        let mut cache = RecentLinks::load(store.clone());

        for n in 1..=6 {
            cache.insert(record(n)).unwrap();
            assert_eq!(cache.len(), n.min(RECENT_LINKS_CAPACITY));
        }

        assert_eq!(
            shorts(&cache),
            vec![
                "https://s.ly/6",
                "https://s.ly/5",
                "https://s.ly/4",
                "https://s.ly/3",
                "https://s.ly/2",
            ]
        );
        assert_eq!(stored(&store).unwrap(), cache.records());
    }

    #[test]
    fn test_reinsert_moves_to_front() {
        let store = Arc::new(MemoryStore::new());
        let mut cache = RecentLinks::load(store);
        for n in 1..=3 {
            cache.insert(record(n)).unwrap();
        }

        let mut again = record(1);
        again.original = "https://other.example.com".to_string();
        cache.insert(again).unwrap();

        assert_eq!(cache.len(), 3);
        assert_eq!(
            shorts(&cache),
            vec!["https://s.ly/1", "https://s.ly/3", "https://s.ly/2"]
        );
        assert_eq!(cache.records()[0].original, "https://other.example.com");
    }

    #[test]
    fn test_reinsert_at_capacity_keeps_others() {
        let store = Arc::new(MemoryStore::new());
        let mut cache = RecentLinks::load(store);
        for n in 1..=5 {
            cache.insert(record(n)).unwrap();
        }
        // 重新插入最旧的一条：去重在截断之前，不应挤掉其他记录
        cache.insert(record(1)).unwrap();
        assert_eq!(
            shorts(&cache),
            vec![
                "https://s.ly/1",
                "https://s.ly/5",
                "https://s.ly/4",
                "https://s.ly/3",
                "https://s.ly/2",
            ]
        );
    }

    #[test]
    fn test_no_duplicate_shorts_after_any_insert() {
        let store = Arc::new(MemoryStore::new());
        let mut cache = RecentLinks::load(store);
        for n in [1, 2, 1, 3, 3, 4, 2, 5, 6, 1, 7, 6] {
            cache.insert(record(n)).unwrap();
            let mut s = shorts(&cache);
            s.sort();
            s.dedup();
            assert_eq!(s.len(), cache.len());
            assert!(cache.len() <= RECENT_LINKS_CAPACITY);
        }
    }

    #[test]
    fn test_same_original_different_short_kept() {
        let store = Arc::new(MemoryStore::new());
        let mut cache = RecentLinks::load(store);
        let mut a = record(1);
        let mut b = record(2);
        a.original = "https://same.example.com".to_string();
        b.original = "https://same.example.com".to_string();
        cache.insert(a).unwrap();
        cache.insert(b).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_load_roundtrip_from_store() {
        let store = Arc::new(MemoryStore::new());
        {
            let mut cache = RecentLinks::load(store.clone());
            cache.insert(record(1)).unwrap();
            cache.insert(record(2)).unwrap();
        }
        let cache = RecentLinks::load(store);
        assert_eq!(shorts(&cache), vec!["https://s.ly/2", "https://s.ly/1"]);
    }

    #[test]
    fn test_corrupt_slot_is_cleared() {
        let store = Arc::new(MemoryStore::with_entries([(RECENT_LINKS_KEY, "{oops")]));

        let cache = RecentLinks::load(store.clone());
        assert!(cache.is_empty());
        assert_eq!(store.get(RECENT_LINKS_KEY).unwrap(), None);

        // 再次加载仍然为空
        let cache = RecentLinks::load(store.clone());
        assert!(cache.is_empty());
        assert_eq!(store.get(RECENT_LINKS_KEY).unwrap(), None);
    }

    #[test]
    fn test_schema_mismatch_is_corrupt() {
        let store = Arc::new(MemoryStore::with_entries([(
            RECENT_LINKS_KEY,
            r#"[{"original": 1, "short": "x"}]"#,
        )]));
        let cache = RecentLinks::load(store.clone());
        assert!(cache.is_empty());
        assert_eq!(store.get(RECENT_LINKS_KEY).unwrap(), None);
    }

    #[test]
    fn test_load_normalizes_invariant_violations() {
        let mut records: Vec<LinkRecord> = (1..=7).map(record).collect();
        records.insert(1, record(1));
        let raw = serde_json::to_string(&records).unwrap();
        let store = Arc::new(MemoryStore::with_entries([(RECENT_LINKS_KEY, raw)]));

        let cache = RecentLinks::load(store.clone());
        assert_eq!(
            shorts(&cache),
            vec![
                "https://s.ly/1",
                "https://s.ly/2",
                "https://s.ly/3",
                "https://s.ly/4",
                "https://s.ly/5",
            ]
        );
        // The slot is rewritten with the normalized list
        assert_eq!(stored(&store).unwrap(), cache.records());
    }

    #[test]
    fn test_oversized_slot_is_trimmed_on_load() {
        let records: Vec<LinkRecord> = (1..=7).map(record).collect();
        let raw = serde_json::to_string(&records).unwrap();
        let store = Arc::new(MemoryStore::with_entries([(RECENT_LINKS_KEY, raw)]));

        let cache = RecentLinks::load(store.clone());
        assert_eq!(cache.len(), RECENT_LINKS_CAPACITY);
        assert_eq!(stored(&store).unwrap().len(), RECENT_LINKS_CAPACITY);
    }

    #[test]
    fn test_valid_slot_is_left_alone() {
        let records: Vec<LinkRecord> = (1..=3).map(record).collect();
        let raw = serde_json::to_string(&records).unwrap();
        let store = Arc::new(MemoryStore::with_entries([(RECENT_LINKS_KEY, raw.clone())]));

        RecentLinks::load(store.clone());
        assert_eq!(store.get(RECENT_LINKS_KEY).unwrap(), Some(raw));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let mut cache = RecentLinks::load(store.clone());
        cache.insert(record(1)).unwrap();

        cache.clear().unwrap();
        assert!(cache.is_empty());
        assert_eq!(store.get(RECENT_LINKS_KEY).unwrap(), None);

        cache.clear().unwrap();
        assert!(cache.is_empty());
    }

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }
        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(ClientError::storage("read-only"))
        }
        fn remove(&self, _key: &str) -> Result<()> {
            Err(ClientError::storage("read-only"))
        }
        fn backend_name(&self) -> &'static str {
            "read-only"
        }
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let mut cache = RecentLinks::load(Arc::new(ReadOnlyStore));
        let err = cache.insert(record(1)).unwrap_err();
        assert!(matches!(err, ClientError::Storage(_)));
        assert!(cache.is_empty());
    }
}

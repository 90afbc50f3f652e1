use std::future::Future;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::Duration;

use async_trait::async_trait;
use lru::LruCache;
use sea_orm::DbErr;
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::metadata::{MetadataSource, ResourceMetadata, ScheduleWindow, Template};
use crate::config::CacheConfig;

/// Bounded LRU map whose entries expire `ttl` after insertion.
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: Mutex<LruCache<K, (Instant, V)>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq,
    V: Clone,
{
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            ttl,
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Returns a clone of the entry if it has not expired. Expired entries
    /// are evicted on access.
    pub async fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock().await;
        let fresh = match entries.get(key) {
            Some((stored_at, value)) if stored_at.elapsed() < self.ttl => Some(value.clone()),
            Some(_) => None,
            None => return None,
        };
        if fresh.is_none() {
            entries.pop(key);
        }
        fresh
    }

    pub async fn insert(&self, key: K, value: V) {
        self.entries
            .lock()
            .await
            .put(key, (Instant::now(), value));
    }

    /// Read-through lookup. The lock is not held while `load` runs, so
    /// concurrent misses on one key may each hit the backing source.
    pub async fn get_or_try_load<F, Fut, E>(&self, key: K, load: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key).await {
            return Ok(value);
        }
        let value = load().await?;
        self.insert(key, value.clone()).await;
        Ok(value)
    }
}

/// Read-through cache in front of a [`MetadataSource`].
///
/// Misses are cached too, so an unknown id costs one query per TTL. Errors
/// are never cached.
pub struct CachedMetadata<S> {
    inner: S,
    problems: TtlCache<u32, Option<ResourceMetadata>>,
    contests: TtlCache<u32, Option<ResourceMetadata>>,
    topics: TtlCache<u32, Option<ResourceMetadata>>,
    contest_problems: TtlCache<(u32, i32), Option<u32>>,
    topic_problems: TtlCache<(u32, i32), Option<u32>>,
    windows: TtlCache<u32, Vec<ScheduleWindow>>,
    templates: TtlCache<(u32, u32), Vec<Template>>,
}

impl<S: MetadataSource> CachedMetadata<S> {
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        let ttl = config.ttl();
        let capacity = config.capacity;
        Self {
            inner,
            problems: TtlCache::new(ttl, capacity),
            contests: TtlCache::new(ttl, capacity),
            topics: TtlCache::new(ttl, capacity),
            contest_problems: TtlCache::new(ttl, capacity),
            topic_problems: TtlCache::new(ttl, capacity),
            windows: TtlCache::new(ttl, capacity),
            templates: TtlCache::new(ttl, capacity),
        }
    }
}

#[async_trait]
impl<S: MetadataSource> MetadataSource for CachedMetadata<S> {
    async fn problem(&self, problem_id: u32) -> Result<Option<ResourceMetadata>, DbErr> {
        self.problems
            .get_or_try_load(problem_id, || self.inner.problem(problem_id))
            .await
    }

    async fn contest(&self, contest_id: u32) -> Result<Option<ResourceMetadata>, DbErr> {
        self.contests
            .get_or_try_load(contest_id, || self.inner.contest(contest_id))
            .await
    }

    async fn topic(&self, topic_id: u32) -> Result<Option<ResourceMetadata>, DbErr> {
        self.topics
            .get_or_try_load(topic_id, || self.inner.topic(topic_id))
            .await
    }

    async fn contest_problem(&self, contest_id: u32, num: i32) -> Result<Option<u32>, DbErr> {
        self.contest_problems
            .get_or_try_load((contest_id, num), || {
                self.inner.contest_problem(contest_id, num)
            })
            .await
    }

    async fn topic_problem(&self, topic_id: u32, num: i32) -> Result<Option<u32>, DbErr> {
        self.topic_problems
            .get_or_try_load((topic_id, num), || self.inner.topic_problem(topic_id, num))
            .await
    }

    async fn contest_windows_for_problem(
        &self,
        problem_id: u32,
    ) -> Result<Vec<ScheduleWindow>, DbErr> {
        self.windows
            .get_or_try_load(problem_id, || {
                self.inner.contest_windows_for_problem(problem_id)
            })
            .await
    }

    async fn templates(&self, problem_id: u32, language: u32) -> Result<Vec<Template>, DbErr> {
        self.templates
            .get_or_try_load((problem_id, language), || {
                self.inner.templates(problem_id, language)
            })
            .await
    }
}

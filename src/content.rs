use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::api::ContentProvider;
use crate::api::types::{ContentBlock, PostSummary};
use crate::cache::TtlCache;

/// Store key for the post summary list.
pub const POSTS_CACHE_KEY: &str = "posts";
/// Store key prefix for per-post block sequences.
pub const CONTENT_KEY_PREFIX: &str = "content:";

/// The post list rarely changes; five minutes of reuse.
pub const POSTS_MAX_AGE_MS: u64 = 300_000;
/// Post bodies change even less; ten minutes.
pub const CONTENT_MAX_AGE_MS: u64 = 600_000;

pub fn content_key(post_id: &str) -> String {
    format!("{CONTENT_KEY_PREFIX}{post_id}")
}

// ---------------------------------------------------------------------------
// Fallback posts
// ---------------------------------------------------------------------------

/// Fixed list shown when the provider is unreachable or returns nothing.
/// Never cached, so a later call still attempts the network.
pub fn fallback_posts() -> Vec<PostSummary> {
    vec![
        PostSummary {
            id: "1".to_string(),
            title: "On minimalism and restraint".to_string(),
            date: "Dec 2024".to_string(),
            preview: "Less is not just more—it is everything that matters, distilled."
                .to_string(),
        },
        PostSummary {
            id: "2".to_string(),
            title: "The space between".to_string(),
            date: "Nov 2024".to_string(),
            preview: "White space is not empty. It is where the mind rests and meaning emerges."
                .to_string(),
        },
        PostSummary {
            id: "3".to_string(),
            title: "Form follows function".to_string(),
            date: "Oct 2024".to_string(),
            preview: "Every element must justify its existence, or it is clutter.".to_string(),
        },
    ]
}

// ---------------------------------------------------------------------------
// Content service
// ---------------------------------------------------------------------------

/// Prefetched block sequences plus the in-flight marker that keeps two
/// overlapping prefetches for the same id from fetching twice.
#[derive(Default)]
struct PrefetchPool {
    ready: HashMap<String, Vec<ContentBlock>>,
    pending: HashSet<String>,
}

/// Mediates between the UI and the content provider: TTL-cached post list
/// with a fixed fallback, per-post content resolved prefetch-first, and
/// fire-and-forget prefetching.
///
/// Everything here is infallible from the caller's point of view; provider
/// and storage failures degrade to fallback or empty results per the logs.
/// Cloning is cheap and clones share all state.
#[derive(Clone)]
pub struct ContentService {
    provider: Arc<dyn ContentProvider>,
    cache: Arc<TtlCache>,
    pool: Arc<Mutex<PrefetchPool>>,
}

impl ContentService {
    pub fn new(provider: Arc<dyn ContentProvider>, cache: TtlCache) -> Self {
        Self {
            provider,
            cache: Arc::new(cache),
            pool: Arc::new(Mutex::new(PrefetchPool::default())),
        }
    }

    // ---- post list ----

    /// The cached post list, if one is fresh.
    pub fn posts_from_cache(&self) -> Option<Vec<PostSummary>> {
        self.cache.read(POSTS_CACHE_KEY, POSTS_MAX_AGE_MS)
    }

    /// Fetch the post list from the provider. A non-empty result is cached
    /// and returned; failure or an empty result yields the fallback list,
    /// flagged, and leaves the cache untouched.
    pub async fn fetch_posts(&self) -> (Vec<PostSummary>, bool) {
        match self.provider.list_posts().await {
            Ok(posts) if !posts.is_empty() => {
                self.cache.write(POSTS_CACHE_KEY, &posts);
                (posts, false)
            }
            Ok(_) => {
                debug!("provider returned an empty post list, using fallback");
                (fallback_posts(), true)
            }
            Err(err) => {
                warn!("post list fetch failed: {err}");
                (fallback_posts(), true)
            }
        }
    }

    /// Cache, then network, then fallback.
    pub async fn load_posts(&self) -> (Vec<PostSummary>, bool) {
        if let Some(posts) = self.posts_from_cache() {
            return (posts, false);
        }
        self.fetch_posts().await
    }

    // ---- post content ----

    /// Resolve content without the network: prefetch table first, then a
    /// fresh cache entry. A table hit is persisted on the way out if the
    /// store has no entry for it yet (a prefetch whose cache write failed
    /// gets a second chance; an existing entry keeps its timestamp).
    pub fn content_from_local(&self, post_id: &str) -> Option<Vec<ContentBlock>> {
        let key = content_key(post_id);
        let ready = self.pool.lock().ready.get(post_id).cloned();
        if let Some(blocks) = ready {
            if !self.cache.contains(&key) {
                self.cache.write(&key, &blocks);
            }
            return Some(blocks);
        }
        self.cache.read(&key, CONTENT_MAX_AGE_MS)
    }

    /// Fetch one post's blocks from the provider. Non-empty results are
    /// cached. Failure and empty both come back as an empty sequence: the
    /// caller renders a "no content" state, not an error.
    pub async fn fetch_content(&self, post_id: &str) -> Vec<ContentBlock> {
        match self.provider.post_blocks(post_id).await {
            Ok(blocks) => {
                if !blocks.is_empty() {
                    self.cache.write(&content_key(post_id), &blocks);
                }
                blocks
            }
            Err(err) => {
                warn!("content fetch for {post_id} failed: {err}");
                Vec::new()
            }
        }
    }

    /// Prefetch table, then cache, then network.
    pub async fn load_content(&self, post_id: &str) -> Vec<ContentBlock> {
        if let Some(blocks) = self.content_from_local(post_id) {
            return blocks;
        }
        self.fetch_content(post_id).await
    }

    // ---- prefetch ----

    /// Warm the prefetch table and cache for `post_id` ahead of navigation.
    /// No-op when the table already holds the id or a fetch for it is in
    /// flight. A fresh cache entry is copied in without touching the
    /// network. On failure or empty result nothing is recorded, so a later
    /// `load_content` retries.
    pub async fn prefetch(&self, post_id: &str) {
        {
            let mut pool = self.pool.lock();
            if pool.ready.contains_key(post_id) || pool.pending.contains(post_id) {
                return;
            }
            if let Some(blocks) = self
                .cache
                .read::<Vec<ContentBlock>>(&content_key(post_id), CONTENT_MAX_AGE_MS)
            {
                pool.ready.insert(post_id.to_string(), blocks);
                return;
            }
            pool.pending.insert(post_id.to_string());
        }

        let blocks = match self.provider.post_blocks(post_id).await {
            Ok(blocks) => blocks,
            Err(err) => {
                debug!("prefetch for {post_id} failed: {err}");
                Vec::new()
            }
        };

        {
            let mut pool = self.pool.lock();
            pool.pending.remove(post_id);
            if blocks.is_empty() {
                return;
            }
            pool.ready.insert(post_id.to_string(), blocks.clone());
        }
        self.cache.write(&content_key(post_id), &blocks);
    }
}

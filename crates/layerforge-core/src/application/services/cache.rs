//! TTL cache for analyses.
//!
//! Keys are the SHA-256 hex digest of the normalized description plus the
//! request hints that change the outcome (forced layer, name, naming
//! prefix/suffix, caller features). Expired entries are dropped when they are looked up;
//! nothing sweeps the map proactively.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use tracing::{debug, trace};

use crate::application::{
    ports::{Clock, SystemClock},
    services::AnalysisRequest,
};
use crate::domain::{LayerAnalysis, text};

/// Default time-to-live: five minutes.
pub const DEFAULT_TTL_SECS: i64 = 300;

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: String,
    pub analysis: LayerAnalysis,
    pub stored_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

pub struct AnalysisCache {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for AnalysisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisCache")
            .field("entries", &self.entries.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_TTL_SECS), Arc::new(SystemClock))
    }
}

impl AnalysisCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            clock,
        }
    }

    /// Cached analysis for `request`, if present and not expired.
    pub fn get(&mut self, request: &AnalysisRequest) -> Option<LayerAnalysis> {
        let key = cache_key(request);
        let now = self.clock.now();
        match self.entries.get(&key) {
            Some(entry) if entry.expires_at > now => {
                debug!(key = %short(&key), "analysis cache hit");
                Some(entry.analysis.clone())
            }
            Some(_) => {
                trace!(key = %short(&key), "analysis cache entry expired");
                self.entries.remove(&key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&mut self, request: &AnalysisRequest, analysis: LayerAnalysis) {
        let key = cache_key(request);
        let stored_at = self.clock.now();
        let entry = CacheEntry {
            key: key.clone(),
            analysis,
            stored_at,
            expires_at: stored_at + self.ttl,
        };
        self.entries.insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Hex SHA-256 of the normalized description and outcome-relevant hints.
pub fn cache_key(request: &AnalysisRequest) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text::normalize(&request.description).as_bytes());
    if let Some(layer) = request.layer {
        hasher.update(b"\0layer=");
        hasher.update(layer.as_str().as_bytes());
    }
    if let Some(name) = &request.name {
        hasher.update(b"\0name=");
        hasher.update(name.trim().as_bytes());
    }
    if let Some(prefix) = &request.naming.prefix {
        hasher.update(b"\0prefix=");
        hasher.update(prefix.as_bytes());
    }
    if let Some(suffix) = &request.naming.suffix {
        hasher.update(b"\0suffix=");
        hasher.update(suffix.as_bytes());
    }
    let features: BTreeSet<String> = request
        .features
        .iter()
        .map(|f| text::normalize(f))
        .filter(|f| !f.is_empty())
        .collect();
    for feature in &features {
        hasher.update(b"\0feature=");
        hasher.update(feature.as_bytes());
    }
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

fn short(key: &str) -> &str {
    &key[..key.len().min(12)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::domain::LayerType;

    struct StepClock(Mutex<DateTime<Utc>>);

    impl StepClock {
        fn advance(&self, secs: i64) {
            let mut now = self.0.lock().unwrap();
            *now += Duration::seconds(secs);
        }
    }

    impl Clock for StepClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn setup() -> (Arc<StepClock>, AnalysisCache) {
        let clock = Arc::new(StepClock(Mutex::new(Utc::now())));
        let cache = AnalysisCache::new(Duration::seconds(60), clock.clone());
        (clock, cache)
    }

    #[test]
    fn keys_ignore_accents_and_case() {
        let a = cache_key(&AnalysisRequest::new("Um Botão"));
        let b = cache_key(&AnalysisRequest::new("um botao"));
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);

        let mut forced = AnalysisRequest::new("um botao");
        forced.layer = Some(LayerType::Molecule);
        assert_ne!(cache_key(&forced), a);
    }

    #[test]
    fn keys_cover_features_regardless_of_order() {
        let plain = cache_key(&AnalysisRequest::new("um botao"));
        let mut one = AnalysisRequest::new("um botao");
        one.features = vec!["Modal".into(), "lista".into()];
        let mut two = AnalysisRequest::new("um botao");
        two.features = vec!["lista".into(), "modal".into(), "modal".into()];

        assert_ne!(cache_key(&one), plain);
        assert_eq!(cache_key(&one), cache_key(&two));
    }

    #[test]
    fn entries_expire_lazily() {
        let (clock, mut cache) = setup();
        let req = AnalysisRequest::new("um botao");
        cache.insert(&req, LayerAnalysis::new(LayerType::Atom, "button", 0.9));

        clock.advance(59);
        assert!(cache.get(&req).is_some());
        assert_eq!(cache.len(), 1);

        clock.advance(1);
        assert!(cache.get(&req).is_none());
        assert!(cache.is_empty());
    }
}

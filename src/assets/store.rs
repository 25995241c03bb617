use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use image::RgbaImage;
use parking_lot::{Mutex, RwLock};

use crate::assets::decode::{decode_fill, decode_sprite};
use crate::assets::resolver::{AssetKey, AssetResolver};
use crate::assets::source::AssetSource;
use crate::foundation::error::{DiagramError, DiagramResult};
use crate::position::grid::BOARD_CELLS;

/// Per-key mutual exclusion: closures for the same key run one at a time, different keys run in
/// parallel. A key's gate is dropped once no caller holds or waits on it.
pub(crate) struct KeyedGate<K> {
    gates: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K> Default for KeyedGate<K> {
    fn default() -> Self {
        Self {
            gates: Mutex::new(HashMap::new()),
        }
    }
}

impl<K: Clone + Eq + Hash> KeyedGate<K> {
    pub(crate) fn run<T>(&self, key: &K, f: impl FnOnce() -> T) -> T {
        let gate = {
            let mut gates = self.gates.lock();
            Arc::clone(gates.entry(key.clone()).or_default())
        };
        let out = {
            let _held = gate.lock();
            f()
        };

        let mut gates = self.gates.lock();
        // map entry plus our clone; a waiter holds a third reference and removes it later
        if Arc::strong_count(&gate) == 2 {
            gates.remove(key);
        }
        drop(gate);
        out
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.gates.lock().len()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct SpriteKey {
    asset: AssetKey,
    cell_size: u32,
}

/// In-process cache of decoded, scaled images in front of an [`AssetSource`].
///
/// Each `(asset, cell size)` pair is fetched and decoded at most once, even under concurrent
/// first requests. Entries are never evicted.
pub struct AssetStore<S> {
    source: S,
    cache: RwLock<HashMap<SpriteKey, Arc<RgbaImage>>>,
    gates: KeyedGate<SpriteKey>,
    loads: AtomicUsize,
}

impl<S: AssetSource> AssetStore<S> {
    /// Empty store over `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
            gates: KeyedGate::default(),
            loads: AtomicUsize::new(0),
        }
    }

    /// Underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Number of fetch+decode operations performed so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    /// Number of cached images.
    pub fn cached_len(&self) -> usize {
        self.cache.read().len()
    }

    fn get_or_load(
        &self,
        key: SpriteKey,
        decode: impl FnOnce(&S) -> anyhow::Result<RgbaImage>,
    ) -> DiagramResult<Arc<RgbaImage>> {
        if let Some(hit) = self.cache.read().get(&key) {
            return Ok(Arc::clone(hit));
        }

        self.gates.run(&key, || {
            if let Some(hit) = self.cache.read().get(&key) {
                return Ok(Arc::clone(hit));
            }
            tracing::debug!(asset = %key.asset, cell_size = key.cell_size, "asset cache miss");
            self.loads.fetch_add(1, Ordering::Relaxed);
            let img = decode(&self.source)
                .map_err(|e| DiagramError::asset(key.asset.to_string(), format!("{e:#}")))?;
            let img = Arc::new(img);
            self.cache.write().insert(key.clone(), Arc::clone(&img));
            Ok(img)
        })
    }
}

impl<S: AssetSource> AssetResolver for AssetStore<S> {
    fn piece(&self, code: &str, theme: &str, cell_size: u32) -> DiagramResult<Arc<RgbaImage>> {
        let asset = AssetKey::piece(theme, code);
        let key = SpriteKey {
            asset: asset.clone(),
            cell_size,
        };
        self.get_or_load(key, |src| {
            let bytes = src.fetch(&asset)?;
            decode_sprite(&bytes, cell_size)
        })
    }

    fn board_texture(&self, texture: &str, cell_size: u32) -> DiagramResult<Arc<RgbaImage>> {
        let asset = AssetKey::texture(texture);
        let key = SpriteKey {
            asset: asset.clone(),
            cell_size,
        };
        let side = cell_size.saturating_mul(BOARD_CELLS as u32);
        self.get_or_load(key, |src| {
            let bytes = src.fetch(&asset)?;
            decode_fill(&bytes, side, side)
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;

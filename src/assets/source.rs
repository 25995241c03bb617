use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Context;

use crate::assets::resolver::{AssetKey, normalize_rel_path};
use crate::assets::store::KeyedGate;

/// Encoding family of source bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetFormat {
    /// SVG document, rasterized with resvg.
    Svg,
    /// Any raster format the `image` crate can sniff (PNG, JPEG, ...).
    Raster,
}

impl AssetFormat {
    fn cache_ext(self) -> &'static str {
        match self {
            AssetFormat::Svg => "svg",
            AssetFormat::Raster => "img",
        }
    }
}

/// Encoded asset bytes plus their format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceBytes {
    /// Encoded bytes.
    pub bytes: Vec<u8>,
    /// How to decode them.
    pub format: AssetFormat,
}

impl SourceBytes {
    /// Raster bytes.
    pub fn raster(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            format: AssetFormat::Raster,
        }
    }

    /// SVG bytes.
    pub fn svg(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            format: AssetFormat::Svg,
        }
    }
}

/// Where encoded asset bytes come from (bundled directory, memory, remote service, ...).
pub trait AssetSource: Send + Sync {
    /// Fetch the encoded bytes for `key`.
    fn fetch(&self, key: &AssetKey) -> anyhow::Result<SourceBytes>;
}

/// Bundled assets laid out as `pieces/<theme>/<code>.<ext>` and `textures/<name>.<ext>`.
#[derive(Clone, Debug)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Extensions probed in order.
    pub const EXTENSIONS: [(&'static str, AssetFormat); 4] = [
        ("svg", AssetFormat::Svg),
        ("png", AssetFormat::Raster),
        ("jpg", AssetFormat::Raster),
        ("jpeg", AssetFormat::Raster),
    ];

    /// Serve assets from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirSource {
    fn fetch(&self, key: &AssetKey) -> anyhow::Result<SourceBytes> {
        let rel = normalize_rel_path(&key.rel_path())?;
        for (ext, format) in Self::EXTENSIONS {
            let path = self.root.join(format!("{rel}.{ext}"));
            if path.is_file() {
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("read asset bytes from '{}'", path.display()))?;
                return Ok(SourceBytes { bytes, format });
            }
        }
        anyhow::bail!("no file for '{rel}' under '{}'", self.root.display())
    }
}

/// In-memory assets, e.g. compiled in with `include_bytes!`.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    assets: HashMap<AssetKey, SourceBytes>,
}

impl MemorySource {
    /// Empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the bytes for `key`.
    pub fn insert(&mut self, key: AssetKey, bytes: SourceBytes) {
        self.assets.insert(key, bytes);
    }

    /// Builder-style [`MemorySource::insert`].
    pub fn with(mut self, key: AssetKey, bytes: SourceBytes) -> Self {
        self.insert(key, bytes);
        self
    }

    /// Number of registered assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl AssetSource for MemorySource {
    fn fetch(&self, key: &AssetKey) -> anyhow::Result<SourceBytes> {
        self.assets
            .get(key)
            .cloned()
            .with_context(|| format!("no in-memory asset '{key}'"))
    }
}

/// Persists bytes fetched from a slower source (typically remote) in a cache directory.
///
/// Files are written to a temporary file and atomically renamed into place, and at most one
/// fetch per key is in flight, so concurrent first requests never produce a torn file.
pub struct DiskCachedSource<S> {
    inner: S,
    dir: PathBuf,
    gates: KeyedGate<AssetKey>,
    inner_fetches: AtomicUsize,
}

impl<S: AssetSource> DiskCachedSource<S> {
    /// Cache `inner` under `dir` (created on first write).
    pub fn new(inner: S, dir: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            dir: dir.into(),
            gates: KeyedGate::default(),
            inner_fetches: AtomicUsize::new(0),
        }
    }

    /// Cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// How many times the inner source has been called.
    pub fn inner_fetches(&self) -> usize {
        self.inner_fetches.load(Ordering::Relaxed)
    }

    fn cache_path(&self, key: &AssetKey, format: AssetFormat) -> PathBuf {
        self.dir
            .join(format!("{:016x}.{}", key.hash_id(), format.cache_ext()))
    }

    fn read_cached(&self, key: &AssetKey) -> anyhow::Result<Option<SourceBytes>> {
        for format in [AssetFormat::Svg, AssetFormat::Raster] {
            let path = self.cache_path(key, format);
            if path.is_file() {
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("read cached asset '{}'", path.display()))?;
                return Ok(Some(SourceBytes { bytes, format }));
            }
        }
        Ok(None)
    }

    fn write_cached(&self, key: &AssetKey, src: &SourceBytes) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create cache dir '{}'", self.dir.display()))?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)
            .with_context(|| format!("create temp file in '{}'", self.dir.display()))?;
        tmp.write_all(&src.bytes).context("write cached asset")?;
        let path = self.cache_path(key, src.format);
        tmp.persist(&path)
            .map_err(|e| e.error)
            .with_context(|| format!("persist cached asset '{}'", path.display()))?;
        Ok(())
    }
}

impl<S: AssetSource> AssetSource for DiskCachedSource<S> {
    fn fetch(&self, key: &AssetKey) -> anyhow::Result<SourceBytes> {
        if let Some(hit) = self.read_cached(key)? {
            return Ok(hit);
        }

        self.gates.run(key, || {
            if let Some(hit) = self.read_cached(key)? {
                return Ok(hit);
            }
            tracing::debug!(%key, "disk cache miss, fetching");
            self.inner_fetches.fetch_add(1, Ordering::Relaxed);
            let fetched = self.inner.fetch(key)?;
            self.write_cached(key, &fetched)?;
            Ok(fetched)
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;

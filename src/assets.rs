use std::{collections::HashMap, path::PathBuf};

use anyhow::Context as _;
use image::RgbaImage;

use crate::{
    board::Piece,
    error::{ChessgifError, ChessgifResult},
};

/// Source of piece sprites for the board canvas.
///
/// The renderer only ever reads sprites through this trait, so tests can
/// substitute an in-memory provider and render without filesystem access.
pub trait SpriteProvider {
    fn sprite(&mut self, piece: Piece) -> ChessgifResult<&RgbaImage>;
}

/// Filesystem sprite cache.
///
/// Explicitly constructed with a root directory and passed into the
/// renderer. The first lookup scans the directory once, decoding every
/// regular file and keying it by file stem ("wp", "bk", ...); later lookups
/// are pure reads. There is no eviction; the cache lives as long as its
/// owner and is reused across renders.
pub struct FsSpriteCache {
    root: PathBuf,
    sprites: HashMap<String, RgbaImage>,
    scanned: bool,
}

impl FsSpriteCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sprites: HashMap::new(),
            scanned: false,
        }
    }

    /// Number of sprites loaded so far (zero before the first lookup).
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    fn scan(&mut self) -> ChessgifResult<()> {
        let entries = std::fs::read_dir(&self.root)
            .with_context(|| format!("scan sprite directory '{}'", self.root.display()))?;

        for entry in entries {
            let entry = entry
                .with_context(|| format!("read sprite directory '{}'", self.root.display()))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned())
            else {
                continue;
            };
            let img = image::open(&path)
                .with_context(|| format!("decode sprite '{}'", path.display()))?
                .to_rgba8();
            self.sprites.insert(stem, img);
        }

        self.scanned = true;
        tracing::debug!(
            root = %self.root.display(),
            sprites = self.sprites.len(),
            "scanned sprite directory"
        );
        Ok(())
    }
}

impl SpriteProvider for FsSpriteCache {
    fn sprite(&mut self, piece: Piece) -> ChessgifResult<&RgbaImage> {
        if !self.scanned {
            self.scan()?;
        }
        let stem = piece.sprite_stem();
        self.sprites
            .get(stem)
            .ok_or_else(|| ChessgifError::asset_missing(stem))
    }
}

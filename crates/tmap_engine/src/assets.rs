//! Tile image lookup
//!
//! Map files store tile and animation paths relative to a project root, with
//! forward slashes and a `./` or `../` prefix. [`AssetResolver`] turns them back
//! into filesystem paths, [`ImageProvider`] loads the pixels.
//!
//! Resolution order:
//! 1. the configured root directory
//! 2. the directory of the map file (portable exports)
//! 3. the program install directory
//! 4. any configured fallback directories
//!
//! The first existing candidate wins. If none exists the root candidate is returned.

use std::path::{Component, Path, PathBuf};

use crate::{EngineError, MapDocument, Result, Size};

/// Decoded RGBA8 image
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Source of tile and animation frame images
pub trait ImageProvider {
    /// Loads the image at `path`. Fails with [`EngineError::MissingAsset`] if absent.
    fn load_image(&self, path: &Path) -> Result<TileImage>;
}

/// Loads images from disk with the `image` crate
#[derive(Clone, Copy, Debug, Default)]
pub struct FsImageProvider;

impl ImageProvider for FsImageProvider {
    fn load_image(&self, path: &Path) -> Result<TileImage> {
        if !path.is_file() {
            return Err(EngineError::MissingAsset { path: path.to_path_buf() });
        }
        let image = image::open(path)?.to_rgba8();
        Ok(TileImage {
            width: image.width(),
            height: image.height(),
            pixels: image.into_raw(),
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct AssetResolver {
    root_dir: PathBuf,
    map_dir: Option<PathBuf>,
    install_dir: Option<PathBuf>,
    fallback_dirs: Vec<PathBuf>,
}

impl AssetResolver {
    /// Resolver rooted at `root_dir`, with the running executable's directory as install dir.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        let install_dir = std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf));
        Self {
            root_dir: root_dir.into(),
            map_dir: None,
            install_dir,
            fallback_dirs: Vec::new(),
        }
    }

    /// Adds the directory containing `map_file` as second candidate
    pub fn with_map_file(mut self, map_file: &Path) -> Self {
        self.map_dir = map_file.parent().map(Path::to_path_buf);
        self
    }

    pub fn with_install_dir(mut self, install_dir: Option<PathBuf>) -> Self {
        self.install_dir = install_dir;
        self
    }

    pub fn with_fallback_dirs(mut self, dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        self.fallback_dirs.extend(dirs);
        self
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Candidate locations for a stored path, in lookup order
    pub fn candidates(&self, stored: &str) -> Vec<PathBuf> {
        let native = Path::new(stored);
        if native.is_absolute() {
            return vec![native.to_path_buf()];
        }
        let relative = stored.strip_prefix("./").unwrap_or(stored);
        std::iter::once(&self.root_dir)
            .chain(self.map_dir.iter())
            .chain(self.install_dir.iter())
            .chain(self.fallback_dirs.iter())
            .map(|dir| dir.join(relative))
            .collect()
    }

    pub fn resolve(&self, stored: &str) -> PathBuf {
        let candidates = self.candidates(stored);
        if let Some(found) = candidates.iter().find(|c| c.exists()) {
            return found.clone();
        }
        log::debug!("asset {stored} not found, defaulting to root");
        candidates.into_iter().next().unwrap_or_else(|| self.root_dir.join(stored))
    }

    /// Directory holding the frames of an animation
    pub fn resolve_folder(&self, folder: &str) -> PathBuf {
        self.resolve(folder.trim_end_matches('/'))
    }
}

/// Converts a path to the stored form: forward slashes, `./` or `../` prefix.
/// Absolute paths only get their separators normalized.
pub fn normalize_tile_path(path: &str) -> String {
    let path = path.trim().replace('\\', "/");
    if path == "." {
        return "./".to_string();
    }
    if path.starts_with("./") || path.starts_with("../") || path.starts_with('/') || Path::new(&path).is_absolute() {
        return path;
    }
    format!("./{path}")
}

/// Path of `target` relative to `base` in stored form, `None` if the two share no root
pub fn relative_tile_path(target: &Path, base: &Path) -> Option<String> {
    let target: Vec<Component> = target.components().filter(|c| *c != Component::CurDir).collect();
    let base: Vec<Component> = base.components().filter(|c| *c != Component::CurDir).collect();
    if target.first() != base.first() {
        return None;
    }

    let common = target.iter().zip(&base).take_while(|(a, b)| a == b).count();
    let mut parts: Vec<String> = base[common..].iter().map(|_| "..".to_string()).collect();
    for component in &target[common..] {
        parts.push(component.as_os_str().to_string_lossy().into_owned());
    }
    if parts.is_empty() {
        return Some("./".to_string());
    }
    Some(normalize_tile_path(&parts.join("/")))
}

fn check_image_size(path: &Path, image: &TileImage, expected: Size) -> Result<()> {
    let expected = (expected.width as u32, expected.height as u32);
    if (image.width, image.height) != expected {
        return Err(EngineError::AssetSizeMismatch {
            path: path.to_path_buf(),
            expected,
            actual: (image.width, image.height),
        });
    }
    Ok(())
}

/// Loads one tile image and checks it against the document tile size
pub fn load_tile_image(doc: &MapDocument, resolver: &AssetResolver, provider: &dyn ImageProvider, tile: u32) -> Result<TileImage> {
    let stored = doc.tile_path(tile).ok_or(EngineError::TileOutOfRange {
        tile,
        count: doc.tile_count(),
    })?;
    let path = resolver.resolve(stored);
    let image = provider.load_image(&path)?;
    check_image_size(&path, &image, doc.tile_size())?;
    Ok(image)
}

/// Loads all tile images in id order
pub fn load_tile_images(doc: &MapDocument, resolver: &AssetResolver, provider: &dyn ImageProvider) -> Result<Vec<TileImage>> {
    (0..doc.tile_count() as u32).map(|tile| load_tile_image(doc, resolver, provider, tile)).collect()
}

/// Loads the frames `1.png..=frame_count.png` of a tile animation
pub fn load_animation_frames(doc: &MapDocument, resolver: &AssetResolver, provider: &dyn ImageProvider, tile: u32) -> Result<Vec<TileImage>> {
    let Some(animation) = doc.animation(tile) else {
        return Ok(Vec::new());
    };
    let folder = resolver.resolve_folder(&animation.folder);
    let mut frames = Vec::with_capacity(animation.frame_count as usize);
    for frame in 1..=animation.frame_count {
        let path = folder.join(format!("{frame}.png"));
        let image = provider.load_image(&path)?;
        check_image_size(&path, &image, doc.tile_size())?;
        frames.push(image);
    }
    Ok(frames)
}

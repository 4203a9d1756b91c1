use std::fs;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::error::CatalogError;

/// Committed thumbnails are bounded to this footprint, aspect ratio kept.
const THUMB_WIDTH: u32 = 300;
const THUMB_HEIGHT: u32 = 200;

const PLACEHOLDER_NAME: &str = "placeholder.png";

static ASSET_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^product_\d+\.(jpg|jpeg|png|bmp|gif)$").unwrap());

fn is_supported_image(path: &Path) -> bool {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.type_() == mime_guess::mime::IMAGE)
        .unwrap_or(false)
}

/// A validated source image that has not been written to the asset store yet.
#[derive(Debug)]
pub struct StagedAsset {
    image: DynamicImage,
    extension: String,
}

/// Owns one directory of product images named `product_<id>.<ext>` plus a
/// static placeholder. Mutations here are best-effort by design: a failed
/// file cleanup is logged and swallowed, never surfaced past a product save,
/// because the database row is the source of truth for which asset is
/// current.
pub struct ImageAssetManager {
    root: PathBuf,
}

impl ImageAssetManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let root = std::env::var("ASSETS_DIR").unwrap_or_else(|_| "./assets".to_owned());
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validates that `source` is a readable image. Nothing is written; the
    /// decoded pixels are kept so commit does not have to re-read the file.
    pub fn stage(&self, source: &Path) -> Result<StagedAsset, CatalogError> {
        if !is_supported_image(source) {
            return Err(CatalogError::InvalidImage(format!(
                "{} does not look like an image file",
                source.display()
            )));
        }

        let extension = source
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .ok_or_else(|| {
                CatalogError::InvalidImage(format!("{} has no extension", source.display()))
            })?;

        let image = image::open(source)
            .map_err(|err| CatalogError::InvalidImage(err.to_string()))?;

        Ok(StagedAsset { image, extension })
    }

    /// Writes the staged image under its final id-derived name and returns
    /// the relative name to persist on the product row.
    pub fn commit(&self, staged: &StagedAsset, product_id: i32) -> Result<String, CatalogError> {
        fs::create_dir_all(&self.root)
            .map_err(|err| CatalogError::StoreUnavailable(format!("asset store: {err}")))?;

        let name = format!("product_{}.{}", product_id, staged.extension);
        let thumb = staged.image.thumbnail(THUMB_WIDTH, THUMB_HEIGHT);
        thumb
            .save(self.root.join(&name))
            .map_err(|err| CatalogError::StoreUnavailable(format!("asset store: {err}")))?;

        info!(%name, "committed product image");
        Ok(name)
    }

    /// Drops the previous asset after a successful re-commit, unless the new
    /// commit landed on the same name.
    pub fn replace(&self, old: Option<&str>, new_name: &str) {
        if let Some(old) = old {
            if old != new_name {
                self.remove(old);
            }
        }
    }

    /// Best-effort removal of the file backing a deleted product. Only names
    /// matching the managed scheme are touched.
    pub fn remove(&self, name: &str) {
        if !ASSET_NAME_REGEX.is_match(name) {
            warn!(%name, "refusing to remove file outside the asset scheme");
            return;
        }
        if let Err(err) = fs::remove_file(self.root.join(name)) {
            warn!(%name, %err, "failed to remove asset file");
        }
    }

    pub fn placeholder(&self) -> PathBuf {
        self.root.join(PLACEHOLDER_NAME)
    }

    /// Resolves a product's image reference to a path the presentation can
    /// load. Missing or unreadable files fall back to the placeholder; this
    /// path never fails.
    pub fn resolve(&self, image: Option<&str>) -> PathBuf {
        match image {
            Some(name) => {
                let path = self.root.join(name);
                if image::open(&path).is_ok() {
                    path
                } else {
                    self.placeholder()
                }
            }
            None => self.placeholder(),
        }
    }
}

//! Embedded assets with content-hash fingerprinted filenames.
//!
//! Embedded css/js ships inside the binary and is written to the output
//! under `/.folio/<name>-<hash>.<ext>`. The hash covers the rendered
//! content (template variables included), so a changed stylesheet or a
//! different WebSocket port produces a new filename and busts any cache.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::template::TemplateVars;

/// Subdirectory of the output holding embedded assets.
pub const EMBED_DIR: &str = ".folio";

/// Hex characters of the blake3 fingerprint kept in filenames.
const FINGERPRINT_LEN: usize = 8;

/// Kind of embedded asset (determines extension and tag rendering).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Css,
    JavaScript,
}

impl AssetKind {
    const fn extension(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::JavaScript => "js",
        }
    }
}

/// A static asset embedded in the binary.
pub struct EmbeddedAsset<V> {
    kind: AssetKind,
    /// Base name without extension (e.g. "site").
    name: &'static str,
    content: &'static str,
    _marker: std::marker::PhantomData<V>,
}

impl<V: TemplateVars> EmbeddedAsset<V> {
    pub const fn new(kind: AssetKind, name: &'static str, content: &'static str) -> Self {
        Self {
            kind,
            name,
            content,
            _marker: std::marker::PhantomData,
        }
    }

    /// Render content with variables applied.
    pub fn render(&self, vars: &V) -> String {
        vars.apply(self.content)
    }

    /// Content fingerprint for the given variables.
    fn fingerprint(&self, vars: &V) -> String {
        let hash_input = vars.hash_input();
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.content.as_bytes());
        hasher.update(hash_input.as_bytes());
        let hash = hasher.finalize();
        hex::encode(&hash.as_bytes()[..FINGERPRINT_LEN / 2])
    }

    /// Output filename, e.g. `site-a1b2c3d4.css`.
    pub fn filename_with_vars(&self, vars: &V) -> String {
        format!(
            "{}-{}.{}",
            self.name,
            self.fingerprint(vars),
            self.kind.extension()
        )
    }

    /// Absolute URL path, e.g. `/.folio/site-a1b2c3d4.css`.
    pub fn url_path_with_vars(&self, vars: &V) -> String {
        format!("/{}/{}", EMBED_DIR, self.filename_with_vars(vars))
    }

    /// HTML tag referencing the asset by URL.
    pub fn external_tag_with_vars(&self, vars: &V) -> String {
        let url = self.url_path_with_vars(vars);
        match self.kind {
            AssetKind::Css => format!(r#"<link rel="stylesheet" href="{url}">"#),
            AssetKind::JavaScript => format!(r#"<script src="{url}" defer></script>"#),
        }
    }

    /// Write the rendered asset under the output directory.
    pub fn write_with_vars(&self, output_dir: &Path, vars: &V) -> Result<()> {
        let dir = output_dir.join(EMBED_DIR);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        let path = dir.join(self.filename_with_vars(vars));
        fs::write(&path, self.render(vars))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Remove stale fingerprints of this asset from the output directory.
    pub fn cleanup_old(&self, output_dir: &Path) -> Result<()> {
        let dir = output_dir.join(EMBED_DIR);
        if !dir.is_dir() {
            return Ok(());
        }

        let prefix = format!("{}-", self.name);
        let suffix = format!(".{}", self.kind.extension());

        for entry in fs::read_dir(&dir)?.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(&prefix) && name.ends_with(&suffix) {
                let _ = fs::remove_file(entry.path());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::template::NoVars;

    const TEST_CSS: EmbeddedAsset<NoVars> = EmbeddedAsset::new(AssetKind::Css, "test", "body{}");

    #[test]
    fn test_url_path_shape() {
        let url = TEST_CSS.url_path_with_vars(&NoVars);
        assert!(url.starts_with("/.folio/test-"));
        assert!(url.ends_with(".css"));
    }

    #[test]
    fn test_fingerprint_is_stable() {
        assert_eq!(
            TEST_CSS.filename_with_vars(&NoVars),
            TEST_CSS.filename_with_vars(&NoVars)
        );
    }

    #[test]
    fn test_external_tag() {
        let tag = TEST_CSS.external_tag_with_vars(&NoVars);
        assert!(tag.starts_with("<link rel=\"stylesheet\""));
    }

    #[test]
    fn test_write_and_cleanup() {
        let dir = tempfile::tempdir().unwrap();
        TEST_CSS.write_with_vars(dir.path(), &NoVars).unwrap();

        let written = dir
            .path()
            .join(EMBED_DIR)
            .join(TEST_CSS.filename_with_vars(&NoVars));
        assert!(written.is_file());

        TEST_CSS.cleanup_old(dir.path()).unwrap();
        assert!(!written.exists());
    }
}

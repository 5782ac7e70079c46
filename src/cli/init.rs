//! `folio init` - scaffold a new site.
//!
//! Creates folio.toml, the content directory (profile.toml + about.md),
//! and an empty assets directory. Refuses to overwrite existing files.

use std::fs;
use std::path::Path;

use anyhow::{Result, bail};

use crate::config::SiteConfig;
use crate::embed::init::{ABOUT_MD, FOLIO_TOML, PROFILE_TOML, ScaffoldVars};
use crate::log;

/// Create a new site under the config's root directory.
pub fn new_site(config: &SiteConfig) -> Result<()> {
    let root = config.get_root();

    if config.config_path.exists() {
        bail!(
            "{} already exists, refusing to overwrite",
            config.config_path.display()
        );
    }

    // The directory name doubles as the initial site title
    let title = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "My Portfolio".to_string());
    let vars = ScaffoldVars { title: &title };

    fs::create_dir_all(root)?;
    write_new(&config.config_path, &FOLIO_TOML.render(&vars))?;

    let content = root.join("content");
    fs::create_dir_all(&content)?;
    write_new(&content.join("profile.toml"), &PROFILE_TOML.render(&vars))?;
    write_new(&content.join("about.md"), &ABOUT_MD.render(&vars))?;

    fs::create_dir_all(root.join("assets"))?;

    log!("init"; "created new site in {}", root.display());
    log!("init"; "next: edit content/profile.toml, then run `folio serve`");
    Ok(())
}

/// Write a file only if it doesn't exist yet.
fn write_new(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        bail!("{} already exists, refusing to overwrite", path.display());
    }
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(root: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.set_root(root);
        config.config_path = root.join("folio.toml");
        config
    }

    #[test]
    fn test_init_scaffolds_site() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("my-portfolio");
        let config = config_for(&root);

        new_site(&config).unwrap();

        assert!(root.join("folio.toml").is_file());
        assert!(root.join("content/profile.toml").is_file());
        assert!(root.join("content/about.md").is_file());
        assert!(root.join("assets").is_dir());

        // Directory name became the title
        let toml = std::fs::read_to_string(root.join("folio.toml")).unwrap();
        assert!(toml.contains("my-portfolio"));
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();
        std::fs::write(root.join("folio.toml"), "existing").unwrap();

        let config = config_for(&root);
        assert!(new_site(&config).is_err());
        // Existing file untouched
        assert_eq!(
            std::fs::read_to_string(root.join("folio.toml")).unwrap(),
            "existing"
        );
    }
}

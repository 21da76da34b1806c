//! Writes figures and map fragments of composed views to disk

use crate::compose::{Block, ReportView};
use crate::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Files written for a report, keyed by asset name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WrittenAssets {
    paths: BTreeMap<String, PathBuf>,
}

impl WrittenAssets {
    pub fn insert<S: Into<String>>(&mut self, name: S, path: PathBuf) {
        self.paths.insert(name.into(), path);
    }

    pub fn path(&self, name: &str) -> Option<&Path> {
        self.paths.get(name).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.paths.iter().map(|(name, path)| (name.as_str(), path.as_path()))
    }
}

/// Decode every figure to `<name>.png` and save every non-empty map as `<name>.html`
pub fn write_assets(views: &[ReportView], dir: &Path) -> Result<WrittenAssets> {
    fs::create_dir_all(dir)?;
    let mut written = WrittenAssets::default();

    let blocks = views
        .iter()
        .flat_map(|view| view.sections.iter())
        .flat_map(|section| section.blocks.iter());

    for block in blocks {
        match block {
            Block::Figure { name, figure } if !figure.is_empty() => {
                let path = dir.join(format!("{}.png", name));
                fs::write(&path, figure.decode()?)?;
                debug!(path = %path.display(), "figure written");
                written.insert(name.as_str(), path);
            }
            Block::Map {
                name,
                fragment: Some(fragment),
            } => {
                let path = dir.join(format!("{}.html", name));
                fs::write(&path, fragment.as_str())?;
                debug!(path = %path.display(), "map written");
                written.insert(name.as_str(), path);
            }
            _ => {}
        }
    }

    info!(count = written.len(), dir = %dir.display(), "report assets written");
    Ok(written)
}

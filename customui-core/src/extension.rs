// customui-core/src/extension.rs
//! Widget declarations shipped by extensions as TOML manifests.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use serde::Deserialize;

use crate::normalize::WidgetCandidate;

#[derive(Debug, thiserror::Error)]
pub enum ExtensionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Manifest parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("File watcher error: {0}")]
    Watcher(#[from] notify::Error),
}

/// One extension's manifest
///
/// ```toml
/// name = "weather"
///
/// [[widgets]]
/// id = "weather-button"
/// type = "toolbar-button"
/// text = "Weather"
/// ```
///
/// Widget tables are validated at registration, not here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtensionManifest {
    /// Defaults to the manifest's file stem
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub widgets: Vec<toml::Table>,
}

impl ExtensionManifest {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Widget candidates in declaration order
    pub fn candidates(&self) -> Vec<WidgetCandidate> {
        self.widgets
            .iter()
            .filter_map(|table| match serde_json::to_value(table) {
                Ok(value) => WidgetCandidate::from_value(value),
                Err(e) => {
                    tracing::warn!(extension = %self.name, error = %e, "unusable widget table");
                    None
                }
            })
            .collect()
    }
}

pub struct ExtensionLoader {
    dir: PathBuf,
    watcher: Option<RecommendedWatcher>,
    tx: mpsc::Sender<notify::Result<notify::Event>>,
    rx: mpsc::Receiver<notify::Result<notify::Event>>,
}

impl ExtensionLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            dir: dir.into(),
            watcher: None,
            tx,
            rx,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read every manifest in the directory
    ///
    /// A missing directory yields nothing; unreadable manifests are logged
    /// and skipped.
    pub fn load_all(&self) -> Result<Vec<ExtensionManifest>, ExtensionError> {
        let mut manifests = Vec::new();

        if !self.dir.exists() {
            return Ok(manifests);
        }

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if is_manifest(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            match load_manifest(&path) {
                Ok(manifest) => manifests.push(manifest),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to load extension"),
            }
        }

        Ok(manifests)
    }

    /// Start watching the directory for new or changed manifests
    pub fn watch(&mut self) -> Result<(), ExtensionError> {
        if !self.dir.exists() {
            return Ok(());
        }

        let tx = self.tx.clone();
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            notify::Config::default(),
        )?;
        watcher.watch(&self.dir, RecursiveMode::NonRecursive)?;
        self.watcher = Some(watcher);
        Ok(())
    }

    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }

    /// Manifests created or modified since the last call
    pub fn check_for_changes(&mut self) -> Vec<ExtensionManifest> {
        let mut changed: Vec<PathBuf> = Vec::new();

        while let Ok(event) = self.rx.try_recv() {
            if let Ok(event) = event
                && (event.kind.is_modify() || event.kind.is_create())
            {
                for path in event.paths {
                    if is_manifest(&path) && !changed.contains(&path) {
                        changed.push(path);
                    }
                }
            }
        }

        changed
            .iter()
            .filter_map(|path| match load_manifest(path) {
                Ok(manifest) => Some(manifest),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to reload extension");
                    None
                }
            })
            .collect()
    }
}

impl Drop for ExtensionLoader {
    fn drop(&mut self) {
        if let Some(watcher) = self.watcher.as_mut() {
            let _ = watcher.unwatch(&self.dir);
        }
    }
}

pub fn load_manifest(path: &Path) -> Result<ExtensionManifest, ExtensionError> {
    let content = std::fs::read_to_string(path)?;
    let mut manifest = ExtensionManifest::parse(&content).map_err(|source| ExtensionError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if manifest.name.is_empty() {
        manifest.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();
    }
    Ok(manifest)
}

fn is_manifest(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "toml")
}

//! Process-scoped registry of predictive model artifacts.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Model names the registry knows how to look for.
pub const MODEL_NAMES: [&str; 4] = ["lightgbm", "xgboost", "random_forest", "sarimax"];

/// File extension of serialized model artifacts.
pub const ARTIFACT_EXT: &str = "bin";

/// A registry slot: either a loaded artifact or the "not yet trained" state.
///
/// Absence is an expected, explicit state rather than a nullable field —
/// a model that has never been trained simply has no artifact on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelArtifact {
    /// No artifact could be loaded for this name.
    Absent,
    /// Raw serialized artifact bytes.
    Present(Vec<u8>),
}

impl ModelArtifact {
    /// Whether an artifact was loaded.
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

/// Read-only collection of model artifacts, loaded once at startup.
///
/// Every name in [`MODEL_NAMES`] is always registered; names whose
/// artifact file is missing or unreadable map to [`ModelArtifact::Absent`].
/// The registry never mutates after [`ModelRegistry::load`], so a shared
/// reference (or `Arc`) can serve concurrent requests without locking.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    models_dir: PathBuf,
    entries: HashMap<&'static str, ModelArtifact>,
}

impl ModelRegistry {
    /// Loads artifacts for every recognized model name from `models_dir`.
    ///
    /// Looks for `<models_dir>/<name>.bin` per name. Any load failure —
    /// missing file, unreadable file, empty file — is recorded as
    /// [`ModelArtifact::Absent`] and never raised: an empty registry is a
    /// valid "nothing trained yet" deployment, not an error.
    pub fn load(models_dir: &Path) -> Self {
        let entries = MODEL_NAMES
            .iter()
            .map(|&name| (name, load_artifact(models_dir, name)))
            .collect();
        Self {
            models_dir: models_dir.to_path_buf(),
            entries,
        }
    }

    /// Directory the artifacts were loaded from.
    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    /// Whether `name` is registered with a present artifact.
    pub fn has(&self, name: &str) -> bool {
        self.entries.get(name).is_some_and(ModelArtifact::is_present)
    }

    /// Registry slot for `name`, or `None` for unrecognized names.
    pub fn get(&self, name: &str) -> Option<&ModelArtifact> {
        self.entries.get(name)
    }

    /// Names with a present artifact, in [`MODEL_NAMES`] order.
    pub fn available(&self) -> Vec<&'static str> {
        MODEL_NAMES
            .iter()
            .copied()
            .filter(|name| self.has(name))
            .collect()
    }
}

/// Attempts one artifact read; every failure degrades to `Absent`.
fn load_artifact(models_dir: &Path, name: &str) -> ModelArtifact {
    let path = models_dir.join(format!("{name}.{ARTIFACT_EXT}"));
    match fs::read(&path) {
        Ok(bytes) if !bytes.is_empty() => ModelArtifact::Present(bytes),
        _ => ModelArtifact::Absent,
    }
}

//! Model Preset Registry with Version Management
//!
//! Coefficient sets are published as named, versioned presets
//! (`ls_interaction_v1`, `ls_interaction_v2`, ...). Deployments pin an exact
//! version or ask for the latest one; old versions stay loadable after they
//! are deprecated so archived simulations can be reproduced.
//!
//! The default presets ship inside the binary from `presets/*.json`.

use std::collections::HashMap;
use std::sync::RwLock;

use include_dir::{include_dir, Dir};
use lumisim_core::{PredictionModel, RegressionModel, RoomType, Technology};
use serde::{Deserialize, Serialize};

use crate::PresetError;

static EMBEDDED_PRESETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/presets");

/// Metadata kept next to each preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetMetadata {
    /// Base name (e.g. "ls_interaction")
    pub name: String,

    /// Version tag (e.g. "v1")
    pub version: String,

    /// Full qualified name (e.g. "ls_interaction_v1")
    pub qualified_name: String,

    /// Where the coefficients come from
    #[serde(default)]
    pub description: String,

    /// Whether this preset is deprecated
    #[serde(default)]
    pub deprecated: bool,

    /// Replacement preset if deprecated
    #[serde(default)]
    pub replacement: Option<String>,
}

/// On-disk preset document
#[derive(Debug, Clone, Deserialize)]
struct PresetFile {
    name: String,
    version: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    deprecated: bool,
    #[serde(default)]
    replacement: Option<String>,
    model: RegressionModel,
}

/// Thread-safe preset registry
pub struct PresetRegistry {
    /// Presets indexed by qualified name
    presets: RwLock<HashMap<String, (RegressionModel, PresetMetadata)>>,

    /// Version mappings (name -> [versions])
    versions: RwLock<HashMap<String, Vec<String>>>,

    /// Latest version for each base name
    latest: RwLock<HashMap<String, String>>,
}

/// Split `name_vN` into `("name", "vN")`
pub fn split_qualified_name(qualified: &str) -> (String, String) {
    match qualified.rfind("_v") {
        Some(pos) if version_number(&qualified[pos + 1..]).is_some() => {
            (qualified[..pos].to_string(), qualified[pos + 1..].to_string())
        }
        _ => (qualified.to_string(), "v1".to_string()),
    }
}

/// Numeric part of a `vN` tag
fn version_number(version: &str) -> Option<u32> {
    version.strip_prefix('v')?.parse().ok()
}

impl PresetRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            presets: RwLock::new(HashMap::new()),
            versions: RwLock::new(HashMap::new()),
            latest: RwLock::new(HashMap::new()),
        }
    }

    /// Register a model with metadata
    pub fn register_with_metadata(
        &self,
        model: RegressionModel,
        metadata: PresetMetadata,
    ) -> Result<(), PresetError> {
        let qualified_name = metadata.qualified_name.clone();
        let base_name = metadata.name.clone();
        let version = metadata.version.clone();

        if version_number(&version).is_none() {
            return Err(PresetError::Parse(format!(
                "preset {qualified_name} has malformed version '{version}'"
            )));
        }
        let non_monotone = RoomType::ALL.iter().any(|room| {
            Technology::ALL
                .iter()
                .any(|tech| !model.is_monotone_in_area(*room, *tech))
        });
        if non_monotone {
            log::warn!("Preset {} can predict less light for larger rooms", qualified_name);
        }

        {
            let mut presets = self.presets.write().map_err(|_| PresetError::LockPoisoned)?;
            if presets.contains_key(&qualified_name) {
                return Err(PresetError::Duplicate(qualified_name));
            }
            presets.insert(qualified_name.clone(), (model, metadata));
        }

        {
            let mut versions = self.versions.write().map_err(|_| PresetError::LockPoisoned)?;
            versions
                .entry(base_name.clone())
                .or_insert_with(Vec::new)
                .push(version.clone());
        }

        {
            let mut latest = self.latest.write().map_err(|_| PresetError::LockPoisoned)?;
            let newer = latest
                .get(&base_name)
                .map_or(true, |current| version_number(&version) > version_number(current));
            if newer {
                latest.insert(base_name, version);
            }
        }

        log::debug!("Registered model preset {}", qualified_name);
        Ok(())
    }

    /// Register a model under a `name_vN` qualified name
    pub fn register(&self, qualified_name: &str, model: RegressionModel) -> Result<(), PresetError> {
        let (name, version) = split_qualified_name(qualified_name);
        let metadata = PresetMetadata {
            qualified_name: format!("{name}_{version}"),
            name,
            version,
            description: String::new(),
            deprecated: false,
            replacement: None,
        };
        self.register_with_metadata(model, metadata)
    }

    /// Parse and register one preset document
    pub fn register_json(&self, json: &str) -> Result<String, PresetError> {
        let file: PresetFile = serde_json::from_str(json)?;
        let qualified_name = format!("{}_{}", file.name, file.version);
        let metadata = PresetMetadata {
            name: file.name,
            version: file.version,
            qualified_name: qualified_name.clone(),
            description: file.description,
            deprecated: file.deprecated,
            replacement: file.replacement,
        };
        self.register_with_metadata(file.model, metadata)?;
        Ok(qualified_name)
    }

    /// Get a model by qualified name
    ///
    /// Deprecated presets are still returned, with a warning.
    pub fn get(&self, qualified_name: &str) -> Result<RegressionModel, PresetError> {
        let presets = self.presets.read().map_err(|_| PresetError::LockPoisoned)?;

        let (model, metadata) = presets
            .get(qualified_name)
            .ok_or_else(|| PresetError::NotFound(qualified_name.to_string()))?;

        if metadata.deprecated {
            log::warn!(
                "Model preset {} is deprecated{}",
                qualified_name,
                metadata
                    .replacement
                    .as_deref()
                    .map(|r| format!(", use {r}"))
                    .unwrap_or_default()
            );
        }
        Ok(model.clone())
    }

    /// Get the latest version of a preset
    pub fn get_latest(&self, base_name: &str) -> Result<RegressionModel, PresetError> {
        let qualified_name = {
            let latest = self.latest.read().map_err(|_| PresetError::LockPoisoned)?;
            let version = latest
                .get(base_name)
                .ok_or_else(|| PresetError::NotFound(format!("no versions of {base_name}")))?;
            format!("{base_name}_{version}")
        };
        self.get(&qualified_name)
    }

    /// Resolve either a qualified name or a base name
    pub fn resolve(&self, name: &str) -> Result<RegressionModel, PresetError> {
        match self.get(name) {
            Err(PresetError::NotFound(_)) => self.get_latest(name),
            other => other,
        }
    }

    /// All registered versions of a preset, in registration order
    pub fn get_versions(&self, base_name: &str) -> Result<Vec<String>, PresetError> {
        let versions = self.versions.read().map_err(|_| PresetError::LockPoisoned)?;
        Ok(versions.get(base_name).cloned().unwrap_or_default())
    }

    /// Get preset metadata
    pub fn get_metadata(&self, qualified_name: &str) -> Result<PresetMetadata, PresetError> {
        let presets = self.presets.read().map_err(|_| PresetError::LockPoisoned)?;
        presets
            .get(qualified_name)
            .map(|(_, metadata)| metadata.clone())
            .ok_or_else(|| PresetError::NotFound(qualified_name.to_string()))
    }

    /// Qualified names of every registered preset, sorted
    pub fn names(&self) -> Result<Vec<String>, PresetError> {
        let presets = self.presets.read().map_err(|_| PresetError::LockPoisoned)?;
        let mut names: Vec<String> = presets.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Mark a preset as deprecated
    pub fn deprecate(
        &self,
        qualified_name: &str,
        replacement: Option<String>,
    ) -> Result<(), PresetError> {
        let mut presets = self.presets.write().map_err(|_| PresetError::LockPoisoned)?;

        let (_model, metadata) = presets
            .get_mut(qualified_name)
            .ok_or_else(|| PresetError::NotFound(qualified_name.to_string()))?;

        metadata.deprecated = true;
        metadata.replacement = replacement;

        Ok(())
    }

    /// Load every preset embedded from `presets/`
    pub fn load_defaults(&self) -> Result<(), PresetError> {
        let mut files: Vec<_> = EMBEDDED_PRESETS
            .files()
            .filter(|f| f.path().extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort_by(|a, b| a.path().cmp(b.path()));

        for file in files {
            let text = file.contents_utf8().ok_or_else(|| {
                PresetError::Parse(format!("{} is not UTF-8", file.path().display()))
            })?;
            self.register_json(text)?;
        }
        Ok(())
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static::lazy_static! {
    /// Global preset registry with the embedded presets loaded
    pub static ref GLOBAL_PRESETS: PresetRegistry = {
        let registry = PresetRegistry::new();
        if let Err(err) = registry.load_defaults() {
            log::warn!("Embedded model presets failed to load: {}", err);
        }
        registry
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumisim_core::ModelForm;

    #[test]
    fn register_and_retrieve() {
        let registry = PresetRegistry::new();
        registry.register("test_model_v1", RegressionModel::default()).unwrap();

        let retrieved = registry.get("test_model_v1").unwrap();
        assert_eq!(retrieved, RegressionModel::default());
    }

    #[test]
    fn version_tracking() {
        let registry = PresetRegistry::new();
        registry.register("test_v1", RegressionModel::default()).unwrap();
        registry.register("test_v2", RegressionModel::default()).unwrap();

        let versions = registry.get_versions("test").unwrap();
        assert_eq!(versions, vec!["v1".to_string(), "v2".to_string()]);
    }

    #[test]
    fn latest_compares_numerically() {
        let registry = PresetRegistry::new();
        let mut linear = RegressionModel::default();
        linear.form = ModelForm::Linear;

        registry.register("fit_v10", linear.clone()).unwrap();
        registry.register("fit_v9", RegressionModel::default()).unwrap();

        assert_eq!(registry.get_latest("fit").unwrap(), linear);
    }

    #[test]
    fn duplicate_registration_is_refused() {
        let registry = PresetRegistry::new();
        registry.register("dup_v1", RegressionModel::default()).unwrap();
        assert!(matches!(
            registry.register("dup_v1", RegressionModel::default()),
            Err(PresetError::Duplicate(_))
        ));
    }

    #[test]
    fn deprecation() {
        let registry = PresetRegistry::new();
        registry.register("old_fit_v1", RegressionModel::default()).unwrap();
        registry
            .deprecate("old_fit_v1", Some("new_fit_v1".to_string()))
            .unwrap();

        let metadata = registry.get_metadata("old_fit_v1").unwrap();
        assert!(metadata.deprecated);
        assert_eq!(metadata.replacement, Some("new_fit_v1".to_string()));
        assert!(registry.get("old_fit_v1").is_ok());
    }

    #[test]
    fn unversioned_names_default_to_v1() {
        assert_eq!(
            split_qualified_name("lumen_method"),
            ("lumen_method".to_string(), "v1".to_string())
        );
        assert_eq!(
            split_qualified_name("ls_interaction_v3"),
            ("ls_interaction".to_string(), "v3".to_string())
        );
    }

    #[test]
    fn embedded_defaults_load() {
        let registry = PresetRegistry::new();
        registry.load_defaults().unwrap();

        let names = registry.names().unwrap();
        assert!(names.contains(&"ls_interaction_v1".to_string()));
        assert!(names.contains(&"ls_linear_v1".to_string()));
        assert!(names.contains(&"lumen_method_v0".to_string()));

        assert_eq!(registry.resolve("ls_interaction").unwrap(), RegressionModel::default());
    }
}

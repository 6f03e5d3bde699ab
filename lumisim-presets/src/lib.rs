//! Configuration, Reference Data and Model Presets for Lumisim
//!
//! ## Overview
//!
//! The engine in `lumisim-core` never touches files. This crate does the
//! loading, once, at startup:
//!
//! - **Configuration**: JSON documents deserialized into
//!   [`SimulatorConfig`](lumisim_core::SimulatorConfig) and validated
//! - **Reference data**: historical installations for bootstrap bands, from
//!   the survey spreadsheet export or its JSON conversion
//! - **Presets**: named, versioned coefficient sets, with the defaults
//!   embedded in the binary
//!
//! ## Preset Versioning
//!
//! Coefficients are refitted as new survey data comes in. Each fit is
//! published under a new version rather than edited in place:
//!
//! 1. **Version in Name**: `ls_interaction_v1`, `ls_interaction_v2`
//! 2. **Never Overwrite**: registering an existing name is an error
//! 3. **Deprecate, Don't Delete**: old fits stay loadable and warn on use
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use lumisim_core::{RoomType, SimulationRequest, Simulator, Technology};
//! use lumisim_presets::{config_from_json, reference_from_csv};
//!
//! let config = config_from_json(r#"{
//!     "model_preset": "ls_interaction",
//!     "uncertainty": { "kind": "bootstrap", "iterations": 200 },
//!     "bootstrap_seed": 1
//! }"#)?;
//!
//! let survey = reference_from_csv(
//!     "tipo_ambiente;superficie_m2;tecnologia;lumenes_requeridos_lm\n\
//!      aula;30;LED;17500\n\
//!      oficina;22,5;LED;19800\n",
//! )?;
//!
//! let simulator = Simulator::with_reference(config, Arc::new(survey))?;
//! let result = simulator.simulate(&SimulationRequest::new(
//!     35.0,
//!     RoomType::Classroom,
//!     Technology::Led,
//! ))?;
//! assert!(result.uncertainty_low <= result.predicted_lumens);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
mod error;
pub mod reference;
pub mod registry;

pub use config::{config_from_json, config_from_json_with, load_config};
pub use error::PresetError;
pub use reference::{
    load_reference, load_reference_csv, load_reference_json, reference_from_csv,
    reference_from_json,
};
pub use registry::{PresetMetadata, PresetRegistry, GLOBAL_PRESETS};

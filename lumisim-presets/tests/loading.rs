//! File loading through the public API, end to end into a simulator

use std::io::Write;
use std::sync::Arc;

use lumisim_core::{
    BandMethod, RoomType, SimulationRequest, Simulator, Technology, UncertaintyMode,
};
use lumisim_presets::{
    load_config, load_reference, PresetError, PresetRegistry, GLOBAL_PRESETS,
};
use proptest::prelude::*;
use tempfile::{Builder, NamedTempFile};

fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const SURVEY_CSV: &str = "tipo_ambiente;superficie_m2;tecnologia;lumenes_requeridos_lm\n\
                          aula;12;LED;5100\n\
                          aula;25,5;LED;14300\n\
                          aula;48;fluorescente;39900\n\
                          oficina;18;LED;14100\n\
                          oficina;30;fluorescente;35400\n\
                          sala-reuniones;15;LED;7800\n";

#[test]
fn config_and_csv_files_drive_a_bootstrap_simulator() {
    let config_file = temp_file(
        ".json",
        r#"{ "uncertainty": { "kind": "bootstrap", "iterations": 250 }, "bootstrap_seed": 3 }"#,
    );
    let survey_file = temp_file(".csv", SURVEY_CSV);

    let config = load_config(config_file.path()).unwrap();
    let survey = load_reference(survey_file.path()).unwrap();
    assert_eq!(survey.len(), 6);

    let simulator = Simulator::with_reference(config, Arc::new(survey)).unwrap();
    let result = simulator
        .simulate(&SimulationRequest::new(35.0, RoomType::Classroom, Technology::Led))
        .unwrap();

    assert_eq!(result.band_method, BandMethod::Bootstrap { iterations: 250 });
    assert!(result.uncertainty_low <= result.predicted_lumens);
    assert!(result.predicted_lumens <= result.uncertainty_high);
}

#[test]
fn json_reference_by_extension() {
    let file = temp_file(
        ".json",
        r#"[{ "tipo_ambiente": "aula", "superficie_m2": 35.5,
              "tecnologia": "LED", "lumenes_requeridos_lm": 21041 }]"#,
    );
    let dataset = load_reference(file.path()).unwrap();
    assert_eq!(dataset.len(), 1);
}

#[test]
fn missing_file_reports_path() {
    let err = load_config("/definitely/not/here.json").unwrap_err();
    match err {
        PresetError::Io { path, .. } => assert!(path.ends_with("here.json")),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn config_file_with_deprecated_preset_still_loads() {
    let file = temp_file(".json", r#"{ "model_preset": "lumen_method_v0" }"#);
    let config = load_config(file.path()).unwrap();

    let metadata = GLOBAL_PRESETS.get_metadata("lumen_method_v0").unwrap();
    assert!(metadata.deprecated);
    assert_eq!(metadata.replacement.as_deref(), Some("ls_interaction_v1"));

    // 320 lx × 1.15 per m² for classrooms
    let simulator = Simulator::new(config).unwrap();
    let result = simulator
        .simulate(&SimulationRequest::new(30.0, RoomType::Classroom, Technology::Led))
        .unwrap();
    assert_eq!(result.predicted_lumens, 11040);
}

#[test]
fn global_presets_are_loaded() {
    let names = GLOBAL_PRESETS.names().unwrap();
    assert_eq!(names, vec!["ls_interaction_v1", "ls_linear_v1", "lumen_method_v0"]);
}

#[test]
fn local_registry_is_independent() {
    let registry = PresetRegistry::new();
    let name = registry
        .register_json(
            r#"{ "name": "site_fit", "version": "v2",
                 "model": { "form": "polynomial",
                            "coefficients": { "intercept": 100, "area_slope": 300,
                                              "area_quadratic": 0.5 } } }"#,
        )
        .unwrap();
    assert_eq!(name, "site_fit_v2");

    let config =
        lumisim_presets::config_from_json_with(r#"{ "model_preset": "site_fit" }"#, &registry)
            .unwrap();
    let simulator = Simulator::new(config).unwrap();
    let result = simulator
        .simulate(&SimulationRequest::new(10.0, RoomType::Office, Technology::Fluorescent))
        .unwrap();
    // 100 + 3000 + 50
    assert_eq!(result.predicted_lumens, 3150);

    assert!(GLOBAL_PRESETS.get("site_fit_v2").is_err());
}

#[test]
fn bootstrap_config_without_data_loads() {
    let file = temp_file(".json", r#"{ "uncertainty": { "kind": "bootstrap" } }"#);
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.uncertainty, UncertaintyMode::bootstrap());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn csv_decimals_parse_like_json(whole in 5u32..5_000, frac in 0u32..100) {
        let csv = format!(
            "tipo_ambiente;superficie_m2;tecnologia;lumenes_requeridos_lm\n\
             oficina;{whole},{frac:02};LED;1000\n"
        );
        let json = format!(
            r#"[{{ "room_type": "office", "area_m2": "{whole}.{frac:02}",
                   "technology": "led", "observed_lumens": 1000 }}]"#
        );
        let from_csv = lumisim_presets::reference_from_csv(&csv).unwrap();
        let from_json = lumisim_presets::reference_from_json(&json).unwrap();
        prop_assert_eq!(from_csv.rows(), from_json.rows());
    }
}

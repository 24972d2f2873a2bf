use std::{collections::HashMap, fs};

use super::*;

fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = read_settings_file(&dir.path().join("absent.toml")).expect("defaults");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.jog_step_sizes, vec![0.1, 1.0, 10.0]);
    assert!(!settings.disable_module_restrictions);
}

#[test]
fn reads_partial_settings_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("labctl.toml");
    fs::write(&path, "disable_module_restrictions = true\njog_step_sizes = [0.1, 1.0]\n")
        .expect("write settings");

    let settings = read_settings_file(&path).expect("settings");
    assert!(settings.disable_module_restrictions);
    assert!(settings.choose_tip_rack);
    assert_eq!(settings.jog_step_sizes, vec![0.1, 1.0]);
    assert!(settings.checker_config().disable_module_restrictions);
}

#[test]
fn malformed_settings_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("labctl.toml");
    fs::write(&path, "choose_tip_rack = \"sometimes\"\n").expect("write settings");

    let err = read_settings_file(&path).expect_err("bad type");
    assert!(err.to_string().contains("failed to parse settings file"));
}

#[test]
fn environment_overrides_file_values() {
    let mut settings = Settings::default();
    apply_overrides(
        &mut settings,
        lookup_from(&[
            ("LABCTL_DISABLE_MODULE_RESTRICTIONS", "yes"),
            ("LABCTL_CHOOSE_TIP_RACK", "0"),
            ("LABCTL_JOG_STEP_SIZES", "0.5, 5"),
        ]),
    )
    .expect("overrides");

    assert!(settings.disable_module_restrictions);
    assert!(!settings.choose_tip_rack);
    assert_eq!(settings.jog_step_sizes, vec![0.5, 5.0]);

    let resolver = settings.resolver_config();
    assert_eq!(resolver.jog_step_sizes, vec![0.5, 5.0]);
    assert!(!resolver.choose_tip_rack);
}

#[test]
fn rejects_unparseable_overrides() {
    let mut settings = Settings::default();
    assert!(apply_overrides(
        &mut settings,
        lookup_from(&[("LABCTL_CHOOSE_TIP_RACK", "maybe")])
    )
    .is_err());
    assert!(apply_overrides(
        &mut settings,
        lookup_from(&[("LABCTL_JOG_STEP_SIZES", "0.1,abc")])
    )
    .is_err());
}

#[test]
fn validation_requires_positive_step_sizes() {
    let mut settings = Settings::default();
    settings.jog_step_sizes = vec![];
    assert!(validate(&settings).is_err());
    settings.jog_step_sizes = vec![1.0, -1.0];
    assert!(validate(&settings).is_err());
    settings.jog_step_sizes = vec![1.0];
    assert!(validate(&settings).is_ok());
}

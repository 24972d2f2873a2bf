use std::{fs, io, path::Path};

use anyhow::{bail, Context};
use calibration::ResolverConfig;
use deck::CheckerConfig;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub disable_module_restrictions: bool,
    pub choose_tip_rack: bool,
    pub jog_step_sizes: Vec<f64>,
}

impl Default for Settings {
    fn default() -> Self {
        let resolver = ResolverConfig::default();
        let checker = CheckerConfig::default();
        Self {
            disable_module_restrictions: checker.disable_module_restrictions,
            choose_tip_rack: resolver.choose_tip_rack,
            jog_step_sizes: resolver.jog_step_sizes,
        }
    }
}

impl Settings {
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            jog_step_sizes: self.jog_step_sizes.clone(),
            choose_tip_rack: self.choose_tip_rack,
        }
    }

    pub fn checker_config(&self) -> CheckerConfig {
        CheckerConfig {
            disable_module_restrictions: self.disable_module_restrictions,
        }
    }
}

/// Settings file (missing file means defaults), then `LABCTL_*` environment overrides.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = read_settings_file(path)?;
    apply_overrides(&mut settings, |key| std::env::var(key).ok())?;
    validate(&settings)?;
    Ok(settings)
}

fn read_settings_file(path: &Path) -> anyhow::Result<Settings> {
    match fs::read_to_string(path) {
        Ok(raw) => toml::from_str(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(err) => Err(err)
            .with_context(|| format!("failed to read settings file '{}'", path.display())),
    }
}

fn apply_overrides(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = lookup("LABCTL_DISABLE_MODULE_RESTRICTIONS") {
        settings.disable_module_restrictions =
            parse_flag(&v).context("LABCTL_DISABLE_MODULE_RESTRICTIONS")?;
    }
    if let Some(v) = lookup("LABCTL_CHOOSE_TIP_RACK") {
        settings.choose_tip_rack = parse_flag(&v).context("LABCTL_CHOOSE_TIP_RACK")?;
    }
    if let Some(v) = lookup("LABCTL_JOG_STEP_SIZES") {
        settings.jog_step_sizes = parse_step_sizes(&v).context("LABCTL_JOG_STEP_SIZES")?;
    }
    Ok(())
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("expected a boolean flag, got '{other}'"),
    }
}

fn parse_step_sizes(raw: &str) -> anyhow::Result<Vec<f64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<f64>()
                .with_context(|| format!("invalid jog step size '{part}'"))
        })
        .collect()
}

fn validate(settings: &Settings) -> anyhow::Result<()> {
    if settings.jog_step_sizes.is_empty() {
        bail!("at least one jog step size must be configured");
    }
    if let Some(bad) = settings
        .jog_step_sizes
        .iter()
        .find(|size| !size.is_finite() || **size <= 0.0)
    {
        bail!("jog step sizes must be positive, got {bad}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

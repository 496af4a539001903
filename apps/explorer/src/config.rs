use std::{
    fs,
    path::{Path, PathBuf},
};

use row_selection::RebindPolicy;
use serde::Deserialize;
use tracing::warn;

const MIN_ROW_HEIGHT: f32 = 16.0;
const MAX_ROW_HEIGHT: f32 = 48.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub sample_case_count: usize,
    pub multi_select: bool,
    pub row_height: f32,
    pub rebind_policy: RebindPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sample_case_count: 60,
            multi_select: true,
            row_height: 24.0,
            rebind_policy: RebindPolicy::Reject,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    sample_case_count: Option<usize>,
    multi_select: Option<bool>,
    row_height: Option<f32>,
    rebind_policy: Option<RebindPolicy>,
}

/// Defaults, overridden by the settings file, overridden by environment
/// variables. An explicit path wins over the search locations.
pub fn load_settings(explicit_path: Option<&Path>) -> Settings {
    let mut settings = Settings::default();

    let path = explicit_path
        .map(Path::to_path_buf)
        .or_else(default_config_path);
    if let Some(path) = path {
        apply_file(&mut settings, &path);
    }
    apply_overrides(&mut settings, |name| std::env::var(name).ok());

    settings.row_height = settings.row_height.clamp(MIN_ROW_HEIGHT, MAX_ROW_HEIGHT);
    settings
}

fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from("explorer.toml");
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir().map(|base| base.join("explorer").join("explorer.toml"))
}

fn apply_file(settings: &mut Settings, path: &Path) {
    let Ok(raw) = fs::read_to_string(path) else {
        return;
    };
    match toml::from_str::<FileSettings>(&raw) {
        Ok(file_cfg) => apply_file_settings(settings, file_cfg),
        Err(error) => warn!("ignoring malformed settings file {}: {error}", path.display()),
    }
}

fn apply_file_settings(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.sample_case_count {
        settings.sample_case_count = v;
    }
    if let Some(v) = file_cfg.multi_select {
        settings.multi_select = v;
    }
    if let Some(v) = file_cfg.row_height {
        settings.row_height = v;
    }
    if let Some(v) = file_cfg.rebind_policy {
        settings.rebind_policy = v;
    }
}

fn apply_overrides(settings: &mut Settings, get: impl Fn(&str) -> Option<String>) {
    if let Some(v) = get("EXPLORER__SAMPLE_CASE_COUNT") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.sample_case_count = parsed;
        }
    }
    if let Some(v) = get("EXPLORER__MULTI_SELECT") {
        if let Ok(parsed) = v.parse::<bool>() {
            settings.multi_select = parsed;
        }
    }
    if let Some(v) = get("EXPLORER__ROW_HEIGHT") {
        if let Ok(parsed) = v.parse::<f32>() {
            settings.row_height = parsed;
        }
    }
    if let Some(v) = get("EXPLORER__REBIND_POLICY") {
        match v.to_ascii_lowercase().as_str() {
            "reject" => settings.rebind_policy = RebindPolicy::Reject,
            "replace" => settings.rebind_policy = RebindPolicy::Replace,
            _ => warn!("ignoring unknown EXPLORER__REBIND_POLICY value {v:?}"),
        }
    }
}

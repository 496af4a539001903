use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use tracing::info;

mod config;
mod ui;

use ui::{ExplorerApp, PersistedExplorerSettings, SETTINGS_STORAGE_KEY};

#[derive(Parser, Debug)]
struct Args {
    /// Settings file to load instead of the default search locations.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the number of generated sample cases.
    #[arg(long)]
    case_count: Option<usize>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let mut settings = config::load_settings(args.config.as_deref());
    if let Some(case_count) = args.case_count {
        settings.sample_case_count = case_count;
    }
    info!(
        cases = settings.sample_case_count,
        multi_select = settings.multi_select,
        "starting case explorer"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Case Explorer")
            .with_inner_size([920.0, 620.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Case Explorer",
        options,
        Box::new(move |cc| {
            let persisted = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| serde_json::from_str::<PersistedExplorerSettings>(&text).ok())
            });
            Ok(Box::new(ExplorerApp::new(settings, persisted)?))
        }),
    )
}

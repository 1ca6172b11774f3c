use data::open_source;
use logger::{Color, Logger};

pub mod camera;
pub mod config;
pub mod controller;
pub mod data;
pub mod errors;
pub mod layers;
mod map;
mod plugins;
pub mod state;
pub mod types;
mod widgets;
mod windows;

use config::MapConfig;
use controller::ViewController;
use errors::InterfaceError;
use map::QuakeMapApp;

/// Loads the earthquake data and opens the map window until it is closed.
pub fn run(config: MapConfig, logger: Logger) -> Result<(), InterfaceError> {
    let feature_set = open_source(&config.data_path)?.get_features()?;
    let _ = logger.info(
        &format!(
            "Loaded {} points from {} ({} skipped)",
            feature_set.features.len(),
            config.data_path.display(),
            feature_set.skipped
        ),
        Color::Cyan,
    );

    let controller = ViewController::new(
        config.initial_center,
        feature_set.features,
        logger.clone(),
    )?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Quake Map")
            .with_inner_size([1024.0, 768.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Quake Map",
        options,
        Box::new(move |cc| {
            Ok(Box::new(QuakeMapApp::new(
                cc.egui_ctx.clone(),
                &config,
                controller,
                logger,
            )))
        }),
    )?;

    Ok(())
}

use std::{cell::RefCell, rc::Rc, time::Instant};

use egui::Context;
use egui_extras::install_image_loaders;
use logger::{Color, Logger};
use walkers::{
    sources::{Mapbox, MapboxStyle, OpenStreetMap},
    HttpOptions, HttpTiles, Map, MapMemory, Position, Tiles,
};

use crate::{
    config::MapConfig,
    controller::ViewController,
    plugins,
    state::InteractionState,
    widgets::{WidgetCoordinateForm, WidgetReadout},
    windows,
};

/// The main application struct that owns the map and everything drawn on it.
///
/// The tile cache and map state live exactly as long as this value; dropping
/// it when the window closes releases them.
pub struct QuakeMapApp {
    tiles: Box<dyn Tiles>,
    map_memory: MapMemory,
    interaction: Rc<RefCell<InteractionState>>,
    controller: ViewController,
    coordinate_form: WidgetCoordinateForm,
    initial_center: Position,
    logger: Logger,
}

impl QuakeMapApp {
    /// Creates the app centered on the configured position, fetching tiles with
    /// the configured access token.
    pub fn new(
        egui_ctx: Context,
        config: &MapConfig,
        controller: ViewController,
        logger: Logger,
    ) -> Self {
        install_image_loaders(&egui_ctx);

        let mut map_memory = MapMemory::default();
        if map_memory.set_zoom(config.initial_zoom).is_err() {
            let _ = logger.warn(&format!(
                "Initial zoom {} rejected, keeping {}",
                config.initial_zoom,
                map_memory.zoom()
            ));
        }

        Self {
            tiles: build_tiles(config, egui_ctx, &logger),
            map_memory,
            interaction: Rc::new(RefCell::new(InteractionState::new())),
            controller,
            coordinate_form: WidgetCoordinateForm::new(),
            initial_center: config.initial_center,
            logger,
        }
    }
}

fn build_tiles(config: &MapConfig, egui_ctx: Context, logger: &Logger) -> Box<dyn Tiles> {
    let options = HttpOptions {
        cache: config.tile_cache.clone(),
        ..Default::default()
    };

    match &config.access_token {
        Some(token) => {
            let _ = logger.info("Using Mapbox streets tiles", Color::Blue);
            Box::new(HttpTiles::with_options(
                Mapbox {
                    style: MapboxStyle::Streets,
                    high_resolution: false,
                    access_token: token.clone(),
                },
                options,
                egui_ctx,
            ))
        }
        None => {
            let _ = logger.warn("No Mapbox access token configured, using OpenStreetMap tiles");
            Box::new(HttpTiles::with_options(OpenStreetMap, options, egui_ctx))
        }
    }
}

impl eframe::App for QuakeMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.controller.advance(&mut self.map_memory, Instant::now()) {
            ctx.request_repaint();
        }

        let rimless = egui::Frame {
            fill: ctx.style().visuals.panel_fill,
            ..Default::default()
        };

        egui::CentralPanel::default()
            .frame(rimless)
            .show(ctx, |ui| {
                let map_zoom = self.map_memory.zoom();
                let tiles = self.tiles.as_mut();

                let cluster_plugin = plugins::Clusters::new(
                    self.controller.index(),
                    map_zoom,
                    self.interaction.clone(),
                );

                let marker_plugin = plugins::Markers::new(
                    self.controller.draggable_marker(),
                    self.controller.placed_markers(),
                    self.interaction.clone(),
                );

                let popup_plugin =
                    plugins::FeaturePopup::new(self.controller.popup(), self.interaction.clone());

                let map = Map::new(Some(tiles), &mut self.map_memory, self.initial_center)
                    .with_plugin(cluster_plugin)
                    .with_plugin(marker_plugin)
                    .with_plugin(popup_plugin);

                ui.add(map);

                {
                    use windows::*;
                    zoom(ui, &mut self.map_memory);
                    acknowledge(ui, self.tiles.attribution());
                }
            });

        let events = self.interaction.borrow_mut().take_events();
        let now = Instant::now();
        for event in events {
            self.controller.handle_event(event, &mut self.map_memory, now);
        }
        if self.controller.is_easing() {
            ctx.request_repaint();
        }

        if let Some(icon) = self.interaction.borrow().cursor_icon() {
            ctx.set_cursor_icon(icon);
        }

        WidgetReadout::show(ctx, self.controller.readout());

        if let Some(pair) = self.coordinate_form.show(ctx) {
            if let Err(e) = self.controller.place_marker(pair, &mut self.map_memory) {
                let _ = self.logger.warn(&format!("Could not center on marker: {}", e));
            }
        }
    }
}

impl Drop for QuakeMapApp {
    fn drop(&mut self) {
        let _ = self.logger.info(
            &format!(
                "Map closed, releasing {} placed markers and the tile cache",
                self.controller.placed_markers().len()
            ),
            Color::Yellow,
        );
    }
}

// main.rs
mod app;
mod converter;
mod utils;

use app::theme::Theme;
use app::App;
use converter::ConvertOptions;
use eframe::{IconData, NativeOptions};
use tracing::{info, warn};

const ICON_PATH: &str = "file_converter_img.ico";

fn main() {
    utils::init_logging();

    let native_options = NativeOptions {
        initial_window_size: Some(egui::Vec2::new(300.0, 220.0)),
        resizable: false,
        icon_data: load_icon(),
        ..Default::default()
    };

    let theme = Theme::default();
    let options = ConvertOptions::default();
    info!("Starting Image Converter");

    eframe::run_native(
        "Image Converter",
        native_options,
        Box::new(move |cc| Box::new(App::new(cc, theme, options))),
    );
}

fn load_icon() -> Option<IconData> {
    match image::open(ICON_PATH) {
        Ok(icon) => {
            let icon = icon.into_rgba8();
            let (width, height) = icon.dimensions();
            Some(IconData {
                rgba: icon.into_raw(),
                width,
                height,
            })
        }
        Err(e) => {
            warn!("Icon file not found ({}). Using default icon.", e);
            None
        }
    }
}

use tracing::{debug, info};

use crate::app::file_dialogs;
use crate::app::image_processing;
use crate::app::{App, Notification};
use crate::converter::{ConversionRequest, ConvertError, TargetFormat};
use egui::{Align2, Button, ComboBox, Frame, RichText, Rounding};

const BUTTON_WIDTH: f32 = 180.0;

pub fn render(app: &mut App, ctx: &egui::Context) {
    let theme = app.theme;
    let frame = Frame {
        fill: theme.window_bg,
        rounding: Rounding::none(),
        inner_margin: egui::style::Margin::same(10.0),
        ..Default::default()
    };

    egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("Select an image to convert:")
                    .size(theme.label_size)
                    .color(theme.label_fg),
            );
            ui.add_space(2.0);
            if ui.add_sized([BUTTON_WIDTH, 26.0], button("Select Image", app)).clicked() {
                if let Some(path) = file_dialogs::select_image() {
                    info!("Selected {}", path.display());
                    app.selected_file = Some(path);
                }
            }
            if let Some(name) = app.selected_file.as_ref().and_then(|p| p.file_name()) {
                ui.label(RichText::new(name.to_string_lossy()).size(theme.dropdown_size));
            }

            ui.add_space(10.0);
            ui.label(
                RichText::new("Choose output format:")
                    .size(theme.label_size)
                    .color(theme.label_fg),
            );
            ComboBox::from_id_source("output_format")
                .width(BUTTON_WIDTH)
                .selected_text(RichText::new(app.selected_format).size(theme.dropdown_size))
                .show_ui(ui, |ui| {
                    for choice in TargetFormat::choices() {
                        ui.selectable_value(
                            &mut app.selected_format,
                            choice,
                            RichText::new(choice).size(theme.dropdown_size),
                        );
                    }
                });

            ui.add_space(10.0);
            let enabled = !app.is_converting();
            let label = if enabled { "Convert and Save" } else { "Converting..." };
            if ui
                .add_enabled_ui(enabled, |ui| ui.add_sized([BUTTON_WIDTH, 26.0], button(label, app)))
                .inner
                .clicked()
            {
                convert_and_save(app);
            }
        });
    });

    show_notification(app, ctx);
}

fn button(text: &str, app: &App) -> Button {
    Button::new(
        RichText::new(text)
            .size(app.theme.button_size)
            .strong()
            .color(app.theme.button_fg),
    )
}

/// Validates what can be validated up front, asks where to save, then hands
/// the request to a worker thread.
fn convert_and_save(app: &mut App) {
    let Some(source) = app.selected_file.clone() else {
        app.notification = Some(Notification::error(ConvertError::NoFileSelected.user_message()));
        return;
    };
    let format: TargetFormat = match app.selected_format.parse() {
        Ok(format) => format,
        Err(e) => {
            app.notification = Some(Notification::error(e.user_message()));
            return;
        }
    };

    let Some(destination) = file_dialogs::select_destination(&source, format) else {
        debug!("Save dialog cancelled");
        return;
    };

    let request = ConversionRequest {
        source: Some(source),
        format: app.selected_format.to_string(),
        destination,
    };
    app.conversion_receiver = Some(image_processing::start_conversion(request, app.options.clone()));
}

fn show_notification(app: &mut App, ctx: &egui::Context) {
    let Some(notification) = app.notification.clone() else {
        return;
    };

    let mut dismissed = false;
    egui::Window::new(notification.title())
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(notification.message.as_str());
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });

    if dismissed {
        app.notification = None;
    }
}

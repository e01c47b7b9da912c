// app.rs
pub mod file_dialogs;
pub mod gui;
pub mod image_processing;
pub mod theme;

use eframe::egui;
use eframe::App as EframeApp;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use tracing::warn;

use crate::converter::{ConvertOptions, TargetFormat};
use theme::Theme;

#[derive(Clone, Debug, PartialEq)]
pub enum ConversionUpdate {
    Succeeded(PathBuf),
    Failed(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Error, message: message.into() }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            NotificationKind::Success => "Success",
            NotificationKind::Error => "Error",
        }
    }
}

impl From<ConversionUpdate> for Notification {
    fn from(update: ConversionUpdate) -> Self {
        match update {
            ConversionUpdate::Succeeded(path) => Notification::success(format!(
                "Image converted and saved as:\n{}",
                path.display()
            )),
            ConversionUpdate::Failed(message) => Notification::error(message),
        }
    }
}

pub struct App {
    pub theme: Theme,
    pub options: ConvertOptions,
    pub selected_file: Option<PathBuf>,
    pub selected_format: &'static str,
    pub notification: Option<Notification>,
    pub conversion_receiver: Option<Receiver<ConversionUpdate>>,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, theme: Theme, options: ConvertOptions) -> Self {
        theme.apply(&cc.egui_ctx);
        Self::with_theme(theme, options)
    }

    fn with_theme(theme: Theme, options: ConvertOptions) -> Self {
        Self {
            theme,
            options,
            selected_file: None,
            selected_format: TargetFormat::choices()[0],
            notification: None,
            conversion_receiver: None,
        }
    }

    pub fn is_converting(&self) -> bool {
        self.conversion_receiver.is_some()
    }

    /// Drains the worker channel, turning its single update into a notification.
    fn poll_conversion(&mut self) -> bool {
        let Some(receiver) = &self.conversion_receiver else {
            return false;
        };
        match receiver.try_recv() {
            Ok(update) => {
                self.notification = Some(update.into());
                self.conversion_receiver = None;
                true
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => false,
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                warn!("Conversion worker exited without reporting");
                self.notification = Some(Notification::error(
                    "An error occurred:\nthe conversion stopped unexpectedly",
                ));
                self.conversion_receiver = None;
                true
            }
        }
    }
}

impl EframeApp for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let needs_redraw = self.poll_conversion();

        gui::render(self, ctx);

        if needs_redraw || self.is_converting() {
            ctx.request_repaint();
        }
    }
}

//! Colors and font sizes of the converter window.

use egui::{Color32, Context};

/// Built once at startup and handed to the GUI; never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub window_bg: Color32,
    pub label_fg: Color32,
    pub button_bg: Color32,
    pub button_bg_hover: Color32,
    pub button_fg: Color32,
    pub label_size: f32,
    pub button_size: f32,
    pub dropdown_size: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            window_bg: Color32::from_rgb(0xed, 0xf2, 0xf4),
            label_fg: Color32::from_rgb(0xb0, 0x1b, 0x07),
            button_bg: Color32::from_rgb(0x8d, 0x99, 0xae),
            button_bg_hover: Color32::from_rgb(0xa1, 0xab, 0xbf),
            button_fg: Color32::BLACK,
            label_size: 14.0,
            button_size: 10.0,
            dropdown_size: 11.0,
        }
    }
}

impl Theme {
    /// Installs the button fills so egui swaps them on hover.
    pub fn apply(&self, ctx: &Context) {
        let mut visuals = egui::Visuals::light();
        visuals.widgets.inactive.bg_fill = self.button_bg;
        visuals.widgets.hovered.bg_fill = self.button_bg_hover;
        visuals.widgets.active.bg_fill = self.button_bg_hover;
        visuals.widgets.inactive.fg_stroke.color = self.button_fg;
        visuals.widgets.hovered.fg_stroke.color = self.button_fg;
        visuals.widgets.active.fg_stroke.color = self.button_fg;
        ctx.set_visuals(visuals);
    }
}

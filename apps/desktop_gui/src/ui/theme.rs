//! Dark palette and egui visuals for the browser window.

use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrowserPalette {
    pub app_background: egui::Color32,
    pub surface: egui::Color32,
    pub row_hover: egui::Color32,
    pub row_active: egui::Color32,
    pub row_stroke_active: egui::Color32,
    pub badge_fill: egui::Color32,
    pub badge_stroke: egui::Color32,
    pub control_fill: egui::Color32,
    pub control_hover: egui::Color32,
    pub field_fill: egui::Color32,
    pub text: egui::Color32,
    pub weak_text: egui::Color32,
    pub error_text: egui::Color32,
}

impl Default for BrowserPalette {
    fn default() -> Self {
        Self {
            app_background: egui::Color32::from_rgb(20, 20, 20),
            surface: egui::Color32::from_rgb(31, 31, 31),
            row_hover: egui::Color32::from_rgb(42, 42, 42),
            row_active: egui::Color32::from_rgb(42, 42, 42),
            row_stroke_active: egui::Color32::from_rgb(77, 77, 77),
            badge_fill: egui::Color32::from_rgb(41, 41, 41),
            badge_stroke: egui::Color32::from_rgb(77, 77, 77),
            control_fill: egui::Color32::from_rgb(51, 51, 51),
            control_hover: egui::Color32::from_rgb(68, 68, 68),
            field_fill: egui::Color32::from_rgb(42, 42, 42),
            text: egui::Color32::WHITE,
            weak_text: egui::Color32::from_rgb(170, 170, 176),
            error_text: egui::Color32::from_rgb(239, 68, 68),
        }
    }
}

pub fn lighten_color(c: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    egui::Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}

pub fn visuals_for_palette(palette: BrowserPalette) -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.override_text_color = Some(palette.text);
    visuals.panel_fill = palette.app_background;
    visuals.window_fill = palette.surface;
    visuals.extreme_bg_color = palette.field_fill;
    visuals.faint_bg_color = palette.row_hover;
    visuals.hyperlink_color = palette.text;
    visuals.selection.bg_fill = palette.control_hover;

    visuals.widgets.inactive.weak_bg_fill = palette.control_fill;
    visuals.widgets.inactive.bg_fill = palette.control_fill;
    visuals.widgets.hovered.weak_bg_fill = palette.control_hover;
    visuals.widgets.hovered.bg_fill = palette.control_hover;
    visuals.widgets.active.weak_bg_fill = lighten_color(palette.control_hover, 0.08);

    let radius = egui::CornerRadius::same(8);
    visuals.widgets.noninteractive.corner_radius = radius;
    visuals.widgets.inactive.corner_radius = radius;
    visuals.widgets.hovered.corner_radius = radius;
    visuals.widgets.active.corner_radius = radius;
    visuals.widgets.open.corner_radius = radius;
    visuals.window_corner_radius = egui::CornerRadius::same(10);

    visuals
}

use eframe::egui::{
    Color32, Frame, Margin, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

use crate::config::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_card: Color32,
    pub bg_raised: Color32,
    pub outline: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub accent_strong: Color32,
    pub accent_soft: Color32,
    pub error_fill: Color32,
    pub error_text: Color32,
    pub success: Color32,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            bg_primary: Color32::from_rgb(238, 242, 255),
            bg_card: Color32::from_rgb(255, 255, 255),
            bg_raised: Color32::from_rgb(243, 244, 246),
            outline: Color32::from_rgb(209, 213, 219),
            text_primary: Color32::from_rgb(31, 41, 55),
            text_muted: Color32::from_rgb(107, 114, 128),
            accent: Color32::from_rgb(99, 102, 241),
            accent_strong: Color32::from_rgb(67, 56, 202),
            accent_soft: Color32::from_rgb(224, 231, 255),
            error_fill: Color32::from_rgb(254, 226, 226),
            error_text: Color32::from_rgb(185, 28, 28),
            success: Color32::from_rgb(22, 163, 74),
        },
        Theme::Dark => Palette {
            bg_primary: Color32::from_rgb(10, 10, 12),
            bg_card: Color32::from_rgb(26, 28, 30),
            bg_raised: Color32::from_rgb(42, 44, 48),
            outline: Color32::from_rgb(56, 60, 66),
            text_primary: Color32::from_rgb(185, 192, 200),
            text_muted: Color32::from_rgb(140, 146, 155),
            accent: Color32::from_rgb(167, 217, 255),
            accent_strong: Color32::from_rgb(127, 255, 212),
            accent_soft: Color32::from_rgb(30, 40, 52),
            error_fill: Color32::from_rgb(60, 30, 26),
            error_text: Color32::from_rgb(230, 140, 110),
            success: Color32::from_rgb(102, 176, 136),
        },
    }
}

/// Full visuals for `theme`.
pub fn visuals(theme: Theme) -> Visuals {
    let palette = palette(theme);
    let mut visuals = match theme {
        Theme::Light => Visuals::light(),
        Theme::Dark => Visuals::dark(),
    };
    visuals.window_fill = palette.bg_card;
    visuals.panel_fill = palette.bg_primary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.hyperlink_color = palette.accent_strong;
    visuals.extreme_bg_color = palette.bg_raised;
    visuals.faint_bg_color = palette.bg_card;
    visuals.error_fg_color = palette.error_text;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent);
    visuals.widgets.noninteractive.bg_fill = palette.bg_card;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    set_rounded(&mut visuals.widgets.inactive, palette);
    set_rounded(&mut visuals.widgets.hovered, palette);
    set_rounded(&mut visuals.widgets.active, palette);
    set_rounded(&mut visuals.widgets.open, palette);
    visuals.popup_shadow = Shadow::NONE;
    visuals
}

fn set_rounded(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::same(8);
    vis.bg_stroke = Stroke::new(1.0, palette.outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

/// White (or dark) rounded card used for every content block.
pub fn card_frame(palette: Palette) -> Frame {
    Frame::new()
        .fill(palette.bg_card)
        .stroke(Stroke::new(1.0, palette.outline))
        .corner_radius(CornerRadius::same(16))
        .inner_margin(Margin::same(20))
}

/// Inline error panel.
pub fn error_frame(palette: Palette) -> Frame {
    Frame::new()
        .fill(palette.error_fill)
        .stroke(Stroke::new(1.0, palette.error_text))
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::same(12))
}

/// Drop zone outline, stronger while files hover over the window.
pub fn drop_zone_frame(palette: Palette, hovered: bool) -> Frame {
    let (fill, stroke) = if hovered {
        (palette.accent_soft, Stroke::new(2.0, palette.accent))
    } else {
        (palette.bg_raised, Stroke::new(1.5, palette.outline))
    };
    Frame::new()
        .fill(fill)
        .stroke(stroke)
        .corner_radius(CornerRadius::same(12))
        .inner_margin(Margin::same(28))
}

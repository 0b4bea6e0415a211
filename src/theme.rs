//! Theme data model: built-in palettes and resolution from config.

use ratatui::style::Color;

use crate::config::{ThemeColorsConfig, ThemeConfig};

/// All runtime colors used in the UI.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub folder_fg: Color,
    pub file_fg: Color,
    pub border_fg: Color,
    pub border_focused_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub url_fg: Color,
    pub dialog_border_fg: Color,

    // Semantic colors, consistent across schemes.
    pub error_fg: Color,
    pub warning_fg: Color,
    pub info_fg: Color,
    pub dim_fg: Color,
}

/// Built-in dark palette.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        selected_bg: Color::Cyan,
        selected_fg: Color::Black,
        folder_fg: Color::Blue,
        file_fg: Color::Gray,
        border_fg: Color::DarkGray,
        border_focused_fg: Color::Cyan,
        status_bg: Color::DarkGray,
        status_fg: Color::White,
        url_fg: Color::Cyan,
        dialog_border_fg: Color::Cyan,
        error_fg: Color::Red,
        warning_fg: Color::Yellow,
        info_fg: Color::Cyan,
        dim_fg: Color::DarkGray,
    }
}

/// Built-in light palette.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        selected_bg: Color::Blue,
        selected_fg: Color::White,
        folder_fg: Color::Blue,
        file_fg: Color::Black,
        border_fg: Color::Gray,
        border_focused_fg: Color::Blue,
        status_bg: Color::Gray,
        status_fg: Color::Black,
        url_fg: Color::Blue,
        dialog_border_fg: Color::Blue,
        error_fg: Color::Red,
        warning_fg: Color::Yellow,
        info_fg: Color::Blue,
        dim_fg: Color::Gray,
    }
}

/// Parse a `#rrggbb` hex string into a Color. Returns `None` on malformed
/// input so a bad override falls back to the scheme color.
fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

fn override_color(slot: &mut Color, value: &Option<String>) {
    if let Some(parsed) = value.as_deref().and_then(parse_hex_color) {
        *slot = parsed;
    }
}

/// Resolve runtime colors from the config theme section.
///
/// "custom" starts from the dark palette and applies hex overrides.
pub fn resolve_theme(config: &ThemeConfig) -> ThemeColors {
    let scheme = config.scheme.as_deref().unwrap_or("dark");
    let mut colors = match scheme {
        "light" => light_theme(),
        _ => dark_theme(),
    };
    if scheme == "custom" {
        if let Some(custom) = &config.custom {
            apply_overrides(&mut colors, custom);
        }
    }
    colors
}

fn apply_overrides(colors: &mut ThemeColors, custom: &ThemeColorsConfig) {
    override_color(&mut colors.selected_bg, &custom.selected_bg);
    override_color(&mut colors.selected_fg, &custom.selected_fg);
    override_color(&mut colors.folder_fg, &custom.folder_fg);
    override_color(&mut colors.file_fg, &custom.file_fg);
    override_color(&mut colors.border_fg, &custom.border_fg);
    override_color(&mut colors.status_bg, &custom.status_bg);
    override_color(&mut colors.status_fg, &custom.status_fg);
    override_color(&mut colors.url_fg, &custom.url_fg);
}

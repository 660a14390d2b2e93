//! Color palettes for the dashboard

use ratatui::prelude::*;

use crate::config::ThemeMode;
use crate::score::Tier;

#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Tier colors (traffic light pattern)
    pub tier_high: Color,
    pub tier_medium: Color,
    pub tier_low: Color,
    pub bar_empty: Color,

    pub title_color: Color,
    pub muted: Color,
    pub header_style: Style,
    pub row_selected: Style,
    pub panel_active: Color,
    pub panel_inactive: Color,
    pub disabled: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popups
    pub popup_border: Color,
    pub popup_title: Style,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            tier_high: Color::Green,
            tier_medium: Color::Yellow,
            tier_low: Color::Red,
            bar_empty: Color::DarkGray,
            title_color: Color::Cyan,
            muted: Color::Gray,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            panel_active: Color::Cyan,
            panel_inactive: Color::DarkGray,
            disabled: Color::Yellow,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
        }
    }

    pub fn light() -> Self {
        Self {
            tier_high: Color::Rgb(0, 128, 0),
            tier_medium: Color::Rgb(176, 112, 0),
            tier_low: Color::Rgb(192, 0, 0),
            bar_empty: Color::Indexed(252),
            title_color: Color::Blue,
            muted: Color::DarkGray,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            panel_active: Color::Blue,
            panel_inactive: Color::Indexed(250),
            disabled: Color::Rgb(176, 112, 0),
            status_bar_bg: Color::Indexed(254),
            status_key_color: Color::Blue,
            flash_success: Color::Rgb(0, 128, 0),
            flash_error: Color::Rgb(192, 0, 0),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
        }
    }

    pub fn tier_color(&self, tier: Tier) -> Color {
        match tier {
            Tier::High => self.tier_high,
            Tier::Medium => self.tier_medium,
            Tier::Low => self.tier_low,
        }
    }
}

/// Pick a palette. `Auto` queries the terminal background and falls back to
/// dark when the terminal does not answer.
pub fn resolve_theme(mode: ThemeMode) -> ThemeColors {
    match mode {
        ThemeMode::Dark => ThemeColors::dark(),
        ThemeMode::Light => ThemeColors::light(),
        ThemeMode::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            Ok(_) => ThemeColors::dark(),
            Err(e) => {
                crate::verbose!("Terminal background unknown ({}), using dark theme", e);
                ThemeColors::dark()
            }
        },
    }
}

//! Theme and styling definitions for the confab TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color palette for the TUI.
pub struct Palette;

impl Palette {
    // Base colors
    pub const BG: Color = Color::Rgb(24, 24, 24);
    pub const PANEL_BG: Color = Color::Rgb(30, 30, 30);
    pub const FG: Color = Color::Rgb(221, 221, 221);
    pub const DIM: Color = Color::Rgb(140, 140, 150);

    // Message accents
    pub const USER: Color = Color::Rgb(100, 155, 235);
    pub const ASSISTANT: Color = Color::Rgb(170, 190, 170);

    // Accent colors
    pub const ACCENT: Color = Color::Rgb(100, 155, 235);

    // Status bar colors (high contrast)
    pub const STATUS_BG: Color = Color::Rgb(40, 40, 52);
    pub const STATUS_KEY_BG: Color = Color::Rgb(60, 85, 140);

    // Border colors
    pub const BORDER: Color = Color::Rgb(60, 60, 70);
    pub const BORDER_ACTIVE: Color = Color::Rgb(100, 155, 235);
}

/// Spinner frames for the waiting indicator.
pub struct Symbols;

impl Symbols {
    pub const SPINNER: [&'static str; 4] = ["|", "/", "-", "\\"];
}

/// Common styles used throughout the TUI.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::BG)
    }

    /// Dimmed text for secondary information.
    pub fn dim() -> Style {
        Style::default().fg(Palette::DIM).bg(Palette::BG)
    }

    /// Highlighted/selected item.
    pub fn highlight() -> Style {
        Style::default()
            .fg(Palette::ACCENT)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// User message prefix.
    pub fn user() -> Style {
        Style::default()
            .fg(Palette::USER)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Assistant message prefix.
    pub fn assistant() -> Style {
        Style::default()
            .fg(Palette::ASSISTANT)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Title style.
    pub fn title() -> Style {
        Style::default()
            .fg(Palette::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Inactive pane border.
    pub fn border() -> Style {
        Style::default().fg(Palette::BORDER)
    }

    /// Focused pane border.
    pub fn border_active() -> Style {
        Style::default().fg(Palette::BORDER_ACTIVE)
    }

    /// Status bar base style.
    pub fn status_bar() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Key hint style (for status bar).
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Palette::FG)
            .bg(Palette::STATUS_KEY_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Key hint label style.
    pub fn key_label() -> Style {
        Style::default().fg(Palette::DIM).bg(Palette::STATUS_BG)
    }
}

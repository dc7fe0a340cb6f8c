//! Color palettes and the dark/light toggle.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn palette(self) -> &'static Theme {
        match self {
            Self::Dark => &DARK,
            Self::Light => &LIGHT,
        }
    }
}

pub struct Theme {
    pub base: Style,
    pub title: Style,
    pub text_dim: Style,
    pub text_accent: Style,
    pub text_error: Style,
    pub text_bold: Style,
    pub card_border: Style,
    pub card_border_selected: Style,
    pub placeholder: Style,
    pub error_block: Style,
    pub button: Style,
    pub toast: Style,
    pub footer_key: Style,
    pub footer_bg: Style,
}

pub static DARK: Theme = Theme {
    base: Style::new().fg(Color::White).bg(Color::Reset),
    title: Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    text_dim: Style::new().fg(Color::DarkGray),
    text_accent: Style::new().fg(Color::Cyan),
    text_error: Style::new().fg(Color::Red),
    text_bold: Style::new().add_modifier(Modifier::BOLD),
    card_border: Style::new().fg(Color::DarkGray),
    card_border_selected: Style::new().fg(Color::Cyan),
    placeholder: Style::new().fg(Color::DarkGray),
    error_block: Style::new().fg(Color::Red),
    button: Style::new().fg(Color::Black).bg(Color::Cyan),
    toast: Style::new().fg(Color::White).bg(Color::Red),
    footer_key: Style::new().fg(Color::Yellow),
    footer_bg: Style::new().bg(Color::DarkGray),
};

pub static LIGHT: Theme = Theme {
    base: Style::new().fg(Color::Black).bg(Color::White),
    title: Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD),
    text_dim: Style::new().fg(Color::Gray),
    text_accent: Style::new().fg(Color::Blue),
    text_error: Style::new().fg(Color::Red),
    text_bold: Style::new().add_modifier(Modifier::BOLD),
    card_border: Style::new().fg(Color::Gray),
    card_border_selected: Style::new().fg(Color::Blue),
    placeholder: Style::new().fg(Color::Gray),
    error_block: Style::new().fg(Color::Red),
    button: Style::new().fg(Color::White).bg(Color::Blue),
    toast: Style::new().fg(Color::White).bg(Color::Red),
    footer_key: Style::new().fg(Color::Magenta),
    footer_bg: Style::new().fg(Color::Black).bg(Color::Gray),
};

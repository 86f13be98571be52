//! Theme configuration

use iced::widget::{button, container};
use iced::{Background, Border, Color, Theme};

/// Dark purple palette
pub struct DarkTheme;

impl DarkTheme {
    pub const BACKGROUND: Color = Color::from_rgb(0.07, 0.06, 0.16);
    pub const SIDEBAR: Color = Color::from_rgb(0.04, 0.04, 0.08);
    pub const SURFACE: Color = Color::from_rgb(0.16, 0.13, 0.33);
    pub const SURFACE_HIGHLIGHT: Color = Color::from_rgb(0.25, 0.16, 0.42);
    pub const BORDER: Color = Color::from_rgb(0.58, 0.2, 0.92);
    pub const PRIMARY: Color = Color::from_rgb(0.66, 0.33, 0.97);
    pub const ACCENT: Color = Color::from_rgb(0.93, 0.28, 0.6);
    pub const TEXT: Color = Color::from_rgb(0.95, 0.95, 0.95);
    pub const TEXT_MUTED: Color = Color::from_rgb(0.77, 0.71, 0.99);
    pub const ERROR_SURFACE: Color = Color::from_rgb(0.5, 0.11, 0.11);
    pub const ERROR_BORDER: Color = Color::from_rgb(0.86, 0.15, 0.15);
}

pub fn card(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(DarkTheme::SURFACE)),
        border: Border {
            color: DarkTheme::BORDER,
            width: 1.0,
            radius: 12.0.into(),
        },
        ..Default::default()
    }
}

pub fn error_banner(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(DarkTheme::ERROR_SURFACE)),
        border: Border {
            color: DarkTheme::ERROR_BORDER,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

pub fn bubble(from_user: bool) -> impl Fn(&Theme) -> container::Style {
    move |_theme| container::Style {
        background: Some(Background::Color(if from_user {
            DarkTheme::PRIMARY
        } else {
            DarkTheme::SURFACE_HIGHLIGHT
        })),
        border: Border::default().rounded(8),
        ..Default::default()
    }
}

pub fn primary_button(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => DarkTheme::ACCENT,
        button::Status::Disabled => DarkTheme::SURFACE_HIGHLIGHT,
        button::Status::Active => DarkTheme::PRIMARY,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: DarkTheme::TEXT,
        border: Border::default().rounded(8),
        ..Default::default()
    }
}

pub fn nav_button(active: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme, status| {
        let highlighted = active || matches!(status, button::Status::Hovered);
        button::Style {
            background: Some(Background::Color(if highlighted {
                DarkTheme::SURFACE_HIGHLIGHT
            } else {
                Color::TRANSPARENT
            })),
            text_color: DarkTheme::TEXT,
            border: Border {
                color: if active {
                    DarkTheme::BORDER
                } else {
                    Color::TRANSPARENT
                },
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        }
    }
}

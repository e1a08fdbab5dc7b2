//! Widget styles

use iced::widget::{button, container};
use iced::{Background, Border, Color, Theme};

const BACKGROUND: Color = Color::from_rgb(0.12, 0.12, 0.14);
const SURFACE: Color = Color::from_rgb(0.18, 0.18, 0.21);
const ACCENT: Color = Color::from_rgb(0.23, 0.47, 0.85);
pub const SUCCESS: Color = Color::from_rgb(0.30, 0.75, 0.40);
pub const FAILURE: Color = Color::from_rgb(1.0, 0.3, 0.3);
pub const MUTED: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.7);

pub fn window_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(BACKGROUND)),
        text_color: Some(Color::WHITE),
        ..Default::default()
    }
}

pub fn section_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(SURFACE)),
        border: Border {
            color: Color::from_rgba(1.0, 1.0, 1.0, 0.08),
            width: 1.0,
            radius: 10.0.into(),
        },
        ..Default::default()
    }
}

pub fn primary_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => Color::from_rgb(0.30, 0.55, 0.92),
        button::Status::Pressed => Color::from_rgb(0.18, 0.38, 0.72),
        button::Status::Disabled => Color::from_rgba(0.23, 0.47, 0.85, 0.4),
        button::Status::Active => ACCENT,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: Color::WHITE,
        border: Border {
            radius: 8.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn secondary_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    let alpha = match status {
        button::Status::Hovered => 0.18,
        button::Status::Pressed => 0.25,
        button::Status::Disabled => 0.04,
        button::Status::Active => 0.1,
    };
    button::Style {
        background: Some(Background::Color(Color::from_rgba(1.0, 1.0, 1.0, alpha))),
        text_color: if status == button::Status::Disabled {
            Color::from_rgba(1.0, 1.0, 1.0, 0.4)
        } else {
            Color::WHITE
        },
        border: Border {
            radius: 8.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

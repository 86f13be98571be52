//! Text input shared by the search form and the chat box

use iced::widget::text_input;
use iced::{Background, Border, Element, Length, Padding};

use super::theme::DarkTheme;

pub fn view<'a, Message: Clone + 'a>(
    placeholder: &str,
    value: &str,
    on_input: impl Fn(String) -> Message + 'a,
    on_submit: Message,
) -> Element<'a, Message> {
    text_input(placeholder, value)
        .on_input(on_input)
        .on_submit(on_submit)
        .padding(Padding::new(12.0))
        .size(16)
        .width(Length::Fill)
        .style(|_theme, _status| text_input::Style {
            background: Background::Color(DarkTheme::BACKGROUND),
            border: Border {
                color: DarkTheme::BORDER,
                width: 1.0,
                radius: 8.0.into(),
            },
            icon: DarkTheme::TEXT_MUTED,
            placeholder: DarkTheme::TEXT_MUTED,
            value: DarkTheme::TEXT,
            selection: DarkTheme::PRIMARY,
        })
        .into()
}

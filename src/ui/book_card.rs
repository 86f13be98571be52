//! Card showing one book

use iced::widget::{button, column, container, row, text, Space};
use iced::{Element, Length};

use bookify::Book;

use super::theme::{self, DarkTheme};

/// What the card's corner button does
pub enum SaveAction<Message> {
    /// Library cards have no button
    Hidden,
    Save(Message),
    AlreadySaved,
}

pub fn view<'a, Message: Clone + 'a>(
    book: &'a Book,
    action: SaveAction<Message>,
) -> Element<'a, Message> {
    let byline = if book.year > 0 {
        format!("{} · {}", book.author, book.year)
    } else {
        book.author.clone()
    };

    let save_button = match action {
        SaveAction::Hidden => None,
        SaveAction::Save(message) => Some(
            button(text("+").size(16))
                .on_press(message)
                .style(theme::primary_button),
        ),
        SaveAction::AlreadySaved => Some(button(text("Saved").size(12)).style(theme::primary_button)),
    };

    let header = row![
        text(&book.title).size(17).color(DarkTheme::TEXT),
        Space::with_width(Length::Fill),
    ]
    .push_maybe(save_button)
    .spacing(8)
    .align_y(iced::Alignment::Center);

    let body = column![
        header,
        text(byline).size(13).color(DarkTheme::TEXT_MUTED),
        row![
            text("★").color(DarkTheme::ACCENT),
            text(format!("{:.1}", book.rating)).color(DarkTheme::TEXT),
        ]
        .spacing(6),
        text(&book.description).size(13).color(DarkTheme::TEXT_MUTED),
    ]
    .push_maybe(
        book.match_reason
            .as_ref()
            .map(|reason| text(reason).size(13).color(DarkTheme::ACCENT)),
    )
    .spacing(6);

    container(body)
        .padding(16)
        .width(Length::Fill)
        .style(theme::card)
        .into()
}

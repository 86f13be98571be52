//! Core application shell and Iced Application implementation
//!
//! Holds one instance of each state controller and only talks to them
//! through their methods. Network calls are run as Iced tasks whose results
//! come back as messages.

use iced::widget::{button, column, container, pick_list, row, scrollable, slider, text, Space};
use iced::{Background, Border, Element, Length, Padding, Task, Theme};

use bookify::backend::{BackendClient, Book, Genre};
use bookify::state::recommend::MIN_RATING_RANGE;
use bookify::state::{
    ChatController, ChatDone, Navigation, RecommendCall, RecommendDone, RecommendationController,
    Role, SavedCollection, View,
};

use crate::ui::book_card::{self, SaveAction};
use crate::ui::search_bar;
use crate::ui::theme::{self, DarkTheme};

// ============================================================================
// Application State
// ============================================================================

pub struct Bookify {
    backend: BackendClient,
    navigation: Navigation,
    recommend: RecommendationController,
    chat: ChatController,
    library: SavedCollection,
}

#[derive(Debug, Clone)]
pub enum Message {
    Navigate(View),
    QueryChanged(String),
    GenreSelected(Genre),
    MinRatingChanged(f32),
    SearchSubmit,
    SearchComplete(RecommendDone),
    SaveBook(Book),
    ChatInputChanged(String),
    ChatSubmit,
    ChatReply(ChatDone),
}

impl Bookify {
    pub fn new(backend: BackendClient) -> Self {
        Self {
            backend,
            navigation: Navigation::new(),
            recommend: RecommendationController::new(),
            chat: ChatController::new(),
            library: SavedCollection::new(),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(view) => {
                self.navigation.set_view(view);
                Task::none()
            }

            Message::QueryChanged(query) => {
                self.recommend.set_query(query);
                Task::none()
            }

            Message::GenreSelected(genre) => {
                self.recommend.set_genre(genre);
                Task::none()
            }

            Message::MinRatingChanged(rating) => {
                self.recommend.set_min_rating(rating);
                Task::none()
            }

            Message::SearchSubmit => match self.start_search() {
                Some(call) => Task::perform(call.run(self.backend.clone()), Message::SearchComplete),
                None => Task::none(),
            },

            Message::SearchComplete(done) => {
                self.recommend.finish(done);
                Task::none()
            }

            Message::SaveBook(book) => {
                self.library.save(&book);
                Task::none()
            }

            Message::ChatInputChanged(input) => {
                self.chat.set_input(input);
                Task::none()
            }

            Message::ChatSubmit => match self.chat.send_input() {
                Some(call) => Task::perform(call.run(self.backend.clone()), Message::ChatReply),
                None => Task::none(),
            },

            Message::ChatReply(done) => {
                self.chat.finish(done);
                Task::none()
            }
        }
    }

    fn start_search(&mut self) -> Option<RecommendCall> {
        // Enter in the query box bypasses the disabled button
        if !self.recommend.can_submit() {
            return None;
        }
        Some(self.recommend.submit())
    }

    pub fn view(&self) -> Element<'_, Message> {
        let page = match self.navigation.active() {
            View::Home => self.view_home(),
            View::Library => self.view_library(),
            View::Chat => self.view_chat(),
        };

        let content = container(page)
            .padding(24)
            .width(Length::Fill)
            .height(Length::Fill);

        container(row![self.view_sidebar(), content])
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(Background::Color(DarkTheme::BACKGROUND)),
                ..Default::default()
            })
            .into()
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    // ========================================================================
    // Pages
    // ========================================================================

    fn view_sidebar(&self) -> Element<'_, Message> {
        let active = self.navigation.active();
        let entries = View::ALL.into_iter().map(|view| {
            let icon = match view {
                View::Home => "🏠",
                View::Library => "📚",
                View::Chat => "💬",
            };
            button(text(format!("{} {}", icon, view.label())).size(15))
                .on_press(Message::Navigate(view))
                .width(Length::Fill)
                .padding(Padding::from([8.0, 12.0]))
                .style(theme::nav_button(view == active))
                .into()
        });

        container(
            column![
                text("📚 Bookify").size(22).color(DarkTheme::PRIMARY),
                Space::with_height(16),
                column(entries).spacing(8),
            ]
            .spacing(0),
        )
        .padding(24)
        .width(240)
        .height(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Background::Color(DarkTheme::SIDEBAR)),
            border: Border {
                color: DarkTheme::SURFACE_HIGHLIGHT,
                width: 1.0,
                radius: 0.0.into(),
            },
            ..Default::default()
        })
        .into()
    }

    fn view_home(&self) -> Element<'_, Message> {
        let criteria = self.recommend.criteria();
        let pending = self.recommend.state().is_pending();
        let (min, max) = MIN_RATING_RANGE;

        let form = column![
            text("Discover Books").size(26).color(DarkTheme::PRIMARY),
            text("Find your next favorite read").color(DarkTheme::TEXT_MUTED),
            search_bar::view(
                "What kind of books are you looking for?",
                &criteria.query,
                Message::QueryChanged,
                Message::SearchSubmit,
            ),
            row![
                pick_list(&Genre::ALL[..], Some(criteria.genre), Message::GenreSelected)
                    .placeholder("Select Genre")
                    .width(Length::FillPortion(1)),
                column![
                    text("Minimum Rating").size(13).color(DarkTheme::TEXT_MUTED),
                    slider(min..=max, criteria.min_rating, Message::MinRatingChanged).step(0.1),
                    text(format!("{:.1}", criteria.min_rating))
                        .size(13)
                        .color(DarkTheme::TEXT_MUTED),
                ]
                .spacing(4)
                .width(Length::FillPortion(1)),
            ]
            .spacing(16)
            .align_y(iced::Alignment::Center),
            button(
                container(text(if pending {
                    "Searching..."
                } else {
                    "✨ Get Recommendations"
                }))
                .center_x(Length::Fill),
            )
            .on_press_maybe(self.recommend.can_submit().then_some(Message::SearchSubmit))
            .width(Length::Fill)
            .padding(10)
            .style(theme::primary_button),
        ]
        .spacing(12);

        let banner = self.recommend.state().error().map(|message| {
            container(text(message).color(DarkTheme::TEXT))
                .padding(16)
                .width(Length::Fill)
                .style(theme::error_banner)
        });

        let cards = self.recommend.results().iter().map(|book| {
            let action = if self.library.contains(&book.title) {
                SaveAction::AlreadySaved
            } else {
                SaveAction::Save(Message::SaveBook(book.clone()))
            };
            book_card::view(book, action)
        });

        scrollable(
            column![container(form).padding(20).style(theme::card)]
                .push_maybe(banner)
                .push(column(cards).spacing(12))
                .spacing(16),
        )
        .height(Length::Fill)
        .into()
    }

    fn view_library(&self) -> Element<'_, Message> {
        let header = container(
            column![
                text("Your Library").size(26).color(DarkTheme::PRIMARY),
                text("Your saved books").color(DarkTheme::TEXT_MUTED),
            ]
            .spacing(4),
        )
        .padding(20)
        .width(Length::Fill)
        .style(theme::card);

        let body: Element<'_, Message> = if self.library.is_empty() {
            text("Nothing saved yet. Use + on a recommendation to keep it here.")
                .color(DarkTheme::TEXT_MUTED)
                .into()
        } else {
            column(
                self.library
                    .iter()
                    .map(|book| book_card::view(book, SaveAction::Hidden)),
            )
            .spacing(12)
            .into()
        };

        scrollable(column![header, body].spacing(16))
            .height(Length::Fill)
            .into()
    }

    fn view_chat(&self) -> Element<'_, Message> {
        let bubbles = self.chat.transcript().iter().map(|turn| {
            let from_user = turn.role == Role::User;
            let bubble = container(text(&turn.text).color(DarkTheme::TEXT))
                .padding(12)
                .max_width(640)
                .style(theme::bubble(from_user));

            if from_user {
                row![Space::with_width(Length::Fill), bubble].into()
            } else {
                row![bubble, Space::with_width(Length::Fill)].into()
            }
        });

        let typing = (self.chat.awaiting_reply() > 0)
            .then(|| text("Assistant is typing...").size(13).color(DarkTheme::TEXT_MUTED));

        let transcript = scrollable(
            column(bubbles)
                .push_maybe(typing)
                .spacing(12)
                .padding(Padding::from([0.0, 12.0])),
        )
        .height(Length::Fill);

        let composer = row![
            search_bar::view(
                "Ask about books...",
                self.chat.input(),
                Message::ChatInputChanged,
                Message::ChatSubmit,
            ),
            button(text("Send"))
                .on_press(Message::ChatSubmit)
                .padding(12)
                .style(theme::primary_button),
        ]
        .spacing(8);

        container(
            column![
                text("Chat with AI Book Assistant")
                    .size(26)
                    .color(DarkTheme::PRIMARY),
                text("Ask questions or get personalized recommendations")
                    .color(DarkTheme::TEXT_MUTED),
                transcript,
                composer,
            ]
            .spacing(12),
        )
        .padding(20)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(theme::card)
        .into()
    }
}

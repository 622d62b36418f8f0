use crate::message::Message;
use crate::model::Notification;
use iced::widget::text::Wrapping;
use iced::widget::{button, center, column, container, mouse_area, opaque, row, text, Space};
use iced::{Color, Element, Length};

/// Dismissible modal card layered over the main content with a dimmed
/// backdrop; clicking outside the card also dismisses it.
pub fn notification_overlay(notification: &Notification) -> Element<'_, Message> {
    let card = container(
        column![
            text(&notification.title).size(20),
            text(&notification.message).wrapping(Wrapping::Word),
            row![
                Space::with_width(Length::Fill),
                button("Close").on_press(Message::DismissNotification),
            ],
        ]
        .spacing(16),
    )
    .padding(24)
    .max_width(420.0)
    .style(container::rounded_box);

    opaque(
        mouse_area(center(opaque(card)).style(|_theme| container::Style {
            background: Some(Color { a: 0.6, ..Color::BLACK }.into()),
            ..container::Style::default()
        }))
        .on_press(Message::DismissNotification),
    )
}

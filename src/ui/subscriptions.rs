use iced::alignment::Alignment;
use iced::widget::{button, column, container, row, text, text_input};
use iced::{Element, Length};

use crate::subscriptions::SubscriptionAction;
use crate::Message;

use super::style;

pub fn view(api_id: &str, busy: bool) -> Element<'_, Message> {
    let mut input = text_input("Subscribed API id", api_id)
        .width(280)
        .padding([7, 8])
        .size(13)
        .style(style::input_style);
    if !busy {
        input = input.on_input(Message::SubscriptionApiIdChanged);
    }

    let action = |label: SubscriptionAction| {
        button(text(label.to_string()).size(12))
            .on_press_maybe((!busy).then_some(Message::SubscriptionActionPressed(label)))
            .padding([7, 14])
            .style(style::danger_button)
    };

    container(
        column![
            text("Subscriptions").size(15),
            text("Revoke the token of a subscription or drop it altogether.")
                .size(12)
                .color(style::TEXT_MUTED),
            row![
                input,
                action(SubscriptionAction::Revoke),
                action(SubscriptionAction::Unsubscribe),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        ]
        .spacing(10),
    )
    .padding(14)
    .width(Length::Fill)
    .style(|_| style::surface_style(style::SURFACE_1, 8.0))
    .into()
}

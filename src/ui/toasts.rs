use iced::alignment::Alignment;
use iced::widget::{button, column, container, horizontal_space, row, scrollable, text};
use iced::{Element, Length};

use crate::notify::Toasts;
use crate::Message;

use super::style;

pub fn view(toasts: &Toasts) -> Element<'_, Message> {
    let header = row![
        text("Notifications").size(11).color(style::TEXT_MUTED),
        horizontal_space(),
        button(text("Clear").size(11))
            .on_press_maybe((!toasts.entries().is_empty()).then_some(Message::ToastsCleared))
            .padding([3, 8])
            .style(style::ghost_button),
    ]
    .align_y(Alignment::Center);

    let mut list = column![].spacing(6);
    for toast in toasts.entries() {
        let kind = toast.kind;
        list = list.push(
            container(
                row![
                    text(&toast.message).size(12).width(Length::Fill),
                    button(text("✕").size(10))
                        .on_press(Message::ToastDismissed(toast.id))
                        .padding([2, 6])
                        .style(style::ghost_button),
                ]
                .spacing(6)
                .align_y(Alignment::Center),
            )
            .padding([6, 8])
            .width(Length::Fill)
            .style(move |_| style::toast_style(kind)),
        );
    }

    container(column![header, scrollable(list).height(Length::Fill)].spacing(8))
        .padding([8, 10])
        .height(Length::Fill)
        .style(|_| style::surface_style(style::SURFACE_0, 0.0))
        .into()
}

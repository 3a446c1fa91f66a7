use iced::alignment::Alignment;
use iced::widget::{button, column, container, horizontal_space, row, text, text_input};
use iced::{Element, Length};

use crate::endpoint::ApiProject;
use crate::session::Session;
use crate::{DashboardTab, Message};

use super::style;

pub fn view<'a>(
    tab: DashboardTab,
    api_id_input: &'a str,
    api: Option<&'a ApiProject>,
    loading: bool,
    submitting: bool,
    session: &'a Session,
) -> Element<'a, Message> {
    let api_id = text_input("API id", api_id_input)
        .on_input(Message::ApiIdChanged)
        .on_submit(Message::LoadPressed)
        .width(220)
        .padding([5, 8])
        .style(style::input_style);

    let load_button = button(text(if loading { "Loading..." } else { "Load" }).size(12))
        .on_press_maybe((!loading && !submitting).then_some(Message::LoadPressed))
        .padding([6, 12])
        .style(style::primary_button);

    let identity = if session.is_signed_in() {
        text(format!("Profile {}", session.profile_id))
            .size(11)
            .color(style::TEXT_MUTED)
    } else {
        text("Not signed in").size(11).color(style::DANGER)
    };

    let top = row![
        text("ZapiAPI Hub").size(16),
        text(format!("v{}", env!("CARGO_PKG_VERSION"))).size(10).color(style::TEXT_MUTED),
        project_label(api),
        horizontal_space(),
        identity,
        api_id,
        load_button
    ]
    .spacing(8)
    .padding([5, 12])
    .align_y(Alignment::Center);

    let tabs = DashboardTab::ALL
        .iter()
        .fold(row![].spacing(0).height(34), |tabs, &candidate| {
            tabs.push(tab_button(candidate, tab))
        });

    container(column![top, tabs].spacing(0))
        .width(Length::Fill)
        .style(|_| style::surface_style(style::SURFACE_1, 0.0))
        .into()
}

fn project_label<'a>(api: Option<&'a ApiProject>) -> Element<'a, Message> {
    match api {
        Some(api) => row![
            text("/").size(14).color(style::TEXT_MUTED),
            text(&api.name).size(14),
        ]
        .spacing(6)
        .align_y(Alignment::Center)
        .into(),
        None => text("No API loaded").size(12).color(style::TEXT_MUTED).into(),
    }
}

fn tab_button<'a>(tab: DashboardTab, active: DashboardTab) -> iced::widget::Button<'a, Message> {
    button(text(tab.to_string()).size(12))
        .on_press(Message::TabSelected(tab))
        .width(140)
        .padding([8, 10])
        .style(move |theme, status| style::section_tab_button(tab == active, theme, status))
}

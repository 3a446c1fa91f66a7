use iced::alignment::Alignment;
use iced::widget::{button, column, container, horizontal_rule, pick_list, row, text, text_input};
use iced::{Border, Color, Element, Length};

use crate::endpoint::{Endpoint, EndpointCatalog};
use crate::http::method::HttpMethod;
use crate::{EndpointEdit, Message};

use super::style;

pub fn view<'a>(
    catalog: &'a EndpointCatalog,
    editing: Option<&'a EndpointEdit>,
    locked: bool,
) -> Element<'a, Message> {
    let heading = row![
        text("Endpoints").size(15),
        text(format!("{}", catalog.len())).size(12).color(style::TEXT_MUTED),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let mut table = column![
        heading,
        row![
            column_label("Method", Length::Fixed(70.0)),
            column_label("Name", Length::FillPortion(2)),
            column_label("Route", Length::FillPortion(3)),
            column_label("Options", Length::FillPortion(2)),
            column_label("", Length::Fixed(130.0)),
        ]
        .spacing(8),
        horizontal_rule(1).style(|_| iced::widget::rule::Style {
            color: style::BORDER,
            width: 1,
            radius: 0.0.into(),
            fill_mode: iced::widget::rule::FillMode::Full,
        }),
    ]
    .spacing(8);

    if catalog.is_empty() {
        table = table.push(text("No endpoints yet").size(12).color(style::TEXT_MUTED));
    }

    for (index, endpoint) in catalog.iter().enumerate() {
        let line = match editing {
            Some(edit) if edit.index == index => edit_row(edit),
            _ => endpoint_row(index, endpoint, locked),
        };
        table = table.push(line);
    }

    container(table)
        .padding(14)
        .width(Length::Fill)
        .style(|_| style::surface_style(style::SURFACE_1, 8.0))
        .into()
}

fn column_label<'a>(label: &'a str, width: Length) -> Element<'a, Message> {
    text(label).size(11).color(style::TEXT_MUTED).width(width).into()
}

fn endpoint_row<'a>(index: usize, endpoint: &'a Endpoint, locked: bool) -> Element<'a, Message> {
    let options = format!(
        "{} headers · {} query · {} body",
        endpoint.headers.len(),
        endpoint.query.len(),
        endpoint.body.len()
    );

    row![
        container(method_badge(endpoint.method)).width(70),
        text(&endpoint.name).size(13).width(Length::FillPortion(2)),
        text(&endpoint.route).size(12).color(style::TEXT_MUTED).width(Length::FillPortion(3)),
        text(options).size(11).color(style::TEXT_MUTED).width(Length::FillPortion(2)),
        row![
            button(text("Edit").size(11))
                .on_press_maybe((!locked).then_some(Message::EditEndpointPressed(index)))
                .padding([4, 10])
                .style(style::subtle_button),
            button(text("Remove").size(11))
                .on_press_maybe((!locked).then_some(Message::RemoveEndpointPressed(index)))
                .padding([4, 10])
                .style(style::danger_button),
        ]
        .spacing(6)
        .width(130),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}

fn edit_row(edit: &EndpointEdit) -> Element<'_, Message> {
    row![
        pick_list(&HttpMethod::ALL[..], Some(edit.method), Message::EditMethodSelected)
            .width(70)
            .padding([4, 6])
            .text_size(11)
            .style(style::pick_list_style),
        text_input("Name", &edit.name)
            .on_input(Message::EditNameChanged)
            .on_submit(Message::EditSaved)
            .width(Length::FillPortion(2))
            .padding([4, 8])
            .size(12)
            .style(style::input_style),
        text_input("Route", &edit.route)
            .on_input(Message::EditRouteChanged)
            .on_submit(Message::EditSaved)
            .width(Length::FillPortion(5))
            .padding([4, 8])
            .size(12)
            .style(style::input_style),
        row![
            button(text("Save").size(11))
                .on_press(Message::EditSaved)
                .padding([4, 10])
                .style(style::primary_button),
            button(text("Cancel").size(11))
                .on_press(Message::EditCancelled)
                .padding([4, 10])
                .style(style::ghost_button),
        ]
        .spacing(6)
        .width(130),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}

fn method_badge<'a>(method: HttpMethod) -> Element<'a, Message> {
    let color = style::method_color(method);
    let label = match method {
        HttpMethod::Get => "GET",
        HttpMethod::Post => "POST",
        HttpMethod::Patch => "PTCH",
        HttpMethod::Delete => "DEL",
    };
    container(text(label).size(10).color(color))
        .padding([2, 4])
        .width(42)
        .center_x(Length::Shrink)
        .style(move |_| {
            container::Style::default()
                .background(iced::Background::Color(Color { a: 0.12, ..color }))
                .border(Border {
                    radius: 3.0.into(),
                    width: 0.0,
                    color: Color::TRANSPARENT,
                })
        })
        .into()
}

use iced::alignment::Alignment;
use iced::widget::{button, column, container, horizontal_space, pick_list, row, text, text_input};
use iced::{Element, Length};

use crate::endpoint::{EndpointCatalog, OptionKind};
use crate::options::OptionSet;
use crate::testing::TestDraft;
use crate::Message;

use super::style;

pub fn view<'a>(
    draft: Option<&'a TestDraft>,
    catalog: &'a EndpointCatalog,
    project_loaded: bool,
    submitting: bool,
) -> Element<'a, Message> {
    let Some(draft) = draft else {
        let create = button(text("Create Test").size(13))
            .on_press_maybe(project_loaded.then_some(Message::CreateTestPressed))
            .padding([8, 14])
            .style(style::primary_button);
        let hint = if project_loaded {
            "Pick one of the project's endpoints and supply values for its options"
        } else {
            "Load an API project to create tests"
        };
        return row![create, text(hint).size(12).color(style::TEXT_MUTED)]
            .spacing(10)
            .align_y(Alignment::Center)
            .into();
    };

    let editable = !submitting;

    let mut name = text_input("Test name", &draft.test_name)
        .padding([7, 8])
        .size(13)
        .style(style::input_style);
    if editable {
        name = name.on_input(Message::TestNameChanged);
    }

    let endpoint_select: Element<'a, Message> = if editable {
        pick_list(
            catalog.names(),
            draft.endpoint_name().map(str::to_string),
            Message::TestEndpointSelected,
        )
        .placeholder("Endpoint")
        .width(200)
        .padding([7, 8])
        .style(style::pick_list_style)
        .into()
    } else {
        super::locked_choice(draft.endpoint_name().unwrap_or_default().to_string(), 200)
    };

    let route = text_input("Route", draft.route())
        .padding([7, 8])
        .size(13)
        .style(style::input_style);

    let mut form = column![
        row![
            text("New test").size(15),
            horizontal_space(),
            button(text("Cancel").size(12))
                .on_press_maybe(editable.then_some(Message::TestCancelled))
                .padding([5, 10])
                .style(style::ghost_button),
        ]
        .align_y(Alignment::Center),
        name,
        row![endpoint_select, route].spacing(8).align_y(Alignment::Center),
    ]
    .spacing(12);

    if let Some(endpoint) = draft.endpoint() {
        let values = draft.values();
        form = form.push(value_section(
            "Headers",
            OptionKind::Header,
            &endpoint.headers,
            &values.headers,
            &draft.header_value,
            editable,
        ));
        form = form.push(value_section(
            "Query parameters",
            OptionKind::Query,
            &endpoint.query,
            &values.params,
            &draft.param_value,
            editable,
        ));
        form = form.push(value_section(
            "Body",
            OptionKind::Body,
            &endpoint.body,
            &values.body,
            &draft.body_value,
            editable,
        ));
    } else if catalog.is_empty() {
        form = form.push(text("This project has no endpoints yet").size(12).color(style::TEXT_MUTED));
    }

    let submit_label = if submitting { "Creating..." } else { "Create Test" };
    form = form.push(
        button(text(submit_label).size(13))
            .on_press_maybe((editable && draft.endpoint().is_some()).then_some(Message::TestSubmitted))
            .padding([8, 14])
            .style(style::primary_button),
    );

    container(form)
        .padding(14)
        .width(Length::Fill)
        .style(|_| style::surface_style(style::SURFACE_1, 8.0))
        .into()
}

/// One declared option list of the endpoint. The value typed in the shared
/// input is attached to whichever option's "Set" button is pressed.
fn value_section<'a>(
    title: &'a str,
    kind: OptionKind,
    declared: &'a OptionSet,
    supplied: &'a OptionSet,
    value: &'a str,
    editable: bool,
) -> Element<'a, Message> {
    let mut section = column![text(title).size(12).color(style::TEXT_MUTED)].spacing(6);

    if declared.is_empty() {
        return section
            .push(text("None declared").size(11).color(style::TEXT_MUTED))
            .into();
    }

    let mut input = text_input("Value", value)
        .padding([5, 8])
        .size(12)
        .style(style::input_style);
    if editable {
        input = input.on_input(move |value| Message::TestValueChanged(kind, value));
    }
    section = section.push(input);

    for option in declared {
        let marker = if option.required { " *" } else { "" };
        let current = supplied
            .get(&option.name)
            .and_then(|supplied| supplied.value.clone())
            .unwrap_or_else(|| "-".to_string());
        let set = button(text("Set").size(11))
            .on_press_maybe(editable.then(|| Message::TestValueAdded(kind, option.name.clone())))
            .padding([3, 10])
            .style(style::subtle_button);
        let clear = button(text("✕").size(11))
            .on_press_maybe(
                (editable && supplied.get(&option.name).is_some())
                    .then(|| Message::TestValueRemoved(kind, option.name.clone())),
            )
            .padding([3, 6])
            .style(style::ghost_button);

        section = section.push(
            container(
                row![
                    text(format!("{}{marker}", option.name)).size(12).width(Length::FillPortion(2)),
                    text(option.param_type.as_str())
                        .size(11)
                        .color(style::TEXT_MUTED)
                        .width(Length::FillPortion(1)),
                    text(current).size(12).width(Length::FillPortion(3)),
                    set,
                    clear,
                ]
                .spacing(8)
                .align_y(Alignment::Center),
            )
            .padding([4, 8])
            .style(|_| style::surface_style(style::SURFACE_2, 6.0)),
        );
    }

    section.into()
}

use iced::alignment::Alignment;
use iced::widget::{button, checkbox, column, container, horizontal_space, pick_list, row, text, text_input};
use iced::{Element, Length};

use crate::endpoint::{BodyFormat, EndpointDraft, OptionKind};
use crate::http::method::HttpMethod;
use crate::options::{OptionInput, OptionSet, ParamType};
use crate::Message;

use super::style;

pub struct EndpointFormState<'a> {
    pub draft: &'a EndpointDraft,
    pub header_input: &'a OptionInput,
    pub body_input: &'a OptionInput,
    pub query_input: &'a OptionInput,
    pub project_loaded: bool,
    pub submitting: bool,
}

pub fn view(state: EndpointFormState<'_>) -> Element<'_, Message> {
    let draft = state.draft;

    if !draft.is_open() {
        let add_button = button(text("Add Endpoint").size(13))
            .on_press_maybe(state.project_loaded.then_some(Message::AddEndpointToggled))
            .padding([8, 14])
            .style(style::primary_button);
        let mut bar = row![add_button].spacing(10).align_y(Alignment::Center);
        if !state.project_loaded {
            bar = bar.push(text("Load an API project to add endpoints").size(12).color(style::TEXT_MUTED));
        }
        return bar.into();
    }

    let editable = !state.submitting;

    let title = row![
        text("New endpoint").size(15),
        horizontal_space(),
        button(text("Cancel").size(12))
            .on_press_maybe(editable.then_some(Message::EndpointCancelled))
            .padding([5, 10])
            .style(style::ghost_button),
    ]
    .align_y(Alignment::Center);

    let method_select: Element<'_, Message> = if editable {
        pick_list(&HttpMethod::ALL[..], draft.method(), Message::EndpointMethodSelected)
            .placeholder("Method")
            .width(120)
            .padding([7, 8])
            .style(style::pick_list_style)
            .into()
    } else {
        super::locked_choice(
            draft.method().map(|method| method.to_string()).unwrap_or_default(),
            120,
        )
    };
    let clear_method = button(text("✕").size(11))
        .on_press_maybe((editable && draft.method().is_some()).then_some(Message::EndpointMethodCleared))
        .padding([6, 8])
        .style(style::ghost_button);

    let identity = row![
        method_select,
        clear_method,
        input("Name", &draft.name, Message::EndpointNameChanged, editable),
        input("/route/:id", &draft.route, Message::EndpointRouteChanged, editable),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let description = input(
        "Description",
        &draft.description,
        Message::EndpointDescriptionChanged,
        editable,
    );

    let options_label = if draft.options_open() { "Options ▾" } else { "Options ▸" };
    let options_toggle = button(text(options_label).size(12))
        .on_press_maybe((editable && !draft.options_locked()).then_some(Message::OptionsToggled))
        .padding([5, 10])
        .style(style::subtle_button);

    let mut form = column![title, identity, description, options_toggle].spacing(12);

    if draft.options_open() {
        form = form.push(option_section(
            "Headers",
            OptionKind::Header,
            state.header_input,
            draft.headers(),
            editable,
        ));
        form = form.push(option_section(
            "Query parameters",
            OptionKind::Query,
            state.query_input,
            draft.query(),
            editable,
        ));
        if draft.body_enabled() {
            let format = row![
                text("Body format").size(12).color(style::TEXT_MUTED),
                body_format(draft.body_format, editable),
            ]
            .spacing(8)
            .align_y(Alignment::Center);
            form = form.push(format);
            form = form.push(option_section(
                "Body",
                OptionKind::Body,
                state.body_input,
                draft.body(),
                editable,
            ));
        }
    }

    let submit_label = if state.submitting { "Creating..." } else { "Create Endpoint" };
    form = form.push(
        button(text(submit_label).size(13))
            .on_press_maybe(editable.then_some(Message::EndpointSubmitted))
            .padding([8, 14])
            .style(style::primary_button),
    );

    container(form)
        .padding(14)
        .width(Length::Fill)
        .style(|_| style::surface_style(style::SURFACE_1, 8.0))
        .into()
}

fn body_format<'a>(selected: BodyFormat, editable: bool) -> Element<'a, Message> {
    if !editable {
        return super::locked_choice(selected.to_string(), 220);
    }
    pick_list(&BodyFormat::ALL[..], Some(selected), Message::BodyFormatSelected)
        .width(220)
        .padding([5, 8])
        .style(style::pick_list_style)
        .into()
}

fn input<'a>(
    placeholder: &'a str,
    value: &'a str,
    on_input: fn(String) -> Message,
    editable: bool,
) -> Element<'a, Message> {
    let mut field = text_input(placeholder, value)
        .padding([7, 8])
        .size(13)
        .style(style::input_style);
    if editable {
        field = field.on_input(on_input);
    }
    field.into()
}

fn option_section<'a>(
    title: &'a str,
    kind: OptionKind,
    input: &'a OptionInput,
    options: &'a OptionSet,
    editable: bool,
) -> Element<'a, Message> {
    let mut name = text_input("Name", &input.name)
        .width(Length::FillPortion(3))
        .padding([5, 8])
        .size(12)
        .style(style::input_style);
    if editable {
        name = name
            .on_input(move |value| Message::OptionNameChanged(kind, value))
            .on_submit(Message::OptionAdded(kind));
    }

    let param_type = pick_list(&ParamType::ALL[..], Some(input.param_type), move |selected| {
        Message::OptionTypeSelected(kind, selected)
    })
    .width(Length::FillPortion(2))
    .padding([5, 8])
    .style(style::pick_list_style);

    let mut required = checkbox("Required", input.required).size(14).text_size(12);
    if editable {
        required = required.on_toggle(move |value| Message::OptionRequiredToggled(kind, value));
    }

    let add = button(text("Add").size(12))
        .on_press_maybe(editable.then_some(Message::OptionAdded(kind)))
        .padding([5, 10])
        .style(style::subtle_button);

    let mut section = column![
        text(title).size(12).color(style::TEXT_MUTED),
        row![name, param_type, required, add]
            .spacing(8)
            .align_y(Alignment::Center),
    ]
    .spacing(6);

    for option in options {
        let marker = if option.required { " *" } else { "" };
        let remove = button(text("✕").size(11))
            .on_press_maybe(editable.then(|| Message::OptionRemoved(kind, option.name.clone())))
            .padding([3, 6])
            .style(style::ghost_button);
        section = section.push(
            container(
                row![
                    text(format!("{}{marker}", option.name)).size(12),
                    text(option.param_type.as_str()).size(11).color(style::TEXT_MUTED),
                    horizontal_space(),
                    remove,
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

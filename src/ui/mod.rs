pub mod endpoint_form;
pub mod endpoint_table;
pub mod header;
pub mod style;
pub mod subscriptions;
pub mod test_form;
pub mod toasts;

use iced::widget::{container, text};
use iced::{Element, Length};

use crate::Message;

/// Stand-in for a pick list while its form is locked.
pub fn locked_choice<'a>(label: String, width: impl Into<Length>) -> Element<'a, Message> {
    container(text(label).size(13).color(style::TEXT_MUTED))
        .width(width)
        .padding([7, 8])
        .style(|_| style::surface_style(style::SURFACE_1, 8.0))
        .into()
}

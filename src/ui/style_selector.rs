/// Caption style picker
use iced::widget::{button, column, text, Column};
use iced::Element;
use iced_aw::Wrap;

use caption_studio::state::style::{describe, Style};

use crate::Message;

/// One button per style, the selected one highlighted, plus its description
pub fn view(selected: Style) -> Element<'static, Message> {
    let buttons: Vec<Element<'static, Message>> = Style::ALL
        .into_iter()
        .map(|style| {
            let look = if style == selected {
                button::primary
            } else {
                button::secondary
            };

            button(text(style.name()))
                .padding([8, 16])
                .style(look)
                .on_press(Message::StyleSelected(style))
                .into()
        })
        .collect();

    let mut content: Column<'static, Message> = column![
        text("Caption Style").size(22),
        Wrap::with_elements(buttons).spacing(8.0).line_spacing(8.0),
    ]
    .spacing(12);

    if let Some(description) = describe(selected.id()) {
        content = content.push(text(description).size(14));
    }

    content.into()
}

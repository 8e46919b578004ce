/// Result panel: captions, hashtags and the regenerate action
use iced::widget::{button, column, horizontal_space, row, text, Column};
use iced::{Alignment, Element, Length};

use caption_studio::state::data::AnalysisResult;

use crate::Message;

pub fn view(result: &AnalysisResult, loading: bool) -> Element<'_, Message> {
    let mut content: Column<'_, Message> = column![row![
        text("Your Captions").size(22),
        horizontal_space(),
        button("Regenerate")
            .padding([6, 14])
            .on_press_maybe((!loading).then_some(Message::Retry)),
    ]
    .align_y(Alignment::Center)]
    .spacing(14);

    if let Some(description) = result.description() {
        content = content.push(text(format!("We see: {}", description)).size(14));
    }

    let captions = result.captions();
    if captions.is_empty() {
        content = content.push(text("No captions returned.").size(14));
    }
    for caption in captions {
        content = content.push(
            row![
                text(caption).width(Length::Fill),
                button("Copy")
                    .padding([4, 10])
                    .style(button::secondary)
                    .on_press(Message::CopyToClipboard(caption.to_string())),
            ]
            .spacing(10)
            .align_y(Alignment::Center),
        );
    }

    let hashtags = result.hashtags();
    if !hashtags.is_empty() {
        let joined = hashtags.join(" ");
        content = content.push(text("Hashtags").size(18)).push(
            row![
                text(joined.clone()).width(Length::Fill),
                button("Copy all")
                    .padding([4, 10])
                    .style(button::secondary)
                    .on_press(Message::CopyToClipboard(joined)),
            ]
            .spacing(10)
            .align_y(Alignment::Center),
        );
    }

    let footer = match result.style() {
        Some(style) => format!(
            "Style: {} · generated at {}",
            style,
            result.received_at().format("%H:%M:%S")
        ),
        None => format!("Generated at {}", result.received_at().format("%H:%M:%S")),
    };
    content = content.push(text(footer).size(12));

    content.into()
}

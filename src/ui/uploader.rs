/// Upload area: drop zone, preview and picker triggers
use iced::widget::{button, column, container, image, mouse_area, row, text, Column};
use iced::{Alignment, Border, ContentFit, Element, Length, Theme};

use caption_studio::state::uploader::{Surface, Uploader};

use crate::Message;

pub fn view(uploader: &Uploader, loading: bool) -> Element<'_, Message> {
    let body: Element<'_, Message> = match (uploader.surface(loading), uploader.preview()) {
        (Surface::Loading, _) => column![
            text("⏳").size(40),
            text("Analyzing image..."),
        ]
        .spacing(10)
        .align_x(Alignment::Center)
        .into(),

        (Surface::Preview, Some(preview)) => {
            let mut preview_column: Column<'_, Message> = column![image(preview.handle().clone())
                .width(Length::Fill)
                .height(Length::Fixed(280.0))
                .content_fit(ContentFit::Contain)]
            .spacing(10)
            .align_x(Alignment::Center);

            if let Some((width, height)) = preview.dimensions() {
                preview_column = preview_column
                    .push(text(format!("{} · {}×{}", preview.name(), width, height)).size(12));
            }

            preview_column
                .push(
                    row![
                        button("Change Image")
                            .padding([6, 14])
                            .style(button::secondary)
                            .on_press_maybe((!loading).then_some(Message::BrowseRequested)),
                        button("Copy as data URL")
                            .padding([6, 14])
                            .style(button::text)
                            .on_press(Message::CopyToClipboard(preview.data_url().to_string())),
                    ]
                    .spacing(10),
                )
                .into()
        }

        _ => column![
            text("⬆").size(40),
            text("Drag and drop an image here, or click to browse"),
            text(format!(
                "Supports JPG, PNG, WEBP (Max {})",
                uploader.max_upload_label()
            ))
            .size(12),
        ]
        .spacing(10)
        .align_x(Alignment::Center)
        .into(),
    };

    let drag_active = uploader.is_drag_active();
    let area = container(body)
        .width(Length::Fill)
        .padding(24)
        .center_x(Length::Fill)
        .style(move |theme: &Theme| {
            let palette = theme.extended_palette();
            let (edge, fill) = if drag_active {
                (palette.primary.strong.color, palette.primary.weak.color)
            } else {
                (palette.background.strong.color, palette.background.weak.color)
            };

            container::Style {
                background: Some(fill.into()),
                border: Border {
                    color: edge,
                    width: 2.0,
                    radius: 12.0.into(),
                },
                ..container::Style::default()
            }
        });

    // The area itself opens the picker until a preview takes over
    let area: Element<'_, Message> = if uploader.can_browse_from_area() {
        mouse_area(area).on_press(Message::BrowseRequested).into()
    } else {
        area.into()
    };

    let mut content: Column<'_, Message> =
        column![text("Upload Image").size(22), area].spacing(12);

    if let Some(notice) = uploader.notice() {
        content = content.push(text(notice).size(14).style(text::danger));
    }

    content.into()
}

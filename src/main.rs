use iced::event::{self, Event};
use iced::widget::{button, column, container, row, scrollable, text, Column};
use iced::{window, Alignment, Border, Element, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::sync::Arc;

use caption_studio::backend::{dispatch, AnalysisBackend, HttpBackend};
use caption_studio::config::AppConfig;
use caption_studio::error::{AnalysisError, UploadError};
use caption_studio::preview::{encode_preview, Preview};
use caption_studio::state::controller::{Completion, Controller, Submission};
use caption_studio::state::data::{FileCandidate, RequestState};
use caption_studio::state::style::Style;
use caption_studio::state::uploader::{load_candidate, Uploader};

mod ui;

/// Main application state
struct CaptionStudio {
    /// Client for the analysis service (None if it could not be built)
    backend: Option<Arc<dyn AnalysisBackend>>,
    /// Request lifecycle: style, image, result, loading, error
    controller: Controller,
    /// Upload area: preview, drag highlight, size notice
    uploader: Uploader,
    /// Base URL of the analysis service
    backend_url: String,
    /// Backend reachability, shown in the footer
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked a style button
    StyleSelected(Style),
    /// User clicked the upload area or "Change Image"
    BrowseRequested,
    /// Files are being dragged over the window
    FileHovered,
    /// The drag left the window without dropping
    FilesHoveredLeft,
    /// A file was dropped onto the window
    FileDropped(PathBuf),
    /// A picked or dropped file was read from disk
    FileLoaded(Result<FileCandidate, UploadError>),
    /// Preview encoding finished for the file with this sequence number
    PreviewReady(u64, Result<Preview, String>),
    /// An analysis request finished
    AnalysisFinished(Completion),
    /// User asked to regenerate captions for the current image
    Retry,
    /// User dismissed the error banner
    DismissError,
    /// User copied a caption or the hashtags
    CopyToClipboard(String),
    /// Startup reachability probe finished
    BackendProbed(Result<(), AnalysisError>),
}

impl CaptionStudio {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = AppConfig::load();
        let controller = Controller::new(config.initial_style());
        let uploader = Uploader::new(&config);

        let (backend, status, probe) = match HttpBackend::new(&config) {
            Ok(http) => {
                log::info!("🎨 Caption Studio using {}", http.analyze_url());
                let status = format!("Connecting to {}...", config.backend_url);
                let probe_client = http.clone();
                let probe = Task::perform(
                    async move { probe_client.ping().await },
                    Message::BackendProbed,
                );
                let backend: Arc<dyn AnalysisBackend> = Arc::new(http);
                (Some(backend), status, probe)
            }
            Err(e) => {
                log::error!("❌ {}", e);
                (None, format!("HTTP client unavailable: {}", e), Task::none())
            }
        };

        (
            CaptionStudio {
                backend,
                controller,
                uploader,
                backend_url: config.backend_url.clone(),
                status,
            },
            probe,
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::StyleSelected(style) => match self.controller.select_style(style) {
                Some(submission) => self.analyze(submission),
                None => Task::none(),
            },
            Message::BrowseRequested => {
                // Show the native file picker dialog
                let file = FileDialog::new()
                    .set_title("Select an Image")
                    .add_filter("Images", &["jpg", "jpeg", "png", "webp", "gif", "bmp"])
                    .pick_file();

                match file {
                    Some(path) => self.load(path),
                    None => Task::none(),
                }
            }
            Message::FileHovered => {
                self.uploader.drag_entered();
                Task::none()
            }
            Message::FilesHoveredLeft => {
                self.uploader.drag_left();
                Task::none()
            }
            Message::FileDropped(path) => {
                if self.uploader.take_drop() {
                    self.load(path)
                } else {
                    log::debug!("Ignoring {}: only the first dropped file is used", path.display());
                    Task::none()
                }
            }
            Message::FileLoaded(Ok(candidate)) => {
                let Some(image) = self.uploader.accept(candidate) else {
                    return Task::none();
                };

                // Preview and analysis run independently of each other
                let seq = self.uploader.preview_seq();
                let preview = Task::perform(encode_preview(image.clone()), move |result| {
                    Message::PreviewReady(seq, result)
                });
                let submission = self.controller.upload(image);

                Task::batch([preview, self.analyze(submission)])
            }
            Message::FileLoaded(Err(e)) => {
                self.uploader.load_failed(&e);
                Task::none()
            }
            Message::PreviewReady(seq, Ok(preview)) => {
                if !self.uploader.preview_ready(seq, preview) {
                    log::debug!("Dropping outdated preview #{}", seq);
                }
                Task::none()
            }
            Message::PreviewReady(_, Err(e)) => {
                log::warn!("⚠️  Preview failed: {}", e);
                Task::none()
            }
            Message::AnalysisFinished(completion) => {
                self.controller.complete(completion);
                Task::none()
            }
            Message::Retry => match self.controller.retry() {
                Some(submission) => self.analyze(submission),
                None => Task::none(),
            },
            Message::DismissError => {
                self.controller.dismiss_error();
                Task::none()
            }
            Message::CopyToClipboard(contents) => iced::clipboard::write(contents),
            Message::BackendProbed(result) => {
                self.status = match result {
                    Ok(()) => "Backend reachable".to_string(),
                    Err(e) => {
                        log::warn!("⚠️  Backend probe failed: {}", e);
                        format!("Backend unreachable at {}", self.backend_url)
                    }
                };
                Task::none()
            }
        }
    }

    /// Read a picked or dropped file, refusing oversized ones up front
    fn load(&self, path: PathBuf) -> Task<Message> {
        let max_bytes = self.uploader.max_upload_bytes();
        Task::perform(load_candidate(path, max_bytes), Message::FileLoaded)
    }

    /// Send a submission to the backend
    fn analyze(&self, submission: Submission) -> Task<Message> {
        match &self.backend {
            Some(backend) => Task::perform(
                dispatch(Arc::clone(backend), submission),
                Message::AnalysisFinished,
            ),
            None => Task::done(Message::AnalysisFinished(Completion {
                token: submission.token,
                image: submission.image,
                outcome: Err(AnalysisError::Client("no HTTP client".to_string())),
            })),
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let state = self.controller.request_state();
        let loading = matches!(state, RequestState::Loading);

        let mut page: Column<'_, Message> = column![
            text("Caption Studio").size(36),
            text("Upload an image to get AI-generated captions and hashtags").size(16),
        ]
        .spacing(20)
        .padding(30);

        if let RequestState::Failed(error) = state {
            page = page.push(error_banner(error));
        }

        let left = column![
            ui::style_selector::view(self.controller.selected_style()),
            ui::uploader::view(&self.uploader, loading),
        ]
        .spacing(24)
        .width(Length::FillPortion(1));

        // A failed restyle keeps the previous captions on screen
        let mut panels = row![left].spacing(30);
        if let Some(result) = self.controller.result() {
            panels = panels.push(
                container(ui::caption_display::view(result, loading))
                    .width(Length::FillPortion(1)),
            );
        }

        page = page.push(panels).push(text(&self.status).size(12));

        scrollable(page).height(Length::Fill).into()
    }

    /// Forward window drag-and-drop events to the uploader
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn error_banner(message: &str) -> Element<'_, Message> {
    container(
        row![
            text(message).width(Length::Fill),
            button("Dismiss")
                .padding([4, 12])
                .style(button::danger)
                .on_press(Message::DismissError),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
    )
    .padding(12)
    .width(Length::Fill)
    .style(|theme: &Theme| {
        let palette = theme.extended_palette();
        container::Style {
            background: Some(palette.danger.weak.color.into()),
            text_color: Some(palette.danger.weak.text),
            border: Border {
                color: palette.danger.strong.color,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..container::Style::default()
        }
    })
    .into()
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    iced::application("Caption Studio", CaptionStudio::update, CaptionStudio::view)
        .subscription(CaptionStudio::subscription)
        .theme(CaptionStudio::theme)
        .centered()
        .run_with(CaptionStudio::new)
}

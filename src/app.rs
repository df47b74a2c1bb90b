use crate::components::plane_toggle;
use crate::config::ViewerConfig;
use crate::image_pipeline::FrameImagePipeline;
use crate::message::Message;
use crate::model::{load_session, Plane, SessionPayload};
use crate::playback::PlaybackController;
use crate::session::{FrameImage, ViewerSession};
use crate::views::{control_bar, image_panel, session_panel, RenderedFrame, SliceImage};
use clap::Parser;
use iced::futures::stream;
use iced::keyboard::{self, key::Named, Key, Modifiers};
use iced::task;
use iced::widget::image::Handle;
use iced::widget::text::Wrapping;
use iced::widget::{button, column, container, row, text};
use iced::{application, Alignment, Element, Length, Subscription, Task, Theme};
use image::RgbaImage;
use rfd::AsyncFileDialog;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::unbounded_channel;

const APP_TITLE: &str = "NeuroView";

pub fn run() -> iced::Result {
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .try_init();

    let config = ViewerConfig::parse();
    log::debug!("Starting with {config:?}");

    application(APP_TITLE, App::update, App::view)
        .subscription(App::subscription)
        .theme(App::theme)
        .run_with(move || App::new(config))
}

pub struct App {
    config: ViewerConfig,
    session: Option<ViewerSession>,
    payload: SessionPayload,
    frame: Option<RenderedFrame>,
    bitmaps: HashMap<String, Arc<RgbaImage>>,
    pending: HashSet<String>,
    failed: HashMap<String, String>,
    /// Aborts the tick stream when replaced or dropped.
    _tick_stream: Option<task::Handle>,
    last_error: Option<String>,
}

impl App {
    /// Opens the session named on the command line, or a synthetic one
    /// until the user picks a payload.
    pub fn new(config: ViewerConfig) -> (Self, Task<Message>) {
        let startup = config.session.clone();
        let mut app = Self {
            config,
            session: None,
            payload: SessionPayload::default(),
            frame: None,
            bitmaps: HashMap::new(),
            pending: HashSet::new(),
            failed: HashMap::new(),
            _tick_stream: None,
            last_error: None,
        };

        let task = match startup {
            Some(path) => Self::load(path),
            None => app.open_session(SessionPayload::default()),
        };
        (app, task)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenSession => Task::perform(
                async {
                    let handle = AsyncFileDialog::new()
                        .add_filter("Session payload", &["json"])
                        .pick_file()
                        .await?;
                    Some(load_session(handle.path().to_path_buf()).map_err(|err| err.to_string()))
                },
                Message::SessionLoaded,
            ),
            Message::SessionLoaded(None) => Task::none(),
            Message::SessionLoaded(Some(Ok(payload))) => {
                self.last_error = None;
                self.open_session(payload)
            }
            Message::SessionLoaded(Some(Err(err))) => {
                self.last_error = Some(err);
                Task::none()
            }
            Message::BitmapLoaded(locator, result) => {
                if !self.pending.remove(&locator) {
                    log::debug!("Dropping stale bitmap {locator}");
                    return Task::none();
                }
                match result {
                    Ok(bitmap) => {
                        self.bitmaps.insert(locator, bitmap);
                    }
                    Err(err) => {
                        log::warn!("{err}");
                        self.failed.insert(locator, err);
                    }
                }
                self.refresh_frame()
            }
            Message::SelectPlane(plane) => self.with_session(|session| session.set_plane(plane)),
            Message::SetSlice(index) => self.with_session(|session| session.set_slice(index)),
            Message::StepSlice(delta) => self.with_session(|session| session.step_slice(delta)),
            Message::TogglePlayback => self.with_session(ViewerSession::toggle_playback),
            Message::PlaybackTick(tick) => {
                let advanced = self
                    .session
                    .as_mut()
                    .is_some_and(|session| session.on_tick(tick));
                if advanced {
                    self.refresh_frame()
                } else {
                    Task::none()
                }
            }
            Message::ZoomIn => self.with_session(ViewerSession::zoom_in),
            Message::ZoomOut => self.with_session(ViewerSession::zoom_out),
            Message::ResetView => self.with_session(ViewerSession::reset_view),
            Message::SetBrightness(value) => {
                self.with_session(|session| session.set_brightness(value))
            }
            Message::SetContrast(value) => self.with_session(|session| session.set_contrast(value)),
            Message::ToggleAnnotations(show) => {
                self.with_session(|session| session.set_show_annotations(show))
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let open_button = button("Open Session").on_press(Message::OpenSession);

        let Some(session) = &self.session else {
            return column![open_button, text("No session loaded")]
                .padding(20)
                .spacing(20)
                .into();
        };

        let header = row![open_button, plane_toggle(session.plane())]
            .spacing(16)
            .align_y(Alignment::Center);

        let viewer = container(image_panel(self.frame.as_ref()))
            .padding(16)
            .width(Length::FillPortion(3))
            .height(Length::Fill)
            .align_x(Alignment::Center)
            .align_y(Alignment::Center);

        let overlay = self.frame.as_ref().map(|frame| &frame.overlay);
        let details = container(session_panel(session, &self.payload, overlay))
            .padding(16)
            .width(Length::FillPortion(2));

        let mut content = column![
            header,
            row![viewer, details]
                .spacing(16)
                .width(Length::Fill)
                .height(Length::Fill),
            control_bar(session),
        ]
        .spacing(16);

        if let Some(error) = &self.last_error {
            content = content.push(text(error).size(16).wrapping(Wrapping::Word));
        }

        content.padding(20).align_x(Alignment::Start).into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(key_command)
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn load(path: PathBuf) -> Task<Message> {
        Task::perform(
            async move { Some(load_session(path).map_err(|err| err.to_string())) },
            Message::SessionLoaded,
        )
    }

    /// Replaces the current session. Dropping the old one stops its ticker
    /// and aborting the tick stream discards any tick still in flight.
    fn open_session(&mut self, payload: SessionPayload) -> Task<Message> {
        self._tick_stream = None;
        self.session = None;
        self.bitmaps.clear();
        self.pending.clear();
        self.failed.clear();

        let role = self.config.role(payload.viewer_role.as_deref());
        let (sink, mut ticks) = unbounded_channel();
        let playback = PlaybackController::new(self.config.tick_interval()).with_sink(sink);
        self.session = Some(
            ViewerSession::from_payload(&payload, self.config.synthetic_slices, role)
                .with_playback(playback),
        );
        self.payload = payload;

        let tick_stream = stream::poll_fn(move |cx| ticks.poll_recv(cx));
        let (tick_task, handle) = Task::run(tick_stream, Message::PlaybackTick).abortable();
        self._tick_stream = Some(handle.abort_on_drop());

        Task::batch([tick_task, self.refresh_frame()])
    }

    fn with_session(&mut self, command: impl FnOnce(&mut ViewerSession)) -> Task<Message> {
        let Some(session) = self.session.as_mut() else {
            return Task::none();
        };
        command(session);
        self.refresh_frame()
    }

    /// Renders the session once and converts the frame into an image
    /// handle. Stored slices are decoded in the background on first use.
    fn refresh_frame(&mut self) -> Task<Message> {
        let Some(frame) = self.session.as_ref().map(ViewerSession::render) else {
            self.frame = None;
            return Task::none();
        };

        log::trace!(
            "Rendered {} frame: {}",
            if frame.is_synthetic() { "synthetic" } else { "stored" },
            frame.status().slice
        );

        let (image, task) = match frame.image {
            FrameImage::Synthetic(raster) => (
                SliceImage::Ready(Handle::from_rgba(raster.width, raster.height, raster.rgba)),
                Task::none(),
            ),
            FrameImage::Reference { locator } => {
                if let Some(bitmap) = self.bitmaps.get(&locator) {
                    let raster =
                        FrameImagePipeline::reference_slice(bitmap, &frame.windowing, &frame.zoom);
                    (
                        SliceImage::Ready(Handle::from_rgba(
                            raster.width,
                            raster.height,
                            raster.rgba,
                        )),
                        Task::none(),
                    )
                } else if let Some(reason) = self.failed.get(&locator) {
                    (SliceImage::Unavailable(reason.clone()), Task::none())
                } else {
                    let task = self.request_bitmap(locator.clone());
                    (SliceImage::Pending(locator), task)
                }
            }
        };

        self.frame = Some(RenderedFrame {
            image,
            overlay: frame.overlay,
        });
        task
    }

    fn request_bitmap(&mut self, locator: String) -> Task<Message> {
        if !self.pending.insert(locator.clone()) {
            return Task::none();
        }

        Task::perform(
            async move {
                let result = FrameImagePipeline::decode_locator(&locator)
                    .map(Arc::new)
                    .map_err(|err| err.to_string());
                (locator, result)
            },
            |(locator, result)| Message::BitmapLoaded(locator, result),
        )
    }
}

/// Keyboard shortcuts. Tool shortcuts are still subject to the role's
/// capabilities inside the session.
fn key_command(key: Key, modifiers: Modifiers) -> Option<Message> {
    if modifiers.command() || modifiers.alt() {
        return None;
    }

    match key.as_ref() {
        Key::Named(Named::ArrowLeft) => Some(Message::StepSlice(-1)),
        Key::Named(Named::ArrowRight) => Some(Message::StepSlice(1)),
        Key::Named(Named::Space) => Some(Message::TogglePlayback),
        Key::Character("+" | "=") => Some(Message::ZoomIn),
        Key::Character("-") => Some(Message::ZoomOut),
        Key::Character("r") => Some(Message::ResetView),
        Key::Character("1") => Some(Message::SelectPlane(Plane::Axial)),
        Key::Character("2") => Some(Message::SelectPlane(Plane::Sagittal)),
        Key::Character("3") => Some(Message::SelectPlane(Plane::Coronal)),
        _ => None,
    }
}

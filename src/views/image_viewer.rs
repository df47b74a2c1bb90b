use crate::annotation::{AnnotationOverlay, DASH_PATTERN, STATUS_ORIGIN};
use crate::message::Message;
use crate::utils::truncate_locator;
use iced::widget::canvas::{self, path::arc::Elliptical, LineDash, Path, Stroke};
use iced::widget::image::Handle;
use iced::widget::{container, stack, text, Canvas, Image};
use iced::{
    mouse, Alignment, Background, Color, ContentFit, Element, Length, Pixels, Point, Radians,
    Rectangle, Renderer, Theme, Vector,
};

/// Edge of the square drawing area in logical pixels.
pub const VIEWPORT: f32 = 512.0;

const STATUS_LINE_HEIGHT: f32 = 18.0;
const STATUS_TEXT_SIZE: f32 = 14.0;

#[derive(Debug, Clone)]
pub enum SliceImage {
    Ready(Handle),
    Pending(String),
    Unavailable(String),
}

/// A session frame after the presentation layer has turned its pixels into
/// an image handle.
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    pub image: SliceImage,
    pub overlay: AnnotationOverlay,
}

pub fn image_panel(frame: Option<&RenderedFrame>) -> Element<'_, Message> {
    let Some(frame) = frame else {
        return text("Open a scan session to view its slices").into();
    };

    let base: Element<'_, Message> = match &frame.image {
        SliceImage::Ready(handle) => Image::new(handle.clone())
            .width(Length::Fixed(VIEWPORT))
            .height(Length::Fixed(VIEWPORT))
            .content_fit(ContentFit::Fill)
            .into(),
        SliceImage::Pending(locator) => {
            placeholder(format!("Loading {}", truncate_locator(locator)))
        }
        SliceImage::Unavailable(reason) => placeholder(reason.clone()),
    };

    let overlay = Canvas::new(OverlayLayer {
        overlay: &frame.overlay,
    })
    .width(Length::Fixed(VIEWPORT))
    .height(Length::Fixed(VIEWPORT));

    stack![base, overlay].into()
}

fn placeholder(message: String) -> Element<'static, Message> {
    container(text(message).size(14))
        .width(Length::Fixed(VIEWPORT))
        .height(Length::Fixed(VIEWPORT))
        .align_x(Alignment::Center)
        .align_y(Alignment::Center)
        .style(|_theme: &Theme| container::Style {
            background: Some(Background::Color(Color::BLACK)),
            ..Default::default()
        })
        .into()
}

struct OverlayLayer<'a> {
    overlay: &'a AnnotationOverlay,
}

impl canvas::Program<Message> for OverlayLayer<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let (width, height) = (bounds.width, bounds.height);

        for highlight in &self.overlay.highlights {
            let ellipse = highlight.ellipse;
            let outline = Path::new(|builder| {
                builder.ellipse(Elliptical {
                    center: Point::new(ellipse.center_x * width, ellipse.center_y * height),
                    radii: Vector::new(ellipse.radius_x * width, ellipse.radius_y * height),
                    rotation: Radians(0.0),
                    start_angle: Radians(0.0),
                    end_angle: Radians(std::f32::consts::TAU),
                });
            });

            let [r, g, b] = highlight.stroke.color;
            let color = Color::from_rgba8(r, g, b, highlight.stroke.opacity);
            frame.stroke(
                &outline,
                Stroke {
                    line_dash: LineDash {
                        segments: &DASH_PATTERN,
                        offset: 0,
                    },
                    ..Stroke::default()
                        .with_color(color)
                        .with_width(highlight.stroke.width)
                },
            );
        }

        let origin = Point::new(STATUS_ORIGIN.0 * width, STATUS_ORIGIN.1 * height);
        for (row, line) in self.overlay.status.lines().enumerate() {
            frame.fill_text(canvas::Text {
                content: line.to_string(),
                position: Point::new(origin.x, origin.y + row as f32 * STATUS_LINE_HEIGHT),
                color: Color::WHITE,
                size: Pixels(STATUS_TEXT_SIZE),
                ..canvas::Text::default()
            });
        }

        vec![frame.into_geometry()]
    }
}

use crate::message::Message;
use crate::model::Plane;
use iced::border::{Border, Radius};
use iced::theme::palette::Extended;
use iced::widget::button::Status;
use iced::widget::text::Wrapping;
use iced::widget::{button, container, row, text, Container};
use iced::{Alignment, Background, Color, Length, Shadow, Theme};

pub fn plane_toggle(current: Plane) -> Container<'static, Message> {
    let toggle_row = row![
        segmented_toggle_option(Plane::Axial, current, SegmentPosition::Left)
            .width(Length::FillPortion(1)),
        segmented_toggle_option(Plane::Sagittal, current, SegmentPosition::Middle)
            .width(Length::FillPortion(1)),
        segmented_toggle_option(Plane::Coronal, current, SegmentPosition::Right)
            .width(Length::FillPortion(1)),
    ]
    .spacing(0);

    container(toggle_row)
        .padding(3)
        .width(Length::Fixed(360.0))
        .style(segmented_container_style)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmentPosition {
    Left,
    Middle,
    Right,
}

const PILL: f32 = 999.0;
const SEAM: f32 = 10.0;

impl SegmentPosition {
    /// Rounded outside, tight where two segments meet.
    fn radius(self) -> Radius {
        let (left, right) = match self {
            SegmentPosition::Left => (PILL, SEAM),
            SegmentPosition::Middle => (SEAM, SEAM),
            SegmentPosition::Right => (SEAM, PILL),
        };
        Radius {
            top_left: left,
            bottom_left: left,
            top_right: right,
            bottom_right: right,
        }
    }
}

fn segmented_toggle_option(
    plane: Plane,
    current: Plane,
    position: SegmentPosition,
) -> button::Button<'static, Message> {
    let is_active = plane == current;
    let content = container(text(plane.label()).size(14).wrapping(Wrapping::None))
        .width(Length::Fill)
        .height(Length::Fixed(32.0))
        .align_x(Alignment::Center)
        .align_y(Alignment::Center)
        .padding([6, 16]);

    button(content)
        .padding(0)
        .on_press(Message::SelectPlane(plane))
        .style(move |theme, status| segment_style(theme, status, is_active, position))
}

fn segmented_container_style(theme: &Theme) -> container::Style {
    let track = theme.extended_palette().background.strong.color;

    container::Style {
        background: Some(Background::Color(track)),
        border: Border {
            color: track.scale_alpha(0.6),
            width: 1.0,
            radius: Radius::new(PILL),
        },
        ..Default::default()
    }
}

/// Fill colour of a segment for its selection and interaction state.
fn segment_fill(palette: &Extended, is_active: bool, status: Status) -> Color {
    let (resting, highlighted) = if is_active {
        (palette.primary.strong.color, palette.primary.base.color)
    } else {
        (
            palette.background.strong.color.scale_alpha(0.4),
            palette.background.base.color.scale_alpha(0.8),
        )
    };

    match status {
        Status::Active => resting,
        Status::Hovered => highlighted,
        Status::Pressed => highlighted.scale_alpha(0.9),
        Status::Disabled => resting.scale_alpha(0.5),
    }
}

fn segment_style(
    theme: &Theme,
    status: Status,
    is_active: bool,
    position: SegmentPosition,
) -> button::Style {
    let palette = theme.extended_palette();
    let text_color = if is_active {
        palette.primary.strong.text
    } else {
        palette.background.base.text
    };

    button::Style {
        background: Some(Background::Color(segment_fill(palette, is_active, status))),
        text_color,
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: position.radius(),
        },
        shadow: Shadow::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_outer_corners_are_pill_shaped() {
        let left = SegmentPosition::Left.radius();
        assert_eq!((left.top_left, left.bottom_left), (PILL, PILL));
        assert_eq!((left.top_right, left.bottom_right), (SEAM, SEAM));

        let right = SegmentPosition::Right.radius();
        assert_eq!((right.top_right, right.bottom_right), (PILL, PILL));
        assert_eq!((right.top_left, right.bottom_left), (SEAM, SEAM));

        let middle = SegmentPosition::Middle.radius();
        assert_eq!(middle, Radius::new(SEAM));
    }

    #[test]
    fn active_segment_uses_the_primary_colour() {
        let theme = Theme::Dark;
        let palette = theme.extended_palette();
        assert_eq!(
            segment_fill(palette, true, Status::Active),
            palette.primary.strong.color
        );
        assert_ne!(
            segment_fill(palette, false, Status::Active),
            palette.primary.strong.color
        );
        assert_eq!(
            segment_fill(palette, false, Status::Disabled),
            palette.background.strong.color.scale_alpha(0.4).scale_alpha(0.5)
        );
    }
}

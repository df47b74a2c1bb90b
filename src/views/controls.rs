use crate::capabilities::Tool;
use crate::message::Message;
use crate::playback::PlaybackState;
use crate::session::ViewerSession;
use crate::windowing::{WINDOW_MAX_PERCENT, WINDOW_MIN_PERCENT};
use iced::widget::{button, checkbox, column, row, slider, text, Row};
use iced::{Alignment, Element, Length};

/// Navigation for everyone, plus whatever tools the viewer's role unlocks.
pub fn control_bar(session: &ViewerSession) -> Element<'_, Message> {
    let total = session.total_slices().min(u16::MAX as usize) as u16;
    let current = session.slice().min(total as usize) as u16;
    let play_label = match session.playback_state() {
        PlaybackState::Playing => "Pause",
        PlaybackState::Stopped => "Play",
    };

    let navigation = row![
        button("◀").on_press(Message::StepSlice(-1)),
        slider(1..=total.max(1), current, |value| Message::SetSlice(value as i64))
            .width(Length::Fill),
        button("▶").on_press(Message::StepSlice(1)),
        button(play_label).on_press(Message::TogglePlayback),
        text(format!("{current} / {total}")).width(Length::Fixed(80.0)),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let caps = session.capabilities();
    if caps.is_read_only() {
        return navigation.into();
    }

    let mut tools = Row::new().spacing(8).align_y(Alignment::Center);

    if caps.allows(Tool::ZoomOut) {
        tools = tools.push(button("−").on_press(Message::ZoomOut));
    }
    if caps.allows(Tool::ZoomIn) {
        tools = tools
            .push(text(format!("{}%", session.zoom().percent())))
            .push(button("+").on_press(Message::ZoomIn));
    }
    if caps.allows(Tool::Reset) {
        tools = tools.push(button("Reset").on_press(Message::ResetView));
    }

    let windowing = session.windowing();
    if caps.allows(Tool::Brightness) {
        tools = tools.push(labelled_slider(
            "Brightness",
            windowing.brightness(),
            Message::SetBrightness,
        ));
    }
    if caps.allows(Tool::Contrast) {
        tools = tools.push(labelled_slider(
            "Contrast",
            windowing.contrast(),
            Message::SetContrast,
        ));
    }
    if caps.allows(Tool::AnnotationToggle) && session.prediction().is_some() {
        tools = tools.push(
            checkbox("Annotations", session.show_annotations())
                .on_toggle(Message::ToggleAnnotations),
        );
    }

    column![navigation, tools].spacing(12).into()
}

fn labelled_slider(
    label: &'static str,
    value: f32,
    on_change: fn(f32) -> Message,
) -> Element<'static, Message> {
    row![
        text(format!("{label} {value:.0}%")).width(Length::Fixed(120.0)),
        slider(WINDOW_MIN_PERCENT..=WINDOW_MAX_PERCENT, value, on_change)
            .step(1.0)
            .width(Length::Fixed(160.0)),
    ]
    .spacing(6)
    .align_y(Alignment::Center)
    .into()
}

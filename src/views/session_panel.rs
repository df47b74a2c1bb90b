use crate::annotation::AnnotationOverlay;
use crate::message::Message;
use crate::model::{ImageReference, Plane, SessionPayload};
use crate::session::ViewerSession;
use crate::utils::{confidence_text, stack_summary, truncate_locator};
use iced::widget::text::Wrapping;
use iced::widget::{column, row, scrollable, text, Column};
use iced::{Element, Length};

pub fn session_panel<'a>(
    session: &'a ViewerSession,
    payload: &'a SessionPayload,
    overlay: Option<&'a AnnotationOverlay>,
) -> Element<'a, Message> {
    let prediction = session.prediction();
    let mut rows: Vec<(String, String)> = vec![
        ("Session".into(), payload.session_code().to_string()),
        ("Viewer role".into(), session.role().to_string()),
        (
            "Prediction".into(),
            prediction
                .map(|prediction| prediction.label.full_name().to_string())
                .unwrap_or_else(|| "(none)".to_string()),
        ),
    ];

    if session.role().is_clinician() {
        rows.push(("Confidence".into(), confidence_text(prediction)));
        let regions = overlay
            .map(AnnotationOverlay::highlighted_regions)
            .unwrap_or_default();
        if !regions.is_empty() {
            let names: Vec<&str> = regions.iter().map(|region| region.name()).collect();
            rows.push(("Highlighted".into(), names.join(", ")));
        }
    }

    for plane in Plane::ALL {
        rows.push((
            plane.label().to_string(),
            format!(
                "{}, at {}",
                stack_summary(session.stack(plane)),
                session.slice_for(plane)
            ),
        ));
    }

    let mut table = column![row![
        text("Field").width(Length::FillPortion(1)),
        text("Value").width(Length::FillPortion(2)),
    ]
    .spacing(12)];

    for (field, value) in rows {
        table = table.push(
            row![
                text(field).width(Length::FillPortion(1)),
                text(value)
                    .width(Length::FillPortion(2))
                    .wrapping(Wrapping::Word),
            ]
            .spacing(12),
        );
    }

    column![
        text("Scan Session").size(20),
        scrollable(table.spacing(8)),
        stored_slices(session),
    ]
    .spacing(12)
    .into()
}

fn stored_slices(session: &ViewerSession) -> Column<'_, Message> {
    let plane = session.plane();
    let stack = session.stack(plane);
    if stack.is_synthetic() {
        return column![text(format!("{} plane is synthetic", plane.label())).size(14)];
    }

    match stack.resolve(session.slice()) {
        Ok(ImageReference::Stored { locator, .. }) => column![
            text("Current slice").size(16),
            text(truncate_locator(&locator)).wrapping(Wrapping::Word),
        ]
        .spacing(4),
        _ => column![],
    }
}

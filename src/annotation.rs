//! Prediction-driven highlights and the on-image status block.
//!
//! Everything here is a drawing primitive composited above the slice. None
//! of it touches pixel data, so windowing never changes an annotation.

use crate::model::{
    AnatomicalRegion, PredictionAnnotation, PredictionLabel, RegionEllipse, ViewerRole,
};
use crate::zoom::ZoomState;

/// On/off dash lengths in logical pixels.
pub const DASH_PATTERN: [f32; 2] = [6.0, 4.0];

/// Top-left anchor of the status block, as a fraction of the frame edge.
pub const STATUS_ORIGIN: (f32, f32) = (0.03, 0.04);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub opacity: f32,
    pub color: [u8; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionHighlight {
    pub region: AnatomicalRegion,
    /// Frame-space outline with zoom already applied.
    pub ellipse: RegionEllipse,
    pub stroke: StrokeStyle,
}

fn stroke_for(label: PredictionLabel) -> Option<StrokeStyle> {
    let (width, opacity) = match label {
        PredictionLabel::Normal => return None,
        PredictionLabel::MildImpairment => (2.0, 0.7),
        PredictionLabel::Disease => (3.5, 0.95),
    };
    Some(StrokeStyle {
        width,
        opacity,
        color: label.color(),
    })
}

/// Scales a region about the frame centre so it stays locked to the zoomed
/// image.
fn zoomed(ellipse: RegionEllipse, zoom: f32) -> RegionEllipse {
    RegionEllipse {
        center_x: 0.5 + (ellipse.center_x - 0.5) * zoom,
        center_y: 0.5 + (ellipse.center_y - 0.5) * zoom,
        radius_x: ellipse.radius_x * zoom,
        radius_y: ellipse.radius_y * zoom,
    }
}

pub fn region_highlights(
    prediction: Option<&PredictionAnnotation>,
    show_annotations: bool,
    zoom: &ZoomState,
) -> Vec<RegionHighlight> {
    let Some(prediction) = prediction.filter(|_| show_annotations) else {
        return Vec::new();
    };
    let Some(stroke) = stroke_for(prediction.label) else {
        return Vec::new();
    };

    prediction
        .highlight_regions()
        .iter()
        .map(|&region| RegionHighlight {
            region,
            ellipse: zoomed(region.ellipse(), zoom.factor()),
            stroke,
        })
        .collect()
}

/// Informational text drawn on every frame, independent of the annotation
/// toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBlock {
    pub slice: String,
    pub zoom: String,
    pub prediction: Option<String>,
}

impl StatusBlock {
    pub fn new(
        slice: usize,
        total_slices: usize,
        zoom: &ZoomState,
        prediction: Option<&PredictionAnnotation>,
        role: ViewerRole,
    ) -> Self {
        let prediction = prediction.map(|prediction| {
            if role.is_clinician() {
                format!(
                    "{} {}%",
                    prediction.label.code(),
                    prediction.confidence_percent()
                )
            } else {
                prediction.label.full_name().to_string()
            }
        });

        Self {
            slice: format!("Slice {slice} / {total_slices}"),
            zoom: format!("Zoom {}%", zoom.percent()),
            prediction,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        [Some(self.slice.as_str()), Some(self.zoom.as_str())]
            .into_iter()
            .chain(std::iter::once(self.prediction.as_deref()))
            .flatten()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationOverlay {
    pub highlights: Vec<RegionHighlight>,
    pub status: StatusBlock,
}

impl AnnotationOverlay {
    pub fn highlighted_regions(&self) -> Vec<AnatomicalRegion> {
        self.highlights.iter().map(|highlight| highlight.region).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn prediction(label: PredictionLabel) -> PredictionAnnotation {
        PredictionAnnotation::new(label, 0.82)
    }

    fn regions(label: PredictionLabel) -> Vec<AnatomicalRegion> {
        region_highlights(Some(&prediction(label)), true, &ZoomState::default())
            .into_iter()
            .map(|highlight| highlight.region)
            .collect()
    }

    #[test]
    fn normal_and_hidden_predictions_draw_nothing() {
        assert!(regions(PredictionLabel::Normal).is_empty());
        assert!(region_highlights(
            Some(&prediction(PredictionLabel::Disease)),
            false,
            &ZoomState::default()
        )
        .is_empty());
        assert!(region_highlights(None, true, &ZoomState::default()).is_empty());
    }

    #[test]
    fn disease_outlines_a_superset_of_mild_impairment() {
        let mild = regions(PredictionLabel::MildImpairment);
        let severe = regions(PredictionLabel::Disease);

        assert_eq!(
            mild,
            vec![
                AnatomicalRegion::LeftHippocampus,
                AnatomicalRegion::RightHippocampus
            ]
        );
        assert!(mild.iter().all(|region| severe.contains(region)));
        assert_eq!(severe.len(), 4);
    }

    #[test]
    fn severe_strokes_are_heavier() {
        let zoom = ZoomState::default();
        let mild = region_highlights(
            Some(&prediction(PredictionLabel::MildImpairment)),
            true,
            &zoom,
        );
        let severe = region_highlights(Some(&prediction(PredictionLabel::Disease)), true, &zoom);

        assert!(severe[0].stroke.width > mild[0].stroke.width);
        assert!(severe[0].stroke.opacity > mild[0].stroke.opacity);
        assert_eq!(severe[0].stroke.color, [231, 76, 60]);
    }

    #[test]
    fn highlights_follow_zoom_about_the_centre() {
        let mut zoom = ZoomState::default();
        zoom.zoom_in();
        zoom.zoom_in();
        zoom.zoom_in();
        zoom.zoom_in();
        zoom.zoom_in();

        let highlight = &region_highlights(
            Some(&prediction(PredictionLabel::MildImpairment)),
            true,
            &zoom,
        )[0];
        let base = AnatomicalRegion::LeftHippocampus.ellipse();
        assert_relative_eq!(highlight.ellipse.radius_x, base.radius_x * 2.0);
        assert_relative_eq!(
            highlight.ellipse.center_x,
            0.5 + (base.center_x - 0.5) * 2.0
        );
    }

    #[test]
    fn status_content_depends_on_role() {
        let zoom = ZoomState::default();
        let ad = prediction(PredictionLabel::Disease);

        let clinician = StatusBlock::new(60, 120, &zoom, Some(&ad), ViewerRole::Doctor);
        assert_eq!(
            clinician.lines().collect::<Vec<_>>(),
            vec!["Slice 60 / 120", "Zoom 100%", "AD 82%"]
        );

        let patient = StatusBlock::new(60, 120, &zoom, Some(&ad), ViewerRole::Patient);
        assert_eq!(patient.prediction.as_deref(), Some("Alzheimer's Disease"));

        let bare = StatusBlock::new(1, 20, &zoom, None, ViewerRole::Radiologist);
        assert_eq!(bare.lines().count(), 2);
    }
}

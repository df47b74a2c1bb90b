use crate::error::ViewerError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Classifier output class. Wire codes follow the prediction API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum PredictionLabel {
    #[serde(rename = "CN")]
    Normal,
    #[serde(rename = "MCI")]
    MildImpairment,
    #[serde(rename = "AD")]
    Disease,
}

impl PredictionLabel {
    pub fn code(self) -> &'static str {
        match self {
            PredictionLabel::Normal => "CN",
            PredictionLabel::MildImpairment => "MCI",
            PredictionLabel::Disease => "AD",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            PredictionLabel::Normal => "Cognitively Normal",
            PredictionLabel::MildImpairment => "Mild Cognitive Impairment",
            PredictionLabel::Disease => "Alzheimer's Disease",
        }
    }

    /// Display colour as RGB.
    pub fn color(self) -> [u8; 3] {
        match self {
            PredictionLabel::Normal => [46, 204, 113],
            PredictionLabel::MildImpairment => [241, 196, 15],
            PredictionLabel::Disease => [231, 76, 60],
        }
    }

    /// Regions whose prominence this label raises, mildest first.
    pub fn highlight_regions(self) -> &'static [AnatomicalRegion] {
        match self {
            PredictionLabel::Normal => &[],
            PredictionLabel::MildImpairment => &HIPPOCAMPAL_PROXIES,
            PredictionLabel::Disease => &DISEASE_REGIONS,
        }
    }
}

impl fmt::Display for PredictionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PredictionLabel {
    type Err = ViewerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "CN" => Ok(PredictionLabel::Normal),
            "MCI" => Ok(PredictionLabel::MildImpairment),
            "AD" => Ok(PredictionLabel::Disease),
            _ => Err(ViewerError::UnknownLabel(value.to_string())),
        }
    }
}

/// Named anatomical proxy regions the overlay can outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnatomicalRegion {
    LeftHippocampus,
    RightHippocampus,
    LeftTemporalLobe,
    RightTemporalLobe,
}

const HIPPOCAMPAL_PROXIES: [AnatomicalRegion; 2] = [
    AnatomicalRegion::LeftHippocampus,
    AnatomicalRegion::RightHippocampus,
];

const DISEASE_REGIONS: [AnatomicalRegion; 4] = [
    AnatomicalRegion::LeftHippocampus,
    AnatomicalRegion::RightHippocampus,
    AnatomicalRegion::LeftTemporalLobe,
    AnatomicalRegion::RightTemporalLobe,
];

/// Normalized ellipse in frame space: centre and radii as fractions of the
/// frame edge, before zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionEllipse {
    pub center_x: f32,
    pub center_y: f32,
    pub radius_x: f32,
    pub radius_y: f32,
}

impl AnatomicalRegion {
    pub fn name(self) -> &'static str {
        match self {
            AnatomicalRegion::LeftHippocampus => "left hippocampus",
            AnatomicalRegion::RightHippocampus => "right hippocampus",
            AnatomicalRegion::LeftTemporalLobe => "left temporal lobe",
            AnatomicalRegion::RightTemporalLobe => "right temporal lobe",
        }
    }

    pub fn ellipse(self) -> RegionEllipse {
        let (center_x, center_y, radius_x, radius_y) = match self {
            AnatomicalRegion::LeftHippocampus => (0.38, 0.60, 0.055, 0.035),
            AnatomicalRegion::RightHippocampus => (0.62, 0.60, 0.055, 0.035),
            AnatomicalRegion::LeftTemporalLobe => (0.25, 0.56, 0.07, 0.12),
            AnatomicalRegion::RightTemporalLobe => (0.75, 0.56, 0.07, 0.12),
        };
        RegionEllipse {
            center_x,
            center_y,
            radius_x,
            radius_y,
        }
    }
}

/// Classifier verdict attached to a viewer session. Never produced by the
/// viewer itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionAnnotation {
    pub label: PredictionLabel,
    confidence: f32,
}

impl PredictionAnnotation {
    /// Accepts a fraction in `[0, 1]` or a percentage in `(1, 100]`.
    pub fn new(label: PredictionLabel, confidence: f32) -> Self {
        Self {
            label,
            confidence: normalize_confidence(confidence),
        }
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    pub fn confidence_percent(&self) -> u32 {
        (self.confidence() * 100.0).round() as u32
    }

    pub fn highlight_regions(&self) -> &'static [AnatomicalRegion] {
        self.label.highlight_regions()
    }
}

fn normalize_confidence(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    let fraction = if value > 1.0 { value / 100.0 } else { value };
    fraction.clamp(0.0, 1.0)
}

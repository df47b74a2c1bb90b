use super::{PerPlane, Plane, PredictionAnnotation, PredictionLabel, SliceStack};
use crate::error::ViewerError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Completed-session payload as returned by the prediction API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionPayload {
    #[serde(default)]
    pub session_code: Option<String>,
    #[serde(default)]
    pub prediction: Option<String>,
    #[serde(default)]
    pub confidence: Option<f32>,
    #[serde(default)]
    pub slice_urls: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub viewer_role: Option<String>,
}

impl SessionPayload {
    pub fn from_json(text: &str) -> Result<Self, ViewerError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn session_code(&self) -> &str {
        self.session_code.as_deref().unwrap_or("Unknown")
    }

    /// The classifier verdict, if the payload carries a recognised label.
    pub fn annotation(&self) -> Option<PredictionAnnotation> {
        let raw = self.prediction.as_deref()?;
        match raw.parse::<PredictionLabel>() {
            Ok(label) => Some(PredictionAnnotation::new(
                label,
                self.confidence.unwrap_or(0.0),
            )),
            Err(err) => {
                log::warn!("Ignoring prediction for {}: {err}", self.session_code());
                None
            }
        }
    }

    /// One stack per plane. Planes without stored slices become synthetic.
    pub fn slice_stacks(&self, synthetic_slices: usize) -> PerPlane<SliceStack> {
        let mut by_plane: PerPlane<Vec<String>> = PerPlane::default();
        for (key, urls) in &self.slice_urls {
            match key.parse::<Plane>() {
                Ok(plane) => by_plane[plane] = urls.clone(),
                Err(err) => log::warn!("Skipping slice list: {err}"),
            }
        }

        PerPlane::from_fn(|plane| {
            SliceStack::from_locators(plane, std::mem::take(&mut by_plane[plane]), synthetic_slices)
        })
    }
}

pub fn load_session(path: PathBuf) -> Result<SessionPayload, ViewerError> {
    log::info!("Loading session payload: {}", path.display());
    let text = std::fs::read_to_string(&path).map_err(|source| {
        let err = ViewerError::PayloadIo {
            path: path.clone(),
            source,
        };
        log::error!("{err}");
        err
    })?;

    SessionPayload::from_json(&text).map_err(|err| {
        log::error!("{}: {err}", path.display());
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SYNTHETIC_SLICE_COUNT;
    use std::io::Write;

    const PAYLOAD: &str = r#"{
        "session_code": "MRI-2024-0007",
        "prediction": "MCI",
        "confidence": 71.6,
        "slice_urls": {
            "axial": ["a0.png", "a1.png", "a2.png"],
            "sagittal": [],
            "oblique": ["x.png"]
        },
        "viewer_role": "radiologist"
    }"#;

    #[test]
    fn parses_prediction_api_shape() {
        let payload = SessionPayload::from_json(PAYLOAD).unwrap();
        assert_eq!(payload.session_code(), "MRI-2024-0007");
        assert_eq!(payload.viewer_role.as_deref(), Some("radiologist"));

        let annotation = payload.annotation().unwrap();
        assert_eq!(annotation.label, PredictionLabel::MildImpairment);
        assert_eq!(annotation.confidence_percent(), 72);
    }

    #[test]
    fn missing_and_empty_planes_are_synthetic() {
        let payload = SessionPayload::from_json(PAYLOAD).unwrap();
        let stacks = payload.slice_stacks(SYNTHETIC_SLICE_COUNT);

        assert!(!stacks[Plane::Axial].is_synthetic());
        assert_eq!(stacks[Plane::Axial].total_slices(), 3);
        assert!(stacks[Plane::Sagittal].is_synthetic());
        assert!(stacks[Plane::Coronal].is_synthetic());
        assert_eq!(stacks[Plane::Coronal].total_slices(), SYNTHETIC_SLICE_COUNT);
    }

    #[test]
    fn empty_payload_is_fully_synthetic_without_annotation() {
        let payload = SessionPayload::from_json("{}").unwrap();
        assert!(payload.annotation().is_none());
        assert_eq!(payload.session_code(), "Unknown");
        assert!(payload
            .slice_stacks(40)
            .iter()
            .all(|(_, stack)| stack.is_synthetic() && stack.total_slices() == 40));
    }

    #[test]
    fn unknown_labels_drop_the_annotation() {
        let payload = SessionPayload::from_json(r#"{"prediction": "FTD"}"#).unwrap();
        assert!(payload.annotation().is_none());
    }

    #[test]
    fn load_session_reads_files_and_reports_failures() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PAYLOAD.as_bytes()).unwrap();
        let payload = load_session(file.path().to_path_buf()).unwrap();
        assert_eq!(payload.prediction.as_deref(), Some("MCI"));

        let missing = load_session(PathBuf::from("/nonexistent/session.json"));
        assert!(matches!(missing, Err(ViewerError::PayloadIo { .. })));

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        broken.write_all(b"{ not json").unwrap();
        assert!(matches!(
            load_session(broken.path().to_path_buf()),
            Err(ViewerError::PayloadParse(_))
        ));
    }
}

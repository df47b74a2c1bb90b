use crate::model::{ViewerRole, SYNTHETIC_SLICE_COUNT};
use crate::playback::PLAYBACK_INTERVAL;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "neuroview")]
#[command(about = "Multi-plane MRI slice viewer", long_about = None)]
pub struct ViewerConfig {
    /// Session payload to open at startup
    #[arg(long, env = "NEUROVIEW_SESSION")]
    pub session: Option<PathBuf>,

    /// Viewer role supplied by the sign-in service (patient, doctor, radiologist)
    #[arg(long, env = "NEUROVIEW_ROLE", default_value = "patient")]
    pub role: String,

    /// Depth of the synthetic stack for planes without stored slices
    #[arg(long, default_value_t = SYNTHETIC_SLICE_COUNT)]
    pub synthetic_slices: usize,

    /// Playback cadence in milliseconds
    #[arg(long, default_value_t = PLAYBACK_INTERVAL.as_millis() as u64)]
    pub tick_ms: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            session: None,
            role: ViewerRole::Patient.as_str().to_string(),
            synthetic_slices: SYNTHETIC_SLICE_COUNT,
            tick_ms: PLAYBACK_INTERVAL.as_millis() as u64,
        }
    }
}

impl ViewerConfig {
    /// Payload role wins over the command line when present.
    pub fn role(&self, payload_role: Option<&str>) -> ViewerRole {
        ViewerRole::from_role_str(payload_role.unwrap_or(&self.role))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_viewer_constants() {
        let config = ViewerConfig::try_parse_from(["neuroview"]).unwrap();
        assert_eq!(config.synthetic_slices, 120);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert!(config.session.is_none());
        assert_eq!(config.role(None), ViewerRole::Patient);
    }

    #[test]
    fn parses_flags() {
        let config = ViewerConfig::try_parse_from([
            "neuroview",
            "--role",
            "radiologist",
            "--session",
            "/tmp/session.json",
            "--synthetic-slices",
            "64",
            "--tick-ms",
            "40",
        ])
        .unwrap();
        assert_eq!(config.role(None), ViewerRole::Radiologist);
        assert_eq!(config.role(Some("doctor")), ViewerRole::Doctor);
        assert_eq!(config.session, Some(PathBuf::from("/tmp/session.json")));
        assert_eq!(config.synthetic_slices, 64);
        assert_eq!(config.tick_interval(), Duration::from_millis(40));
    }

    #[test]
    fn unrecognized_roles_are_restricted() {
        let config = ViewerConfig {
            role: "owner".to_string(),
            ..ViewerConfig::default()
        };
        assert_eq!(config.role(None), ViewerRole::Patient);
    }
}

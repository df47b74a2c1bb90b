use crate::error::ViewerError;
use std::fmt;
use std::str::FromStr;

/// Who is looking at the scan. Supplied by the authentication collaborator
/// as an opaque string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewerRole {
    #[default]
    Patient,
    Doctor,
    Radiologist,
}

impl ViewerRole {
    pub const ALL: [ViewerRole; 3] = [
        ViewerRole::Patient,
        ViewerRole::Doctor,
        ViewerRole::Radiologist,
    ];

    /// Parses a role string, falling back to the most restrictive role for
    /// anything unrecognized.
    pub fn from_role_str(value: &str) -> Self {
        value.parse().unwrap_or_else(|err| {
            log::warn!("{err}; using patient capabilities");
            ViewerRole::Patient
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewerRole::Patient => "patient",
            ViewerRole::Doctor => "doctor",
            ViewerRole::Radiologist => "radiologist",
        }
    }

    pub fn is_clinician(self) -> bool {
        match self {
            ViewerRole::Patient => false,
            ViewerRole::Doctor | ViewerRole::Radiologist => true,
        }
    }
}

impl fmt::Display for ViewerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewerRole {
    type Err = ViewerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "patient" => Ok(ViewerRole::Patient),
            "doctor" => Ok(ViewerRole::Doctor),
            "radiologist" => Ok(ViewerRole::Radiologist),
            _ => Err(ViewerError::UnknownRole(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_round_trip_through_strings() {
        for role in ViewerRole::ALL {
            assert_eq!(ViewerRole::from_role_str(role.as_str()), role);
        }
        assert_eq!(ViewerRole::from_role_str("Radiologist "), ViewerRole::Radiologist);
    }

    #[test]
    fn unknown_roles_fall_back_to_patient() {
        assert_eq!(ViewerRole::from_role_str("admin"), ViewerRole::Patient);
        assert_eq!(ViewerRole::from_role_str(""), ViewerRole::Patient);
        assert!("superuser".parse::<ViewerRole>().is_err());
    }
}

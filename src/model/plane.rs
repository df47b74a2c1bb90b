use crate::error::ViewerError;
use serde::Deserialize;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// Anatomical cross-section orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plane {
    #[default]
    Axial,
    Sagittal,
    Coronal,
}

impl Plane {
    pub const ALL: [Plane; 3] = [Plane::Axial, Plane::Sagittal, Plane::Coronal];

    pub fn as_str(self) -> &'static str {
        match self {
            Plane::Axial => "axial",
            Plane::Sagittal => "sagittal",
            Plane::Coronal => "coronal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Plane::Axial => "Axial",
            Plane::Sagittal => "Sagittal",
            Plane::Coronal => "Coronal",
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plane {
    type Err = ViewerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "axial" => Ok(Plane::Axial),
            "sagittal" => Ok(Plane::Sagittal),
            "coronal" => Ok(Plane::Coronal),
            _ => Err(ViewerError::UnknownPlane(value.to_string())),
        }
    }
}

/// One value per anatomical plane.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PerPlane<T> {
    pub axial: T,
    pub sagittal: T,
    pub coronal: T,
}

impl<T> PerPlane<T> {
    pub fn from_fn(mut build: impl FnMut(Plane) -> T) -> Self {
        Self {
            axial: build(Plane::Axial),
            sagittal: build(Plane::Sagittal),
            coronal: build(Plane::Coronal),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Plane, &T)> {
        Plane::ALL.into_iter().map(move |plane| (plane, &self[plane]))
    }
}

impl<T> Index<Plane> for PerPlane<T> {
    type Output = T;

    fn index(&self, plane: Plane) -> &T {
        match plane {
            Plane::Axial => &self.axial,
            Plane::Sagittal => &self.sagittal,
            Plane::Coronal => &self.coronal,
        }
    }
}

impl<T> IndexMut<Plane> for PerPlane<T> {
    fn index_mut(&mut self, plane: Plane) -> &mut T {
        match plane {
            Plane::Axial => &mut self.axial,
            Plane::Sagittal => &mut self.sagittal,
            Plane::Coronal => &mut self.coronal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names_case_insensitively() {
        assert_eq!("Axial".parse::<Plane>().unwrap(), Plane::Axial);
        assert_eq!(" coronal ".parse::<Plane>().unwrap(), Plane::Coronal);
        assert!(matches!(
            "oblique".parse::<Plane>(),
            Err(ViewerError::UnknownPlane(name)) if name == "oblique"
        ));
    }

    #[test]
    fn per_plane_values_are_independent() {
        let mut values = PerPlane::from_fn(|_| 0usize);
        values[Plane::Sagittal] = 7;

        assert_eq!(values[Plane::Axial], 0);
        assert_eq!(values[Plane::Sagittal], 7);
        assert_eq!(values[Plane::Coronal], 0);
        assert_eq!(
            values.iter().map(|(plane, _)| plane).collect::<Vec<_>>(),
            Plane::ALL.to_vec()
        );
    }
}

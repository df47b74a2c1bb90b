use super::Plane;
use crate::error::ViewerError;

/// Depth of the procedural stack used when a plane has no stored imagery.
pub const SYNTHETIC_SLICE_COUNT: usize = 120;

/// Where the pixels for one slice come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageReference {
    Synthetic {
        plane: Plane,
        index: usize,
    },
    Stored {
        plane: Plane,
        index: usize,
        locator: String,
    },
}

/// Provider behind a stack, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Synthetic { total_slices: usize },
    Reference { locators: Vec<String> },
}

impl ImageSource {
    pub fn kind(&self) -> &'static str {
        match self {
            ImageSource::Synthetic { .. } => "synthetic",
            ImageSource::Reference { .. } => "stored",
        }
    }
}

/// Ordered slices for one plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceStack {
    plane: Plane,
    source: ImageSource,
}

impl SliceStack {
    pub fn synthetic(plane: Plane, total_slices: usize) -> Self {
        Self {
            plane,
            source: ImageSource::Synthetic {
                total_slices: total_slices.max(1),
            },
        }
    }

    /// Builds a stack over stored slice locators. An empty list turns the
    /// whole plane synthetic.
    pub fn from_locators(plane: Plane, locators: Vec<String>, synthetic_slices: usize) -> Self {
        if locators.is_empty() {
            log::info!("No stored {plane} slices; using synthetic imagery");
            return Self::synthetic(plane, synthetic_slices);
        }

        Self {
            plane,
            source: ImageSource::Reference { locators },
        }
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self.source, ImageSource::Synthetic { .. })
    }

    pub fn total_slices(&self) -> usize {
        match &self.source {
            ImageSource::Synthetic { total_slices } => *total_slices,
            ImageSource::Reference { locators } => locators.len(),
        }
    }

    /// Default landing slice: the middle of the stack.
    pub fn midpoint(&self) -> usize {
        (self.total_slices() / 2).max(1)
    }

    /// Saturates any requested position into `1..=total_slices`.
    pub fn clamp_index(&self, requested: i64) -> usize {
        let total = self.total_slices() as i64;
        requested.clamp(1, total) as usize
    }

    /// Cyclic successor used by playback.
    pub fn next_wrapping(&self, index: usize) -> usize {
        if index >= self.total_slices() {
            1
        } else {
            index + 1
        }
    }

    pub fn resolve(&self, index: usize) -> Result<ImageReference, ViewerError> {
        let total = self.total_slices();
        if index == 0 || index > total {
            return Err(ViewerError::InvalidIndex {
                plane: self.plane,
                index,
                total,
            });
        }

        Ok(match &self.source {
            ImageSource::Synthetic { .. } => ImageReference::Synthetic {
                plane: self.plane,
                index,
            },
            ImageSource::Reference { locators } => ImageReference::Stored {
                plane: self.plane,
                index,
                locator: locators[index - 1].clone(),
            },
        })
    }
}

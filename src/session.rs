//! The viewer aggregate. Holds every piece of mutable viewer state and
//! turns it into a [`Frame`] on demand. It never draws or re-renders on its
//! own; the presentation layer calls [`ViewerSession::render`] once after
//! each command it forwards.

use crate::annotation::{region_highlights, AnnotationOverlay, StatusBlock};
use crate::capabilities::{Tool, ToolCapabilitySet};
use crate::image_pipeline::{FrameImagePipeline, Raster};
use crate::model::{
    ImageReference, PerPlane, Plane, PredictionAnnotation, SessionPayload, SliceStack,
    ViewerRole,
};
use crate::playback::{PlaybackController, PlaybackState, PlaybackTick};
use crate::windowing::WindowingConfig;
use crate::zoom::ZoomState;

/// Pixels for one frame, or where the presentation layer finds them.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameImage {
    Synthetic(Raster),
    /// Stored bitmap; the presentation layer windows and zooms it with the
    /// frame's settings once decoded.
    Reference { locator: String },
}

/// Everything the rendering surface needs to draw one view of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub plane: Plane,
    pub slice: usize,
    pub total_slices: usize,
    pub zoom: ZoomState,
    pub windowing: WindowingConfig,
    pub image: FrameImage,
    pub overlay: AnnotationOverlay,
}

impl Frame {
    pub fn is_synthetic(&self) -> bool {
        matches!(self.image, FrameImage::Synthetic(_))
    }

    pub fn status(&self) -> &StatusBlock {
        &self.overlay.status
    }
}

#[derive(Debug)]
pub struct ViewerSession {
    stacks: PerPlane<SliceStack>,
    plane: Plane,
    slices: PerPlane<usize>,
    windowing: WindowingConfig,
    zoom: ZoomState,
    playback: PlaybackController,
    role: ViewerRole,
    capabilities: ToolCapabilitySet,
    prediction: Option<PredictionAnnotation>,
    show_annotations: bool,
}

impl ViewerSession {
    pub fn new(stacks: PerPlane<SliceStack>, role: ViewerRole) -> Self {
        let slices = PerPlane::from_fn(|plane| stacks[plane].midpoint());
        Self {
            stacks,
            plane: Plane::default(),
            slices,
            windowing: WindowingConfig::default(),
            zoom: ZoomState::default(),
            playback: PlaybackController::default(),
            role,
            capabilities: ToolCapabilitySet::for_role(role),
            prediction: None,
            show_annotations: true,
        }
    }

    /// All three planes procedural.
    pub fn synthetic(total_slices: usize, role: ViewerRole) -> Self {
        Self::new(
            PerPlane::from_fn(|plane| SliceStack::synthetic(plane, total_slices)),
            role,
        )
    }

    pub fn from_payload(payload: &SessionPayload, synthetic_slices: usize, role: ViewerRole) -> Self {
        log::info!(
            "Opening viewer for session {} as {role}",
            payload.session_code()
        );
        Self::new(payload.slice_stacks(synthetic_slices), role).with_prediction(payload.annotation())
    }

    pub fn with_playback(mut self, playback: PlaybackController) -> Self {
        self.playback = playback;
        self
    }

    pub fn with_prediction(mut self, prediction: Option<PredictionAnnotation>) -> Self {
        self.prediction = prediction;
        self
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn slice(&self) -> usize {
        self.slices[self.plane]
    }

    pub fn slice_for(&self, plane: Plane) -> usize {
        self.slices[plane]
    }

    pub fn stack(&self, plane: Plane) -> &SliceStack {
        &self.stacks[plane]
    }

    pub fn total_slices(&self) -> usize {
        self.stacks[self.plane].total_slices()
    }

    pub fn zoom(&self) -> ZoomState {
        self.zoom
    }

    pub fn windowing(&self) -> WindowingConfig {
        self.windowing
    }

    pub fn role(&self) -> ViewerRole {
        self.role
    }

    pub fn capabilities(&self) -> ToolCapabilitySet {
        self.capabilities
    }

    pub fn prediction(&self) -> Option<&PredictionAnnotation> {
        self.prediction.as_ref()
    }

    pub fn show_annotations(&self) -> bool {
        self.show_annotations
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    /// Switches the displayed plane. Each plane keeps its own position.
    pub fn set_plane(&mut self, plane: Plane) {
        self.plane = plane;
    }

    pub fn set_slice(&mut self, index: i64) {
        let clamped = self.stacks[self.plane].clamp_index(index);
        self.slices[self.plane] = clamped;
    }

    pub fn step_slice(&mut self, delta: i64) {
        self.set_slice((self.slice() as i64).saturating_add(delta));
    }

    pub fn toggle_playback(&mut self) {
        self.playback.toggle();
        log::debug!(
            "Playback {:?} on {} plane every {} ms (ticker running: {})",
            self.playback.state(),
            self.plane,
            self.playback.interval().as_millis(),
            self.playback.has_ticker()
        );
    }

    /// One playback step on the active plane. Wraps from the last slice to
    /// the first. Ignored while stopped.
    pub fn tick(&mut self) {
        if !self.playback.is_playing() {
            return;
        }
        let next = self.stacks[self.plane].next_wrapping(self.slice());
        self.slices[self.plane] = next;
    }

    /// Applies a tick delivered by the playback ticker. Returns whether the
    /// slice advanced; ticks from a run that has since been paused are
    /// dropped.
    pub fn on_tick(&mut self, tick: PlaybackTick) -> bool {
        if !self.playback.accepts(tick) {
            log::trace!(
                "Ignoring tick from playback run {} (current run {})",
                tick.generation(),
                self.playback.generation()
            );
            return false;
        }
        self.tick();
        true
    }

    pub fn zoom_in(&mut self) {
        if self.permits(Tool::ZoomIn) {
            self.zoom.zoom_in();
        }
    }

    pub fn zoom_out(&mut self) {
        if self.permits(Tool::ZoomOut) {
            self.zoom.zoom_out();
        }
    }

    /// Restores zoom, windowing and the active plane's landing slice.
    /// Playback keeps running.
    pub fn reset_view(&mut self) {
        if !self.permits(Tool::Reset) {
            return;
        }
        self.zoom.reset();
        self.windowing = WindowingConfig::default();
        self.slices[self.plane] = self.stacks[self.plane].midpoint();
    }

    pub fn set_brightness(&mut self, value: f32) {
        if self.permits(Tool::Brightness) {
            self.windowing.set_brightness(value);
        }
    }

    pub fn set_contrast(&mut self, value: f32) {
        if self.permits(Tool::Contrast) {
            self.windowing.set_contrast(value);
        }
    }

    pub fn set_show_annotations(&mut self, show: bool) {
        if self.permits(Tool::AnnotationToggle) {
            self.show_annotations = show;
        }
    }

    pub fn render(&self) -> Frame {
        let stack = &self.stacks[self.plane];
        let slice = self.slice();
        let total_slices = stack.total_slices();

        let image = match stack.resolve(slice) {
            Ok(ImageReference::Stored {
                plane,
                index,
                locator,
            }) => {
                log::trace!("{plane} slice {index} is stored at {locator}");
                FrameImage::Reference { locator }
            }
            Ok(ImageReference::Synthetic { plane, index }) => {
                log::trace!("{plane} slice {index} is synthetic");
                FrameImage::Synthetic(FrameImagePipeline::synthetic_slice(
                    index,
                    total_slices,
                    &self.windowing,
                    &self.zoom,
                ))
            }
            Err(err) => {
                log::error!("{err}");
                FrameImage::Synthetic(FrameImagePipeline::synthetic_slice(
                    slice,
                    total_slices,
                    &self.windowing,
                    &self.zoom,
                ))
            }
        };

        let overlay = AnnotationOverlay {
            highlights: region_highlights(
                self.prediction.as_ref(),
                self.show_annotations,
                &self.zoom,
            ),
            status: StatusBlock::new(
                slice,
                total_slices,
                &self.zoom,
                self.prediction.as_ref(),
                self.role,
            ),
        };

        Frame {
            plane: self.plane,
            slice,
            total_slices,
            zoom: self.zoom,
            windowing: self.windowing,
            image,
            overlay,
        }
    }

    fn permits(&self, tool: Tool) -> bool {
        let allowed = self.capabilities.allows(tool);
        if !allowed {
            log::debug!("{} viewers cannot use {tool:?}", self.role);
        }
        allowed
    }
}

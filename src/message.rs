use crate::model::{Plane, SessionPayload};
use crate::playback::PlaybackTick;
use image::RgbaImage;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum Message {
    OpenSession,
    SessionLoaded(Option<Result<SessionPayload, String>>),
    BitmapLoaded(String, Result<Arc<RgbaImage>, String>),
    SelectPlane(Plane),
    SetSlice(i64),
    StepSlice(i64),
    TogglePlayback,
    PlaybackTick(PlaybackTick),
    ZoomIn,
    ZoomOut,
    ResetView,
    SetBrightness(f32),
    SetContrast(f32),
    ToggleAnnotations(bool),
}

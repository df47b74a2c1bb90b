use crate::error::ViewerError;
use crate::windowing::WindowingConfig;
use crate::zoom::{ZoomState, ZOOM_DEFAULT};
use image::{DynamicImage, RgbaImage};
use std::path::Path;

/// Edge length of procedurally generated slices.
pub const SYNTHETIC_EDGE: u32 = 256;

const BACKGROUND: u8 = 0;
const TISSUE_EDGE: f32 = 150.0;
const TISSUE_CORE: f32 = 190.0;
const CORTICAL_RING: u8 = 225;
const VENTRICLE: u8 = 35;

/// Outer and inner cortical ring bands, as normalized ellipse distances.
const RING_BANDS: [(f32, f32); 2] = [(0.82, 0.86), (0.64, 0.68)];

/// Brain footprint radii at full size, as fractions of the frame edge.
const BRAIN_RADII: (f32, f32) = (0.36, 0.44);

/// Ventricle placement relative to the brain radii.
const VENTRICLE_OFFSET: (f32, f32) = (0.28, -0.10);
const VENTRICLE_RADII: (f32, f32) = (0.12, 0.32);

/// Display-ready RGBA pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub struct FrameImagePipeline;

impl FrameImagePipeline {
    /// Procedural brain-like cross-section. Slices near the middle of the
    /// stack render largest; the footprint shrinks to 30% at either end.
    pub fn synthetic_slice(
        index: usize,
        total_slices: usize,
        windowing: &WindowingConfig,
        zoom: &ZoomState,
    ) -> Raster {
        let lut = windowing.lookup_table();
        let scale = footprint_scale(index, total_slices) * zoom.factor();
        let brain_rx = BRAIN_RADII.0 * scale;
        let brain_ry = BRAIN_RADII.1 * scale;
        let ventricle_rx = VENTRICLE_RADII.0 * brain_rx;
        let ventricle_ry = VENTRICLE_RADII.1 * brain_ry;
        let ventricle_dy = VENTRICLE_OFFSET.1 * brain_ry;

        let edge = SYNTHETIC_EDGE;
        let mut rgba = Vec::with_capacity((edge * edge * 4) as usize);
        for y in 0..edge {
            for x in 0..edge {
                let u = (x as f32 + 0.5) / edge as f32 - 0.5;
                let v = (y as f32 + 0.5) / edge as f32 - 0.5;

                let raw = {
                    let d = ellipse_distance(u, v, brain_rx, brain_ry);
                    if d > 1.0 {
                        BACKGROUND
                    } else if [-1.0f32, 1.0].into_iter().any(|side| {
                        ellipse_distance(
                            u - side * VENTRICLE_OFFSET.0 * brain_rx,
                            v - ventricle_dy,
                            ventricle_rx,
                            ventricle_ry,
                        ) <= 1.0
                    }) {
                        VENTRICLE
                    } else if RING_BANDS
                        .iter()
                        .any(|&(inner, outer)| (inner..=outer).contains(&d))
                    {
                        CORTICAL_RING
                    } else {
                        (TISSUE_EDGE + (TISSUE_CORE - TISSUE_EDGE) * (1.0 - d)).round() as u8
                    }
                };

                let gray = lut[raw as usize];
                rgba.extend_from_slice(&[gray, gray, gray, 255]);
            }
        }

        Raster {
            width: edge,
            height: edge,
            rgba,
        }
    }

    /// Windows a decoded bitmap per colour channel and resamples it about
    /// its centre by the zoom factor. Pixels that fall outside the source
    /// after zooming out are black.
    pub fn reference_slice(
        bitmap: &RgbaImage,
        windowing: &WindowingConfig,
        zoom: &ZoomState,
    ) -> Raster {
        let (width, height) = bitmap.dimensions();
        let factor = zoom.factor();
        if windowing.is_identity() && factor == ZOOM_DEFAULT {
            return Raster {
                width,
                height,
                rgba: bitmap.as_raw().clone(),
            };
        }

        let lut = windowing.lookup_table();
        let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);

        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let src_x = cx + (x as f32 + 0.5 - cx) / factor;
                let src_y = cy + (y as f32 + 0.5 - cy) / factor;
                if src_x < 0.0 || src_y < 0.0 || src_x >= width as f32 || src_y >= height as f32 {
                    rgba.extend_from_slice(&[BACKGROUND, BACKGROUND, BACKGROUND, 255]);
                    continue;
                }

                let [r, g, b, a] = bitmap.get_pixel(src_x as u32, src_y as u32).0;
                rgba.extend_from_slice(&[lut[r as usize], lut[g as usize], lut[b as usize], a]);
            }
        }

        Raster {
            width,
            height,
            rgba,
        }
    }

    /// Decodes a stored slice. Accepts plain paths and `file://` URIs.
    pub fn decode_locator(locator: &str) -> Result<RgbaImage, ViewerError> {
        if locator.starts_with("http://") || locator.starts_with("https://") {
            return Err(ViewerError::RemoteLocator(locator.to_string()));
        }

        let path = Path::new(locator.strip_prefix("file://").unwrap_or(locator));
        let decoded = image::open(path).map_err(|err| ViewerError::bitmap_decode(locator, err))?;
        Self::to_display_rgba(decoded, locator)
    }

    fn to_display_rgba(decoded: DynamicImage, locator: &str) -> Result<RgbaImage, ViewerError> {
        match decoded {
            DynamicImage::ImageLuma16(gray) => {
                let (width, height) = gray.dimensions();
                let samples = gray.into_raw();
                let (min, max) = min_max_u16(&samples).unwrap_or((0, 0));
                let mut rgba = Vec::with_capacity(samples.len() * 4);
                for &value in &samples {
                    let gray = normalize_u16(value, min, max);
                    rgba.extend_from_slice(&[gray, gray, gray, 255]);
                }
                RgbaImage::from_raw(width, height, rgba).ok_or_else(|| {
                    ViewerError::bitmap_decode(locator, "pixel buffer does not match dimensions")
                })
            }
            other => Ok(other.into_rgba8()),
        }
    }
}

/// `0.3..=1.0` blend of the maximum footprint, peaking at the stack midpoint.
fn footprint_scale(index: usize, total_slices: usize) -> f32 {
    let mid = (total_slices as f32 / 2.0).max(0.5);
    let size_ratio = (1.0 - (index as f32 - mid).abs() / mid).clamp(0.0, 1.0);
    0.3 + 0.7 * size_ratio
}

fn ellipse_distance(dx: f32, dy: f32, rx: f32, ry: f32) -> f32 {
    ((dx / rx).powi(2) + (dy / ry).powi(2)).sqrt()
}

fn min_max_u16(values: &[u16]) -> Option<(u16, u16)> {
    values.iter().copied().fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}

fn normalize_u16(value: u16, min: u16, max: u16) -> u8 {
    if max <= min {
        return 0;
    }

    let range = (max - min) as f32;
    let normalized = (value.saturating_sub(min)) as f32 / range;
    (normalized * 255.0).clamp(0.0, 255.0).round() as u8
}

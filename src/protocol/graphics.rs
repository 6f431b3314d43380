//! # ESC/POS Raster Graphics
//!
//! Logos are sent as a single `GS v 0` raster image, or as 24-dot
//! `ESC *` column bands for printers that only take column-format images.
//!
//! ## Bit Packing
//!
//! Each byte holds eight horizontal dots, MSB first, 1 = black:
//!
//! ```text
//! 0xF0 = 11110000 = ████░░░░
//! ```
//!
//! Conversion from a picture is a plain luminance threshold. Transparent
//! pixels print white.

use std::path::Path;

use image::GenericImageView;
use serde::{Deserialize, Serialize};

use super::commands::{ESC, GS, LF, u16_le};
use crate::error::{Result, StrukError};

/// Widest logo sent to the printer, in dots (58mm and 80mm safe).
pub const MAX_LOGO_WIDTH: u32 = 384;

/// Luminance below which a pixel prints black.
const BLACK_THRESHOLD: f32 = 128.0;

/// Rows per `ESC *` band in 24-dot mode.
const BAND_ROWS: usize = 24;

/// `ESC *` density: 24-dot double density.
const COLUMN_DENSITY_24: u8 = 33;

/// Image printing mode requested by the caller.
///
/// Older printers only understand one of the image commands. `Auto` and
/// `BitImage` print as a `GS v 0` raster; `ColumnFormat` prints as `ESC *`
/// column bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageMode {
    /// Let the driver choose (mode 0)
    #[default]
    Auto,
    /// Bit image (mode 1)
    BitImage,
    /// Bit image, column format (mode 2)
    ColumnFormat,
}

/// A 1-bit image ready for `GS v 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width_bytes: u16,
    pub height: u16,
    pub data: Vec<u8>,
}

impl RasterImage {
    /// Load a picture, scale it down to `max_width` dots and threshold it.
    pub fn load(path: &Path, max_width: u32) -> Result<Self> {
        let img = image::open(path).map_err(|e| {
            StrukError::Image(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let (w, h) = img.dimensions();
        let img = if w > max_width {
            let ratio = max_width as f64 / w as f64;
            let new_h = ((h as f64 * ratio) as u32).max(1);
            img.resize(max_width, new_h, image::imageops::FilterType::Nearest)
        } else {
            img
        };

        let (w, h) = img.dimensions();
        if h > u16::MAX as u32 {
            return Err(StrukError::Image(format!(
                "{} is too tall ({} rows)",
                path.display(),
                h
            )));
        }

        let rgba = img.to_rgba8();
        let width_bytes = w.div_ceil(8);
        let mut data = Vec::with_capacity((width_bytes * h) as usize);

        for y in 0..h {
            for x_byte in 0..width_bytes {
                let mut byte = 0u8;
                for bit in 0..8 {
                    let x = x_byte * 8 + bit;
                    if x >= w {
                        continue;
                    }
                    let [r, g, b, a] = rgba.get_pixel(x, y).0;
                    if a < 128 {
                        continue;
                    }
                    let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
                    if luma < BLACK_THRESHOLD {
                        byte |= 1 << (7 - bit);
                    }
                }
                data.push(byte);
            }
        }

        Ok(Self {
            width_bytes: width_bytes as u16,
            height: h as u16,
            data,
        })
    }

    /// Encode as a `GS v 0` command.
    pub fn to_command(&self) -> Vec<u8> {
        raster(self.width_bytes, self.height, &self.data)
    }

    /// Encode for the given image mode.
    pub fn encode(&self, mode: ImageMode) -> Vec<u8> {
        match mode {
            ImageMode::Auto | ImageMode::BitImage => self.to_command(),
            ImageMode::ColumnFormat => self.to_column_bands(),
        }
    }

    /// Encode as 24-row `ESC *` bands, each ended by a line feed.
    ///
    /// Line spacing is set to 24 dots so the bands touch, then restored.
    pub fn to_column_bands(&self) -> Vec<u8> {
        let width = self.width_bytes as usize * 8;
        let mut out = vec![ESC, b'3', BAND_ROWS as u8];

        for top in (0..self.height as usize).step_by(BAND_ROWS) {
            let mut data = Vec::with_capacity(width * 3);
            for x in 0..width {
                for slice in 0..3 {
                    let mut byte = 0u8;
                    for bit in 0..8 {
                        if self.dot(x, top + slice * 8 + bit) {
                            byte |= 0x80 >> bit;
                        }
                    }
                    data.push(byte);
                }
            }
            out.extend(column_band(width as u16, &data));
            out.push(LF);
        }

        out.extend([ESC, b'2']);
        out
    }

    fn dot(&self, x: usize, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        let byte = self.data[y * self.width_bytes as usize + x / 8];
        byte & (0x80 >> (x % 8)) != 0
    }
}

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1...dk)
///
/// `width_bytes * height` bytes of packed data, normal density (`m = 0`).
///
/// ```
/// use struk::protocol::graphics::raster;
///
/// let cmd = raster(1, 2, &[0xFF, 0x00]);
/// assert_eq!(cmd, vec![0x1D, 0x76, 0x30, 0x00, 1, 0, 2, 0, 0xFF, 0x00]);
/// ```
pub fn raster(width_bytes: u16, height: u16, data: &[u8]) -> Vec<u8> {
    let [xl, xh] = u16_le(width_bytes);
    let [yl, yh] = u16_le(height);
    let mut cmd = Vec::with_capacity(8 + data.len());
    cmd.extend([GS, b'v', b'0', 0, xl, xh, yl, yh]);
    cmd.extend_from_slice(data);
    cmd
}

/// # Select Bit Image Mode (ESC * m nL nH d1...dk)
///
/// One 24-dot band, `m = 33`. Each column is three bytes, top slice first,
/// MSB at the top.
pub fn column_band(width_dots: u16, data: &[u8]) -> Vec<u8> {
    let [nl, nh] = u16_le(width_dots);
    let mut cmd = Vec::with_capacity(5 + data.len());
    cmd.extend([ESC, b'*', COLUMN_DENSITY_24, nl, nh]);
    cmd.extend_from_slice(data);
    cmd
}

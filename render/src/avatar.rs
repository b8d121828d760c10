//! Avatar for the certificate
//!
//! Either the drawn stick figure, a PNG supplied by the player, or, when the
//! supplied PNG cannot be used, a placeholder box. Resolving an avatar never
//! fails.

use std::path::Path;

use crate::canvas::Canvas;
use crate::colors;
use crate::renderer::FontWeight;

/// Design size the figure coordinates are expressed in
const FIGURE_UNITS: f32 = 300.0;
/// Shifts the figure down so it sits in the middle of its box
const FIGURE_OFFSET_Y: f32 = 48.0;

/// Decoded RGBA image data (straight alpha)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarImage {
    /// RGBA pixel data (width * height * 4 bytes)
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    /// Procedurally drawn figure
    Figure,
    Image(AvatarImage),
    /// A configured image could not be read or decoded
    Missing,
}

impl Avatar {
    /// Resolve the avatar for an optional image path
    pub fn resolve(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Avatar::Figure;
        };

        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Avatar image not found");
                return Avatar::Missing;
            }
        };

        match decode_png(&data) {
            Some(image) => Avatar::Image(image),
            None => {
                tracing::warn!(path = %path.display(), "Avatar image is not a usable PNG");
                Avatar::Missing
            }
        }
    }

    /// Draw into the square box at (x, y)
    pub fn draw(&self, canvas: &mut Canvas<'_>, x: f32, y: f32, size: f32) {
        match self {
            Avatar::Figure => draw_figure(canvas, x, y, size),
            Avatar::Image(image) => canvas.draw_image(image, x, y, size, size),
            Avatar::Missing => draw_placeholder(canvas, x, y, size),
        }
    }
}

/// Head, hair, stick body, arms and legs
fn draw_figure(canvas: &mut Canvas<'_>, x: f32, y: f32, size: f32) {
    let s = size / FIGURE_UNITS;
    let c = FIGURE_UNITS / 2.0;
    let px = |u: f32| x + u * s;
    let py = |v: f32| y + (v + FIGURE_OFFSET_Y) * s;

    // Head
    canvas.fill_ellipse(px(c), py(43.0), 30.0 * s, 29.0 * s, colors::skin());
    canvas.stroke_ellipse(px(c), py(43.0), 30.0 * s, 29.0 * s, 2.0 * s, colors::outline());
    // Hair over the top of the head
    canvas.fill_upper_half_ellipse(px(c), py(36.0), 36.0 * s, 32.0 * s, colors::hair());

    let limbs = [
        ((c, 76.0), (c, 150.0)),
        ((c, 92.0), (c - 36.0, 120.0)),
        ((c, 92.0), (c + 36.0, 120.0)),
        ((c, 150.0), (c - 28.0, 200.0)),
        ((c, 150.0), (c + 28.0, 200.0)),
    ];
    for ((x1, y1), (x2, y2)) in limbs {
        canvas.stroke_line(px(x1), py(y1), px(x2), py(y2), 6.0 * s, colors::limb());
    }
}

fn draw_placeholder(canvas: &mut Canvas<'_>, x: f32, y: f32, size: f32) {
    canvas.fill_rect(x, y, size, size, colors::placeholder_bg());
    canvas.stroke_rect(x, y, size, size, 2.0, colors::placeholder_border());
    let font_size = (size / 12.0).max(10.0);
    canvas.draw_text_centered(
        "avatar missing",
        x + size / 2.0,
        y + size / 2.0 + font_size * 0.35,
        font_size,
        FontWeight::Regular,
        colors::text_muted(),
    );
}

/// Decode PNG data to RGBA
fn decode_png(data: &[u8]) -> Option<AvatarImage> {
    let mut decoder = png::Decoder::new(data);
    // Expand palettes and low bit depths, strip 16-bit channels
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info().ok()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).ok()?;

    let width = info.width;
    let height = info.height;
    let pixels = &buf[..info.buffer_size()];

    let rgba = match info.color_type {
        png::ColorType::Rgba => pixels.to_vec(),
        png::ColorType::Rgb => {
            let mut rgba = Vec::with_capacity((width * height * 4) as usize);
            for chunk in pixels.chunks(3) {
                rgba.extend_from_slice(chunk);
                rgba.push(255);
            }
            rgba
        }
        png::ColorType::GrayscaleAlpha => {
            let mut rgba = Vec::with_capacity((width * height * 4) as usize);
            for chunk in pixels.chunks(2) {
                let gray = chunk[0];
                rgba.extend_from_slice(&[gray, gray, gray, chunk[1]]);
            }
            rgba
        }
        png::ColorType::Grayscale => {
            let mut rgba = Vec::with_capacity((width * height * 4) as usize);
            for &gray in pixels {
                rgba.extend_from_slice(&[gray, gray, gray, 255]);
            }
            rgba
        }
        // Expanded by the transformations above
        png::ColorType::Indexed => return None,
    };

    if width == 0 || height == 0 || rgba.len() != (width * height * 4) as usize {
        return None;
    }
    Some(AvatarImage {
        rgba,
        width,
        height,
    })
}

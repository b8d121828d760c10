//! Drawing surface for one certificate
//!
//! `Canvas` owns the pixel buffer and forwards drawing calls to a borrowed
//! [`Renderer`], so layouts only deal in coordinates and colors.

#![allow(clippy::too_many_arguments)]
use tiny_skia::{Color, PixmapRef};

use crate::avatar::AvatarImage;
use crate::error::CertificateError;
use crate::renderer::{FontWeight, Renderer};

pub struct Canvas<'r> {
    renderer: &'r mut Renderer,
    buffer: Vec<u8>,
    width: u32,
    height: u32,
}

impl<'r> Canvas<'r> {
    /// Create a canvas filled with `background`
    pub fn new(renderer: &'r mut Renderer, width: u32, height: u32, background: Color) -> Self {
        let mut buffer = Renderer::create_buffer(width, height);
        renderer.clear(&mut buffer, width, height, background);
        Self {
            renderer,
            buffer,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.renderer
            .fill_rect(&mut self.buffer, self.width, self.height, x, y, w, h, color);
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, stroke_width: f32, color: Color) {
        self.renderer.stroke_rect(
            &mut self.buffer,
            self.width,
            self.height,
            x,
            y,
            w,
            h,
            stroke_width,
            color,
        );
    }

    pub fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, color: Color) {
        self.renderer
            .fill_ellipse(&mut self.buffer, self.width, self.height, cx, cy, rx, ry, color);
    }

    pub fn stroke_ellipse(
        &mut self,
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        stroke_width: f32,
        color: Color,
    ) {
        self.renderer.stroke_ellipse(
            &mut self.buffer,
            self.width,
            self.height,
            cx,
            cy,
            rx,
            ry,
            stroke_width,
            color,
        );
    }

    pub fn fill_upper_half_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, color: Color) {
        self.renderer.fill_upper_half_ellipse(
            &mut self.buffer,
            self.width,
            self.height,
            cx,
            cy,
            rx,
            ry,
            color,
        );
    }

    pub fn stroke_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, stroke_width: f32, color: Color) {
        self.renderer.stroke_line(
            &mut self.buffer,
            self.width,
            self.height,
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        );
    }

    pub fn fill_star(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.renderer
            .fill_star(&mut self.buffer, self.width, self.height, cx, cy, radius, color);
    }

    pub fn draw_image(&mut self, image: &AvatarImage, x: f32, y: f32, box_w: f32, box_h: f32) {
        self.renderer.draw_image(
            &mut self.buffer,
            self.width,
            self.height,
            image,
            x,
            y,
            box_w,
            box_h,
        );
    }

    /// Draw text with its baseline at `y`
    pub fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font_size: f32,
        weight: FontWeight,
        color: Color,
    ) {
        self.renderer.draw_text(
            &mut self.buffer,
            self.width,
            self.height,
            text,
            x,
            y,
            font_size,
            weight,
            color,
        );
    }

    /// Draw text horizontally centered on `center_x`; returns the drawn width
    pub fn draw_text_centered(
        &mut self,
        text: &str,
        center_x: f32,
        y: f32,
        font_size: f32,
        weight: FontWeight,
        color: Color,
    ) -> f32 {
        let (text_width, _) = self.renderer.measure_text(text, font_size, weight);
        self.draw_text(text, center_x - text_width / 2.0, y, font_size, weight, color);
        text_width
    }

    pub fn measure_text(&mut self, text: &str, font_size: f32, weight: FontWeight) -> (f32, f32) {
        self.renderer.measure_text(text, font_size, weight)
    }

    /// Serialize the canvas to PNG bytes
    pub fn encode_png(&self) -> Result<Vec<u8>, CertificateError> {
        let pixmap = PixmapRef::from_bytes(&self.buffer, self.width, self.height).ok_or(
            CertificateError::Canvas {
                width: self.width,
                height: self.height,
            },
        )?;
        pixmap
            .encode_png()
            .map_err(|e| CertificateError::Encode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_a_png_of_the_canvas_size() {
        let mut renderer = Renderer::new();
        let mut canvas = Canvas::new(&mut renderer, 64, 32, Color::WHITE);
        canvas.fill_rect(0.0, 0.0, 64.0, 8.0, Color::BLACK);

        let bytes = canvas.encode_png().unwrap();
        let decoder = png::Decoder::new(bytes.as_slice());
        let reader = decoder.read_info().unwrap();
        assert_eq!(reader.info().width, 64);
        assert_eq!(reader.info().height, 32);
    }

    #[test]
    fn zero_sized_canvas_reports_error() {
        let mut renderer = Renderer::new();
        let canvas = Canvas::new(&mut renderer, 0, 0, Color::WHITE);
        assert!(matches!(
            canvas.encode_png(),
            Err(CertificateError::Canvas { width: 0, height: 0 })
        ));
    }
}

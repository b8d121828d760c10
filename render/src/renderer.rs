//! Software renderer using tiny-skia and cosmic-text
//!
//! Draws onto a caller-owned RGBA pixel buffer. All rendering is done on the
//! CPU; nothing here touches a window system.
#![allow(clippy::too_many_arguments)]
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use cosmic_text::{
    Attrs, Buffer, Color as CosmicColor, Family, FontSystem, LayoutGlyph, Metrics, Shaping,
    SwashCache, Weight, fontdb,
};
use tiny_skia::{
    Color, FillRule, FilterQuality, IntSize, LineCap, LineJoin, Paint, PathBuilder, Pixmap,
    PixmapMut, PixmapPaint, Rect, Stroke, Transform,
};

use crate::avatar::AvatarImage;

/// Maximum entries in the text shaping cache (LRU eviction when exceeded)
const TEXT_CACHE_MAX_ENTRIES: usize = 64;

/// Embedded face used when no font file is configured, so text never
/// depends on fonts installed on the host
const FALLBACK_FONT: &[u8] = include_bytes!("../assets/fonts/NotoSans-Regular.ttf");
const FALLBACK_FAMILY: &str = "Noto Sans";

/// Cubic control-point factor for approximating a quarter ellipse
const KAPPA: f32 = 0.552_284_8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Cached result of text shaping
struct CachedText {
    glyphs: Vec<LayoutGlyph>,
    width: f32,
    height: f32,
    /// LRU tracking: incremented on each access
    last_used: u64,
}

/// Key for text cache: (text content, font size rounded to tenths, weight)
type TextCacheKey = (String, u32, FontWeight);

/// A software renderer for certificate content
pub struct Renderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    /// Family loaded from a decorative font file, if any
    regular_family: Option<String>,
    bold_family: Option<String>,
    text_cache: HashMap<TextCacheKey, CachedText>,
    cache_access_counter: u64,
}

impl Renderer {
    /// Create a renderer using the embedded fallback family
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_font_data(FALLBACK_FONT.to_vec());
        db.set_sans_serif_family(FALLBACK_FAMILY);

        Self {
            font_system: FontSystem::new_with_locale_and_db("en-US".to_string(), db),
            swash_cache: SwashCache::new(),
            regular_family: None,
            bold_family: None,
            text_cache: HashMap::with_capacity(32),
            cache_access_counter: 0,
        }
    }

    /// Create a renderer with optional decorative font files.
    ///
    /// A font that cannot be read or parsed is skipped and the embedded
    /// sans-serif family is used in its place.
    pub fn with_fonts(regular: Option<&Path>, bold: Option<&Path>) -> Self {
        let mut renderer = Self::new();
        renderer.regular_family = regular.and_then(|p| renderer.load_font_file(p));
        renderer.bold_family = bold.and_then(|p| renderer.load_font_file(p));
        renderer
    }

    /// Name of the family used for regular text, `None` for the embedded fallback
    pub fn regular_family(&self) -> Option<&str> {
        self.regular_family.as_deref()
    }

    pub fn bold_family(&self) -> Option<&str> {
        self.bold_family.as_deref()
    }

    /// Load a font file into the font database and return its family name
    fn load_font_file(&mut self, path: &Path) -> Option<String> {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Font not found, using embedded font");
                return None;
            }
        };

        let db = self.font_system.db_mut();
        let ids = db.load_font_source(fontdb::Source::Binary(Arc::new(data)));
        let family = ids
            .first()
            .and_then(|id| db.face(*id))
            .and_then(|face| face.families.first())
            .map(|(name, _)| name.clone());

        match &family {
            Some(name) => tracing::debug!(path = %path.display(), family = %name, "Loaded font"),
            None => tracing::warn!(path = %path.display(), "Font file unreadable, using embedded font"),
        }
        family
    }

    /// Evict least recently used entries if cache is too large
    fn evict_lru_if_needed(&mut self) {
        if self.text_cache.len() <= TEXT_CACHE_MAX_ENTRIES {
            return;
        }

        let target_size = TEXT_CACHE_MAX_ENTRIES * 3 / 4;
        let mut entries: Vec<_> = self
            .text_cache
            .iter()
            .map(|(k, v)| (k.clone(), v.last_used))
            .collect();
        entries.sort_by_key(|(_, last_used)| *last_used);

        for (key, _) in entries
            .into_iter()
            .take(self.text_cache.len() - target_size)
        {
            self.text_cache.remove(&key);
        }
    }

    fn find_cached(
        &mut self,
        text: &str,
        font_size_key: u32,
        weight: FontWeight,
    ) -> Option<&mut CachedText> {
        self.text_cache
            .iter_mut()
            .find(|(k, _)| k.0 == text && k.1 == font_size_key && k.2 == weight)
            .map(|(_, v)| v)
    }

    /// Ensure text is cached, shaping if needed. Returns (width, height).
    fn ensure_cached(&mut self, text: &str, font_size: f32, weight: FontWeight) -> (f32, f32) {
        let font_size_key = (font_size * 10.0).round() as u32;

        self.cache_access_counter += 1;
        let current_access = self.cache_access_counter;

        if let Some(cached) = self.find_cached(text, font_size_key, weight) {
            cached.last_used = current_access;
            return (cached.width, cached.height);
        }

        let metrics = Metrics::new(font_size, font_size * 1.2);
        let mut text_buffer = Buffer::new(&mut self.font_system, metrics);

        // Bold text falls back to the regular file before the embedded family
        let family = match weight {
            FontWeight::Bold => self.bold_family.as_deref().or(self.regular_family.as_deref()),
            FontWeight::Regular => self.regular_family.as_deref(),
        };
        let attrs = match family {
            Some(name) => Attrs::new().family(Family::Name(name)),
            None => Attrs::new().family(Family::Name(FALLBACK_FAMILY)),
        };
        let attrs = match weight {
            FontWeight::Bold => attrs.weight(Weight::BOLD),
            FontWeight::Regular => attrs,
        };

        text_buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        text_buffer.shape_until_scroll(&mut self.font_system, false);

        let mut glyphs = Vec::new();
        let mut width = 0.0f32;
        let mut height = 0.0f32;

        for run in text_buffer.layout_runs() {
            width = width.max(run.line_w);
            height += run.line_height;
            glyphs.extend(run.glyphs.iter().cloned());
        }

        self.text_cache.insert(
            (text.to_string(), font_size_key, weight),
            CachedText {
                glyphs,
                width,
                height,
                last_used: current_access,
            },
        );
        self.evict_lru_if_needed();

        (width, height)
    }

    fn get_cached_glyphs(&mut self, text: &str, font_size: f32, weight: FontWeight) -> Vec<LayoutGlyph> {
        let font_size_key = (font_size * 10.0).round() as u32;
        self.find_cached(text, font_size_key, weight)
            .map(|c| c.glyphs.clone())
            .unwrap_or_default()
    }

    /// Create a new pixel buffer (RGBA format)
    pub fn create_buffer(width: u32, height: u32) -> Vec<u8> {
        vec![0u8; (width * height * 4) as usize]
    }

    /// Clear a pixel buffer with a color
    pub fn clear(&self, buffer: &mut [u8], width: u32, height: u32, color: Color) {
        if let Some(mut pixmap) = PixmapMut::from_bytes(buffer, width, height) {
            pixmap.fill(color);
        }
    }

    /// Draw a filled rectangle
    pub fn fill_rect(
        &self,
        buffer: &mut [u8],
        width: u32,
        height: u32,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    ) {
        let Some(mut pixmap) = PixmapMut::from_bytes(buffer, width, height) else {
            return;
        };
        let Some(rect) = Rect::from_xywh(x, y, w, h) else {
            return;
        };

        pixmap.fill_rect(rect, &solid(color), Transform::identity(), None);
    }

    /// Draw a rectangle outline centered on the rectangle's edges
    pub fn stroke_rect(
        &self,
        buffer: &mut [u8],
        width: u32,
        height: u32,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        stroke_width: f32,
        color: Color,
    ) {
        let Some(rect) = Rect::from_xywh(x, y, w, h) else {
            return;
        };
        let path = PathBuilder::from_rect(rect);
        stroke_path(buffer, width, height, &path, stroke_width, LineCap::Butt, color);
    }

    /// Draw a filled ellipse
    pub fn fill_ellipse(
        &self,
        buffer: &mut [u8],
        width: u32,
        height: u32,
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        color: Color,
    ) {
        let Some(path) = Rect::from_xywh(cx - rx, cy - ry, rx * 2.0, ry * 2.0)
            .and_then(PathBuilder::from_oval)
        else {
            return;
        };
        fill_path(buffer, width, height, &path, color);
    }

    /// Draw an ellipse outline
    pub fn stroke_ellipse(
        &self,
        buffer: &mut [u8],
        width: u32,
        height: u32,
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        stroke_width: f32,
        color: Color,
    ) {
        let Some(path) = Rect::from_xywh(cx - rx, cy - ry, rx * 2.0, ry * 2.0)
            .and_then(PathBuilder::from_oval)
        else {
            return;
        };
        stroke_path(buffer, width, height, &path, stroke_width, LineCap::Round, color);
    }

    /// Draw the upper half of an ellipse, closed along its horizontal diameter
    pub fn fill_upper_half_ellipse(
        &self,
        buffer: &mut [u8],
        width: u32,
        height: u32,
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        color: Color,
    ) {
        let mut pb = PathBuilder::new();
        pb.move_to(cx - rx, cy);
        pb.cubic_to(cx - rx, cy - KAPPA * ry, cx - KAPPA * rx, cy - ry, cx, cy - ry);
        pb.cubic_to(cx + KAPPA * rx, cy - ry, cx + rx, cy - KAPPA * ry, cx + rx, cy);
        pb.close();
        let Some(path) = pb.finish() else { return };
        fill_path(buffer, width, height, &path, color);
    }

    /// Draw a straight line with round caps
    pub fn stroke_line(
        &self,
        buffer: &mut [u8],
        width: u32,
        height: u32,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke_width: f32,
        color: Color,
    ) {
        let mut pb = PathBuilder::new();
        pb.move_to(x1, y1);
        pb.line_to(x2, y2);
        let Some(path) = pb.finish() else { return };
        stroke_path(buffer, width, height, &path, stroke_width, LineCap::Round, color);
    }

    /// Draw a filled five-pointed star centered on (cx, cy)
    pub fn fill_star(
        &self,
        buffer: &mut [u8],
        width: u32,
        height: u32,
        cx: f32,
        cy: f32,
        outer_radius: f32,
        color: Color,
    ) {
        let inner_radius = outer_radius * 0.4;
        let mut pb = PathBuilder::new();
        for i in 0..10 {
            let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
            let angle = -std::f32::consts::FRAC_PI_2 + i as f32 * std::f32::consts::PI / 5.0;
            let (px, py) = (cx + radius * angle.cos(), cy + radius * angle.sin());
            if i == 0 {
                pb.move_to(px, py);
            } else {
                pb.line_to(px, py);
            }
        }
        pb.close();
        let Some(path) = pb.finish() else { return };
        fill_path(buffer, width, height, &path, color);
    }

    /// Draw an RGBA image scaled to fit a box, preserving its aspect ratio
    pub fn draw_image(
        &self,
        buffer: &mut [u8],
        width: u32,
        height: u32,
        image: &AvatarImage,
        x: f32,
        y: f32,
        box_w: f32,
        box_h: f32,
    ) {
        let Some(mut pixmap) = PixmapMut::from_bytes(buffer, width, height) else {
            return;
        };
        let Some(source) = to_pixmap(image) else {
            return;
        };

        let scale = (box_w / image.width as f32).min(box_h / image.height as f32);
        let drawn_w = image.width as f32 * scale;
        let drawn_h = image.height as f32 * scale;
        let transform = Transform::from_scale(scale, scale).post_translate(
            x + (box_w - drawn_w) / 2.0,
            y + (box_h - drawn_h) / 2.0,
        );

        let paint = PixmapPaint {
            quality: FilterQuality::Bicubic,
            ..Default::default()
        };
        pixmap.draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
    }

    /// Draw text with its baseline at `y` (uses shaping cache)
    pub fn draw_text(
        &mut self,
        buffer: &mut [u8],
        buf_width: u32,
        buf_height: u32,
        text: &str,
        x: f32,
        y: f32,
        font_size: f32,
        weight: FontWeight,
        color: Color,
    ) {
        let Some(mut pixmap) = PixmapMut::from_bytes(buffer, buf_width, buf_height) else {
            return;
        };

        let _ = self.ensure_cached(text, font_size, weight);
        let glyphs = self.get_cached_glyphs(text, font_size, weight);

        let text_color = CosmicColor::rgba(
            (color.red() * 255.0) as u8,
            (color.green() * 255.0) as u8,
            (color.blue() * 255.0) as u8,
            (color.alpha() * 255.0) as u8,
        );

        for glyph in &glyphs {
            let physical_glyph = glyph.physical((x, y), 1.0);

            if let Some(image) = self
                .swash_cache
                .get_image(&mut self.font_system, physical_glyph.cache_key)
            {
                let glyph_x = physical_glyph.x + image.placement.left;
                let glyph_y = physical_glyph.y - image.placement.top;

                draw_glyph_to_pixmap(
                    &mut pixmap,
                    &image.data,
                    image.placement.width,
                    image.placement.height,
                    glyph_x,
                    glyph_y,
                    text_color,
                );
            }
        }
    }

    /// Measure text dimensions (uses shaping cache, no glyph clone)
    pub fn measure_text(&mut self, text: &str, font_size: f32, weight: FontWeight) -> (f32, f32) {
        self.ensure_cached(text, font_size, weight)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn solid(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

fn fill_path(buffer: &mut [u8], width: u32, height: u32, path: &tiny_skia::Path, color: Color) {
    let Some(mut pixmap) = PixmapMut::from_bytes(buffer, width, height) else {
        return;
    };
    pixmap.fill_path(
        path,
        &solid(color),
        FillRule::Winding,
        Transform::identity(),
        None,
    );
}

fn stroke_path(
    buffer: &mut [u8],
    width: u32,
    height: u32,
    path: &tiny_skia::Path,
    stroke_width: f32,
    line_cap: LineCap,
    color: Color,
) {
    let Some(mut pixmap) = PixmapMut::from_bytes(buffer, width, height) else {
        return;
    };
    let stroke = Stroke {
        width: stroke_width,
        line_cap,
        line_join: LineJoin::Round,
        ..Default::default()
    };
    pixmap.stroke_path(path, &solid(color), &stroke, Transform::identity(), None);
}

/// Convert straight-alpha RGBA into a premultiplied pixmap
fn to_pixmap(image: &AvatarImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(image.width, image.height)?;
    let mut data = image.rgba.clone();
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u32;
        if a < 255 {
            px[0] = (px[0] as u32 * a / 255) as u8;
            px[1] = (px[1] as u32 * a / 255) as u8;
            px[2] = (px[2] as u32 * a / 255) as u8;
        }
    }
    Pixmap::from_vec(data, size)
}

/// Draw a glyph image onto a pixmap with alpha blending
fn draw_glyph_to_pixmap(
    pixmap: &mut PixmapMut,
    glyph_data: &[u8],
    glyph_width: u32,
    glyph_height: u32,
    dest_x: i32,
    dest_y: i32,
    color: CosmicColor,
) {
    let pixmap_width = pixmap.width() as i32;
    let pixmap_height = pixmap.height() as i32;
    let data = pixmap.data_mut();

    for gy in 0..glyph_height as i32 {
        let py = dest_y + gy;
        if py < 0 || py >= pixmap_height {
            continue;
        }

        for gx in 0..glyph_width as i32 {
            let px = dest_x + gx;
            if px < 0 || px >= pixmap_width {
                continue;
            }

            let glyph_idx = (gy as u32 * glyph_width + gx as u32) as usize;
            let Some(&alpha) = glyph_data.get(glyph_idx) else {
                continue;
            };
            if alpha == 0 {
                continue;
            }

            let pixel_idx = ((py as u32 * pixmap_width as u32 + px as u32) * 4) as usize;
            if pixel_idx + 3 >= data.len() {
                continue;
            }

            let src_a = (alpha as u32 * color.a() as u32) / 255;
            let inv_a = 255 - src_a;

            data[pixel_idx] =
                ((color.r() as u32 * src_a + data[pixel_idx] as u32 * inv_a) / 255) as u8;
            data[pixel_idx + 1] =
                ((color.g() as u32 * src_a + data[pixel_idx + 1] as u32 * inv_a) / 255) as u8;
            data[pixel_idx + 2] =
                ((color.b() as u32 * src_a + data[pixel_idx + 2] as u32 * inv_a) / 255) as u8;
            data[pixel_idx + 3] = (src_a + (data[pixel_idx + 3] as u32 * inv_a) / 255) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(buffer: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * width + x) * 4) as usize;
        [buffer[i], buffer[i + 1], buffer[i + 2], buffer[i + 3]]
    }

    #[test]
    fn fill_rect_paints_inside_only() {
        let renderer = Renderer::new();
        let mut buf = Renderer::create_buffer(20, 20);
        renderer.clear(&mut buf, 20, 20, Color::WHITE);
        renderer.fill_rect(&mut buf, 20, 20, 5.0, 5.0, 10.0, 10.0, Color::from_rgba8(180, 20, 20, 255));

        assert_eq!(pixel(&buf, 20, 10, 10), [180, 20, 20, 255]);
        assert_eq!(pixel(&buf, 20, 1, 1), [255, 255, 255, 255]);
    }

    #[test]
    fn ellipse_and_star_fill_their_centers() {
        let renderer = Renderer::new();
        let mut buf = Renderer::create_buffer(40, 40);
        renderer.clear(&mut buf, 40, 40, Color::WHITE);
        renderer.fill_ellipse(&mut buf, 40, 40, 10.0, 10.0, 6.0, 4.0, Color::BLACK);
        renderer.fill_star(&mut buf, 40, 40, 30.0, 30.0, 8.0, Color::BLACK);

        assert_eq!(pixel(&buf, 40, 10, 10), [0, 0, 0, 255]);
        assert_eq!(pixel(&buf, 40, 30, 30), [0, 0, 0, 255]);
        assert_eq!(pixel(&buf, 40, 2, 38), [255, 255, 255, 255]);
    }

    #[test]
    fn missing_font_falls_back_to_embedded() {
        let renderer = Renderer::with_fonts(
            Some(Path::new("/definitely/not/here.ttf")),
            Some(Path::new("/definitely/not/here-bold.ttf")),
        );
        assert_eq!(renderer.regular_family(), None);
        assert_eq!(renderer.bold_family(), None);
    }

    #[test]
    fn garbage_font_file_falls_back_to_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").unwrap();

        let renderer = Renderer::with_fonts(Some(&path), None);
        assert_eq!(renderer.regular_family(), None);
    }

    #[test]
    fn text_draws_with_embedded_font_only() {
        let mut renderer = Renderer::new();
        let (width, _) = renderer.measure_text("ROWAN", 40.0, FontWeight::Bold);
        assert!(width > 0.0);

        let mut buf = Renderer::create_buffer(200, 60);
        renderer.clear(&mut buf, 200, 60, Color::WHITE);
        renderer.draw_text(&mut buf, 200, 60, "ROWAN", 5.0, 45.0, 40.0, FontWeight::Bold, Color::BLACK);

        let inked = buf.chunks_exact(4).filter(|px| px[0] < 128).count();
        assert!(inked > 50, "expected glyph pixels, got {inked}");
    }

    #[test]
    fn measuring_text_is_cached_and_stable() {
        let mut renderer = Renderer::new();
        let first = renderer.measure_text("Santa Claus", 32.0, FontWeight::Regular);
        let second = renderer.measure_text("Santa Claus", 32.0, FontWeight::Regular);
        assert_eq!(first, second);
        assert_eq!(renderer.text_cache.len(), 1);
    }

    #[test]
    fn text_cache_evicts_oldest_entries() {
        let mut renderer = Renderer::new();
        for i in 0..=TEXT_CACHE_MAX_ENTRIES {
            renderer.measure_text(&format!("line {i}"), 12.0, FontWeight::Regular);
        }
        assert!(renderer.text_cache.len() <= TEXT_CACHE_MAX_ENTRIES);
        assert!(renderer.find_cached("line 0", 120, FontWeight::Regular).is_none());
    }
}

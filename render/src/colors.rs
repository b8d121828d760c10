use tiny_skia::Color;

#[inline]
pub fn white() -> Color {
    Color::from_rgba8(255, 255, 255, 255)
}

// ─────────────────────────────────────────────────────────────────────────
// Certificate
// ─────────────────────────────────────────────────────────────────────────

/// Header band fill
#[inline]
pub fn header_red() -> Color {
    Color::from_rgba8(180, 20, 20, 255)
}

/// Title text on the header band
#[inline]
pub fn cream() -> Color {
    Color::from_rgba8(255, 245, 230, 255)
}

/// Body text
#[inline]
pub fn ink() -> Color {
    Color::from_rgba8(30, 30, 30, 255)
}

/// Citation text, slightly lighter than body text
#[inline]
pub fn ink_soft() -> Color {
    Color::from_rgba8(40, 40, 40, 255)
}

/// Player name and the border
#[inline]
pub fn evergreen() -> Color {
    Color::from_rgba8(10, 80, 20, 255)
}

/// Santa's signature
#[inline]
pub fn signature_red() -> Color {
    Color::from_rgba8(130, 0, 0, 255)
}

#[inline]
pub fn star_gold() -> Color {
    Color::from_rgba8(255, 216, 77, 255)
}

// ─────────────────────────────────────────────────────────────────────────
// Avatar
// ─────────────────────────────────────────────────────────────────────────

#[inline]
pub fn skin() -> Color {
    Color::from_rgba8(247, 210, 154, 255)
}

#[inline]
pub fn hair() -> Color {
    Color::from_rgba8(116, 75, 40, 255)
}

/// Face outline
#[inline]
pub fn outline() -> Color {
    Color::from_rgba8(60, 30, 10, 255)
}

/// Stick body
#[inline]
pub fn limb() -> Color {
    Color::from_rgba8(10, 10, 10, 255)
}

/// Background of the box drawn when the avatar image is missing
#[inline]
pub fn placeholder_bg() -> Color {
    Color::from_rgba8(238, 238, 238, 255)
}

#[inline]
pub fn placeholder_border() -> Color {
    Color::from_rgba8(150, 150, 150, 255)
}

#[inline]
pub fn text_muted() -> Color {
    Color::from_rgba8(120, 120, 120, 255)
}

//! Christmas Hero certificate
//!
//! Lays out the award on a fixed 1200x800 canvas and encodes it as PNG, or
//! writes the same wording as a framed text block. Rendering never touches
//! the filesystem except to read the optional font and avatar assets, and a
//! missing asset only changes what is drawn.

use std::path::{Path, PathBuf};

use yuletide_core::{
    CertificateConfig, CertificateFormat, DEFAULT_PLAYER_NAME, ProgressTracker,
};

use crate::avatar::Avatar;
use crate::canvas::Canvas;
use crate::colors;
use crate::error::CertificateError;
use crate::renderer::{FontWeight, Renderer};
use crate::utils::{MAX_NAME_CHARS, file_stem, truncate_name};

pub const CERTIFICATE_WIDTH: u32 = 1200;
pub const CERTIFICATE_HEIGHT: u32 = 800;
pub const HEADER_HEIGHT: f32 = 160.0;

pub const TITLE: &str = "CHRISTMAS HERO AWARD";
pub const AWARD_LINE: &str = "This certificate is proudly awarded to";
pub const CITATION: [&str; 3] = [
    "For completing the Christmas Adventure:",
    "delivering the star, racing the sleigh,",
    "and lighting the tree!",
];
pub const SIGNATURE: &str = "Santa Claus";

const AVATAR_X: f32 = 60.0;
const AVATAR_Y: f32 = 220.0;
const AVATAR_SIZE: f32 = 300.0;
const BODY_X: f32 = 420.0;
const BORDER_INSET: f32 = 10.0;
const BORDER_WIDTH: f32 = 8.0;

/// Width of the text certificate, in characters
const TEXT_COLUMNS: usize = 48;

/// A rendered certificate ready to be saved or sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    pub bytes: Vec<u8>,
    pub format: CertificateFormat,
    pub file_name: String,
    pub content_type: &'static str,
}

pub struct CertificateRenderer {
    renderer: Renderer,
    avatar_path: Option<PathBuf>,
}

impl CertificateRenderer {
    /// Renderer with the embedded font and the drawn figure
    pub fn new() -> Self {
        Self {
            renderer: Renderer::new(),
            avatar_path: None,
        }
    }

    pub fn from_config(config: &CertificateConfig) -> Self {
        Self::with_assets(
            config.font_path.as_deref().map(Path::new),
            config.bold_font_path.as_deref().map(Path::new),
            config.avatar_path.as_deref().map(Path::new),
        )
    }

    pub fn with_assets(font: Option<&Path>, bold_font: Option<&Path>, avatar: Option<&Path>) -> Self {
        Self {
            renderer: Renderer::with_fonts(font, bold_font),
            avatar_path: avatar.map(Path::to_path_buf),
        }
    }

    /// Render the certificate for `name` as PNG bytes.
    ///
    /// A blank name is replaced with the default player name.
    pub fn render(&mut self, name: &str) -> Result<Vec<u8>, CertificateError> {
        let name = display_name(name);
        // Resolved per render so a replaced avatar file is picked up
        let avatar = Avatar::resolve(self.avatar_path.as_deref());

        let mut canvas = Canvas::new(
            &mut self.renderer,
            CERTIFICATE_WIDTH,
            CERTIFICATE_HEIGHT,
            colors::white(),
        );
        let width = canvas.width() as f32;
        let height = canvas.height() as f32;

        // ─────────────────────────────────────────────────────────────────────
        // Header
        // ─────────────────────────────────────────────────────────────────────
        canvas.fill_rect(0.0, 0.0, width, HEADER_HEIGHT, colors::header_red());
        let title_width = canvas.draw_text_centered(
            TITLE,
            width / 2.0,
            100.0,
            56.0,
            FontWeight::Bold,
            colors::cream(),
        );
        let star_offset = title_width / 2.0 + 45.0;
        canvas.fill_star(width / 2.0 - star_offset, 80.0, 22.0, colors::star_gold());
        canvas.fill_star(width / 2.0 + star_offset, 80.0, 22.0, colors::star_gold());

        avatar.draw(&mut canvas, AVATAR_X, AVATAR_Y, AVATAR_SIZE);

        // ─────────────────────────────────────────────────────────────────────
        // Body
        // ─────────────────────────────────────────────────────────────────────
        canvas.draw_text(AWARD_LINE, BODY_X, 270.0, 32.0, FontWeight::Regular, colors::ink());

        let shown = truncate_name(&name, MAX_NAME_CHARS);
        let name_x = BODY_X + 50.0;
        canvas.fill_star(BODY_X + 18.0, 340.0, 18.0, colors::star_gold());
        canvas.draw_text(&shown, name_x, 362.0, 56.0, FontWeight::Bold, colors::evergreen());
        let (name_width, _) = canvas.measure_text(&shown, 56.0, FontWeight::Bold);
        canvas.fill_star(name_x + name_width + 32.0, 340.0, 18.0, colors::star_gold());

        for (i, line) in CITATION.iter().enumerate() {
            let y = 425.0 + i as f32 * 38.0;
            canvas.draw_text(line, BODY_X, y, 28.0, FontWeight::Regular, colors::ink_soft());
        }

        canvas.draw_text(SIGNATURE, BODY_X, 585.0, 36.0, FontWeight::Bold, colors::signature_red());
        canvas.stroke_line(BODY_X, 605.0, BODY_X + 320.0, 605.0, 2.0, colors::ink());

        canvas.stroke_rect(
            BORDER_INSET,
            BORDER_INSET,
            width - 2.0 * BORDER_INSET,
            height - 2.0 * BORDER_INSET,
            BORDER_WIDTH,
            colors::evergreen(),
        );

        let bytes = canvas.encode_png()?;
        tracing::debug!(name = %name, bytes = bytes.len(), "Rendered certificate");
        Ok(bytes)
    }

    /// Plain-text certificate with the same wording, framed by `*` rules
    pub fn render_text(&self, name: &str) -> String {
        let name = display_name(name);
        let rule = "*".repeat(TEXT_COLUMNS);

        let mut lines = vec![rule.clone(), center(TITLE), rule.clone(), String::new()];
        lines.push(center(AWARD_LINE));
        lines.push(String::new());
        lines.push(center(&format!("* {name} *")));
        lines.push(String::new());
        lines.extend(CITATION.iter().map(|line| center(line)));
        lines.push(String::new());
        lines.push(center(SIGNATURE));
        lines.push(rule);

        let mut text = lines
            .iter()
            .map(|line| line.trim_end())
            .collect::<Vec<_>>()
            .join("\n");
        text.push('\n');
        text
    }

    /// Produce the certificate in `format`, refusing until every mission is complete
    pub fn issue(
        &mut self,
        progress: &ProgressTracker,
        name: &str,
        format: CertificateFormat,
    ) -> Result<Certificate, CertificateError> {
        if !progress.all_complete() {
            return Err(CertificateError::Incomplete {
                remaining: progress.remaining(),
            });
        }

        let bytes = match format {
            CertificateFormat::Png => self.render(name)?,
            CertificateFormat::Text => self.render_text(name).into_bytes(),
        };
        let certificate = Certificate {
            bytes,
            format,
            file_name: Self::file_name(name, format),
            content_type: format.content_type(),
        };
        tracing::info!(
            file = %certificate.file_name,
            bytes = certificate.bytes.len(),
            "Certificate issued"
        );
        Ok(certificate)
    }

    /// `<Name>_Christmas_Certificate.<ext>` for a display name
    pub fn file_name(name: &str, format: CertificateFormat) -> String {
        format!(
            "{}_Christmas_Certificate.{}",
            file_stem(&display_name(name)),
            format.extension()
        )
    }
}

impl Default for CertificateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn display_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

fn center(line: &str) -> String {
    format!("{line:^TEXT_COLUMNS$}")
}

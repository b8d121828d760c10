//! Yuletide certificate rendering
//!
//! Draws the Christmas Hero certificate on the CPU and encodes it as PNG.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                   certificate                       │
//! │      CertificateRenderer: layout, gating, naming    │
//! ├─────────────────────────────────────────────────────┤
//! │                 avatar / canvas                     │
//! │   figure, external PNG or placeholder; one canvas   │
//! │            per render owning the pixels             │
//! ├─────────────────────────────────────────────────────┤
//! │                    renderer                         │
//! │            tiny-skia + cosmic-text                  │
//! │              (drawing primitives)                   │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod avatar;
pub mod canvas;
pub mod certificate;
pub mod colors;
pub mod error;
pub mod renderer;
pub mod utils;


// Re-export commonly used types
pub use avatar::{Avatar, AvatarImage};
pub use certificate::{
    CERTIFICATE_HEIGHT, CERTIFICATE_WIDTH, Certificate, CertificateRenderer, HEADER_HEIGHT,
};
pub use error::CertificateError;
pub use renderer::{FontWeight, Renderer};

// Re-export tiny_skia Color for external use
pub use tiny_skia::Color;

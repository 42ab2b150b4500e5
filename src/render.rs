//! Scene rasterization and PNG export.

pub(crate) mod backend;
pub(crate) mod cpu;
pub(crate) mod export;
pub(crate) mod tint;

pub use backend::FrameRGBA;
pub use cpu::CpuRasterizer;
pub use export::{MOCKUP_FILE_NAME, MockupImage, encode_png};
pub use tint::Tint;

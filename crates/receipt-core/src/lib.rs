//! Core library for point-of-sale receipt printing.
//!
//! This crate provides:
//! - Tolerant field extraction from loosely structured payload text
//! - Receipt assembly into typed, fixed-point receipt models
//! - Print layout producing device-independent draw commands
//! - Render surfaces, including a plain-text preview
//! - Store profile persistence as flat `key=value` files

pub mod error;
pub mod extract;
pub mod assembly;
pub mod models;
pub mod money;
pub mod layout;
pub mod render;
pub mod job;

pub use error::{ConfigError, ParseError, ReceiptError, RenderError, Result};
pub use models::{
    Customer, FileProfileProvider, Item, Payment, ProfileKey, ProfileProvider, ProfileUpdate,
    Receipt, StoreProfile,
};
pub use assembly::{ReceiptAssembler, ReceiptParser};
pub use layout::{DrawCommand, LayoutEngine, MonospaceMetrics, TextMeasure};
pub use render::{RenderSurface, TextPreview};
pub use job::{PrintJob, print};

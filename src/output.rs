//! Concatenated output format
//!
//! Every selected file is written as a banner block followed by its raw
//! contents, or by a single error line when it could not be read:
//!
//! ```text
//!
//! ================================================================================
//! File: src/app.py
//! ================================================================================
//!
//! <contents>
//! ```
//!
//! Nothing else is written between one file's contents and the next banner.

mod banner;

pub use banner::{BannerWriter, SEPARATOR_WIDTH};

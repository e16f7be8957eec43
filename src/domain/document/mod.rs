// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/mod.rs
//
// Source documents: loading and pixel conversion.

pub mod convert;
pub mod source;

pub use source::{ImageSource, SourceImage, SourceKind};

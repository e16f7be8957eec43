// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/mod.rs
//
// Domain layer: crop geometry and source documents, no rendering concerns.

pub mod crop;
pub mod document;

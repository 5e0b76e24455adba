//! On-disk naming for pipeline artifacts.
//!
//! This module defines the filenames and relative paths of every artifact the
//! pipeline consumes or produces. It contains **no I/O logic** — only typed
//! name construction. Downstream consumers parse these names, so they must be
//! reproduced bit-for-bit; the tests here pin the convention.

pub mod reference;
pub mod segmentation;

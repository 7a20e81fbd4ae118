//! Pipeline stages for upload-and-render.
//!
//! Each submodule implements exactly one step, so the pure formatting steps
//! can be tested without a network or a file system.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ upload ──▶ (decode) ──▶ normalize ──▶ render
//! (path)    (POST)     (model)      (padding)     (HTML)
//! ```
//!
//! 1. [`input`]     — read the uploaded file's bytes from its resolved path
//! 2. [`upload`]    — multipart POST to the extraction API; the only stage
//!    with network I/O
//! 3. [`normalize`] — pad ragged table columns with empty strings
//! 4. [`render`]    — summary paragraphs, styled table, full page

pub mod input;
pub mod normalize;
pub mod render;
pub mod upload;

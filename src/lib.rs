//! Enlace - Pure Rust Entra ID (Azure AD) device join state reader
//!
//! This library wraps the netapi32 join-info query behind safe owned
//! types: a scoped guard around the OS allocation, borrowed views over
//! its optional blocks, and plain owned snapshots for rendering and
//! serialization.

pub mod cli;
pub mod error;
pub mod ffi;
pub mod hresult;
pub mod join_info;
pub mod json_output;
pub mod status;
pub mod text_output;
pub mod wide;

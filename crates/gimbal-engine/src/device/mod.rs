//! GL context + window surface management.
//!
//! This module is responsible for:
//! - creating the window together with a matching GL config
//! - creating a core-profile context and making it current on the window surface
//! - loading GL entry points and presenting frames

mod gl_device;
mod init;

pub use gl_device::GlDevice;
pub use init::GlInit;

//! Entry points exposed to the embedding host.
//!
//! The host owns window/context creation and buffer swapping; this module
//! only covers the two operations it calls into the backend:
//! - [`Backend::init`] — once, with the GL context current
//! - [`Backend::render`] — once per frame, same thread

mod backend;

pub use backend::{Backend, FrameSource};

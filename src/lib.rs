// Copyright 2026 the x11-shell Authors
// SPDX-License-Identifier: Apache-2.0

//! X11 windowing core.
//!
//! A small, layered abstraction over the X protocol: open a [`Display`],
//! pick a [`Screen`], build a [`Window`] — optionally from a GLX
//! framebuffer configuration, optionally with a DBE [`BackBuffer`] — and
//! drive everything from the display's cooperative event pump.
//!
//! A display and the objects created from it belong to a single thread.
//! Run one pump per display; callbacks are delivered on the pump's thread
//! in server order.
//!
//! ```no_run
//! use x11_shell::{Display, EventHandler, Window, WindowBuilder, WindowState};
//!
//! struct CloseOnRequest;
//!
//! impl EventHandler for CloseOnRequest {
//!     fn request_close(&mut self, window: &Window) {
//!         let _ = window.free();
//!     }
//! }
//!
//! # fn main() -> Result<(), x11_shell::Error> {
//! let display = Display::open(None)?;
//! let mut builder = WindowBuilder::new(display.default_screen()?);
//! builder.set_title("hello");
//! builder.set_size(640, 480);
//! builder.set_frame(true);
//! builder.handler(Box::new(CloseOnRequest));
//! let window = builder.build()?;
//! window.show()?;
//! while window.state() != WindowState::Destroyed {
//!     display.wait_next()?;
//! }
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod util;

pub mod backbuffer;
pub mod config;
pub mod display;
pub mod error;
#[cfg(feature = "glx")]
pub mod glx;
pub mod screen;
mod visual;
pub mod window;

pub use backbuffer::BackBuffer;
pub use config::{SurfaceAttr, SurfaceColorType, WindowAttr};
pub use display::{Display, ExtensionInfo, Extensions};
pub use error::Error;
#[cfg(feature = "glx")]
pub use glx::{FbConfig, GlxWindow};
pub use screen::{Screen, VideoMode, VideoModes};
pub use window::{Drawable, EventHandler, Rect, Window, WindowBuilder, WindowState};

// Copyright 2026 the x11-shell Authors
// SPDX-License-Identifier: Apache-2.0

//! DBE back buffers.

use std::rc::Rc;

use x11rb::connection::Connection;
use x11rb::protocol::dbe::{ConnectionExt as _, SwapAction, SwapInfo};

use crate::error::Error;
use crate::window::{Drawable, Window};

/// A second drawable bound to a window through the DOUBLE-BUFFER extension.
///
/// Drawing targets the back buffer; [`swap`](BackBuffer::swap) makes it the
/// visible contents. The buffer's lifetime must end before the window's —
/// `Window::free` deallocates a buffer that is still around.
pub struct BackBuffer {
    drawable: Drawable,
    window: Rc<Window>,
}

// The swap action is fixed to Undefined, the cheapest choice: the previous
// front-buffer contents are lost, and the caller is expected to redraw the
// whole back buffer every frame.
const SWAP_ACTION: SwapAction = SwapAction::UNDEFINED;

impl BackBuffer {
    /// Allocate a back buffer for `window`. At most one buffer per window;
    /// a second allocation fails with [`Error::AlreadyPresent`].
    pub fn create(window: &Rc<Window>) -> Result<BackBuffer, Error> {
        window.ensure_live()?;
        let display = window.display();
        if !display.extensions().dbe.supported {
            return Err(Error::Unsupported("DOUBLE-BUFFER"));
        }
        if window.back_buffer_id() != 0 {
            return Err(Error::AlreadyPresent);
        }

        let conn = display.conn();
        let buffer = conn.generate_id()?;
        conn.dbe_allocate_back_buffer(window.id(), buffer, SWAP_ACTION.into())?
            .check()?;
        window.note_back_buffer(buffer);

        Ok(BackBuffer {
            drawable: Drawable::new(display.clone(), buffer, window.drawable().colormap()),
            window: Rc::clone(window),
        })
    }

    #[inline]
    pub fn drawable(&self) -> &Drawable {
        &self.drawable
    }

    /// The DBE buffer name; usable wherever the protocol wants a drawable.
    #[inline]
    pub fn id(&self) -> u32 {
        self.drawable.id()
    }

    /// The window this buffer is bound to.
    #[inline]
    pub fn window(&self) -> &Rc<Window> {
        &self.window
    }

    /// Make the back buffer's contents visible.
    pub fn swap(&self) -> Result<(), Error> {
        self.window.ensure_live()?;
        if self.drawable.id() == 0 {
            return Err(Error::Invalid("back buffer has been freed"));
        }
        let info = SwapInfo {
            window: self.window.id(),
            swap_action: SWAP_ACTION.into(),
        };
        self.window
            .display()
            .conn()
            .dbe_swap_buffers(&[info])?
            .check()?;
        Ok(())
    }

    /// Deallocate the buffer. Idempotent; also run by `Window::free` when
    /// the buffer outlived its explicit release.
    pub fn free(&self) -> Result<(), Error> {
        let buffer = self.drawable.id();
        if buffer == 0 {
            return Ok(());
        }
        log_x11!(self
            .window
            .display()
            .conn()
            .dbe_deallocate_back_buffer(buffer));
        self.window.note_back_buffer(0);
        self.drawable.clear();
        Ok(())
    }
}

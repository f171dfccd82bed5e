// Copyright 2026 the x11-shell Authors
// SPDX-License-Identifier: Apache-2.0

//! Screens and their RANDR video modes.

use tracing::info;
use x11rb::connection::Connection;
use x11rb::protocol::randr::{ConnectionExt as _, GetScreenInfoReply, SetConfig};
use x11rb::protocol::xproto;

use crate::display::Display;
use crate::error::Error;

/// One screen of a display.
#[derive(Clone)]
pub struct Screen {
    display: Display,
    index: usize,
}

/// A video mode a screen can be switched to.
///
/// `id` is a RANDR size index and is only meaningful against the screen
/// that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VideoMode {
    pub width: u16,
    pub height: u16,
    pub id: u16,
}

impl Screen {
    pub fn new(display: Display, index: usize) -> Result<Screen, Error> {
        display.ensure_open()?;
        if index >= display.screen_count() {
            return Err(Error::Invalid("screen index out of range"));
        }
        Ok(Screen { display, index })
    }

    #[inline]
    pub fn display(&self) -> &Display {
        &self.display
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn root(&self) -> &xproto::Screen {
        &self.display.conn().setup().roots[self.index]
    }

    /// Current size of the screen in pixels.
    pub fn size(&self) -> (u16, u16) {
        let root = self.root();
        (root.width_in_pixels, root.height_in_pixels)
    }

    fn screen_info(&self) -> Result<GetScreenInfoReply, Error> {
        self.display.ensure_open()?;
        if !self.display.extensions().randr.supported {
            return Err(Error::Unsupported("RANDR"));
        }
        Ok(self
            .display
            .conn()
            .randr_get_screen_info(self.root().root)?
            .reply()?)
    }

    /// Enumerate the video modes of this screen.
    pub fn video_modes(&self) -> Result<VideoModes, Error> {
        let info = self.screen_info()?;
        let modes = info
            .sizes
            .iter()
            .enumerate()
            .map(|(id, size)| VideoMode {
                width: size.width,
                height: size.height,
                id: id as u16,
            })
            .collect();
        Ok(VideoModes::new(modes))
    }

    /// The mode the screen is currently in.
    pub fn current_mode(&self) -> Result<VideoMode, Error> {
        let info = self.screen_info()?;
        let size = info
            .sizes
            .get(usize::from(info.size_id))
            .ok_or(Error::NotFound)?;
        Ok(VideoMode {
            width: size.width,
            height: size.height,
            id: info.size_id,
        })
    }

    /// Switch the screen to `mode`.
    ///
    /// The saved width and height are checked against what the server
    /// currently lists under the mode's size index, so a mode kept across a
    /// server re-init fails with [`Error::Invalid`] instead of resizing the
    /// screen to the wrong thing.
    pub fn set_mode(&self, mode: &VideoMode) -> Result<(), Error> {
        let info = self.screen_info()?;
        let size = info
            .sizes
            .get(usize::from(mode.id))
            .ok_or(Error::Invalid("video mode does not belong to this screen"))?;
        if (size.width, size.height) != (mode.width, mode.height) {
            return Err(Error::Invalid("saved video mode is stale"));
        }
        let reply = self
            .display
            .conn()
            .randr_set_screen_config(
                self.root().root,
                info.timestamp,
                info.config_timestamp,
                mode.id,
                info.rotation,
                0,
            )?
            .reply()?;
        if u8::from(reply.status) != u8::from(SetConfig::SUCCESS) {
            return Err(Error::Invalid("server rejected the mode switch"));
        }
        info!("switched screen {} to {}x{}", self.index, mode.width, mode.height);
        Ok(())
    }
}

/// Finite, restartable iterator over a screen's video modes.
#[derive(Clone, Debug)]
pub struct VideoModes {
    modes: Vec<VideoMode>,
    next: usize,
}

impl VideoModes {
    fn new(modes: Vec<VideoMode>) -> VideoModes {
        VideoModes { modes, next: 0 }
    }

    /// Restart iteration from the first mode.
    pub fn rewind(&mut self) {
        self.next = 0;
    }
}

impl Iterator for VideoModes {
    type Item = VideoMode;

    fn next(&mut self) -> Option<VideoMode> {
        let mode = self.modes.get(self.next).copied();
        if mode.is_some() {
            self.next += 1;
        }
        mode
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.modes.len() - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for VideoModes {}

#[cfg(test)]
mod tests {
    use super::*;

    fn modes() -> VideoModes {
        VideoModes::new(vec![
            VideoMode {
                width: 1920,
                height: 1080,
                id: 0,
            },
            VideoMode {
                width: 1280,
                height: 720,
                id: 1,
            },
        ])
    }

    #[test]
    fn iteration_is_finite_and_ordered() {
        let collected: Vec<_> = modes().collect();
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].id, 0);
        assert_eq!(collected[1], VideoMode {
            width: 1280,
            height: 720,
            id: 1,
        });
    }

    #[test]
    fn rewind_restarts_iteration() {
        let mut modes = modes();
        assert_eq!(modes.len(), 2);
        let first = modes.next().unwrap();
        modes.next().unwrap();
        assert_eq!(modes.next(), None);
        modes.rewind();
        assert_eq!(modes.len(), 2);
        assert_eq!(modes.next().unwrap(), first);
    }
}

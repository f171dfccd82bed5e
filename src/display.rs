// Copyright 2026 the x11-shell Authors
// SPDX-License-Identifier: Apache-2.0

//! Display connections: atom interning, extension negotiation, the
//! resource-ID table and the event pump.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::ffi::OsString;
use std::marker::PhantomData;
use std::os::unix::io::{AsRawFd, RawFd};
use std::rc::Rc;

use tracing::{debug, info, warn};
use x11rb::connection::Connection;
use x11rb::protocol::dbe::ConnectionExt as _;
use x11rb::protocol::randr::{self, ConnectionExt as _, NotifyMask};
use x11rb::protocol::render::{self, ConnectionExt as _, QueryPictFormatsReply};
use x11rb::protocol::xproto::{ConnectionExt, Timestamp};
use x11rb::protocol::Event;
use x11rb::rust_connection::RustConnection;

#[cfg(feature = "glx")]
use x11rb::protocol::glx::{self, ConnectionExt as _};

use crate::error::{protocol_error_name, Error};
use crate::screen::Screen;
use crate::window::Window;

// The atoms every display interns up front, in one batched round-trip:
//
// WM_PROTOCOLS / WM_DELETE_WINDOW
//
// Listing WM_DELETE_WINDOW in a window's WM_PROTOCOLS property makes the
// window manager send a client message instead of killing our connection
// when the user closes the window.
//
// https://www.x.org/releases/X11R7.6/doc/xorg-docs/specs/ICCCM/icccm.html#window_deletion
//
// _NET_FRAME_EXTENTS
//
// Published by EWMH window managers: how much decoration was added on each
// side of the window. Used for frame-inclusive geometry queries.
//
// _NET_WM_WINDOW_OPACITY
//
// A 32-bit CARDINAL compositors read to blend the whole window; deleting
// the property means fully opaque.
//
// _NET_WM_NAME / UTF8_STRING
//
// The UTF-8 capable version of WM_NAME, and its type.
x11rb::atom_manager! {
    pub(crate) DisplayAtoms: DisplayAtomsCookie {
        WM_PROTOCOLS,
        WM_DELETE_WINDOW,
        _NET_FRAME_EXTENTS,
        _NET_WM_WINDOW_OPACITY,
        _NET_WM_NAME,
        UTF8_STRING,
    }
}

/// What a probe learned about one server-side extension.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExtensionInfo {
    pub supported: bool,
    pub major: u32,
    pub minor: u32,
    /// First event code the server assigned to this extension.
    pub first_event: u8,
    /// First error code the server assigned to this extension.
    pub first_error: u8,
}

/// The extensions this core negotiates at open time.
#[derive(Clone, Copy, Debug, Default)]
pub struct Extensions {
    pub glx: ExtensionInfo,
    pub dbe: ExtensionInfo,
    pub randr: ExtensionInfo,
    pub render: ExtensionInfo,
}

/// A connection to an X server.
///
/// Cloning is cheap and yields a second handle to the same connection. A
/// display and everything created from it belong to one thread; the event
/// pump is cooperative and holds no locks.
#[derive(Clone)]
pub struct Display {
    conn: Rc<RustConnection>,
    /// The connection is single-owner by design; this keeps `Display` (and
    /// everything holding one) `!Send` and `!Sync`.
    marker: PhantomData<*mut RustConnection>,
    screen_num: usize,
    atoms: Rc<DisplayAtoms>,
    extensions: Extensions,
    /// RENDER picture formats, fetched once at probe time; visual matching
    /// consults them for alpha masks.
    pict_formats: Rc<Option<QueryPictFormatsReply>>,
    windows: Rc<RefCell<WindowMap<Rc<Window>>>>,
    /// Events read from the server but not yet dispatched. Lets `pending`
    /// count without consuming.
    pending_events: Rc<RefCell<VecDeque<Event>>>,
    open: Rc<Cell<bool>>,
    /// Config timestamp from the most recent RANDR screen-change notify.
    randr_config_timestamp: Rc<Cell<Timestamp>>,
}

impl Display {
    /// Open a display and negotiate extensions.
    ///
    /// `name` is the usual `host:display.screen` string; `None` (or an
    /// empty string) falls back to `$DISPLAY`, and an unset `DISPLAY`
    /// fails with [`Error::Invalid`].
    pub fn open(name: Option<&str>) -> Result<Display, Error> {
        Display::open_inner(name, true)
    }

    /// Open a display without probing any extension.
    ///
    /// Video modes, back buffers, GLX matching and alpha visuals all fail
    /// with [`Error::Unsupported`] on such a display.
    pub fn open_without_extensions(name: Option<&str>) -> Result<Display, Error> {
        Display::open_inner(name, false)
    }

    fn open_inner(name: Option<&str>, with_extensions: bool) -> Result<Display, Error> {
        let name = resolve_display_name(name, std::env::var_os("DISPLAY"))?;
        debug!("connecting to display {}", name);
        let (conn, screen_num) = RustConnection::connect(Some(&name))?;
        let atoms = DisplayAtoms::new(&conn)?.reply()?;
        let (extensions, pict_formats) = if with_extensions {
            probe_extensions(&conn)?
        } else {
            (Extensions::default(), None)
        };
        Ok(Display {
            conn: Rc::new(conn),
            marker: PhantomData,
            screen_num,
            atoms: Rc::new(atoms),
            extensions,
            pict_formats: Rc::new(pict_formats),
            windows: Rc::new(RefCell::new(WindowMap::new())),
            pending_events: Rc::new(RefCell::new(VecDeque::new())),
            open: Rc::new(Cell::new(true)),
            randr_config_timestamp: Rc::new(Cell::new(x11rb::CURRENT_TIME)),
        })
    }

    /// Close the display. Windows registered with it are dropped, queued
    /// events are discarded, and every further operation fails with
    /// [`Error::Invalid`].
    pub fn close(&self) {
        if self.open.replace(false) {
            if let Ok(mut windows) = self.windows.try_borrow_mut() {
                windows.clear();
            }
            if let Ok(mut pending) = self.pending_events.try_borrow_mut() {
                pending.clear();
            }
            log_x11!(self.conn.flush());
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub(crate) fn ensure_open(&self) -> Result<(), Error> {
        if self.open.get() {
            Ok(())
        } else {
            Err(Error::Invalid("display has been closed"))
        }
    }

    #[inline]
    pub(crate) fn conn(&self) -> &RustConnection {
        &self.conn
    }

    #[inline]
    pub(crate) fn atoms(&self) -> &DisplayAtoms {
        &self.atoms
    }

    /// The extension descriptors recorded at open time.
    #[inline]
    pub fn extensions(&self) -> Extensions {
        self.extensions
    }

    pub(crate) fn pict_formats(&self) -> Option<&QueryPictFormatsReply> {
        (*self.pict_formats).as_ref()
    }

    /// Number of screens the server exposes.
    pub fn screen_count(&self) -> usize {
        self.conn.setup().roots.len()
    }

    /// The screen the server recommended when the connection was opened.
    pub fn default_screen(&self) -> Result<Screen, Error> {
        Screen::new(self.clone(), self.screen_num)
    }

    /// The pollable handle of the underlying transport, for integration
    /// with external reactors.
    pub fn as_raw_fd(&self) -> RawFd {
        self.conn.stream().as_raw_fd()
    }

    // --- resource-ID table ------------------------------------------------

    pub(crate) fn add_window(&self, id: u32, window: Rc<Window>) -> Result<(), Error> {
        borrow_mut!(self.windows)?.insert(id, window)
    }

    pub(crate) fn remove_window(&self, id: u32) -> Result<Rc<Window>, Error> {
        borrow_mut!(self.windows)?.remove(id)
    }

    /// Look up the window owning a server-assigned resource ID.
    pub fn window(&self, id: u32) -> Result<Rc<Window>, Error> {
        borrow!(self.windows)?.find(id)
    }

    /// Non-logging lookup; the event pump uses this because events for a
    /// freshly freed window are expected, not an error.
    pub(crate) fn try_window(&self, id: u32) -> Option<Rc<Window>> {
        borrow!(self.windows).ok()?.try_find(id)
    }

    /// Number of windows currently registered.
    pub fn window_count(&self) -> usize {
        self.windows.borrow().len()
    }

    // --- event pump -------------------------------------------------------

    /// Number of events ready to dispatch without blocking.
    pub fn pending(&self) -> Result<usize, Error> {
        self.ensure_open()?;
        let mut staged = borrow_mut!(self.pending_events)?;
        while let Some(event) = self.conn.poll_for_event()? {
            staged.push_back(event);
        }
        Ok(staged.len())
    }

    /// Dispatch every queued event, returning how many were handled.
    ///
    /// Callback errors are logged against this display and never tear the
    /// pump down; only transport loss propagates.
    pub fn dispatch_pending(&self) -> Result<usize, Error> {
        self.ensure_open()?;
        let mut dispatched = 0;
        loop {
            let staged = borrow_mut!(self.pending_events)?.pop_front();
            let event = match staged {
                Some(event) => event,
                None => match self.conn.poll_for_event()? {
                    Some(event) => event,
                    None => break,
                },
            };
            self.handle_event(&event);
            dispatched += 1;
        }
        self.conn.flush()?;
        Ok(dispatched)
    }

    /// Block until at least one event has been dispatched.
    ///
    /// The wait sits in `poll(2)` on the connection fd, so it can be
    /// interrupted by a signal and integrates with a surrounding reactor
    /// poking the same fd.
    pub fn wait_next(&self) -> Result<usize, Error> {
        loop {
            let dispatched = self.dispatch_pending()?;
            if dispatched > 0 {
                return Ok(dispatched);
            }
            self.poll_readable()?;
        }
    }

    fn poll_readable(&self) -> Result<(), Error> {
        use nix::poll::{poll, PollFd, PollFlags};

        let mut fds = [PollFd::new(self.as_raw_fd(), PollFlags::POLLIN)];
        loop {
            match poll(&mut fds, -1) {
                Ok(_) => return Ok(()),
                Err(nix::errno::Errno::EINTR) => {}
                Err(_) => return Err(Error::TransportUnavailable),
            }
        }
    }

    fn handle_event(&self, event: &Event) {
        match event {
            Event::ClientMessage(ev) => {
                if let Some(window) = self.try_window(ev.window) {
                    window.handle_client_message(ev);
                }
            }
            Event::DestroyNotify(ev) => {
                // Nothing left to repair if the user freed the window
                // before the notify arrived.
                if let Some(window) = self.try_window(ev.window) {
                    let _ = self.remove_window(ev.window);
                    window.handle_destroy_notify();
                }
            }
            Event::ConfigureNotify(ev) => {
                if let Some(window) = self.try_window(ev.window) {
                    window.handle_configure_notify(ev);
                }
            }
            Event::Expose(ev) => {
                if let Some(window) = self.try_window(ev.window) {
                    window.handle_expose(ev);
                }
            }
            Event::MapNotify(ev) => {
                if let Some(window) = self.try_window(ev.window) {
                    window.handle_map_notify();
                }
            }
            Event::UnmapNotify(ev) => {
                if let Some(window) = self.try_window(ev.window) {
                    window.handle_unmap_notify();
                }
            }
            Event::RandrScreenChangeNotify(ev) => self.handle_screen_change(ev),
            Event::Error(err) => {
                tracing::error!(
                    "X11 error event: {} ({})",
                    protocol_error_name(err.error_code),
                    err.error_code
                );
            }
            _ => {}
        }
    }

    /// Config timestamp of the last RANDR screen change the pump saw;
    /// `CURRENT_TIME` until one arrives.
    pub fn last_screen_change(&self) -> Timestamp {
        self.randr_config_timestamp.get()
    }

    fn handle_screen_change(&self, event: &randr::ScreenChangeNotifyEvent) {
        self.randr_config_timestamp.set(event.config_timestamp);
        debug!(
            "screen change on root {}: {}x{} (size id {})",
            event.root, event.width, event.height, event.size_id
        );
    }
}

fn resolve_display_name(name: Option<&str>, env: Option<OsString>) -> Result<String, Error> {
    match name {
        Some(name) if !name.is_empty() => Ok(name.to_owned()),
        _ => match env {
            Some(value) => value
                .into_string()
                .map_err(|_| Error::Invalid("DISPLAY is not valid UTF-8")),
            None => Err(Error::Invalid("DISPLAY is not set")),
        },
    }
}

fn probe_extensions(
    conn: &RustConnection,
) -> Result<(Extensions, Option<QueryPictFormatsReply>), Error> {
    let mut extensions = Extensions::default();

    extensions.randr = probe_randr(conn)?;
    if extensions.randr.supported {
        // Subscribe on every root so video-mode changes are observable as
        // events even for screens no window was created on.
        for screen in &conn.setup().roots {
            conn.randr_select_input(screen.root, NotifyMask::SCREEN_CHANGE)?;
        }
    }

    extensions.render = probe_render(conn)?;
    let pict_formats = if extensions.render.supported {
        Some(conn.render_query_pict_formats()?.reply()?)
    } else {
        None
    };

    extensions.dbe = probe_dbe(conn)?;

    #[cfg(feature = "glx")]
    {
        extensions.glx = probe_glx(conn)?;
    }

    Ok((extensions, pict_formats))
}

fn probe_randr(conn: &RustConnection) -> Result<ExtensionInfo, Error> {
    let query = conn
        .query_extension(randr::X11_EXTENSION_NAME.as_bytes())?
        .reply()?;
    if !query.present {
        info!("RANDR is not supported by the server");
        return Ok(ExtensionInfo::default());
    }
    let version = conn.randr_query_version(1, 5)?.reply()?;
    info!(
        "X server supports RANDR {}.{}",
        version.major_version, version.minor_version
    );
    Ok(ExtensionInfo {
        supported: true,
        major: version.major_version,
        minor: version.minor_version,
        first_event: query.first_event,
        first_error: query.first_error,
    })
}

fn probe_render(conn: &RustConnection) -> Result<ExtensionInfo, Error> {
    let query = conn
        .query_extension(render::X11_EXTENSION_NAME.as_bytes())?
        .reply()?;
    if !query.present {
        info!("RENDER is not supported by the server");
        return Ok(ExtensionInfo::default());
    }
    let version = conn.render_query_version(0, 11)?.reply()?;
    info!(
        "X server supports RENDER {}.{}",
        version.major_version, version.minor_version
    );
    Ok(ExtensionInfo {
        supported: true,
        major: version.major_version,
        minor: version.minor_version,
        first_event: query.first_event,
        first_error: query.first_error,
    })
}

fn probe_dbe(conn: &RustConnection) -> Result<ExtensionInfo, Error> {
    let query = conn
        .query_extension(x11rb::protocol::dbe::X11_EXTENSION_NAME.as_bytes())?
        .reply()?;
    if !query.present {
        info!("DOUBLE-BUFFER is not supported by the server");
        return Ok(ExtensionInfo::default());
    }
    let version = conn.dbe_query_version(1, 0)?.reply()?;
    info!(
        "X server supports DOUBLE-BUFFER {}.{}",
        version.major_version, version.minor_version
    );
    Ok(ExtensionInfo {
        supported: true,
        major: u32::from(version.major_version),
        minor: u32::from(version.minor_version),
        first_event: query.first_event,
        first_error: query.first_error,
    })
}

#[cfg(feature = "glx")]
fn probe_glx(conn: &RustConnection) -> Result<ExtensionInfo, Error> {
    let query = conn
        .query_extension(glx::X11_EXTENSION_NAME.as_bytes())?
        .reply()?;
    if !query.present {
        info!("GLX is not supported by the server");
        return Ok(ExtensionInfo::default());
    }
    let version = conn.glx_query_version(1, 4)?.reply()?;
    // Framebuffer configs need GLX 1.3.
    let supported = version.major_version == 1 && version.minor_version >= 3;
    if supported {
        info!(
            "X server supports GLX {}.{}",
            version.major_version, version.minor_version
        );
    } else {
        info!(
            "GLX {}.{} is too old for framebuffer configs",
            version.major_version, version.minor_version
        );
    }
    Ok(ExtensionInfo {
        supported,
        major: version.major_version,
        minor: version.minor_version,
        first_event: query.first_event,
        first_error: query.first_error,
    })
}

/// Table mapping server-assigned resource IDs to their owning window
/// objects.
///
/// ID 0 is reserved as the empty sentinel: it is how the event pump tells
/// "freed locally, stale events may still arrive" apart from "never
/// existed". Generic over the value type so the semantics are testable
/// without a server.
pub(crate) struct WindowMap<W> {
    entries: HashMap<u32, W>,
}

impl<W: Clone> WindowMap<W> {
    pub fn new() -> WindowMap<W> {
        WindowMap {
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, id: u32, window: W) -> Result<(), Error> {
        if id == 0 {
            return Err(Error::Invalid("resource id 0 is reserved"));
        }
        if self.entries.contains_key(&id) {
            return Err(Error::AlreadyPresent);
        }
        self.entries.insert(id, window);
        Ok(())
    }

    pub fn remove(&mut self, id: u32) -> Result<W, Error> {
        self.entries.remove(&id).ok_or(Error::NotFound)
    }

    pub fn find(&self, id: u32) -> Result<W, Error> {
        self.try_find(id).ok_or_else(|| {
            warn!("no window registered for resource id {}", id);
            Error::NotFound
        })
    }

    pub fn try_find(&self, id: u32) -> Option<W> {
        if id == 0 {
            return None;
        }
        self.entries.get(&id).cloned()
    }

    /// Update an entry in place, e.g. when the owning object moved.
    pub fn replace(&mut self, id: u32, window: W) -> Result<(), Error> {
        match self.entries.get_mut(&id) {
            Some(slot) => {
                *slot = window;
                Ok(())
            }
            None => Err(Error::NotFound),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use static_assertions as sa;

    sa::assert_not_impl_any!(Display: Send, Sync);

    #[test]
    fn map_insert_then_find_returns_the_inserted_value() {
        let mut map = WindowMap::new();
        map.insert(3, "a").unwrap();
        assert_eq!(map.find(3).unwrap(), "a");
        assert_eq!(map.try_find(3), Some("a"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn map_rejects_duplicate_ids() {
        let mut map = WindowMap::new();
        map.insert(3, "a").unwrap();
        assert_eq!(map.insert(3, "b"), Err(Error::AlreadyPresent));
        // The original entry is untouched.
        assert_eq!(map.find(3).unwrap(), "a");
    }

    #[test_log::test]
    fn map_reserves_id_zero() {
        let mut map = WindowMap::new();
        assert!(matches!(map.insert(0, "a"), Err(Error::Invalid(_))));
        assert_eq!(map.try_find(0), None);
    }

    #[test_log::test]
    fn map_remove_then_find_is_not_found() {
        let mut map = WindowMap::new();
        map.insert(7, "a").unwrap();
        assert_eq!(map.remove(7).unwrap(), "a");
        assert_eq!(map.find(7), Err(Error::NotFound));
        assert_eq!(map.remove(7), Err(Error::NotFound));
    }

    #[test]
    fn map_replace_updates_in_place() {
        let mut map = WindowMap::new();
        map.insert(7, "a").unwrap();
        map.replace(7, "b").unwrap();
        assert_eq!(map.find(7).unwrap(), "b");
        assert_eq!(map.replace(9, "c"), Err(Error::NotFound));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn display_name_resolution() {
        assert_eq!(
            resolve_display_name(Some(":0"), None).unwrap(),
            ":0".to_owned()
        );
        assert_eq!(
            resolve_display_name(None, Some(":1".into())).unwrap(),
            ":1".to_owned()
        );
        // An empty name means "use the environment".
        assert_eq!(
            resolve_display_name(Some(""), Some(":2".into())).unwrap(),
            ":2".to_owned()
        );
        assert!(matches!(
            resolve_display_name(None, None),
            Err(Error::Invalid(_))
        ));
    }
}

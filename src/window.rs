// Copyright 2026 the x11-shell Authors
// SPDX-License-Identifier: Apache-2.0

//! Window creation and window management.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::error;
use x11rb::connection::Connection;
use x11rb::properties::{WmHints, WmHintsState, WmSizeHints, WmSizeHintsSpecification};
use x11rb::protocol::xproto::{
    self, AtomEnum, ClientMessageData, ClientMessageEvent, ColormapAlloc, ConfigureNotifyEvent,
    ConfigureWindowAux, ConnectionExt, CreateWindowAux, EventMask, ExposeEvent, GetPropertyType,
    PropMode, WindowClass, CLIENT_MESSAGE_EVENT,
};
use x11rb::wrapper::ConnectionExt as _;

use crate::config::{clamp_size, SurfaceAttr, SurfaceConfig, WindowAttr, WindowConfig};
use crate::display::Display;
use crate::error::Error;
use crate::screen::Screen;
use crate::visual::{self, VisualPick};

/// Callbacks a window delivers from the event pump.
///
/// Every method has a no-op default, so an implementation only spells out
/// the events it cares about; a window built without a handler ignores
/// everything. Handlers run on the pump's thread and must not block it.
pub trait EventHandler {
    /// The window manager (or `send_close_request`) asked for the window to
    /// be closed. Nothing happens unless the handler acts; ignoring the
    /// request keeps the window open.
    #[allow(unused_variables)]
    fn request_close(&mut self, window: &Window) {}

    /// The server window is gone. The window object is already marked
    /// destroyed when this runs.
    #[allow(unused_variables)]
    fn destroyed(&mut self, window: &Window) {}

    /// The last exposure of a batch arrived; repaint everything.
    #[allow(unused_variables)]
    fn redraw(&mut self, window: &Window) {}

    /// The window size changed. Pure moves do not fire this.
    #[allow(unused_variables)]
    fn resized(&mut self, window: &Window, width: u16, height: u16) {}

    /// The window was mapped (`shown == true`) or unmapped.
    #[allow(unused_variables)]
    fn visibility_changed(&mut self, window: &Window, shown: bool) {}
}

/// Observable lifecycle state of a window.
///
/// `Destroyed` is the default so a cleared window reads as already freed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WindowState {
    #[default]
    Destroyed,
    Hidden,
    Shown,
}

/// Which server resources this object is responsible for releasing.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct OwnFlags {
    pub window: bool,
    pub colormap: bool,
    pub back_buffer: bool,
}

/// The `(display, drawable, colormap)` triple shared by windows and back
/// buffers. Resource IDs are plain server-side integers that outlive any
/// local object; ownership is tracked separately.
#[derive(Clone)]
pub struct Drawable {
    display: Display,
    id: Cell<xproto::Drawable>,
    colormap: Cell<xproto::Colormap>,
}

impl Drawable {
    pub(crate) fn new(
        display: Display,
        id: xproto::Drawable,
        colormap: xproto::Colormap,
    ) -> Drawable {
        Drawable {
            display,
            id: Cell::new(id),
            colormap: Cell::new(colormap),
        }
    }

    #[inline]
    pub fn display(&self) -> &Display {
        &self.display
    }

    #[inline]
    pub fn id(&self) -> xproto::Drawable {
        self.id.get()
    }

    #[inline]
    pub fn colormap(&self) -> xproto::Colormap {
        self.colormap.get()
    }

    pub(crate) fn clear_id(&self) {
        self.id.set(0);
    }

    pub(crate) fn clear(&self) {
        self.id.set(0);
        self.colormap.set(0);
    }
}

/// A window rectangle, relative to the root window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Builder for top-level windows.
///
/// Attribute-slice entry points ([`surface_attrs`](Self::surface_attrs),
/// [`window_attrs`](Self::window_attrs)) and the individual setters write
/// into the same configuration.
pub struct WindowBuilder {
    pub(crate) screen: Screen,
    pub(crate) handler: Option<Box<dyn EventHandler>>,
    pub(crate) surface: SurfaceConfig,
    pub(crate) window: WindowConfig,
}

impl WindowBuilder {
    pub fn new(screen: Screen) -> WindowBuilder {
        WindowBuilder {
            screen,
            handler: None,
            surface: SurfaceConfig::default(),
            window: WindowConfig::default(),
        }
    }

    pub fn handler(&mut self, handler: Box<dyn EventHandler>) {
        self.handler = Some(handler);
    }

    /// Replace the surface requirements with a resolved attribute sequence.
    pub fn surface_attrs(&mut self, attrs: &[SurfaceAttr]) -> Result<(), Error> {
        self.surface = SurfaceConfig::from_attrs(attrs)?;
        Ok(())
    }

    /// Replace the window options with a resolved attribute sequence.
    pub fn window_attrs(&mut self, attrs: &[WindowAttr]) -> Result<(), Error> {
        self.window = WindowConfig::from_attrs(attrs)?;
        Ok(())
    }

    pub fn set_title<S: Into<String>>(&mut self, title: S) {
        self.window.title = Some(title.into());
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.window.size = clamp_size((width, height));
    }

    pub fn set_position(&mut self, x: i16, y: i16) {
        self.window.pos = Some((x, y));
    }

    pub fn set_min_size(&mut self, width: u16, height: u16) {
        self.window.min_size = Some((width, height));
    }

    pub fn set_max_size(&mut self, width: u16, height: u16) {
        self.window.max_size = Some((width, height));
    }

    /// Ask the window manager for decorations. Without a frame the window
    /// is created override-redirect.
    pub fn set_frame(&mut self, frame: bool) {
        self.window.frame = frame;
    }

    /// 0 is fully transparent, 255 fully opaque.
    pub fn set_transparency(&mut self, opacity: u8) {
        self.window.opacity = opacity;
    }

    /// Resolve a visual for the surface requirements and create the window.
    pub fn build(self) -> Result<Rc<Window>, Error> {
        let display = self.screen.display().clone();
        display.ensure_open()?;
        let render = display
            .pict_formats()
            .map(|reply| (&reply.screens[..], &reply.formats[..]));
        let pick = visual::choose_visual(&self.screen.root().allowed_depths, render, &self.surface)?;
        self.finish(pick)
    }

    /// Create the server window against an already chosen visual.
    ///
    /// The order matters: the colormap (with a pre-allocated white pixel)
    /// must exist before `CreateWindow`, or a non-default visual gets a
    /// BadMatch. Any failure past window creation unwinds the partial
    /// server state before returning.
    pub(crate) fn finish(self, pick: VisualPick) -> Result<Rc<Window>, Error> {
        let display = self.screen.display().clone();
        let screen_index = self.screen.index();
        let root = self.screen.root().root;
        let conn = display.conn();

        let colormap = conn.generate_id()?;
        conn.create_colormap(ColormapAlloc::NONE, colormap, root, pick.visual.visual_id)?;
        let white = match conn
            .alloc_color(colormap, u16::MAX, u16::MAX, u16::MAX)
            .map_err(Error::from)
            .and_then(|cookie| cookie.reply().map_err(Error::from))
        {
            Ok(reply) => reply.pixel,
            Err(err) => {
                log_x11!(conn.free_colormap(colormap));
                return Err(err);
            }
        };

        let id = conn.generate_id()?;
        let (width, height) = self.window.size;
        let (x, y) = self.window.pos.unwrap_or((0, 0));
        let aux = CreateWindowAux::new()
            .event_mask(EventMask::EXPOSURE | EventMask::KEY_PRESS | EventMask::STRUCTURE_NOTIFY)
            .background_pixel(white)
            .border_pixel(white)
            .colormap(colormap)
            .override_redirect(u32::from(!self.window.frame));
        if let Err(err) = conn
            .create_window(
                pick.depth,
                id,
                root,
                x,
                y,
                width,
                height,
                0,
                WindowClass::INPUT_OUTPUT,
                pick.visual.visual_id,
                &aux,
            )
            .map_err(Error::from)
            .and_then(|cookie| cookie.check().map_err(Error::from))
        {
            log_x11!(conn.free_colormap(colormap));
            return Err(err);
        }

        let properties = (|| -> Result<(), Error> {
            let atoms = display.atoms();

            if self.window.opacity < u8::MAX {
                write_opacity(&display, id, self.window.opacity)?;
            }

            // Size hints, WM hints and the title go out back to back in one
            // batch; none of them needs a reply.
            window_size_hints(&self.window).set_normal_hints(conn, id)?;
            let mut hints = WmHints::new();
            hints.input = Some(true);
            hints.initial_state = Some(WmHintsState::Normal);
            hints.set(conn, id)?;
            if let Some(title) = &self.window.title {
                write_title(&display, id, title);
            }

            // Register for the delete handshake so the window manager sends
            // a client message instead of killing the connection.
            conn.change_property32(
                PropMode::REPLACE,
                id,
                atoms.WM_PROTOCOLS,
                AtomEnum::ATOM,
                &[atoms.WM_DELETE_WINDOW],
            )?
            .check()?;
            Ok(())
        })();
        if let Err(err) = properties {
            log_x11!(conn.destroy_window(id));
            log_x11!(conn.free_colormap(colormap));
            return Err(err);
        }

        let window = Rc::new(Window {
            drawable: Drawable::new(display.clone(), id, colormap),
            screen_index,
            handler: RefCell::new(self.handler),
            state: Cell::new(WindowState::Hidden),
            flags: Cell::new(OwnFlags {
                window: true,
                colormap: true,
                back_buffer: false,
            }),
            size: Cell::new((width, height)),
            back_buffer: Cell::new(0),
        });

        if let Err(err) = display.add_window(id, Rc::clone(&window)) {
            log_x11!(conn.destroy_window(id));
            log_x11!(conn.free_colormap(colormap));
            return Err(err);
        }
        log_x11!(conn.flush());

        Ok(window)
    }
}

/// An X11 window.
///
/// Created hidden; `show`/`hide` and the other update operations are
/// fire-and-forget, and the observable state changes arrive asynchronously
/// through the event pump. All operations fail with [`Error::Invalid`] once
/// the window is destroyed, whether by `free` or by the server.
pub struct Window {
    drawable: Drawable,
    screen_index: usize,
    handler: RefCell<Option<Box<dyn EventHandler>>>,
    state: Cell<WindowState>,
    flags: Cell<OwnFlags>,
    /// Last size seen in a ConfigureNotify; reshape callbacks fire only
    /// when it actually changes.
    size: Cell<(u16, u16)>,
    /// DBE back-buffer name, 0 when none is allocated.
    back_buffer: Cell<u32>,
}

impl Window {
    pub(crate) fn ensure_live(&self) -> Result<(), Error> {
        if self.state.get() == WindowState::Destroyed {
            return Err(Error::Invalid("window has been destroyed"));
        }
        self.drawable.display.ensure_open()
    }

    #[inline]
    pub fn display(&self) -> &Display {
        &self.drawable.display
    }

    #[inline]
    pub fn drawable(&self) -> &Drawable {
        &self.drawable
    }

    /// The server-side window ID; 0 once destroyed.
    #[inline]
    pub fn id(&self) -> xproto::Window {
        self.drawable.id()
    }

    #[inline]
    pub fn state(&self) -> WindowState {
        self.state.get()
    }

    pub(crate) fn note_back_buffer(&self, buffer: u32) {
        self.back_buffer.set(buffer);
        self.flags.set(OwnFlags {
            back_buffer: buffer != 0,
            ..self.flags.get()
        });
    }

    pub(crate) fn back_buffer_id(&self) -> u32 {
        self.back_buffer.get()
    }

    // --- update operations ------------------------------------------------

    /// Ask the server to map the window; `Shown` arrives via the pump.
    pub fn show(&self) -> Result<(), Error> {
        self.ensure_live()?;
        self.display().conn().map_window(self.id())?;
        Ok(())
    }

    /// Ask the server to unmap the window; `Hidden` arrives via the pump.
    pub fn hide(&self) -> Result<(), Error> {
        self.ensure_live()?;
        self.display().conn().unmap_window(self.id())?;
        Ok(())
    }

    pub fn set_pos(&self, x: i32, y: i32) -> Result<(), Error> {
        self.ensure_live()?;
        self.display()
            .conn()
            .configure_window(self.id(), &ConfigureWindowAux::new().x(x).y(y))?;
        Ok(())
    }

    pub fn resize(&self, width: u16, height: u16) -> Result<(), Error> {
        self.ensure_live()?;
        if width == 0 || height == 0 {
            return Err(Error::Invalid("zero-sized window"));
        }
        self.display().conn().configure_window(
            self.id(),
            &ConfigureWindowAux::new()
                .width(u32::from(width))
                .height(u32::from(height)),
        )?;
        Ok(())
    }

    pub fn set_title(&self, title: &str) -> Result<(), Error> {
        self.ensure_live()?;
        write_title(self.display(), self.id(), title);
        Ok(())
    }

    /// 0 is fully transparent, 255 fully opaque (which deletes the
    /// property altogether).
    pub fn set_opacity(&self, opacity: u8) -> Result<(), Error> {
        self.ensure_live()?;
        write_opacity(self.display(), self.id(), opacity)
    }

    /// Ask this window to close, through the same client-message path the
    /// window manager uses; the pump turns it into exactly one
    /// `request_close` callback.
    pub fn send_close_request(&self) -> Result<(), Error> {
        self.ensure_live()?;
        let atoms = self.display().atoms();
        let event = ClientMessageEvent {
            response_type: CLIENT_MESSAGE_EVENT,
            format: 32,
            sequence: 0,
            window: self.id(),
            type_: atoms.WM_PROTOCOLS,
            data: ClientMessageData::from([atoms.WM_DELETE_WINDOW, 0, 0, 0, 0]),
        };
        self.display()
            .conn()
            .send_event(false, self.id(), EventMask::NO_EVENT, event)?;
        Ok(())
    }

    /// Clear the window with exposures on, so the server answers with
    /// exactly one `redraw` per request.
    pub fn send_redraw(&self) -> Result<(), Error> {
        self.ensure_live()?;
        self.display()
            .conn()
            .clear_area(true, self.id(), 0, 0, 0, 0)?;
        Ok(())
    }

    // --- query operations -------------------------------------------------

    /// The window's own rectangle, in root coordinates.
    pub fn geometry(&self) -> Result<Rect, Error> {
        self.ensure_live()?;
        let conn = self.display().conn();
        let geom = conn.get_geometry(self.id())?.reply()?;
        let pos = conn
            .translate_coordinates(self.id(), geom.root, 0, 0)?
            .reply()?;
        Ok(Rect {
            x: i32::from(pos.dst_x),
            y: i32::from(pos.dst_y),
            width: u32::from(geom.width),
            height: u32::from(geom.height),
        })
    }

    /// The rectangle including window-manager decorations, read from
    /// `_NET_FRAME_EXTENTS`; falls back to the bare geometry when the
    /// window manager has not published extents.
    pub fn frame(&self) -> Result<Rect, Error> {
        let geometry = self.geometry()?;
        let atoms = self.display().atoms();
        let reply = self
            .display()
            .conn()
            .get_property(
                false,
                self.id(),
                atoms._NET_FRAME_EXTENTS,
                GetPropertyType::ANY,
                0,
                4,
            )?
            .reply()?;
        let extents: Vec<u32> = reply
            .value32()
            .map(|values| values.collect())
            .unwrap_or_default();
        Ok(apply_frame_extents(geometry, &extents))
    }

    pub fn title(&self) -> Result<String, Error> {
        self.ensure_live()?;
        let atoms = self.display().atoms();
        let reply = self
            .display()
            .conn()
            .get_property(
                false,
                self.id(),
                atoms._NET_WM_NAME,
                atoms.UTF8_STRING,
                0,
                u32::MAX,
            )?
            .reply()?;
        String::from_utf8(reply.value).map_err(|_| Error::Invalid("window title is not UTF-8"))
    }

    pub fn pos(&self) -> Result<(i32, i32), Error> {
        let geometry = self.geometry()?;
        Ok((geometry.x, geometry.y))
    }

    pub fn size(&self) -> Result<(u32, u32), Error> {
        let geometry = self.geometry()?;
        Ok((geometry.width, geometry.height))
    }

    /// Recover the owning screen from the server; the window may have been
    /// reparented across screens since creation.
    pub fn screen(&self) -> Result<Screen, Error> {
        self.ensure_live()?;
        let geom = self.display().conn().get_geometry(self.id())?.reply()?;
        let index = self
            .display()
            .conn()
            .setup()
            .roots
            .iter()
            .position(|screen| screen.root == geom.root)
            .ok_or(Error::NotFound)?;
        Screen::new(self.display().clone(), index)
    }

    /// The screen index this window was created on.
    pub fn creation_screen_index(&self) -> usize {
        self.screen_index
    }

    // --- destruction ------------------------------------------------------

    /// Release everything this window owns. Idempotent: a second call finds
    /// nothing left to do.
    ///
    /// The ID-map entry goes away before the destroy request is issued, so
    /// the event pump can never find a stale entry for a dying window.
    pub fn free(&self) -> Result<(), Error> {
        let flags = self.flags.get();
        let conn = self.display().conn();

        if flags.back_buffer && self.back_buffer.get() != 0 {
            use x11rb::protocol::dbe::ConnectionExt as _;
            log_x11!(conn.dbe_deallocate_back_buffer(self.back_buffer.get()));
        }
        if flags.colormap {
            log_x11!(conn.free_colormap(self.drawable.colormap()));
        }
        if flags.window {
            let id = self.id();
            let _ = self.display().remove_window(id);
            log_x11!(conn.destroy_window(id));
        }

        self.flags.set(OwnFlags::default());
        self.back_buffer.set(0);
        self.drawable.clear();
        self.size.set((0, 0));
        self.state.set(WindowState::Destroyed);
        // Dropping the handler here would recurse if `free` was called from
        // inside a callback; in that case it dies with the window instead.
        if let Ok(mut handler) = self.handler.try_borrow_mut() {
            *handler = None;
        }
        log_x11!(conn.flush());
        Ok(())
    }

    // --- event reactions, called from the pump ----------------------------

    fn with_handler<F: FnOnce(&mut dyn EventHandler)>(&self, f: F) {
        match self.handler.try_borrow_mut() {
            Ok(mut handler) => {
                if let Some(handler) = handler.as_mut() {
                    f(handler.as_mut());
                }
            }
            Err(_) => error!(
                "window {}: event handler is already borrowed, skipping callback",
                self.id()
            ),
        }
    }

    pub(crate) fn handle_client_message(&self, event: &ClientMessageEvent) {
        let atoms = self.display().atoms();
        if event.type_ == atoms.WM_PROTOCOLS
            && event.format == 32
            && event.data.as_data32()[0] == atoms.WM_DELETE_WINDOW
        {
            self.with_handler(|handler| handler.request_close(self));
        }
        // Other client messages are not ours to interpret.
    }

    /// The server window is gone; repair local state and tell the handler.
    /// The colormap is still owned and stays behind for `free`.
    pub(crate) fn handle_destroy_notify(&self) {
        self.flags.set(OwnFlags {
            window: false,
            ..self.flags.get()
        });
        self.drawable.clear_id();
        self.state.set(WindowState::Destroyed);
        self.with_handler(|handler| handler.destroyed(self));
    }

    pub(crate) fn handle_configure_notify(&self, event: &ConfigureNotifyEvent) {
        let new_size = (event.width, event.height);
        if self.size.replace(new_size) != new_size {
            self.with_handler(|handler| handler.resized(self, new_size.0, new_size.1));
        }
    }

    pub(crate) fn handle_expose(&self, event: &ExposeEvent) {
        // Only the last exposure of a batch triggers a repaint.
        if event.count == 0 {
            self.with_handler(|handler| handler.redraw(self));
        }
    }

    pub(crate) fn handle_map_notify(&self) {
        if self.state.replace(WindowState::Shown) != WindowState::Shown {
            self.with_handler(|handler| handler.visibility_changed(self, true));
        }
    }

    pub(crate) fn handle_unmap_notify(&self) {
        if self.state.replace(WindowState::Hidden) != WindowState::Hidden {
            self.with_handler(|handler| handler.visibility_changed(self, false));
        }
    }
}

fn window_size_hints(config: &WindowConfig) -> WmSizeHints {
    let mut hints = WmSizeHints::new();
    if let Some((x, y)) = config.pos {
        hints.position = Some((
            WmSizeHintsSpecification::UserSpecified,
            i32::from(x),
            i32::from(y),
        ));
    }
    hints.size = Some((
        WmSizeHintsSpecification::ProgramSpecified,
        i32::from(config.size.0),
        i32::from(config.size.1),
    ));
    if let Some((width, height)) = config.min_size {
        hints.min_size = Some((i32::from(width), i32::from(height)));
    }
    if let Some((width, height)) = config.max_size {
        hints.max_size = Some((i32::from(width), i32::from(height)));
    }
    hints
}

fn write_title(display: &Display, id: xproto::Window, title: &str) {
    let atoms = display.atoms();
    // STRING is technically Latin-1, not UTF-8, but every toolkit stores
    // UTF-8 there and modern window managers read _NET_WM_NAME anyway.
    log_x11!(display.conn().change_property8(
        PropMode::REPLACE,
        id,
        AtomEnum::WM_NAME,
        AtomEnum::STRING,
        title.as_bytes(),
    ));
    log_x11!(display.conn().change_property8(
        PropMode::REPLACE,
        id,
        atoms._NET_WM_NAME,
        atoms.UTF8_STRING,
        title.as_bytes(),
    ));
}

/// Scales 0..=255 to the full CARDINAL range; 255 maps exactly to
/// 0xffff_ffff.
const OPACITY_UNIT: u32 = 0x0101_0101;

fn opacity_cardinal(opacity: u8) -> u32 {
    u32::from(opacity) * OPACITY_UNIT
}

fn write_opacity(display: &Display, id: xproto::Window, opacity: u8) -> Result<(), Error> {
    let atoms = display.atoms();
    if opacity == u8::MAX {
        // Deleting the property is the protocol's way of saying "fully
        // opaque".
        display
            .conn()
            .delete_property(id, atoms._NET_WM_WINDOW_OPACITY)?;
    } else {
        display.conn().change_property32(
            PropMode::REPLACE,
            id,
            atoms._NET_WM_WINDOW_OPACITY,
            AtomEnum::CARDINAL,
            &[opacity_cardinal(opacity)],
        )?;
    }
    Ok(())
}

fn apply_frame_extents(geometry: Rect, extents: &[u32]) -> Rect {
    match *extents {
        [left, right, top, bottom] => Rect {
            x: geometry.x - left as i32,
            y: geometry.y - top as i32,
            width: geometry.width + left + right,
            height: geometry.height + top + bottom,
        },
        _ => geometry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use static_assertions as sa;

    sa::assert_not_impl_any!(Window: Send, Sync);
    sa::assert_not_impl_any!(WindowBuilder: Send, Sync);

    #[test]
    fn opacity_scales_to_the_full_cardinal_range() {
        assert_eq!(opacity_cardinal(0), 0);
        assert_eq!(opacity_cardinal(128), 0x8080_8080);
        assert_eq!(opacity_cardinal(255), 0xffff_ffff);
    }

    #[test]
    fn frame_extents_grow_the_rectangle() {
        let geometry = Rect {
            x: 100,
            y: 80,
            width: 200,
            height: 100,
        };
        let framed = apply_frame_extents(geometry, &[2, 2, 24, 2]);
        assert_eq!(
            framed,
            Rect {
                x: 98,
                y: 56,
                width: 204,
                height: 126,
            }
        );
    }

    #[test]
    fn missing_frame_extents_fall_back_to_the_geometry() {
        let geometry = Rect {
            x: 1,
            y: 2,
            width: 3,
            height: 4,
        };
        assert_eq!(apply_frame_extents(geometry, &[]), geometry);
        assert_eq!(apply_frame_extents(geometry, &[1, 2]), geometry);
    }

    #[test]
    fn size_hints_carry_position_and_limits() {
        let mut config = WindowConfig::default();
        config.pos = Some((10, 20));
        config.size = (300, 200);
        config.min_size = Some((100, 50));
        let hints = window_size_hints(&config);
        assert_eq!(
            hints.position,
            Some((WmSizeHintsSpecification::UserSpecified, 10, 20))
        );
        assert_eq!(
            hints.size,
            Some((WmSizeHintsSpecification::ProgramSpecified, 300, 200))
        );
        assert_eq!(hints.min_size, Some((100, 50)));
        assert_eq!(hints.max_size, None);
    }

    #[test]
    fn default_state_is_destroyed() {
        assert_eq!(WindowState::default(), WindowState::Destroyed);
    }
}

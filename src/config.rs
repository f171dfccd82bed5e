// Copyright 2026 the x11-shell Authors
// SPDX-License-Identifier: Apache-2.0

//! Enumerated per-surface and per-window configuration.
//!
//! Callers describe what they want as a slice of attributes; resolution
//! folds the slice into a fixed config struct, enforcing the sequence caps.
//! Repeated scalar keys are last-wins; the per-channel color keys combine
//! into a single floor (the matcher takes their maximum).

use crate::error::Error;

/// Color model requested from a GLX framebuffer configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SurfaceColorType {
    #[default]
    Rgba,
    ColorIndex,
}

/// One requirement on the framebuffer a surface is created against.
///
/// The bit-count attributes are minima. `BitsDepth`, `BitsStencil`,
/// `BitsAccum`, `DoubleBuffer`, `Type` and `Conformant` only affect the GLX
/// matching path; the plain window path ignores them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceAttr {
    BitsRed(u8),
    BitsGreen(u8),
    BitsBlue(u8),
    BitsAlpha(u8),
    BitsBuffer(u8),
    /// Require a visual whose RENDER picture format has a nonzero alpha
    /// mask, so a compositor can actually blend the window.
    TransparentAlpha,
    BitsDepth(u8),
    BitsStencil(u8),
    BitsAccum(u8),
    DoubleBuffer(bool),
    Type(SurfaceColorType),
    Conformant(bool),
}

const SURFACE_KEYS: usize = 12;

/// Fixed cap on one surface-attribute sequence; part of the ABI.
pub const MAX_SURFACE_ATTRS: usize = 2 * SURFACE_KEYS;

/// Resolved surface requirements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct SurfaceConfig {
    pub red_bits: u8,
    pub green_bits: u8,
    pub blue_bits: u8,
    pub alpha_bits: u8,
    pub buffer_bits: u8,
    pub transparent_alpha: bool,
    pub depth_bits: u8,
    pub stencil_bits: u8,
    pub accum_bits: u8,
    pub double_buffer: bool,
    pub color_type: SurfaceColorType,
    pub conformant: bool,
}

impl SurfaceConfig {
    pub fn from_attrs(attrs: &[SurfaceAttr]) -> Result<SurfaceConfig, Error> {
        if attrs.len() > MAX_SURFACE_ATTRS {
            return Err(Error::TooManyAttributes);
        }
        let mut config = SurfaceConfig::default();
        for attr in attrs {
            match *attr {
                SurfaceAttr::BitsRed(bits) => config.red_bits = bits,
                SurfaceAttr::BitsGreen(bits) => config.green_bits = bits,
                SurfaceAttr::BitsBlue(bits) => config.blue_bits = bits,
                SurfaceAttr::BitsAlpha(bits) => config.alpha_bits = bits,
                SurfaceAttr::BitsBuffer(bits) => config.buffer_bits = bits,
                SurfaceAttr::TransparentAlpha => config.transparent_alpha = true,
                SurfaceAttr::BitsDepth(bits) => config.depth_bits = bits,
                SurfaceAttr::BitsStencil(bits) => config.stencil_bits = bits,
                SurfaceAttr::BitsAccum(bits) => config.accum_bits = bits,
                SurfaceAttr::DoubleBuffer(on) => config.double_buffer = on,
                SurfaceAttr::Type(ty) => config.color_type = ty,
                SurfaceAttr::Conformant(on) => config.conformant = on,
            }
        }
        Ok(config)
    }

    /// The per-channel floor the visual matcher works with.
    pub fn rgb_floor(&self) -> u8 {
        self.red_bits.max(self.green_bits).max(self.blue_bits)
    }
}

/// One window-level option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WindowAttr {
    /// Ask the window manager for decorations; without this the window is
    /// created override-redirect (undecorated, unmanaged).
    Frame(bool),
    Title(String),
    Pos(i16, i16),
    Size(u16, u16),
    MinSize(u16, u16),
    MaxSize(u16, u16),
    /// 0 is fully transparent, 255 fully opaque.
    Transparency(u8),
}

const WINDOW_KEYS: usize = 7;

/// Fixed cap on one window-attribute sequence; part of the ABI.
pub const MAX_WINDOW_ATTRS: usize = 3 * WINDOW_KEYS;

/// Resolved window options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct WindowConfig {
    pub frame: bool,
    pub title: Option<String>,
    pub pos: Option<(i16, i16)>,
    pub size: (u16, u16),
    pub min_size: Option<(u16, u16)>,
    pub max_size: Option<(u16, u16)>,
    pub opacity: u8,
}

impl Default for WindowConfig {
    fn default() -> WindowConfig {
        WindowConfig {
            frame: false,
            title: None,
            pos: None,
            size: (500, 400),
            min_size: None,
            max_size: None,
            opacity: u8::MAX,
        }
    }
}

/// A zero-sized window is a server error; clamp silently.
pub(crate) fn clamp_size((width, height): (u16, u16)) -> (u16, u16) {
    (width.max(1), height.max(1))
}

impl WindowConfig {
    pub fn from_attrs(attrs: &[WindowAttr]) -> Result<WindowConfig, Error> {
        if attrs.len() > MAX_WINDOW_ATTRS {
            return Err(Error::TooManyAttributes);
        }
        let mut config = WindowConfig::default();
        for attr in attrs {
            match attr {
                WindowAttr::Frame(frame) => config.frame = *frame,
                WindowAttr::Title(title) => config.title = Some(title.clone()),
                WindowAttr::Pos(x, y) => config.pos = Some((*x, *y)),
                WindowAttr::Size(w, h) => config.size = clamp_size((*w, *h)),
                WindowAttr::MinSize(w, h) => config.min_size = Some((*w, *h)),
                WindowAttr::MaxSize(w, h) => config.max_size = Some((*w, *h)),
                WindowAttr::Transparency(opacity) => config.opacity = *opacity,
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_floor_is_the_channel_maximum() {
        let config = SurfaceConfig::from_attrs(&[
            SurfaceAttr::BitsRed(5),
            SurfaceAttr::BitsGreen(6),
            SurfaceAttr::BitsBlue(5),
        ])
        .unwrap();
        assert_eq!(config.rgb_floor(), 6);
        assert_eq!(config.alpha_bits, 0);
        assert!(!config.transparent_alpha);
    }

    #[test]
    fn repeated_keys_are_last_wins() {
        let config = SurfaceConfig::from_attrs(&[
            SurfaceAttr::BitsAlpha(8),
            SurfaceAttr::BitsAlpha(1),
            SurfaceAttr::DoubleBuffer(true),
            SurfaceAttr::DoubleBuffer(false),
        ])
        .unwrap();
        assert_eq!(config.alpha_bits, 1);
        assert!(!config.double_buffer);
    }

    #[test]
    fn surface_sequence_cap_is_enforced() {
        let attrs = vec![SurfaceAttr::BitsRed(8); MAX_SURFACE_ATTRS + 1];
        assert_eq!(
            SurfaceConfig::from_attrs(&attrs),
            Err(Error::TooManyAttributes)
        );
        let attrs = vec![SurfaceAttr::BitsRed(8); MAX_SURFACE_ATTRS];
        assert!(SurfaceConfig::from_attrs(&attrs).is_ok());
    }

    #[test]
    fn window_sequence_cap_is_enforced() {
        let attrs = vec![WindowAttr::Frame(true); MAX_WINDOW_ATTRS + 1];
        assert_eq!(
            WindowConfig::from_attrs(&attrs),
            Err(Error::TooManyAttributes)
        );
    }

    #[test]
    fn window_attrs_resolve() {
        let config = WindowConfig::from_attrs(&[
            WindowAttr::Size(200, 100),
            WindowAttr::Title("t".into()),
            WindowAttr::Frame(true),
            WindowAttr::Transparency(128),
        ])
        .unwrap();
        assert_eq!(config.size, (200, 100));
        assert_eq!(config.title.as_deref(), Some("t"));
        assert!(config.frame);
        assert_eq!(config.opacity, 128);
        assert_eq!(config.pos, None);
    }

    #[test]
    fn zero_sizes_are_clamped() {
        let config = WindowConfig::from_attrs(&[WindowAttr::Size(0, 50)]).unwrap();
        assert_eq!(config.size, (1, 50));
    }
}

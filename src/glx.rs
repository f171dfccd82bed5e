// Copyright 2026 the x11-shell Authors
// SPDX-License-Identifier: Apache-2.0

//! GLX framebuffer configurations.
//!
//! The server is asked for its full framebuffer-config list and the match
//! runs client-side against the same attribute set `glXChooseFBConfig`
//! uses — which is itself only client-side filtering over this very
//! request.

use std::ops::Deref;
use std::rc::Rc;

use tracing::debug;
use x11rb::protocol::glx::ConnectionExt as _;

use crate::config::{SurfaceColorType, SurfaceConfig};
use crate::error::Error;
use crate::screen::Screen;
use crate::visual;
use crate::window::{Window, WindowBuilder};

// GLX attribute names are not in the core protocol tables; the values come
// from the GLX 1.4 specification.
const GLX_BUFFER_SIZE: u32 = 2;
const GLX_DOUBLEBUFFER: u32 = 5;
const GLX_RED_SIZE: u32 = 8;
const GLX_GREEN_SIZE: u32 = 9;
const GLX_BLUE_SIZE: u32 = 10;
const GLX_ALPHA_SIZE: u32 = 11;
const GLX_DEPTH_SIZE: u32 = 12;
const GLX_STENCIL_SIZE: u32 = 13;
const GLX_ACCUM_RED_SIZE: u32 = 14;
const GLX_ACCUM_GREEN_SIZE: u32 = 15;
const GLX_ACCUM_BLUE_SIZE: u32 = 16;
const GLX_ACCUM_ALPHA_SIZE: u32 = 17;
const GLX_CONFIG_CAVEAT: u32 = 0x20;
const GLX_VISUAL_ID: u32 = 0x800b;
const GLX_DRAWABLE_TYPE: u32 = 0x8010;
const GLX_RENDER_TYPE: u32 = 0x8011;
const GLX_FBCONFIG_ID: u32 = 0x8013;

const GLX_NON_CONFORMANT_CONFIG: u32 = 0x800d;
const GLX_RGBA_BIT: u32 = 0x1;
const GLX_COLOR_INDEX_BIT: u32 = 0x2;
const GLX_WINDOW_BIT: u32 = 0x1;
const GLX_PBUFFER_BIT: u32 = 0x4;

/// One framebuffer configuration, decoded from the server's property list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FbConfig {
    pub id: u32,
    /// X visual the config maps to; 0 when it has none (pbuffer-only).
    pub visual: u32,
    pub red_bits: u32,
    pub green_bits: u32,
    pub blue_bits: u32,
    pub alpha_bits: u32,
    pub buffer_bits: u32,
    pub depth_bits: u32,
    pub stencil_bits: u32,
    pub accum_red_bits: u32,
    pub accum_green_bits: u32,
    pub accum_blue_bits: u32,
    pub accum_alpha_bits: u32,
    pub double_buffer: bool,
    pub render_type: u32,
    pub drawable_type: u32,
    pub caveat: u32,
}

/// Decode a GetFBConfigs reply: `configs` groups of `props` (name, value)
/// pairs. Unknown attribute names are skipped, the server is free to send
/// more than we understand.
fn decode_fb_configs(configs: usize, props: usize, list: &[u32]) -> Vec<FbConfig> {
    list.chunks(props * 2)
        .take(configs)
        .map(|group| {
            let mut config = FbConfig::default();
            for pair in group.chunks_exact(2) {
                let (name, value) = (pair[0], pair[1]);
                match name {
                    GLX_FBCONFIG_ID => config.id = value,
                    GLX_VISUAL_ID => config.visual = value,
                    GLX_RED_SIZE => config.red_bits = value,
                    GLX_GREEN_SIZE => config.green_bits = value,
                    GLX_BLUE_SIZE => config.blue_bits = value,
                    GLX_ALPHA_SIZE => config.alpha_bits = value,
                    GLX_BUFFER_SIZE => config.buffer_bits = value,
                    GLX_DEPTH_SIZE => config.depth_bits = value,
                    GLX_STENCIL_SIZE => config.stencil_bits = value,
                    GLX_ACCUM_RED_SIZE => config.accum_red_bits = value,
                    GLX_ACCUM_GREEN_SIZE => config.accum_green_bits = value,
                    GLX_ACCUM_BLUE_SIZE => config.accum_blue_bits = value,
                    GLX_ACCUM_ALPHA_SIZE => config.accum_alpha_bits = value,
                    GLX_DOUBLEBUFFER => config.double_buffer = value != 0,
                    GLX_RENDER_TYPE => config.render_type = value,
                    GLX_DRAWABLE_TYPE => config.drawable_type = value,
                    GLX_CONFIG_CAVEAT => config.caveat = value,
                    _ => {}
                }
            }
            config
        })
        .collect()
}

fn render_type_bit(color_type: SurfaceColorType) -> u32 {
    match color_type {
        SurfaceColorType::Rgba => GLX_RGBA_BIT,
        SurfaceColorType::ColorIndex => GLX_COLOR_INDEX_BIT,
    }
}

/// The attribute checks `glXChooseFBConfig` would run for our requirements.
fn matches(config: &FbConfig, want: &SurfaceConfig) -> bool {
    config.visual != 0
        && config.render_type & render_type_bit(want.color_type) != 0
        && config.drawable_type & (GLX_WINDOW_BIT | GLX_PBUFFER_BIT) != 0
        && config.red_bits >= u32::from(want.red_bits)
        && config.green_bits >= u32::from(want.green_bits)
        && config.blue_bits >= u32::from(want.blue_bits)
        && config.alpha_bits >= u32::from(want.alpha_bits)
        && config.buffer_bits >= u32::from(want.buffer_bits)
        && config.depth_bits >= u32::from(want.depth_bits)
        && config.stencil_bits >= u32::from(want.stencil_bits)
        && config.accum_red_bits >= u32::from(want.accum_bits)
        && config.accum_green_bits >= u32::from(want.accum_bits)
        && config.accum_blue_bits >= u32::from(want.accum_bits)
        && (!want.double_buffer || config.double_buffer)
        && (!want.conformant || config.caveat != GLX_NON_CONFORMANT_CONFIG)
}

/// Ask the server for its framebuffer configs and pick the first match.
pub(crate) fn choose_fb_config(screen: &Screen, want: &SurfaceConfig) -> Result<FbConfig, Error> {
    let display = screen.display();
    display.ensure_open()?;
    if !display.extensions().glx.supported {
        return Err(Error::Unsupported("GLX"));
    }

    let reply = display
        .conn()
        .glx_get_fb_configs(screen.index() as u32)?
        .reply()?;
    let configs = decode_fb_configs(
        reply.num_fb_configs as usize,
        reply.num_properties as usize,
        &reply.property_list,
    );
    debug!("server offered {} framebuffer configs", configs.len());

    if want.transparent_alpha {
        // Keep the first config whose underlying visual really has an alpha
        // mask at the RENDER level; the GLX alpha size alone does not
        // guarantee a compositor can blend it.
        let formats = display.pict_formats().ok_or(Error::Unsupported("RENDER"))?;
        for config in configs.iter().filter(|config| matches(config, want)) {
            let alpha =
                visual::alpha_mask_bits(&formats.screens, &formats.formats, config.visual);
            if matches!(alpha, Some(bits) if bits > 0 && bits >= u32::from(want.alpha_bits)) {
                return Ok(*config);
            }
        }
        Err(Error::NotFound)
    } else {
        configs
            .into_iter()
            .find(|config| matches(config, want))
            .ok_or(Error::NotFound)
    }
}

impl WindowBuilder {
    /// Create the window from a GLX framebuffer configuration instead of a
    /// bare X visual.
    pub fn build_glx(self) -> Result<GlxWindow, Error> {
        let config = choose_fb_config(&self.screen, &self.surface)?;
        let pick = visual::find_visual_by_id(&self.screen.root().allowed_depths, config.visual)
            .ok_or(Error::NotFound)?;
        let window = self.finish(pick)?;
        Ok(GlxWindow { window, config })
    }
}

/// A window whose visual came from a GLX framebuffer configuration.
///
/// Everything except the construction is the plain window's behavior; the
/// wrapper only remembers which config was chosen, so a GL context can be
/// created against it.
pub struct GlxWindow {
    window: Rc<Window>,
    config: FbConfig,
}

impl GlxWindow {
    #[inline]
    pub fn fb_config(&self) -> &FbConfig {
        &self.config
    }

    #[inline]
    pub fn window(&self) -> &Rc<Window> {
        &self.window
    }

    pub fn free(&self) -> Result<(), Error> {
        self.window.free()
    }
}

impl Deref for GlxWindow {
    type Target = Window;

    fn deref(&self) -> &Window {
        &self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SurfaceAttr;

    // Two configs with three properties each, the way GetFBConfigs lays
    // them out.
    fn property_list() -> Vec<u32> {
        vec![
            // config 1: no visual
            GLX_FBCONFIG_ID,
            0x101,
            GLX_VISUAL_ID,
            0,
            GLX_RED_SIZE,
            8,
            // config 2
            GLX_FBCONFIG_ID,
            0x102,
            GLX_VISUAL_ID,
            0x21,
            GLX_RED_SIZE,
            8,
        ]
    }

    fn full_config() -> FbConfig {
        FbConfig {
            id: 0x102,
            visual: 0x21,
            red_bits: 8,
            green_bits: 8,
            blue_bits: 8,
            alpha_bits: 8,
            buffer_bits: 32,
            depth_bits: 24,
            stencil_bits: 8,
            accum_red_bits: 16,
            accum_green_bits: 16,
            accum_blue_bits: 16,
            accum_alpha_bits: 16,
            double_buffer: true,
            render_type: GLX_RGBA_BIT,
            drawable_type: GLX_WINDOW_BIT | GLX_PBUFFER_BIT,
            caveat: 0,
        }
    }

    #[test]
    fn decodes_grouped_property_pairs() {
        let configs = decode_fb_configs(2, 3, &property_list());
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0].id, 0x101);
        assert_eq!(configs[0].visual, 0);
        assert_eq!(configs[1].visual, 0x21);
        assert_eq!(configs[1].red_bits, 8);
    }

    #[test]
    fn visualless_configs_never_match() {
        let mut config = full_config();
        config.visual = 0;
        let want = SurfaceConfig::from_attrs(&[SurfaceAttr::BitsRed(8)]).unwrap();
        assert!(!matches(&config, &want));
    }

    #[test]
    fn bit_floors_and_double_buffering_are_honored() {
        let config = full_config();
        let want = SurfaceConfig::from_attrs(&[
            SurfaceAttr::BitsRed(8),
            SurfaceAttr::BitsAlpha(8),
            SurfaceAttr::BitsDepth(24),
            SurfaceAttr::BitsStencil(8),
            SurfaceAttr::DoubleBuffer(true),
        ])
        .unwrap();
        assert!(matches(&config, &want));

        let want = SurfaceConfig::from_attrs(&[SurfaceAttr::BitsDepth(32)]).unwrap();
        assert!(!matches(&config, &want));

        let mut single = full_config();
        single.double_buffer = false;
        let want = SurfaceConfig::from_attrs(&[SurfaceAttr::DoubleBuffer(true)]).unwrap();
        assert!(!matches(&single, &want));
    }

    #[test]
    fn conformant_requests_reject_caveated_configs() {
        let mut config = full_config();
        config.caveat = GLX_NON_CONFORMANT_CONFIG;
        let want = SurfaceConfig::from_attrs(&[SurfaceAttr::Conformant(true)]).unwrap();
        assert!(!matches(&config, &want));
        let relaxed = SurfaceConfig::from_attrs(&[]).unwrap();
        assert!(matches(&config, &relaxed));
    }
}

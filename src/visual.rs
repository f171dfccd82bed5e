// Copyright 2026 the x11-shell Authors
// SPDX-License-Identifier: Apache-2.0

//! Visual selection for plain (non-GLX) windows.
//!
//! Finding a visual with an alpha channel is roundabout: RENDER has picture
//! formats, each format corresponds to a visual, so we walk the pict-format
//! reply to learn how many alpha bits a given visual really has.

use x11rb::protocol::render::{Pictforminfo, Pictscreen};
use x11rb::protocol::xproto::{Depth, VisualClass, Visualid, Visualtype};

use crate::config::SurfaceConfig;
use crate::error::Error;

/// The visual (and its depth) chosen for a new window.
#[derive(Clone, Copy, Debug)]
pub(crate) struct VisualPick {
    pub visual: Visualtype,
    pub depth: u8,
}

/// RENDER pict-format data needed by the matcher, as borrowed slices so the
/// matching stays a pure function over reply data.
pub(crate) type RenderFormats<'a> = (&'a [Pictscreen], &'a [Pictforminfo]);

/// Pick the first true-color visual satisfying `config`.
///
/// A visual wins when its per-channel precision reaches the requested floor,
/// the requested color and buffer bits fit into its depth, and, if alpha was
/// requested, its RENDER picture format carries at least that many alpha
/// bits. `render` is `None` when the RENDER extension was not probed or is
/// absent.
pub(crate) fn choose_visual(
    depths: &[Depth],
    render: Option<RenderFormats>,
    config: &SurfaceConfig,
) -> Result<VisualPick, Error> {
    let rgb_floor = config.rgb_floor();
    let wants_alpha = config.alpha_bits > 0 || config.transparent_alpha;
    if wants_alpha && render.is_none() {
        return Err(Error::Unsupported("RENDER"));
    }

    for depth in depths {
        for visual in &depth.visuals {
            if visual.class != VisualClass::TRUE_COLOR {
                continue;
            }
            if visual.bits_per_rgb_value < rgb_floor {
                continue;
            }
            let color_bits =
                u16::from(visual.bits_per_rgb_value) * 3 + u16::from(config.alpha_bits);
            if color_bits > u16::from(depth.depth) || config.buffer_bits > depth.depth {
                continue;
            }
            if wants_alpha {
                let alpha = render
                    .and_then(|(screens, formats)| alpha_mask_bits(screens, formats, visual.visual_id));
                match alpha {
                    Some(bits)
                        if bits >= u32::from(config.alpha_bits)
                            && (!config.transparent_alpha || bits > 0) => {}
                    _ => continue,
                }
            }
            return Ok(VisualPick {
                visual: *visual,
                depth: depth.depth,
            });
        }
    }
    Err(Error::NotFound)
}

/// Number of alpha bits RENDER exposes for `visual_id`, or `None` when the
/// visual has no picture format at all.
pub(crate) fn alpha_mask_bits(
    screens: &[Pictscreen],
    formats: &[Pictforminfo],
    visual_id: Visualid,
) -> Option<u32> {
    let format_id = screens
        .iter()
        .flat_map(|screen| screen.depths.iter())
        .flat_map(|depth| depth.visuals.iter())
        .find(|pict_visual| pict_visual.visual == visual_id)
        .map(|pict_visual| pict_visual.format)?;
    formats
        .iter()
        .find(|format| format.id == format_id)
        .map(|format| u32::from(format.direct.alpha_mask).count_ones())
}

/// Look a visual up by id, returning it together with its depth.
#[cfg_attr(not(feature = "glx"), allow(dead_code))]
pub(crate) fn find_visual_by_id(depths: &[Depth], visual_id: Visualid) -> Option<VisualPick> {
    for depth in depths {
        for visual in &depth.visuals {
            if visual.visual_id == visual_id {
                return Some(VisualPick {
                    visual: *visual,
                    depth: depth.depth,
                });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SurfaceAttr;
    use x11rb::protocol::render::{Directformat, PictType, Pictdepth, Pictvisual};

    fn visual(id: Visualid, class: VisualClass, bits_per_rgb: u8) -> Visualtype {
        Visualtype {
            visual_id: id,
            class,
            bits_per_rgb_value: bits_per_rgb,
            colormap_entries: 256,
            red_mask: 0xff0000,
            green_mask: 0x00ff00,
            blue_mask: 0x0000ff,
        }
    }

    fn depths() -> Vec<Depth> {
        vec![
            Depth {
                depth: 16,
                visuals: vec![visual(10, VisualClass::TRUE_COLOR, 5)],
            },
            Depth {
                depth: 24,
                visuals: vec![
                    visual(20, VisualClass::PSEUDO_COLOR, 8),
                    visual(21, VisualClass::TRUE_COLOR, 8),
                ],
            },
            Depth {
                depth: 32,
                visuals: vec![visual(30, VisualClass::TRUE_COLOR, 8)],
            },
        ]
    }

    // A single RENDER screen where visual 30 has an 8-bit alpha mask and
    // visual 21 has none.
    fn render_data() -> (Vec<Pictscreen>, Vec<Pictforminfo>) {
        let format = |id, alpha_mask| Pictforminfo {
            id,
            type_: PictType::DIRECT,
            depth: 32,
            direct: Directformat {
                red_shift: 16,
                red_mask: 0xff,
                green_shift: 8,
                green_mask: 0xff,
                blue_shift: 0,
                blue_mask: 0xff,
                alpha_shift: 24,
                alpha_mask,
            },
            colormap: 0,
        };
        let screens = vec![Pictscreen {
            fallback: 1,
            depths: vec![Pictdepth {
                depth: 32,
                visuals: vec![
                    Pictvisual {
                        visual: 30,
                        format: 2,
                    },
                    Pictvisual {
                        visual: 21,
                        format: 1,
                    },
                ],
            }],
        }];
        (screens, vec![format(1, 0), format(2, 0xff)])
    }

    #[test]
    fn picks_the_first_deep_enough_true_color_visual() {
        let config = SurfaceConfig::from_attrs(&[
            SurfaceAttr::BitsRed(8),
            SurfaceAttr::BitsGreen(8),
            SurfaceAttr::BitsBlue(8),
        ])
        .unwrap();
        let pick = choose_visual(&depths(), None, &config).unwrap();
        assert_eq!(pick.visual.visual_id, 21);
        assert_eq!(pick.depth, 24);
    }

    #[test]
    fn shallow_requests_accept_shallow_visuals() {
        let config = SurfaceConfig::from_attrs(&[SurfaceAttr::BitsRed(5)]).unwrap();
        let pick = choose_visual(&depths(), None, &config).unwrap();
        assert_eq!(pick.visual.visual_id, 10);
    }

    #[test]
    fn buffer_bits_must_fit_the_depth() {
        let config = SurfaceConfig::from_attrs(&[SurfaceAttr::BitsBuffer(32)]).unwrap();
        let pick = choose_visual(&depths(), None, &config).unwrap();
        assert_eq!(pick.depth, 32);
    }

    #[test]
    fn alpha_requires_a_render_format_with_enough_bits() {
        let (screens, formats) = render_data();
        let config = SurfaceConfig::from_attrs(&[
            SurfaceAttr::BitsRed(8),
            SurfaceAttr::BitsAlpha(8),
            SurfaceAttr::TransparentAlpha,
        ])
        .unwrap();
        let pick = choose_visual(&depths(), Some((&screens, &formats)), &config).unwrap();
        assert_eq!(pick.visual.visual_id, 30);
        assert_eq!(pick.depth, 32);
    }

    #[test]
    fn transparent_alpha_without_a_match_is_not_found() {
        let (screens, formats) = render_data();
        // Only the depth-24 visuals are offered; neither has an alpha mask.
        let shallow = vec![Depth {
            depth: 24,
            visuals: vec![visual(21, VisualClass::TRUE_COLOR, 8)],
        }];
        let config = SurfaceConfig::from_attrs(&[SurfaceAttr::TransparentAlpha]).unwrap();
        assert_eq!(
            choose_visual(&shallow, Some((&screens, &formats)), &config).unwrap_err(),
            Error::NotFound
        );
    }

    #[test]
    fn alpha_without_render_is_unsupported() {
        let config = SurfaceConfig::from_attrs(&[SurfaceAttr::BitsAlpha(8)]).unwrap();
        assert_eq!(
            choose_visual(&depths(), None, &config).unwrap_err(),
            Error::Unsupported("RENDER")
        );
    }

    #[test]
    fn finds_visuals_by_id() {
        let pick = find_visual_by_id(&depths(), 30).unwrap();
        assert_eq!(pick.depth, 32);
        assert!(find_visual_by_id(&depths(), 99).is_none());
    }
}

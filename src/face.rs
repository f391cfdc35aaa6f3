#[cfg(not(feature = "std"))]
use core_maths::CoreFloat;

use ttf_parser::{GlyphId, PlatformId};

const WINDOWS_SYMBOL: u16 = 0;

// Subtables in order of preference. Symbol first, see
// https://github.com/harfbuzz/harfbuzz/issues/1918
#[rustfmt::skip]
const CMAP_PREFERENCE: &[(PlatformId, u16)] = &[
    (PlatformId::Windows, WINDOWS_SYMBOL),
    (PlatformId::Windows, 10),
    (PlatformId::Unicode, 6),
    (PlatformId::Unicode, 4),
    (PlatformId::Windows, 1),
    (PlatformId::Unicode, 3),
    (PlatformId::Unicode, 2),
    (PlatformId::Unicode, 1),
    (PlatformId::Unicode, 0),
    (PlatformId::Macintosh, 0),
];

/// The ink box of a glyph, in font units.
///
/// `y_bearing` is the top edge; `height` is negative for fonts with a y-up
/// coordinate system.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
#[repr(C)]
pub struct GlyphExtents {
    /// Left edge of the ink box relative to the glyph origin.
    pub x_bearing: i32,
    /// Top edge of the ink box relative to the glyph origin.
    pub y_bearing: i32,
    /// Ink box width.
    pub width: i32,
    /// Ink box height.
    pub height: i32,
}

unsafe impl bytemuck::Zeroable for GlyphExtents {}
unsafe impl bytemuck::Pod for GlyphExtents {}

/// Glyph metrics queries the fallback passes rely on.
///
/// Implemented by [`Face`] and by anything else able to answer them,
/// e.g. a font backend with its own scaler.
pub trait FontMetrics {
    /// Returns the font's units per EM.
    fn units_per_em(&self) -> i32;

    /// Returns the glyph's ink box, or `None` when the font cannot tell.
    fn glyph_extents(&self, glyph: GlyphId) -> Option<GlyphExtents>;

    /// Returns the horizontal advance.
    fn glyph_h_advance(&self, glyph: GlyphId) -> i32;

    /// Returns the vertical advance. Negative, since vertical text runs downwards.
    fn glyph_v_advance(&self, glyph: GlyphId) -> i32;

    /// Maps a codepoint to its default glyph.
    fn nominal_glyph(&self, c: u32) -> Option<GlyphId>;
}

impl<T: FontMetrics + ?Sized> FontMetrics for &T {
    #[inline]
    fn units_per_em(&self) -> i32 {
        (**self).units_per_em()
    }

    #[inline]
    fn glyph_extents(&self, glyph: GlyphId) -> Option<GlyphExtents> {
        (**self).glyph_extents(glyph)
    }

    #[inline]
    fn glyph_h_advance(&self, glyph: GlyphId) -> i32 {
        (**self).glyph_h_advance(glyph)
    }

    #[inline]
    fn glyph_v_advance(&self, glyph: GlyphId) -> i32 {
        (**self).glyph_v_advance(glyph)
    }

    #[inline]
    fn nominal_glyph(&self, c: u32) -> Option<GlyphId> {
        (**self).nominal_glyph(c)
    }
}

/// A font face handle.
#[derive(Clone)]
pub struct Face<'a> {
    pub(crate) ttfp_face: ttf_parser::Face<'a>,
    units_per_em: u16,
    pixels_per_em: Option<(u16, u16)>,
    cmap_subtable: Option<u16>,
}

impl<'a> AsRef<ttf_parser::Face<'a>> for Face<'a> {
    #[inline]
    fn as_ref(&self) -> &ttf_parser::Face<'a> {
        &self.ttfp_face
    }
}

impl<'a> core::ops::Deref for Face<'a> {
    type Target = ttf_parser::Face<'a>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.ttfp_face
    }
}

impl<'a> core::ops::DerefMut for Face<'a> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.ttfp_face
    }
}

impl<'a> Face<'a> {
    /// Parses a face from raw font data.
    ///
    /// The data is borrowed, not copied.
    pub fn from_slice(data: &'a [u8], face_index: u32) -> Option<Self> {
        let face = ttf_parser::Face::parse(data, face_index).ok()?;
        Some(Self::from_face(face))
    }

    /// Wraps an already parsed [`ttf_parser::Face`].
    pub fn from_face(face: ttf_parser::Face<'a>) -> Self {
        Face {
            units_per_em: face.units_per_em(),
            pixels_per_em: None,
            cmap_subtable: preferred_cmap_subtable(&face),
            ttfp_face: face,
        }
    }

    /// Sets the strike size used for bitmap glyph extents.
    ///
    /// `None` by default, which picks the largest strike.
    #[inline]
    pub fn set_pixels_per_em(&mut self, ppem: Option<(u16, u16)>) {
        self.pixels_per_em = ppem;
    }

    fn cmap_lookup(&self, c: u32) -> Option<GlyphId> {
        let subtable = self.tables().cmap?.subtables.get(self.cmap_subtable?)?;
        match subtable.platform_id {
            PlatformId::Macintosh if c > 0x7F => subtable.glyph_index(unicode_to_macroman(c)),
            // Symbol fonts keep their glyphs at U+F000..U+F0FF, so the
            // Latin-1 range is looked up there too.
            PlatformId::Windows if subtable.encoding_id == WINDOWS_SYMBOL => subtable
                .glyph_index(c)
                .or_else(|| (c <= 0xFF).then(|| subtable.glyph_index(0xF000 + c)).flatten()),
            _ => subtable.glyph_index(c),
        }
    }

    fn variable_bbox_advance(&self, glyph: GlyphId, vertical: bool) -> Option<i32> {
        let face = &self.ttfp_face;
        let tables = face.tables();
        let needs_bbox = face.is_variable()
            && face.has_non_default_variation_coordinates()
            && tables.hvar.is_none()
            && tables.vvar.is_none()
            && face.glyph_phantom_points(glyph).is_none();
        if !needs_bbox {
            return None;
        }

        let advance = face.glyph_bounding_box(glyph).map_or(0, |bbox| {
            if vertical {
                i32::from(bbox.y_max) + i32::from(bbox.y_min)
            } else {
                i32::from(bbox.x_max) + i32::from(bbox.x_min)
            }
        });
        Some(advance)
    }

    fn raster_extents(&self, glyph: GlyphId) -> Option<GlyphExtents> {
        let ppem = self.pixels_per_em.map_or(u16::MAX, |ppem| ppem.0);
        let img = self.ttfp_face.glyph_raster_image(glyph, ppem)?;
        // Only PNG strikes carry usable dimensions.
        if img.format != ttf_parser::RasterImageFormat::PNG {
            return None;
        }

        let scale = f32::from(self.units_per_em) / f32::from(img.pixels_per_em);
        let to_units = |v: f32| (v * scale).round() as i32;
        Some(GlyphExtents {
            x_bearing: to_units(f32::from(img.x)),
            y_bearing: to_units(f32::from(img.y) + f32::from(img.height)),
            width: to_units(f32::from(img.width)),
            height: to_units(-f32::from(img.height)),
        })
    }

    fn outline_extents(&self, glyph: GlyphId) -> Option<GlyphExtents> {
        let bbox = match self.ttfp_face.tables().glyf {
            // No outline data means an empty glyph, not an unknown one.
            Some(glyf) => match glyf.bbox(glyph) {
                Some(bbox) => bbox,
                None => return Some(GlyphExtents::default()),
            },
            None => self.ttfp_face.glyph_bounding_box(glyph)?,
        };

        Some(GlyphExtents {
            x_bearing: i32::from(bbox.x_min),
            y_bearing: i32::from(bbox.y_max),
            width: i32::from(bbox.width()),
            height: i32::from(bbox.y_min) - i32::from(bbox.y_max),
        })
    }
}

impl FontMetrics for Face<'_> {
    #[inline]
    fn units_per_em(&self) -> i32 {
        i32::from(self.units_per_em)
    }

    fn glyph_extents(&self, glyph: GlyphId) -> Option<GlyphExtents> {
        self.raster_extents(glyph)
            .or_else(|| self.outline_extents(glyph))
    }

    fn glyph_h_advance(&self, glyph: GlyphId) -> i32 {
        if let Some(advance) = self.variable_bbox_advance(glyph, false) {
            return advance;
        }

        match self.tables().hmtx {
            Some(_) => self.glyph_hor_advance(glyph).map_or(0, i32::from),
            None => i32::from(self.units_per_em),
        }
    }

    fn glyph_v_advance(&self, glyph: GlyphId) -> i32 {
        let advance = match self.variable_bbox_advance(glyph, true) {
            Some(advance) => advance,
            None => match self.tables().vmtx {
                Some(_) => self.glyph_ver_advance(glyph).map_or(0, i32::from),
                None => i32::from(self.ascender()) - i32::from(self.descender()),
            },
        };
        -advance
    }

    #[inline]
    fn nominal_glyph(&self, c: u32) -> Option<GlyphId> {
        self.cmap_lookup(c)
    }
}

fn preferred_cmap_subtable(face: &ttf_parser::Face) -> Option<u16> {
    let subtables = face.tables().cmap?.subtables;
    CMAP_PREFERENCE.iter().find_map(|&(platform, encoding)| {
        subtables
            .into_iter()
            .position(|s| s.platform_id == platform && s.encoding_id == encoding)
            .and_then(|idx| u16::try_from(idx).ok())
    })
}

// Unicode values of the upper half of MacRoman, in code order.
#[rustfmt::skip]
static MACROMAN_HIGH: &[u16] = &[
    0x00C4, 0x00C5, 0x00C7, 0x00C9, 0x00D1, 0x00D6, 0x00DC, 0x00E1,
    0x00E0, 0x00E2, 0x00E4, 0x00E3, 0x00E5, 0x00E7, 0x00E9, 0x00E8,
    0x00EA, 0x00EB, 0x00ED, 0x00EC, 0x00EE, 0x00EF, 0x00F1, 0x00F3,
    0x00F2, 0x00F4, 0x00F6, 0x00F5, 0x00FA, 0x00F9, 0x00FB, 0x00FC,
    0x2020, 0x00B0, 0x00A2, 0x00A3, 0x00A7, 0x2022, 0x00B6, 0x00DF,
    0x00AE, 0x00A9, 0x2122, 0x00B4, 0x00A8, 0x2260, 0x00C6, 0x00D8,
    0x221E, 0x00B1, 0x2264, 0x2265, 0x00A5, 0x00B5, 0x2202, 0x2211,
    0x220F, 0x03C0, 0x222B, 0x00AA, 0x00BA, 0x03A9, 0x00E6, 0x00F8,
    0x00BF, 0x00A1, 0x00AC, 0x221A, 0x0192, 0x2248, 0x2206, 0x00AB,
    0x00BB, 0x2026, 0x00A0, 0x00C0, 0x00C3, 0x00D5, 0x0152, 0x0153,
    0x2013, 0x2014, 0x201C, 0x201D, 0x2018, 0x2019, 0x00F7, 0x25CA,
    0x00FF, 0x0178, 0x2044, 0x20AC, 0x2039, 0x203A, 0xFB01, 0xFB02,
    0x2021, 0x00B7, 0x201A, 0x201E, 0x2030, 0x00C2, 0x00CA, 0x00C1,
    0x00CB, 0x00C8, 0x00CD, 0x00CE, 0x00CF, 0x00CC, 0x00D3, 0x00D4,
    0xF8FF, 0x00D2, 0x00DA, 0x00DB, 0x00D9, 0x0131, 0x02C6, 0x02DC,
    0x00AF, 0x02D8, 0x02D9, 0x02DA, 0x00B8, 0x02DD, 0x02DB, 0x02C7,
];

// Returns 0 for anything MacRoman cannot encode.
fn unicode_to_macroman(c: u32) -> u32 {
    u16::try_from(c)
        .ok()
        .and_then(|u| MACROMAN_HIGH.iter().position(|m| *m == u))
        .map_or(0, |idx| 0x7F + idx as u32)
}

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use bitflags::bitflags;
use ttf_parser::GlyphId;

use crate::common::{script, script_from_char};
use crate::unicode::{CharExt, GeneralCategory, GeneralCategoryExt, Space};
use crate::{Direction, Script};

/// Holds the positions of the glyph in both horizontal and vertical directions.
///
/// All positions are relative to the current point.
#[repr(C)]
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct GlyphPosition {
    /// How much the line advances after drawing this glyph when setting text in
    /// horizontal direction.
    pub x_advance: i32,
    /// How much the line advances after drawing this glyph when setting text in
    /// vertical direction.
    pub y_advance: i32,
    /// How much the glyph moves on the X-axis before drawing it, this should not
    /// affect how much the line advances.
    pub x_offset: i32,
    /// How much the glyph moves on the Y-axis before drawing it, this should
    /// not affect how much the line advances.
    pub y_offset: i32,
}

unsafe impl bytemuck::Zeroable for GlyphPosition {}
unsafe impl bytemuck::Pod for GlyphPosition {}

bitflags! {
    /// Flags a positioning pass leaves on a glyph.
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
    pub struct GlyphFlags: u32 {
        /// Breaking the text before this glyph and shaping both halves
        /// separately would give a different result.
        const UNSAFE_TO_BREAK = 0x00000001;
        /// Concatenating the text around this glyph from separately shaped
        /// runs would give a different result.
        const UNSAFE_TO_CONCAT = 0x00000002;
    }
}

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
    pub(crate) struct UnicodeProps: u16 {
        const GENERAL_CATEGORY  = 0x001F;
    }
}

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
    pub(crate) struct GlyphPropsFlags: u16 {
        // Matches the GDEF ligature class.
        const LIGATURE      = 0x04;
        // Set on every glyph a ligature substitution produced.
        const LIGATED       = 0x20;
    }
}

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
    pub(crate) struct BufferScratchFlags: u32 {
        const HAS_SPACE_FALLBACK    = 0x00000001;
        const HAS_UNSAFE_TO_BREAK   = 0x00000002;
    }
}

/// A glyph info.
///
/// Carries the codepoint a glyph was produced from together with the
/// Unicode and ligature properties the positioning passes consult.
#[derive(Clone, Copy, Default, Debug)]
pub struct GlyphInfo {
    /// Unicode codepoint.
    pub codepoint: u32,
    /// Glyph id, valid after glyph mapping.
    pub glyph_id: u32,
    /// Codepoint cluster.
    pub cluster: u32,
    mask: u32,
    // High byte holds the modified combining class for marks
    // and the space fallback type for spaces.
    unicode_props: u16,
    lig_props: u8,
    glyph_props: u16,
}

impl GlyphInfo {
    const IS_LIG_BASE: u8 = 0x10;

    /// Creates a new glyph info for a character, with its Unicode properties set.
    pub fn new(c: char, cluster: u32) -> Self {
        let mut info = GlyphInfo {
            codepoint: c as u32,
            cluster,
            ..GlyphInfo::default()
        };
        info.init_unicode_props(c);
        info
    }

    fn init_unicode_props(&mut self, c: char) {
        let gen_cat = c.general_category();
        let mut props = gen_cat.to_rb() as u16;

        if gen_cat.is_mark() {
            props |= u16::from(c.modified_combining_class()) << 8;
        }

        self.unicode_props = props;
    }

    #[inline]
    pub(crate) fn as_glyph(&self) -> GlyphId {
        debug_assert!(self.glyph_id <= u32::from(u16::MAX));
        GlyphId(self.glyph_id as u16)
    }

    /// Returns the Unicode general category of the glyph's codepoint.
    #[inline]
    pub fn general_category(&self) -> GeneralCategory {
        let n = self.unicode_props & UnicodeProps::GENERAL_CATEGORY.bits();
        GeneralCategory::from_rb(u32::from(n))
    }

    /// Checks that the glyph comes from a mark character (Mn, Mc or Me).
    #[inline]
    pub fn is_unicode_mark(&self) -> bool {
        self.general_category().is_mark()
    }

    /// Checks that the glyph comes from a space separator (Zs).
    #[inline]
    pub fn is_unicode_space(&self) -> bool {
        self.general_category() == GeneralCategory::SpaceSeparator
    }

    /// Returns the modified combining class.
    ///
    /// Always zero for glyphs that are not marks.
    #[inline]
    pub fn modified_combining_class(&self) -> u8 {
        if self.is_unicode_mark() {
            (self.unicode_props >> 8) as u8
        } else {
            0
        }
    }

    /// Sets the modified combining class.
    ///
    /// Has no effect on glyphs that are not marks.
    #[inline]
    pub fn set_modified_combining_class(&mut self, modified_class: u8) {
        if !self.is_unicode_mark() {
            return;
        }

        self.unicode_props = (u16::from(modified_class) << 8) | (self.unicode_props & 0xFF);
    }

    /// Returns how a space glyph wants its advance to be synthesized.
    #[inline]
    pub fn space_fallback(&self) -> Space {
        if self.is_unicode_space() {
            Space::from_u8((self.unicode_props >> 8) as u8)
        } else {
            Space::NotSpace
        }
    }

    /// Sets the space fallback type.
    ///
    /// Has no effect on glyphs that are not spaces.
    #[inline]
    pub fn set_space_fallback(&mut self, space: Space) {
        if !self.is_unicode_space() {
            return;
        }

        self.unicode_props = (u16::from(space as u8) << 8) | (self.unicode_props & 0xFF);
    }

    /// Marks the glyph as the product of a ligature with `lig_num_comps` components.
    #[inline]
    pub fn set_lig_props_for_ligature(&mut self, lig_id: u8, lig_num_comps: u8) {
        self.lig_props = (lig_id << 5) | Self::IS_LIG_BASE | (lig_num_comps & 0x0F);
        self.glyph_props |= (GlyphPropsFlags::LIGATURE | GlyphPropsFlags::LIGATED).bits();
    }

    /// Attaches a mark to a ligature component.
    ///
    /// Components are 1-based; zero means the mark belongs to no particular component.
    #[inline]
    pub fn set_lig_props_for_mark(&mut self, lig_id: u8, lig_comp: u8) {
        self.lig_props = (lig_id << 5) | (lig_comp & 0x0F);
    }

    /// Returns the ligature id. Zero means none.
    #[inline]
    pub fn lig_id(&self) -> u8 {
        self.lig_props >> 5
    }

    #[inline]
    fn ligated_internal(&self) -> bool {
        self.lig_props & Self::IS_LIG_BASE != 0
    }

    /// Returns the 1-based ligature component a mark is attached to.
    #[inline]
    pub fn lig_comp(&self) -> u8 {
        if self.ligated_internal() {
            0
        } else {
            self.lig_props & 0x0F
        }
    }

    /// Returns the number of components of a ligature glyph, or 1.
    #[inline]
    pub fn lig_num_comps(&self) -> u8 {
        if self.glyph_props & GlyphPropsFlags::LIGATURE.bits() != 0 && self.ligated_internal() {
            self.lig_props & 0x0F
        } else {
            1
        }
    }

    /// Checks that the glyph was produced by a ligature substitution.
    #[inline]
    pub fn is_ligated(&self) -> bool {
        self.glyph_props & GlyphPropsFlags::LIGATED.bits() != 0
    }

    /// Sets or clears the ligated flag.
    #[inline]
    pub fn set_ligated(&mut self, ligated: bool) {
        if ligated {
            self.glyph_props |= GlyphPropsFlags::LIGATED.bits();
        } else {
            self.glyph_props &= !GlyphPropsFlags::LIGATED.bits();
        }
    }

    /// Returns the flags a positioning pass left on this glyph.
    #[inline]
    pub fn glyph_flags(&self) -> GlyphFlags {
        GlyphFlags::from_bits_truncate(self.mask)
    }

    /// Checks that breaking the text before this glyph is unsafe.
    #[inline]
    pub fn unsafe_to_break(&self) -> bool {
        self.glyph_flags().contains(GlyphFlags::UNSAFE_TO_BREAK)
    }
}

bitflags! {
    /// Flags used for serialization with [`Buffer::serialize`].
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
    pub struct SerializeFlags: u8 {
        /// Do not serialize glyph cluster.
        const NO_CLUSTERS = 0b0000_0001;
        /// Do not serialize glyph position information.
        const NO_POSITIONS = 0b0000_0010;
        /// Serialize glyph flags.
        const GLYPH_FLAGS = 0b0000_0100;
        /// Do not serialize glyph advances, glyph offsets will reflect absolute
        /// glyph positions.
        const NO_ADVANCES = 0b0000_1000;
    }
}

/// A buffer of glyphs together with the run properties positioning depends on.
#[derive(Clone, Default, Debug)]
pub struct Buffer {
    pub(crate) info: Vec<GlyphInfo>,
    pub(crate) pos: Vec<GlyphPosition>,
    pub(crate) direction: Direction,
    pub(crate) script: Option<Script>,
    pub(crate) scratch_flags: BufferScratchFlags,
}

impl Buffer {
    /// Creates a new empty `Buffer`.
    pub fn new() -> Self {
        Buffer::default()
    }

    /// Returns the number of glyphs in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.info.len()
    }

    /// Checks that the buffer contains no glyphs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.info.is_empty()
    }

    /// Appends a character with the given cluster.
    pub fn push(&mut self, c: char, cluster: u32) {
        self.info.push(GlyphInfo::new(c, cluster));
        self.pos.push(GlyphPosition::default());
    }

    /// Appends a string. Clusters are UTF-8 byte offsets.
    pub fn push_str(&mut self, text: &str) {
        self.info.reserve(text.len());
        self.pos.reserve(text.len());

        for (i, c) in text.char_indices() {
            self.push(c, i as u32);
        }
    }

    /// Sets the text direction.
    #[inline]
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Returns the text direction.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Sets the script.
    #[inline]
    pub fn set_script(&mut self, script: Script) {
        self.script = Some(script);
    }

    /// Returns the script, if set.
    #[inline]
    pub fn script(&self) -> Option<Script> {
        self.script
    }

    /// Guesses the script and the direction from the buffer contents,
    /// keeping whatever was set explicitly.
    pub fn guess_segment_properties(&mut self) {
        if self.script.is_none() {
            for info in &self.info {
                let Some(c) = char::from_u32(info.codepoint) else {
                    continue;
                };

                let s = script_from_char(c);
                if s != script::COMMON && s != script::INHERITED && s != script::UNKNOWN {
                    self.script = Some(s);
                    break;
                }
            }
        }

        if self.direction == Direction::Invalid {
            self.direction = self
                .script
                .and_then(Direction::from_script)
                .unwrap_or_default();

            if self.direction == Direction::Invalid {
                self.direction = Direction::LeftToRight;
            }
        }
    }

    /// Returns the glyph infos.
    #[inline]
    pub fn glyph_infos(&self) -> &[GlyphInfo] {
        &self.info
    }

    /// Returns the glyph infos for modification.
    #[inline]
    pub fn glyph_infos_mut(&mut self) -> &mut [GlyphInfo] {
        &mut self.info
    }

    /// Returns the glyph positions.
    #[inline]
    pub fn glyph_positions(&self) -> &[GlyphPosition] {
        &self.pos
    }

    /// Returns the glyph positions for modification.
    #[inline]
    pub fn glyph_positions_mut(&mut self) -> &mut [GlyphPosition] {
        &mut self.pos
    }

    /// Resets all advances and offsets to zero.
    pub fn clear_positions(&mut self) {
        self.pos.fill(bytemuck::Zeroable::zeroed());
    }

    /// Removes all glyphs, keeping the allocation and the run properties.
    pub fn clear(&mut self) {
        self.info.clear();
        self.pos.clear();
        self.scratch_flags = BufferScratchFlags::empty();
    }

    /// Marks the `start..end` range as unsafe to break.
    ///
    /// Glyphs that share the lowest cluster of the range are left alone,
    /// since breaking in front of them never splits a cluster.
    pub fn unsafe_to_break(&mut self, start: usize, end: usize) {
        let end = end.min(self.info.len());
        if end.saturating_sub(start) < 2 {
            return;
        }

        let Some(cluster) = self.info[start..end].iter().map(|info| info.cluster).min() else {
            return;
        };

        let flags = (GlyphFlags::UNSAFE_TO_BREAK | GlyphFlags::UNSAFE_TO_CONCAT).bits();
        for info in &mut self.info[start..end] {
            if info.cluster != cluster {
                self.scratch_flags |= BufferScratchFlags::HAS_UNSAFE_TO_BREAK;
                info.mask |= flags;
            }
        }
    }

    /// Converts the buffer content into the `gid=cluster@x,y+advance` text format.
    pub fn serialize(&self, flags: SerializeFlags) -> String {
        let mut s = String::with_capacity(64);

        let mut x = 0;
        let mut y = 0;
        for (i, (info, pos)) in self.info.iter().zip(&self.pos).enumerate() {
            if i > 0 {
                s.push('|');
            }

            let _ = write!(&mut s, "{}", info.glyph_id);

            if !flags.contains(SerializeFlags::NO_CLUSTERS) {
                let _ = write!(&mut s, "={}", info.cluster);
            }

            if !flags.contains(SerializeFlags::NO_POSITIONS) {
                if x + pos.x_offset != 0 || y + pos.y_offset != 0 {
                    let _ = write!(&mut s, "@{},{}", x + pos.x_offset, y + pos.y_offset);
                }

                if !flags.contains(SerializeFlags::NO_ADVANCES) {
                    let _ = write!(&mut s, "+{}", pos.x_advance);
                    if pos.y_advance != 0 {
                        let _ = write!(&mut s, ",{}", pos.y_advance);
                    }
                }
            }

            if flags.contains(SerializeFlags::GLYPH_FLAGS) && info.mask != 0 {
                let _ = write!(&mut s, "#{:X}", info.glyph_flags().bits());
            }

            if flags.contains(SerializeFlags::NO_ADVANCES) {
                x += pos.x_advance;
                y += pos.y_advance;
            }
        }

        s
    }

    #[inline]
    pub(crate) fn has_space_fallback(&self) -> bool {
        self.scratch_flags.contains(BufferScratchFlags::HAS_SPACE_FALLBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_carry_modified_combining_class() {
        let info = GlyphInfo::new('\u{0301}', 0);
        assert!(info.is_unicode_mark());
        assert_eq!(info.modified_combining_class(), 230);

        let info = GlyphInfo::new('a', 0);
        assert!(!info.is_unicode_mark());
        assert_eq!(info.modified_combining_class(), 0);
    }

    #[test]
    fn non_marks_ignore_combining_class_writes() {
        let mut info = GlyphInfo::new('a', 0);
        info.set_modified_combining_class(230);
        assert_eq!(info.modified_combining_class(), 0);
        assert_eq!(info.general_category(), GeneralCategory::LowercaseLetter);
    }

    #[test]
    fn space_fallback_only_sticks_to_spaces() {
        let mut info = GlyphInfo::new('\u{2003}', 0);
        assert_eq!(info.space_fallback(), Space::NotSpace);
        info.set_space_fallback(Space::SpaceEm);
        assert_eq!(info.space_fallback(), Space::SpaceEm);
        assert_eq!(info.general_category(), GeneralCategory::SpaceSeparator);

        let mut info = GlyphInfo::new('x', 0);
        info.set_space_fallback(Space::SpaceEm);
        assert_eq!(info.space_fallback(), Space::NotSpace);
    }

    #[test]
    fn ligature_props() {
        let mut lig = GlyphInfo::new('f', 0);
        lig.set_lig_props_for_ligature(3, 2);
        assert_eq!(lig.lig_id(), 3);
        assert_eq!(lig.lig_num_comps(), 2);
        assert_eq!(lig.lig_comp(), 0);
        assert!(lig.is_ligated());

        let mut mark = GlyphInfo::new('\u{0301}', 1);
        mark.set_lig_props_for_mark(3, 2);
        assert_eq!(mark.lig_id(), 3);
        assert_eq!(mark.lig_comp(), 2);
        assert_eq!(mark.lig_num_comps(), 1);
        assert!(!mark.is_ligated());
    }

    #[test]
    fn unsafe_to_break_skips_lowest_cluster() {
        let mut buffer = Buffer::new();
        buffer.push_str("a\u{0301}b");
        buffer.unsafe_to_break(0, 2);

        let infos = buffer.glyph_infos();
        assert!(!infos[0].unsafe_to_break());
        assert!(infos[1].unsafe_to_break());
        assert!(!infos[2].unsafe_to_break());
        assert!(buffer.scratch_flags.contains(BufferScratchFlags::HAS_UNSAFE_TO_BREAK));
    }

    #[test]
    fn unsafe_to_break_out_of_range_is_clamped() {
        let mut buffer = Buffer::new();
        buffer.push_str("ab");
        buffer.unsafe_to_break(0, 10);
        assert!(buffer.glyph_infos()[1].unsafe_to_break());
        buffer.unsafe_to_break(5, 10);
    }

    #[test]
    fn guess_properties() {
        let mut buffer = Buffer::new();
        buffer.push_str(" \u{05D0}\u{05B8}");
        buffer.guess_segment_properties();
        assert_eq!(buffer.script(), Some(script::HEBREW));
        assert_eq!(buffer.direction(), Direction::RightToLeft);

        let mut buffer = Buffer::new();
        buffer.push_str("123");
        buffer.guess_segment_properties();
        assert_eq!(buffer.script(), None);
        assert_eq!(buffer.direction(), Direction::LeftToRight);
    }

    #[test]
    fn serialize_text_format() {
        let mut buffer = Buffer::new();
        buffer.push_str("ab");
        buffer.info[0].glyph_id = 5;
        buffer.info[1].glyph_id = 7;
        buffer.pos[0].x_advance = 500;
        buffer.pos[1].x_offset = -20;
        buffer.pos[1].y_offset = 30;
        buffer.pos[1].y_advance = -1000;

        assert_eq!(buffer.serialize(SerializeFlags::default()), "5=0+500|7=1@-20,30+0,-1000");
        assert_eq!(buffer.serialize(SerializeFlags::NO_CLUSTERS), "5+500|7@-20,30+0,-1000");
        assert_eq!(
            buffer.serialize(SerializeFlags::NO_ADVANCES | SerializeFlags::NO_CLUSTERS),
            "5|7@480,30"
        );
    }

    #[test]
    fn clear_positions_zeroes_everything() {
        let mut buffer = Buffer::new();
        buffer.push_str("ab");
        buffer.pos[0].x_advance = 10;
        buffer.pos[1].y_offset = 10;
        buffer.clear_positions();
        assert!(buffer.glyph_positions().iter().all(|p| *p == GlyphPosition::default()));
    }
}

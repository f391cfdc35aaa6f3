//! Mark and space positioning for fonts that do not position them.

mod marks;
mod recategorize;
mod spaces;

pub use marks::{placement_class, position_marks};
pub use recategorize::{recategorize_combining_class, recategorize_marks};
pub use spaces::adjust_spaces;

#[cfg(test)]
pub(crate) mod test_font {
    use alloc::vec::Vec;

    use crate::face::{FontMetrics, GlyphExtents};
    use crate::GlyphId;

    /// An in-memory font. Glyph ids start at 1, in insertion order.
    pub struct TestFont {
        upem: i32,
        glyphs: Vec<(char, i32, Option<GlyphExtents>)>,
    }

    impl TestFont {
        pub fn new(upem: i32) -> Self {
            TestFont {
                upem,
                glyphs: Vec::new(),
            }
        }

        pub fn glyph(mut self, c: char, advance: i32, extents: Option<GlyphExtents>) -> Self {
            self.glyphs.push((c, advance, extents));
            self
        }

        pub fn glyph_for(&self, c: u32) -> u32 {
            self.nominal_glyph(c).map_or(0, |g| u32::from(g.0))
        }

        fn get(&self, glyph: GlyphId) -> Option<&(char, i32, Option<GlyphExtents>)> {
            self.glyphs.get(usize::from(glyph.0).checked_sub(1)?)
        }
    }

    impl FontMetrics for TestFont {
        fn units_per_em(&self) -> i32 {
            self.upem
        }

        fn glyph_extents(&self, glyph: GlyphId) -> Option<GlyphExtents> {
            self.get(glyph)?.2
        }

        fn glyph_h_advance(&self, glyph: GlyphId) -> i32 {
            self.get(glyph).map_or(0, |g| g.1)
        }

        fn glyph_v_advance(&self, _: GlyphId) -> i32 {
            -self.upem
        }

        fn nominal_glyph(&self, c: u32) -> Option<GlyphId> {
            let idx = self.glyphs.iter().position(|g| g.0 as u32 == c)?;
            Some(GlyphId(idx as u16 + 1))
        }
    }
}

use crate::buffer::{Buffer, BufferScratchFlags};
use crate::face::FontMetrics;
use crate::fallback;
use crate::plan::FallbackPlan;
use crate::unicode::{CharExt, Space};
use crate::Direction;

/// Maps every codepoint in the buffer to its nominal glyph.
///
/// Space characters missing from the font borrow the U+0020 glyph and
/// remember what kind of space they were, so [`position`] can give them a
/// proper width later. Anything else the font lacks becomes glyph 0.
pub fn map_glyphs<F: FontMetrics + ?Sized>(font: &F, buffer: &mut Buffer) {
    let space_glyph = font.nominal_glyph(0x0020);

    for info in &mut buffer.info {
        if let Some(glyph) = font.nominal_glyph(info.codepoint) {
            info.glyph_id = u32::from(glyph.0);
            continue;
        }

        info.glyph_id = 0;

        if !info.is_unicode_space() {
            continue;
        }

        let space_type = char::from_u32(info.codepoint).map_or(Space::NotSpace, |c| c.space_fallback());
        if space_type == Space::NotSpace {
            continue;
        }

        if let Some(space_glyph) = space_glyph {
            info.set_space_fallback(space_type);
            info.glyph_id = u32::from(space_glyph.0);
            buffer.scratch_flags |= BufferScratchFlags::HAS_SPACE_FALLBACK;
        }
    }
}

/// Fills glyph advances from the font, resetting all offsets.
pub fn position_default<F: FontMetrics + ?Sized>(font: &F, buffer: &mut Buffer) {
    buffer.clear_positions();

    let horizontal = buffer.direction.is_horizontal();
    for (info, pos) in buffer.info.iter().zip(&mut buffer.pos) {
        if horizontal {
            pos.x_advance = font.glyph_h_advance(info.as_glyph());
        } else {
            pos.y_advance = font.glyph_v_advance(info.as_glyph());
        }
    }
}

/// Runs the fallback passes the plan asks for.
///
/// Expects glyphs to be mapped and advances to be set, see [`map_glyphs`]
/// and [`position_default`].
pub fn position<F: FontMetrics + ?Sized>(font: &F, plan: &FallbackPlan, buffer: &mut Buffer) {
    if buffer.direction == Direction::Invalid {
        buffer.guess_segment_properties();
        log::debug!("no direction set, guessed {:?}", buffer.direction);
    }

    if plan.fallback_mark_positioning {
        let adjust_offsets_when_zeroing =
            plan.adjust_mark_positioning_when_zeroing && buffer.direction.is_forward();

        fallback::recategorize_marks(buffer);
        fallback::position_marks(font, buffer, adjust_offsets_when_zeroing);
    }

    if plan.fallback_spaces && buffer.has_space_fallback() {
        fallback::adjust_spaces(font, buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::SerializeFlags;
    use crate::face::GlyphExtents;
    use crate::fallback::test_font::TestFont;

    fn font() -> TestFont {
        let ext = GlyphExtents {
            x_bearing: 0,
            y_bearing: 600,
            width: 400,
            height: -600,
        };

        TestFont::new(1000)
            .glyph(' ', 250, None)
            .glyph('a', 500, Some(ext))
            .glyph('\u{0301}', 0, Some(GlyphExtents {
                x_bearing: 0,
                y_bearing: 700,
                width: 100,
                height: -100,
            }))
    }

    #[test]
    fn missing_spaces_borrow_the_space_glyph() {
        let font = font();
        let mut buffer = Buffer::new();
        buffer.push_str("a\u{2003}\u{1680}b");
        map_glyphs(&font, &mut buffer);

        let infos = buffer.glyph_infos();
        assert_eq!(infos[1].glyph_id, 1);
        assert_eq!(infos[1].space_fallback(), Space::SpaceEm);
        // Ogham space mark has no fallback.
        assert_eq!(infos[2].glyph_id, 0);
        assert_eq!(infos[3].glyph_id, 0);
        assert!(buffer.has_space_fallback());
    }

    #[test]
    fn no_space_glyph_no_fallback() {
        let font = TestFont::new(1000);
        let mut buffer = Buffer::new();
        buffer.push_str("\u{2003}");
        map_glyphs(&font, &mut buffer);
        assert_eq!(buffer.glyph_infos()[0].space_fallback(), Space::NotSpace);
        assert!(!buffer.has_space_fallback());
    }

    #[test]
    fn default_advances() {
        let font = font();
        let mut buffer = Buffer::new();
        buffer.push_str("a a");
        buffer.set_direction(Direction::LeftToRight);
        map_glyphs(&font, &mut buffer);
        position_default(&font, &mut buffer);
        assert_eq!(buffer.serialize(SerializeFlags::default()), "2=0+500|1=1+250|2=2+500");

        buffer.set_direction(Direction::TopToBottom);
        position_default(&font, &mut buffer);
        assert_eq!(
            buffer.serialize(SerializeFlags::default()),
            "2=0+0,-1000|1=1+0,-1000|2=2+0,-1000"
        );
    }

    #[test]
    fn full_pipeline() {
        let font = font();
        let mut buffer = Buffer::new();
        buffer.push_str("a\u{0301}\u{2003}");
        buffer.guess_segment_properties();
        map_glyphs(&font, &mut buffer);
        position_default(&font, &mut buffer);
        position(&font, &FallbackPlan::for_buffer(&buffer), &mut buffer);

        assert_eq!(
            buffer.serialize(SerializeFlags::default()),
            "2=0+500|3=1@-300,62+0|1=3+1000"
        );
    }

    #[test]
    fn disabled_passes() {
        let font = font();
        let mut buffer = Buffer::new();
        buffer.push_str("a\u{0301}\u{2003}");
        buffer.guess_segment_properties();
        map_glyphs(&font, &mut buffer);
        position_default(&font, &mut buffer);

        let plan = FallbackPlan::default()
            .with_fallback_mark_positioning(false)
            .with_fallback_spaces(false);
        position(&font, &plan, &mut buffer);

        assert_eq!(buffer.serialize(SerializeFlags::default()), "2=0+500|3=1+0|1=3+250");
    }
}

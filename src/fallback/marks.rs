use crate::buffer::{Buffer, GlyphInfo, GlyphPosition};
use crate::face::{FontMetrics, GlyphExtents};
use crate::unicode::{CanonicalCombiningClass, GeneralCategory};
use crate::{Direction, GlyphId};

/// Returns the placement a combining class stands for.
///
/// Only the positional classes (200 and up) have one.
pub fn placement_class(class: u8) -> Option<CanonicalCombiningClass> {
    use CanonicalCombiningClass as Class;

    Some(match class {
        200 => Class::AttachedBelowLeft,
        202 => Class::AttachedBelow,
        214 => Class::AttachedAbove,
        216 => Class::AttachedAboveRight,
        218 => Class::BelowLeft,
        220 => Class::Below,
        222 => Class::BelowRight,
        224 => Class::Left,
        226 => Class::Right,
        228 => Class::AboveLeft,
        230 => Class::Above,
        232 => Class::AboveRight,
        233 => Class::DoubleBelow,
        234 => Class::DoubleAbove,
        _ => return None,
    })
}

fn zero_mark_advances(
    buffer: &mut Buffer,
    start: usize,
    end: usize,
    adjust_offsets_when_zeroing: bool,
) {
    for (info, pos) in buffer.info[start..end]
        .iter()
        .zip(&mut buffer.pos[start..end])
    {
        if info.general_category() == GeneralCategory::NonspacingMark {
            if adjust_offsets_when_zeroing {
                pos.x_offset -= pos.x_advance;
                pos.y_offset -= pos.y_advance;
            }
            pos.x_advance = 0;
            pos.y_advance = 0;
        }
    }
}

fn position_mark<F: FontMetrics + ?Sized>(
    font: &F,
    direction: Direction,
    glyph: GlyphId,
    pos: &mut GlyphPosition,
    base_extents: &mut GlyphExtents,
    placement: Option<CanonicalCombiningClass>,
) {
    use CanonicalCombiningClass as Class;

    let Some(mark_extents) = font.glyph_extents(glyph) else {
        return;
    };

    let y_gap = font.units_per_em() / 16;
    pos.x_offset = 0;
    pos.y_offset = 0;

    // We don't position LEFT and RIGHT marks.

    // X positioning
    match placement {
        Some(Class::DoubleBelow | Class::DoubleAbove) if direction.is_horizontal() => {
            pos.x_offset += base_extents.x_bearing
                + if direction.is_forward() {
                    base_extents.width
                } else {
                    0
                }
                - mark_extents.width / 2
                - mark_extents.x_bearing;
        }

        Some(Class::AttachedBelowLeft | Class::BelowLeft | Class::AboveLeft) => {
            // Left align.
            pos.x_offset += base_extents.x_bearing - mark_extents.x_bearing;
        }

        Some(Class::AttachedAboveRight | Class::BelowRight | Class::AboveRight) => {
            // Right align.
            pos.x_offset += base_extents.x_bearing + base_extents.width
                - mark_extents.width
                - mark_extents.x_bearing;
        }

        _ => {
            // Center align.
            pos.x_offset += base_extents.x_bearing + (base_extents.width - mark_extents.width) / 2
                - mark_extents.x_bearing;
        }
    }

    let is_attached = matches!(
        placement,
        Some(
            Class::AttachedBelowLeft
                | Class::AttachedBelow
                | Class::AttachedAbove
                | Class::AttachedAboveRight
        )
    );

    // Y positioning.
    match placement {
        Some(
            Class::DoubleBelow
            | Class::BelowLeft
            | Class::Below
            | Class::BelowRight
            | Class::AttachedBelowLeft
            | Class::AttachedBelow,
        ) => {
            if !is_attached {
                // Add gap.
                base_extents.height -= y_gap;
            }

            pos.y_offset = base_extents.y_bearing + base_extents.height - mark_extents.y_bearing;

            // Never shift up "below" marks.
            if (y_gap > 0) == (pos.y_offset > 0) {
                base_extents.height -= pos.y_offset;
                pos.y_offset = 0;
            }

            base_extents.height += mark_extents.height;
        }

        Some(
            Class::DoubleAbove
            | Class::AboveLeft
            | Class::Above
            | Class::AboveRight
            | Class::AttachedAbove
            | Class::AttachedAboveRight,
        ) => {
            if !is_attached {
                // Add gap.
                base_extents.y_bearing += y_gap;
                base_extents.height -= y_gap;
            }

            pos.y_offset = base_extents.y_bearing - (mark_extents.y_bearing + mark_extents.height);

            // Don't shift down "above" marks too much.
            if (y_gap > 0) != (pos.y_offset > 0) {
                let correction = -pos.y_offset / 2;
                base_extents.y_bearing += correction;
                base_extents.height -= correction;
                pos.y_offset += correction;
            }

            base_extents.y_bearing -= mark_extents.height;
            base_extents.height += mark_extents.height;
        }

        _ => {}
    }
}

/// Returns the zero-based ligature component a mark belongs to.
///
/// Marks of another ligature, marks of no particular component and
/// out-of-range components all go to the last component.
pub(crate) fn resolve_lig_component(base: &GlyphInfo, mark: &GlyphInfo, num_components: i32) -> i32 {
    let lig_id = base.lig_id();
    let component = i32::from(mark.lig_comp()) - 1;

    // Conditions for attaching to the last component.
    if lig_id == 0
        || lig_id != mark.lig_id()
        || component < 0
        || component >= num_components
    {
        num_components - 1
    } else {
        component
    }
}

fn horizontal_direction(buffer: &Buffer) -> Direction {
    if buffer.direction.is_horizontal() {
        buffer.direction
    } else {
        buffer
            .script
            .and_then(Direction::from_script)
            .unwrap_or(Direction::LeftToRight)
    }
}

fn position_around_base<F: FontMetrics + ?Sized>(
    font: &F,
    buffer: &mut Buffer,
    base: usize,
    end: usize,
    adjust_offsets_when_zeroing: bool,
) {
    buffer.unsafe_to_break(base, end);

    let base_info = buffer.info[base];
    let base_pos = buffer.pos[base];
    let base_glyph = base_info.as_glyph();

    let Some(mut base_extents) = font.glyph_extents(base_glyph) else {
        log::debug!(
            "glyph {} has no extents, zeroing {} mark advances",
            base_glyph.0,
            end - base - 1
        );
        zero_mark_advances(buffer, base + 1, end, adjust_offsets_when_zeroing);
        return;
    };

    base_extents.y_bearing += base_pos.y_offset;
    base_extents.x_bearing = 0;

    // Use horizontal advance for horizontal positioning.
    // Generally a better idea. Also works for zero-ink glyphs. See:
    // https://github.com/harfbuzz/harfbuzz/issues/1532
    base_extents.width = font.glyph_h_advance(base_glyph);

    let num_lig_components = i32::from(base_info.lig_num_comps());
    let direction = buffer.direction;
    let mut horizontal_dir = Direction::Invalid;

    log::trace!(
        "positioning {} marks around glyph {} ({} components)",
        end - base - 1,
        base_glyph.0,
        num_lig_components
    );

    let mut x_offset = 0;
    let mut y_offset = 0;
    if direction.is_forward() {
        x_offset -= base_pos.x_advance;
        y_offset -= base_pos.y_advance;
    }

    let mut last_lig_component: i32 = -1;
    let mut last_combining_class: u8 = 255;
    let mut component_extents = base_extents;
    let mut cluster_extents = base_extents;

    for i in base + 1..end {
        let info = buffer.info[i];
        let this_combining_class = info.modified_combining_class();

        if this_combining_class == 0 {
            let pos = &buffer.pos[i];
            if direction.is_forward() {
                x_offset -= pos.x_advance;
                y_offset -= pos.y_advance;
            } else {
                x_offset += pos.x_advance;
                y_offset += pos.y_advance;
            }
            continue;
        }

        if num_lig_components > 1 {
            let this_lig_component = resolve_lig_component(&base_info, &info, num_lig_components);

            if last_lig_component != this_lig_component {
                last_lig_component = this_lig_component;
                last_combining_class = 255;
                component_extents = base_extents;

                if horizontal_dir == Direction::Invalid {
                    horizontal_dir = horizontal_direction(buffer);
                }

                component_extents.x_bearing += (if horizontal_dir == Direction::LeftToRight {
                    this_lig_component
                } else {
                    num_lig_components - 1 - this_lig_component
                } * component_extents.width)
                    / num_lig_components;

                component_extents.width /= num_lig_components;
            }
        }

        if last_combining_class != this_combining_class {
            last_combining_class = this_combining_class;
            cluster_extents = component_extents;
        }

        let pos = &mut buffer.pos[i];
        position_mark(
            font,
            direction,
            info.as_glyph(),
            pos,
            &mut cluster_extents,
            placement_class(this_combining_class),
        );

        pos.x_advance = 0;
        pos.y_advance = 0;
        pos.x_offset += x_offset;
        pos.y_offset += y_offset;
    }
}

fn position_cluster<F: FontMetrics + ?Sized>(
    font: &F,
    buffer: &mut Buffer,
    start: usize,
    end: usize,
    adjust_offsets_when_zeroing: bool,
) {
    if end - start < 2 {
        return;
    }

    // Find the base glyph
    let mut i = start;
    while i < end {
        if !buffer.info[i].is_unicode_mark() {
            // Find mark glyphs
            let mut j = i + 1;
            while j < end && buffer.info[j].is_unicode_mark() {
                j += 1;
            }

            position_around_base(font, buffer, i, j, adjust_offsets_when_zeroing);
            i = j - 1;
        }
        i += 1;
    }
}

/// Positions every mark run in the buffer around its base glyph.
///
/// Marks end up with zero advances and offsets that put them on, above or
/// below the base's ink box according to their combining class, so the
/// classes have to be recategorized first.
pub fn position_marks<F: FontMetrics + ?Sized>(
    font: &F,
    buffer: &mut Buffer,
    adjust_offsets_when_zeroing: bool,
) {
    let mut start = 0;
    let len = buffer.len();
    for i in 1..len {
        if !buffer.info[i].is_unicode_mark() {
            position_cluster(font, buffer, start, i, adjust_offsets_when_zeroing);
            start = i;
        }
    }

    position_cluster(font, buffer, start, len, adjust_offsets_when_zeroing);
}

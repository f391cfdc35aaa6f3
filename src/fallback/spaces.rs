use crate::buffer::Buffer;
use crate::face::FontMetrics;
use crate::unicode::Space;

/// Synthesizes advances for space glyphs that borrowed the U+0020 glyph.
///
/// Ligated spaces are skipped.
pub fn adjust_spaces<F: FontMetrics + ?Sized>(font: &F, buffer: &mut Buffer) {
    let horizontal = buffer.direction.is_horizontal();
    let upem = font.units_per_em();

    for (info, pos) in buffer.info.iter().zip(&mut buffer.pos) {
        if !info.is_unicode_space() || info.is_ligated() {
            continue;
        }

        let space_type = info.space_fallback();
        match space_type {
            Space::SpaceEm
            | Space::SpaceEm2
            | Space::SpaceEm3
            | Space::SpaceEm4
            | Space::SpaceEm5
            | Space::SpaceEm6
            | Space::SpaceEm16 => {
                let n = space_type as i32;
                let length = (upem + n / 2) / n;
                if horizontal {
                    pos.x_advance = length;
                } else {
                    pos.y_advance = -length;
                }
            }

            Space::Space4Em18 => {
                let length = (i64::from(upem) * 4 / 18) as i32;
                if horizontal {
                    pos.x_advance = length;
                } else {
                    pos.y_advance = -length;
                }
            }

            Space::SpaceFigure => {
                let digit = ('0'..='9').find_map(|u| font.nominal_glyph(u as u32));
                if let Some(glyph) = digit {
                    if horizontal {
                        pos.x_advance = font.glyph_h_advance(glyph);
                    } else {
                        pos.y_advance = font.glyph_v_advance(glyph);
                    }
                }
            }

            Space::SpacePunctuation => {
                let punct = font
                    .nominal_glyph('.' as u32)
                    .or_else(|| font.nominal_glyph(',' as u32));

                if let Some(glyph) = punct {
                    if horizontal {
                        pos.x_advance = font.glyph_h_advance(glyph);
                    } else {
                        pos.y_advance = font.glyph_v_advance(glyph);
                    }
                }
            }

            Space::SpaceNarrow => {
                // Half-space?
                // Unicode doc https://unicode.org/charts/PDF/U2000.pdf says ~1/4 or 1/5 of EM.
                // However, in my testing, many fonts have their regular space being about that
                // size. To me, a percentage of the space width makes more sense. Half is as
                // good as any.
                if horizontal {
                    pos.x_advance /= 2;
                } else {
                    pos.y_advance /= 2;
                }
            }

            Space::Space | Space::NotSpace => {}
        }
    }
}

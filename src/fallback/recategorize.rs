use crate::buffer::Buffer;
use crate::unicode::{modified_combining_class as mcc, CanonicalCombiningClass as Class, GeneralCategory};

// Thai / Lao marks whose Unicode class is 0 but which still have a clear
// placement. Sorted by codepoint.
#[rustfmt::skip]
const THAI_LAO_PLACEMENTS: &[(u32, u8)] = &[
    (0x0E31, Class::AboveRight as u8),
    (0x0E34, Class::AboveRight as u8),
    (0x0E35, Class::AboveRight as u8),
    (0x0E36, Class::AboveRight as u8),
    (0x0E37, Class::AboveRight as u8),
    (0x0E47, Class::AboveRight as u8),
    (0x0E4C, Class::AboveRight as u8),
    (0x0E4D, Class::AboveRight as u8),
    (0x0E4E, Class::AboveRight as u8),
    (0x0EB1, Class::Above as u8),
    (0x0EB4, Class::Above as u8),
    (0x0EB5, Class::Above as u8),
    (0x0EB6, Class::Above as u8),
    (0x0EB7, Class::Above as u8),
    (0x0EBB, Class::Above as u8),
    (0x0EBC, Class::Below as u8),
    (0x0ECC, Class::Above as u8),
    (0x0ECD, Class::Above as u8),
];

const THAI_VIRAMA: u32 = 0x0E3A;

// Script-specific fixed-position classes and the placement they stand for.
#[rustfmt::skip]
const CLASS_PLACEMENTS: &[(u8, u8)] = &[
    // Hebrew
    (mcc::CCC10, Class::Below as u8),         // sheva
    (mcc::CCC11, Class::Below as u8),         // hataf segol
    (mcc::CCC12, Class::Below as u8),         // hataf patah
    (mcc::CCC13, Class::Below as u8),         // hataf qamats
    (mcc::CCC14, Class::Below as u8),         // hiriq
    (mcc::CCC15, Class::Below as u8),         // tsere
    (mcc::CCC16, Class::Below as u8),         // segol
    (mcc::CCC17, Class::Below as u8),         // patah
    (mcc::CCC18, Class::Below as u8),         // qamats & qamats qatan
    (mcc::CCC19, Class::AboveLeft as u8),     // holam & holam haser for vav
    (mcc::CCC20, Class::Below as u8),         // qubuts
    // CCC21 (dagesh) stays where it is.
    (mcc::CCC22, Class::Below as u8),         // meteg
    (mcc::CCC23, Class::AttachedAbove as u8), // rafe
    (mcc::CCC24, Class::AboveRight as u8),    // shin dot
    (mcc::CCC25, Class::AboveLeft as u8),     // sin dot
    (mcc::CCC26, Class::Above as u8),         // point varika

    // Arabic and Syriac
    (mcc::CCC27, Class::Above as u8), // fathatan
    (mcc::CCC28, Class::Above as u8), // dammatan
    (mcc::CCC29, Class::Below as u8), // kasratan
    (mcc::CCC30, Class::Above as u8), // fatha
    (mcc::CCC31, Class::Above as u8), // damma
    (mcc::CCC32, Class::Below as u8), // kasra
    (mcc::CCC33, Class::Above as u8), // shadda
    (mcc::CCC34, Class::Above as u8), // sukun
    (mcc::CCC35, Class::Above as u8), // superscript alef
    (mcc::CCC36, Class::Above as u8), // superscript alaph

    // Thai
    (mcc::CCC103, Class::BelowRight as u8), // sara u / sara uu
    (mcc::CCC107, Class::AboveRight as u8), // mai

    // Lao
    (mcc::CCC118, Class::Below as u8), // sign u / sign uu
    (mcc::CCC122, Class::Above as u8), // mai

    // Tibetan
    (mcc::CCC129, Class::Below as u8), // sign aa
    (mcc::CCC130, Class::Above as u8), // sign i
    (mcc::CCC132, Class::Below as u8), // sign u
];

/// Maps a modified combining class onto one of the generic placement classes.
///
/// Classes that are already positional (200 and up) and classes with no
/// known placement are returned as is, which makes the mapping idempotent.
pub fn recategorize_combining_class(u: u32, class: u8) -> u8 {
    if class >= 200 {
        return class;
    }

    // Thai / Lao need some per-character work.
    if u & !0xFF == 0x0E00 {
        // Thai virama is below-right.
        if u == THAI_VIRAMA {
            return Class::BelowRight as u8;
        }

        if class == 0 {
            if let Ok(idx) = THAI_LAO_PLACEMENTS.binary_search_by_key(&u, |(c, _)| *c) {
                return THAI_LAO_PLACEMENTS[idx].1;
            }
        }
    }

    CLASS_PLACEMENTS
        .iter()
        .find(|(c, _)| *c == class)
        .map_or(class, |(_, placement)| *placement)
}

/// Rewrites the combining class of every nonspacing mark in the buffer
/// into its placement class.
pub fn recategorize_marks(buffer: &mut Buffer) {
    for info in &mut buffer.info {
        if info.general_category() == GeneralCategory::NonspacingMark {
            let class = info.modified_combining_class();
            info.set_modified_combining_class(recategorize_combining_class(info.codepoint, class));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thai_lao_table_is_sorted() {
        assert!(THAI_LAO_PLACEMENTS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn thai_literals() {
        assert_eq!(recategorize_combining_class(0x0E31, 0), 232);
        assert_eq!(recategorize_combining_class(0x0EBC, 0), 220);
        assert_eq!(recategorize_combining_class(0x0EB1, 0), 230);
        // Only class 0 is overridden.
        assert_eq!(recategorize_combining_class(0x0E31, 5), 5);
    }

    #[test]
    fn thai_virama_is_below_right() {
        assert_eq!(recategorize_combining_class(0x0E3A, 9), 222);
        assert_eq!(recategorize_combining_class(0x0E3A, 0), 222);
        assert_eq!(recategorize_combining_class(0x0E3A, 230), 230);
    }

    #[test]
    fn buckets() {
        assert_eq!(recategorize_combining_class(0x05B0, mcc::CCC10), Class::Below as u8);
        assert_eq!(recategorize_combining_class(0x05BF, mcc::CCC23), Class::AttachedAbove as u8);
        assert_eq!(recategorize_combining_class(0x05BC, mcc::CCC21), mcc::CCC21);
        assert_eq!(recategorize_combining_class(0x0650, mcc::CCC32), Class::Below as u8);
        assert_eq!(recategorize_combining_class(0x0F72, mcc::CCC130), Class::Above as u8);
        assert_eq!(recategorize_combining_class(0x0301, 230), 230);
        assert_eq!(recategorize_combining_class(0x0334, 1), 1);
    }

    #[test]
    fn idempotent() {
        for u in [0x0E31, 0x0E3A, 0x0EBC, 0x05B0, 0x0301, 0x1234] {
            for class in 0..=255u8 {
                let once = recategorize_combining_class(u, class);
                assert_eq!(recategorize_combining_class(u, once), once, "{:04X} {}", u, class);
            }
        }
    }

    #[test]
    fn only_nonspacing_marks_are_touched() {
        let mut buffer = Buffer::new();
        // A spacing mark, a letter and a nonspacing Hebrew point.
        buffer.push_str("\u{0903}a\u{05B0}");
        let before: alloc::vec::Vec<u8> = buffer
            .glyph_infos()
            .iter()
            .map(|info| info.modified_combining_class())
            .collect();

        recategorize_marks(&mut buffer);

        let infos = buffer.glyph_infos();
        assert_eq!(infos[0].modified_combining_class(), before[0]);
        assert_eq!(infos[1].modified_combining_class(), 0);
        assert_eq!(infos[2].modified_combining_class(), Class::Below as u8);
    }
}

pub use unicode_ccc::CanonicalCombiningClass;
pub use unicode_properties::GeneralCategory;

/// A Unicode space classification used to synthesize missing space widths.
///
/// The numeric value of the `Em*` variants is the fraction of an em they span.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Space {
    /// Not a space character.
    NotSpace = 0,
    /// Em space.
    SpaceEm = 1,
    /// Half an em.
    SpaceEm2 = 2,
    /// A third of an em.
    SpaceEm3 = 3,
    /// A quarter of an em.
    SpaceEm4 = 4,
    /// A fifth of an em.
    SpaceEm5 = 5,
    /// A sixth of an em.
    SpaceEm6 = 6,
    /// A sixteenth of an em.
    SpaceEm16 = 16,
    /// Four eighteenths of an em.
    Space4Em18,
    /// A regular space.
    Space,
    /// As wide as a digit.
    SpaceFigure,
    /// As wide as a period.
    SpacePunctuation,
    /// Half of a regular space.
    SpaceNarrow,
}

impl Space {
    pub(crate) fn from_u8(n: u8) -> Self {
        match n {
            1 => Space::SpaceEm,
            2 => Space::SpaceEm2,
            3 => Space::SpaceEm3,
            4 => Space::SpaceEm4,
            5 => Space::SpaceEm5,
            6 => Space::SpaceEm6,
            16 => Space::SpaceEm16,
            17 => Space::Space4Em18,
            18 => Space::Space,
            19 => Space::SpaceFigure,
            20 => Space::SpacePunctuation,
            21 => Space::SpaceNarrow,
            _ => Space::NotSpace,
        }
    }
}

pub(crate) trait GeneralCategoryExt {
    fn to_rb(&self) -> u32;
    fn from_rb(gc: u32) -> Self;
    fn is_mark(&self) -> bool;
}

#[rustfmt::skip]
impl GeneralCategoryExt for GeneralCategory {
    fn to_rb(&self) -> u32 {
        match *self {
            GeneralCategory::Control => 0,
            GeneralCategory::Format => 1,
            GeneralCategory::Unassigned => 2,
            GeneralCategory::PrivateUse => 3,
            GeneralCategory::Surrogate => 4,
            GeneralCategory::LowercaseLetter => 5,
            GeneralCategory::ModifierLetter => 6,
            GeneralCategory::OtherLetter => 7,
            GeneralCategory::TitlecaseLetter => 8,
            GeneralCategory::UppercaseLetter => 9,
            GeneralCategory::SpacingMark => 10,
            GeneralCategory::EnclosingMark => 11,
            GeneralCategory::NonspacingMark => 12,
            GeneralCategory::DecimalNumber => 13,
            GeneralCategory::LetterNumber => 14,
            GeneralCategory::OtherNumber => 15,
            GeneralCategory::ConnectorPunctuation => 16,
            GeneralCategory::DashPunctuation => 17,
            GeneralCategory::ClosePunctuation => 18,
            GeneralCategory::FinalPunctuation => 19,
            GeneralCategory::InitialPunctuation => 20,
            GeneralCategory::OtherPunctuation => 21,
            GeneralCategory::OpenPunctuation => 22,
            GeneralCategory::CurrencySymbol => 23,
            GeneralCategory::ModifierSymbol => 24,
            GeneralCategory::MathSymbol => 25,
            GeneralCategory::OtherSymbol => 26,
            GeneralCategory::LineSeparator => 27,
            GeneralCategory::ParagraphSeparator => 28,
            GeneralCategory::SpaceSeparator => 29,
        }
    }

    fn from_rb(gc: u32) -> Self {
        match gc {
            0 => GeneralCategory::Control,
            1 => GeneralCategory::Format,
            2 => GeneralCategory::Unassigned,
            3 => GeneralCategory::PrivateUse,
            4 => GeneralCategory::Surrogate,
            5 => GeneralCategory::LowercaseLetter,
            6 => GeneralCategory::ModifierLetter,
            7 => GeneralCategory::OtherLetter,
            8 => GeneralCategory::TitlecaseLetter,
            9 => GeneralCategory::UppercaseLetter,
            10 => GeneralCategory::SpacingMark,
            11 => GeneralCategory::EnclosingMark,
            12 => GeneralCategory::NonspacingMark,
            13 => GeneralCategory::DecimalNumber,
            14 => GeneralCategory::LetterNumber,
            15 => GeneralCategory::OtherNumber,
            16 => GeneralCategory::ConnectorPunctuation,
            17 => GeneralCategory::DashPunctuation,
            18 => GeneralCategory::ClosePunctuation,
            19 => GeneralCategory::FinalPunctuation,
            20 => GeneralCategory::InitialPunctuation,
            21 => GeneralCategory::OtherPunctuation,
            22 => GeneralCategory::OpenPunctuation,
            23 => GeneralCategory::CurrencySymbol,
            24 => GeneralCategory::ModifierSymbol,
            25 => GeneralCategory::MathSymbol,
            26 => GeneralCategory::OtherSymbol,
            27 => GeneralCategory::LineSeparator,
            28 => GeneralCategory::ParagraphSeparator,
            29 => GeneralCategory::SpaceSeparator,
            _ => GeneralCategory::Unassigned,
        }
    }

    fn is_mark(&self) -> bool {
        matches!(
            *self,
            GeneralCategory::SpacingMark
                | GeneralCategory::EnclosingMark
                | GeneralCategory::NonspacingMark
        )
    }
}

pub(crate) trait CharExt {
    fn general_category(self) -> GeneralCategory;
    fn space_fallback(self) -> Space;
    fn modified_combining_class(self) -> u8;
}

impl CharExt for char {
    fn general_category(self) -> GeneralCategory {
        unicode_properties::UnicodeGeneralCategory::general_category(self)
    }

    fn space_fallback(self) -> Space {
        // All GC=Zs chars that can use a fallback.
        match self {
            '\u{0020}' => Space::Space,             // SPACE
            '\u{00A0}' => Space::Space,             // NO-BREAK SPACE
            '\u{2000}' => Space::SpaceEm2,          // EN QUAD
            '\u{2001}' => Space::SpaceEm,           // EM QUAD
            '\u{2002}' => Space::SpaceEm2,          // EN SPACE
            '\u{2003}' => Space::SpaceEm,           // EM SPACE
            '\u{2004}' => Space::SpaceEm3,          // THREE-PER-EM SPACE
            '\u{2005}' => Space::SpaceEm4,          // FOUR-PER-EM SPACE
            '\u{2006}' => Space::SpaceEm6,          // SIX-PER-EM SPACE
            '\u{2007}' => Space::SpaceFigure,       // FIGURE SPACE
            '\u{2008}' => Space::SpacePunctuation,  // PUNCTUATION SPACE
            '\u{2009}' => Space::SpaceEm5,          // THIN SPACE
            '\u{200A}' => Space::SpaceEm16,         // HAIR SPACE
            '\u{202F}' => Space::SpaceNarrow,       // NARROW NO-BREAK SPACE
            '\u{205F}' => Space::Space4Em18,        // MEDIUM MATHEMATICAL SPACE
            '\u{3000}' => Space::SpaceEm,           // IDEOGRAPHIC SPACE
            _ => Space::NotSpace,                   // OGHAM SPACE MARK
        }
    }

    fn modified_combining_class(self) -> u8 {
        let u = self as u32;

        // Reorder SAKOT to ensure it comes after any tone marks.
        if u == 0x1A60 {
            return 254;
        }

        // Reorder PADMA to ensure it comes after any vowel marks.
        if u == 0x0FC6 {
            return 254;
        }

        // Reorder TSA -PHRU to reorder before U+0F74
        if u == 0x0F39 {
            return 127;
        }

        let class = unicode_ccc::get_canonical_combining_class(self) as u8;
        MODIFIED_COMBINING_CLASS[class as usize]
    }
}

pub mod modified_combining_class {
    //! Modified combining classes of the script-specific fixed-position marks.
    //!
    //! Each constant is named after the Unicode class it replaces and holds the
    //! value a mark of that class carries after modification.

    #![allow(missing_docs)]

    // Hebrew
    //
    // We permute the "fixed-position" classes 10-26 into the order
    // described in the SBL Hebrew manual:
    //
    // https://www.sbl-site.org/Fonts/SBLHebrewUserManual1.5x.pdf
    //
    // (as recommended by:
    //  https://forum.fontlab.com/archive-old-microsoft-volt-group/vista-and-diacritic-ordering/msg22823/)
    //
    // More details here:
    // https://bugzilla.mozilla.org/show_bug.cgi?id=662055
    pub const CCC10: u8 = 22; // sheva
    pub const CCC11: u8 = 15; // hataf segol
    pub const CCC12: u8 = 16; // hataf patah
    pub const CCC13: u8 = 17; // hataf qamats
    pub const CCC14: u8 = 23; // hiriq
    pub const CCC15: u8 = 18; // tsere
    pub const CCC16: u8 = 19; // segol
    pub const CCC17: u8 = 20; // patah
    pub const CCC18: u8 = 21; // qamats & qamats qatan
    pub const CCC19: u8 = 14; // holam & holam haser for vav
    pub const CCC20: u8 = 24; // qubuts
    pub const CCC21: u8 = 12; // dagesh
    pub const CCC22: u8 = 25; // meteg
    pub const CCC23: u8 = 13; // rafe
    pub const CCC24: u8 = 10; // shin dot
    pub const CCC25: u8 = 11; // sin dot
    pub const CCC26: u8 = 26; // point varika

    // Arabic
    //
    // Modify to move Shadda (ccc=33) before other marks.  See:
    // https://unicode.org/faq/normalization.html#8
    // https://unicode.org/faq/normalization.html#9
    pub const CCC27: u8 = 28; // fathatan
    pub const CCC28: u8 = 29; // dammatan
    pub const CCC29: u8 = 30; // kasratan
    pub const CCC30: u8 = 31; // fatha
    pub const CCC31: u8 = 32; // damma
    pub const CCC32: u8 = 33; // kasra
    pub const CCC33: u8 = 27; // shadda
    pub const CCC34: u8 = 34; // sukun
    pub const CCC35: u8 = 35; // superscript alef

    // Syriac
    pub const CCC36: u8 = 36; // superscript alaph

    // Telugu
    //
    // Modify Telugu length marks (ccc=84, ccc=91).
    // These are the only matras in the main Indic scripts range that have
    // a non-zero ccc.  That makes them reorder with the Halant that is
    // ccc=9.  Just zero them, we don't need them in our Indic shaper.
    pub const CCC84: u8 = 0; // length mark
    pub const CCC91: u8 = 0; // ai length mark

    // Thai
    //
    // Modify U+0E38 and U+0E39 (ccc=103) to be reordered before U+0E3A (ccc=9).
    // Assign 3, which is unassigned otherwise.
    // Uniscribe does this reordering too.
    pub const CCC103: u8 = 3; // sara u / sara uu
    pub const CCC107: u8 = 107; // mai *

    // Lao
    pub const CCC118: u8 = 118; // sign u / sign uu
    pub const CCC122: u8 = 122; // mai *

    // Tibetan
    //
    // In case of multiple vowel-signs, use u first (but after achung)
    // this allows Dzongkha multi-vowel shortcuts to render correctly
    pub const CCC129: u8 = 129; // sign aa
    pub const CCC130: u8 = 132; // sign i
    pub const CCC132: u8 = 131; // sign u
}

// Indexed by the Unicode canonical combining class.
#[rustfmt::skip]
const MODIFIED_COMBINING_CLASS: &[u8; 256] = &{
    use modified_combining_class as mcc;

    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = i as u8;
        i += 1;
    }

    table[10] = mcc::CCC10;
    table[11] = mcc::CCC11;
    table[12] = mcc::CCC12;
    table[13] = mcc::CCC13;
    table[14] = mcc::CCC14;
    table[15] = mcc::CCC15;
    table[16] = mcc::CCC16;
    table[17] = mcc::CCC17;
    table[18] = mcc::CCC18;
    table[19] = mcc::CCC19;
    table[20] = mcc::CCC20;
    table[21] = mcc::CCC21;
    table[22] = mcc::CCC22;
    table[23] = mcc::CCC23;
    table[24] = mcc::CCC24;
    table[25] = mcc::CCC25;
    table[26] = mcc::CCC26;

    table[27] = mcc::CCC27;
    table[28] = mcc::CCC28;
    table[29] = mcc::CCC29;
    table[30] = mcc::CCC30;
    table[31] = mcc::CCC31;
    table[32] = mcc::CCC32;
    table[33] = mcc::CCC33;
    table[34] = mcc::CCC34;
    table[35] = mcc::CCC35;
    table[36] = mcc::CCC36;

    table[84] = mcc::CCC84;
    table[91] = mcc::CCC91;

    table[103] = mcc::CCC103;
    table[107] = mcc::CCC107;

    table[118] = mcc::CCC118;
    table[122] = mcc::CCC122;

    table[129] = mcc::CCC129;
    table[130] = mcc::CCC130;
    table[132] = mcc::CCC132;

    table
};

use core::str::FromStr;

use crate::Tag;

/// Defines the direction in which text is to be read.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Direction {
    /// Initial, unset direction.
    #[default]
    Invalid,
    /// Text is set horizontally from left to right.
    LeftToRight,
    /// Text is set horizontally from right to left.
    RightToLeft,
    /// Text is set vertically from top to bottom.
    TopToBottom,
    /// Text is set vertically from bottom to top.
    BottomToTop,
}

impl Direction {
    /// Checks that the direction is horizontal.
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::LeftToRight | Direction::RightToLeft)
    }

    /// Checks that the direction is vertical.
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::TopToBottom | Direction::BottomToTop)
    }

    /// Checks that the direction is left-to-right or top-to-bottom.
    #[inline]
    pub fn is_forward(self) -> bool {
        matches!(self, Direction::LeftToRight | Direction::TopToBottom)
    }

    /// Checks that the direction is right-to-left or bottom-to-top.
    #[inline]
    pub fn is_backward(self) -> bool {
        matches!(self, Direction::RightToLeft | Direction::BottomToTop)
    }

    /// Returns the opposite direction.
    #[inline]
    pub fn reverse(self) -> Self {
        match self {
            Direction::LeftToRight => Direction::RightToLeft,
            Direction::RightToLeft => Direction::LeftToRight,
            Direction::TopToBottom => Direction::BottomToTop,
            Direction::BottomToTop => Direction::TopToBottom,
            Direction::Invalid => Direction::Invalid,
        }
    }

    /// Returns the horizontal direction a script is natively written in.
    ///
    /// Returns `None` for scripts that can be written in either direction.
    pub fn from_script(script: Script) -> Option<Self> {
        // https://docs.google.com/spreadsheets/d/1Y90M0Ie3MUJ6UVCRDOypOtijlMDLNNyyLk36T6iMu0o

        match script {
            // Unicode-1.1 additions
            script::ARABIC |
            script::HEBREW |

            // Unicode-3.0 additions
            script::SYRIAC |
            script::THAANA |

            // Unicode-4.0 additions
            script::CYPRIOT |

            // Unicode-4.1 additions
            script::KHAROSHTHI |

            // Unicode-5.0 additions
            script::PHOENICIAN |
            script::NKO |

            // Unicode-5.1 additions
            script::LYDIAN |

            // Unicode-5.2 additions
            script::AVESTAN |
            script::IMPERIAL_ARAMAIC |
            script::INSCRIPTIONAL_PAHLAVI |
            script::INSCRIPTIONAL_PARTHIAN |
            script::OLD_SOUTH_ARABIAN |
            script::OLD_TURKIC |
            script::SAMARITAN |

            // Unicode-6.0 additions
            script::MANDAIC |

            // Unicode-6.1 additions
            script::MEROITIC_CURSIVE |
            script::MEROITIC_HIEROGLYPHS |

            // Unicode-7.0 additions
            script::MANICHAEAN |
            script::MENDE_KIKAKUI |
            script::NABATAEAN |
            script::OLD_NORTH_ARABIAN |
            script::PALMYRENE |
            script::PSALTER_PAHLAVI |

            // Unicode-8.0 additions
            script::HATRAN |

            // Unicode-9.0 additions
            script::ADLAM |

            // Unicode-11.0 additions
            script::HANIFI_ROHINGYA |
            script::OLD_SOGDIAN |
            script::SOGDIAN |

            // Unicode-12.0 additions
            script::ELYMAIC |

            // Unicode-13.0 additions
            script::CHORASMIAN |
            script::YEZIDI |

            // Unicode-14.0 additions
            script::OLD_UYGHUR => {
                Some(Direction::RightToLeft)
            }

            // https://github.com/harfbuzz/harfbuzz/issues/1000
            script::OLD_HUNGARIAN |
            script::OLD_ITALIC |
            script::RUNIC => {
                None
            }

            _ => Some(Direction::LeftToRight),
        }
    }
}

impl FromStr for Direction {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("invalid direction");
        }

        // harfbuzz also matches only the first letter.
        match s.as_bytes()[0].to_ascii_lowercase() {
            b'l' => Ok(Direction::LeftToRight),
            b'r' => Ok(Direction::RightToLeft),
            b't' => Ok(Direction::TopToBottom),
            b'b' => Ok(Direction::BottomToTop),
            _ => Err("invalid direction"),
        }
    }
}

// In harfbuzz, despite having `hb_script_t`, script can actually have any tag.
// So we're doing the same.
// The only difference is that `Script` cannot be set to `HB_SCRIPT_INVALID`.
/// A text script.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Script(pub(crate) Tag);

impl Script {
    #[inline]
    pub(crate) const fn from_bytes(bytes: &[u8; 4]) -> Self {
        Script(Tag::from_bytes(bytes))
    }

    /// Converts an ISO 15924 script tag to a corresponding `Script`.
    pub fn from_iso15924_tag(tag: Tag) -> Option<Script> {
        if tag.is_null() {
            return None;
        }

        // Be lenient, adjust case (one capital letter followed by three small letters).
        let tag = Tag((tag.as_u32() & 0xDFDFDFDF) | 0x00202020);

        match &tag.to_bytes() {
            // These graduated from the 'Q' private-area codes, but
            // the old code is still aliased by Unicode, and the Qaai
            // one in use by ICU.
            b"Qaai" => return Some(script::INHERITED),
            b"Qaac" => return Some(script::COPTIC),

            // Script variants from https://unicode.org/iso15924/
            b"Cyrs" => return Some(script::CYRILLIC),
            b"Latf" | b"Latg" => return Some(script::LATIN),
            b"Syre" | b"Syrj" | b"Syrn" => return Some(script::SYRIAC),

            _ => {}
        }

        if tag.as_u32() & 0xE0E0E0E0 == 0x40606060 {
            Some(Script(tag))
        } else {
            Some(script::UNKNOWN)
        }
    }

    /// Returns script's tag.
    #[inline]
    pub fn tag(&self) -> Tag {
        self.0
    }
}

impl FromStr for Script {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = Tag::from_bytes_lossy(s.as_bytes());
        Script::from_iso15924_tag(tag).ok_or("invalid script")
    }
}

/// Returns the script a character belongs to.
///
/// Characters shared between scripts resolve to [`script::COMMON`]
/// or [`script::INHERITED`].
pub fn script_from_char(c: char) -> Script {
    let name = unicode_script::UnicodeScript::script(&c).short_name();
    Script::from_iso15924_tag(Tag::from_bytes_lossy(name.as_bytes())).unwrap_or(script::UNKNOWN)
}

/// Predefined scripts.
pub mod script {
    #![allow(missing_docs)]

    use crate::Script;

    // Since 1.1
    pub const COMMON: Script                    = Script::from_bytes(b"Zyyy");
    pub const INHERITED: Script                 = Script::from_bytes(b"Zinh");
    pub const ARABIC: Script                    = Script::from_bytes(b"Arab");
    pub const BENGALI: Script                   = Script::from_bytes(b"Beng");
    pub const CYRILLIC: Script                  = Script::from_bytes(b"Cyrl");
    pub const DEVANAGARI: Script                = Script::from_bytes(b"Deva");
    pub const GREEK: Script                     = Script::from_bytes(b"Grek");
    pub const GUJARATI: Script                  = Script::from_bytes(b"Gujr");
    pub const GURMUKHI: Script                  = Script::from_bytes(b"Guru");
    pub const HANGUL: Script                    = Script::from_bytes(b"Hang");
    pub const HEBREW: Script                    = Script::from_bytes(b"Hebr");
    pub const KANNADA: Script                   = Script::from_bytes(b"Knda");
    pub const LAO: Script                       = Script::from_bytes(b"Laoo");
    pub const LATIN: Script                     = Script::from_bytes(b"Latn");
    pub const MALAYALAM: Script                 = Script::from_bytes(b"Mlym");
    pub const ORIYA: Script                     = Script::from_bytes(b"Orya");
    pub const TAMIL: Script                     = Script::from_bytes(b"Taml");
    pub const TELUGU: Script                    = Script::from_bytes(b"Telu");
    pub const THAI: Script                      = Script::from_bytes(b"Thai");
    // Since 2.0
    pub const TIBETAN: Script                   = Script::from_bytes(b"Tibt");
    // Since 3.0
    pub const KHMER: Script                     = Script::from_bytes(b"Khmr");
    pub const MYANMAR: Script                   = Script::from_bytes(b"Mymr");
    pub const RUNIC: Script                     = Script::from_bytes(b"Runr");
    pub const SYRIAC: Script                    = Script::from_bytes(b"Syrc");
    pub const THAANA: Script                    = Script::from_bytes(b"Thaa");
    // Since 3.1
    pub const OLD_ITALIC: Script                = Script::from_bytes(b"Ital");
    // Since 4.0
    pub const CYPRIOT: Script                   = Script::from_bytes(b"Cprt");
    // Since 4.1
    pub const COPTIC: Script                    = Script::from_bytes(b"Copt");
    pub const KHAROSHTHI: Script                = Script::from_bytes(b"Khar");
    // Since 5.0
    pub const UNKNOWN: Script                   = Script::from_bytes(b"Zzzz"); // Script can be Unknown, but not Invalid.
    pub const NKO: Script                       = Script::from_bytes(b"Nkoo");
    pub const PHOENICIAN: Script                = Script::from_bytes(b"Phnx");
    // Since 5.1
    pub const LYDIAN: Script                    = Script::from_bytes(b"Lydi");
    // Since 5.2
    pub const AVESTAN: Script                   = Script::from_bytes(b"Avst");
    pub const IMPERIAL_ARAMAIC: Script          = Script::from_bytes(b"Armi");
    pub const INSCRIPTIONAL_PAHLAVI: Script     = Script::from_bytes(b"Phli");
    pub const INSCRIPTIONAL_PARTHIAN: Script    = Script::from_bytes(b"Prti");
    pub const OLD_SOUTH_ARABIAN: Script         = Script::from_bytes(b"Sarb");
    pub const OLD_TURKIC: Script                = Script::from_bytes(b"Orkh");
    pub const SAMARITAN: Script                 = Script::from_bytes(b"Samr");
    // Since 6.0
    pub const MANDAIC: Script                   = Script::from_bytes(b"Mand");
    // Since 6.1
    pub const MEROITIC_CURSIVE: Script          = Script::from_bytes(b"Merc");
    pub const MEROITIC_HIEROGLYPHS: Script      = Script::from_bytes(b"Mero");
    // Since 7.0
    pub const MANICHAEAN: Script                = Script::from_bytes(b"Mani");
    pub const MENDE_KIKAKUI: Script             = Script::from_bytes(b"Mend");
    pub const NABATAEAN: Script                 = Script::from_bytes(b"Nbat");
    pub const OLD_NORTH_ARABIAN: Script         = Script::from_bytes(b"Narb");
    pub const PALMYRENE: Script                 = Script::from_bytes(b"Palm");
    pub const PSALTER_PAHLAVI: Script           = Script::from_bytes(b"Phlp");
    // Since 8.0
    pub const HATRAN: Script                    = Script::from_bytes(b"Hatr");
    pub const OLD_HUNGARIAN: Script             = Script::from_bytes(b"Hung");
    // Since 9.0
    pub const ADLAM: Script                     = Script::from_bytes(b"Adlm");
    // Since 11.0
    pub const HANIFI_ROHINGYA: Script           = Script::from_bytes(b"Rohg");
    pub const OLD_SOGDIAN: Script               = Script::from_bytes(b"Sogo");
    pub const SOGDIAN: Script                   = Script::from_bytes(b"Sogd");
    // Since 12.0
    pub const ELYMAIC: Script                   = Script::from_bytes(b"Elym");
    // Since 13.0
    pub const CHORASMIAN: Script                = Script::from_bytes(b"Chrs");
    pub const YEZIDI: Script                    = Script::from_bytes(b"Yezi");
    // Since 14.0
    pub const OLD_UYGHUR: Script                = Script::from_bytes(b"Ougr");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_from_str() {
        assert_eq!("ltr".parse(), Ok(Direction::LeftToRight));
        assert_eq!("RTL".parse(), Ok(Direction::RightToLeft));
        assert_eq!("ttb".parse(), Ok(Direction::TopToBottom));
        assert_eq!("b".parse(), Ok(Direction::BottomToTop));
        assert_eq!("".parse::<Direction>(), Err("invalid direction"));
        assert_eq!("x".parse::<Direction>(), Err("invalid direction"));
    }

    #[test]
    fn horizontal_direction_of_scripts() {
        assert_eq!(Direction::from_script(script::LATIN), Some(Direction::LeftToRight));
        assert_eq!(Direction::from_script(script::ARABIC), Some(Direction::RightToLeft));
        assert_eq!(Direction::from_script(script::HEBREW), Some(Direction::RightToLeft));
        assert_eq!(Direction::from_script(script::OLD_ITALIC), None);
    }

    #[test]
    fn script_parsing_is_lenient() {
        assert_eq!("thai".parse(), Ok(script::THAI));
        assert_eq!("LATN".parse(), Ok(script::LATIN));
        assert_eq!("Latf".parse(), Ok(script::LATIN));
        assert_eq!("".parse::<Script>(), Err("invalid script"));
    }

    #[test]
    fn script_of_chars() {
        assert_eq!(script_from_char('a'), script::LATIN);
        assert_eq!(script_from_char('\u{05D0}'), script::HEBREW);
        assert_eq!(script_from_char('\u{0E01}'), script::THAI);
        assert_eq!(script_from_char(' '), script::COMMON);
    }
}

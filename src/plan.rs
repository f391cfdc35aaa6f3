use crate::buffer::Buffer;
use crate::{script, Script};

/// Decides which fallback passes run for a run of text.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FallbackPlan {
    pub(crate) fallback_mark_positioning: bool,
    pub(crate) adjust_mark_positioning_when_zeroing: bool,
    pub(crate) fallback_spaces: bool,
}

impl Default for FallbackPlan {
    fn default() -> Self {
        FallbackPlan {
            fallback_mark_positioning: true,
            adjust_mark_positioning_when_zeroing: true,
            fallback_spaces: true,
        }
    }
}

impl FallbackPlan {
    /// Returns a plan with the defaults for a script.
    ///
    /// Scripts whose shapers place marks themselves do not get fallback
    /// mark positioning.
    pub fn new(script: Option<Script>) -> Self {
        let fallback_mark_positioning = !script.map_or(false, script_positions_marks);
        log::debug!(
            "fallback mark positioning for {:?}: {}",
            script.map(|s| s.tag()),
            fallback_mark_positioning
        );

        FallbackPlan {
            fallback_mark_positioning,
            ..FallbackPlan::default()
        }
    }

    /// Returns a plan with the defaults for the buffer's script.
    pub fn for_buffer(buffer: &Buffer) -> Self {
        Self::new(buffer.script())
    }

    /// Enables or disables mark positioning.
    pub fn with_fallback_mark_positioning(mut self, enabled: bool) -> Self {
        self.fallback_mark_positioning = enabled;
        self
    }

    /// Enables or disables folding zeroed mark advances into their offsets.
    ///
    /// Only has an effect on runs in a forward direction.
    pub fn with_adjust_mark_positioning_when_zeroing(mut self, enabled: bool) -> Self {
        self.adjust_mark_positioning_when_zeroing = enabled;
        self
    }

    /// Enables or disables space width synthesis.
    pub fn with_fallback_spaces(mut self, enabled: bool) -> Self {
        self.fallback_spaces = enabled;
        self
    }

    /// Checks that marks get positioned.
    #[inline]
    pub fn fallback_mark_positioning(&self) -> bool {
        self.fallback_mark_positioning
    }

    /// Checks that zeroed mark advances are folded into their offsets.
    #[inline]
    pub fn adjust_mark_positioning_when_zeroing(&self) -> bool {
        self.adjust_mark_positioning_when_zeroing
    }

    /// Checks that space widths get synthesized.
    #[inline]
    pub fn fallback_spaces(&self) -> bool {
        self.fallback_spaces
    }
}

fn script_positions_marks(script: Script) -> bool {
    matches!(
        script,
        // Unicode-1.1 additions
        script::HANGUL
            | script::BENGALI
            | script::DEVANAGARI
            | script::GUJARATI
            | script::GURMUKHI
            | script::KANNADA
            | script::MALAYALAM
            | script::ORIYA
            | script::TAMIL
            | script::TELUGU
            // Unicode-3.0 additions
            | script::KHMER
            | script::MYANMAR
    )
}

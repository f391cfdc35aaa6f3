/*!
`rustybuzz-fallback` positions combining marks and spaces for fonts that
carry no positioning data of their own, the way
[harfbuzz](https://github.com/harfbuzz/harfbuzz) does when GPOS is missing.

A typical run:

```
use rustybuzz_fallback::{Buffer, FallbackPlan, Face};

fn run(face: &Face, text: &str) -> Buffer {
    let mut buffer = Buffer::new();
    buffer.push_str(text);
    buffer.guess_segment_properties();

    rustybuzz_fallback::map_glyphs(face, &mut buffer);
    rustybuzz_fallback::position_default(face, &mut buffer);
    rustybuzz_fallback::position(face, &FallbackPlan::for_buffer(&buffer), &mut buffer);
    buffer
}
```
*/

#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod buffer;
mod common;
mod face;
pub mod fallback;
mod plan;
mod shape;
mod unicode;

pub use ttf_parser::{GlyphId, Tag};

pub use crate::buffer::{Buffer, GlyphFlags, GlyphInfo, GlyphPosition, SerializeFlags};
pub use crate::common::{script, script_from_char, Direction, Script};
pub use crate::face::{Face, FontMetrics, GlyphExtents};
pub use crate::plan::FallbackPlan;
pub use crate::shape::{map_glyphs, position, position_default};
pub use crate::unicode::{modified_combining_class, CanonicalCombiningClass, GeneralCategory, Space};

//! Glyph-width measurement
//!
//! Line wrapping needs the rendered width of candidate lines. The built-in
//! implementation uses static Helvetica advance tables (per-mille of em,
//! ASCII 0x20..=0x7E); non-ASCII characters fall back to an average advance.
//! Anything that renders with other fonts can supply its own `GlyphMeasure`.

/// Measures the rendered width of text at a point size.
pub trait GlyphMeasure: Send + Sync {
    /// Width of `text` in points at `size_pt`, in the regular or bold face.
    fn width(&self, text: &str, bold: bool, size_pt: f32) -> f32;
}

/// Measurement against the built-in Helvetica tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinMetrics;

impl GlyphMeasure for BuiltinMetrics {
    fn width(&self, text: &str, bold: bool, size_pt: f32) -> f32 {
        let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
        table.measure(text) * size_pt
    }
}

/// Advance-width table for one face, per-mille of em.
struct AdvanceTable {
    /// `widths[i]` is the advance of ASCII character `i + 32`.
    widths: [u16; 95],
    /// Fallback for characters outside 0x20..=0x7E.
    average: u16,
}

impl AdvanceTable {
    /// Sum of advances in em units (multiply by the font size for points).
    fn measure(&self, text: &str) -> f32 {
        let millis: u32 = text
            .chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    u32::from(self.widths[code - 32])
                } else {
                    u32::from(self.average)
                }
            })
            .sum();
        millis as f32 / 1000.0
    }
}

/// Helvetica, from the standard-14 AFM advances.
#[rustfmt::skip]
static HELVETICA: AdvanceTable = AdvanceTable {
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
         278,  278,  355,  556,  556,  889,  667,  191,  333,  333,  389,  584,  278,  333,  278,  278,
        // 0-9
         556,  556,  556,  556,  556,  556,  556,  556,  556,  556,
        // :     ;     <     =     >     ?     @
         278,  278,  584,  584,  584,  556, 1015,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
         667,  667,  722,  722,  667,  611,  778,  722,  278,  500,  667,  556,  833,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
         722,  778,  667,  778,  722,  667,  611,  722,  667,  944,  667,  667,  611,
        // [     \     ]     ^     _     `
         278,  278,  278,  469,  556,  333,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
         556,  556,  500,  556,  556,  278,  556,  556,  222,  222,  500,  222,  833,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
         556,  556,  556,  556,  333,  500,  278,  556,  500,  722,  500,  500,  500,
        // {     |     }     ~
         334,  260,  334,  584,
    ],
    average: 556,
};

/// Helvetica-Bold, from the standard-14 AFM advances.
#[rustfmt::skip]
static HELVETICA_BOLD: AdvanceTable = AdvanceTable {
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
         278,  333,  474,  556,  556,  889,  722,  238,  333,  333,  389,  584,  278,  333,  278,  278,
        // 0-9
         556,  556,  556,  556,  556,  556,  556,  556,  556,  556,
        // :     ;     <     =     >     ?     @
         333,  333,  584,  584,  584,  611,  975,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
         722,  722,  722,  722,  667,  611,  778,  722,  278,  556,  722,  611,  833,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
         722,  778,  667,  778,  722,  667,  611,  722,  667,  944,  667,  667,  611,
        // [     \     ]     ^     _     `
         333,  278,  333,  584,  556,  333,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
         556,  611,  556,  611,  556,  333,  611,  611,  278,  278,  556,  278,  889,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
         611,  611,  611,  611,  389,  556,  333,  611,  556,  778,  556,  556,  500,
        // {     |     }     ~
         389,  280,  389,  584,
    ],
    average: 600,
};

// SPDX-License-Identifier: MIT OR Apache-2.0

use unicode_segmentation::UnicodeSegmentation;

/// Font sizes are searched on a grid of tenths of a pixel
pub(crate) type Tenths = i64;

/// Pixels to tenths, rounding down
#[inline]
pub(crate) fn floor_tenths(px: f32) -> Tenths {
    // the nudge keeps 0.3 * 10 = 2.9999998 from falling to the tenth below
    (f64::from(px) * 10.0 + 1e-6).floor() as Tenths
}

#[inline]
pub(crate) fn to_px(tenths: Tenths) -> f32 {
    tenths as f32 / 10.0
}

/// Number of words, never less than one
pub(crate) fn word_count(text: &str) -> usize {
    text.unicode_words().count().max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_tenths() {
        assert_eq!(floor_tenths(6.0), 60);
        assert_eq!(floor_tenths(0.3), 3);
        assert_eq!(floor_tenths(43.59), 435);
        assert_eq!(to_px(435), 43.5);
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 1);
        assert_eq!(word_count("rat"), 1);
        assert_eq!(word_count("a totally decent rat, I think"), 6);
    }
}

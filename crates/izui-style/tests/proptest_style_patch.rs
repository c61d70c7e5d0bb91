//! Property-based invariant tests for style patching.
//!
//! 1. Patching with an empty style is the identity, on either side.
//! 2. Patching is associative.
//! 3. Applying a patched style equals applying the two in order.

use izui_render::cell::Cell;
use izui_style::{PackedRgba, Style, StyleFlags};
use proptest::prelude::*;

fn color_strategy() -> impl Strategy<Value = Option<PackedRgba>> {
    prop::option::of(any::<u32>().prop_map(PackedRgba))
}

fn style_strategy() -> impl Strategy<Value = Style> {
    (
        color_strategy(),
        color_strategy(),
        prop::option::of(any::<u8>().prop_map(StyleFlags::from_bits_truncate)),
    )
        .prop_map(|(fg, bg, attrs)| Style { fg, bg, attrs })
}

proptest! {
    #[test]
    fn empty_patch_is_identity(style in style_strategy()) {
        prop_assert_eq!(style.patch(Style::new()), style);
        prop_assert_eq!(Style::new().patch(style), style);
    }

    #[test]
    fn patch_is_associative(a in style_strategy(), b in style_strategy(), c in style_strategy()) {
        prop_assert_eq!(a.patch(b).patch(c), a.patch(b.patch(c)));
    }

    #[test]
    fn apply_patched_equals_sequential(a in style_strategy(), b in style_strategy(), ch in "[a-z]") {
        let base = Cell::from_char(ch.chars().next().unwrap_or('x'));

        let mut combined = base;
        a.patch(b).apply_to(&mut combined);

        let mut sequential = base;
        a.apply_to(&mut sequential);
        b.apply_to(&mut sequential);

        prop_assert_eq!(combined, sequential);
    }
}

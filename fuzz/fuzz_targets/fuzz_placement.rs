#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use curtain_core::{Rect, Size};
use curtain_widgets::PlacementPolicy;
use curtain_widgets::mask::{Mask, MaskShape};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    viewport: (u16, u16),
    target: (i16, i16, u16, u16),
    callout: (u16, u16),
    tip_height: u16,
    cuts: Vec<(Option<(i16, i16, u16, u16)>, u16, u16)>,
}

fn rect((l, t, w, h): (i16, i16, u16, u16)) -> Rect {
    Rect::new(f64::from(l), f64::from(t), f64::from(w), f64::from(h))
}

fuzz_target!(|input: Input| {
    let viewport = Size::new(f64::from(input.viewport.0), f64::from(input.viewport.1));
    let callout = Size::new(f64::from(input.callout.0), f64::from(input.callout.1));
    let policy = PlacementPolicy::default();

    let target = rect(input.target).trim_to(viewport);
    let placed = policy.place(&target, callout, viewport, || f64::from(input.tip_height));

    // The leading margin always holds; the trailing one only when the callout fits.
    assert!(placed.position.x >= policy.margin);
    assert!(placed.position.y >= policy.margin);
    if callout.width + 2.0 * policy.margin <= viewport.width {
        assert!(placed.position.x + callout.width <= viewport.width - policy.margin);
    }
    if callout.height + 2.0 * policy.margin <= viewport.height {
        assert!(placed.position.y + callout.height <= viewport.height - policy.margin);
    }

    let mut mask = Mask::new(viewport);
    let mut last = None;
    for (hole, duration, wait) in input.cuts.iter().take(64) {
        last = hole.map(rect);
        mask.cut(last, viewport, Some(Duration::from_millis(u64::from(*duration))));
        mask.tick(Duration::from_millis(u64::from(*wait)));
        let _ = mask.path();
    }
    mask.tick(Duration::from_secs(120));
    assert_eq!(mask.shape(), MaskShape::new(viewport, last));
});

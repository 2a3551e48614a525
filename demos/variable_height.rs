// Example: per-item heights and listener-driven re-rendering.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use virtual_list::{ItemHeight, Viewport, VirtualList, VirtualListOptions};

fn main() {
    // Every third row is a tall section header.
    let height = |i: usize| if i % 3 == 0 { 60.0 } else { 24.0 };

    let mut v = VirtualList::new(
        VirtualListOptions::new(100_000, ItemHeight::per_item(height))
            .with_overscan(3)
            .with_initial_viewport(Some(Viewport::new(640.0, 320.0))),
    );

    let renders = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&renders);
    let sub = v.subscribe(move |list| {
        counter.fetch_add(1, Ordering::SeqCst);
        println!("render pass: window={:?}", list.window());
    });

    // A burst of scroll events plus a resize, coalesced into one render.
    v.batch_update(|v| {
        v.set_scroll_offset(1_000.0);
        v.set_scroll_offset(1_024.0);
        v.set_viewport(Viewport::new(640.0, 480.0));
    });

    v.apply_scroll_event_clamped(10_000_000.0);
    v.unsubscribe(sub);

    println!("total_height={}", v.total_height());
    println!("leading_spacer={}", v.leading_spacer());
    println!("render passes: {}", renders.load(Ordering::SeqCst));
}

// Example: minimal usage and the jump-to-index helper.
use virtual_list::{RenderEntry, Viewport, VirtualList, VirtualListOptions};

fn main() {
    let items: Vec<String> = (0..1_000_000).map(|i| format!("row #{i}")).collect();

    let mut v = VirtualList::new(
        VirtualListOptions::new(items.len(), 24.0)
            .with_initial_viewport(Some(Viewport::new(640.0, 480.0))),
    );
    v.apply_scroll_event(123_456.0);

    let mut entries: Vec<RenderEntry<&String>> = Vec::new();
    v.collect_entries(&items, &mut entries);

    println!("window={:?}", v.window());
    println!("layout={:?}", v.wrapper_layout());
    println!("first_rendered={:?}", entries.first());

    let offset = v.scroll_to(999_999).unwrap();
    println!("after scroll_to: offset={offset} window={:?}", v.window());
}

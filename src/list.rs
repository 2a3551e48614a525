use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::options::{Listener, VirtualListOptions};
use crate::types::{ItemHeight, RenderEntry, Viewport, Window, WrapperLayout};

/// Window applied before the container delivers its first measurement.
const INITIAL_WINDOW_LEN: usize = 10;

/// Handle returned by [`VirtualList::subscribe`], used to unregister.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// A headless windowing engine for one scrollable list.
///
/// The engine is driven by three external signals — container size, scroll
/// offset, and list configuration — each of which runs a full synchronous
/// [`VirtualList::calculate_range`] before control returns. The current
/// [`Window`] is the only stored state; extents and spacers are recomputed on
/// demand rather than cached.
///
/// All listener registration is per instance: each engine owns its own
/// subscriber set and there is no process-wide registry.
#[derive(Clone)]
pub struct VirtualList {
    options: VirtualListOptions,
    viewport: Viewport,
    scroll_offset: f64,
    window: Window,

    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl VirtualList {
    /// Creates a new engine from options.
    ///
    /// If `options.initial_viewport` is set the first range calculation runs
    /// immediately; otherwise the window starts as `[0, min(10, count))` and
    /// stays there until the container is measured.
    pub fn new(options: VirtualListOptions) -> Self {
        if options.item_height.is_degenerate() {
            wwarn!(
                item_height = ?options.item_height,
                "item height is not a positive number; layout will degenerate"
            );
        }
        wdebug!(
            count = options.count,
            overscan = options.overscan,
            "VirtualList::new"
        );
        let viewport = options.initial_viewport.unwrap_or_default();
        let scroll_offset = options.initial_offset.max(0.0);
        let window = Window {
            start: 0,
            end: INITIAL_WINDOW_LEN.min(options.count),
        };
        let mut list = Self {
            options,
            viewport,
            scroll_offset,
            window,
            listeners: Vec::new(),
            next_listener_id: 0,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        };
        list.calculate_range();
        list
    }

    pub fn options(&self) -> &VirtualListOptions {
        &self.options
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    pub fn overscan(&self) -> usize {
        self.options.overscan
    }

    pub fn item_height(&self) -> &ItemHeight {
        &self.options.item_height
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Whether a measured container is currently attached.
    pub fn is_attached(&self) -> bool {
        self.viewport.is_measured()
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// The current render window. Always satisfies
    /// `0 <= start <= end <= count`.
    pub fn window(&self) -> Window {
        self.window
    }

    /// Registers a per-instance listener fired after every state change.
    pub fn subscribe(
        &mut self,
        listener: impl Fn(&VirtualList) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, Arc::new(listener)));
        Subscription(id)
    }

    /// Removes a listener. Returns `false` when the subscription was already
    /// gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription.0);
        self.listeners.len() != before
    }

    fn notify_now(&self) {
        for (_, listener) in &self.listeners {
            listener(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single listener notification.
    ///
    /// Useful when an adapter applies several signals on one frame (resize +
    /// scroll) and the listeners drive rendering.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    /// Stores a new container measurement and recomputes the window.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport == viewport {
            return;
        }
        self.batch_update(|v| {
            v.viewport = viewport;
            v.calculate_range();
            v.notify();
        });
    }

    /// Forgets the container measurement, e.g. when the scroll element is
    /// unmounted. The window retains its prior value until the next
    /// measurement arrives.
    pub fn detach(&mut self) {
        if self.viewport == Viewport::default() {
            return;
        }
        self.batch_update(|v| {
            v.viewport = Viewport::default();
            v.notify();
        });
    }

    /// Stores a new scroll offset and recomputes the window.
    ///
    /// Negative offsets are clamped to 0; offsets past the total extent are
    /// accepted and produce a degenerate (possibly empty) window rather than
    /// an error. Use [`Self::set_scroll_offset_clamped`] to stay in range.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        let offset = offset.max(0.0);
        if self.scroll_offset == offset {
            return;
        }
        self.batch_update(|v| {
            v.scroll_offset = offset;
            v.calculate_range();
            v.notify();
        });
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: f64) {
        let clamped = self.clamp_scroll_offset(offset);
        self.set_scroll_offset(clamped);
    }

    /// Applies a container resize reported by the size observer.
    pub fn apply_resize_event(&mut self, viewport: Viewport) {
        wtrace!(
            width = ?viewport.width,
            height = ?viewport.height,
            "apply_resize_event"
        );
        self.batch_update(|v| v.set_viewport(viewport));
    }

    /// Applies a raw scroll offset reported by the scroll-event source.
    pub fn apply_scroll_event(&mut self, offset: f64) {
        wtrace!(offset, "apply_scroll_event");
        self.batch_update(|v| v.set_scroll_offset(offset));
    }

    /// Same as [`Self::apply_scroll_event`], but clamps the offset.
    pub fn apply_scroll_event_clamped(&mut self, offset: f64) {
        wtrace!(offset, "apply_scroll_event_clamped");
        self.batch_update(|v| v.set_scroll_offset_clamped(offset));
    }

    /// Updates the list length, re-clamping the window even while detached so
    /// its invariant holds.
    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        self.batch_update(|v| {
            v.options.count = count;
            v.window = v.window.clamped_to(count);
            v.calculate_range();
            v.notify();
        });
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        if self.options.overscan == overscan {
            return;
        }
        self.batch_update(|v| {
            v.options.overscan = overscan;
            v.calculate_range();
            v.notify();
        });
    }

    pub fn set_item_height(&mut self, item_height: impl Into<ItemHeight>) {
        let item_height = item_height.into();
        if item_height.is_degenerate() {
            wwarn!(
                item_height = ?item_height,
                "item height is not a positive number; layout will degenerate"
            );
        }
        self.batch_update(|v| {
            v.options.item_height = item_height;
            v.calculate_range();
            v.notify();
        });
    }

    /// Replaces the whole configuration.
    ///
    /// `initial_viewport`/`initial_offset` only take effect at construction;
    /// they are ignored here.
    pub fn set_options(&mut self, options: VirtualListOptions) {
        if options.item_height.is_degenerate() {
            wwarn!(
                item_height = ?options.item_height,
                "item height is not a positive number; layout will degenerate"
            );
        }
        wtrace!(
            count = options.count,
            overscan = options.overscan,
            "VirtualList::set_options"
        );
        self.batch_update(|v| {
            let count = options.count;
            v.options = options;
            v.window = v.window.clamped_to(count);
            v.calculate_range();
            v.notify();
        });
    }

    /// Clones the current options, applies `f`, then delegates to
    /// [`Self::set_options`].
    pub fn update_options(&mut self, f: impl FnOnce(&mut VirtualListOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    /// Recomputes the render window from the current signals.
    ///
    /// While the container is unmeasured this is a no-op and the window keeps
    /// its previous value. Calling it twice with no intervening signal change
    /// yields an identical window.
    pub fn calculate_range(&mut self) {
        let Some(height) = self.viewport.height else {
            return;
        };
        let offset = self.offset_index(self.scroll_offset);
        let capacity = self.view_capacity(height);
        let overscan = self.options.overscan;

        let to = offset.saturating_add(capacity).saturating_add(overscan);
        let end = to.min(self.options.count);
        let start = offset.saturating_sub(overscan).min(end);
        self.replace_window(Window { start, end });
    }

    fn replace_window(&mut self, window: Window) {
        if self.window == window {
            return;
        }
        wtrace!(start = window.start, end = window.end, "replace_window");
        self.window = window;
        self.notify();
    }

    /// Index of the first item that should begin rendering for a scroll
    /// offset.
    ///
    /// Both branches carry a deliberate one-item lookahead: the result is one
    /// past the exact boundary index.
    fn offset_index(&self, scroll_offset: f64) -> usize {
        match &self.options.item_height {
            ItemHeight::Uniform(h) => floor_to_usize(scroll_offset / h).saturating_add(1),
            ItemHeight::PerItem(f) => {
                let count = self.options.count;
                let mut sum = 0.0;
                for i in 0..count {
                    sum += f(i);
                    if sum >= scroll_offset {
                        return i + 1;
                    }
                }
                // Scrolled past the total extent.
                count
            }
        }
    }

    /// Number of items the viewport can hold, counted from the current window
    /// start in the per-item branch.
    fn view_capacity(&self, container_height: f64) -> usize {
        match &self.options.item_height {
            ItemHeight::Uniform(h) => ceil_to_usize(container_height / h),
            ItemHeight::PerItem(f) => {
                let count = self.options.count;
                let start = self.window.start;
                let mut sum = 0.0;
                for i in start..count {
                    sum += f(i);
                    if sum >= container_height {
                        // Index reached minus the window start; one short of
                        // the accumulated count, matching the lookahead in
                        // `offset_index`.
                        return i - start;
                    }
                }
                // The remaining items never fill the viewport.
                count.saturating_sub(start)
            }
        }
    }

    /// Summed height of the entire list, used to size the scrollable area so
    /// native scrollbars reflect the full (unrendered) list.
    pub fn total_height(&self) -> f64 {
        match &self.options.item_height {
            ItemHeight::Uniform(h) => self.options.count as f64 * h,
            ItemHeight::PerItem(f) => (0..self.options.count).map(|i| f(i)).sum(),
        }
    }

    /// Cumulative height of all items strictly before `index`.
    ///
    /// In the uniform branch an out-of-range index extrapolates
    /// (`index * item_height`); the per-item branch clamps the fold to the
    /// list length. Either way the result is defined, never an error.
    pub fn distance_to(&self, index: usize) -> f64 {
        match &self.options.item_height {
            ItemHeight::Uniform(h) => index as f64 * h,
            ItemHeight::PerItem(f) => (0..index.min(self.options.count)).map(|i| f(i)).sum(),
        }
    }

    /// Jumps the scroll offset to `index` and recomputes the window
    /// immediately, without waiting for a scroll notification.
    ///
    /// Returns the applied offset so the adapter can forward it to the real
    /// scroll element, or `None` while no container is attached.
    pub fn scroll_to(&mut self, index: usize) -> Option<f64> {
        if !self.viewport.is_measured() {
            return None;
        }
        let offset = self.distance_to(index);
        wdebug!(index, offset, "scroll_to");
        self.set_scroll_offset(offset);
        Some(offset)
    }

    /// Largest scroll offset that still shows a full viewport of items.
    pub fn max_scroll_offset(&self) -> f64 {
        let view = self.viewport.height.unwrap_or(0.0);
        (self.total_height() - view).max(0.0)
    }

    pub fn clamp_scroll_offset(&self, offset: f64) -> f64 {
        offset.max(0.0).min(self.max_scroll_offset())
    }

    /// Leading spacer placed before the rendered window so it sits at its
    /// true visual offset.
    pub fn leading_spacer(&self) -> f64 {
        self.distance_to(self.window.start)
    }

    pub fn wrapper_layout(&self) -> WrapperLayout {
        WrapperLayout {
            total_height: self.total_height(),
            leading_spacer: self.leading_spacer(),
        }
    }

    /// Visits the windowed slice of `items`, pairing each element with its
    /// absolute index.
    ///
    /// The window is re-clamped to `items.len()` in case the caller's list is
    /// shorter than the configured count.
    pub fn for_each_entry<'a, T>(&self, items: &'a [T], mut f: impl FnMut(RenderEntry<&'a T>)) {
        let window = self.window.clamped_to(items.len());
        for (data, index) in items[window.start..window.end].iter().zip(window.start..) {
            f(RenderEntry { data, index });
        }
    }

    /// Collects the windowed entries into `out` (clears `out` first).
    ///
    /// Convenience wrapper around [`Self::for_each_entry`]; adapters that
    /// render every frame should reuse the buffer.
    pub fn collect_entries<'a, T>(&self, items: &'a [T], out: &mut Vec<RenderEntry<&'a T>>) {
        out.clear();
        self.for_each_entry(items, |entry| out.push(entry));
    }
}

impl core::fmt::Debug for VirtualList {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualList")
            .field("options", &self.options)
            .field("viewport", &self.viewport)
            .field("scroll_offset", &self.scroll_offset)
            .field("window", &self.window)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

// Float→integer casts saturate: negative/NaN map to 0, +inf to usize::MAX.
// That keeps degenerate item heights (zero, infinite ratios) on the defined,
// non-panicking path.
fn floor_to_usize(x: f64) -> usize {
    x as usize
}

fn ceil_to_usize(x: f64) -> usize {
    let truncated = x as usize;
    if (truncated as f64) < x {
        truncated.saturating_add(1)
    } else {
        truncated
    }
}

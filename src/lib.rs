//! A headless windowing engine for virtualized lists.
//!
//! Given a very large ordered list, this crate computes the minimal contiguous
//! sub-range of items that must be materialized for the current viewport: the
//! render window `[start, end)`, the total scrollable extent of the full list,
//! and the leading spacer that positions the window at its true visual offset.
//!
//! It is UI-agnostic. A rendering layer is expected to provide:
//! - the scroll container (attachment point, `overflow: auto`-style behavior)
//! - viewport measurements, forwarded via [`VirtualList::apply_resize_event`]
//! - raw scroll offsets, forwarded via [`VirtualList::apply_scroll_event`]
//!
//! In return it receives the window to slice the source list with (paired with
//! absolute indexes, see [`RenderEntry`]), a [`WrapperLayout`] to fake the full
//! scrollable size, and [`VirtualList::scroll_to`] for programmatic jumps.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod list;
mod options;
mod types;


pub use list::{Subscription, VirtualList};
pub use options::{Listener, VirtualListOptions};
pub use types::{ItemHeight, RenderEntry, Viewport, Window, WrapperLayout};

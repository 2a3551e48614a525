use alloc::sync::Arc;

use crate::list::VirtualList;
use crate::types::{ItemHeight, Viewport};

/// A callback fired when the engine's state changes (window replaced, signal
/// applied, configuration updated).
///
/// Registered per instance via [`VirtualList::subscribe`]; there is no global
/// registry.
pub type Listener = Arc<dyn Fn(&VirtualList) + Send + Sync>;

pub(crate) const DEFAULT_OVERSCAN: usize = 5;

/// Configuration for [`VirtualList`].
///
/// Cheap to clone: the per-item height function is stored in an `Arc`, so
/// adapters can tweak a field and call `VirtualList::set_options` without
/// reallocating closures.
#[derive(Clone)]
pub struct VirtualListOptions {
    /// Number of items in the full list.
    pub count: usize,
    /// Uniform or per-item height. A non-positive uniform height is a
    /// configuration warning, not an error; see [`ItemHeight::is_degenerate`].
    pub item_height: ItemHeight,
    /// Extra items rendered beyond each edge of the strictly-visible range,
    /// to reduce blank flashes during fast scrolling.
    pub overscan: usize,
    /// Viewport applied at construction, for containers measured up front.
    pub initial_viewport: Option<Viewport>,
    /// Scroll offset applied at construction.
    pub initial_offset: f64,
}

impl VirtualListOptions {
    /// Creates options with the default overscan (5) and an unmeasured
    /// viewport.
    pub fn new(count: usize, item_height: impl Into<ItemHeight>) -> Self {
        Self {
            count,
            item_height: item_height.into(),
            overscan: DEFAULT_OVERSCAN,
            initial_viewport: None,
            initial_offset: 0.0,
        }
    }

    pub fn with_item_height(mut self, item_height: impl Into<ItemHeight>) -> Self {
        self.item_height = item_height.into();
        self
    }

    pub fn with_per_item_height(
        mut self,
        item_height: impl Fn(usize) -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.item_height = ItemHeight::per_item(item_height);
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_initial_viewport(mut self, initial_viewport: Option<Viewport>) -> Self {
        self.initial_viewport = initial_viewport;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: f64) -> Self {
        self.initial_offset = initial_offset;
        self
    }
}

impl core::fmt::Debug for VirtualListOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualListOptions")
            .field("count", &self.count)
            .field("item_height", &self.item_height)
            .field("overscan", &self.overscan)
            .field("initial_viewport", &self.initial_viewport)
            .field("initial_offset", &self.initial_offset)
            .finish_non_exhaustive()
    }
}

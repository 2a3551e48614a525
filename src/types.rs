use alloc::sync::Arc;

/// Per-item height configuration.
///
/// Heights are logical pixels (fractional values are fine). For the
/// [`ItemHeight::PerItem`] form the function must be pure within one
/// computation pass: the same index always yields the same height.
#[derive(Clone)]
pub enum ItemHeight {
    /// Every item has the same height.
    Uniform(f64),
    /// Height looked up per absolute item index.
    PerItem(Arc<dyn Fn(usize) -> f64 + Send + Sync>),
}

impl ItemHeight {
    pub fn uniform(height: f64) -> Self {
        Self::Uniform(height)
    }

    pub fn per_item(f: impl Fn(usize) -> f64 + Send + Sync + 'static) -> Self {
        Self::PerItem(Arc::new(f))
    }

    /// True when the uniform height is not a positive finite number.
    ///
    /// A degenerate height does not fail any operation; the layout collapses
    /// to all-items-have-zero-height behavior instead (undefined visually,
    /// but never a panic).
    pub fn is_degenerate(&self) -> bool {
        match self {
            Self::Uniform(h) => !(h.is_finite() && *h > 0.0),
            Self::PerItem(_) => false,
        }
    }
}

impl From<f64> for ItemHeight {
    fn from(height: f64) -> Self {
        Self::Uniform(height)
    }
}

impl core::fmt::Debug for ItemHeight {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Uniform(h) => f.debug_tuple("Uniform").field(h).finish(),
            Self::PerItem(_) => f.write_str("PerItem(..)"),
        }
    }
}

/// Externally measured size of the scroll container.
///
/// Both axes are `None` until the container is attached and measured. Only
/// `height` participates in windowing; `width` is carried for the rendering
/// layer's benefit.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    /// Whether the container has delivered a usable height.
    pub fn is_measured(&self) -> bool {
        self.height.is_some()
    }
}

/// The contiguous index range `[start, end)` that should be rendered.
///
/// Invariant: `0 <= start <= end <= count`. The engine only ever replaces a
/// window wholesale; it never mutates one half of the pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

impl Window {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    pub(crate) fn clamped_to(self, count: usize) -> Self {
        let end = self.end.min(count);
        Self {
            start: self.start.min(end),
            end,
        }
    }
}

/// A windowed list element paired with its absolute index in the full list.
///
/// Rendered items occupy a sliced sub-array, but keying and absolute
/// positioning need their true position, so the index travels with the data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderEntry<T> {
    pub data: T,
    pub index: usize,
}

/// Geometry for the wrapper element that fakes the full scrollable size.
///
/// `total_height` sizes the scrollable area so native scrollbars reflect the
/// whole (unrendered) list; `leading_spacer` is the empty length placed before
/// the rendered window so it sits where it would within the full list.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WrapperLayout {
    pub total_height: f64,
    pub leading_spacer: f64,
}

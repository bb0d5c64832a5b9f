//! Focus-driven preview text
//!
//! The bridge calls the caller's function only when the focused option
//! changes and keeps the last text, so redraws without movement stay cheap.

use tracing::trace;

type PreviewFn<'a, V> = Box<dyn Fn(&str, &V) -> Option<String> + 'a>;

/// Produces supplementary text for the focused option
pub struct PreviewBridge<'a, V> {
    func: PreviewFn<'a, V>,
    focused: Option<usize>,
    text: Option<String>,
}

impl<'a, V> PreviewBridge<'a, V> {
    /// Preview computed from the option value alone
    pub fn new(func: impl Fn(&V) -> Option<String> + 'a) -> Self {
        Self::with_label(move |_, value| func(value))
    }

    /// Preview that also sees the option's display label
    pub fn with_label(func: impl Fn(&str, &V) -> Option<String> + 'a) -> Self {
        Self {
            func: Box::new(func),
            focused: None,
            text: None,
        }
    }

    /// Report the focused option; the preview function runs only when
    /// `index` differs from the previous call
    pub fn focus(&mut self, index: usize, label: &str, value: &V) -> Option<&str> {
        if self.focused != Some(index) {
            trace!(index, "refreshing preview");
            self.text = (self.func)(label, value);
            self.focused = Some(index);
        }
        self.text.as_deref()
    }

    /// Last computed text
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl<V> std::fmt::Debug for PreviewBridge<'_, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewBridge")
            .field("focused", &self.focused)
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

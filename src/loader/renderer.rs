//! Rendering seam between the list loader and whatever displays the list.

use crate::content::ContentItem;

/// How a loaded page relates to what is already on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// The page is the first of a query and replaces any previous items.
    Replace,
    /// The page continues the current list.
    Append,
}

/// Receives loaded pages and status messages from a
/// [`ListLoader`](super::ListLoader).
///
/// Methods take `&self`; implementations that buffer output use interior
/// mutability.
#[cfg_attr(test, mockall::automock)]
pub trait ListRenderer {
    /// Removes every item shown for the previous query.
    fn clear(&self);

    /// Shows a loaded page.
    fn render(&self, page: &[ContentItem], mode: RenderMode);

    /// Shows the empty state instead of an empty list.
    fn show_empty(&self, message: &str);

    /// Shows a load failure.
    fn show_error(&self, message: &str);
}

impl<T> ListRenderer for &T
where
    T: ListRenderer + ?Sized,
{
    fn clear(&self) {
        (**self).clear();
    }

    fn render(&self, page: &[ContentItem], mode: RenderMode) {
        (**self).render(page, mode);
    }

    fn show_empty(&self, message: &str) {
        (**self).show_empty(message);
    }

    fn show_error(&self, message: &str) {
        (**self).show_error(message);
    }
}

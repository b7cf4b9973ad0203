//! Row descriptors and the capabilities a listing needs from its caller.

use super::expansion::ExpansionState;
use super::path;
use super::window::RowTemplate;

/// How a label should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelStyle {
    #[default]
    Plain,
    Directory,
    File,
}

/// Rendered label content for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemLabel {
    pub text: String,
    pub style: LabelStyle,
}

impl ItemLabel {
    pub fn new(text: impl Into<String>, style: LabelStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, LabelStyle::Plain)
    }
}

/// Expand indicator shown in front of the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemIcon {
    Leaf,
    Collapsed,
    Expanded,
}

/// One materialized row of the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub id: String,
    /// Tooltip-style full ID.
    pub title: String,
    pub indent: usize,
    pub height: u32,
    pub icon: ItemIcon,
    pub label: ItemLabel,
    pub selected: bool,
}

impl ItemRow {
    pub fn is_expandable(&self) -> bool {
        self.icon != ItemIcon::Leaf
    }
}

/// Lookups a listing performs without owning the catalog.
///
/// Every method may suspend; the listing awaits each call before using its
/// result and never issues two calls at once.
#[allow(async_fn_in_trait)]
pub trait ItemSource {
    /// Whether `id` has children that can be shown beneath it.
    async fn is_expandable(&self, id: &str) -> bool;

    /// Label for `id`. `None` shows the raw ID.
    async fn item_label(&self, id: &str) -> Option<ItemLabel>;

    /// IDs to show directly underneath `id` when it is expanded.
    async fn item_children(&self, id: &str) -> Vec<String>;
}

/// Notified whenever an item becomes, or is re-rendered as, selected.
pub trait SelectionListener {
    fn on_select_item(&mut self, id: &str, row: &ItemRow);
}

impl<F> SelectionListener for F
where
    F: FnMut(&str, &ItemRow),
{
    fn on_select_item(&mut self, id: &str, row: &ItemRow) {
        self(id, row)
    }
}

/// Builds rows for visible IDs from the template.
#[derive(Debug, Clone, Copy)]
pub struct ItemFactory {
    template: RowTemplate,
}

impl ItemFactory {
    pub fn new(template: RowTemplate) -> Self {
        Self { template }
    }

    pub fn template(&self) -> RowTemplate {
        self.template
    }

    /// Build the row for `id`.
    pub async fn make_item<S: ItemSource>(
        &self,
        source: &S,
        id: &str,
        expansion: &ExpansionState,
        selected: Option<&str>,
    ) -> ItemRow {
        let indent = (path::depth_of(id) - 1) * self.template.indent_unit;

        let icon = if source.is_expandable(id).await {
            if expansion.is_expanded(id) {
                ItemIcon::Expanded
            } else {
                ItemIcon::Collapsed
            }
        } else {
            ItemIcon::Leaf
        };

        let label = source
            .item_label(id)
            .await
            .unwrap_or_else(|| ItemLabel::plain(id));

        ItemRow {
            id: id.to_string(),
            title: id.to_string(),
            indent,
            height: self.template.height,
            icon,
            label,
            selected: selected == Some(id),
        }
    }
}

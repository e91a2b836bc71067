//! The mounted screen: an optional header bar, the main region and an
//! optional image overlay.

use tracing::debug;

use crate::{action::UiAction, view::ViewNode};

pub const MAIN_ID: &str = "main";
pub const CART_BADGE_ID: &str = "cart-items";

#[derive(Debug, Clone)]
pub struct Page {
    header: Option<ViewNode>,
    main: ViewNode,
    overlay: Option<ViewNode>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// A page without the header bar, so no cart badge is mounted.
    pub fn new() -> Self {
        Self {
            header: None,
            main: ViewNode::div().id(MAIN_ID),
            overlay: None,
        }
    }

    pub fn with_header() -> Self {
        Self {
            header: Some(render_header()),
            ..Self::new()
        }
    }

    /// Replaces everything inside the main region.
    pub fn mount(&mut self, content: Vec<ViewNode>) {
        self.main.children = content;
        self.main.text = None;
    }

    pub fn main(&self) -> &ViewNode {
        &self.main
    }

    pub fn overlay(&self) -> Option<&ViewNode> {
        self.overlay.as_ref()
    }

    pub fn show_overlay(&mut self, overlay: ViewNode) {
        self.overlay = Some(overlay);
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn element(&self, id: &str) -> Option<&ViewNode> {
        self.regions().find_map(|region| region.find_by_id(id))
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut ViewNode> {
        if let Some(found) = self.header.as_mut().and_then(|h| h.find_by_id_mut(id)) {
            return Some(found);
        }
        if let Some(found) = self.main.find_by_id_mut(id) {
            return Some(found);
        }
        self.overlay.as_mut().and_then(|o| o.find_by_id_mut(id))
    }

    pub fn badge_text(&self) -> Option<&str> {
        self.element(CART_BADGE_ID)?.text.as_deref()
    }

    /// Writes the badge if the header is mounted; otherwise does nothing.
    pub fn set_badge(&mut self, count: usize) {
        match self.element_mut(CART_BADGE_ID) {
            Some(badge) => badge.text = Some(count.to_string()),
            None => debug!(count, "cart badge not mounted; skipping update"),
        }
    }

    /// Clickable actions across all regions, in display order.
    pub fn actions(&self) -> Vec<(String, UiAction)> {
        self.regions()
            .flat_map(|region| region.actions())
            .filter_map(|node| {
                let action = node.on_click.clone()?;
                let label = node
                    .text
                    .clone()
                    .or_else(|| node.attr_value("alt").map(str::to_string))
                    .unwrap_or_else(|| action.name().to_string());
                Some((label, action))
            })
            .collect()
    }

    pub fn render_text(&self) -> String {
        self.regions().map(ViewNode::render_text).collect()
    }

    fn regions(&self) -> impl Iterator<Item = &ViewNode> {
        self.header
            .iter()
            .chain(std::iter::once(&self.main))
            .chain(self.overlay.iter())
    }
}

fn render_header() -> ViewNode {
    ViewNode::div()
        .class("header")
        .child(ViewNode::button("Orders", UiAction::ShowOrders))
        .child(ViewNode::button("Cart", UiAction::ShowCart))
        .child(ViewNode::new("span").id(CART_BADGE_ID).text("0"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_update_is_a_no_op_without_header() {
        let mut page = Page::new();
        page.set_badge(3);
        assert_eq!(page.badge_text(), None);
    }

    #[test]
    fn badge_update_writes_count_when_mounted() {
        let mut page = Page::with_header();
        assert_eq!(page.badge_text(), Some("0"));
        page.set_badge(3);
        assert_eq!(page.badge_text(), Some("3"));
    }

    #[test]
    fn mount_replaces_main_content() {
        let mut page = Page::new();
        page.mount(vec![ViewNode::div().id("first")]);
        page.mount(vec![ViewNode::div().id("second")]);
        assert!(page.element("first").is_none());
        assert!(page.element("second").is_some());
        assert!(page.element(MAIN_ID).is_some());
    }

    #[test]
    fn actions_include_header_and_overlay() {
        let mut page = Page::with_header();
        page.show_overlay(ViewNode::button("Close", UiAction::CloseImage));
        let actions: Vec<UiAction> = page.actions().into_iter().map(|(_, a)| a).collect();
        assert_eq!(
            actions,
            vec![UiAction::ShowOrders, UiAction::ShowCart, UiAction::CloseImage]
        );
    }
}

//! Order history and order detail views. Nothing is cached; every view
//! fetches fresh data.

use std::sync::Arc;

use shared::{
    domain::OrderId,
    format::{format_date, format_money},
    protocol::{Order, OrderLineItem},
};
use tracing::{debug, warn};

use crate::{
    action::UiAction, api::StoreApi, notify::ErrorNotifier, page::Page, view::ViewNode,
};

pub const ORDER_LIST_ID: &str = "order-list";
pub const NO_ORDERS: &str = "No orders yet.";
pub const NO_ORDER_ITEMS: &str = "No items found for this order.";

const LIST_FAILED: &str = "Failed to load orders.";
const DETAIL_FAILED: &str = "Failed to load order details.";

pub struct OrderHistoryController {
    api: Arc<dyn StoreApi>,
    notifier: Arc<dyn ErrorNotifier>,
}

impl OrderHistoryController {
    pub fn new(api: Arc<dyn StoreApi>, notifier: Arc<dyn ErrorNotifier>) -> Self {
        Self { api, notifier }
    }

    /// Mounts the history page, then fills the list once orders arrive.
    pub async fn load_list(&self, page: &mut Page) -> bool {
        page.mount(render_order_history_page());

        match self.api.list_orders().await {
            Ok(orders) => {
                match page.element_mut(ORDER_LIST_ID) {
                    Some(list) => fill_order_list(list, &orders),
                    None => debug!("order list no longer mounted; dropping response"),
                }
                true
            }
            Err(err) => {
                warn!(error = %err, "loading order history failed");
                self.notifier.notify_error(LIST_FAILED);
                false
            }
        }
    }

    pub async fn load_detail(&self, page: &mut Page, order_id: OrderId) -> bool {
        match self.api.fetch_order(order_id).await {
            Ok(order) => {
                page.mount(render_order_detail(&order));
                true
            }
            Err(err) => {
                warn!(order_id = order_id.0, error = %err, "loading order detail failed");
                self.notifier.notify_error(DETAIL_FAILED);
                false
            }
        }
    }
}

pub fn render_order_history_page() -> Vec<ViewNode> {
    vec![ViewNode::div()
        .class("content-form")
        .child(ViewNode::new("h1").text("Order History"))
        .child(ViewNode::div().id(ORDER_LIST_ID))]
}

/// Replaces the list contents; an empty history gets a placeholder instead
/// of an empty container.
pub fn fill_order_list(list: &mut ViewNode, orders: &[Order]) {
    list.children.clear();
    if orders.is_empty() {
        list.text = Some(NO_ORDERS.to_string());
        return;
    }

    list.text = None;
    list.children = orders.iter().map(render_order_card).collect();
}

pub fn render_order_card(order: &Order) -> ViewNode {
    ViewNode::div()
        .class("order-card")
        .child(ViewNode::new("h3").text(format!("Order #{}", order.order_id)))
        .child(ViewNode::div().text(format!(
            "Date: {}",
            format_date(order.created_at.as_deref())
        )))
        .child(ViewNode::div().text(format!(
            "Shipping: ${}",
            format_money(order.shipping_amount)
        )))
        .child(ViewNode::div().text(format!("Total: ${}", format_money(order.total))))
        .child(
            ViewNode::button("View Details", UiAction::ViewOrder(order.order_id))
                .class("btn")
                .class("btn-secondary"),
        )
}

pub fn render_order_detail(order: &Order) -> Vec<ViewNode> {
    let summary = ViewNode::div()
        .class("order-summary")
        .child(ViewNode::div().text(format!(
            "Date: {}",
            format_date(order.created_at.as_deref())
        )))
        .child(ViewNode::div().text(format!(
            "Shipping: ${}",
            format_money(order.shipping_amount)
        )))
        .child(ViewNode::div().text(format!("Total: ${}", format_money(order.total))));

    let mut items = ViewNode::div().class("order-items");
    if order.items.is_empty() {
        items = items.text(NO_ORDER_ITEMS);
    } else {
        items.children = order.items.iter().map(render_line_item).collect();
    }

    vec![ViewNode::div()
        .class("content-form")
        .child(ViewNode::new("h1").text(format!("Order Details (#{})", order.order_id)))
        .child(
            ViewNode::button("Back to Orders", UiAction::BackToOrders)
                .class("btn")
                .class("btn-secondary"),
        )
        .child(summary)
        .child(items)]
}

pub fn render_line_item(item: &OrderLineItem) -> ViewNode {
    ViewNode::div().class("order-item-row").text(format!(
        "Product ID: {} | Qty: {} | Price: ${} | Discount: ${}",
        item.product_id,
        item.quantity,
        format_money(item.sales_price),
        format_money(item.discount)
    ))
}

#[cfg(test)]
#[path = "tests/orders_tests.rs"]
mod tests;

//! Storefront client: cart and order views over the storefront REST API.

use std::sync::Arc;

use shared::{
    domain::{OrderId, ProductId},
    protocol::Cart,
};
use tracing::debug;

pub mod action;
pub mod api;
pub mod auth;
pub mod cart;
pub mod error;
pub mod notify;
pub mod orders;
pub mod page;
pub mod view;

pub use action::UiAction;
pub use api::{StoreApi, StorefrontClient};
pub use auth::{AnonymousAuth, AuthHeaderProvider, BearerTokenAuth};
pub use cart::CartController;
pub use error::StoreError;
pub use notify::{ErrorNotifier, LogNotifier};
pub use orders::OrderHistoryController;
pub use page::Page;
pub use view::ViewNode;

/// Composition root: owns the page and both controllers and routes user
/// actions to them.
pub struct Storefront {
    page: Page,
    cart: CartController,
    orders: OrderHistoryController,
    auth: Arc<dyn AuthHeaderProvider>,
}

impl Storefront {
    pub fn new(
        api: Arc<dyn StoreApi>,
        auth: Arc<dyn AuthHeaderProvider>,
        notifier: Arc<dyn ErrorNotifier>,
    ) -> Self {
        Self::with_page(Page::with_header(), api, auth, notifier)
    }

    pub fn with_page(
        page: Page,
        api: Arc<dyn StoreApi>,
        auth: Arc<dyn AuthHeaderProvider>,
        notifier: Arc<dyn ErrorNotifier>,
    ) -> Self {
        Self {
            page,
            cart: CartController::new(Arc::clone(&api), Arc::clone(&notifier)),
            orders: OrderHistoryController::new(api, notifier),
            auth,
        }
    }

    /// Page entry. The cart endpoint is protected, so it is only loaded for a
    /// signed-in user.
    pub async fn enter(&mut self) {
        if self.auth.is_logged_in() {
            self.cart.load(&mut self.page).await;
        } else {
            debug!("not signed in; skipping cart load");
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn cart(&self) -> &Cart {
        self.cart.cart()
    }

    pub fn show_cart(&mut self) {
        self.cart.show(&mut self.page);
    }

    pub async fn show_orders(&mut self) -> bool {
        self.orders.load_list(&mut self.page).await
    }

    pub async fn show_order(&mut self, order_id: OrderId) -> bool {
        self.orders.load_detail(&mut self.page, order_id).await
    }

    pub async fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> bool {
        self.cart
            .set_quantity(&mut self.page, product_id, quantity)
            .await
    }

    /// Runs one user action. Returns false when the action's request failed
    /// or the action had nothing to act on.
    pub async fn dispatch(&mut self, action: UiAction) -> bool {
        debug!(action = action.name(), "dispatching ui action");
        let page = &mut self.page;
        match action {
            UiAction::ShowCart => {
                self.cart.show(page);
                true
            }
            UiAction::ShowOrders | UiAction::BackToOrders => self.orders.load_list(page).await,
            UiAction::ViewOrder(order_id) => self.orders.load_detail(page, order_id).await,
            UiAction::AddOne(product_id) => self.cart.increase_one(page, product_id).await,
            UiAction::DecreaseOne(product_id) => self.cart.decrease_one(page, product_id).await,
            UiAction::Remove(product_id) => self.cart.remove(page, product_id).await,
            UiAction::ClearCart => self.cart.clear(page).await,
            UiAction::Checkout => self.cart.checkout(page).await,
            UiAction::ShowImage { name, src } => {
                page.show_overlay(cart::render_image_detail(&name, &src));
                true
            }
            UiAction::CloseImage => {
                page.close_overlay();
                true
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

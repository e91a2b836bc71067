//! Cart state mirror and the cart page.
//!
//! The controller holds the only in-memory copy of the cart. It is replaced
//! wholesale from each successful response and never touched on failure.

use std::sync::Arc;

use shared::{
    domain::ProductId,
    format::format_money,
    protocol::{Cart, CartItem},
};
use tracing::{debug, info, warn};

use crate::{
    action::UiAction, api::StoreApi, error::StoreError, notify::ErrorNotifier, page::Page,
    view::ViewNode,
};

pub const CART_CONTENT_ID: &str = "content";
pub const PRODUCT_IMAGE_PATH: &str = "/images/products";

const LOAD_FAILED: &str = "Load cart failed.";
const ADD_FAILED: &str = "Add to cart failed.";
const UPDATE_FAILED: &str = "Update quantity failed.";
const CLEAR_FAILED: &str = "Empty cart failed.";
const CHECKOUT_FAILED: &str = "Checkout failed.";
const CHECKOUT_OK: &str = "Order placed successfully!";

pub struct CartController {
    api: Arc<dyn StoreApi>,
    notifier: Arc<dyn ErrorNotifier>,
    cart: Cart,
}

impl CartController {
    pub fn new(api: Arc<dyn StoreApi>, notifier: Arc<dyn ErrorNotifier>) -> Self {
        Self {
            api,
            notifier,
            cart: Cart::empty(),
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn item(&self, product_id: ProductId) -> Option<&CartItem> {
        self.cart.item(product_id)
    }

    /// Fetches the current user's cart. Updates the badge but leaves the
    /// main region alone.
    pub async fn load(&mut self, page: &mut Page) -> bool {
        match self.api.fetch_cart().await {
            Ok(cart) => {
                self.cart = cart;
                self.update_badge(page);
                true
            }
            Err(err) => self.fail("load", LOAD_FAILED, &err),
        }
    }

    pub async fn add_one(&mut self, page: &mut Page, product_id: ProductId) -> bool {
        let result = self.api.add_product(product_id).await;
        self.apply(page, result, "add_one", ADD_FAILED)
    }

    pub async fn increase_one(&mut self, page: &mut Page, product_id: ProductId) -> bool {
        self.add_one(page, product_id).await
    }

    /// Zero removes the line.
    pub async fn set_quantity(
        &mut self,
        page: &mut Page,
        product_id: ProductId,
        quantity: u32,
    ) -> bool {
        let result = self.api.update_quantity(product_id, quantity).await;
        self.apply(page, result, "set_quantity", UPDATE_FAILED)
    }

    /// Decides remove-vs-decrement from the last known local quantity, which
    /// can lag behind the server if another client changed the cart.
    pub async fn decrease_one(&mut self, page: &mut Page, product_id: ProductId) -> bool {
        let Some(current) = self.item(product_id).map(|item| item.quantity) else {
            debug!(product_id = product_id.0, "decrease on product not in cart; ignoring");
            return false;
        };

        match current.checked_sub(1).filter(|next| *next > 0) {
            Some(next) => self.set_quantity(page, product_id, next).await,
            None => self.remove(page, product_id).await,
        }
    }

    pub async fn remove(&mut self, page: &mut Page, product_id: ProductId) -> bool {
        self.set_quantity(page, product_id, 0).await
    }

    pub async fn clear(&mut self, page: &mut Page) -> bool {
        match self.api.clear_cart().await {
            Ok(()) => {
                self.cart = Cart::empty();
                self.update_badge(page);
                self.show(page);
                true
            }
            Err(err) => self.fail("clear", CLEAR_FAILED, &err),
        }
    }

    /// Places an order from the server-side cart, then reloads the cart the
    /// server has just emptied.
    pub async fn checkout(&mut self, page: &mut Page) -> bool {
        if let Err(err) = self.api.place_order().await {
            return self.fail("checkout", CHECKOUT_FAILED, &err);
        }

        info!(lines = self.cart.line_count(), "order placed");
        self.notifier.notify_success(CHECKOUT_OK);
        self.load(page).await;
        self.show(page);
        true
    }

    /// Renders the cart page into the main region.
    pub fn show(&self, page: &mut Page) {
        page.mount(render_cart_page(&self.cart));
    }

    pub fn update_badge(&self, page: &mut Page) {
        page.set_badge(self.cart.line_count());
    }

    fn apply(
        &mut self,
        page: &mut Page,
        result: Result<Cart, StoreError>,
        operation: &'static str,
        message: &str,
    ) -> bool {
        match result {
            Ok(cart) => {
                self.cart = cart;
                self.update_badge(page);
                self.show(page);
                true
            }
            Err(err) => self.fail(operation, message, &err),
        }
    }

    fn fail(&self, operation: &'static str, message: &str, err: &StoreError) -> bool {
        warn!(operation, error = %err, status = ?err.status_code(), "cart request failed");
        self.notifier.notify_error(message);
        false
    }
}

pub fn render_cart_page(cart: &Cart) -> Vec<ViewNode> {
    let header = ViewNode::div()
        .class("cart-header")
        .child(ViewNode::new("h1").text("Cart"))
        .child(ViewNode::button("Clear", UiAction::ClearCart).class("btn").class("btn-danger"))
        .child(ViewNode::button("Checkout", UiAction::Checkout).class("btn").class("btn-primary"));

    let mut content = ViewNode::div()
        .id(CART_CONTENT_ID)
        .class("content-form")
        .child(header);
    for item in &cart.items {
        content.push(render_item_row(item));
    }
    content.push(
        ViewNode::div()
            .class("cart-total")
            .text(format!("Total: ${}", format_money(Some(cart.total)))),
    );

    vec![ViewNode::div().class("filter-box"), content]
}

pub fn render_item_row(item: &CartItem) -> ViewNode {
    let product = &item.product;
    let product_id = product.product_id;
    let image_src = format!("{PRODUCT_IMAGE_PATH}/{}", product.image_url);

    let photo = ViewNode::div()
        .class("photo")
        .child(
            ViewNode::new("img")
                .attr("src", image_src.clone())
                .attr("alt", product.name.clone())
                .on_click(UiAction::ShowImage {
                    name: product.name.clone(),
                    src: image_src,
                }),
        )
        .child(
            ViewNode::new("h4")
                .class("price")
                .text(format!("${}", format_money(product.price))),
        );

    let controls = ViewNode::div()
        .class("qty-controls")
        .child(ViewNode::button("-", UiAction::DecreaseOne(product_id)))
        .child(ViewNode::new("span").text(format!(" {} ", item.quantity)))
        .child(ViewNode::button("+", UiAction::AddOne(product_id)))
        .child(
            ViewNode::button("Remove", UiAction::Remove(product_id))
                .class("btn")
                .class("btn-danger"),
        );

    ViewNode::div()
        .class("cart-item")
        .attr("data-product-id", product_id.to_string())
        .child(ViewNode::div().child(ViewNode::new("h4").text(product.name.clone())))
        .child(photo)
        .child(ViewNode::div().text(product.description.clone()))
        .child(controls)
}

/// Full-size product image shown over the current page.
pub fn render_image_detail(name: &str, src: &str) -> ViewNode {
    ViewNode::div()
        .class("image-detail")
        .child(ViewNode::new("h3").text(name))
        .child(ViewNode::new("img").attr("src", src).attr("alt", name))
        .child(ViewNode::button("Close", UiAction::CloseImage))
}

#[cfg(test)]
#[path = "tests/cart_tests.rs"]
mod tests;

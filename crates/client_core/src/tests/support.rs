//! In-memory stand-ins for the backend and the notifier.

use std::sync::Mutex;

use async_trait::async_trait;
use shared::{
    domain::{OrderId, ProductId},
    protocol::{Cart, CartItem, Order, OrderLineItem, Product},
};

use crate::{api::StoreApi, error::StoreError, notify::ErrorNotifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiCall {
    FetchCart,
    AddProduct(ProductId),
    UpdateQuantity(ProductId, u32),
    ClearCart,
    PlaceOrder,
    ListOrders,
    FetchOrder(OrderId),
}

impl ApiCall {
    fn kind(&self) -> &'static str {
        match self {
            Self::FetchCart => "fetch_cart",
            Self::AddProduct(_) => "add_product",
            Self::UpdateQuantity(..) => "update_quantity",
            Self::ClearCart => "clear_cart",
            Self::PlaceOrder => "place_order",
            Self::ListOrders => "list_orders",
            Self::FetchOrder(_) => "fetch_order",
        }
    }
}

/// Behaves like a small storefront backend: cart mutations apply to a server
/// cart and checkout turns it into an order.
pub struct FakeStoreApi {
    calls: Mutex<Vec<ApiCall>>,
    server_cart: Mutex<Cart>,
    orders: Mutex<Vec<Order>>,
    failing: Mutex<Vec<&'static str>>,
}

impl FakeStoreApi {
    pub fn new() -> Self {
        Self::with_cart(Cart::empty())
    }

    pub fn with_cart(cart: Cart) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            server_cart: Mutex::new(cart),
            orders: Mutex::new(Vec::new()),
            failing: Mutex::new(Vec::new()),
        }
    }

    pub fn with_orders(self, orders: Vec<Order>) -> Self {
        *self.orders.lock().expect("orders") = orders;
        self
    }

    /// Every call of this kind answers 500 from now on.
    pub fn fail(&self, kind: &'static str) {
        self.failing.lock().expect("failing").push(kind);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().expect("calls").clone()
    }

    pub fn set_server_cart(&self, cart: Cart) {
        *self.server_cart.lock().expect("cart") = cart;
    }

    fn record(&self, call: ApiCall) -> Result<(), StoreError> {
        self.calls.lock().expect("calls").push(call);
        if self.failing.lock().expect("failing").contains(&call.kind()) {
            return Err(StoreError::status(500));
        }
        Ok(())
    }

    fn mutate_cart(&self, apply: impl FnOnce(&mut Cart)) -> Cart {
        let mut cart = self.server_cart.lock().expect("cart");
        apply(&mut cart);
        cart.total = cart
            .items
            .iter()
            .map(|item| item.product.price.unwrap_or(0.0) * f64::from(item.quantity))
            .sum();
        cart.clone()
    }
}

#[async_trait]
impl StoreApi for FakeStoreApi {
    async fn fetch_cart(&self) -> Result<Cart, StoreError> {
        self.record(ApiCall::FetchCart)?;
        Ok(self.server_cart.lock().expect("cart").clone())
    }

    async fn add_product(&self, product_id: ProductId) -> Result<Cart, StoreError> {
        self.record(ApiCall::AddProduct(product_id))?;
        Ok(self.mutate_cart(|cart| {
            match cart.items.iter_mut().find(|i| i.product_id() == product_id) {
                Some(item) => item.quantity += 1,
                None => cart.items.push(item(product_id.0, 1, 10.0)),
            }
        }))
    }

    async fn update_quantity(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart, StoreError> {
        self.record(ApiCall::UpdateQuantity(product_id, quantity))?;
        Ok(self.mutate_cart(|cart| {
            if quantity == 0 {
                cart.items.retain(|i| i.product_id() != product_id);
            } else if let Some(item) = cart.items.iter_mut().find(|i| i.product_id() == product_id)
            {
                item.quantity = quantity;
            }
        }))
    }

    async fn clear_cart(&self) -> Result<(), StoreError> {
        self.record(ApiCall::ClearCart)?;
        self.mutate_cart(|cart| cart.items.clear());
        Ok(())
    }

    async fn place_order(&self) -> Result<(), StoreError> {
        self.record(ApiCall::PlaceOrder)?;
        self.mutate_cart(|cart| cart.items.clear());
        let mut orders = self.orders.lock().expect("orders");
        let next_id = orders.len() as i64 + 1;
        orders.push(order(next_id, Vec::new()));
        Ok(())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        self.record(ApiCall::ListOrders)?;
        Ok(self.orders.lock().expect("orders").clone())
    }

    async fn fetch_order(&self, order_id: OrderId) -> Result<Order, StoreError> {
        self.record(ApiCall::FetchOrder(order_id))?;
        self.orders
            .lock()
            .expect("orders")
            .iter()
            .find(|order| order.order_id == order_id)
            .cloned()
            .ok_or_else(|| StoreError::status(404))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    errors: Mutex<Vec<String>>,
    successes: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().expect("errors").clone()
    }

    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().expect("successes").clone()
    }
}

impl ErrorNotifier for RecordingNotifier {
    fn notify_error(&self, message: &str) {
        self.errors.lock().expect("errors").push(message.to_string());
    }

    fn notify_success(&self, message: &str) {
        self.successes
            .lock()
            .expect("successes")
            .push(message.to_string());
    }
}

pub fn item(product_id: i64, quantity: u32, price: f64) -> CartItem {
    CartItem {
        product: Product {
            product_id: ProductId(product_id),
            name: format!("Product {product_id}"),
            description: format!("Description of {product_id}"),
            price: Some(price),
            image_url: format!("{product_id}.jpg"),
        },
        quantity,
    }
}

pub fn cart(items: Vec<CartItem>, total: f64) -> Cart {
    Cart { items, total }
}

pub fn order(order_id: i64, items: Vec<OrderLineItem>) -> Order {
    Order {
        order_id: OrderId(order_id),
        created_at: Some("2024-03-05T14:07:09".to_string()),
        shipping_amount: Some(4.5),
        total: Some(24.0),
        items,
    }
}

pub fn line(product_id: i64, quantity: i64, sales_price: f64) -> OrderLineItem {
    OrderLineItem {
        product_id: ProductId(product_id),
        quantity,
        sales_price: Some(sales_price),
        discount: Some(0.0),
    }
}

//! User actions attached to clickable view nodes.

use shared::domain::{OrderId, ProductId};

#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    ShowCart,
    ShowOrders,
    AddOne(ProductId),
    DecreaseOne(ProductId),
    Remove(ProductId),
    ClearCart,
    Checkout,
    ViewOrder(OrderId),
    BackToOrders,
    ShowImage { name: String, src: String },
    CloseImage,
}

impl UiAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ShowCart => "show_cart",
            Self::ShowOrders => "show_orders",
            Self::AddOne(_) => "add_one",
            Self::DecreaseOne(_) => "decrease_one",
            Self::Remove(_) => "remove",
            Self::ClearCart => "clear_cart",
            Self::Checkout => "checkout",
            Self::ViewOrder(_) => "view_order",
            Self::BackToOrders => "back_to_orders",
            Self::ShowImage { .. } => "show_image",
            Self::CloseImage => "close_image",
        }
    }
}

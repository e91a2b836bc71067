use std::fmt;

use serde::{
    de::{IgnoredAny, MapAccess, SeqAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::Value;

use crate::domain::{OrderId, ProductId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: ProductId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn product_id(&self) -> ProductId {
        self.product.product_id
    }
}

/// Cart snapshot as returned by the backend.
///
/// On the wire `items` is an object keyed by product id. The keys are
/// discarded and the values kept in the order the response delivered them.
/// `total` is the server's figure and is never recomputed from the items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(
        default,
        deserialize_with = "items_in_wire_order",
        serialize_with = "items_keyed_by_product"
    )]
    pub items: Vec<CartItem>,
    #[serde(default, deserialize_with = "lenient_amount_or_zero")]
    pub total: f64,
}

impl Cart {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn item(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items
            .iter()
            .find(|item| item.product_id() == product_id)
    }

    /// Number of distinct line items, not summed quantities.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Body of `PUT /cart/products/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityUpdate {
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub shipping_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<OrderLineItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub product_id: ProductId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub sales_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub discount: Option<f64>,
}

/// Reads a money amount the way the backend may send it: a JSON number or a
/// numeric string. Anything else is treated as missing.
pub fn parse_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    amount.is_finite().then_some(amount)
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_amount(&value))
}

fn lenient_amount_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_amount(deserializer)?.unwrap_or(0.0))
}

// Only string timestamps are kept; arrays, epoch numbers and the like display
// as "N/A" instead of failing the whole response.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn items_in_wire_order<'de, D>(deserializer: D) -> Result<Vec<CartItem>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(KeyedItemsVisitor)
}

fn items_keyed_by_product<S>(items: &[CartItem], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(items.len()))?;
    for item in items {
        map.serialize_entry(&item.product_id().0.to_string(), item)?;
    }
    map.end()
}

struct KeyedItemsVisitor;

impl<'de> Visitor<'de> for KeyedItemsVisitor {
    type Value = Vec<CartItem>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("cart items keyed by product id")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut items = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((_, item)) = map.next_entry::<IgnoredAny, CartItem>()? {
            items.push(item);
        }
        Ok(items)
    }

    // Some backend builds send a plain array; accept it unchanged.
    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<CartItem>()? {
            items.push(item);
        }
        Ok(items)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Vec::new())
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Vec::new())
    }
}

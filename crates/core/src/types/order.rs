//! Immutable order record and its component types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AddressId, OrderId, OrderStatus, PaymentMethodId, ProductId};

/// A line item captured into an order.
///
/// This is a snapshot taken at order-creation time: name, price, and image
/// are copied from the product, not referenced, so later catalog edits do
/// not rewrite order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_image: String,
    pub quantity: u32,
    pub price: Decimal,
    pub total: Decimal,
}

/// A shipping address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    pub full_name: String,
    pub phone: String,
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    #[serde(default)]
    pub is_default: bool,
}

/// A stored payment method.
///
/// Card numbers are already masked by the gateway; this layer never sees a
/// full PAN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: PaymentMethodId,
    #[serde(rename = "type")]
    pub kind: String,
    pub card_number: String,
    pub card_holder: String,
    pub expiry_month: u8,
    pub expiry_year: u16,
    #[serde(default)]
    pub is_default: bool,
}

/// An order, immutable once created.
///
/// Totals are computed at creation and never recomputed; the only field this
/// client ever mutates afterwards is `status`, and only for a user
/// cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[serde(rename = "date")]
    pub placed_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub shipping_address: Address,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub tracking_number: String,
    pub estimated_delivery: NaiveDate,
}

impl Order {
    /// Whether the user may still cancel this order.
    #[must_use]
    pub const fn is_cancellable(&self) -> bool {
        self.status.is_cancellable()
    }

    /// Total quantity across all line items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_address() -> Address {
        Address {
            id: AddressId::new(1),
            full_name: "Asha Rao".to_string(),
            phone: "+911234567890".to_string(),
            address_line1: "14 Temple Street".to_string(),
            address_line2: String::new(),
            city: "Chennai".to_string(),
            state: "TN".to_string(),
            zip_code: "600001".to_string(),
            country: "India".to_string(),
            is_default: true,
        }
    }

    fn sample_payment() -> PaymentMethod {
        PaymentMethod {
            id: PaymentMethodId::new(1),
            kind: "card".to_string(),
            card_number: "**** **** **** 4242".to_string(),
            card_holder: "Asha Rao".to_string(),
            expiry_month: 12,
            expiry_year: 2027,
            is_default: true,
        }
    }

    #[test]
    fn serializes_with_gateway_field_names() {
        let order = Order {
            id: OrderId::from_timestamp_millis(1_700_000_000_000),
            placed_at: DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
            status: OrderStatus::Pending,
            items: vec![OrderItem {
                product_id: ProductId::new(9),
                product_name: "Clay Teapot".to_string(),
                product_image: String::new(),
                quantity: 2,
                price: Decimal::from(1000),
                total: Decimal::from(2000),
            }],
            subtotal: Decimal::from(2000),
            shipping: Decimal::from(500),
            tax: Decimal::from(360),
            discount: Decimal::ZERO,
            total: Decimal::from(2860),
            shipping_address: sample_address(),
            payment_method: sample_payment(),
            tracking_number: String::new(),
            estimated_delivery: NaiveDate::from_ymd_opt(2023, 11, 21).unwrap(),
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["id"], "ORD-1700000000000");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["items"][0]["productName"], "Clay Teapot");
        assert_eq!(json["shippingAddress"]["zipCode"], "600001");
        assert_eq!(json["paymentMethod"]["type"], "card");
        assert_eq!(json["estimatedDelivery"], "2023-11-21");
        assert!(json.get("date").is_some());
    }

    #[test]
    fn item_count_sums_quantities() {
        let order = Order {
            id: OrderId::new("ORD-1"),
            placed_at: Utc::now(),
            status: OrderStatus::Pending,
            items: vec![
                OrderItem {
                    product_id: ProductId::new(1),
                    product_name: String::new(),
                    product_image: String::new(),
                    quantity: 2,
                    price: Decimal::ONE,
                    total: Decimal::from(2),
                },
                OrderItem {
                    product_id: ProductId::new(2),
                    product_name: String::new(),
                    product_image: String::new(),
                    quantity: 3,
                    price: Decimal::ONE,
                    total: Decimal::from(3),
                },
            ],
            subtotal: Decimal::from(5),
            shipping: Decimal::from(500),
            tax: Decimal::ONE,
            discount: Decimal::ZERO,
            total: Decimal::from(506),
            shipping_address: sample_address(),
            payment_method: sample_payment(),
            tracking_number: String::new(),
            estimated_delivery: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };

        assert_eq!(order.item_count(), 5);
    }
}

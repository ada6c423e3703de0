//! Demo seed data: six products, two users, one delivered order.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::domain::aggregates::cart::CartLine;
use crate::domain::aggregates::order::{Address, Order, OrderStatus, PaymentGateway, TimelineEntry};
use crate::domain::aggregates::product::{Product, ProductVariant};
use crate::domain::value_objects::{Currency, Quantity, Sku};

fn variant(id: &str, name: &str, sku: &str, price_modifier: Decimal, stock: u32) -> ProductVariant {
    ProductVariant {
        id: id.into(),
        name: name.into(),
        // Seed SKUs are static and well-formed.
        sku: Sku::new(sku).unwrap_or_else(|_| unreachable!("seed sku {sku}")),
        price_modifier,
        stock: Quantity::new(stock),
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    description: &str,
    price: Decimal,
    category: &str,
    image_seed: u32,
    stock: u32,
    rating: f64,
    reviews: u32,
    featured: bool,
    variants: Vec<ProductVariant>,
) -> Product {
    Product {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        price,
        category: category.into(),
        images: vec![format!("https://picsum.photos/400/400?random={image_seed}")],
        stock: Quantity::new(stock),
        rating,
        reviews,
        featured,
        variants,
    }
}

pub fn products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Pro Noise-Cancelling Headphones",
            "Experience premium sound quality with active noise cancellation and 30-hour battery life.",
            Decimal::new(29999, 2),
            "Electronics",
            1,
            50,
            4.8,
            120,
            true,
            vec![
                variant("v1_1", "Black", "HP-BLK", Decimal::ZERO, 20),
                variant("v1_2", "Silver", "HP-SLV", Decimal::new(10, 0), 15),
                variant("v1_3", "Limited Gold", "HP-GLD", Decimal::new(50, 0), 5),
            ],
        ),
        product(
            "2",
            "Ergonomic Office Chair",
            "Designed for comfort and productivity with adjustable lumbar support.",
            Decimal::new(19999, 2),
            "Furniture",
            2,
            20,
            4.5,
            85,
            false,
            vec![],
        ),
        product(
            "3",
            "Smart Fitness Watch",
            "Track your health metrics, workouts, and sleep patterns with precision.",
            Decimal::new(14950, 2),
            "Electronics",
            3,
            100,
            4.6,
            230,
            true,
            vec![],
        ),
        product(
            "4",
            "Minimalist Backpack",
            "Water-resistant, durable, and stylish backpack for daily commute.",
            Decimal::new(7999, 2),
            "Accessories",
            4,
            45,
            4.7,
            60,
            false,
            vec![],
        ),
        product(
            "5",
            "Mechanical Keyboard",
            "Tactile switches and RGB lighting for the ultimate typing experience.",
            Decimal::new(12900, 2),
            "Electronics",
            5,
            30,
            4.9,
            310,
            true,
            vec![
                variant("v5_1", "Blue Switches", "KB-BLU", Decimal::ZERO, 10),
                variant("v5_2", "Red Switches", "KB-RED", Decimal::new(5, 0), 10),
            ],
        ),
        product(
            "6",
            "Organic Cotton T-Shirt",
            "Soft, breathable, and sustainably sourced cotton t-shirt.",
            Decimal::new(2500, 2),
            "Clothing",
            6,
            200,
            4.2,
            45,
            false,
            vec![
                variant("v6_1", "White / S", "TS-W-S", Decimal::ZERO, 20),
                variant("v6_2", "White / M", "TS-W-M", Decimal::ZERO, 30),
                variant("v6_3", "White / L", "TS-W-L", Decimal::ZERO, 30),
                variant("v6_4", "Black / M", "TS-B-M", Decimal::new(2, 0), 25),
            ],
        ),
    ]
}

pub fn users() -> Vec<crate::store::users::User> {
    use crate::store::users::{Role, User};
    vec![
        User {
            id: "u1".into(),
            name: "Demo Admin".into(),
            email: "admin@nexus.com".into(),
            role: Role::Admin,
            avatar: Some("https://picsum.photos/100/100?random=10".into()),
        },
        User {
            id: "u2".into(),
            name: "John Doe".into(),
            email: "user@nexus.com".into(),
            role: Role::User,
            avatar: Some("https://picsum.photos/100/100?random=11".into()),
        },
    ]
}

/// One already-delivered order so the timeline view has something to show.
pub fn orders(products: &[Product]) -> Vec<Order> {
    let Some(headphones) = products.first() else {
        return vec![];
    };
    let now = Utc::now();
    vec![Order {
        id: "ord_123".into(),
        user_id: "u2".into(),
        items: vec![CartLine {
            product: headphones.clone(),
            quantity: Quantity::new(1),
            selected_variant_id: None,
        }],
        total: Decimal::new(29999, 2),
        currency: Currency::Usd,
        status: OrderStatus::Delivered,
        created_at: now,
        payment_gateway: PaymentGateway::Stripe,
        shipping_address: Address {
            full_name: "John Doe".into(),
            street: "123 Main St".into(),
            city: "New York".into(),
            state: "NY".into(),
            zip: "10001".into(),
            country: "USA".into(),
        },
        timeline: vec![
            TimelineEntry {
                status: "created".into(),
                timestamp: now,
                description: "Order received".into(),
            },
            TimelineEntry {
                status: "delivered".into(),
                timestamp: now,
                description: "Delivered".into(),
            },
        ],
    }]
}

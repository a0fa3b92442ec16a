use std::{collections::BTreeMap, sync::Arc};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{LineItemKind, Product, Variant};

/// Cart row as stored by the reference backend.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredLine {
    pub id: i64,
    pub user_id: Uuid,
    pub product_id: i64,
    pub kind: LineItemKind,
    pub quantity: u32,
}

/// In-memory tables of the reference backend.
#[derive(Debug, Default)]
pub struct MemoryDb {
    pub products: BTreeMap<i64, Product>,
    pub lines: Vec<StoredLine>,
    last_line_id: i64,
}

impl MemoryDb {
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
            ..Default::default()
        }
    }

    pub fn next_line_id(&mut self) -> i64 {
        self.last_line_id += 1;
        self.last_line_id
    }
}

pub type Db = Arc<RwLock<MemoryDb>>;

pub fn create_db(products: impl IntoIterator<Item = Product>) -> Db {
    Arc::new(RwLock::new(MemoryDb::with_products(products)))
}

/// Products loaded at startup so the storefront has something to sell.
pub fn demo_catalog() -> Vec<Product> {
    let hoodie_variants = [("red", "M", 71, 4), ("red", "L", 72, 2), ("black", "M", 73, 6)]
        .into_iter()
        .map(|(color, size, id, stock)| Variant {
            id,
            properties: BTreeMap::from([
                ("color".to_string(), color.to_string()),
                ("size".to_string(), size.to_string()),
            ]),
            price: 550_000,
            stock,
        })
        .collect();

    vec![
        Product {
            id: 7,
            title: "Axum Hoodie".into(),
            thumbnail: Some("/media/products/hoodie.webp".into()),
            price: 550_000,
            discount: 50_000,
            stock: 12,
            variants: hoodie_variants,
        },
        Product {
            id: 42,
            title: "Ferris Mug".into(),
            thumbnail: Some("/media/products/mug.webp".into()),
            price: 120_000,
            discount: 0,
            stock: 100,
            variants: Vec::new(),
        },
        Product {
            id: 43,
            title: "Rust Sticker Pack".into(),
            thumbnail: None,
            price: 50_000,
            discount: 5_000,
            stock: 200,
            variants: Vec::new(),
        },
        Product {
            id: 44,
            title: "E-book: Async Rust".into(),
            thumbnail: None,
            price: 250_000,
            discount: 0,
            stock: 75,
            variants: Vec::new(),
        },
    ]
}

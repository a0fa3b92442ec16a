use crate::{
    db::{Db, MemoryDb, StoredLine},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{CartLineItem, LineItemKind, Product, ProductSnapshot, VariantProperties},
};

fn render_line(db: &MemoryDb, line: &StoredLine) -> AppResult<CartLineItem> {
    let product = db.products.get(&line.product_id).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "cart line {} references missing product {}",
            line.id,
            line.product_id
        ))
    })?;
    let (unit_price, stock) = product.unit(line.kind).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "cart line {} references missing variant",
            line.id
        ))
    })?;
    let unit_discount = product.discount.min(unit_price);

    Ok(CartLineItem {
        id: line.id,
        product_id: product.id,
        product: ProductSnapshot {
            id: product.id,
            title: product.title.clone(),
            thumbnail: product.thumbnail.clone(),
            quantity: stock,
            price: unit_price,
            discount: unit_discount,
            has_variant: product.has_variants(),
        },
        quantity: line.quantity,
        price: unit_price,
        discount: unit_discount,
        final_price: unit_price - unit_discount,
        kind: line.kind,
    })
}

fn resolve_kind(
    product: &Product,
    properties: Option<&VariantProperties>,
) -> AppResult<LineItemKind> {
    let properties = properties.filter(|p| !p.is_empty());
    match (product.has_variants(), properties) {
        (true, Some(properties)) => product
            .variants
            .iter()
            .find(|variant| properties.matches(&variant.properties))
            .map(|variant| LineItemKind::Variant(variant.id))
            .ok_or_else(|| {
                AppError::BadRequest("no variant matches the selected properties".to_string())
            }),
        (true, None) => Err(AppError::BadRequest(
            "product requires a variant selection".to_string(),
        )),
        (false, Some(_)) => Err(AppError::BadRequest("product has no variants".to_string())),
        (false, None) => Ok(LineItemKind::Simple),
    }
}

fn ensure_stock(requested: u32, stock: u32) -> AppResult<()> {
    if requested > stock {
        return Err(AppError::BadRequest(format!("only {stock} left in stock")));
    }
    Ok(())
}

/// Cart of `user` in insertion order.
pub async fn list_items(db: &Db, user: &AuthUser) -> AppResult<Vec<CartLineItem>> {
    let db = db.read().await;
    db.lines
        .iter()
        .filter(|line| line.user_id == user.user_id)
        .map(|line| render_line(&db, line))
        .collect()
}

/// Adds `quantity` units, merging into the user's existing line for the same
/// product and variant.
pub async fn add_to_cart(
    db: &Db,
    user: &AuthUser,
    product_id: i64,
    properties: Option<VariantProperties>,
    quantity: u32,
) -> AppResult<CartLineItem> {
    if quantity == 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }

    let mut db = db.write().await;
    let product = db.products.get(&product_id).ok_or(AppError::NotFound)?;
    let kind = resolve_kind(product, properties.as_ref())?;
    let (_, stock) = product.unit(kind).ok_or(AppError::NotFound)?;

    let existing = db.lines.iter().position(|line| {
        line.user_id == user.user_id && line.product_id == product_id && line.kind == kind
    });

    let index = match existing {
        Some(index) => {
            let total = db.lines[index].quantity.saturating_add(quantity);
            ensure_stock(total, stock)?;
            db.lines[index].quantity = total;
            index
        }
        None => {
            ensure_stock(quantity, stock)?;
            let id = db.next_line_id();
            db.lines.push(StoredLine {
                id,
                user_id: user.user_id,
                product_id,
                kind,
                quantity,
            });
            db.lines.len() - 1
        }
    };

    tracing::info!(
        user_id = %user.user_id,
        product_id,
        variant_id = ?kind.variant_id(),
        quantity,
        "cart_update"
    );
    render_line(&db, &db.lines[index])
}

/// Sets the quantity of one of the user's lines. Zero deletes the row and
/// echoes it back with quantity 0.
pub async fn update_item(
    db: &Db,
    user: &AuthUser,
    item_id: i64,
    quantity: u32,
) -> AppResult<CartLineItem> {
    let mut db = db.write().await;
    let index = db
        .lines
        .iter()
        .position(|line| line.id == item_id && line.user_id == user.user_id)
        .ok_or(AppError::NotFound)?;

    if quantity == 0 {
        let mut removed = db.lines.remove(index);
        removed.quantity = 0;
        tracing::info!(user_id = %user.user_id, item_id, "cart_remove");
        return render_line(&db, &removed);
    }

    let line = &db.lines[index];
    let (_, stock) = db
        .products
        .get(&line.product_id)
        .and_then(|product| product.unit(line.kind))
        .ok_or(AppError::NotFound)?;
    ensure_stock(quantity, stock)?;

    db.lines[index].quantity = quantity;
    tracing::info!(user_id = %user.user_id, item_id, quantity, "cart_update");
    render_line(&db, &db.lines[index])
}

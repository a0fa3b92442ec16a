use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post, put},
};

use crate::{
    dto::cart::{AddToCartQuery, QuantityRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{CartLineItem, VariantProperties},
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/my-items", get(my_items))
        .route("/add-to-cart", post(add_to_cart))
        .route("/{item_id}", put(update_item))
}

#[utoipa::path(
    get,
    path = "/api/shopping-cart-items/my-items",
    responses(
        (status = 200, description = "Cart lines of the current user", body = Vec<CartLineItem>),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn my_items(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<CartLineItem>>> {
    let items = cart_service::list_items(&state.db, &user).await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/shopping-cart-items/add-to-cart",
    params(
        ("productId" = i64, Query, description = "Product ID"),
        ("variantProperties" = Option<String>, Query, description = "JSON object of variant options, e.g. {\"color\":\"red\"}")
    ),
    request_body = QuantityRequest,
    responses(
        (status = 200, description = "Created or incremented cart line", body = CartLineItem),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<AddToCartQuery>,
    Json(payload): Json<QuantityRequest>,
) -> AppResult<Json<CartLineItem>> {
    let properties = query
        .variant_properties
        .as_deref()
        .map(serde_json::from_str::<VariantProperties>)
        .transpose()
        .map_err(|_| AppError::BadRequest("variantProperties must be a JSON object".to_string()))?;

    let item = cart_service::add_to_cart(
        &state.db,
        &user,
        query.product_id,
        properties,
        payload.quantity,
    )
    .await?;
    Ok(Json(item))
}

#[utoipa::path(
    put,
    path = "/api/shopping-cart-items/{item_id}",
    params(
        ("item_id" = i64, Path, description = "Cart line ID")
    ),
    request_body = QuantityRequest,
    responses(
        (status = 200, description = "Updated cart line; quantity 0 removes it", body = CartLineItem),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Cart line not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn update_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(item_id): Path<i64>,
    Json(payload): Json<QuantityRequest>,
) -> AppResult<Json<CartLineItem>> {
    let item = cart_service::update_item(&state.db, &user, item_id, payload.quantity).await?;
    Ok(Json(item))
}

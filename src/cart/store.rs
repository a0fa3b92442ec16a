use std::{fmt, str::FromStr, sync::Arc};

use tokio::sync::{Mutex, MutexGuard, watch};
use tracing::{debug, warn};

use super::{
    api::{AddToCart, CartApi},
    error::CartError,
    token::TokenStore,
};
use crate::models::{CartLineItem, LineItemKind};

/// How overlapping cart operations are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPolicy {
    /// Requests run as soon as they are issued. Each mutation refetches the
    /// cart and the last refetch to resolve wins.
    #[default]
    Concurrent,
    /// Operations and their reconciling refetch run one at a time, in call
    /// order.
    Serialized,
}

impl FromStr for SyncPolicy {
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "concurrent" => Ok(SyncPolicy::Concurrent),
            "serialized" => Ok(SyncPolicy::Serialized),
            other => Err(CartError::Config(format!("unknown cart sync policy `{other}`"))),
        }
    }
}

impl fmt::Display for SyncPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncPolicy::Concurrent => f.write_str("concurrent"),
            SyncPolicy::Serialized => f.write_str("serialized"),
        }
    }
}

/// Snapshot of the cart as last seen by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    items: Vec<CartLineItem>,
    error: Option<String>,
    in_flight: usize,
}

impl CartState {
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// True while any fetch or mutation is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Message of the most recent failure, cleared when the next operation starts.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of the server's per-unit final price times quantity over all lines.
    pub fn total_price(&self) -> i64 {
        self.items
            .iter()
            .map(|item| item.final_price * i64::from(item.quantity))
            .sum()
    }

    pub fn total_discount(&self) -> i64 {
        self.items
            .iter()
            .map(|item| item.discount * i64::from(item.quantity))
            .sum()
    }

    pub fn line_item(&self, item_id: i64) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn find_line_item(&self, product_id: i64, kind: LineItemKind) -> Option<&CartLineItem> {
        self.items
            .iter()
            .find(|item| item.product_id == product_id && item.kind == kind)
    }
}

/// Marks one request as outstanding for as long as it lives.
struct InFlight<'a> {
    state: &'a watch::Sender<CartState>,
}

impl<'a> InFlight<'a> {
    /// Starts a caller-visible operation, which clears the previous error.
    fn begin(state: &'a watch::Sender<CartState>) -> Self {
        state.send_modify(|s| {
            s.in_flight += 1;
            s.error = None;
        });
        Self { state }
    }

    /// Counts a request that belongs to an operation already under way.
    fn track(state: &'a watch::Sender<CartState>) -> Self {
        state.send_modify(|s| s.in_flight += 1);
        Self { state }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.state
            .send_modify(|s| s.in_flight = s.in_flight.saturating_sub(1));
    }
}

/// Read-through cache of the signed-in user's cart.
///
/// All mutations go to the server and are followed by a full refetch; the
/// local list is never patched. Operations report failure through
/// [`CartState::error`] and a `false` return instead of an `Err`.
pub struct CartStore {
    api: Arc<dyn CartApi>,
    tokens: Arc<dyn TokenStore>,
    state: watch::Sender<CartState>,
    policy: SyncPolicy,
    sequencer: Mutex<()>,
}

impl CartStore {
    pub fn new(api: Arc<dyn CartApi>, tokens: Arc<dyn TokenStore>) -> Self {
        Self::with_policy(api, tokens, SyncPolicy::default())
    }

    pub fn with_policy(
        api: Arc<dyn CartApi>,
        tokens: Arc<dyn TokenStore>,
        policy: SyncPolicy,
    ) -> Self {
        Self {
            api,
            tokens,
            state: watch::Sender::new(CartState::default()),
            policy,
            sequencer: Mutex::new(()),
        }
    }

    pub fn policy(&self) -> SyncPolicy {
        self.policy
    }

    /// Runs the first fetch, but only for an authenticated session.
    /// Returns whether a fetch was attempted.
    pub async fn initialize(&self) -> bool {
        if self.tokens.access_token().is_none() {
            debug!("no access token, skipping initial cart fetch");
            return false;
        }
        self.fetch_cart_items().await;
        true
    }

    /// Replaces the local items with the server's cart. On failure the
    /// previous items are kept.
    pub async fn fetch_cart_items(&self) {
        let _turn = self.turn().await;
        let _guard = InFlight::begin(&self.state);
        self.refresh().await;
    }

    /// Adds `request.quantity` units and refetches the cart on success.
    pub async fn add_to_cart(&self, request: AddToCart) -> bool {
        let _turn = self.turn().await;
        let _guard = InFlight::begin(&self.state);

        if request.quantity == 0 {
            self.fail("add to cart", CartError::InvalidQuantity);
            return false;
        }

        if let Err(err) = self.api.add_item(&request).await {
            self.fail("add to cart", err);
            return false;
        }

        self.refresh().await;
        true
    }

    /// Sets the quantity of line `item_id`; zero removes it. Refetches the
    /// cart on success.
    pub async fn update_cart_item(&self, item_id: i64, quantity: u32) -> bool {
        let _turn = self.turn().await;
        let _guard = InFlight::begin(&self.state);

        let available = self
            .state
            .borrow()
            .line_item(item_id)
            .map(|item| item.product.quantity);
        if let Some(available) = available.filter(|&available| quantity > available) {
            self.fail(
                "update cart item",
                CartError::ExceedsStock {
                    requested: quantity,
                    available,
                },
            );
            return false;
        }

        if let Err(err) = self.api.update_item(item_id, quantity).await {
            self.fail("update cart item", err);
            return false;
        }

        self.refresh().await;
        true
    }

    pub async fn remove_from_cart(&self, item_id: i64) -> bool {
        self.update_cart_item(item_id, 0).await
    }

    /// Drops the local snapshot, e.g. after logout.
    pub fn reset(&self) {
        self.state.send_modify(|s| {
            s.items.clear();
            s.error = None;
        });
    }

    pub fn snapshot(&self) -> CartState {
        self.state.borrow().clone()
    }

    pub fn items(&self) -> Vec<CartLineItem> {
        self.state.borrow().items.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn total_items(&self) -> u64 {
        self.state.borrow().total_items()
    }

    pub fn total_price(&self) -> i64 {
        self.state.borrow().total_price()
    }

    pub fn total_discount(&self) -> i64 {
        self.state.borrow().total_discount()
    }

    pub fn find_line_item(&self, product_id: i64, kind: LineItemKind) -> Option<CartLineItem> {
        self.state.borrow().find_line_item(product_id, kind).cloned()
    }

    /// Change feed of the cart state for views that render it.
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state.subscribe()
    }

    async fn turn(&self) -> Option<MutexGuard<'_, ()>> {
        match self.policy {
            SyncPolicy::Concurrent => None,
            SyncPolicy::Serialized => Some(self.sequencer.lock().await),
        }
    }

    /// Refetch that is part of the calling operation. It never clears
    /// `error`, so a concurrent operation's failure stays visible.
    async fn refresh(&self) {
        let _guard = InFlight::track(&self.state);
        match self.api.list_items().await {
            Ok(items) => {
                debug!(count = items.len(), "cart refreshed");
                self.state.send_modify(|s| s.items = items);
            }
            Err(err) => self.fail("fetch cart items", err),
        }
    }

    fn fail(&self, operation: &'static str, err: CartError) {
        warn!(operation, status = ?err.status(), error = %err, "cart operation failed");
        let message = err.to_string();
        self.state.send_modify(|s| s.error = Some(message));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex as StdMutex,
        atomic::{AtomicBool, Ordering},
    };
    use std::time::Duration;

    use async_trait::async_trait;
    use reqwest::StatusCode;
    use tokio::sync::{Notify, oneshot};

    use super::*;
    use crate::{
        cart::MemoryTokenStore,
        models::{ProductSnapshot, VariantProperties},
    };

    const UNIT_PRICE: i64 = 1000;
    const STOCK: u32 = 10;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List,
        Add(i64, u32),
        Update(i64, u32),
    }

    #[derive(Default)]
    struct FakeCart {
        items: StdMutex<Vec<CartLineItem>>,
        next_id: StdMutex<i64>,
        calls: StdMutex<Vec<Call>>,
        fail_list: AtomicBool,
        fail_add: AtomicBool,
        add_gate: StdMutex<Option<oneshot::Receiver<()>>>,
        list_gate: StdMutex<Option<oneshot::Receiver<()>>>,
        add_entered: Notify,
    }

    fn line(id: i64, product_id: i64, quantity: u32, unit_price: i64) -> CartLineItem {
        CartLineItem {
            id,
            product_id,
            product: ProductSnapshot {
                id: product_id,
                title: format!("product {product_id}"),
                thumbnail: None,
                quantity: STOCK,
                price: unit_price,
                discount: 0,
                has_variant: false,
            },
            quantity,
            price: unit_price,
            discount: 0,
            final_price: unit_price,
            kind: LineItemKind::Simple,
        }
    }

    fn rejected(message: &str) -> CartError {
        CartError::Api {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }

    impl FakeCart {
        fn with_items(items: Vec<CartLineItem>) -> Self {
            let next = items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
            Self {
                items: StdMutex::new(items),
                next_id: StdMutex::new(next),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn gate_next_add(&self) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            *self.add_gate.lock().unwrap() = Some(rx);
            tx
        }

        fn gate_next_list(&self) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            *self.list_gate.lock().unwrap() = Some(rx);
            tx
        }
    }

    #[async_trait]
    impl CartApi for FakeCart {
        async fn list_items(&self) -> Result<Vec<CartLineItem>, CartError> {
            self.calls.lock().unwrap().push(Call::List);
            let gate = self.list_gate.lock().unwrap().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(rejected("cart unavailable"));
            }
            Ok(self.items.lock().unwrap().clone())
        }

        async fn add_item(&self, request: &AddToCart) -> Result<CartLineItem, CartError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Add(request.product_id, request.quantity));
            self.add_entered.notify_one();
            let gate = self.add_gate.lock().unwrap().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            if self.fail_add.load(Ordering::SeqCst) {
                return Err(rejected("out of stock"));
            }

            let kind = match &request.variant_properties {
                Some(_) => LineItemKind::Variant(request.product_id * 100),
                None => LineItemKind::Simple,
            };
            let mut items = self.items.lock().unwrap();
            if let Some(item) = items
                .iter_mut()
                .find(|i| i.product_id == request.product_id && i.kind == kind)
            {
                item.quantity += request.quantity;
                return Ok(item.clone());
            }
            let mut next_id = self.next_id.lock().unwrap();
            let mut item = line(*next_id, request.product_id, request.quantity, UNIT_PRICE);
            item.kind = kind;
            *next_id += 1;
            items.push(item.clone());
            Ok(item)
        }

        async fn update_item(
            &self,
            item_id: i64,
            quantity: u32,
        ) -> Result<CartLineItem, CartError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Update(item_id, quantity));
            let mut items = self.items.lock().unwrap();
            let position = items
                .iter()
                .position(|i| i.id == item_id)
                .ok_or_else(|| CartError::Api {
                    status: StatusCode::NOT_FOUND,
                    message: "Not Found".into(),
                })?;
            let mut item = items[position].clone();
            item.quantity = quantity;
            if quantity == 0 {
                items.remove(position);
            } else {
                items[position] = item.clone();
            }
            Ok(item)
        }
    }

    fn store(api: Arc<FakeCart>, policy: SyncPolicy) -> CartStore {
        CartStore::with_policy(
            api,
            Arc::new(MemoryTokenStore::new(Some("token".into()))),
            policy,
        )
    }

    #[tokio::test]
    async fn aggregates_sum_quantities_and_final_prices() {
        let api = Arc::new(FakeCart::with_items(vec![
            line(1, 10, 2, 1000),
            line(2, 11, 1, 500),
        ]));
        let store = store(api, SyncPolicy::Concurrent);
        store.fetch_cart_items().await;

        assert_eq!(store.total_items(), 3);
        assert_eq!(store.total_price(), 2500);
        assert_eq!(store.total_discount(), 0);
    }

    #[tokio::test]
    async fn discount_is_weighted_by_quantity() {
        let mut hoodie = line(1, 10, 3, 900);
        hoodie.price = 1000;
        hoodie.discount = 100;
        let api = Arc::new(FakeCart::with_items(vec![hoodie, line(2, 11, 1, 500)]));
        let store = store(api, SyncPolicy::Concurrent);
        store.fetch_cart_items().await;

        assert_eq!(store.total_price(), 900 * 3 + 500);
        assert_eq!(store.total_discount(), 300);
    }

    #[tokio::test]
    async fn empty_cart_has_zero_totals() {
        let store = store(Arc::new(FakeCart::default()), SyncPolicy::Concurrent);
        store.fetch_cart_items().await;
        assert_eq!(store.total_items(), 0);
        assert_eq!(store.total_price(), 0);
    }

    #[tokio::test]
    async fn repeated_fetch_yields_same_snapshot() {
        let api = Arc::new(FakeCart::with_items(vec![line(1, 10, 2, 2000)]));
        let store = store(api, SyncPolicy::Concurrent);

        store.fetch_cart_items().await;
        let first = store.items();
        store.fetch_cart_items().await;
        assert_eq!(store.items(), first);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_items() {
        let api = Arc::new(FakeCart::with_items(vec![line(1, 10, 2, 2000)]));
        let store = store(api.clone(), SyncPolicy::Concurrent);
        store.fetch_cart_items().await;
        let before = store.items();

        api.fail_list.store(true, Ordering::SeqCst);
        store.fetch_cart_items().await;

        assert_eq!(store.items(), before);
        assert_eq!(
            store.error().as_deref(),
            Some("cart unavailable (400 Bad Request)")
        );
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn anonymous_session_never_fetches() {
        let api = Arc::new(FakeCart::with_items(vec![line(1, 10, 2, 2000)]));
        let store = CartStore::new(api.clone(), Arc::new(MemoryTokenStore::anonymous()));

        assert!(!store.initialize().await);
        assert!(store.items().is_empty());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn authenticated_initialize_fetches_once() {
        let api = Arc::new(FakeCart::with_items(vec![line(1, 10, 2, 2000)]));
        let store = store(api.clone(), SyncPolicy::Concurrent);

        assert!(store.initialize().await);
        assert_eq!(api.calls(), vec![Call::List]);
        assert_eq!(store.items().len(), 1);
    }

    #[tokio::test]
    async fn add_to_empty_cart_then_list() {
        let api = Arc::new(FakeCart::default());
        let store = store(api.clone(), SyncPolicy::Concurrent);

        assert!(store.add_to_cart(AddToCart::new(42).quantity(2)).await);
        store.fetch_cart_items().await;

        let items = store.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, 42);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(
            api.calls(),
            vec![Call::Add(42, 2), Call::List, Call::List]
        );
    }

    #[tokio::test]
    async fn add_defaults_to_one_unit_and_tracks_variants() {
        let api = Arc::new(FakeCart::default());
        let store = store(api, SyncPolicy::Concurrent);

        assert!(store.add_to_cart(AddToCart::new(5)).await);
        assert!(
            store
                .add_to_cart(
                    AddToCart::new(5).variant(VariantProperties::new().with("color", "red"))
                )
                .await
        );

        assert_eq!(
            store
                .find_line_item(5, LineItemKind::Simple)
                .map(|i| i.quantity),
            Some(1)
        );
        assert!(store.find_line_item(5, LineItemKind::Variant(500)).is_some());
        assert_eq!(store.total_items(), 2);
    }

    #[tokio::test]
    async fn zero_quantity_add_is_rejected_locally() {
        let api = Arc::new(FakeCart::default());
        let store = store(api.clone(), SyncPolicy::Concurrent);

        assert!(!store.add_to_cart(AddToCart::new(42).quantity(0)).await);
        assert!(api.calls().is_empty());
        assert_eq!(
            store.error().as_deref(),
            Some("quantity must be greater than 0")
        );
    }

    #[tokio::test]
    async fn failed_add_returns_false_and_skips_refetch() {
        let api = Arc::new(FakeCart::default());
        api.fail_add.store(true, Ordering::SeqCst);
        let store = store(api.clone(), SyncPolicy::Concurrent);

        assert!(!store.add_to_cart(AddToCart::new(42)).await);
        assert_eq!(api.calls(), vec![Call::Add(42, 1)]);
        assert!(store.error().is_some());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn remove_is_update_to_zero() {
        let seed = vec![line(1, 10, 2, 2000), line(2, 11, 1, 1000)];

        let via_remove = Arc::new(FakeCart::with_items(seed.clone()));
        let a = store(via_remove.clone(), SyncPolicy::Concurrent);
        a.fetch_cart_items().await;
        assert!(a.remove_from_cart(1).await);

        let via_update = Arc::new(FakeCart::with_items(seed));
        let b = store(via_update.clone(), SyncPolicy::Concurrent);
        b.fetch_cart_items().await;
        assert!(b.update_cart_item(1, 0).await);

        assert_eq!(via_remove.calls(), via_update.calls());
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.items().len(), 1);
    }

    #[tokio::test]
    async fn update_refetches_server_view() {
        let api = Arc::new(FakeCart::with_items(vec![line(1, 10, 1, 1000)]));
        let store = store(api, SyncPolicy::Concurrent);
        store.fetch_cart_items().await;

        assert!(store.update_cart_item(1, 3).await);
        assert_eq!(store.total_items(), 3);
        assert_eq!(store.total_price(), 3000);
    }

    #[tokio::test]
    async fn update_beyond_known_stock_is_rejected_locally() {
        let api = Arc::new(FakeCart::with_items(vec![line(1, 10, 1, 1000)]));
        let store = store(api.clone(), SyncPolicy::Concurrent);
        store.fetch_cart_items().await;

        assert!(!store.update_cart_item(1, STOCK + 1).await);
        assert_eq!(api.calls(), vec![Call::List]);
        assert_eq!(
            store.error().as_deref(),
            Some("quantity 11 exceeds available stock of 10")
        );
    }

    #[tokio::test]
    async fn update_of_unknown_item_surfaces_server_error() {
        let store = store(Arc::new(FakeCart::default()), SyncPolicy::Concurrent);
        assert!(!store.update_cart_item(99, 1).await);
        assert_eq!(store.error().as_deref(), Some("Not Found (404 Not Found)"));
    }

    #[tokio::test]
    async fn next_operation_clears_error() {
        let api = Arc::new(FakeCart::default());
        let store = store(api, SyncPolicy::Concurrent);

        assert!(!store.add_to_cart(AddToCart::new(1).quantity(0)).await);
        assert!(store.error().is_some());

        store.fetch_cart_items().await;
        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn loading_covers_pending_request() {
        let api = Arc::new(FakeCart::with_items(vec![line(1, 10, 1, 1000)]));
        let release = api.gate_next_list();
        let store = Arc::new(store(api, SyncPolicy::Concurrent));
        let mut changes = store.subscribe();

        let task = tokio::spawn({
            let store = store.clone();
            async move { store.fetch_cart_items().await }
        });
        changes.wait_for(|s| s.is_loading()).await.unwrap();
        assert!(store.items().is_empty());

        release.send(()).unwrap();
        task.await.unwrap();
        assert!(!store.is_loading());
        assert_eq!(store.items().len(), 1);
    }

    #[tokio::test]
    async fn abandoned_request_releases_loading() {
        let api = Arc::new(FakeCart::default());
        let _release = api.gate_next_list();
        let store = Arc::new(store(api, SyncPolicy::Concurrent));
        let mut changes = store.subscribe();

        let task = tokio::spawn({
            let store = store.clone();
            async move { store.fetch_cart_items().await }
        });
        changes.wait_for(|s| s.is_loading()).await.unwrap();

        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn concurrent_policy_does_not_wait_for_pending_mutation() {
        let api = Arc::new(FakeCart::default());
        let release = api.gate_next_add();
        let store = Arc::new(store(api.clone(), SyncPolicy::Concurrent));

        let first = tokio::spawn({
            let store = store.clone();
            async move { store.add_to_cart(AddToCart::new(1)).await }
        });
        api.add_entered.notified().await;

        assert!(store.add_to_cart(AddToCart::new(2)).await);
        assert_eq!(api.calls()[..2], [Call::Add(1, 1), Call::Add(2, 1)]);
        assert!(store.is_loading());

        release.send(()).unwrap();
        assert!(first.await.unwrap());
        assert!(!store.is_loading());
        assert_eq!(store.total_items(), 2);
    }

    #[tokio::test]
    async fn earlier_refetch_keeps_later_failure_visible() {
        let api = Arc::new(FakeCart::default());
        let release = api.gate_next_add();
        let store = Arc::new(store(api.clone(), SyncPolicy::Concurrent));

        let first = tokio::spawn({
            let store = store.clone();
            async move { store.add_to_cart(AddToCart::new(1)).await }
        });
        api.add_entered.notified().await;

        assert!(!store.update_cart_item(99, 1).await);
        assert_eq!(store.error().as_deref(), Some("Not Found (404 Not Found)"));

        release.send(()).unwrap();
        assert!(first.await.unwrap());
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.error().as_deref(), Some("Not Found (404 Not Found)"));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn serialized_policy_runs_operations_in_call_order() {
        let api = Arc::new(FakeCart::default());
        let release = api.gate_next_add();
        let store = Arc::new(store(api.clone(), SyncPolicy::Serialized));

        let first = tokio::spawn({
            let store = store.clone();
            async move { store.add_to_cart(AddToCart::new(1)).await }
        });
        api.add_entered.notified().await;

        let second = tokio::spawn({
            let store = store.clone();
            async move { store.add_to_cart(AddToCart::new(2)).await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(api.calls(), vec![Call::Add(1, 1)]);

        release.send(()).unwrap();
        assert!(first.await.unwrap());
        assert!(second.await.unwrap());
        assert_eq!(
            api.calls(),
            vec![Call::Add(1, 1), Call::List, Call::Add(2, 1), Call::List]
        );
        assert_eq!(store.total_items(), 2);
    }

    #[tokio::test]
    async fn reset_clears_snapshot() {
        let api = Arc::new(FakeCart::with_items(vec![line(1, 10, 1, 1000)]));
        let store = store(api, SyncPolicy::Concurrent);
        store.fetch_cart_items().await;

        store.reset();
        assert!(store.items().is_empty());
        assert_eq!(store.error(), None);
    }

    #[test]
    fn parses_sync_policy() {
        assert_eq!(
            "Serialized".parse::<SyncPolicy>().unwrap(),
            SyncPolicy::Serialized
        );
        assert_eq!(
            "concurrent".parse::<SyncPolicy>().unwrap(),
            SyncPolicy::Concurrent
        );
        assert!("fifo".parse::<SyncPolicy>().is_err());
        assert_eq!(SyncPolicy::Serialized.to_string(), "serialized");
    }
}

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::SalesItem;
use crate::gateway::ItemsGateway;

/// Observable state owned by [`ItemStore`].
///
/// `visible` is always derived from `canonical` by the sort/filter
/// operations; it is never mutated independently. Readers get snapshots,
/// only the store writes.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    /// Last full set fetched from the backend, in server response order.
    pub canonical: Vec<SalesItem>,
    /// Currently displayed sequence.
    pub visible: Vec<SalesItem>,
    /// True only while a list fetch is in flight.
    pub is_loading: bool,
    /// Empty when healthy; mirrors the most recent failure otherwise.
    pub error_message: String,
}

/// Client-side item state manager.
///
/// Holds the canonical item list and a derived visible view inside a
/// `watch` channel; every mutation goes through `send_modify`, so each
/// operation is one atomic state transition and subscribers are notified
/// after it. Gateway calls are spawned onto the runtime; the returned
/// `JoinHandle` can be dropped (fire-and-forget) or awaited.
///
/// Cloning is cheap and yields a handle to the same state.
#[derive(Clone)]
pub struct ItemStore {
    gateway: Arc<dyn ItemsGateway + Send + Sync>,
    tx: watch::Sender<StoreState>,
}

impl ItemStore {
    /// Create the store and trigger the initial fetch.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(gateway: Arc<dyn ItemsGateway + Send + Sync>) -> Self {
        let (tx, _rx) = watch::channel(StoreState::default());
        let store = Self { gateway, tx };
        let _ = store.fetch_all();
        store
    }

    /// Reload the full item list from the backend.
    ///
    /// Sets `is_loading` and clears `error_message` before the request
    /// starts. On success both collections are replaced with the response
    /// order (any filter/sort composition is discarded); on failure both
    /// are emptied and `error_message` is set.
    ///
    /// Overlapping calls are not sequenced: each runs to completion and
    /// the last one to resolve wins, even if it was issued first.
    pub fn fetch_all(&self) -> JoinHandle<()> {
        self.tx.send_modify(|s| {
            s.is_loading = true;
            s.error_message.clear();
        });

        let store = self.clone();
        tokio::spawn(async move {
            match store.gateway.list_all().await {
                Ok(items) => {
                    tracing::debug!(count = items.len(), "fetched item list");
                    store.tx.send_modify(|s| {
                        s.is_loading = false;
                        s.canonical = items.clone();
                        s.visible = items;
                        s.error_message.clear();
                    });
                }
                Err(e) => {
                    let message = e.to_string();
                    tracing::error!("list fetch failed: {}", message);
                    store.tx.send_modify(|s| {
                        s.is_loading = false;
                        s.canonical.clear();
                        s.visible.clear();
                        s.error_message = message;
                    });
                }
            }
        })
    }

    /// Submit a new item (`id == -1`).
    ///
    /// The created item is never appended locally; a successful create
    /// triggers a full refetch so the store adopts server-assigned fields.
    pub fn create(&self, item: SalesItem) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            match store.gateway.create(&item).await {
                Ok(created) => {
                    tracing::debug!(id = created.id, "created item");
                    store.tx.send_modify(|s| s.error_message.clear());
                    let _ = store.fetch_all().await;
                }
                Err(e) => {
                    let message = e.to_string();
                    tracing::error!("create failed: {}", message);
                    store.tx.send_modify(|s| s.error_message = message);
                }
            }
        })
    }

    /// Delete an item by id, then refetch on success.
    ///
    /// Unknown ids are forwarded as-is; the backend's error lands in
    /// `error_message` and the collections stay untouched.
    pub fn delete_by_id(&self, id: i64) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            match store.gateway.delete_by_id(id).await {
                Ok(()) => {
                    tracing::debug!(id, "deleted item");
                    store.tx.send_modify(|s| s.error_message.clear());
                    let _ = store.fetch_all().await;
                }
                Err(e) => {
                    let message = e.to_string();
                    tracing::error!(id, "delete failed: {}", message);
                    store.tx.send_modify(|s| s.error_message = message);
                }
            }
        })
    }

    /// Stable-sort the visible view by posting time.
    pub fn sort_by_time(&self, ascending: bool) {
        self.tx.send_modify(|s| {
            s.visible.sort_by(|a, b| {
                if ascending {
                    a.time.cmp(&b.time)
                } else {
                    b.time.cmp(&a.time)
                }
            });
        });
    }

    /// Stable-sort the visible view by price.
    pub fn sort_by_price(&self, ascending: bool) {
        self.tx.send_modify(|s| {
            s.visible.sort_by(|a, b| {
                if ascending {
                    a.price.cmp(&b.price)
                } else {
                    b.price.cmp(&a.price)
                }
            });
        });
    }

    /// Narrow the visible view to items whose description contains the
    /// fragment, case-insensitively. A blank fragment is a no-op, not a
    /// match-everything.
    ///
    /// Filters and sorts compose on the current view; callers start a
    /// fresh chain with [`reset_filters`](Self::reset_filters).
    pub fn filter_by_description(&self, fragment: &str) {
        let query = fragment.trim().to_lowercase();
        if query.is_empty() {
            return;
        }
        self.tx.send_modify(|s| {
            s.visible
                .retain(|item| item.description.to_lowercase().contains(&query));
        });
    }

    /// Narrow the visible view to items priced at most `max`. `None` is
    /// a no-op.
    pub fn filter_by_max_price(&self, max: Option<u32>) {
        let Some(max) = max else { return };
        self.tx.send_modify(|s| {
            s.visible.retain(|item| item.price <= max);
        });
    }

    /// Restore the full unfiltered, unsorted view.
    pub fn reset_filters(&self) {
        self.tx.send_modify(|s| {
            s.visible = s.canonical.clone();
        });
    }

    /// Snapshot of the visible sequence.
    pub fn items(&self) -> Vec<SalesItem> {
        self.tx.borrow().visible.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.tx.borrow().is_loading
    }

    pub fn error_message(&self) -> String {
        self.tx.borrow().error_message.clone()
    }

    /// Subscribe to state changes; the receiver sees every published
    /// snapshot that it is fast enough to observe.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::gateway::{GatewayError, GatewayResult};

    struct MockGateway {
        list_response: Mutex<GatewayResult<Vec<SalesItem>>>,
        create_response: Mutex<GatewayResult<SalesItem>>,
        delete_response: Mutex<GatewayResult<()>>,
        list_calls: AtomicUsize,
    }

    impl MockGateway {
        fn with_items(items: Vec<SalesItem>) -> Self {
            Self {
                list_response: Mutex::new(Ok(items)),
                create_response: Mutex::new(Err(GatewayError::Transport(
                    "create not scripted".into(),
                ))),
                delete_response: Mutex::new(Err(GatewayError::Transport(
                    "delete not scripted".into(),
                ))),
                list_calls: AtomicUsize::new(0),
            }
        }

        fn with_list_error(error: GatewayError) -> Self {
            let mock = Self::with_items(Vec::new());
            *mock.list_response.lock().unwrap() = Err(error);
            mock
        }

        fn set_items(&self, items: Vec<SalesItem>) {
            *self.list_response.lock().unwrap() = Ok(items);
        }

        fn set_create(&self, response: GatewayResult<SalesItem>) {
            *self.create_response.lock().unwrap() = response;
        }

        fn set_delete(&self, response: GatewayResult<()>) {
            *self.delete_response.lock().unwrap() = response;
        }

        fn list_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ItemsGateway for MockGateway {
        async fn list_all(&self) -> GatewayResult<Vec<SalesItem>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.list_response.lock().unwrap().clone()
        }

        async fn create(&self, _item: &SalesItem) -> GatewayResult<SalesItem> {
            self.create_response.lock().unwrap().clone()
        }

        async fn delete_by_id(&self, _id: i64) -> GatewayResult<()> {
            self.delete_response.lock().unwrap().clone()
        }
    }

    fn item(id: i64, description: &str, price: u32, time: i64) -> SalesItem {
        SalesItem {
            id,
            description: description.into(),
            price,
            seller_email: "seller@example.dk".into(),
            seller_phone: "12345678".into(),
            time,
            picture_url: None,
        }
    }

    fn sample_items() -> Vec<SalesItem> {
        vec![
            item(1, "Phone", 1000, 200),
            item(2, "Laptop", 2000, 300),
            item(3, "Bike", 500, 100),
        ]
    }

    async fn loaded_store(items: Vec<SalesItem>) -> (Arc<MockGateway>, ItemStore) {
        let gateway = Arc::new(MockGateway::with_items(items));
        let store = ItemStore::new(gateway.clone());
        let mut rx = store.subscribe();
        rx.wait_for(|s| !s.is_loading).await.unwrap();
        (gateway, store)
    }

    fn descriptions(store: &ItemStore) -> Vec<String> {
        store.items().into_iter().map(|i| i.description).collect()
    }

    #[tokio::test]
    async fn test_initial_load_populates_items() {
        let (gateway, store) = loaded_store(sample_items()).await;
        assert_eq!(store.items(), sample_items());
        assert!(!store.is_loading());
        assert!(store.error_message().is_empty());
        assert_eq!(gateway.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_clears_list() {
        let gateway = Arc::new(MockGateway::with_list_error(GatewayError::Http {
            status: 500,
            text: "Internal Server Error".into(),
        }));
        let store = ItemStore::new(gateway);
        let mut rx = store.subscribe();
        rx.wait_for(|s| !s.is_loading).await.unwrap();

        assert!(store.items().is_empty());
        assert_eq!(store.error_message(), "HTTP 500 Internal Server Error");
    }

    #[tokio::test]
    async fn test_fetch_transport_failure_surfaces_description() {
        let gateway = Arc::new(MockGateway::with_list_error(GatewayError::Transport(
            GatewayError::NO_CONNECTION.into(),
        )));
        let store = ItemStore::new(gateway);
        let mut rx = store.subscribe();
        rx.wait_for(|s| !s.is_loading).await.unwrap();

        assert!(store.items().is_empty());
        assert_eq!(store.error_message(), "No connection to backend");
    }

    #[tokio::test]
    async fn test_refetch_after_failure_recovers() {
        let gateway = Arc::new(MockGateway::with_list_error(GatewayError::Http {
            status: 503,
            text: "Service Unavailable".into(),
        }));
        let store = ItemStore::new(gateway.clone());
        let mut rx = store.subscribe();
        rx.wait_for(|s| !s.is_loading).await.unwrap();
        assert!(store.items().is_empty());

        gateway.set_items(sample_items());
        store.fetch_all().await.unwrap();

        assert_eq!(store.items().len(), 3);
        assert!(store.error_message().is_empty());
    }

    #[tokio::test]
    async fn test_description_filter_then_reset() {
        let (_gateway, store) = loaded_store(sample_items()).await;

        store.filter_by_description("phone");
        assert_eq!(descriptions(&store), vec!["Phone"]);

        store.reset_filters();
        assert_eq!(store.items().len(), 3);
    }

    #[tokio::test]
    async fn test_blank_fragment_is_a_noop() {
        let (_gateway, store) = loaded_store(sample_items()).await;

        store.filter_by_description("Phone");
        store.filter_by_description("   ");
        assert_eq!(descriptions(&store), vec!["Phone"]);
    }

    #[tokio::test]
    async fn test_max_price_filter_preserves_order() {
        let (_gateway, store) = loaded_store(sample_items()).await;

        store.filter_by_max_price(Some(1000));
        assert_eq!(descriptions(&store), vec!["Phone", "Bike"]);
    }

    #[tokio::test]
    async fn test_absent_max_price_is_a_noop() {
        let (_gateway, store) = loaded_store(sample_items()).await;

        store.filter_by_max_price(None);
        assert_eq!(store.items().len(), 3);
    }

    #[tokio::test]
    async fn test_price_sort_toggles() {
        let (_gateway, store) = loaded_store(sample_items()).await;

        store.sort_by_price(true);
        assert_eq!(descriptions(&store), vec!["Bike", "Phone", "Laptop"]);

        store.sort_by_price(false);
        assert_eq!(descriptions(&store), vec!["Laptop", "Phone", "Bike"]);
    }

    #[tokio::test]
    async fn test_time_sort_toggles() {
        let (_gateway, store) = loaded_store(sample_items()).await;

        store.sort_by_time(true);
        assert_eq!(descriptions(&store), vec!["Bike", "Phone", "Laptop"]);

        store.sort_by_time(false);
        assert_eq!(descriptions(&store), vec!["Laptop", "Phone", "Bike"]);
    }

    #[tokio::test]
    async fn test_sort_applies_to_filtered_view() {
        let (_gateway, store) = loaded_store(sample_items()).await;

        store.filter_by_max_price(Some(1000));
        store.sort_by_price(true);
        assert_eq!(descriptions(&store), vec!["Bike", "Phone"]);
    }

    #[tokio::test]
    async fn test_fresh_fetch_resets_view() {
        let (_gateway, store) = loaded_store(sample_items()).await;

        store.filter_by_max_price(Some(500));
        assert_eq!(store.items().len(), 1);

        store.fetch_all().await.unwrap();
        assert_eq!(store.items(), sample_items());
    }

    #[tokio::test]
    async fn test_create_triggers_exactly_one_resync() {
        let (gateway, store) = loaded_store(sample_items()).await;
        let calls_before = gateway.list_calls();

        let created = item(4, "Chair", 300, 400);
        gateway.set_create(Ok(created.clone()));
        let mut refreshed = sample_items();
        refreshed.push(created);
        gateway.set_items(refreshed.clone());

        store
            .create(SalesItem::unpersisted(
                "Chair".into(),
                300,
                "seller@example.dk".into(),
                "12345678".into(),
                400,
                None,
            ))
            .await
            .unwrap();

        assert_eq!(gateway.list_calls(), calls_before + 1);
        assert_eq!(store.items(), refreshed);
        assert!(store.error_message().is_empty());
    }

    #[tokio::test]
    async fn test_create_failure_leaves_state_untouched() {
        let (gateway, store) = loaded_store(sample_items()).await;
        let calls_before = gateway.list_calls();

        gateway.set_create(Err(GatewayError::Http {
            status: 400,
            text: "Bad Request".into(),
        }));

        store
            .create(SalesItem::unpersisted(
                "Chair".into(),
                300,
                "seller@example.dk".into(),
                "12345678".into(),
                400,
                None,
            ))
            .await
            .unwrap();

        assert_eq!(gateway.list_calls(), calls_before);
        assert_eq!(store.items(), sample_items());
        assert_eq!(store.error_message(), "HTTP 400 Bad Request");
    }

    #[tokio::test]
    async fn test_delete_triggers_resync() {
        let (gateway, store) = loaded_store(sample_items()).await;
        let calls_before = gateway.list_calls();

        gateway.set_delete(Ok(()));
        let remaining = vec![item(1, "Phone", 1000, 200), item(2, "Laptop", 2000, 300)];
        gateway.set_items(remaining.clone());

        store.delete_by_id(3).await.unwrap();

        assert_eq!(gateway.list_calls(), calls_before + 1);
        assert_eq!(store.items(), remaining);
        assert!(store.error_message().is_empty());
    }

    #[tokio::test]
    async fn test_delete_failure_leaves_state_untouched() {
        let (gateway, store) = loaded_store(sample_items()).await;
        let calls_before = gateway.list_calls();

        gateway.set_delete(Err(GatewayError::Http {
            status: 404,
            text: "Not Found".into(),
        }));

        store.delete_by_id(99).await.unwrap();

        assert_eq!(gateway.list_calls(), calls_before);
        assert_eq!(store.items(), sample_items());
        assert_eq!(store.error_message(), "HTTP 404 Not Found");
    }

    #[tokio::test]
    async fn test_subscribers_see_published_snapshots() {
        let (_gateway, store) = loaded_store(sample_items()).await;
        let mut rx = store.subscribe();

        store.filter_by_description("Bike");

        rx.changed().await.unwrap();
        let snapshot = rx.borrow_and_update();
        assert_eq!(snapshot.visible.len(), 1);
        assert_eq!(snapshot.canonical.len(), 3);
    }
}

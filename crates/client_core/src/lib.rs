use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{Product, ProductId},
    error::{validate_product_input, ValidationError},
    protocol::ProductDraft,
};
use tokio::sync::{broadcast, Mutex};
use tracing::error;


pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const SERVER_URL_ENV: &str = "CATALOG_SERVER_URL";

pub const EMPTY_PLACEHOLDER: &str = "No products found.";
pub const LOAD_FAILED_PLACEHOLDER: &str = "Error loading products.";

/// Catalog service base URL: `CATALOG_SERVER_URL` when set and non-empty,
/// otherwise the fixed local default.
pub fn server_url_from_env() -> String {
    match std::env::var(SERVER_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => url,
        _ => DEFAULT_SERVER_URL.to_string(),
    }
}

/// Seam over the catalog HTTP API so controller behavior can be exercised
/// without a socket. `CatalogApi` is the production implementation.
#[async_trait]
pub trait ProductGateway: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>>;
    async fn create_product(&self, draft: &ProductDraft) -> Result<Product>;
    async fn update_product(&self, id: ProductId, draft: &ProductDraft) -> Result<Product>;
    async fn delete_product(&self, id: ProductId) -> Result<()>;
}

/// HTTP gateway to the remote catalog service. Any non-2xx status is a
/// uniform failure via `error_for_status`; the client never branches on
/// individual status codes.
pub struct CatalogApi {
    http: Client,
    server_url: String,
}

impl CatalogApi {
    pub fn new(server_url: impl Into<String>) -> Self {
        let mut server_url = server_url.into();
        while server_url.ends_with('/') {
            server_url.pop();
        }
        Self {
            http: Client::new(),
            server_url,
        }
    }
}

#[async_trait]
impl ProductGateway for CatalogApi {
    async fn list_products(&self) -> Result<Vec<Product>> {
        let res = self
            .http
            .get(format!("{}/products", self.server_url))
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product> {
        let res = self
            .http
            .post(format!("{}/products", self.server_url))
            .json(draft)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    async fn update_product(&self, id: ProductId, draft: &ProductDraft) -> Result<Product> {
        let res = self
            .http
            .put(format!("{}/products/{}", self.server_url, id))
            .json(draft)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    async fn delete_product(&self, id: ProductId) -> Result<()> {
        self.http
            .delete(format!("{}/products/{}", self.server_url, id))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// An action control is either available or blocked on an in-flight
/// request. There is no third state: a control either returns to idle or
/// its row is discarded by the next full re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Idle,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlTarget {
    CreateSubmit,
    RowEdit(ProductId),
    RowDelete(ProductId),
}

impl ControlTarget {
    pub fn idle_label(self) -> &'static str {
        match self {
            ControlTarget::CreateSubmit => "Add Product",
            ControlTarget::RowEdit(_) => "Edit",
            ControlTarget::RowDelete(_) => "Delete",
        }
    }

    pub fn pending_label(self) -> &'static str {
        match self {
            ControlTarget::CreateSubmit => "Adding...",
            ControlTarget::RowEdit(_) => "Editing...",
            ControlTarget::RowDelete(_) => "Deleting...",
        }
    }
}

/// One rendered product row, carrying the product data its controls need
/// for later action lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub product: Product,
    pub edit_control: ControlState,
    pub delete_control: ControlState,
}

impl ProductRow {
    fn idle(product: Product) -> Self {
        Self {
            product,
            edit_control: ControlState::Idle,
            delete_control: ControlState::Idle,
        }
    }
}

/// The rendered list. Rebuilt wholesale on every successful refresh; an
/// empty collection and a failed fetch each render a single placeholder.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListView {
    Rows(Vec<ProductRow>),
    #[default]
    Empty,
    LoadFailed,
}

impl ListView {
    pub fn placeholder_text(&self) -> Option<&'static str> {
        match self {
            ListView::Rows(_) => None,
            ListView::Empty => Some(EMPTY_PLACEHOLDER),
            ListView::LoadFailed => Some(LOAD_FAILED_PLACEHOLDER),
        }
    }

    pub fn rows(&self) -> &[ProductRow] {
        match self {
            ListView::Rows(rows) => rows,
            _ => &[],
        }
    }

    /// Applies a control state to the addressed row. Returns false when the
    /// row is gone, which is the normal case right after a re-render has
    /// replaced it.
    pub fn set_row_control(&mut self, target: ControlTarget, state: ControlState) -> bool {
        let ListView::Rows(rows) = self else {
            return false;
        };
        let (id, edit) = match target {
            ControlTarget::RowEdit(id) => (id, true),
            ControlTarget::RowDelete(id) => (id, false),
            ControlTarget::CreateSubmit => return false,
        };
        let Some(row) = rows.iter_mut().find(|row| row.product.id == id) else {
            return false;
        };
        if edit {
            row.edit_control = state;
        } else {
            row.delete_control = state;
        }
        true
    }
}

/// Blocking alert surfaced to the user. Validation alerts are never
/// logged; request failures are logged where they occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertMessage {
    InvalidCreateInput,
    InvalidEditInput,
    CreateFailed,
    UpdateFailed,
    DeleteFailed,
}

impl AlertMessage {
    pub fn user_text(self) -> &'static str {
        match self {
            AlertMessage::InvalidCreateInput => "Please enter valid product name and price.",
            AlertMessage::InvalidEditInput => "Invalid name or price. Please try again.",
            AlertMessage::CreateFailed => "Failed to add product.",
            AlertMessage::UpdateFailed => "Failed to update product.",
            AlertMessage::DeleteFailed => "Failed to delete product.",
        }
    }
}

#[derive(Debug, Clone)]
pub enum ControllerEvent {
    ViewRefreshed(ListView),
    ControlStateChanged {
        target: ControlTarget,
        state: ControlState,
    },
    FormReset,
    Alert(AlertMessage),
}

/// How a submission ended, for callers that keep or reset form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Completed,
    Rejected(ValidationError),
    Failed,
}

struct ControllerState {
    view: ListView,
    create_control: ControlState,
}

/// Drives the fetch/mutate/re-render cycle against the catalog service.
///
/// Every successful mutation triggers a full re-fetch rather than a local
/// patch, so the view never diverges from the service for longer than one
/// refresh. Front ends mirror state from the event stream.
pub struct ProductListController {
    gateway: Arc<dyn ProductGateway>,
    inner: Mutex<ControllerState>,
    events: broadcast::Sender<ControllerEvent>,
}

impl ProductListController {
    pub fn new(server_url: impl Into<String>) -> Arc<Self> {
        Self::with_gateway(Arc::new(CatalogApi::new(server_url)))
    }

    pub fn with_gateway(gateway: Arc<dyn ProductGateway>) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            gateway,
            inner: Mutex::new(ControllerState {
                view: ListView::default(),
                create_control: ControlState::Idle,
            }),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    pub async fn view(&self) -> ListView {
        self.inner.lock().await.view.clone()
    }

    pub async fn create_control(&self) -> ControlState {
        self.inner.lock().await.create_control
    }

    /// Fetches the full collection and rebuilds the view. Never fails past
    /// this boundary: a bad response becomes the error placeholder.
    pub async fn refresh(&self) {
        let view = match self.gateway.list_products().await {
            Ok(products) if products.is_empty() => ListView::Empty,
            Ok(products) => ListView::Rows(products.into_iter().map(ProductRow::idle).collect()),
            Err(err) => {
                error!("failed to fetch products: {err:#}");
                ListView::LoadFailed
            }
        };
        {
            let mut inner = self.inner.lock().await;
            inner.view = view.clone();
        }
        self.emit(ControllerEvent::ViewRefreshed(view));
    }

    /// Create submission from raw form text. Invalid input is rejected
    /// before any request is sent; the form is only reset on success.
    pub async fn submit_create(&self, name: &str, price: &str) -> SubmitOutcome {
        let (name, price) = match validate_product_input(name, price) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.emit(ControllerEvent::Alert(AlertMessage::InvalidCreateInput));
                return SubmitOutcome::Rejected(err);
            }
        };

        self.set_control(ControlTarget::CreateSubmit, ControlState::Pending)
            .await;
        let outcome = match self
            .gateway
            .create_product(&ProductDraft { name, price })
            .await
        {
            Ok(_) => {
                self.emit(ControllerEvent::FormReset);
                self.refresh().await;
                SubmitOutcome::Completed
            }
            Err(err) => {
                error!("failed to add product: {err:#}");
                self.emit(ControllerEvent::Alert(AlertMessage::CreateFailed));
                SubmitOutcome::Failed
            }
        };
        self.set_control(ControlTarget::CreateSubmit, ControlState::Idle)
            .await;
        outcome
    }

    /// Edit submission with replacement values already collected by the
    /// front end (cancelled prompts never reach this point). Sends the
    /// full replacement payload, not a partial patch.
    pub async fn submit_edit(&self, product_id: ProductId, name: &str, price: &str) -> SubmitOutcome {
        let (name, price) = match validate_product_input(name, price) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.emit(ControllerEvent::Alert(AlertMessage::InvalidEditInput));
                return SubmitOutcome::Rejected(err);
            }
        };

        let target = ControlTarget::RowEdit(product_id);
        self.set_control(target, ControlState::Pending).await;
        let outcome = match self
            .gateway
            .update_product(product_id, &ProductDraft { name, price })
            .await
        {
            Ok(_) => {
                self.refresh().await;
                SubmitOutcome::Completed
            }
            Err(err) => {
                error!("failed to update product {product_id}: {err:#}");
                self.emit(ControllerEvent::Alert(AlertMessage::UpdateFailed));
                SubmitOutcome::Failed
            }
        };
        // Harmless after a successful refresh: the row has been rebuilt.
        self.set_control(target, ControlState::Idle).await;
        outcome
    }

    /// Delete submission; the front end has already confirmed with the
    /// user (declining never reaches this point).
    pub async fn submit_delete(&self, product_id: ProductId) -> SubmitOutcome {
        let target = ControlTarget::RowDelete(product_id);
        self.set_control(target, ControlState::Pending).await;
        let outcome = match self.gateway.delete_product(product_id).await {
            Ok(()) => {
                self.refresh().await;
                SubmitOutcome::Completed
            }
            Err(err) => {
                error!("failed to delete product {product_id}: {err:#}");
                self.emit(ControllerEvent::Alert(AlertMessage::DeleteFailed));
                SubmitOutcome::Failed
            }
        };
        self.set_control(target, ControlState::Idle).await;
        outcome
    }

    async fn set_control(&self, target: ControlTarget, state: ControlState) {
        let applied = {
            let mut inner = self.inner.lock().await;
            match target {
                ControlTarget::CreateSubmit => {
                    inner.create_control = state;
                    true
                }
                ControlTarget::RowEdit(_) | ControlTarget::RowDelete(_) => {
                    inner.view.set_row_control(target, state)
                }
            }
        };
        if applied {
            self.emit(ControllerEvent::ControlStateChanged { target, state });
        }
    }

    fn emit(&self, event: ControllerEvent) {
        let _ = self.events.send(event);
    }
}

use serde::{Deserialize, Serialize};

/// Request body for product create and update. Update is a full replace
/// of name and price, not a partial patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
}

/// Error body the catalog service attaches to non-2xx responses. Decoded
/// for diagnostics only; the client treats every non-2xx status the same.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

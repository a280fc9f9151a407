//! Backend commands queued from UI to backend worker.

use shared::domain::ProductId;

/// Name and price travel as the raw form text; validation happens in the
/// controller so invalid input never turns into a request.
#[derive(Debug)]
pub enum BackendCommand {
    RefreshProducts,
    CreateProduct {
        name: String,
        price: String,
    },
    UpdateProduct {
        product_id: ProductId,
        name: String,
        price: String,
    },
    DeleteProduct {
        product_id: ProductId,
    },
}

use thiserror::Error;

/// Rejected user input, caught before any request leaves the client.
/// Surfaced as a blocking alert and never logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("product name must not be empty")]
    EmptyName,
    #[error("price must be a number")]
    PriceNotANumber,
}

/// Validates raw form input for create and edit submissions.
///
/// Returns the trimmed name and parsed price. The price only has to be a
/// finite number; non-negativity is owned by the service.
pub fn validate_product_input(name: &str, price: &str) -> Result<(String, f64), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let price: f64 = price
        .trim()
        .parse()
        .map_err(|_| ValidationError::PriceNotANumber)?;
    if !price.is_finite() {
        return Err(ValidationError::PriceNotANumber);
    }
    Ok((name.to_string(), price))
}

use serde::{Deserialize, Serialize};

/// Identifier assigned by the catalog service. The client never mints one
/// of these; values only ever come out of service responses and go back
/// into request paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub i64);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
}

impl Product {
    /// Price as rendered in list rows, e.g. `$999.99`.
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_price_keeps_two_decimals() {
        let product = Product {
            id: ProductId(1),
            name: "Laptop".to_string(),
            price: 999.9,
        };
        assert_eq!(product.display_price(), "$999.90");
    }

    #[test]
    fn display_price_rounds_sub_cent_values() {
        let product = Product {
            id: ProductId(2),
            name: "Cable".to_string(),
            price: 1.005,
        };
        assert_eq!(product.display_price(), "$1.00");
    }

    #[test]
    fn product_round_trips_service_json() {
        let json = r#"{"id":7,"name":"Laptop","price":999.99}"#;
        let product: Product = serde_json::from_str(json).expect("decode");
        assert_eq!(product.id, ProductId(7));
        assert_eq!(product.name, "Laptop");
        assert_eq!(product.price, 999.99);
    }
}

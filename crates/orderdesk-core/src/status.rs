//! Order tracking result.

use serde::{Deserialize, Serialize};

/// Status of a previously submitted order.
///
/// Every field is passed through verbatim from the remote service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OrderStatusReport {
    pub reference: String,
    pub salesorder: String,
    pub orderdate: String,
    pub shipagent: String,
    pub shipservice: String,
    pub freightcost: String,
    pub trackingnumber1: String,
    pub status: String,
}

impl OrderStatusReport {
    /// Check if the order has a tracking number yet.
    pub fn has_tracking(&self) -> bool {
        !self.trackingnumber1.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_tracking() {
        let mut report = OrderStatusReport::default();
        assert!(!report.has_tracking());
        report.trackingnumber1 = "1Z999".to_string();
        assert!(report.has_tracking());
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(OrderStatusReport::default()).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 8);
        for key in [
            "reference",
            "salesorder",
            "orderdate",
            "shipagent",
            "shipservice",
            "freightcost",
            "trackingnumber1",
            "status",
        ] {
            assert!(keys.iter().any(|k| k == key), "missing {}", key);
        }
    }
}

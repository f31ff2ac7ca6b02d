//! Shipping method catalog.
//!
//! The remote service accepts a fixed set of carrier service codes. The list
//! is compiled in; it is not fetched or mutated at runtime.

use serde::Serialize;
use std::fmt;

/// Carrier group a shipping method belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Carrier {
    #[serde(rename = "FedEx")]
    FedEx,
    #[serde(rename = "UPS")]
    Ups,
    #[serde(rename = "USPS")]
    Usps,
}

impl Carrier {
    /// Display name used as the catalog group.
    pub fn as_str(&self) -> &'static str {
        match self {
            Carrier::FedEx => "FedEx",
            Carrier::Ups => "UPS",
            Carrier::Usps => "USPS",
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shipping method option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShippingMethod {
    /// Service code sent to the remote service.
    pub value: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Carrier group.
    pub group: Carrier,
}

const fn method(value: &'static str, label: &'static str, group: Carrier) -> ShippingMethod {
    ShippingMethod {
        value,
        label,
        group,
    }
}

/// Every shipping method the remote service accepts.
pub static CATALOG: [ShippingMethod; 19] = [
    method("F001", "FedEx First Overnight", Carrier::FedEx),
    method("F002", "FedEx Priority Overnight", Carrier::FedEx),
    method("F003", "FedEx Standard Overnight", Carrier::FedEx),
    method("F004", "FedEx 2Day", Carrier::FedEx),
    method("F005", "FedEx Express Saver", Carrier::FedEx),
    method("F006", "FedEx Ground", Carrier::FedEx),
    method("F007", "FedEx Home Delivery", Carrier::FedEx),
    method("F008", "FedEx Smart Post", Carrier::FedEx),
    method("U001", "UPS Next Day Air", Carrier::Ups),
    method("U002", "UPS Next Day Air Saver", Carrier::Ups),
    method("U003", "UPS 2nd Day Air", Carrier::Ups),
    method("U004", "UPS 2nd Day Air A.M.", Carrier::Ups),
    method("U005", "UPS 3 Day Select", Carrier::Ups),
    method("U006", "UPS Ground", Carrier::Ups),
    method("U007", "UPS Sure Post", Carrier::Ups),
    method("P001", "USPS Priority Mail Express", Carrier::Usps),
    method("P002", "USPS Priority Mail", Carrier::Usps),
    method("P003", "USPS Ground Advantage", Carrier::Usps),
    method("P004", "USPS Media Mail", Carrier::Usps),
];

/// Get the full catalog.
pub fn catalog() -> &'static [ShippingMethod] {
    &CATALOG
}

/// Look up a shipping method by its code.
pub fn find(code: &str) -> Option<&'static ShippingMethod> {
    CATALOG.iter().find(|m| m.value == code)
}

/// Get all methods for one carrier, in catalog order.
pub fn by_carrier(carrier: Carrier) -> impl Iterator<Item = &'static ShippingMethod> {
    CATALOG.iter().filter(move |m| m.group == carrier)
}

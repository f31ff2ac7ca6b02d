//! Order submission types.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::ids::{OrderReference, Sku};
use crate::shipping;

/// Ship-to details for an order.
///
/// Fields default to empty strings when the browser omits them; the remote
/// service performs its own address checks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    /// First name.
    #[serde(default)]
    pub first_name: String,
    /// Last name.
    #[serde(default)]
    pub last_name: String,
    /// Address line 1.
    #[serde(default)]
    pub address1: String,
    /// Address line 2 (apt, suite, etc.).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    /// City.
    #[serde(default)]
    pub city: String,
    /// State/province code.
    #[serde(default)]
    pub state: String,
    /// Postal/ZIP code.
    #[serde(default)]
    pub zip: String,
    /// Country code.
    #[serde(default)]
    pub country: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
    /// Contact email address.
    #[serde(default)]
    pub email: String,
}

impl Recipient {
    /// Create a recipient with name and street address.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address1: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            address1: address1.into(),
            city: city.into(),
            state: state.into(),
            zip: zip.into(),
            country: country.into(),
            ..Default::default()
        }
    }

    /// Set address line 2.
    pub fn with_address2(mut self, address2: impl Into<String>) -> Self {
        self.address2 = Some(address2.into());
        self
    }

    /// Set phone and email contact details.
    pub fn with_contact(mut self, phone: impl Into<String>, email: impl Into<String>) -> Self {
        self.phone = phone.into();
        self.email = email.into();
        self
    }

    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.address1.clone()];
        if let Some(ref addr2) = self.address2 {
            if !addr2.is_empty() {
                parts.push(addr2.clone());
            }
        }
        parts.push(self.city.clone());
        parts.push(format!("{} {}", self.state, self.zip));
        parts.push(self.country.clone());
        parts.join(", ")
    }
}

/// One SKU/quantity pair within an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    /// SKU being ordered.
    pub sku: Sku,
    /// Quantity ordered.
    #[serde(deserialize_with = "quantity_from_number_or_text")]
    pub quantity: i64,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(sku: impl Into<Sku>, quantity: i64) -> Self {
        Self {
            sku: sku.into(),
            quantity,
        }
    }
}

/// Form inputs arrive as either JSON numbers or numeric strings.
fn quantity_from_number_or_text<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid quantity: {:?}", s))),
    }
}

/// An order submission as sent by the browser.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Caller-unique order reference.
    pub reference: OrderReference,
    /// Shipping method code from the catalog (e.g. "F006").
    pub shipping_method: String,
    /// Items in the order.
    pub items: Vec<LineItem>,
    /// Ship-to details.
    #[serde(flatten)]
    pub recipient: Recipient,
    /// Free-text delivery instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl OrderRequest {
    /// Create an order with no items yet.
    pub fn new(
        reference: impl Into<OrderReference>,
        shipping_method: impl Into<String>,
        recipient: Recipient,
    ) -> Self {
        Self {
            reference: reference.into(),
            shipping_method: shipping_method.into(),
            items: Vec::new(),
            recipient,
            instructions: None,
        }
    }

    /// Add a line item.
    pub fn with_item(mut self, sku: impl Into<Sku>, quantity: i64) -> Self {
        self.items.push(LineItem::new(sku, quantity));
        self
    }

    /// Set delivery instructions.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Get total unit count across all items, saturating at `i64::MAX`.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |total, item| total.saturating_add(item.quantity))
    }

    /// Check the order invariants before it is sent anywhere.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.reference.is_blank() {
            return Err(CoreError::MissingReference);
        }
        if self.items.is_empty() {
            return Err(CoreError::NoLineItems);
        }
        for (index, item) in self.items.iter().enumerate() {
            if item.sku.is_blank() {
                return Err(CoreError::EmptySku { index });
            }
            if item.quantity <= 0 {
                return Err(CoreError::InvalidQuantity {
                    sku: item.sku.to_string(),
                    quantity: item.quantity,
                });
            }
        }
        if shipping::find(&self.shipping_method).is_none() {
            return Err(CoreError::UnknownShippingMethod(self.shipping_method.clone()));
        }
        Ok(())
    }
}

/// Numeric result code returned by the remote order submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    /// 200
    Success,
    /// 400
    InvalidRequest,
    /// 401
    AuthenticationFailed,
    /// 404
    NotFound,
    /// 500
    ServerError,
    /// Any other code, kept verbatim.
    Unknown(String),
}

impl ResponseCode {
    /// Classify a raw code string.
    ///
    /// Matching is exact; surrounding whitespace makes the code unknown.
    pub fn from_code(code: &str) -> Self {
        match code {
            "200" => Self::Success,
            "400" => Self::InvalidRequest,
            "401" => Self::AuthenticationFailed,
            "404" => Self::NotFound,
            "500" => Self::ServerError,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Get the code as it appears on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "200",
            Self::InvalidRequest => "400",
            Self::AuthenticationFailed => "401",
            Self::NotFound => "404",
            Self::ServerError => "500",
            Self::Unknown(code) => code,
        }
    }

    /// Human-readable message for this code.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Order submitted successfully",
            Self::InvalidRequest => "Invalid request format",
            Self::AuthenticationFailed => "Authentication failed",
            Self::NotFound => "Order not found",
            Self::ServerError => "Internal server error",
            Self::Unknown(_) => "Unknown error",
        }
    }

    /// Check if the remote accepted the order.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Outcome of an order submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderReceipt {
    /// Raw result code from the remote service.
    pub code: String,
    /// Order reference echoed by the remote service.
    pub reference: String,
    /// Message derived from `code`.
    pub message: String,
}

impl OrderReceipt {
    /// Build a receipt, deriving the message from the code.
    pub fn new(code: impl Into<String>, reference: impl Into<String>) -> Self {
        let code = code.into();
        let message = ResponseCode::from_code(&code).message().to_string();
        Self {
            code,
            reference: reference.into(),
            message,
        }
    }

    /// Get the classified response code.
    pub fn response_code(&self) -> ResponseCode {
        ResponseCode::from_code(&self.code)
    }
}

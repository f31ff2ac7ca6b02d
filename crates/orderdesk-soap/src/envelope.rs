//! SOAP envelope template and operation catalog.

use crate::escape::escape;

/// Namespace of the service's operations and result elements.
pub const SERVICE_NS: &str = "http://tempuri.org/";
/// SOAP 1.1 envelope namespace.
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Remote SOAP operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoapOperation {
    /// Submit a new order.
    OrderSubmission,
    /// Look up stock for one SKU.
    StockCheck,
    /// Look up the status of a submitted order.
    OrderStatus,
}

impl SoapOperation {
    /// Operation element name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OrderSubmission => "OrderSubmission",
            Self::StockCheck => "StockCheck",
            Self::OrderStatus => "OrderStatus",
        }
    }

    /// Value of the `SOAPAction` header.
    pub fn soap_action(&self) -> &'static str {
        match self {
            Self::OrderSubmission => "http://tempuri.org/OrderSubmission",
            Self::StockCheck => "http://tempuri.org/StockCheck",
            Self::OrderStatus => "http://tempuri.org/OrderStatus",
        }
    }

    /// Name of the element carrying the result in the response.
    pub fn result_element(&self) -> &'static str {
        match self {
            Self::OrderSubmission => "OrderSubmissionResult",
            Self::StockCheck => "StockCheckResult",
            Self::OrderStatus => "OrderStatusResult",
        }
    }

    /// Resolve an operation from its `SOAPAction` header value.
    pub fn from_soap_action(action: &str) -> Option<Self> {
        let action = action.trim().trim_matches('"');
        [Self::OrderSubmission, Self::StockCheck, Self::OrderStatus]
            .into_iter()
            .find(|op| op.soap_action() == action)
    }
}

impl std::fmt::Display for SoapOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Wrap an inner XML fragment in the request envelope.
///
/// The fragment travels as escaped text, so its own entities are escaped a
/// second time.
pub fn request(op: SoapOperation, fragment: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
               xmlns:xsd="http://www.w3.org/2001/XMLSchema"
               xmlns:soap="{soap_ns}">
  <soap:Body>
    <{name} xmlns="{service_ns}">
      <xmlRequest>{payload}</xmlRequest>
    </{name}>
  </soap:Body>
</soap:Envelope>"#,
        soap_ns = SOAP_ENV_NS,
        service_ns = SERVICE_NS,
        name = op.name(),
        payload = escape(fragment),
    )
}

/// Build a response envelope the way the service returns one.
///
/// Used by local test doubles of the service.
pub fn response(op: SoapOperation, result_xml: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
               xmlns:xsd="http://www.w3.org/2001/XMLSchema"
               xmlns:soap="{soap_ns}">
  <soap:Body>
    <{name}Response xmlns="{service_ns}">
      <{result}>{payload}</{result}>
    </{name}Response>
  </soap:Body>
</soap:Envelope>"#,
        soap_ns = SOAP_ENV_NS,
        service_ns = SERVICE_NS,
        name = op.name(),
        result = op.result_element(),
        payload = escape(result_xml),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xml_request_text(envelope: &str) -> String {
        let doc = roxmltree::Document::parse(envelope).unwrap();
        let node = doc
            .descendants()
            .find(|n| n.has_tag_name((SERVICE_NS, "xmlRequest")))
            .unwrap();
        node.text().unwrap_or_default().to_string()
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(SoapOperation::StockCheck.name(), "StockCheck");
        assert_eq!(
            SoapOperation::OrderSubmission.soap_action(),
            "http://tempuri.org/OrderSubmission"
        );
        assert_eq!(SoapOperation::OrderStatus.result_element(), "OrderStatusResult");
    }

    #[test]
    fn test_from_soap_action() {
        assert_eq!(
            SoapOperation::from_soap_action("\"http://tempuri.org/StockCheck\""),
            Some(SoapOperation::StockCheck)
        );
        assert_eq!(SoapOperation::from_soap_action("http://tempuri.org/Nope"), None);
    }

    #[test]
    fn test_request_envelope_structure() {
        let env = request(SoapOperation::StockCheck, "<stock><sku>A</sku></stock>");
        assert!(env.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));

        let doc = roxmltree::Document::parse(&env).unwrap();
        let root = doc.root_element();
        assert!(root.has_tag_name((SOAP_ENV_NS, "Envelope")));

        let op = doc
            .descendants()
            .find(|n| n.has_tag_name((SERVICE_NS, "StockCheck")))
            .unwrap();
        assert_eq!(op.parent_element().unwrap().tag_name().name(), "Body");
    }

    #[test]
    fn test_request_payload_is_escaped_text() {
        let fragment = "<stock><sku>A&amp;B</sku></stock>";
        let env = request(SoapOperation::StockCheck, fragment);

        assert!(env.contains("&lt;stock&gt;&lt;sku&gt;A&amp;amp;B&lt;/sku&gt;&lt;/stock&gt;"));
        assert_eq!(xml_request_text(&env), fragment);
    }

    #[test]
    fn test_response_envelope_carries_result_text() {
        let env = response(SoapOperation::OrderStatus, "<orderstatus/>");
        let doc = roxmltree::Document::parse(&env).unwrap();
        let result = doc
            .descendants()
            .find(|n| n.has_tag_name((SERVICE_NS, "OrderStatusResult")))
            .unwrap();
        assert_eq!(result.text(), Some("<orderstatus/>"));
    }
}

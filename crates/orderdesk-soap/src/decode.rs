//! Response decoders.
//!
//! Every response is parsed twice: once for the SOAP envelope and once for
//! the XML document carried as text inside the result element.

use orderdesk_core::{OrderReceipt, OrderStatusReport, StockLevel};
use roxmltree::{Document, Node};

use crate::envelope::{SoapOperation, SERVICE_NS};
use crate::error::CodecError;

/// Named leaf lookup over the inner result document.
pub struct ResultFields<'a, 'input> {
    root: Node<'a, 'input>,
}

impl<'a, 'input> ResultFields<'a, 'input> {
    /// Get the text of a direct child element, or an empty string.
    pub fn get(&self, name: &str) -> String {
        self.root
            .children()
            .find(|n| n.is_element() && n.tag_name().name() == name)
            .map(|n| {
                n.children()
                    .filter(|c| c.is_text())
                    .filter_map(|c| c.text())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Extract the inner result text for an operation from a response envelope.
pub fn result_text(op: SoapOperation, response: &str) -> Result<String, CodecError> {
    let outer =
        Document::parse(response).map_err(|e| CodecError::MalformedResponse(e.to_string()))?;

    let result = outer
        .descendants()
        .find(|n| n.has_tag_name((SERVICE_NS, op.result_element())))
        .ok_or(CodecError::MissingResult(op.result_element()))?;

    Ok(result
        .children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect())
}

/// Decode a response envelope and map the inner result document.
pub fn decode_with<T>(
    op: SoapOperation,
    response: &str,
    map: impl FnOnce(&ResultFields<'_, '_>) -> T,
) -> Result<T, CodecError> {
    let inner_text = result_text(op, response)?;
    let inner =
        Document::parse(&inner_text).map_err(|e| CodecError::MalformedResult(e.to_string()))?;

    let fields = ResultFields {
        root: inner.root_element(),
    };
    Ok(map(&fields))
}

/// Decode an `OrderSubmission` response.
pub fn order_receipt(response: &str) -> Result<OrderReceipt, CodecError> {
    decode_with(SoapOperation::OrderSubmission, response, |f| {
        OrderReceipt::new(f.get("code"), f.get("reference"))
    })
}

/// Decode a `StockCheck` response.
pub fn stock_level(response: &str) -> Result<StockLevel, CodecError> {
    decode_with(SoapOperation::StockCheck, response, |f| {
        StockLevel::new(f.get("sku"), f.get("qty"))
    })
}

/// Decode an `OrderStatus` response.
pub fn order_status(response: &str) -> Result<OrderStatusReport, CodecError> {
    decode_with(SoapOperation::OrderStatus, response, |f| OrderStatusReport {
        reference: f.get("reference"),
        salesorder: f.get("salesorder"),
        orderdate: f.get("orderdate"),
        shipagent: f.get("shipagent"),
        shipservice: f.get("shipservice"),
        freightcost: f.get("freightcost"),
        trackingnumber1: f.get("trackingnumber1"),
        status: f.get("status"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope;

    #[test]
    fn test_order_receipt_success() {
        let resp = envelope::response(
            SoapOperation::OrderSubmission,
            "<message><code>200</code><reference>ORD-1</reference></message>",
        );
        let receipt = order_receipt(&resp).unwrap();
        assert_eq!(receipt.code, "200");
        assert_eq!(receipt.reference, "ORD-1");
        assert_eq!(receipt.message, "Order submitted successfully");
    }

    #[test]
    fn test_order_receipt_unknown_code() {
        let resp = envelope::response(
            SoapOperation::OrderSubmission,
            "<message><code>999</code><reference>R</reference></message>",
        );
        assert_eq!(order_receipt(&resp).unwrap().message, "Unknown error");
    }

    #[test]
    fn test_stock_level_zero() {
        let resp = envelope::response(
            SoapOperation::StockCheck,
            "<message><sku>XYZ</sku><qty>0</qty></message>",
        );
        let level = stock_level(&resp).unwrap();
        assert_eq!(level, StockLevel::new("XYZ", "0"));
        assert!(!level.is_available());
    }

    #[test]
    fn test_order_status_passes_fields_through() {
        let resp = envelope::response(
            SoapOperation::OrderStatus,
            "<message><reference>ORD-1</reference><salesorder>SO-77</salesorder>\
             <orderdate>3/9/2024</orderdate><shipagent>UPS</shipagent>\
             <shipservice>Ground</shipservice><freightcost>12.50</freightcost>\
             <trackingnumber1>1Z999AA10123456784</trackingnumber1>\
             <status>Shipped &amp; billed</status></message>",
        );
        let report = order_status(&resp).unwrap();
        assert_eq!(report.reference, "ORD-1");
        assert_eq!(report.salesorder, "SO-77");
        assert_eq!(report.orderdate, "3/9/2024");
        assert_eq!(report.shipagent, "UPS");
        assert_eq!(report.shipservice, "Ground");
        assert_eq!(report.freightcost, "12.50");
        assert_eq!(report.trackingnumber1, "1Z999AA10123456784");
        assert_eq!(report.status, "Shipped & billed");
    }

    #[test]
    fn test_missing_leaves_are_empty() {
        let resp = envelope::response(SoapOperation::OrderStatus, "<message><status>Open</status></message>");
        let report = order_status(&resp).unwrap();
        assert_eq!(report.status, "Open");
        assert_eq!(report.trackingnumber1, "");
        assert_eq!(report.salesorder, "");
    }

    #[test]
    fn test_result_inside_cdata() {
        let resp = r#"<?xml version="1.0"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <StockCheckResponse xmlns="http://tempuri.org/">
      <StockCheckResult><![CDATA[<message><sku>A1</sku><qty>4</qty></message>]]></StockCheckResult>
    </StockCheckResponse>
  </soap:Body>
</soap:Envelope>"#;
        assert_eq!(stock_level(resp).unwrap(), StockLevel::new("A1", "4"));
    }

    #[test]
    fn test_malformed_outer_document() {
        let err = stock_level("<soap:Envelope><unclosed>").unwrap_err();
        assert!(matches!(err, CodecError::MalformedResponse(_)));

        let err = stock_level("Service Unavailable").unwrap_err();
        assert!(matches!(err, CodecError::MalformedResponse(_)));
    }

    #[test]
    fn test_missing_result_element() {
        let resp = envelope::response(SoapOperation::OrderStatus, "<message/>");
        let err = stock_level(&resp).unwrap_err();
        assert_eq!(err, CodecError::MissingResult("StockCheckResult"));
    }

    #[test]
    fn test_result_element_requires_service_namespace() {
        let resp = r#"<Envelope><Body><StockCheckResult>&lt;m/&gt;</StockCheckResult></Body></Envelope>"#;
        assert_eq!(
            stock_level(resp).unwrap_err(),
            CodecError::MissingResult("StockCheckResult")
        );
    }

    #[test]
    fn test_malformed_inner_document() {
        let resp = envelope::response(SoapOperation::StockCheck, "<message><sku>A</message>");
        let err = stock_level(&resp).unwrap_err();
        assert!(matches!(err, CodecError::MalformedResult(_)));

        let resp = envelope::response(SoapOperation::StockCheck, "");
        assert!(matches!(
            stock_level(&resp).unwrap_err(),
            CodecError::MalformedResult(_)
        ));
    }

    #[test]
    fn test_error_messages() {
        assert!(CodecError::MalformedResponse("x".into())
            .to_string()
            .starts_with("Invalid XML response"));
        assert!(CodecError::MissingResult("StockCheckResult")
            .to_string()
            .starts_with("No result found in response"));
        assert!(CodecError::MalformedResult("x".into())
            .to_string()
            .starts_with("Invalid result XML"));
    }
}

//! Request fragment encoders.
//!
//! Each encoder produces the inner XML document for one operation. Values
//! are escaped once here; `envelope::request` escapes the whole fragment
//! again.

use chrono::{Local, NaiveDateTime};
use orderdesk_core::{Credentials, OrderRequest};

use crate::escape::escape;

/// Format of the `<date>` element in order submissions.
pub const SHIP_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a ship date for an order fragment.
pub fn format_ship_date(at: NaiveDateTime) -> String {
    at.format(SHIP_DATE_FORMAT).to_string()
}

/// Current local time, formatted as a ship date.
pub fn ship_date_now() -> String {
    format_ship_date(Local::now().naive_local())
}

fn element(out: &mut String, name: &str, value: &str) {
    out.push('<');
    out.push_str(name);
    out.push('>');
    out.push_str(&escape(value));
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn credential_elements(out: &mut String, credentials: &Credentials) {
    element(out, "account", credentials.account());
    element(out, "password", credentials.password());
}

/// Encode an order submission.
///
/// Element order is fixed by the service. Absent `address2` and
/// `instructions` are sent as empty elements.
pub fn order(order: &OrderRequest, credentials: &Credentials, ship_date: &str) -> String {
    let recipient = &order.recipient;
    let mut out = String::with_capacity(512 + order.items.len() * 48);

    out.push_str("<order>");
    credential_elements(&mut out, credentials);
    element(&mut out, "reference", order.reference.as_str());
    element(&mut out, "shipby", &order.shipping_method);
    element(&mut out, "date", ship_date);

    out.push_str("<items>");
    for item in &order.items {
        out.push_str("<item>");
        element(&mut out, "sku", item.sku.as_str());
        element(&mut out, "qty", &item.quantity.to_string());
        out.push_str("</item>");
    }
    out.push_str("</items>");

    element(&mut out, "last", &recipient.last_name);
    element(&mut out, "first", &recipient.first_name);
    element(&mut out, "address1", &recipient.address1);
    element(&mut out, "address2", recipient.address2.as_deref().unwrap_or(""));
    element(&mut out, "city", &recipient.city);
    element(&mut out, "state", &recipient.state);
    element(&mut out, "zip", &recipient.zip);
    element(&mut out, "country", &recipient.country);
    element(&mut out, "phone", &recipient.phone);
    element(&mut out, "emailaddress", &recipient.email);
    element(&mut out, "instructions", order.instructions.as_deref().unwrap_or(""));
    out.push_str("</order>");

    out
}

/// Encode a single-SKU stock check.
pub fn stock_check(credentials: &Credentials, sku: &str) -> String {
    let mut out = String::from("<stock>");
    credential_elements(&mut out, credentials);
    element(&mut out, "sku", sku);
    out.push_str("</stock>");
    out
}

/// Encode an order status lookup.
pub fn order_status(credentials: &Credentials, reference: &str) -> String {
    let mut out = String::from("<orderstatus>");
    credential_elements(&mut out, credentials);
    element(&mut out, "reference", reference);
    out.push_str("</orderstatus>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use orderdesk_core::Recipient;

    fn credentials() -> Credentials {
        Credentials::new("acct-9", "p&ss<word>")
    }

    fn sample_order() -> OrderRequest {
        let recipient = Recipient::new(
            "Zoë",
            "O'Brien",
            "1 \"Main\" St",
            "Springfield",
            "IL",
            "62701",
            "US",
        )
        .with_address2("Apt <4>")
        .with_contact("555-0100", "zoe@example.com");

        OrderRequest::new("ORD-&-1", "F006", recipient)
            .with_item("ABC123", 2)
            .with_item("X&Y", 10)
            .with_instructions("Leave at back door & ring")
    }

    fn leaf(doc: &roxmltree::Document<'_>, name: &str) -> String {
        let node = doc
            .root_element()
            .children()
            .find(|n| n.has_tag_name(name))
            .unwrap_or_else(|| panic!("missing <{}>", name));
        node.text().unwrap_or_default().to_string()
    }

    #[test]
    fn test_format_ship_date() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 0)
            .unwrap();
        assert_eq!(format_ship_date(at), "2024-03-09 07:05:00");
    }

    #[test]
    fn test_ship_date_now_shape() {
        let now = ship_date_now();
        assert!(NaiveDateTime::parse_from_str(&now, SHIP_DATE_FORMAT).is_ok());
    }

    #[test]
    fn test_order_fragment_round_trip() {
        let order = sample_order();
        let xml = super::order(&order, &credentials(), "2024-03-09 07:05:00");
        let doc = roxmltree::Document::parse(&xml).unwrap();

        assert_eq!(doc.root_element().tag_name().name(), "order");
        assert_eq!(leaf(&doc, "account"), "acct-9");
        assert_eq!(leaf(&doc, "password"), "p&ss<word>");
        assert_eq!(leaf(&doc, "reference"), "ORD-&-1");
        assert_eq!(leaf(&doc, "shipby"), "F006");
        assert_eq!(leaf(&doc, "date"), "2024-03-09 07:05:00");
        assert_eq!(leaf(&doc, "last"), "O'Brien");
        assert_eq!(leaf(&doc, "first"), "Zoë");
        assert_eq!(leaf(&doc, "address1"), "1 \"Main\" St");
        assert_eq!(leaf(&doc, "address2"), "Apt <4>");
        assert_eq!(leaf(&doc, "city"), "Springfield");
        assert_eq!(leaf(&doc, "state"), "IL");
        assert_eq!(leaf(&doc, "zip"), "62701");
        assert_eq!(leaf(&doc, "country"), "US");
        assert_eq!(leaf(&doc, "phone"), "555-0100");
        assert_eq!(leaf(&doc, "emailaddress"), "zoe@example.com");
        assert_eq!(leaf(&doc, "instructions"), "Leave at back door & ring");

        let items: Vec<(String, String)> = doc
            .descendants()
            .filter(|n| n.has_tag_name("item"))
            .map(|item| {
                let get = |name: &str| {
                    item.children()
                        .find(|n| n.has_tag_name(name))
                        .and_then(|n| n.text())
                        .unwrap_or_default()
                        .to_string()
                };
                (get("sku"), get("qty"))
            })
            .collect();
        assert_eq!(
            items,
            vec![
                ("ABC123".to_string(), "2".to_string()),
                ("X&Y".to_string(), "10".to_string())
            ]
        );
    }

    #[test]
    fn test_order_fragment_element_order() {
        let xml = super::order(&sample_order(), &credentials(), "d");
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let names: Vec<&str> = doc
            .root_element()
            .children()
            .filter(|n| n.is_element())
            .map(|n| n.tag_name().name())
            .collect();
        assert_eq!(
            names,
            vec![
                "account",
                "password",
                "reference",
                "shipby",
                "date",
                "items",
                "last",
                "first",
                "address1",
                "address2",
                "city",
                "state",
                "zip",
                "country",
                "phone",
                "emailaddress",
                "instructions"
            ]
        );
    }

    #[test]
    fn test_optional_fields_serialize_empty() {
        let mut order = sample_order();
        order.recipient.address2 = None;
        order.instructions = None;

        let xml = super::order(&order, &credentials(), "d");
        assert!(xml.contains("<address2></address2>"));
        assert!(xml.contains("<instructions></instructions>"));
    }

    #[test]
    fn test_stock_check_fragment() {
        let xml = stock_check(&Credentials::new("a", "b"), "SKU<1>");
        assert_eq!(
            xml,
            "<stock><account>a</account><password>b</password><sku>SKU&lt;1&gt;</sku></stock>"
        );
    }

    #[test]
    fn test_order_status_fragment() {
        let xml = order_status(&Credentials::new("a", "b"), "ORD-1");
        assert_eq!(
            xml,
            "<orderstatus><account>a</account><password>b</password><reference>ORD-1</reference></orderstatus>"
        );
    }
}

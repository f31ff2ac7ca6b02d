//! Order submission command.

use anyhow::{bail, Context as _, Result};
use chrono::Local;
use dialoguer::Confirm;
use orderdesk_client::OrderBackend;
use orderdesk_core::{shipping, OrderRequest};

use super::SubmitArgs;
use crate::context::Context;

/// Run the submit command.
pub async fn run(args: SubmitArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.file);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read order file: {}", path.display()))?;
    let order = parse_order(&content)
        .with_context(|| format!("Invalid order file: {}", path.display()))?;

    ctx.output.header(&format!("Order {}", order.reference));
    let method = shipping::find(&order.shipping_method)
        .map(|m| m.label)
        .unwrap_or("unknown");
    ctx.output.kv("Ship via", &format!("{} ({})", method, order.shipping_method));
    ctx.output.kv("Recipient", &order.recipient.full_name());
    ctx.output.kv("Address", &order.recipient.one_line());
    for item in &order.items {
        ctx.output.list_item(&format!("{} x {}", item.quantity, item.sku));
    }
    ctx.output.kv("Units", &order.item_count().to_string());

    if !args.yes && !ctx.output.is_json() {
        ctx.output.info("");
        let confirmed = Confirm::new()
            .with_prompt("Submit this order?")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Submission cancelled");
            return Ok(());
        }
    }

    let client = ctx.client()?;
    let spinner = ctx.output.spinner("Submitting order...");
    let result = client.submit_order(&order).await;
    spinner.finish_and_clear();
    let receipt = result?;

    if ctx.output.is_json() {
        ctx.output.json(&receipt);
    } else {
        ctx.output.kv("Code", &receipt.code);
        ctx.output.kv("Reference", &receipt.reference);
        ctx.output
            .kv("Submitted", &Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
    }

    if !receipt.response_code().is_success() {
        bail!("{} (code {})", receipt.message, receipt.code);
    }
    ctx.output.success(&receipt.message);
    Ok(())
}

/// Parse and validate an order file.
fn parse_order(content: &str) -> Result<OrderRequest> {
    let order: OrderRequest = serde_json::from_str(content)?;
    order.validate()?;
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER: &str = r#"{
        "reference": "ORD-42",
        "shippingMethod": "U006",
        "items": [{ "sku": "SKU-1", "quantity": 1 }, { "sku": "SKU-2", "quantity": "3" }],
        "firstName": "Sam",
        "lastName": "Lee",
        "address1": "9 Elm St",
        "city": "Denver",
        "state": "CO",
        "zip": "80202",
        "country": "US",
        "phone": "555-0199",
        "email": "sam@example.com",
        "instructions": "Leave at door"
    }"#;

    #[test]
    fn test_parse_order() {
        let order = parse_order(ORDER).unwrap();
        assert_eq!(order.reference.as_str(), "ORD-42");
        assert_eq!(order.item_count(), 4);
        assert_eq!(order.instructions.as_deref(), Some("Leave at door"));
    }

    #[test]
    fn test_parse_order_rejects_unknown_method() {
        let content = ORDER.replace("U006", "Z999");
        let err = parse_order(&content).unwrap_err();
        assert_eq!(err.to_string(), "Unknown shipping method: Z999");
    }
}

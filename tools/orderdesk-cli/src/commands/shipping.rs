//! Shipping method listing.

use anyhow::Result;
use orderdesk_core::shipping::{self, Carrier};

use crate::context::Context;

/// Run the shipping-methods command.
pub async fn run(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&shipping::catalog());
        return Ok(());
    }

    for carrier in [Carrier::FedEx, Carrier::Ups, Carrier::Usps] {
        ctx.output.header(carrier.as_str());
        for method in shipping::by_carrier(carrier) {
            ctx.output.list_item(&format!("{}  {}", method.value, method.label));
        }
    }
    Ok(())
}

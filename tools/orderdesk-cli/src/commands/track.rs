//! Order status command.

use anyhow::Result;
use orderdesk_client::OrderBackend;

use super::TrackArgs;
use crate::context::Context;

/// Run the track command.
pub async fn run(args: TrackArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    let spinner = ctx.output.spinner(&format!("Looking up {}...", args.reference));
    let result = client.order_status(&args.reference).await;
    spinner.finish_and_clear();
    let report = result?;

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    ctx.output.header(&format!("Order {}", report.reference));
    let rows = [
        ("Status", &report.status),
        ("Sales order", &report.salesorder),
        ("Order date", &report.orderdate),
        ("Carrier", &report.shipagent),
        ("Service", &report.shipservice),
        ("Freight", &report.freightcost),
        ("Tracking", &report.trackingnumber1),
    ];
    for (label, value) in rows {
        if !value.is_empty() {
            ctx.output.kv(label, value);
        }
    }

    if !report.has_tracking() {
        ctx.output.info("No tracking number yet");
    }
    Ok(())
}

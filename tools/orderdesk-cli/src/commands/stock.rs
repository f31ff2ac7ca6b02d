//! Stock check command.

use anyhow::Result;
use async_trait::async_trait;
use indicatif::ProgressBar;
use orderdesk_client::{bulk_check_stock, ClientError, OrderBackend};
use orderdesk_core::{OrderReceipt, OrderRequest, OrderStatusReport, StockLevel};

use super::StockArgs;
use crate::context::Context;
use crate::output::{availability_badge, status_badge};

/// Run the stock command.
pub async fn run(args: StockArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    if let [sku] = args.skus.as_slice() {
        return check_one(sku, &client, ctx).await;
    }

    let concurrency = args.concurrency.unwrap_or(ctx.config.bulk_concurrency);
    ctx.output.debug(&format!(
        "Checking {} SKUs, {} at a time",
        args.skus.len(),
        concurrency.max(1)
    ));

    let progress = ctx.output.progress(args.skus.len() as u64, "Checking stock");
    let tracked = Tracked {
        inner: &client,
        progress: progress.clone(),
    };
    let entries = bulk_check_stock(&tracked, &args.skus, concurrency).await;
    progress.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&entries);
        return Ok(());
    }

    let width = entries.iter().map(|e| e.sku.len()).max().unwrap_or(3).max(3);
    let widths = [width, 8, 14, 6];
    ctx.output.header("Stock");
    ctx.output.table_row(&["SKU", "QTY", "AVAILABILITY", "STATUS"], &widths);
    for entry in &entries {
        let quantity = entry.quantity.to_string();
        let availability = availability_badge(entry.is_available);
        let status = status_badge(entry.status);
        ctx.output.table_row(
            &[entry.sku.as_str(), quantity.as_str(), availability.as_str(), status.as_str()],
            &widths,
        );
    }

    let failed: Vec<_> = entries.iter().filter(|e| !e.is_success()).collect();
    if !failed.is_empty() {
        ctx.output.info("");
        for entry in &failed {
            ctx.output.warn(&format!(
                "{}: {}",
                entry.sku,
                entry.error.as_deref().unwrap_or("unknown error")
            ));
        }
    }

    Ok(())
}

async fn check_one(sku: &str, backend: &dyn OrderBackend, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner(&format!("Checking {}...", sku));
    let result = backend.check_stock(sku).await;
    spinner.finish_and_clear();
    let level = result?;

    if ctx.output.is_json() {
        ctx.output.json(&level);
        return Ok(());
    }

    ctx.output.header(&format!("Stock for {}", level.sku));
    ctx.output.kv("Quantity", &level.quantity().to_string());
    ctx.output.kv("Availability", &availability_badge(level.is_available()));
    if ctx.output.is_verbose() {
        ctx.output.kv("Raw qty", &level.qty);
    }
    Ok(())
}

/// Backend wrapper that advances a progress bar after each stock lookup.
struct Tracked<'a, B: OrderBackend + ?Sized> {
    inner: &'a B,
    progress: ProgressBar,
}

#[async_trait]
impl<'a, B: OrderBackend + ?Sized> OrderBackend for Tracked<'a, B> {
    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderReceipt, ClientError> {
        self.inner.submit_order(order).await
    }

    async fn check_stock(&self, sku: &str) -> Result<StockLevel, ClientError> {
        let result = self.inner.check_stock(sku).await;
        self.progress.inc(1);
        result
    }

    async fn order_status(&self, reference: &str) -> Result<OrderStatusReport, ClientError> {
        self.inner.order_status(reference).await
    }
}

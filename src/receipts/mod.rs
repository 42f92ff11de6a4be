//! Receipt side effect of a completed order.

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub id: String,
    pub email: String,
}

#[async_trait]
pub trait ReceiptSender: Send + Sync {
    async fn send_receipt(&self, receipt: Receipt) -> Result<()>;
}

/// Default sender: records the receipt in the service log.
#[derive(Debug, Clone, Default)]
pub struct LogReceiptSender;

#[async_trait]
impl ReceiptSender for LogReceiptSender {
    async fn send_receipt(&self, receipt: Receipt) -> Result<()> {
        info!(order_id = %receipt.id, email = %receipt.email, "receipt issued");
        Ok(())
    }
}

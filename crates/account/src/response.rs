use crate::error::SmartAccountError;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};
use vireo_primitives::{UserOperationHash, UserOperationReceipt};
use vireo_rpc::Bundler;

/// A user operation accepted by the bundler
#[derive(Clone, Debug)]
pub struct UserOpResponse {
    pub user_op_hash: UserOperationHash,
    bundler: Bundler,
    poll_interval: Duration,
    timeout: Duration,
}

impl UserOpResponse {
    pub fn new(
        user_op_hash: UserOperationHash,
        bundler: Bundler,
        poll_interval: Duration,
        timeout: Duration,
    ) -> Self {
        Self { user_op_hash, bundler, poll_interval, timeout }
    }

    /// Polls the bundler until the user operation is included
    ///
    /// # Returns
    /// * `Err(SmartAccountError::ReceiptTimeout)` - if no receipt shows up within the timeout
    pub async fn wait(&self) -> Result<UserOperationReceipt, SmartAccountError> {
        let deadline = Instant::now() + self.timeout;

        loop {
            if let Some(receipt) = self.bundler.get_user_op_receipt(&self.user_op_hash).await? {
                info!(
                    "User operation {} included in transaction {:?} (success: {})",
                    self.user_op_hash, receipt.tx_receipt.transaction_hash, receipt.success
                );
                return Ok(receipt);
            }

            if Instant::now() + self.poll_interval > deadline {
                return Err(SmartAccountError::ReceiptTimeout {
                    hash: self.user_op_hash,
                    timeout: self.timeout,
                });
            }

            debug!("No receipt yet for user operation {}", self.user_op_hash);
            sleep(self.poll_interval).await;
        }
    }
}

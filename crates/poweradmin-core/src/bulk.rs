//! Bulk transaction client
//!
//! A bulk request is applied by the server as one all-or-nothing unit. The
//! client reports the server's verdict and nothing more: when the batch is
//! rejected, no operation is considered applied, and no attempt is made to
//! work out which ones "probably" went through.

use crate::api::ApiClient;
use crate::context::RequestContext;
use crate::envelope::{self, ApiResponse};
use crate::error::{Error, Result};
use crate::model::bulk::{BulkOperation, BulkRequest, BulkResponse};
use crate::traits::Method;
use serde::Serialize;
use tracing::{debug, warn};

/// Outcome of an accepted bulk submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkOutcome {
    pub success_count: u64,
    pub failure_count: u64,
    pub errors: Vec<String>,
}

/// Submits bulk record operations
#[derive(Debug, Clone)]
pub struct BulkClient {
    client: ApiClient,
}

impl BulkClient {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn validate(operations: &[BulkOperation]) -> Result<()> {
        if operations.is_empty() {
            return Err(Error::validation("bulk request must contain at least one operation"));
        }
        for (index, op) in operations.iter().enumerate() {
            match op {
                BulkOperation::Create(create) => {
                    if create.name.is_empty() || create.rtype.is_empty() || create.content.is_empty() {
                        return Err(Error::validation(format!(
                            "operation {}: create requires name, type and content",
                            index + 1
                        )));
                    }
                }
                BulkOperation::Update(_) | BulkOperation::Delete { .. } => {
                    if op.target().is_none_or(|id| id <= 0) {
                        return Err(Error::validation(format!(
                            "operation {}: {} requires a positive record id",
                            index + 1,
                            op.action()
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Submit `operations` to `zones/{zone_id}/records/bulk`, in order
    ///
    /// # Returns
    ///
    /// - `Ok(BulkOutcome)`: every operation was applied
    /// - `Err(Error::BulkFailure)`: the server rejected the batch; none applied
    /// - `Err(_)`: validation, transport or remote error; treat as none applied
    pub async fn submit(
        &self,
        ctx: &RequestContext,
        zone_id: i64,
        operations: Vec<BulkOperation>,
    ) -> Result<BulkOutcome> {
        Self::validate(&operations)?;
        let count = operations.len() as u64;
        let body = serde_json::to_value(BulkRequest { operations })?;

        let raw = self
            .client
            .send_raw(ctx, Method::Post, &format!("zones/{}/records/bulk", zone_id), Some(body))
            .await?;

        // A per-operation report wins over the status: it is the most precise
        // account of a rejected batch.
        let report = match ApiResponse::parse(&raw.body).map(|env| env.data_as::<BulkResponse>()) {
            Some(Ok(report)) => report,
            Some(Err(e)) if raw.is_success() => {
                return Err(Error::invalid_response(format!("unreadable bulk report: {}", e)));
            }
            // A failed status without a readable report is classified by the status
            Some(Err(_)) | None => None,
        };

        if let Some(report) = &report {
            if report.failure_count > 0 || !report.errors.is_empty() {
                warn!(
                    zone_id,
                    reported_success_count = report.success_count,
                    failure_count = report.failure_count,
                    errors = report.errors.len(),
                    "Bulk request rejected"
                );
                return Err(Error::BulkFailure {
                    success_count: 0,
                    failure_count: report.failure_count,
                    errors: report.errors.clone(),
                });
            }
        }

        envelope::check(&raw)?;

        let outcome = match report {
            Some(report) => BulkOutcome {
                success_count: report.success_count,
                failure_count: 0,
                errors: Vec::new(),
            },
            // Accepted without a report: the whole batch was applied
            None => BulkOutcome {
                success_count: count,
                failure_count: 0,
                errors: Vec::new(),
            },
        };
        debug!(zone_id, success_count = outcome.success_count, "Bulk request applied");
        Ok(outcome)
    }
}

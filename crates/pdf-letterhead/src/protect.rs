//! Rights-protection boundary
//!
//! Protection is an external transformation applied to the finished
//! document bytes. The core only knows the seam; implementations live with
//! the callers that own the transport.

use crate::types::Result;
use async_trait::async_trait;

/// An external service that transforms finished document bytes.
///
/// Failures surface as [`GenerateError::Protection`](crate::GenerateError);
/// the unprotected document is never returned in their place.
#[async_trait]
pub trait RightsProtector: Send + Sync {
    async fn protect(&self, document: Vec<u8>) -> Result<Vec<u8>>;
}

/// Pass-through protector for callers that skip the protection step.
pub struct NoProtection;

#[async_trait]
impl RightsProtector for NoProtection {
    async fn protect(&self, document: Vec<u8>) -> Result<Vec<u8>> {
        Ok(document)
    }
}

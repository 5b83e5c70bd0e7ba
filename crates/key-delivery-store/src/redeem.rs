//! The redemption transaction.
//!
//! Exchanges one active code for one credential. The only consuming step is
//! [`Store::delete_code_by_value`]; everything before it is a read, so a code
//! can only be spent by the caller whose delete actually removed it.

use key_delivery_core::{normalize_code_value, RedemptionFailure, RedemptionOutcome};

use crate::error::Result;
use crate::Store;

/// Redeem `value` against `store`.
///
/// - No active code with this value: `InvalidCode`, nothing changes.
/// - Valid code but empty inventory: `NoInventory`, the code stays redeemable.
/// - Otherwise the code is consumed and a random credential is delivered. The
///   credential itself stays in inventory.
///
/// If a concurrent redemption consumes the same code between the lookup and the
/// delete, this call reports `InvalidCode`.
///
/// # Errors
///
/// Returns an error if a storage operation fails. Business failures are
/// reported through the returned outcome, not as errors.
pub fn redeem<S: Store + ?Sized>(store: &S, value: &str) -> Result<RedemptionOutcome> {
    let Ok(value) = normalize_code_value(value) else {
        return Ok(RedemptionOutcome::failed(RedemptionFailure::InvalidCode));
    };

    let Some(code) = store.find_code_by_value(value)? else {
        tracing::debug!("Redemption rejected: unknown code");
        return Ok(RedemptionOutcome::failed(RedemptionFailure::InvalidCode));
    };

    let Some(credential) = store.pick_random_credential()? else {
        tracing::warn!(code_id = %code.id, "Redemption rejected: inventory empty, code kept");
        return Ok(RedemptionOutcome::failed(RedemptionFailure::NoInventory));
    };

    if !store.delete_code_by_value(value)? {
        tracing::info!(code_id = %code.id, "Redemption lost race: code already consumed");
        return Ok(RedemptionOutcome::failed(RedemptionFailure::InvalidCode));
    }

    tracing::info!(
        code_id = %code.id,
        credential_id = %credential.id,
        "Code redeemed"
    );

    Ok(RedemptionOutcome::delivered(credential.delivery()))
}

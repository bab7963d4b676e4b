//! Console trace rendering for the value shapes the verifier logs.
//!
//! Serialization is explicit for exactly these shapes, with large integers
//! rendered as decimal strings, instead of going through a generic
//! serializer hook.

use edv_primitives::{SignedAuthorization, TxOutcome};

/// Render a signed authorization tuple as JSON.
pub fn authorization_json(authorization: &SignedAuthorization) -> serde_json::Value {
    serde_json::json!({
        "chainId": authorization.chain_id.to_string(),
        "address": authorization.address.to_string(),
        "nonce": authorization.nonce.to_string(),
        "yParity": authorization.y_parity().to_string(),
        "r": authorization.r().to_string(),
        "s": authorization.s().to_string(),
    })
}

/// Render a transaction outcome as JSON.
pub fn outcome_json(outcome: &TxOutcome) -> serde_json::Value {
    let mut value = serde_json::json!({
        "hash": outcome.hash.to_string(),
        "status": outcome.status.to_string(),
    });
    if let Some(reason) = outcome.revert_reason() {
        value["revertData"] = serde_json::Value::String(reason.to_string());
    }
    value
}

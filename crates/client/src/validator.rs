//! Per-item request validation
//!
//! [`validate`] is pure and synchronous: it either produces a wire-ready
//! [`StoreOp`] or a typed [`InputError`], and never touches the network.
//!
//! Check order (stable, first failure wins):
//!
//! 1. empty key
//! 2. key length over `max_key_size`
//! 3. payload length over `max_payload_size` (mutating ops only)
//! 4. effective TTL over `max_ttl_secs`
//! 5. op-specific: Create requires a non-zero effective TTL; CompareAndSet
//!    requires `version >= 1`
//!
//! TTL resolution: Create substitutes the configured default for a missing
//! or zero TTL (every record needs a lifetime). All other operations keep
//! zero, meaning "don't change the remaining lifetime"; for a Get that is
//! what makes a plain read non-sliding.

use crate::transport::StoreOp;
use ttlkv_core::{ClientConfig, InputError, OperationRequest, OperationType};
use uuid::Uuid;

/// Validate one request against the configured bounds.
///
/// On success the returned [`StoreOp`] carries a fresh correlation id, the
/// client's scope and the resolved effective TTL.
pub fn validate(req: &OperationRequest, config: &ClientConfig) -> Result<StoreOp, InputError> {
    if req.key.is_empty() {
        return Err(InputError::EmptyKey);
    }
    if req.key.len() > config.max_key_size {
        return Err(InputError::KeySizeExceeded {
            size: req.key.len(),
            max: config.max_key_size,
        });
    }

    if req.op.is_mutation() && req.value.len() > config.max_payload_size {
        return Err(InputError::PayloadSizeExceeded {
            size: req.value.len(),
            max: config.max_payload_size,
        });
    }

    let requested = req.ttl.unwrap_or(0);
    let effective_ttl = match req.op {
        OperationType::Create if requested == 0 => config.default_ttl_secs,
        _ => requested,
    };
    if effective_ttl > config.max_ttl_secs {
        return Err(InputError::TtlExceedsMax {
            ttl: effective_ttl,
            max: config.max_ttl_secs,
        });
    }

    match req.op {
        OperationType::Create if effective_ttl == 0 => return Err(InputError::ZeroTtl),
        OperationType::CompareAndSet if req.version < 1 => {
            return Err(InputError::InvalidVersion {
                version: req.version,
            })
        }
        _ => {}
    }

    let value = if req.op.is_mutation() {
        req.value.clone()
    } else {
        Vec::new()
    };

    Ok(StoreOp {
        request_id: Uuid::new_v4(),
        op: req.op,
        namespace: config.record_namespace.clone(),
        application: config.application.clone(),
        key: req.key.clone(),
        value,
        version: req.version,
        ttl_secs: effective_ttl,
        creation_time: req.creation_time,
    })
}

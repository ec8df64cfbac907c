/*!
 * Argument Codec
 *
 * Positional argument decoding and result encoding for dispatch tables
 */

use super::Value;
use crate::core::guard::GuardError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Reject calls whose argument count differs from the operation's arity
#[inline]
pub fn check_arity(operation: &str, expected: usize, actual: usize) -> Result<(), GuardError> {
    if expected == actual {
        Ok(())
    } else {
        Err(GuardError::ArityMismatch {
            operation: operation.to_string(),
            expected,
            actual,
        })
    }
}

/// Decode one positional argument
///
/// A missing argument decodes from `null`, so `Option<_>` parameters may be
/// omitted by callers that skip the arity check.
pub fn decode_arg<A: DeserializeOwned>(
    operation: &str,
    argument: &str,
    value: Option<&Value>,
) -> Result<A, GuardError> {
    let value = value.cloned().unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|e| GuardError::InvalidArgument {
        operation: operation.to_string(),
        argument: argument.to_string(),
        reason: e.to_string(),
    })
}

/// Encode an operation's return value
#[inline]
pub fn encode_value<R: Serialize>(output: R) -> anyhow::Result<Value> {
    Ok(serde_json::to_value(output)?)
}

/// Encode a fallible operation's return value, passing its error through
#[inline]
pub fn encode_result<R, E>(output: Result<R, E>) -> anyhow::Result<Value>
where
    R: Serialize,
    E: Into<anyhow::Error>,
{
    encode_value(output.map_err(Into::into)?)
}

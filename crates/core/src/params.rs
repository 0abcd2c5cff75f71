//! Typed lookups into a JSON parameter object.
//!
//! Missing keys and values of the wrong JSON type fall back to the supplied
//! default. Range checks happen later, in
//! [`SimulationParams::validate`](crate::integrator::SimulationParams::validate).

use serde_json::Value;

/// Reads `params[name]` as `f64`, accepting integers too.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Reads `params[name]` as a non-negative integer.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

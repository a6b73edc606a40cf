//! Schema contracts: validation of untyped JSON with defaults applied.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ContractViolation;

/// A typed shape that raw JSON must satisfy.
///
/// Field types, optionality, enumerations and defaults are declared through
/// serde on the implementing type; [`Contract::check`] adds the rules serde
/// cannot express (ranges, non-empty strings, cross-field invariants).
/// Unknown fields are dropped, so re-serializing a validated value yields its
/// normalized form.
pub trait Contract: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Rules beyond the declared field shapes.
    fn check(&self) -> Result<(), ContractViolation> {
        Ok(())
    }

    /// Validate a raw value, returning it typed with defaults applied.
    fn validate(raw: Value) -> Result<Self, ContractViolation> {
        let value: Self = serde_json::from_value(raw)?;
        value.check()?;
        Ok(value)
    }

    /// Validate a raw value and return its normalized JSON form.
    fn normalize(raw: Value) -> Result<Value, ContractViolation> {
        let value = Self::validate(raw)?;
        Ok(serde_json::to_value(value)?)
    }
}

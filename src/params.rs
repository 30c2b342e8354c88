//! Parameter slots and runtime parameter resolution.
//!
//! A statement declares one ordered slot per `?` placeholder; at execution
//! time the runtime parameters are some combination of an ad-hoc
//! additional-parameters bag and a scalar or structured parameter object.
//! Resolution turns the two into an ordered list of SQL-literal strings.

use std::collections::HashMap;

use crate::error::{TraceError, TraceResult};
use crate::value::{Value, format_literal};

/// Binding mode of a parameter slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamMode {
    In,
    Out,
    InOut,
}

/// One declared placeholder binding point, in statement order.
#[derive(Debug, Clone)]
pub struct ParamSlot {
    /// Logical property name used to look up the runtime value.
    pub property: String,
    pub mode: ParamMode,
}

impl ParamSlot {
    pub fn new(property: impl Into<String>, mode: ParamMode) -> Self {
        Self {
            property: property.into(),
            mode,
        }
    }

    /// An ordinary input slot.
    pub fn input(property: impl Into<String>) -> Self {
        Self::new(property, ParamMode::In)
    }
}

/// The parameter object a statement was executed with.
#[derive(Debug, Clone, Default)]
pub enum ParamObject {
    /// No parameter object; unresolvable slots read as null.
    #[default]
    None,
    /// A single scalar argument, used directly for any slot that reaches it.
    Scalar(Value),
    /// A structured object exposing named properties.
    Record(HashMap<String, Value>),
}

/// Runtime parameters: the parameter object plus the additional-parameters
/// bag, which takes priority for any property it names.
#[derive(Debug, Clone, Default)]
pub struct BoundParams {
    object: ParamObject,
    additional: HashMap<String, Value>,
}

impl BoundParams {
    pub fn new(object: ParamObject) -> Self {
        Self {
            object,
            additional: HashMap::new(),
        }
    }

    /// No parameter object at all.
    pub fn none() -> Self {
        Self::new(ParamObject::None)
    }

    /// A single scalar argument.
    pub fn scalar(value: impl Into<Value>) -> Self {
        Self::new(ParamObject::Scalar(value.into()))
    }

    /// A structured parameter object built from named properties.
    pub fn record<K, V>(properties: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self::new(ParamObject::Record(
            properties
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    /// Add an ad-hoc additional parameter, shadowing the parameter object.
    pub fn with_additional(mut self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.additional.insert(property.into(), value.into());
        self
    }

    /// Resolve one slot's property.
    ///
    /// Priority: additional bag, then null when there is no parameter
    /// object, then the scalar itself, then the record's property. A record
    /// missing the property is a hard error.
    fn lookup(&self, property: &str) -> TraceResult<Value> {
        if let Some(value) = self.additional.get(property) {
            return Ok(value.clone());
        }
        match &self.object {
            ParamObject::None => Ok(Value::Null),
            ParamObject::Scalar(value) => Ok(value.clone()),
            ParamObject::Record(properties) => properties
                .get(property)
                .cloned()
                .ok_or_else(|| TraceError::missing_property(property)),
        }
    }
}

/// Resolve every non-output slot to its SQL-literal text, in slot order.
pub fn resolve_parameters(slots: &[ParamSlot], params: &BoundParams) -> TraceResult<Vec<String>> {
    let mut literals = Vec::with_capacity(slots.len());
    for slot in slots {
        if slot.mode == ParamMode::Out {
            continue;
        }
        let value = params.lookup(&slot.property)?;
        literals.push(format_literal(&value).into_sql());
    }
    Ok(literals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn slots(names: &[&str]) -> Vec<ParamSlot> {
        names.iter().map(|n| ParamSlot::input(n.to_string())).collect()
    }

    #[test]
    fn test_record_resolves_in_slot_order() {
        let params = BoundParams::record([("id", Value::Int(42)), ("name", Value::from("Alice"))]);
        let literals = resolve_parameters(&slots(&["id", "name"]), &params).unwrap();
        assert_eq!(literals, vec!["42".to_string(), "'Alice'".to_string()]);
    }

    #[test]
    fn test_scalar_used_for_single_argument() {
        let params = BoundParams::scalar(7i64);
        let literals = resolve_parameters(&slots(&["id"]), &params).unwrap();
        assert_eq!(literals, vec!["7".to_string()]);
    }

    #[test]
    fn test_no_parameter_object_reads_null() {
        let literals = resolve_parameters(&slots(&["id"]), &BoundParams::none()).unwrap();
        assert_eq!(literals, vec!["null".to_string()]);
    }

    #[test]
    fn test_additional_bag_shadows_record() {
        let params = BoundParams::record([("id", Value::Int(1))]).with_additional("id", 99i64);
        let literals = resolve_parameters(&slots(&["id"]), &params).unwrap();
        assert_eq!(literals, vec!["99".to_string()]);
    }

    #[test]
    fn test_output_slots_are_skipped() {
        let slot_list = vec![
            ParamSlot::input("id"),
            ParamSlot::new("cursor", ParamMode::Out),
            ParamSlot::new("version", ParamMode::InOut),
        ];
        let params = BoundParams::record([("id", Value::Int(1)), ("version", Value::Int(2))]);
        let literals = resolve_parameters(&slot_list, &params).unwrap();
        assert_eq!(literals, vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn test_missing_record_property_is_fatal() {
        let params = BoundParams::record([("id", Value::Int(1))]);
        let err = resolve_parameters(&slots(&["name"]), &params).unwrap_err();
        assert!(matches!(err, TraceError::MissingProperty { property } if property == "name"));
    }
}

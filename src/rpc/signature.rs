//! Method signatures and parameter checking.
//!
//! Every method declares one or more accepted parameter lists. A call is
//! checked against them before the method body runs: first the arity, then
//! each positional type.

use serde_json::json;

use crate::error::AppError;
use crate::rpc::value::{DATETIME_TAG, RpcValue};

pub const INCORRECT_PARAMETERS: &str = "Incorrect parameters passed to method";

/// XML-RPC parameter and return types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Int,
    Double,
    Boolean,
    String,
    DateTime,
    Array,
    Struct,
}

impl ParamType {
    pub fn name(self) -> &'static str {
        match self {
            ParamType::Int => "int",
            ParamType::Double => "double",
            ParamType::Boolean => "boolean",
            ParamType::String => "string",
            ParamType::DateTime => DATETIME_TAG,
            ParamType::Array => "array",
            ParamType::Struct => "struct",
        }
    }

    pub fn accepts(self, value: &RpcValue) -> bool {
        matches!(
            (self, value),
            (ParamType::Int, RpcValue::Int(_))
                | (ParamType::Double, RpcValue::Double(_))
                | (ParamType::Boolean, RpcValue::Boolean(_))
                | (ParamType::String, RpcValue::String(_))
                | (ParamType::DateTime, RpcValue::DateTime(_))
                | (ParamType::Array, RpcValue::Array(_))
                | (ParamType::Struct, RpcValue::Struct(_))
        )
    }
}

/// One accepted parameter list and its return type.
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    pub returns: ParamType,
    pub params: &'static [ParamType],
}

/// Fault for a parameter of the wrong type; `index` is zero-based.
pub fn wrong_type(wanted: ParamType, got: &RpcValue, index: usize) -> AppError {
    AppError::invalid_params(
        format!(
            "{INCORRECT_PARAMETERS}: Wanted {}, got {} at param {}",
            wanted.name(),
            got.type_name(),
            index + 1
        ),
        json!({ "param": index + 1, "wanted": wanted.name(), "got": got.type_name() }),
    )
}

/// Joins arities the way a person would list them: `2`, `3 or 2`, `5, 4, 3, or 2`.
fn list_arities(arities: &[usize]) -> String {
    let parts: Vec<String> = arities.iter().map(|a| a.to_string()).collect();
    match parts.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} or {second}"),
        [init @ .., last] => format!("{}, or {last}", init.join(", ")),
    }
}

/// Checks `values` against a method's signatures.
///
/// Signatures are tried in declaration order; the arity list in the fault
/// keeps that order.
///
/// # Errors
///
/// Returns [`AppError::InvalidParams`] when no signature has this arity or a
/// parameter has the wrong type.
pub fn check(signatures: &[Signature], values: &[RpcValue]) -> Result<(), AppError> {
    let Some(signature) = signatures.iter().find(|s| s.params.len() == values.len()) else {
        let mut arities: Vec<usize> = Vec::with_capacity(signatures.len());
        for s in signatures {
            if !arities.contains(&s.params.len()) {
                arities.push(s.params.len());
            }
        }
        return Err(AppError::invalid_params(
            format!(
                "{INCORRECT_PARAMETERS}: Signature permits {} parameters but the request had {}",
                list_arities(&arities),
                values.len()
            ),
            json!({ "permitted": arities, "received": values.len() }),
        ));
    };

    for (index, (wanted, got)) in signature.params.iter().zip(values).enumerate() {
        if !wanted.accepts(got) {
            return Err(wrong_type(*wanted, got, index));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use ParamType::*;

    const REPORT: &[Signature] = &[
        Signature { returns: Array, params: &[String, Int, DateTime, DateTime, Boolean] },
        Signature { returns: Array, params: &[String, Int, DateTime, DateTime] },
        Signature { returns: Array, params: &[String, Int, DateTime] },
        Signature { returns: Array, params: &[String, Int] },
    ];

    fn date() -> RpcValue {
        RpcValue::date(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap())
    }

    #[test]
    fn test_list_arities() {
        assert_eq!(list_arities(&[2]), "2");
        assert_eq!(list_arities(&[3, 2]), "3 or 2");
        assert_eq!(list_arities(&[5, 4, 3, 2]), "5, 4, 3, or 2");
    }

    #[test]
    fn test_wrong_arity_message() {
        let err = check(REPORT, &["session".into()]).unwrap_err();
        assert!(matches!(err, AppError::InvalidParams { .. }));
        assert_eq!(
            err.message(),
            "Incorrect parameters passed to method: Signature permits 5, 4, 3, or 2 parameters but the request had 1"
        );
    }

    #[test]
    fn test_too_many_params() {
        let values = vec![
            "s".into(),
            RpcValue::Int(1),
            date(),
            date(),
            true.into(),
            RpcValue::Int(9),
        ];
        let err = check(REPORT, &values).unwrap_err();
        assert!(err.message().ends_with("but the request had 6"));
    }

    #[test]
    fn test_wrong_type_names_position() {
        let values = vec!["s".into(), RpcValue::Int(1), "not a date".into(), date()];
        let err = check(REPORT, &values).unwrap_err();
        assert_eq!(
            err.message(),
            "Incorrect parameters passed to method: Wanted dateTime.iso8601, got string at param 3"
        );

        let values = vec!["s".into(), RpcValue::Int(1), date(), "not a date".into()];
        let err = check(REPORT, &values).unwrap_err();
        assert!(err.message().ends_with("got string at param 4"));
    }

    #[test]
    fn test_every_arity_accepted() {
        let full = vec!["s".into(), RpcValue::Int(1), date(), date(), false.into()];
        for n in 2..=5 {
            assert!(check(REPORT, &full[..n]).is_ok(), "arity {n}");
        }
    }

    #[test]
    fn test_int_is_not_double() {
        assert!(!Double.accepts(&RpcValue::Int(1)));
        assert!(!Int.accepts(&RpcValue::Double(1.0)));
    }
}

//! Typed access to positional parameters.
//!
//! Accessors are called after [`crate::rpc::signature::check`], so a type
//! mismatch here is rare; it still yields the same fault as the check.

use std::collections::BTreeMap;

use crate::domain::ReportDate;
use crate::error::AppError;
use crate::rpc::signature::{ParamType, wrong_type};
use crate::rpc::value::RpcValue;

#[derive(Debug, Clone, Default)]
pub struct Params {
    values: Vec<RpcValue>,
}

impl Params {
    pub fn new(values: Vec<RpcValue>) -> Self {
        Self { values }
    }

    fn get(&self, index: usize) -> Option<&RpcValue> {
        self.values.get(index)
    }

    pub fn string(&self, index: usize) -> Result<&str, AppError> {
        match self.get(index) {
            Some(RpcValue::String(s)) => Ok(s),
            other => Err(mismatch(ParamType::String, other, index)),
        }
    }

    pub fn int(&self, index: usize) -> Result<i64, AppError> {
        match self.get(index) {
            Some(RpcValue::Int(i)) => Ok(*i),
            other => Err(mismatch(ParamType::Int, other, index)),
        }
    }

    pub fn structure(&self, index: usize) -> Result<&BTreeMap<String, RpcValue>, AppError> {
        match self.get(index) {
            Some(RpcValue::Struct(fields)) => Ok(fields),
            other => Err(mismatch(ParamType::Struct, other, index)),
        }
    }

    /// Boolean at `index`, or `None` when the call stopped before it.
    pub fn optional_bool(&self, index: usize) -> Result<Option<bool>, AppError> {
        match self.get(index) {
            None => Ok(None),
            Some(RpcValue::Boolean(b)) => Ok(Some(*b)),
            other => Err(mismatch(ParamType::Boolean, other, index)),
        }
    }

    /// Report date at `index`, or `None` when the call stopped before it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the year is outside the
    /// reportable range.
    pub fn optional_report_date(&self, index: usize) -> Result<Option<ReportDate>, AppError> {
        match self.get(index) {
            None => Ok(None),
            Some(RpcValue::DateTime(dt)) => ReportDate::from_datetime(*dt).map(Some),
            other => Err(mismatch(ParamType::DateTime, other, index)),
        }
    }
}

fn mismatch(wanted: ParamType, got: Option<&RpcValue>, index: usize) -> AppError {
    wrong_type(wanted, got.unwrap_or(&RpcValue::Nil), index)
}

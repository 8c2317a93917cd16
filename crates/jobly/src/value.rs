//! Scalar values bound as query parameters.
//!
//! [`Value`] is the tagged scalar that crosses the binding boundary. Model code
//! and the SQL builders only ever hand `Value`s to the database as bound
//! parameters, never as SQL text.

use crate::error::{JoblyError, JoblyResult};
use bytes::BytesMut;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::error::Error;
use tokio_postgres::types::{IsNull, ToSql, Type};

/// A scalar query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Exact decimal, used for `NUMERIC` columns.
    Decimal(Decimal),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Decimal(_) => "decimal",
            Self::Text(_) => "text",
        }
    }

    /// Convert a JSON scalar into a `Value`.
    ///
    /// Arrays and objects are rejected instead of being stringified.
    pub fn from_json(json: serde_json::Value) -> JoblyResult<Self> {
        match json {
            serde_json::Value::Null => Ok(Self::Null),
            serde_json::Value::Bool(b) => Ok(Self::Bool(b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Self::Float(f))
                } else {
                    Err(JoblyError::invalid_input(format!("unsupported number: {n}")))
                }
            }
            serde_json::Value::String(s) => Ok(Self::Text(s)),
            serde_json::Value::Array(_) => Err(JoblyError::invalid_input(
                "arrays cannot be bound as scalar values",
            )),
            serde_json::Value::Object(_) => Err(JoblyError::invalid_input(
                "objects cannot be bound as scalar values",
            )),
        }
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = JoblyError;

    fn try_from(json: serde_json::Value) -> JoblyResult<Self> {
        Self::from_json(json)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Self::Int(v.into())
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

fn is_text(ty: &Type) -> bool {
    matches!(
        *ty,
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN
    )
}

fn mismatch(value: &Value, ty: &Type) -> Box<dyn Error + Sync + Send> {
    format!("cannot bind {} value to column of type {}", value.kind(), ty).into()
}

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            Self::Null => Ok(IsNull::Yes),
            Self::Bool(b) if *ty == Type::BOOL => b.to_sql(ty, out),
            Self::Int(n) => match *ty {
                Type::INT2 => i16::try_from(*n)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*n)?.to_sql(ty, out),
                Type::INT8 => n.to_sql(ty, out),
                Type::FLOAT4 => (*n as f32).to_sql(ty, out),
                Type::FLOAT8 => (*n as f64).to_sql(ty, out),
                Type::NUMERIC => Decimal::from(*n).to_sql(ty, out),
                _ => Err(mismatch(self, ty)),
            },
            Self::Float(f) => match *ty {
                Type::FLOAT4 => (*f as f32).to_sql(ty, out),
                Type::FLOAT8 => f.to_sql(ty, out),
                Type::NUMERIC => Decimal::from_f64(*f)
                    .ok_or_else(|| format!("cannot represent {f} as numeric"))?
                    .to_sql(ty, out),
                _ => Err(mismatch(self, ty)),
            },
            Self::Decimal(d) if *ty == Type::NUMERIC => d.to_sql(ty, out),
            Self::Text(s) if is_text(ty) => s.to_sql(ty, out),
            _ => Err(mismatch(self, ty)),
        }
    }

    fn accepts(ty: &Type) -> bool {
        matches!(
            *ty,
            Type::BOOL
                | Type::INT2
                | Type::INT4
                | Type::INT8
                | Type::FLOAT4
                | Type::FLOAT8
                | Type::NUMERIC
        ) || is_text(ty)
    }

    tokio_postgres::types::to_sql_checked!();
}

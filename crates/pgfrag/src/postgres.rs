//! tokio-postgres hand-off: `ToSql` for [`Value`] and borrowed parameter lists.
//!
//! ```ignore
//! let q = sql!("SELECT * FROM users " {where_clause(None, &filter)?});
//! let rows = client.query(q.text(), &q.params_ref()).await?;
//! ```

use std::error::Error;

use bytes::BytesMut;
use tokio_postgres::types::{Format, IsNull, Kind, ToSql, Type};

use crate::fragment::Query;
use crate::value::Value;

type EncodeResult = Result<IsNull, Box<dyn Error + Sync + Send>>;

impl Query {
    /// Bound values as the parameter slice tokio-postgres expects.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.values()
            .iter()
            .map(|v| v as &(dyn ToSql + Sync))
            .collect()
    }
}

fn is_json(ty: &Type) -> bool {
    matches!(*ty, Type::JSON | Type::JSONB)
}

fn is_text(ty: &Type) -> bool {
    matches!(
        *ty,
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN
    )
}

fn is_array(ty: &Type) -> bool {
    matches!(ty.kind(), Kind::Array(_))
}

fn is_numeric_binary(ty: &Type) -> bool {
    matches!(
        *ty,
        Type::INT2 | Type::INT4 | Type::INT8 | Type::OID | Type::FLOAT4 | Type::FLOAT8
    )
}

fn unsupported(value: &Value, ty: &Type) -> Box<dyn Error + Sync + Send> {
    format!("cannot encode {value} as {ty}").into()
}

fn lossy(value: &Value, ty: &Type) -> Box<dyn Error + Sync + Send> {
    format!("cannot encode {value} as {ty} without losing precision").into()
}

/// Scalars meeting a type with no binary encoder here (uuid, date,
/// timestamptz, numeric, ...) are sent in text form for the server to parse.
fn encodes_as_text(value: &Value, ty: &Type) -> bool {
    if is_json(ty) || is_array(ty) {
        return false;
    }
    match value {
        Value::Text(_) => !<&str as ToSql>::accepts(ty),
        Value::Int(_) => !is_numeric_binary(ty) && !is_text(ty),
        Value::Float(_) => !matches!(*ty, Type::FLOAT4 | Type::FLOAT8) && !is_text(ty),
        _ => false,
    }
}

fn float_text(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_owned()
    } else if f == f64::INFINITY {
        "Infinity".to_owned()
    } else if f == f64::NEG_INFINITY {
        "-Infinity".to_owned()
    } else {
        f.to_string()
    }
}

fn encode_text_form(value: &Value, out: &mut BytesMut) -> EncodeResult {
    match value {
        Value::Text(s) => out.extend_from_slice(s.as_bytes()),
        Value::Int(n) => out.extend_from_slice(n.to_string().as_bytes()),
        Value::Float(f) => out.extend_from_slice(float_text(*f).as_bytes()),
        other => return Err(format!("{other} has no text form").into()),
    }
    Ok(IsNull::No)
}

fn encode_int(n: i64, ty: &Type, out: &mut BytesMut) -> EncodeResult {
    match *ty {
        Type::INT2 => i16::try_from(n)?.to_sql(ty, out),
        Type::INT4 => i32::try_from(n)?.to_sql(ty, out),
        Type::INT8 => n.to_sql(ty, out),
        Type::OID => u32::try_from(n)?.to_sql(ty, out),
        Type::FLOAT4 if (n as f32) as i128 == i128::from(n) => (n as f32).to_sql(ty, out),
        Type::FLOAT8 if (n as f64) as i128 == i128::from(n) => (n as f64).to_sql(ty, out),
        Type::FLOAT4 | Type::FLOAT8 => Err(lossy(&Value::Int(n), ty)),
        _ if is_text(ty) => n.to_string().to_sql(ty, out),
        _ if is_json(ty) => serde_json::Value::from(n).to_sql(ty, out),
        _ => Err(unsupported(&Value::Int(n), ty)),
    }
}

fn encode_float(f: f64, ty: &Type, out: &mut BytesMut) -> EncodeResult {
    match *ty {
        Type::FLOAT4 if f.is_finite() && f64::from(f as f32) != f => {
            Err(lossy(&Value::Float(f), ty))
        }
        Type::FLOAT4 => (f as f32).to_sql(ty, out),
        Type::FLOAT8 => f.to_sql(ty, out),
        _ if is_text(ty) => f.to_string().to_sql(ty, out),
        _ if is_json(ty) => Value::Float(f).to_json().to_sql(ty, out),
        _ => Err(unsupported(&Value::Float(f), ty)),
    }
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> EncodeResult {
        match self {
            Value::Undefined | Value::Null => Ok(IsNull::Yes),
            other if encodes_as_text(other, ty) => encode_text_form(other, out),
            Value::Bool(b) if *ty == Type::BOOL => b.to_sql(ty, out),
            Value::Int(n) => encode_int(*n, ty, out),
            Value::Float(f) => encode_float(*f, ty, out),
            Value::Text(s) if <&str as ToSql>::accepts(ty) => s.as_str().to_sql(ty, out),
            Value::List(items) if is_array(ty) => items.to_sql(ty, out),
            other if is_json(ty) => other.to_json().to_sql(ty, out),
            other => Err(unsupported(other, ty)),
        }
    }

    // The server-side type decides the encoding; mismatches surface from `to_sql`.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    fn encode_format(&self, ty: &Type) -> Format {
        if encodes_as_text(self, ty) {
            Format::Text
        } else {
            Format::Binary
        }
    }

    tokio_postgres::types::to_sql_checked!();
}

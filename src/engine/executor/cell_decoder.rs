//! Maps Postgres column types onto result values.
use super::PgNumeric;
use crate::engine::objects::{ResultRow, ResultValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::error::Error;
use tokio_postgres::types::{FromSql, Type};
use tokio_postgres::Row;
use uuid::Uuid;

/// Catch-all for types without a dedicated decoder, keeps whatever text the bytes hold.
struct RawText(String);

impl<'a> FromSql<'a> for RawText {
    fn from_sql(ty: &Type, raw: &'a [u8]) -> Result<Self, Box<dyn Error + Sync + Send>> {
        //jsonb is prefixed with a format version byte
        let raw = match raw.split_first() {
            Some((&1, body)) if *ty == Type::JSONB => body,
            _ => raw,
        };
        Ok(RawText(String::from_utf8_lossy(raw).into_owned()))
    }

    fn accepts(_: &Type) -> bool {
        true
    }
}

fn decode_cell(row: &Row, idx: usize, ty: &Type) -> Result<Option<ResultValue>, tokio_postgres::Error> {
    let value = match *ty {
        Type::BOOL => row.try_get::<_, Option<bool>>(idx)?.map(ResultValue::Bool),
        Type::INT2 => row
            .try_get::<_, Option<i16>>(idx)?
            .map(|v| ResultValue::Integer(v.into())),
        Type::INT4 => row
            .try_get::<_, Option<i32>>(idx)?
            .map(|v| ResultValue::Integer(v.into())),
        Type::INT8 => row.try_get::<_, Option<i64>>(idx)?.map(ResultValue::Integer),
        Type::OID => row
            .try_get::<_, Option<u32>>(idx)?
            .map(|v| ResultValue::Integer(v.into())),
        Type::FLOAT4 => row
            .try_get::<_, Option<f32>>(idx)?
            .map(|v| ResultValue::Float(v.into())),
        Type::FLOAT8 => row.try_get::<_, Option<f64>>(idx)?.map(ResultValue::Float),
        Type::NUMERIC => row
            .try_get::<_, Option<PgNumeric>>(idx)?
            .map(|v| ResultValue::Numeric(v.to_string())),
        Type::UUID => row.try_get::<_, Option<Uuid>>(idx)?.map(ResultValue::Uuid),
        Type::DATE => row.try_get::<_, Option<NaiveDate>>(idx)?.map(ResultValue::Date),
        Type::TIMESTAMP => row
            .try_get::<_, Option<NaiveDateTime>>(idx)?
            .map(ResultValue::Timestamp),
        Type::TIMESTAMPTZ => row
            .try_get::<_, Option<DateTime<Utc>>>(idx)?
            .map(ResultValue::TimestampTz),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN => {
            row.try_get::<_, Option<String>>(idx)?.map(ResultValue::Text)
        }
        _ => row
            .try_get::<_, Option<RawText>>(idx)?
            .map(|v| ResultValue::Text(v.0)),
    };

    Ok(value)
}

pub(super) fn decode_row(row: &Row) -> Result<ResultRow, tokio_postgres::Error> {
    let mut cells = Vec::with_capacity(row.len());
    for (idx, column) in row.columns().iter().enumerate() {
        cells.push(decode_cell(row, idx, column.type_())?);
    }
    Ok(ResultRow(cells))
}

//! Decoder for the binary NUMERIC wire format, kept as exact decimal text.
//!
//! Layout, all big endian: ndigits u16, weight i16, sign u16, dscale u16, then ndigits
//! base 10000 digits. Digit `i` is worth 10000^(weight - i).
use bytes::Buf;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::mem::size_of;
use thiserror::Error;
use tokio_postgres::types::{FromSql, Type};

const NUMERIC_POS: u16 = 0x0000;
const NUMERIC_NEG: u16 = 0x4000;
const NUMERIC_NAN: u16 = 0xC000;
const NUMERIC_PINF: u16 = 0xD000;
const NUMERIC_NINF: u16 = 0xF000;

const NUMERIC_HEADER: usize = 4 * size_of::<u16>();
const NBASE: u16 = 10000;

#[derive(Clone, Debug, PartialEq)]
pub struct PgNumeric(String);

impl PgNumeric {
    pub fn parse(mut buffer: impl Buf) -> Result<PgNumeric, PgNumericError> {
        if buffer.remaining() < NUMERIC_HEADER {
            return Err(PgNumericError::InsufficientBuffer(
                NUMERIC_HEADER,
                buffer.remaining(),
            ));
        }

        let ndigits = usize::from(buffer.get_u16());
        let weight = buffer.get_i16();
        let sign = buffer.get_u16();
        let dscale = usize::from(buffer.get_u16());

        match sign {
            NUMERIC_NAN => return Ok(PgNumeric("NaN".to_string())),
            NUMERIC_PINF => return Ok(PgNumeric("Infinity".to_string())),
            NUMERIC_NINF => return Ok(PgNumeric("-Infinity".to_string())),
            NUMERIC_POS | NUMERIC_NEG => {}
            other => return Err(PgNumericError::InvalidSign(other)),
        }

        let needed = ndigits * size_of::<u16>();
        if buffer.remaining() < needed {
            return Err(PgNumericError::InsufficientBuffer(needed, buffer.remaining()));
        }

        let mut digits = Vec::with_capacity(ndigits);
        for _ in 0..ndigits {
            let digit = buffer.get_u16();
            if digit >= NBASE {
                return Err(PgNumericError::InvalidDigit(digit));
            }
            digits.push(digit);
        }

        let digit_at = |index: i32| -> u16 {
            usize::try_from(index)
                .ok()
                .and_then(|i| digits.get(i).copied())
                .unwrap_or(0)
        };

        let mut text = String::new();
        if sign == NUMERIC_NEG {
            text.push('-');
        }

        if weight < 0 {
            text.push('0');
        } else {
            for w in 0..=i32::from(weight) {
                if w == 0 {
                    text.push_str(&digit_at(w).to_string());
                } else {
                    text.push_str(&format!("{:04}", digit_at(w)));
                }
            }
        }

        if dscale > 0 {
            let groups = (dscale + 3) / 4;
            let mut fraction = String::with_capacity(groups * 4);
            for k in 1..=groups {
                let index = i32::from(weight) + i32::try_from(k).unwrap_or(i32::MAX);
                fraction.push_str(&format!("{:04}", digit_at(index)));
            }
            fraction.truncate(dscale);
            text.push('.');
            text.push_str(&fraction);
        }

        Ok(PgNumeric(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PgNumeric {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'a> FromSql<'a> for PgNumeric {
    fn from_sql(_: &Type, raw: &'a [u8]) -> Result<Self, Box<dyn Error + Sync + Send>> {
        Ok(PgNumeric::parse(raw)?)
    }

    fn accepts(ty: &Type) -> bool {
        *ty == Type::NUMERIC
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PgNumericError {
    #[error("Need {0} bytes to decode a numeric, only have {1}")]
    InsufficientBuffer(usize, usize),
    #[error("Unknown numeric sign {0:#06x}")]
    InvalidSign(u16),
    #[error("Numeric digit {0} is outside base 10000")]
    InvalidDigit(u16),
}

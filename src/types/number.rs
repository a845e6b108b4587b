//! Operando validado.
//!
//! Toda entrada passa por [`Number::parse`] ou [`Number::from_f64`] antes
//! de chegar aos predicados. NaN, infinitos e valores fora do intervalo de
//! `i64` são rejeitados aqui.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::Serialize;

use crate::types::errors::{NumflagsError, NumflagsResult};

/// Número sob teste.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    /// Valor inteiro.
    Integer(i64),
    /// Valor finito com parte fracionária não nula.
    Decimal(f64),
}

impl Number {
    /// Interpreta uma string como número.
    ///
    /// Tenta primeiro como inteiro, depois como ponto flutuante.
    pub fn parse(raw: &str) -> NumflagsResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(NumflagsError::invalid_input(raw, "entrada vazia"));
        }

        if let Ok(n) = trimmed.parse::<i64>() {
            return Ok(Number::Integer(n));
        }

        // Only digits but i64 refused it: it overflowed.
        let unsigned = trimmed.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(trimmed);
        if !unsigned.is_empty() && unsigned.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NumflagsError::invalid_input(
                raw,
                "fora do intervalo suportado (i64)",
            ));
        }

        match trimmed.parse::<f64>() {
            Ok(x) => Self::from_f64(x).map_err(|e| match e {
                NumflagsError::InvalidInput { reason, .. } => {
                    NumflagsError::invalid_input(raw, reason)
                }
                other => other,
            }),
            Err(_) => Err(NumflagsError::invalid_input(raw, "não é um número")),
        }
    }

    /// Converte um ponto flutuante.
    ///
    /// Valores sem parte fracionária viram [`Number::Integer`].
    pub fn from_f64(x: f64) -> NumflagsResult<Self> {
        if !x.is_finite() {
            return Err(NumflagsError::invalid_input(
                x.to_string(),
                "valor não finito",
            ));
        }

        if x.fract() != 0.0 {
            return Ok(Number::Decimal(x));
        }

        // i64::MAX as f64 rounds up to 2^63, which is already out of range.
        if x >= i64::MIN as f64 && x < i64::MAX as f64 {
            Ok(Number::Integer(x as i64))
        } else {
            Err(NumflagsError::invalid_input(
                x.to_string(),
                "fora do intervalo suportado (i64)",
            ))
        }
    }

    /// Retorna o valor inteiro, se houver.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Number::Integer(n) => Some(*n),
            Number::Decimal(_) => None,
        }
    }

    /// Verifica se o valor tem parte fracionária.
    pub fn is_decimal(&self) -> bool {
        matches!(self, Number::Decimal(_))
    }

    /// Verifica se o valor é negativo.
    pub fn is_negative(&self) -> bool {
        match self {
            Number::Integer(n) => *n < 0,
            Number::Decimal(x) => *x < 0.0,
        }
    }

    /// Dígitos decimais de `|n|`, sem sinal.
    ///
    /// Retorna `None` para valores decimais.
    pub fn digits(&self) -> Option<Vec<u8>> {
        self.as_integer().map(|n| {
            n.unsigned_abs()
                .to_string()
                .bytes()
                .map(|b| b - b'0')
                .collect()
        })
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Number::Integer(n) => {
                0u8.hash(state);
                n.hash(state);
            }
            Number::Decimal(x) => {
                1u8.hash(state);
                x.to_bits().hash(state);
            }
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            Number::Decimal(x) => write!(f, "{}", x),
        }
    }
}

impl FromStr for Number {
    type Err = NumflagsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Number::parse(s)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Integer(n)
    }
}

//! Predicados embutidos.
//!
//! Exceto `decimal` e `negative`, todos são propriedades de inteiros e
//! retornam `false` para valores decimais.

use crate::types::errors::NumflagsResult;
use crate::types::number::Number;

use super::digits;
use super::Probe;

pub(super) fn decimal(probe: &mut dyn Probe) -> NumflagsResult<bool> {
    Ok(probe.number().is_decimal())
}

pub(super) fn pair(probe: &mut dyn Probe) -> NumflagsResult<bool> {
    Ok(probe.number().as_integer() == Some(2))
}

pub(super) fn dozen(probe: &mut dyn Probe) -> NumflagsResult<bool> {
    Ok(probe.number().as_integer() == Some(12))
}

pub(super) fn stack(probe: &mut dyn Probe) -> NumflagsResult<bool> {
    Ok(probe.number().as_integer() == Some(64))
}

pub(super) fn sequential(probe: &mut dyn Probe) -> NumflagsResult<bool> {
    Ok(probe
        .number()
        .digits()
        .is_some_and(|d| digits::has_constant_step(&d)))
}

pub(super) fn repetitive(probe: &mut dyn Probe) -> NumflagsResult<bool> {
    Ok(probe
        .number()
        .digits()
        .is_some_and(|d| digits::has_repeating_unit(&d)))
}

/// Para `n > 1`, composto é o complemento de primo.
pub(super) fn composite(probe: &mut dyn Probe) -> NumflagsResult<bool> {
    match *probe.number() {
        Number::Integer(n) if n > 1 => Ok(!probe.require("prime")?),
        _ => Ok(false),
    }
}

pub(super) fn prime(probe: &mut dyn Probe) -> NumflagsResult<bool> {
    match *probe.number() {
        Number::Integer(n) if n > 1 => Ok(digits::is_prime(n.unsigned_abs())),
        _ => Ok(false),
    }
}

pub(super) fn even(probe: &mut dyn Probe) -> NumflagsResult<bool> {
    Ok(probe.number().as_integer().is_some_and(|n| n % 2 == 0))
}

pub(super) fn odd(probe: &mut dyn Probe) -> NumflagsResult<bool> {
    if probe.number().is_decimal() {
        return Ok(false);
    }
    Ok(!probe.require("even")?)
}

/// O sinal fica de fora: `-121` é palíndromo.
pub(super) fn palindromic(probe: &mut dyn Probe) -> NumflagsResult<bool> {
    Ok(probe
        .number()
        .digits()
        .is_some_and(|d| digits::is_mirrored(&d)))
}

pub(super) fn negative(probe: &mut dyn Probe) -> NumflagsResult<bool> {
    Ok(probe.number().is_negative())
}

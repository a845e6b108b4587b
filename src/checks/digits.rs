//! Algoritmos sobre inteiros e sequências de dígitos.
//!
//! Funções puras, sem conhecimento de sessão ou cache. Os dígitos chegam
//! já sem sinal (ver [`crate::types::number::Number::digits`]).

/// Teste de primalidade por divisão com roda 6k±1 até `⌊sqrt(n)⌋`.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    let mut i: u64 = 5;
    // i <= n / i instead of i * i <= n: no overflow near u64::MAX
    while i <= n / i {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Diferença constante entre dígitos consecutivos (mínimo de 3 dígitos).
pub fn has_constant_step(digits: &[u8]) -> bool {
    if digits.len() < 3 {
        return false;
    }

    let step = |pair: &[u8]| i16::from(pair[1]) - i16::from(pair[0]);
    let first = step(&digits[..2]);
    digits.windows(2).skip(1).all(|pair| step(pair) == first)
}

/// Existe uma unidade de tamanho `1..=len/2` que, repetida, cobre os dígitos.
///
/// Só valem unidades cujo tamanho divide o total: `12121` não é coberto
/// por `12`.
pub fn has_repeating_unit(digits: &[u8]) -> bool {
    (1..=digits.len() / 2).any(|unit_len| {
        if digits.len() % unit_len != 0 {
            return false;
        }
        let unit = &digits[..unit_len];
        unit.iter()
            .cycle()
            .take(digits.len())
            .eq(digits.iter())
    })
}

/// Os dígitos são iguais ao seu reverso.
pub fn is_mirrored(digits: &[u8]) -> bool {
    digits.iter().eq(digits.iter().rev())
}

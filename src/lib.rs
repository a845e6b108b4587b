//! # numflags
//!
//! Classifica um número contra um conjunto fixo de predicados numéricos
//! (primo, composto, palíndromo, dígitos sequenciais ou repetitivos,
//! paridade, sinal, constantes 2/12/64, decimal) e informa quais valem.
//!
//! ## Módulos
//!
//! - [`checks`] - Registro estático de predicados
//! - [`classify`] - Motor de avaliação, sessão com cache e agregador
//! - [`cli`] - Interface de linha de comando
//! - [`types`] - Tipos compartilhados

pub mod checks;
pub mod classify;
#[cfg(feature = "cli")]
pub mod cli;
pub mod types;

pub use classify::PredicateEngine;
pub use types::config::Config;
pub use types::errors::{NumflagsError, NumflagsResult};
pub use types::number::Number;
pub use types::requests::{EvaluateOptions, NumberInput, OutputFormat};
pub use types::responses::Report;

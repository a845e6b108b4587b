//! Motor de classificação do numflags.
//!
//! Este módulo aplica o registro de predicados a um único valor:
//! cada chamada abre uma sessão com cache próprio, executa os
//! predicados isoladamente e agrega os verdadeiros em um relatório.
//!
//! ## Exemplo
//!
//! ```rust
//! use numflags::classify::PredicateEngine;
//! use numflags::types::requests::EvaluateOptions;
//!
//! let engine = PredicateEngine::default();
//! let report = engine.evaluate(1234, &EvaluateOptions::prose()).unwrap();
//! assert_eq!(
//!     report.as_prose(),
//!     Some("1234 is a sequential, composite and even number")
//! );
//! ```

mod aggregator;
mod engine;
mod session;

pub use aggregator::{Evaluation, FlagAggregator};
pub use engine::PredicateEngine;
pub use session::{CacheKey, CacheStats, EvaluationSession};

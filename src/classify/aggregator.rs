//! Agregador de resultados do numflags.
//!
//! Responsável por:
//! - Separar os predicados verdadeiros (na ordem do registro)
//! - Montar a frase do modo prosa
//! - Montar o registro do modo estruturado

use crate::types::errors::{NumflagsError, NumflagsResult};
use crate::types::number::Number;
use crate::types::responses::{PredicateResults, SkippedPredicate, StructuredReport};

/// Resultado bruto de uma avaliação, antes da formatação.
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    /// Resultados dos predicados que rodaram com sucesso.
    pub results: PredicateResults,

    /// Predicados omitidos por falha.
    pub skipped: Vec<SkippedPredicate>,
}

/// Agregador de resultados.
pub struct FlagAggregator;

impl FlagAggregator {
    /// Nomes dos predicados verdadeiros, preservando a ordem do registro.
    pub fn true_flags(evaluation: &Evaluation) -> Vec<&'static str> {
        evaluation.results.true_names()
    }

    /// Monta a frase `"<valor> is a <a>, <b> and <c> number"`.
    ///
    /// Nenhum predicado verdadeiro é tratado como erro, nunca como frase vazia.
    pub fn sentence(value: &Number, names: &[&str]) -> NumflagsResult<String> {
        if names.is_empty() {
            return Err(NumflagsError::EmptyResult(value.to_string()));
        }

        Ok(format!("{} is a {} number", value, Self::join_names(names)))
    }

    /// Junta nomes com vírgulas e "and" antes do último.
    pub fn join_names(names: &[&str]) -> String {
        match names {
            [] => String::new(),
            [only] => only.to_string(),
            [init @ .., last] => format!("{} and {}", init.join(", "), last),
        }
    }

    /// Monta o registro estruturado.
    pub fn structured(value: Number, evaluation: Evaluation, session_id: &str) -> StructuredReport {
        StructuredReport {
            value,
            flags: evaluation.results,
            skipped: evaluation.skipped,
            session_id: session_id.to_string(),
            evaluated_at: chrono::Utc::now(),
        }
    }
}

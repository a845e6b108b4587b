//! Tipos de resposta do numflags.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::types::errors::NumflagsResult;
use crate::types::number::Number;

/// Resultados por predicado, na ordem do registro.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredicateResults {
    entries: Vec<(&'static str, bool)>,
}

impl PredicateResults {
    /// Cria um conjunto vazio.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra o resultado de um predicado.
    pub fn push(&mut self, name: &'static str, value: bool) {
        self.entries.push((name, value));
    }

    /// Resultado de um predicado, se foi avaliado.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    /// Nomes dos predicados verdadeiros, na ordem do registro.
    pub fn true_names(&self) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|(_, v)| *v)
            .map(|(n, _)| *n)
            .collect()
    }

    /// Itera sobre `(nome, resultado)`.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        self.entries.iter().copied()
    }

    /// Número de predicados avaliados.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Verifica se nenhum predicado foi avaliado.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for PredicateResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Predicado omitido por falha.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPredicate {
    /// Nome do predicado.
    pub predicate: String,

    /// Motivo da falha.
    pub reason: String,
}

impl SkippedPredicate {
    /// Cria um novo registro de falha.
    pub fn new(predicate: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            predicate: predicate.into(),
            reason: reason.into(),
        }
    }
}

/// Registro estruturado de uma avaliação.
#[derive(Debug, Clone, Serialize)]
pub struct StructuredReport {
    /// Valor avaliado.
    pub value: Number,

    /// Resultado de cada predicado avaliado.
    pub flags: PredicateResults,

    /// Predicados que falharam.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedPredicate>,

    /// ID da sessão de avaliação.
    pub session_id: String,

    /// Timestamp da avaliação.
    pub evaluated_at: chrono::DateTime<chrono::Utc>,
}

impl StructuredReport {
    /// Serializa como JSON indentado.
    pub fn to_json_pretty(&self) -> NumflagsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Relatório final de uma avaliação.
#[derive(Debug, Clone)]
pub enum Report {
    /// Frase com os predicados verdadeiros.
    Prose(String),
    /// Mapa completo de predicados.
    Structured(StructuredReport),
}

impl Report {
    /// Retorna a frase, se o relatório for em prosa.
    pub fn as_prose(&self) -> Option<&str> {
        match self {
            Report::Prose(sentence) => Some(sentence),
            Report::Structured(_) => None,
        }
    }

    /// Retorna o registro, se o relatório for estruturado.
    pub fn as_structured(&self) -> Option<&StructuredReport> {
        match self {
            Report::Prose(_) => None,
            Report::Structured(report) => Some(report),
        }
    }

    /// Texto a ser impresso pela CLI.
    pub fn render(&self) -> NumflagsResult<String> {
        match self {
            Report::Prose(sentence) => Ok(sentence.clone()),
            Report::Structured(report) => report.to_json_pretty(),
        }
    }
}

//! Tipos de requisição do numflags.

use serde::{Deserialize, Serialize};

use crate::types::errors::NumflagsResult;
use crate::types::number::Number;

/// Entrada bruta de uma avaliação.
///
/// Aceita texto (como vindo da linha de comando) ou valores numéricos já
/// tipados. A validação acontece em [`NumberInput::coerce`].
#[derive(Debug, Clone, PartialEq)]
pub enum NumberInput {
    /// Texto a ser interpretado.
    Text(String),
    /// Inteiro já tipado.
    Integer(i64),
    /// Ponto flutuante já tipado.
    Float(f64),
}

impl NumberInput {
    /// Valida a entrada e produz o operando.
    pub fn coerce(&self) -> NumflagsResult<Number> {
        match self {
            NumberInput::Text(raw) => Number::parse(raw),
            NumberInput::Integer(n) => Ok(Number::Integer(*n)),
            NumberInput::Float(x) => Number::from_f64(*x),
        }
    }
}

impl std::fmt::Display for NumberInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberInput::Text(raw) => write!(f, "{}", raw),
            NumberInput::Integer(n) => write!(f, "{}", n),
            NumberInput::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<&str> for NumberInput {
    fn from(raw: &str) -> Self {
        NumberInput::Text(raw.to_string())
    }
}

impl From<String> for NumberInput {
    fn from(raw: String) -> Self {
        NumberInput::Text(raw)
    }
}

impl From<i64> for NumberInput {
    fn from(n: i64) -> Self {
        NumberInput::Integer(n)
    }
}

impl From<i32> for NumberInput {
    fn from(n: i32) -> Self {
        NumberInput::Integer(i64::from(n))
    }
}

impl From<f64> for NumberInput {
    fn from(x: f64) -> Self {
        NumberInput::Float(x)
    }
}

/// Formato do relatório.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Frase legível.
    #[default]
    Prose,
    /// Mapa completo predicado → bool.
    Structured,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Prose => write!(f, "prose"),
            OutputFormat::Structured => write!(f, "structured"),
        }
    }
}

/// Opções de uma avaliação.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluateOptions {
    /// Formato do relatório.
    pub format: OutputFormat,

    /// Emite diagnósticos para falhas de predicado e entradas inválidas.
    pub report_errors: bool,

    /// Restringe a avaliação a estes predicados (`None` = todos).
    pub only: Option<Vec<String>>,
}

impl EvaluateOptions {
    /// Cria opções padrão (prosa, sem diagnósticos).
    pub fn new() -> Self {
        Self::default()
    }

    /// Atalho para o modo estruturado.
    pub fn structured() -> Self {
        Self::new().with_format(OutputFormat::Structured)
    }

    /// Atalho para o modo prosa.
    pub fn prose() -> Self {
        Self::new().with_format(OutputFormat::Prose)
    }

    /// Define o formato.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Liga ou desliga diagnósticos.
    pub fn with_report_errors(mut self, report_errors: bool) -> Self {
        self.report_errors = report_errors;
        self
    }

    /// Restringe a avaliação a um subconjunto de predicados.
    pub fn with_only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_variants() {
        assert_eq!(
            NumberInput::from("64").coerce().unwrap(),
            Number::Integer(64)
        );
        assert_eq!(NumberInput::from(7).coerce().unwrap(), Number::Integer(7));
        assert_eq!(
            NumberInput::from(2.5).coerce().unwrap(),
            Number::Decimal(2.5)
        );
        assert_eq!(
            NumberInput::from(12.0).coerce().unwrap(),
            Number::Integer(12)
        );
        assert!(NumberInput::from(f64::NAN).coerce().is_err());
    }

    #[test]
    fn test_options_builder() {
        let options = EvaluateOptions::structured()
            .with_report_errors(true)
            .with_only(["prime", "even"]);

        assert_eq!(options.format, OutputFormat::Structured);
        assert!(options.report_errors);
        assert_eq!(
            options.only,
            Some(vec!["prime".to_string(), "even".to_string()])
        );
        assert_eq!(EvaluateOptions::new().format, OutputFormat::Prose);
    }

    #[test]
    fn test_output_format_serde() {
        let json = serde_json::to_string(&OutputFormat::Structured).unwrap();
        assert_eq!(json, "\"structured\"");
    }
}

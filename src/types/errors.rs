//! Tipos de erro do numflags.

use thiserror::Error;

/// Tipo de resultado padrão do numflags.
pub type NumflagsResult<T> = Result<T, NumflagsError>;

/// Erros possíveis no numflags.
#[derive(Error, Debug)]
pub enum NumflagsError {
    #[error("Entrada inválida '{input}': {reason}")]
    InvalidInput { input: String, reason: String },

    #[error("Predicado desconhecido: '{0}'")]
    UnknownPredicate(String),

    #[error("Predicado duplicado no registro: '{0}'")]
    DuplicatePredicate(String),

    #[error("Predicado '{predicate}' falhou: {reason}")]
    PredicateFailure { predicate: String, reason: String },

    #[error("Nenhum predicado verdadeiro para {0} (todo inteiro é par ou ímpar)")]
    EmptyResult(String),

    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro ao parsear TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Erro ao serializar TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl NumflagsError {
    /// Cria um erro de entrada inválida.
    pub fn invalid_input<I: Into<String>, R: Into<String>>(input: I, reason: R) -> Self {
        Self::InvalidInput {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Cria uma falha de predicado.
    pub fn predicate_failure<P: Into<String>, R: Into<String>>(predicate: P, reason: R) -> Self {
        Self::PredicateFailure {
            predicate: predicate.into(),
            reason: reason.into(),
        }
    }

    /// Cria um erro de configuração.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Indica se o erro foi causado pelo que o chamador forneceu.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::UnknownPredicate(_)
        )
    }

    /// Código de saída sugerido para a CLI.
    pub fn exit_code(&self) -> u8 {
        if self.is_usage_error() {
            2
        } else {
            1
        }
    }
}

//! Motor de predicados do numflags.
//!
//! Valida a entrada, abre uma sessão, roda os predicados selecionados
//! isolando falhas e formata o relatório.

use tracing::{debug, warn};

use crate::checks::{Predicate, PredicateRegistry};
use crate::types::config::{CacheConfig, Config};
use crate::types::errors::{NumflagsError, NumflagsResult};
use crate::types::number::Number;
use crate::types::requests::{EvaluateOptions, NumberInput, OutputFormat};
use crate::types::responses::{Report, SkippedPredicate};

use super::aggregator::{Evaluation, FlagAggregator};
use super::session::EvaluationSession;

/// Motor de predicados.
///
/// Responsável por:
/// - Validar e converter a entrada
/// - Selecionar predicados (opções da chamada + configuração)
/// - Executar cada predicado isoladamente dentro de uma sessão
/// - Produzir o relatório em prosa ou estruturado
///
/// Não guarda estado entre chamadas: o cache vive na sessão.
#[derive(Debug, Clone)]
pub struct PredicateEngine<'r> {
    registry: &'r PredicateRegistry,
    cache: CacheConfig,
    disabled: Vec<String>,
}

impl PredicateEngine<'static> {
    /// Cria um motor com o registro embutido.
    pub fn new(config: &Config) -> Self {
        Self::with_registry(PredicateRegistry::builtin(), config)
    }
}

impl<'r> PredicateEngine<'r> {
    /// Cria um motor com um registro próprio.
    pub fn with_registry(registry: &'r PredicateRegistry, config: &Config) -> Self {
        for name in &config.predicates.disabled {
            if !registry.contains(name) {
                warn!("Predicado desabilitado desconhecido na configuração: {}", name);
            }
        }

        Self {
            registry,
            cache: config.cache.clone(),
            disabled: config.predicates.disabled.clone(),
        }
    }

    /// Registro usado pelo motor.
    pub fn registry(&self) -> &'r PredicateRegistry {
        self.registry
    }

    /// Abre uma sessão para um valor já validado.
    pub fn open_session(&self, value: Number) -> EvaluationSession<'r> {
        let capacity = self.cache.enabled.then_some(self.cache.capacity);
        EvaluationSession::new(value, self.registry, capacity)
    }

    /// Avalia uma entrada e retorna o relatório.
    ///
    /// A sessão é criada e descartada aqui; nenhum resultado sobrevive à
    /// chamada.
    pub fn evaluate(
        &self,
        input: impl Into<NumberInput>,
        options: &EvaluateOptions,
    ) -> NumflagsResult<Report> {
        let input = input.into();
        let value = match input.coerce() {
            Ok(value) => value,
            Err(e) => {
                if options.report_errors {
                    warn!("{}", e);
                } else {
                    debug!("{}", e);
                }
                return Err(e);
            }
        };

        let mut session = self.open_session(value);
        self.evaluate_in(&mut session, options)
    }

    /// Avalia usando uma sessão fornecida pelo chamador.
    ///
    /// O cache da sessão é limpo ao final, com sucesso ou erro.
    pub fn evaluate_in(
        &self,
        session: &mut EvaluationSession<'_>,
        options: &EvaluateOptions,
    ) -> NumflagsResult<Report> {
        let span = tracing::debug_span!(
            "evaluate",
            session = %session.id(),
            value = %session.value(),
            format = %options.format
        );
        let _enter = span.enter();

        let result = self.run_session(session, options);
        session.clear();

        if let Err(e) = &result {
            if options.report_errors {
                warn!("{}", e);
            }
        }
        result
    }

    /// Predicados selecionados, na ordem do registro.
    pub fn select(&self, options: &EvaluateOptions) -> NumflagsResult<Vec<&'r Predicate>> {
        let registry = self.registry;

        match &options.only {
            Some(names) => {
                if let Some(unknown) = names.iter().find(|n| !registry.contains(n)) {
                    return Err(NumflagsError::UnknownPredicate(unknown.clone()));
                }
                // Explicit requests win over the configured disabled list.
                Ok(registry
                    .iter()
                    .filter(|p| names.iter().any(|n| n == p.name))
                    .collect())
            }
            None => Ok(registry
                .iter()
                .filter(|p| !self.disabled.iter().any(|d| d == p.name))
                .collect()),
        }
    }

    fn run_session(
        &self,
        session: &mut EvaluationSession<'_>,
        options: &EvaluateOptions,
    ) -> NumflagsResult<Report> {
        let selected = self.select(options)?;
        let full_run = selected.len() == self.registry.len();
        let evaluation = self.run(session, &selected, options.report_errors);

        let stats = session.stats();
        debug!(
            evaluated = evaluation.results.len(),
            skipped = evaluation.skipped.len(),
            cache_hits = stats.hits,
            cache_misses = stats.misses,
            "Predicados avaliados"
        );

        let value = session.value();
        let true_flags = FlagAggregator::true_flags(&evaluation);

        match options.format {
            OutputFormat::Prose => {
                let sentence = FlagAggregator::sentence(&value, &true_flags)?;
                Ok(Report::Prose(sentence))
            }
            OutputFormat::Structured => {
                if full_run && true_flags.is_empty() {
                    return Err(NumflagsError::EmptyResult(value.to_string()));
                }
                let session_id = session.id().to_string();
                Ok(Report::Structured(FlagAggregator::structured(
                    value,
                    evaluation,
                    &session_id,
                )))
            }
        }
    }

    fn run(
        &self,
        session: &mut EvaluationSession<'_>,
        selected: &[&Predicate],
        report_errors: bool,
    ) -> Evaluation {
        let mut evaluation = Evaluation::default();

        for predicate in selected {
            match session.check(predicate.name) {
                Ok(holds) => evaluation.results.push(predicate.name, holds),
                Err(e) => {
                    let value = session.value();
                    if report_errors {
                        warn!("Erro ao avaliar '{}' para {}: {}", predicate.name, value, e);
                    } else {
                        debug!("Erro ao avaliar '{}' para {}: {}", predicate.name, value, e);
                    }
                    evaluation
                        .skipped
                        .push(SkippedPredicate::new(predicate.name, e.to_string()));
                }
            }
        }

        evaluation
    }
}

impl Default for PredicateEngine<'static> {
    fn default() -> Self {
        Self::new(&Config::default_config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::Probe;

    fn engine() -> PredicateEngine<'static> {
        PredicateEngine::default()
    }

    fn structured(value: impl Into<NumberInput>) -> crate::types::responses::StructuredReport {
        engine()
            .evaluate(value, &EvaluateOptions::structured())
            .unwrap()
            .as_structured()
            .cloned()
            .unwrap()
    }

    fn exploding(_: &mut dyn Probe) -> NumflagsResult<bool> {
        panic!("boom")
    }

    fn never(_: &mut dyn Probe) -> NumflagsResult<bool> {
        Ok(false)
    }

    fn parity(probe: &mut dyn Probe) -> NumflagsResult<bool> {
        Ok(probe.number().as_integer().is_some_and(|n| n % 2 == 0))
    }

    #[test]
    fn test_prose_1234() {
        let report = engine().evaluate(1234, &EvaluateOptions::prose()).unwrap();
        assert_eq!(
            report.as_prose(),
            Some("1234 is a sequential, composite and even number")
        );
    }

    #[test]
    fn test_prose_single_flag() {
        let report = engine().evaluate("12.5", &EvaluateOptions::prose()).unwrap();
        assert_eq!(report.as_prose(), Some("12.5 is a decimal number"));
    }

    #[test]
    fn test_structured_has_every_predicate() {
        let report = structured(7);
        assert_eq!(report.flags.len(), PredicateRegistry::builtin().len());
        assert_eq!(report.flags.get("prime"), Some(true));
        assert_eq!(report.flags.get("even"), Some(false));
        assert_eq!(report.flags.get("palindromic"), Some(true));
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_invalid_input() {
        let err = engine().evaluate("abc", &EvaluateOptions::new()).unwrap_err();
        assert!(matches!(err, NumflagsError::InvalidInput { .. }));
    }

    #[test]
    fn test_only_keeps_registry_order() {
        let options = EvaluateOptions::structured().with_only(["even", "prime"]);
        let report = engine().evaluate(2, &options).unwrap();
        let report = report.as_structured().unwrap();

        let names: Vec<_> = report.flags.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["prime", "even"]);
    }

    #[test]
    fn test_only_rejects_unknown_name() {
        let options = EvaluateOptions::new().with_only(["prime", "perfect"]);
        let err = engine().evaluate(6, &options).unwrap_err();
        assert!(matches!(err, NumflagsError::UnknownPredicate(name) if name == "perfect"));
    }

    #[test]
    fn test_prose_subset_without_true_flag_is_error() {
        let options = EvaluateOptions::prose().with_only(["prime"]);
        let err = engine().evaluate(4, &options).unwrap_err();
        assert!(matches!(err, NumflagsError::EmptyResult(_)));
    }

    #[test]
    fn test_structured_subset_may_be_all_false() {
        let options = EvaluateOptions::structured().with_only(["prime"]);
        let report = engine().evaluate(4, &options).unwrap();
        assert_eq!(report.as_structured().unwrap().flags.get("prime"), Some(false));
    }

    #[test]
    fn test_disabled_predicates_are_skipped() {
        let mut config = Config::default_config();
        config.predicates.disabled = vec!["stack".to_string(), "even".to_string()];
        let engine = PredicateEngine::new(&config);

        let report = engine.evaluate(64, &EvaluateOptions::structured()).unwrap();
        let report = report.as_structured().unwrap();
        assert_eq!(report.flags.get("stack"), None);
        assert_eq!(report.flags.get("even"), None);
        assert_eq!(report.flags.get("composite"), Some(true));

        // explicit selection overrides the disabled list
        let report = engine
            .evaluate(64, &EvaluateOptions::structured().with_only(["stack"]))
            .unwrap();
        assert_eq!(report.as_structured().unwrap().flags.get("stack"), Some(true));
    }

    #[test]
    fn test_failing_predicate_is_isolated() {
        let registry = PredicateRegistry::new(vec![
            Predicate::new("exploding", "", exploding),
            Predicate::new("even", "", parity),
        ])
        .unwrap();
        let engine = PredicateEngine::with_registry(&registry, &Config::default_config());

        let options = EvaluateOptions::structured().with_report_errors(true);
        let report = engine.evaluate(4, &options).unwrap();
        let report = report.as_structured().unwrap();

        assert_eq!(report.flags.get("exploding"), None);
        assert_eq!(report.flags.get("even"), Some(true));
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].predicate, "exploding");
    }

    #[test]
    fn test_all_false_full_run_is_error() {
        let registry = PredicateRegistry::new(vec![Predicate::new("never", "", never)]).unwrap();
        let engine = PredicateEngine::with_registry(&registry, &Config::default_config());

        let err = engine.evaluate(3, &EvaluateOptions::structured()).unwrap_err();
        assert!(matches!(err, NumflagsError::EmptyResult(_)));
    }

    #[test]
    fn test_session_cleared_after_evaluate_in() {
        let engine = engine();
        let mut session = engine.open_session(Number::Integer(15));

        engine
            .evaluate_in(&mut session, &EvaluateOptions::prose())
            .unwrap();
        assert_eq!(session.stats().size, 0);

        // also cleared on the error path
        let options = EvaluateOptions::prose().with_only(["pair"]);
        assert!(engine.evaluate_in(&mut session, &options).is_err());
        assert_eq!(session.stats().size, 0);
    }

    #[test]
    fn test_cache_disabled_gives_same_results() {
        let mut config = Config::default_config();
        config.cache.enabled = false;
        let uncached = PredicateEngine::new(&config);

        for n in [-121, 0, 1, 2, 9, 12, 64, 1212, 1234] {
            let a = structured(n);
            let b = uncached.evaluate(n, &EvaluateOptions::structured()).unwrap();
            assert_eq!(a.flags, b.as_structured().unwrap().flags, "{n}");
        }
    }
}

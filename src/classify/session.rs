//! Sessão de avaliação.
//!
//! Guarda o valor sob teste e um cache LRU `(predicado, valor) → bool`
//! com vida de uma única chamada a `evaluate`. O cache é limpo quando a
//! sessão termina, em qualquer caminho de saída.

use std::any::Any;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};

use lru::LruCache;
use uuid::Uuid;

use crate::checks::{PredicateRegistry, Probe};
use crate::types::errors::{NumflagsError, NumflagsResult};
use crate::types::number::Number;

/// Chave do cache da sessão.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Nome do predicado.
    pub predicate: &'static str,

    /// Valor avaliado.
    pub value: Number,
}

impl CacheKey {
    /// Cria uma nova chave.
    pub fn new(predicate: &'static str, value: Number) -> Self {
        Self { predicate, value }
    }
}

/// Estatísticas do cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Número atual de entradas.
    pub size: usize,

    /// Capacidade máxima (0 se o cache estiver desabilitado).
    pub capacity: usize,

    /// Número de acertos (cache hits).
    pub hits: u64,

    /// Número de erros (cache misses).
    pub misses: u64,
}

impl CacheStats {
    /// Calcula a taxa de acerto.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Estado transitório de uma avaliação.
pub struct EvaluationSession<'r> {
    id: Uuid,
    value: Number,
    registry: &'r PredicateRegistry,
    cache: Option<LruCache<CacheKey, bool>>,
    in_progress: Vec<&'static str>,
    hits: u64,
    misses: u64,
}

impl<'r> EvaluationSession<'r> {
    /// Cria uma nova sessão.
    ///
    /// # Argumentos
    /// - `value`: valor sob teste
    /// - `registry`: predicados disponíveis
    /// - `capacity`: tamanho do cache (`None` desabilita a memoização);
    ///   nunca fica abaixo do tamanho do registro
    pub fn new(value: Number, registry: &'r PredicateRegistry, capacity: Option<usize>) -> Self {
        let cache = capacity.map(|cap| {
            let cap = NonZeroUsize::new(cap.max(registry.len())).unwrap_or(NonZeroUsize::MIN);
            LruCache::new(cap)
        });

        let id = Uuid::new_v4();
        tracing::trace!(session = %id, value = %value, "sessão aberta");

        Self {
            id,
            value,
            registry,
            cache,
            in_progress: Vec::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// ID da sessão (correlação de logs).
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Valor sob teste.
    pub fn value(&self) -> Number {
        self.value
    }

    /// Registro usado pela sessão.
    pub fn registry(&self) -> &'r PredicateRegistry {
        self.registry
    }

    /// Avalia um predicado, consultando o cache primeiro.
    ///
    /// Panics dentro do predicado são capturados e viram
    /// [`NumflagsError::PredicateFailure`]. Resultados com erro não são
    /// memoizados.
    pub fn check(&mut self, name: &str) -> NumflagsResult<bool> {
        let registry = self.registry;
        let predicate = registry
            .get(name)
            .ok_or_else(|| NumflagsError::UnknownPredicate(name.to_string()))?;
        let key = CacheKey::new(predicate.name, self.value);

        if let Some(hit) = self.cache.as_mut().and_then(|c| c.get(&key).copied()) {
            self.hits += 1;
            return Ok(hit);
        }
        self.misses += 1;

        if self.in_progress.contains(&predicate.name) {
            return Err(NumflagsError::predicate_failure(
                predicate.name,
                format!(
                    "dependência circular: {} -> {}",
                    self.in_progress.join(" -> "),
                    predicate.name
                ),
            ));
        }

        self.in_progress.push(predicate.name);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| predicate.call(self)));
        self.in_progress.pop();

        let result = outcome.unwrap_or_else(|payload| {
            Err(NumflagsError::predicate_failure(
                predicate.name,
                panic_message(payload.as_ref()),
            ))
        });

        if let (Ok(value), Some(cache)) = (&result, self.cache.as_mut()) {
            cache.put(key, *value);
        }

        result
    }

    /// Resultado já memoizado, sem avaliar.
    pub fn cached(&self, name: &str) -> Option<bool> {
        let predicate = self.registry.get(name)?;
        let key = CacheKey::new(predicate.name, self.value);
        self.cache.as_ref()?.peek(&key).copied()
    }

    /// Retorna estatísticas do cache.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.cache.as_ref().map_or(0, |c| c.len()),
            capacity: self.cache.as_ref().map_or(0, |c| c.cap().get()),
            hits: self.hits,
            misses: self.misses,
        }
    }

    /// Limpa o cache.
    pub fn clear(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
        self.in_progress.clear();
    }
}

impl Probe for EvaluationSession<'_> {
    fn number(&self) -> &Number {
        &self.value
    }

    fn require(&mut self, predicate: &str) -> NumflagsResult<bool> {
        self.check(predicate)
    }
}

impl Drop for EvaluationSession<'_> {
    fn drop(&mut self) {
        let stats = self.stats();
        self.clear();
        tracing::trace!(
            session = %self.id,
            hits = stats.hits,
            misses = stats.misses,
            "sessão encerrada"
        );
    }
}

impl std::fmt::Debug for EvaluationSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaluationSession")
            .field("id", &self.id)
            .field("value", &self.value)
            .field("stats", &self.stats())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("panic: {}", msg)
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("panic: {}", msg)
    } else {
        "panic sem mensagem".to_string()
    }
}

//! Registro de predicados do numflags.
//!
//! Os predicados são declarados estaticamente, em ordem, como pares
//! `(nome, função)`. A ordem do registro é a ordem dos relatórios.
//!
//! ## Predicados
//!
//! | Nome | Verdadeiro quando |
//! |---|---|
//! | `decimal` | a entrada tinha parte fracionária |
//! | `pair` | valor == 2 |
//! | `dozen` | valor == 12 |
//! | `stack` | valor == 64 |
//! | `sequential` | ≥ 3 dígitos com diferença constante |
//! | `repetitive` | dígitos cobertos por uma unidade repetida |
//! | `composite` | valor > 1 e não primo |
//! | `prime` | valor > 1 sem divisor em `[2, ⌊sqrt⌋]` |
//! | `even` / `odd` | paridade |
//! | `palindromic` | dígitos de `|n|` iguais ao reverso |
//! | `negative` | valor < 0 |

mod builtin;
pub mod digits;

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use crate::types::errors::{NumflagsError, NumflagsResult};
use crate::types::number::Number;

/// Acesso de um predicado ao valor sob teste e aos demais predicados.
///
/// Implementado pela sessão de avaliação: `require` passa pelo cache da
/// sessão, então um predicado derivado não recalcula o predicado base.
pub trait Probe {
    /// Valor sob teste.
    fn number(&self) -> &Number;

    /// Resultado de outro predicado para o mesmo valor.
    fn require(&mut self, predicate: &str) -> NumflagsResult<bool>;
}

/// Assinatura de um predicado.
pub type CheckFn = fn(&mut dyn Probe) -> NumflagsResult<bool>;

/// Predicado nomeado.
#[derive(Clone, Copy)]
pub struct Predicate {
    /// Nome único no registro.
    pub name: &'static str,

    /// Descrição curta do contrato.
    pub description: &'static str,

    check: CheckFn,
}

impl Predicate {
    /// Cria um novo predicado.
    pub const fn new(name: &'static str, description: &'static str, check: CheckFn) -> Self {
        Self {
            name,
            description,
            check,
        }
    }

    /// Executa o predicado.
    pub fn call(&self, probe: &mut dyn Probe) -> NumflagsResult<bool> {
        (self.check)(probe)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

const BUILTIN_PREDICATES: &[Predicate] = &[
    Predicate::new("decimal", "input carried a fractional part", builtin::decimal),
    Predicate::new("pair", "value is exactly 2", builtin::pair),
    Predicate::new("dozen", "value is exactly 12", builtin::dozen),
    Predicate::new("stack", "value is exactly 64", builtin::stack),
    Predicate::new(
        "sequential",
        "3+ digits with a constant step between neighbours",
        builtin::sequential,
    ),
    Predicate::new(
        "repetitive",
        "digits covered by a repeating unit",
        builtin::repetitive,
    ),
    Predicate::new("composite", "greater than 1 and not prime", builtin::composite),
    Predicate::new("prime", "greater than 1 with no divisor up to its square root", builtin::prime),
    Predicate::new("even", "divisible by 2", builtin::even),
    Predicate::new("odd", "not divisible by 2", builtin::odd),
    Predicate::new(
        "palindromic",
        "digits (sign excluded) read the same backwards",
        builtin::palindromic,
    ),
    Predicate::new("negative", "less than zero", builtin::negative),
];

static BUILTIN: PredicateRegistry = PredicateRegistry {
    predicates: Cow::Borrowed(BUILTIN_PREDICATES),
};

/// Lista ordenada e imutável de predicados.
#[derive(Debug, Clone)]
pub struct PredicateRegistry {
    predicates: Cow<'static, [Predicate]>,
}

impl PredicateRegistry {
    /// Registro padrão, compartilhado pelo processo.
    pub fn builtin() -> &'static PredicateRegistry {
        &BUILTIN
    }

    /// Cria um registro próprio, validando nomes únicos.
    pub fn new(predicates: Vec<Predicate>) -> NumflagsResult<Self> {
        let mut seen = HashSet::new();
        for predicate in &predicates {
            if !seen.insert(predicate.name) {
                return Err(NumflagsError::DuplicatePredicate(
                    predicate.name.to_string(),
                ));
            }
        }
        Ok(Self {
            predicates: Cow::Owned(predicates),
        })
    }

    /// Busca um predicado pelo nome.
    pub fn get(&self, name: &str) -> Option<&Predicate> {
        self.predicates.iter().find(|p| p.name == name)
    }

    /// Verifica se o nome está registrado.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Itera na ordem do registro.
    pub fn iter(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.iter()
    }

    /// Nomes na ordem do registro.
    pub fn names(&self) -> Vec<&'static str> {
        self.predicates.iter().map(|p| p.name).collect()
    }

    /// Número de predicados.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Verifica se o registro está vazio.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always_true(_: &mut dyn Probe) -> NumflagsResult<bool> {
        Ok(true)
    }

    #[test]
    fn test_builtin_order() {
        assert_eq!(
            PredicateRegistry::builtin().names(),
            vec![
                "decimal",
                "pair",
                "dozen",
                "stack",
                "sequential",
                "repetitive",
                "composite",
                "prime",
                "even",
                "odd",
                "palindromic",
                "negative",
            ]
        );
    }

    #[test]
    fn test_builtin_names_are_unique() {
        let names = PredicateRegistry::builtin().names();
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_lookup() {
        let registry = PredicateRegistry::builtin();
        assert!(registry.contains("prime"));
        assert!(!registry.contains("Prime"));
        assert_eq!(registry.get("stack").map(|p| p.name), Some("stack"));
    }

    #[test]
    fn test_custom_registry_rejects_duplicates() {
        let result = PredicateRegistry::new(vec![
            Predicate::new("yes", "", always_true),
            Predicate::new("yes", "", always_true),
        ]);
        assert!(matches!(result, Err(NumflagsError::DuplicatePredicate(name)) if name == "yes"));
    }

    #[test]
    fn test_custom_registry() {
        let registry =
            PredicateRegistry::new(vec![Predicate::new("yes", "", always_true)]).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }
}

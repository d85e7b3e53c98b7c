//! Attribute classification policies.
//!
//! A policy is the strategy a validator kind uses to decide which attribute
//! names are constants and which may be overwritten after declaration.

use regex_lite::Regex;
use std::collections::BTreeSet;
use std::fmt;

use crate::error::{ConstantError, ConstantResult};

/// Classification of a single attribute name under a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Can never be reassigned once declared.
    Constant,
    /// Exempted from the constant rule.
    Settable,
    /// Neither constant nor settable. Always rejected at declaration.
    Indefinite,
}

/// The two predicates a validator kind can override.
///
/// By default every name is constant, and a name is settable exactly when it
/// is not constant. Overriding only `is_constant_attr` therefore makes every
/// other name settable; overriding `is_settable_attr` as well can leave names
/// that are neither.
pub trait ConstantPolicy: fmt::Debug + Send + Sync {
    fn is_constant_attr(&self, _name: &str) -> bool {
        true
    }

    fn is_settable_attr(&self, name: &str) -> bool {
        !self.is_constant_attr(name)
    }
}

/// Classify `name` under `policy`. Constant wins over settable.
pub fn classify(policy: &dyn ConstantPolicy, name: &str) -> Classification {
    if policy.is_constant_attr(name) {
        Classification::Constant
    } else if policy.is_settable_attr(name) {
        Classification::Settable
    } else {
        Classification::Indefinite
    }
}

/// Reserved `__name__` attributes, exempt from classification at declaration.
pub fn is_magic_attr(name: &str) -> bool {
    name.starts_with("__") && name.ends_with("__")
}

/// Compute the constant-name set of a member map.
///
/// Magic names are skipped. Every indefinite name is collected and reported
/// in one `IndefiniteAttribute` error against `type_name`.
pub fn constant_set<'a, I>(
    policy: &dyn ConstantPolicy,
    type_name: &str,
    names: I,
) -> ConstantResult<BTreeSet<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut constants = BTreeSet::new();
    let mut indefinite = BTreeSet::new();

    for name in names.into_iter().filter(|name| !is_magic_attr(name)) {
        let class = classify(policy, name);
        tracing::trace!(type_name, attr = name, ?class, "classified attribute");
        match class {
            Classification::Constant => {
                constants.insert(name.to_string());
            }
            Classification::Settable => {}
            Classification::Indefinite => {
                indefinite.insert(name);
            }
        }
    }

    if !indefinite.is_empty() {
        return Err(ConstantError::indefinite(type_name, indefinite));
    }
    Ok(constants)
}

/// Every attribute is a constant.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl ConstantPolicy for DefaultPolicy {}

/// Upper-case names are constants, everything else is settable.
///
/// A name is upper case when it has at least one cased character and no
/// lower-case one, so `MAX_SIZE` and `V2` qualify while `_` does not.
#[derive(Debug, Clone, Copy, Default)]
pub struct UppercasePolicy;

impl ConstantPolicy for UppercasePolicy {
    fn is_constant_attr(&self, name: &str) -> bool {
        is_upper(name)
    }
}

fn is_upper(name: &str) -> bool {
    name.chars().any(char::is_uppercase) && !name.chars().any(char::is_lowercase)
}

type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Policy assembled from plain closures.
///
/// An omitted constant predicate keeps the default (everything constant); an
/// omitted settable predicate means "not constant".
#[derive(Default)]
pub struct PredicatePolicy {
    constant: Option<Predicate>,
    settable: Option<Predicate>,
}

impl PredicatePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constant(mut self, predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.constant = Some(Box::new(predicate));
        self
    }

    pub fn settable(mut self, predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.settable = Some(Box::new(predicate));
        self
    }
}

impl fmt::Debug for PredicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicatePolicy")
            .field("constant", &self.constant.as_ref().map(|_| "<fn>"))
            .field("settable", &self.settable.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl ConstantPolicy for PredicatePolicy {
    fn is_constant_attr(&self, name: &str) -> bool {
        self.constant.as_ref().map_or(true, |p| p(name))
    }

    fn is_settable_attr(&self, name: &str) -> bool {
        match &self.settable {
            Some(p) => p(name),
            None => !self.is_constant_attr(name),
        }
    }
}

/// Policy driven by regular expressions over attribute names.
#[derive(Debug, Clone)]
pub struct PatternPolicy {
    constant: Regex,
    settable: Option<Regex>,
}

impl PatternPolicy {
    /// Names matching `constant` are constants; everything else is settable
    /// until [`PatternPolicy::with_settable`] narrows it.
    pub fn new(constant: &str) -> ConstantResult<Self> {
        Ok(Self {
            constant: compile(constant)?,
            settable: None,
        })
    }

    pub fn with_settable(mut self, settable: &str) -> ConstantResult<Self> {
        self.settable = Some(compile(settable)?);
        Ok(self)
    }
}

fn compile(pattern: &str) -> ConstantResult<Regex> {
    Regex::new(pattern).map_err(|e| ConstantError::invalid_pattern(pattern, e.to_string()))
}

impl ConstantPolicy for PatternPolicy {
    fn is_constant_attr(&self, name: &str) -> bool {
        self.constant.is_match(name)
    }

    fn is_settable_attr(&self, name: &str) -> bool {
        match &self.settable {
            Some(re) => re.is_match(name),
            None => !self.is_constant_attr(name),
        }
    }
}

// <auto-generated>
//     Generated by bgen v1. Changes to this file will be lost when it is regenerated.
// </auto-generated>

/// A deferred member value held by a builder until `build` runs.
pub type Producer<T> = Box<dyn FnOnce() -> T>;

/// A built instance violated a registered domain rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleViolation {
    message: String,
}

impl RuleViolation {
    pub fn new(message: impl Into<String>) -> Self {
        RuleViolation {
            message: message.into(),
        }
    }

    /// The message the rule was registered with.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RuleViolation {}

type Rule<T> = Box<dyn Fn(&T) -> Result<(), RuleViolation>>;

/// Post-construction checks run by a builder's `build` method.
pub struct DomainRules<T> {
    rules: Vec<Rule<T>>,
}

impl<T> DomainRules<T> {
    pub fn new() -> Self {
        DomainRules { rules: Vec::new() }
    }

    /// Register a rule that fails the build with `message` whenever
    /// `predicate` returns `true` for the built instance.
    pub fn add_domain_rule(
        &mut self,
        predicate: impl Fn(&T) -> bool + 'static,
        message: impl Into<String>,
    ) where
        T: 'static,
    {
        let message = message.into();
        self.rules.push(Box::new(move |entity: &T| {
            if predicate(entity) {
                Err(RuleViolation::new(message.clone()))
            } else {
                Ok(())
            }
        }));
    }

    /// Run every rule in registration order; the first failure wins.
    pub fn check(&self, entity: &T) -> Result<(), RuleViolation> {
        for rule in &self.rules {
            rule(entity)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T> Default for DomainRules<T> {
    fn default() -> Self {
        Self::new()
    }
}

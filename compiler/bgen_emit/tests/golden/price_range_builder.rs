// <auto-generated>
//     Generated by bgen v1. Changes to this file will be lost when it is regenerated.
// </auto-generated>
// namespace: pricing

/// Builder for `crate::domain::PriceRange`.
pub struct PriceRangeBuilder {
    factory: Box<dyn Fn() -> crate::domain::PriceRange>,
    domain_rules: crate::bgen_support::DomainRules<crate::domain::PriceRange>,
    maximum_price: Option<crate::bgen_support::Producer<i32>>,
    minimum_price: Option<crate::bgen_support::Producer<i32>>,
    tags: Option<crate::bgen_support::Producer<Vec<String>>>,
}

impl PriceRangeBuilder {
    /// Creates a builder that starts from `Default::default()`.
    pub fn new() -> Self {
        Self::from_factory(<crate::domain::PriceRange as Default>::default)
    }

    /// Creates a builder that starts from instances produced by `factory`.
    pub fn from_factory(factory: impl Fn() -> crate::domain::PriceRange + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            domain_rules: crate::bgen_support::DomainRules::new(),
            maximum_price: None,
            minimum_price: None,
            tags: None,
        }
    }

    pub fn with_maximum_price(self, maximum_price: i32) -> Self {
        self.with_maximum_price_fn(move || maximum_price)
    }

    pub fn with_maximum_price_fn(mut self, maximum_price: impl FnOnce() -> i32 + 'static) -> Self {
        self.maximum_price = Some(Box::new(maximum_price));
        self
    }

    pub fn with_minimum_price(self, minimum_price: i32) -> Self {
        self.with_minimum_price_fn(move || minimum_price)
    }

    pub fn with_minimum_price_fn(mut self, minimum_price: impl FnOnce() -> i32 + 'static) -> Self {
        self.minimum_price = Some(Box::new(minimum_price));
        self
    }

    pub fn with_tags(self, tags: Vec<String>) -> Self {
        self.with_tags_fn(move || tags)
    }

    pub fn with_tags_fn(mut self, tags: impl FnOnce() -> Vec<String> + 'static) -> Self {
        self.tags = Some(Box::new(tags));
        self
    }

    /// Returns a configured instance of `crate::domain::PriceRange`.
    pub fn build(self) -> Result<crate::domain::PriceRange, crate::bgen_support::RuleViolation> {
        let mut instance = (self.factory)();

        if let Some(produce) = self.maximum_price {
            instance.maximum_price = produce();
        }

        if let Some(produce) = self.minimum_price {
            instance.minimum_price = produce();
        }

        if let Some(produce) = self.tags {
            for item in produce() {
                instance.tags.push(item);
            }
        }

        self.domain_rules.check(&instance)?;

        Ok(instance)
    }
}

impl Default for PriceRangeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

use anyhow::{Context, Result};
use regex::Regex;

use crate::config::{AssetKind, RuleConfig};

/// A rule with its regexes compiled
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub kind: AssetKind,
    pub minimize: bool,
    test: Regex,
    exclude: Option<Regex>,
}

impl CompiledRule {
    /// Whether this rule claims `rel_path` (a `/`-separated path)
    #[must_use]
    pub fn applies_to(&self, rel_path: &str) -> bool {
        self.test.is_match(rel_path)
            && !self.exclude.as_ref().is_some_and(|ex| ex.is_match(rel_path))
    }
}

/// Ordered rule set; the first applicable rule wins
#[derive(Debug, Clone)]
pub struct Rules {
    rules: Vec<CompiledRule>,
}

impl Rules {
    /// Compile every rule.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending rule if a regex is invalid.
    pub fn compile(configs: &[RuleConfig]) -> Result<Self> {
        let rules = configs
            .iter()
            .enumerate()
            .map(|(i, rule)| {
                let test = Regex::new(&rule.test)
                    .with_context(|| format!("rule {i}: invalid test regex {:?}", rule.test))?;
                let exclude = rule
                    .exclude
                    .as_deref()
                    .map(Regex::new)
                    .transpose()
                    .with_context(|| {
                        format!("rule {i}: invalid exclude regex {:?}", rule.exclude)
                    })?;
                Ok(CompiledRule {
                    kind: rule.kind,
                    minimize: rule.minimize,
                    test,
                    exclude,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// First rule that applies to `rel_path`
    #[must_use]
    pub fn classify(&self, rel_path: &str) -> Option<&CompiledRule> {
        self.rules.iter().find(|r| r.applies_to(rel_path))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

//! Random tree generation from a nonterminal, sharing only the
//! category/rule algebra with the chart engine.
//!
//! The RNG is injected via the ecosystem's standard [`rand::Rng`] trait
//! rather than hidden behind a thread-local, so callers can seed it for
//! reproducible output in tests. Recursion is capped by a configurable
//! depth; exceeding it is a typed [`Error::GeneratorDepthExceeded`], not a
//! stack overflow or a panic.

use rand::Rng;

use crate::category::Category;
use crate::error::{Error, Result};
use crate::rule::Rule;
use crate::tree::Tree;

/// Generous enough for any grammar this engine is meant to run, while still
/// catching a left-recursive rule set before it exhausts the stack.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Expands a nonterminal into a random tree licensed by `rules`.
pub struct Generator<'r> {
  rules: &'r [Rule],
  max_depth: usize,
}

impl<'r> Generator<'r> {
  pub fn new(rules: &'r [Rule]) -> Self {
    Generator {
      rules,
      max_depth: DEFAULT_MAX_DEPTH,
    }
  }

  pub fn with_max_depth(rules: &'r [Rule], max_depth: usize) -> Self {
    Generator { rules, max_depth }
  }

  /// Generates one random tree rooted at `start`. A category with no
  /// matching rule is treated as its own terminal rather than an error;
  /// this is how lexical items and any other undefined atom bottom out.
  pub fn generate<R: Rng + ?Sized>(&self, start: &Category, rng: &mut R) -> Result<Tree> {
    self.generate_at_depth(start, rng, 0)
  }

  fn generate_at_depth<R: Rng + ?Sized>(&self, cat: &Category, rng: &mut R, depth: usize) -> Result<Tree> {
    if depth > self.max_depth {
      return Err(Error::GeneratorDepthExceeded(self.max_depth, cat.atom().to_string()));
    }

    let candidates: Vec<&Rule> = self.rules.iter().filter(|r| r.lhs().atom() == cat.atom()).collect();
    if candidates.is_empty() {
      return Ok(Tree::leaf(cat.clone()));
    }

    let chosen = candidates[rng.random_range(0..candidates.len())];
    let mut node = Tree::node(cat.clone(), Vec::new());
    for daughter in chosen.rhs() {
      let child = self.generate_at_depth(daughter, rng, depth + 1)?;
      node = node.adjoin(child);
    }
    Ok(node)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  use crate::parser::{Parser, StrategyKind};

  fn toy_rules() -> Vec<Rule> {
    let mut rules = Vec::new();
    rules.extend(Rule::parse_line("S -> Np Vp").unwrap());
    rules.extend(Rule::parse_line("Np -> det Nn").unwrap());
    rules.extend(Rule::parse_line("Nn -> pigeons | boys").unwrap());
    rules.extend(Rule::parse_line("Vp -> suffer").unwrap());
    rules.extend(Rule::parse_line("det -> the").unwrap());
    rules
  }

  #[test]
  fn unexpandable_category_becomes_its_own_leaf() {
    let rules: Vec<Rule> = Vec::new();
    let generator = Generator::new(&rules);
    let mut rng = StdRng::seed_from_u64(3);
    let tree = generator.generate(&Category::atomic("mystery"), &mut rng).unwrap();
    assert!(tree.is_leaf());
    assert_eq!(tree.label(), &Category::atomic("mystery"));
  }

  #[test]
  fn generated_tree_parses_back_under_the_same_grammar() {
    let rules = toy_rules();
    let generator = Generator::new(&rules);
    let mut rng = StdRng::seed_from_u64(7);
    let tree = generator.generate(&Category::atomic("S"), &mut rng).unwrap();

    let tokens = tree.yield_tokens();
    let parser = Parser::new(rules.clone(), StrategyKind::BottomUp).unwrap();
    let result = parser.parse(&tokens, &[String::from("S")]);
    assert!(!result.is_empty());
  }

  #[test]
  fn exceeding_max_depth_is_an_error_not_a_panic() {
    let rules = vec![Rule::plain(Category::atomic("A"), vec![Category::atomic("A")]).unwrap()];
    let generator = Generator::with_max_depth(&rules, 5);
    let mut rng = StdRng::seed_from_u64(1);
    let err = generator.generate(&Category::atomic("A"), &mut rng).unwrap_err();
    assert_eq!(err, Error::GeneratorDepthExceeded(5, "A".to_string()));
  }
}

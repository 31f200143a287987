//! Ambient grammar-loading glue: parses a small textual grammar surface
//! syntax and bakes in the example grammar used to seed the scenario
//! tests.
//!
//! This is explicitly supplementary: the core parser never reads text and
//! never knows this module exists. Loading a grammar into a list of rules
//! is an external collaborator, and this is one (simplified)
//! implementation of that collaborator, not part of the core contract.

use crate::category::Category;
use crate::error::{Error, Result};
use crate::rule::Rule;

/// Parses a grammar text with two keyword-delimited regions (`grammar`
/// ... `thatsall`, then `lexicon` ... `thatsall`). Grammar lines use
/// [`Rule::parse_line`]'s factory syntax; lexicon lines are sugar for a
/// `CATEGORY -> word` rule, one per `|`-separated alternative category.
///
/// Feature blocks in parentheses are stripped before the atom is built;
/// this loader targets the simplified, feature-free scenario grammar. A
/// loader that preserves feature bindings on lexicon entries is future
/// work (see DESIGN.md).
pub fn load_grammar_text(source: &str) -> Result<Vec<Rule>> {
  let grammar_body = extract_region(source, "grammar", "thatsall")?;
  let lexicon_body = extract_region(source, "lexicon", "thatsall")?;

  let mut rules = Vec::new();
  for line in grammar_body.lines() {
    let line = line.trim();
    if line.is_empty() {
      continue;
    }
    rules.extend(Rule::parse_line(line)?);
  }
  for line in lexicon_body.lines() {
    let line = line.trim();
    if line.is_empty() {
      continue;
    }
    rules.extend(parse_lexicon_line(line)?);
  }

  if rules.is_empty() {
    return Err(Error::EmptyGrammar);
  }
  Ok(rules)
}

fn extract_region<'a>(source: &'a str, start_kw: &str, end_kw: &str) -> Result<&'a str> {
  let start = source
    .find(start_kw)
    .ok_or_else(|| Error::MalformedGrammar(format!("missing '{start_kw}' region")))?;
  let after_start = start + start_kw.len();
  let tail = &source[after_start..];
  let end = tail
    .find(end_kw)
    .ok_or_else(|| Error::MalformedGrammar(format!("missing '{end_kw}' after '{start_kw}'")))?;
  Ok(tail[..end].trim())
}

/// `word CATEGORY(keys) | CATEGORY(keys)`: one rule per alternative,
/// `CATEGORY -> word`.
fn parse_lexicon_line(line: &str) -> Result<Vec<Rule>> {
  let mut parts = line.splitn(2, char::is_whitespace);
  let word = parts.next().filter(|w| !w.is_empty()).ok_or_else(|| Error::MalformedGrammar(format!("empty lexicon line: {line}")))?;
  let rest = parts
    .next()
    .ok_or_else(|| Error::MalformedGrammar(format!("lexicon line has no category: {line}")))?;

  let mut rules = Vec::new();
  for alt in rest.split('|') {
    let atom = strip_feature_block(alt.trim());
    if atom.is_empty() {
      return Err(Error::MalformedGrammar(format!("empty category in lexicon line: {line}")));
    }
    rules.push(Rule::plain(Category::atomic(atom), vec![Category::atomic(word)])?);
  }
  Ok(rules)
}

fn strip_feature_block(token: &str) -> String {
  match token.split_once('(') {
    Some((atom, _)) => atom.trim().to_string(),
    None => token.to_string(),
  }
}

/// A small fragment of English, enough to admit a passive-voice
/// construction, NP coordination, and a deliberately missing
/// passive-plus-locative rule.
pub const BUILTIN_GRAMMAR: &str = "
grammar
S -> Np Vp
S -> Np cop ppart passmarker Np
Np -> det Nn
Np -> Np conj Np
Nn -> n
Vp -> v
Vp -> v Np
thatsall
lexicon
the det
pigeons n
boys n
girls n
professors n
room n
suffer v
punish v
punished ppart
are cop
by passmarker
and conj
in p
green adj
thatsall
";

/// Loads the grammar embedded in this module.
pub fn load_builtin() -> Result<Vec<Rule>> {
  load_grammar_text(BUILTIN_GRAMMAR)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtin_grammar_loads_without_error() {
    let rules = load_builtin().unwrap();
    assert!(!rules.is_empty());
  }

  #[test]
  fn lexicon_line_with_alternatives_expands_to_one_rule_per_category() {
    let rules = parse_lexicon_line("can V | N").unwrap();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].lhs(), &Category::atomic("V"));
    assert_eq!(rules[1].lhs(), &Category::atomic("N"));
    assert_eq!(rules[0].rhs(), &[Category::atomic("can")]);
  }

  #[test]
  fn feature_blocks_are_stripped_from_lexicon_categories() {
    let rules = parse_lexicon_line("he N(case:nom)").unwrap();
    assert_eq!(rules[0].lhs(), &Category::atomic("N"));
  }

  #[test]
  fn missing_thatsall_is_a_malformed_grammar_error() {
    let err = load_grammar_text("grammar\nS -> Np Vp\n").unwrap_err();
    assert!(matches!(err, Error::MalformedGrammar(_)));
  }
}

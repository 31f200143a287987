use std::fmt;

use crate::category::Category;
use crate::error::{Error, Result};

/// Per-rule constraint mask: the feature keys the mother inherits, and,
/// per daughter position, the feature keys that daughter contributes
/// rightward to subsequent daughters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConstraintMask {
  mother_keys: Vec<String>,
  child_keys: Vec<Vec<String>>,
}

impl ConstraintMask {
  pub fn new(mother_keys: Vec<String>, child_keys: Vec<Vec<String>>) -> Self {
    ConstraintMask { mother_keys, child_keys }
  }

  pub fn empty(len: usize) -> Self {
    ConstraintMask {
      mother_keys: Vec::new(),
      child_keys: vec![Vec::new(); len],
    }
  }

  pub fn mother_keys(&self) -> &[String] {
    &self.mother_keys
  }

  pub fn child_keys(&self, position: usize) -> &[String] {
    self.child_keys.get(position).map(Vec::as_slice).unwrap_or(&[])
  }

  /// The mask shifted down by one position, for when a fundamental-rule
  /// step consumes the first daughter.
  pub fn tail(&self) -> ConstraintMask {
    ConstraintMask {
      mother_keys: self.mother_keys.clone(),
      child_keys: self.child_keys.iter().skip(1).cloned().collect(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
  lhs: Category,
  rhs: Vec<Category>,
  constraints: ConstraintMask,
}

impl Rule {
  pub fn new(lhs: Category, rhs: Vec<Category>, constraints: ConstraintMask) -> Result<Self> {
    if rhs.is_empty() {
      return Err(Error::EmptyRuleSet(lhs.atom().to_string()));
    }
    Ok(Rule { lhs, rhs, constraints })
  }

  pub fn plain(lhs: Category, rhs: Vec<Category>) -> Result<Self> {
    let constraints = ConstraintMask::empty(rhs.len());
    Rule::new(lhs, rhs, constraints)
  }

  pub fn lhs(&self) -> &Category {
    &self.lhs
  }

  pub fn rhs(&self) -> &[Category] {
    &self.rhs
  }

  pub fn constraints(&self) -> &ConstraintMask {
    &self.constraints
  }

  pub fn mother_constraint_keys(&self) -> &[String] {
    self.constraints.mother_keys()
  }

  pub fn child_constraint_keys(&self, position: usize) -> &[String] {
    self.constraints.child_keys(position)
  }

  pub fn len(&self) -> usize {
    self.rhs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rhs.is_empty()
  }

  /// Parses `LHS(keys) -> RHS1(keys1) RHS2(keys2) ... | ALT1 | ALT2`. The
  /// parenthesized key lists are bare, comma-separated feature names (no
  /// values), declaring which keys that position contributes to constraint
  /// propagation; they're unrelated to the key:value feature bindings a
  /// grammar loader attaches to the categories themselves. One rule comes
  /// back per `|`-separated alternative, all sharing the LHS atom and
  /// mother constraint keys.
  pub fn parse_line(line: &str) -> Result<Vec<Rule>> {
    let line = line.trim().trim_end_matches(';').trim();
    let (lhs_part, rhs_part) = line
      .split_once("->")
      .ok_or_else(|| Error::MalformedGrammar(format!("missing '->' in rule: {line}")))?;

    let (lhs_atom, mother_keys) = parse_symbol(lhs_part.trim())?;

    let mut rules = Vec::new();
    for alt in rhs_part.split('|') {
      let mut rhs = Vec::new();
      let mut child_keys = Vec::new();
      for token in alt.split_whitespace() {
        let (atom, keys) = parse_symbol(token)?;
        rhs.push(Category::atomic(atom));
        child_keys.push(keys);
      }
      let mask = ConstraintMask::new(mother_keys.clone(), child_keys);
      rules.push(Rule::new(Category::atomic(lhs_atom.clone()), rhs, mask)?);
    }
    Ok(rules)
  }
}

impl fmt::Display for Rule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ->", self.lhs)?;
    for cat in &self.rhs {
      write!(f, " {}", cat)?;
    }
    Ok(())
  }
}

/// Parses a single `SYM` or `SYM(key1,key2)` token into its atom and bare
/// constraint-key list.
fn parse_symbol(token: &str) -> Result<(String, Vec<String>)> {
  let token = token.trim();
  match token.split_once('(') {
    None => Ok((token.to_string(), Vec::new())),
    Some((atom, rest)) => {
      let keys_part = rest
        .strip_suffix(')')
        .ok_or_else(|| Error::MalformedGrammar(format!("unterminated key list in: {token}")))?;
      let keys = keys_part.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect();
      Ok((atom.trim().to_string(), keys))
    }
  }
}

//! The output of tree extraction over the packed forest: a labeled node
//! plus an ordered list of children. A childless node stands for a leaf,
//! either a terminal whose atom is the surface word, or (only reachable
//! from the Generator) a nonterminal with no rules to expand it, treated
//! as its own terminal.

use std::fmt;

use crate::category::Category;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
  label: Category,
  children: Vec<Tree>,
}

impl Tree {
  pub fn leaf(label: Category) -> Self {
    Tree {
      label,
      children: Vec::new(),
    }
  }

  pub fn node(label: Category, children: Vec<Tree>) -> Self {
    Tree { label, children }
  }

  pub fn label(&self) -> &Category {
    &self.label
  }

  pub fn children(&self) -> &[Tree] {
    &self.children
  }

  pub fn is_leaf(&self) -> bool {
    self.children.is_empty()
  }

  /// Appends `child` as the last child of `self`, under `self`'s mother.
  pub fn adjoin(mut self, child: Tree) -> Tree {
    self.children.push(child);
    self
  }

  /// The in-order sequence of leaf atoms.
  pub fn yield_tokens(&self) -> Vec<String> {
    if self.is_leaf() {
      vec![self.label.atom().to_string()]
    } else {
      self.children.iter().flat_map(Tree::yield_tokens).collect()
    }
  }

  /// True iff this tree is a strict preterminal: exactly one child, and
  /// that child is itself a leaf.
  fn is_preterminal(&self) -> bool {
    self.children.len() == 1 && self.children[0].is_leaf()
  }

  /// Renders the canonical tree string form: preterminals `(CAT word)`
  /// inline on one line; other internal nodes emit their mother atom
  /// followed by each child on its own indented line.
  pub fn to_canonical_string(&self) -> String {
    let mut out = String::new();
    self.write_canonical(0, &mut out);
    out
  }

  fn write_canonical(&self, depth: usize, out: &mut String) {
    if self.is_leaf() {
      out.push_str(self.label.atom());
      return;
    }
    if self.is_preterminal() {
      out.push('(');
      out.push_str(self.label.atom());
      out.push(' ');
      out.push_str(self.children[0].label.atom());
      out.push(')');
      return;
    }
    out.push('(');
    out.push_str(self.label.atom());
    for child in &self.children {
      out.push('\n');
      out.push_str(&" ".repeat(depth + 1));
      child.write_canonical(depth + 1, out);
    }
    out.push(')');
  }
}

impl fmt::Display for Tree {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.to_canonical_string())
  }
}

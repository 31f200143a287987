//! The driver loop and the per-parse chart engine that ties the agenda,
//! chart store, strategy, and edge arena together.
//!
//! [`Parser`] is the long-lived, shareable configuration (a rule list plus
//! a chosen [`StrategyKind`]); each call to [`Parser::parse`] spawns a
//! fresh [`ChartEngine`] that owns the chart store, agenda, and edge arena
//! for exactly one parse. No state leaks across parses.

use crate::agenda::Agenda;
use crate::category::Category;
use crate::chart::{ChartStore, Incorporation};
use crate::edge::{AllTrees, Edge, EdgeArena, EdgeIdx};
use crate::error::{Error, Result};
use crate::monitor::EdgeMonitor;
use crate::rule::Rule;
use crate::strategy::StrategyKind;
use crate::tree::Tree;

/// Long-lived parser configuration: an immutable rule list and the
/// prediction strategy to drive the agenda with. Cheap to clone; `Rule`s
/// are themselves immutable and freely shareable.
#[derive(Debug, Clone)]
pub struct Parser {
  rules: Vec<Rule>,
  strategy: StrategyKind,
}

impl Parser {
  pub fn new(rules: Vec<Rule>, strategy: StrategyKind) -> Result<Self> {
    if rules.is_empty() {
      return Err(Error::EmptyGrammar);
    }
    Ok(Parser { rules, strategy })
  }

  pub fn strategy(&self) -> StrategyKind {
    self.strategy
  }

  pub fn set_strategy(&mut self, strategy: StrategyKind) {
    self.strategy = strategy;
  }

  pub fn rules(&self) -> &[Rule] {
    &self.rules
  }

  /// Parses `sentence` against `top_cats`, with no monitor installed.
  pub fn parse(&self, sentence: &[String], top_cats: &[String]) -> ParseResult {
    self.parse_with_monitor(sentence, top_cats, None)
  }

  /// Parses `sentence` against `top_cats`, notifying `monitor` (if given)
  /// of every edge actually incorporated.
  pub fn parse_with_monitor(
    &self,
    sentence: &[String],
    top_cats: &[String],
    monitor: Option<&mut dyn EdgeMonitor>,
  ) -> ParseResult {
    let span = tracing::info_span!(
      "parse",
      tokens = sentence.len(),
      strategy = ?self.strategy,
    );
    let _entered = span.enter();

    let engine = ChartEngine::new(&self.rules, sentence.to_vec(), top_cats.to_vec(), self.strategy, monitor);
    engine.run()
  }
}

/// The per-parse working state: the edge arena, the chart store, the
/// agenda, and a reference back to the shared rule list and strategy.
/// `pub(crate)` so [`crate::strategy::StrategyKind`]'s methods can take it
/// directly as a context parameter.
pub(crate) struct ChartEngine<'p> {
  rules: &'p [Rule],
  sentence: Vec<String>,
  top_cats: Vec<String>,
  strategy: StrategyKind,
  arena: EdgeArena,
  chart: ChartStore,
  agenda: Agenda,
  monitor: Option<&'p mut dyn EdgeMonitor>,
}

impl<'p> ChartEngine<'p> {
  fn new(
    rules: &'p [Rule],
    sentence: Vec<String>,
    top_cats: Vec<String>,
    strategy: StrategyKind,
    monitor: Option<&'p mut dyn EdgeMonitor>,
  ) -> Self {
    let n = sentence.len();
    ChartEngine {
      rules,
      sentence,
      top_cats,
      strategy,
      arena: EdgeArena::new(),
      chart: ChartStore::new(n),
      agenda: Agenda::new(),
      monitor,
    }
  }

  /// Pairs a newly complete edge against every already-known partial
  /// ending where it starts.
  fn pair_complete_with_partials(&mut self, complete_idx: EdgeIdx, left_pos: usize) {
    let partial_idxs: Vec<EdgeIdx> = self.chart.partials_at(left_pos).collect();
    for partial_idx in partial_idxs {
      self.try_pair(partial_idx, complete_idx);
    }
  }

  /// The fundamental-rule pairing check: if `partial`'s first need
  /// subsumes `complete`'s label and the two don't clash, builds and
  /// enqueues the resulting edge. Otherwise, a silent no-op; this is the
  /// normal mechanism by which features tighten the grammar.
  fn try_pair(&mut self, partial_idx: EdgeIdx, complete_idx: EdgeIdx) {
    let compatible = {
      let partial = self.arena.get(partial_idx);
      let complete = self.arena.get(complete_idx);
      match partial.first_needed() {
        Some(head) => head.subsumes(complete.label()) && !head.clashes(complete.label()),
        None => false,
      }
    };
    if !compatible {
      return;
    }
    let partial = self.arena.get(partial_idx).clone();
    let complete = self.arena.get(complete_idx).clone();
    let new_edge = Edge::fundamental(&partial, partial_idx, &complete, complete_idx);
    let idx = self.arena.alloc(new_edge);
    self.agenda.enqueue(idx);
  }

  /// Incorporates the edge at `idx`; returns whether it actually grew the
  /// chart (and thus whether the monitor should be notified).
  fn incorporate(&mut self, idx: EdgeIdx) -> bool {
    let is_complete = self.arena.get(idx).is_complete();
    match self.chart.incorporate(self.arena.get(idx), idx) {
      Incorporation::Merged(existing) => {
        let incoming = self.arena.get(idx).predecessors().to_vec();
        self.arena.merge_predecessors(existing, incoming);
        false
      }
      Incorporation::Inserted => {
        let strategy = self.strategy;
        if is_complete {
          let label = self.arena.get(idx).label().clone();
          let pos = self.arena.get(idx).left();
          strategy.predict_from_complete(self, &label, pos);
          self.pair_complete_with_partials(idx, pos);
        } else {
          strategy.predict_from_partial(self, idx);
        }
        true
      }
    }
  }

  /// Complete edges spanning the whole input whose atom is admissible.
  fn solutions(&self) -> Vec<EdgeIdx> {
    let n = self.sentence.len();
    self.chart
      .completes_at(0)
      .filter(|&idx| {
        let e = self.arena.get(idx);
        e.right() == n && self.top_cats.iter().any(|c| c == e.label().atom())
      })
      .collect()
  }

  /// Runs the driver loop to a fixed point and packages the result.
  fn run(mut self) -> ParseResult {
    let strategy = self.strategy;
    strategy.initialize(&mut self);

    while let Some(idx) = self.agenda.dequeue() {
      let incorporated = self.incorporate(idx);
      if incorporated {
        if let Some(monitor) = self.monitor.as_deref_mut() {
          let edge = self.arena.get(idx);
          monitor.note(idx, edge);
        }
      }
    }

    let solutions = self.solutions();
    ParseResult {
      arena: self.arena,
      solutions,
      num_complete_edges: self.chart.num_complete_edges(),
      num_partial_edges: self.chart.num_partial_edges(),
    }
  }
}

// Accessors ChartEngine exposes to StrategyKind's behavior (strategy.rs).
// Plain names since these are only reachable from within the crate.
impl<'p> ChartEngine<'p> {
  pub(crate) fn sentence(&self) -> &[String] {
    &self.sentence
  }

  pub(crate) fn top_cats(&self) -> &[String] {
    &self.top_cats
  }

  pub(crate) fn spawn_predictive(&mut self, rule: &Rule, pos: usize) {
    let edge = Edge::predictive(rule, pos);
    let idx = self.arena.alloc(edge);
    self.agenda.enqueue(idx);
  }

  pub(crate) fn spawn_lexical(&mut self, word: &str, pos: usize) {
    let edge = Edge::lexical(word, pos);
    let idx = self.arena.alloc(edge);
    self.agenda.enqueue(idx);
  }

  pub(crate) fn rules_with_rhs0_subsuming(&self, label: &Category) -> Vec<Rule> {
    self.rules.iter().filter(|r| r.rhs().first().is_some_and(|c| c.subsumes(label))).cloned().collect()
  }

  pub(crate) fn rules_with_lhs_atom(&self, atom: &str) -> Vec<Rule> {
    self.rules.iter().filter(|r| r.lhs().atom() == atom).cloned().collect()
  }

  pub(crate) fn rules_with_lhs_atom_in(&self, atoms: &[String]) -> Vec<Rule> {
    self.rules.iter().filter(|r| atoms.iter().any(|a| a == r.lhs().atom())).cloned().collect()
  }

  pub(crate) fn edge_left(&self, idx: EdgeIdx) -> usize {
    self.arena.get(idx).left()
  }

  pub(crate) fn edge_right(&self, idx: EdgeIdx) -> usize {
    self.arena.get(idx).right()
  }

  pub(crate) fn first_needed_atom(&self, idx: EdgeIdx) -> Option<String> {
    self.arena.get(idx).first_needed().map(|c| c.atom().to_string())
  }

  pub(crate) fn pair_partial_with_completes(&mut self, partial_idx: EdgeIdx, right_pos: usize) {
    let complete_idxs: Vec<EdgeIdx> = self.chart.completes_at(right_pos).collect();
    for complete_idx in complete_idxs {
      self.try_pair(partial_idx, complete_idx);
    }
  }
}

/// The outcome of a parse: the root edges satisfying `solutions(top_cats)`,
/// plus the arena needed to walk the packed forest over them, plus the
/// edge counters used by the strategy-equivalence tests.
pub struct ParseResult {
  arena: EdgeArena,
  solutions: Vec<EdgeIdx>,
  num_complete_edges: usize,
  num_partial_edges: usize,
}

impl ParseResult {
  pub fn solutions(&self) -> &[EdgeIdx] {
    &self.solutions
  }

  pub fn is_empty(&self) -> bool {
    self.solutions.is_empty()
  }

  pub fn num_complete_edges(&self) -> usize {
    self.num_complete_edges
  }

  pub fn num_partial_edges(&self) -> usize {
    self.num_partial_edges
  }

  pub fn edge(&self, idx: EdgeIdx) -> &Edge {
    self.arena.get(idx)
  }

  pub fn first_tree(&self, idx: EdgeIdx) -> Tree {
    self.arena.first_tree(idx)
  }

  pub fn count_trees(&self, idx: EdgeIdx) -> u64 {
    self.arena.count_trees(idx)
  }

  pub fn get_tree(&self, idx: EdgeIdx, index: u64) -> Tree {
    self.arena.get_tree(idx, index)
  }

  pub fn all_trees(&self, idx: EdgeIdx) -> AllTrees<'_> {
    self.arena.all_trees(idx)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::monitor::CountingMonitor;

  fn words(s: &[&str]) -> Vec<String> {
    s.iter().map(|w| w.to_string()).collect()
  }

  fn toy_rules() -> Vec<Rule> {
    let mut rules = Vec::new();
    rules.extend(Rule::parse_line("S -> Np Vp").unwrap());
    rules.extend(Rule::parse_line("Np -> det Nn").unwrap());
    rules.extend(Rule::parse_line("Nn -> pigeons").unwrap());
    rules.extend(Rule::parse_line("Vp -> suffer").unwrap());
    rules.extend(Rule::parse_line("det -> the").unwrap());
    rules
  }

  #[test]
  fn bottom_up_parses_a_simple_sentence() {
    let parser = Parser::new(toy_rules(), StrategyKind::BottomUp).unwrap();
    let result = parser.parse(&words(&["the", "pigeons", "suffer"]), &words(&["S"]));
    assert_eq!(result.solutions().len(), 1);
    let tree = result.first_tree(result.solutions()[0]);
    assert_eq!(
      tree.to_canonical_string(),
      "(S\n (Np\n  (det the)\n  (Nn pigeons))\n (Vp suffer))"
    );
  }

  #[test]
  fn top_down_parses_the_same_sentence() {
    let parser = Parser::new(toy_rules(), StrategyKind::TopDown).unwrap();
    let result = parser.parse(&words(&["the", "pigeons", "suffer"]), &words(&["S"]));
    assert_eq!(result.solutions().len(), 1);
  }

  #[test]
  fn unknown_word_yields_no_parse_not_an_error() {
    let parser = Parser::new(toy_rules(), StrategyKind::BottomUp).unwrap();
    let result = parser.parse(&words(&["the", "cats", "suffer"]), &words(&["S"]));
    assert!(result.is_empty());
  }

  #[test]
  fn monitor_is_notified_once_per_incorporated_edge() {
    let parser = Parser::new(toy_rules(), StrategyKind::BottomUp).unwrap();
    let mut monitor = CountingMonitor::default();
    let result = parser.parse_with_monitor(&words(&["the", "pigeons", "suffer"]), &words(&["S"]), Some(&mut monitor));
    assert_eq!(monitor.num_complete_edges, result.num_complete_edges());
    assert_eq!(monitor.num_partial_edges, result.num_partial_edges());
  }

  #[test]
  fn empty_rule_list_is_a_configuration_error() {
    assert_eq!(Parser::new(Vec::new(), StrategyKind::BottomUp).unwrap_err(), Error::EmptyGrammar);
  }
}

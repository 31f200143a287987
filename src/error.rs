//! Error types for the chart engine and its ambient grammar-loading glue.

use thiserror::Error;

/// Error type for chart-parser configuration and grammar loading.
///
/// Parse failure in the ordinary sense ("no tree licenses this sentence") is
/// not an error; it is represented by an empty solution set. `Error` covers
/// only the cases in the taxonomy that are genuine misconfiguration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The grammar loader produced no rules at all.
    #[error("grammar produced an empty rule list")]
    EmptyGrammar,

    /// A rule's right-hand side was declared but turned out empty (epsilon
    /// productions are out of scope for this engine).
    #[error("rule for '{0}' has an empty right-hand side")]
    EmptyRuleSet(String),

    /// The grammar text could not be parsed into rules.
    #[error("malformed grammar source: {0}")]
    MalformedGrammar(String),

    /// The generator recursed past its configured depth cap without
    /// bottoming out at an unexpandable nonterminal.
    #[error("generator exceeded maximum depth ({0}) while expanding '{1}'")]
    GeneratorDepthExceeded(usize, String),
}

/// Result type for operations that can fail with a configuration [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

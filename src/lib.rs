pub mod agenda;
pub mod category;
pub mod chart;
pub mod edge;
pub mod error;
pub mod generator;
pub mod grammar_source;
pub mod monitor;
pub mod parser;
pub mod rule;
pub mod strategy;
pub mod tree;

pub use category::Category;
pub use edge::{Edge, EdgeIdx};
pub use error::{Error, Result};
pub use generator::Generator;
pub use monitor::{CountingMonitor, EdgeMonitor, NullMonitor, TracingMonitor};
pub use parser::{ParseResult, Parser};
pub use rule::{ConstraintMask, Rule};
pub use strategy::StrategyKind;
pub use tree::Tree;

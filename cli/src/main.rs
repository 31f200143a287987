//! A thin demonstration binary over the bundled built-in grammar: reads
//! sentences from stdin, parses each with the chart engine, and prints the
//! resulting trees. Not part of the tested core contract; grammar file
//! I/O, a real DSL, and a configuration surface are all out of scope for
//! the core and are not reimplemented here.

use std::io::{self, Write};
use std::process;

use chartparse::{grammar_source, Parser, StrategyKind};

fn usage(prog_name: &str) -> String {
  format!(
    r"
Usage: {} [options]

Parses sentences typed at the prompt against the bundled built-in grammar.

Options:
  -h, --help        Print this message
  -t, --top-down    Use the top-down (Earley-style) strategy (default: bottom-up)
  -c, --counts      Print edge counters alongside each parse",
    prog_name
  )
}

fn parse_line(parser: &Parser, line: &str, top_cats: &[String], print_counts: bool) {
  let sentence: Vec<String> = line.split_whitespace().map(str::to_string).collect();
  if sentence.is_empty() {
    return;
  }

  let result = parser.parse(&sentence, top_cats);
  println!(
    "{} parse{}",
    result.solutions().len(),
    if result.solutions().len() == 1 { "" } else { "s" }
  );
  if print_counts {
    println!(
      "  (complete edges: {}, partial edges: {})",
      result.num_complete_edges(),
      result.num_partial_edges()
    );
  }
  for &idx in result.solutions() {
    println!("{}", result.first_tree(idx));
  }
}

fn main() {
  tracing_subscriber::fmt::init();

  let mut strategy = StrategyKind::BottomUp;
  let mut print_counts = false;
  for arg in std::env::args().skip(1) {
    match arg.as_str() {
      "-h" | "--help" => {
        println!("{}", usage(&std::env::args().next().unwrap_or_default()));
        process::exit(0);
      }
      "-t" | "--top-down" => strategy = StrategyKind::TopDown,
      "-c" | "--counts" => print_counts = true,
      other => {
        eprintln!("unrecognized option: {other}");
        process::exit(1);
      }
    }
  }

  let rules = grammar_source::load_builtin().expect("built-in grammar failed to load");
  let parser = Parser::new(rules, strategy).expect("built-in grammar produced an empty rule list");
  let top_cats = vec![String::from("S")];

  let mut line = String::new();
  loop {
    print!("> ");
    io::stdout().flush().expect("failed to flush stdout");

    line.clear();
    match io::stdin().read_line(&mut line) {
      Ok(0) => break, // EOF (ctrl+d)
      Ok(_) => parse_line(&parser, line.trim(), &top_cats, print_counts),
      Err(err) => {
        eprintln!("error reading stdin: {err}");
        break;
      }
    }
  }
}

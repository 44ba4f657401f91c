//! Interactive keyword search.
//!
//! [`Session`] is the command state machine and knows nothing about the
//! terminal; [`run`] drives it from any `BufRead` and writes to any `Write`.

pub mod command;
pub mod output;

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::engine::{Ranking, SearchIndex};
use self::command::{Command, Input, MULTILINE_TERMINATOR};

const BANNER: &str = "Keyword search - enter keywords separated by spaces\n\
                      Enter 'q' to quit, 'h' to display help message\n";
const PROMPT: &str = "Query: ";

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Quit,
    Help,
    DetailedMode(bool),
    /// Multi-line input started; lines are collected until the terminator.
    Collecting,
    /// A line was added to the multi-line query.
    Collected,
    Results { ranking: Ranking, detailed: bool },
}

pub struct Session<'a> {
    index: &'a SearchIndex,
    detailed: bool,
    pending: Option<Vec<String>>,
}

impl<'a> Session<'a> {
    pub fn new(index: &'a SearchIndex) -> Self {
        Self {
            index,
            detailed: false,
            pending: None,
        }
    }

    pub fn detailed(&self) -> bool {
        self.detailed
    }

    pub fn is_collecting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn handle_line(&mut self, line: &str) -> Reply {
        let line = line.trim_end_matches(['\r', '\n']);

        if let Some(lines) = self.pending.as_mut() {
            if line.trim() != MULTILINE_TERMINATOR {
                lines.push(line.to_string());
                return Reply::Collected;
            }
            let query = lines.join("\n");
            self.pending = None;
            return self.search(&query);
        }

        match command::parse(line) {
            Input::Command(Command::Quit) => Reply::Quit,
            Input::Command(Command::Help) => Reply::Help,
            Input::Command(Command::ToggleDetailed) => {
                self.detailed = !self.detailed;
                Reply::DetailedMode(self.detailed)
            }
            Input::Command(Command::MultiLine) => {
                self.pending = Some(Vec::new());
                Reply::Collecting
            }
            Input::Query(query) => self.search(query),
        }
    }

    fn search(&self, query: &str) -> Reply {
        debug!("Searching for {:?}", query);
        Reply::Results {
            ranking: self.index.search(query, self.detailed),
            detailed: self.detailed,
        }
    }
}

/// Runs the prompt loop until `q` or end of input.
pub fn run<R: BufRead, W: Write>(index: &SearchIndex, input: R, mut out: W) -> io::Result<()> {
    let mut session = Session::new(index);
    writeln!(out, "{BANNER}")?;
    write!(out, "{PROMPT}")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        match session.handle_line(&line) {
            Reply::Quit => return Ok(()),
            Reply::Help => writeln!(out, "{}", command::help_text())?,
            Reply::DetailedMode(on) => writeln!(
                out,
                "Detailed output mode {}",
                if on { "enabled" } else { "disabled" }
            )?,
            Reply::Collecting => {
                writeln!(
                    out,
                    "Multiple line query. When done, type '{MULTILINE_TERMINATOR}' and press enter"
                )?;
                continue;
            }
            Reply::Collected => continue,
            Reply::Results { ranking, detailed } => {
                if detailed {
                    writeln!(out, "{}", output::format_matches(&ranking.matches))?;
                }
                writeln!(out, "{}", output::format_result(&ranking))?;
            }
        }
        write!(out, "\n{PROMPT}")?;
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::DocumentVectors;
    use crate::preprocessing::Vocabulary;
    use std::io::Cursor;

    fn index() -> SearchIndex {
        let vocabulary = Vocabulary::from_terms(vec!["the".into(), "fox".into(), "dog".into()]).unwrap();
        let vectors = DocumentVectors::from_vectors(
            3,
            vec![("fox.txt", vec![2.0, 1.0, 0.0]), ("dog.txt", vec![1.0, 0.0, 3.0])],
        )
        .unwrap();
        SearchIndex::new(vocabulary, vectors).unwrap()
    }

    fn best(reply: Reply) -> Option<String> {
        match reply {
            Reply::Results { ranking, .. } => ranking.best.map(|m| m.document),
            other => panic!("expected results, got {other:?}"),
        }
    }

    #[test]
    fn toggles_detailed_mode() {
        let index = index();
        let mut session = Session::new(&index);
        assert_eq!(session.handle_line("d"), Reply::DetailedMode(true));
        assert!(session.detailed());
        match session.handle_line("dog") {
            Reply::Results { ranking, detailed } => {
                assert!(detailed);
                assert_eq!(ranking.matches.len(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(session.handle_line("d"), Reply::DetailedMode(false));
    }

    #[test]
    fn collects_multi_line_queries() {
        let index = index();
        let mut session = Session::new(&index);
        assert_eq!(session.handle_line("n"), Reply::Collecting);
        assert!(session.is_collecting());
        // Commands are plain text while collecting.
        assert_eq!(session.handle_line("q"), Reply::Collected);
        assert_eq!(session.handle_line("the"), Reply::Collected);
        assert_eq!(session.handle_line("dog"), Reply::Collected);
        assert_eq!(best(session.handle_line("$")), Some("dog.txt".into()));
        assert!(!session.is_collecting());
    }

    #[test]
    fn unknown_words_give_no_match() {
        let index = index();
        let mut session = Session::new(&index);
        assert_eq!(best(session.handle_line("zebra")), None);
        assert_eq!(session.handle_line("q"), Reply::Quit);
    }

    #[test]
    fn run_drives_the_prompt() {
        let index = index();
        let input = Cursor::new("h\nthe fox\nd\nfox\nzebra\nq\nnever read\n");
        let mut out = Vec::new();
        run(&index, input, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Keyword search"));
        assert!(text.contains("Available commands:"));
        assert!(text.contains("Result: fox.txt"));
        assert!(text.contains("Detailed output mode enabled"));
        assert!(text.contains("FILE\t\t\t% MATCH"));
        assert!(text.contains("Result: [no match]"));
        assert!(!text.contains("never read"));
    }

    #[test]
    fn run_stops_at_end_of_input() {
        let index = index();
        let mut out = Vec::new();
        run(&index, Cursor::new("n\nthe\n"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Multiple line query"));
        assert!(!text.contains("Result:"));
    }
}

//! Splitting of console lines into command words.

use thiserror::Error;

/// Errors that can occur while splitting a line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexingError {
    /// A closing quote (single or double) was not found.
    #[error("unfinished quote")]
    UnfinishedQuote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexingState {
    Start,
    ReadingWord,
    ReadingSingleQuote,
    ReadingDoubleQuote,
}

struct LexingFSM {
    input: Vec<char>,
    pos: usize,
    state: LexingState,
    buffer: String,
}

impl LexingFSM {
    fn new(line: &str) -> Self {
        LexingFSM {
            input: line.chars().collect(),
            pos: 0,
            state: LexingState::Start,
            buffer: String::new(),
        }
    }

    /// Runs the state machine over the whole line.
    ///
    /// Quoted parts join the word they touch, so `print-job "Court Proceedings".pdf 3`
    /// yields the job name `Court Proceedings.pdf`.
    fn make_words(&mut self) -> Result<Vec<String>, LexingError> {
        let mut out = Vec::new();

        while let Some(ch) = self.read_char() {
            match self.state {
                LexingState::Start => self.handle_start(ch),
                LexingState::ReadingWord => self.handle_word(ch, &mut out),
                LexingState::ReadingSingleQuote => self.handle_single_quote(ch),
                LexingState::ReadingDoubleQuote => self.handle_double_quote(ch),
            }
        }

        match self.state {
            LexingState::ReadingSingleQuote | LexingState::ReadingDoubleQuote => {
                return Err(LexingError::UnfinishedQuote);
            }
            LexingState::ReadingWord => out.push(std::mem::take(&mut self.buffer)),
            LexingState::Start => {}
        }

        Ok(out)
    }

    fn read_char(&mut self) -> Option<char> {
        let ch = self.input.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn handle_start(&mut self, ch: char) {
        match ch {
            ' ' | '\t' => {}
            '\'' => self.state = LexingState::ReadingSingleQuote,
            '"' => self.state = LexingState::ReadingDoubleQuote,
            c => {
                self.buffer.push(c);
                self.state = LexingState::ReadingWord;
            }
        }
    }

    fn handle_word(&mut self, ch: char, out: &mut Vec<String>) {
        match ch {
            ' ' | '\t' => {
                out.push(std::mem::take(&mut self.buffer));
                self.state = LexingState::Start;
            }
            '\'' => self.state = LexingState::ReadingSingleQuote,
            '"' => self.state = LexingState::ReadingDoubleQuote,
            c => self.buffer.push(c),
        }
    }

    fn handle_single_quote(&mut self, ch: char) {
        match ch {
            '\'' => self.state = LexingState::ReadingWord,
            c => self.buffer.push(c),
        }
    }

    fn handle_double_quote(&mut self, ch: char) {
        match ch {
            '"' => self.state = LexingState::ReadingWord,
            '\\' => match self.read_char() {
                Some(c @ ('"' | '\\')) => self.buffer.push(c),
                Some(c) => {
                    self.buffer.push('\\');
                    self.buffer.push(c);
                }
                None => self.buffer.push('\\'),
            },
            c => self.buffer.push(c),
        }
    }
}

/// Split a console line into words.
///
/// Returns [`LexingError::UnfinishedQuote`] if a quote is left open.
pub fn split_into_words(line: &str) -> Result<Vec<String>, LexingError> {
    LexingFSM::new(line).make_words()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_words() {
        assert_eq!(
            split_into_words("print-job  Essay.docx\t3").unwrap(),
            vec!["print-job", "Essay.docx", "3"]
        );
    }

    #[test]
    fn test_empty_line() {
        assert!(split_into_words("   ").unwrap().is_empty());
    }

    #[test]
    fn test_double_quoted_name_with_spaces() {
        assert_eq!(
            split_into_words("print-job \"Court Proceedings.pdf\" 10").unwrap(),
            vec!["print-job", "Court Proceedings.pdf", "10"]
        );
    }

    #[test]
    fn test_single_quotes_are_literal() {
        assert_eq!(
            split_into_words(r#"set name 'say "hi"'"#).unwrap(),
            vec!["set", "name", "say \"hi\""]
        );
    }

    #[test]
    fn test_quotes_join_adjacent_parts() {
        assert_eq!(
            split_into_words("\"Court Proceedings\".pdf").unwrap(),
            vec!["Court Proceedings.pdf"]
        );
    }

    #[test]
    fn test_escapes_inside_double_quotes() {
        assert_eq!(
            split_into_words(r#""a \"b\" c\\d \n""#).unwrap(),
            vec![r#"a "b" c\d \n"#]
        );
    }

    #[test]
    fn test_empty_quoted_word() {
        assert_eq!(split_into_words("set name \"\"").unwrap(), vec!["set", "name", ""]);
    }

    #[test]
    fn test_unfinished_quote() {
        assert_eq!(
            split_into_words("print-job \"Essay.docx 3"),
            Err(LexingError::UnfinishedQuote)
        );
        assert_eq!(split_into_words("'oops"), Err(LexingError::UnfinishedQuote));
    }
}

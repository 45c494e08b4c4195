//! Quote and escape aware splitting of an input line into tokens.
//!
//! Rules:
//!
//! - Whitespace outside quotes separates tokens; runs of it count once.
//! - `"` and `'` both open and close a quoted span, and either may close a span
//!   the other opened. Everything inside a span is kept verbatim, spaces
//!   included, and the span glues onto adjacent unquoted text.
//! - A quote directly after `\` is a literal quote: the backslash is dropped
//!   and quoting is not toggled.
//! - An unterminated span runs to the end of the line.
//!
//! After splitting, tokens that start with the option sigil are removed from
//! the stream. `/?` and any prefix of `/help` (including a lone `/`) raise the
//! help flag.

use tracing::trace;

use crate::config::DEFAULT_OPTION_CHAR;

/// Tokens of one input line plus the flags stripped from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    /// Tokens in input order.
    pub tokens: Vec<String>,
    /// Whether a help flag was present.
    pub help: bool,
}

impl TokenStream {
    /// Whether no command tokens remain.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Splits lines into [`TokenStream`]s.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer {
    option_char: char,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_OPTION_CHAR)
    }
}

impl Tokenizer {
    /// Create a tokenizer that strips flags starting with `option_char`.
    pub const fn new(option_char: char) -> Self {
        Self { option_char }
    }

    /// Tokenize a single line.
    ///
    /// ```rust
    /// use shorthand_core::Tokenizer;
    ///
    /// let stream = Tokenizer::default().tokenize(r#"u n='Elon Musk' a=47 find /?"#);
    /// assert_eq!(stream.tokens, ["u", "n=Elon Musk", "a=47", "find"]);
    /// assert!(stream.help);
    /// ```
    pub fn tokenize(&self, line: &str) -> TokenStream {
        let mut stream = TokenStream::default();

        for token in lex(line) {
            match token.strip_prefix(self.option_char) {
                Some(flag) => {
                    if flag == "?" || "help".starts_with(flag) {
                        stream.help = true;
                    }
                },
                None => stream.tokens.push(token),
            }
        }

        trace!(tokens = ?stream.tokens, help = stream.help, "tokenized line");
        stream
    }
}

/// Split input on line breaks, dropping empty lines.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\r', '\n']).filter(|line| !line.is_empty())
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

fn lex(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut prev = None;

    for c in line.chars() {
        if is_quote(c) {
            if prev == Some('\\') {
                current.pop();
                current.push(c);
            } else {
                quoted = !quoted;
            }
        } else if quoted || !c.is_whitespace() {
            current.push(c);
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
        prev = Some(c);
    }

    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

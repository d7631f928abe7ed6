//! Delimited-line tokenization
//!
//! Splits a single sheet line into raw fields. Published sheets use
//! different quoting conventions, so the split strategy is chosen per sheet:
//!
//! - [`SplitStrategy::Quoted`] scans with an in-quotes flag, drops the quote
//!   characters and turns `""` inside quotes into a literal `"`.
//! - [`SplitStrategy::BalancedQuotes`] splits on a delimiter only when the
//!   rest of the line holds an even number of quotes, keeping quotes in the
//!   field for later cleanup.
//! - [`SplitStrategy::Plain`] splits on every delimiter.
//!
//! None of the strategies fail: unbalanced quotes are tolerated and the scan
//! simply ends in whatever quote state it reached.

/// How a line is split into fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitStrategy {
    /// Quote-aware scan with `""` escapes
    Quoted,
    /// Split only where the remainder of the line has balanced quotes
    BalancedQuotes,
    /// Split on every delimiter
    Plain,
}

/// Line tokenizer for one delimiter and strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    pub delimiter: char,
    pub strategy: SplitStrategy,
}

impl Tokenizer {
    pub fn new(delimiter: char, strategy: SplitStrategy) -> Self {
        Self {
            delimiter,
            strategy,
        }
    }

    /// Split a line into fields
    pub fn split(&self, line: &str) -> Vec<String> {
        match self.strategy {
            SplitStrategy::Quoted => tokenize(line, self.delimiter),
            SplitStrategy::BalancedQuotes => split_balanced(line, self.delimiter),
            SplitStrategy::Plain => line.split(self.delimiter).map(str::to_string).collect(),
        }
    }
}

/// Quote-aware split of one line
///
/// A `"` toggles quoting unless it is immediately followed by another `"`
/// while already inside quotes, which emits a literal `"`. The delimiter only
/// separates fields outside quotes, and the last field is always emitted.
pub fn tokenize(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                current.push('"');
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
        } else if c == delimiter && !in_quotes {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }

    fields.push(current);
    fields
}

/// Split on delimiters followed by an even number of quotes
///
/// Equivalent to splitting on `,(?=(?:(?:[^"]*"){2})*[^"]*$)` for a comma
/// delimiter. Quote characters stay in the fields.
pub fn split_balanced(line: &str, delimiter: char) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();

    // quotes_after[i] = number of quotes strictly after position i
    let mut quotes_after = vec![0usize; chars.len()];
    let mut seen = 0;
    for (i, c) in chars.iter().enumerate().rev() {
        quotes_after[i] = seen;
        if *c == '"' {
            seen += 1;
        }
    }

    let mut fields = Vec::new();
    let mut current = String::new();
    for (i, c) in chars.iter().enumerate() {
        if *c == delimiter && quotes_after[i] % 2 == 0 {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(*c);
        }
    }

    fields.push(current);
    fields
}

/// Pick the delimiter for a sheet from its header line
///
/// Tab wins if present, then comma; tab is the fallback.
pub fn detect_delimiter(header_line: &str) -> char {
    if header_line.contains('\t') {
        '\t'
    } else if header_line.contains(',') {
        ','
    } else {
        '\t'
    }
}

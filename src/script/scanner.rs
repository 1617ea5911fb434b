//! Splits build script source into blocks and statements
//!
//! Handles:
//! - Block headers (`dependencies {`) and closing braces
//! - One-line blocks: `repositories { mavenCentral() }`
//! - `;` separated statements
//! - `//` and `/* */` comments outside string literals
//! - Calls spanning several lines inside parentheses

use crate::error::SchemaError;

/// A structural item of a build script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// Start of a block; `header` is the text before `{`
    Open { header: String, line: usize },
    /// End of the innermost block
    Close { line: usize },
    /// A statement within the current block
    Statement { text: String, line: usize },
}

impl Item {
    /// Returns the 1-based line this item starts on
    pub fn line(&self) -> usize {
        match self {
            Item::Open { line, .. } | Item::Close { line } | Item::Statement { line, .. } => *line,
        }
    }
}

/// Pending statement text and the line it started on
#[derive(Default)]
struct Buffer {
    text: String,
    line: Option<usize>,
}

impl Buffer {
    fn push(&mut self, c: char, line: usize) {
        if self.line.is_none() && !c.is_whitespace() {
            self.line = Some(line);
        }
        if self.line.is_some() {
            self.text.push(c);
        }
    }

    fn take(&mut self, fallback_line: usize) -> Option<(String, usize)> {
        let text = self.text.trim().to_string();
        let line = self.line.unwrap_or(fallback_line);
        self.text.clear();
        self.line = None;
        if text.is_empty() {
            None
        } else {
            Some((text, line))
        }
    }
}

/// Scan build script source into a flat list of items
pub fn scan(content: &str) -> Result<Vec<Item>, SchemaError> {
    let mut items = Vec::new();
    let mut buffer = Buffer::default();
    let mut open_braces: Vec<usize> = Vec::new();
    let mut paren_depth = 0usize;
    // Line a still-open `/*` comment started on
    let mut block_comment: Option<usize> = None;

    for (line_idx, line) in content.lines().enumerate() {
        let line_number = line_idx + 1;
        let mut quote: Option<char> = None;
        let mut chars = line.chars().peekable();

        while let Some(c) = chars.next() {
            if block_comment.is_some() {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    block_comment = None;
                }
                continue;
            }

            if let Some(q) = quote {
                buffer.push(c, line_number);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        buffer.push(escaped, line_number);
                    }
                } else if c == q {
                    quote = None;
                }
                continue;
            }

            match c {
                '"' | '\'' => {
                    quote = Some(c);
                    buffer.push(c, line_number);
                }
                '/' if chars.peek() == Some(&'/') => break,
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    block_comment = Some(line_number);
                }
                '(' => {
                    paren_depth += 1;
                    buffer.push(c, line_number);
                }
                ')' => {
                    paren_depth = paren_depth.saturating_sub(1);
                    buffer.push(c, line_number);
                }
                _ if paren_depth > 0 => buffer.push(c, line_number),
                '{' => {
                    let (header, line) = buffer
                        .take(line_number)
                        .unwrap_or_else(|| (String::new(), line_number));
                    open_braces.push(line);
                    items.push(Item::Open { header, line });
                }
                '}' => {
                    if let Some((text, line)) = buffer.take(line_number) {
                        items.push(Item::Statement { text, line });
                    }
                    if open_braces.pop().is_none() {
                        return Err(SchemaError::UnbalancedBraces.at(line_number));
                    }
                    items.push(Item::Close { line: line_number });
                }
                ';' => {
                    if let Some((text, line)) = buffer.take(line_number) {
                        items.push(Item::Statement { text, line });
                    }
                }
                _ => buffer.push(c, line_number),
            }
        }

        if quote.is_some() {
            return Err(SchemaError::UnterminatedString.at(line_number));
        }

        if paren_depth > 0 {
            buffer.push(' ', line_number);
        } else if let Some((text, line)) = buffer.take(line_number) {
            items.push(Item::Statement { text, line });
        }
    }

    if let Some(line) = block_comment {
        return Err(SchemaError::UnterminatedComment.at(line));
    }

    let last_line = content.lines().count().max(1);
    if let Some((text, line)) = buffer.take(last_line) {
        items.push(Item::Statement { text, line });
    }

    if let Some(line) = open_braces.pop() {
        return Err(SchemaError::UnbalancedBraces.at(line));
    }

    Ok(items)
}

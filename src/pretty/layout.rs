//! Line-breaking layout for formula dumps.
//!
//! Formulas are fully parenthesized prefix expressions. A span stays on one line unless it
//! is wider than [`PrettyOpts::max_per_line`] and splitting it saves more than
//! [`PrettyOpts::split_gain`] columns over its widest child. A split span keeps its first
//! child next to the opening parenthesis and puts every other child on its own line:
//!
//! ```text
//! (let
//!   ((a_1 (* @ 2.))
//!    (b_1 (sin @)))
//!   (+ a_1 b_1))
//! ```
//!
//! Arguments of a call are indented by two columns; the elements of a list whose first
//! element is itself a list are aligned under that first element.

/// Thresholds of the pretty-printer.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PrettyOpts {
    /// Width above which a span is considered for splitting.
    pub max_per_line: usize,
    /// Minimum number of columns a split must save.
    pub split_gain: usize,
}

impl Default for PrettyOpts {
    fn default() -> Self {
        Self {
            max_per_line: 30,
            split_gain: 10,
        }
    }
}

struct Token<'a> {
    text: &'a str,
    /// Number of tokens up to and including the matching `)` for an opening token, else 1.
    span: usize,
    /// Single-line width, `None` when rendered over several lines.
    width: Option<usize>,
}

impl<'a> Token<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            span: 1,
            width: None,
        }
    }
}

/// Split `text` into words and parentheses. Returns `None` on unbalanced parentheses or an
/// unterminated string literal.
fn tokenize(text: &str) -> Option<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut open = Vec::new();
    let mut start: Option<usize> = None;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '(' | ')' => {
                if let Some(s) = start.take() {
                    tokens.push(Token::new(&text[s..i]));
                }
                if c == '(' {
                    open.push(tokens.len());
                } else {
                    let s = open.pop()?;
                    tokens[s].span = tokens.len() - s + 1;
                }
                tokens.push(Token::new(&text[i..i + 1]));
            }
            c if c.is_ascii_whitespace() => {
                if let Some(s) = start.take() {
                    tokens.push(Token::new(&text[s..i]));
                }
            }
            c => {
                start.get_or_insert(i);
                if c == '"' {
                    in_string = true;
                }
            }
        }
    }

    if in_string || !open.is_empty() {
        return None;
    }
    if let Some(s) = start {
        tokens.push(Token::new(&text[s..]));
    }
    Some(tokens)
}

/// Compute the single-line width of the span at `pos` and of everything below it.
fn measure(tokens: &mut [Token<'_>], pos: usize, opts: &PrettyOpts) {
    let span = tokens[pos].span;
    if span == 1 {
        tokens[pos].width = Some(tokens[pos].text.chars().count());
        return;
    }

    let mut width = Some(2);
    let mut widest = 0;
    let mut count = 0;
    let mut offset = 1;
    while offset < span - 1 {
        let child = pos + offset;
        measure(tokens, child, opts);
        width = match (width, tokens[child].width) {
            (Some(w), Some(c)) => {
                widest = widest.max(c);
                Some(w + c + usize::from(count > 0))
            }
            _ => None,
        };
        count += 1;
        offset += tokens[child].span;
    }

    let worth_splitting = |w: usize| w > opts.max_per_line && w - widest > opts.split_gain;
    if count > 1 && width.is_some_and(worth_splitting) {
        width = None;
    }
    tokens[pos].width = width;
}

/// Render the span at `pos`, which starts at `column`.
fn render(out: &mut String, tokens: &[Token<'_>], pos: usize, column: usize) {
    let token = &tokens[pos];
    if token.span == 1 {
        out.push_str(token.text);
        return;
    }
    let end = pos + token.span - 1;

    out.push('(');
    if token.width.is_some() {
        for i in pos + 1..end {
            if tokens[i - 1].text != "(" && tokens[i].text != ")" {
                out.push(' ');
            }
            out.push_str(tokens[i].text);
        }
    } else {
        let first = pos + 1;
        let indent = if tokens[first].span > 1 {
            column + 1
        } else {
            column + 2
        };
        render(out, tokens, first, column + 1);
        let mut child = first + tokens[first].span;
        while child < end {
            out.push('\n');
            out.extend(std::iter::repeat_n(' ', indent));
            render(out, tokens, child, indent);
            child += tokens[child].span;
        }
    }
    out.push(')');
}

/// Pretty-print a formula with the default options.
pub fn pretty(text: &str) -> String {
    pretty_with(text, &PrettyOpts::default())
}

/// Pretty-print a formula.
///
/// Input that is not a single balanced expression is returned unchanged.
pub fn pretty_with(text: &str, opts: &PrettyOpts) -> String {
    let Some(mut tokens) = tokenize(text) else {
        tracing::debug!(len = text.len(), "unbalanced formula left as is");
        return text.to_owned();
    };
    if tokens.is_empty() {
        return String::new();
    }
    if tokens[0].span != tokens.len() {
        tracing::debug!(len = text.len(), "formula is not a single expression, left as is");
        return text.to_owned();
    }

    measure(&mut tokens, 0, opts);
    let mut out = String::with_capacity(text.len());
    render(&mut out, &tokens, 0, 0);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/pretty/layout.rs"]
mod tests;

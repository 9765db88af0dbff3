//! Splitting a command line into name and arguments.

use super::COMMAND_MARKER;

/// Split a trimmed line into `(name, rest)` when it starts with the
/// command marker. The name keeps its marker.
pub fn split_command(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if !line.starts_with(COMMAND_MARKER) {
        return None;
    }
    match line.find(char::is_whitespace) {
        Some(idx) => Some((&line[..idx], line[idx..].trim())),
        None => Some((line, "")),
    }
}

/// Split an argument string on whitespace.
///
/// Quoted segments (`"`, `'`, `` ` ``) and bracketed segments (`[]`, `{}`,
/// `()`) stay in one token with their delimiters, so a literal such as
/// `{a: 1, b: 'x y'}` is a single argument. An unterminated quote runs to
/// the end of the input.
pub fn tokenize(input: &str) -> Vec<String> {
    token_spans(input)
        .into_iter()
        .map(|(start, end)| input[start..end].to_string())
        .collect()
}

/// The first `leading` tokens, then everything after them as one final
/// argument (trimmed, internal whitespace kept).
pub fn split_leading(input: &str, leading: usize) -> Vec<String> {
    let spans = token_spans(input);
    let mut args: Vec<String> = spans
        .iter()
        .take(leading)
        .map(|&(start, end)| input[start..end].to_string())
        .collect();

    if let Some(&(start, _)) = spans.get(leading) {
        args.push(input[start..].trim_end().to_string());
    }
    args
}

/// Byte ranges of the tokens of `input`
fn token_spans(input: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    let mut quote: Option<char> = None;
    let mut depth: usize = 0;
    let mut escaped = false;

    for (idx, c) in input.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' && q != '`' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        if c.is_whitespace() && depth == 0 {
            if let Some(begin) = start.take() {
                spans.push((begin, idx));
            }
            continue;
        }

        start.get_or_insert(idx);
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '[' | '{' | '(' => depth += 1,
            ']' | '}' | ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    if let Some(begin) = start {
        spans.push((begin, input.len()));
    }
    spans
}

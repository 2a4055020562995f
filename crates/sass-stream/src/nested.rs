//! The "nested" CSS layout, rendered from grass's expanded output.
//!
//! Nested output differs from expanded output in two ways: a closing brace
//! goes at the end of the last line of its block, and three-digit hex colors
//! in declaration values are written out in full (`#333` becomes `#333333`).
//!
//! ```text
//! body {                         body {
//!   color: #333;          =>       color: #333333; }
//! }
//! ```

/// Re-lay expanded CSS in the nested style.
pub(crate) fn nest(expanded: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    for line in expanded.lines() {
        if line.trim() == "}" {
            match lines.iter_mut().rev().find(|l| !l.trim().is_empty()) {
                Some(last) => last.push_str(" }"),
                None => lines.push(line.to_string()),
            }
        } else if is_declaration(line) {
            lines.push(expand_short_hex(line));
        } else {
            lines.push(line.to_string());
        }
    }

    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn is_declaration(line: &str) -> bool {
    let line = line.trim();
    !line.starts_with('@') && !line.starts_with("/*") && line.ends_with(';') && line.contains(':')
}

/// Double every digit of `#rgb` colors in the value part of a declaration.
fn expand_short_hex(line: &str) -> String {
    let Some(colon) = line.find(':') else {
        return line.to_string();
    };

    let mut out = String::with_capacity(line.len() + 8);
    let mut copied = 0;
    let mut i = colon;
    while let Some(offset) = line[i..].find('#') {
        let hash = i + offset;
        let digits = line[hash + 1..]
            .bytes()
            .take_while(u8::is_ascii_hexdigit)
            .count();
        let end = hash + 1 + digits;
        let at_boundary = line[end..]
            .chars()
            .next()
            .is_none_or(|c| !(c.is_alphanumeric() || c == '-' || c == '_'));
        let in_string = line[colon..hash].matches('"').count() % 2 == 1
            || line[colon..hash].matches('\'').count() % 2 == 1;

        if digits == 3 && at_boundary && !in_string {
            out.push_str(&line[copied..=hash]);
            for c in line[hash + 1..end].chars() {
                out.push(c);
                out.push(c);
            }
            copied = end;
        }
        i = end;
    }
    out.push_str(&line[copied..]);
    out
}

//! Quote-aware statement reconstruction.
//!
//! Single left-to-right pass over the raw parameterized SQL: `?` markers
//! outside quoted literals are spliced with their bound literal text,
//! whitespace runs outside quotes collapse to one space, and quoted
//! content is copied through byte-for-byte.

/// Substitute placeholders and collapse whitespace in one forward pass.
///
/// `literals` are consumed left to right, one per `?` marker outside a
/// single-quoted literal. Spliced text is never re-scanned. A quote toggles
/// the in-quote state unless immediately preceded by a backslash; the first
/// character of the template is never treated as escaped. If the template
/// has more markers than literals, surplus markers copy through unchanged
/// rather than aborting the caller's log line.
pub fn reconstruct(literals: &[String], raw_sql: &str) -> String {
    let spliced: usize = literals.iter().map(String::len).sum();
    let mut out = String::with_capacity(raw_sql.len() + spliced);
    let mut pending = literals.iter();
    let mut in_quotes = false;
    let mut prev: Option<char> = None;
    let mut chars = raw_sql.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\'' && prev != Some('\\') {
            in_quotes = !in_quotes;
            out.push(c);
            prev = Some(c);
            continue;
        }
        if in_quotes {
            out.push(c);
            prev = Some(c);
            continue;
        }
        match c {
            '?' => match pending.next() {
                Some(literal) => out.push_str(literal),
                None => out.push('?'),
            },
            ' ' | '\t' | '\r' | '\n' => {
                out.push(' ');
                while matches!(chars.peek(), Some(&(' ' | '\t' | '\r' | '\n'))) {
                    chars.next();
                }
            }
            _ => out.push(c),
        }
        prev = Some(c);
    }

    out
}

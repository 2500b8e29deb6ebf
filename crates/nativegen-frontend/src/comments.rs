//! Comment removal.

/// Blank out every `//` line comment and `/* */` block comment.
///
/// Each comment byte becomes a space and newlines are kept, so every byte
/// offset into the result is also an offset into `text`. An unterminated
/// block comment is left untouched.
pub fn strip_comments(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;

    while i + 1 < bytes.len() {
        if bytes[i] != b'/' {
            i += 1;
            continue;
        }
        let end = match bytes[i + 1] {
            b'/' => text[i..].find('\n').map_or(text.len(), |n| i + n),
            b'*' => match text[i + 2..].find("*/") {
                Some(close) => i + 2 + close + 2,
                None => break,
            },
            _ => {
                i += 1;
                continue;
            }
        };
        out.push_str(&text[copied..i]);
        blank(&text[i..end], &mut out);
        copied = end;
        i = end;
    }

    out.push_str(&text[copied..]);
    out
}

fn blank(comment: &str, out: &mut String) {
    for c in comment.chars() {
        if c == '\n' {
            out.push('\n');
        } else {
            out.extend(std::iter::repeat(' ').take(c.len_utf8()));
        }
    }
}

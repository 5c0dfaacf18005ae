/// Calculates the 1-based line and column number for a given byte position in the source text.
/// This function is designed to be called only when a diagnostic is produced, as it iterates
/// through the source text to determine the position.
pub fn get_line_and_column(source: &str, position: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for (i, c) in source.char_indices() {
        if i >= position {
            break;
        }
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

/// Finds the byte position of the `}` balancing the `{` at `start_pos`, counting
/// depth over the raw text while skipping braces inside quoted strings. Both
/// quote styles are tracked; backslash escapes only apply inside double quotes,
/// single-quoted strings are taken literally.
/// Returns `None` when `start_pos` is not an opening brace or no balancing close
/// exists before end of text (malformed or truncated input).
pub fn find_balanced_brace(text: &str, start_pos: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if start_pos >= bytes.len() || bytes[start_pos] != b'{' {
        return None;
    }
    let mut depth = 0usize;
    let mut in_string: Option<u8> = None;
    let mut prev = 0u8;
    for (i, &byte) in bytes.iter().enumerate().skip(start_pos) {
        match in_string {
            Some(b'"') if byte == b'"' && prev != b'\\' => in_string = None,
            Some(b'\'') if byte == b'\'' => in_string = None,
            None if byte == b'"' || byte == b'\'' => in_string = Some(byte),
            _ => {}
        }
        if in_string.is_none() {
            match byte {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        prev = byte;
    }
    None
}

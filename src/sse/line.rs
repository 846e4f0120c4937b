//! Classification of a single event-stream line.
//!
//! Lines are handled as opaque bytes: only `:` and the single space after
//! it are significant. A trailing `\r` is kept as part of the value.

/// Field names the decoder acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldName {
    Event,
    Data,
    Id,
    Retry,
    /// Any other name, ignored by the decoder
    Unknown,
}

impl FieldName {
    fn from_bytes(name: &[u8]) -> Self {
        match name {
            b"event" => FieldName::Event,
            b"data" => FieldName::Data,
            b"id" => FieldName::Id,
            b"retry" => FieldName::Retry,
            _ => FieldName::Unknown,
        }
    }
}

/// A parsed line, borrowing its value from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SseLine<'a> {
    /// Empty line, the dispatch boundary
    Blank,
    /// Line starting with `:`
    Comment,
    /// `name[: value]`
    Field { name: FieldName, value: &'a [u8] },
}

const DELIMITER: u8 = b':';

/// Parse one line with its `\n` terminator already removed.
///
/// The name is everything before the first `:`; the value is everything
/// after it, minus at most one leading space. A line without `:` is a
/// field with an empty value.
pub fn parse_line(line: &[u8]) -> SseLine<'_> {
    if line.is_empty() {
        return SseLine::Blank;
    }
    if line[0] == DELIMITER {
        return SseLine::Comment;
    }

    let (name, value) = match line.iter().position(|&b| b == DELIMITER) {
        Some(pos) => {
            let value = &line[pos + 1..];
            (&line[..pos], value.strip_prefix(b" ").unwrap_or(value))
        }
        None => (line, &line[line.len()..]),
    };

    SseLine::Field {
        name: FieldName::from_bytes(name),
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: FieldName, value: &[u8]) -> SseLine<'_> {
        SseLine::Field { name, value }
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(parse_line(b""), SseLine::Blank);
    }

    #[test]
    fn test_parse_comment_line() {
        assert_eq!(parse_line(b": keep-alive"), SseLine::Comment);
        assert_eq!(parse_line(b":"), SseLine::Comment);
        assert_eq!(parse_line(b":data: not a field"), SseLine::Comment);
    }

    #[test]
    fn test_parse_field_with_space() {
        assert_eq!(parse_line(b"data: hello"), field(FieldName::Data, b"hello"));
        assert_eq!(parse_line(b"event: ping"), field(FieldName::Event, b"ping"));
    }

    #[test]
    fn test_parse_field_without_space() {
        assert_eq!(parse_line(b"data:hello"), field(FieldName::Data, b"hello"));
        assert_eq!(parse_line(b"id:7"), field(FieldName::Id, b"7"));
    }

    #[test]
    fn test_only_one_leading_space_is_stripped() {
        assert_eq!(
            parse_line(b"data:  two spaces"),
            field(FieldName::Data, b" two spaces")
        );
        assert_eq!(parse_line(b"data: trailing "), field(FieldName::Data, b"trailing "));
    }

    #[test]
    fn test_extra_delimiters_belong_to_value() {
        assert_eq!(
            parse_line(b"data: a:b: c"),
            field(FieldName::Data, b"a:b: c")
        );
    }

    #[test]
    fn test_bare_field_name_has_empty_value() {
        assert_eq!(parse_line(b"data"), field(FieldName::Data, b""));
        assert_eq!(parse_line(b"id"), field(FieldName::Id, b""));
        assert_eq!(parse_line(b"data:"), field(FieldName::Data, b""));
        assert_eq!(parse_line(b"data: "), field(FieldName::Data, b""));
    }

    #[test]
    fn test_unknown_field_names() {
        assert_eq!(parse_line(b"foo: bar"), field(FieldName::Unknown, b"bar"));
        assert_eq!(parse_line(b"Data: x"), field(FieldName::Unknown, b"x"));
        assert_eq!(parse_line(b"\r"), field(FieldName::Unknown, b""));
    }

    #[test]
    fn test_carriage_return_is_opaque() {
        assert_eq!(parse_line(b"data: x\r"), field(FieldName::Data, b"x\r"));
    }
}

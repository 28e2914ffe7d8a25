//! Delimited-text parsing for the two input files.
//!
//! Both sources are read whole, decoded by encoding label (with `auto`
//! detection via chardet), and split into lines before field splitting.
//! No streaming: these files are small by contract.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use encoding_rs::Encoding;

use crate::error::{ParseError, ParseResult, ReadError, ReadResult};
use crate::models::{ColumnLayout, DataColumns};

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the given encoding label.
///
/// `auto` detects the encoding from the bytes first. Decoding is strict:
/// bytes that are invalid in the resolved encoding are an error, not
/// replacement characters.
pub fn decode_content(bytes: &[u8], encoding: &str) -> ReadResult<String> {
    let label = match encoding.to_lowercase().as_str() {
        "auto" => detect_encoding(bytes),
        other => other.to_string(),
    };

    let resolved = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| ReadError::UnknownEncoding(label.clone()))?;

    let (text, _, had_errors) = resolved.decode(bytes);
    if had_errors {
        return Err(ReadError::Decode(resolved.name().to_string()));
    }
    Ok(text.into_owned())
}

/// Read a whole file as text and split it into lines in file order.
///
/// Line terminators are stripped. An empty file yields an empty vector.
pub fn read_lines<P: AsRef<Path>>(path: P, encoding: &str) -> ReadResult<Vec<String>> {
    let bytes = fs::read(path.as_ref())?;
    let content = decode_content(&bytes, encoding)?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Parse the column-definition file into a [`ColumnLayout`].
///
/// Each line is `<index><separator><name>`. The first field must parse as
/// an integer; the second field is the column name; any further fields are
/// ignored. Duplicate indices overwrite, last write wins.
///
/// # Example
/// ```ignore
/// let layout = parse_columns("data/source/SOURCECOLUMNS.txt", "utf-8", '|')?;
/// assert_eq!(layout.names.get(&2).map(String::as_str), Some("FIRSTNAME"));
/// ```
pub fn parse_columns<P: AsRef<Path>>(
    path: P,
    encoding: &str,
    separator: char,
) -> ParseResult<ColumnLayout> {
    let lines = read_lines(path, encoding)?;

    let mut names = BTreeMap::new();
    let mut declared_count = 0;

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let mut fields = line.split(separator);

        let index = fields
            .next()
            .and_then(|field| field.parse::<usize>().ok())
            .ok_or(ParseError::MissingIndex { line: line_no })?;
        let name = fields
            .next()
            .ok_or(ParseError::MissingName { line: line_no })?;

        names.insert(index, name.to_string());
        declared_count += 1;
    }

    Ok(ColumnLayout {
        names,
        declared_count,
    })
}

/// Parse the data file into [`DataColumns`].
///
/// Each line is split into cells and cell `i` is appended to column `i + 1`.
/// Lines with differing cell counts produce ragged columns; that is not an
/// error here, the join reports it when a short column is referenced.
pub fn parse_data<P: AsRef<Path>>(
    path: P,
    encoding: &str,
    separator: char,
) -> ReadResult<DataColumns> {
    let lines = read_lines(path, encoding)?;

    let mut values: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    let mut row_count = 0;

    for line in &lines {
        for (i, cell) in line.split(separator).enumerate() {
            values.entry(i + 1).or_default().push(cell.to_string());
        }
        row_count += 1;
    }

    Ok(DataColumns { values, row_count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_parse_columns() {
        let file = write_temp(b"1|id\n2|name\n3|age\n");
        let layout = parse_columns(file.path(), "utf-8", '|').unwrap();

        assert_eq!(layout.declared_count, 3);
        assert_eq!(layout.names.get(&1).map(String::as_str), Some("id"));
        assert_eq!(layout.names.get(&2).map(String::as_str), Some("name"));
        assert_eq!(layout.names.get(&3).map(String::as_str), Some("age"));
    }

    #[test]
    fn test_parse_columns_duplicate_index_last_wins() {
        let file = write_temp(b"1|id\n2|name\n2|nickname\n");
        let layout = parse_columns(file.path(), "utf-8", '|').unwrap();

        assert_eq!(layout.names.get(&2).map(String::as_str), Some("nickname"));
        // The line counter still counts every line, duplicates included.
        assert_eq!(layout.declared_count, 3);
        assert_eq!(layout.names.len(), 2);
    }

    #[test]
    fn test_parse_columns_non_integer_index() {
        let file = write_temp(b"one|id\n");
        let err = parse_columns(file.path(), "utf-8", '|').unwrap_err();
        assert!(matches!(err, ParseError::MissingIndex { line: 1 }));
    }

    #[test]
    fn test_parse_columns_missing_name() {
        let file = write_temp(b"1|id\n2\n");
        let err = parse_columns(file.path(), "utf-8", '|').unwrap_err();
        assert!(matches!(err, ParseError::MissingName { line: 2 }));
    }

    #[test]
    fn test_parse_columns_idempotent() {
        let file = write_temp(b"1|id\n2|name\n3|age\n");
        let first = parse_columns(file.path(), "utf-8", '|').unwrap();
        let second = parse_columns(file.path(), "utf-8", '|').unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_data() {
        let file = write_temp(b"A1|Alice|30\nA2|Bob|25\n");
        let data = parse_data(file.path(), "utf-8", '|').unwrap();

        assert_eq!(data.row_count, 2);
        assert_eq!(data.values[&1], vec!["A1", "A2"]);
        assert_eq!(data.values[&2], vec!["Alice", "Bob"]);
        assert_eq!(data.values[&3], vec!["30", "25"]);
        assert_eq!(data.data_length(), 2);
    }

    #[test]
    fn test_parse_data_empty_file() {
        let file = write_temp(b"");
        let data = parse_data(file.path(), "utf-8", '|').unwrap();

        assert_eq!(data.row_count, 0);
        assert!(data.values.is_empty());
        assert_eq!(data.data_length(), 0);
    }

    #[test]
    fn test_parse_data_ragged_rows_kept() {
        let file = write_temp(b"A1|Alice|30\nA2|Bob\n");
        let data = parse_data(file.path(), "utf-8", '|').unwrap();

        assert_eq!(data.row_count, 2);
        assert_eq!(data.values[&3], vec!["30"]);
    }

    #[test]
    fn test_decode_latin1() {
        // 0xE9 is 'é' in ISO-8859-1 but invalid UTF-8.
        let decoded = decode_content(&[0x63, 0x61, 0x66, 0xE9], "iso-8859-1").unwrap();
        assert_eq!(decoded, "café");
    }

    #[test]
    fn test_decode_invalid_utf8_is_error() {
        let err = decode_content(&[0x63, 0xE9], "utf-8").unwrap_err();
        assert!(matches!(err, ReadError::Decode(_)));
    }

    #[test]
    fn test_unknown_encoding_label() {
        let err = decode_content(b"abc", "utf-99").unwrap_err();
        assert!(matches!(err, ReadError::UnknownEncoding(_)));
    }

    #[test]
    fn test_detect_encoding_utf8() {
        assert_eq!(detect_encoding("plain ascii".as_bytes()), "utf-8");
    }

    #[test]
    fn test_read_lines_missing_file() {
        let err = read_lines("/nonexistent/SOURCEDATA.txt", "utf-8").unwrap_err();
        assert!(matches!(err, ReadError::Io(_)));
    }
}

//! Parser for `nm -S -l --radix=d` style lines.
//!
//! A line is `<address> <size> <kind> <info>`, where `info` is the symbol
//! name optionally followed by a tab and a `file:line` suffix.

use crate::error::{ParseErrorKind, SizeError};
use crate::model::{Entity, Symbol};

/// Directory marker stripped from source paths unless configured otherwise.
pub const DEFAULT_PATH_ROOT: &str = "zephyr/";

/// Turns extractor lines into [`Symbol`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineParser {
    /// Everything up to and including the last occurrence of this marker is
    /// dropped from source paths.
    path_root: Option<String>,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::with_path_root(Some(DEFAULT_PATH_ROOT))
    }
}

impl LineParser {
    /// Build a parser that shortens paths by stripping through `path_root`.
    ///
    /// `None` or an empty marker keeps file paths verbatim.
    pub fn with_path_root(path_root: Option<&str>) -> Self {
        let path_root = path_root.filter(|root| !root.is_empty()).map(str::to_string);
        Self { path_root }
    }

    /// Parse one line. `line_no` is only used for error reporting.
    pub fn parse_line(&self, line_no: usize, line: &str) -> Result<Symbol, SizeError> {
        self.parse_fields(line).map_err(|reason| SizeError::Parse {
            line_no,
            line: line.to_string(),
            reason,
        })
    }

    /// Parse a whole extractor listing into a name-sorted [`Entity`].
    ///
    /// A trailing newline does not produce an empty record; any other empty
    /// line is malformed.
    pub fn parse_listing(&self, label: &str, listing: &str) -> Result<Entity, SizeError> {
        let symbols = listing
            .lines()
            .enumerate()
            .map(|(idx, line)| self.parse_line(idx + 1, line))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Entity::new(label, symbols))
    }

    fn parse_fields(&self, line: &str) -> Result<Symbol, ParseErrorKind> {
        let mut fields = line.splitn(4, ' ');
        let (Some(address), Some(size), Some(kind), Some(info)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(ParseErrorKind::MissingFields);
        };

        let address = parse_unsigned(address).ok_or(ParseErrorKind::BadAddress)?;
        let size = parse_unsigned(size).ok_or(ParseErrorKind::BadSize)?;
        let mut kind_chars = kind.chars();
        let kind = match (kind_chars.next(), kind_chars.next()) {
            (Some(c), None) => c,
            _ => return Err(ParseErrorKind::BadKind),
        };

        let (name, file, line) = self.parse_info(info)?;
        Ok(Symbol { address, size, kind, name, file, line })
    }

    fn parse_info(&self, info: &str) -> Result<(String, String, i64), ParseErrorKind> {
        let parts: Vec<&str> = info.split('\t').collect();
        match parts.as_slice() {
            [name] => Ok((name.to_string(), String::new(), 0)),
            [name, location] => {
                let (file, line) = match location.split(':').collect::<Vec<_>>().as_slice() {
                    [file, line] => (*file, *line),
                    _ => return Err(ParseErrorKind::BadFileLine),
                };
                let line = line.parse::<i64>().map_err(|_| ParseErrorKind::BadLineNumber)?;
                Ok((name.to_string(), self.shorten_path(file), line))
            }
            _ => Err(ParseErrorKind::TooManyTabs),
        }
    }

    fn shorten_path(&self, file: &str) -> String {
        let Some(root) = self.path_root.as_deref() else {
            return file.to_string();
        };
        match file.rfind(root) {
            Some(offset) => file[offset + root.len()..].to_string(),
            None => file.to_string(),
        }
    }
}

/// Plain decimal digits only; `str::parse` alone would also take a leading `+`.
fn parse_unsigned(text: &str) -> Option<u64> {
    if text.starts_with('+') {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Symbol, SizeError> {
        LineParser::default().parse_line(1, line)
    }

    fn reason(line: &str) -> ParseErrorKind {
        match parse(line) {
            Err(SizeError::Parse { reason, .. }) => reason,
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn parses_symbol_with_file_and_line() {
        let sym = parse("100 200 t main\tpath/to/zephyr/src/foo.c:42").unwrap();
        assert_eq!(sym.address, 100);
        assert_eq!(sym.size, 200);
        assert_eq!(sym.kind, 't');
        assert_eq!(sym.name, "main");
        assert_eq!(sym.file, "src/foo.c");
        assert_eq!(sym.line, 42);
    }

    #[test]
    fn name_without_location_leaves_file_empty() {
        let sym = parse("536870912 4 B z_idle_threads").unwrap();
        assert_eq!(sym.name, "z_idle_threads");
        assert_eq!(sym.file, "");
        assert_eq!(sym.line, 0);
    }

    #[test]
    fn spaces_inside_the_name_survive() {
        let sym = parse("1 2 T operator new(unsigned int)").unwrap();
        assert_eq!(sym.name, "operator new(unsigned int)");
    }

    #[test]
    fn strips_through_last_root_marker() {
        let sym = parse("1 2 T f\t/a/zephyr/b/zephyr/kernel/sched.c:7").unwrap();
        assert_eq!(sym.file, "kernel/sched.c");
    }

    #[test]
    fn path_without_marker_is_kept() {
        let sym = parse("1 2 T f\t/opt/lib/libc.c:7").unwrap();
        assert_eq!(sym.file, "/opt/lib/libc.c");
    }

    #[test]
    fn custom_and_disabled_roots() {
        let custom = LineParser::with_path_root(Some("nrf/"));
        let sym = custom.parse_line(1, "1 2 T f\t/ws/nrf/lib/x.c:3").unwrap();
        assert_eq!(sym.file, "lib/x.c");

        let verbatim = LineParser::with_path_root(None);
        let sym = verbatim.parse_line(1, "1 2 T f\t/ws/zephyr/x.c:3").unwrap();
        assert_eq!(sym.file, "/ws/zephyr/x.c");

        let empty = LineParser::with_path_root(Some(""));
        let sym = empty.parse_line(1, "1 2 T f\t/ws/zephyr/x.c:3").unwrap();
        assert_eq!(sym.file, "/ws/zephyr/x.c");
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert_eq!(reason("100 200 t"), ParseErrorKind::MissingFields);
        assert_eq!(reason(""), ParseErrorKind::MissingFields);
        assert_eq!(reason("0x10 200 t main"), ParseErrorKind::BadAddress);
        assert_eq!(reason("100 -5 t main"), ParseErrorKind::BadSize);
        assert_eq!(reason("+100 5 t main"), ParseErrorKind::BadAddress);
        assert_eq!(reason("100 +5 t main"), ParseErrorKind::BadSize);
        assert_eq!(reason("100 5 tt main"), ParseErrorKind::BadKind);
        assert_eq!(reason("100 5 t main\ta.c:1\textra"), ParseErrorKind::TooManyTabs);
        assert_eq!(reason("100 5 t main\ta.c"), ParseErrorKind::BadFileLine);
        assert_eq!(reason("100 5 t main\tC:/a.c:1"), ParseErrorKind::BadFileLine);
        assert_eq!(reason("100 5 t main\ta.c:x"), ParseErrorKind::BadLineNumber);
    }

    #[test]
    fn line_number_may_carry_a_sign() {
        let sym = parse("1 2 T f\ta.c:+42").unwrap();
        assert_eq!(sym.line, 42);
    }

    #[test]
    fn parse_error_carries_line_number_and_text() {
        let err = LineParser::default().parse_line(17, "bogus").unwrap_err();
        match err {
            SizeError::Parse { line_no, line, .. } => {
                assert_eq!(line_no, 17);
                assert_eq!(line, "bogus");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn listing_skips_trailing_newline_and_sorts() {
        let listing = "1 8 T zeta\n2 4 T alpha\n";
        let ent = LineParser::default().parse_listing("fw.elf", listing).unwrap();
        assert_eq!(ent.len(), 2);
        assert_eq!(ent.symbols()[0].name, "alpha");
        assert_eq!(ent.label, "fw.elf");
    }

    #[test]
    fn listing_reports_one_based_line_of_first_bad_record() {
        let listing = "1 8 T ok\n\n2 4 T alpha\n";
        match LineParser::default().parse_listing("fw.elf", listing) {
            Err(SizeError::Parse { line_no, .. }) => assert_eq!(line_no, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}

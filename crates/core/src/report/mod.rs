//! Rendering of single-binary size reports and two-binary delta reports.
//!
//! Text output uses fixed six-column numbers. A size that does not exist on
//! one side is rendered as blank padding, never as `0`.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::diff::{Change, DeltaReport};
use crate::model::{Entity, Symbol};

/// Section kinds shown by the single-binary report: read-only data and code.
pub const DEFAULT_REPORT_KINDS: [char; 4] = ['r', 'R', 't', 'T'];

const BLANK_SIZE: &str = "      ";

/// Output format selectable from the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRow {
    pub name: String,
    pub size: u64,
    pub kind: char,
    pub address: u64,
    pub line: i64,
}

impl From<&Symbol> for SymbolRow {
    fn from(sym: &Symbol) -> Self {
        Self {
            name: sym.name.clone(),
            size: sym.size,
            kind: sym.kind,
            address: sym.address,
            line: sym.line,
        }
    }
}

/// A run of consecutive symbols attributed to the same file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileGroup {
    pub file: String,
    pub symbols: Vec<SymbolRow>,
}

/// Single-binary report: symbols of the selected kinds, in name order,
/// split into groups wherever the file changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeReport {
    pub binary: String,
    pub files: Vec<FileGroup>,
}

impl SizeReport {
    pub fn build(entity: &Entity, kinds: &[char]) -> Self {
        let mut files: Vec<FileGroup> = Vec::new();
        for sym in entity.symbols().iter().filter(|s| kinds.contains(&s.kind)) {
            if let Some(group) = files.last_mut().filter(|g| g.file == sym.file) {
                group.symbols.push(sym.into());
            } else {
                files.push(FileGroup { file: sym.file.clone(), symbols: vec![sym.into()] });
            }
        }
        Self { binary: entity.label.clone(), files }
    }
}

/// Tracks the file of the previous line so a header is printed only when it
/// changes. A fresh cursor always prints the first header, even for an
/// empty file name.
#[derive(Debug, Default)]
struct FileCursor {
    started: bool,
    file: String,
}

impl FileCursor {
    fn enter(&mut self, file: &str) -> bool {
        if self.started && self.file == file {
            return false;
        }
        self.started = true;
        self.file.clear();
        self.file.push_str(file);
        true
    }
}

pub fn write_size_report<W: Write>(out: &mut W, report: &SizeReport) -> io::Result<()> {
    for group in &report.files {
        writeln!(out, "{}:", group.file)?;
        for sym in &group.symbols {
            writeln!(out, "{:6} {}", sym.size, sym.name)?;
        }
    }
    Ok(())
}

pub fn write_delta_report<W: Write>(out: &mut W, report: &DeltaReport) -> io::Result<()> {
    let mut cursor = FileCursor::default();
    for change in &report.changes {
        if cursor.enter(&change.file) {
            writeln!(out, "File: {:?}:", change.file)?;
        }
        writeln!(out, "{}", format_change(change))?;
    }
    writeln!(out, "  {:6} {:6} TOTAL", report.totals.old, report.totals.new)
}

fn size_column(size: Option<u64>) -> String {
    match size {
        Some(size) => format!("{size:6}"),
        None => BLANK_SIZE.to_string(),
    }
}

pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

/// Text line for a single change, as it appears in the delta report.
pub fn format_change(change: &Change) -> String {
    format!(
        "{} {} {} {}",
        change.kind.marker(),
        size_column(change.old_size),
        size_column(change.new_size),
        change.symbol
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::ChangeKind;

    fn sym(name: &str, size: u64, kind: char, file: &str) -> Symbol {
        Symbol { address: 0, size, kind, name: name.into(), file: file.into(), line: 0 }
    }

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn size_report_filters_kinds_and_groups_consecutive_files() {
        let ent = Entity::new(
            "fw.elf",
            vec![
                sym("a_main", 200, 't', "src/main.c"),
                sym("b_table", 64, 'R', "src/main.c"),
                sym("c_bss", 1024, 'b', "src/main.c"),
                sym("d_init", 12, 'T', "lib/init.c"),
                sym("e_more", 8, 'T', "src/main.c"),
            ],
        );
        let report = SizeReport::build(&ent, &DEFAULT_REPORT_KINDS);
        let text = render(|out| write_size_report(out, &report));
        assert_eq!(
            text,
            "src/main.c:\n   200 a_main\n    64 b_table\nlib/init.c:\n    12 d_init\nsrc/main.c:\n     8 e_more\n"
        );
    }

    #[test]
    fn size_report_prints_header_for_leading_empty_file() {
        let ent = Entity::new("fw.elf", vec![sym("x", 1, 'T', "")]);
        let text = render(|out| write_size_report(out, &SizeReport::build(&ent, &['T'])));
        assert_eq!(text, ":\n     1 x\n");
    }

    #[test]
    fn delta_report_text_layout() {
        let a = Entity::new("old", vec![sym("foo", 10, 'T', "x.c"), sym("bar", 20, 'T', "y.c")]);
        let b = Entity::new("new", vec![sym("bar", 25, 'T', "y.c"), sym("baz", 5, 'T', "z.c")]);
        let report = DeltaReport::build(&a, &b);
        let text = render(|out| write_delta_report(out, &report));
        let expected = concat!(
            "File: \"x.c\":\n",
            "D     10        foo\n",
            "File: \"y.c\":\n",
            "-     20     25 bar\n",
            "File: \"z.c\":\n",
            "A             5 baz\n",
            "      30     30 TOTAL\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn delta_report_with_no_changes_prints_only_totals() {
        let a = Entity::new("old", vec![sym("foo", 10, 'T', "x.c")]);
        let report = DeltaReport::build(&a, &a.clone());
        let text = render(|out| write_delta_report(out, &report));
        assert_eq!(text, "       0      0 TOTAL\n");
    }

    #[test]
    fn totals_line_prints_sums_beyond_u64() {
        let a = Entity::new("old", vec![sym("big", u64::MAX, 'T', "a.c"), sym("one", 1, 'T', "a.c")]);
        let report = DeltaReport::build(&a, &Entity::new("new", vec![]));
        let text = render(|out| write_delta_report(out, &report));
        assert!(text.ends_with("  18446744073709551616      0 TOTAL\n"), "{text}");
    }

    #[test]
    fn blank_and_zero_sizes_are_distinct() {
        let added_zero = Change {
            kind: ChangeKind::Added,
            old_size: None,
            new_size: Some(0),
            file: String::new(),
            symbol: "z".into(),
        };
        assert_eq!(format_change(&added_zero), "A             0 z");
    }

    #[test]
    fn first_header_printed_for_empty_file_name() {
        let a = Entity::new("old", vec![]);
        let b = Entity::new("new", vec![sym("anon", 3, 'T', ""), sym("named", 4, 'T', "n.c")]);
        let text = render(|out| write_delta_report(out, &DeltaReport::build(&a, &b)));
        assert!(text.starts_with("File: \"\":\nA             3 anon\nFile: \"n.c\":\n"));
    }

    #[test]
    fn json_delta_keeps_absent_sizes_null() {
        let a = Entity::new("old", vec![sym("gone", 7, 'T', "g.c")]);
        let b = Entity::new("new", vec![]);
        let text = render(|out| write_json(out, &DeltaReport::build(&a, &b)));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let change = &value["changes"][0];
        assert_eq!(change["kind"], "deleted");
        assert_eq!(change["old_size"], 7);
        assert!(change["new_size"].is_null());
        assert_eq!(value["totals"]["old"], 7);
        assert_eq!(value["totals"]["new"], 0);
    }
}

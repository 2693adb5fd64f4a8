//! Table - styled rows laid out into aligned columns.
//!
//! A [`Table`] buffers rows of styled [`Cell`]s and spanning lines, and
//! renders everything in one pass on [`Table::write`]. Alignment relies on a
//! byte-counting layout engine, so the table measures every row's escape
//! overhead as it is added and, when writing, pads each cell's escape
//! sequence up to its column's maximum before layout.
//!
//! # Examples
//!
//! ```
//! use tablecloth::prelude::*;
//!
//! let mut table = Table::with_options(2, TableOptions::default().color(ColorMode::Always));
//! table.add_line("=== greetings ===");
//! table.add_cells(["hello", "world"]).unwrap();
//! table
//!     .add_cells([
//!         Cell::value(StyledValue::new("hi").style(Style::parse("bold red").unwrap())),
//!         Cell::text("world"),
//!     ])
//!     .unwrap();
//!
//! let output = table.render();
//! let plain: Vec<String> = output.lines().map(tablecloth::overhead::strip_sgr).collect();
//! assert_eq!(plain, vec!["=== greetings ===", "hello  |world  |", "hi     |world  |"]);
//! ```

use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::cell::{Cell, RenderedCell, Row};
use crate::error::TableError;
use crate::layout::{ColumnLayout, LayoutOptions};
use crate::overhead::{OverheadTracker, equalize_row};
use crate::terminal;

/// Column definition for a table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnDefinition {
    /// Column name.
    pub name: String,
    /// Minimum width. Advisory only; layout does not enforce it.
    pub min_width: usize,
}

impl ColumnDefinition {
    /// Create a new column with a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_width: 0,
        }
    }

    /// Set minimum width.
    #[must_use]
    pub fn min_width(mut self, width: usize) -> Self {
        self.min_width = width;
        self
    }
}

/// When to emit escape sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Detect from the environment and stdout.
    #[default]
    Auto,
    /// Always style.
    Always,
    /// Never style; cells render as plain text.
    Never,
}

impl ColorMode {
    fn resolve(self) -> bool {
        match self {
            Self::Auto => terminal::colors_enabled(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// How wide a rendered row may be before its first column is truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidthLimit {
    /// Never truncate.
    #[default]
    Unbounded,
    /// Truncate rows wider than this many columns.
    Fixed(usize),
    /// Truncate to the terminal width; no truncation when not a terminal.
    Terminal,
}

impl WidthLimit {
    /// The limit in columns, `0` meaning none.
    fn resolve(self) -> usize {
        self.resolve_with(terminal::terminal_width)
    }

    /// Like `resolve`, with `probe` standing in for the terminal width query.
    fn resolve_with(self, probe: impl FnOnce() -> usize) -> usize {
        match self {
            Self::Unbounded => 0,
            Self::Fixed(width) => width,
            Self::Terminal => probe(),
        }
    }
}

/// Table configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    /// Layout engine settings.
    pub layout: LayoutOptions,
    /// Width fitting.
    pub width: WidthLimit,
    /// Color emission.
    pub color: ColorMode,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            layout: LayoutOptions {
                debug: true,
                ..LayoutOptions::default()
            },
            width: WidthLimit::Unbounded,
            color: ColorMode::Auto,
        }
    }
}

impl TableOptions {
    /// Set the spacing after the widest cell of each column.
    #[must_use]
    pub fn padding(mut self, padding: usize) -> Self {
        self.layout.padding = padding;
        self
    }

    /// Set the padding character.
    #[must_use]
    pub fn pad_char(mut self, pad_char: char) -> Self {
        self.layout.pad_char = pad_char;
        self
    }

    /// Draw `|` column separators.
    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.layout.debug = debug;
        self
    }

    /// Set the minimum visible cell width, padding included. Escape
    /// sequences do not count toward it.
    #[must_use]
    pub fn min_cell_width(mut self, width: usize) -> Self {
        self.layout.min_width = width;
        self
    }

    /// Set the width limit.
    #[must_use]
    pub fn width(mut self, width: WidthLimit) -> Self {
        self.width = width;
        self
    }

    /// Truncate rows wider than `width` columns.
    #[must_use]
    pub fn max_width(self, width: usize) -> Self {
        self.width(WidthLimit::Fixed(width))
    }

    /// Truncate rows to the terminal width.
    #[must_use]
    pub fn fit_terminal(self) -> Self {
        self.width(WidthLimit::Terminal)
    }

    /// Set the color mode.
    #[must_use]
    pub fn color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }
}

/// Where a spanning line is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum LineAnchor {
    BeforeRows,
    AfterRow(usize),
}

/// A set of styled rows rendered into aligned columns.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<ColumnDefinition>,
    rows: Vec<Row>,
    overheads: OverheadTracker,
    lines: BTreeMap<LineAnchor, Vec<String>>,
    options: TableOptions,
    colorize: bool,
}

impl Table {
    /// Create a table with `columns` unnamed columns and default options.
    #[must_use]
    pub fn new(columns: usize) -> Self {
        Self::with_options(columns, TableOptions::default())
    }

    /// Create a table with `columns` unnamed columns.
    #[must_use]
    pub fn with_options(columns: usize, options: TableOptions) -> Self {
        Self::with_columns_and_options(vec![ColumnDefinition::default(); columns], options)
    }

    /// Create a table from column definitions and default options.
    #[must_use]
    pub fn with_columns(columns: Vec<ColumnDefinition>) -> Self {
        Self::with_columns_and_options(columns, TableOptions::default())
    }

    /// Create a table from column definitions.
    ///
    /// [`ColorMode::Auto`] is resolved here, once, so that every render of
    /// the table agrees on whether cells carry escape sequences.
    #[must_use]
    pub fn with_columns_and_options(columns: Vec<ColumnDefinition>, options: TableOptions) -> Self {
        Self {
            overheads: OverheadTracker::new(columns.len()),
            columns,
            rows: Vec::new(),
            lines: BTreeMap::new(),
            colorize: options.color.resolve(),
            options,
        }
    }

    /// Column definitions.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Rows added so far.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no row was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Per-column maximum overhead observed so far.
    #[must_use]
    pub fn overheads(&self) -> &OverheadTracker {
        &self.overheads
    }

    /// The table's options.
    #[must_use]
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Whether cells are rendered with escape sequences.
    #[must_use]
    pub fn colors_enabled(&self) -> bool {
        self.colorize
    }

    /// Add a row.
    ///
    /// The row is rendered once to measure its escape overhead; the text of
    /// that render is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ArityMismatch`] if the row's cell count differs
    /// from the column count. The table is unchanged in that case.
    pub fn add_row(&mut self, row: impl Into<Row>) -> Result<(), TableError> {
        let row = row.into();
        if row.len() != self.columns.len() {
            return Err(TableError::ArityMismatch {
                expected: self.columns.len(),
                found: row.len(),
            });
        }

        let measured = row.render_with(0, self.colorize);
        self.overheads.observe_row(&measured);
        self.rows.push(row);
        log::debug!(
            "added row {} (column overheads {:?})",
            self.rows.len() - 1,
            self.overheads.as_slice()
        );
        Ok(())
    }

    /// Add a row from anything convertible to cells.
    ///
    /// # Errors
    ///
    /// See [`Table::add_row`].
    pub fn add_cells<C: Into<Cell>>(
        &mut self,
        cells: impl IntoIterator<Item = C>,
    ) -> Result<(), TableError> {
        self.add_row(cells.into_iter().collect::<Row>())
    }

    /// Add a line that is emitted verbatim after the most recently added
    /// row, or before the table if no row was added yet.
    pub fn add_line(&mut self, line: impl Into<String>) {
        let anchor = match self.rows.len() {
            0 => LineAnchor::BeforeRows,
            n => LineAnchor::AfterRow(n - 1),
        };
        self.lines.entry(anchor).or_default().push(line.into());
    }

    /// Render the table and write it to `dest`.
    ///
    /// Writing does not change the table; writing twice produces the same
    /// bytes as long as the terminal width does not change in between.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Io`] on the first failed write.
    pub fn write<W: Write + ?Sized>(&self, dest: &mut W) -> Result<(), TableError> {
        self.write_limited(dest, self.options.width.resolve())
    }

    fn write_limited<W: Write + ?Sized>(
        &self,
        dest: &mut W,
        limit: usize,
    ) -> Result<(), TableError> {
        let truncations = self.truncations(limit);

        let mut layout =
            ColumnLayout::new(self.options.layout).column_min_widths(self.column_min_widths());
        for (row, &truncate) in self.rows.iter().zip(&truncations) {
            let cells = equalize_row(row.render_with(truncate, self.colorize), &self.overheads);
            layout.write_cells(cells.iter().map(RenderedCell::text));
        }
        let lines = layout.lines();
        log::debug!(
            "writing {} rows with {} spanning line groups (width limit {limit})",
            lines.len(),
            self.lines.len()
        );

        if let Some(spanning) = self.lines.get(&LineAnchor::BeforeRows) {
            write_spanning(dest, spanning)?;
        }
        for (index, line) in lines.iter().enumerate() {
            writeln!(dest, "{line}")?;
            if let Some(spanning) = self.lines.get(&LineAnchor::AfterRow(index)) {
                write_spanning(dest, spanning)?;
            }
        }
        for spanning in self.lines.range(LineAnchor::AfterRow(lines.len())..).map(|(_, v)| v) {
            write_spanning(dest, spanning)?;
        }
        Ok(())
    }

    /// Write the table to stdout and flush it.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Io`] if writing or flushing fails.
    pub fn flush(&self) -> Result<(), TableError> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write(&mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Render the table into a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut buf = Vec::new();
        if let Err(err) = self.write(&mut buf) {
            log::warn!("rendering into memory failed: {err}");
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Per-column minimum for the layout engine: the visible minimum plus
    /// the column's equalized overhead.
    fn column_min_widths(&self) -> Vec<usize> {
        let min_width = self.options.layout.min_width;
        (0..self.columns.len())
            .map(|column| min_width + self.overheads.max(column))
            .collect()
    }

    /// How many characters to drop from each row's first value so that the
    /// row fits in `limit` columns. The other columns keep their width.
    ///
    /// When the other columns alone, or the first column's minimum width,
    /// already exceed `limit`, the row cannot fit; the first value is then
    /// truncated as far as it helps.
    fn truncations(&self, limit: usize) -> Vec<usize> {
        if limit == 0 {
            return vec![0; self.rows.len()];
        }

        let rendered: Vec<Vec<RenderedCell>> = self
            .rows
            .iter()
            .map(|row| row.render_with(0, self.colorize))
            .collect();
        let LayoutOptions {
            min_width,
            padding,
            debug,
            ..
        } = self.options.layout;
        let separator = usize::from(debug);
        let column_width = |column: usize| {
            let widest = rendered
                .iter()
                .filter_map(|cells| cells.get(column))
                .map(RenderedCell::visible_width)
                .max()
                .unwrap_or(0);
            (widest + padding).max(min_width) + separator
        };
        let rest: usize = (1..self.columns.len()).map(column_width).sum();
        if rest + min_width + separator > limit {
            log::debug!("width limit {limit} is below the table's minimum width");
        }

        rendered
            .iter()
            .map(|cells| {
                let first = cells.first().map_or(0, RenderedCell::visible_width);
                (first + padding + separator + rest).saturating_sub(limit)
            })
            .collect()
    }
}

fn write_spanning<W: Write + ?Sized>(dest: &mut W, lines: &[String]) -> io::Result<()> {
    writeln!(dest, "{}", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::overhead::strip_sgr;
    use crate::style::Style;
    use crate::value::StyledValue;

    fn colored(columns: usize) -> Table {
        Table::with_options(columns, TableOptions::default().color(ColorMode::Always))
    }

    fn bold_red(text: &str) -> Cell {
        Cell::value(StyledValue::new(text).style(Style::new().bold().color(Color::Standard(1))))
    }

    #[test]
    fn test_table_new() {
        let table = Table::new(3);
        assert_eq!(table.column_count(), 3);
        assert!(table.is_empty());
        assert_eq!(table.overheads().as_slice(), &[0, 0, 0]);
    }

    #[test]
    fn test_with_columns_keeps_definitions() {
        let table = Table::with_columns(vec![
            ColumnDefinition::new("First").min_width(10),
            ColumnDefinition::new("Second"),
        ]);
        assert_eq!(table.columns()[0].name, "First");
        assert_eq!(table.columns()[0].min_width, 10);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_add_row_tracks_overheads() {
        let mut table = colored(2);
        table.add_cells(["hello", "world"]).unwrap();
        assert_eq!(table.overheads().as_slice(), &[8, 8]);
        table.add_row(vec![bold_red("hi"), Cell::text("world")]).unwrap();
        assert_eq!(table.overheads().as_slice(), &[11, 8]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_add_row_rejects_wrong_arity() {
        let mut table = colored(2);
        let err = table.add_cells(["only one"]).unwrap_err();
        assert!(matches!(
            err,
            TableError::ArityMismatch { expected: 2, found: 1 }
        ));
        assert!(table.is_empty());
    }

    #[test]
    fn test_equalized_output_is_aligned() {
        let mut table = colored(2);
        table.add_cells(["hello", "world"]).unwrap();
        table.add_row(vec![bold_red("hi"), Cell::text("world")]).unwrap();

        let output = table.render();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), lines[1].len());
        assert!(lines[0].starts_with("\x1b[0000mhello\x1b[0m"));
        assert!(lines[1].starts_with("\x1b[1;31mhi\x1b[0m"));

        let plain: Vec<String> = lines.iter().map(|l| strip_sgr(l)).collect();
        assert_eq!(plain, vec!["hello  |world  |", "hi     |world  |"]);
    }

    #[test]
    fn test_spanning_lines_are_interleaved() {
        let mut table = Table::with_options(1, TableOptions::default().color(ColorMode::Never));
        table.add_line("top 1");
        table.add_line("top 2");
        table.add_cells(["a"]).unwrap();
        table.add_line("after a");
        table.add_cells(["b"]).unwrap();
        table.add_cells(["c"]).unwrap();
        table.add_line("after c");

        assert_eq!(
            table.render(),
            "top 1\ntop 2\na  |\nafter a\nb  |\nc  |\nafter c\n"
        );
    }

    #[test]
    fn test_spanning_line_without_rows() {
        let mut table = Table::new(2);
        table.add_line("nothing here");
        assert_eq!(table.render(), "nothing here\n");
    }

    #[test]
    fn test_write_is_idempotent() {
        let mut table = colored(2);
        table.add_cells(["a", "b"]).unwrap();
        table.add_row(vec![bold_red("c"), Cell::text("d")]).unwrap();
        table.add_line("--");
        assert_eq!(table.render(), table.render());
    }

    #[test]
    fn test_never_color_renders_plain() {
        let mut table = Table::with_options(2, TableOptions::default().color(ColorMode::Never));
        table.add_row(vec![bold_red("hi"), Cell::text("x")]).unwrap();
        assert!(!table.colors_enabled());
        assert_eq!(table.overheads().as_slice(), &[0, 0]);
        assert_eq!(table.render(), "hi  |x  |\n");
    }

    #[test]
    fn test_fixed_width_truncates_first_column() {
        let options = TableOptions::default().color(ColorMode::Never).max_width(12);
        let mut table = Table::with_options(2, options);
        table.add_cells(["abcdefghij", "xyz"]).unwrap();
        table.add_cells(["ab", "xyz"]).unwrap();

        // column two takes 3 + 2 + 1; the first cell may use 12 - 6 - 3
        assert_eq!(table.render(), "abc  |xyz  |\nab   |xyz  |\n");
    }

    #[test]
    fn test_min_cell_width_ignores_escape_overhead() {
        let render = |color: ColorMode| {
            let options = TableOptions::default().color(color).min_cell_width(10);
            let mut table = Table::with_options(2, options);
            table.add_cells(["a", "b"]).unwrap();
            strip_sgr(&table.render())
        };

        assert_eq!(render(ColorMode::Never), "a         |b         |\n");
        assert_eq!(render(ColorMode::Always), render(ColorMode::Never));
    }

    #[test]
    fn test_min_cell_width_counts_toward_width_limit() {
        for color in [ColorMode::Never, ColorMode::Always] {
            let options = TableOptions::default()
                .color(color)
                .min_cell_width(6)
                .max_width(16);
            let mut table = Table::with_options(2, options);
            table.add_cells(["abcdefghij", "x"]).unwrap();

            // column two is held at 6 + 1, leaving 16 - 7 - 3 for the first value
            let plain = strip_sgr(&table.render());
            assert_eq!(plain, "abcdef  |x     |\n");
        }
    }

    #[test]
    fn test_terminal_limit_uses_probe() {
        assert_eq!(WidthLimit::Terminal.resolve_with(|| 0), 0);
        assert_eq!(WidthLimit::Terminal.resolve_with(|| 80), 80);
        assert_eq!(WidthLimit::Fixed(12).resolve_with(|| 80), 12);
        assert_eq!(WidthLimit::Unbounded.resolve_with(|| 80), 0);
    }

    #[test]
    fn test_terminal_width_zero_means_no_truncation() {
        let options = TableOptions::default()
            .color(ColorMode::Never)
            .width(WidthLimit::Terminal);
        let mut table = Table::with_options(2, options);
        table.add_cells(["abcdefghij", "x"]).unwrap();

        let mut unlimited = Vec::new();
        let limit = table.options().width.resolve_with(|| 0);
        table.write_limited(&mut unlimited, limit).unwrap();
        assert_eq!(unlimited, b"abcdefghij  |x  |\n");

        let mut narrow = Vec::new();
        let limit = table.options().width.resolve_with(|| 8);
        table.write_limited(&mut narrow, limit).unwrap();
        assert_eq!(narrow, b"a  |x  |\n");
    }

    #[test]
    fn test_zero_width_limit_does_not_truncate() {
        let options = TableOptions::default().color(ColorMode::Never).max_width(0);
        let mut table = Table::with_options(1, options);
        table.add_cells(["a fairly long first column"]).unwrap();
        assert_eq!(table.render(), "a fairly long first column  |\n");
    }

    #[test]
    fn test_write_error_is_returned() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut table = Table::new(1);
        table.add_cells(["x"]).unwrap();
        let err = table.write(&mut Broken).unwrap_err();
        assert!(matches!(err, TableError::Io(_)));
        assert_eq!(table.len(), 1);
    }
}

//! Elastic tab-stop column layout.
//!
//! [`ColumnLayout`] aligns tab-delimited records into padded columns. It is
//! deliberately unaware of escape sequences: a cell's width is its character
//! count, escape bytes included. Callers that style cells must equalize the
//! invisible overhead per column first (see [`crate::overhead`]).
//!
//! ```
//! use tablecloth::layout::{ColumnLayout, LayoutOptions};
//!
//! let mut layout = ColumnLayout::new(LayoutOptions::default());
//! layout.write_record("a\tbbb\t\n");
//! layout.write_record("cccc\td\t\n");
//! assert_eq!(layout.lines(), vec!["a     bbb  ", "cccc  d    "]);
//! ```

/// Layout engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Minimum column width, padding included.
    pub min_width: usize,
    /// Padding added to the widest cell of each column.
    pub padding: usize,
    /// Character used for padding.
    pub pad_char: char,
    /// Draw a `|` after every column.
    pub debug: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            min_width: 0,
            padding: 2,
            pad_char: ' ',
            debug: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Record {
    cells: Vec<String>,
    trailing: String,
}

/// Buffers tab-delimited records and lays them out into aligned lines.
#[derive(Debug, Clone, Default)]
pub struct ColumnLayout {
    options: LayoutOptions,
    column_min: Vec<usize>,
    records: Vec<Record>,
}

impl ColumnLayout {
    /// Create an empty layout.
    #[must_use]
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            options,
            column_min: Vec::new(),
            records: Vec::new(),
        }
    }

    /// Override the minimum width of the leading columns, one entry per
    /// column. Columns without an entry use [`LayoutOptions::min_width`].
    ///
    /// The minimum is compared with the character count, so a caller whose
    /// cells carry escape overhead adds that overhead to the minimum.
    #[must_use]
    pub fn column_min_widths(mut self, widths: Vec<usize>) -> Self {
        self.column_min = widths;
        self
    }

    /// Add one record.
    ///
    /// Every tab terminates a cell. Text after the last tab is written
    /// verbatim and takes no part in alignment. A single trailing newline is
    /// ignored.
    pub fn write_record(&mut self, record: &str) {
        let record = record.strip_suffix('\n').unwrap_or(record);
        let mut cells: Vec<String> = record.split('\t').map(str::to_string).collect();
        let trailing = cells.pop().unwrap_or_default();
        self.records.push(Record { cells, trailing });
    }

    /// Add one record whose cells are all tab-terminated.
    pub fn write_cells<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut record = String::new();
        for cell in cells {
            record.push_str(cell.as_ref());
            record.push('\t');
        }
        self.write_record(&record);
    }

    /// Number of buffered records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no record was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Width of each column, padding included.
    #[must_use]
    pub fn column_widths(&self) -> Vec<usize> {
        let columns = self.records.iter().map(|r| r.cells.len()).max().unwrap_or(0);
        let mut widths: Vec<usize> = (0..columns)
            .map(|c| self.column_min.get(c).copied().unwrap_or(self.options.min_width))
            .collect();
        for record in &self.records {
            for (width, cell) in widths.iter_mut().zip(&record.cells) {
                *width = (*width).max(cell.chars().count() + self.options.padding);
            }
        }
        widths
    }

    /// The aligned output, one line per record, without line terminators.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let widths = self.column_widths();
        self.records
            .iter()
            .map(|record| {
                let mut line = String::new();
                for (cell, &width) in record.cells.iter().zip(&widths) {
                    line.push_str(cell);
                    let pad = width.saturating_sub(cell.chars().count());
                    line.extend(std::iter::repeat_n(self.options.pad_char, pad));
                    if self.options.debug {
                        line.push('|');
                    }
                }
                line.push_str(&record.trailing);
                line
            })
            .collect()
    }
}

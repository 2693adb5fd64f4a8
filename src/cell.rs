//! Cells, rows and their rendered form.

use crate::template::{Template, TemplateError};
use crate::value::StyledValue;

/// A table cell: a template and the styled values filling its slots.
///
/// # Examples
///
/// ```
/// use tablecloth::cell::Cell;
/// use tablecloth::style::Style;
/// use tablecloth::value::StyledValue;
///
/// let cell = Cell::new(
///     "Hello, {}! It's {} degrees outside.",
///     [
///         StyledValue::new("World").style(Style::parse("bright_green").unwrap()),
///         StyledValue::new(75).style(Style::parse("black on bright_yellow").unwrap()),
///     ],
/// )
/// .unwrap();
/// assert_eq!(cell.render(0).overhead(), 9 + 13);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    template: Template,
    values: Vec<StyledValue>,
}

impl Cell {
    /// Create a cell from a template string and its values.
    ///
    /// # Errors
    ///
    /// Fails if the template is malformed or the number of values differs
    /// from the number of `{}` slots.
    pub fn new(
        template: &str,
        values: impl IntoIterator<Item = StyledValue>,
    ) -> Result<Self, TemplateError> {
        Self::from_template(Template::parse(template)?, values)
    }

    /// Create a cell from an already parsed template.
    ///
    /// # Errors
    ///
    /// Fails if the number of values differs from the template's slots.
    pub fn from_template(
        template: Template,
        values: impl IntoIterator<Item = StyledValue>,
    ) -> Result<Self, TemplateError> {
        let values: Vec<StyledValue> = values.into_iter().collect();
        let expected = template.slot_count();
        if values.len() != expected {
            return Err(TemplateError::SlotCountMismatch {
                expected,
                found: values.len(),
            });
        }
        Ok(Self { template, values })
    }

    /// A cell holding a single value.
    #[must_use]
    pub fn value(value: StyledValue) -> Self {
        Self {
            template: Template::single_slot(),
            values: vec![value],
        }
    }

    /// A cell holding unstyled text. Braces are not interpreted.
    ///
    /// `text` must not contain tabs, line breaks or escape sequences; see
    /// [`StyledValue`].
    ///
    /// The text becomes an unstyled value, so it still renders with a reset
    /// sequence like every other value.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::value(StyledValue::from(text.into()))
    }

    /// The cell's template.
    #[must_use]
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// The cell's values, in slot order.
    #[must_use]
    pub fn values(&self) -> &[StyledValue] {
        &self.values
    }

    /// Render the cell, trimming the first value by `truncate` characters.
    #[must_use]
    pub fn render(&self, truncate: usize) -> RenderedCell {
        self.render_with(truncate, true)
    }

    pub(crate) fn render_with(&self, truncate: usize, colorize: bool) -> RenderedCell {
        let mut overhead = 0;
        let rendered: Vec<String> = self
            .values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let trim = if i == 0 { truncate } else { 0 };
                let (text, value_overhead) = if colorize {
                    value.render(trim)
                } else {
                    value.render_plain(trim)
                };
                overhead += value_overhead;
                text
            })
            .collect();

        RenderedCell {
            text: self.template.fill(&rendered),
            overhead,
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

impl From<StyledValue> for Cell {
    fn from(value: StyledValue) -> Self {
        Self::value(value)
    }
}

/// The rendered text of a cell and the bytes its escape sequences add.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedCell {
    text: String,
    overhead: usize,
}

impl RenderedCell {
    /// Wrap already rendered text with a known overhead.
    #[must_use]
    pub fn new(text: impl Into<String>, overhead: usize) -> Self {
        Self {
            text: text.into(),
            overhead,
        }
    }

    /// The rendered text, escape sequences included.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bytes of the text that are not visible.
    #[must_use]
    pub fn overhead(&self) -> usize {
        self.overhead
    }

    /// Characters the layout engine counts minus the invisible ones.
    #[must_use]
    pub fn visible_width(&self) -> usize {
        self.text.chars().count().saturating_sub(self.overhead)
    }

    /// Consume the cell, returning its text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// Create a row from its cells.
    #[must_use]
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// The row's cells.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the row has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Render every cell. Only the first value of the first cell is
    /// shortened, by `truncate_first_by` characters.
    #[must_use]
    pub fn render(&self, truncate_first_by: usize) -> Vec<RenderedCell> {
        self.render_with(truncate_first_by, true)
    }

    pub(crate) fn render_with(&self, truncate_first_by: usize, colorize: bool) -> Vec<RenderedCell> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let truncate = if i == 0 { truncate_first_by } else { 0 };
                cell.render_with(truncate, colorize)
            })
            .collect()
    }
}

impl From<Vec<Cell>> for Row {
    fn from(cells: Vec<Cell>) -> Self {
        Self::new(cells)
    }
}

impl<C: Into<Cell>> FromIterator<C> for Row {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

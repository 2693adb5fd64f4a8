//! Overhead tracking and equalization.
//!
//! The column layout engine pads by counting characters, so two cells with
//! the same visible width but different escape sequences would get different
//! padding. [`OverheadTracker`] records, per column, the largest overhead any
//! row has shown. [`equalize`] then grows every cell's overhead to that
//! maximum by inserting leading zeros into its first SGR sequence: `ESC[1m`
//! and `ESC[0001m` select the same rendition but differ by three bytes.

use std::sync::LazyLock;

use regex::Regex;

use crate::cell::RenderedCell;
use crate::style::CSI;

/// Shortest SGR sequence, `ESC[m`.
const MIN_SEQUENCE_LEN: usize = 3;

static SGR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("valid regex"));

/// Per-column maximum overhead across all rows seen so far.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverheadTracker {
    max: Vec<usize>,
}

impl OverheadTracker {
    /// Create a tracker for `columns` columns, all at zero.
    #[must_use]
    pub fn new(columns: usize) -> Self {
        Self {
            max: vec![0; columns],
        }
    }

    /// Record one cell's overhead. Columns beyond the current arity grow the
    /// tracker.
    pub fn observe(&mut self, column: usize, overhead: usize) {
        if column >= self.max.len() {
            self.max.resize(column + 1, 0);
        }
        self.max[column] = self.max[column].max(overhead);
    }

    /// Record every cell of one rendered row.
    pub fn observe_row(&mut self, cells: &[RenderedCell]) {
        for (column, cell) in cells.iter().enumerate() {
            self.observe(column, cell.overhead());
        }
    }

    /// The largest overhead seen in `column`, zero if none.
    #[must_use]
    pub fn max(&self, column: usize) -> usize {
        self.max.get(column).copied().unwrap_or(0)
    }

    /// All column maxima.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.max
    }
}

/// Pad `cell` so that its overhead equals `target`, keeping its visible
/// output unchanged.
///
/// The deficit is inserted as `'0'` digits right after the `ESC[` of the
/// first SGR sequence. A cell without any sequence gets an identity
/// sequence `ESC[0…0m` of exactly the deficit's length prepended; if the
/// deficit is too small for that, the cell is returned unchanged and a
/// warning is logged. A cell already at or above `target` is returned as is.
///
/// ```
/// use tablecloth::cell::RenderedCell;
/// use tablecloth::overhead::equalize;
///
/// let cell = RenderedCell::new("\x1b[0mhello\x1b[0m", 8);
/// let padded = equalize(cell, 11);
/// assert_eq!(padded.text(), "\x1b[0000mhello\x1b[0m");
/// assert_eq!(padded.overhead(), 11);
/// ```
#[must_use]
pub fn equalize(cell: RenderedCell, target: usize) -> RenderedCell {
    let overhead = cell.overhead();
    if overhead >= target {
        return cell;
    }
    let deficit = target - overhead;
    let text = cell.into_text();
    let zeros = "0".repeat(deficit);

    if let Some(found) = SGR_RE.find(&text) {
        let at = found.start() + CSI.len();
        let mut padded = String::with_capacity(text.len() + deficit);
        padded.push_str(&text[..at]);
        padded.push_str(&zeros);
        padded.push_str(&text[at..]);
        log::trace!("padded escape sequence at byte {at} by {deficit}");
        return RenderedCell::new(padded, target);
    }

    if deficit < MIN_SEQUENCE_LEN {
        log::warn!(
            "cell {text:?} has no escape sequence and a deficit of {deficit} bytes; \
             column alignment will be off"
        );
        return RenderedCell::new(text, overhead);
    }

    let identity = format!("{CSI}{}m", &zeros[MIN_SEQUENCE_LEN..]);
    log::trace!("prepended identity sequence of {deficit} bytes");
    RenderedCell::new(identity + &text, target)
}

/// Equalize every cell of a rendered row against the tracker's maxima.
#[must_use]
pub fn equalize_row(cells: Vec<RenderedCell>, tracker: &OverheadTracker) -> Vec<RenderedCell> {
    cells
        .into_iter()
        .enumerate()
        .map(|(column, cell)| equalize(cell, tracker.max(column)))
        .collect()
}

/// Remove SGR sequences from `text`.
#[must_use]
pub fn strip_sgr(text: &str) -> String {
    SGR_RE.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_keeps_maximum() {
        let mut tracker = OverheadTracker::new(2);
        tracker.observe(0, 8);
        tracker.observe(0, 11);
        tracker.observe(0, 9);
        tracker.observe(1, 8);
        assert_eq!(tracker.as_slice(), &[11, 8]);
        assert_eq!(tracker.max(5), 0);
    }

    #[test]
    fn test_tracker_observe_row() {
        let mut tracker = OverheadTracker::new(2);
        tracker.observe_row(&[RenderedCell::new("a", 3), RenderedCell::new("b", 0)]);
        tracker.observe_row(&[RenderedCell::new("a", 1), RenderedCell::new("b", 4)]);
        assert_eq!(tracker.as_slice(), &[3, 4]);
    }

    #[test]
    fn test_equalize_no_deficit_is_identity() {
        let cell = RenderedCell::new("\x1b[1mx\x1b[0m", 8);
        assert_eq!(equalize(cell.clone(), 8), cell);
        assert_eq!(equalize(cell.clone(), 3), cell);
    }

    #[test]
    fn test_equalize_pads_first_sequence_only() {
        let cell = RenderedCell::new("a \x1b[31mb\x1b[0m \x1b[1mc\x1b[0m", 16);
        let padded = equalize(cell, 18);
        assert_eq!(padded.text(), "a \x1b[0031mb\x1b[0m \x1b[1mc\x1b[0m");
        assert_eq!(padded.overhead(), 18);
    }

    #[test]
    fn test_equalize_keeps_visible_text() {
        let cell = RenderedCell::new("\x1b[38;5;200mhey\x1b[0m", 15);
        let padded = equalize(cell.clone(), 40);
        assert_eq!(strip_sgr(padded.text()), "hey");
        assert_eq!(padded.text().len(), cell.text().len() + 25);
    }

    #[test]
    fn test_equalize_plain_cell_gets_identity_sequence() {
        let cell = RenderedCell::new("No color here.", 0);
        let padded = equalize(cell, 11);
        assert_eq!(padded.text(), "\x1b[00000000mNo color here.");
        assert_eq!(padded.overhead(), 11);
        assert_eq!(padded.visible_width(), "No color here.".len());
    }

    #[test]
    fn test_equalize_plain_cell_with_tiny_deficit_is_unchanged() {
        let cell = RenderedCell::new("plain", 0);
        assert_eq!(equalize(cell.clone(), 2), cell);
    }

    #[test]
    fn test_equalize_row_uses_column_maxima() {
        let mut tracker = OverheadTracker::new(2);
        tracker.observe(0, 11);
        tracker.observe(1, 8);
        let row = vec![
            RenderedCell::new("\x1b[0mhello\x1b[0m", 8),
            RenderedCell::new("\x1b[0mworld\x1b[0m", 8),
        ];
        let out = equalize_row(row, &tracker);
        assert_eq!(out[0].text(), "\x1b[0000mhello\x1b[0m");
        assert_eq!(out[1].text(), "\x1b[0mworld\x1b[0m");
    }

    #[test]
    fn test_strip_sgr() {
        assert_eq!(strip_sgr("\x1b[0001;31mred\x1b[0m!"), "red!");
    }
}

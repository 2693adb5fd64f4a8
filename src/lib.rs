//! # tablecloth
//!
//! Column-aligned terminal tables whose cells carry ANSI styling.
//!
//! Escape sequences are invisible on screen but count as characters for a
//! tab-stop layout engine. A table measures how many bytes each cell's
//! styling adds, tracks the largest such overhead per column, and pads the
//! escape sequences of the other cells in that column with redundant leading
//! zeros so that every cell in a column carries the same overhead. The
//! layout engine then pads visible text consistently.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tablecloth::prelude::*;
//!
//! let mut table = Table::new(2);
//! table.add_cells(["name", "status"]).unwrap();
//! table
//!     .add_cells([
//!         Cell::text("db"),
//!         Cell::value(StyledValue::new("down").style(Style::parse("bold red").unwrap())),
//!     ])
//!     .unwrap();
//! table.flush().unwrap();
//! ```
//!
//! ## Core Concepts
//!
//! - **StyledValue**: one scalar with a style; renders to text plus overhead
//! - **Cell**: a template whose `{}` slots are filled with styled values
//! - **Row**: the cells of one table row
//! - **OverheadTracker** / **equalize**: per-column overhead compensation
//! - **ColumnLayout**: the escape-unaware tab-stop layout engine
//! - **Table**: buffers rows and spanning lines, renders on write

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod style;
pub mod value;
pub mod template;
pub mod cell;
pub mod overhead;
pub mod layout;
pub mod terminal;
pub mod error;
pub mod table;
pub mod logging;
pub mod sync;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::cell::{Cell, RenderedCell, Row};
    pub use crate::color::Color;
    pub use crate::error::TableError;
    pub use crate::layout::{ColumnLayout, LayoutOptions};
    pub use crate::overhead::{OverheadTracker, equalize};
    pub use crate::style::{Attributes, Style};
    pub use crate::table::{ColorMode, ColumnDefinition, Table, TableOptions, WidthLimit};
    pub use crate::template::{Template, TemplateError};
    pub use crate::value::StyledValue;
}

// Re-export key types at crate root
pub use cell::{Cell, Row};
pub use error::TableError;
pub use style::Style;
pub use table::Table;
pub use value::StyledValue;

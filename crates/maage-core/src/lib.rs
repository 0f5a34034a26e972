//! # maage-core
//!
//! Cheat-sheet store and column/row codec for the MAAGE adjudication front end.
//!
//! This crate provides:
//! - [`cheat_sheet`] - Parse, serialize and update the cheat-sheet text format
//! - [`codec`] - Spreadsheet column letters and display rows to 0-based indices
//! - [`plan`] - Per-section view state and the plan produced by a run
//! - [`segment`] - Column slices of comma-separated text files
//! - [`view`] - File status and display helpers for the presentation layer
//!
//! ## Example
//!
//! ```rust
//! use maage_core::cheat_sheet::{parse, serialize, Field};
//! use maage_core::codec::column_range_to_indices;
//!
//! let mut sections = parse("TabName,Air\nFilepath,air.xlsx\nSorties,Flights\n").unwrap();
//! sections[0].fields.push(Field::new("Losses", "Damage").with_layout("2", "B:D"));
//!
//! let text = serialize(&sections);
//! assert!(text.contains("Losses,Damage,2,B:D"));
//!
//! let columns = column_range_to_indices(sections[0].fields[1].effective_columns()).unwrap();
//! assert_eq!(columns, vec![1, 2, 3]);
//! ```

pub mod cheat_sheet;
pub mod codec;
pub mod error;
pub mod plan;
pub mod segment;
pub mod view;

// Re-exports for convenience
pub use cheat_sheet::{CheatSheetFile, Field, Section};
pub use error::{Error, Result};
pub use plan::{AdjudicationPlan, RunOptions, SectionState, SectionStates, WorkspaceSnapshot};
pub use view::FileStatus;

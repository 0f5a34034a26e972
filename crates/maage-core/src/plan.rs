//! Adjudication run plan
//!
//! Pressing "Run" in the front end turns the current sections into a plan:
//! for every section the user left enabled, which sheets to read and where
//! each one starts. The plan is returned to the caller; nothing here keeps
//! it around between runs.

use std::collections::HashMap;

use crate::cheat_sheet::{Field, Section};
use crate::codec::{column_range_to_indices, display_row_to_offset, DEFAULT_COLUMNS};

/// Section name reserved for the front end's landing view
pub const HOME_SECTION: &str = "home";

/// Number of columns read when a field's column range is missing or invalid
const FALLBACK_COLUMN_COUNT: usize = 26;

/// Per-section view flags owned by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionState {
    /// Include this section's data in the run
    pub use_for_adjudication: bool,
    /// Show the start row and column inputs
    pub show_start_columns: bool,
}

impl Default for SectionState {
    fn default() -> Self {
        Self {
            use_for_adjudication: true,
            show_start_columns: false,
        }
    }
}

/// [`SectionState`] for every section, keyed case-insensitively by name.
///
/// Sections without an explicit entry use [`SectionState::default`].
#[derive(Debug, Clone, Default)]
pub struct SectionStates {
    states: HashMap<String, SectionState>,
}

impl SectionStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// State of a section
    pub fn get(&self, section_name: &str) -> SectionState {
        self.states
            .get(&section_name.to_lowercase())
            .copied()
            .unwrap_or_default()
    }

    /// Mutable state of a section, created with defaults on first access
    pub fn get_mut(&mut self, section_name: &str) -> &mut SectionState {
        self.states.entry(section_name.to_lowercase()).or_default()
    }

    /// Include or exclude a section from the run
    pub fn set_use_for_adjudication(&mut self, section_name: &str, enabled: bool) {
        self.get_mut(section_name).use_for_adjudication = enabled;
    }

    /// Show or hide the start row and column inputs on every section view
    pub fn set_show_start_columns_all(&mut self, sections: &[Section], show: bool) {
        for section in tab_sections(sections) {
            self.get_mut(&section.name).show_start_columns = show;
        }
    }
}

/// Options for [`build_plan`]
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Bump `Move N` counters in the cheat sheet after the run
    pub increment_moves: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            increment_moves: true,
        }
    }
}

/// Where to read one sheet
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SheetSpec {
    pub sheet_name: String,
    /// 0-based first row
    pub start_offset: usize,
    /// 0-based column indices, ascending
    pub columns: Vec<usize>,
}

/// Sheets to read for one section
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlannedSection {
    pub name: String,
    pub filepath: String,
    /// One entry per distinct sheet name, in field order
    pub sheets: Vec<SheetSpec>,
}

impl PlannedSection {
    /// Spec for a sheet
    pub fn sheet(&self, sheet_name: &str) -> Option<&SheetSpec> {
        self.sheets.iter().find(|s| s.sheet_name == sheet_name)
    }
}

/// Result of a run
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AdjudicationPlan {
    /// Enabled sections, in store order
    pub sections: Vec<PlannedSection>,
    /// Use-for-adjudication flag of every section view, in store order
    pub adjudication_flags: Vec<bool>,
    /// Whether the move counters are to be bumped after the run
    pub increment_moves: bool,
}

impl AdjudicationPlan {
    /// Planned section by case-insensitive name
    pub fn section(&self, name: &str) -> Option<&PlannedSection> {
        let name = name.to_lowercase();
        self.sections.iter().find(|s| s.name.to_lowercase() == name)
    }
}

/// Sections that get their own view, i.e. everything except [`HOME_SECTION`]
pub fn tab_sections(sections: &[Section]) -> impl Iterator<Item = &Section> {
    sections.iter().filter(|s| !s.is_named(HOME_SECTION))
}

/// Build the plan for a run.
///
/// Start rows go through [`display_row_to_offset`]. Column ranges that are
/// missing or do not convert fall back to the first 26 columns. When two
/// fields of a section name the same sheet the later one wins.
pub fn build_plan(
    sections: &[Section],
    states: &SectionStates,
    options: &RunOptions,
) -> AdjudicationPlan {
    let mut planned = Vec::new();
    let mut flags = Vec::new();

    for section in tab_sections(sections) {
        let enabled = states.get(&section.name).use_for_adjudication;
        flags.push(enabled);
        if !enabled {
            continue;
        }

        let mut sheets: Vec<SheetSpec> = Vec::new();
        for field in &section.fields {
            let spec = SheetSpec {
                sheet_name: field.sheet_name.clone(),
                start_offset: display_row_to_offset(&field.start_row),
                columns: field_columns(&section.name, field),
            };

            match sheets.iter_mut().find(|s| s.sheet_name == spec.sheet_name) {
                Some(existing) => *existing = spec,
                None => sheets.push(spec),
            }
        }

        planned.push(PlannedSection {
            name: section.name.clone(),
            filepath: section.filepath.clone(),
            sheets,
        });
    }

    AdjudicationPlan {
        sections: planned,
        adjudication_flags: flags,
        increment_moves: options.increment_moves,
    }
}

fn field_columns(section_name: &str, field: &Field) -> Vec<usize> {
    if field.columns.is_empty() {
        return (0..FALLBACK_COLUMN_COUNT).collect();
    }

    column_range_to_indices(&field.columns).unwrap_or_else(|e| {
        log::warn!(
            "Section '{}', field '{}': {}; reading {} instead",
            section_name,
            field.display_name,
            e,
            DEFAULT_COLUMNS
        );
        (0..FALLBACK_COLUMN_COUNT).collect()
    })
}

/// Plain-data dump of every section view, for debugging a run
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WorkspaceSnapshot {
    pub sections: Vec<SnapshotSection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SnapshotSection {
    pub name: String,
    pub use_for_adjudication: bool,
    /// Fields as the view shows them, with default start row and columns filled in
    pub entries: Vec<Field>,
}

impl WorkspaceSnapshot {
    /// Capture the current sections and their view state
    pub fn capture(sections: &[Section], states: &SectionStates) -> Self {
        let sections = tab_sections(sections)
            .map(|section| SnapshotSection {
                name: section.name.clone(),
                use_for_adjudication: states.get(&section.name).use_for_adjudication,
                entries: section
                    .fields
                    .iter()
                    .map(|field| {
                        let start_row = if field.start_row.is_empty() {
                            "1".to_string()
                        } else {
                            field.start_row.clone()
                        };
                        let columns = field.effective_columns().to_string();
                        field.clone().with_layout(start_row, columns)
                    })
                    .collect(),
            })
            .collect();

        Self { sections }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sections() -> Vec<Section> {
        vec![
            Section::new("Home", ""),
            Section::new("Air", "air.xlsx")
                .with_field(Field::new("Sorties", "Flights").with_layout("3", "B:D"))
                .with_field(Field::new("Losses", "Damage")),
            Section::new("Sea", "sea.xlsx")
                .with_field(Field::new("Contacts", "Sheet1").with_layout("x", "Q:A")),
        ]
    }

    #[test]
    fn test_build_plan() {
        let plan = build_plan(&sections(), &SectionStates::new(), &RunOptions::default());

        assert_eq!(plan.adjudication_flags, vec![true, true]);
        assert!(plan.increment_moves);
        assert_eq!(plan.sections.len(), 2);

        let air = plan.section("air").unwrap();
        assert_eq!(air.filepath, "air.xlsx");
        assert_eq!(
            air.sheet("Flights").unwrap(),
            &SheetSpec {
                sheet_name: "Flights".into(),
                start_offset: 2,
                columns: vec![1, 2, 3],
            }
        );
        let damage = air.sheet("Damage").unwrap();
        assert_eq!(damage.start_offset, 0);
        assert_eq!(damage.columns, (0..26).collect::<Vec<_>>());

        // Invalid row and range fall back
        let contacts = plan.section("Sea").unwrap().sheet("Sheet1").unwrap();
        assert_eq!(contacts.start_offset, 0);
        assert_eq!(contacts.columns.len(), 26);
    }

    #[test]
    fn test_build_plan_skips_disabled_sections() {
        let mut states = SectionStates::new();
        states.set_use_for_adjudication("AIR", false);

        let plan = build_plan(
            &sections(),
            &states,
            &RunOptions {
                increment_moves: false,
            },
        );

        assert_eq!(plan.adjudication_flags, vec![false, true]);
        assert!(plan.section("Air").is_none());
        assert!(plan.section("Sea").is_some());
        assert!(!plan.increment_moves);
    }

    #[test]
    fn test_build_plan_duplicate_sheet_later_wins() {
        let sections = vec![Section::new("Air", "")
            .with_field(Field::new("A", "Flights").with_layout("2", "A"))
            .with_field(Field::new("B", "Flights").with_layout("5", "C"))];

        let plan = build_plan(&sections, &SectionStates::new(), &RunOptions::default());
        let air = plan.section("Air").unwrap();
        assert_eq!(air.sheets.len(), 1);
        assert_eq!(air.sheets[0].start_offset, 4);
        assert_eq!(air.sheets[0].columns, vec![2]);
    }

    #[test]
    fn test_build_plan_oversized_range_falls_back() {
        let sections = vec![Section::new("Air", "")
            .with_field(Field::new("A", "Flights").with_layout("", "A:ZZZZZZZZZZZZZ"))
            .with_field(Field::new("B", "Damage").with_layout("", "A:ZZZZZZZ"))];

        let plan = build_plan(&sections, &SectionStates::new(), &RunOptions::default());
        let air = plan.section("Air").unwrap();
        assert_eq!(air.sheet("Flights").unwrap().columns, (0..26).collect::<Vec<_>>());
        assert_eq!(air.sheet("Damage").unwrap().columns, (0..26).collect::<Vec<_>>());
    }

    #[test]
    fn test_section_states() {
        let mut states = SectionStates::new();
        assert_eq!(states.get("Air"), SectionState::default());

        states.set_show_start_columns_all(&sections(), true);
        assert!(states.get("air").show_start_columns);
        assert!(states.get("SEA").show_start_columns);
        assert!(!states.get("Home").show_start_columns);
        assert!(states.get("Air").use_for_adjudication);
    }

    #[test]
    fn test_workspace_snapshot() {
        let mut states = SectionStates::new();
        states.set_use_for_adjudication("Sea", false);

        let snapshot = WorkspaceSnapshot::capture(&sections(), &states);
        assert_eq!(snapshot.sections.len(), 2);

        let air = &snapshot.sections[0];
        assert!(air.use_for_adjudication);
        assert_eq!(
            air.entries,
            vec![
                Field::new("Sorties", "Flights").with_layout("3", "B:D"),
                Field::new("Losses", "Damage").with_layout("1", "A:Z"),
            ]
        );
        assert!(!snapshot.sections[1].use_for_adjudication);
    }
}

//! File-backed cheat sheet

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{increment_move_counters, parse, replace_section_fields, section_field_lines, serialize};
use super::{Field, Section};
use crate::error::{Error, Result};
use crate::plan::{build_plan, AdjudicationPlan, RunOptions, SectionStates};
use crate::view::FileStatus;

/// Default cheat-sheet file name, resolved against the working directory
pub const DEFAULT_CHEAT_SHEET: &str = "MAAGECheatSheet.txt";

/// A cheat sheet on disk.
///
/// Every operation reads the whole file. Mutating operations write the new
/// content to a temporary file in the same directory and rename it over the
/// original, so readers see either the old or the new content in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheatSheetFile {
    path: PathBuf,
}

impl Default for CheatSheetFile {
    fn default() -> Self {
        Self::new(DEFAULT_CHEAT_SHEET)
    }
}

impl CheatSheetFile {
    /// Point at a cheat-sheet path (the file need not exist yet)
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists
    pub fn status(&self) -> FileStatus {
        FileStatus::of(&self.path)
    }

    /// Read the raw text
    pub fn read_to_string(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| Error::io(&self.path, e))
    }

    /// Parse every section
    pub fn load(&self) -> Result<Vec<Section>> {
        let source = self.read_to_string()?;
        let sections = parse(&source)?;
        log::debug!(
            "Loaded {} sections from {}",
            sections.len(),
            self.path.display()
        );
        Ok(sections)
    }

    /// Raw field lines of one section (empty when the section is absent)
    pub fn section_field_lines(&self, section_name: &str) -> Result<Vec<String>> {
        let source = self.read_to_string()?;
        Ok(section_field_lines(&source, section_name))
    }

    /// Rewrite one section's field lines in place
    pub fn replace_section_fields(&self, section_name: &str, fields: &[Field]) -> Result<()> {
        let source = self.read_to_string()?;
        let updated = replace_section_fields(&source, section_name, fields)?;
        write_atomic(&self.path, &updated)?;
        log::debug!(
            "Replaced {} fields of section '{}' in {}",
            fields.len(),
            section_name,
            self.path.display()
        );
        Ok(())
    }

    /// Write the full store, replacing whatever the file held
    pub fn save(&self, sections: &[Section]) -> Result<()> {
        write_atomic(&self.path, &serialize(sections))?;
        log::debug!(
            "Saved {} sections to {}",
            sections.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Bump every `Move N` counter in the file
    pub fn increment_move_counters(&self) -> Result<()> {
        let source = self.read_to_string()?;
        write_atomic(&self.path, &increment_move_counters(&source))?;
        log::debug!("Incremented move counters in {}", self.path.display());
        Ok(())
    }

    /// Switch to another cheat sheet and return its sections.
    ///
    /// The new file is parsed first; on failure this handle keeps pointing at
    /// the previous file.
    pub fn switch_to<P: Into<PathBuf>>(&mut self, path: P) -> Result<Vec<Section>> {
        let candidate = Self::new(path);
        let sections = candidate.load()?;
        log::debug!(
            "Switched cheat sheet from {} to {}",
            self.path.display(),
            candidate.path.display()
        );
        *self = candidate;
        Ok(sections)
    }

    /// Build the adjudication plan for the given sections and, if requested,
    /// bump the move counters of this file afterwards.
    pub fn run(
        &self,
        sections: &[Section],
        states: &SectionStates,
        options: &RunOptions,
    ) -> Result<AdjudicationPlan> {
        let plan = build_plan(sections, states, options);
        if plan.increment_moves {
            self.increment_move_counters()?;
        }
        Ok(plan)
    }
}

/// Replace `path` with `contents` through a sibling temporary file
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(path, e))?;
    if let Ok(metadata) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| Error::io(path, e))?;
    }
    tmp.write_all(contents.as_bytes())
        .map_err(|e| Error::io(path, e))?;
    tmp.as_file().sync_all().map_err(|e| Error::io(path, e))?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;

    Ok(())
}

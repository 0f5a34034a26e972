//! Sheet-name reader

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{SheetsError, SheetsResult};

/// Name given to the only sheet of a CSV file
pub const CSV_SHEET_NAME: &str = "Sheet1";

/// Workbook sheet-name reader
pub struct SheetNameReader;

impl SheetNameReader {
    /// List the sheets of a workbook file.
    ///
    /// `.csv` files are read as CSV, anything else as an XLSX package.
    pub fn read_file<P: AsRef<Path>>(path: P) -> SheetsResult<Vec<String>> {
        let path = path.as_ref();
        let file = File::open(path)?;

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        if is_csv {
            Self::read_csv(file)
        } else {
            Self::read_xlsx(file)
        }
    }

    /// Read sheet names, in tab order, from an XLSX package
    pub fn read_xlsx<R: Read + Seek>(reader: R) -> SheetsResult<Vec<String>> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an XLSX file
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(SheetsError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| SheetsError::MissingPart("xl/workbook.xml".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.local_name().as_ref() == b"sheet" =>
                {
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"name" {
                            if let Ok(name) = attr.unescape_value() {
                                sheets.push(name.to_string());
                            }
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(SheetsError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        log::debug!("Found {} sheets in workbook", sheets.len());
        Ok(sheets)
    }

    /// Validate CSV content and report its single sheet
    pub fn read_csv<R: Read>(reader: R) -> SheetsResult<Vec<String>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        for record in csv_reader.records() {
            record?;
        }

        Ok(vec![CSV_SHEET_NAME.to_string()])
    }
}

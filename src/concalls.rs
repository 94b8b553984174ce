//! Conference-call records. Each `* ` bullet starts an entry whose first
//! line is the date label; later lines may carry labelled links. Text before
//! the first bullet is preamble and never forms an entry.

use crate::error::{Result, SectionError};
use crate::grammar::ConcallLink;
use crate::schema::ConcallEntry;
use crate::sections::SectionId;
use log::debug;

const ENTRY_DELIMITER: &str = "* ";
const BOILERPLATE_PREFIXES: [&str; 2] = ["### Concalls", "Add Missing"];
const NOTES_PREFIX: &str = "Notes";

fn is_boilerplate(entry: &str) -> bool {
    BOILERPLATE_PREFIXES
        .iter()
        .any(|prefix| entry.starts_with(prefix))
}

fn parse_entry(entry: &str) -> ConcallEntry {
    let mut lines = entry.lines().map(str::trim);
    let mut record = ConcallEntry {
        date: lines.next().unwrap_or_default().to_string(),
        ..Default::default()
    };

    for line in lines {
        if line.starts_with(NOTES_PREFIX) {
            record.notes = true;
            continue;
        }
        let Some(link) = ConcallLink::detect(line) else {
            continue;
        };
        let Some(url) = link.extract_url(line) else {
            debug!("{}: {} without a url in '{}'", SectionId::Concalls, link.marker(), line);
            continue;
        };
        match link {
            ConcallLink::Transcript => record.transcript = Some(url),
            ConcallLink::Ppt => record.ppt = Some(url),
            ConcallLink::Rec => record.rec = Some(url),
        }
    }

    record
}

pub fn parse_concalls(text: &str) -> Result<Vec<ConcallEntry>> {
    let entries: Vec<ConcallEntry> = text
        .split(ENTRY_DELIMITER)
        .skip(1)
        .map(str::trim)
        .filter(|entry| !entry.is_empty() && !is_boilerplate(entry))
        .map(parse_entry)
        .collect();

    if entries.is_empty() {
        return Err(SectionError::no_data(
            SectionId::Concalls.label(),
            "no concall entries found",
        ));
    }

    Ok(entries)
}

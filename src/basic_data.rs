//! Top ratios bullet list: `* Key  Value`, split on the first double space.

use crate::error::{Result, SectionError};
use crate::lines::non_blank_lines;
use crate::schema::BasicData;
use crate::sections::SectionId;
use indexmap::IndexMap;

const BULLET: &str = "* ";
const KEY_VALUE_GAP: &str = "  ";

fn key_value(line: &str) -> Option<(String, String)> {
    let body = line.strip_prefix(BULLET)?;
    let (key, value) = body.split_once(KEY_VALUE_GAP)?;
    Some((key.trim().to_string(), value.trim().to_string()))
}

pub fn parse_basic_data(text: &str) -> Result<BasicData> {
    let pairs: IndexMap<String, String> = non_blank_lines(text)
        .into_iter()
        .filter_map(key_value)
        .collect();

    if pairs.is_empty() {
        return Err(SectionError::no_data(
            SectionId::BasicData.label(),
            "no key/value bullets found",
        ));
    }

    Ok(BasicData(pairs))
}

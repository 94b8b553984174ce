//! Documents: announcements, annual reports and credit ratings, each a
//! markdown bullet list of links under its own `###` heading.
//!
//! The concalls heading is recognised only so its bullets are not read as
//! belonging to the previous subsection; [`crate::concalls`] parses them.

use crate::error::{Result, SectionError};
use crate::grammar::{parse_announcement_title, split_markdown_link, split_report_source};
use crate::lines::all_lines;
use crate::schema::{Announcement, AnnualReport, CreditRating, Documents};
use crate::sections::SectionId;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Subsection {
    Announcements,
    AnnualReports,
    CreditRatings,
    Concalls,
}

impl Subsection {
    const HEADINGS: [(&'static str, Subsection); 4] = [
        ("### Announcements", Subsection::Announcements),
        ("### Annual reports", Subsection::AnnualReports),
        ("### Credit ratings", Subsection::CreditRatings),
        ("### Concalls", Subsection::Concalls),
    ];

    fn from_heading(line: &str) -> Option<Self> {
        Self::HEADINGS
            .iter()
            .find(|(heading, _)| line.starts_with(heading))
            .map(|(_, subsection)| *subsection)
    }
}

fn bullet_body(line: &str) -> Option<&str> {
    line.strip_prefix('*').map(str::trim)
}

fn unparseable(bullet: &str) -> SectionError {
    SectionError::UnparseableBullet(bullet.to_string())
}

fn announcement(bullet: &str) -> Result<Announcement> {
    let link = split_markdown_link(bullet).ok_or_else(|| unparseable(bullet))?;
    let title = parse_announcement_title(&link.text);
    Ok(Announcement {
        description: title.description,
        date: title.date,
        url: link.url,
    })
}

fn annual_report(bullet: &str) -> Result<AnnualReport> {
    let link = split_markdown_link(bullet).ok_or_else(|| unparseable(bullet))?;
    let (description, source) = split_report_source(&link.text);
    Ok(AnnualReport {
        description,
        source,
        url: link.url,
    })
}

fn credit_rating(bullet: &str) -> Result<CreditRating> {
    let link = split_markdown_link(bullet).ok_or_else(|| unparseable(bullet))?;
    Ok(CreditRating {
        description: link.text,
        url: link.url,
    })
}

fn push_entry<T>(list: &mut Option<Vec<T>>, entry: Result<T>) {
    match entry {
        Ok(entry) => list.get_or_insert_with(Vec::new).push(entry),
        Err(err) => debug!("{}: skipping bullet: {}", SectionId::Documents, err),
    }
}

pub fn parse_documents(text: &str) -> Result<Documents> {
    let mut documents = Documents::default();
    let mut current: Option<Subsection> = None;

    for line in all_lines(text) {
        if let Some(subsection) = Subsection::from_heading(line) {
            match subsection {
                Subsection::Announcements => documents.announcements = Some(Vec::new()),
                Subsection::AnnualReports => documents.annual_reports = Some(Vec::new()),
                Subsection::CreditRatings => documents.credit_ratings = Some(Vec::new()),
                Subsection::Concalls => {}
            }
            current = Some(subsection);
            continue;
        }

        let Some(bullet) = bullet_body(line) else {
            continue;
        };

        match current {
            Some(Subsection::Announcements) => {
                push_entry(&mut documents.announcements, announcement(bullet))
            }
            Some(Subsection::AnnualReports) => {
                push_entry(&mut documents.annual_reports, annual_report(bullet))
            }
            Some(Subsection::CreditRatings) => {
                push_entry(&mut documents.credit_ratings, credit_rating(bullet))
            }
            Some(Subsection::Concalls) | None => {}
        }
    }

    if current.is_none() {
        return Err(SectionError::no_data(
            SectionId::Documents.label(),
            "no subsection heading found",
        ));
    }

    Ok(documents)
}

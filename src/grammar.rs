//! Small named grammars for the link and date conventions found in bullet
//! lists. Each one is a pure function over a single string and can be
//! exercised on its own.

use once_cell::sync::Lazy;
use regex::Regex;

// Optional leading label, a date token (`15 Jan 2024`, `2d`, `5h`), a dash,
// then the trailing description.
static ANNOUNCEMENT_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(.*?)\s*(\d+\s?\w+\s?\d{4}|\d+\s?\w+|\d+h)\s*-\s*(.*)$")
        .expect("announcement title pattern must compile")
});

static FROM_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bfrom\b").expect("source splitter pattern must compile"));

static TRANSCRIPT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[ Transcript \] ?\((.*?)\)").expect("transcript link pattern must compile")
});

static PPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[ PPT \] ?\((.*?)\)").expect("ppt link pattern must compile"));

static REC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[ REC \] ?\((.*?)\)").expect("rec link pattern must compile"));

/// A markdown link split at its last `](`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownLink {
    pub text: String,
    pub url: String,
}

/// Splits `text](url)` on the last `](`. Returns `None` when the separator
/// is missing.
///
/// When the whole bullet is the link the opening `[` is dropped; when the
/// link follows other text the bracket is closed again, so
/// `"Result [link](http://x)"` yields the text `"Result [link]"`.
pub fn split_markdown_link(bullet: &str) -> Option<MarkdownLink> {
    let (before, after) = bullet.rsplit_once("](")?;
    let before = before.trim();

    let text = if let Some(stripped) = before.strip_prefix('[') {
        stripped.trim().to_string()
    } else if before.contains('[') {
        format!("{}]", before)
    } else {
        before.to_string()
    };

    let url = after
        .trim()
        .trim_matches(|c: char| c == ')' || c == '>' || c == '<')
        .trim()
        .to_string();

    Some(MarkdownLink { text, url })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementTitle {
    pub description: String,
    pub date: Option<String>,
}

fn trim_dashes(s: &str) -> &str {
    s.trim_matches(|c: char| c == '-' || c == ' ')
}

/// Pulls the date token out of an announcement's link text. Text that does
/// not fit the grammar becomes the description with no date.
pub fn parse_announcement_title(text: &str) -> AnnouncementTitle {
    let Some(caps) = ANNOUNCEMENT_TITLE_RE.captures(text) else {
        return AnnouncementTitle {
            description: text.to_string(),
            date: None,
        };
    };

    let prefix = trim_dashes(caps.get(1).map_or("", |m| m.as_str()));
    let date = caps.get(2).map_or("", |m| m.as_str()).trim();
    let suffix = trim_dashes(caps.get(3).map_or("", |m| m.as_str()));

    let description = if suffix.is_empty() {
        prefix.to_string()
    } else {
        trim_dashes(&format!("{} - {}", prefix, suffix)).to_string()
    };

    AnnouncementTitle {
        description,
        date: Some(date.to_string()),
    }
}

/// Splits an annual-report title on its last whole-word `from` into
/// `(description, source)`.
pub fn split_report_source(text: &str) -> (String, Option<String>) {
    match FROM_WORD_RE.find_iter(text).last() {
        Some(m) => (
            text[..m.start()].trim().to_string(),
            Some(text[m.end()..].trim().to_string()),
        ),
        None => (text.to_string(), None),
    }
}

/// The bracketed link labels that can follow a concall date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcallLink {
    Transcript,
    Ppt,
    Rec,
}

impl ConcallLink {
    pub const ALL: [ConcallLink; 3] = [Self::Transcript, Self::Ppt, Self::Rec];

    pub const fn marker(self) -> &'static str {
        match self {
            Self::Transcript => "[ Transcript ]",
            Self::Ppt => "[ PPT ]",
            Self::Rec => "[ REC ]",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Transcript => &TRANSCRIPT_RE,
            Self::Ppt => &PPT_RE,
            Self::Rec => &REC_RE,
        }
    }

    /// Which label, if any, a line starts with.
    pub fn detect(line: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|link| line.starts_with(link.marker()))
    }

    /// Extracts the URL following this label on `line`.
    pub fn extract_url(self, line: &str) -> Option<String> {
        let caps = self.pattern().captures(line)?;
        let raw = caps.get(1)?.as_str();
        Some(clean_wrapped_url(raw))
    }
}

/// Keeps only the `<...>` part of a decorated URL and strips stray quotes.
pub fn clean_wrapped_url(raw: &str) -> String {
    let url = if raw.contains('<') {
        raw.rsplit('<')
            .next()
            .and_then(|tail| tail.split('>').next())
            .unwrap_or(raw)
    } else {
        raw
    };
    url.trim_matches('"').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_link_whole_bullet() {
        let link = split_markdown_link("[Financial Year 2023 from bse](https://x/y.pdf)").unwrap();
        assert_eq!(link.text, "Financial Year 2023 from bse");
        assert_eq!(link.url, "https://x/y.pdf");
    }

    #[test]
    fn test_split_link_with_prefix_text() {
        let link = split_markdown_link("Result [link](http://x)").unwrap();
        assert_eq!(link.text, "Result [link]");
        assert_eq!(link.url, "http://x");
    }

    #[test]
    fn test_split_link_strips_angle_brackets() {
        let link = split_markdown_link("[Rating](<https://r.com/a b>)").unwrap();
        assert_eq!(link.url, "https://r.com/a b");
    }

    #[test]
    fn test_split_link_missing_separator() {
        assert!(split_markdown_link("Just text (no link)").is_none());
    }

    #[test]
    fn test_announcement_with_full_date() {
        let title = parse_announcement_title("Press Release 15 Jan 2024 - Outcome of board meeting");
        assert_eq!(title.date.as_deref(), Some("15 Jan 2024"));
        assert_eq!(title.description, "Press Release - Outcome of board meeting");
    }

    #[test]
    fn test_announcement_with_relative_date() {
        let title = parse_announcement_title("Intimation 2d - Trading window closure");
        assert_eq!(title.date.as_deref(), Some("2d"));
        assert_eq!(title.description, "Intimation - Trading window closure");

        let title = parse_announcement_title("5h - Board approves dividend");
        assert_eq!(title.date.as_deref(), Some("5h"));
        assert_eq!(title.description, "Board approves dividend");
    }

    #[test]
    fn test_announcement_without_date() {
        let title = parse_announcement_title("Result [link]");
        assert_eq!(title.date, None);
        assert_eq!(title.description, "Result [link]");
    }

    #[test]
    fn test_split_report_source() {
        assert_eq!(
            split_report_source("Financial Year 2023 from bse"),
            ("Financial Year 2023".to_string(), Some("bse".to_string()))
        );
        assert_eq!(
            split_report_source("Transfer from reserves from nse"),
            ("Transfer from reserves".to_string(), Some("nse".to_string()))
        );
        assert_eq!(
            split_report_source("Financial Year 2022"),
            ("Financial Year 2022".to_string(), None)
        );
    }

    #[test]
    fn test_concall_links() {
        assert_eq!(ConcallLink::detect("[ PPT ](https://p)"), Some(ConcallLink::Ppt));
        assert_eq!(ConcallLink::detect("Notes"), None);
        assert_eq!(
            ConcallLink::Transcript
                .extract_url("[ Transcript ](https://t.pdf)")
                .as_deref(),
            Some("https://t.pdf")
        );
        assert_eq!(
            ConcallLink::Rec
                .extract_url(r#"[ REC ](Recording <https://rec.mp3>")"#)
                .as_deref(),
            Some("https://rec.mp3")
        );
    }

    #[test]
    fn test_clean_wrapped_url() {
        assert_eq!(clean_wrapped_url("\"https://a\""), "https://a");
        assert_eq!(clean_wrapped_url("View <https://b>"), "https://b");
    }
}

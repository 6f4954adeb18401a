use crate::refs::{ObjectReferences, RefType};
use chrono::{DateTime, Datelike, Local, Offset, Timelike};
use pdf_writer::{Date as PDate, Pdf, TextStr};

/// Metadata written into the information dictionary of a printable sheet
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Info {
    pub title: Option<String>,
    pub author: Option<String>,
    /// The script the sheet was printed for, written as the subject
    pub script: Option<String>,
    pub keywords: Vec<String>,
}

impl Info {
    pub fn new() -> Info {
        Info::default()
    }

    pub fn title<S: Into<String>>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn author<S: Into<String>>(&mut self, author: S) -> &mut Self {
        self.author = Some(author.into());
        self
    }

    pub fn script<S: Into<String>>(&mut self, script: S) -> &mut Self {
        self.script = Some(script.into());
        self
    }

    /// Add a keyword; keywords are written comma separated
    pub fn keyword<S: Into<String>>(&mut self, keyword: S) -> &mut Self {
        self.keywords.push(keyword.into());
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let mut dict = writer.document_info(refs.gen(RefType::Info));

        if let Some(title) = self.title.as_deref() {
            dict.title(TextStr(title));
        }
        if let Some(author) = self.author.as_deref() {
            dict.author(TextStr(author));
        }
        let subject = self.script.as_deref().map(|script| format!("Tokens for {script}"));
        if let Some(subject) = subject.as_deref() {
            dict.subject(TextStr(subject));
        }
        let keywords = self.keywords.join(", ");
        if !keywords.is_empty() {
            dict.keywords(TextStr(&keywords));
        }

        dict.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " ",
            env!("CARGO_PKG_VERSION")
        )));
        dict.creation_date(to_pdf_date(&Local::now()));
    }
}

/// PDF dates carry the UTC offset as separate signed hours and unsigned minutes
fn to_pdf_date(at: &DateTime<Local>) -> PDate {
    let offset_seconds = at.offset().fix().local_minus_utc();
    let hours = offset_seconds / 3600;
    let minutes = (offset_seconds % 3600 / 60).unsigned_abs();

    PDate::new(at.year() as u16)
        .month(at.month() as u8)
        .day(at.day() as u8)
        .hour(at.hour() as u8)
        .minute(at.minute() as u8)
        .second(at.second() as u8)
        .utc_offset_hour(hours as i8)
        .utc_offset_minute(minutes as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let mut info = Info::new();
        info.title("Trouble Brewing").keyword("roles").keyword("reminders");
        assert_eq!(info.title.as_deref(), Some("Trouble Brewing"));
        assert_eq!(info.keywords, vec!["roles", "reminders"]);
        assert!(info.author.is_none());
    }

    #[test]
    fn writes_an_info_dictionary() {
        let mut refs = ObjectReferences::new();
        let mut writer = Pdf::new();
        let mut info = Info::new();
        info.title("Sheets").script("Bad Moon Rising").keyword("a").keyword("b");
        info.write(&mut refs, &mut writer);
        assert!(refs.get(RefType::Info).is_some());

        let bytes = writer.finish();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Title (Sheets)"));
        assert!(text.contains("/Subject (Tokens for Bad Moon Rising)"));
        assert!(text.contains("/Keywords (a, b)"));
        assert!(text.contains("/Creator"));
        assert!(!text.contains("/Author"));
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::resolver::ArchiveResult;

/// Kind of document a listing row refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    OrdinaryGazette,
    ExtraordinaryGazette,
    GovernmentOrder,
}

/// Generic view of a harvested row, used where a step does not care which
/// table the row belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRecord {
    pub category: Category,
    pub number: String,
    pub issue_date: Option<NaiveDate>,
    pub description: String,
    /// Empty when the origin row carried no link.
    pub url: String,
}

impl SourceRecord {
    /// Short human label for log lines, e.g. `ordinary gazette 123 of 2020-02-01 (Advertisements)`.
    pub fn label(&self) -> String {
        let kind = match self.category {
            Category::OrdinaryGazette => "ordinary gazette",
            Category::ExtraordinaryGazette => "extraordinary gazette",
            Category::GovernmentOrder => "government order",
        };
        let mut label = format!("{} {}", kind, self.number);
        if let Some(date) = self.issue_date {
            label.push_str(&format!(" of {}", date));
        }
        if !self.description.is_empty() {
            label.push_str(&format!(" ({})", self.description));
        }
        label
    }
}

/// One row of the extraordinary gazette table.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtraordinaryGazette {
    pub issue_no: String,
    pub issue_date: Option<NaiveDate>,
    pub gazette_number: String,
    pub category: String,
    pub department: String,
    pub url: String,
    pub deleted: Option<bool>,
    pub archive: Option<ArchiveResult>,
}

/// One row of the gazette issue index: a label such as `"123 - 01-02-2020"`
/// and the link to that issue's contents page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GazetteIssue {
    #[serde(rename = "Issue No and Date")]
    pub label: String,
    #[serde(rename = "Particulars")]
    pub particulars: String,
    #[serde(rename = "URL")]
    pub url: String,
}

/// One entry of an ordinary gazette issue, stamped with the issue it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct GazetteEntry {
    pub part: String,
    pub content: String,
    pub url: String,
    pub date: Option<NaiveDate>,
    pub issue: String,
    pub deleted: Option<bool>,
    pub archive: Option<ArchiveResult>,
}

/// A government order as scraped from the listing, before cleanup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoAbstract {
    pub deptname: String,
    pub go_text: String,
    pub url: Option<String>,
    pub go_number_date: Option<String>,
    pub file_size: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    English,
    Tamil,
}

/// A government order with its number and date split out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernmentOrder {
    pub deptname: String,
    pub go_text: String,
    pub url: Option<String>,
    pub number: Option<String>,
    pub go_date: Option<String>,
    pub lang: Language,
    pub file_size: Option<String>,
}

impl GovernmentOrder {
    pub fn source_record(&self) -> SourceRecord {
        SourceRecord {
            category: Category::GovernmentOrder,
            number: self.number.clone().unwrap_or_default(),
            issue_date: None,
            description: self.deptname.clone(),
            url: self.url.clone().unwrap_or_default(),
        }
    }
}

/// A table row that goes through the reachability and archival passes.
pub trait Harvested {
    fn source_record(&self) -> SourceRecord;
    fn mark_deleted(&mut self, deleted: bool);
    fn attach_archive(&mut self, archive: ArchiveResult);
}

impl Harvested for ExtraordinaryGazette {
    fn source_record(&self) -> SourceRecord {
        SourceRecord {
            category: Category::ExtraordinaryGazette,
            number: self.gazette_number.clone(),
            issue_date: self.issue_date,
            description: self.department.clone(),
            url: self.url.clone(),
        }
    }

    fn mark_deleted(&mut self, deleted: bool) {
        self.deleted = Some(deleted);
    }

    fn attach_archive(&mut self, archive: ArchiveResult) {
        self.archive = Some(archive);
    }
}

impl Harvested for GazetteEntry {
    fn source_record(&self) -> SourceRecord {
        SourceRecord {
            category: Category::OrdinaryGazette,
            number: self.issue.clone(),
            issue_date: self.date,
            description: self.content.clone(),
            url: self.url.clone(),
        }
    }

    fn mark_deleted(&mut self, deleted: bool) {
        self.deleted = Some(deleted);
    }

    fn attach_archive(&mut self, archive: ArchiveResult) {
        self.archive = Some(archive);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_record_label() {
        let entry = GazetteEntry {
            part: "Part VI - Section 4".to_string(),
            content: "Advertisements".to_string(),
            url: "http://site/gazette/2020/124/p6s4.pdf".to_string(),
            date: NaiveDate::from_ymd_opt(2020, 2, 8),
            issue: "124".to_string(),
            deleted: None,
            archive: None,
        };
        let record = entry.source_record();
        assert_eq!(record.category, Category::OrdinaryGazette);
        assert_eq!(
            record.label(),
            "ordinary gazette 124 of 2020-02-08 (Advertisements)"
        );
    }

    #[test]
    fn test_extraordinary_record_label() {
        let gazette = ExtraordinaryGazette {
            issue_no: "412".to_string(),
            issue_date: None,
            gazette_number: "II(2)/HOME/412".to_string(),
            category: "Notification".to_string(),
            department: String::new(),
            url: String::new(),
            deleted: None,
            archive: None,
        };
        assert_eq!(
            gazette.source_record().label(),
            "extraordinary gazette II(2)/HOME/412"
        );
    }
}

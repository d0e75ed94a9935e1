//! Record types produced by the scraper

/// One job listing extracted from a result page
///
/// Absent fields are represented as empty strings (or an empty skill list);
/// the source markup does not distinguish "missing" from "present but empty".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobRecord {
    /// External listing identifier
    pub id: String,

    /// Display title
    pub title: String,

    /// Location fragments joined by a space and trimmed
    pub location: String,

    /// Skill tags in document order
    pub skills: Vec<String>,

    /// Deadline/date text exactly as shown on the page
    pub date: String,
}

impl JobRecord {
    /// Header row written before any record
    pub const CSV_HEADER: [&'static str; 5] = ["ID", "TITLE", "LOCATION", "SKILLS", "DATE"];

    /// Flattens the record into the five CSV fields, joining skills with a comma
    pub fn to_csv_record(&self) -> [String; 5] {
        [
            self.id.clone(),
            self.title.clone(),
            self.location.clone(),
            self.skills.join(","),
            self.date.clone(),
        ]
    }
}

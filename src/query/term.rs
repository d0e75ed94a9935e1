/// Collapses every whitespace run to a single space and trims both ends
///
/// # Examples
///
/// ```
/// use job_harvest::clean_term;
///
/// assert_eq!(clean_term("  go   lang "), "go lang");
/// ```
pub fn clean_term(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

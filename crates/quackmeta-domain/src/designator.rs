//! Designator heuristics

/// Shortest string treated as a possible Drive file id
pub const DRIVE_ID_MIN_LEN: usize = 25;

/// Longest string treated as a possible Drive file id
pub const DRIVE_ID_MAX_LEN: usize = 45;

/// Check whether a designator looks like a Google Drive file id
///
/// Drive ids are 25-45 characters long and contain no path separators and no
/// dots. This is a heuristic only; callers check for an existing local file
/// first and fall back to this.
///
/// # Examples
///
/// ```
/// use quackmeta_domain::is_likely_drive_id;
///
/// assert!(is_likely_drive_id("1A2b3C4d5E6f7G8h9I0jKlMnOpQrStU"));
/// assert!(!is_likely_drive_id("notes.txt"));
/// ```
pub fn is_likely_drive_id(designator: &str) -> bool {
    let len = designator.chars().count();
    (DRIVE_ID_MIN_LEN..=DRIVE_ID_MAX_LEN).contains(&len)
        && !designator.contains('/')
        && !designator.contains('\\')
        && !designator.contains('.')
}

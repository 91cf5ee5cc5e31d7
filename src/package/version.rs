//! Package version comparison and increment
//!
//! Versions are compared segment by segment (split on `.` and `-`); numeric
//! segments compare as numbers, everything else as text.

use std::cmp::Ordering;

/// Compare two version strings
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split(['.', '-']);
    let mut right = b.split(['.', '-']);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ordering = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    _ => l.cmp(r),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

/// Increment the last numeric run of `version`
///
/// `1.0.0` becomes `1.0.1`, `2.3-SNAPSHOT` becomes `2.4-SNAPSHOT`. A version
/// without digits gets `.1` appended.
pub fn increment(version: &str) -> String {
    let Some(end) = version.rfind(|c: char| c.is_ascii_digit()).map(|i| i + 1) else {
        return format!("{version}.1");
    };
    let start = version[..end]
        .rfind(|c: char| !c.is_ascii_digit())
        .map_or(0, |i| i + 1);

    match version[start..end].parse::<u64>() {
        Ok(n) => match n.checked_add(1) {
            Some(next) => format!("{}{}{}", &version[..start], next, &version[end..]),
            None => format!("{version}.1"),
        },
        Err(_) => format!("{version}.1"),
    }
}

/// Version to use when `requested` collides with an existing package
///
/// Starts from the highest of `requested` and `existing` and increments until
/// the result is not taken.
pub fn next_version(requested: &str, existing: &[String]) -> String {
    let latest = existing
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(requested))
        .max_by(|a, b| compare_versions(a, b))
        .unwrap_or(requested);

    let mut candidate = increment(latest);
    while existing.iter().any(|v| v == &candidate) {
        candidate = increment(&candidate);
    }
    candidate
}

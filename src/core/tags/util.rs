//! core/tags/util.rs
//! Small parsing helpers shared by tag reading/writing.

/// Parse TRCK/TPOS strings like:
/// - "3" -> (3, 0)
/// - "3/12" -> (3, 12)
/// - "" or garbage -> (0, 0)
///
/// Zero means unknown; a bad half never spoils the other half.
pub(crate) fn parse_slash_pair(s: Option<&str>) -> (u32, u32) {
    let Some(s) = s else { return (0, 0) };
    let s = s.trim();
    if s.is_empty() {
        return (0, 0);
    }

    let mut parts = s.split('/');
    let a = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
    let b = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
    (a.unwrap_or(0), b.unwrap_or(0))
}

/// Format TRCK/TPOS as "n" or "n/total".
pub(crate) fn format_slash_pair(n: u32, total: u32) -> String {
    if total > 0 {
        format!("{n}/{total}")
    } else {
        n.to_string()
    }
}

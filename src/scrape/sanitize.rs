//! Strips the revision annotation the portal appends to corrected values.
//!
//! A corrected cell renders as the numeric text followed by a footnote on its
//! own line, e.g. `"5.3\nRevision: 12.-"`. The annotation is a newline, the
//! literal `"Revision: "`, a digit run of any length, one of `.` or `-`, and
//! optionally further digits or separators. Only a tail matching that shape is
//! removed; anything else is left untouched and will surface downstream as an
//! invalid observation rather than silently losing text.

/// Marker that introduces the annotation inside a cell.
const REVISION_MARKER: &str = "\nRevision: ";

/// Returns `raw` with a trailing revision annotation removed, or `raw`
/// unchanged when no well-formed annotation is present. Idempotent: clean
/// text passes through byte-for-byte.
pub fn strip_revision_note(raw: &str) -> &str {
    let Some(pos) = raw.find(REVISION_MARKER) else {
        return raw;
    };
    let note = &raw[pos + REVISION_MARKER.len()..];
    let digits = note
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(note.len());
    if digits == 0 {
        return raw;
    }
    let mut tail = note[digits..].chars();
    match tail.next() {
        Some('.') | Some('-') => {}
        _ => return raw,
    }
    if tail.all(|c| c.is_ascii_digit() || c == '.' || c == '-') {
        &raw[..pos]
    } else {
        raw
    }
}

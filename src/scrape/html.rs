//! Minimal tolerant HTML scanning for the portal's markup.
//!
//! The result pages are old-style table layout, so a full DOM is not needed:
//! tag detection is case-insensitive, blocks are matched by nesting depth, and
//! cell text is recovered by stripping tags, decoding the handful of entities
//! the portal emits, and normalizing whitespace. `<br>` becomes a newline so
//! in-cell annotations keep their line structure.

/// One matched element: raw attribute text and raw inner markup.
#[derive(Debug)]
pub(crate) struct TagBlock<'a> {
    pub attrs: &'a str,
    pub inner: &'a str,
}

struct TagOpen {
    start: usize,
    attrs_start: usize,
    attrs_end: usize,
    content_start: usize,
    self_closing: bool,
}

/// All `<tag>` blocks in document order, nested occurrences included.
/// `tag` must be lowercase; matching is case-insensitive.
pub(crate) fn tag_blocks<'a>(html: &'a str, tag: &str) -> Vec<TagBlock<'a>> {
    let lower = html.to_ascii_lowercase();
    let open_pat = format!("<{tag}");
    let close_pat = format!("</{tag}");
    let mut blocks = Vec::new();
    let mut pos = 0;
    while let Some(open) = find_open(&lower, &open_pat, pos) {
        let attrs = &html[open.attrs_start..open.attrs_end];
        if open.self_closing {
            blocks.push(TagBlock { attrs, inner: "" });
            pos = open.content_start;
            continue;
        }
        let inner_end = close_of(&lower, &open_pat, &close_pat, open.content_start);
        blocks.push(TagBlock {
            attrs,
            inner: &html[open.content_start..inner_end],
        });
        // resume inside the block so nested occurrences are found too
        pos = open.content_start;
    }
    blocks
}

/// Text contents of the row's `td`/`th` cells, in document order.
pub(crate) fn cell_texts(row_inner: &str) -> Vec<String> {
    let lower = row_inner.to_ascii_lowercase();
    let mut cells = Vec::new();
    let mut pos = 0;
    while let Some(open) = next_cell_open(&lower, pos) {
        if open.self_closing {
            cells.push(String::new());
            pos = open.content_start;
            continue;
        }
        let end = cell_end(&lower, open.content_start);
        cells.push(cell_text(&row_inner[open.content_start..end]));
        pos = end;
    }
    cells
}

/// Visible text of a cell: tags stripped (`<br>` as newline), entities decoded,
/// whitespace collapsed per line, empty lines dropped.
pub(crate) fn cell_text(inner: &str) -> String {
    let mut text = String::with_capacity(inner.len());
    let mut rest = inner;
    while let Some(lt) = rest.find('<') {
        text.push_str(&rest[..lt]);
        let tag = &rest[lt..];
        let Some(gt) = tag.find('>') else {
            // dangling tag at end of cell
            rest = "";
            break;
        };
        let name: String = tag[1..gt]
            .trim_start_matches('/')
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect();
        if name.eq_ignore_ascii_case("br") {
            text.push('\n');
        }
        rest = &tag[gt + 1..];
    }
    text.push_str(rest);
    normalize_text(&decode_entities(&text))
}

/// Whether the element's `class` attribute value contains `class` as a
/// substring, mirroring an xpath `contains(@class, ...)` selector.
pub(crate) fn class_contains(attrs: &str, class: &str) -> bool {
    attr_value(attrs, "class").is_some_and(|value| value.contains(class))
}

fn attr_value<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    let lower = attrs.to_ascii_lowercase();
    let pat = format!("{name}=");
    let mut search = 0;
    while let Some(rel) = lower[search..].find(&pat) {
        let start = search + rel;
        let after = start + pat.len();
        if start > 0 && !lower.as_bytes()[start - 1].is_ascii_whitespace() {
            search = after;
            continue;
        }
        let rest = &attrs[after..];
        let value = match rest.as_bytes().first() {
            Some(b'"') => rest[1..].split('"').next(),
            Some(b'\'') => rest[1..].split('\'').next(),
            _ => rest.split_whitespace().next(),
        };
        return value.or(Some(""));
    }
    None
}

fn find_open(lower: &str, open_pat: &str, from: usize) -> Option<TagOpen> {
    let mut search = from;
    while search < lower.len() {
        let rel = lower[search..].find(open_pat)?;
        let start = search + rel;
        let attrs_start = start + open_pat.len();
        // require a real tag boundary after the name ("<td" must not match "<tdx")
        match lower.as_bytes().get(attrs_start) {
            Some(b' ') | Some(b'\t') | Some(b'\r') | Some(b'\n') | Some(b'>') | Some(b'/') => {}
            _ => {
                search = start + 1;
                continue;
            }
        }
        let gt = attrs_start + lower[attrs_start..].find('>')?;
        let self_closing = lower[attrs_start..gt].trim_end().ends_with('/');
        return Some(TagOpen {
            start,
            attrs_start,
            attrs_end: gt,
            content_start: gt + 1,
            self_closing,
        });
    }
    None
}

/// Byte offset where the matching close tag starts, tolerating nesting and
/// unclosed trailing markup.
fn close_of(lower: &str, open_pat: &str, close_pat: &str, from: usize) -> usize {
    let mut depth = 1usize;
    let mut cursor = from;
    while depth > 0 {
        let next_open = find_open(lower, open_pat, cursor);
        let next_close = lower[cursor..].find(close_pat).map(|rel| cursor + rel);
        match (next_open, next_close) {
            (Some(open), Some(close)) if open.start < close => {
                if !open.self_closing {
                    depth += 1;
                }
                cursor = open.content_start;
            }
            (_, Some(close)) => {
                depth -= 1;
                if depth == 0 {
                    return close;
                }
                cursor = close + close_pat.len();
            }
            _ => return lower.len(),
        }
    }
    lower.len()
}

fn next_cell_open(lower: &str, from: usize) -> Option<TagOpen> {
    let td = find_open(lower, "<td", from);
    let th = find_open(lower, "<th", from);
    match (td, th) {
        (Some(a), Some(b)) => Some(if a.start <= b.start { a } else { b }),
        (a, b) => a.or(b),
    }
}

/// Cells end at their close tag, or at the next cell when the markup omits it.
fn cell_end(lower: &str, from: usize) -> usize {
    let close = ["</td", "</th"]
        .iter()
        .filter_map(|pat| lower[from..].find(pat).map(|rel| from + rel))
        .min();
    let next = next_cell_open(lower, from).map(|open| open.start);
    close.into_iter().chain(next).min().unwrap_or(lower.len())
}

fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail[1..].find(';') {
            // entity names are short; a distant semicolon means literal text
            Some(semi) if semi <= 8 => {
                let name = &tail[1..semi + 1];
                match decode_entity(name) {
                    Some(ch) => out.push(ch),
                    None => out.push_str(&tail[..semi + 2]),
                }
                rest = &tail[semi + 2..];
            }
            _ => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "nbsp" => Some(' '),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(|c| c == 'x' || c == 'X') {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse::<u32>().ok()?,
            };
            char::from_u32(value)
        }
    }
}

fn normalize_text(text: &str) -> String {
    let lines: Vec<String> = text
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect();
    lines.join("\n")
}

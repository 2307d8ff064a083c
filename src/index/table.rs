//! Minimal HTML table scanning for constituent lists.
//!
//! Reference pages keep their constituents in a plain `wikitable`; a tag scanner is
//! enough to read header and body cells without a full HTML parser. `colspan` and
//! `rowspan` are not expanded.

use crate::core::ScreenerError;

/// Header names that mark the symbol column, in lookup priority within a table.
pub const SYMBOL_HEADERS: [&str; 3] = ["Symbol", "Ticker symbol", "Ticker"];

/// Returns the symbols of the first table whose header row names a symbol column.
///
/// # Errors
///
/// Returns [`ScreenerError::SymbolColumnNotFound`] if no table qualifies.
pub fn extract_symbols(html: &str) -> Result<Vec<String>, ScreenerError> {
    let lower = html.to_ascii_lowercase();

    for (start, end) in tables(&lower) {
        let rows = rows(&lower, start, end);
        let Some((header, body)) = rows.split_first() else {
            continue;
        };
        let header: Vec<String> = cells(html, &lower, *header).collect();

        let Some(column) = SYMBOL_HEADERS
            .iter()
            .find_map(|name| header.iter().position(|h| h.as_str() == *name))
        else {
            continue;
        };

        tracing::debug!(header = %header[column], rows = body.len(), "symbol column found");

        return Ok(body
            .iter()
            .filter_map(|row| cells(html, &lower, *row).nth(column))
            .filter(|s| !s.is_empty())
            .collect());
    }

    Err(ScreenerError::SymbolColumnNotFound)
}

/// Byte ranges `(content_start, content_end)` of every `<table>` in document order.
fn tables(lower: &str) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut pos = 0usize;

    while let Some(open) = find_tag(lower, "table", pos) {
        let Some(content_start) = lower[open..].find('>').map(|i| open + i + 1) else {
            break;
        };
        let end = matching_table_end(lower, content_start).unwrap_or(lower.len());
        out.push((content_start, end));
        pos = content_start;
    }
    out
}

fn matching_table_end(lower: &str, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut pos = from;
    loop {
        let close = lower[pos..].find("</table").map(|i| pos + i)?;
        match find_tag(lower, "table", pos) {
            Some(open) if open < close => {
                depth += 1;
                pos = open + 1;
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(close);
                }
                pos = close + 1;
            }
        }
    }
}

/// Row segments of a table: each runs from one `<tr` to the next (or the table end).
fn rows(lower: &str, start: usize, end: usize) -> Vec<(usize, usize)> {
    let mut starts = Vec::new();
    let mut pos = start;
    while let Some(tr) = find_tag(lower, "tr", pos).filter(|&i| i < end) {
        starts.push(tr);
        pos = tr + 1;
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &s)| (s, starts.get(i + 1).copied().unwrap_or(end)))
        .collect()
}

/// Text of every `<td>`/`<th>` cell within a row segment.
fn cells<'a>(
    html: &'a str,
    lower: &'a str,
    (start, end): (usize, usize),
) -> impl Iterator<Item = String> + 'a {
    let mut opens = Vec::new();
    let mut pos = start;
    loop {
        let next = [find_tag(lower, "td", pos), find_tag(lower, "th", pos)]
            .into_iter()
            .flatten()
            .filter(|&i| i < end)
            .min();
        match next {
            Some(i) => {
                opens.push(i);
                pos = i + 1;
            }
            None => break,
        }
    }

    let bounds: Vec<(usize, usize)> = opens
        .iter()
        .enumerate()
        .filter_map(|(i, &open)| {
            let content = lower[open..end].find('>').map(|g| open + g + 1)?;
            Some((content, opens.get(i + 1).copied().unwrap_or(end)))
        })
        .collect();

    bounds.into_iter().map(move |(s, e)| cell_text(&html[s..e]))
}

/// Position of the next `<name` opening tag at or after `from`, skipping longer names
/// such as `<thead` when looking for `<th`.
fn find_tag(lower: &str, name: &str, from: usize) -> Option<usize> {
    let needle = format!("<{name}");
    let bytes = lower.as_bytes();
    let mut pos = from;
    while let Some(i) = lower.get(pos..)?.find(&needle) {
        let at = pos + i;
        match bytes.get(at + needle.len()) {
            Some(b'>' | b'/') | None => return Some(at),
            Some(c) if c.is_ascii_whitespace() => return Some(at),
            _ => pos = at + needle.len(),
        }
    }
    None
}

/// Strips tags, decodes common entities and collapses whitespace.
fn cell_text(fragment: &str) -> String {
    let mut text = String::with_capacity(fragment.len());
    let mut in_tag = false;
    for c in fragment.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    let decoded = decode_entities(&text);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

//! Page selection grammar shared by split and delete
//!
//! A selection is a comma-separated list of parts. Each part is:
//! - `N` (single page, 1-indexed)
//! - `N-M` (inclusive range, `N <= M`)
//! - `z` (last page), `rN` (N-th from last), usable on either side of a range
//! - any of the above followed by `:odd` or `:even`

use crate::error::{Error, Result};

/// Parse a single part of a selection into 1-indexed page numbers, in order.
pub fn parse_part(part: &str, num_pages: u32) -> Result<Vec<u32>> {
    if num_pages == 0 {
        return Err(Error::InvalidPdf {
            reason: "PDF has no pages".to_string(),
        });
    }

    let part = part.trim();
    if part.is_empty() {
        return Err(Error::InvalidPageRange {
            range: "empty range".to_string(),
        });
    }

    let (range_part, modifier) = if let Some(r) = part.strip_suffix(":odd") {
        (r, Some(1))
    } else if let Some(r) = part.strip_suffix(":even") {
        (r, Some(0))
    } else {
        (part, None)
    };

    let pages: Vec<u32> = match range_part.split_once('-') {
        Some((start, end)) => {
            let start = resolve_page_ref(start, num_pages)?;
            let end = resolve_page_ref(end, num_pages)?;
            if start > end {
                return Err(Error::InvalidPageRange {
                    range: format!("{} (start is after end)", part),
                });
            }
            (start..=end).collect()
        }
        None => vec![resolve_page_ref(range_part, num_pages)?],
    };

    let pages = match modifier {
        Some(parity) => pages.into_iter().filter(|p| p % 2 == parity).collect(),
        None => pages,
    };

    if pages.is_empty() {
        return Err(Error::InvalidPageRange {
            range: part.to_string(),
        });
    }

    Ok(pages)
}

/// Parse a selection into one page list per comma-separated part.
///
/// Used by split: every part becomes its own output document.
pub fn parse_ranges(ranges: &str, num_pages: u32) -> Result<Vec<Vec<u32>>> {
    let parts: Vec<&str> = ranges
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    if parts.is_empty() {
        return Err(Error::InvalidPageRange {
            range: ranges.to_string(),
        });
    }

    parts
        .into_iter()
        .map(|part| parse_part(part, num_pages))
        .collect()
}

/// Parse a selection into a sorted, de-duplicated set of page numbers.
///
/// Used by delete, where order and repetition are irrelevant.
pub fn parse_page_set(selection: &str, num_pages: u32) -> Result<Vec<u32>> {
    let mut pages: Vec<u32> = parse_ranges(selection, num_pages)?
        .into_iter()
        .flatten()
        .collect();
    pages.sort_unstable();
    pages.dedup();
    Ok(pages)
}

/// Resolve a page reference (1-indexed) to a page number.
/// Handles: numeric "N", "z" (last), "rN" (N-th from last)
fn resolve_page_ref(s: &str, num_pages: u32) -> Result<u32> {
    let s = s.trim();
    if s == "z" {
        return Ok(num_pages);
    }
    if let Some(r_num) = s.strip_prefix('r') {
        let n: u32 = r_num.parse().map_err(|_| Error::InvalidPageRange {
            range: s.to_string(),
        })?;
        if n == 0 || n > num_pages {
            return Err(Error::InvalidPageRange {
                range: format!("{} out of range (document has {} pages)", s, num_pages),
            });
        }
        return Ok(num_pages - n + 1);
    }
    let page: u32 = s.parse().map_err(|_| Error::InvalidPageRange {
        range: s.to_string(),
    })?;
    if page == 0 || page > num_pages {
        return Err(Error::InvalidPageRange {
            range: format!("page {} out of range (1-{})", page, num_pages),
        });
    }
    Ok(page)
}

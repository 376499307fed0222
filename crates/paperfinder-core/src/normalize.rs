//! Display normalizers over [`WorkRecord`].
//!
//! Every function here is total: absent or malformed input degrades to an
//! empty string or `None`.

use crate::record::{Author, WorkRecord};

/// First year of `issued.date-parts`.
pub fn year(item: &WorkRecord) -> Option<i64> {
    let first = item.date_parts()?.first()?.as_array()?.first()?;
    first
        .as_i64()
        .or_else(|| first.as_f64().map(|f| f as i64))
}

/// "Given Family" per author, joined by ", ".
pub fn authors(item: &WorkRecord) -> String {
    item.authors()
        .iter()
        .map(plain_name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Citation-style authors: "Family, G. M." per author, joined by ", ".
pub fn citation_authors(item: &WorkRecord) -> String {
    item.authors()
        .iter()
        .map(|a| match a.family.as_deref() {
            Some(family) => {
                let initials: Vec<String> = a
                    .given
                    .as_deref()
                    .unwrap_or("")
                    .split_whitespace()
                    .filter_map(|w| w.chars().next())
                    .map(|c| format!("{}.", c))
                    .collect();
                if initials.is_empty() {
                    family.to_string()
                } else {
                    format!("{}, {}", family, initials.join(" "))
                }
            }
            None => plain_name(a),
        })
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn plain_name(a: &Author) -> String {
    [a.given.as_deref(), a.family.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Journal (container title), or empty.
pub fn journal(item: &WorkRecord) -> String {
    item.container_title().unwrap_or("").to_string()
}

/// URL of the first link whose content type mentions `application/pdf`.
pub fn pdf_link(item: &WorkRecord) -> String {
    item.links()
        .into_iter()
        .find(|l| l.content_type.to_ascii_lowercase().contains("application/pdf"))
        .map(|l| l.url)
        .unwrap_or_default()
}

/// Formatted reference: `<authors> (<year>). <title>. <journal>. <doi-url>`.
///
/// Authors, title and DOI are dropped when empty. The journal slot always
/// takes part in the join, so a missing journal leaves a double space before
/// the DOI URL.
pub fn citation(item: &WorkRecord) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(5);

    let authors = citation_authors(item);
    if !authors.is_empty() {
        parts.push(authors);
    }

    let year = year(item)
        .map(|y| y.to_string())
        .unwrap_or_else(|| "n.d.".to_string());
    parts.push(format!("({}).", year));

    if let Some(title) = item.title() {
        parts.push(format!("{}.", title));
    }

    let journal = journal(item);
    parts.push(if journal.is_empty() {
        String::new()
    } else {
        format!("{}.", journal)
    });

    let doi = item.doi_url();
    if !doi.is_empty() {
        parts.push(doi);
    }

    parts.join(" ")
}

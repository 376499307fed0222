//! Citation-threshold and PDF-availability predicates.
//!
//! Both filters are stable: surviving records keep their relative order.

use crate::normalize::pdf_link;
use crate::params::SearchParams;
use crate::record::WorkRecord;

/// Records without a citation count pass only a threshold of exactly 0.
pub fn meets_citation_threshold(item: &WorkRecord, min_citations: i64) -> bool {
    match item.citation_count() {
        Some(count) => i64::try_from(count).unwrap_or(i64::MAX) >= min_citations,
        None => min_citations == 0,
    }
}

pub fn has_pdf(item: &WorkRecord) -> bool {
    !pdf_link(item).is_empty()
}

/// Citation threshold only. This is what a completed search stores.
pub fn filter_by_citations(items: Vec<WorkRecord>, params: &SearchParams) -> Vec<WorkRecord> {
    let min = params.min_citations();
    items
        .into_iter()
        .filter(|it| meets_citation_threshold(it, min))
        .collect()
}

/// PDF rule alone over a borrowed list.
pub fn pdf_view<'a>(items: &'a [WorkRecord], only_pdf: bool) -> Vec<&'a WorkRecord> {
    items.iter().filter(|it| !only_pdf || has_pdf(it)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cited(n: Option<u64>, pdf: bool, tag: &str) -> WorkRecord {
        let mut v = json!({"title": [tag]});
        if let Some(n) = n {
            v["is-referenced-by-count"] = json!(n);
        }
        if pdf {
            v["link"] = json!([{"URL": format!("https://x/{tag}.pdf"), "content-type": "application/pdf"}]);
        }
        WorkRecord::new(v)
    }

    fn titles(items: &[&WorkRecord]) -> Vec<String> {
        items.iter().map(|i| i.title().unwrap_or("").to_string()).collect()
    }

    fn with_min(min: &str, only_pdf: bool) -> SearchParams {
        SearchParams {
            min_citations: min.into(),
            only_pdf,
            ..Default::default()
        }
    }

    #[test]
    fn missing_count_kept_only_at_zero() {
        let item = cited(None, false, "a");
        assert!(meets_citation_threshold(&item, 0));
        assert!(!meets_citation_threshold(&item, 1));
        assert!(!meets_citation_threshold(&item, 500));
    }

    #[test]
    fn threshold_is_inclusive() {
        let item = cited(Some(10), false, "a");
        assert!(meets_citation_threshold(&item, 10));
        assert!(!meets_citation_threshold(&item, 11));
    }

    #[test]
    fn citation_filter_is_stable() {
        let items = vec![
            cited(Some(5), false, "a"),
            cited(Some(1), false, "b"),
            cited(Some(9), false, "c"),
            cited(None, false, "d"),
            cited(Some(5), false, "e"),
        ];
        let kept = filter_by_citations(items, &with_min("5", false));
        let kept: Vec<&WorkRecord> = kept.iter().collect();
        assert_eq!(titles(&kept), vec!["a", "c", "e"]);
    }

    #[test]
    fn negative_threshold_keeps_counted_drops_uncounted() {
        let items = vec![cited(None, false, "no count"), cited(Some(0), false, "zero")];
        let kept = filter_by_citations(items, &with_min("-5", false));
        let kept: Vec<&WorkRecord> = kept.iter().collect();
        assert_eq!(titles(&kept), vec!["zero"]);
    }

    #[test]
    fn oversized_threshold_drops_everything() {
        let items = vec![cited(None, false, "a"), cited(Some(1_000_000), false, "b")];
        let kept = filter_by_citations(items, &with_min("99999999999999999999", false));
        assert!(kept.is_empty());
    }

    #[test]
    fn pdf_only_and_threshold_intersect() {
        let items = vec![
            cited(Some(3), true, "a"),
            cited(Some(3), false, "b"),
            cited(Some(0), true, "c"),
            cited(None, true, "d"),
        ];
        let stored = filter_by_citations(items, &with_min("1", true));
        assert_eq!(titles(&pdf_view(&stored, true)), vec!["a"]);
    }

    #[test]
    fn pdf_view_does_not_touch_source() {
        let items = vec![cited(None, false, "a"), cited(None, true, "b")];
        let view = pdf_view(&items, true);
        assert_eq!(titles(&view), vec!["b"]);
        assert_eq!(items.len(), 2);
    }
}

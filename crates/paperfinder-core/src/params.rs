use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Default `rows` when the result-count field is empty or not a number.
pub const DEFAULT_MAX_RESULTS: u32 = 50;
/// Crossref caps `rows` per request; we never ask for more.
pub const MAX_RESULTS_LIMIT: u32 = 100;

/// User-editable search inputs, kept exactly as typed.
///
/// Numeric fields stay strings so that a half-typed value survives a
/// save/restore cycle; interpretation happens in the accessors below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchParams {
    pub query: String,
    pub min_year: String,
    pub max_year: String,
    pub min_citations: String,
    pub max_results: String,
    pub only_pdf: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: String::new(),
            min_year: String::new(),
            max_year: current_year().to_string(),
            min_citations: "0".to_string(),
            max_results: DEFAULT_MAX_RESULTS.to_string(),
            only_pdf: false,
        }
    }
}

/// Which field of [`SearchParams`] an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamField {
    Query,
    MinYear,
    MaxYear,
    MinCitations,
    MaxResults,
}

impl ParamField {
    pub fn all() -> &'static [ParamField] {
        &[
            ParamField::Query,
            ParamField::MinYear,
            ParamField::MaxYear,
            ParamField::MinCitations,
            ParamField::MaxResults,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Query => "Kata kunci",
            Self::MinYear => "Tahun min",
            Self::MaxYear => "Tahun max",
            Self::MinCitations => "Sitasi min",
            Self::MaxResults => "Jumlah hasil",
        }
    }
}

impl SearchParams {
    pub fn query_text(&self) -> &str {
        self.query.trim()
    }

    pub fn field(&self, field: ParamField) -> &str {
        match field {
            ParamField::Query => &self.query,
            ParamField::MinYear => &self.min_year,
            ParamField::MaxYear => &self.max_year,
            ParamField::MinCitations => &self.min_citations,
            ParamField::MaxResults => &self.max_results,
        }
    }

    pub fn field_mut(&mut self, field: ParamField) -> &mut String {
        match field {
            ParamField::Query => &mut self.query,
            ParamField::MinYear => &mut self.min_year,
            ParamField::MaxYear => &mut self.max_year,
            ParamField::MinCitations => &mut self.min_citations,
            ParamField::MaxResults => &mut self.max_results,
        }
    }

    pub fn min_year(&self) -> Option<i64> {
        parse_int(&self.min_year)
    }

    pub fn max_year(&self) -> Option<i64> {
        parse_int(&self.max_year)
    }

    /// Effective `rows`: 50 when unparseable, otherwise clamped to [1, 100].
    pub fn rows(&self) -> u32 {
        match parse_int(&self.max_results) {
            Some(n) => n.clamp(1, MAX_RESULTS_LIMIT as i64) as u32,
            None => DEFAULT_MAX_RESULTS,
        }
    }

    /// Citation threshold; an unparseable value counts as 0. Negative
    /// values are kept as entered.
    pub fn min_citations(&self) -> i64 {
        parse_int(&self.min_citations).unwrap_or(0)
    }

    /// Fill blank fields from a restored snapshot the way a fresh form would.
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.max_year.trim().is_empty() {
            self.max_year = defaults.max_year;
        }
        if self.min_citations.trim().is_empty() {
            self.min_citations = defaults.min_citations;
        }
        if self.max_results.trim().is_empty() {
            self.max_results = defaults.max_results;
        }
        self
    }
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Leading-integer parse: optional sign followed by digits, trailing text
/// ignored ("2020abc" → 2020, "abc" → None). Digit runs too long for `i64`
/// saturate.
fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim();
    let (sign, rest) = match s.strip_prefix('-') {
        Some(r) => (-1, r),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    match digits.parse::<i64>() {
        Ok(n) => Some(sign * n),
        Err(_) if sign < 0 => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_results(v: &str) -> SearchParams {
        SearchParams {
            max_results: v.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn rows_clamped_and_defaulted() {
        assert_eq!(with_results("10").rows(), 10);
        assert_eq!(with_results("0").rows(), 1);
        assert_eq!(with_results("-5").rows(), 1);
        assert_eq!(with_results("1000").rows(), 100);
        assert_eq!(with_results("").rows(), 50);
        assert_eq!(with_results("lots").rows(), 50);
        assert_eq!(with_results("25x").rows(), 25);
    }

    #[test]
    fn oversized_numbers_saturate_instead_of_defaulting() {
        assert_eq!(with_results("99999999999999999999").rows(), 100);
        assert_eq!(with_results("-99999999999999999999").rows(), 1);
        let p = SearchParams {
            min_citations: "99999999999999999999".into(),
            ..Default::default()
        };
        assert_eq!(p.min_citations(), i64::MAX);
    }

    #[test]
    fn min_citations_defaults_to_zero() {
        let mut p = SearchParams::default();
        assert_eq!(p.min_citations(), 0);
        p.min_citations = "abc".into();
        assert_eq!(p.min_citations(), 0);
        p.min_citations = "12".into();
        assert_eq!(p.min_citations(), 12);
        p.min_citations = "-5".into();
        assert_eq!(p.min_citations(), -5);
    }

    #[test]
    fn default_max_year_is_current_year() {
        assert_eq!(SearchParams::default().max_year(), Some(current_year() as i64));
    }

    #[test]
    fn with_defaults_fills_blanks_only() {
        let p = SearchParams {
            query: "q".into(),
            min_year: String::new(),
            max_year: String::new(),
            min_citations: String::new(),
            max_results: "7".into(),
            only_pdf: true,
        }
        .with_defaults();
        assert_eq!(p.max_year, current_year().to_string());
        assert_eq!(p.min_citations, "0");
        assert_eq!(p.max_results, "7");
        assert!(p.min_year.is_empty());
        assert!(p.only_pdf);
    }

    #[test]
    fn serializes_with_form_field_names() {
        let json = serde_json::to_value(SearchParams::default()).unwrap();
        for key in ["query", "minYear", "maxYear", "minCitations", "maxResults", "onlyPdf"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}

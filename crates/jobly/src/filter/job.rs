use super::{
    WhereBuilder, WhereClause, contains_pattern, json_count, json_flag, json_object, json_text,
    parse_count, parse_flag, unknown_filter,
};
use crate::error::{JoblyError, JoblyResult};

/// Optional criteria for listing jobs.
///
/// Every field is independent; `None` means no constraint on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    /// Inclusive lower bound on salary.
    pub min_salary: Option<i32>,
    /// Only `Some(true)` constrains; `Some(false)` behaves like `None`.
    pub has_equity: Option<bool>,
}

impl JobFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn min_salary(mut self, min_salary: i32) -> Self {
        self.min_salary = Some(min_salary);
        self
    }

    pub fn has_equity(mut self, has_equity: bool) -> Self {
        self.has_equity = Some(has_equity);
        self
    }

    /// Parse `title`, `minSalary` and `hasEquity` from query-string pairs.
    ///
    /// A `minSalary` that is not a non-negative integer, a `hasEquity` that is
    /// not `true`/`false`, or any other key is rejected with
    /// [`JoblyError::InvalidInput`].
    pub fn from_query_pairs<I, K, V>(pairs: I) -> JoblyResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "title" => filter.title = Some(value.to_string()),
                "minSalary" => filter.min_salary = Some(parse_count("minSalary", value)?),
                "hasEquity" => filter.has_equity = Some(parse_flag("hasEquity", value)?),
                other => return Err(unknown_filter(other)),
            }
        }
        Ok(filter)
    }

    /// Parse a filter from a JSON object (`null` yields the empty filter).
    pub fn from_json(json: &serde_json::Value) -> JoblyResult<Self> {
        let mut filter = Self::default();
        let Some(object) = json_object(json)? else {
            return Ok(filter);
        };
        for (key, value) in object {
            if value.is_null() {
                continue;
            }
            match key.as_str() {
                "title" => filter.title = Some(json_text("title", value)?),
                "minSalary" => filter.min_salary = Some(json_count("minSalary", value)?),
                "hasEquity" => filter.has_equity = Some(json_flag("hasEquity", value)?),
                other => return Err(unknown_filter(other)),
            }
        }
        Ok(filter)
    }

    /// Reject criteria the store must never see.
    pub fn validate(&self) -> JoblyResult<()> {
        match self.min_salary {
            Some(n) if n < 0 => Err(JoblyError::invalid_input(format!(
                "minSalary must not be negative, got {n}"
            ))),
            _ => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.min_salary.is_none() && self.has_equity != Some(true)
    }

    /// Render the `WHERE` fragment.
    ///
    /// Conditions are evaluated in a fixed order: title, minimum salary, equity.
    /// The equity condition compares stored values only and binds nothing.
    pub fn to_where_clause(&self) -> WhereClause {
        let mut w = WhereBuilder::default();
        if let Some(title) = &self.title {
            w.push_bound("title ILIKE", contains_pattern(title));
        }
        if let Some(min_salary) = self.min_salary {
            w.push_bound("salary >=", min_salary);
        }
        if self.has_equity == Some(true) {
            w.push_raw("equity::float > 0");
        }
        w.finish()
    }
}

/// Validate and render an optional job filter.
///
/// `None` and an all-empty filter both produce an empty clause.
pub fn build_job_filter(filter: Option<&JobFilter>) -> JoblyResult<WhereClause> {
    match filter {
        Some(filter) => {
            filter.validate()?;
            Ok(filter.to_where_clause())
        }
        None => Ok(WhereClause::default()),
    }
}

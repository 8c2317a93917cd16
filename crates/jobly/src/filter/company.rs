use super::{
    WhereBuilder, WhereClause, contains_pattern, json_count, json_object, json_text, parse_count,
    unknown_filter,
};
use crate::error::{JoblyError, JoblyResult};

/// Optional criteria for listing companies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyFilter {
    /// Case-insensitive substring of the company name.
    pub name: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn min_employees(mut self, n: i32) -> Self {
        self.min_employees = Some(n);
        self
    }

    pub fn max_employees(mut self, n: i32) -> Self {
        self.max_employees = Some(n);
        self
    }

    /// Parse `name`, `minEmployees` and `maxEmployees` from query-string pairs.
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
                "name" => filter.name = Some(value.to_string()),
                "minEmployees" => filter.min_employees = Some(parse_count("minEmployees", value)?),
                "maxEmployees" => filter.max_employees = Some(parse_count("maxEmployees", value)?),
                other => return Err(unknown_filter(other)),
            }
        }
        Ok(filter)
    }

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
                "name" => filter.name = Some(json_text("name", value)?),
                "minEmployees" => filter.min_employees = Some(json_count("minEmployees", value)?),
                "maxEmployees" => filter.max_employees = Some(json_count("maxEmployees", value)?),
                other => return Err(unknown_filter(other)),
            }
        }
        Ok(filter)
    }

    pub fn validate(&self) -> JoblyResult<()> {
        for (name, bound) in [
            ("minEmployees", self.min_employees),
            ("maxEmployees", self.max_employees),
        ] {
            if let Some(n) = bound.filter(|n| *n < 0) {
                return Err(JoblyError::invalid_input(format!(
                    "{name} must not be negative, got {n}"
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if min > max {
                return Err(JoblyError::invalid_input(
                    "minEmployees cannot be greater than maxEmployees",
                ));
            }
        }
        Ok(())
    }

    /// Validate, then render the `WHERE` fragment (name, min, max order).
    pub fn to_where_clause(&self) -> JoblyResult<WhereClause> {
        self.validate()?;

        let mut w = WhereBuilder::default();
        if let Some(name) = &self.name {
            w.push_bound("name ILIKE", contains_pattern(name));
        }
        if let Some(min) = self.min_employees {
            w.push_bound("num_employees >=", min);
        }
        if let Some(max) = self.max_employees {
            w.push_bound("num_employees <=", max);
        }
        Ok(w.finish())
    }
}

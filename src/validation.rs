use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::errors::ApiError;

/// Per-field constraint. String bounds apply to the trimmed value,
/// numeric bounds are inclusive.
#[derive(Debug, Clone, Copy)]
pub enum Constraint {
    Text {
        min: Option<usize>,
        max: Option<usize>,
    },
    Email {
        min: usize,
        max: usize,
    },
    Number {
        min: f64,
        max: f64,
    },
    Bool,
    TextList {
        min_items: usize,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub required: bool,
    pub constraint: Constraint,
}

/// A declarative payload schema: an ordered rule table interpreted by
/// [`Schema::check`]. Resources declare one strict (create) and one
/// relaxed (update) table next to their DTOs.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub fields: &'static [Field],
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

impl Schema {
    /// Validate a raw JSON payload against the rule table.
    ///
    /// Fields are checked in declaration order and only the first
    /// failure is reported. Keys not declared in the table are
    /// rejected. `null` counts as absent.
    pub fn check(&self, payload: &Value) -> Result<(), ApiError> {
        let object = payload
            .as_object()
            .ok_or_else(|| ApiError::Validation("request body must be a JSON object".into()))?;

        for field in self.fields {
            let value = match object.get(field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        return Err(fail(field.name, "is required"));
                    }
                    continue;
                }
                Some(v) => v,
            };
            check_constraint(field.name, &field.constraint, value)?;
        }

        for key in object.keys() {
            if !self.fields.iter().any(|f| f.name == key) {
                return Err(ApiError::Validation(format!("\"{key}\" is not allowed")));
            }
        }

        Ok(())
    }
}

fn check_constraint(name: &str, constraint: &Constraint, value: &Value) -> Result<(), ApiError> {
    match *constraint {
        Constraint::Text { min, max } => {
            let s = value.as_str().ok_or_else(|| fail(name, "must be a string"))?;
            let len = s.trim().chars().count();
            if let Some(min) = min {
                if len < min {
                    return Err(fail(name, &format!("must be at least {min} characters")));
                }
            }
            if let Some(max) = max {
                if len > max {
                    return Err(fail(name, &format!("must be at most {max} characters")));
                }
            }
        }
        Constraint::Email { min, max } => {
            let s = value.as_str().ok_or_else(|| fail(name, "must be a string"))?;
            let trimmed = s.trim();
            let len = trimmed.chars().count();
            if len < min {
                return Err(fail(name, &format!("must be at least {min} characters")));
            }
            if len > max {
                return Err(fail(name, &format!("must be at most {max} characters")));
            }
            if !is_valid_email(trimmed) {
                return Err(fail(name, "must be a valid email address"));
            }
        }
        Constraint::Number { min, max } => {
            let n = value.as_f64().ok_or_else(|| fail(name, "must be a number"))?;
            if n < min {
                return Err(fail(name, &format!("must be at least {min}")));
            }
            if n > max {
                return Err(fail(name, &format!("must be at most {max}")));
            }
        }
        Constraint::Bool => {
            if !value.is_boolean() {
                return Err(fail(name, "must be a boolean"));
            }
        }
        Constraint::TextList { min_items } => {
            let items = value
                .as_array()
                .ok_or_else(|| fail(name, "must be an array of strings"))?;
            if items.iter().any(|v| !v.is_string()) {
                return Err(fail(name, "must be an array of strings"));
            }
            if items.len() < min_items {
                return Err(fail(
                    name,
                    &format!("must contain at least {min_items} item(s)"),
                ));
            }
        }
    }
    Ok(())
}

fn fail(name: &str, detail: &str) -> ApiError {
    ApiError::Validation(format!("\"{name}\" {detail}"))
}

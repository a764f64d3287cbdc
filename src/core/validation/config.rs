//! Per-entity validation configuration

use crate::core::error::{FieldValidationError, ValidationError};
use crate::core::field::is_truthy;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::sync::Arc;

type FieldValidator = Arc<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;
type FieldFilter = Arc<dyn Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync>;
type RecordRule = Arc<dyn Fn(&Map<String, Value>) -> Result<(), FieldValidationError> + Send + Sync>;

/// Validation and filtering rules for one entity's drafts
///
/// Checks run in a fixed order:
/// 1. filters normalize each configured field
/// 2. required fields are checked for truthiness; any miss stops here
/// 3. field validators run on every configured field
/// 4. record rules run on the whole draft
#[derive(Clone, Default)]
pub struct EntityValidationConfig {
    entity: String,
    required: Vec<String>,
    filters: IndexMap<String, Vec<FieldFilter>>,
    validators: IndexMap<String, Vec<FieldValidator>>,
    rules: Vec<RecordRule>,
}

impl EntityValidationConfig {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            ..Default::default()
        }
    }

    /// Mark fields as required
    pub fn require<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for field in fields {
            let field = field.into();
            if !self.required.contains(&field) {
                self.required.push(field);
            }
        }
        self
    }

    /// Add a filter applied to `field` before validation
    pub fn add_filter<F>(mut self, field: &str, filter: F) -> Self
    where
        F: Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.filters
            .entry(field.to_string())
            .or_default()
            .push(Arc::new(filter));
        self
    }

    /// Add a validator for `field`
    pub fn add_validator<F>(mut self, field: &str, validator: F) -> Self
    where
        F: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validators
            .entry(field.to_string())
            .or_default()
            .push(Arc::new(validator));
        self
    }

    /// Add a rule that looks at the whole draft
    pub fn add_rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&Map<String, Value>) -> Result<(), FieldValidationError> + Send + Sync + 'static,
    {
        self.rules.push(Arc::new(rule));
        self
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn required_fields(&self) -> &[String] {
        &self.required
    }

    /// Required fields that are empty in `draft`, in declaration order
    pub fn missing_fields(&self, draft: &Map<String, Value>) -> Vec<String> {
        self.required
            .iter()
            .filter(|field| !is_truthy(draft.get(field.as_str())))
            .cloned()
            .collect()
    }

    /// Normalize and validate a draft, returning the normalized copy
    pub fn validate_and_filter(
        &self,
        mut draft: Map<String, Value>,
    ) -> Result<Map<String, Value>, ValidationError> {
        let mut errors = Vec::new();

        for (field, filters) in &self.filters {
            let Some(mut value) = draft.remove(field) else {
                continue;
            };
            for filter in filters {
                match filter(field, value.clone()) {
                    Ok(filtered) => value = filtered,
                    Err(e) => errors.push(FieldValidationError::new(field.clone(), e.to_string())),
                }
            }
            draft.insert(field.clone(), value);
        }

        if !errors.is_empty() {
            return Err(ValidationError::FieldErrors(errors));
        }

        let missing = self.missing_fields(&draft);
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        for (field, validators) in &self.validators {
            let value = draft.get(field).cloned().unwrap_or(Value::Null);
            for validator in validators {
                if let Err(message) = validator(field, &value) {
                    errors.push(FieldValidationError::new(field.clone(), message));
                }
            }
        }

        for rule in &self.rules {
            if let Err(e) = rule(&draft) {
                errors.push(e);
            }
        }

        if errors.is_empty() {
            Ok(draft)
        } else {
            Err(ValidationError::FieldErrors(errors))
        }
    }
}

impl std::fmt::Debug for EntityValidationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityValidationConfig")
            .field("entity", &self.entity)
            .field("required", &self.required)
            .field("filters", &self.filters.keys().collect::<Vec<_>>())
            .field("validators", &self.validators.keys().collect::<Vec<_>>())
            .field("rules", &self.rules.len())
            .finish()
    }
}

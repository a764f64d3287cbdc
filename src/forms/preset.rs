//! Per-entity form presets
//!
//! A preset holds everything that differs between the entity screens:
//! required fields and extra rules, the blank draft, delete guards, how images
//! are handled and whether the list is paginated.

use crate::core::error::FieldValidationError;
use crate::core::validation::{EntityValidationConfig, filters, validators};
use crate::services::UploadTarget;
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// Returns the reason a record may not be deleted
pub type DeleteGuard = Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// How a form handles its image field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMode {
    /// No image field
    None,
    /// Upload on attach; the returned filename is stored in `field`
    Eager { field: &'static str, target: UploadTarget },
    /// Keep the file until save, then send the draft as multipart
    Deferred,
}

/// Configuration of one entity form
#[derive(Clone)]
pub struct EntityPreset {
    name: &'static str,
    label: &'static str,
    validation: EntityValidationConfig,
    defaults: Map<String, Value>,
    delete_guards: Vec<DeleteGuard>,
    image: ImageMode,
    page_size: Option<u32>,
}

impl EntityPreset {
    pub fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            validation: EntityValidationConfig::new(name),
            defaults: Map::new(),
            delete_guards: Vec::new(),
            image: ImageMode::None,
            page_size: None,
        }
    }

    pub fn with_validation(mut self, validation: EntityValidationConfig) -> Self {
        self.validation = validation;
        self
    }

    /// Seed values for a blank draft; non-object values are ignored
    pub fn with_defaults(mut self, defaults: Value) -> Self {
        if let Value::Object(map) = defaults {
            self.defaults = map;
        }
        self
    }

    pub fn with_delete_guard<F>(mut self, guard: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        self.delete_guards.push(Arc::new(guard));
        self
    }

    pub fn with_image(mut self, image: ImageMode) -> Self {
        self.image = image;
        self
    }

    /// Paginate the list with `page_size` records per page
    pub fn paginated(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size.max(1));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Singular label used in prompts and toasts
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn validation(&self) -> &EntityValidationConfig {
        &self.validation
    }

    pub fn required_fields(&self) -> &[String] {
        self.validation.required_fields()
    }

    pub fn defaults(&self) -> &Map<String, Value> {
        &self.defaults
    }

    pub fn image(&self) -> ImageMode {
        self.image
    }

    pub fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    /// First guard that blocks deleting `record`
    pub fn delete_blocker(&self, record: &Value) -> Option<String> {
        self.delete_guards.iter().find_map(|guard| guard(record))
    }
}

impl std::fmt::Debug for EntityPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityPreset")
            .field("name", &self.name)
            .field("validation", &self.validation)
            .field("delete_guards", &self.delete_guards.len())
            .field("image", &self.image)
            .field("page_size", &self.page_size)
            .finish()
    }
}

// =============================================================================
// Presets
// =============================================================================

pub fn testimonials() -> EntityPreset {
    EntityPreset::new("testimonials", "testimonial")
        .with_validation(
            EntityValidationConfig::new("testimonials")
                .require(["id", "name", "role", "rating", "review", "category", "accent"])
                .add_filter("id", filters::trim()),
        )
        .with_defaults(json!({ "rating": 5, "accent": "#6366f1", "featured": false }))
        .with_image(ImageMode::Deferred)
}

pub fn mentors() -> EntityPreset {
    EntityPreset::new("mentors", "mentor")
        .with_validation(
            EntityValidationConfig::new("mentors")
                .require(["name", "role", "company", "image"])
                .add_filter("name", filters::trim())
                .add_filter("expertise", filters::comma_list()),
        )
        .with_defaults(json!({ "expertise": [], "isActive": true }))
        .with_image(ImageMode::Eager {
            field: "image",
            target: UploadTarget::MentorImage,
        })
}

pub fn faqs() -> EntityPreset {
    EntityPreset::new("faqs", "FAQ")
        .with_validation(
            EntityValidationConfig::new("faqs")
                .require(["question", "answer", "category"])
                .add_filter("question", filters::trim())
                .add_filter("answer", filters::trim())
                .add_filter("order", filters::to_number()),
        )
        .with_defaults(json!({ "category": "general", "order": 0 }))
}

pub fn company_logos() -> EntityPreset {
    EntityPreset::new("company-logos", "company logo")
        .with_validation(
            EntityValidationConfig::new("company-logos")
                .require(["name", "logo"])
                .add_filter("name", filters::trim()),
        )
        .with_defaults(json!({ "isActive": true }))
}

pub fn trustpilot_reviews() -> EntityPreset {
    EntityPreset::new("trustpilot-reviews", "review")
        .with_validation(
            EntityValidationConfig::new("trustpilot-reviews")
                .require(["name", "rating", "review", "date"])
                .add_filter("name", filters::trim()),
        )
        .with_defaults(json!({ "rating": 5 }))
        .with_image(ImageMode::Deferred)
}

pub fn coupons() -> EntityPreset {
    EntityPreset::new("coupons", "coupon")
        .with_validation(
            EntityValidationConfig::new("coupons")
                .require(["code", "discountType", "discountValue", "validUntil"])
                .add_filter("code", filters::trim())
                .add_filter("code", filters::uppercase())
                .add_filter("discountValue", filters::to_number())
                .add_filter("usageLimit", filters::to_number())
                .add_filter("minPurchaseAmount", filters::to_number())
                .add_validator(
                    "discountType",
                    validators::in_list(vec!["percentage".into(), "fixed".into()]),
                )
                .add_validator("discountValue", validators::positive())
                .add_rule(percentage_cap),
        )
        .with_defaults(json!({
            "discountType": "percentage",
            "isActive": true,
            "courseIds": []
        }))
        .with_delete_guard(|coupon| {
            let used = coupon.get("usedCount").and_then(Value::as_f64).unwrap_or(0.0);
            (used > 0.0).then(|| "Cannot delete a coupon that has already been used".to_string())
        })
        .paginated(10)
}

fn percentage_cap(draft: &Map<String, Value>) -> Result<(), FieldValidationError> {
    let is_percentage = draft.get("discountType").and_then(Value::as_str) == Some("percentage");
    let value = draft.get("discountValue").and_then(Value::as_f64);
    match value {
        Some(v) if is_percentage && v > 100.0 => Err(FieldValidationError::new(
            "discountValue",
            "Percentage discount cannot exceed 100",
        )),
        _ => Ok(()),
    }
}

pub fn team_members() -> EntityPreset {
    EntityPreset::new("team-members", "team member")
        .with_validation(
            EntityValidationConfig::new("team-members")
                .require(["name", "role"])
                .add_filter("name", filters::trim()),
        )
}

pub fn users() -> EntityPreset {
    EntityPreset::new("users", "user")
        .with_validation(
            EntityValidationConfig::new("users")
                .require(["name", "email", "role"])
                .add_filter("email", filters::trim())
                .add_filter("email", filters::lowercase()),
        )
        .with_defaults(json!({ "role": "admin", "isActive": true }))
        .paginated(10)
}

/// Preset with no required fields, for resources without a dedicated screen
pub fn plain(name: &'static str) -> EntityPreset {
    EntityPreset::new(name, name)
}

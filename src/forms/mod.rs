//! Form controllers for the admin entity screens
//!
//! Every screen runs the same [`EntityForm`]; what differs between entities
//! lives in its [`EntityPreset`].
//!
//! ```rust,ignore
//! let form = client.form(preset::coupons())?;
//! form.load().await?;
//! form.begin_create();
//! form.set_field("code", "SUMMER25");
//! match form.save().await? {
//!     SaveOutcome::Invalid(e) => println!("{}", e),
//!     _ => {}
//! }
//! ```

pub mod controller;
pub mod feedback;
pub mod preset;

pub use controller::{DeleteOutcome, EditingId, EntityForm, FormState, SaveOutcome};
pub use feedback::{Confirmer, Notice, NoticeLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use preset::{EntityPreset, ImageMode};

use crate::client::AdminClient;
use crate::core::error::{ClientError, ClientResult};
use crate::core::service::RecordService;
use crate::resources::ResourceRegistry;
use std::sync::Arc;

impl AdminClient {
    /// Form controller for `preset`, wired to the matching backend service
    ///
    /// Coupons go through `/coupons/admin`; every other preset is resolved in
    /// the resource catalog by name. Eager image presets get the matching
    /// upload endpoint.
    pub fn form(&self, preset: EntityPreset) -> ClientResult<EntityForm> {
        let service: Arc<dyn RecordService> = if preset.name() == "coupons" {
            Arc::new(self.coupon_admin())
        } else {
            let registry = ResourceRegistry::standard();
            let descriptor = registry.get(preset.name()).ok_or_else(|| {
                ClientError::Config(format!("Unknown admin resource '{}'", preset.name()))
            })?;
            Arc::new(self.resource(descriptor))
        };

        let mut form = EntityForm::new(preset, service);
        if let ImageMode::Eager { target, .. } = form.preset().image() {
            form = form.with_uploader(Arc::new(self.uploads().uploader(target)));
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_factory_resolves_presets() {
        let client = AdminClient::builder().build().unwrap();
        for preset in [
            preset::testimonials(),
            preset::mentors(),
            preset::faqs(),
            preset::company_logos(),
            preset::trustpilot_reviews(),
            preset::coupons(),
            preset::team_members(),
            preset::users(),
        ] {
            assert!(client.form(preset).is_ok());
        }
    }

    #[test]
    fn test_form_factory_rejects_unknown_resource() {
        let client = AdminClient::builder().build().unwrap();
        let err = client.form(preset::plain("nonexistent")).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}

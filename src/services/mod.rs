//! Purpose-specific endpoints outside the generic `/admin/<resource>` surface
//!
//! Each service is a thin handle over a cloned [`AdminClient`], so requests
//! share the same interceptors and session as the generic CRUD calls.

pub mod auth;
pub mod coupons;
pub mod customers;
pub mod export;
pub mod icons;
pub mod inquiries;
pub mod payments;
pub mod uploads;

pub use auth::AuthService;
pub use coupons::{CouponsService, coupon_course_labels};
pub use customers::CustomersService;
pub use export::ExportFile;
pub use icons::IconsService;
pub use inquiries::InquiriesService;
pub use payments::PaymentsService;
pub use uploads::{ImageUploader, UploadService, UploadTarget};

use crate::client::AdminClient;

impl AdminClient {
    /// `/auth/*`
    pub fn auth(&self) -> AuthService {
        AuthService::new(self.clone())
    }

    /// `/payments/admin/*`
    pub fn payments(&self) -> PaymentsService {
        PaymentsService::new(self.clone())
    }

    /// `/coupons/admin*`
    pub fn coupon_admin(&self) -> CouponsService {
        CouponsService::new(self.clone())
    }

    /// `/customers*`
    pub fn customers(&self) -> CustomersService {
        CustomersService::new(self.clone())
    }

    /// `/inquiries*`
    pub fn inquiries(&self) -> InquiriesService {
        InquiriesService::new(self.clone())
    }

    /// `/icons*`
    pub fn icons(&self) -> IconsService {
        IconsService::new(self.clone())
    }

    /// `/admin/upload/*`
    pub fn uploads(&self) -> UploadService {
        UploadService::new(self.clone())
    }
}

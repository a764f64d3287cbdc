//! Macro declaring the resource catalog

/// Declare admin resources in one place
///
/// For each entry this generates a [`ResourceDescriptor`](super::ResourceDescriptor)
/// constant, a named accessor on [`AdminClient`](crate::client::AdminClient)
/// returning a bound [`ResourceClient`](crate::client::ResourceClient), and an
/// entry in the `ALL` slice.
///
/// # Example
/// ```rust,ignore
/// admin_resources! {
///     /// Course catalogue
///     courses, COURSES => "courses", upload = "image";
///     faqs, FAQS => "faqs";
/// }
/// ```
macro_rules! admin_resources {
    ($(
        $(#[$meta:meta])*
        $accessor:ident, $konst:ident => $path:literal $(, upload = $field:literal)?;
    )*) => {
        $(
            $(#[$meta])*
            pub const $konst: $crate::resources::ResourceDescriptor =
                $crate::resources::ResourceDescriptor::new(stringify!($accessor), $path)
                    $(.with_upload($field))?;
        )*

        /// Every declared resource, in declaration order
        pub const ALL: &[$crate::resources::ResourceDescriptor] = &[$($konst),*];

        impl $crate::client::AdminClient {
            $(
                #[doc = concat!("Client bound to `/admin/", $path, "`")]
                pub fn $accessor(&self) -> $crate::client::ResourceClient {
                    self.resource(&$konst)
                }
            )*
        }
    };
}

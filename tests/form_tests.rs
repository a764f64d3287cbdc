//! Form controllers wired to the mock backend through `AdminClient::form`

mod mock_backend;

use admin_client::prelude::*;
use mock_backend::*;
use std::sync::Arc;

fn yes(_: &str) -> bool {
    true
}

// =============================================================================
// Validation happens before the network
// =============================================================================

#[tokio::test]
async fn test_testimonial_missing_fields_send_nothing() {
    let backend = MockBackend::start().await;
    let (client, _, _) = backend.logged_in_client();
    let form = client.form(preset::testimonials()).unwrap();

    form.begin_create();
    form.set_field("name", "Asha");
    let before = backend.request_count();

    let outcome = form.save().await.unwrap();

    match outcome {
        SaveOutcome::Invalid(ValidationError::MissingFields(fields)) => {
            assert_eq!(fields, vec!["id", "role", "review", "category"]);
        }
        other => panic!("unexpected: {:?}", other),
    }
    assert_eq!(backend.request_count(), before);
    assert_eq!(form.state(), FormState::Creating);
}

#[tokio::test]
async fn test_coupon_percentage_over_100_sends_nothing() {
    let backend = MockBackend::start().await;
    let (client, _, _) = backend.logged_in_client();
    let form = client.form(preset::coupons()).unwrap();

    form.begin_create();
    form.set_field("code", "HALFOFF");
    form.set_field("discountType", "percentage");
    form.set_field("discountValue", 150);
    form.set_field("validUntil", "2026-12-31");

    let outcome = form.save().await.unwrap();

    assert!(matches!(outcome, SaveOutcome::Invalid(ValidationError::FieldErrors(_))));
    assert!(backend.requests_to("POST", "/coupons/admin").is_empty());
    assert!(form.error().unwrap().contains("cannot exceed 100"));
}

// =============================================================================
// Full refetch after every write
// =============================================================================

#[tokio::test]
async fn test_list_matches_server_after_each_write() {
    let backend = MockBackend::start().await;
    backend.seed(
        "faqs",
        vec![json!({"question": "Is there EMI?", "answer": "Yes", "category": "billing"})],
    );
    let (client, _, _) = backend.logged_in_client();
    let form = client.form(preset::faqs()).unwrap();

    form.load().await.unwrap();
    assert_eq!(form.records(), backend.collection("faqs"));

    form.begin_create();
    form.set_field("question", "  Do I get a certificate?  ");
    form.set_field("answer", "Yes, on completion.");
    assert!(matches!(form.save().await.unwrap(), SaveOutcome::Saved(_)));
    assert_eq!(form.records(), backend.collection("faqs"));
    assert_eq!(form.records()[1]["question"], "Do I get a certificate?");

    let record = form.records()[0].clone();
    form.begin_edit(&record).unwrap();
    form.set_field("answer", "Yes, 0% EMI available.");
    form.save().await.unwrap();
    assert_eq!(form.records(), backend.collection("faqs"));

    let record = form.records()[1].clone();
    assert_eq!(form.delete(&record, &yes).await.unwrap(), DeleteOutcome::Deleted);
    assert_eq!(form.records(), backend.collection("faqs"));
    assert_eq!(form.records().len(), 1);

    // load + 3 writes, each followed by a refetch
    assert_eq!(backend.requests_to("GET", "/admin/faqs").len(), 4);
}

#[tokio::test]
async fn test_failed_save_keeps_editing_state() {
    let backend = MockBackend::start().await;
    backend.respond_with(
        "/admin/team-members",
        500,
        json!({"success": false, "message": "Write failed"}),
    );
    let (client, _, _) = backend.logged_in_client();
    let notifier = RecordingNotifier::new();
    let form = client
        .form(preset::team_members())
        .unwrap()
        .with_notifier(Arc::new(notifier.clone()));

    form.begin_create();
    form.set_field("name", "Kiran");
    form.set_field("role", "Program Manager");
    let err = form.save().await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(form.state(), FormState::Creating);
    assert_eq!(form.draft()["name"], "Kiran");
    assert_eq!(form.error().as_deref(), Some("Server error 500: Write failed"));
    assert_eq!(notifier.errors().len(), 1);
}

// =============================================================================
// Coupons
// =============================================================================

#[tokio::test]
async fn test_used_coupon_delete_is_blocked() {
    let backend = MockBackend::start().await;
    backend.seed(
        "coupons",
        vec![json!({"_id": "c1", "code": "WELCOME10", "usedCount": 12})],
    );
    let (client, _, _) = backend.logged_in_client();
    let notifier = RecordingNotifier::new();
    let form = client
        .form(preset::coupons())
        .unwrap()
        .with_notifier(Arc::new(notifier.clone()));

    form.load().await.unwrap();
    let coupon = form.records()[0].clone();
    let outcome = form.delete(&coupon, &yes).await.unwrap();

    assert!(matches!(outcome, DeleteOutcome::Blocked(_)));
    assert!(backend.requests_to("DELETE", "/coupons/admin/c1").is_empty());
    assert_eq!(backend.collection("coupons").len(), 1);
    assert_eq!(notifier.errors().len(), 1);
}

#[tokio::test]
async fn test_coupon_create_goes_through_coupon_admin() {
    let backend = MockBackend::start().await;
    let (client, _, _) = backend.logged_in_client();
    let form = client.form(preset::coupons()).unwrap();

    form.load().await.unwrap();
    assert_eq!(backend.last_request().query.as_deref(), Some("page=1&limit=10"));

    form.begin_create();
    form.set_field("code", "summer25");
    form.set_field("discountValue", "25");
    form.set_field("validUntil", "2026-08-31");
    form.save().await.unwrap();

    let posted = backend.requests_to("POST", "/coupons/admin");
    assert_eq!(posted.len(), 1);
    let body = posted[0].json();
    assert_eq!(body["code"], "SUMMER25");
    assert_eq!(body["discountType"], "percentage");
    assert_eq!(body["discountValue"], 25);
    assert_eq!(form.records().len(), 1);
    assert_eq!(form.pagination().unwrap().total, 1);
}

#[tokio::test]
async fn test_coupon_filters_reach_query_string() {
    let backend = MockBackend::start().await;
    let (client, _, _) = backend.logged_in_client();
    let form = client.form(preset::coupons()).unwrap();

    form.set_page(2).await.unwrap();
    assert_eq!(backend.last_request().query.as_deref(), Some("page=2&limit=10"));

    form.set_filter("discountType", "fixed").await.unwrap();
    assert_eq!(
        backend.last_request().query.as_deref(),
        Some("page=1&limit=10&discountType=fixed")
    );
}

// =============================================================================
// Images
// =============================================================================

#[tokio::test]
async fn test_mentor_image_uploads_eagerly() {
    let backend = MockBackend::start().await;
    let (client, _, _) = backend.logged_in_client();
    let form = client.form(preset::mentors()).unwrap();

    form.begin_create();
    form.attach_image(FilePart::from_bytes("file", "neha.png", vec![1, 2, 3]))
        .await
        .unwrap();

    let upload = backend.last_request();
    assert_eq!(upload.path, "/admin/upload/mentor-image");
    assert!(upload.is_multipart());
    assert!(upload.body_text().contains("name=\"image\""));

    let filename = form.draft()["image"].as_str().unwrap().to_string();
    assert!(filename.starts_with("mentor-image-"));

    form.set_field("name", "Neha");
    form.set_field("role", "Staff Engineer");
    form.set_field("company", "Flipkart");
    form.save().await.unwrap();

    let created = backend.requests_to("POST", "/admin/mentors");
    assert_eq!(created[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(created[0].json()["image"], filename.as_str());
}

#[tokio::test]
async fn test_testimonial_image_travels_with_save() {
    let backend = MockBackend::start().await;
    let (client, _, _) = backend.logged_in_client();
    let form = client.form(preset::testimonials()).unwrap();

    form.begin_create();
    for (field, value) in [
        ("id", "asha-k"),
        ("name", "Asha"),
        ("role", "Data Analyst"),
        ("review", "The mentors were fantastic."),
        ("category", "data-science"),
        ("accent", "#10b981"),
    ] {
        form.set_field(field, value);
    }
    form.attach_image(FilePart::from_bytes("file", "asha.jpg", vec![0xff, 0xd8]))
        .await
        .unwrap();
    assert_eq!(backend.request_count(), 0);

    form.save().await.unwrap();

    let created = backend.requests_to("POST", "/admin/testimonials");
    assert_eq!(created.len(), 1);
    assert!(created[0].is_multipart());
    let body = created[0].body_text();
    assert!(body.contains("name=\"avatar\""));
    assert!(body.contains("asha-k"));
}

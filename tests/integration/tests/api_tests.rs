//! End-to-end tests against the development backend
//!
//! Each test starts its own seeded server on an ephemeral port, so no
//! external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, fixtures::*, TestServer};
use org_core::{DomainError, Organization, OrganizationStatus, User};
use org_views::{
    ApplicationForm, CardActions, DialogResult, MemberDialog, OrganizationCard,
    OrganizationDetails, SettingsDialog,
};
use reqwest::StatusCode;
use serde_json::Value;

// ============================================================================
// Raw HTTP
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_unknown_organization_detail() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/organizations/nope").await.unwrap();
    let body: Value = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body["detail"], "No organization found with matching slug: nope");
}

#[tokio::test]
async fn test_member_may_leave() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .delete_auth("/api/organizations/cssg/remove_membership/user", SALLY)
        .await
        .unwrap();
    let removed: bool = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(removed);

    let response = server
        .get_auth("/api/organizations/cssg/members", SALLY)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Service over HTTP
// ============================================================================

#[tokio::test]
async fn test_directory_and_admin_organizations() {
    let server = TestServer::start().await.unwrap();

    let root = server.connect(ROOT).await.unwrap();
    let organizations = root.context.service().list_organizations().await.unwrap();
    assert_eq!(organizations.len(), 7);
    assert_eq!(root.context.store().len(), 7);
    assert_eq!(root.context.service().admin_organizations().len(), 7);

    let lambda = server.connect(LAMBDA).await.unwrap();
    lambda.context.service().list_organizations().await.unwrap();
    let administered: Vec<_> = lambda
        .context
        .service()
        .admin_organizations()
        .into_iter()
        .map(|o| o.slug)
        .collect();
    assert_eq!(administered, ["cssg"]);
}

#[tokio::test]
async fn test_chess_club_lifecycle() {
    let server = TestServer::start().await.unwrap();
    let root = server.connect(ROOT).await.unwrap();
    let service = root.context.service();
    service.list_organizations().await.unwrap();

    let created = service.create_organization(&chess_club()).await.unwrap();
    assert_eq!(created.id, Some(8));
    assert_eq!(root.context.store().len(), 8);

    let mut edited = created.clone();
    edited.name = "Chess Club Updated".to_string();
    edited.short_description = "Blitz on Fridays.".to_string();
    let updated = service.update_organization(&edited).await.unwrap();
    assert_eq!(updated.name, "Chess Club Updated");
    assert_eq!(root.context.store().len(), 8);
    let stored = root.context.store().find_by_slug("chess").unwrap();
    assert_eq!(stored.name, "Chess Club Updated");
    assert_eq!(stored.short_description, "Blitz on Fridays.");

    // Delete through a snapshot that never saw the id
    let snapshot = Organization { id: None, ..updated };
    service.delete_organization(&snapshot).await.unwrap();
    assert_eq!(root.context.store().len(), 7);
    assert!(root.context.store().find_by_slug("chess").is_none());

    let err = service.get_organization("chess").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_create_requires_permission() {
    let server = TestServer::start().await.unwrap();
    let paul = server.connect(PAUL).await.unwrap();
    let service = paul.context.service();
    service.list_organizations().await.unwrap();

    let err = service.create_organization(&chess_club()).await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(paul.context.store().len(), 7);
}

#[tokio::test]
async fn test_create_validates_locally() {
    let server = TestServer::start().await.unwrap();
    let root = server.connect(ROOT).await.unwrap();

    let mut blank = chess_club();
    blank.name = "  ".to_string();
    let err = root
        .context
        .service()
        .create_organization(&blank)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::MissingRequiredFields);
}

#[tokio::test]
async fn test_status_and_leader_checks() {
    let server = TestServer::start().await.unwrap();
    let stewie = server.connect(STEWIE).await.unwrap();
    let service = stewie.context.service();

    assert_eq!(
        service.get_organization_status("cads").await.unwrap(),
        OrganizationStatus::Open
    );
    assert!(service.check_leader_status("acm", PAUL).await.unwrap());
    assert!(!service.check_leader_status("acm", STEWIE).await.unwrap());

    assert!(service.check_leader_status("acm", "ghost").await.is_err());
    assert_eq!(
        stewie.notifier.last_message().as_deref(),
        Some("Error checking leader status.")
    );
}

#[tokio::test]
async fn test_hidden_roster_is_quiet() {
    let server = TestServer::start().await.unwrap();
    let stewie = server.connect(STEWIE).await.unwrap();

    let err = stewie
        .context
        .service()
        .get_organization_members("cssg")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert!(stewie.notifier.is_empty());
}

// ============================================================================
// Cards
// ============================================================================

#[tokio::test]
async fn test_join_open_organization() {
    let server = TestServer::start().await.unwrap();
    let stewie = server.connect(STEWIE).await.unwrap();
    let cads = stewie.context.service().get_organization("cads").await.unwrap();

    let mut card = OrganizationCard::new(cads, stewie.membership());
    card.load().await;
    assert!(!card.is_loading());
    assert_eq!(card.status(), Some(OrganizationStatus::Open));
    assert_eq!(card.actions(), CardActions::JOIN);
    assert!(stewie.notifier.is_empty());

    assert!(card.join().await);
    assert!(card.is_member());
    assert_eq!(card.actions(), CardActions::empty());
    assert_eq!(
        stewie.notifier.messages(),
        ["Successfully added stewie to organization"]
    );
}

#[tokio::test]
async fn test_card_actions_by_policy() {
    let server = TestServer::start().await.unwrap();
    let stewie = server.connect(STEWIE).await.unwrap();

    for (slug, expected) in [("ctf", CardActions::PRIVATE), ("cssg", CardActions::APPLY)] {
        let organization = stewie.context.service().get_organization(slug).await.unwrap();
        let mut card = OrganizationCard::new(organization, stewie.membership());
        card.load().await;
        assert_eq!(card.actions(), expected, "{slug}");
        assert!(card.open_settings().is_none());
    }
}

#[tokio::test]
async fn test_leader_card() {
    let server = TestServer::start().await.unwrap();
    let lambda = server.connect(LAMBDA).await.unwrap();
    let cssg = lambda.context.service().get_organization("cssg").await.unwrap();

    let mut card = OrganizationCard::new(cssg, lambda.membership());
    card.load().await;
    assert!(card.is_leader());
    assert!(card.is_member());
    assert_eq!(card.actions(), CardActions::LEADER);

    let (mut settings, after_closed) = card.open_settings().unwrap();
    settings.short_description = "Apps for nonprofits.".to_string();
    let result = settings.save().await.unwrap();
    assert!(result.is_confirmed());

    card.settings_closed(after_closed.await);
    assert_eq!(card.organization().short_description, "Apps for nonprofits.");
    assert_eq!(
        lambda.notifier.last_message().as_deref(),
        Some("Settings saved successfully!")
    );
}

// ============================================================================
// Details
// ============================================================================

fn onyens(users: &[User]) -> Vec<&str> {
    users.iter().map(|u| u.onyen.as_str()).collect()
}

#[tokio::test]
async fn test_details_for_leader() {
    let server = TestServer::start().await.unwrap();
    let lambda = server.connect(LAMBDA).await.unwrap();
    let cssg = lambda.context.service().get_organization("cssg").await.unwrap();

    let mut details = OrganizationDetails::new(cssg, lambda.membership());
    details.load().await;
    assert!(details.is_member());
    assert_eq!(onyens(details.members()), [SALLY, LAMBDA]);
    assert_eq!(onyens(details.leaders()), [LAMBDA]);
}

#[tokio::test]
async fn test_details_for_outsider() {
    let server = TestServer::start().await.unwrap();
    let stewie = server.connect(STEWIE).await.unwrap();
    let acm = stewie.context.service().get_organization("acm").await.unwrap();

    let mut details = OrganizationDetails::new(acm, stewie.membership());
    details.load().await;
    assert!(!details.is_member());
    assert!(details.members().is_empty());
    assert!(details.leaders().is_empty());
    assert!(stewie.notifier.is_empty());
}

// ============================================================================
// Dialogs
// ============================================================================

#[tokio::test]
async fn test_application_form() {
    let server = TestServer::start().await.unwrap();
    let stewie = server.connect(STEWIE).await.unwrap();
    let cssg = stewie.context.service().get_organization("cssg").await.unwrap();
    let card = OrganizationCard::new(cssg, stewie.membership());

    let (mut form, after_closed) = card.apply().await.unwrap();
    assert_eq!(form.organization_id(), 6);
    assert_eq!(form.user_id(), 6);

    form.name = "St".to_string();
    assert!(form.submit().await.is_none());
    assert_eq!(form.warning_message(), "Name must be at least 4 characters long.");

    form.name = "Stewie Student".to_string();
    form.pid = "730000001".to_string();
    form.reason = "I want to build apps.".to_string();
    let result = form.submit().await.unwrap();
    assert!(result.is_confirmed());
    assert_eq!(form.warning_message(), "");

    let application = after_closed.await.confirmed().unwrap();
    assert_eq!(application.pid, "730000001");

    let response = server
        .get_auth("/api/organizations/applications", ROOT)
        .await
        .unwrap();
    let received: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["organization_id"], 6);
    assert_eq!(received[0]["status"], "pending");
}

#[tokio::test]
async fn test_application_to_unknown_organization_fails() {
    let server = TestServer::start().await.unwrap();
    let stewie = server.connect(STEWIE).await.unwrap();

    let (mut form, _) = ApplicationForm::open(stewie.context.service().clone(), 99, 6);
    form.name = "Stewie Student".to_string();
    form.pid = "730000001".to_string();
    form.reason = "Curious.".to_string();

    assert_eq!(form.submit().await, Some(DialogResult::Failed));
    assert_eq!(
        stewie.notifier.last_message().as_deref(),
        Some("Error submitting application.")
    );
}

#[tokio::test]
async fn test_member_dialog() {
    let server = TestServer::start().await.unwrap();
    let lambda = server.connect(LAMBDA).await.unwrap();
    let service = lambda.context.service().clone();

    let (mut dialog, after_closed) = MemberDialog::open(service.clone(), "cssg");
    dialog.onyen = "  stewie ".to_string();
    assert_eq!(dialog.confirm_add().await, Some(DialogResult::Confirmed(())));
    assert_eq!(after_closed.await, DialogResult::Confirmed(()));
    assert_eq!(
        lambda.notifier.last_message().as_deref(),
        Some("Successfully added stewie to organization")
    );

    let (mut again, _) = MemberDialog::open(service.clone(), "cssg");
    again.onyen = STEWIE.to_string();
    assert_eq!(again.confirm_add().await, Some(DialogResult::Failed));
    assert_eq!(
        lambda.notifier.last_message().as_deref(),
        Some("Error adding member: you might input an invalid onyen")
    );

    let (mut removal, _) = MemberDialog::open(service, "cssg");
    removal.onyen = STEWIE.to_string();
    assert_eq!(removal.confirm_remove().await, Some(DialogResult::Confirmed(())));
}

#[tokio::test]
async fn test_settings_rejected_for_non_leader() {
    let server = TestServer::start().await.unwrap();
    let stewie = server.connect(STEWIE).await.unwrap();
    let cssg = stewie.context.service().get_organization("cssg").await.unwrap();

    let (mut settings, _) = SettingsDialog::open(stewie.context.service().clone(), cssg);
    settings.name = "Hijacked".to_string();
    assert_eq!(settings.save().await, Some(DialogResult::Failed));

    let message = stewie.notifier.last_message().unwrap();
    assert!(
        message.starts_with("Error saving settings: Not authorized"),
        "{message}"
    );

    let response = server.get("/api/organizations/cssg").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["name"], "CS+Social Good");
}

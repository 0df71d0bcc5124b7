//! Service orchestration tests for user accounts.

use std::sync::Arc;

use crate::error::{Classify, ErrorKind};
use crate::paging::PageRequest;
use crate::test_support::FixedClock;
use crate::user::{
    adapters::memory::InMemoryUserRepository,
    domain::UserDomainError,
    services::{CreateUserRequest, UpdateUserRequest, UserService, UserServiceError},
};
use chrono::Duration;
use rstest::{fixture, rstest};

type TestService = UserService<InMemoryUserRepository, FixedClock>;

#[fixture]
fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::default())
}

#[fixture]
fn service(clock: Arc<FixedClock>) -> TestService {
    UserService::new(Arc::new(InMemoryUserRepository::new()), clock)
}

fn ada() -> CreateUserRequest {
    CreateUserRequest::new("ada", "Ada Lovelace", "ada@example.com")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_then_get_returns_same_user(service: TestService) {
    let created = service
        .create_user(ada().with_avatar_url("https://example.com/ada.png"))
        .await
        .expect("user creation should succeed");
    let fetched = service
        .get_user(created.id())
        .await
        .expect("lookup should succeed");

    assert_eq!(fetched, created);
    assert_eq!(created.id().value(), 1);
    assert_eq!(
        created.avatar_url().map(|url| url.as_str()),
        Some("https://example.com/ada.png")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_username_is_rejected(service: TestService) {
    service.create_user(ada()).await.expect("first user");

    let result = service
        .create_user(CreateUserRequest::new("ada", "Other", "other@example.com"))
        .await;

    assert!(matches!(result, Err(UserServiceError::UsernameTaken(_))));
    assert_eq!(result.err().map(|err| err.kind()), Some(ErrorKind::Conflict));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_is_rejected(service: TestService) {
    service.create_user(ada()).await.expect("first user");

    let result = service
        .create_user(CreateUserRequest::new("grace", "Grace", "ada@example.com"))
        .await;

    assert!(matches!(result, Err(UserServiceError::EmailTaken(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_fields_fail_validation(service: TestService) {
    let result = service
        .create_user(CreateUserRequest::new("a!", "Ada", "ada@example.com"))
        .await;

    assert!(matches!(
        result,
        Err(UserServiceError::Domain(UserDomainError::InvalidUsername(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_changes_only_provided_fields(clock: Arc<FixedClock>) {
    let service = UserService::new(Arc::new(InMemoryUserRepository::new()), Arc::clone(&clock));
    let created = service.create_user(ada()).await.expect("user");
    clock.advance(Duration::minutes(5));

    let updated = service
        .update_user(
            created.id(),
            UpdateUserRequest::new().with_display_name("Countess"),
        )
        .await
        .expect("update should succeed");

    assert_eq!(updated.display_name().as_str(), "Countess");
    assert_eq!(updated.email(), created.email());
    assert!(updated.updated_at() > created.updated_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_rejects_email_owned_by_another_user(service: TestService) {
    service.create_user(ada()).await.expect("ada");
    let grace = service
        .create_user(CreateUserRequest::new("grace", "Grace", "grace@example.com"))
        .await
        .expect("grace");

    let result = service
        .update_user(
            grace.id(),
            UpdateUserRequest::new().with_email("ada@example.com"),
        )
        .await;

    assert!(matches!(result, Err(UserServiceError::EmailTaken(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_accepts_unchanged_email(service: TestService) {
    let created = service.create_user(ada()).await.expect("ada");

    let updated = service
        .update_user(
            created.id(),
            UpdateUserRequest::new().with_email("ada@example.com"),
        )
        .await
        .expect("same email is not a conflict");

    assert_eq!(updated.email().as_str(), "ada@example.com");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_user_and_frees_username(service: TestService) {
    let created = service.create_user(ada()).await.expect("ada");
    service
        .delete_user(created.id())
        .await
        .expect("delete should succeed");

    let lookup = service.get_user(created.id()).await;
    assert!(matches!(lookup, Err(UserServiceError::NotFound(_))));
    service
        .create_user(ada())
        .await
        .expect("username is free again");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_users_pages_in_id_order(service: TestService) {
    for name in ["ada", "grace", "linus"] {
        service
            .create_user(CreateUserRequest::new(
                name,
                name,
                format!("{name}@example.com"),
            ))
            .await
            .expect("user");
    }

    let page = service
        .list_users(PageRequest::new(2, 1).expect("page"))
        .await
        .expect("list should succeed");

    let names: Vec<&str> = page
        .items
        .iter()
        .map(|user| user.username().as_str())
        .collect();
    assert_eq!(names, vec!["grace", "linus"]);
    assert_eq!(page.total, 3);
}

use std::sync::Arc;

use cinearr::db::{ListKind, Store, User};
use cinearr::services::{
    AddOutcome, AuthError, AuthService, ListService, RemoveOutcome, SeaOrmAuthService,
    SeaOrmListService,
};

async fn test_store() -> Store {
    // Single pooled connection so every query sees the same in-memory database
    Store::with_pool_options("sqlite::memory:", 1, 1)
        .await
        .expect("Failed to open in-memory store")
}

async fn test_user(store: &Store, username: &str) -> User {
    SeaOrmAuthService::new(store.clone())
        .signup(username, "secret1", None)
        .await
        .expect("signup should succeed")
}

#[tokio::test]
async fn signup_then_authenticate_roundtrip() {
    let store = test_store().await;
    let auth = SeaOrmAuthService::new(store.clone());

    let user = auth
        .signup("alice", "secret1", None)
        .await
        .expect("signup should succeed");
    assert_eq!(user.username, "alice");
    assert_eq!(user.avatar_url, "/static/images/default-pic.png");

    let authed = auth
        .authenticate("alice", "secret1")
        .await
        .expect("authenticate should succeed");
    assert_eq!(authed.id, user.id);

    let err = auth.authenticate("alice", "wrong").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));

    // unknown username yields the same error as a wrong password
    let err = auth.authenticate("nobody", "secret1").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn duplicate_signup_does_not_create_a_row() {
    let store = test_store().await;
    let auth = SeaOrmAuthService::new(store.clone());

    let original = auth
        .signup("alice", "secret1", None)
        .await
        .expect("signup should succeed");

    let err = auth.signup("alice", "another1", None).await.unwrap_err();
    assert!(matches!(err, AuthError::UsernameTaken));

    // the original account is untouched
    let authed = auth
        .authenticate("alice", "secret1")
        .await
        .expect("original credentials still valid");
    assert_eq!(authed.id, original.id);
}

#[tokio::test]
async fn signup_validation() {
    let store = test_store().await;
    let auth = SeaOrmAuthService::new(store.clone());

    let err = auth.signup("alice", "five5", None).await.unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));

    let err = auth.signup("  ", "secret1", None).await.unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));
}

#[tokio::test]
async fn signup_keeps_custom_avatar() {
    let store = test_store().await;
    let auth = SeaOrmAuthService::new(store.clone());

    let user = auth
        .signup("alice", "secret1", Some("https://example.com/me.png"))
        .await
        .expect("signup should succeed");
    assert_eq!(user.avatar_url, "https://example.com/me.png");
}

#[tokio::test]
async fn stale_session_id_resolves_to_anonymous() {
    let store = test_store().await;
    let auth = SeaOrmAuthService::new(store.clone());

    let resolved = auth.resolve(4242).await.expect("resolve should not error");
    assert!(resolved.is_none());
}

#[tokio::test]
async fn add_is_idempotent() {
    let store = test_store().await;
    let user = test_user(&store, "alice").await;
    let lists = SeaOrmListService::new(store.clone());

    let first = lists.add(user.id, 42, ListKind::Saved).await.unwrap();
    assert_eq!(first, AddOutcome::Added);

    let second = lists.add(user.id, 42, ListKind::Saved).await.unwrap();
    assert_eq!(second, AddOutcome::AlreadyPresent);

    assert_eq!(lists.list(user.id, ListKind::Saved).await.unwrap(), vec![42]);
}

#[tokio::test]
async fn lists_are_independent_and_ordered() {
    let store = test_store().await;
    let user = test_user(&store, "alice").await;
    let lists = SeaOrmListService::new(store.clone());

    for media_id in [7, 3, 99] {
        lists.add(user.id, media_id, ListKind::Saved).await.unwrap();
    }
    lists.add(user.id, 3, ListKind::Finished).await.unwrap();

    assert_eq!(
        lists.list(user.id, ListKind::Saved).await.unwrap(),
        vec![7, 3, 99]
    );
    assert_eq!(
        lists.list(user.id, ListKind::Finished).await.unwrap(),
        vec![3]
    );
}

#[tokio::test]
async fn remove_prefers_finished_then_saved() {
    let store = test_store().await;
    let user = test_user(&store, "alice").await;
    let lists = SeaOrmListService::new(store.clone());

    lists.add(user.id, 42, ListKind::Saved).await.unwrap();
    lists.add(user.id, 42, ListKind::Finished).await.unwrap();

    let outcome = lists.remove(user.id, 42).await.unwrap();
    assert_eq!(outcome, RemoveOutcome::Removed(ListKind::Finished));

    let outcome = lists.remove(user.id, 42).await.unwrap();
    assert_eq!(outcome, RemoveOutcome::Removed(ListKind::Saved));

    let outcome = lists.remove(user.id, 42).await.unwrap();
    assert_eq!(outcome, RemoveOutcome::NotFound);
}

#[tokio::test]
async fn remove_missing_item_is_not_found() {
    let store = test_store().await;
    let user = test_user(&store, "alice").await;
    let lists = SeaOrmListService::new(store.clone());

    let outcome = lists.remove(user.id, 42).await.unwrap();
    assert_eq!(outcome, RemoveOutcome::NotFound);
}

#[tokio::test]
async fn concurrent_adds_persist_exactly_one_row() {
    let store = test_store().await;
    let user = test_user(&store, "alice").await;
    let lists = Arc::new(SeaOrmListService::new(store.clone()));

    let (a, b) = tokio::join!(
        lists.add(user.id, 42, ListKind::Saved),
        lists.add(user.id, 42, ListKind::Saved)
    );

    let outcomes = [a.unwrap(), b.unwrap()];
    let added = outcomes
        .iter()
        .filter(|o| matches!(o, AddOutcome::Added))
        .count();

    assert_eq!(added, 1, "exactly one of the racing adds wins");
    assert_eq!(lists.list(user.id, ListKind::Saved).await.unwrap(), vec![42]);
}

#[tokio::test]
async fn memberships_are_scoped_per_user() {
    let store = test_store().await;
    let alice = test_user(&store, "alice").await;
    let bob = test_user(&store, "bob").await;
    let lists = SeaOrmListService::new(store.clone());

    lists.add(alice.id, 42, ListKind::Saved).await.unwrap();

    assert!(lists.list(bob.id, ListKind::Saved).await.unwrap().is_empty());

    let outcome = lists.remove(bob.id, 42).await.unwrap();
    assert_eq!(outcome, RemoveOutcome::NotFound);

    assert_eq!(
        lists.list(alice.id, ListKind::Saved).await.unwrap(),
        vec![42]
    );
}

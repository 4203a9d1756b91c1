mod common;

use rust_bashmaki::auth::{authenticate, AuthError, UserIdentity};
use rust_bashmaki::entities::{primary_setup, user::Role};

#[tokio::test]
async fn seeded_admin_can_authenticate() {
    let db = common::test_db().await;
    primary_setup(db.clone()).await.expect("primary_setup");

    let identity = authenticate(&db, "admin", "Secret15")
        .await
        .expect("authenticate");

    assert_eq!(identity.role, Role::Administrator);

    let capabilities = identity.role.capabilities();
    assert!(capabilities.can_create);
    assert!(capabilities.can_edit);
    assert!(capabilities.can_delete);
}

#[tokio::test]
async fn primary_setup_is_idempotent() {
    let db = common::test_db().await;
    primary_setup(db.clone()).await.expect("first run");
    primary_setup(db.clone()).await.expect("second run must not conflict");
}

#[tokio::test]
async fn wrong_password_and_unknown_login_look_identical() {
    let db = common::test_db().await;
    primary_setup(db.clone()).await.expect("primary_setup");

    let wrong_password = authenticate(&db, "admin", "nope")
        .await
        .expect_err("wrong password");
    let unknown_login = authenticate(&db, "ghost", "Secret15")
        .await
        .expect_err("unknown login");

    assert!(matches!(wrong_password, AuthError::InvalidCredentials));
    assert!(matches!(unknown_login, AuthError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_login.to_string());
}

#[test]
fn display_name_joins_the_full_name() {
    let identity = UserIdentity {
        id: 1,
        role: Role::Manager,
        last_name: "Ivanov".to_owned(),
        first_name: "Ivan".to_owned(),
        middle_name: "Ivanovich".to_owned(),
    };

    assert_eq!(identity.display_name(), "Ivanov Ivan Ivanovich");

    let no_middle = UserIdentity {
        middle_name: String::new(),
        ..identity
    };
    assert_eq!(no_middle.display_name(), "Ivanov Ivan");
}

#[test]
fn browse_only_roles_get_no_mutating_capabilities() {
    let manager = Role::Manager.capabilities();
    assert!(!manager.can_create && !manager.can_edit && !manager.can_delete);
    assert!(Role::Manager.can_filter());

    let client = Role::Client.capabilities();
    assert!(!client.can_create && !client.can_edit && !client.can_delete);
    assert!(!Role::Client.can_filter());

    assert!(Role::Administrator.can_filter());
}

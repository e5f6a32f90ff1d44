use gymdash_domain::id::{Email, SubjectId};
use gymdash_domain::role::{EffectiveRole, RoleType};
use gymdash_roles::usecase::resolve::{EffectiveRoleUseCase, HasElevatedRoleUseCase};

use crate::helpers::{InMemoryRoleRepo, role_row};

fn subject(id: &str) -> SubjectId {
    SubjectId::new(id).unwrap()
}

fn email(raw: &str) -> Email {
    Email::parse(raw).unwrap()
}

// ── Identity-provider relink ─────────────────────────────────────────────────

#[tokio::test]
async fn should_heal_relinked_admin_and_resolve_by_id_afterwards() {
    let repo = InMemoryRoleRepo::new(vec![role_row("usr_OLD", Some("a@x.com"), RoleType::Admin)]);

    let role = EffectiveRoleUseCase { repo: repo.clone() }
        .execute(&subject("usr_123"), Some(&email("a@x.com")))
        .await;
    assert_eq!(role, EffectiveRole::Admin);
    assert_eq!(repo.snapshot()[0].user_id, "usr_123");

    // no email this time: the id-only path must now be enough
    let access = HasElevatedRoleUseCase { repo: repo.clone() }
        .execute(&subject("usr_123"), None)
        .await;
    assert!(access);
}

#[tokio::test]
async fn should_converge_after_one_access_check() {
    let repo = InMemoryRoleRepo::new(vec![role_row(
        "usr_OLD",
        Some("Owner@Gym.com"),
        RoleType::Empresario,
    )]);
    let usecase = HasElevatedRoleUseCase { repo: repo.clone() };

    assert!(
        usecase
            .execute(&subject("usr_NEW"), Some(&email("owner@gym.com")))
            .await
    );
    assert!(usecase.execute(&subject("usr_NEW"), None).await);
    assert_eq!(
        EffectiveRoleUseCase { repo }
            .execute(&subject("usr_NEW"), None)
            .await,
        EffectiveRole::Empresario
    );
}

#[tokio::test]
async fn should_union_current_and_stale_rows() {
    let repo = InMemoryRoleRepo::new(vec![
        role_row("usr_123", Some("a@x.com"), RoleType::Socio),
        role_row("usr_STALE", Some("a@x.com"), RoleType::Empresario),
    ]);

    let role = EffectiveRoleUseCase { repo: repo.clone() }
        .execute(&subject("usr_123"), Some(&email("a@x.com")))
        .await;

    assert_eq!(role, EffectiveRole::Empresario);
    assert!(repo.snapshot().iter().all(|r| r.user_id == "usr_123"));
}

#[tokio::test]
async fn should_not_merge_rows_of_other_emails() {
    let repo = InMemoryRoleRepo::new(vec![
        role_row("usr_123", Some("a@x.com"), RoleType::Socio),
        role_row("usr_999", Some("b@x.com"), RoleType::Admin),
    ]);

    let role = EffectiveRoleUseCase { repo: repo.clone() }
        .execute(&subject("usr_123"), Some(&email("a@x.com")))
        .await;

    assert_eq!(role, EffectiveRole::Socio);
    assert_eq!(repo.snapshot()[1].user_id, "usr_999");
}

// ── Fallback matching ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_grant_access_to_id_stored_with_invisible_characters() {
    let repo = InMemoryRoleRepo::new(vec![role_row(
        "\u{FEFF}user_2abc\u{200D} ",
        None,
        RoleType::Socio,
    )]);
    assert!(
        HasElevatedRoleUseCase { repo }
            .execute(&subject("user_2abc"), None)
            .await
    );
}

#[tokio::test]
async fn should_grant_access_to_json_quoted_id() {
    let repo = InMemoryRoleRepo::new(vec![role_row("\"user_2abc\"", None, RoleType::Admin)]);
    assert!(
        HasElevatedRoleUseCase { repo }
            .execute(&subject("user_2abc"), None)
            .await
    );
}

#[tokio::test]
async fn should_deny_access_to_unrelated_identity() {
    let repo = InMemoryRoleRepo::new(vec![role_row(
        "user_2NNEqL2nrIRdJ194ndJqAHwEfxC",
        Some("boss@gym.com"),
        RoleType::Admin,
    )]);
    let usecase = HasElevatedRoleUseCase { repo: repo.clone() };

    assert!(
        !usecase
            .execute(&subject("user_9ZZZZ"), Some(&email("guest@gym.com")))
            .await
    );
    assert_eq!(
        EffectiveRoleUseCase { repo }
            .execute(&subject("user_9ZZZZ"), Some(&email("guest@gym.com")))
            .await,
        EffectiveRole::User
    );
}

// ── Inactive rows ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_ignore_deactivated_rows_everywhere() {
    let mut row = role_row("usr_123", Some("a@x.com"), RoleType::Admin);
    row.is_active = false;
    let repo = InMemoryRoleRepo::new(vec![row]);

    assert!(
        !HasElevatedRoleUseCase { repo: repo.clone() }
            .execute(&subject("usr_123"), Some(&email("a@x.com")))
            .await
    );
    assert_eq!(
        EffectiveRoleUseCase { repo }
            .execute(&subject("usr_123"), Some(&email("a@x.com")))
            .await,
        EffectiveRole::User
    );
}

#[tokio::test]
async fn should_tolerate_concurrent_resolution() {
    let repo = InMemoryRoleRepo::new(vec![role_row("usr_OLD", Some("a@x.com"), RoleType::Admin)]);
    let sub = subject("usr_123");
    let mail = email("a@x.com");
    let first = EffectiveRoleUseCase { repo: repo.clone() };
    let second = HasElevatedRoleUseCase { repo: repo.clone() };

    let (role, access) = tokio::join!(
        first.execute(&sub, Some(&mail)),
        second.execute(&sub, Some(&mail)),
    );

    assert_eq!(role, EffectiveRole::Admin);
    assert!(access);
    assert_eq!(repo.snapshot().len(), 1);
    assert_eq!(repo.snapshot()[0].user_id, "usr_123");
}

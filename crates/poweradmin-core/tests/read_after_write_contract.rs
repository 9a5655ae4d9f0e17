//! Architectural Contract Test: Read-after-Write Authority
//!
//! This test verifies that applied state always comes from the remote's
//! answer, and that a write whose result cannot be read back is reported
//! distinctly from a write that failed.
//!
//! Constraints verified:
//! - A failed follow-up read after a successful write is `Tainted`
//! - A failed write is not `Tainted` and changed nothing
//! - The lifecycle state machine keeps tainted entities tracked
//!
//! If this test fails, hosts can lose track of entities that exist remotely.

mod common;

use common::*;
use poweradmin_core::model::ZoneType;
use poweradmin_core::{
    Field, Lifecycle, LifecycleState, MemberSpec, Method, RRSetKey, RRSetSpec, RequestContext, Step,
    StepOutcome, UserSpec, ZoneSpec,
};

#[tokio::test]
async fn rrset_read_back_failure_taints_the_entity() {
    let fake = FakePoweradmin::new();
    let zone_id = fake.add_zone("example.com", "MASTER");
    let registry = fake.registry();
    let ctx = RequestContext::background();

    fake.fail_next(Method::Get, "rrsets/www/A", Fault::Status(500, "replica lag".into()));

    let spec = RRSetSpec::new(RRSetKey::new(zone_id, "www", "A"), vec![MemberSpec::new("192.0.2.10")]);
    let result = registry.rrsets().create(&ctx, &spec).await;
    let err = result.as_ref().expect_err("create reports the failed read");

    assert!(err.is_tainted(), "got {}", err);
    assert_eq!(StepOutcome::of(&result), StepOutcome::WrittenUnread);
    assert_eq!(
        fake.rrset_contents(zone_id, "www", "A"),
        vec!["192.0.2.10".to_string()],
        "the write itself went through"
    );

    assert_eq!(
        LifecycleState::Planned.next(Step::Create, StepOutcome::of(&result)),
        Some(LifecycleState::Tainted)
    );
}

#[tokio::test]
async fn zone_update_without_echo_reads_back() {
    let fake = FakePoweradmin::new();
    let registry = fake.registry();
    let ctx = RequestContext::background();

    let zone = registry
        .zones()
        .create(&ctx, &ZoneSpec::new("example.com", ZoneType::Master))
        .await
        .expect("create succeeds");

    let mut declared = ZoneSpec::new("example.com", ZoneType::Master);
    declared.description = Field::Value("primary".into());

    // The fake does not echo zone updates, so the serial comes from a GET
    let updated = registry.zones().update(&ctx, &zone, &declared).await.expect("update succeeds");
    assert_eq!(updated.description.as_deref(), Some("primary"));
    assert_eq!(updated.serial, zone.serial.map(|s| s + 1));

    fake.fail_next(Method::Get, &format!("zones/{}", zone.id), Fault::Transport("connection reset".into()));
    declared.description = Field::Value("secondary".into());
    let err = registry
        .zones()
        .update(&ctx, &updated, &declared)
        .await
        .expect_err("read-back fails");
    assert!(err.is_tainted(), "got {}", err);
    assert_eq!(fake.zone(zone.id).expect("zone stored").description, "secondary");
}

#[tokio::test]
async fn failed_write_is_not_tainted() {
    let fake = FakePoweradmin::new();
    let registry = fake.registry();
    let ctx = RequestContext::background();

    let user = registry
        .users()
        .create(&ctx, &UserSpec::new("erin", "pw"))
        .await
        .expect("create succeeds");

    fake.fail_next(Method::Put, &format!("users/{}", user.id), Fault::Status(422, "email is invalid".into()));
    let mut declared = UserSpec::new("erin", "pw");
    declared.email = "not-an-email".into();

    let result = registry.users().update(&ctx, &user, &declared).await;
    let err = result.as_ref().expect_err("update is rejected");
    assert!(!err.is_tainted());
    assert_eq!(StepOutcome::of(&result), StepOutcome::Failed);
    assert_eq!(fake.user(user.id).expect("user stored").email, "");

    // The prior state is still the host's truth
    assert_eq!(
        LifecycleState::Applied.next(Step::Update, StepOutcome::Failed),
        Some(LifecycleState::Applied)
    );
}

#[tokio::test]
async fn create_rejected_remotely_surfaces_the_message() {
    let fake = FakePoweradmin::new();
    fake.add_zone("example.com", "MASTER");
    let registry = fake.registry();

    let err = registry
        .zones()
        .create(&RequestContext::background(), &ZoneSpec::new("example.com", ZoneType::Native))
        .await
        .expect_err("duplicate zone");

    assert!(matches!(err.root(), poweradmin_core::Error::Remote { status: 409, .. }), "got {}", err);
    assert!(err.to_string().contains("already exists"));
    assert!(!err.is_tainted());
}

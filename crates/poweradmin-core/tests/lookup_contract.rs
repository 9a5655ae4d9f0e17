//! Architectural Contract Test: Read-only Lookups
//!
//! This test verifies that lookups resolve references against fresh
//! remote state and report misses as not-found.
//!
//! Constraints verified:
//! - Zones resolve by id or exact name
//! - Record filters send the type to the server and match names exactly
//! - Permissions resolve by id or name; users by username
//!
//! If this test fails, references to unmanaged entities resolve wrongly.

mod common;

use common::*;
use poweradmin_core::import::ZoneRef;
use poweradmin_core::{Lookups, PermissionRef, RecordFilter, Repositories, RequestContext};

fn lookups(fake: &FakePoweradmin) -> Lookups {
    Lookups::new(Repositories::new(fake.client()))
}

#[tokio::test]
async fn zones_resolve_by_id_and_exact_name() {
    let fake = FakePoweradmin::new();
    fake.add_zone("sub.example.com", "NATIVE");
    let zone_id = fake.add_zone("example.com", "MASTER");
    let lookups = lookups(&fake);
    let ctx = RequestContext::background();

    let by_id = lookups.zone(&ctx, &ZoneRef::Id(zone_id)).await.expect("by id");
    let by_name = lookups
        .zone(&ctx, &ZoneRef::Name("example.com".into()))
        .await
        .expect("by name");
    assert_eq!(by_id, by_name);
    assert_eq!(by_id.name, "example.com");

    assert_eq!(lookups.zones(&ctx).await.expect("list").len(), 2);

    let err = lookups
        .zone(&ctx, &ZoneRef::Id(999))
        .await
        .expect_err("unknown id");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn record_filters_combine_type_and_name() {
    let fake = FakePoweradmin::new();
    let zone_id = fake.add_zone("example.com", "MASTER");
    fake.add_record(zone_id, "www", "A", "192.0.2.10");
    fake.add_record(zone_id, "www", "AAAA", "2001:db8::10");
    fake.add_record(zone_id, "www2", "A", "192.0.2.20");
    let lookups = lookups(&fake);
    let ctx = RequestContext::background();

    let filter = RecordFilter {
        rtype: Some("A".into()),
        name: Some("www".into()),
    };
    let records = lookups.records(&ctx, zone_id, &filter).await.expect("list");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].content, "192.0.2.10");

    let request = fake.requests().pop().expect("one request");
    assert!(request.path.ends_with("/records?type=A"), "path: {}", request.path);

    let all = lookups
        .records(&ctx, zone_id, &RecordFilter::default())
        .await
        .expect("list");
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn permissions_and_users_resolve() {
    let fake = FakePoweradmin::new();
    fake.add_permission(1, "Administrator", "Full access");
    fake.add_permission(2, "Zone Manager", "Manage own zones");
    let user_id = fake.add_user("frank");
    let lookups = lookups(&fake);
    let ctx = RequestContext::background();

    let by_name = lookups
        .permission(&ctx, &PermissionRef::Name("Zone Manager".into()))
        .await
        .expect("by name");
    assert_eq!(by_name.id, 2);
    assert_eq!(by_name.description.as_deref(), Some("Manage own zones"));

    let by_id = lookups.permission(&ctx, &PermissionRef::Id(1)).await.expect("by id");
    assert_eq!(by_id.name, "Administrator");

    assert_eq!(lookups.permissions(&ctx).await.expect("list").len(), 2);

    let user = lookups.user(&ctx, "frank").await.expect("by username");
    assert_eq!(user.user_id, user_id);
    assert_eq!(user.perm_templ, Some(1));

    let err = lookups.user(&ctx, "nobody").await.expect_err("unknown user");
    assert!(err.is_not_found());
    assert!(err.to_string().contains("no user named 'nobody' in the user list"), "got {}", err);
}

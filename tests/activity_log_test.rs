// Activity log filtering and pagination against a real store.

use staynest_backend::test::utils::setup_test_env;
use staynest_backend::types::internal::audit::{
    ActionKind, ActionStatus, ActivityEntry, ActivityFilter, ResourceKind,
};

#[tokio::test]
async fn action_filter_narrows_without_reordering() {
    let env = setup_test_env().await;

    env.recorder
        .record(
            ActivityEntry::new(ActionKind::Create, ResourceKind::Property, ActionStatus::Success)
                .actor("u1")
                .resource("p1"),
        )
        .await
        .unwrap();
    env.recorder
        .record(
            ActivityEntry::new(ActionKind::Update, ResourceKind::Property, ActionStatus::Success)
                .actor("u1")
                .resource("p1"),
        )
        .await
        .unwrap();
    env.recorder
        .record(
            ActivityEntry::new(ActionKind::Create, ResourceKind::Mess, ActionStatus::Success)
                .actor("u2")
                .resource("m1"),
        )
        .await
        .unwrap();

    let filter = ActivityFilter {
        action: Some(ActionKind::Create),
        ..Default::default()
    };
    let (records, info) = env.recorder.list(&filter, 1, 10).await.unwrap();

    assert_eq!(info.total, 2);
    assert_eq!(records.len(), 2);
    // Most recent first: the mess creation came after the property one.
    assert_eq!(records[0].resource_kind, "MESS");
    assert_eq!(records[1].resource_kind, "PROPERTY");
    assert!(records.iter().all(|r| r.action == "CREATE"));
}

#[tokio::test]
async fn actor_and_resource_filters_combine() {
    let env = setup_test_env().await;

    for (actor, kind) in [
        ("u1", ResourceKind::Property),
        ("u1", ResourceKind::Mess),
        ("u2", ResourceKind::Property),
    ] {
        env.recorder
            .record(
                ActivityEntry::new(ActionKind::Create, kind, ActionStatus::Success).actor(actor),
            )
            .await
            .unwrap();
    }

    let filter = ActivityFilter {
        actor_id: Some("u1".to_string()),
        resource_kind: Some(ResourceKind::Property),
        ..Default::default()
    };
    let (records, info) = env.recorder.list(&filter, 1, 10).await.unwrap();

    assert_eq!(info.total, 1);
    assert_eq!(records[0].actor_id.as_deref(), Some("u1"));
    assert_eq!(records[0].resource_kind, "PROPERTY");
}

#[tokio::test]
async fn pagination_slices_and_counts_pages() {
    let env = setup_test_env().await;

    for i in 0..25 {
        env.recorder
            .record(
                ActivityEntry::new(
                    ActionKind::Create,
                    ResourceKind::Property,
                    ActionStatus::Success,
                )
                .actor("u1")
                .resource(format!("p{:02}", i)),
            )
            .await
            .unwrap();
    }

    let filter = ActivityFilter::default();
    let (page_two, info) = env.recorder.list(&filter, 2, 10).await.unwrap();

    assert_eq!(info.total, 25);
    assert_eq!(info.pages, 3);
    assert_eq!(info.page, 2);
    assert_eq!(page_two.len(), 10);

    // Newest first across page boundaries: page two holds p14 down to p05.
    assert_eq!(page_two[0].resource_id.as_deref(), Some("p14"));
    assert_eq!(page_two[9].resource_id.as_deref(), Some("p05"));

    let (page_three, _) = env.recorder.list(&filter, 3, 10).await.unwrap();
    assert_eq!(page_three.len(), 5);
    assert_eq!(page_three[4].resource_id.as_deref(), Some("p00"));
}

#[tokio::test]
async fn page_beyond_the_end_is_empty_not_an_error() {
    let env = setup_test_env().await;

    env.recorder
        .record(ActivityEntry::new(
            ActionKind::Login,
            ResourceKind::User,
            ActionStatus::Success,
        ))
        .await
        .unwrap();

    let (records, info) = env.recorder.list(&ActivityFilter::default(), 9, 10).await.unwrap();
    assert!(records.is_empty());
    assert_eq!(info.total, 1);
}

#[tokio::test]
async fn time_window_filters_are_inclusive() {
    let env = setup_test_env().await;

    env.recorder
        .record(ActivityEntry::new(
            ActionKind::Signup,
            ResourceKind::User,
            ActionStatus::Success,
        ))
        .await
        .unwrap();

    let rows = env.activity_rows().await;
    let at = rows[0].created_at;

    let hit = ActivityFilter {
        start: Some(at),
        end: Some(at),
        ..Default::default()
    };
    let (records, _) = env.recorder.list(&hit, 1, 10).await.unwrap();
    assert_eq!(records.len(), 1);

    let miss = ActivityFilter {
        start: Some(at + 1),
        ..Default::default()
    };
    let (records, _) = env.recorder.list(&miss, 1, 10).await.unwrap();
    assert!(records.is_empty());
}

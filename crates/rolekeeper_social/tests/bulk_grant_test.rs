//! Bulk and single-member role grants.

mod test_utils;

use rolekeeper_core::{MemberInfo, MemberInfoBuilder};
use rolekeeper_social::{BulkGrantWorkflow, CommandErrorKind, MemberGrant};
use std::sync::Arc;
use test_utils::{FakePlatform, RecordingProgress, member};

fn bot(id: &str) -> MemberInfo {
    MemberInfoBuilder::default()
        .id(id)
        .username(format!("bot-{}", id))
        .bot(true)
        .build()
        .unwrap()
}

fn eligible(count: usize) -> Vec<MemberInfo> {
    (0..count).map(|i| member(&format!("u{}", i), &[])).collect()
}

#[tokio::test]
async fn test_bulk_grant_reports_partial_failure() {
    let platform = Arc::new(
        FakePlatform::new()
            .with_members(eligible(23))
            .failing_for("u3")
            .failing_for("u11")
            .failing_for("u19"),
    );
    let workflow = BulkGrantWorkflow::new(Arc::clone(&platform), 10);
    let progress = RecordingProgress::new();

    let report = workflow.grant_to_all("g1", "r1", &progress).await.unwrap();

    assert_eq!(report.success_count, 20);
    assert_eq!(report.failure_count, 3);
    assert_eq!(report.failures().count(), 3);
    assert_eq!(progress.acknowledgements(), 1);
    assert_eq!(progress.updates(), vec![10, 20]);
}

#[tokio::test]
async fn test_bulk_grant_skips_bots() {
    let mut members = eligible(3);
    members.push(bot("b1"));
    members.push(bot("b2"));
    let platform = Arc::new(FakePlatform::new().with_members(members));
    let workflow = BulkGrantWorkflow::new(Arc::clone(&platform), 10);

    let report = workflow
        .grant_to_all("g1", "r1", &RecordingProgress::new())
        .await
        .unwrap();

    assert_eq!(report.success_count, 3);
    assert_eq!(report.skipped_bots, 2);
    assert!(platform.grants().iter().all(|(m, _)| !m.starts_with('b')));
}

#[tokio::test]
async fn test_bulk_grant_rerun_skips_members_holding_role() {
    let platform = Arc::new(FakePlatform::new().with_members(eligible(5)).failing_for("u2"));
    let workflow = BulkGrantWorkflow::new(Arc::clone(&platform), 10);

    workflow
        .grant_to_all("g1", "r1", &RecordingProgress::new())
        .await
        .unwrap();
    let rerun = workflow
        .grant_to_all("g1", "r1", &RecordingProgress::new())
        .await
        .unwrap();

    assert_eq!(rerun.already_held, 4);
    assert_eq!(rerun.success_count, 0);
    assert_eq!(rerun.failure_count, 1);
    assert_eq!(platform.grants().len(), 6);
}

#[tokio::test]
async fn test_single_member_grant() {
    let platform = Arc::new(FakePlatform::new().with_members(vec![member("u1", &[])]));
    let workflow = BulkGrantWorkflow::new(Arc::clone(&platform), 10);

    let (first, resolved) = workflow.grant_to_member("g1", "r1", "u1").await.unwrap();
    let (second, _) = workflow.grant_to_member("g1", "r1", "u1").await.unwrap();

    assert_eq!(first, MemberGrant::Granted);
    assert_eq!(resolved.username, "user-u1");
    assert_eq!(second, MemberGrant::AlreadyHeld);
    assert_eq!(platform.grants().len(), 1);
}

#[tokio::test]
async fn test_single_member_grant_unknown_member() {
    let platform = Arc::new(FakePlatform::new());
    let workflow = BulkGrantWorkflow::new(platform, 10);

    let err = workflow.grant_to_member("g1", "r1", "ghost").await.unwrap_err();

    assert_eq!(
        err.kind(),
        &CommandErrorKind::MemberNotFound("ghost".to_string())
    );
}

#[tokio::test]
async fn test_single_member_grant_refused() {
    let platform = Arc::new(
        FakePlatform::new()
            .with_members(vec![member("u1", &[])])
            .failing_for("u1"),
    );
    let workflow = BulkGrantWorkflow::new(platform, 10);

    let err = workflow.grant_to_member("g1", "r1", "u1").await.unwrap_err();

    assert!(matches!(err.kind(), CommandErrorKind::GrantFailed(_)));
}

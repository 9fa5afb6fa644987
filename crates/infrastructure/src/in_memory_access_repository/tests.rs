use chrono::{Duration, Utc};
use dancerealmx_application::{
    AccessSubjectRepository, RoleAssignmentRepository, RoleGrantOutcome, RoleGrantSource,
    SubscriptionRepository,
};
use dancerealmx_core::UserId;
use dancerealmx_domain::{
    PlanId, PlanTier, Role, SubscriptionPlan, SubscriptionSnapshot, SubscriptionStatus,
};

use super::InMemoryAccessRepository;

fn gold_plan() -> SubscriptionPlan {
    let Ok(id) = PlanId::new("gold") else {
        panic!("plan id must be valid");
    };
    SubscriptionPlan {
        id,
        tier: PlanTier::Gold,
        name: "Gold".to_owned(),
        monthly_price_cents: 4_999,
        yearly_price_cents: 49_990,
        features: Vec::new(),
        unlocked_roles: vec![Role::BookingProfessional],
    }
}

#[tokio::test]
async fn unknown_users_have_no_access_record() {
    let repository = InMemoryAccessRepository::new();

    let record = repository.find_access_record(UserId::new()).await;
    assert!(matches!(record, Ok(None)));
}

#[tokio::test]
async fn access_record_combines_roles_legacy_tags_and_subscription() {
    let repository = InMemoryAccessRepository::new();
    let user_id = UserId::new();

    let granted = repository
        .grant_role(user_id, Role::Student, RoleGrantSource::Base)
        .await;
    assert!(matches!(granted, Ok(RoleGrantOutcome::Inserted)));
    repository.import_role_tag(user_id, "LEGACY_VIP").await;
    let saved = repository
        .save_subscription(user_id, SubscriptionSnapshot::active(&gold_plan(), None))
        .await;
    assert!(saved.is_ok());

    let Ok(Some(record)) = repository.find_access_record(user_id).await else {
        panic!("record should exist");
    };
    assert_eq!(
        record.role_tags,
        vec!["STUDENT".to_owned(), "LEGACY_VIP".to_owned()]
    );
    assert_eq!(record.subscriptions.len(), 1);
}

#[tokio::test]
async fn base_grants_are_never_downgraded_to_plan_grants() {
    let repository = InMemoryAccessRepository::new();
    let user_id = UserId::new();
    let plan = RoleGrantSource::Plan(gold_plan().id);

    assert!(matches!(
        repository
            .grant_role(user_id, Role::BookingProfessional, RoleGrantSource::Base)
            .await,
        Ok(RoleGrantOutcome::Inserted)
    ));
    assert!(matches!(
        repository
            .grant_role(user_id, Role::BookingProfessional, plan.clone())
            .await,
        Ok(RoleGrantOutcome::Unchanged)
    ));
    assert!(matches!(
        repository
            .grant_role(user_id, Role::DirectoryMember, plan.clone())
            .await,
        Ok(RoleGrantOutcome::Inserted)
    ));

    let Ok(assignments) = repository.list_role_assignments(user_id).await else {
        panic!("assignments should load");
    };
    let sources: Vec<(Role, RoleGrantSource)> = assignments
        .into_iter()
        .map(|assignment| (assignment.role, assignment.source))
        .collect();
    assert_eq!(
        sources,
        vec![
            (Role::BookingProfessional, RoleGrantSource::Base),
            (Role::DirectoryMember, plan),
        ]
    );
}

#[tokio::test]
async fn plan_grants_are_promoted_to_base_and_report_the_change() {
    let repository = InMemoryAccessRepository::new();
    let user_id = UserId::new();
    let plan = RoleGrantSource::Plan(gold_plan().id);

    assert!(matches!(
        repository
            .grant_role(user_id, Role::CurriculumSeller, plan.clone())
            .await,
        Ok(RoleGrantOutcome::Inserted)
    ));
    assert!(matches!(
        repository
            .grant_role(user_id, Role::CurriculumSeller, plan)
            .await,
        Ok(RoleGrantOutcome::Unchanged)
    ));
    assert!(matches!(
        repository
            .grant_role(user_id, Role::CurriculumSeller, RoleGrantSource::Base)
            .await,
        Ok(RoleGrantOutcome::SourceChanged)
    ));
    assert!(matches!(
        repository
            .grant_role(user_id, Role::CurriculumSeller, RoleGrantSource::Base)
            .await,
        Ok(RoleGrantOutcome::Unchanged)
    ));

    let Ok(assignments) = repository.list_role_assignments(user_id).await else {
        panic!("assignments should load");
    };
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].source, RoleGrantSource::Base);
}

#[tokio::test]
async fn remove_role_reports_whether_anything_changed() {
    let repository = InMemoryAccessRepository::new();
    let user_id = UserId::new();

    assert!(matches!(
        repository.remove_role(user_id, Role::Student).await,
        Ok(false)
    ));
    assert!(
        repository
            .grant_role(user_id, Role::Student, RoleGrantSource::Base)
            .await
            .is_ok()
    );
    assert!(matches!(
        repository.remove_role(user_id, Role::Student).await,
        Ok(true)
    ));
    assert!(matches!(
        repository.list_role_assignments(user_id).await,
        Ok(assignments) if assignments.is_empty()
    ));
}

#[tokio::test]
async fn lapsed_subscriptions_exclude_open_ended_and_inactive_ones() {
    let repository = InMemoryAccessRepository::new();
    let now = Utc::now();
    let plan = gold_plan();

    let lapsed_user = UserId::new();
    let open_ended_user = UserId::new();
    let cancelled_user = UserId::new();

    let mut cancelled = SubscriptionSnapshot::active(&plan, Some(now - Duration::days(2)));
    cancelled.status = SubscriptionStatus::Cancelled;

    for (user_id, subscription) in [
        (
            lapsed_user,
            SubscriptionSnapshot::active(&plan, Some(now - Duration::minutes(5))),
        ),
        (open_ended_user, SubscriptionSnapshot::active(&plan, None)),
        (cancelled_user, cancelled),
    ] {
        assert!(repository.save_subscription(user_id, subscription).await.is_ok());
    }

    let Ok(lapsed) = repository.list_lapsed_subscriptions(now).await else {
        panic!("lapsed subscriptions should load");
    };
    let users: Vec<UserId> = lapsed.into_iter().map(|(user_id, _)| user_id).collect();
    assert_eq!(users, vec![lapsed_user]);
}

//! Development fixtures: a handful of users covering each access path.

use chrono::{Duration, Utc};
use dancerealmx_application::{RoleAssignmentRepository, RoleGrantSource};
use dancerealmx_core::{AppError, AppResult, UserId, UserIdentity};
use dancerealmx_domain::{PlanId, Role, SubscriptionEvent};
use dancerealmx_infrastructure::InMemoryAccessRepository;
use tracing::info;
use uuid::Uuid;

use crate::state::AppState;

const DEV_SEED_ADMIN_USER_ID: &str = "a2c8ea5f-4f39-4724-97f5-932f97f54f76";
const DEV_SEED_INSTRUCTOR_ADMIN_USER_ID: &str = "3f0b6c1e-5a7d-4e2b-9c41-0d8e2f6a7b13";
const DEV_SEED_STUDENT_USER_ID: &str = "96d11e90-7403-4654-9727-cb1043f8bd31";
const DEV_SEED_PROFESSIONAL_USER_ID: &str = "c5e2a9d4-1b6f-4a83-8e27-6f4d0b9c2a58";
const DEV_SEED_LEGACY_ROLE_TAG: &str = "LEGACY_VIP";

pub async fn run(
    app_state: &AppState,
    access_repository: &InMemoryAccessRepository,
) -> AppResult<()> {
    let admin_id = parse_user_id_const(DEV_SEED_ADMIN_USER_ID, "DEV_SEED_ADMIN_USER_ID")?;
    let instructor_admin_id = parse_user_id_const(
        DEV_SEED_INSTRUCTOR_ADMIN_USER_ID,
        "DEV_SEED_INSTRUCTOR_ADMIN_USER_ID",
    )?;
    let student_id = parse_user_id_const(DEV_SEED_STUDENT_USER_ID, "DEV_SEED_STUDENT_USER_ID")?;
    let professional_id =
        parse_user_id_const(DEV_SEED_PROFESSIONAL_USER_ID, "DEV_SEED_PROFESSIONAL_USER_ID")?;

    // The first administrator cannot be granted through the guarded service.
    access_repository
        .grant_role(admin_id, Role::Admin, RoleGrantSource::Base)
        .await?;
    let admin = UserIdentity::new(admin_id, "Platform Admin", None);

    for user_id in [instructor_admin_id, student_id, professional_id] {
        app_state.role_assignment_service.register_user(user_id).await?;
    }

    ensure_role(app_state, &admin, instructor_admin_id, Role::InstructorAdmin).await?;

    app_state
        .subscription_service
        .apply_event(
            &admin,
            professional_id,
            SubscriptionEvent::Activated {
                plan_id: PlanId::new("gold")?,
                current_period_end: Some(Utc::now() + Duration::days(30)),
            },
        )
        .await?;

    access_repository
        .import_role_tag(student_id, DEV_SEED_LEGACY_ROLE_TAG)
        .await;

    info!(
        admin = %admin_id,
        instructor_admin = %instructor_admin_id,
        student = %student_id,
        professional = %professional_id,
        "development access seed applied"
    );

    Ok(())
}

async fn ensure_role(
    app_state: &AppState,
    admin: &UserIdentity,
    user_id: UserId,
    role: Role,
) -> AppResult<()> {
    match app_state
        .role_assignment_service
        .assign_role(admin, user_id, role)
        .await
    {
        Ok(()) | Err(AppError::Conflict(_)) => Ok(()),
        Err(error) => Err(error),
    }
}

fn parse_user_id_const(value: &str, name: &str) -> AppResult<UserId> {
    Uuid::parse_str(value)
        .map(UserId::from_uuid)
        .map_err(|error| AppError::Internal(format!("invalid {name} constant: {error}")))
}

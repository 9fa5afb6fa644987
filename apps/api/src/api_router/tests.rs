use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use dancerealmx_core::UserId;
use dancerealmx_domain::Role;
use serde_json::json;

use crate::middleware::{AUTHENTICATED_EMAIL_HEADER, AUTHENTICATED_USER_HEADER};
use crate::test_support::{request, seed_user, send, test_state};

use super::build_router;

const FRONTEND_URL: &str = "http://localhost:3000";

#[tokio::test]
async fn health_is_public() {
    let (state, _) = test_state();
    let Ok(app) = build_router(state, FRONTEND_URL) else {
        panic!("router must build");
    };

    let (status, body) = send(app, request(Method::GET, "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn access_routes_require_authentication() {
    let (state, _) = test_state();
    let Ok(app) = build_router(state, FRONTEND_URL) else {
        panic!("router must build");
    };

    let (status, _) = send(app, request(Method::GET, "/api/access/me", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn effective_access_lists_inherited_permissions() {
    let (state, repository) = test_state();
    let user_id = seed_user(repository.as_ref(), Role::InstructorAdmin).await;
    let Ok(app) = build_router(state, FRONTEND_URL) else {
        panic!("router must build");
    };

    let (status, body) = send(
        app,
        request(Method::GET, "/api/access/me", Some(user_id), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["roles"], json!(["INSTRUCTOR_ADMIN"]));
    let Some(permissions) = body["permissions"].as_array() else {
        panic!("permissions must be a list");
    };
    assert!(permissions.contains(&json!("manage:instructors")));
    assert!(permissions.contains(&json!("book:sessions")));
    assert!(permissions.contains(&json!("view:public:courses")));
}

#[tokio::test]
async fn effective_access_echoes_the_forwarded_email() {
    let (state, repository) = test_state();
    let user_id = seed_user(repository.as_ref(), Role::Student).await;
    let Ok(app) = build_router(state, FRONTEND_URL) else {
        panic!("router must build");
    };

    let (_, body) = send(
        app.clone(),
        request(Method::GET, "/api/access/me", Some(user_id), None),
    )
    .await;
    assert_eq!(body["email"], json!(null));

    let Ok(with_email) = Request::builder()
        .uri("/api/access/me")
        .header(AUTHENTICATED_USER_HEADER, user_id.to_string())
        .header(AUTHENTICATED_EMAIL_HEADER, "dana@example.com")
        .body(Body::empty())
    else {
        panic!("test request must build");
    };
    let (status, body) = send(app, with_email).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], json!("dana@example.com"));
}

#[tokio::test]
async fn registration_grants_default_role_once() {
    let (state, _) = test_state();
    let Ok(app) = build_router(state, FRONTEND_URL) else {
        panic!("router must build");
    };
    let user_id = UserId::new();

    for _ in 0..2 {
        let (status, _) = send(
            app.clone(),
            request(Method::POST, "/api/access/register", Some(user_id), None),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    let (_, body) = send(
        app,
        request(Method::GET, "/api/access/me", Some(user_id), None),
    )
    .await;
    assert_eq!(body["roles"], json!(["STUDENT"]));
}

#[tokio::test]
async fn unknown_role_has_empty_permission_list() {
    let (state, _) = test_state();
    let Ok(app) = build_router(state, FRONTEND_URL) else {
        panic!("router must build");
    };

    let (status, body) = send(
        app,
        request(
            Method::GET,
            "/api/access/roles/SUPERUSER/permissions",
            Some(UserId::new()),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["permissions"], json!([]));
    assert_eq!(body["inherited_roles"], json!([]));
}

#[tokio::test]
async fn feature_query_reports_role_features() {
    let (state, repository) = test_state();
    let seller_id = seed_user(repository.as_ref(), Role::CurriculumSeller).await;
    let Ok(app) = build_router(state, FRONTEND_URL) else {
        panic!("router must build");
    };

    let (_, allowed) = send(
        app.clone(),
        request(
            Method::GET,
            "/api/access/features/sell_resources",
            Some(seller_id),
            None,
        ),
    )
    .await;
    assert_eq!(allowed["allowed"], json!(true));

    let (_, denied) = send(
        app,
        request(
            Method::GET,
            "/api/access/features/earn_certificates",
            Some(seller_id),
            None,
        ),
    )
    .await;
    assert_eq!(denied["allowed"], json!(false));
}

#[tokio::test]
async fn guarded_routes_follow_their_requirements() {
    let (state, repository) = test_state();
    let student_id = seed_user(repository.as_ref(), Role::Student).await;
    let professional_id = seed_user(repository.as_ref(), Role::BookingProfessional).await;
    let seller_id = seed_user(repository.as_ref(), Role::CurriculumSeller).await;
    let Ok(app) = build_router(state, FRONTEND_URL) else {
        panic!("router must build");
    };

    let cases = [
        (Method::GET, "/api/bookings/manage", student_id, StatusCode::FORBIDDEN),
        (Method::GET, "/api/bookings/manage", professional_id, StatusCode::OK),
        (Method::GET, "/api/analytics", professional_id, StatusCode::FORBIDDEN),
        (Method::GET, "/api/certifications", seller_id, StatusCode::FORBIDDEN),
    ];
    for (method, uri, user_id, expected) in cases {
        let (status, _) = send(app.clone(), request(method, uri, Some(user_id), None)).await;
        assert_eq!(status, expected, "{uri}");
    }

    let draft = json!({ "title": "Salsa footwork drills", "price_cents": 1500 });
    let (status, _) = send(
        app.clone(),
        request(Method::POST, "/api/resources", Some(student_id), Some(draft.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        app,
        request(Method::POST, "/api/resources", Some(seller_id), Some(draft)),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["seller_id"], json!(seller_id.to_string()));
}

#[tokio::test]
async fn gold_activation_opens_certifications_and_marketplace() {
    let (state, repository) = test_state();
    let admin_id = seed_user(repository.as_ref(), Role::Admin).await;
    let member_id = seed_user(repository.as_ref(), Role::GuestUser).await;
    let Ok(app) = build_router(state, FRONTEND_URL) else {
        panic!("router must build");
    };

    let (status, _) = send(
        app.clone(),
        request(Method::GET, "/api/certifications", Some(member_id), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        app.clone(),
        request(
            Method::POST,
            "/api/subscriptions/events",
            Some(admin_id),
            Some(json!({
                "user_id": member_id.to_string(),
                "event": {
                    "event_type": "activated",
                    "plan_id": "gold",
                    "current_period_end": "2099-01-01T00:00:00Z",
                },
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ACTIVE"));
    assert_eq!(
        body["granted_roles"],
        json!(["CURRICULUM_SELLER", "BOOKING_PROFESSIONAL", "DIRECTORY_MEMBER"])
    );

    let (status, _) = send(
        app.clone(),
        request(Method::GET, "/api/certifications", Some(member_id), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        app,
        request(
            Method::POST,
            "/api/resources",
            Some(member_id),
            Some(json!({ "title": "Bachata basics", "price_cents": 900 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
}

#[tokio::test]
async fn subscription_events_are_admin_only() {
    let (state, repository) = test_state();
    let student_id = seed_user(repository.as_ref(), Role::Student).await;
    let Ok(app) = build_router(state, FRONTEND_URL) else {
        panic!("router must build");
    };

    let (status, body) = send(
        app,
        request(
            Method::POST,
            "/api/subscriptions/events",
            Some(student_id),
            Some(json!({
                "user_id": student_id.to_string(),
                "event": { "event_type": "activated", "plan_id": "platinum" },
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["requirement"],
        json!("all of permissions [manage:subscriptions]")
    );
}

#[tokio::test]
async fn admins_manage_roles_and_users_list_their_own() {
    let (state, repository) = test_state();
    let admin_id = seed_user(repository.as_ref(), Role::Admin).await;
    let user_id = seed_user(repository.as_ref(), Role::Student).await;
    let Ok(app) = build_router(state, FRONTEND_URL) else {
        panic!("router must build");
    };
    let assignment = json!({ "user_id": user_id.to_string(), "role": "CERTIFICATION_MANAGER" });

    let (status, _) = send(
        app.clone(),
        request(
            Method::POST,
            "/api/security/roles",
            Some(user_id),
            Some(assignment.clone()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        app.clone(),
        request(
            Method::POST,
            "/api/security/roles",
            Some(admin_id),
            Some(assignment.clone()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        app.clone(),
        request(
            Method::POST,
            "/api/security/roles",
            Some(admin_id),
            Some(assignment.clone()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let own_roles_uri = format!("/api/security/users/{user_id}/roles");
    let (status, body) = send(
        app.clone(),
        request(Method::GET, own_roles_uri.as_str(), Some(user_id), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {
                "role": "STUDENT",
                "source": "base",
                "plan_id": null,
                "assigned_at": body[0]["assigned_at"],
            },
            {
                "role": "CERTIFICATION_MANAGER",
                "source": "base",
                "plan_id": null,
                "assigned_at": body[1]["assigned_at"],
            },
        ])
    );

    let (status, _) = send(
        app.clone(),
        request(
            Method::DELETE,
            "/api/security/roles",
            Some(admin_id),
            Some(assignment.clone()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        app,
        request(
            Method::DELETE,
            "/api/security/roles",
            Some(admin_id),
            Some(assignment),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn plans_are_listed_by_price() {
    let (state, _) = test_state();
    let Ok(app) = build_router(state, FRONTEND_URL) else {
        panic!("router must build");
    };

    let (status, body) = send(
        app,
        request(Method::GET, "/api/subscriptions/plans", Some(UserId::new()), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let Some(plans) = body.as_array() else {
        panic!("plans must be a list");
    };
    let plan_ids: Vec<&str> = plans
        .iter()
        .filter_map(|plan| plan["plan_id"].as_str())
        .collect();
    assert_eq!(plan_ids, vec!["free", "silver", "gold", "platinum"]);
}

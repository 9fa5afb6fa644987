//! Built-in DanceRealmX access catalog.
//!
//! One vocabulary for the whole platform: permission tokens follow
//! `verb:resource` / `verb:own:resource`, feature keys are snake_case product
//! capabilities. Both live here so there is a single table per concern.

use dancerealmx_core::AppResult;

use crate::{
    AccessPolicyDefinition, FeatureKey, Permission, PlanId, PlanTier, Role, SubscriptionPlan,
    WILDCARD_PERMISSION,
};

/// Subsumption edges: each role receives every permission of the listed roles.
pub const ROLE_HIERARCHY: &[(Role, &[Role])] = &[
    (Role::Admin, &[]),
    (
        Role::InstructorAdmin,
        &[Role::BookingProfessional, Role::BookingUser, Role::GuestUser],
    ),
    (Role::CurriculumSeller, &[Role::GuestUser]),
    (Role::BookingProfessional, &[Role::BookingUser, Role::GuestUser]),
    (Role::Student, &[Role::BookingUser, Role::GuestUser]),
    (Role::BookingUser, &[Role::GuestUser]),
    (Role::GuestUser, &[]),
    (Role::CurriculumAdmin, &[Role::CurriculumSeller, Role::GuestUser]),
    (Role::CourseCreatorAdmin, &[Role::BookingProfessional, Role::GuestUser]),
    (Role::CertificationManager, &[Role::GuestUser]),
    (Role::DirectoryMember, &[Role::GuestUser]),
];

/// Permissions declared directly on each role.
pub const ROLE_PERMISSIONS: &[(Role, &[&str])] = &[
    (Role::Admin, &[WILDCARD_PERMISSION]),
    (
        Role::InstructorAdmin,
        &["manage:instructors", "manage:bookings", "view:analytics"],
    ),
    (
        Role::CurriculumSeller,
        &["create:resources", "manage:own:resources", "view:own:sales"],
    ),
    (
        Role::BookingProfessional,
        &["manage:own:bookings", "create:courses", "view:own:analytics"],
    ),
    (
        Role::Student,
        &[
            "enroll:courses",
            "view:own:certificates",
            "purchase:resources",
            "send:messages",
        ],
    ),
    (
        Role::BookingUser,
        &["book:sessions", "view:own:bookings", "view:own:progress"],
    ),
    (
        Role::GuestUser,
        &["view:public:courses", "view:public:instructors"],
    ),
    (
        Role::CurriculumAdmin,
        &["manage:resources", "approve:resources", "view:sales"],
    ),
    (
        Role::CourseCreatorAdmin,
        &["manage:courses", "publish:courses", "view:course_analytics"],
    ),
    (
        Role::CertificationManager,
        &["issue:certificates", "revoke:certificates", "view:certificates"],
    ),
    (
        Role::DirectoryMember,
        &["manage:own:profile", "view:directory", "send:messages"],
    ),
];

/// Product features granted by holding a role. Not inherited through the hierarchy.
pub const ROLE_FEATURES: &[(Role, &[&str])] = &[
    (Role::Admin, &["admin_dashboard"]),
    (
        Role::InstructorAdmin,
        &["manage_instructors", "manage_bookings", "view_analytics"],
    ),
    (Role::CurriculumSeller, &["sell_resources", "resource_analytics"]),
    (
        Role::BookingProfessional,
        &["manage_bookings", "create_courses", "booking_analytics"],
    ),
    (
        Role::Student,
        &[
            "enroll_courses",
            "track_progress",
            "earn_certificates",
            "purchase_resources",
            "messaging",
        ],
    ),
    (Role::BookingUser, &["book_sessions"]),
    (Role::GuestUser, &["browse_catalog"]),
    (Role::CurriculumAdmin, &["review_resources", "sell_resources"]),
    (Role::CourseCreatorAdmin, &["create_courses", "publish_courses"]),
    (Role::CertificationManager, &["manage_certifications"]),
    (Role::DirectoryMember, &["directory_listing", "messaging"]),
];

/// Static seed for one subscription plan.
#[derive(Debug, Clone, Copy)]
pub struct PlanSeed {
    /// Plan identifier.
    pub id: &'static str,
    /// Product tier.
    pub tier: PlanTier,
    /// Marketing name.
    pub name: &'static str,
    /// Monthly price in cents.
    pub monthly_price_cents: u32,
    /// Yearly price in cents.
    pub yearly_price_cents: u32,
    /// Included features.
    pub features: &'static [&'static str],
    /// Roles unlocked while active.
    pub unlocked_roles: &'static [Role],
}

const SILVER_FEATURES: &[&str] = &[
    "browse_catalog",
    "enroll_courses",
    "track_progress",
    "earn_certificates",
    "messaging",
];

const GOLD_FEATURES: &[&str] = &[
    "browse_catalog",
    "enroll_courses",
    "track_progress",
    "earn_certificates",
    "messaging",
    "sell_resources",
    "manage_bookings",
    "create_courses",
    "manage_certifications",
    "directory_listing",
];

const PLATINUM_FEATURES: &[&str] = &[
    "browse_catalog",
    "enroll_courses",
    "track_progress",
    "earn_certificates",
    "messaging",
    "sell_resources",
    "manage_bookings",
    "create_courses",
    "manage_certifications",
    "directory_listing",
    "publish_courses",
    "view_analytics",
    "priority_support",
];

/// Seeded subscription plans.
pub const SUBSCRIPTION_PLANS: &[PlanSeed] = &[
    PlanSeed {
        id: "free",
        tier: PlanTier::Free,
        name: "Free",
        monthly_price_cents: 0,
        yearly_price_cents: 0,
        features: &["browse_catalog"],
        unlocked_roles: &[Role::GuestUser],
    },
    PlanSeed {
        id: "silver",
        tier: PlanTier::Silver,
        name: "Silver (Student)",
        monthly_price_cents: 1_999,
        yearly_price_cents: 19_990,
        features: SILVER_FEATURES,
        unlocked_roles: &[Role::Student],
    },
    PlanSeed {
        id: "gold",
        tier: PlanTier::Gold,
        name: "Gold (Professional)",
        monthly_price_cents: 4_999,
        yearly_price_cents: 49_990,
        features: GOLD_FEATURES,
        unlocked_roles: &[
            Role::BookingProfessional,
            Role::CurriculumSeller,
            Role::DirectoryMember,
        ],
    },
    PlanSeed {
        id: "platinum",
        tier: PlanTier::Platinum,
        name: "Platinum",
        monthly_price_cents: 9_999,
        yearly_price_cents: 99_990,
        features: PLATINUM_FEATURES,
        unlocked_roles: &[
            Role::BookingProfessional,
            Role::CurriculumSeller,
            Role::DirectoryMember,
            Role::CourseCreatorAdmin,
        ],
    },
];

impl PlanSeed {
    /// Converts the seed into a validated plan definition.
    pub fn to_plan(&self) -> AppResult<SubscriptionPlan> {
        Ok(SubscriptionPlan {
            id: PlanId::new(self.id)?,
            tier: self.tier,
            name: self.name.to_owned(),
            monthly_price_cents: self.monthly_price_cents,
            yearly_price_cents: self.yearly_price_cents,
            features: self
                .features
                .iter()
                .map(|feature| FeatureKey::new(*feature))
                .collect::<AppResult<Vec<_>>>()?,
            unlocked_roles: self.unlocked_roles.to_vec(),
        })
    }
}

/// Builds the policy definition from the built-in tables.
pub fn builtin_policy_definition() -> AppResult<AccessPolicyDefinition> {
    let hierarchy = ROLE_HIERARCHY
        .iter()
        .map(|(role, inherited)| (*role, inherited.to_vec()))
        .collect();

    let role_permissions = ROLE_PERMISSIONS
        .iter()
        .map(|(role, permissions)| -> AppResult<(Role, Vec<Permission>)> {
            let permissions = permissions
                .iter()
                .map(|permission| Permission::new(*permission))
                .collect::<AppResult<Vec<_>>>()?;
            Ok((*role, permissions))
        })
        .collect::<AppResult<_>>()?;

    let role_features = ROLE_FEATURES
        .iter()
        .map(|(role, features)| -> AppResult<(Role, Vec<FeatureKey>)> {
            let features = features
                .iter()
                .map(|feature| FeatureKey::new(*feature))
                .collect::<AppResult<Vec<_>>>()?;
            Ok((*role, features))
        })
        .collect::<AppResult<_>>()?;

    let plans = SUBSCRIPTION_PLANS
        .iter()
        .map(PlanSeed::to_plan)
        .collect::<AppResult<Vec<_>>>()?;

    Ok(AccessPolicyDefinition {
        hierarchy,
        role_permissions,
        role_features,
        plans,
    })
}

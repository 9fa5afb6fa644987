mod conversions;
mod types;

pub use types::{
    EffectiveAccessResponse, FeatureAccessResponse, RolePermissionsResponse,
    SubscriptionPlanResponse,
};

mod conversions;
mod types;

pub use types::{SubscriptionChangeResponse, SubscriptionEventRequest};

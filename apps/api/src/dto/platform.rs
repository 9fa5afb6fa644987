mod types;

pub use types::{CreateResourceRequest, ResourceDraftResponse, SurfaceResponse};

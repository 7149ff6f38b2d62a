pub mod auth;
pub mod response;
pub mod validate;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use response::{respond, Affected, Count, Created, Listing, Payload};
pub use validate::{FieldError, FieldRule, Location, Rules, Validated, ValidationErrors};

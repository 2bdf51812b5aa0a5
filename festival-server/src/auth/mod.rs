//! Authentication: JWT issue/verify and request extractors

pub mod extractor;
pub mod jwt;

pub use extractor::{CurrentUser, MaybeUser};
pub use jwt::{Claims, create_token, verify_token};

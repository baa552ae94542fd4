use jsonwebtoken::Algorithm;

pub mod claims;
pub mod errors;
pub mod issuer;
pub mod verifier;

pub use claims::Claims;
pub use errors::JwtError;
pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
pub use verifier::TokenVerifier;

pub(crate) const ALGORITHM: Algorithm = Algorithm::HS256;

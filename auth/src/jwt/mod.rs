pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::AccessClaims;
pub use claims::TokenPayload;
pub use codec::Expiry;
pub use codec::TokenCodec;
pub use errors::JwtError;

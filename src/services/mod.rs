pub mod firebase;

pub use firebase::{FirebaseAuth, IdentityClaims, TokenVerifier};

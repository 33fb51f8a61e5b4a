//! # Bookwise Auth Module
//!
//! Credential checks, signed bearer tokens and the ownership rule
//! every mutating catalog operation goes through.

pub mod crypto;
pub mod errors;
pub mod gate;
pub mod jwt;
pub mod session;
pub mod user;

pub use errors::{AuthError, AuthResult};
pub use gate::{AccessGate, Ownership, Session};
pub use jwt::{TokenClaims, TokenIssuer};
pub use session::SessionFile;
pub use user::{SignupRequest, User, UserDirectory, UserProfile};

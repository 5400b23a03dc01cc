//! Seeded credentials, sessions, and the wilaya access gate
//!
//! Authentication here is deliberately simple: a static user list with
//! SHA-256 password hashes, matched at login. The interesting part is the
//! access gate: `user`-role sessions are restricted to their own wilaya,
//! and the check runs at the service boundary, never inside the stores.

pub mod session;
pub mod users;

pub use session::*;
pub use users::*;

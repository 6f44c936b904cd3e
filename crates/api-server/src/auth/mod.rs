//! Demo accounts and the current-user session.

mod store;

pub use store::{AuthError, Registration, User, UserStore};

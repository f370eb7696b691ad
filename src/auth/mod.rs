pub mod session;
pub mod store;

pub use session::{AuthError, AuthProvider, AuthSession, PendingSignIn, SignInProvider, SimulatedSignIn, User};
pub use store::SessionStore;

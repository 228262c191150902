pub mod backend;
pub mod guard;
pub mod nav;
pub mod policy;
pub mod storage;
pub mod store;

pub use backend::{AuthBackend, MockAuthBackend};
pub use guard::{evaluate, RouteDecision, RouteGuard, LANDING_PATH, PUBLIC_PATHS};
pub use nav::{NavIcon, NavigationCatalog, NavigationEntry, NavigationMenu};
pub use policy::{RolePolicy, RolePolicyEntry, SHARED_PATHS};
pub use storage::{FileStorage, MemoryStorage, SessionStorage, StoredSession, SESSION_KEY};
pub use store::SessionStore;

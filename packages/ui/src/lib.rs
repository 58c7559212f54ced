//! This crate contains all shared UI for the workspace: the store/session
//! providers, the snapshot bridge hook, and the common widgets the page
//! views compose.

mod provider;
pub use provider::{
    use_session, use_session_state, use_stores, AppSession, AppStores, StoreProvider,
};

mod platform;
pub use platform::{api_base_url, make_storage, PlatformStorage};

mod snapshot;
pub use snapshot::use_snapshot;

mod feedback;
pub use feedback::{show_feedback, use_feedback, Feedback, FeedbackBanner, FeedbackKind};

mod confirm;
pub use confirm::ConfirmDialog;

mod navbar;
pub use navbar::Navbar;

mod time;
pub(crate) use time::sleep_secs;

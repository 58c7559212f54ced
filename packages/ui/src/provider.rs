//! Store and session context for the whole application.
//!
//! [`StoreProvider`] constructs the process-wide client and store instances
//! exactly once and hands them to views through Dioxus context — explicit
//! dependency injection, no ambient singletons. It also owns the glue the
//! framework-free store crate leaves to the UI layer:
//!
//! - the initial collection fetch,
//! - pumping published session snapshots into a render [`Signal`],
//! - the auto-logout timer armed for `expires_in` seconds,
//! - tearing the session down when a 401 from any endpoint empties the
//!   shared [`TokenCell`].

use std::sync::Arc;

use api::{HttpApi, TokenCell};
use dioxus::prelude::*;
use store::{SessionState, SessionStore, Stores};

use crate::feedback::Feedback;
use crate::platform::{api_base_url, make_storage, PlatformStorage};
use crate::sleep_secs;

pub type AppStores = Stores<HttpApi>;
pub type AppSession = SessionStore<HttpApi, PlatformStorage>;

/// The entity stores, from context.
pub fn use_stores() -> Arc<AppStores> {
    use_context::<Arc<AppStores>>()
}

/// The session store, from context.
pub fn use_session() -> Arc<AppSession> {
    use_context::<Arc<AppSession>>()
}

/// Reactive session state for rendering. Updates on login, logout, expiry
/// and 401 teardown.
pub fn use_session_state() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

/// Provider component wrapping the whole app.
#[component]
pub fn StoreProvider(children: Element) -> Element {
    let (stores, session, token) = use_hook(|| {
        let token = TokenCell::new();
        let http = HttpApi::new(api_base_url(), token.clone());
        let session = Arc::new(SessionStore::new(
            http.clone(),
            make_storage(),
            token.clone(),
        ));
        let stores = Arc::new(Stores::new(http));
        (stores, session, token)
    });

    use_context_provider(|| stores.clone());
    use_context_provider(|| session.clone());
    let mut session_state = use_signal(|| session.state());
    use_context_provider(|| session_state);
    let feedback = use_signal(|| Option::<Feedback>::None);
    use_context_provider(|| feedback);

    // Initial fetch of every collection.
    let loader_stores = stores.clone();
    let _loader = use_resource(move || {
        let stores = loader_stores.clone();
        async move { stores.load_all().await }
    });

    // Pump session snapshots into the render signal; every authenticated
    // publish (login or restored session) re-arms the logout timer.
    let pump_session = session.clone();
    use_effect(move || {
        if let Some(expires_in) = session_state.peek().expires_in {
            schedule_auto_logout(pump_session.clone(), expires_in);
        }
        let session = pump_session.clone();
        spawn(async move {
            let mut stream = session.subscribe();
            loop {
                let Some(state) = stream.changed().await else {
                    break;
                };
                if let Some(expires_in) = state.expires_in {
                    schedule_auto_logout(session.clone(), expires_in);
                }
                session_state.set(state);
            }
        });
    });

    // A 401 on any endpoint clears the shared token cell; observe it and
    // tear down the local session.
    let teardown_session = session.clone();
    use_effect(move || {
        let session = teardown_session.clone();
        let mut rx = token.watch();
        spawn(async move {
            loop {
                if rx.changed().await.is_err() {
                    break;
                }
                let cleared = rx.borrow_and_update().is_none();
                if cleared && session.state().is_authenticated() {
                    tracing::warn!("session token invalidated, signing out");
                    session.clear_local();
                }
            }
        });
    });

    rsx! {
        {children}
    }
}

/// Log out when the token the timer was armed for reaches its expiry and is
/// still the current one.
fn schedule_auto_logout(session: Arc<AppSession>, expires_in: i64) {
    let Some(armed_token) = session.token() else {
        return;
    };
    spawn(async move {
        sleep_secs(expires_in.max(0) as u64).await;
        if session.token().as_deref() == Some(armed_token.as_str()) {
            session.logout().await;
        }
    });
}

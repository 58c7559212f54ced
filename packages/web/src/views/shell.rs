//! Application chrome for the authenticated pages: title, tab bar, logout.
//! The login and account pages sit outside this layout, which reproduces
//! the hide-navigation-on-login behavior of the app shell.

use dioxus::prelude::*;
use ui::{use_session, use_session_state, FeedbackBanner, Navbar};

use crate::Route;

#[component]
pub fn Shell() -> Element {
    let nav = use_navigator();
    let session = use_session();
    let session_state = use_session_state();

    let sair = move |_| {
        let session = session.clone();
        async move {
            session.logout().await;
            nav.push(Route::Login {});
        }
    };

    rsx! {
        header {
            class: "app-header",
            h1 { "Sistema de Cartão de Vacinação" }
            if let Some(usuario) = session_state().usuario {
                span { class: "app-user", "{usuario.nome}" }
            }
        }

        Navbar {
            Link { class: "nav-tab", to: Route::CartaoVacinacao {}, "Cartão de Vacinação" }
            Link { class: "nav-tab", to: Route::CadastroPessoa {}, "Cadastrar Pessoa" }
            Link { class: "nav-tab", to: Route::CadastroVacina {}, "Cadastrar Vacina" }
            Link { class: "nav-tab", to: Route::CadastroVacinacao {}, "Registrar Vacinação" }
            Link { class: "nav-tab", to: Route::ListaPessoas {}, "Pessoas Cadastradas" }
            button { class: "nav-logout", onclick: sair, "Sair" }
        }

        FeedbackBanner {}

        main {
            class: "app-main",
            Outlet::<Route> {}
        }
    }
}

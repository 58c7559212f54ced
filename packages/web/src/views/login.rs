//! Login page with email/password form.

use api::LoginRequest;
use dioxus::prelude::*;
use ui::{use_session, use_session_state};

use crate::Route;

#[component]
pub fn Login() -> Element {
    let session = use_session();
    let session_state = use_session_state();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut senha = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // Already authenticated: straight to the card view.
    if session_state().is_authenticated() {
        nav.replace(Route::CartaoVacinacao {});
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let session = session.clone();
        spawn(async move {
            error.set(None);

            let e = email().trim().to_string();
            let s = senha();
            if e.is_empty() || s.is_empty() {
                error.set(Some("Preencha os campos obrigatórios".to_string()));
                return;
            }

            loading.set(true);
            match session.login(LoginRequest { email: e, senha: s }).await {
                Ok(_) => {
                    nav.push(Route::CartaoVacinacao {});
                }
                Err(err) => {
                    loading.set(false);
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",

            h1 { "Sistema de Cartão de Vacinação" }
            p { class: "auth-subtitle", "Acesse com sua conta" }

            form {
                class: "auth-form",
                onsubmit: handle_login,

                if let Some(err) = error() {
                    div { class: "form-error", "{err}" }
                }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                input {
                    r#type: "password",
                    placeholder: "Senha",
                    value: senha(),
                    oninput: move |evt: FormEvent| senha.set(evt.value()),
                }

                button {
                    class: "primary",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Entrando..." } else { "Entrar" }
                }
            }

            p {
                class: "auth-switch",
                "Não tem uma conta? "
                Link { to: Route::CriarConta {}, "Criar conta" }
            }
        }
    }
}

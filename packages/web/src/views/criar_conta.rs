//! Account-creation page. A successful registration lands the operator
//! authenticated, so it goes straight to the card view.

use api::CriarContaRequest;
use dioxus::prelude::*;
use ui::{use_session, use_session_state};

use crate::Route;

#[component]
pub fn CriarConta() -> Element {
    let session = use_session();
    let session_state = use_session_state();
    let nav = use_navigator();
    let mut nome = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut senha = use_signal(String::new);
    let mut confirmar_senha = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    if session_state().is_authenticated() {
        nav.replace(Route::CartaoVacinacao {});
    }

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let session = session.clone();
        spawn(async move {
            error.set(None);

            let n = nome().trim().to_string();
            let e = email().trim().to_string();
            let s = senha();
            let cs = confirmar_senha();
            if n.is_empty() || e.is_empty() || s.is_empty() {
                error.set(Some("Preencha os campos obrigatórios".to_string()));
                return;
            }
            if s != cs {
                error.set(Some("As senhas não coincidem".to_string()));
                return;
            }

            loading.set(true);
            match session
                .create_account(CriarContaRequest {
                    nome: n,
                    email: e,
                    senha: s,
                    confirmar_senha: cs,
                })
                .await
            {
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

            h1 { "Criar Conta" }
            p { class: "auth-subtitle", "Cadastre-se para acessar o sistema" }

            form {
                class: "auth-form",
                onsubmit: handle_submit,

                if let Some(err) = error() {
                    div { class: "form-error", "{err}" }
                }

                input {
                    r#type: "text",
                    placeholder: "Nome",
                    value: nome(),
                    oninput: move |evt: FormEvent| nome.set(evt.value()),
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

                input {
                    r#type: "password",
                    placeholder: "Confirmar senha",
                    value: confirmar_senha(),
                    oninput: move |evt: FormEvent| confirmar_senha.set(evt.value()),
                }

                button {
                    class: "primary",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Criando conta..." } else { "Criar conta" }
                }
            }

            p {
                class: "auth-switch",
                "Já tem uma conta? "
                Link { to: Route::Login {}, "Entrar" }
            }
        }
    }
}

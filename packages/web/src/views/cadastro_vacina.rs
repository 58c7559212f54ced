//! Vaccine registration form.

use api::NovaVacina;
use dioxus::prelude::*;
use ui::{show_feedback, use_feedback, use_stores, FeedbackKind};

#[component]
pub fn CadastroVacina() -> Element {
    let stores = use_stores();
    let feedback = use_feedback();
    let mut nome = use_signal(String::new);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let stores = stores.clone();
        spawn(async move {
            let nome_v = nome().trim().to_string();
            if nome_v.len() < 3 {
                show_feedback(
                    feedback,
                    FeedbackKind::Error,
                    "Preencha os campos obrigatórios",
                );
                return;
            }

            match stores.vacinas.create(NovaVacina { nome: nome_v }).await {
                Ok(_) => {
                    show_feedback(
                        feedback,
                        FeedbackKind::Success,
                        "Vacina cadastrada com sucesso!",
                    );
                    nome.set(String::new());
                }
                Err(err) => {
                    show_feedback(feedback, FeedbackKind::Error, err.to_string());
                }
            }
        });
    };

    rsx! {
        section {
            class: "page",

            h2 { "Cadastrar Vacina" }

            form {
                class: "entity-form",
                onsubmit: handle_submit,

                div {
                    class: "form-field",
                    label { "Nome da vacina" }
                    input {
                        r#type: "text",
                        placeholder: "Ex.: BCG",
                        value: nome(),
                        oninput: move |evt: FormEvent| nome.set(evt.value()),
                    }
                }

                button { class: "primary", r#type: "submit", "Cadastrar" }
            }
        }
    }
}

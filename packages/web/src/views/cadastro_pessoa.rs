//! Person registration form.

use api::{NovaPessoa, Sexo};
use dioxus::prelude::*;
use ui::{show_feedback, use_feedback, use_stores, FeedbackKind};

#[component]
pub fn CadastroPessoa() -> Element {
    let stores = use_stores();
    let feedback = use_feedback();
    let mut nome = use_signal(String::new);
    let mut documento = use_signal(String::new);
    let mut sexo = use_signal(String::new);
    let mut idade = use_signal(String::new);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let stores = stores.clone();
        spawn(async move {
            let nome_v = nome().trim().to_string();
            let documento_v = documento().trim().to_string();
            let sexo_v = Sexo::parse(sexo().trim());
            let idade_v = idade().trim().parse::<u32>().ok();

            let (Some(sexo_v), Some(idade_v)) = (sexo_v, idade_v) else {
                show_feedback(
                    feedback,
                    FeedbackKind::Error,
                    "Preencha os campos obrigatórios",
                );
                return;
            };
            if nome_v.len() < 3 || documento_v.is_empty() {
                show_feedback(
                    feedback,
                    FeedbackKind::Error,
                    "Preencha os campos obrigatórios",
                );
                return;
            }

            match stores
                .pessoas
                .create(NovaPessoa {
                    nome: nome_v,
                    idade: idade_v,
                    sexo: sexo_v,
                    documento: documento_v,
                })
                .await
            {
                Ok(_) => {
                    show_feedback(
                        feedback,
                        FeedbackKind::Success,
                        "Pessoa cadastrada com sucesso!",
                    );
                    nome.set(String::new());
                    documento.set(String::new());
                    sexo.set(String::new());
                    idade.set(String::new());
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

            h2 { "Cadastrar Pessoa" }

            form {
                class: "entity-form",
                onsubmit: handle_submit,

                div {
                    class: "form-field",
                    label { "Nome" }
                    input {
                        r#type: "text",
                        placeholder: "Nome completo",
                        value: nome(),
                        oninput: move |evt: FormEvent| nome.set(evt.value()),
                    }
                }

                div {
                    class: "form-field",
                    label { "Documento" }
                    input {
                        r#type: "text",
                        placeholder: "Número de identificação",
                        value: documento(),
                        oninput: move |evt: FormEvent| documento.set(evt.value()),
                    }
                }

                div {
                    class: "form-field",
                    label { "Sexo" }
                    select {
                        value: sexo(),
                        onchange: move |evt| sexo.set(evt.value()),
                        option { value: "", "Selecione" }
                        option { value: "Masculino", "Masculino" }
                        option { value: "Feminino", "Feminino" }
                        option { value: "Outro", "Outro" }
                    }
                }

                div {
                    class: "form-field",
                    label { "Idade" }
                    input {
                        r#type: "number",
                        min: "0",
                        value: idade(),
                        oninput: move |evt: FormEvent| idade.set(evt.value()),
                    }
                }

                button { class: "primary", r#type: "submit", "Cadastrar" }
            }
        }
    }
}

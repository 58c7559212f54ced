//! Vaccination registration form: person × vaccine × dose × date.

use api::NovaVacinacao;
use chrono::{NaiveDate, NaiveTime, Utc};
use dioxus::prelude::*;
use ui::{show_feedback, use_feedback, use_snapshot, use_stores, FeedbackKind};

fn hoje() -> String {
    Utc::now().date_naive().to_string()
}

#[component]
pub fn CadastroVacinacao() -> Element {
    let stores = use_stores();
    let pessoas = use_snapshot(stores.pessoas.subscribe());
    let vacinas = use_snapshot(stores.vacinas.subscribe());
    let feedback = use_feedback();
    let mut pessoa_id = use_signal(String::new);
    let mut vacina_id = use_signal(String::new);
    let mut dose = use_signal(|| "1".to_string());
    let mut data = use_signal(hoje);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let stores = stores.clone();
        spawn(async move {
            let pessoa_v = pessoa_id();
            let vacina_v = vacina_id();
            let dose_v = dose().trim().parse::<u32>().ok().filter(|d| *d >= 1);
            let data_v = NaiveDate::parse_from_str(data().trim(), "%Y-%m-%d").ok();

            let (Some(dose_v), Some(data_v)) = (dose_v, data_v) else {
                show_feedback(
                    feedback,
                    FeedbackKind::Error,
                    "Preencha os campos obrigatórios",
                );
                return;
            };
            if pessoa_v.is_empty() || vacina_v.is_empty() {
                show_feedback(
                    feedback,
                    FeedbackKind::Error,
                    "Preencha os campos obrigatórios",
                );
                return;
            }

            let nova = NovaVacinacao {
                pessoa_id: pessoa_v,
                vacina_id: vacina_v,
                dose: dose_v,
                data_aplicacao: data_v.and_time(NaiveTime::MIN).and_utc(),
            };
            match stores.vacinacoes.create(nova).await {
                Ok(_) => {
                    show_feedback(
                        feedback,
                        FeedbackKind::Success,
                        "Vacinação registrada com sucesso!",
                    );
                    pessoa_id.set(String::new());
                    vacina_id.set(String::new());
                    dose.set("1".to_string());
                    data.set(hoje());
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

            h2 { "Registrar Vacinação" }

            form {
                class: "entity-form",
                onsubmit: handle_submit,

                div {
                    class: "form-field",
                    label { "Pessoa" }
                    select {
                        value: pessoa_id(),
                        onchange: move |evt| pessoa_id.set(evt.value()),
                        option { value: "", "Selecione a pessoa" }
                        for pessoa in pessoas() {
                            option {
                                key: "{pessoa.id}",
                                value: "{pessoa.id}",
                                "{pessoa.nome}"
                            }
                        }
                    }
                }

                div {
                    class: "form-field",
                    label { "Vacina" }
                    select {
                        value: vacina_id(),
                        onchange: move |evt| vacina_id.set(evt.value()),
                        option { value: "", "Selecione a vacina" }
                        for vacina in vacinas() {
                            option {
                                key: "{vacina.id}",
                                value: "{vacina.id}",
                                "{vacina.nome}"
                            }
                        }
                    }
                }

                div {
                    class: "form-field",
                    label { "Dose" }
                    input {
                        r#type: "number",
                        min: "1",
                        value: dose(),
                        oninput: move |evt: FormEvent| dose.set(evt.value()),
                    }
                }

                div {
                    class: "form-field",
                    label { "Data de aplicação" }
                    input {
                        r#type: "date",
                        value: data(),
                        oninput: move |evt: FormEvent| data.set(evt.value()),
                    }
                }

                button { class: "primary", r#type: "submit", "Registrar" }
            }
        }
    }
}

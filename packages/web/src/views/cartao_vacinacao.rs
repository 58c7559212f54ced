//! The vaccination card: every event recorded for one selected person.
//! The card query always goes to the server, so the view is fresh even
//! when another operator recorded events meanwhile.

use std::sync::Arc;

use api::{Pessoa, Vacinacao};
use dioxus::prelude::*;
use ui::{
    show_feedback, use_feedback, use_snapshot, use_stores, AppStores, ConfirmDialog, Feedback,
    FeedbackKind,
};

async fn carregar_cartao(
    stores: Arc<AppStores>,
    pessoa_id: String,
    mut vacinacoes: Signal<Vec<Vacinacao>>,
    feedback: Signal<Option<Feedback>>,
) {
    match stores.vacinacoes.card_for(&pessoa_id).await {
        Ok(lista) => {
            if lista.is_empty() {
                show_feedback(
                    feedback,
                    FeedbackKind::Error,
                    "Nenhuma vacinação encontrada para esta pessoa",
                );
            }
            vacinacoes.set(lista);
        }
        Err(err) => {
            show_feedback(
                feedback,
                FeedbackKind::Error,
                format!("Erro ao carregar vacinações: {err}"),
            );
            vacinacoes.set(Vec::new());
        }
    }
}

#[component]
pub fn CartaoVacinacao() -> Element {
    let stores = use_stores();
    let pessoas = use_snapshot(stores.pessoas.subscribe());
    let feedback = use_feedback();
    let mut pessoa_id = use_signal(String::new);
    let mut pessoa_selecionada = use_signal(|| Option::<Pessoa>::None);
    let mut vacinacoes = use_signal(Vec::<Vacinacao>::new);
    let mut excluindo = use_signal(|| Option::<Vacinacao>::None);

    let consultar = {
        let stores = stores.clone();
        move |_| {
            let id = pessoa_id();
            if id.is_empty() {
                show_feedback(
                    feedback,
                    FeedbackKind::Error,
                    "Por favor, selecione uma pessoa",
                );
                return;
            }
            pessoa_selecionada.set(pessoas().into_iter().find(|p| p.id == id));
            let stores = stores.clone();
            spawn(async move {
                carregar_cartao(stores, id, vacinacoes, feedback).await;
            });
        }
    };

    let handle_excluir = move |_| {
        let Some(vacinacao) = excluindo() else {
            return;
        };
        excluindo.set(None);
        let stores = stores.clone();
        spawn(async move {
            match stores.vacinacoes.delete(&vacinacao.id).await {
                Ok(()) => {
                    show_feedback(
                        feedback,
                        FeedbackKind::Success,
                        "Registro de vacinação excluído com sucesso!",
                    );
                    carregar_cartao(stores, vacinacao.pessoa_id.clone(), vacinacoes, feedback)
                        .await;
                }
                Err(err) => {
                    show_feedback(
                        feedback,
                        FeedbackKind::Error,
                        format!("Erro ao excluir registro de vacinação: {err}"),
                    );
                }
            }
        });
    };

    rsx! {
        section {
            class: "page",

            h2 { "Cartão de Vacinação" }

            div {
                class: "card-query",
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
                button { class: "primary", onclick: consultar, "Consultar" }
            }

            if let Some(pessoa) = pessoa_selecionada() {
                div {
                    class: "card-holder",
                    h3 { "{pessoa.nome}" }
                    p { "Documento: {pessoa.documento} · Idade: {pessoa.idade}" }
                }

                if !vacinacoes().is_empty() {
                    table {
                        class: "entity-table",
                        thead {
                            tr {
                                th { "Vacina" }
                                th { "Dose" }
                                th { "Data de aplicação" }
                                th { "" }
                            }
                        }
                        tbody {
                            for vacinacao in vacinacoes() {
                                tr {
                                    key: "{vacinacao.id}",
                                    td {
                                        {vacinacao.vacina_nome.clone().unwrap_or_else(|| vacinacao.vacina_id.clone())}
                                    }
                                    td { "{vacinacao.dose}" }
                                    td { {vacinacao.data_aplicacao.format("%d/%m/%Y").to_string()} }
                                    td {
                                        button {
                                            class: "danger",
                                            onclick: {
                                                let vacinacao = vacinacao.clone();
                                                move |_| excluindo.set(Some(vacinacao.clone()))
                                            },
                                            "Excluir"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if let Some(vacinacao) = excluindo() {
                ConfirmDialog {
                    message: format!(
                        "Tem certeza que deseja excluir o registro da vacina {} - Dose {}?",
                        vacinacao
                            .vacina_nome
                            .clone()
                            .unwrap_or_else(|| vacinacao.vacina_id.clone()),
                        vacinacao.dose
                    ),
                    on_confirm: handle_excluir,
                    on_cancel: move |_| excluindo.set(None),
                }
            }
        }
    }
}

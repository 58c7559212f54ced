//! Registered-people list with cascading removal.

use api::Pessoa;
use dioxus::prelude::*;
use ui::{show_feedback, use_feedback, use_snapshot, use_stores, ConfirmDialog, FeedbackKind};

#[component]
pub fn ListaPessoas() -> Element {
    let stores = use_stores();
    let pessoas = use_snapshot(stores.pessoas.subscribe());
    let feedback = use_feedback();
    let mut removendo = use_signal(|| Option::<Pessoa>::None);

    let handle_confirm = move |_| {
        let Some(pessoa) = removendo() else {
            return;
        };
        removendo.set(None);
        let stores = stores.clone();
        spawn(async move {
            match stores.remove_person(&pessoa.id).await {
                Ok(()) => {
                    show_feedback(
                        feedback,
                        FeedbackKind::Success,
                        "Pessoa removida com sucesso!",
                    );
                }
                Err(err) => {
                    show_feedback(
                        feedback,
                        FeedbackKind::Error,
                        format!("Erro ao remover pessoa: {err}"),
                    );
                }
            }
        });
    };

    rsx! {
        section {
            class: "page",

            h2 { "Pessoas Cadastradas" }

            if pessoas().is_empty() {
                p { class: "empty-state", "Nenhuma pessoa cadastrada." }
            } else {
                table {
                    class: "entity-table",
                    thead {
                        tr {
                            th { "Nome" }
                            th { "Documento" }
                            th { "Idade" }
                            th { "Sexo" }
                            th { "" }
                        }
                    }
                    tbody {
                        for pessoa in pessoas() {
                            tr {
                                key: "{pessoa.id}",
                                td { "{pessoa.nome}" }
                                td { "{pessoa.documento}" }
                                td { "{pessoa.idade}" }
                                td { "{pessoa.sexo.as_str()}" }
                                td {
                                    button {
                                        class: "danger",
                                        onclick: {
                                            let pessoa = pessoa.clone();
                                            move |_| removendo.set(Some(pessoa.clone()))
                                        },
                                        "Remover"
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if let Some(pessoa) = removendo() {
                ConfirmDialog {
                    message: format!(
                        "Tem certeza que deseja remover {}? Isso também removerá todas as vacinações desta pessoa.",
                        pessoa.nome
                    ),
                    on_confirm: handle_confirm,
                    on_cancel: move |_| removendo.set(None),
                }
            }
        }
    }
}

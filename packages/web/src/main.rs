use dioxus::prelude::*;

use ui::StoreProvider;
use views::{
    CadastroPessoa, CadastroVacina, CadastroVacinacao, CartaoVacinacao, CriarConta, ListaPessoas,
    Login, Shell,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/login")]
    Login {},
    #[route("/criar-conta")]
    CriarConta {},
    #[layout(Shell)]
        #[route("/")]
        Root {},
        #[route("/cartao-vacinacao")]
        CartaoVacinacao {},
        #[route("/cadastro-pessoa")]
        CadastroPessoa {},
        #[route("/cadastro-vacina")]
        CadastroVacina {},
        #[route("/cadastro-vacinacao")]
        CadastroVacinacao {},
        #[route("/lista-pessoas")]
        ListaPessoas {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        StoreProvider {
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to the card view.
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::CartaoVacinacao {});
    rsx! {}
}

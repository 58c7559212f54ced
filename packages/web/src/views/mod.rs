mod shell;
pub use shell::Shell;

mod login;
pub use login::Login;

mod criar_conta;
pub use criar_conta::CriarConta;

mod cartao_vacinacao;
pub use cartao_vacinacao::CartaoVacinacao;

mod cadastro_pessoa;
pub use cadastro_pessoa::CadastroPessoa;

mod cadastro_vacina;
pub use cadastro_vacina::CadastroVacina;

mod cadastro_vacinacao;
pub use cadastro_vacinacao::CadastroVacinacao;

mod lista_pessoas;
pub use lista_pessoas::ListaPessoas;

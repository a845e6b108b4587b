//! Interface de linha de comando do numflags.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// numflags - Classifica um número por predicados numéricos.
#[derive(Parser, Debug)]
#[command(name = "numflags")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arquivo de configuração (padrão: ./numflags.toml, depois o diretório do usuário).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Modo verbose.
    #[arg(short, long)]
    pub verbose: bool,

    /// Modo silencioso.
    #[arg(short, long)]
    pub quiet: bool,

    /// Comando a executar.
    #[command(subcommand)]
    pub command: Commands,
}

/// Comandos disponíveis.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Avalia um número e mostra os predicados verdadeiros.
    #[command(allow_negative_numbers = true)]
    Check {
        /// Número a avaliar (inteiro ou decimal).
        number: String,

        /// Emite o mapa completo predicado → bool em JSON.
        #[arg(short, long)]
        json: bool,

        /// Mostra diagnósticos de entrada inválida e falhas de predicado.
        #[arg(short = 'e', long)]
        show_errors: bool,

        /// Avalia apenas estes predicados (separados por vírgula).
        #[arg(long, value_delimiter = ',')]
        only: Vec<String>,
    },

    /// Lista os predicados registrados.
    List,

    /// Inicializa configuração no diretório atual.
    Init {
        /// Diretório de destino (padrão: diretório atual).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Mostra versão.
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_check_accepts_negative_number() {
        let cli = Cli::try_parse_from(["numflags", "check", "-121", "--json"]).unwrap();
        match cli.command {
            Commands::Check { number, json, .. } => {
                assert_eq!(number, "-121");
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_config_path_is_optional() {
        let cli = Cli::try_parse_from(["numflags", "list"]).unwrap();
        assert!(cli.config.is_none());

        let cli = Cli::try_parse_from(["numflags", "-c", "custom.toml", "list"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_only_is_comma_separated() {
        let cli = Cli::try_parse_from(["numflags", "check", "7", "--only", "prime,odd"]).unwrap();
        match cli.command {
            Commands::Check { only, .. } => assert_eq!(only, vec!["prime", "odd"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

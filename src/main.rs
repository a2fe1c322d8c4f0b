mod auth;
mod cli;
mod config;
mod download;
mod error;
mod github;
mod output;

use std::ffi::OsString;
use std::process;

use anyhow::Result;
use auth::Token;
use cli::Cli;
use config::Config;
use log::info;

/// Exit code for a missing token or a bad argument count.
const STARTUP_ERROR_EXIT_CODE: i32 = 1;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    output::print_banner();

    let (token, cli) = match resolve_startup(auth::TOKEN_ENV_VAR, std::env::args_os()) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("{}", output::failure(&e));
            process::exit(STARTUP_ERROR_EXIT_CODE);
        }
    };

    info!("Starting run-artifacts for run {}", cli.run_id());
    cli.execute(token, Config::default()).await?;

    Ok(())
}

/// Resolves the token from `token_var`, then the run ID from `args`.
///
/// The token is checked first. Neither step touches the network.
fn resolve_startup<I, T>(token_var: &str, args: I) -> error::Result<(Token, Cli)>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let token = Token::from_env_var(token_var)?;
    let cli = Cli::from_args(args)?;
    Ok((token, cli))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_startup_resolves_token_and_run_id() {
        std::env::set_var("RUN_ARTIFACTS_STARTUP_OK", "ghp_token");

        let (token, cli) =
            resolve_startup("RUN_ARTIFACTS_STARTUP_OK", ["run-artifacts", "12345"]).unwrap();
        assert_eq!(token.as_str(), "ghp_token");
        assert_eq!(cli.run_id(), "12345");
    }

    #[test]
    fn test_startup_checks_token_before_arguments() {
        std::env::remove_var("RUN_ARTIFACTS_STARTUP_UNSET");

        let err = resolve_startup("RUN_ARTIFACTS_STARTUP_UNSET", ["run-artifacts"]).unwrap_err();
        assert!(matches!(err, Error::MissingToken { .. }));

        let err = resolve_startup("RUN_ARTIFACTS_STARTUP_UNSET", ["run-artifacts", "1", "2"])
            .unwrap_err();
        assert!(matches!(err, Error::MissingToken { .. }));
    }

    #[test]
    fn test_startup_rejects_bad_argument_count() {
        std::env::set_var("RUN_ARTIFACTS_STARTUP_ARGS", "ghp_token");

        let err = resolve_startup("RUN_ARTIFACTS_STARTUP_ARGS", ["run-artifacts"]).unwrap_err();
        assert!(matches!(err, Error::MissingRunId));

        let err = resolve_startup("RUN_ARTIFACTS_STARTUP_ARGS", ["run-artifacts", "1", "2"])
            .unwrap_err();
        assert!(matches!(err, Error::TooManyArguments));
    }
}

//! Wiring between configuration, storage, auth and the shell's read/print loop.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

use crate::api::ApiClient;
use crate::auth::{AuthService, FirebaseIdentity};
use crate::config::{AuthMode, ClientConfig};
use crate::routes::Route;
use crate::shell::{Flow, Shell};
use crate::storage::LocalStorage;

/// Picks the auth flavour configured by `FIREBASE_API_KEY`.
pub fn build_auth(config: &ClientConfig, storage: Arc<dyn LocalStorage>) -> Result<AuthService> {
    Ok(match &config.auth_mode {
        AuthMode::Local => {
            info!("Running in local mode");
            AuthService::local(storage)
        }
        AuthMode::Backend { firebase_api_key } => {
            info!(api_url = %config.api_url, "Running against backend");
            AuthService::backend(
                storage,
                Arc::new(FirebaseIdentity::new(firebase_api_key.clone())),
                ApiClient::new(&config.api_url)?,
            )
        }
    })
}

/// Renders the home page, then feeds each input line to the shell until `quit`
/// or end of input.
pub async fn run<R, W>(shell: &mut Shell, input: R, output: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    print_lines(output, &shell.navigate(Route::Home).await).await?;

    let mut lines = input.lines();
    loop {
        output
            .write_all(format!("{}> ", shell.route()).as_bytes())
            .await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match shell.handle(&line).await {
            Flow::Continue(out) => print_lines(output, &out).await?,
            Flow::Quit => break,
        }
    }
    Ok(())
}

async fn print_lines<W: AsyncWrite + Unpin>(output: &mut W, lines: &[String]) -> Result<()> {
    for line in lines {
        output.write_all(line.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }
    output.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::storage::MemoryStorage;

    fn local_config() -> ClientConfig {
        ClientConfig {
            api_url: "http://localhost:8000/api".to_string(),
            storage_path: PathBuf::from("unused.json"),
            auth_mode: AuthMode::Local,
            rust_log: "info".to_string(),
        }
    }

    fn shell_for(config: &ClientConfig) -> Shell {
        let storage: Arc<dyn LocalStorage> = Arc::new(MemoryStorage::new());
        let auth = build_auth(config, Arc::clone(&storage)).unwrap();
        Shell::new(storage, auth)
    }

    #[tokio::test]
    async fn test_run_processes_lines_until_quit() {
        let mut shell = shell_for(&local_config());
        let mut output = Vec::new();
        let input: &[u8] = b"go /login\nlogin ada@example.com pw\nquit\ngo /stats\n";

        run(&mut shell, input, &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("Interview Prep\n"));
        assert!(text.contains("Demo User <ada@example.com>"));
        // Lines after `quit` are never read.
        assert_eq!(shell.route(), Route::Profile);
        assert!(!text.contains("Skill progress"));
    }

    #[tokio::test]
    async fn test_run_stops_at_end_of_input() {
        let mut shell = shell_for(&local_config());
        let mut output = Vec::new();

        run(&mut shell, &b"go /practice\n"[..], &mut output).await.unwrap();

        assert_eq!(shell.route(), Route::Practice);
        let text = String::from_utf8(output).unwrap();
        assert!(text.ends_with("/practice> "));
    }

    #[test]
    fn test_backend_mode_builds_backend_auth() {
        let config = ClientConfig {
            auth_mode: AuthMode::Backend {
                firebase_api_key: "key".to_string(),
            },
            ..local_config()
        };
        let storage: Arc<dyn LocalStorage> = Arc::new(MemoryStorage::new());
        assert!(build_auth(&config, storage).unwrap().is_backend());
        assert!(!build_auth(&local_config(), Arc::new(MemoryStorage::new()))
            .unwrap()
            .is_backend());
    }
}

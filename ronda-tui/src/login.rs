use anyhow::{Context, Result};
use ronda_api::RondaClient;
use std::io::{self, Write};

use crate::session_store;

/// Run the interactive login flow:
/// 1. Prompt for e-mail, then password without echo
/// 2. POST the credentials to the backend
/// 3. Save the returned bearer token
pub async fn run_login(api_url: &str) -> Result<()> {
    print!("E-mail: ");
    io::stdout().flush()?;
    let mut email = String::new();
    io::stdin()
        .read_line(&mut email)
        .context("Failed to read e-mail")?;
    let email = email.trim();
    if email.is_empty() {
        anyhow::bail!("E-mail is required");
    }

    let password = rpassword::prompt_password("Senha: ").context("Failed to read password")?;

    let mut client = RondaClient::new(api_url)?;
    let token = client
        .login(email, &password)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    session_store::save_token(token.as_str())?;
    println!("Login realizado. Sessão salva.");
    Ok(())
}

use clap::Parser;
use std::io::{self, BufRead, Write};

use taskmind_auth::{store::default_state_dir, Client, SessionStore};

/// Sign in to TaskMind with an email one-time code.
#[derive(Debug, Parser)]
enum Opt {
    /// Send a code to the given address and exchange it for a session.
    Login { email: String },
    /// Show the signed-in user.
    Whoami,
    /// End the session.
    Logout,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let opt = Opt::parse();

    let client = Client::new()?;
    let dir = default_state_dir().ok_or("no data directory available")?;
    let store = SessionStore::with_storage(client.auth.clone(), dir);

    match opt {
        Opt::Login { email } => {
            if store.is_authenticated() {
                println!("already signed in, run `logout` first");
                return Ok(());
            }

            store.request_code(&email).await?;
            print!("code sent to {email}, enter it here: ");
            io::stdout().flush()?;

            let mut code = String::new();
            io::stdin().lock().read_line(&mut code)?;

            let user = store.verify_code(&email, code.trim()).await?;
            println!("welcome, {}!", user.name);
        }
        Opt::Whoami => match store.current_user() {
            Some(user) => {
                println!("{} <{}>", user.name, user.email);
                if let Some(last_login) = user.last_login_at() {
                    println!("last login: {last_login}");
                }
            }
            None => println!("not signed in"),
        },
        Opt::Logout => {
            store.logout().await?;
            println!("signed out");
        }
    }

    Ok(())
}

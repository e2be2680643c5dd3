//! profilekit - a command-line profile viewer and editor for an OAuth2 web
//! backend.
//!
//! This binary is a thin consumer of `profilekit-core`: it reads session
//! state from the `SessionManager` and invokes its operations, the same
//! contract a graphical profile view would use.

use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use profilekit_core::utils::{format_date, format_optional};
use profilekit_core::{ApiClient, AuthStatus, Config, ProfileForm, SessionManager, User};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn print_usage() {
    eprintln!("Usage: profilekit [status | login [provider] | logout | update <display-name> [bio]]");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("profilekit starting");

    let config = Config::load()?;
    let api = ApiClient::new(config.backend_url())?;

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        None | Some("status") => show_status(api).await,
        Some("login") => {
            let provider = match args.get(2) {
                Some(p) => p.clone(),
                None => config.provider(),
            };
            login(&api, &provider);
            Ok(())
        }
        Some("logout") => logout(api).await,
        Some("update") => match args.get(2) {
            Some(name) => update(api, name, args.get(3).map(String::as_str)).await,
            None => {
                print_usage();
                std::process::exit(2);
            }
        },
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            std::process::exit(2);
        }
    }
}

async fn show_status(api: ApiClient) -> Result<()> {
    let manager = SessionManager::connect(api).await;
    let session = manager.session().await;

    match session.status() {
        AuthStatus::Authenticated => {
            if let Some(user) = session.user {
                print_profile(&user);
            }
        }
        _ => {
            println!("Not logged in. Run `profilekit login [provider]` to get a sign-in URL.");
        }
    }
    Ok(())
}

fn login(api: &ApiClient, provider: &str) {
    // Control leaves the application here: the browser owns the OAuth2 flow
    println!("Open this URL in your browser to sign in with {}:", provider);
    println!("{}", api.authorization_url(provider));
}

async fn logout(api: ApiClient) -> Result<()> {
    let manager = SessionManager::connect(api).await;
    if manager.user().await.is_none() {
        println!("Not logged in.");
        return Ok(());
    }

    if manager.logout().await.is_err() {
        if let Some(message) = manager.error().await {
            eprintln!("{}", message);
        }
        std::process::exit(1);
    }

    println!("Logged out.");
    Ok(())
}

async fn update(api: ApiClient, display_name: &str, bio: Option<&str>) -> Result<()> {
    let manager = SessionManager::connect(api).await;
    let user = match manager.user().await {
        Some(user) => user,
        None => {
            println!("Not logged in.");
            std::process::exit(1);
        }
    };

    let mut form = ProfileForm::from_user(&user);
    form.begin_edit();
    form.display_name = display_name.to_string();
    if let Some(bio) = bio {
        form.bio = bio.to_string();
    }

    form.set_saving(true);
    match manager.update_profile(&form.patch()).await {
        Ok(updated) => {
            form.sync_from(&updated);
            form.set_saving(false);
            println!("Profile updated.");
            print_profile(&updated);
            Ok(())
        }
        Err(err) => {
            form.set_saving(false);
            eprintln!("{}", err.message);
            std::process::exit(1);
        }
    }
}

fn print_profile(user: &User) {
    println!("Display Name:    {}", format_optional(&user.display_name, "Not set"));
    println!("Email:           {}", user.email);
    println!("Bio:             {}", format_optional(&user.bio, "No bio provided"));
    println!(
        "Member since:    {}",
        format_date(user.created_at.as_deref(), true)
    );
    println!(
        "Last updated:    {}",
        format_date(user.updated_at.as_deref(), false)
    );
    println!("User ID:         {}", user.id);
    println!(
        "Account created: {}",
        format_date(user.created_at.as_deref(), false)
    );
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use trustbox_client::config::{ClientConfig, LogFormat, API_BASE_URL_ENV, PAGE_ORIGIN_ENV};
use trustbox_client::error::ClientResult;
use trustbox_client::models::{GroupId, RecordDraft};
use trustbox_client::pages::RegisterPage;
use trustbox_client::session::FileSessionStore;
use trustbox_client::state::ClientState;
use trustbox_client::ui::{Notice, NoticeLevel, Page, Ui};
use trustbox_client::validate::{LoginForm, RegistrationForm};

#[derive(Parser, Debug)]
#[command(name = "trustbox", version, about = "TrustBox credential vault client")]
struct Cli {
    /// Origin the pages are served from; decides the API base URL.
    #[arg(long, global = true)]
    origin: Option<String>,

    /// Explicit API base URL.
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account.
    Register(RegisterArgs),
    /// Show every stored record.
    List {
        /// Print the record groups as HTML.
        #[arg(long)]
        html: bool,
    },
    /// Save a new record.
    Add(RecordArgs),
    /// Update a record; omit the password to keep the stored one.
    Update {
        id: u64,
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Delete a record.
    Remove { id: u64 },
    /// Forget the stored session.
    Logout,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    /// Defaults to the password.
    #[arg(long)]
    confirm_password: Option<String>,
    #[arg(long, default_value = "")]
    authorized_person: String,
    #[arg(long, default_value = "")]
    authorized_email: String,
    #[arg(long)]
    accept_terms: bool,
}

#[derive(Args, Debug)]
struct RecordArgs {
    #[arg(long)]
    username: String,
    #[arg(long, default_value = "")]
    password: String,
    #[arg(long)]
    domain: String,
}

impl RecordArgs {
    fn into_draft(self) -> RecordDraft {
        RecordDraft::new(self.username, self.password, self.domain)
    }
}

/// Prints notices to stderr; redirects only become log lines.
struct ConsoleUi;

impl Ui for ConsoleUi {
    fn notify(&self, notice: Notice) {
        let prefix = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        eprintln!("{prefix}: {}", notice.message);
    }

    fn redirect(&self, page: Page, delay: Duration) {
        info!(page = page.as_str(), ?delay, "next page");
    }
}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.compact().try_init(),
    };
    if let Err(e) = result {
        eprintln!("tracing init failed: {e}");
    }
}

fn load_config(cli: &Cli) -> ClientResult<ClientConfig> {
    ClientConfig::from_lookup(|key| {
        let flag = match key {
            PAGE_ORIGIN_ENV => cli.origin.clone(),
            API_BASE_URL_ENV => cli.api_base.clone(),
            _ => None,
        };
        flag.or_else(|| std::env::var(key).ok())
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(config.log_format);
    info!(api = %config.api_base_url, origin = %config.page_origin, "trustbox client starting");

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &ClientConfig) -> ClientResult<()> {
    let store = Arc::new(FileSessionStore::new(&config.session_file));
    let state = ClientState::new(config, store, Arc::new(ConsoleUi))?;

    match command {
        Command::Login { email, password } => {
            state.login_page().submit(&LoginForm::new(email, password)).await
        }
        Command::Register(args) => {
            if let Some(feedback) = RegisterPage::password_feedback(&args.password) {
                eprintln!("{feedback}");
            }
            let form = RegistrationForm {
                confirm_password: args.confirm_password.unwrap_or_else(|| args.password.clone()),
                username: args.username,
                email: args.email,
                password: args.password,
                authorized_person: args.authorized_person,
                authorized_email: args.authorized_email,
                accepted_terms: args.accept_terms,
            };
            state.register_page().submit(&form).await
        }
        Command::List { html } => {
            let mut vault = state.vault_page();
            vault.load().await?;
            if html {
                println!("{}", vault.renderer().to_html());
            } else {
                for group in vault.renderer().groups().iter().filter(|g| g.persisted) {
                    println!(
                        "{}\t{}\t{}",
                        group.id, group.draft.username, group.draft.domain
                    );
                }
            }
            Ok(())
        }
        Command::Add(record) => {
            let mut vault = state.vault_page();
            vault.load().await?;
            let blank = vault
                .renderer()
                .groups()
                .iter()
                .find(|g| !g.persisted)
                .map(|g| g.id);
            let id = match blank {
                Some(id) => id,
                None => vault.add_group()?,
            };
            vault.edit(id, record.into_draft())?;
            vault.save_group(id).await
        }
        Command::Update { id, record } => {
            let id = GroupId(id);
            let mut vault = state.vault_page();
            vault.load().await?;
            vault.edit(id, record.into_draft())?;
            vault.update_group(id).await
        }
        Command::Remove { id } => {
            let id = GroupId(id);
            let mut vault = state.vault_page();
            vault.load().await?;
            if vault.renderer().group(id).is_none() {
                warn!(group_id = %id, "record not listed, asking the server anyway");
            }
            vault.remove_group(id).await
        }
        Command::Logout => state.session.clear(),
    }
}

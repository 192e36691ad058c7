use super::args::{Cli, Commands};
use super::print::{print_message, print_messages, print_records, print_validation};
use cadastra::app::{App, Intent};
use cadastra::config::CadastraConfig;
use cadastra::error::{CadastraError, Result};
use cadastra::gateway::fs::FileGateway;
use cadastra::messages::CmdMessage;
use cadastra::store::RecordStore;
use cadastra::validation::Validation;
use directories::ProjectDirs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

const HOME_ENV: &str = "CADASTRA_HOME";

pub struct AppContext {
    app: App<FileGateway>,
    data_dir: PathBuf,
}

pub fn run(cli: Cli) -> Result<ExitCode> {
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add { name, email }) => handle_add(&mut ctx, name, email),
        Some(Commands::Edit { id, name, email }) => handle_edit(&mut ctx, id, name, email),
        Some(Commands::Delete { id }) => handle_delete(&mut ctx, id),
        Some(Commands::List { alpha, search }) => handle_list(&mut ctx, alpha, search),
        Some(Commands::Search { term, alpha }) => handle_list(&mut ctx, alpha, Some(term)),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&mut ctx, false, None),
    }
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "cadastra", "cadastra")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CadastraError::Config("Could not determine data directory".to_string()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli)?;
    let config = CadastraConfig::load(&data_dir)?;
    debug!(data_dir = %data_dir.display(), ?config, "starting");

    let gateway = FileGateway::new(data_dir.clone()).with_data_file(&config.data_file);
    let store = RecordStore::new(gateway).with_key(&config.storage_key);
    let mut app = App::new(store).with_dark_mode(config.dark_mode);
    app.start();

    Ok(AppContext { app, data_dir })
}

fn handle_add(ctx: &mut AppContext, name: String, email: String) -> Result<ExitCode> {
    submit(ctx, name, email)
}

fn handle_edit(
    ctx: &mut AppContext,
    id: String,
    name: Option<String>,
    email: Option<String>,
) -> Result<ExitCode> {
    ctx.app.dispatch(Intent::RequestEdit(id))?;
    let (current_name, current_email) = ctx.app.session().form_fields();
    submit(
        ctx,
        name.unwrap_or(current_name),
        email.unwrap_or(current_email),
    )
}

fn submit(ctx: &mut AppContext, name: String, email: String) -> Result<ExitCode> {
    ctx.app.dispatch(Intent::Submit { name, email })?;

    let form = &ctx.app.ui().form;
    if form.has_errors() {
        print_validation(&Validation {
            name_error: form.name_error,
            email_error: form.email_error,
        });
        return Ok(ExitCode::FAILURE);
    }
    print_status(ctx);
    Ok(ExitCode::SUCCESS)
}

fn handle_delete(ctx: &mut AppContext, id: String) -> Result<ExitCode> {
    ctx.app.dispatch(Intent::RequestDelete(id))?;
    print_status(ctx);
    Ok(ExitCode::SUCCESS)
}

fn handle_list(ctx: &mut AppContext, alpha: bool, search: Option<String>) -> Result<ExitCode> {
    if alpha {
        ctx.app.dispatch(Intent::ToggleSort)?;
    }
    if let Some(term) = search {
        ctx.app.dispatch(Intent::ChangeSearchTerm(term))?;
    }
    let snapshot = ctx.app.snapshot();
    print_records(&snapshot.view, snapshot.sort_label);
    Ok(ExitCode::SUCCESS)
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<ExitCode> {
    let mut config = CadastraConfig::load(&ctx.data_dir)?;

    match (key, value) {
        (None, _) => {
            for key in CadastraConfig::KEYS {
                if let Some(val) = config.get(key) {
                    println!("{} = {}", key, val);
                }
            }
        }
        (Some(key), None) => match config.get(&key) {
            Some(val) => println!("{}", val),
            None => {
                print_message(&CmdMessage::error(format!("Unknown config key: {}", key)));
                return Ok(ExitCode::FAILURE);
            }
        },
        (Some(key), Some(value)) => {
            config.set(&key, &value)?;
            config.save(&ctx.data_dir)?;
            let display = config.get(&key).unwrap_or(value);
            print_messages(&[CmdMessage::success(format!("{} set to {}", key, display))]);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_status(ctx: &AppContext) {
    if let Some(status) = &ctx.app.ui().status {
        print_message(status);
    }
}

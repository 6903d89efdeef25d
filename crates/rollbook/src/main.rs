//! `rollbook` - CLI for the attendance service
//!
//! This binary provides the command-line interface and the interactive page
//! for listing, creating, editing and deleting attendance records.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use clap::Parser;
use tracing::debug;

use rollbook::api::AttendanceApi;
use rollbook::app::{AutoConfirm, Prompter, TerminalPrompter};
use rollbook::cli::{
    shell, AddCommand, Cli, Command, ConfigCommand, DeleteCommand, EditCommand, ListCommand,
    OutputFormat, ShowCommand,
};
use rollbook::ui::AttendanceForm;
use rollbook::{
    init_logging, AppController, Config, DeleteOutcome, Error, HttpAttendanceApi, RecordId,
    SubmitOutcome,
};

type Controller = AppController<HttpAttendanceApi, Box<dyn Prompter>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;
    debug!(base_url = %config.api.base_url, resource = %config.api.resource, "Configuration loaded");

    match cli.command {
        Command::List(cmd) => handle_list(&config, &cmd).await,
        Command::Show(cmd) => handle_show(&config, &cmd).await,
        Command::Add(cmd) => handle_add(&config, cmd).await,
        Command::Edit(cmd) => handle_edit(&config, cmd).await,
        Command::Delete(cmd) => handle_delete(&config, &cmd).await,
        Command::Shell => handle_shell(&config).await,
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn controller(config: &Config, prompter: Box<dyn Prompter>) -> Result<Controller, Error> {
    let api = HttpAttendanceApi::from_config(config)?;
    let form = AttendanceForm::new(config.form.fields.clone());
    Ok(AppController::new(api, prompter, form))
}

fn print_table(controller: &Controller) {
    if let Some(error) = &controller.state().error {
        eprintln!("error: {error}");
    }
    print!("{}", controller.table().render());
}

async fn handle_list(config: &Config, cmd: &ListCommand) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = controller(config, Box::new(TerminalPrompter))?;
    controller.mount().await;

    match cmd.format {
        OutputFormat::Plain => print!("{}", controller.render()),
        OutputFormat::Table => print_table(&controller),
        OutputFormat::Json => {
            if let Some(error) = &controller.state().error {
                eprintln!("error: {error}");
            }
            println!("{}", serde_json::to_string_pretty(&controller.state().records)?);
        }
    }
    Ok(())
}

async fn handle_show(config: &Config, cmd: &ShowCommand) -> Result<(), Box<dyn std::error::Error>> {
    let api = HttpAttendanceApi::from_config(config)?;
    let record = api.get(&RecordId::from(cmd.id.as_str())).await?.data;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("Attendance record {}", record.id);
        let width = record
            .fields
            .keys()
            .map(|name| name.chars().count())
            .max()
            .unwrap_or(0);
        for (name, value) in &record.fields {
            println!("  {name:<width$} : {}", rollbook::record::display_value(value));
        }
    }
    Ok(())
}

async fn handle_add(config: &Config, cmd: AddCommand) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = controller(config, Box::new(TerminalPrompter))?;
    for (key, value) in cmd.fields {
        controller.form_mut().set_field(key, value);
    }

    match controller.submit_form().await {
        SubmitOutcome::Saved(record) => {
            println!("Created attendance record {}", record.id);
            print_table(&controller);
            Ok(())
        }
        SubmitOutcome::Failed => Err("record was not created".into()),
    }
}

async fn handle_edit(config: &Config, cmd: EditCommand) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = controller(config, Box::new(TerminalPrompter))?;
    controller.mount().await;
    if let Some(error) = &controller.state().error {
        return Err(error.clone().into());
    }

    let action = controller
        .table()
        .edit(&cmd.id)
        .ok_or_else(|| Error::record_not_found(cmd.id.clone()))?;
    controller.dispatch(action).await;
    for (key, value) in cmd.fields {
        controller.form_mut().set_field(key, value);
    }

    match controller.submit_form().await {
        SubmitOutcome::Saved(record) => {
            println!("Updated attendance record {}", record.id);
            print_table(&controller);
            Ok(())
        }
        SubmitOutcome::Failed => Err("record was not updated".into()),
    }
}

async fn handle_delete(
    config: &Config,
    cmd: &DeleteCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let prompter: Box<dyn Prompter> = if cmd.yes {
        Box::new(AutoConfirm)
    } else {
        Box::new(TerminalPrompter)
    };
    let mut controller = controller(config, prompter)?;

    match controller.handle_delete(&RecordId::from(cmd.id.as_str())).await {
        DeleteOutcome::Declined => {
            println!("Aborted.");
            Ok(())
        }
        DeleteOutcome::Deleted => {
            println!("Deleted attendance record {}", cmd.id);
            print_table(&controller);
            Ok(())
        }
        DeleteOutcome::Failed => Err("record was not deleted".into()),
    }
}

async fn handle_shell(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = controller(config, Box::new(TerminalPrompter))?;
    shell::run(&mut controller, shell::stdin_lines(), std::io::stdout()).await?;
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[API]");
                println!("  Base URL:           {}", config.api.base_url);
                println!("  Resource:           {}", config.api.resource);
                println!("  Collection URL:     {}", config.collection_url()?);
                println!();
                println!("[Form]");
                println!("  Fields:             {}", config.form.fields.join(", "));
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

use std::{env, process};

use otori_core::{
    cli::{
        commands::{self, CreateOptions},
        output::{self, OutputPreferences},
        ui::CrosstermTerminal,
        CommandError, CommandOutcome, CommandResult,
    },
    config::{Config, ConfigManager},
    init,
    storage::JsonProfileStore,
    utils::{build_info, paths},
};

fn main() {
    init();

    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(err) = run(&args) {
        report(&err);
        process::exit(1);
    }
}

struct Context {
    config: Config,
    store: JsonProfileStore,
}

impl Context {
    fn load() -> CommandResult<Self> {
        let config = ConfigManager::new().load()?;
        output::set_preferences(OutputPreferences {
            color: config.color,
            ..OutputPreferences::default()
        });
        let store = JsonProfileStore::new(paths::profiles_root(&config));
        Ok(Self { config, store })
    }
}

fn run(args: &[String]) -> CommandResult<()> {
    let Some((command, rest)) = args.split_first() else {
        print_usage();
        return Err(CommandError::InvalidArguments("missing command".into()));
    };

    match command.as_str() {
        "init" => cmd_init(rest),
        "edit" => cmd_edit(rest),
        "list" => cmd_list(),
        "show" => cmd_show(rest),
        "delete" => cmd_delete(rest),
        "config" => cmd_config(rest),
        "profiles" => match rest.split_first() {
            Some((sub, _)) if sub == "list" => cmd_list(),
            Some((sub, tail)) if sub == "show" => cmd_show(tail),
            Some((sub, tail)) if sub == "delete" => cmd_delete(tail),
            _ => {
                print_usage();
                Err(CommandError::InvalidArguments(
                    "expected `profiles list|show|delete`".into(),
                ))
            }
        },
        "version" | "--version" | "-V" => {
            println!("{}", build_info::current().summary());
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            print_usage();
            Err(CommandError::InvalidArguments(format!(
                "unknown command `{other}`"
            )))
        }
    }
}

fn cmd_init(args: &[String]) -> CommandResult<()> {
    let options = parse_create_options(args)?;
    let ctx = Context::load()?;
    let outcome = if options.is_empty() {
        let mut terminal = CrosstermTerminal::new()?;
        commands::create_profile(&ctx.store, &mut terminal, &ctx.config.default_profile_name)?
    } else {
        commands::create_from_options(&ctx.store, options, &ctx.config.default_profile_name)?
    };
    match outcome {
        CommandOutcome::Saved { name, .. } => {
            output::success(format!("Profile '{name}' created successfully!"))
        }
        _ => output::info("Configuration cancelled."),
    }
    Ok(())
}

fn cmd_edit(args: &[String]) -> CommandResult<()> {
    let name = required_name(args, "edit")?;
    let ctx = Context::load()?;
    let mut terminal = CrosstermTerminal::new()?;
    let outcome = commands::edit_profile(&ctx.store, &mut terminal, name)?;
    drop(terminal);
    match outcome {
        CommandOutcome::Saved { name, .. } => {
            output::success(format!("Profile '{name}' updated successfully"))
        }
        CommandOutcome::SavedWithLeftover { name, leftover, .. } => {
            output::success(format!("Profile '{name}' updated successfully"));
            output::warning(format!(
                "Old profile '{leftover}' could not be removed; delete it with: otori_cli delete {leftover}"
            ));
        }
        _ => output::info("Edit cancelled"),
    }
    Ok(())
}

fn cmd_list() -> CommandResult<()> {
    let ctx = Context::load()?;
    let listings = commands::list_profiles(&ctx.store)?;
    if listings.is_empty() {
        output::info("No profiles found. Create one with: otori_cli init");
        return Ok(());
    }
    output::section("Available profiles");
    print!("{}", commands::format_profile_table(&listings));
    Ok(())
}

fn cmd_show(args: &[String]) -> CommandResult<()> {
    let ctx = Context::load()?;
    let name = args
        .first()
        .map(String::as_str)
        .unwrap_or(&ctx.config.default_profile_name);
    print!("{}", commands::show_profile(&ctx.store, name)?);
    Ok(())
}

fn cmd_delete(args: &[String]) -> CommandResult<()> {
    let skip_prompt = args.iter().any(|arg| arg == "--yes" || arg == "-y");
    let positional: Vec<String> = args
        .iter()
        .filter(|arg| !arg.starts_with('-'))
        .cloned()
        .collect();
    let name = required_name(&positional, "delete")?;
    let ctx = Context::load()?;
    let outcome = commands::delete_profile(&ctx.store, name, |name| {
        if skip_prompt {
            Ok(true)
        } else {
            commands::confirm_deletion(name)
        }
    })?;
    match outcome {
        CommandOutcome::Deleted { name } => {
            output::success(format!("Profile '{name}' deleted successfully"))
        }
        _ => output::info("Deletion cancelled"),
    }
    Ok(())
}

fn cmd_config(args: &[String]) -> CommandResult<()> {
    let manager = ConfigManager::new();
    let mut config = manager.load()?;
    match args.split_first() {
        None => print!("{}", commands::format_config(&config)),
        Some((sub, _)) if sub == "show" => print!("{}", commands::format_config(&config)),
        Some((sub, tail)) if sub == "set" => {
            let Some((key, value)) = tail.split_first() else {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    commands::CONFIG_KEYS.join("|")
                )));
            };
            commands::set_config_value(&mut config, key, &value.join(" "))?;
            manager.save(&config)?;
            output::success(format!("Config '{key}' updated"));
        }
        Some((other, _)) => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown config command `{other}` (expected show or set)"
            )))
        }
    }
    Ok(())
}

fn required_name<'a>(args: &'a [String], command: &str) -> CommandResult<&'a str> {
    args.first().map(String::as_str).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "please specify the profile name to {command}"
        ))
    })
}

/// Accepts `--flag value`, `--flag=value` and the short forms.
fn parse_create_options(args: &[String]) -> CommandResult<CreateOptions> {
    let mut options = CreateOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with('-') => (flag, Some(value.to_string())),
            _ => (arg.as_str(), None),
        };
        let mut value = || {
            inline
                .clone()
                .or_else(|| iter.next().cloned())
                .ok_or_else(|| CommandError::InvalidArguments(format!("{flag} needs a value")))
        };
        match flag {
            "--type" | "-t" => options.profile_type = Some(value()?),
            "--server-name" | "-s" => options.server_name = Some(value()?),
            "--profile-name" | "-p" => options.profile_name = Some(value()?),
            "--company" | "-c" => options.company = Some(value()?),
            "--users" | "-u" => options.users.extend(commands::parse_user_list(&value()?)),
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown option `{other}` for init"
                )))
            }
        }
    }
    Ok(options)
}

fn report(err: &CommandError) {
    if let Some(errors) = err.validation_errors() {
        output::error("Validation errors:");
        for error in errors {
            eprintln!("  - {}: {}", error.field, error.message);
        }
        return;
    }
    output::error(format!("Error: {err}"));
}

fn print_usage() {
    eprintln!(
        "Usage: otori_cli <command>\n\
         Commands:\n  \
         init [--type classic|ia --server-name NAME [--profile-name NAME]\n       \
         [--company NAME] [--users a,b,c]]\n  \
         edit <profile>\n  \
         list\n  \
         show [profile]\n  \
         delete <profile> [--yes]\n  \
         config [show|set <key> <value>]\n  \
         version"
    );
}

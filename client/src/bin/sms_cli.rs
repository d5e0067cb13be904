use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use client::{AdminApp, ClientConfig, GuardDecision, PendingRequest};
use common::NavEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Login { username: String, password: String },
    Logout,
    Whoami,
    Nav,
    Open { location: String },
    Get { path: String, params: Vec<(String, String)> },
}

#[derive(Debug, Clone)]
struct CliArgs {
    api_url: Option<String>,
    session_path: Option<PathBuf>,
    timeout_ms: Option<u64>,
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if dotenvy::dotenv().is_err() {
        dotenvy::from_filename("client/.env").ok();
    }
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args = parse_args()?;
    let mut config = ClientConfig::from_env().context("invalid environment configuration")?;
    if let Some(url) = args.api_url {
        config.api_url = url;
    }
    if let Some(path) = args.session_path {
        config.session_path = path;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    config.validate().context("invalid configuration")?;

    let app = AdminApp::bootstrap(config).context("failed to start client")?;
    run(&app, args.command).await
}

async fn run(app: &AdminApp, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { username, password } => {
            let user = app
                .login(&username, &password)
                .await
                .with_context(|| format!("login failed for {}", username))?;
            println!(
                "Signed in as {} ({}), now at {}",
                user.display_name(),
                user.role.label(),
                app.router().current()
            );
        }
        Command::Logout => {
            app.logout().await.context("failed to clear stored session")?;
            println!("Signed out");
        }
        Command::Whoami => match app.session().user() {
            Some(user) => println!(
                "{} <{}> role={} id={}",
                user.display_name(),
                user.username,
                user.role,
                user.id
            ),
            None => println!("Not signed in"),
        },
        Command::Nav => {
            let entries = app.navigation();
            if entries.is_empty() {
                println!("Not signed in");
            }
            for entry in &entries {
                print_entry(entry, 0);
            }
        }
        Command::Open { location } => match app.navigate(&location) {
            GuardDecision::Render(route) => println!("render {} ({})", route, route.title()),
            GuardDecision::Redirect(route) => println!("redirect {}", route),
        },
        Command::Get { path, params } => {
            let mut request = PendingRequest::get(path.clone());
            for (key, value) in params {
                request = request.param(key, value);
            }

            let envelope = app
                .api()
                .send(request)
                .await
                .with_context(|| format!("GET {} failed", path))?;
            let pretty = serde_json::to_string_pretty(&envelope)
                .context("failed to format response")?;
            println!("{}", pretty);
        }
    }

    Ok(())
}

fn print_entry(entry: &NavEntry, depth: usize) {
    let indent = "  ".repeat(depth);
    match &entry.href {
        Some(route) => println!("{}{} -> {}", indent, entry.name, route),
        None => println!("{}{}", indent, entry.name),
    }
    for child in &entry.children {
        print_entry(child, depth + 1);
    }
}

fn parse_args() -> anyhow::Result<CliArgs> {
    parse_arg_list(std::env::args().skip(1))
}

fn parse_arg_list<I>(raw: I) -> anyhow::Result<CliArgs>
where
    I: IntoIterator<Item = String>,
{
    let mut api_url = None;
    let mut session_path = None;
    let mut timeout_ms = None;
    let mut username = None;
    let mut password = None;
    let mut params = Vec::new();
    let mut positional = Vec::new();

    let mut args = raw.into_iter().peekable();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--api-url" => api_url = Some(next_arg_value(&mut args, &arg)?),
            "--session-path" => session_path = Some(PathBuf::from(next_arg_value(&mut args, &arg)?)),
            "--timeout-ms" => {
                let value = next_arg_value(&mut args, &arg)?;
                timeout_ms = Some(
                    value
                        .parse::<u64>()
                        .with_context(|| format!("invalid --timeout-ms: {}", value))?,
                );
            }
            "--username" | "-u" => username = Some(next_arg_value(&mut args, &arg)?),
            "--password" | "-p" => password = Some(next_arg_value(&mut args, &arg)?),
            "--param" => {
                let value = next_arg_value(&mut args, &arg)?;
                let (key, val) = value
                    .split_once('=')
                    .ok_or_else(|| anyhow!("--param expects key=value, got {}", value))?;
                params.push((key.to_string(), val.to_string()));
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other if other.starts_with('-') => {
                bail!("unknown argument: {}\nUse --help to list options.", other);
            }
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let command = match positional.next().as_deref() {
        Some("login") => Command::Login {
            username: username.ok_or_else(|| anyhow!("login requires --username"))?,
            password: password.ok_or_else(|| anyhow!("login requires --password"))?,
        },
        Some("logout") => Command::Logout,
        Some("whoami") => Command::Whoami,
        Some("nav") => Command::Nav,
        Some("open") => Command::Open {
            location: positional.next().unwrap_or_else(|| "/".to_string()),
        },
        Some("get") => Command::Get {
            path: positional
                .next()
                .ok_or_else(|| anyhow!("get requires a path, e.g. /students"))?,
            params,
        },
        Some(other) => bail!("unknown command: {}\nUse --help to list commands.", other),
        None => bail!("missing command\nUse --help to list commands."),
    };

    if let Some(extra) = positional.next() {
        bail!("unexpected argument: {}", extra);
    }

    Ok(CliArgs {
        api_url,
        session_path,
        timeout_ms,
        command,
    })
}

fn next_arg_value<I>(args: &mut I, flag: &str) -> anyhow::Result<String>
where
    I: Iterator<Item = String>,
{
    args.next()
        .ok_or_else(|| anyhow!("missing value for {}", flag))
}

fn print_help() {
    println!(
        "sms-cli: drive the school administration client from a terminal

USAGE:
    sms-cli [OPTIONS] <COMMAND>

COMMANDS:
    login --username <U> --password <P>   sign in and store the session
    logout                                sign out and remove the stored session
    whoami                                show the signed-in user
    nav                                   show the sidebar for the signed-in role
    open <location>                       run the route guard on a location
    get <path> [--param k=v]...           authorized GET against the API

OPTIONS:
    --api-url <URL>         backend base address (env SMS_API_URL)
    --session-path <PATH>   session file (env SMS_SESSION_PATH)
    --timeout-ms <MS>       request timeout (env SMS_TIMEOUT_MS)
    -h, --help              print this help"
    );
}

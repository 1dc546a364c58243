use std::process::ExitCode;

use storyrush::{AuthContext, ColorMap, FileStorage, GuestId, Poller, color_from_id, config};

type Session = AuthContext<FileStorage>;

const USAGE: &str = "usage: storyrush <command>

commands:
  color <id>...     print the display colour of each id
  login <token>     store a bearer token and act as its subject
  guest [id]        act as a guest (resumes the stored guest, or generates
                    a fresh id, when omitted)
  logout            drop the stored token
  whoami            show the current identity
  watch             print the identity every poll interval until interrupted";

fn open_session() -> Result<Session, Box<dyn std::error::Error>> {
    let storage = FileStorage::open(config::session_path())?;
    Ok(AuthContext::restore(storage)?)
}

fn print_identity(session: &Session) {
    println!("identity: {}", session.state());
    println!("access:   {}", if session.has_access() { "granted" } else { "denied" });
    if let Some(id) = session.active_id() {
        println!("color:    {}", color_from_id(id));
    }
    if session.authorization_header().is_some() {
        println!("requests: signed with bearer token");
    }
}

fn report_session() {
    match open_session() {
        Ok(session) => println!("{}", session.state()),
        Err(e) => tracing::error!("Failed to read session: {}", e),
    }
}

async fn watch() -> Result<(), Box<dyn std::error::Error>> {
    config::init()?;
    let client = config::load_client_config()?;
    println!("Watching session (API {})", client.api_url);

    let poller = Poller::spawn(client.poll_interval(), || async { report_session() });

    tokio::signal::ctrl_c().await?;
    poller.stop().await;
    Ok(())
}

async fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let command = args.first().map(String::as_str);

    match command {
        Some("color") => {
            let mut colors = ColorMap::new();
            for id in &args[1..] {
                if colors.get(id).is_none() {
                    println!("{} {}", colors.color_for(id), id);
                }
            }
        }

        Some("login") => {
            let Some(token) = args.get(1) else {
                return Err("login requires a token".into());
            };
            let mut session = open_session()?;
            let claims = session.login(token)?;
            println!("Logged in as {}", claims.sub);
        }

        Some("guest") => {
            let mut session = open_session()?;
            match args.get(1).filter(|id| !id.trim().is_empty()) {
                Some(id) => session.enter_as_guest(id)?,
                None => {
                    if !session.resume_guest()? {
                        session.enter_as_guest(GuestId::generate().as_str())?;
                    }
                }
            }
            println!("Acting as {}", session.state());
        }

        Some("logout") => {
            let mut session = open_session()?;
            session.logout()?;
            println!("Logged out");
        }

        Some("whoami") => print_identity(&open_session()?),

        Some("watch") => watch().await?,

        _ => {
            eprintln!("{}", USAGE);
            return Err("unknown command".into());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

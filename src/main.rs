use mailgate::{EmailPayload, validate_email_address};
use std::env;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "\
Usage:
  mailgate <address>...
  mailgate --payload <sender_name> <sender_addr> <receiver_name> <receiver_addr> <template> [key=value]...";

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailgate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        None | Some("-h" | "--help") => usage(),
        Some("--payload") => check_payload(&args[1..]),
        Some(_) => check_addresses(&args),
    }
}

fn usage() -> ExitCode {
    eprintln!("{USAGE}");
    ExitCode::from(2)
}

fn check_addresses(addresses: &[String]) -> ExitCode {
    let mut invalid = 0;
    for addr in addresses {
        match validate_email_address(addr) {
            Ok(()) => println!("valid: {addr}"),
            Err(e) => {
                invalid += 1;
                println!("invalid: {addr}: {e}");
            }
        }
    }

    info!(checked = addresses.len(), invalid, "address check finished");
    if invalid == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn check_payload(args: &[String]) -> ExitCode {
    let [sender_name, sender_addr, receiver_name, receiver_addr, template, pairs @ ..] = args
    else {
        return usage();
    };

    let mut payload = EmailPayload::new(
        sender_name.as_str(),
        sender_addr.as_str(),
        receiver_name.as_str(),
        receiver_addr.as_str(),
        template.as_str(),
    );
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            eprintln!("Replacement must be key=value: {pair}");
            return usage();
        };
        payload = payload.with_replacement(key, value);
    }

    match payload.validate() {
        Ok(()) => {
            println!("valid payload");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("invalid payload ({}): {e}", e.field());
            ExitCode::FAILURE
        }
    }
}

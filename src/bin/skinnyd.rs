#[macro_use]
extern crate slog;

use std::path::Path;
use std::process;

use clap::{App, Arg};

use quorum::conf::InstanceConf;
use skinny::setup::init_logger;
use skinny::Server;
use skinny::ServerError;

#[tokio::main]
async fn main() {
    let matches = App::new("skinnyd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("a member of a skinny lock quorum")
        .arg(
            Arg::with_name("config")
                .long("config")
                .takes_value(true)
                .default_value("/etc/skinny/config.yml")
                .help("instance config in yaml"),
        )
        .arg(
            Arg::with_name("log")
                .long("log")
                .takes_value(true)
                .help("log file, stderr if absent"),
        )
        .get_matches();

    let logger = match init_logger(matches.value_of("log").map(Path::new)) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("init logger: {}", e);
            process::exit(1);
        }
    };

    // the config has a default value
    let conffn = matches.value_of("config").unwrap_or_default();

    if let Err(e) = run(conffn, &logger).await {
        error!(logger, "exit"; "err" => %e);
        eprintln!("{}", e);
        drop(logger);
        process::exit(1);
    }
}

async fn run(conffn: &str, logger: &slog::Logger) -> Result<(), ServerError> {
    let conf = InstanceConf::from_file(conffn)?;
    info!(logger, "config loaded"; "path" => conffn, "name" => &conf.name);

    let mut server = Server::new(&conf, logger).await?;
    server.start();

    tokio::select! {
        rst = server.join() => return rst,
        _ = tokio::signal::ctrl_c() => {
            info!(logger, "interrupted");
        }
    }

    server.stop()?;
    server.join().await
}

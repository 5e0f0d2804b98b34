use std::io::{self, Write};
use std::process;
use std::time::Duration;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

use quorum::conf::QuorumConf;
use skinny::ctl::Board;
use skinny::Ctl;
use skinny::CtlError;

const WATCH_INTERVAL: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() {
    let instance_arg = || {
        Arg::with_name("instance")
            .long("instance")
            .takes_value(true)
            .help("name of the instance to connect to, the first one by default")
    };

    let matches = App::new("skinnyctl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("control tool of a skinny lock quorum")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .long("config")
                .takes_value(true)
                .default_value("quorum.yml")
                .help("quorum config in yaml"),
        )
        .subcommand(
            SubCommand::with_name("status")
                .about("fetch status of every instance of the quorum")
                .arg(
                    Arg::with_name("watch")
                        .long("watch")
                        .help("keep polling until interrupted"),
                ),
        )
        .subcommand(
            SubCommand::with_name("acquire")
                .about("acquire the lock on behalf of holder")
                .arg(Arg::with_name("holder").required(true).index(1))
                .arg(instance_arg()),
        )
        .subcommand(
            SubCommand::with_name("release")
                .about("release the lock")
                .arg(instance_arg()),
        )
        .get_matches();

    if let Err(e) = run(&matches).await {
        eprintln!("{}", e);
        process::exit(1);
    }
}

async fn run(matches: &ArgMatches<'_>) -> Result<(), CtlError> {
    let conffn = matches.value_of("config").unwrap_or_default();
    let ctl = Ctl::new(QuorumConf::from_file(conffn)?);

    match matches.subcommand() {
        ("status", Some(m)) => status(&ctl, m.is_present("watch")).await,
        ("acquire", Some(m)) => {
            let holder = m.value_of("holder").unwrap_or_default();
            let instance = connecting(&ctl, m.value_of("instance"))?;

            println!("acquiring lock");
            let resp = ctl.acquire(Some(instance.as_str()), holder).await?;
            println!("{}", if resp.acquired { "success" } else { "failed" });
            Ok(())
        }
        ("release", Some(m)) => {
            let instance = connecting(&ctl, m.value_of("instance"))?;

            println!("releasing lock");
            let resp = ctl.release(Some(instance.as_str())).await?;
            println!("{}", if resp.released { "success" } else { "failed" });
            Ok(())
        }
        _ => Ok(()),
    }
}

/// connecting resolves the instance to talk to and tells the user about it.
fn connecting(ctl: &Ctl, name: Option<&str>) -> Result<String, CtlError> {
    let m = ctl.member(name)?;
    println!("connecting to {} ({})", m.name, m.address);
    Ok(m.name.clone())
}

async fn status(ctl: &Ctl, watch: bool) -> Result<(), CtlError> {
    let mut board = Board::new(ctl.conf());

    if !watch {
        ctl.poll(&mut board).await;
        print!("{}", board.render(chrono::Local::now()));
        return Ok(());
    }

    loop {
        ctl.poll(&mut board).await;

        let mut out = io::stdout();
        // clear the screen and move the cursor home
        write!(out, "\x1b[2J\x1b[0;0H{}", board.render(chrono::Local::now()))?;
        out.flush()?;

        tokio::select! {
            _ = tokio::time::sleep(WATCH_INTERVAL) => {}
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}

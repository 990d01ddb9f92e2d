#[macro_use]
extern crate log;

use paxos_acceptor::{service, Acceptor, Configuration};
use std::{env::args, process::exit};

/// Runs a single acceptor:
///
/// * `paxos-acceptor 4001`
/// * `paxos-acceptor 4001 127.0.0.1`
#[tokio::main]
async fn main() {
    env_logger::init();

    let config = match Configuration::from_args(args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            exit(1);
        }
    };

    let acceptor = Acceptor::new(&config);
    if let Err(e) = service::serve(&config, acceptor).await {
        error!("{}", e);
        exit(1);
    }
}

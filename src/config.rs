use crate::Error;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Configuration holds the address the acceptor serves requests on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    port: u16,
    host: IpAddr,
}

impl Configuration {
    /// Creates a configuration listening on all interfaces
    pub fn new(port: u16) -> Configuration {
        Configuration { port, host: Ipv4Addr::UNSPECIFIED.into() }
    }

    /// Overrides the interface to bind
    pub fn with_host(mut self, host: IpAddr) -> Configuration {
        self.host = host;
        self
    }

    /// Parses `<port> [host]` from command line arguments, with the
    /// program name already skipped.
    pub fn from_args<I>(mut args: I) -> Result<Configuration, Error>
    where
        I: Iterator<Item = String>,
    {
        let port = args.next().ok_or(Error::MissingPort)?;
        let port = port.parse::<u16>().map_err(|_| Error::InvalidPort(port))?;

        let config = Configuration::new(port);
        match args.next() {
            Some(host) => {
                let ip = host.parse::<IpAddr>().map_err(|_| Error::InvalidHost(host))?;
                Ok(config.with_host(ip))
            }
            None => Ok(config),
        }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Socket address to bind
    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

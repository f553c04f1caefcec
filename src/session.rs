use crate::config::Config;
use anyhow::Result;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// State of one control connection, from accept to close.
///
/// Built fresh for every accepted connection and dropped when it ends; nothing
/// carries over to the next client.
#[derive(Debug, Clone)]
pub struct Session {
    pub peer: SocketAddr,
    pub root_dir: PathBuf,          // Directory served to this client
    pub data_bind_address: IpAddr,  // Where the data listener binds
    pub download_buffer_size: usize,
}

impl Session {
    pub fn new(peer: SocketAddr, config: &Config) -> Result<Self> {
        Ok(Self {
            peer,
            root_dir: config.server.root_dir.clone(),
            data_bind_address: config.bind_address()?,
            download_buffer_size: config.download_buffer_size(),
        })
    }

    /// Host part of the peer address, used in log lines.
    pub fn client_host(&self) -> IpAddr {
        self.peer.ip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_config() {
        let mut config = Config::default();
        config.server.root_dir = PathBuf::from("/srv/files");
        config.server.bind_address = String::from("127.0.0.1");

        let peer: SocketAddr = "10.0.0.7:51000".parse().unwrap();
        let session = Session::new(peer, &config).unwrap();

        assert_eq!(session.client_host().to_string(), "10.0.0.7");
        assert_eq!(session.root_dir, PathBuf::from("/srv/files"));
        assert_eq!(session.data_bind_address.to_string(), "127.0.0.1");
        assert_eq!(session.download_buffer_size, 128 * 1024);
    }
}

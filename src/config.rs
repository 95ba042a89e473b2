//! Configuration management for CIQUAL Explorer

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use clap::Parser;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "ciqual-explorer", version, about = "Product metadata and ingredient impact lookup")]
pub struct Args {
    /// Port to listen to.
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Directory holding the bundled datasets and index page.
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

/// Locations of the bundled resources
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub dir: PathBuf,
}

impl DataConfig {
    pub const PRODUCTS_FILE: &'static str = "products.json";
    pub const AGRIBALYSE_FILE: &'static str = "Agribalyse.json";
    pub const INGREDIENTS_FILE: &'static str = "ingredients.json";
    pub const INDEX_FILE: &'static str = "index.html";

    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn products_path(&self) -> PathBuf {
        self.dir.join(Self::PRODUCTS_FILE)
    }

    pub fn agribalyse_path(&self) -> PathBuf {
        self.dir.join(Self::AGRIBALYSE_FILE)
    }

    pub fn ingredients_path(&self) -> PathBuf {
        self.dir.join(Self::INGREDIENTS_FILE)
    }

    pub fn index_path(&self) -> PathBuf {
        self.dir.join(Self::INDEX_FILE)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: IpAddr::from([0, 0, 0, 0]),
                port: 8080,
            },
            data: DataConfig::new("data"),
        }
    }
}

impl Config {
    pub fn from_args(args: Args) -> Self {
        Config {
            server: ServerConfig {
                host: args.host,
                port: args.port,
            },
            data: DataConfig { dir: args.data_dir },
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.host, self.server.port)
    }
}

//! Command-line flags and serving options for function binaries.
//!
//! This module only gathers configuration. Binding the listener and
//! terminating TLS belong to whichever transport consumes [`ServeOptions`].

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_NETWORK: &str = "tcp";
pub const DEFAULT_ADDRESS: &str = ":9443";
pub const DEFAULT_METRICS_ADDRESS: &str = ":8080";
pub const DEFAULT_MAX_RECV_MESSAGE_SIZE: usize = 4 * MIB;

const MIB: usize = 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("{}: no PEM certificate found", .path.display())]
    InvalidCertificate { path: PathBuf },
    #[error("no transport credentials configured; supply TLS certificates or run insecure")]
    NoCredentials,
}

/// Flags shared by every function binary. Flatten into a binary's own
/// `clap::Parser` with `#[command(flatten)]`.
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct FunctionArgs {
    /// Emit debug logs.
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Network on which to listen for gRPC connections.
    #[arg(long = "network", default_value = DEFAULT_NETWORK)]
    pub network: String,

    /// Address at which to listen for gRPC connections.
    #[arg(long = "address", default_value = DEFAULT_ADDRESS)]
    pub address: String,

    /// Directory holding tls.crt and tls.key, plus the ca.crt used to verify
    /// client certificates.
    #[arg(long = "tls-certs-dir", env = "TLS_SERVER_CERTS_DIR")]
    pub tls_certs_dir: Option<PathBuf>,

    /// Run without mTLS credentials.
    #[arg(long = "insecure")]
    pub insecure: bool,

    /// Maximum size of received messages in MiB.
    #[arg(long = "max-recv-message-size", default_value_t = 4)]
    pub max_recv_message_size: usize,
}

impl FunctionArgs {
    /// Turn the flags into validated serving options, loading certificates
    /// when a directory was given.
    pub fn serve_options(&self) -> Result<ServeOptions, ConfigError> {
        let mut opts = ServeOptions::new()
            .listen(&self.network, &self.address)
            .insecure(self.insecure)
            .max_recv_message_size(self.max_recv_message_size.saturating_mul(MIB));
        if let Some(dir) = &self.tls_certs_dir {
            opts = opts.mtls_certificates(dir)?;
        }
        opts.validate()?;
        Ok(opts)
    }
}

/// PEM material for mutual TLS.
#[derive(Clone, PartialEq, Eq)]
pub struct TlsMaterial {
    pub cert: Vec<u8>,
    pub key: Vec<u8>,
    pub ca: Vec<u8>,
}

impl fmt::Debug for TlsMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsMaterial")
            .field("cert", &format_args!("{} bytes", self.cert.len()))
            .field("key", &"<redacted>")
            .field("ca", &format_args!("{} bytes", self.ca.len()))
            .finish()
    }
}

/// How a function server should listen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeOptions {
    pub network: String,
    pub address: String,
    pub credentials: Option<TlsMaterial>,
    pub insecure: bool,
    pub max_recv_message_size: usize,
    pub metrics_address: String,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            network: DEFAULT_NETWORK.to_string(),
            address: DEFAULT_ADDRESS.to_string(),
            credentials: None,
            insecure: false,
            max_recv_message_size: DEFAULT_MAX_RECV_MESSAGE_SIZE,
            metrics_address: DEFAULT_METRICS_ADDRESS.to_string(),
        }
    }
}

impl ServeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen(mut self, network: &str, address: &str) -> Self {
        self.network = network.to_string();
        self.address = address.to_string();
        self
    }

    /// Load `tls.crt`, `tls.key` and `ca.crt` from `dir`.
    pub fn mtls_certificates(mut self, dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let cert = read(&dir.join("tls.crt"))?;
        let key = read(&dir.join("tls.key"))?;
        let ca_path = dir.join("ca.crt");
        let ca = read(&ca_path)?;
        if !holds_certificate(&ca) {
            return Err(ConfigError::InvalidCertificate { path: ca_path });
        }
        self.credentials = Some(TlsMaterial { cert, key, ca });
        Ok(self)
    }

    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Maximum size of a received message, in bytes.
    pub fn max_recv_message_size(mut self, bytes: usize) -> Self {
        self.max_recv_message_size = bytes;
        self
    }

    pub fn metrics_address(mut self, address: &str) -> Self {
        self.metrics_address = address.to_string();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.credentials.is_none() && !self.insecure {
            return Err(ConfigError::NoCredentials);
        }
        Ok(())
    }
}

fn read(path: &Path) -> Result<Vec<u8>, ConfigError> {
    fs::read(path).map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })
}

fn holds_certificate(pem: &[u8]) -> bool {
    const MARKER: &[u8] = b"-----BEGIN CERTIFICATE-----";
    pem.windows(MARKER.len()).any(|w| w == MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Cli {
        #[command(flatten)]
        function: FunctionArgs,
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("xfn-sdk-config-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    const PEM: &str = "-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----\n";

    #[test]
    fn flags_have_serving_defaults() {
        let cli = Cli::try_parse_from(["fn", "--insecure"]).unwrap();
        let f = &cli.function;
        assert!(!f.debug);
        assert_eq!(f.network, "tcp");
        assert_eq!(f.address, ":9443");
        assert_eq!(f.max_recv_message_size, 4);

        let opts = f.serve_options().unwrap();
        assert_eq!(opts.max_recv_message_size, 4 * 1024 * 1024);
        assert_eq!(opts.metrics_address, ":8080");
        assert!(opts.insecure);
    }

    #[test]
    fn flags_override_defaults() {
        let cli =
            Cli::try_parse_from(["fn", "-d", "--address", "127.0.0.1:9000", "--max-recv-message-size", "16", "--insecure"])
                .unwrap();
        assert!(cli.function.debug);
        let opts = cli.function.serve_options().unwrap();
        assert_eq!(opts.address, "127.0.0.1:9000");
        assert_eq!(opts.max_recv_message_size, 16 * 1024 * 1024);
    }

    #[test]
    fn serving_needs_credentials_or_insecure() {
        assert!(matches!(ServeOptions::new().validate(), Err(ConfigError::NoCredentials)));
        assert!(ServeOptions::new().insecure(true).validate().is_ok());
    }

    #[test]
    fn loads_mtls_material_from_a_directory() {
        let dir = scratch_dir("ok");
        fs::write(dir.join("tls.crt"), PEM).unwrap();
        fs::write(dir.join("tls.key"), "key").unwrap();
        fs::write(dir.join("ca.crt"), PEM).unwrap();

        let opts = ServeOptions::new().mtls_certificates(&dir).unwrap();
        opts.validate().unwrap();
        let creds = opts.credentials.as_ref().unwrap();
        assert_eq!(creds.key, b"key");
        assert!(format!("{creds:?}").contains("<redacted>"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn rejects_missing_files_and_bad_ca() {
        let dir = scratch_dir("bad");
        let err = ServeOptions::new().mtls_certificates(&dir).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }), "{err}");
        assert!(err.to_string().contains("tls.crt"), "{err}");

        fs::write(dir.join("tls.crt"), PEM).unwrap();
        fs::write(dir.join("tls.key"), "key").unwrap();
        fs::write(dir.join("ca.crt"), "not a certificate").unwrap();
        let err = ServeOptions::new().mtls_certificates(&dir).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCertificate { .. }), "{err}");
        let _ = fs::remove_dir_all(&dir);
    }
}

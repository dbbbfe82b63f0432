//! certvalet CLI application.
//!
//! Thin command-line surface over the library: bootstrap the CA, issue leaf
//! certificates, list what has been issued, and print trust instructions.

use certvalet::cert::issuer::CertificateIssuer;
use certvalet::config::{Config, Paths};
use certvalet::crypto::openssl_cli::OpensslCli;
use certvalet::error::{CertValetError, Result};
use certvalet::storage::fs::DiskFilesystem;
use certvalet::storage::Owner;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "certvalet")]
#[command(about = "Local trusted CA and per-domain TLS certificates for development sites", long_about = None)]
struct Cli {
    /// Installation home directory (default: ~/.certvalet)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the root CA if it does not exist yet
    Init,

    /// Issue (or re-issue) a certificate for a domain
    Issue {
        /// Domain to issue for, e.g. myapp.test
        domain: String,
    },

    /// List domains with an issued certificate
    List,

    /// Show how to trust the root CA certificate
    Trust,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("certvalet=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("certvalet=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let paths = Paths::new(resolve_home(cli.home)?);
    let owner = Owner::from_sudo_env();
    let fs = Arc::new(DiskFilesystem::new());
    let config = Config::load(fs.as_ref(), &paths)?;
    let issuer = CertificateIssuer::new(paths.clone(), &config, Arc::new(OpensslCli::new()), fs, owner)?;

    match cli.command {
        Commands::Init => {
            issuer.authority().ensure_root_exists()?;
            println!("Root CA ready: {}", paths.ca_cert().display());
            Ok(())
        }

        Commands::Issue { domain } => {
            let issued = issuer.issue_certificate(&domain)?;
            println!("Issued certificate for {}", issued.domain);
            println!("  Key:         {}", issued.key_path.display());
            println!("  Certificate: {}", issued.cert_path.display());
            Ok(())
        }

        Commands::List => list_domains(&paths),

        Commands::Trust => {
            print_trust_instructions(&paths);
            Ok(())
        }
    }
}

fn resolve_home(home: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(home) = home {
        return Ok(home);
    }
    dirs::home_dir()
        .map(|dir| dir.join(".certvalet"))
        .ok_or_else(|| {
            CertValetError::ConfigError(
                "cannot determine a home directory; pass --home".to_string(),
            )
        })
}

fn list_domains(paths: &Paths) -> Result<()> {
    let certs_dir = paths.certificates_dir();
    if !certs_dir.is_dir() {
        println!("No certificates issued yet.");
        return Ok(());
    }

    let mut domains = Vec::new();
    for entry in std::fs::read_dir(&certs_dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "crt") {
            if let Some(stem) = path.file_stem() {
                domains.push(stem.to_string_lossy().into_owned());
            }
        }
    }
    domains.sort();

    if domains.is_empty() {
        println!("No certificates issued yet.");
    } else {
        println!("Issued certificates:");
        for domain in domains {
            println!("  {}", domain);
        }
    }
    Ok(())
}

fn print_trust_instructions(paths: &Paths) {
    let ca_cert = paths.ca_cert();
    println!("Root CA certificate: {}", ca_cert.display());
    println!();
    println!("To trust it system-wide:");
    println!();
    println!("  macOS:");
    println!(
        "    sudo security add-trusted-cert -d -r trustRoot \\\n      -k /Library/Keychains/System.keychain {}",
        ca_cert.display()
    );
    println!();
    println!("  Debian/Ubuntu:");
    println!(
        "    sudo cp {} /usr/local/share/ca-certificates/certvalet.crt",
        ca_cert.display()
    );
    println!("    sudo update-ca-certificates");
    println!();
    println!("  Fedora/RHEL:");
    println!(
        "    sudo trust anchor --store {}",
        ca_cert.display()
    );
    println!();
    println!("Firefox keeps its own store: import the file under");
    println!("Settings > Privacy & Security > Certificates > Authorities.");
}

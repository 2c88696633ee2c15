use std::{fmt, sync::Arc};

use clap::{Parser, Subcommand};
use tracing::{event, Level};

use crate::auth::{authenticate_client, AccessTokenError, ClientCredentials};
use crate::core::models::{Client, DefaultClient};
use crate::core::types::{ClientId, ClientSecret, HashedClientSecret, RedirectUri};
use crate::util::hash::{self, HashedClient, HashingService};

#[derive(Parser)]
#[clap(
    name = "tomiko-client-util",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS")
)]
pub struct Options {
    #[clap(long, env = "HASH_SECRET", hide_env_values = true)]
    hash_secret: String,
    #[clap(subcommand)]
    command: SubCommand,
}

#[derive(Subcommand)]
enum SubCommand {
    /// Print the encoded hash of a client secret, for storage
    HashSecret(HashSecret),
    /// Authenticate a secret against a client record
    CheckSecret(CheckSecret),
}

#[derive(Parser)]
struct HashSecret {
    #[clap(short, long)]
    secret: String,
}

#[derive(Parser)]
struct CheckSecret {
    #[clap(short, long)]
    id: String,
    /// Secret presented by the client; omit for a public client
    #[clap(short, long)]
    secret: Option<String>,
    /// Encoded hash the client's secret is stored as
    #[clap(long, conflicts_with = "stored")]
    hash: Option<String>,
    /// Plain secret the client is stored with
    #[clap(long)]
    stored: Option<String>,
    #[clap(long)]
    public: bool,
}

#[derive(Debug)]
pub enum Error {
    Hash(hash::Error),
    Rejected(AccessTokenError),
    Serde(serde_json::Error),
}

impl From<hash::Error> for Error {
    fn from(e: hash::Error) -> Self {
        Self::Hash(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hash(e) => write!(f, "hashing failed: {}", e),
            Self::Rejected(_) => f.write_str("client authentication rejected"),
            Self::Serde(e) => write!(f, "serialization failed: {}", e),
        }
    }
}

impl std::error::Error for Error {}

fn get_hasher(secret: &str) -> HashingService {
    HashingService::with_secret_key(secret.to_string())
}

fn hash_secret(c: &HashSecret, opts: &Options) -> Result<(), Error> {
    let hasher = get_hasher(&opts.hash_secret);
    let hashed = hasher.hash(&ClientSecret(c.secret.to_string()))?;

    println!("{}", hashed.0);
    Ok(())
}

fn client_record(c: &CheckSecret, opts: &Options) -> Box<dyn Client> {
    let id = ClientId(c.id.to_string());
    let uri = RedirectUri::default();

    match (&c.hash, &c.stored) {
        (Some(hash), _) => {
            let hasher = Arc::new(get_hasher(&opts.hash_secret));
            let mut client =
                HashedClient::new(id, HashedClientSecret(hash.to_string()), uri, hasher);
            client.public = c.public;
            Box::new(client)
        }
        (None, stored) => {
            let secret = ClientSecret(stored.clone().unwrap_or_default());
            let mut client = DefaultClient::new(id, secret, uri);
            client.public = c.public;
            Box::new(client)
        }
    }
}

fn check_secret(c: &CheckSecret, opts: &Options) -> Result<(), Error> {
    let client = client_record(c, opts);
    let credentials = ClientCredentials::new(
        ClientId(c.id.to_string()),
        c.secret.as_deref().map(ClientSecret::from),
    );

    match authenticate_client(&client, &credentials) {
        Ok(()) => Ok(()),
        Err(e) => {
            println!("{}", serde_json::to_string(&e)?);
            Err(Error::Rejected(e))
        }
    }
}

pub fn run_cli_action(opts: Options) -> Result<(), Error> {
    let result = match &opts.command {
        SubCommand::HashSecret(c) => hash_secret(c, &opts),
        SubCommand::CheckSecret(c) => check_secret(c, &opts),
    };

    if let Err(e) = &result {
        event!(Level::ERROR, error = %e, "Command failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Options {
        let mut argv = vec!["tomiko-client-util", "--hash-secret", "server-key"];
        argv.extend_from_slice(args);
        Options::try_parse_from(argv).unwrap()
    }

    #[test]
    fn check_secret_against_plain_record() {
        let opts = parse(&["check-secret", "--id", "abc", "--secret", "s3cr3t", "--stored", "s3cr3t"]);

        assert!(run_cli_action(opts).is_ok());
    }

    #[test]
    fn check_secret_rejects_wrong_secret() {
        let opts = parse(&["check-secret", "-i", "abc", "-s", "wrong", "--stored", "s3cr3t"]);

        assert!(matches!(run_cli_action(opts), Err(Error::Rejected(_))));
    }

    #[test]
    fn check_secret_against_hashed_record() {
        let hashed = get_hasher("server-key")
            .hash(&ClientSecret::from("s3cr3t"))
            .unwrap();
        let opts = parse(&["check-secret", "--id", "abc", "--secret", "s3cr3t", "--hash", hashed.0.as_str()]);

        assert!(run_cli_action(opts).is_ok());
    }

    #[test]
    fn public_client_without_secret() {
        let opts = parse(&["check-secret", "--id", "spa", "--public"]);

        assert!(run_cli_action(opts).is_ok());
    }

    #[test]
    fn hash_and_stored_conflict() {
        let argv = vec![
            "tomiko-client-util",
            "--hash-secret",
            "k",
            "check-secret",
            "--id",
            "abc",
            "--hash",
            "h",
            "--stored",
            "s",
        ];

        assert!(Options::try_parse_from(argv).is_err());
    }
}

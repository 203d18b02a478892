//! `seal` subcommands.
//!
//! Each command reads its input from a reader and writes its result to a
//! writer; `main` wires these to stdin and stdout.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use clap::Subcommand;
use common::{armor, dearmor, CellError};
use seal_cell::{KeyMaterial, SecureCellSeal, DEFAULT_KEY_LEN};
use tracing::info;
use zeroize::Zeroizing;

use crate::config::Config;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate a random master key and print it base64-encoded
    Keygen {
        /// Key length in bytes
        #[arg(short, long, default_value_t = DEFAULT_KEY_LEN)]
        length: usize,
    },
    /// Seal stdin into a container on stdout
    Encrypt {
        /// Context the container is bound to
        #[arg(short, long)]
        context: Option<String>,
    },
    /// Open a container from stdin and write the message to stdout
    Decrypt {
        /// Context the container was sealed with
        #[arg(short, long)]
        context: Option<String>,
    },
}

/// Run `command` against `input` and `output`.
///
/// # Errors
///
/// Returns an error if the command fails. Secure Cell errors are kept
/// intact so [`exit_code`] can classify them.
pub fn run<R: Read, W: Write>(
    command: &Command,
    cfg: &Config,
    input: R,
    mut output: W,
) -> Result<()> {
    let outcome = match command {
        Command::Keygen { length } => keygen(*length, &mut output),
        Command::Encrypt { context } => {
            let cell = cfg.cell()?;
            encrypt(&cell, context.as_deref(), cfg.armor, input, &mut output)
        }
        Command::Decrypt { context } => {
            let cell = cfg.cell()?;
            decrypt(&cell, context.as_deref(), cfg.armor, input, &mut output)
        }
    };
    outcome?;
    output.flush().context("failed to flush output")
}

/// Process exit code for a failed command.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<CellError>()
        .map_or(1, CellError::exit_code)
}

fn keygen<W: Write>(length: usize, output: &mut W) -> Result<()> {
    let key = KeyMaterial::generate_with_len(length)?;
    let encoded = Zeroizing::new(armor(key.as_bytes()));
    writeln!(output, "{}", encoded.as_str()).context("failed to write key")?;
    info!(length, "generated master key");
    Ok(())
}

fn encrypt<R: Read, W: Write>(
    cell: &SecureCellSeal,
    context: Option<&str>,
    armored: bool,
    input: R,
    output: &mut W,
) -> Result<()> {
    let message = Zeroizing::new(read_all(input)?);
    let sealed = cell.encrypt(&message, context.map(str::as_bytes))?;

    if armored {
        writeln!(output, "{}", armor(&sealed))
    } else {
        output.write_all(&sealed)
    }
    .context("failed to write container")?;

    info!(
        message_len = message.len(),
        container_len = sealed.len(),
        armored,
        "encrypted input"
    );
    Ok(())
}

fn decrypt<R: Read, W: Write>(
    cell: &SecureCellSeal,
    context: Option<&str>,
    armored: bool,
    input: R,
    output: &mut W,
) -> Result<()> {
    let raw = read_all(input)?;
    let sealed = if armored {
        let text = std::str::from_utf8(&raw).context("armored container is not text")?;
        dearmor(text).context("armored container is not valid base64")?
    } else {
        raw
    };

    let message = Zeroizing::new(cell.decrypt(&sealed, context.map(str::as_bytes))?);
    output
        .write_all(&message)
        .context("failed to write message")?;

    info!(
        container_len = sealed.len(),
        message_len = message.len(),
        "decrypted input"
    );
    Ok(())
}

fn read_all<R: Read>(mut input: R) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    input
        .read_to_end(&mut buf)
        .context("failed to read input")?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_B64: &str = "a2V5IGJ5dGVz";

    fn cfg(armor: bool) -> Config {
        Config::from_parts(Some(KEY_B64), None, armor).unwrap()
    }

    fn unkeyed() -> Config {
        Config::from_parts(None, None, true).unwrap()
    }

    fn run_to_vec(command: Command, cfg: &Config, input: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        run(&command, cfg, input, &mut out)?;
        Ok(out)
    }

    fn encrypt_cmd(context: Option<&str>) -> Command {
        Command::Encrypt {
            context: context.map(String::from),
        }
    }

    fn decrypt_cmd(context: Option<&str>) -> Command {
        Command::Decrypt {
            context: context.map(String::from),
        }
    }

    #[test]
    fn armored_round_trip() {
        let cfg = cfg(true);
        let sealed = run_to_vec(encrypt_cmd(Some("ctx")), &cfg, b"stdin data").unwrap();
        assert!(sealed.ends_with(b"\n"));
        let opened = run_to_vec(decrypt_cmd(Some("ctx")), &cfg, &sealed).unwrap();
        assert_eq!(opened, b"stdin data");
    }

    #[test]
    fn raw_round_trip() {
        let cfg = cfg(false);
        let sealed = run_to_vec(encrypt_cmd(None), &cfg, b"raw bytes").unwrap();
        assert_eq!(sealed.len(), b"raw bytes".len() + seal_cell::OVERHEAD);
        let opened = run_to_vec(decrypt_cmd(None), &cfg, &sealed).unwrap();
        assert_eq!(opened, b"raw bytes");
    }

    #[test]
    fn armored_output_opens_with_library() {
        let sealed = run_to_vec(encrypt_cmd(Some("ctx")), &cfg(true), b"interop").unwrap();
        let text = std::str::from_utf8(&sealed).unwrap();
        let container = dearmor(text).unwrap();

        let cell = SecureCellSeal::with_key(b"key bytes").unwrap();
        assert_eq!(cell.decrypt(&container, Some(&b"ctx"[..])).unwrap(), b"interop");
    }

    #[test]
    fn wrong_context_exits_with_failure() {
        let cfg = cfg(true);
        let sealed = run_to_vec(encrypt_cmd(Some("a")), &cfg, b"data").unwrap();
        let err = run_to_vec(decrypt_cmd(Some("b")), &cfg, &sealed).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CellError>(),
            Some(&CellError::AuthenticationFailure)
        );
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn empty_input_is_a_usage_error() {
        let err = run_to_vec(encrypt_cmd(None), &cfg(true), b"").unwrap_err();
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn bad_armor_is_rejected() {
        let err = run_to_vec(decrypt_cmd(None), &cfg(true), b"%%% not base64").unwrap_err();
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn missing_secret_is_rejected() {
        assert!(run_to_vec(encrypt_cmd(None), &unkeyed(), b"data").is_err());
    }

    #[test]
    fn keygen_needs_no_secret() {
        let out = run_to_vec(Command::Keygen { length: 48 }, &unkeyed(), b"").unwrap();
        let text = std::str::from_utf8(&out).unwrap();
        assert_eq!(dearmor(text).unwrap().len(), 48);
    }

    #[test]
    fn keygen_rejects_zero_length() {
        let err = run_to_vec(Command::Keygen { length: 0 }, &cfg(true), b"").unwrap_err();
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn keygen_rejects_oversized_length() {
        for length in [seal_cell::MAX_GENERATED_KEY_LEN + 1, usize::MAX] {
            let err = run_to_vec(Command::Keygen { length }, &unkeyed(), b"").unwrap_err();
            assert!(matches!(
                err.downcast_ref::<CellError>(),
                Some(CellError::InvalidArgument(_))
            ));
            assert_eq!(exit_code(&err), 2);
        }
    }

    #[test]
    fn passphrase_round_trip() {
        let cfg = Config::from_parts(None, Some("correct horse"), true).unwrap();
        let sealed = run_to_vec(encrypt_cmd(None), &cfg, b"via passphrase").unwrap();
        let opened = run_to_vec(decrypt_cmd(None), &cfg, &sealed).unwrap();
        assert_eq!(opened, b"via passphrase");
    }
}

//! Terminal flow: two prompts, one merge, one write.
//!
//! Generic over the reader and writer so the whole flow runs against
//! in-memory buffers in tests.

use std::{
    io::{BufRead, Write},
    path::{Path, PathBuf},
};

use {
    clawsetup_config::{load_or_init, persist},
    secrecy::Secret,
    tracing::info,
};

use crate::{
    error::{Context, Error, Result},
    merge::{TokenStatus, merge_provider_selection},
    registry::{KnownProvider, providers, select},
    token::generate_token,
};

/// Result of a completed setup run.
#[derive(Debug, Clone)]
pub struct SetupOutcome {
    pub config_path: PathBuf,
    pub provider: &'static KnownProvider,
    pub token_status: TokenStatus,
}

/// Write `question`, then read one line and return it trimmed.
///
/// End of input reads as an empty line.
pub fn prompt_line<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    question: &str,
) -> Result<String> {
    write!(writer, "{question}")?;
    writer.flush()?;
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("failed to read from standard input")?;
    Ok(line.trim().to_string())
}

/// Run the provider setup against the config file at `config_path`.
///
/// Invalid input aborts before the config file is read; the file is only
/// written once the merged document has been fully built.
pub fn run_setup<R: BufRead, W: Write>(
    reader: &mut R,
    out: &mut W,
    config_path: &Path,
) -> Result<SetupOutcome> {
    writeln!(out, "=== OpenClaw Provider Setup ===\n")?;
    writeln!(out, "Available providers:")?;
    for (i, p) in providers().iter().enumerate() {
        writeln!(out, "  {}. {} ({})", i + 1, p.definition.display_name, p.key)?;
    }

    let choice = prompt_line(
        reader,
        out,
        &format!("\nSelect a provider (1-{}): ", providers().len()),
    )?;
    let provider = select(&choice)?;
    let def = &provider.definition;
    writeln!(out, "\nConfiguring: {}", def.display_name)?;

    let api_key = prompt_line(reader, out, &format!("\nAPI key for {}: ", def.display_name))?;
    if api_key.is_empty() {
        return Err(Error::EmptyApiKey);
    }
    let api_key = Secret::new(api_key);

    let config = load_or_init(config_path)?;
    let (config, token_status) =
        merge_provider_selection(config, provider, &api_key, generate_token)?;
    persist(config_path, &config)?;
    info!(
        path = %config_path.display(),
        provider = provider.key,
        ?token_status,
        "provider configured"
    );

    match token_status {
        TokenStatus::Generated => writeln!(out, "\nGateway token generated.")?,
        TokenStatus::Kept => writeln!(out, "\nGateway token already exists, keeping it.")?,
    }

    writeln!(out, "\n=== Setup complete ===")?;
    writeln!(out, "Config: {}", config_path.display())?;
    writeln!(out, "Provider: {}", def.display_name)?;
    writeln!(out, "Default model: {}", def.default_model)?;
    if let Some(var) = config.provider_api_key_var(provider.key) {
        writeln!(out, "API key: stored as env.{var}")?;
    }
    writeln!(out, "\nNext steps:")?;
    writeln!(out, "  openclaw gateway install   # set up systemd service")?;
    writeln!(out, "  openclaw gateway start     # start gateway")?;
    writeln!(out, "  openclaw gateway health    # check if everything works")?;
    writeln!(out, "  openclaw models list       # list models")?;
    out.flush()?;

    Ok(SetupOutcome {
        config_path: config_path.to_path_buf(),
        provider,
        token_status,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use {super::*, std::io::Cursor};

    #[test]
    fn prompt_line_writes_question_and_trims_answer() {
        let mut input = Cursor::new("  2  \nrest\n");
        let mut output = Vec::new();

        let answer = prompt_line(&mut input, &mut output, "Pick: ").unwrap();

        assert_eq!(answer, "2");
        assert_eq!(String::from_utf8(output).unwrap(), "Pick: ");
    }

    #[test]
    fn prompt_line_eof_is_empty() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert_eq!(prompt_line(&mut input, &mut output, "? ").unwrap(), "");
    }

    #[test]
    fn successive_prompts_consume_one_line_each() {
        let mut input = Cursor::new("1\nkey\n");
        let mut output = Vec::new();
        assert_eq!(prompt_line(&mut input, &mut output, "a").unwrap(), "1");
        assert_eq!(prompt_line(&mut input, &mut output, "b").unwrap(), "key");
        assert_eq!(String::from_utf8(output).unwrap(), "ab");
    }

    #[test]
    fn lists_providers_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let mut input = Cursor::new("9\n");
        let mut output = Vec::new();

        let _ = run_setup(&mut input, &mut output, &tmp.path().join("openclaw.json"));

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("=== OpenClaw Provider Setup ===\n"));
        let minimax = text.find("  1. Minimax M2.5 (minimax)").unwrap();
        let openai = text.find("  2. OpenAI GPT-4o (openai)").unwrap();
        let deepseek = text.find("  3. DeepSeek V3 (deepseek)").unwrap();
        assert!(minimax < openai && openai < deepseek);
        assert!(text.contains("Select a provider (1-3): "));
    }
}

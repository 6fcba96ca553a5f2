use std::{
    fs::OpenOptions,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    error::{Context, Error, Result},
    schema::GatewayConfig,
};

/// Directory under the user's home that holds the gateway config.
pub const OPENCLAW_DIR_NAME: &str = ".openclaw";

/// File name of the gateway config inside [`OPENCLAW_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "openclaw.json";

/// Resolve the config file path.
///
/// Precedence:
/// 1. `explicit` file path
/// 2. `openclaw_home/openclaw.json`
/// 3. `~/.openclaw/openclaw.json`
pub fn resolve_config_path(
    explicit: Option<&Path>,
    openclaw_home: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(home) = openclaw_home {
        return Ok(home.join(CONFIG_FILE_NAME));
    }
    let home = dirs_next::home_dir().context("could not determine the home directory")?;
    Ok(home.join(OPENCLAW_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load the config at `path`, or an empty document when the file is absent.
///
/// A file that exists but does not parse is an error; it is never silently
/// replaced. A path whose ancestor is not a directory counts as absent; the
/// failure surfaces when [`persist`] tries to create the directory.
pub fn load_or_init(path: &Path) -> Result<GatewayConfig> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if matches!(error.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            debug!(path = %path.display(), "no config file yet, starting empty");
            return Ok(GatewayConfig::default());
        },
        Err(error) => {
            return Err(error).with_context(|| format!("failed to read {}", path.display()));
        },
    };

    let config = serde_json::from_str(&raw).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Write `config` to `path` as pretty-printed JSON, replacing the file.
///
/// Parent directories are created as needed. The data goes to a temp file in
/// the same directory which is then renamed over `path`, so readers see
/// either the old file or the new one. The file holds API keys and is
/// restricted to the owner on Unix.
pub fn persist(path: &Path, config: &GatewayConfig) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let data = serde_json::to_string_pretty(config)?;

    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let temp_path = path.with_extension(format!("json.tmp.{nanos}"));
    if let Err(error) = write_private(&temp_path, data.as_bytes()) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(error).with_context(|| format!("failed to write {}", temp_path.display()));
    }

    if let Err(error) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(error).with_context(|| format!("failed to replace {}", path.display()));
    }

    debug!(path = %path.display(), bytes = data.len(), "saved config");
    Ok(())
}

/// Create `path` readable by the owner only and write `data` to it.
fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(data)?;
    file.sync_all()
}

use super::types::InstallStatus;
use super::utils::release_asset;
use crate::error::QuickTubeError;
use qt_core::Tool;
use std::{
    env, fs,
    io::{ErrorKind, Read, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::{info, warn};

const USER_AGENT: &str = "QuickTube";
const CHUNK: usize = 64 * 1024;

/// Downloads the latest release of `tool` into `bin_dir`.
pub fn install_tool<F>(tool: Tool, bin_dir: &Path, callback: F) -> Result<PathBuf, QuickTubeError>
where
    F: Fn(InstallStatus),
{
    let asset = release_asset(tool, env::consts::OS)?;
    fs::create_dir_all(bin_dir)?;
    callback(InstallStatus::Starting(tool));
    info!("Downloading {} from {}", tool, asset.url);

    let resp = ureq::get(&asset.url)
        .set("User-Agent", USER_AGENT)
        .call()
        .map_err(|e| QuickTubeError::Network {
            tool,
            message: e.to_string(),
        })?;

    let total = resp
        .header("Content-Length")
        .and_then(|v| v.trim().parse::<u64>().ok());

    let target = bin_dir.join(tool.file_name());
    install_from_reader(tool, resp.into_reader(), total, &target, &callback)
        .inspect_err(|e| warn!("Install of {} failed: {}", tool, e))
}

/// Streams `reader` into a temp file next to `target` and renames it into
/// place only once the whole body arrived. On any error the temp file is
/// dropped and `target` is left as it was.
pub fn install_from_reader<R, F>(
    tool: Tool,
    mut reader: R,
    total: Option<u64>,
    target: &Path,
    callback: &F,
) -> Result<PathBuf, QuickTubeError>
where
    R: Read,
    F: Fn(InstallStatus),
{
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;

    let mut buf = vec![0u8; CHUNK];
    let mut downloaded: u64 = 0;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(QuickTubeError::Network {
                    tool,
                    message: e.to_string(),
                })
            }
        };
        tmp.write_all(&buf[..n])?;
        downloaded += n as u64;
        callback(InstallStatus::Downloading {
            tool,
            downloaded,
            total,
        });
    }

    if downloaded == 0 || total.is_some_and(|t| t != downloaded) {
        return Err(QuickTubeError::Network {
            tool,
            message: format!(
                "transfer ended after {} of {} bytes",
                downloaded,
                total.map_or_else(|| "?".to_string(), |t| t.to_string())
            ),
        });
    }

    tmp.flush()?;
    tmp.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o755))?;
    }

    tmp.persist(target).map_err(|e| QuickTubeError::Io(e.error))?;
    info!("{} installed at {:?} ({} bytes)", tool, target, downloaded);
    callback(InstallStatus::Finished(tool, target.to_path_buf()));
    Ok(target.to_path_buf())
}

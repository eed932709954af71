//! FTP package upload
//!
//! Uploads a local application package to the site content root named in the
//! publish profile's FTP entry. The session is blocking; a walkthrough run
//! has nothing else to do while the package transfers.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use suppaftp::types::FileType;
use suppaftp::FtpStream;
use tracing::{debug, info};

use crate::error::TransportError;
use crate::publish_profile::PublishProfile;

/// Upload `package` to the content root behind `profile`.
pub fn upload(profile: &PublishProfile, package: &Path) -> Result<(), TransportError> {
    if !package.is_file() {
        return Err(TransportError::PackageNotFound {
            path: package.display().to_string(),
        });
    }

    debug!("   Using publish profile {}", profile.profile_name);

    let (host, dir) = profile.ftp_endpoint()?;
    let file_name = package
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| TransportError::PackageNotFound {
            path: package.display().to_string(),
        })?;

    info!("   Uploading {} to {}{}", file_name, host, dir);

    let failed = |message: String| TransportError::FtpFailed {
        host: host.clone(),
        message,
    };

    let stream =
        FtpStream::connect(format!("{}:21", host)).map_err(|e| failed(e.to_string()))?;

    // Close the control connection on every exit path.
    let mut ftp = scopeguard::guard(stream, |mut s| {
        let _ = s.quit();
    });

    ftp.login(&profile.user_name, &profile.user_pwd)
        .map_err(|e| failed(e.to_string()))?;
    ftp.transfer_type(FileType::Binary)
        .map_err(|e| failed(e.to_string()))?;
    ftp.cwd(&dir).map_err(|e| failed(e.to_string()))?;

    let file = File::open(package).map_err(|e| failed(e.to_string()))?;
    let mut reader = BufReader::new(file);
    let bytes = ftp
        .put_file(file_name, &mut reader)
        .map_err(|e| failed(e.to_string()))?;

    debug!("   Transferred {} bytes", bytes);
    Ok(())
}

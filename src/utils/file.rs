//! File reading utilities

use crate::error::{Result, ThermoError};
use std::fs;
use std::path::{Path, PathBuf};

/// Safely read a file to string with error handling
pub fn read_file_safe<P: AsRef<Path>>(path: P) -> Result<String> {
    fs::read_to_string(path).map_err(ThermoError::from)
}

/// Read first line of a file, trimmed
/// Optimized for single-line sysfs attributes like `thermal_zone0/temp`
/// Uses direct syscalls, sysfs attributes fit in a single read
pub fn read_first_line<P: AsRef<Path>>(path: P) -> Result<String> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let path_cstr = CString::new(path.as_ref().as_os_str().as_bytes())
        .map_err(|_| ThermoError::ParseFailure("Invalid path".to_string()))?;

    unsafe {
        let fd = libc::open(path_cstr.as_ptr(), libc::O_RDONLY | libc::O_CLOEXEC);
        if fd < 0 {
            return Err(ThermoError::from(std::io::Error::last_os_error()));
        }

        let mut buffer = [0u8; 256];
        let bytes_read = libc::read(fd, buffer.as_mut_ptr() as *mut libc::c_void, buffer.len());
        // Capture errno before close can clobber it
        let read_error = std::io::Error::last_os_error();
        libc::close(fd);

        if bytes_read < 0 {
            return Err(ThermoError::from(read_error));
        }

        if bytes_read == 0 {
            return Ok(String::new());
        }

        let content = std::str::from_utf8(&buffer[..bytes_read as usize])
            .map_err(|_| ThermoError::ParseFailure("Invalid UTF-8".to_string()))?;
        Ok(content.lines().next().unwrap_or("").trim().to_string())
    }
}

/// Check that a directory exists and the process may list it
pub fn dir_readable<P: AsRef<Path>>(path: P) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let path = path.as_ref();
    if !path.is_dir() {
        return false;
    }
    match CString::new(path.as_os_str().as_bytes()) {
        Ok(c_path) => unsafe { libc::access(c_path.as_ptr(), libc::R_OK | libc::X_OK) == 0 },
        Err(_) => false,
    }
}

/// List the entries of a directory, sorted by file name
pub fn sorted_entries<P: AsRef<Path>>(path: P) -> Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = fs::read_dir(path)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    entries.sort();
    Ok(entries)
}

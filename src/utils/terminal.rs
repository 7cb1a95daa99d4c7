//! Terminal state probes

/// Whether the file descriptor refers to a terminal
pub fn is_tty(fd: libc::c_int) -> bool {
    unsafe { libc::isatty(fd) == 1 }
}

/// Whether stdout is a terminal
pub fn stdout_is_tty() -> bool {
    is_tty(libc::STDOUT_FILENO)
}

/// Whether this process owns the foreground of its controlling terminal.
///
/// A job stopped with ^Z or sent to the background with `bg` is not visible;
/// when stdout is not a terminal there is nothing to be hidden from, so the
/// answer is always yes.
pub fn is_foreground() -> bool {
    let fd = libc::STDOUT_FILENO;
    if !is_tty(fd) {
        return true;
    }
    unsafe {
        let foreground = libc::tcgetpgrp(fd);
        foreground < 0 || foreground == libc::getpgrp()
    }
}

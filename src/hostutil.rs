// From https://man7.org/linux/man-pages/man2/gethostname.2.html
// POSIX.1 guarantees host names (not including the terminating null byte)
// are limited to HOST_NAME_MAX bytes; we size the buffer generously above
// that so truncation is not a practical concern.
const HOST_NAME_MAX: usize = 256;

/// Best-effort local hostname lookup, used only as a fallback SOA nameserver.
pub fn get_hostname() -> Option<String> {
    let mut buf = [0u8; HOST_NAME_MAX];
    // SAFETY: buf is a stack allocation of the declared size.
    if unsafe { libc::gethostname(buf.as_mut_ptr() as *mut _, HOST_NAME_MAX) } != 0 {
        return None;
    }
    String::from_utf8(buf.split(|c| *c == 0).next()?.to_vec()).ok()
}

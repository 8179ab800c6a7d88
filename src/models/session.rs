/// The logged-in user.
///
/// `remember = true` means the username lives in durable storage and
/// survives restarts; otherwise it is kept in session storage only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub remember: bool,
}

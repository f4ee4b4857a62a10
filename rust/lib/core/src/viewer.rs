/// The authenticated principal attached to a request.
///
/// Handlers receive `Option<Viewer>`: `None` means the request is
/// anonymous, `Some` carries the resolved account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: String,
    pub username: String,
}

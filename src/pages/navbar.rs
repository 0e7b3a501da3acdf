use crate::session::SessionSnapshot;

pub struct Navbar;

impl Navbar {
    pub fn render(session: &SessionSnapshot) -> String {
        match &session.user {
            Some(user) => format!(
                "Events | Purchase | Orders    Hi, {}  [Logout]",
                user.email
            ),
            None => "Events    [Login]".to_string(),
        }
    }
}

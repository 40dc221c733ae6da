/// Avatar used when signup does not supply one.
pub const DEFAULT_AVATAR_URL: &str = "/static/images/default-pic.png";

pub mod session {

    /// Session key holding the logged-in user's id.
    pub const CURRENT_USER_KEY: &str = "user_id";
}

pub mod limits {

    pub const MIN_PASSWORD_LEN: usize = 6;

    /// Concurrent catalog detail fetches per list render.
    pub const DETAIL_FETCH_CONCURRENCY: usize = 4;
}

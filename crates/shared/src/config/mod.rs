mod myconfig;

pub use self::myconfig::{Config, DEFAULT_API_URL, normalize_base_url};

use std::time::Duration;

const DEFAULT_LIKE_DELAY_MS: u64 = 5_000;
const DEFAULT_TOP_LIKED_LIMIT: usize = 6;

/// Tunables for the pet feed.
#[derive(Debug, Clone)]
pub struct FeedSettings {
    /// How long a like stays pending before it is confirmed.
    pub like_delay: Duration,
    /// Maximum number of entries in the top liked list.
    pub top_liked_limit: usize,
}

impl FeedSettings {
    /// Read settings from `PETMATCH_LIKE_DELAY_MS` and `PETMATCH_TOP_LIKED`,
    /// falling back to the defaults for anything missing or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            like_delay: env_u64("PETMATCH_LIKE_DELAY_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.like_delay),
            top_liked_limit: env_u64("PETMATCH_TOP_LIKED")
                .map(|n| n as usize)
                .unwrap_or(defaults.top_liked_limit),
        }
    }
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            like_delay: Duration::from_millis(DEFAULT_LIKE_DELAY_MS),
            top_liked_limit: DEFAULT_TOP_LIKED_LIMIT,
        }
    }
}

fn env_u64(key: &str) -> Option<u64> {
    let Ok(raw) = std::env::var(key) else {
        tracing::debug!("{} not set, keeping the default", key);
        return None;
    };
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("ignoring {}={:?}, expected an integer", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global, so tests that touch them take this lock.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[test]
    fn test_defaults_match_feed_constants() {
        let settings = FeedSettings::default();
        assert_eq!(settings.like_delay, Duration::from_millis(5_000));
        assert_eq!(settings.top_liked_limit, 6);
    }

    #[test]
    fn test_from_env_overrides_both_values() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("PETMATCH_LIKE_DELAY_MS", "250");
        std::env::set_var("PETMATCH_TOP_LIKED", "3");

        let settings = FeedSettings::from_env();

        std::env::remove_var("PETMATCH_LIKE_DELAY_MS");
        std::env::remove_var("PETMATCH_TOP_LIKED");

        assert_eq!(settings.like_delay, Duration::from_millis(250));
        assert_eq!(settings.top_liked_limit, 3);
    }

    #[test]
    fn test_from_env_keeps_defaults_on_garbage() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("PETMATCH_LIKE_DELAY_MS", "soon");

        let settings = FeedSettings::from_env();

        std::env::remove_var("PETMATCH_LIKE_DELAY_MS");

        assert_eq!(settings.like_delay, Duration::from_millis(5_000));
    }

    #[test]
    fn test_from_env_keeps_defaults_when_unset() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("PETMATCH_LIKE_DELAY_MS");
        std::env::remove_var("PETMATCH_TOP_LIKED");

        let settings = FeedSettings::from_env();

        assert_eq!(settings.like_delay, Duration::from_millis(5_000));
        assert_eq!(settings.top_liked_limit, 6);
    }
}

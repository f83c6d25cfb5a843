use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Deserialize};

use crate::{errors::Error, Result};

pub const APP_SETTINGS_FILE: &str = "appsettings.json";
pub const LINKS_FILE: &str = "links.json";
pub const DEFAULT_DADATA_BASE_URL: &str = "https://suggestions.dadata.ru/suggestions/api/4_1/rs";

/// Author links shown by `/hello`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Links {
    pub link_github: String,
    pub resume_hh: String,
}

/// `appsettings.json`: secrets.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AppSettingsFile {
    #[serde(rename = "TelegramBotToken", default)]
    pub telegram_bot_token: Option<String>,
    #[serde(rename = "DadataToken", default)]
    pub dadata_token: Option<String>,
}

/// `links.json`: values interpolated verbatim into `/hello`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LinksFile {
    #[serde(rename = "LinkGithub", default)]
    pub link_github: Option<String>,
    #[serde(rename = "ResumeHH", default)]
    pub resume_hh: Option<String>,
}

/// Typed configuration for the bot.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,
    pub dadata_token: String,
    pub dadata_base_url: String,
    pub links: Links,

    // Telegram limits
    pub telegram_message_limit: usize,

    // Console conversation journal
    pub journal_enabled: bool,
}

impl Config {
    /// Load from JSON files in `INNBOT_CONFIG_DIR` (default: cwd), `.env`, and
    /// the process environment. Environment wins over files.
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let dir = env_path("INNBOT_CONFIG_DIR").unwrap_or_else(|| PathBuf::from("."));
        let settings: AppSettingsFile =
            read_json_if_present(&dir.join(APP_SETTINGS_FILE))?.unwrap_or_default();
        let links: LinksFile = read_json_if_present(&dir.join(LINKS_FILE))?.unwrap_or_default();

        Self::resolve(env_str, settings, links)
    }

    /// Merge already-parsed sources. `env` is the variable lookup (the real
    /// process environment in `load`, a map in tests).
    pub fn resolve(
        env: impl Fn(&str) -> Option<String>,
        settings: AppSettingsFile,
        links: LinksFile,
    ) -> Result<Self> {
        let pick = |key: &str, file: Option<String>| -> Option<String> {
            env(key).and_then(non_empty).or_else(|| file.and_then(non_empty))
        };

        let telegram_bot_token =
            pick("TELEGRAM_BOT_TOKEN", settings.telegram_bot_token).ok_or_else(|| {
                Error::Config(format!(
                    "TELEGRAM_BOT_TOKEN (or TelegramBotToken in {APP_SETTINGS_FILE}) is required"
                ))
            })?;
        let dadata_token = pick("DADATA_TOKEN", settings.dadata_token).ok_or_else(|| {
            Error::Config(format!(
                "DADATA_TOKEN (or DadataToken in {APP_SETTINGS_FILE}) is required"
            ))
        })?;

        let link_github = pick("LINK_GITHUB", links.link_github).unwrap_or_else(|| {
            tracing::warn!("LinkGithub is not configured; /hello will show an empty link");
            String::new()
        });
        let resume_hh = pick("RESUME_HH", links.resume_hh).unwrap_or_else(|| {
            tracing::warn!("ResumeHH is not configured; /hello will show an empty link");
            String::new()
        });

        let dadata_base_url = env("DADATA_BASE_URL")
            .and_then(non_empty)
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_DADATA_BASE_URL.to_string());

        let telegram_message_limit = env("TELEGRAM_MESSAGE_LIMIT")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(4096);

        let journal_enabled = env("JOURNAL_ENABLED")
            .map(|s| parse_bool(&s))
            .unwrap_or(true);

        Ok(Self {
            telegram_bot_token,
            dadata_token,
            dadata_base_url,
            links: Links {
                link_github,
                resume_hh,
            },
            telegram_message_limit,
            journal_enabled,
        })
    }
}

fn read_json_if_present<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::Io(e)),
    };
    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key).map(PathBuf::from)
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        env::set_var(key, strip_quotes(v.trim()));
    }
}

fn strip_quotes(val: &str) -> &str {
    if val.len() >= 2
        && ((val.starts_with('"') && val.ends_with('"'))
            || (val.starts_with('\'') && val.ends_with('\'')))
    {
        return &val[1..val.len() - 1];
    }
    val
}

fn parse_bool(s: &str) -> bool {
    matches!(
        s.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn files_supply_tokens_and_links() {
        let settings: AppSettingsFile =
            serde_json::from_str(r#"{"TelegramBotToken":"tg","DadataToken":"dd"}"#).unwrap();
        let links: LinksFile = serde_json::from_str(
            r#"{"LinkGithub":"https://github.com/me","ResumeHH":"https://hh.ru/resume/1"}"#,
        )
        .unwrap();

        let cfg = Config::resolve(env_of(&[]), settings, links).unwrap();
        assert_eq!(cfg.telegram_bot_token, "tg");
        assert_eq!(cfg.dadata_token, "dd");
        assert_eq!(cfg.links.link_github, "https://github.com/me");
        assert_eq!(cfg.links.resume_hh, "https://hh.ru/resume/1");
        assert_eq!(cfg.dadata_base_url, DEFAULT_DADATA_BASE_URL);
        assert_eq!(cfg.telegram_message_limit, 4096);
        assert!(cfg.journal_enabled);
    }

    #[test]
    fn env_overrides_files() {
        let settings = AppSettingsFile {
            telegram_bot_token: Some("file-tg".to_string()),
            dadata_token: Some("file-dd".to_string()),
        };
        let env = env_of(&[
            ("TELEGRAM_BOT_TOKEN", "env-tg"),
            ("DADATA_BASE_URL", "http://127.0.0.1:9999/"),
            ("TELEGRAM_MESSAGE_LIMIT", "100"),
            ("JOURNAL_ENABLED", "off"),
        ]);

        let cfg = Config::resolve(env, settings, LinksFile::default()).unwrap();
        assert_eq!(cfg.telegram_bot_token, "env-tg");
        assert_eq!(cfg.dadata_token, "file-dd");
        assert_eq!(cfg.dadata_base_url, "http://127.0.0.1:9999");
        assert_eq!(cfg.telegram_message_limit, 100);
        assert!(!cfg.journal_enabled);
        assert_eq!(cfg.links, Links::default());
    }

    #[test]
    fn blank_token_is_a_config_error() {
        let env = env_of(&[("TELEGRAM_BOT_TOKEN", "tg"), ("DADATA_TOKEN", "   ")]);
        let err = Config::resolve(env, AppSettingsFile::default(), LinksFile::default())
            .unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains("DADATA_TOKEN")));
    }

    #[test]
    fn strips_matching_quotes_only() {
        assert_eq!(strip_quotes("\"abc\""), "abc");
        assert_eq!(strip_quotes("'abc'"), "abc");
        assert_eq!(strip_quotes("\"abc'"), "\"abc'");
        assert_eq!(strip_quotes("\""), "\"");
    }
}

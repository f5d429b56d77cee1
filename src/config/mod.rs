use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;
use url::Url;

use crate::{
    cli::{Cli, Preset},
    media::ExtensionMatch,
    state::{FetchOptions, UpdatePolicy},
};

const DEFAULT_CONFIG_PATH: &str = "izinja.toml";
const DEFAULT_MEDIA_ENDPOINT: &str = "https://random.dog/woof.json";
const DEFAULT_JOKE_ENDPOINT: &str = "https://official-joke-api.appspot.com/random_joke";

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoints: Endpoints,
    pub fetch: FetchConfig,
    pub brand: Brand,
    pub log: LogConfig,
}

#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub media: String,
    pub joke: Option<String>,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            media: DEFAULT_MEDIA_ENDPOINT.to_string(),
            joke: Some(DEFAULT_JOKE_ENDPOINT.to_string()),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub update_policy: UpdatePolicy,
    pub extension_match: ExtensionMatch,
    pub retries: u32,
    pub retry_backoff_ms: u64,
    pub request_timeout_secs: Option<u64>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            update_policy: UpdatePolicy::default(),
            extension_match: ExtensionMatch::default(),
            retries: 0,
            retry_backoff_ms: 500,
            request_timeout_secs: None,
        }
    }
}

/// Static copy shown around the media.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Brand {
    pub name: String,
    pub tagline: String,
    pub about: String,
    pub services: Vec<String>,
    pub contact_url: String,
    pub footer: String,
}

impl Default for Brand {
    fn default() -> Self {
        Self::izinja()
    }
}

impl Brand {
    pub fn izinja() -> Self {
        Self {
            name: "Izinja".to_string(),
            tagline: "A world of random dog media, powered by Duncan Ramuhashi.".to_string(),
            about: "Izinja showcases random dog images and videos. Whether you love dogs or just want to smile, Izinja is here for you!".to_string(),
            services: vec![
                "Random dog images and videos".to_string(),
                "A fresh joke with every dog".to_string(),
                "Puppy adoption links".to_string(),
            ],
            contact_url: "https://www.petsplace.co.za/puppies.php".to_string(),
            footer: "© 2024. Powered by Duncan Ramuhashi".to_string(),
        }
    }

    pub fn pawtopia() -> Self {
        Self {
            name: "Pawtopia".to_string(),
            tagline: "Where every click brings a new furry friend.".to_string(),
            about: "Pawtopia is a tiny corner of the internet for dog lovers: a random pup and a bad joke, on demand.".to_string(),
            services: vec![
                "Daily doses of dogs".to_string(),
                "Jokes your dog would laugh at".to_string(),
                "Help finding a puppy of your own".to_string(),
            ],
            contact_url: "https://www.petsplace.co.za/puppies.php".to_string(),
            footer: "© 2024 Pawtopia. Powered by Duncan Ramuhashi".to_string(),
        }
    }
}

impl From<Preset> for Brand {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Izinja => Brand::izinja(),
            Preset::Pawtopia => Brand::pawtopia(),
        }
    }
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub directory: PathBuf,
    pub file_prefix: String,
    pub level: String,
    pub trace_sample_rate: f32,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("/tmp"),
            file_prefix: "izinja.log".to_string(),
            level: "info".to_string(),
            trace_sample_rate: 0.001,
        }
    }
}

impl Config {
    pub fn read(file: &mut impl Read) -> anyhow::Result<Self> {
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .context("Failed to read config file")?;

        let config = toml::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    pub fn read_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let mut file = File::open(path).context("Failed to open config file")?;
        Self::read(&mut file)
    }

    pub fn from_cli_args(args: &Cli) -> anyhow::Result<Self> {
        let mut config = match &args.config {
            Some(config_path) => Self::read_path(config_path)?,
            None => {
                let default_config = PathBuf::from(DEFAULT_CONFIG_PATH);
                if default_config.exists() {
                    Self::read_path(default_config)?
                } else {
                    Config::default()
                }
            }
        };
        config.apply(args);
        Ok(config)
    }

    /// Command line flags win over the file.
    pub fn apply(&mut self, args: &Cli) {
        if let Some(preset) = args.preset {
            self.brand = preset.into();
        }
        if args.no_jokes {
            self.endpoints.joke = None;
        }
        if args.ignore_case {
            self.fetch.extension_match = ExtensionMatch::IgnoreCase;
        }
        if args.last_completed_wins {
            self.fetch.update_policy = UpdatePolicy::LastCompleted;
        }
    }

    pub fn media_endpoint(&self) -> anyhow::Result<Url> {
        Url::parse(&self.endpoints.media)
            .with_context(|| format!("Invalid media endpoint {:?}", self.endpoints.media))
    }

    pub fn joke_endpoint(&self) -> anyhow::Result<Option<Url>> {
        self.endpoints
            .joke
            .as_deref()
            .filter(|j| !j.is_empty())
            .map(|j| Url::parse(j).with_context(|| format!("Invalid joke endpoint {j:?}")))
            .transpose()
    }

    /// An empty `joke` endpoint in the file disables jokes, same as `--no-jokes`.
    pub fn jokes_enabled(&self) -> bool {
        self.endpoints.joke.as_deref().is_some_and(|j| !j.is_empty())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.fetch.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            policy: self.fetch.update_policy,
            matcher: self.fetch.extension_match,
            chain_joke: self.jokes_enabled(),
            retries: self.fetch.retries,
            retry_backoff: Duration::from_millis(self.fetch.retry_backoff_ms),
        }
    }
}

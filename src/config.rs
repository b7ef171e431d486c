use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Interface to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Base URL of the dependency parser back-end
    #[arg(long, env = "PARSER_URL")]
    pub parser_url: Option<String>,

    /// Model to load first
    #[arg(long)]
    pub primary_model: Option<String>,

    /// Model to load when the primary model is unavailable
    #[arg(long)]
    pub fallback_model: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub parser: ParserConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub body_limit_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ParserConfig {
    pub backend: String,
    pub base_url: String,
    pub primary_model: String,
    #[serde(default)]
    pub fallback_model: Option<String>,
}

/// Tunable knowledge used by the extraction strategies.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Below this many syntactic triples the heuristic strategy also runs
    pub min_syntactic_triples: usize,
    /// Entity patterns, scanned in order
    pub entity_patterns: Vec<String>,
    /// Relation words, highest priority first
    pub relation_words: Vec<String>,
    /// Predicate used when no relation word links two entities
    pub default_relation: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_syntactic_triples: 2,
            entity_patterns: [
                r"[\x{4e00}-\x{9fa5}]{2,6}[部门]",
                r"[\x{4e00}-\x{9fa5}]{2,8}[流程]",
                r"[\x{4e00}-\x{9fa5}]{2,6}[手册|文件|规程|指导书]",
                r"ISO\s*\d+",
                r"[\x{4e00}-\x{9fa5}]{2,4}[A-Z]",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            relation_words: ["包含", "使用", "负责", "需要", "前置于", "经过", "关联"]
                .into_iter()
                .map(String::from)
                .collect(),
            default_relation: "关联".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter when RUST_LOG is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder();

        // 1. Defaults
        builder = builder
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.body_limit_bytes", 2 * 1024 * 1024)?
            .set_default("parser.backend", "udpipe")?
            .set_default("parser.base_url", "http://localhost:8001")?
            .set_default("parser.primary_model", "chinese-gsd")?
            .set_default("parser.fallback_model", "english-ewt")?;

        // 2. Config file: explicit path is required, ./config.* is optional
        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path).required(true)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        // 3. Environment variables (prefixed with TRIPLES_), e.g. TRIPLES_SERVER__PORT=8000
        builder = builder.add_source(
            Environment::with_prefix("TRIPLES")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // 4. CLI flags (clap also fills these from PORT / PARSER_URL)
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(url) = cli.parser_url {
            builder = builder.set_override("parser.base_url", url)?;
        }
        if let Some(model) = cli.primary_model {
            builder = builder.set_override("parser.primary_model", model)?;
        }
        if let Some(model) = cli.fallback_model {
            builder = builder.set_override("parser.fallback_model", model)?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }
}

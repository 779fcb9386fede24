use colorful::Colorful;
use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};
use tracing_subscriber::layer::SubscriberExt;

const LOG_FILES_KEPT: usize = 6;

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: tracing::Level,
    pub logging_enabled: bool,
    pub logger_name: String,
    /// Where rolling log files go. Defaults to the per-user data directory.
    pub log_dir: Option<PathBuf>,
    pub _tracing_guard: Option<std::sync::Arc<tracing::subscriber::DefaultGuard>>,
}

impl LoggingConfig {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            logging_enabled: true,
            logger_name: "page_classifier".to_string(),
            log_dir: None,
            _tracing_guard: None,
        }
    }
}

impl LoggingConfig {
    pub fn load_logger(&mut self) -> crate::Result<()> {
        self._tracing_guard = if self.logging_enabled {
            Some(std::sync::Arc::new(self.create_logger()?))
        } else {
            None
        };

        if self.logging_enabled {
            eprintln!(
                "{}",
                format!("Starting {} Logger", self.logger_name)
                    .color(colorful::RGB::new(0, 139, 248))
                    .bold()
            );
        }

        Ok(())
    }

    fn create_logger(&mut self) -> crate::Result<tracing::subscriber::DefaultGuard> {
        let log_dir = match &self.log_dir {
            Some(log_dir) => log_dir.clone(),
            None => default_log_dir(),
        };

        if !Path::new(&log_dir).exists() {
            create_dir_all(&log_dir).map_err(|e| {
                crate::anyhow!("failed to create log directory {}: {e}", log_dir.display())
            })?;
        }

        let file_appender = tracing_appender::rolling::RollingFileAppender::builder()
            .rotation(tracing_appender::rolling::Rotation::HOURLY)
            .max_log_files(LOG_FILES_KEPT)
            .filename_prefix(&self.logger_name)
            .filename_suffix("log")
            .build(&log_dir)?;

        let filter = tracing_subscriber::EnvFilter::builder()
            .with_default_directive(self.level.into())
            .parse_lossy("");

        let file_layer = tracing_subscriber::fmt::layer()
            .pretty()
            .with_ansi(false) // Disable ANSI codes for file output
            .with_writer(file_appender);

        // stdout carries results, so the terminal layer goes to stderr
        let terminal_layer = tracing_subscriber::fmt::layer()
            .compact()
            .with_ansi(false)
            .with_writer(std::io::stderr);

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(terminal_layer);

        Ok(tracing::subscriber::set_default(subscriber))
    }
}

fn default_log_dir() -> PathBuf {
    match directories::ProjectDirs::from("com", "page_classifier", "page_classifier") {
        Some(dirs) => dirs.data_local_dir().join("logs"),
        None => std::env::temp_dir().join("page_classifier_logs"),
    }
}

#[allow(dead_code)]
pub trait LoggingConfigTrait {
    fn logging_config_mut(&mut self) -> &mut LoggingConfig;

    fn logging_enabled(mut self, enabled: bool) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().logging_enabled = enabled;
        self
    }

    fn logger_name<S: Into<String>>(mut self, logger_name: S) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().logger_name = logger_name.into();
        self
    }

    fn log_dir<P: Into<PathBuf>>(mut self, log_dir: P) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().log_dir = Some(log_dir.into());
        self
    }

    fn log_level(mut self, level: tracing::Level) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().level = level;
        self
    }

    /// Flow-of-execution logs only: "sending request", "reading response".
    fn log_level_trace(self) -> Self
    where
        Self: Sized,
    {
        self.log_level(tracing::Level::TRACE)
    }

    /// Variables and decisions, e.g. the request url.
    fn log_level_debug(self) -> Self
    where
        Self: Sized,
    {
        self.log_level(tracing::Level::DEBUG)
    }

    /// One line per classification started and finished.
    fn log_level_info(self) -> Self
    where
        Self: Sized,
    {
        self.log_level(tracing::Level::INFO)
    }

    /// Recovered problems, such as a model answer outside the label set.
    fn log_level_warn(self) -> Self
    where
        Self: Sized,
    {
        self.log_level(tracing::Level::WARN)
    }

    /// Failed classifications.
    fn log_level_error(self) -> Self
    where
        Self: Sized,
    {
        self.log_level(tracing::Level::ERROR)
    }
}

impl LoggingConfigTrait for LoggingConfig {
    fn logging_config_mut(&mut self) -> &mut LoggingConfig {
        self
    }
}

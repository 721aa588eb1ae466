use crate::error::ConfigError;
use crate::parameters::SinkParameters;
use enxlog::{ConsoleSink, FileSink, RollingFileSink, Rotation, Sink, TracingSink};
use fxhash::FxHashMap;
use std::fmt;
use tracing::trace;

/// Creates a sink from its configured parameters.
pub type SinkCreator = Box<dyn Fn(&SinkParameters) -> Result<Box<dyn Sink>, ConfigError> + Send + Sync>;

/// Maps sink `type` names to creators.
///
/// ```rust
/// use enxlog::ConsoleSink;
/// use enxlog_config::{SinkFactory, SinkParameters};
///
/// let factory = SinkFactory::with_builtin()
///     .register("console", |_| Ok(Box::new(ConsoleSink::stdout())));
///
/// let sink = factory.create(&SinkParameters::new().with("type", "console"))?;
/// assert_eq!(sink.name(), "stdout");
/// # Ok::<(), enxlog_config::ConfigError>(())
/// ```
#[derive(Default)]
pub struct SinkFactory {
    creators: FxHashMap<String, SinkCreator>,
}

impl SinkFactory {
    /// A factory without any sink types.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A factory knowing `stdout`, `stdout_color`, `file`, `rolling_file` and `tracing`.
    #[must_use]
    pub fn with_builtin() -> Self {
        Self::new()
            .register("stdout", |_| Ok(Box::new(ConsoleSink::stdout())))
            .register("stdout_color", |_| Ok(Box::new(ConsoleSink::stdout_color())))
            .register("file", create_file)
            .register("rolling_file", create_rolling_file)
            .register("tracing", |_| Ok(Box::new(TracingSink::new())))
    }

    /// Adds a creator for `sink_type`, replacing any previous one.
    #[must_use = "The factory is consumed and returned with the new sink type."]
    pub fn register<F>(mut self, sink_type: impl Into<String>, creator: F) -> Self
    where
        F: Fn(&SinkParameters) -> Result<Box<dyn Sink>, ConfigError> + Send + Sync + 'static,
    {
        self.creators.insert(sink_type.into(), Box::new(creator));
        self
    }

    #[must_use]
    pub fn contains(&self, sink_type: &str) -> bool {
        self.creators.contains_key(sink_type)
    }

    /// Registered type names, sorted.
    #[must_use]
    pub fn sink_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.creators.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Creates an uninitialized sink for `parameters`.
    pub fn create(&self, parameters: &SinkParameters) -> Result<Box<dyn Sink>, ConfigError> {
        let sink_type = parameters.sink_type()?;
        let creator = self.creators.get(sink_type).ok_or_else(|| ConfigError::UnknownSinkType {
            sink_type: sink_type.to_owned().into(),
            context: None,
        })?;

        trace!(sink_type, parameters = parameters.len(), "Creating sink");
        creator(parameters)
    }
}

impl fmt::Debug for SinkFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkFactory").field("sink_types", &self.sink_types()).finish()
    }
}

fn create_file(parameters: &SinkParameters) -> Result<Box<dyn Sink>, ConfigError> {
    let path = parameters.require("path")?;
    Ok(Box::new(FileSink::new(path)))
}

fn create_rolling_file(parameters: &SinkParameters) -> Result<Box<dyn Sink>, ConfigError> {
    let directory = parameters.require("directory")?;
    let prefix = parameters.require("prefix")?;
    let mut sink = RollingFileSink::new(directory, prefix);

    if let Some(rotation) = parameters.get("rotation") {
        sink = sink.rotation(parse_rotation(rotation)?);
    }
    if let Some(max_files) = parameters.get("max_files") {
        sink = sink.max_files(parse_max_files(max_files)?);
    }
    Ok(Box::new(sink))
}

fn parse_rotation(value: &str) -> Result<Rotation, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "minutely" => Ok(Rotation::MINUTELY),
        "hourly" => Ok(Rotation::HOURLY),
        "daily" => Ok(Rotation::DAILY),
        "never" => Ok(Rotation::NEVER),
        _ => Err(invalid("rotation", value, "expected minutely, hourly, daily or never")),
    }
}

fn parse_max_files(value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(invalid("max_files", value, "expected a positive integer")),
        Ok(n) => Ok(n),
    }
}

fn invalid(parameter: &'static str, value: &str, hint: &'static str) -> ConfigError {
    ConfigError::InvalidParameter {
        parameter: parameter.into(),
        value: value.to_owned().into(),
        context: Some(hint.into()),
    }
}

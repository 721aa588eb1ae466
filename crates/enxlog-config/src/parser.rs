use crate::error::{ConfigError, ConfigErrorExt};
use crate::factory::SinkFactory;
use crate::parameters::{ScalarText, SinkParameters};
use enxlog::{Dispatcher, FilterTree, LogLevel};
use serde::Deserialize;
use serde::de::{
    self, DeserializeSeed, Deserializer, EnumAccess, IgnoredAny, MapAccess, SeqAccess, VariantAccess, Visitor,
};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

const DEFAULT_LEVEL_KEY: &str = "default_loglevel";

/// A parsed configuration: default level, sink parameter sets and filter tree.
///
/// ```rust
/// use enxlog::LogLevel;
/// use enxlog_config::ConfigDocument;
///
/// let document = ConfigDocument::parse_str(
///     "options:\n  default_loglevel: WARN\nsink:\n  type: stdout\nfilter:\n  net.tcp: DEBUG\n",
/// )?;
///
/// assert_eq!(document.default_level, LogLevel::Warn);
/// assert_eq!(document.sinks.len(), 1);
/// assert_eq!(document.filter.resolve(&["net", "tcp"], LogLevel::None), LogLevel::Debug);
/// # Ok::<(), enxlog_config::ConfigError>(())
/// ```
#[derive(Debug, Default)]
pub struct ConfigDocument {
    pub default_level: LogLevel,
    pub sinks: Vec<SinkParameters>,
    pub filter: FilterTree,
}

/// Top-level sections. Each may appear any number of times and is applied in
/// document order.
#[derive(Debug, Deserialize)]
#[serde(field_identifier, rename_all = "lowercase")]
enum Section {
    Options,
    Sink,
    Sinks,
    Filter,
}

/// Document root: a configuration, or a description of what was found instead.
enum Root {
    Document(ConfigDocument),
    Unexpected(&'static str),
}

impl<'de> Deserialize<'de> for Root {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RootVisitor;

        impl<'de> Visitor<'de> for RootVisitor {
            type Value = Root;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a configuration mapping")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut document = ConfigDocument::default();
                while let Some(section) = map.next_key::<Section>()? {
                    match section {
                        Section::Options => {
                            if let Some(level) = map.next_value::<OptionsSection>()?.default_level {
                                document.default_level = level;
                            }
                        },
                        Section::Sink => document.sinks.push(map.next_value()?),
                        Section::Sinks => document.sinks.extend(map.next_value::<Vec<SinkParameters>>()?),
                        Section::Filter => map.next_value_seed(FilterSection(&mut document.filter))?,
                    }
                }
                Ok(Root::Document(document))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(Root::Unexpected("a sequence"))
            }

            fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<Self::Value, A::Error> {
                let (IgnoredAny, variant) = data.variant()?;
                variant.newtype_variant::<IgnoredAny>()?;
                Ok(Root::Unexpected("a tagged value"))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(Root::Unexpected("an empty document"))
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(Root::Unexpected("an empty document"))
            }

            fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
                Ok(Root::Unexpected("a scalar"))
            }

            fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
                Ok(Root::Unexpected("a scalar"))
            }

            fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
                Ok(Root::Unexpected("a scalar"))
            }

            fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
                Ok(Root::Unexpected("a scalar"))
            }

            fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
                Ok(Root::Unexpected("a scalar"))
            }
        }

        deserializer.deserialize_any(RootVisitor)
    }
}

/// One `options` mapping. Unknown keys are ignored; a repeated key overrides.
#[derive(Debug, Default)]
struct OptionsSection {
    default_level: Option<LogLevel>,
}

impl<'de> Deserialize<'de> for OptionsSection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OptionsVisitor;

        impl<'de> Visitor<'de> for OptionsVisitor {
            type Value = OptionsSection;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of options")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut options = OptionsSection::default();
                while let Some(key) = map.next_key::<ScalarText>()? {
                    if key.0 == DEFAULT_LEVEL_KEY {
                        let LevelName(level) = map.next_value()?;
                        options.default_level = Some(level);
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(options)
            }
        }

        deserializer.deserialize_map(OptionsVisitor)
    }
}

#[derive(Debug, Clone, Copy)]
struct LevelName(LogLevel);

impl<'de> Deserialize<'de> for LevelName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LevelVisitor;

        impl Visitor<'_> for LevelVisitor {
            type Value = LevelName;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a log level name")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map(LevelName).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(LevelVisitor)
    }
}

/// Inserts one `filter` mapping into an existing tree, in document order.
/// A path seen before has its level replaced.
struct FilterSection<'a>(&'a mut FilterTree);

impl<'de> DeserializeSeed<'de> for FilterSection<'_> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        struct FilterVisitor<'a>(&'a mut FilterTree);

        impl<'de> Visitor<'de> for FilterVisitor<'_> {
            type Value = ();

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of logger paths to log levels")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<(), A::Error> {
                while let Some(path) = map.next_key::<ScalarText>()? {
                    let LevelName(level) = map.next_value()?;
                    self.0.insert(&path.0, level).map_err(de::Error::custom)?;
                }
                Ok(())
            }
        }

        deserializer.deserialize_map(FilterVisitor(self.0))
    }
}

impl ConfigDocument {
    /// Parses a YAML configuration.
    ///
    /// `sink`, `sinks`, `filter` and `options` may each be repeated; sinks are
    /// kept in document order and later filter entries and options override
    /// earlier ones.
    pub fn parse_str(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Err(unexpected("an empty document"));
        }

        let document = match serde_yaml::from_str(text)? {
            Root::Document(document) => document,
            Root::Unexpected(found) => return Err(unexpected(found)),
        };
        debug!(
            default_level = %document.default_level,
            sinks = document.sinks.len(),
            filters = document.filter.entries().len(),
            "Configuration parsed"
        );
        Ok(document)
    }

    /// Reads and parses a YAML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .context(format!("Could not read configuration: {}", path.display()))?;
        Self::parse_str(&text).context(path.display().to_string())
    }

    /// Creates every sink through `factory`, in document order, and builds the dispatcher.
    ///
    /// # Errors
    /// Fails on the first sink that cannot be created or initialized. Sinks
    /// already initialized are shut down again.
    pub fn build(&self, factory: &SinkFactory) -> Result<Dispatcher, ConfigError> {
        let mut builder = Dispatcher::builder()
            .default_level(self.default_level)
            .filter(self.filter.clone());

        for (index, parameters) in self.sinks.iter().enumerate() {
            match factory.create(parameters) {
                Ok(sink) => builder = builder.boxed_sink(sink),
                Err(e) => {
                    warn!(index, error = %e, kind = e.kind(), "Sink creation failed");
                    // Earlier sinks are dropped uninitialized.
                    return Err(e);
                },
            }
        }

        let dispatcher = builder.build()?;
        info!(sinks = dispatcher.sink_count(), default_level = %self.default_level, "Logging configured");
        Ok(dispatcher)
    }
}

fn unexpected(found: &'static str) -> ConfigError {
    ConfigError::UnexpectedInput { found: found.into(), context: None }
}

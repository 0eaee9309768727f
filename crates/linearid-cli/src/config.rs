use anyhow::bail;
use clap::{Parser, Subcommand, ValueEnum};
use linearid::time::Resolution;

/// Upper bound on `--count`, to keep a typo from flooding the terminal.
pub const MAX_COUNT: usize = 10_000_000;

/// Command-line arguments for the `lid` binary.
///
/// Every option can also be set through the environment (or a `.env` file in
/// the working directory).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "lid",
    version,
    about = "Generate, pack and decode time-ordered Linear IDs"
)]
pub struct CliArgs {
    /// Bit layout of the IDs.
    ///
    /// Environment variable: `LID_LAYOUT`
    #[arg(long, short, global = true, env = "LID_LAYOUT", value_enum, default_value_t = Layout::Lid128)]
    pub layout: Layout,

    /// Length of one timestamp tick.
    ///
    /// Environment variable: `LID_RESOLUTION`
    #[arg(long, short, global = true, env = "LID_RESOLUTION", value_enum, default_value_t = ClockResolution::Seconds)]
    pub resolution: ClockResolution,

    /// Output form for IDs.
    ///
    /// Environment variable: `LID_FORMAT`
    #[arg(long, short, global = true, env = "LID_FORMAT", value_enum, default_value_t = Format::Hex)]
    pub format: Format,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Generate new IDs, one per line.
    Next {
        /// How many IDs to generate.
        ///
        /// Environment variable: `LID_COUNT`
        #[arg(long, short = 'n', env = "LID_COUNT", default_value_t = 1)]
        count: usize,
    },
    /// Pack explicit fields into an ID, rejecting values that overflow.
    Pack {
        timestamp: String,
        ticker: String,
        source: String,
    },
    /// Print the fields of an ID.
    Unpack {
        id: String,
        /// Form of the input.
        #[arg(long, value_enum, default_value_t = Format::Hex)]
        from: Format,
    },
    /// Re-encode an ID from one form into `--format`.
    Convert {
        id: String,
        /// Form of the input.
        #[arg(long, value_enum, default_value_t = Format::Hex)]
        from: Format,
    },
}

/// The predefined layouts.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// 128 bits: timestamp 33, ticker 22, source 73.
    Lid128,
    /// 64 bits: timestamp 32, ticker 16, source 16.
    Lid64,
    /// 64 bits, process-local: timestamp 32, ticker 32, no source.
    Llid,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockResolution {
    Seconds,
    /// Too fine for the predefined layouts; `next` rejects it.
    Millis,
}

impl From<ClockResolution> for Resolution {
    fn from(value: ClockResolution) -> Self {
        match value {
            ClockResolution::Seconds => Self::Seconds,
            ClockResolution::Millis => Self::Millis,
        }
    }
}

/// Textual forms of an ID.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Fixed-width lowercase hex, most significant digit first.
    Hex,
    /// Decimal integer.
    Int,
    /// Little-endian bytes as space-separated hex pairs.
    Bytes,
}

/// A validated command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next { count: usize },
    Pack { timestamp: String, ticker: String, source: String },
    Unpack { id: String, from: Format },
    Convert { id: String, from: Format },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub layout: Layout,
    pub resolution: Resolution,
    pub format: Format,
    pub command: Command,
}

impl TryFrom<CliArgs> for Config {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let command = match args.command {
            CliCommand::Next { count } => {
                if count == 0 {
                    bail!("LID_COUNT must be greater than 0");
                }
                if count > MAX_COUNT {
                    bail!("LID_COUNT ({count}) exceeds the maximum of {MAX_COUNT}");
                }
                Command::Next { count }
            }
            CliCommand::Pack {
                timestamp,
                ticker,
                source,
            } => Command::Pack {
                timestamp,
                ticker,
                source,
            },
            CliCommand::Unpack { id, from } => Command::Unpack { id, from },
            CliCommand::Convert { id, from } => {
                if from == args.format {
                    tracing::debug!(?from, "convert input and output forms are the same");
                }
                Command::Convert { id, from }
            }
        };

        Ok(Self {
            layout: args.layout,
            resolution: args.resolution.into(),
            format: args.format,
            command,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<Config> {
        let args = CliArgs::try_parse_from(args)?;
        Config::try_from(args)
    }

    #[test]
    fn next_with_explicit_options() {
        let config = parse(&[
            "lid", "--layout", "lid64", "--resolution", "millis", "--format", "int", "next", "-n",
            "5",
        ])
        .unwrap();
        assert_eq!(config.layout, Layout::Lid64);
        assert_eq!(config.resolution, Resolution::Millis);
        assert_eq!(config.format, Format::Int);
        assert_eq!(config.command, Command::Next { count: 5 });
    }

    #[test]
    fn global_options_after_subcommand() {
        let config = parse(&["lid", "next", "--count", "2", "--layout", "llid"]).unwrap();
        assert_eq!(config.layout, Layout::Llid);
        assert_eq!(config.command, Command::Next { count: 2 });
    }

    #[test]
    fn rejects_zero_count() {
        let err = parse(&["lid", "next", "--count", "0"]).unwrap_err();
        assert!(err.to_string().contains("greater than 0"));
    }

    #[test]
    fn rejects_huge_count() {
        let count = (MAX_COUNT + 1).to_string();
        let err = parse(&["lid", "next", "--count", &count]).unwrap_err();
        assert!(err.to_string().contains("exceeds the maximum"));
    }

    #[test]
    fn rejects_unknown_layout() {
        assert!(parse(&["lid", "--layout", "lid32", "next"]).is_err());
    }

    #[test]
    fn unpack_and_convert_take_input_form() {
        let config = parse(&["lid", "unpack", "--from", "int", "42"]).unwrap();
        assert_eq!(
            config.command,
            Command::Unpack {
                id: "42".into(),
                from: Format::Int
            }
        );

        let config = parse(&["lid", "--format", "bytes", "convert", "ff"]).unwrap();
        assert_eq!(config.format, Format::Bytes);
        assert_eq!(
            config.command,
            Command::Convert {
                id: "ff".into(),
                from: Format::Hex
            }
        );
    }

    #[test]
    fn pack_keeps_raw_fields() {
        let config = parse(&["lid", "pack", "1000", "5", "42"]).unwrap();
        assert_eq!(
            config.command,
            Command::Pack {
                timestamp: "1000".into(),
                ticker: "5".into(),
                source: "42".into()
            }
        );
    }
}

use std::io::Write;

use anyhow::{Context, Result, bail};
use linearid::{
    codec::{LeBytes, LinearIdCodecExt},
    generator::BasicLinearIdGenerator,
    id::{Id, Lid64, Lid128, LinearId, Llid, ToU64},
    rand::ThreadRandom,
    time::{Resolution, SystemClock, TimeSource},
};

use crate::config::{Command, Config, Format, Layout};

/// Runs `config.command` for the configured layout, writing results to `out`.
pub fn run(config: &Config, out: &mut impl Write) -> Result<()> {
    match config.layout {
        Layout::Lid128 => run_with::<Lid128>(config, out),
        Layout::Lid64 => run_with::<Lid64>(config, out),
        Layout::Llid => run_with::<Llid>(config, out),
    }
}

fn run_with<ID>(config: &Config, out: &mut impl Write) -> Result<()>
where
    ID: LinearIdCodecExt,
    ID::Ty: LeBytes,
    SystemClock: TimeSource<ID::Ty>,
{
    match &config.command {
        Command::Next { count } => {
            tracing::debug!(count, layout = ?config.layout, "generating ids");
            let resolution = config.resolution;
            let clock = SystemClock::new(resolution);
            let now = <SystemClock as TimeSource<ID::Ty>>::current_ticks(&clock);
            if now > ID::max_timestamp() {
                bail!(
                    "{resolution:?} clock reading {now} overflows the {:?} timestamp field \
                     (max {}); use seconds",
                    config.layout,
                    ID::max_timestamp()
                );
            }
            let generator = BasicLinearIdGenerator::<ID, _, _>::new(clock, ThreadRandom);
            for _ in 0..*count {
                let id = generator.next_id(|ticks| wait(resolution, ticks.to_u64()));
                writeln!(out, "{}", render(&id, config.format))?;
            }
        }
        Command::Pack {
            timestamp,
            ticker,
            source,
        } => {
            let id = ID::try_from_components(
                parse_field::<ID>("timestamp", timestamp)?,
                parse_field::<ID>("ticker", ticker)?,
                parse_field::<ID>("source", source)?,
            )?;
            writeln!(out, "{}", render(&id, config.format))?;
        }
        Command::Unpack { id, from } => {
            let id = parse_id::<ID>(id, *from)?;
            let (timestamp, ticker, source) = id.unpack();
            writeln!(out, "timestamp: {timestamp}")?;
            writeln!(out, "ticker:    {ticker}")?;
            writeln!(out, "source:    {source}")?;
        }
        Command::Convert { id, from } => {
            let id = parse_id::<ID>(id, *from)?;
            writeln!(out, "{}", render(&id, config.format))?;
        }
    }
    Ok(())
}

fn wait(resolution: Resolution, ticks: u64) {
    if ticks == 0 {
        std::thread::yield_now();
    } else {
        tracing::trace!(ticks, "ticker saturated, sleeping");
        std::thread::sleep(resolution.duration_of(ticks));
    }
}

/// Formats `id` in the requested textual form.
pub fn render<ID>(id: &ID, format: Format) -> String
where
    ID: LinearIdCodecExt,
    ID::Ty: LeBytes,
{
    match format {
        Format::Hex => id.to_hex(),
        Format::Int => id.to_raw().to_string(),
        Format::Bytes => id
            .to_bytes()
            .as_ref()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Parses `input` given in the textual form `from`.
///
/// The bytes form accepts either whitespace-separated pairs or one
/// unbroken run of hex digits, least significant byte first.
pub fn parse_id<ID>(input: &str, from: Format) -> Result<ID>
where
    ID: LinearIdCodecExt,
    ID::Ty: LeBytes,
{
    let input = input.trim();
    let id = match from {
        Format::Hex => ID::from_hex(input)?,
        Format::Int => {
            let raw: u128 = input
                .parse()
                .with_context(|| format!("{input:?} is not an unsigned integer"))?;
            match <ID::Ty as TryFrom<u128>>::try_from(raw) {
                Ok(raw) => ID::from_raw(raw),
                Err(_) => bail!("{raw} does not fit in {} bytes", <ID::Ty as LeBytes>::SIZE),
            }
        }
        Format::Bytes => ID::from_bytes(&parse_byte_list(input)?)?,
    };
    Ok(id)
}

fn parse_byte_list(input: &str) -> Result<Vec<u8>> {
    let digits: String = input.split_whitespace().collect();
    if !digits.is_ascii() {
        bail!("byte list holds a non-ASCII character");
    }
    if digits.len() % 2 != 0 {
        bail!("byte list has an odd number of hex digits");
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| {
            let pair = &digits[i..i + 2];
            u8::from_str_radix(pair, 16).with_context(|| format!("{pair:?} is not a hex byte"))
        })
        .collect()
}

fn parse_field<ID: Id>(name: &str, value: &str) -> Result<ID::Ty> {
    let raw: u128 = value
        .parse()
        .with_context(|| format!("{name} {value:?} is not an unsigned integer"))?;
    match <ID::Ty as TryFrom<u128>>::try_from(raw) {
        Ok(v) => Ok(v),
        Err(_) => bail!("{name} value {raw} does not fit the ID width"),
    }
}

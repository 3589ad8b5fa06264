//! Argument parsing for the `klukka` binary.

use std::path::PathBuf;

use crate::window::Preset;

pub const USAGE: &str = concat!(
    "usage: klukka report [today|week|month] [--group <id>]\n",
    "       klukka active\n",
    "       klukka export [today|week|month] [--detailed] [--group <id>] [--out <file>]",
);

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Report {
        preset: Option<Preset>,
        group_id: Option<i64>,
    },
    Active,
    Export {
        preset: Option<Preset>,
        detailed: bool,
        group_id: Option<i64>,
        output: Option<PathBuf>,
    },
}

impl Command {
    /// Parses arguments without the program name.
    /// A missing preset means "use the configured default".
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let (name, rest) = args.split_first().ok_or_else(|| USAGE.to_string())?;
        let mut preset = None;
        let mut group_id = None;
        let mut detailed = false;
        let mut output = None;

        let mut iter = rest.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--detailed" => detailed = true,
                "--group" => {
                    let value = iter.next().ok_or("--group needs a group id")?;
                    group_id = Some(
                        value
                            .parse::<i64>()
                            .map_err(|_| format!("invalid group id `{value}`"))?,
                    );
                }
                "--out" => {
                    let value = iter.next().ok_or("--out needs a file name")?;
                    output = Some(PathBuf::from(value));
                }
                other if preset.is_none() && !other.starts_with("--") => {
                    let parsed: Preset = other.parse()?;
                    if parsed == Preset::Custom {
                        return Err(
                            "custom ranges are not supported on the command line".to_string()
                        );
                    }
                    preset = Some(parsed);
                }
                other => return Err(format!("unexpected argument `{other}`\n{USAGE}")),
            }
        }

        match name.as_str() {
            "report" if !detailed && output.is_none() => Ok(Command::Report { preset, group_id }),
            "active" if rest.is_empty() => Ok(Command::Active),
            "export" => Ok(Command::Export {
                preset,
                detailed,
                group_id,
                output,
            }),
            _ => Err(USAGE.to_string()),
        }
    }
}

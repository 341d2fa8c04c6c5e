//! Channels command: the TV channel directory.

use std::io::Write;

use anyhow::Result;
use le_core::ChannelDirectory;

use crate::render::{format_channels, format_channels_json};
use crate::source::Source;
use crate::{ChannelsArgs, Config};

pub fn run<W: Write>(writer: &mut W, args: &ChannelsArgs, config: &Config) -> Result<()> {
    let dataset = Source::resolve(args.source.file.as_deref(), args.source.remote, config)
        .load(config)?;
    let directory = ChannelDirectory::new(&dataset.channels);

    if args.json {
        writeln!(writer, "{}", format_channels_json(&directory)?)?;
    } else {
        write!(writer, "{}", format_channels(&directory))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::SourceArgs;

    #[test]
    fn test_channels_from_file_last_definition_wins() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("fixtures.json");
        std::fs::write(
            &path,
            r#"{
                "events": [],
                "channels": [
                    { "id": "sky", "name": "Sky Sports", "region": "UK" },
                    { "id": "ten", "name": "Ten Sports", "isFree": true },
                    { "id": "sky", "name": "Sky Sports Main Event", "region": "UK" }
                ]
            }"#,
        )
        .unwrap();

        let args = ChannelsArgs {
            json: false,
            source: SourceArgs {
                file: Some(path),
                remote: false,
            },
        };
        let mut output = Vec::new();
        run(&mut output, &args, &Config::default()).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.starts_with("TV CHANNELS (2)\n"));
        assert!(output.contains("Sky Sports Main Event  UK        Subscription\n"));
        assert!(output.contains("Ten Sports             Global    Free\n"));
    }
}

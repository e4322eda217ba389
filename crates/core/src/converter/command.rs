//! Command construction for the transcoding engine.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::catalog::FormatSpec;

use super::config::EngineConfig;
use super::types::ResolvedOptions;

/// Encoders forced per target format, whatever codec was resolved.
///
/// These containers only work with the listed encoder.
const PINNED_CODECS: &[(&str, &str)] = &[
    ("flac", "flac"),
    ("wav", "pcm_s16le"),
    ("mp3", "libmp3lame"),
];

/// Returns the encoder pinned for `format_name`, if any.
pub fn pinned_codec(format_name: &str) -> Option<&'static str> {
    PINNED_CODECS
        .iter()
        .find(|(format, _)| *format == format_name)
        .map(|(_, codec)| *codec)
}

/// Derives `<output_dir>/<input stem>_converted.<extension>`.
pub fn output_file_path(input_path: &Path, output_dir: &Path, format: &FormatSpec) -> PathBuf {
    let mut file_name = input_path
        .file_stem()
        .map(OsStr::to_os_string)
        .unwrap_or_else(|| OsString::from("output"));
    file_name.push("_converted.");
    file_name.push(format.extension());
    output_dir.join(file_name)
}

/// An engine invocation: program plus ordered arguments.
///
/// Tokens are kept as OS strings so paths reach the engine byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: OsString,
    args: Vec<OsString>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<OsString>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Program followed by its arguments.
    pub fn tokens(&self) -> Vec<&OsStr> {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .collect()
    }

    /// Process builder for this invocation. Stdio is left to the caller.
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .tokens()
            .into_iter()
            .map(|token| quote_token(&token.to_string_lossy()))
            .collect();
        write!(f, "{}", rendered.join(" "))
    }
}

fn quote_token(token: &str) -> String {
    let needs_quotes = token.is_empty()
        || token
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '\\' | '$' | '`'));
    if needs_quotes {
        format!("'{}'", token.replace('\'', r"'\''"))
    } else {
        token.to_string()
    }
}

/// Paths starting with `-` would be read as flags; anchor them to the current directory.
fn path_token(path: &Path) -> OsString {
    if path.as_os_str().as_encoded_bytes().starts_with(b"-") {
        let mut token = OsString::from("./");
        token.push(path);
        token
    } else {
        path.as_os_str().to_os_string()
    }
}

/// Builds ffmpeg invocations. Pure: no I/O, identical inputs give identical commands.
pub struct CommandBuilder<'a> {
    config: &'a EngineConfig,
}

impl<'a> CommandBuilder<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Builds the ffmpeg arguments for converting `input_path` into `output_path`.
    ///
    /// Order: input, codec, bitrate, channels, sample rate, volume, then the
    /// configured log level and extra arguments, with the output path last.
    pub fn build(
        &self,
        format: &FormatSpec,
        input_path: &Path,
        output_path: &Path,
        options: &ResolvedOptions,
    ) -> CommandSpec {
        let codec = pinned_codec(format.name).unwrap_or(options.codec.as_str());

        let mut args: Vec<OsString> = vec!["-i".into(), path_token(input_path)];

        // Audio codec
        args.extend(["-c:a".into(), codec.into()]);

        // Bitrate
        args.extend(["-b:a".into(), options.bit_rate.as_str().into()]);

        // Channels
        args.extend(["-ac".into(), options.channels.to_string().into()]);

        // Sample rate
        args.extend(["-ar".into(), options.sample_rate.to_string().into()]);

        // Volume
        args.extend(["-af".into(), options.volume.to_filter().into()]);

        // Log level
        args.extend(["-loglevel".into(), self.config.log_level.as_str().into()]);

        // Extra args
        args.extend(self.config.extra_args.iter().map(OsString::from));

        args.push(if self.config.overwrite { "-y" } else { "-n" }.into());

        // Output
        args.push(path_token(output_path));

        CommandSpec::new(self.config.ffmpeg_path.as_os_str(), args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::converter::types::Volume;

    fn options(codec: &str) -> ResolvedOptions {
        ResolvedOptions {
            codec: codec.to_string(),
            bit_rate: "192k".to_string(),
            sample_rate: 44100,
            channels: 2,
            volume: Volume::from_db(0.0),
        }
    }

    fn codec_arg(command: &CommandSpec) -> &OsStr {
        let args = command.args();
        let index = args.iter().position(|a| a == "-c:a").unwrap();
        &args[index + 1]
    }

    #[test]
    fn test_build_token_order() {
        let config = EngineConfig::default();
        let mp3 = catalog::lookup("mp3").unwrap();
        let command = CommandBuilder::new(&config).build(
            mp3,
            Path::new("/music/song.wav"),
            Path::new("/tmp/out/song_converted.mp3"),
            &options("libmp3lame"),
        );

        assert_eq!(
            command.tokens(),
            vec![
                "ffmpeg",
                "-i",
                "/music/song.wav",
                "-c:a",
                "libmp3lame",
                "-b:a",
                "192k",
                "-ac",
                "2",
                "-ar",
                "44100",
                "-af",
                "volume=0dB",
                "-loglevel",
                "error",
                "-y",
                "/tmp/out/song_converted.mp3",
            ]
        );
    }

    #[test]
    fn test_build_is_idempotent() {
        let config = EngineConfig::default();
        let builder = CommandBuilder::new(&config);
        let aac = catalog::lookup("aac").unwrap();
        let resolved = options("aac");
        let first = builder.build(aac, Path::new("a.wav"), Path::new("out/a_converted.aac"), &resolved);
        let second = builder.build(aac, Path::new("a.wav"), Path::new("out/a_converted.aac"), &resolved);
        assert_eq!(first, second);
    }

    #[test]
    fn test_pinned_codecs_override_resolved_codec() {
        let config = EngineConfig::default();
        let builder = CommandBuilder::new(&config);
        for (format, expected) in [("flac", "flac"), ("wav", "pcm_s16le"), ("mp3", "libmp3lame")] {
            let spec = catalog::lookup(format).unwrap();
            let command = builder.build(spec, Path::new("in.ogg"), Path::new("out"), &options("aac"));
            assert_eq!(codec_arg(&command), expected, "format {format}");
        }
    }

    #[test]
    fn test_unpinned_formats_use_resolved_codec() {
        assert_eq!(pinned_codec("wma"), None);
        let config = EngineConfig::default();
        let wma = catalog::lookup("wma").unwrap();
        let command = CommandBuilder::new(&config).build(
            wma,
            Path::new("in.wav"),
            Path::new("out.wma"),
            &options("wmav2"),
        );
        assert_eq!(codec_arg(&command), "wmav2");
    }

    #[test]
    fn test_config_is_applied() {
        let config = EngineConfig::with_ffmpeg_path("/opt/ffmpeg/bin/ffmpeg")
            .with_log_level("warning")
            .with_overwrite(false)
            .with_extra_args(vec!["-map_metadata".to_string(), "-1".to_string()]);
        let flac = catalog::lookup("flac").unwrap();
        let command = CommandBuilder::new(&config).build(
            flac,
            Path::new("in.wav"),
            Path::new("out.flac"),
            &options("flac"),
        );

        assert_eq!(command.program(), "/opt/ffmpeg/bin/ffmpeg");
        let tail: Vec<&OsStr> = command.tokens().into_iter().rev().take(6).collect();
        assert_eq!(tail, vec!["out.flac", "-n", "-1", "-map_metadata", "warning", "-loglevel"]);
    }

    #[test]
    fn test_dash_paths_are_anchored() {
        let config = EngineConfig::default();
        let wav = catalog::lookup("wav").unwrap();
        let command = CommandBuilder::new(&config).build(
            wav,
            Path::new("-rf.mp3"),
            Path::new("-out/x_converted.wav"),
            &options("pcm_s16le"),
        );
        assert_eq!(command.args()[1], "./-rf.mp3");
        assert_eq!(command.args().last().unwrap(), "./-out/x_converted.wav");
    }

    #[test]
    fn test_output_file_path() {
        let mp3 = catalog::lookup("mp3").unwrap();
        assert_eq!(
            output_file_path(Path::new("/music/song.wav"), Path::new("/tmp/out"), mp3),
            PathBuf::from("/tmp/out/song_converted.mp3")
        );

        let flac = catalog::lookup("flac").unwrap();
        assert_eq!(
            output_file_path(Path::new("live.set.1.m4a"), Path::new("out"), flac),
            PathBuf::from("out/live.set.1_converted.flac")
        );
        assert_eq!(
            output_file_path(Path::new("noext"), Path::new("out"), flac),
            PathBuf::from("out/noext_converted.flac")
        );
    }

    #[test]
    fn test_display_quotes_tokens() {
        let command = CommandSpec::new("ffmpeg", ["-i", "My Song's.wav", "out.mp3"]);
        assert_eq!(command.to_string(), r"ffmpeg -i 'My Song'\''s.wav' out.mp3");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_paths_are_passed_through() {
        use std::os::unix::ffi::OsStrExt;

        let config = EngineConfig::default();
        let mp3 = catalog::lookup("mp3").unwrap();
        let input = Path::new("/music").join(OsStr::from_bytes(b"caf\xe9.wav"));
        let output = output_file_path(&input, Path::new("/tmp/out"), mp3);

        assert_eq!(
            output,
            Path::new("/tmp/out").join(OsStr::from_bytes(b"caf\xe9_converted.mp3"))
        );

        let command = CommandBuilder::new(&config).build(mp3, &input, &output, &options("libmp3lame"));
        assert_eq!(command.args()[1], input.as_os_str());
        assert_eq!(command.args().last().unwrap(), output.as_os_str());
        assert!(command.to_string().contains("caf\u{FFFD}.wav"));
    }
}

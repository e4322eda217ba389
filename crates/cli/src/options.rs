//! Raw option collection from command-line arguments.

use anyhow::{bail, Context, Result};
use serde_json::Value;

use tonecast_core::converter::normalize_key;
use tonecast_core::RawOptions;

/// Merges a JSON object of options with individual flags. Flags win.
///
/// JSON keys are normalized so a differently cased key cannot shadow a flag.
/// Values are passed through untouched; validation happens in the resolver.
pub fn collect_raw_options<const N: usize>(
    json: Option<&str>,
    flags: [(&str, Option<String>); N],
) -> Result<RawOptions> {
    let mut raw = RawOptions::new();

    if let Some(json) = json {
        let value: Value = serde_json::from_str(json).context("--options is not valid JSON")?;
        let Value::Object(map) = value else {
            bail!("--options must be a JSON object");
        };
        raw.extend(map.into_iter().map(|(key, value)| (normalize_key(&key), value)));
    }

    for (key, value) in flags {
        if let Some(value) = value {
            raw.insert(key.to_string(), Value::String(value));
        }
    }

    Ok(raw)
}

//! Log output format selected through `log_format` or `--log-format`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Event layout written by the shim's `tracing` subscriber.
///
/// Names are matched case-insensitively, so `JSON` and `json` both select
/// [`LogFormat::Json`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[derive(Deserialize, Serialize, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per event, with the event target and fields.
    #[default]
    Json,
    /// Abbreviated single-line text.
    Compact,
}

/// Parse failure for an unknown [`LogFormat`] name.
pub type LogFormatParseError = strum::ParseError;

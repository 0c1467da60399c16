//! User-facing message catalog.
//!
//! Every line autopack prints for the user (as opposed to log records) is
//! defined here. Templates carry `{NAME}` placeholders that [`Message::render`]
//! fills in; placeholders left without a value are removed.

use autopack_core::Interaction;

/// Writes `line` plus a newline to the normal output channel.
pub fn say(io: &mut dyn Interaction, line: &str) {
    io.write_out(line);
    io.write_out("\n");
}

/// Keys of the message catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Goodbye,
    InteractiveMode,
    CompressionRatio,
    OperationTime,
    ThreadsInfo,

    ErrorLine,
    UnexpectedError,

    AskSourcePath,
    SourceInfo,
    DetectedOperation,
    AskOperation,
    OperationCompress,
    OperationDecompress,
    AskFormat,
    AskTargetArchive,
    AskTargetDirectory,
    AskDeleteSource,
    AskSetPassword,
    AskHasPassword,
    EnterPassword,
    ConfirmPassword,
    PasswordMismatch,
    DeletingSource,
    SourceDeleted,
    DeleteSourceFailed,

    Compressing,
    Decompressing,
    Verifying,
    VerificationSuccess,
    VerificationFailed,
    OperationComplete,
    OperationCanceled,
    WarningTarPassword,
    WarningFiltersIgnored,
    SplitZipDetected,
    FilteringFiles,
}

impl Message {
    /// Raw template text.
    pub const fn template(self) -> &'static str {
        match self {
            Message::Goodbye => "Thank you for using autopack, goodbye!",
            Message::InteractiveMode => "Interactive mode started",
            Message::CompressionRatio => "Compression ratio: {RATIO}% (saved {SAVED} bytes)",
            Message::OperationTime => "Operation completed in {TIME} seconds",
            Message::ThreadsInfo => "Using {COUNT} threads for parallel processing",

            Message::ErrorLine => "Error: {MESSAGE}",
            Message::UnexpectedError => "An unexpected error occurred: {MESSAGE}",

            Message::AskSourcePath => "Please enter source path: ",
            Message::SourceInfo => "Source: {SOURCE_PATH} ({TYPE})",
            Message::DetectedOperation => "Detected operation: {OPERATION}. Change? (y/n): ",
            Message::AskOperation => "Please select operation type:",
            Message::OperationCompress => "1. Compress",
            Message::OperationDecompress => "2. Decompress",
            Message::AskFormat => "Please select compression format:",
            Message::AskTargetArchive => "Please enter target archive path: ",
            Message::AskTargetDirectory => "Please enter target directory (default: './'): ",
            Message::AskDeleteSource => "Delete source '{SOURCE_PATH}' after operation? (y/n): ",
            Message::AskSetPassword => "Set a password for the archive? (y/n): ",
            Message::AskHasPassword => "Does the archive require a password? (y/n): ",
            Message::EnterPassword => "Enter password: ",
            Message::ConfirmPassword => "Confirm password: ",
            Message::PasswordMismatch => "Passwords do not match. Please try again.",
            Message::DeletingSource => "Deleting source: {SOURCE_PATH}",
            Message::SourceDeleted => "Source deleted.",
            Message::DeleteSourceFailed => "Warning: Failed to delete source '{SOURCE_PATH}': {REASON}",

            Message::Compressing => "Compressing...",
            Message::Decompressing => "Decompressing...",
            Message::Verifying => "Verifying archive integrity...",
            Message::VerificationSuccess => "Archive verification successful",
            Message::VerificationFailed => "Archive verification failed",
            Message::OperationComplete => "Operation complete",
            Message::OperationCanceled => "Operation canceled",
            Message::WarningTarPassword => {
                "Warning: Password protection is not supported for tar formats. The password will be ignored."
            }
            Message::WarningFiltersIgnored => {
                "Warning: Include/exclude patterns are not supported for {FORMAT} and will be ignored."
            }
            Message::SplitZipDetected => "Split ZIP archive detected, using 7z for extraction.",
            Message::FilteringFiles => "Filtering files: included {INCLUDED}, excluded {EXCLUDED}",
        }
    }

    /// Renders the template with the given placeholder values.
    ///
    /// # Parameters
    ///
    /// * `values` - `(NAME, value)` pairs; `NAME` is given without braces
    ///
    /// # Returns
    ///
    /// The finished message. Every `{...}` group that no pair fills in is
    /// dropped from the output. Values are inserted verbatim.
    pub fn render<V: AsRef<str>>(self, values: &[(&str, V)]) -> String {
        let template = self.template();
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            out.push_str(&rest[..start]);

            let name = &rest[start + 1..start + len];
            if let Some((_, value)) = values.iter().find(|(key, _)| *key == name) {
                out.push_str(value.as_ref());
            }
            rest = &rest[start + len + 1..];
        }

        out.push_str(rest);
        out
    }

    /// Renders a template that has no placeholders.
    pub fn text(self) -> String {
        self.render::<&str>(&[])
    }
}

use std::path::PathBuf;

use clap::Parser;

/// Patient intake chat that hands the doctor a PDF summary.
#[derive(Debug, Parser)]
#[command(name = "clinic-intake", version, about)]
pub struct Cli {
    /// Directory for conversation.json and clinic_chatbot_report.pdf
    #[arg(long, short = 'o', default_value = ".")]
    pub output_dir: PathBuf,

    /// Model name (overrides CLINIC_INTAKE_MODEL)
    #[arg(long)]
    pub model: Option<String>,

    /// Chat-completions base URL (overrides OPENAI_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_current_directory() {
        let cli = Cli::parse_from(["clinic-intake"]);
        assert_eq!(cli.output_dir, PathBuf::from("."));
        assert!(cli.model.is_none());
        assert!(cli.base_url.is_none());
    }

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from([
            "clinic-intake",
            "-o",
            "/tmp/reports",
            "--model",
            "gpt-4o-mini",
            "--base-url",
            "http://localhost:8080/v1",
        ]);
        assert_eq!(cli.output_dir, PathBuf::from("/tmp/reports"));
        assert_eq!(cli.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8080/v1"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

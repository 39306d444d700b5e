//! 명령행 인자

use crate::app::settings::{SeparatorSetting, Settings, SETTINGS_ENV};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "diredit",
    version,
    about = "Directory path input with tab completion and a browse dialog"
)]
pub struct Args {
    /// Initial directory
    pub path: Option<String>,

    /// Label shown before the input field
    #[arg(long)]
    pub label: Option<String>,

    /// Seed a previously used directory (repeatable)
    #[arg(long = "history", value_name = "DIR")]
    pub history: Vec<String>,

    /// Path separator used for display
    #[arg(long, value_enum)]
    pub separator: Option<SeparatorSetting>,

    /// Disable directory history
    #[arg(long)]
    pub no_history: bool,

    /// Theme name (dark, light, high_contrast or a custom theme)
    #[arg(long)]
    pub theme: Option<String>,

    /// Settings file location
    #[arg(long, value_name = "FILE", env = SETTINGS_ENV)]
    pub settings: Option<PathBuf>,
}

impl Args {
    /// 명령행 값으로 설정을 덮어쓴 실행용 설정
    pub fn apply(&self, settings: &Settings) -> Settings {
        let mut runtime = settings.clone();
        if let Some(label) = &self.label {
            runtime.label = label.clone();
        }
        if let Some(separator) = self.separator {
            runtime.separator = separator;
        }
        if let Some(theme) = &self.theme {
            runtime.theme = theme.clone();
        }
        if self.no_history {
            runtime.history_enabled = false;
        }
        runtime.history.extend(self.history.iter().cloned());
        runtime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_flags() {
        let args = Args::try_parse_from([
            "diredit",
            "/srv",
            "--label",
            "Target:",
            "--history",
            "/a",
            "--history",
            "/b",
            "--separator",
            "backslash",
            "--theme",
            "light",
        ])
        .unwrap();

        assert_eq!(args.path.as_deref(), Some("/srv"));
        assert_eq!(args.label.as_deref(), Some("Target:"));
        assert_eq!(args.history, vec!["/a", "/b"]);
        assert_eq!(args.separator, Some(SeparatorSetting::Backslash));
        assert_eq!(args.theme.as_deref(), Some("light"));
        assert!(!args.no_history);
    }

    #[test]
    fn test_cli_overrides_settings() {
        let settings = Settings {
            history: vec!["/saved".to_string()],
            ..Settings::default()
        };
        let args = Args {
            label: Some("Output:".to_string()),
            history: vec!["/cli".to_string()],
            no_history: true,
            ..Args::default()
        };

        let runtime = args.apply(&settings);
        assert_eq!(runtime.label, "Output:");
        assert_eq!(runtime.history, vec!["/saved", "/cli"]);
        assert!(!runtime.history_enabled);
        assert_eq!(runtime.theme, settings.theme);
    }

    #[test]
    fn test_unknown_separator_is_rejected() {
        assert!(Args::try_parse_from(["diredit", "--separator", "colon"]).is_err());
    }
}

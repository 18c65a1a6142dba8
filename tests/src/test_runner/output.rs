pub const MAX_OUTPUT_SIZE: usize = 1024 * 1024; // 1MB limit

#[derive(Debug)]
pub struct PhaseOutput {
    pub phase_name: String,
    pub output: String,
    pub success: bool,
    pub truncated: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum OutputFilter {
    Test,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestPhaseColor {
    Balance,
    Rpc,
    Shrink,
    Other,
}

impl TestPhaseColor {
    pub fn from_phase_name(phase_name: &str) -> Self {
        match phase_name {
            "Balance Tests" => Self::Balance,
            "RPC Tests" => Self::Rpc,
            "Shrink Balance Tests" => Self::Shrink,
            // Fallback patterns
            name if name.to_lowercase().contains("shrink") => Self::Shrink,
            name if name.to_lowercase().contains("balance") => Self::Balance,
            name if name.to_lowercase().contains("rpc") => Self::Rpc,
            _ => Self::Other,
        }
    }

    pub fn ansi_code(&self) -> &'static str {
        match self {
            Self::Balance => "\x1b[32m", // Green
            Self::Rpc => "\x1b[34m",     // Blue
            Self::Shrink => "\x1b[35m",  // Magenta
            Self::Other => "\x1b[39m",
        }
    }

    pub fn reset_code() -> &'static str {
        "\x1b[0m"
    }

    pub fn colorize(&self, text: &str) -> String {
        format!("{}{}{}", self.ansi_code(), text, Self::reset_code())
    }

    pub fn colorize_with_controlled_flow(&self, text: &str) -> String {
        // Remove all existing newlines and add controlled ones with proper spacing
        let cleaned_text = text.replace('\n', "");
        let controlled_text = format!("{cleaned_text}\n\n");
        format!("{}{}{}", self.ansi_code(), controlled_text, Self::reset_code())
    }
}

impl OutputFilter {
    pub fn should_show_line(&self, line: &str, show_verbose: bool) -> bool {
        match self {
            Self::Test => {
                line.contains("test result:")
                    || line.contains("FAILED")
                    || line.contains("failures:")
                    || line.contains("panicked")
                    || line.contains("assertion")
                    || line.contains("Balance mismatch")
                    || line.contains("ERROR")
                    || (show_verbose
                        && (line.contains("Compiling")
                            || line.contains("running ")
                            || line.starts_with("test ")
                            || line.contains("Finished")
                            || line.contains("INFO")
                            || line.contains("warning:")
                            || line.contains("error:")))
            }
        }
    }
}

pub fn filter_command_output(output: &str, filter: OutputFilter, show_verbose: bool) -> String {
    if show_verbose {
        return clean_multiple_newlines(output);
    }

    let filtered = output
        .lines()
        .filter(|line| filter.should_show_line(line, show_verbose))
        .collect::<Vec<_>>()
        .join("\n");

    clean_multiple_newlines(&filtered)
}

fn clean_multiple_newlines(text: &str) -> String {
    let mut result = text.to_string();
    while result.contains("\n\n\n") {
        result = result.replace("\n\n\n", "\n\n");
    }
    result.trim_end().to_string()
}

pub fn filter_and_colorize_output(
    output: &str,
    filter: OutputFilter,
    show_verbose: bool,
    color: TestPhaseColor,
) -> String {
    let filtered = filter_command_output(output, filter, show_verbose);
    if filtered.is_empty() {
        return filtered;
    }
    color.colorize(&filtered)
}

pub fn limit_output_size(output: String) -> (String, bool) {
    if output.len() > MAX_OUTPUT_SIZE {
        let mut cut = MAX_OUTPUT_SIZE;
        while !output.is_char_boundary(cut) {
            cut -= 1;
        }
        let truncated_output =
            format!("{}... (truncated {} bytes)", &output[..cut], output.len() - cut);
        (truncated_output, true)
    } else {
        (output, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARGO_OUTPUT: &str = "   Compiling tests v0.1.0\n\
        running 1 test\n\
        test transfers::test_balance_transfers ... FAILED\n\n\n\n\
        failures:\n\
        Balance mismatch for 0x1111111111111111111111111111111111111111 at 'pending': expected 0, got 512\n\
        test result: FAILED. 0 passed; 1 failed";

    #[test]
    fn test_quiet_filter_keeps_failures() {
        let filtered = filter_command_output(CARGO_OUTPUT, OutputFilter::Test, false);

        assert!(filtered.contains("test result: FAILED"));
        assert!(filtered.contains("Balance mismatch"));
        assert!(!filtered.contains("Compiling"));
    }

    #[test]
    fn test_verbose_keeps_everything_but_collapses_blank_lines() {
        let filtered = filter_command_output(CARGO_OUTPUT, OutputFilter::Test, true);

        assert!(filtered.contains("Compiling"));
        assert!(!filtered.contains("\n\n\n"));
    }

    #[test]
    fn test_phase_colors() {
        assert_eq!(TestPhaseColor::from_phase_name("Balance Tests"), TestPhaseColor::Balance);
        assert_eq!(TestPhaseColor::from_phase_name("Custom shrink run"), TestPhaseColor::Shrink);
        assert_eq!(TestPhaseColor::from_phase_name("misc"), TestPhaseColor::Other);
    }

    #[test]
    fn test_limit_output_size() {
        let (small, truncated) = limit_output_size("ok".to_string());
        assert_eq!(small, "ok");
        assert!(!truncated);

        let (limited, truncated) = limit_output_size("é".repeat(MAX_OUTPUT_SIZE));
        assert!(truncated);
        assert!(limited.ends_with("bytes)"));
    }
}

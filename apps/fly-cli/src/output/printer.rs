//! Consistent formatting for user-facing messages

fn use_color() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// Print a success message (green checkmark)
pub fn print_success(message: &str) {
    if use_color() {
        println!("\x1b[32m✓\x1b[0m {}", message);
    } else {
        println!("{}", message);
    }
}

/// Print a warning message (yellow) to stderr
pub fn print_warning(message: &str) {
    if use_color() {
        eprintln!("\x1b[33mwarning:\x1b[0m {}", message);
    } else {
        eprintln!("warning: {}", message);
    }
}

/// Print an informational message
pub fn print_info(message: &str) {
    if use_color() {
        println!("\x1b[34mℹ\x1b[0m {}", message);
    } else {
        println!("{}", message);
    }
}

/// `enabled` / `disabled` for auth method summaries
pub fn status_label(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_label() {
        assert_eq!(status_label(true), "enabled");
        assert_eq!(status_label(false), "disabled");
    }
}

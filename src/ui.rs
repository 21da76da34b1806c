use colored::Colorize;

/// Print a success message
pub fn success_message(message: &str) {
    println!("{} {}", "✅".green(), message.green());
}

/// Print a warning message
pub fn warning_message(message: &str) {
    println!("{} {}", "⚠️ ".yellow(), message.yellow());
}

/// Report section failures go to stderr so stdout stays a clean report
pub fn error_message(message: &str) {
    eprintln!("{} {}", "❌".red(), message.red().bold());
}

/// Bold cyan title followed by a rule of the same width
pub fn section_header(title: &str) {
    println!("\n{}", title.cyan().bold());
    println!("{}", "─".repeat(title.chars().count()).cyan());
}

pub fn info_message(message: &str) {
    println!("{} {}", "ℹ️ ".blue(), message.blue());
}

/// `label: value` with the label emphasised
pub fn field_line(label: &str, value: &str) {
    if value.is_empty() {
        println!("{} {}", format!("{}:", label).bold(), "-".dimmed());
    } else {
        println!("{} {}", format!("{}:", label).bold(), value);
    }
}

//! Console adapter for development/testing

use crate::domain::traits::Notifier;

/// Toast stand-in that prints notices to the terminal
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn error(&self, text: &str) {
        println!("[!] {}", text);
    }

    fn success(&self, text: &str) {
        println!("[ok] {}", text);
    }
}

/// Prompt and read one trimmed line from stdin
pub fn read_line(prompt: &str) -> Option<String> {
    use std::io::Write;

    print!("{}", prompt);
    std::io::stdout().flush().ok()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input).ok()?;
    Some(input.trim().to_string())
}

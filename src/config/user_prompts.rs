//! User interaction and prompts for configuration setup
//!
//! Used when no config file exists and no environment override is set.

use crate::constants::DEFAULT_API_DOMAIN;
use crate::error::AppError;
use tokio::io::{self, AsyncBufReadExt};

/// Prompts the user for the scoreboard API domain.
///
/// An empty answer selects the local default (`http://localhost:8080`).
///
/// # Example
/// ```no_run
/// use startpage_scoreboard::config::user_prompts::prompt_for_api_domain;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let api_domain = prompt_for_api_domain().await?;
/// println!("Got API domain: {}", api_domain);
/// # Ok(())
/// # }
/// ```
pub async fn prompt_for_api_domain() -> Result<String, AppError> {
    println!("Please enter your scoreboard API domain [{DEFAULT_API_DOMAIN}]: ");
    let mut input = String::new();
    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin);
    reader.read_line(&mut input).await?;
    Ok(answer_or_default(&input))
}

fn answer_or_default(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        DEFAULT_API_DOMAIN.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_answer_uses_default_domain() {
        assert_eq!(answer_or_default("\n"), DEFAULT_API_DOMAIN);
        assert_eq!(answer_or_default("  api.example.com \n"), "api.example.com");
    }
}

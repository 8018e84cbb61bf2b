use loan_amortization_core::amortization::LoanInput;
use std::io::{self, Read};

/// True when stdin is a terminal rather than a pipe or file.
pub fn is_interactive() -> bool {
    atty::is(atty::Stream::Stdin)
}

/// Loan terms piped on stdin as JSON. `None` on a terminal or an empty pipe.
pub fn read_loan() -> Result<Option<LoanInput>, Box<dyn std::error::Error>> {
    if is_interactive() {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_loan(&buffer)
}

fn parse_loan(buffer: &str) -> Result<Option<LoanInput>, Box<dyn std::error::Error>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let loan = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse piped loan terms: {e}"))?;
    Ok(Some(loan))
}

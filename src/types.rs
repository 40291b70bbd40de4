/// A text message lifted out of a webhook event, waiting to be handled.
#[derive(Debug)]
pub struct InboundMessage {
    pub text: String,
    pub reply_token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Borrow { name: String, plate: String },
    Return { name: String, plate: String },
    Status { plate: String },
}

#[derive(Debug, PartialEq)]
pub enum ParseOutcome {
    Command(Command),
    /// Recognized verb with the wrong shape; the payload is the usage string
    /// to send back.
    Malformed(&'static str),
    /// Not a command at all. No reply is sent for these.
    Ignored,
}

const USAGE_BORROW: &str = "invalid format, use: borrow <name> <plate>";
const USAGE_RETURN: &str = "invalid format, use: return <name> <plate>";
const USAGE_STATUS: &str = "invalid format, use: status <plate>";

pub fn parse(text: &str) -> ParseOutcome {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    match tokens.first() {
        Some(&"borrow") => {
            if tokens.len() == 3 {
                ParseOutcome::Command(Command::Borrow {
                    name: tokens[1].to_string(),
                    plate: tokens[2].to_string(),
                })
            } else {
                ParseOutcome::Malformed(USAGE_BORROW)
            }
        }
        Some(&"return") => {
            if tokens.len() == 3 {
                ParseOutcome::Command(Command::Return {
                    name: tokens[1].to_string(),
                    plate: tokens[2].to_string(),
                })
            } else {
                ParseOutcome::Malformed(USAGE_RETURN)
            }
        }
        Some(&"status") => {
            // Tokens past the plate are ignored, not rejected.
            if tokens.len() >= 2 {
                ParseOutcome::Command(Command::Status {
                    plate: tokens[1].to_string(),
                })
            } else {
                ParseOutcome::Malformed(USAGE_STATUS)
            }
        }
        _ => ParseOutcome::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_borrow() {
        assert_eq!(
            parse("borrow Alice ABC-123"),
            ParseOutcome::Command(Command::Borrow {
                name: "Alice".to_string(),
                plate: "ABC-123".to_string(),
            })
        );
    }

    #[test]
    fn parses_return() {
        assert_eq!(
            parse("return Bob ABC-123"),
            ParseOutcome::Command(Command::Return {
                name: "Bob".to_string(),
                plate: "ABC-123".to_string(),
            })
        );
    }

    #[test]
    fn parses_status_and_ignores_trailing_tokens() {
        assert_eq!(
            parse("status XYZ-456 please"),
            ParseOutcome::Command(Command::Status {
                plate: "XYZ-456".to_string(),
            })
        );
    }

    #[test]
    fn borrow_requires_exactly_three_tokens() {
        assert_eq!(parse("borrow ABC-123"), ParseOutcome::Malformed(USAGE_BORROW));
        assert_eq!(
            parse("borrow Alice ABC-123 today"),
            ParseOutcome::Malformed(USAGE_BORROW)
        );
    }

    #[test]
    fn return_requires_exactly_three_tokens() {
        assert_eq!(parse("return ABC-123"), ParseOutcome::Malformed(USAGE_RETURN));
    }

    #[test]
    fn bare_status_is_a_format_error() {
        assert_eq!(parse("status"), ParseOutcome::Malformed(USAGE_STATUS));
        assert_eq!(parse("  status  "), ParseOutcome::Malformed(USAGE_STATUS));
    }

    #[test]
    fn unrecognized_text_is_ignored() {
        assert_eq!(parse("hello there"), ParseOutcome::Ignored);
        assert_eq!(parse(""), ParseOutcome::Ignored);
        assert_eq!(parse("   "), ParseOutcome::Ignored);
        // Verbs match whole tokens, not prefixes.
        assert_eq!(parse("borrowing Alice ABC-123"), ParseOutcome::Ignored);
    }
}

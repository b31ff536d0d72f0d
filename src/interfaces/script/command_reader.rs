use crate::domain::payment::PhoneNumber;
use crate::error::{PortalError, Result};
use std::io::BufRead;
use std::str::FromStr;

/// One scripted UI event.
#[derive(Debug, Clone, PartialEq)]
pub enum PortalCommand {
    List,
    Select(String),
    Cancel,
    Pay(PhoneNumber),
    Wait,
    Dismiss,
    Retry,
    View,
}

impl FromStr for PortalCommand {
    type Err = PortalError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };

        let command = match (keyword.to_ascii_lowercase().as_str(), rest) {
            ("list", "") => PortalCommand::List,
            ("select", id) if !id.is_empty() => PortalCommand::Select(id.to_string()),
            ("cancel", "") => PortalCommand::Cancel,
            ("pay", phone) if !phone.is_empty() => PortalCommand::Pay(PhoneNumber::new(phone)),
            ("wait", "") => PortalCommand::Wait,
            ("dismiss", "") => PortalCommand::Dismiss,
            ("retry", "") => PortalCommand::Retry,
            ("view", "") => PortalCommand::View,
            _ => return Err(PortalError::ParseCommand(line.to_string())),
        };
        Ok(command)
    }
}

/// Reads UI events from a line-oriented script.
///
/// Blank lines and lines starting with `#` are skipped. Each remaining line
/// yields one parsed command, so a malformed line does not stop the stream.
/// A read error is yielded once and ends the stream.
pub struct CommandReader<R: BufRead> {
    source: R,
}

impl<R: BufRead> CommandReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn commands(self) -> impl Iterator<Item = Result<PortalCommand>> {
        let mut failed = false;
        self.source
            .lines()
            .map_while(move |line| {
                if failed {
                    return None;
                }
                match line {
                    Ok(line) => Some(parse_line(&line)),
                    Err(e) => {
                        failed = true;
                        Some(Some(Err(PortalError::from(e))))
                    }
                }
            })
            .flatten()
    }
}

fn parse_line(line: &str) -> Option<Result<PortalCommand>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        None
    } else {
        Some(trimmed.parse())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_valid_script() {
        let script = "# buy the popular plan\nlist\nSELECT 2\n\npay  0712 345 678\nwait\ndismiss\n";
        let commands: Vec<PortalCommand> = CommandReader::new(script.as_bytes())
            .commands()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(
            commands,
            vec![
                PortalCommand::List,
                PortalCommand::Select("2".to_string()),
                PortalCommand::Pay(PhoneNumber::new("0712 345 678")),
                PortalCommand::Wait,
                PortalCommand::Dismiss,
            ]
        );
    }

    #[test]
    fn test_reader_malformed_line() {
        let script = "select\nfly away\ncancel";
        let results: Vec<Result<PortalCommand>> =
            CommandReader::new(script.as_bytes()).commands().collect();

        assert_eq!(results.len(), 3);
        assert!(matches!(results[0], Err(PortalError::ParseCommand(_))));
        assert!(matches!(results[1], Err(PortalError::ParseCommand(_))));
        assert_eq!(results[2].as_ref().unwrap(), &PortalCommand::Cancel);
    }

    struct BrokenSource;

    impl std::io::Read for BrokenSource {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("device unplugged"))
        }
    }

    #[test]
    fn test_reader_stops_after_read_error() {
        let reader = CommandReader::new(std::io::BufReader::new(BrokenSource));
        let results: Vec<Result<PortalCommand>> = reader.commands().take(10).collect();

        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(PortalError::IoError(_))));
    }

    #[test]
    fn test_trailing_argument_rejected() {
        assert!("wait 5".parse::<PortalCommand>().is_err());
        assert!("pay".parse::<PortalCommand>().is_err());
    }
}

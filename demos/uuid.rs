//! Simple command that prints one or '-n count' UUID strings
//!
//! Usage: uuid [-v 1|4|5] [-n count] [-s namespace] [name]

use std::{env, io, io::Write, process::ExitCode};

use rfc4122::{namespace, Error, V5Options};

#[derive(Debug, Default, PartialEq)]
struct Args {
    version: Option<u8>,
    count: Option<usize>,
    namespace: Option<String>,
    name: Option<String>,
}

fn main() -> io::Result<ExitCode> {
    let args = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(opt) => opt,
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!(
                    "Usage: {} [-v 1|4|5] [-n count] [-s namespace] [name]",
                    program.as_deref().unwrap_or("uuid")
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    let mut buf = io::BufWriter::new(io::stdout());
    for _ in 0..args.count.unwrap_or(1) {
        let uuid = match args.version.unwrap_or(4) {
            1 => loop {
                match rfc4122::uuid1() {
                    Ok(uuid) => break uuid,
                    Err(Error::TicksExhausted) => std::thread::yield_now(),
                    Err(err) => {
                        eprintln!("Error: {}", err);
                        return Ok(ExitCode::FAILURE);
                    }
                }
            },
            5 => {
                let opts = V5Options::new()
                    .namespace(args.namespace.as_deref().unwrap_or(namespace::DNS));
                rfc4122::uuid5(args.name.as_deref().unwrap_or_default(), &opts)
            }
            _ => rfc4122::uuid4(),
        };
        writeln!(buf, "{}", uuid)?;
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-v" | "-n" | "-s" => {
                let Some(value) = args.next() else {
                    return Err(format!("argument to option '{}' missing", &arg[1..]));
                };
                match arg.as_str() {
                    "-v" => {
                        let Ok(v @ (1 | 4 | 5)) = value.parse::<u8>() else {
                            return Err(format!("invalid argument to option 'v': '{}'", value));
                        };
                        if parsed.version.replace(v).is_some() {
                            return Err("option 'v' given more than once".to_owned());
                        }
                    }
                    "-n" => {
                        let Ok(c) = value.parse() else {
                            return Err(format!("invalid argument to option 'n': '{}'", value));
                        };
                        if parsed.count.replace(c).is_some() {
                            return Err("option 'n' given more than once".to_owned());
                        }
                    }
                    _ => {
                        if parsed.namespace.replace(value).is_some() {
                            return Err("option 's' given more than once".to_owned());
                        }
                    }
                }
            }
            _ if arg.starts_with('-') => {
                return Err(format!("unrecognized argument '{}'", arg));
            }
            _ => {
                if parsed.name.replace(arg).is_some() {
                    return Err("more than one name given".to_owned());
                }
            }
        }
    }

    if parsed.version.unwrap_or(4) == 5 {
        if parsed.name.is_none() {
            return Err("name required for version 5".to_owned());
        }
    } else if parsed.name.is_some() || parsed.namespace.is_some() {
        return Err("name and namespace apply to version 5 only".to_owned());
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::{namespace, parse_args, Args};

    fn parse(args: &[&str]) -> Result<Args, String> {
        parse_args(args.iter().map(|e| e.to_string()))
    }

    /// Parses valid argument lists
    #[test]
    fn parses_valid_argument_lists() {
        assert_eq!(parse(&[]), Ok(Args::default()));
        assert_eq!(
            parse(&["-v", "1", "-n", "3"]),
            Ok(Args {
                version: Some(1),
                count: Some(3),
                ..Default::default()
            })
        );
        assert_eq!(
            parse(&["-v", "5", "-s", namespace::URL, "example.com"]),
            Ok(Args {
                version: Some(5),
                namespace: Some(namespace::URL.to_owned()),
                name: Some("example.com".to_owned()),
                ..Default::default()
            })
        );
    }

    /// Rejects invalid argument lists
    #[test]
    fn rejects_invalid_argument_lists() {
        for e in [
            &["-v"][..],
            &["-v", "3"],
            &["-v", "4", "-v", "4"],
            &["-n", "x"],
            &["-x"],
            &["-v", "5"],
            &["name"],
            &["-v", "5", "a", "b"],
        ] {
            assert!(parse(e).is_err(), "{:?}", e);
        }
    }
}
